use crate::{
    dataset::{self, Dataset},
    pacer::Pacer,
    render::{render, Surface},
    sorting::{Algorithm, SortProcedure, StepOutcome},
    theme::Palette,
};
use std::{
    fmt,
    str::FromStr,
    time::{Duration, Instant},
};

/// Identifies a session. Tokens are handed out in increasing order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct SessionToken(u64);

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The outcome of a session that ran to completion.
#[derive(Clone, Debug, PartialEq)]
pub(crate) struct SessionReport {
    pub(crate) token: SessionToken,
    pub(crate) algorithm: Algorithm,
    pub(crate) elapsed: Duration,
    pub(crate) frames: u64,
    pub(crate) comparisons: u64,
    pub(crate) swaps: u64,
    pub(crate) writes: u64,
}

impl SessionReport {
    /// The elapsed time in fractional milliseconds.
    pub(crate) fn elapsed_ms(&self) -> f64 {
        self.elapsed.as_secs_f64() * 1000.0
    }

    pub(crate) fn time_text(&self) -> String {
        format!("Sort time: {:.2} ms", self.elapsed_ms())
    }

    pub(crate) fn description(&self) -> &'static str {
        self.algorithm.description()
    }
}

/// What happened during a call to [SessionController::tick].
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Tick {
    /// There is no session running.
    Idle,

    /// The current step delay is still pending.
    Waiting(Duration),

    /// A step was performed and rendered.
    Rendered { token: SessionToken, highlight: Option<usize> },

    /// The session finished sorting and was retired.
    Finished(SessionReport),
}

struct Session {
    token: SessionToken,
    algorithm: Algorithm,
    dataset: Dataset,
    procedure: Box<dyn SortProcedure<u32>>,
    pacer: Pacer,
    started: Instant,
    frames: u64,
}

impl Session {
    fn report(self, now: Instant) -> SessionReport {
        SessionReport {
            token: self.token,
            algorithm: self.algorithm,
            elapsed: now.saturating_duration_since(self.started),
            frames: self.frames,
            comparisons: self.dataset.comparisons(),
            swaps: self.dataset.swaps(),
            writes: self.dataset.writes(),
        }
    }
}

/// Runs one sort session at a time, interleaving algorithm steps with paced renders.
///
/// The controller never blocks: the host loop calls [SessionController::tick] whenever it wants,
/// and a step only runs once the delay following the previous render has elapsed. Starting a new
/// session retires the running one immediately, so two sorts never draw over each other.
pub(crate) struct SessionController {
    bars: usize,
    step_delay: Duration,
    last_token: u64,
    active: Option<Session>,
}

impl SessionController {
    pub(crate) fn new(bars: usize, step_delay: Duration) -> Self {
        Self { bars, step_delay, last_token: 0, active: None }
    }

    /// Start sorting a fresh dataset sized to fit the surface.
    pub(crate) fn start<S>(
        &mut self,
        algorithm: Algorithm,
        surface: &mut S,
        palette: &Palette,
        now: Instant,
    ) -> SessionToken
    where
        S: Surface + ?Sized,
    {
        let count = self.bars.min(surface.width() as usize);
        let dataset = dataset::generate(count, surface.height());
        self.start_with(algorithm, dataset, surface, palette, now)
    }

    /// Start sorting the given dataset.
    pub(crate) fn start_with<S>(
        &mut self,
        algorithm: Algorithm,
        dataset: Dataset,
        surface: &mut S,
        palette: &Palette,
        now: Instant,
    ) -> SessionToken
    where
        S: Surface + ?Sized,
    {
        if let Some(previous) = self.active.take() {
            log::debug!(
                "cancelling session {} ({}) after {} frames",
                previous.token,
                previous.algorithm,
                previous.frames
            );
        }
        self.last_token += 1;
        let token = SessionToken(self.last_token);
        log::info!("starting session {token}: {algorithm} over {} values", dataset.len());

        render(surface, dataset.values(), None, palette);
        self.active = Some(Session {
            token,
            algorithm,
            dataset,
            procedure: algorithm.procedure(),
            pacer: Pacer::new(self.step_delay),
            started: now,
            frames: 0,
        });
        token
    }

    /// Start a session for an algorithm identifier.
    ///
    /// Identifiers that don't name a known algorithm are ignored: nothing is rendered and the
    /// running session, if any, is left alone.
    pub(crate) fn select<S>(
        &mut self,
        id: &str,
        surface: &mut S,
        palette: &Palette,
        now: Instant,
    ) -> Option<SessionToken>
    where
        S: Surface + ?Sized,
    {
        match Algorithm::from_str(id) {
            Ok(algorithm) => Some(self.start(algorithm, surface, palette, now)),
            Err(_) => {
                log::debug!("ignoring unknown algorithm '{id}'");
                None
            }
        }
    }

    /// Advance the running session by at most one step.
    pub(crate) fn tick<S>(&mut self, now: Instant, surface: &mut S, palette: &Palette) -> Tick
    where
        S: Surface + ?Sized,
    {
        let Some(session) = self.active.as_mut() else {
            return Tick::Idle;
        };
        if !session.pacer.is_ready(now) {
            return Tick::Waiting(session.pacer.remaining(now));
        }
        match session.procedure.step(&mut session.dataset) {
            StepOutcome::Step(step) => {
                render(surface, session.dataset.values(), step.highlight, palette);
                session.frames += 1;
                session.pacer.arm(now);
                Tick::Rendered { token: session.token, highlight: step.highlight }
            }
            StepOutcome::Done => {
                render(surface, session.dataset.values(), None, palette);
                let Some(session) = self.active.take() else {
                    return Tick::Idle;
                };
                let report = session.report(now);
                log::info!(
                    "session {} finished: {} in {:.2}ms, {} frames",
                    report.token,
                    report.algorithm,
                    report.elapsed_ms(),
                    report.frames
                );
                Tick::Finished(report)
            }
        }
    }

    /// The instant at which the next step may run, if a session is waiting on its pacer.
    pub(crate) fn next_deadline(&self) -> Option<Instant> {
        self.active.as_ref().and_then(|session| session.pacer.deadline())
    }

    pub(crate) fn is_running(&self) -> bool {
        self.active.is_some()
    }

    #[cfg(test)]
    pub(crate) fn current_token(&self) -> Option<SessionToken> {
        self.active.as_ref().map(|session| session.token)
    }

    pub(crate) fn current_algorithm(&self) -> Option<Algorithm> {
        self.active.as_ref().map(|session| session.algorithm)
    }

    #[cfg(test)]
    pub(crate) fn values(&self) -> Option<&[u32]> {
        self.active.as_ref().map(|session| session.dataset.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{render::Canvas, theme::Theme};
    use rstest::rstest;
    use strum::IntoEnumIterator;

    const DELAY: Duration = Duration::from_millis(20);

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn rendered(values: &[u32], highlight: Option<usize>, width: u32, height: u32) -> Canvas {
        let mut canvas = Canvas::new(width, height);
        render(&mut canvas, values, highlight, Theme::default().palette());
        canvas
    }

    #[test]
    fn paced_bubble_session() {
        let theme = Theme::default();
        let palette = theme.palette();
        let mut canvas = Canvas::new(8, 10);
        let mut controller = SessionController::new(50, DELAY);
        let start = Instant::now();

        let token =
            controller.start_with(Algorithm::Bubble, Dataset::new(vec![5, 3, 8, 1]), &mut canvas, palette, start);
        assert_eq!(canvas, rendered(&[5, 3, 8, 1], None, 8, 10));

        assert_eq!(controller.tick(start, &mut canvas, palette), Tick::Rendered { token, highlight: Some(3) });
        assert_eq!(canvas, rendered(&[3, 5, 1, 8], Some(3), 8, 10));
        assert_eq!(controller.next_deadline(), Some(start + DELAY));

        assert_eq!(controller.tick(start + ms(5), &mut canvas, palette), Tick::Waiting(ms(15)));
        assert_eq!(canvas, rendered(&[3, 5, 1, 8], Some(3), 8, 10));

        assert_eq!(controller.tick(start + ms(20), &mut canvas, palette), Tick::Rendered { token, highlight: Some(2) });
        assert_eq!(controller.tick(start + ms(40), &mut canvas, palette), Tick::Rendered { token, highlight: Some(1) });

        let Tick::Finished(report) = controller.tick(start + ms(60), &mut canvas, palette) else {
            panic!("session did not finish");
        };
        assert_eq!(report.token, token);
        assert_eq!(report.algorithm, Algorithm::Bubble);
        assert_eq!(report.elapsed, ms(60));
        assert_eq!(report.frames, 3);
        assert_eq!(report.time_text(), "Sort time: 60.00 ms");
        assert_eq!(canvas, rendered(&[1, 3, 5, 8], None, 8, 10));

        assert!(!controller.is_running());
        assert_eq!(controller.tick(start + ms(80), &mut canvas, palette), Tick::Idle);
    }

    #[test]
    fn new_session_replaces_running_one() {
        let theme = Theme::default();
        let palette = theme.palette();
        let mut canvas = Canvas::new(16, 16);
        let mut controller = SessionController::new(16, DELAY);
        let now = Instant::now();

        let first = controller.start(Algorithm::Bubble, &mut canvas, palette, now);
        controller.tick(now, &mut canvas, palette);
        let second = controller.start_with(Algorithm::Quick, Dataset::new(vec![3, 1, 2]), &mut canvas, palette, now);
        assert!(second > first);
        assert_eq!(controller.current_token(), Some(second));
        assert_eq!(controller.current_algorithm(), Some(Algorithm::Quick));
        assert_eq!(controller.values(), Some(&[3, 1, 2][..]));

        // the new session starts unpaced and every later event belongs to it
        let mut at = now;
        loop {
            match controller.tick(at, &mut canvas, palette) {
                Tick::Rendered { token, .. } => assert_eq!(token, second),
                Tick::Finished(report) => {
                    assert_eq!(report.token, second);
                    break;
                }
                other => panic!("unexpected tick {other:?}"),
            }
            at += DELAY;
        }
    }

    #[test]
    fn unknown_identifier_is_ignored() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(10, 10);
        let mut controller = SessionController::new(10, DELAY);
        assert_eq!(controller.select("bogo", &mut canvas, theme.palette(), Instant::now()), None);
        assert_eq!(canvas, Canvas::new(10, 10));
        assert!(!controller.is_running());
    }

    #[test]
    fn unknown_identifier_keeps_running_session() {
        let theme = Theme::default();
        let mut canvas = Canvas::new(10, 10);
        let mut controller = SessionController::new(10, DELAY);
        let now = Instant::now();
        let token = controller.select("merge", &mut canvas, theme.palette(), now);
        assert!(token.is_some());
        assert_eq!(controller.select("heap", &mut canvas, theme.palette(), now), None);
        assert_eq!(controller.current_token(), token);
    }

    #[rstest]
    #[case::wider_than_bars(100, 20, 50, 50)]
    #[case::narrower_than_bars(40, 30, 50, 40)]
    #[case::height_below_width_below_bars(30, 10, 50, 30)]
    #[case::single_bar(5, 5, 1, 1)]
    fn dataset_fits_surface(
        #[case] width: u32,
        #[case] height: u32,
        #[case] bars: usize,
        #[case] expected: usize,
    ) {
        let theme = Theme::default();
        let mut canvas = Canvas::new(width, height);
        let mut controller = SessionController::new(bars, DELAY);
        controller.start(Algorithm::Insertion, &mut canvas, theme.palette(), Instant::now());
        let values = controller.values().expect("no session");
        assert_eq!(values.len(), expected);
        assert!(values.iter().all(|value| *value < height));
    }

    #[test]
    fn every_algorithm_finishes_sorted() {
        let theme = Theme::default();
        let palette = theme.palette();
        for algorithm in Algorithm::iter() {
            let mut canvas = Canvas::new(40, 25);
            let mut controller = SessionController::new(40, Duration::ZERO);
            let start = Instant::now();
            controller.start(algorithm, &mut canvas, palette, start);
            let mut values = controller.values().expect("no session").to_vec();
            values.sort();

            let report = loop {
                if let Tick::Finished(report) = controller.tick(start, &mut canvas, palette) {
                    break report;
                }
            };
            assert!(report.frames > 0, "{algorithm}");
            assert_eq!(canvas, rendered(&values, None, 40, 25), "{algorithm}");
        }
    }

    #[rstest]
    #[case(Duration::ZERO, "Sort time: 0.00 ms")]
    #[case(Duration::from_micros(1_234_567), "Sort time: 1234.57 ms")]
    #[case(Duration::from_micros(7), "Sort time: 0.01 ms")]
    fn time_text(#[case] elapsed: Duration, #[case] expected: &str) {
        let report = SessionReport {
            token: SessionToken(1),
            algorithm: Algorithm::Merge,
            elapsed,
            frames: 0,
            comparisons: 0,
            swaps: 0,
            writes: 0,
        };
        assert_eq!(report.time_text(), expected);
        assert!(report.description().starts_with("Merge Sort"));
    }
}
