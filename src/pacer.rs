use std::time::{Duration, Instant};

/// The delay between two visualized steps unless configured otherwise.
pub(crate) const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(20);

/// Paces steps by handing out deadlines instead of sleeping.
///
/// After a step is rendered the pacer is armed, and the next step must not run until
/// [Pacer::is_ready] says so. The caller decides how to wait in the meantime, which keeps the event
/// loop free to handle input while a step is pending. A pending delay can't be cancelled; dropping
/// the owning session is how a sort is abandoned.
#[derive(Clone, Debug)]
pub(crate) struct Pacer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Pacer {
    pub(crate) fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    /// Start a delay at `now`.
    pub(crate) fn arm(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// The instant at which the pending delay elapses, if one is pending.
    pub(crate) fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub(crate) fn remaining(&self, now: Instant) -> Duration {
        self.deadline.map(|deadline| deadline.saturating_duration_since(now)).unwrap_or_default()
    }

    pub(crate) fn is_ready(&self, now: Instant) -> bool {
        self.deadline.map_or(true, |deadline| now >= deadline)
    }
}

impl Default for Pacer {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_DELAY)
    }
}
