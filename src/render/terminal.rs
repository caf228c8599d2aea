use super::canvas::Canvas;
use crate::{
    sorting::Algorithm,
    theme::{Color, Palette},
};
use crossterm::{
    cursor,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand, QueueableCommand,
};
use std::io::{self, Write};
use strum::IntoEnumIterator;
use unicode_width::UnicodeWidthStr;

/// The rows below the bars used for the selector, the time and the description.
const FOOTER_ROWS: u16 = 7;
const MIN_CANVAS_ROWS: u16 = 4;
const MIN_COLUMNS: u16 = 20;
const KEY_HINTS: &str = "t theme  r restart  q quit";

/// How the terminal window is split between the bars and the footer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) columns: u16,
    pub(crate) canvas_rows: u16,
    pub(crate) footer_top: u16,
    pub(crate) description_rows: u16,
}

impl Layout {
    pub(crate) fn new(columns: u16, rows: u16) -> Result<Self, TerminalError> {
        if columns < MIN_COLUMNS || rows < FOOTER_ROWS + MIN_CANVAS_ROWS {
            return Err(TerminalError::TooSmall { columns, rows });
        }
        let canvas_rows = rows - FOOTER_ROWS;
        Ok(Self { columns, canvas_rows, footer_top: canvas_rows + 1, description_rows: FOOTER_ROWS - 3 })
    }

    /// Build a canvas covering the bar area of this layout.
    pub(crate) fn canvas(&self) -> Canvas {
        Canvas::new(u32::from(self.columns), u32::from(self.canvas_rows))
    }
}

/// The text shown below the bars.
#[derive(Clone, Debug)]
pub(crate) struct Footer<'a> {
    pub(crate) selected: Algorithm,
    pub(crate) time: &'a str,
    pub(crate) description: &'a str,
}

/// Draws canvases and footers into a terminal using one cell per pixel.
pub(crate) struct Presenter<W: Write> {
    writer: W,
}

impl<W: Write> Presenter<W> {
    pub(crate) fn new(writer: W) -> Self {
        Self { writer }
    }

    pub(crate) fn clear(&mut self, palette: &Palette) -> io::Result<()> {
        self.writer.queue(SetBackgroundColor(palette.background.into()))?.queue(Clear(ClearType::All))?;
        Ok(())
    }

    pub(crate) fn draw_canvas(&mut self, canvas: &Canvas, palette: &Palette) -> io::Result<()> {
        for (row_index, row) in canvas.rows().enumerate() {
            self.writer.queue(cursor::MoveTo(0, row_index as u16))?;
            for run in row.chunk_by(|left, right| left == right) {
                let color = run[0].unwrap_or(palette.background);
                self.writer.queue(SetBackgroundColor(color.into()))?.queue(Print(" ".repeat(run.len())))?;
            }
        }
        Ok(())
    }

    pub(crate) fn draw_footer(&mut self, layout: &Layout, footer: &Footer, palette: &Palette) -> io::Result<()> {
        let width = usize::from(layout.columns);
        self.writer.queue(SetBackgroundColor(palette.background.into()))?;
        for row in layout.footer_top..layout.footer_top + FOOTER_ROWS - 1 {
            self.writer.queue(cursor::MoveTo(0, row))?.queue(Clear(ClearType::CurrentLine))?;
        }

        self.writer.queue(cursor::MoveTo(0, layout.footer_top))?;
        let mut used = 0;
        for (index, algorithm) in Algorithm::iter().enumerate() {
            let label = format!(" {} {} ", index + 1, algorithm.id());
            used += label.width() + 1;
            if algorithm == footer.selected {
                self.print(&label, palette.background, palette.text)?;
            } else {
                self.print(&label, palette.muted, palette.background)?;
            }
            self.print(" ", palette.text, palette.background)?;
        }
        if used + KEY_HINTS.width() < width {
            let column = (width - KEY_HINTS.width()) as u16;
            self.writer.queue(cursor::MoveTo(column, layout.footer_top))?;
            self.print(KEY_HINTS, palette.muted, palette.background)?;
        }

        self.writer.queue(cursor::MoveTo(0, layout.footer_top + 1))?;
        self.print(footer.time, palette.text, palette.background)?;

        let lines = wrap(footer.description, width);
        for (offset, line) in lines.iter().take(usize::from(layout.description_rows)).enumerate() {
            self.writer.queue(cursor::MoveTo(0, layout.footer_top + 2 + offset as u16))?;
            self.print(line, palette.muted, palette.background)?;
        }
        Ok(())
    }

    pub(crate) fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }

    fn print(&mut self, text: &str, foreground: Color, background: Color) -> io::Result<()> {
        self.writer
            .queue(SetForegroundColor(foreground.into()))?
            .queue(SetBackgroundColor(background.into()))?
            .queue(Print(text))?;
        Ok(())
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.writer
    }
}

/// Puts the terminal in raw mode on an alternate screen until dropped.
pub(crate) struct TerminalGuard;

impl TerminalGuard {
    pub(crate) fn enter() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        let guard = Self;
        io::stdout().execute(EnterAlternateScreen)?.execute(cursor::Hide)?;
        Ok(guard)
    }

    pub(crate) fn size() -> Result<(u16, u16), TerminalError> {
        Ok(terminal::size()?)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = stdout.execute(cursor::Show);
        let _ = stdout.execute(LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
    }
}

/// Split text into lines that fit `width` columns, breaking on whitespace.
///
/// Words wider than a line are put on a line of their own.
pub(crate) fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let needed = if current.is_empty() { word.width() } else { current.width() + 1 + word.width() };
        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[derive(thiserror::Error, Debug)]
pub(crate) enum TerminalError {
    #[error(
        "terminal is too small ({columns}x{rows}), need at least {}x{}",
        MIN_COLUMNS,
        FOOTER_ROWS + MIN_CANVAS_ROWS
    )]
    TooSmall { columns: u16, rows: u16 },

    #[error("io: {0}")]
    Io(#[from] io::Error),
}
