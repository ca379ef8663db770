//! The output stream and its cursor visibility.
//!
//! A [`Terminal`] wraps the single text stream a bar draws on. Cursor visibility is
//! process-wide terminal state: once hidden it stays hidden until someone shows it again,
//! even after the bar is dropped. [`CursorGuard`] ties the "show" to a scope so an early
//! `break`, `?` or panic inside the loop cannot leave the cursor hidden.
//!
//! Handles are cheap to clone (`Arc` bump) and all point at the same stream, so the guard
//! and the bar write through one lock.

use std::{
    fmt,
    io::{self, Stdout, Write},
    sync::Arc,
};

use parking_lot::Mutex;

const CURSOR_HIDE: &str = "\x1b[?25l";
const CURSOR_SHOW: &str = "\x1b[?25h";
const ERASE_LINE_END: &str = "\x1b[K";

/// How a rendered line is terminated.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LineEnd {
    /// `\r`: the next line overwrites this one.
    Return,
    /// `\n`: the line is final.
    Newline,
}

impl LineEnd {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Return => "\r",
            Self::Newline => "\n",
        }
    }
}

struct Inner<W> {
    writer: W,
    cursor_hidden: bool,
}

/// A shared handle to the output stream.
pub struct Terminal<W = Stdout> {
    inner: Arc<Mutex<Inner<W>>>,
}

impl<W> Clone for Terminal<W> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<W> fmt::Debug for Terminal<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Terminal")
            .field("cursor_hidden", &self.is_cursor_hidden())
            .finish_non_exhaustive()
    }
}

impl Terminal<Stdout> {
    /// A terminal on the process' standard output.
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl Default for Terminal<Stdout> {
    fn default() -> Self {
        Self::stdout()
    }
}

impl<W> Terminal<W> {
    /// Wraps `writer`. The cursor is assumed to be visible.
    pub fn new(writer: W) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                writer,
                cursor_hidden: false,
            })),
        }
    }

    /// Whether the last cursor command issued through this terminal was a hide.
    #[must_use]
    pub fn is_cursor_hidden(&self) -> bool {
        self.inner.lock().cursor_hidden
    }

    /// Runs `f` with the underlying writer. Mostly useful to inspect in-memory output.
    pub fn with_writer<R>(&self, f: impl FnOnce(&mut W) -> R) -> R {
        f(&mut self.inner.lock().writer)
    }

    /// Returns a guard that shows the cursor again when dropped.
    #[must_use = "the cursor is restored when the guard is dropped"]
    pub fn cursor_guard(&self) -> CursorGuard<W>
    where
        W: Write,
    {
        CursorGuard {
            terminal: self.clone(),
        }
    }
}

impl<W: Write> Terminal<W> {
    /// Hides the text cursor.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying writer.
    pub fn hide_cursor(&self) -> io::Result<()> {
        let mut inner = self.inner.lock();
        inner.writer.write_all(CURSOR_HIDE.as_bytes())?;
        inner.writer.flush()?;
        inner.cursor_hidden = true;
        Ok(())
    }

    /// Shows the text cursor.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying writer.
    pub fn show_cursor(&self) -> io::Result<()> {
        let mut inner = self.inner.lock();
        inner.writer.write_all(CURSOR_SHOW.as_bytes())?;
        inner.writer.flush()?;
        inner.cursor_hidden = false;
        Ok(())
    }

    /// Writes `line`, erases whatever a longer previous line left behind, writes `end`,
    /// then flushes.
    ///
    /// # Errors
    ///
    /// Returns any error raised by the underlying writer.
    pub fn write_line(&self, line: &str, end: LineEnd) -> io::Result<()> {
        let mut inner = self.inner.lock();
        inner.writer.write_all(line.as_bytes())?;
        inner.writer.write_all(ERASE_LINE_END.as_bytes())?;
        inner.writer.write_all(end.as_str().as_bytes())?;
        inner.writer.flush()
    }
}

/// Shows the cursor on drop if it is still hidden.
///
/// Obtained from [`Terminal::cursor_guard`] or
/// [`ProgressBar::cursor_guard`](crate::ProgressBar::cursor_guard).
#[derive(Debug)]
pub struct CursorGuard<W: Write> {
    terminal: Terminal<W>,
}

impl<W: Write> Drop for CursorGuard<W> {
    fn drop(&mut self) {
        if !self.terminal.is_cursor_hidden() {
            return;
        }
        if let Err(err) = self.terminal.show_cursor() {
            log::warn!("failed to restore terminal cursor: {err}");
        }
    }
}
