//! The progress bar state machine.
//!
//! A [`ProgressBar`] is owned by the loop it reports on. The loop calls
//! [`update`](ProgressBar::update) with the zero-based index of the iteration it just
//! finished; each call
//!
//! 1. starts the clock on the very first call,
//! 2. computes a [`Frame`] from `(index + 1) / total`,
//! 3. hides the cursor and redraws in place while running, or shows the cursor and
//!    finalizes the line with a newline once complete.
//!
//! Indices at or past `total` are ignored, so calling `update` once too often after the
//! bar completed prints nothing and changes nothing.
//!
//! # Cursor
//!
//! The hidden cursor outlives the bar. If the loop may stop before its last iteration,
//! hold a [`CursorGuard`] for the duration of the loop:
//!
//! ```no_run
//! use inline_progress::ProgressBar;
//!
//! let mut bar = ProgressBar::with_label(100, "Downloading")?;
//! let _cursor = bar.cursor_guard();
//! for i in 0..100 {
//!     // ... work that may `break` or `?` out ...
//!     bar.update(i);
//! }
//! # Ok::<(), inline_progress::ProgressError>(())
//! ```

use std::{
    fmt,
    io::{Stdout, Write},
    time::Duration,
};

use compact_str::CompactString;
use web_time::Instant;

use crate::{
    builder::{DEFAULT_LABEL, ProgressBarBuilder, validate_label},
    clock::{Clock, SystemClock},
    error::Result,
    frame::{self, BarState, Frame},
    render,
    terminal::{CursorGuard, LineEnd, Terminal},
};

/// A single-line terminal progress bar for a loop of known length.
pub struct ProgressBar<W = Stdout, C = SystemClock> {
    total: u64,
    label: CompactString,
    width: usize,

    /// Set on the first update, never changed afterwards.
    start: Option<Instant>,
    progress: f64,
    /// The last frame drawn.
    frame: Option<Frame>,

    terminal: Terminal<W>,
    clock: C,
}

impl<W, C> fmt::Debug for ProgressBar<W, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProgressBar")
            .field("total", &self.total)
            .field("label", &self.label)
            .field("width", &self.width)
            .field("progress", &self.progress)
            .field("started", &self.start.is_some())
            .finish_non_exhaustive()
    }
}

impl ProgressBar {
    /// Creates a bar labelled `"Progress"` drawing on stdout.
    ///
    /// # Errors
    ///
    /// [`ProgressError::InvalidArgument`](crate::ProgressError::InvalidArgument) if
    /// `total` is zero.
    pub fn new(total: u64) -> Result<Self> {
        Self::with_label(total, DEFAULT_LABEL)
    }

    /// Creates a bar with a custom label drawing on stdout.
    ///
    /// # Errors
    ///
    /// [`ProgressError::InvalidArgument`](crate::ProgressError::InvalidArgument) if
    /// `total` is zero or `label` contains control characters.
    pub fn with_label(total: u64, label: impl Into<CompactString>) -> Result<Self> {
        ProgressBarBuilder::new(total).label(label).build()
    }

    /// Starts a [`ProgressBarBuilder`].
    #[must_use]
    pub fn builder(total: u64) -> ProgressBarBuilder {
        ProgressBarBuilder::new(total)
    }
}

impl<W, C> ProgressBar<W, C> {
    pub(crate) const fn from_parts(
        total: u64,
        label: CompactString,
        width: usize,
        terminal: Terminal<W>,
        clock: C,
    ) -> Self {
        Self {
            total,
            label,
            width,
            start: None,
            progress: 0.0,
            frame: None,
            terminal,
            clock,
        }
    }

    // ========================================================================
    // Configuration
    // ========================================================================

    /// Number of updates that complete the bar.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Text shown before the bar.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Replaces the label. The bar width is left as it is.
    ///
    /// # Errors
    ///
    /// [`ProgressError::InvalidArgument`](crate::ProgressError::InvalidArgument) if
    /// `label` contains control characters; the old label is kept.
    pub fn set_label(&mut self, label: impl Into<CompactString>) -> Result<()> {
        let label = label.into();
        validate_label(&label)?;
        self.label = label;
        Ok(())
    }

    /// Number of bar cells.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// The terminal this bar draws on.
    #[must_use]
    pub const fn terminal(&self) -> &Terminal<W> {
        &self.terminal
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Fraction of the loop completed, in `[0, 1]`. Zero before the first update.
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// Whether the last accepted update completed the loop.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.frame.as_ref().is_some_and(Frame::is_complete)
    }

    /// The most recently drawn frame.
    #[must_use]
    pub const fn frame(&self) -> Option<&Frame> {
        self.frame.as_ref()
    }
}

impl<W, C: Clock> ProgressBar<W, C> {
    /// Time since the first update, measured now. `None` before the first update.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        let start = self.start?;
        Some(self.clock.now().saturating_duration_since(start))
    }

    /// Estimated time left, measured now.
    ///
    /// `None` before the first update. See the [ETA model](crate::frame) for how the
    /// estimate is made.
    #[must_use]
    pub fn remaining(&self) -> Option<Duration> {
        frame::eta(self.elapsed()?, self.progress)
    }
}

impl<W: Write, C: Clock> ProgressBar<W, C> {
    /// Reports that iteration `index` (zero-based) has finished and redraws the bar.
    ///
    /// `index == total - 1` completes the bar. Indices at or beyond `total` are ignored:
    /// nothing is drawn and no state changes, apart from starting the clock if this is
    /// the first call.
    ///
    /// This never fails. Errors writing to the terminal are logged and dropped.
    #[allow(clippy::cast_precision_loss)]
    pub fn update(&mut self, index: u64) {
        let now = self.clock.now();
        let start = *self.start.get_or_insert_with(|| {
            log::debug!("progress '{}' started ({} steps)", self.label, self.total);
            now
        });

        if index >= self.total {
            log::trace!(
                "progress '{}' ignoring update {index} past total {}",
                self.label,
                self.total
            );
            return;
        }

        // Exact at index == total - 1 for any total below 2^53.
        let progress = ((index + 1) as f64 / self.total as f64).max(0.0);
        let frame = Frame::compute(progress, self.width, now.saturating_duration_since(start));
        self.progress = frame.progress();

        if let Err(err) = self.draw(&frame) {
            log::warn!("failed to draw progress '{}': {err}", self.label);
        }

        if frame.is_complete() {
            log::debug!(
                "progress '{}' complete in {:.3}s",
                self.label,
                frame.elapsed().as_secs_f64()
            );
        } else {
            log::trace!(
                "progress '{}' at {:.2}%",
                self.label,
                frame.percentage()
            );
        }

        self.frame = Some(frame);
    }

    /// Returns a guard that shows the cursor when dropped, if this bar left it hidden.
    #[must_use = "the cursor is restored when the guard is dropped"]
    pub fn cursor_guard(&self) -> CursorGuard<W> {
        self.terminal.cursor_guard()
    }

    /// Draws `frame`. Both the cursor command and the line are always attempted; the
    /// first error is returned.
    fn draw(&self, frame: &Frame) -> std::io::Result<()> {
        let line = render::line(&self.label, frame);
        match frame.state() {
            BarState::Running => {
                let hidden = self.terminal.hide_cursor();
                let written = self.terminal.write_line(&line, LineEnd::Return);
                hidden.and(written)
            }
            BarState::Complete => {
                // Later updates are ignored, so this is the last chance to show the cursor.
                let written = self.terminal.write_line(&line, LineEnd::Newline);
                let shown = self.terminal.show_cursor();
                written.and(shown)
            }
        }
    }
}
