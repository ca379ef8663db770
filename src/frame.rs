//! Per-update progress math.
//!
//! A [`Frame`] is the plain-data result of one [`update`](crate::ProgressBar::update):
//! the progress fraction, the clamped percentage, how the bar splits into filled and
//! empty cells, and the timing fields. It holds no references and does no I/O, which
//! keeps the arithmetic testable without a terminal.
//!
//! # ETA model
//!
//! The remaining time is a linear extrapolation with a one second pad:
//!
//! ```text
//! eta = elapsed / progress * (1 - progress) + 1s
//! ```
//!
//! It assumes every iteration costs the same and is only an approximation when they
//! do not.

use std::time::Duration;

/// Padding added to every ETA.
const ETA_PAD_SECS: f64 = 1.0;

/// Whether the bar is still going or done.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarState {
    /// `progress < 1`: redrawn in place, cursor hidden.
    #[default]
    Running,
    /// `progress == 1`: finalized with a newline, cursor shown.
    Complete,
}

/// A snapshot of everything one redraw needs.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    progress: f64,
    percentage: f64,
    filled: usize,
    empty: usize,
    elapsed: Duration,
    eta: Option<Duration>,
    state: BarState,
}

impl Frame {
    /// Computes a frame for `progress` (expected in `[0, 1]`) on a bar of `width` cells.
    ///
    /// Negative inputs are clamped to zero and inputs above one are clamped to one;
    /// [`ProgressBar`](crate::ProgressBar) never passes the latter.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_precision_loss,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn compute(progress: f64, width: usize, elapsed: Duration) -> Self {
        let progress = progress.clamp(0.0, 1.0);
        let percentage = (progress * 100.0).min(100.0);
        let filled = ((progress * width as f64).round() as usize).min(width);
        let state = if progress >= 1.0 {
            BarState::Complete
        } else {
            BarState::Running
        };

        Self {
            progress,
            percentage,
            filled,
            empty: width - filled,
            elapsed,
            eta: eta(elapsed, progress),
            state,
        }
    }

    /// The progress fraction, in `[0, 1]`.
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// The completion percentage, never above `100.0`.
    #[must_use]
    pub const fn percentage(&self) -> f64 {
        self.percentage
    }

    /// Number of filled cells.
    #[must_use]
    pub const fn filled(&self) -> usize {
        self.filled
    }

    /// Number of empty cells.
    #[must_use]
    pub const fn empty(&self) -> usize {
        self.empty
    }

    /// Time since the first update.
    #[must_use]
    pub const fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Estimated time remaining, `None` while progress is zero.
    #[must_use]
    pub const fn eta(&self) -> Option<Duration> {
        self.eta
    }

    /// Running or complete.
    #[must_use]
    pub const fn state(&self) -> BarState {
        self.state
    }

    /// Shorthand for `state() == BarState::Complete`.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.state == BarState::Complete
    }
}

/// Applies the ETA model. `None` when `progress` is zero since the division is undefined.
pub(crate) fn eta(elapsed: Duration, progress: f64) -> Option<Duration> {
    if progress <= 0.0 {
        return None;
    }
    let secs = elapsed.as_secs_f64() / progress * (1.0 - progress) + ETA_PAD_SECS;
    Duration::try_from_secs_f64(secs).ok()
}
