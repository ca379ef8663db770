//! # `inline_progress`
//!
//! A single-line terminal progress bar for loops of known length.
//!
//! The bar is redrawn in place on every [`ProgressBar::update`] and shows a completion
//! percentage, a filled/empty bar and an ETA. On the final iteration it turns green,
//! prints the total elapsed time, and moves to a new line.
//!
//! ```no_run
//! use inline_progress::ProgressBar;
//!
//! let mut bar = ProgressBar::with_label(50, "Encoding")?;
//! for i in 0..50 {
//!     // ...
//!     bar.update(i);
//! }
//! # Ok::<(), inline_progress::ProgressError>(())
//! ```
//!
//! It is designed to be:
//!
//! * **Owned**: One loop drives one bar through `&mut self`. There is no background
//!   thread; the display only changes when the loop calls `update`.
//! * **Forgiving**: Construction is the only fallible step. Updates past the end are
//!   ignored and write errors are logged through [`log`].
//! * **Testable**: The clock and the output stream are injected, so the math and the
//!   exact bytes drawn can be checked without a terminal or sleeping.
//!
//! ## Modules
//!
//! * [`builder`]: Validating construction and the default width rule.
//! * [`clock`]: Monotonic time sources.
//! * [`frame`]: The per-update math (percentage, bar split, ETA).
//! * [`iter`]: Extension traits for driving a bar from an iterator.
//! * [`progress`]: The [`ProgressBar`] state machine.
//! * [`render`]: Formatting a frame into a colored line.
//! * [`terminal`]: The output stream, cursor visibility and [`CursorGuard`].

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod builder;
pub mod clock;
pub mod error;
pub mod frame;
pub mod iter;
pub mod progress;
pub mod render;
pub mod terminal;

pub use builder::ProgressBarBuilder;
pub use clock::{Clock, ManualClock, SystemClock};
pub use error::{ProgressError, Result};
pub use frame::{BarState, Frame};
pub use iter::{ProgressIter, ProgressIteratorExt};
pub use progress::ProgressBar;
pub use terminal::{CursorGuard, LineEnd, Terminal};
