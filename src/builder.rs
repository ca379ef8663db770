//! Fluent interface for constructing [`ProgressBar`] instances.
//!
//! [`ProgressBar::new`] and [`ProgressBar::with_label`] cover the common case. The
//! [`ProgressBarBuilder`] adds an explicit bar width, an injected [`Clock`], and a
//! different output stream through [`build_on`](ProgressBarBuilder::build_on).
//!
//! All validation happens in [`build`](ProgressBarBuilder::build). After that the total,
//! label and width are fixed; only [`ProgressBar::set_label`] can change the label and it
//! validates again.
//!
//! # Width
//!
//! Without an explicit width the bar fills an 80 column line after the label and the
//! fixed fields: `80 - (label chars + 15)`, and never less than one cell.

use std::io::{Stdout, Write};

use compact_str::CompactString;

use crate::{
    clock::{Clock, SystemClock},
    error::{ProgressError, Result},
    progress::ProgressBar,
    terminal::Terminal,
};

/// Label used when none is given.
pub const DEFAULT_LABEL: &str = "Progress";

/// Target line width the default bar width is derived from.
pub const LINE_WIDTH: usize = 80;

/// Columns reserved for the icon, spacing, percentage and time fields.
pub const LABEL_PADDING: usize = 15;

/// A builder for [`ProgressBar`].
#[derive(Debug)]
pub struct ProgressBarBuilder<C = SystemClock> {
    total: u64,
    label: CompactString,
    width: Option<usize>,
    clock: C,
}

impl ProgressBarBuilder {
    /// Starts a bar expecting `total` updates, on stdout, with the system clock.
    #[must_use]
    pub fn new(total: u64) -> Self {
        Self {
            total,
            label: CompactString::const_new(DEFAULT_LABEL),
            width: None,
            clock: SystemClock,
        }
    }
}

impl<C> ProgressBarBuilder<C> {
    /// Sets the text shown before the bar.
    #[must_use]
    pub fn label(mut self, label: impl Into<CompactString>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the number of bar cells instead of deriving it from the label.
    #[must_use]
    pub const fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Reads time from `clock` instead of the system clock.
    #[must_use]
    pub fn clock<C2>(self, clock: C2) -> ProgressBarBuilder<C2> {
        ProgressBarBuilder {
            total: self.total,
            label: self.label,
            width: self.width,
            clock,
        }
    }
}

impl<C: Clock> ProgressBarBuilder<C> {
    /// Validates the configuration and returns a bar drawing on stdout.
    ///
    /// # Errors
    ///
    /// [`ProgressError::InvalidArgument`] if `total` is zero, the label contains control
    /// characters, or an explicit width is zero.
    pub fn build(self) -> Result<ProgressBar<Stdout, C>> {
        self.build_on(Terminal::stdout())
    }

    /// Validates the configuration and returns a bar drawing on `terminal`.
    ///
    /// # Errors
    ///
    /// Same as [`build`](ProgressBarBuilder::build).
    pub fn build_on<W: Write>(self, terminal: Terminal<W>) -> Result<ProgressBar<W, C>> {
        if self.total == 0 {
            return Err(ProgressError::invalid("total", "must be greater than zero"));
        }
        validate_label(&self.label)?;
        let width = match self.width {
            Some(0) => return Err(ProgressError::invalid("width", "must be at least one cell")),
            Some(width) => width,
            None => derived_width(&self.label),
        };

        log::trace!(
            "building progress bar '{}' with total {} and width {width}",
            self.label,
            self.total
        );

        Ok(ProgressBar::from_parts(
            self.total, self.label, width, terminal, self.clock,
        ))
    }
}

/// Rejects labels that would break in-place redrawing.
pub(crate) fn validate_label(label: &str) -> Result<()> {
    if label.chars().any(char::is_control) {
        return Err(ProgressError::invalid(
            "label",
            "must not contain control characters",
        ));
    }
    Ok(())
}

/// `LINE_WIDTH - (label chars + LABEL_PADDING)`, at least one.
#[must_use]
pub fn derived_width(label: &str) -> usize {
    LINE_WIDTH
        .saturating_sub(label.chars().count() + LABEL_PADDING)
        .max(1)
}

#[cfg(test)]
mod tests {
    use super::{ProgressBarBuilder, derived_width};
    use crate::{ProgressError, Terminal};

    fn sink() -> Terminal<Vec<u8>> {
        Terminal::new(Vec::new())
    }

    /// Default Width
    /// The width is derived from the label length.
    #[test]
    fn test_derived_width() {
        assert_eq!(derived_width("x"), 64);
        assert_eq!(derived_width("Progress"), 57);
        assert_eq!(derived_width("été"), 62);
        assert_eq!(derived_width(&"a".repeat(200)), 1);
    }

    /// Builder Defaults
    #[test]
    fn test_defaults() {
        let bar = ProgressBarBuilder::new(10).build_on(sink()).unwrap();
        assert_eq!(bar.total(), 10);
        assert_eq!(bar.label(), "Progress");
        assert_eq!(bar.width(), 57);

        let bar = ProgressBarBuilder::new(10)
            .label("x")
            .build_on(sink())
            .unwrap();
        assert_eq!(bar.width(), 64);
    }

    /// Explicit Width
    #[test]
    fn test_explicit_width() {
        let bar = ProgressBarBuilder::new(3)
            .label("copy")
            .width(20)
            .build_on(sink())
            .unwrap();
        assert_eq!(bar.width(), 20);
    }

    /// Validation
    /// Zero total, zero width and control characters are rejected.
    #[test]
    fn test_validation() {
        assert!(matches!(
            ProgressBarBuilder::new(0).build_on(sink()),
            Err(ProgressError::InvalidArgument { name: "total", .. })
        ));
        assert!(matches!(
            ProgressBarBuilder::new(5).width(0).build_on(sink()),
            Err(ProgressError::InvalidArgument { name: "width", .. })
        ));
        assert!(matches!(
            ProgressBarBuilder::new(5).label("a\rb").build_on(sink()),
            Err(ProgressError::InvalidArgument { name: "label", .. })
        ));
    }

    /// Shared Terminal
    /// The bar writes through the terminal handle it was built on.
    #[test]
    fn test_build_on_terminal() {
        let terminal = sink();
        let mut bar = ProgressBarBuilder::new(2).build_on(terminal.clone()).unwrap();

        bar.update(0);
        assert!(terminal.with_writer(|w| !w.is_empty()));
    }
}
