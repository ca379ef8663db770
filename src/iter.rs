//! Iterator adapters for driving a [`ProgressBar`].
//!
//! [`ProgressIteratorExt`] attaches a bar to any [`ExactSizeIterator`], using its length
//! as the total. An item counts as finished once the loop asks for the next one, so the
//! bar reports work that is actually done rather than work that has just been handed
//! out. Exhausting the iterator reports the last item and completes the bar.
//!
//! # Example
//!
//! ```no_run
//! use inline_progress::ProgressIteratorExt;
//!
//! for file in ["a.txt", "b.txt", "c.txt"].into_iter().progress_bar("Copying")? {
//!     // ...
//! }
//! # Ok::<(), inline_progress::ProgressError>(())
//! ```
//!
//! Leaving the loop early leaves the bar short of completion; hold the bar's
//! [`cursor_guard`](ProgressBar::cursor_guard) if that can happen.

use std::io::{Stdout, Write};

use compact_str::CompactString;

use crate::{
    clock::{Clock, SystemClock},
    error::Result,
    progress::ProgressBar,
};

/// An iterator adapter that updates a [`ProgressBar`] as items are consumed.
#[derive(Debug)]
pub struct ProgressIter<I, W = Stdout, C = SystemClock> {
    iter: I,
    bar: ProgressBar<W, C>,
    /// Items handed out so far.
    yielded: u64,
    done: bool,
}

impl<I, W, C> ProgressIter<I, W, C> {
    /// Wraps `iter`, reporting to `bar`.
    ///
    /// Note: This is usually constructed via [`ProgressIteratorExt`] methods.
    pub const fn new(iter: I, bar: ProgressBar<W, C>) -> Self {
        Self {
            iter,
            bar,
            yielded: 0,
            done: false,
        }
    }

    /// The bar being driven.
    #[must_use]
    pub const fn bar(&self) -> &ProgressBar<W, C> {
        &self.bar
    }

    /// Stops iterating and returns the bar.
    #[must_use]
    pub fn into_bar(self) -> ProgressBar<W, C> {
        self.bar
    }
}

impl<I: Iterator, W: Write, C: Clock> Iterator for ProgressIter<I, W, C> {
    type Item = I::Item;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        // The previous item is finished once the next one is requested.
        if self.yielded > 0 {
            self.bar.update(self.yielded - 1);
        }

        let item = self.iter.next();
        if item.is_some() {
            self.yielded += 1;
        } else {
            self.done = true;
        }
        item
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            self.iter.size_hint()
        }
    }
}

impl<I: ExactSizeIterator, W: Write, C: Clock> ExactSizeIterator for ProgressIter<I, W, C> {}

/// Extension trait to drive a [`ProgressBar`] from an iterator of known length.
pub trait ProgressIteratorExt: ExactSizeIterator + Sized {
    /// Wraps the iterator in a bar on stdout labelled `"Progress"`.
    ///
    /// # Errors
    ///
    /// [`ProgressError::InvalidArgument`](crate::ProgressError::InvalidArgument) if the
    /// iterator is empty.
    fn progress(self) -> Result<ProgressIter<Self>>;

    /// Wraps the iterator in a bar on stdout with the given label.
    ///
    /// # Errors
    ///
    /// [`ProgressError::InvalidArgument`](crate::ProgressError::InvalidArgument) if the
    /// iterator is empty or the label contains control characters.
    fn progress_bar(self, label: impl Into<CompactString>) -> Result<ProgressIter<Self>>;

    /// Wraps the iterator using an existing bar. The bar's total is not checked against
    /// the iterator's length.
    fn progress_with<W, C>(self, bar: ProgressBar<W, C>) -> ProgressIter<Self, W, C>;
}

impl<I: ExactSizeIterator> ProgressIteratorExt for I {
    fn progress(self) -> Result<ProgressIter<Self>> {
        let bar = ProgressBar::new(self.len() as u64)?;
        Ok(ProgressIter::new(self, bar))
    }

    fn progress_bar(self, label: impl Into<CompactString>) -> Result<ProgressIter<Self>> {
        let bar = ProgressBar::with_label(self.len() as u64, label)?;
        Ok(ProgressIter::new(self, bar))
    }

    fn progress_with<W, C>(self, bar: ProgressBar<W, C>) -> ProgressIter<Self, W, C> {
        ProgressIter::new(self, bar)
    }
}

#[cfg(test)]
mod tests {
    use super::ProgressIteratorExt as _;
    use crate::{ManualClock, ProgressBar, ProgressError, Terminal};

    fn test_bar(total: u64, terminal: &Terminal<Vec<u8>>) -> ProgressBar<Vec<u8>, ManualClock> {
        ProgressBar::builder(total)
            .label("iter")
            .clock(ManualClock::new())
            .build_on(terminal.clone())
            .unwrap()
    }

    /// Iterator Integration
    /// Each item is reported once the loop moves past it; exhaustion completes the bar.
    #[test]
    #[allow(clippy::float_cmp)]
    fn test_iterator_adapter() {
        let terminal = Terminal::new(Vec::new());
        let data = [1, 2, 3, 4, 5];

        let mut iter = data.iter().progress_with(test_bar(5, &terminal));

        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.bar().progress(), 0.0, "first item still in flight");

        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.bar().progress(), 0.2);

        let rest: Vec<_> = iter.by_ref().collect();
        assert_eq!(rest, [&3, &4, &5]);
        assert!(iter.bar().is_finished());
        assert_eq!(iter.len(), 0);

        // Polling again draws nothing more.
        let before = terminal.with_writer(|w| w.len());
        assert_eq!(iter.next(), None);
        assert_eq!(terminal.with_writer(|w| w.len()), before);

        let out = terminal.with_writer(|w| String::from_utf8(w.clone()).unwrap());
        assert_eq!(out.matches('\n').count(), 1);
    }

    /// Early Exit
    /// Breaking out leaves the bar running; the guard restores the cursor.
    #[test]
    fn test_early_exit_with_guard() {
        let terminal = Terminal::new(Vec::new());
        let bar = test_bar(10, &terminal);
        {
            let _cursor = bar.cursor_guard();
            for n in (0..10).progress_with(bar) {
                if n == 3 {
                    break;
                }
            }
            assert!(terminal.is_cursor_hidden());
        }
        assert!(!terminal.is_cursor_hidden());
    }

    /// Empty Iterator
    #[test]
    fn test_empty_iterator_rejected() {
        let empty: Vec<u8> = Vec::new();
        assert!(matches!(
            empty.into_iter().progress_bar("nothing"),
            Err(ProgressError::InvalidArgument { name: "total", .. })
        ));
    }
}
