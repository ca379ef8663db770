//! Error type for progress bar construction.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T, E = ProgressError> = std::result::Result<T, E>;

/// Errors reported while building a [`ProgressBar`](crate::ProgressBar).
///
/// Construction is the only place the crate reports failures. Once a bar exists,
/// [`update`](crate::ProgressBar::update) never fails: out-of-range indices are ignored
/// and write errors are logged.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ProgressError {
    /// A construction argument was rejected.
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument {
        /// The offending parameter.
        name: &'static str,
        /// Why it was rejected.
        reason: &'static str,
    },
}

impl ProgressError {
    pub(crate) const fn invalid(name: &'static str, reason: &'static str) -> Self {
        Self::InvalidArgument { name, reason }
    }
}

#[cfg(test)]
mod tests {
    use super::ProgressError;

    #[test]
    fn test_display() {
        let err = ProgressError::invalid("total", "must be greater than zero");
        assert_eq!(
            err.to_string(),
            "invalid argument `total`: must be greater than zero"
        );
    }
}
