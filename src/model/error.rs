//! Error types for the log core.
//!
//! The core is total apart from one rejection: a negative capacity passed to
//! a buffer or to the registry. Settings-load failures live in
//! [`crate::config::ConfigError`] and are absorbed at the workbench boundary;
//! they never surface here.

use thiserror::Error;

/// Errors raised synchronously by buffer and registry operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogError {
    /// A capacity below zero was requested.
    ///
    /// Raised by `LogBuffer::set_capacity` and `LoggerRegistry::set_max_length`
    /// before any state is touched, so a rejected call leaves every buffer as
    /// it was.
    ///
    /// # Examples
    ///
    /// ```
    /// use sourcelog::model::LogError;
    ///
    /// let err = LogError::InvalidArgument { requested: -5 };
    /// assert!(err.to_string().contains("-5"));
    /// ```
    #[error("Invalid capacity {requested}: must be zero or greater")]
    InvalidArgument {
        /// The rejected value.
        requested: i64,
    },
}

/// Validate a requested capacity and convert it to `usize`.
pub(crate) fn checked_capacity(requested: i64) -> Result<usize, LogError> {
    usize::try_from(requested).map_err(|_| LogError::InvalidArgument { requested })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_display_names_the_value() {
        let err = LogError::InvalidArgument { requested: -1 };
        let msg = err.to_string();
        assert!(msg.contains("Invalid capacity"));
        assert!(msg.contains("-1"));
    }

    #[test]
    fn checked_capacity_accepts_zero() {
        assert_eq!(checked_capacity(0), Ok(0));
    }

    #[test]
    fn checked_capacity_rejects_negative() {
        assert_eq!(
            checked_capacity(-3),
            Err(LogError::InvalidArgument { requested: -3 })
        );
    }
}
