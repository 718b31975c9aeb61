//! Library error type.
//!
//! Gameplay never fails: rejected moves are ordinary outcomes. Errors only
//! arise from invalid configuration, from snapshot encoding and from decoded
//! data that breaks a structural invariant.

use thiserror::Error;

/// Errors raised while configuring a game or encoding its state.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value is out of range.
    #[error("invalid configuration: {field} {reason}")]
    InvalidConfig {
        field: &'static str,
        reason: String,
    },

    /// A snapshot could not be encoded or decoded.
    #[error("snapshot codec error: {0}")]
    Codec(#[from] bincode::Error),

    /// Decoded data is well-formed but internally inconsistent.
    #[error("inconsistent {what}: {reason}")]
    Inconsistent {
        what: &'static str,
        reason: String,
    },
}

impl Error {
    /// Shorthand for an `InvalidConfig` error.
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidConfig {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn inconsistent(what: &'static str, reason: impl Into<String>) -> Self {
        Error::Inconsistent {
            what,
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Fail with `InvalidConfig` unless `value` is positive.
pub(crate) fn ensure_positive<T>(field: &'static str, value: T) -> Result<()>
where
    T: PartialOrd + Default + std::fmt::Display,
{
    if value > T::default() {
        Ok(())
    } else {
        Err(Error::invalid(field, format!("must be positive, got {}", value)))
    }
}
