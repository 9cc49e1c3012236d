//! Error types for the collection utilities.

use thiserror::Error;

/// Errors raised by the fallible collection operations.
///
/// Sorting, filtering and deduplication are total; only accumulation and
/// random filling can fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollectionError {
    /// Accumulation over zero elements has no seed to return.
    #[error("cannot accumulate '{key}' over an empty collection")]
    EmptyInput { key: String },

    /// A value met during accumulation was not a number.
    #[error("value of '{key}' at index {index} is {found}, expected a number")]
    NotNumeric {
        key: String,
        index: usize,
        found: &'static str,
    },

    /// Random fill was asked to choose from an empty filler set.
    #[error("random fill requires at least one filler value")]
    NoFillers,
}

/// Result type for collection operations.
pub type Result<T> = std::result::Result<T, CollectionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        let err = CollectionError::EmptyInput { key: "size".into() };
        assert_eq!(
            err.to_string(),
            "cannot accumulate 'size' over an empty collection"
        );

        let err = CollectionError::NotNumeric {
            key: "size".into(),
            index: 2,
            found: "string",
        };
        assert_eq!(
            err.to_string(),
            "value of 'size' at index 2 is string, expected a number"
        );

        assert_eq!(
            CollectionError::NoFillers.to_string(),
            "random fill requires at least one filler value"
        );
    }
}
