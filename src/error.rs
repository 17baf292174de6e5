//! Error types for the Argent dispatch engine
//!
//! Dispatch never masks failures: an operation that would fail without a
//! cache fails identically through the cached fast path. Internal contract
//! breaches (e.g. a field accessor escaping its guarded layout) are bugs,
//! not errors, and abort via `unreachable!` rather than appearing here.

use thiserror::Error;

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

/// A dispatch-layer error, surfaced to the invoking expression
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum Error {
    /// Selector resolution found no invokable on the receiver's class chain
    #[error("DoesNotUnderstand: {class} does not understand #{selector}")]
    DoesNotUnderstand {
        /// Name of the class the lookup started from
        class: String,
        /// Selector that failed to resolve
        selector: String,
    },

    /// Field index outside the receiver class's declared layout
    #[error("FieldIndexOutOfBounds: index {index} outside the {count}-field layout of {class}")]
    FieldIndexOutOfBounds {
        /// Name of the receiver's class
        class: String,
        /// Requested field index (0-based)
        index: usize,
        /// Number of fields the layout declares
        count: usize,
    },

    /// Internal engine error
    #[error("InternalError: {0}")]
    InternalError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_does_not_understand_display() {
        let err = Error::DoesNotUnderstand {
            class: "Point".to_string(),
            selector: "frobnicate".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "DoesNotUnderstand: Point does not understand #frobnicate"
        );
    }

    #[test]
    fn test_field_index_display() {
        let err = Error::FieldIndexOutOfBounds {
            class: "Point".to_string(),
            index: 7,
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "FieldIndexOutOfBounds: index 7 outside the 2-field layout of Point"
        );
    }
}
