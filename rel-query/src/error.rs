use thiserror::Error;

/// The result type for fallible query operations.
pub type QueryResult<T> = Result<T, QueryError>;

/// An enum representing the errors that can be raised around a [`crate::prelude::Query`].
///
/// Building and merging queries never fails; errors only arise when reading values back or when
/// moving a finalized query across a wire boundary.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum QueryError {
    /// Tried to read a [`crate::prelude::Value`] as a type it doesn't hold.
    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Any serialization/deserialization issue.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn test_should_display_errors() {
        let error = QueryError::TypeMismatch {
            expected: "Int64",
            found: "Text",
        };
        assert_eq!(error.to_string(), "Type mismatch: expected Int64, found Text");

        let error = QueryError::Serialization("truncated".to_string());
        assert_eq!(error.to_string(), "Serialization error: truncated");
    }
}
