//! In-memory value types for the annotation data model
//!
//! These types carry the validity invariants (span ordering, document
//! ownership) that the persistence layer's flat records do not. Records
//! loaded from the store can be reconstituted into these types when
//! invariant checking is needed outside a persistence context.

mod annotation;
mod document;
mod entity;

pub use annotation::Annotation;
pub use document::Document;
pub use entity::Entity;

use thiserror::Error;

/// Validation failures raised by value-type construction and mutation.
///
/// These are caller errors: the input must be fixed, retrying is pointless.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The span is empty, inverted, or has a negative offset
    #[error("invalid span [{start}, {end}): offsets must be non-negative and start must be less than end")]
    InvalidSpan { start: i64, end: i64 },

    /// The annotation references a different document than the one it was
    /// added to
    #[error("annotation belongs to document {annotation_document_id}, not document {document_id}")]
    DocumentMismatch {
        document_id: String,
        annotation_document_id: String,
    },
}

/// Check the span invariant: both offsets non-negative, `start < end`.
///
/// This is the single validation point shared by [`Annotation`] construction
/// and every store write path, so the invariant is enforced identically
/// regardless of call site.
pub fn validate_span(start: i64, end: i64) -> Result<(), ValidationError> {
    if start < 0 || end < 0 || start >= end {
        return Err(ValidationError::InvalidSpan { start, end });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_spans() {
        assert!(validate_span(0, 1).is_ok());
        assert!(validate_span(0, 5).is_ok());
        assert!(validate_span(3, 4).is_ok());
    }

    #[test]
    fn test_zero_width_span_rejected() {
        assert_eq!(
            validate_span(5, 5),
            Err(ValidationError::InvalidSpan { start: 5, end: 5 })
        );
    }

    #[test]
    fn test_inverted_span_rejected() {
        assert_eq!(
            validate_span(7, 2),
            Err(ValidationError::InvalidSpan { start: 7, end: 2 })
        );
    }

    #[test]
    fn test_negative_offsets_rejected() {
        assert!(validate_span(-1, 5).is_err());
        assert!(validate_span(0, -5).is_err());
        assert!(validate_span(-3, -1).is_err());
    }
}
