use serde::Serialize;

use super::{validate_span, Entity, ValidationError};

/// A validated span annotation over a document's text.
///
/// The span `[start_offset, end_offset)` is half-open and measured in
/// Unicode scalar (char) indices. Offsets are checked once, at
/// construction, and are immutable afterwards; nothing ties them to the
/// length of the document text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Annotation {
    id: String,
    document_id: String,
    start_offset: i64,
    end_offset: i64,
    entity: Entity,
}

impl Annotation {
    /// Construct an annotation, failing with
    /// [`ValidationError::InvalidSpan`] when the offsets are negative,
    /// zero-width, or inverted.
    pub fn new(
        id: impl Into<String>,
        document_id: impl Into<String>,
        start_offset: i64,
        end_offset: i64,
        entity: Entity,
    ) -> Result<Self, ValidationError> {
        validate_span(start_offset, end_offset)?;
        Ok(Self {
            id: id.into(),
            document_id: document_id.into(),
            start_offset,
            end_offset,
            entity,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn start_offset(&self) -> i64 {
        self.start_offset
    }

    pub fn end_offset(&self) -> i64 {
        self.end_offset
    }

    pub fn entity(&self) -> &Entity {
        &self.entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greeting() -> Entity {
        Entity::new("e1", "GREETING")
    }

    #[test]
    fn test_valid_annotation_round_trips() {
        let ann = Annotation::new("a1", "d1", 0, 5, greeting()).unwrap();
        assert_eq!(ann.id(), "a1");
        assert_eq!(ann.document_id(), "d1");
        assert_eq!(ann.start_offset(), 0);
        assert_eq!(ann.end_offset(), 5);
        assert_eq!(ann.entity().label, "GREETING");
    }

    #[test]
    fn test_zero_width_span_rejected() {
        let err = Annotation::new("a1", "d1", 5, 5, greeting()).unwrap_err();
        assert_eq!(err, ValidationError::InvalidSpan { start: 5, end: 5 });
    }

    #[test]
    fn test_inverted_span_rejected() {
        assert!(matches!(
            Annotation::new("a1", "d1", 6, 2, greeting()),
            Err(ValidationError::InvalidSpan { .. })
        ));
    }

    #[test]
    fn test_negative_offsets_rejected() {
        assert!(Annotation::new("a1", "d1", -1, 5, greeting()).is_err());
        assert!(Annotation::new("a1", "d1", 0, -5, greeting()).is_err());
    }

    #[test]
    fn test_offsets_may_exceed_text_bounds() {
        // The span is not tied to any document text length.
        assert!(Annotation::new("a1", "d1", 1000, 2000, greeting()).is_ok());
    }
}
