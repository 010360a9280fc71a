use serde::Serialize;

use super::{Annotation, ValidationError};

/// A text document and the annotations it owns.
///
/// The annotation sequence is append-only; insertion order is the iteration
/// order. The document enforces that every annotation it holds references
/// it by id. Removal happens at the store layer, not here.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    id: String,
    text: String,
    annotations: Vec<Annotation>,
}

impl Document {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            annotations: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Append an annotation to the owned sequence.
    ///
    /// Fails with [`ValidationError::DocumentMismatch`] when the annotation
    /// references a different document; the sequence is left unchanged.
    pub fn add_annotation(&mut self, annotation: Annotation) -> Result<(), ValidationError> {
        if annotation.document_id() != self.id {
            return Err(ValidationError::DocumentMismatch {
                document_id: self.id.clone(),
                annotation_document_id: annotation.document_id().to_string(),
            });
        }
        self.annotations.push(annotation);
        Ok(())
    }
}
