use serde::{Deserialize, Serialize};

/// A labeled concept an annotation refers to (e.g. "PERSON", "GREETING").
///
/// Plain immutable value: no validation, no uniqueness beyond id identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: String,
    pub label: String,
}

impl Entity {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}
