use serde::{Deserialize, Serialize};

/// One input row: a product feature described by name and free text.
/// Immutable once loaded; the description may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureRecord {
    pub name: String,
    pub description: String,
}

impl FeatureRecord {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}
