use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A contact record keyed by `id`.
///
/// Only `id` is interpreted. Every other JSON field is kept in `fields` and
/// written back out unchanged, so clients can attach whatever they need
/// (name, email, phone, ...).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Empty when the client left it out; the store assigns one on create.
    #[serde(default)]
    pub id: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Contact {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), fields: Map::new() }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn field(&self, key: &str) -> Option<&Value> { self.fields.get(key) }

    pub fn has_id(&self) -> bool { !self.id.is_empty() }
}
