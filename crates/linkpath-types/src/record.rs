use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RecordError;

/// Reserved identifier field.
pub const ID_KEY: &str = "@id";

/// Reserved type-tag field.
pub const TYPE_KEY: &str = "@type";

/// A fetched object document.
///
/// The document is always a JSON object carrying string `@id` and `@type`
/// fields. Everything else is opaque to this type. Records are never mutated
/// after construction.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value", into = "Value")]
pub struct ObjectRecord {
    id: String,
    type_name: String,
    document: Value,
}

impl ObjectRecord {
    /// Interpret a raw JSON value as an object record.
    pub fn from_value(document: Value) -> Result<Self, RecordError> {
        let map = document.as_object().ok_or(RecordError::NotAnObject)?;
        let id = reserved(map, ID_KEY)?;
        let type_name = reserved(map, TYPE_KEY)?;
        Ok(Self {
            id,
            type_name,
            document,
        })
    }

    /// The `@id` of this object.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The `@type` of this object, naming its schema.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// The whole document, reserved fields included.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Look up a top-level field.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.document.get(field)
    }

    /// Consume the record and return the raw document.
    pub fn into_value(self) -> Value {
        self.document
    }
}

fn reserved(map: &serde_json::Map<String, Value>, field: &'static str) -> Result<String, RecordError> {
    map.get(field)
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or(RecordError::MissingReserved { field })
}

impl TryFrom<Value> for ObjectRecord {
    type Error = RecordError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

impl From<ObjectRecord> for Value {
    fn from(record: ObjectRecord) -> Self {
        record.into_value()
    }
}
