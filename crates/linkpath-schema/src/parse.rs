//! Schema document parsing.
//!
//! ```text
//! { "type": "object",
//!   "properties": {
//!     "tags":  { "type": "array", "items": { "type": "string" } },
//!     "owner": { "type": "string", "linkTo": "User" },
//!     "meta":  { "type": "object", "properties": { "note": {} } } } }
//! ```
//!
//! The field mapping is the document's `properties` member when that is an
//! object, otherwise the document itself. A field is an array if its `type`
//! is `"array"`, an object if it has `properties`, a link if it has
//! `linkTo`, and a scalar otherwise, checked in that order.

use serde_json::{Map, Value};

use linkpath_types::{FieldSchema, Properties, Schema};

use crate::error::{SchemaError, SchemaResult};

const TYPE: &str = "type";
const ITEMS: &str = "items";
const PROPERTIES: &str = "properties";
const LINK_TO: &str = "linkTo";

/// Parse a stored schema document for `type_name`.
pub fn parse_schema(type_name: &str, document: &Value) -> SchemaResult<Schema> {
    let root = document
        .as_object()
        .ok_or_else(|| SchemaError::malformed(type_name, "schema document is not an object"))?;
    let fields = match root.get(PROPERTIES) {
        Some(Value::Object(properties)) => properties,
        _ => root,
    };
    let fields = parse_properties(type_name, "", fields)?;
    Ok(Schema::new(type_name, fields))
}

fn parse_properties(
    type_name: &str,
    prefix: &str,
    fields: &Map<String, Value>,
) -> SchemaResult<Properties> {
    fields
        .iter()
        .map(|(name, entry)| {
            let location = format!("{prefix}{name}");
            parse_field(type_name, &location, entry).map(|field| (name.clone(), field))
        })
        .collect()
}

fn parse_field(type_name: &str, location: &str, entry: &Value) -> SchemaResult<FieldSchema> {
    let entry = entry.as_object().ok_or_else(|| {
        SchemaError::malformed(type_name, format!("field `{location}` is not an object"))
    })?;

    if entry.get(TYPE).and_then(Value::as_str) == Some("array") {
        let items = entry.get(ITEMS).ok_or_else(|| {
            SchemaError::malformed(type_name, format!("array field `{location}` has no `items`"))
        })?;
        let items = parse_field(type_name, &format!("{location}[]"), items)?;
        return Ok(FieldSchema::array(items));
    }

    if let Some(properties) = entry.get(PROPERTIES) {
        let properties = properties.as_object().ok_or_else(|| {
            SchemaError::malformed(
                type_name,
                format!("`properties` of field `{location}` is not an object"),
            )
        })?;
        let properties = parse_properties(type_name, &format!("{location}."), properties)?;
        return Ok(FieldSchema::Object { properties });
    }

    if let Some(target) = entry.get(LINK_TO) {
        let target = target.as_str().ok_or_else(|| {
            SchemaError::malformed(
                type_name,
                format!("`linkTo` of field `{location}` is not a string"),
            )
        })?;
        return Ok(FieldSchema::link(target));
    }

    Ok(FieldSchema::Scalar)
}
