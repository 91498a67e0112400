use std::collections::BTreeMap;
use std::fmt;

/// Field name to field shape mapping.
pub type Properties = BTreeMap<String, FieldSchema>;

/// Shape of one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldSchema {
    /// An opaque leaf value.
    Scalar,
    /// A homogeneous array; every element has the `items` shape.
    Array { items: Box<FieldSchema> },
    /// A nested document with its own field mapping.
    Object { properties: Properties },
    /// One or more identifiers of objects of the `target` type.
    Link { target: String },
}

impl FieldSchema {
    pub fn scalar() -> Self {
        Self::Scalar
    }

    pub fn array(items: FieldSchema) -> Self {
        Self::Array {
            items: Box::new(items),
        }
    }

    pub fn object<I, K>(properties: I) -> Self
    where
        I: IntoIterator<Item = (K, FieldSchema)>,
        K: Into<String>,
    {
        Self::Object {
            properties: properties.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }

    pub fn link(target: impl Into<String>) -> Self {
        Self::Link {
            target: target.into(),
        }
    }

    /// The kind tag of this shape.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::Scalar => FieldKind::Scalar,
            Self::Array { .. } => FieldKind::Array,
            Self::Object { .. } => FieldKind::Object,
            Self::Link { .. } => FieldKind::Link,
        }
    }
}

/// Kind tag of a [`FieldSchema`], used in error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Scalar,
    Array,
    Object,
    Link,
}

impl FieldKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scalar => "scalar",
            Self::Array => "array",
            Self::Object => "object",
            Self::Link => "link",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The declared shape of one object type.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Schema {
    type_name: String,
    fields: Properties,
}

impl Schema {
    pub fn new(type_name: impl Into<String>, fields: Properties) -> Self {
        Self {
            type_name: type_name.into(),
            fields,
        }
    }

    /// Builder-style helper for tests and embedded schemas.
    pub fn with_field(mut self, name: impl Into<String>, field: FieldSchema) -> Self {
        self.fields.insert(name.into(), field);
        self
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &Properties {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item_schema() -> Schema {
        Schema::new("Item", Properties::new())
            .with_field("tags", FieldSchema::array(FieldSchema::scalar()))
            .with_field("owner", FieldSchema::link("User"))
            .with_field(
                "meta",
                FieldSchema::object([
                    ("reviewers", FieldSchema::array(FieldSchema::link("Reviewer"))),
                    ("note", FieldSchema::scalar()),
                ]),
            )
    }

    #[test]
    fn field_lookup() {
        let schema = item_schema();
        assert_eq!(schema.type_name(), "Item");
        assert_eq!(schema.field("owner"), Some(&FieldSchema::link("User")));
        assert_eq!(schema.field("nope"), None);
        assert_eq!(schema.fields().len(), 3);
    }

    #[test]
    fn kinds() {
        let schema = item_schema();
        assert_eq!(schema.field("tags").unwrap().kind(), FieldKind::Array);
        assert_eq!(schema.field("owner").unwrap().kind(), FieldKind::Link);
        assert_eq!(schema.field("meta").unwrap().kind(), FieldKind::Object);
        assert_eq!(FieldSchema::scalar().kind().to_string(), "scalar");
    }
}
