use async_trait::async_trait;
use serde_json::Value;

use crate::error::SchemaResult;

/// Raw schema storage.
///
/// Implementations return the stored document untouched; parsing belongs to
/// the [`SchemaRegistry`](crate::SchemaRegistry). Returns `Ok(None)` if no
/// schema exists for the type name and `Err` on transport or I/O failure.
#[async_trait]
pub trait SchemaSource: Send + Sync {
    async fn fetch_schema(&self, type_name: &str) -> SchemaResult<Option<Value>>;
}

/// Reject type names that cannot be used as a file or URL key.
pub(crate) fn check_type_name(type_name: &str) -> SchemaResult<()> {
    let bad = type_name.is_empty()
        || type_name == "."
        || type_name.contains("..")
        || type_name.contains(['/', '\\']);
    if bad {
        return Err(crate::SchemaError::InvalidTypeName(type_name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass() {
        assert!(check_type_name("User").is_ok());
        assert!(check_type_name("lab-Experiment_v2").is_ok());
    }

    #[test]
    fn traversal_names_fail() {
        for name in ["", ".", "../etc/passwd", "a/b", "a\\b", "x..y"] {
            assert!(check_type_name(name).is_err(), "{name} should be rejected");
        }
    }
}
