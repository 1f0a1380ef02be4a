//! Per-node configuration parsed from `index.json`.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Result, TreeError};

/// Name of the optional per-directory configuration file.
pub const META_FILENAME: &str = "index.json";

/// A set of component properties used to render one demo state.
///
/// The content is opaque to the tree; it is handed to the rendering layer as-is.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropSet(pub serde_json::Value);

impl PropSet {
    /// Optional `name` field of an object property set.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(serde_json::Value::as_str)
    }
}

impl From<serde_json::Value> for PropSet {
    fn from(value: serde_json::Value) -> Self {
        Self(value)
    }
}

/// Metadata as specified in a node's `index.json`.
///
/// Never stored on a node; parsed fresh on every access.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NodeMeta {
    /// Import alias. When empty, the node URL is used instead.
    #[serde(deserialize_with = "null_as_default")]
    pub import: String,
    /// Demo property sets, in file order.
    #[serde(deserialize_with = "null_as_default")]
    pub demo: Vec<PropSet>,
}

impl NodeMeta {
    /// Read metadata from `dir/index.json`.
    ///
    /// A missing file yields an empty `NodeMeta`.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::Io`] if the file exists but cannot be read, and
    /// [`TreeError::MetadataParse`] if it is not valid JSON for this schema.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(META_FILENAME);

        let content = match fs::read(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(TreeError::io(path, e)),
        };

        serde_json::from_slice(&content).map_err(|source| TreeError::MetadataParse { path, source })
    }

    /// True if neither an import alias nor demos are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.import.is_empty() && self.demo.is_empty()
    }
}

/// Treat an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();

        let meta = NodeMeta::load(dir.path()).unwrap();

        assert!(meta.is_empty());
        assert_eq!(meta, NodeMeta::default());
    }

    #[test]
    fn test_load_full_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(META_FILENAME),
            r#"{"import":"MyButton","demo":[{"label":"A"},{"label":"B"}]}"#,
        )
        .unwrap();

        let meta = NodeMeta::load(dir.path()).unwrap();

        assert_eq!(meta.import, "MyButton");
        assert_eq!(
            meta.demo,
            vec![
                PropSet(json!({"label": "A"})),
                PropSet(json!({"label": "B"}))
            ]
        );
    }

    #[test]
    fn test_load_ignores_unknown_keys_and_nulls() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(META_FILENAME),
            r#"{"import":null,"demo":null,"keywords":["form"]}"#,
        )
        .unwrap();

        let meta = NodeMeta::load(dir.path()).unwrap();

        assert!(meta.is_empty());
    }

    #[test]
    fn test_load_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(META_FILENAME), "{\"import\": ").unwrap();

        let err = NodeMeta::load(dir.path()).unwrap_err();

        assert!(matches!(err, TreeError::MetadataParse { .. }));
        assert!(err.to_string().contains(META_FILENAME));
    }

    #[test]
    fn test_load_wrong_schema() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(META_FILENAME), r#"{"demo": "not a list"}"#).unwrap();

        let err = NodeMeta::load(dir.path()).unwrap_err();

        assert!(matches!(err, TreeError::MetadataParse { .. }));
    }

    #[test]
    fn test_prop_set_name() {
        assert_eq!(PropSet(json!({"name": "primary"})).name(), Some("primary"));
        assert_eq!(PropSet(json!({"name": 1})).name(), None);
        assert_eq!(PropSet(json!(["name"])).name(), None);
    }
}
