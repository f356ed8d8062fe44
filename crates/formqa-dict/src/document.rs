//! # Dictionary Loading
//!
//! Reads a dictionary document from disk into a single `serde_json::Value`
//! tree. Dictionaries are hand-authored and arrive as either JSON or YAML,
//! chosen by file extension; YAML trees are converted to JSON values so the
//! normalizer and validator traverse one representation.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

/// Reserved root entry holding dictionary metadata (`name`, `version`,
/// free-text notes).
pub const META_KEY: &str = "_meta";

/// Reserved root entry mapping surface-form strings to canonical keys.
pub const ALIASES_KEY: &str = "aliases";

/// True for root entries that are not field categories.
pub fn is_reserved_category(name: &str) -> bool {
    name == META_KEY || name == ALIASES_KEY
}

/// Error while loading a dictionary document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("cannot read {path}: {source}")]
    Read {
        /// Path that failed to load.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not parseable in its declared format.
    #[error("cannot parse {path}: {reason}")]
    Parse {
        /// Path that failed to parse.
        path: String,
        /// Parser diagnostic.
        reason: String,
    },

    /// The document parsed, but its root is not a map.
    #[error("dictionary root must be a map, found {found}")]
    RootShape {
        /// Kind of the actual root value.
        found: &'static str,
    },
}

/// Load a dictionary from a JSON or YAML file into a JSON value tree.
///
/// The format is chosen by extension: `.yaml`/`.yml` parse as YAML and are
/// converted; everything else parses as JSON. The root must be a map.
///
/// # Errors
///
/// Returns [`DocumentError`] when the file cannot be read, cannot be
/// parsed, or has a non-map root. These are the only fatal conditions —
/// everything downstream is reported as issues, not errors.
pub fn load_dictionary(path: &Path) -> Result<Value, DocumentError> {
    let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Read {
        path: path.display().to_string(),
        source,
    })?;

    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    let document = match ext {
        "yaml" | "yml" => {
            let tree: serde_yaml::Value =
                serde_yaml::from_str(&content).map_err(|e| DocumentError::Parse {
                    path: path.display().to_string(),
                    reason: e.to_string(),
                })?;
            yaml_to_json(&tree).map_err(|reason| DocumentError::Parse {
                path: path.display().to_string(),
                reason,
            })?
        }
        _ => serde_json::from_str(&content).map_err(|e| DocumentError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?,
    };

    if !document.is_object() {
        return Err(DocumentError::RootShape {
            found: value_kind(&document),
        });
    }
    Ok(document)
}

/// Short kind name for a JSON value, for diagnostics.
pub(crate) fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "map",
    }
}

/// Convert a YAML value tree into the equivalent JSON value tree.
///
/// Dictionaries use only the JSON-compatible subset of YAML; tags are
/// unwrapped, and non-scalar map keys are rejected.
fn yaml_to_json(yaml: &serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;
    match yaml {
        Yaml::Null => Ok(Value::Null),
        Yaml::Bool(b) => Ok(Value::Bool(*b)),
        Yaml::Number(n) => yaml_number_to_json(n),
        Yaml::String(s) => Ok(Value::String(s.clone())),
        Yaml::Sequence(items) => items
            .iter()
            .map(yaml_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        Yaml::Mapping(entries) => {
            let mut map = serde_json::Map::with_capacity(entries.len());
            for (k, v) in entries {
                let key = match k {
                    Yaml::String(s) => s.clone(),
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported YAML map key: {other:?}")),
                };
                map.insert(key, yaml_to_json(v)?);
            }
            Ok(Value::Object(map))
        }
        Yaml::Tagged(tagged) => yaml_to_json(&tagged.value),
    }
}

fn yaml_number_to_json(n: &serde_yaml::Number) -> Result<Value, String> {
    if let Some(i) = n.as_i64() {
        Ok(Value::Number(i.into()))
    } else if let Some(u) = n.as_u64() {
        Ok(Value::Number(u.into()))
    } else if let Some(f) = n.as_f64() {
        serde_json::Number::from_f64(f)
            .map(Value::Number)
            .ok_or_else(|| format!("cannot represent {f} in JSON"))
    } else {
        Err(format!("unsupported YAML number: {n:?}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_reserved_categories() {
        assert!(is_reserved_category(META_KEY));
        assert!(is_reserved_category(ALIASES_KEY));
        assert!(!is_reserved_category("general"));
        assert!(!is_reserved_category("_metadata"));
    }

    #[test]
    fn test_yaml_scalars_convert() {
        let yaml: serde_yaml::Value = serde_yaml::from_str(
            "name: intake\nversion: \"1.0.0\"\ncount: 7\nratio: 0.5\nenabled: true\nnotes: null\n",
        )
        .unwrap();
        let value = yaml_to_json(&yaml).unwrap();
        assert_eq!(value["name"], "intake");
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(value["count"], 7);
        assert_eq!(value["ratio"], 0.5);
        assert_eq!(value["enabled"], true);
        assert_eq!(value["notes"], Value::Null);
    }

    #[test]
    fn test_yaml_nesting_converts() {
        let yaml: serde_yaml::Value = serde_yaml::from_str(
            "general:\n  - key: first_name\n    type: input\n  - key: dob\n    type: date\n",
        )
        .unwrap();
        let value = yaml_to_json(&yaml).unwrap();
        assert_eq!(value["general"][0]["key"], "first_name");
        assert_eq!(value["general"][1]["type"], "date");
    }

    #[test]
    fn test_load_json_dictionary() {
        let dir = std::env::temp_dir().join("formqa-doc-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("dict.json");
        std::fs::write(
            &path,
            serde_json::to_string(&json!({
                "_meta": {"name": "intake", "version": "1.0.0"},
                "general": [{"key": "first_name", "type": "input"}]
            }))
            .unwrap(),
        )
        .unwrap();

        let doc = load_dictionary(&path).unwrap();
        assert_eq!(doc["general"][0]["key"], "first_name");
    }

    #[test]
    fn test_load_rejects_non_map_root() {
        let dir = std::env::temp_dir().join("formqa-doc-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("list_root.json");
        std::fs::write(&path, "[1, 2, 3]").unwrap();

        let err = load_dictionary(&path).unwrap_err();
        assert!(matches!(err, DocumentError::RootShape { found: "list" }));
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let dir = std::env::temp_dir().join("formqa-doc-tests");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("broken.json");
        std::fs::write(&path, "{not json").unwrap();

        let err = load_dictionary(&path).unwrap_err();
        assert!(matches!(err, DocumentError::Parse { .. }));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_dictionary(Path::new("/nonexistent/dict.json")).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }
}
