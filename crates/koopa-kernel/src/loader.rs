//! World documents: the declarative JSON that seeds a filesystem.
//!
//! Each entry in a JSON object is classified by shape:
//!
//! ```json
//! {
//!   "notes.txt": "plain text, permission 0",
//!   "memo": { "permission": 1, "content": "text gated at level 1" },
//!   "DecryptPass.exe": "",
//!   "Findings1.exe": "swordfish",
//!   "Documents": { "enc_passwords": "sealed at load time" }
//! }
//! ```
//!
//! Executables are recognised by their `.exe` suffix; the string is the
//! password (empty means none). Names starting with `enc_` are sealed when the
//! tree is built.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::vfs::{EXECUTABLE_SUFFIX, SEALED_PREFIX, Trigger, is_valid_name};

/// Errors raised while classifying a world document.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read world {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("world is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("world root must be a JSON object")]
    RootNotObject,
    #[error("invalid entry name at {path}")]
    InvalidName { path: String },
    #[error("cannot classify entry at {path}")]
    Unclassifiable { path: String },
    #[error("unrecognized executable at {path}")]
    UnknownTrigger { path: String },
}

/// One classified entry of a world document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntrySpec {
    Directory(BTreeMap<String, EntrySpec>),
    Text { content: String, permission: u32 },
    Executable { trigger: Trigger, password: Option<String> },
}

/// A fully classified world: the children of the root directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldSpec {
    pub root: BTreeMap<String, EntrySpec>,
}

/// Parse and classify a world from JSON text.
pub fn parse_world(json: &str) -> Result<WorldSpec, LoadError> {
    let value: Value = serde_json::from_str(json)?;
    world_from_value(&value)
}

/// Read, parse and classify a world file.
pub fn load_world_file(path: &Path) -> Result<WorldSpec, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_world(&json)
}

/// Classify an already-parsed JSON value.
pub fn world_from_value(value: &Value) -> Result<WorldSpec, LoadError> {
    let Value::Object(map) = value else {
        return Err(LoadError::RootNotObject);
    };
    Ok(WorldSpec {
        root: classify_children("", map)?,
    })
}

fn classify_children(
    parent: &str,
    map: &Map<String, Value>,
) -> Result<BTreeMap<String, EntrySpec>, LoadError> {
    map.iter()
        .map(|(name, value)| {
            let path = format!("{parent}/{name}");
            check_name(name, &path)?;
            let entry = classify(name, &path, value)?;
            Ok((name.clone(), entry))
        })
        .collect()
}

fn check_name(name: &str, path: &str) -> Result<(), LoadError> {
    let unsealed = name.strip_prefix(SEALED_PREFIX).unwrap_or(name);
    if is_valid_name(name) && is_valid_name(unsealed) {
        Ok(())
    } else {
        Err(LoadError::InvalidName {
            path: path.to_string(),
        })
    }
}

fn classify(name: &str, path: &str, value: &Value) -> Result<EntrySpec, LoadError> {
    match value {
        Value::String(s) if name.ends_with(EXECUTABLE_SUFFIX) => {
            let trigger = Trigger::from_executable_name(name).ok_or_else(|| {
                LoadError::UnknownTrigger {
                    path: path.to_string(),
                }
            })?;
            let password = (!s.is_empty()).then(|| s.clone());
            Ok(EntrySpec::Executable { trigger, password })
        }
        Value::String(s) => Ok(EntrySpec::Text {
            content: s.clone(),
            permission: 0,
        }),
        Value::Object(map) if is_gated_text(map) => {
            let unclassifiable = || LoadError::Unclassifiable {
                path: path.to_string(),
            };
            let permission = map
                .get("permission")
                .and_then(Value::as_u64)
                .and_then(|p| u32::try_from(p).ok())
                .ok_or_else(unclassifiable)?;
            let content = map
                .get("content")
                .and_then(Value::as_str)
                .ok_or_else(unclassifiable)?;
            Ok(EntrySpec::Text {
                content: content.to_string(),
                permission,
            })
        }
        Value::Object(map) => Ok(EntrySpec::Directory(classify_children(path, map)?)),
        _ => Err(LoadError::Unclassifiable {
            path: path.to_string(),
        }),
    }
}

/// An object with exactly the keys `permission` and `content`.
fn is_gated_text(map: &Map<String, Value>) -> bool {
    map.len() == 2 && map.contains_key("permission") && map.contains_key("content")
}
