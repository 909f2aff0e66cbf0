//! `package.json` patching

use crate::error::{Error, Result};
use camino::Utf8Path;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::debug;

/// Manifest file name inside a scaffolded project
pub const MANIFEST_FILE: &str = "package.json";

/// View of `package.json` as an ordered JSON object
///
/// Only `name` is ever touched. Every other top-level field is carried
/// through untouched and in its original order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageManifest {
    fields: Map<String, Value>,
}

impl PackageManifest {
    /// Parse a manifest from a JSON string
    pub fn from_json(json: &str, path: &Utf8Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|source| Error::ManifestParse {
            path: path.to_string(),
            source,
        })
    }

    /// Load a manifest from disk
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let json = std::fs::read_to_string(path).map_err(|source| Error::ManifestRead {
            path: path.to_string(),
            source,
        })?;
        Self::from_json(&json, path)
    }

    /// The `name` field, if present and a string
    pub fn name(&self) -> Option<&str> {
        self.fields.get("name").and_then(Value::as_str)
    }

    /// Set `name`, replacing any previous value of any type
    ///
    /// An existing key keeps its position; a missing one is appended.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.fields.insert("name".to_string(), Value::String(name.into()));
    }

    /// Top-level field by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Serialize with 2-space indentation and a trailing newline
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Write the manifest back, replacing the file entirely
    pub fn save(&self, path: &Utf8Path) -> Result<()> {
        let json = self
            .to_json()
            .map_err(|e| Error::manifest_write(path.as_str(), std::io::Error::from(e)))?;
        std::fs::write(path, json).map_err(|source| Error::manifest_write(path.as_str(), source))
    }
}

/// Set the `name` field of `<project_dir>/package.json`
///
/// Nothing besides `name` is read or modified.
pub fn patch_manifest_name(project_dir: &Utf8Path, package_name: &str) -> Result<()> {
    let path = project_dir.join(MANIFEST_FILE);
    let mut manifest = PackageManifest::load(&path)?;

    debug!(
        "Renaming package {:?} -> {:?} in {}",
        manifest.get("name"),
        package_name,
        path
    );
    manifest.set_name(package_name);
    manifest.save(&path)
}
