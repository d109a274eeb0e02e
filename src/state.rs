//! Persisted resource state
//!
//! A state document is JSON holding either one resource instance or a list
//! of them:
//!
//! ```json
//! {"id": "app-guid", "attributes": {"url": "https://example.com/app.zip"}}
//! {"instances": [{"id": "app-guid", "attributes": {}}]}
//! ```
//!
//! Attributes use the flatmap encoding (`git.#`, `git.0.url`, ...) and are
//! kept as plain strings; only the `legacy` reader interprets them.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, state_parse_failed, state_read_failed};
use crate::error::state::write_failed;

/// Flatmap attributes of one resource instance
pub type Attributes = BTreeMap<String, String>;

/// One persisted resource instance
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InstanceState {
    #[serde(default)]
    pub id: String,

    #[serde(default)]
    pub attributes: Attributes,

    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<String, Value>,
}

impl InstanceState {
    pub fn new(id: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id: id.into(),
            attributes,
            meta: BTreeMap::new(),
        }
    }

    /// An instance without an id has never been created and has nothing to migrate
    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    /// Copy of this instance with its attributes replaced
    #[must_use]
    pub fn with_attributes(&self, attributes: Attributes) -> Self {
        Self {
            attributes,
            ..self.clone()
        }
    }
}

/// A state file: a single instance or a list of instances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum StateDocument {
    Many { instances: Vec<InstanceState> },
    Single(InstanceState),
}

impl StateDocument {
    /// Read and parse a state file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| state_read_failed(path.display().to_string(), e.to_string()))?;
        Self::from_json(&content, path)
    }

    /// Parse a state document; `origin` names the source in errors
    pub fn from_json(content: &str, origin: &Path) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| state_parse_failed(origin.display().to_string(), e.to_string()))
    }

    /// Serialize as pretty-printed JSON with a trailing newline
    pub fn to_json(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Write the document to `path`, replacing any existing file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = self.to_json()?;
        std::fs::write(path, json)
            .map_err(|e| write_failed(path.display().to_string(), e.to_string()))
    }

    pub fn instances(&self) -> &[InstanceState] {
        match self {
            StateDocument::Many { instances } => instances,
            StateDocument::Single(instance) => std::slice::from_ref(instance),
        }
    }

    /// Build a new document of the same shape by transforming every
    /// instance. Stops at the first error.
    pub fn try_map<F>(&self, mut f: F) -> Result<Self>
    where
        F: FnMut(&InstanceState) -> Result<InstanceState>,
    {
        Ok(match self {
            StateDocument::Many { instances } => StateDocument::Many {
                instances: instances.iter().map(&mut f).collect::<Result<_>>()?,
            },
            StateDocument::Single(instance) => StateDocument::Single(f(instance)?),
        })
    }
}
