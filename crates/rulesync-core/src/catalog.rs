//! Catalog document model.
//!
//! The catalog is a JSON object whose entry list sits under one key
//! (`weapon_rules` by default). Everything else in the document, and any
//! unrecognised field on an entry, is carried through untouched.

use std::collections::HashSet;

use rulesync_shape::JsonKind;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, RulesyncError};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    #[serde(default)]
    pub name: String,
    /// Occurrences carry a numeric parameter (`Lethal 5+`, `Piercing 1`).
    #[serde(default)]
    pub variable: bool,
    #[serde(default)]
    pub description: String,
    /// `universal: true` marks an entry shared regardless of usage. Ownership
    /// resolution keeps it on shared entries and drops it everywhere else.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub universal: Option<bool>,
    /// Owning scope; `None` means shared (or not resolved yet).
    #[serde(default)]
    pub team: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogEntry {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            variable: false,
            description: String::new(),
            universal: None,
            team: None,
            extra: Map::new(),
        }
    }

    pub fn with_team(mut self, team: &str) -> Self {
        self.team = Some(team.to_string());
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    /// Scope `scope` may use this entry: it is shared or owned by `scope`.
    pub fn usable_in(&self, scope: Option<&str>) -> bool {
        match self.team.as_deref() {
            None => true,
            Some(team) => scope == Some(team),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Catalog {
    pub entries: Vec<CatalogEntry>,
    key: String,
    document: Map<String, Value>,
}

impl Catalog {
    /// Parse a catalog document, taking entries from `document[key]`.
    pub fn from_value(document: Value, key: &str) -> Result<Self> {
        let mut document = match document {
            Value::Object(map) => map,
            other => {
                return Err(RulesyncError::CatalogNotObject {
                    found: JsonKind::of(&other).as_str(),
                })
            }
        };
        let list = match document.get_mut(key) {
            Some(Value::Array(items)) => std::mem::take(items),
            Some(other) => {
                return Err(RulesyncError::CatalogNotArray {
                    key: key.to_string(),
                    found: JsonKind::of(other).as_str(),
                })
            }
            None => {
                return Err(RulesyncError::MissingCatalogKey {
                    key: key.to_string(),
                })
            }
        };

        let entries = list
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                serde_json::from_value(item)
                    .map_err(|source| RulesyncError::InvalidEntry { index, source })
            })
            .collect::<Result<Vec<CatalogEntry>>>()?;

        Ok(Self {
            entries,
            key: key.to_string(),
            document,
        })
    }

    /// Bare catalog (`{ key: [...] }`), mostly for tests and tooling.
    pub fn from_entries(key: &str, entries: Vec<CatalogEntry>) -> Self {
        let mut document = Map::new();
        document.insert(key.to_string(), Value::Array(Vec::new()));
        Self {
            entries,
            key: key.to_string(),
            document,
        }
    }

    /// Rebuild the full document, entries back in their original slot.
    pub fn to_value(&self) -> Result<Value> {
        let items = self
            .entries
            .iter()
            .map(|e| {
                serde_json::to_value(e).map_err(|source| RulesyncError::Serialize {
                    id: e.id.clone(),
                    source,
                })
            })
            .collect::<Result<Vec<Value>>>()?;
        let mut document = self.document.clone();
        document.insert(self.key.clone(), Value::Array(items));
        Ok(Value::Object(document))
    }

    pub fn ids(&self) -> HashSet<&str> {
        self.entries.iter().map(|e| e.id.as_str()).collect()
    }

    pub fn get(&self, id: &str) -> Option<&CatalogEntry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
