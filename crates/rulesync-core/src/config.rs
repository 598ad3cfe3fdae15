//! Engine configuration.
//!
//! Every document key, the identifier scheme and the ownership policy are
//! data, not constants. The defaults describe the kill-team dataset layout
//! (`weapon_rules` catalog, `killteamId` scopes, `WR` reference lists,
//! `abilities` annotations). A JSON config file only needs the fields it
//! overrides.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RulesyncError};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub keys: DocumentKeys,
    pub ids: IdScheme,
    pub ownership: OwnershipPolicy,
}

impl EngineConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(text)
            .map_err(|e| RulesyncError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let k = &self.keys;
        for (field, value) in [
            ("keys.catalog", &k.catalog),
            ("keys.scope", &k.scope),
            ("keys.references", &k.references),
            ("keys.reference_id", &k.reference_id),
            ("keys.annotations", &k.annotations),
            ("keys.annotation_name", &k.annotation_name),
            ("keys.annotation_description", &k.annotation_description),
        ] {
            if value.trim().is_empty() {
                return Err(RulesyncError::Config(format!("`{field}` must not be empty")));
            }
        }
        if self.ids.separator.is_alphanumeric() || self.ids.separator.is_whitespace() {
            return Err(RulesyncError::Config(format!(
                "`ids.separator` must be punctuation, got {:?}",
                self.ids.separator
            )));
        }
        if self.ids.marker == self.ids.separator {
            return Err(RulesyncError::Config(
                "`ids.marker` and `ids.separator` must differ".to_string(),
            ));
        }
        Ok(())
    }
}

/// Key names used in the catalog and instance documents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentKeys {
    /// Catalog document key holding the entry list.
    pub catalog: String,
    /// Object key that introduces a new scope for the subtree.
    pub scope: String,
    /// Object key holding a list of catalog references.
    pub references: String,
    pub reference_id: String,
    pub reference_parameter: String,
    pub reference_name: String,
    /// Object key holding a list of inline annotations.
    pub annotations: String,
    pub annotation_id: String,
    pub annotation_name: String,
    pub annotation_description: String,
}

impl Default for DocumentKeys {
    fn default() -> Self {
        Self {
            catalog: "weapon_rules".to_string(),
            scope: "killteamId".to_string(),
            references: "WR".to_string(),
            reference_id: "id".to_string(),
            reference_parameter: "number".to_string(),
            reference_name: "name".to_string(),
            annotations: "abilities".to_string(),
            annotation_id: "abilityId".to_string(),
            annotation_name: "abilityName".to_string(),
            annotation_description: "description".to_string(),
        }
    }
}

/// Shape of catalog identifiers: `<namespace><sep><scope><sep><name...>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdScheme {
    pub namespace: String,
    pub separator: char,
    /// Decoration character ignored when naming and matching (`*Shock`).
    pub marker: char,
    /// Identifiers with this prefix are shared by every scope. Empty disables.
    pub shared_prefix: String,
    /// Also treat the separator as a space and collapse whitespace when
    /// normalizing, so `PIERCING-CRITS` matches "Piercing Crits". Off by default.
    pub fold_separators: bool,
}

impl Default for IdScheme {
    fn default() -> Self {
        Self {
            namespace: "WR".to_string(),
            separator: '-',
            marker: '*',
            shared_prefix: "WR-UNIV-".to_string(),
            fold_separators: false,
        }
    }
}

/// What to do with an entry referenced from no scope at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnobservedPolicy {
    /// Assign `team = null`.
    #[default]
    Shared,
    /// Leave whatever `team` the entry already has.
    Keep,
}

/// What to do with an entry referenced from two or more scopes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContestedPolicy {
    /// Smallest scope identifier, byte-wise.
    #[default]
    LexicographicMin,
    /// Treat the entry as shared.
    Shared,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OwnershipPolicy {
    pub unobserved: UnobservedPolicy,
    pub contested: ContestedPolicy,
}
