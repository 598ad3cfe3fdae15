//! Loading and writing the JSON documents the engine works on.
//!
//! Load failures are fatal and carry the offending path; nothing is mutated
//! until every document needed by a command has been read.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use rulesync_core::{Catalog, EngineConfig};

pub fn load_json(path: &Path) -> Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse {} as JSON", path.display()))
}

pub fn load_catalog(path: &Path, config: &EngineConfig) -> Result<Catalog> {
    let value = load_json(path)?;
    Catalog::from_value(value, &config.keys.catalog)
        .with_context(|| format!("{} is not a rule catalog", path.display()))
}

/// `None` → built-in defaults.
pub fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    EngineConfig::from_json_str(&text).with_context(|| format!("invalid config {}", path.display()))
}

/// Pretty JSON (2-space indent, UTF-8 kept as-is) with a trailing newline.
pub fn write_json(path: &Path, value: &Value) -> Result<()> {
    let mut text = serde_json::to_string_pretty(value)?;
    text.push('\n');
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, text).with_context(|| format!("failed to write {}", path.display()))
}

pub fn write_catalog(path: &Path, catalog: &Catalog) -> Result<()> {
    let value = catalog.to_value()?;
    write_json(path, &value)
}
