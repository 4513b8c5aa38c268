use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ReconcileConfig {
    pub name: String,
    pub script: ScriptConfig,
    #[serde(default)]
    pub output: OutputConfig,
    /// Team abbreviation -> identifier in the store.
    pub teams: BTreeMap<String, u32>,
    /// Position code -> identifier in the store.
    pub positions: BTreeMap<String, u32>,
}

// ---------------------------------------------------------------------------
// Script target
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct ScriptConfig {
    pub schema: String,
    #[serde(default = "default_table")]
    pub table: String,
}

fn default_table() -> String {
    "TBLPLAYERS".into()
}

// ---------------------------------------------------------------------------
// Output file naming
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_sql_prefix")]
    pub sql_file_prefix: String,
    #[serde(default = "default_log_prefix")]
    pub log_file_prefix: String,
    /// strftime pattern for output file timestamps.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_sql_prefix() -> String {
    "player_updates".into()
}

fn default_log_prefix() -> String {
    "reconcile".into()
}

fn default_timestamp_format() -> String {
    "%Y%m%d_%H%M%S".into()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            sql_file_prefix: default_sql_prefix(),
            log_file_prefix: default_log_prefix(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ReconcileConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconcileConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.script.schema.trim().is_empty() {
            return Err(ReconError::ConfigValidation("script.schema must not be empty".into()));
        }
        if self.script.table.trim().is_empty() {
            return Err(ReconError::ConfigValidation("script.table must not be empty".into()));
        }

        validate_mapping("teams", &self.teams)?;
        validate_mapping("positions", &self.positions)?;

        Ok(())
    }
}

fn validate_mapping(section: &str, map: &BTreeMap<String, u32>) -> Result<(), ReconError> {
    if map.is_empty() {
        return Err(ReconError::ConfigValidation(format!(
            "[{section}] must define at least one code"
        )));
    }
    for (code, id) in map {
        if code.trim().is_empty() {
            return Err(ReconError::ConfigValidation(format!(
                "[{section}] has a blank code"
            )));
        }
        if *id == 0 {
            return Err(ReconError::ConfigValidation(format!(
                "[{section}] code '{code}': identifier must be a positive integer"
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
