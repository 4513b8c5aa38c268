use std::collections::BTreeMap;

use crate::config::ReconcileConfig;

/// Trim and uppercase a free-text code before lookup.
pub fn normalize_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Fixed code -> identifier lookups, loaded once and read-only for the run.
/// Exact match after normalization; no fuzzy matching, no abbreviation
/// inference. An absent code is a normal, reportable condition.
#[derive(Debug)]
pub struct ReferenceTables {
    teams: BTreeMap<String, u32>,
    positions: BTreeMap<String, u32>,
}

impl ReferenceTables {
    pub fn from_config(config: &ReconcileConfig) -> Self {
        Self {
            teams: normalize_keys(&config.teams),
            positions: normalize_keys(&config.positions),
        }
    }

    pub fn resolve_team(&self, code: &str) -> Option<u32> {
        self.teams.get(&normalize_code(code)).copied()
    }

    pub fn resolve_position(&self, code: &str) -> Option<u32> {
        self.positions.get(&normalize_code(code)).copied()
    }
}

fn normalize_keys(map: &BTreeMap<String, u32>) -> BTreeMap<String, u32> {
    map.iter().map(|(k, v)| (normalize_code(k), *v)).collect()
}
