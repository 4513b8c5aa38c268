use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// One roster entry from the external feed. Immutable for the run.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    pub external_id: String,
    pub first_name: String,
    pub last_name: String,
    pub display_name: String,
    pub team_code: String,
    pub position_code: String,
    pub jersey_number: Option<u32>,
}

impl SourceRecord {
    /// Human-readable name for log messages and script comments.
    /// Falls back to "first last" when the feed has no display name.
    pub fn name(&self) -> String {
        if self.display_name.trim().is_empty() {
            format!("{} {}", self.first_name, self.last_name)
        } else {
            self.display_name.clone()
        }
    }
}

/// One existing row from the player table, snapshotted for the run.
/// `team_label`/`position_label` are denormalized display fields used
/// only in human-readable diff comments.
#[derive(Debug, Clone)]
pub struct StoreRecord {
    pub store_id: i64,
    pub external_id: String,
    pub first_name: String,
    pub last_name: String,
    pub team_ref: Option<u32>,
    pub position_ref: Option<u32>,
    pub team_label: String,
    pub position_label: String,
}

/// Pre-loaded datasets: the feed in its stable order, plus the store snapshot.
pub struct ReconInput {
    pub source: Vec<SourceRecord>,
    pub store: Vec<StoreRecord>,
}

// ---------------------------------------------------------------------------
// Run mode
// ---------------------------------------------------------------------------

/// Team-only is the weekly default; full reconcile additionally diffs the
/// position classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunMode {
    TeamOnly,
    FullReconcile,
}

impl RunMode {
    pub fn from_flag(full_reconcile: bool) -> Self {
        if full_reconcile {
            Self::FullReconcile
        } else {
            Self::TeamOnly
        }
    }

    pub fn is_full(self) -> bool {
        self == Self::FullReconcile
    }
}

impl std::fmt::Display for RunMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TeamOnly => write!(f, "team_only"),
            Self::FullReconcile => write!(f, "full_reconcile"),
        }
    }
}

// ---------------------------------------------------------------------------
// Change proposals
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeField {
    Team,
    Position,
}

impl ChangeField {
    /// Column name in the player table.
    pub fn column(self) -> &'static str {
        match self {
            Self::Team => "REALTEAMID",
            Self::Position => "POSITIONID",
        }
    }

    /// Label used in script comments.
    pub fn label(self) -> &'static str {
        match self {
            Self::Team => "Team",
            Self::Position => "Position",
        }
    }
}

impl std::fmt::Display for ChangeField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Team => write!(f, "team"),
            Self::Position => write!(f, "position"),
        }
    }
}

/// One field-level change on an existing record. `old` is `None` when the
/// store row had no identifier set.
#[derive(Debug, Clone, Serialize)]
pub struct FieldChange {
    pub field: ChangeField,
    pub old: Option<u32>,
    pub new: u32,
    pub old_label: String,
    pub new_label: String,
}

/// Proposed UPDATE for one store row. Invariant: `changes` is never empty;
/// a record with no field changes is counted as unchanged and no proposal
/// is built.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeProposal {
    pub store_id: i64,
    pub external_id: String,
    pub name: String,
    pub changes: Vec<FieldChange>,
}

/// Proposed INSERT for a feed row absent from the store. Construction either
/// fully succeeds or yields a rejection; never partially populated.
#[derive(Debug, Clone, Serialize)]
pub struct InsertProposal {
    pub external_id: String,
    pub first_name: String,
    pub last_name: String,
    pub team_id: u32,
    pub position_id: u32,
    pub jersey_number: Option<u32>,
    pub display_name: String,
}

/// A record excluded from the run, with a human-readable reason. Severity is
/// carried by which channel it lands on (warnings vs errors).
#[derive(Debug, Clone, Serialize)]
pub struct Rejection {
    pub subject: String,
    pub reason: String,
}

// ---------------------------------------------------------------------------
// Run context + statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    pub team_updates: usize,
    pub position_updates: usize,
    pub new_players: usize,
    pub unchanged: usize,
    pub warnings: usize,
    pub errors: usize,
}

/// Mutable per-run accumulators, passed explicitly through each
/// reconciliation step. Exclusively owned by the single pass; no ambient
/// state survives the run.
#[derive(Debug, Default)]
pub struct RunContext {
    pub stats: RunStats,
    pub warnings: Vec<Rejection>,
    pub errors: Vec<Rejection>,
}

impl RunContext {
    pub fn warn(&mut self, subject: impl Into<String>, reason: impl Into<String>) {
        self.warnings.push(Rejection {
            subject: subject.into(),
            reason: reason.into(),
        });
        self.stats.warnings += 1;
    }

    pub fn reject(&mut self, subject: impl Into<String>, reason: impl Into<String>) {
        self.errors.push(Rejection {
            subject: subject.into(),
            reason: reason.into(),
        });
        self.stats.errors += 1;
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub config_name: String,
    pub mode: RunMode,
    pub engine_version: String,
    pub run_at: String,
}

/// Final output of one reconciliation pass: ordered updates and inserts plus
/// the error/warning channels and the statistics snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    pub stats: RunStats,
    pub updates: Vec<ChangeProposal>,
    pub inserts: Vec<InsertProposal>,
    pub warnings: Vec<Rejection>,
    pub errors: Vec<Rejection>,
}

impl ReconReport {
    /// True when the pass produced nothing to apply.
    pub fn is_empty(&self) -> bool {
        self.updates.is_empty() && self.inserts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_falls_back_to_first_last() {
        let row = SourceRecord {
            external_id: "00-1".into(),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            display_name: "  ".into(),
            team_code: "KC".into(),
            position_code: "QB".into(),
            jersey_number: None,
        };
        assert_eq!(row.name(), "Jane Doe");
    }

    #[test]
    fn context_counts_track_channels() {
        let mut ctx = RunContext::default();
        ctx.warn("00-1", "unknown team 'XX'");
        ctx.reject("00-2", "missing fields");
        ctx.reject("00-3", "unknown position");
        assert_eq!(ctx.stats.warnings, 1);
        assert_eq!(ctx.stats.errors, 2);
        assert_eq!(ctx.warnings.len(), 1);
        assert_eq!(ctx.errors.len(), 2);
    }
}
