use crate::model::{
    ChangeField, ChangeProposal, FieldChange, RunContext, RunMode, SourceRecord, StoreRecord,
};
use crate::refmap::{normalize_code, ReferenceTables};

/// Compute the field-level change set for a matched pair.
///
/// Team is always checked; position only in full-reconcile mode. An unknown
/// code on this path degrades to "no change + warning" — an unmapped code on
/// an existing record is not fatal to reconciliation, so it never becomes an
/// error and never passes through as a change to an undefined identifier.
///
/// Returns `None` (and counts the record as unchanged) when no field differs.
pub fn diff(
    source: &SourceRecord,
    store: &StoreRecord,
    refs: &ReferenceTables,
    mode: RunMode,
    ctx: &mut RunContext,
) -> Option<ChangeProposal> {
    let mut changes = Vec::new();

    let team_code = normalize_code(&source.team_code);
    if !team_code.is_empty() {
        match refs.resolve_team(&team_code) {
            Some(new_id) => {
                if store.team_ref != Some(new_id) {
                    changes.push(FieldChange {
                        field: ChangeField::Team,
                        old: store.team_ref,
                        new: new_id,
                        old_label: store.team_label.clone(),
                        new_label: team_code.clone(),
                    });
                    ctx.stats.team_updates += 1;
                }
            }
            None => ctx.warn(
                source.external_id.trim(),
                format!(
                    "unknown team '{team_code}' for player {} - {}",
                    source.external_id.trim(),
                    source.name()
                ),
            ),
        }
    }

    if mode.is_full() {
        let position_code = normalize_code(&source.position_code);
        if !position_code.is_empty() {
            match refs.resolve_position(&position_code) {
                Some(new_id) => {
                    if store.position_ref != Some(new_id) {
                        changes.push(FieldChange {
                            field: ChangeField::Position,
                            old: store.position_ref,
                            new: new_id,
                            old_label: store.position_label.clone(),
                            new_label: position_code.clone(),
                        });
                        ctx.stats.position_updates += 1;
                    }
                }
                None => ctx.warn(
                    source.external_id.trim(),
                    format!(
                        "unknown position '{position_code}' for player {} - {}",
                        source.external_id.trim(),
                        source.name()
                    ),
                ),
            }
        }
    }

    if changes.is_empty() {
        ctx.stats.unchanged += 1;
        return None;
    }

    Some(ChangeProposal {
        store_id: store.store_id,
        external_id: source.external_id.trim().to_string(),
        name: source.name(),
        changes,
    })
}
