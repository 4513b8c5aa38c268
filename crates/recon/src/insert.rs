use crate::model::{InsertProposal, RunContext, SourceRecord};
use crate::refmap::{normalize_code, ReferenceTables};

/// Build an insert proposal for a feed row with no store match.
///
/// Unlike the diff path, an unresolvable code here is an error-class
/// rejection: a new record cannot be created with an undefined foreign key,
/// whereas an existing record left unchanged is a safe no-op.
///
/// Returns `None` after recording the rejection when validation fails.
pub fn build_insert(
    source: &SourceRecord,
    refs: &ReferenceTables,
    ctx: &mut RunContext,
) -> Option<InsertProposal> {
    let external_id = source.external_id.trim();
    let first_name = source.first_name.trim();
    let last_name = source.last_name.trim();
    let team_code = normalize_code(&source.team_code);
    let position_code = normalize_code(&source.position_code);

    let mut missing = Vec::new();
    if external_id.is_empty() {
        missing.push("gsis_id");
    }
    if first_name.is_empty() {
        missing.push("first_name");
    }
    if last_name.is_empty() {
        missing.push("last_name");
    }
    if team_code.is_empty() {
        missing.push("latest_team");
    }
    if position_code.is_empty() {
        missing.push("position");
    }

    if !missing.is_empty() {
        ctx.reject(
            external_id,
            format!(
                "cannot insert player - missing fields [{}]: {}",
                missing.join(", "),
                source.name()
            ),
        );
        return None;
    }

    let Some(team_id) = refs.resolve_team(&team_code) else {
        ctx.reject(
            external_id,
            format!("cannot insert player - unknown team '{team_code}': {external_id}"),
        );
        return None;
    };

    let Some(position_id) = refs.resolve_position(&position_code) else {
        ctx.reject(
            external_id,
            format!("cannot insert player - unknown position '{position_code}': {external_id}"),
        );
        return None;
    };

    ctx.stats.new_players += 1;

    Some(InsertProposal {
        external_id: external_id.to_string(),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        team_id,
        position_id,
        jersey_number: source.jersey_number,
        display_name: source.name(),
    })
}
