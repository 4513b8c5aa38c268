use crate::config::ReconcileConfig;
use crate::diff::diff;
use crate::error::ReconError;
use crate::insert::build_insert;
use crate::matcher::{index_store, match_records};
use crate::model::{
    ReconInput, ReconMeta, ReconReport, RunContext, RunMode, SourceRecord, StoreRecord,
};
use crate::refmap::ReferenceTables;

/// Run one reconciliation pass. Single-threaded and synchronous: both
/// snapshots are fully materialized before this is called, records are
/// processed in feed order, and the output lists preserve that order.
pub fn run(
    config: &ReconcileConfig,
    input: &ReconInput,
    mode: RunMode,
) -> Result<ReconReport, ReconError> {
    let refs = ReferenceTables::from_config(config);
    let index = index_store(&input.store)?;
    let partition = match_records(&input.source, &index);

    let mut ctx = RunContext::default();
    let mut updates = Vec::new();
    let mut inserts = Vec::new();

    for (source, store) in &partition.matched {
        if let Some(proposal) = diff(source, store, &refs, mode, &mut ctx) {
            updates.push(proposal);
        }
    }

    for source in &partition.unmatched {
        if let Some(proposal) = build_insert(source, &refs, &mut ctx) {
            inserts.push(proposal);
        }
    }

    Ok(ReconReport {
        meta: ReconMeta {
            config_name: config.name.clone(),
            mode,
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
        },
        stats: ctx.stats,
        updates,
        inserts,
        warnings: ctx.warnings,
        errors: ctx.errors,
    })
}

// ---------------------------------------------------------------------------
// Ingestion
// ---------------------------------------------------------------------------

const FEED_EXTERNAL_ID: &str = "gsis_id";
const FEED_FIRST_NAME: &str = "first_name";
const FEED_LAST_NAME: &str = "last_name";
const FEED_DISPLAY_NAME: &str = "display_name";
const FEED_TEAM: &str = "latest_team";
const FEED_POSITION: &str = "position";
const FEED_JERSEY: &str = "jersey_number";

/// Load feed CSV into source records. Field presence/shape checks happen
/// here, once, so the diff and insert logic operates on typed records.
pub fn load_feed_rows(csv_data: &str) -> Result<Vec<SourceRecord>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers = read_headers(&mut reader)?;
    let idx = |name: &str| column_index(&headers, "feed", name);

    let external_id_idx = idx(FEED_EXTERNAL_ID)?;
    let first_name_idx = idx(FEED_FIRST_NAME)?;
    let last_name_idx = idx(FEED_LAST_NAME)?;
    let display_name_idx = idx(FEED_DISPLAY_NAME)?;
    let team_idx = idx(FEED_TEAM)?;
    let position_idx = idx(FEED_POSITION)?;
    let jersey_idx = idx(FEED_JERSEY)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;
        let field = |i: usize| record.get(i).unwrap_or("").trim().to_string();

        rows.push(SourceRecord {
            external_id: field(external_id_idx),
            first_name: field(first_name_idx),
            last_name: field(last_name_idx),
            display_name: field(display_name_idx),
            team_code: field(team_idx),
            position_code: field(position_idx),
            jersey_number: parse_jersey(record.get(jersey_idx).unwrap_or("")),
        });
    }

    Ok(rows)
}

const STORE_OID: &str = "OID";
const STORE_EXTERNAL_ID: &str = "GSIS";
const STORE_FIRST_NAME: &str = "FIRSTNAME";
const STORE_LAST_NAME: &str = "LASTNAME";
const STORE_TEAM_REF: &str = "REALTEAMID";
const STORE_POSITION_REF: &str = "POSITIONID";
const STORE_TEAM_LABEL: &str = "CURRENT_TEAM";
const STORE_POSITION_LABEL: &str = "CURRENT_POSITION";

/// Load a store snapshot export into store records.
pub fn load_store_rows(csv_data: &str) -> Result<Vec<StoreRecord>, ReconError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(csv_data.as_bytes());

    let headers = read_headers(&mut reader)?;
    let idx = |name: &str| column_index(&headers, "store", name);

    let oid_idx = idx(STORE_OID)?;
    let external_id_idx = idx(STORE_EXTERNAL_ID)?;
    let first_name_idx = idx(STORE_FIRST_NAME)?;
    let last_name_idx = idx(STORE_LAST_NAME)?;
    let team_ref_idx = idx(STORE_TEAM_REF)?;
    let position_ref_idx = idx(STORE_POSITION_REF)?;
    let team_label_idx = idx(STORE_TEAM_LABEL)?;
    let position_label_idx = idx(STORE_POSITION_LABEL)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| ReconError::Io(e.to_string()))?;
        let field = |i: usize| record.get(i).unwrap_or("").trim().to_string();

        let external_id = field(external_id_idx);

        let oid_str = field(oid_idx);
        let store_id: i64 = oid_str.parse().map_err(|_| ReconError::StoreIdParse {
            record: external_id.clone(),
            value: oid_str.clone(),
        })?;

        rows.push(StoreRecord {
            store_id,
            team_ref: parse_ref_id(&field(team_ref_idx), &external_id, STORE_TEAM_REF)?,
            position_ref: parse_ref_id(
                &field(position_ref_idx),
                &external_id,
                STORE_POSITION_REF,
            )?,
            first_name: field(first_name_idx),
            last_name: field(last_name_idx),
            team_label: field(team_label_idx),
            position_label: field(position_label_idx),
            external_id,
        });
    }

    Ok(rows)
}

fn read_headers(
    reader: &mut csv::Reader<&[u8]>,
) -> Result<Vec<String>, ReconError> {
    Ok(reader
        .headers()
        .map_err(|e| ReconError::Io(e.to_string()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect())
}

fn column_index(headers: &[String], input: &str, name: &str) -> Result<usize, ReconError> {
    headers
        .iter()
        .position(|h| h == name)
        .ok_or_else(|| ReconError::MissingColumn {
            input: input.into(),
            column: name.into(),
        })
}

/// Jersey numbers arrive as integers or as floats ("7.0") depending on the
/// feed export; anything else is omitted rather than rejected.
fn parse_jersey(value: &str) -> Option<u32> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(n) = value.parse::<u32>() {
        return Some(n);
    }
    match value.parse::<f64>() {
        Ok(f) if f >= 0.0 && f.fract() == 0.0 => Some(f as u32),
        _ => None,
    }
}

/// Store exports leave NULL identifiers blank or as "NULL".
fn parse_ref_id(value: &str, record: &str, column: &str) -> Result<Option<u32>, ReconError> {
    if value.is_empty() || value.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    value
        .parse::<u32>()
        .map(Some)
        .map_err(|_| ReconError::RefIdParse {
            record: record.to_string(),
            column: column.to_string(),
            value: value.to_string(),
        })
}
