use std::collections::BTreeMap;

use crate::error::ReconError;
use crate::model::{SourceRecord, StoreRecord};

/// Source records partitioned against the store snapshot, in feed order.
/// Rows with a blank external id appear in neither list; they cannot be
/// safely reconciled.
#[derive(Debug)]
pub struct MatchPartition<'a> {
    pub matched: Vec<(&'a SourceRecord, &'a StoreRecord)>,
    pub unmatched: Vec<&'a SourceRecord>,
}

/// Index store records by external id. The store is assumed to enforce
/// uniqueness; a duplicate key here means the snapshot is unusable, so fail
/// fast rather than silently keep one of the rows.
pub fn index_store(store: &[StoreRecord]) -> Result<BTreeMap<&str, &StoreRecord>, ReconError> {
    let mut index: BTreeMap<&str, &StoreRecord> = BTreeMap::new();
    for record in store {
        let key = record.external_id.trim();
        if key.is_empty() {
            continue;
        }
        if index.insert(key, record).is_some() {
            return Err(ReconError::DuplicateStoreKey {
                external_id: key.to_string(),
            });
        }
    }
    Ok(index)
}

/// Partition source records by exact external-id lookup against the index.
pub fn match_records<'a>(
    source: &'a [SourceRecord],
    index: &BTreeMap<&str, &'a StoreRecord>,
) -> MatchPartition<'a> {
    let mut matched = Vec::new();
    let mut unmatched = Vec::new();

    for record in source {
        let key = record.external_id.trim();
        if key.is_empty() {
            continue;
        }
        match index.get(key) {
            Some(store_record) => matched.push((record, *store_record)),
            None => unmatched.push(record),
        }
    }

    MatchPartition { matched, unmatched }
}
