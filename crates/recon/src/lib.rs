//! `roster-recon` — roster feed to player table reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded records, returns a reviewable
//! change report. No CLI or IO dependencies; feed retrieval, store sessions,
//! and file output belong to the caller.

pub mod config;
pub mod diff;
pub mod engine;
pub mod error;
pub mod insert;
pub mod matcher;
pub mod model;
pub mod refmap;
pub mod script;
pub mod summary;

pub use config::ReconcileConfig;
pub use engine::{load_feed_rows, load_store_rows, run};
pub use error::ReconError;
pub use model::{ReconInput, ReconReport, RunMode, SourceRecord, StoreRecord};
pub use script::{render_error_log, render_script};
pub use summary::render_summary;
