//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of the
//! shell contract — wrapper scripts rely on them.
//!
//! | Code | Meaning                                        |
//! |------|------------------------------------------------|
//! | 0    | Success                                        |
//! | 1    | General error (unspecified)                    |
//! | 2    | Usage error (bad args, missing file)           |
//! | 3    | Invalid reconciliation config                  |
//! | 4    | Runtime failure (bad input data, IO, snapshot) |
//!
//! Per-record rejections are NOT run failures: a run that completes with
//! record-level errors still exits 0 and reports them in the error log.

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Input data unreadable or unusable (missing columns, duplicate store
/// keys), or output files cannot be written.
pub const EXIT_RUNTIME: u8 = 4;
