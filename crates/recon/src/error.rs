use std::fmt;

#[derive(Debug)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty mapping, zero identifier, etc.).
    ConfigValidation(String),
    /// Missing required column in input data.
    MissingColumn { input: String, column: String },
    /// Store primary key cannot be parsed.
    StoreIdParse { record: String, value: String },
    /// Store team/position identifier cannot be parsed.
    RefIdParse { record: String, column: String, value: String },
    /// The store snapshot carries the same external identifier twice.
    DuplicateStoreKey { external_id: String },
    /// IO error (file read, etc.).
    Io(String),
}

impl fmt::Display for ReconError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingColumn { input, column } => {
                write!(f, "{input}: missing column '{column}'")
            }
            Self::StoreIdParse { record, value } => {
                write!(f, "store record '{record}': cannot parse OID '{value}'")
            }
            Self::RefIdParse { record, column, value } => {
                write!(f, "store record '{record}': cannot parse {column} '{value}'")
            }
            Self::DuplicateStoreKey { external_id } => {
                write!(f, "store snapshot has duplicate external id '{external_id}'")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
        }
    }
}

impl std::error::Error for ReconError {}
