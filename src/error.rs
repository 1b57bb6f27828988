use thiserror::Error;

#[derive(Error, Debug)]
pub enum SettlementError {
    #[error("Need at least 2 banks, got {0}")]
    TooFewParties(usize),
    #[error("Bank name must not be empty")]
    EmptyPartyName,
    #[error("Bank '{0}' needs payment modes!")]
    MissingModes(String),
    #[error("Duplicate bank: {0}")]
    DuplicateParty(String),
    #[error("Unknown bank: {0}")]
    UnknownParty(String),
    #[error("Intermediary '{intermediary}' does not accept mode '{mode}' used by bank '{party}'")]
    UnservicedMode {
        intermediary: String,
        party: String,
        mode: String,
    },
    #[error("Line {line}: {message}")]
    FormatError { line: u64, message: String },
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl SettlementError {
    /// True for errors raised by network validation, before any computation.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::TooFewParties(_)
                | Self::EmptyPartyName
                | Self::MissingModes(_)
                | Self::DuplicateParty(_)
                | Self::UnservicedMode { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, SettlementError>;
