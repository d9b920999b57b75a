use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CashflowSimError {
    #[error("invalid frequency: {0}")]
    InvalidFrequency(String),

    #[error("window begin {begin} must be before or equal to window end {end}")]
    InvalidWindow { begin: NaiveDate, end: NaiveDate },

    #[error("failed to generate cashflows: {source}")]
    Simulation { source: Box<CashflowSimError> },

    #[error("Date calculation error: {0}")]
    DateError(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid event at row {row}: {details}")]
    InvalidEventRow { row: usize, details: String },

    #[error("Running balance mismatch on {date}: expected {expected}, found {actual}")]
    BalanceMismatch {
        date: NaiveDate,
        expected: f64,
        actual: f64,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CashflowSimError {
    /// Stable snake_case identifier, used as the `error` field of boundary responses.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidFrequency(_) => "invalid_frequency",
            Self::InvalidWindow { .. } => "invalid_range",
            Self::Simulation { .. } => "simulation_failed",
            Self::DateError(_) => "invalid_date",
            Self::InvalidAmount(_) => "invalid_amount",
            Self::InvalidEventRow { .. } => "invalid_event",
            Self::BalanceMismatch { .. } => "balance_mismatch",
            Self::Csv(_) => "invalid_csv",
            Self::SerializationError(_) => "invalid_json",
            Self::IoError(_) => "io_error",
        }
    }

    /// True when the failure was caused by the caller's input rather than by the system.
    /// A wrapped simulation failure inherits the classification of its cause.
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::InvalidFrequency(_)
            | Self::InvalidWindow { .. }
            | Self::DateError(_)
            | Self::InvalidAmount(_)
            | Self::InvalidEventRow { .. }
            | Self::Csv(_)
            | Self::SerializationError(_) => true,
            Self::Simulation { source } => source.is_client_error(),
            Self::BalanceMismatch { .. } | Self::IoError(_) => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CashflowSimError>;
