use thiserror::Error;

#[derive(Error, Debug)]
pub enum TwinError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Capacity factor {value}% out of range: expected {min}..={max}")]
    CapacityOutOfRange { value: i64, min: u16, max: u16 },

    #[error("Unknown scenario '{name}'")]
    UnknownScenario { name: String },

    #[error("Scenario '{scenario}' has no profile in the loaded config")]
    MissingProfile { scenario: String },

    #[error("Scenario '{scenario}' appears more than once in the catalog")]
    DuplicateProfile { scenario: String },

    #[error("Invalid profile for scenario '{scenario}': {reason}")]
    InvalidProfile { scenario: String, reason: String },

    #[error("Invalid current metrics: {reason}")]
    InvalidCurrentMetrics { reason: String },

    #[error("Sweep step must be > 0")]
    InvalidSweepStep,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type TwinResult<T> = Result<T, TwinError>;
