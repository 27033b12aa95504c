use crate::models::ParticipantId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RosterError {
    #[error("At least 2 participants are required, found {found}")]
    InsufficientParticipants { found: usize },

    #[error("Invalid skill for {name}: '{value}' (expected 1-10)")]
    InvalidSkillValue { name: String, value: String },

    #[error("Goalkeeper limit exceeded: at most {max} goalkeepers allowed")]
    GoalkeeperLimitExceeded { max: usize },

    #[error("Unknown participant: {0}")]
    UnknownParticipant(ParticipantId),

    #[error("Teams have not been balanced yet")]
    NotBalanced,

    #[error("Invalid skill table: {0}")]
    TableFormat(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RosterError {
    /// Whether the caller can fix the input and retry the same command.
    pub fn is_recoverable(&self) -> bool {
        match self {
            RosterError::InsufficientParticipants { .. } => true,
            RosterError::InvalidSkillValue { .. } => true,
            RosterError::GoalkeeperLimitExceeded { .. } => true,
            RosterError::NotBalanced => true,
            RosterError::TableFormat(_) => true,
            RosterError::UnknownParticipant(_) => false,
            RosterError::Csv(_) => false,
            RosterError::Io(_) => false,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML config error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid config value for {field}: {message}")]
    Invalid { field: &'static str, message: String },
}

#[derive(Error, Debug)]
pub enum LocalizationError {
    #[error("Failed to parse FTL content: {0}")]
    Parse(String),

    #[error("Invalid locale: {0}")]
    InvalidLocale(String),

    #[error("Locale {0} not loaded")]
    NotLoaded(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unsupported schema version: found {found}, expected {expected}")]
    SchemaVersion { found: u8, expected: u8 },

    #[error("Request error: {0}")]
    Request(#[from] serde_json::Error),

    #[error(transparent)]
    Roster(#[from] RosterError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Localization(#[from] LocalizationError),
}

pub type Result<T> = std::result::Result<T, RosterError>;
