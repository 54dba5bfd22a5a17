use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProvError {
    /// The store rejected or could not apply a staged change set.
    #[error("Commit failed: {0}")]
    Commit(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Invalid entry name: {0}")]
    InvalidEntry(String),

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Invalid value {value:?} for {name}: {reason}")]
    InvalidValue {
        name: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, ProvError>;
