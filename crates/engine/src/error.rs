use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("profile `{name}` is invalid: {reason}")]
    InvalidProfile { name: String, reason: String },

    #[error("unknown built-in profile `{0}` (and no file exists at that path)")]
    UnknownProfile(String),

    #[error("failed to read profile: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse profile: {0}")]
    Parse(#[from] serde_json::Error),
}
