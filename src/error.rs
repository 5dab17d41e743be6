use thiserror::Error;

#[derive(Debug, Error)]
pub enum CourierError {
    #[error("Unknown package state: {0}")]
    UnknownState(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
