use thiserror::Error;

/// App errors
#[derive(Error, Debug)]
pub enum AppError {

    /// Toml parsing error
    #[error("Failed to parse config file: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Config parsing error
    #[error("Failed to parse config file: {0}")]
    ConfigParseError(&'static str),

    /// Missing arguments
    #[error("Missing mandatory arguments: {0}\nTry `etymon --help` for more information.")]
    MissingArgError(&'static str),

    /// Invalid arguments
    #[error("Incorrect argument value: {0}")]
    InvalidArgError(&'static str),

    /// Library error
    #[error("{0}")]
    LibError(#[from] etymon_lib::Error),

    /// Serialization error
    #[error("Failed to serialize result: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unknown/unexpected error
    #[error("Unknown error")]
    Unknown,

    /// General error.
    #[error("{0}")]
    Error(String),
}
