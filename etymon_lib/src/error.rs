use thiserror::Error as ThisError;

/// Library errors.
#[derive(ThisError, Debug)]
pub enum Error {
    /// Missing arguments.
    #[error("Missing mandatory arguments: {0}\nTry `etymon --help` for more information.")]
    MissingArgError(&'static str),

    /// LLM call error.
    #[error("Failed to call LLM: {0}")]
    LLMCallError(#[from] reqwest::Error),

    /// LLM call error.
    #[error("Failed to process LLM call: {0}")]
    LLMJsonError(#[from] serde_json::Error),

    /// LLM call error.
    #[error("Failed to parse LLM response: {0}")]
    LLMResponseError(&'static str),

    /// LLM response error message.
    #[error("LLM provider responded with error: {0}")]
    LLMErrorMessage(String),

    /// Empty input word.
    #[error("The word to decompose must be non-empty.")]
    EmptyWord,

    /// Agent response is not a valid decomposition document.
    #[error("Failed to parse decomposition: {reason}")]
    ParseError {
        /// Raw agent response, kept for diagnostics.
        raw: String,
        /// What went wrong while parsing.
        reason: String,
    },

    /// Decomposition parsed but violates the semantic rules.
    #[error("Decomposition failed validation: {}", .issues.join("; "))]
    ValidationError {
        /// Raw agent response, kept for diagnostics.
        raw: String,
        /// Every rule the decomposition broke.
        issues: Vec<String>,
    },

    /// General error.
    #[error("{0}")]
    Error(String),
}
