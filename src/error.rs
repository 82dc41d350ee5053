use std::path::PathBuf;

use thiserror::Error;

pub const EXIT_CONFIGURATION: i32 = 2;
pub const EXIT_UPSTREAM: i32 = 3;
pub const EXIT_PARSE: i32 = 4;
pub const EXIT_IO: i32 = 5;

#[derive(Debug, Error)]
pub enum CardGenError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl CardGenError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CardGenError::Configuration(_) => EXIT_CONFIGURATION,
            CardGenError::Upstream(_) => EXIT_UPSTREAM,
            CardGenError::Parse(_) => EXIT_PARSE,
            CardGenError::Io { .. } => EXIT_IO,
        }
    }
}

/// Failures talking to the completion API. None of these are retried.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: async_openai::error::OpenAIError,
    },

    #[error("API rejected the request: {message}")]
    Api { message: String },

    #[error("could not decode API response: {0}")]
    MalformedResponse(String),
}
