/// Failure taxonomy for remote collection
///
/// Transport failures are absorbed by the backoff executor and only surface
/// when the caller bounds its retry policy.
#[derive(thiserror::Error, Debug, Clone, PartialEq, serde::Deserialize, serde::Serialize)]
pub enum Error {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Gave up after {attempts} attempts: {last_error}")]
    RetriesExhausted { attempts: u32, last_error: String },

    #[error("Cancelled")]
    Cancelled,

    #[error(
        "Failed to gather {resource}: collected {collected} of {total} after {attempts} attempts"
    )]
    PaginationExhausted {
        resource: String,
        collected: usize,
        total: u64,
        attempts: u32,
    },

    #[error("Missing data: {0}")]
    MissingData(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
