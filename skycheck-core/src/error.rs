use reqwest::StatusCode;
use thiserror::Error;

/// Failures surfaced by [`WeatherClient`](crate::WeatherClient).
///
/// The session collapses all of these into one generic user-facing message,
/// so callers only ever distinguish "got a record" from "did not"; the
/// variants exist so logs and tests can tell a transport failure from a
/// provider rejection from a body that failed to decode.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No API key in the environment or the config file.
    #[error("No API key configured. Set SKYCHECK_API_KEY or run `skycheck configure`.")]
    MissingApiKey,

    /// DNS, connect, timeout, TLS: anything below HTTP.
    #[error("Failed to reach the weather provider: {0}")]
    Transport(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("Weather request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// Provider answered 2xx but the body did not match the expected shape.
    #[error("Failed to parse weather provider response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}
