// ── Core error types ──
//
// Every failure in this crate is recoverable: backend and probe errors
// degrade to placeholder display state, never a process abort. Consumers
// see these variants mostly through logs; the store publishes the
// degraded state instead of propagating errors upward.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Backend lookup errors ────────────────────────────────────────
    #[error("backend request timed out")]
    BackendTimeout,

    #[error("backend unreachable: {reason}")]
    BackendUnreachable { reason: String },

    #[error("backend returned a malformed payload: {reason}")]
    MalformedPayload { reason: String },

    // ── WiFi probe errors ────────────────────────────────────────────
    #[error("signal probe '{command}' failed to launch: {reason}")]
    ProbeLaunch { command: String, reason: String },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("configuration error: {message}")]
    Config { message: String },
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<reqwest::Error> for CoreError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            CoreError::BackendTimeout
        } else if err.is_decode() {
            CoreError::MalformedPayload {
                reason: err.to_string(),
            }
        } else {
            CoreError::BackendUnreachable {
                reason: err.to_string(),
            }
        }
    }
}
