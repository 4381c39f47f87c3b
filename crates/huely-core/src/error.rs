// ── Core error types ──
//
// User-facing errors from huely-core. Consumers never see raw HTTP
// statuses or JSON failures; the `From<huely_api::Error>` impl folds
// transport-layer errors into domain variants. Pairing and device
// control map their own failures explicitly.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Discovery ────────────────────────────────────────────────────
    #[error("No bridge found on the network")]
    NoBridgeFound,

    #[error("Bridge discovery failed: {message}")]
    Discovery { message: String },

    // ── Pairing ──────────────────────────────────────────────────────
    #[error(
        "The link button on the bridge was not pressed. \
         Press the link button and try again."
    )]
    LinkButtonNotPressed,

    #[error("Pairing succeeded but the new credential could not be verified: {reason}")]
    PairingVerificationFailed { reason: String },

    #[error("Pairing failed: {source}")]
    UnknownPairingError {
        #[source]
        source: huely_api::Error,
    },

    // ── Credential store ─────────────────────────────────────────────
    #[error("Could not read stored credential: {message}")]
    StoreReadError { message: String },

    #[error("Could not save credential: {message}")]
    StoreWriteError { message: String },

    // ── Devices ──────────────────────────────────────────────────────
    #[error("Command for device {device_id} failed: {reason}")]
    DeviceCommandFailed { device_id: String, reason: String },

    #[error("Device not found: {device_id}")]
    DeviceNotFound { device_id: String },

    // ── Connection ───────────────────────────────────────────────────
    #[error("Cannot connect to bridge at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Bridge request timed out")]
    Timeout,

    #[error("Bridge rejected the stored credential -- pair again")]
    Unauthorized,

    #[error("API error: {message}")]
    Api {
        message: String,
        /// Bridge error type, when the bridge reported one.
        code: Option<u16>,
    },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },
}

impl CoreError {
    /// Errors the operator can fix by pairing (again).
    pub fn needs_pairing(&self) -> bool {
        matches!(self, Self::LinkButtonNotPressed | Self::Unauthorized)
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<huely_api::Error> for CoreError {
    fn from(err: huely_api::Error) -> Self {
        use huely_api::Error as ApiError;

        if err.is_unauthorized() {
            return CoreError::Unauthorized;
        }

        match err {
            ApiError::Transport(ref e) => {
                if e.is_timeout() {
                    CoreError::Timeout
                } else if e.is_connect() {
                    CoreError::ConnectionFailed {
                        url: e.url().map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    CoreError::Api {
                        message: e.to_string(),
                        code: None,
                    }
                }
            }
            ApiError::InvalidUrl(e) => CoreError::Config {
                message: format!("Invalid URL: {e}"),
            },
            ApiError::Tls(msg) => CoreError::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            ApiError::Http { status, body } => CoreError::Api {
                message: format!("HTTP {status}: {body}"),
                code: None,
            },
            ApiError::Bridge {
                kind, description, ..
            } => CoreError::Api {
                message: description,
                code: Some(kind),
            },
            ApiError::Unauthenticated => CoreError::Unauthorized,
            ApiError::Deserialization { message, body: _ } => CoreError::Api {
                message: format!("Unexpected bridge reply: {message}"),
                code: None,
            },
            ApiError::Mdns(message) => CoreError::Discovery { message },
        }
    }
}
