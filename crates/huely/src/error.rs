//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` variants into user-facing errors with actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use huely_config::ConfigError;
use huely_core::CoreError;

pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Discovery / connection ───────────────────────────────────────
    #[error("No Hue bridge found on the network")]
    #[diagnostic(
        code(huely::no_bridge),
        help(
            "Make sure the bridge is powered and on the same network.\n\
             Try: huely --bridge <address> ...  or set discovery = \"mdns\" in the config file."
        )
    )]
    NoBridgeFound,

    #[error("Bridge discovery failed: {message}")]
    #[diagnostic(
        code(huely::discovery),
        help("Set the bridge address explicitly with --bridge or HUELY_BRIDGE.")
    )]
    Discovery { message: String },

    #[error("Could not connect to the bridge at {url}")]
    #[diagnostic(
        code(huely::connection_failed),
        help(
            "Check that the bridge is reachable.\n\
             Reason: {reason}\n\
             Over HTTPS, try --insecure (-k) or configure ca_cert."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    #[error("Bridge request timed out")]
    #[diagnostic(
        code(huely::timeout),
        help("Increase the timeout with --timeout or check the bridge's network connection.")
    )]
    Timeout,

    // ── Pairing ──────────────────────────────────────────────────────
    #[error("The link button on the bridge was not pressed")]
    #[diagnostic(
        code(huely::link_button),
        help(
            "Press the round link button on top of the bridge, then run the command \
             again within 30 seconds."
        )
    )]
    LinkButtonNotPressed,

    #[error("Pairing with the bridge failed: {message}")]
    #[diagnostic(
        code(huely::pairing_failed),
        help("Press the link button and run: huely bridge pair")
    )]
    PairingFailed { message: String },

    #[error("The bridge rejected the stored credential")]
    #[diagnostic(
        code(huely::unauthorized),
        help("Press the link button and run: huely bridge pair")
    )]
    Unauthorized,

    #[error("Credential storage failed: {message}")]
    #[diagnostic(
        code(huely::credential_store),
        help("Check that the system keyring is unlocked and reachable.")
    )]
    CredentialStore { message: String },

    // ── Lights ───────────────────────────────────────────────────────
    #[error("Light '{id}' not found")]
    #[diagnostic(code(huely::not_found), help("Run: huely lights list"))]
    NotFound { id: String },

    #[error("Could not switch light '{device_id}': {reason}")]
    #[diagnostic(code(huely::command_failed))]
    CommandFailed { device_id: String, reason: String },

    #[error("Bridge error: {message}")]
    #[diagnostic(code(huely::api_error))]
    ApiError { message: String, code: Option<u16> },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(huely::validation))]
    Validation { field: String, reason: String },

    #[error(transparent)]
    #[diagnostic(
        code(huely::config),
        help("Check config.toml in the huely config directory and any HUELY_* environment variables.")
    )]
    Config(ConfigError),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoBridgeFound | Self::Discovery { .. } | Self::ConnectionFailed { .. } => {
                exit_code::CONNECTION
            }
            Self::LinkButtonNotPressed | Self::PairingFailed { .. } | Self::Unauthorized => {
                exit_code::AUTH
            }
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout => exit_code::TIMEOUT,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            other => Self::Config(other),
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::NoBridgeFound => Self::NoBridgeFound,
            CoreError::Discovery { message } => Self::Discovery { message },

            CoreError::LinkButtonNotPressed => Self::LinkButtonNotPressed,
            CoreError::PairingVerificationFailed { reason } => Self::PairingFailed {
                message: format!("the new credential could not be verified: {reason}"),
            },
            CoreError::UnknownPairingError { source } => Self::PairingFailed {
                message: source.to_string(),
            },
            CoreError::Unauthorized => Self::Unauthorized,

            CoreError::StoreReadError { message } | CoreError::StoreWriteError { message } => {
                Self::CredentialStore { message }
            }

            CoreError::DeviceNotFound { device_id } => Self::NotFound { id: device_id },
            CoreError::DeviceCommandFailed { device_id, reason } => {
                Self::CommandFailed { device_id, reason }
            }

            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::Timeout => Self::Timeout,
            CoreError::Api { message, code } => Self::ApiError { message, code },

            CoreError::Config { message } => Self::Validation {
                field: "config".into(),
                reason: message,
            },
        }
    }
}
