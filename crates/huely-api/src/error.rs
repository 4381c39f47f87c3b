use thiserror::Error;

/// Numeric error types reported by the bridge in `{"error": {"type": N}}` entries.
///
/// Only the codes this crate branches on are listed; anything else is
/// carried through verbatim in [`Error::Bridge`].
pub mod error_type {
    /// The username in the URL is not whitelisted on the bridge.
    pub const UNAUTHORIZED_USER: u16 = 1;
    /// The addressed resource (light, group, ...) does not exist.
    pub const RESOURCE_NOT_AVAILABLE: u16 = 3;
    /// User creation was requested without the link button being pressed.
    pub const LINK_BUTTON_NOT_PRESSED: u16 = 101;
}

/// Top-level error type for the `huely-api` crate.
///
/// Covers every failure mode of the bridge REST surface and discovery:
/// transport, HTTP status, bridge-reported errors, and decoding.
/// `huely-core` maps these into domain errors.
#[derive(Debug, Error)]
pub enum Error {
    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, timeout, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS setup or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-success HTTP status. The bridge itself reports most failures
    /// with HTTP 200, so this usually means a proxy or a wrong host.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    // ── Bridge ──────────────────────────────────────────────────────
    /// Error entry returned by the bridge (`[{"error": {...}}]`).
    #[error("Bridge error {kind} at '{address}': {description}")]
    Bridge {
        kind: u16,
        address: String,
        description: String,
    },

    /// An authenticated endpoint was called on a client without a username.
    #[error("Client has no bridge username -- pair with the bridge first")]
    Unauthenticated,

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },

    // ── Discovery ───────────────────────────────────────────────────
    /// mDNS daemon or browse failure.
    #[error("mDNS discovery failed: {0}")]
    Mdns(String),
}

impl Error {
    /// The bridge error type, if this is a bridge-reported error.
    pub fn bridge_error_type(&self) -> Option<u16> {
        match self {
            Self::Bridge { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns `true` if user creation failed because nobody pressed the link button.
    pub fn is_link_button_not_pressed(&self) -> bool {
        self.bridge_error_type() == Some(error_type::LINK_BUTTON_NOT_PRESSED)
    }

    /// Returns `true` if the bridge rejected the username.
    pub fn is_unauthorized(&self) -> bool {
        self.bridge_error_type() == Some(error_type::UNAUTHORIZED_USER)
    }

    /// Returns `true` if the addressed resource does not exist.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Bridge { kind, .. } => *kind == error_type::RESOURCE_NOT_AVAILABLE,
            Self::Http { status: 404, .. } => true,
            _ => false,
        }
    }
}
