//! Bridge discovery, pairing, sessions and light control.
//!
//! The presentation layer (the `huely` CLI, or any other front-end) talks
//! to this crate through [`Hub`]:
//!
//! - **[`Discovery`]**: resolves the address of the single bridge in use:
//!   a configured address, the vendor cloud endpoint, or mDNS. First result
//!   wins.
//!
//! - **[`CredentialStore`]**: loads and saves the one opaque bridge
//!   credential under the fixed [`CREDENTIAL_KEY`].
//!
//! - **[`Pairing`]**: the link-button handshake that creates a credential
//!   and verifies it before handing it out.
//!
//! - **[`SessionFactory`]**: composes the three above into an authenticated
//!   [`Session`], pairing and persisting on first use. A new session is built
//!   for every operation.
//!
//! - **[`catalog`]**: lists lights and toggles them through a session.

pub mod catalog;
pub mod config;
pub mod discovery;
pub mod error;
pub mod hub;
pub mod model;
pub mod pairing;
pub mod session;
pub mod store;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{ConnectionSettings, DiscoveryMethod, HubConfig, TlsVerification};
pub use discovery::{BridgeLocator, CloudDiscovery, Discovery, MdnsDiscovery, StaticDiscovery};
pub use error::CoreError;
pub use hub::Hub;
pub use model::{BridgeAddress, Credential, Device};
pub use pairing::{APP_NAME, DEVICE_NAME, LinkButtonPairing, Pairing, PairingState};
pub use session::{Session, SessionFactory};
pub use store::{CREDENTIAL_KEY, CredentialStore, MemoryCredentialStore};

pub use huely_api::Scheme;
