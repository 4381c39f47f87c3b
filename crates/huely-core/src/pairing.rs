// ── Pairing handshake ──
//
// Unauthenticated -> Authenticated, exactly once per installation.
// The bridge only whitelists a new user shortly after someone presses
// its physical link button; that case is surfaced, never retried.

use std::future::Future;

use huely_api::{BridgeClient, BridgeConfig};
use tracing::{debug, info};

use crate::config::ConnectionSettings;
use crate::error::CoreError;
use crate::model::{BridgeAddress, Credential};

/// Application half of the `devicetype` sent to the bridge.
pub const APP_NAME: &str = "huely";
/// Device half of the `devicetype` sent to the bridge.
pub const DEVICE_NAME: &str = "huely-cli";

/// Where a pairing attempt stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingState {
    Unauthenticated,
    /// Terminal.
    Authenticated,
}

impl PairingState {
    /// Classify a `GET /config` reply. Only whitelisted users see the
    /// full config; anyone else gets the public subset.
    pub fn from_config(config: &BridgeConfig) -> Self {
        if config.is_authenticated_view() {
            Self::Authenticated
        } else {
            Self::Unauthenticated
        }
    }
}

/// Obtains a new credential from a bridge.
pub trait Pairing: Send + Sync {
    fn pair(
        &self,
        address: &BridgeAddress,
    ) -> impl Future<Output = Result<Credential, CoreError>> + Send;
}

/// The real handshake: `POST /api`, then verify with `GET /config`.
#[derive(Debug, Clone, Default)]
pub struct LinkButtonPairing {
    connection: ConnectionSettings,
}

impl LinkButtonPairing {
    pub fn new(connection: ConnectionSettings) -> Self {
        Self { connection }
    }

    fn client(&self, address: &BridgeAddress) -> Result<BridgeClient, CoreError> {
        Ok(BridgeClient::new(
            address.as_str(),
            self.connection.scheme,
            &self.connection.transport(),
        )?)
    }

    /// Request a new user. Link-button refusals get their own error.
    async fn request_credential(&self, client: &BridgeClient) -> Result<Credential, CoreError> {
        match client.create_user(APP_NAME, DEVICE_NAME).await {
            Ok(user) => Ok(Credential::new(user.username)),
            Err(e) if e.is_link_button_not_pressed() => Err(CoreError::LinkButtonNotPressed),
            Err(source) => Err(CoreError::UnknownPairingError { source }),
        }
    }

    /// Read the config back with the new credential.
    async fn verify(
        &self,
        client: BridgeClient,
        credential: &Credential,
    ) -> Result<PairingState, CoreError> {
        let authed = client.with_username(credential.secret().clone());
        let config = authed
            .get_config()
            .await
            .map_err(|e| CoreError::PairingVerificationFailed {
                reason: e.to_string(),
            })?;
        debug!(bridge = ?config.name, "config read with new credential");
        Ok(PairingState::from_config(&config))
    }
}

impl Pairing for LinkButtonPairing {
    async fn pair(&self, address: &BridgeAddress) -> Result<Credential, CoreError> {
        debug!(%address, "starting pairing");

        let client = self.client(address)?;
        let credential = self.request_credential(&client).await?;

        match self.verify(client, &credential).await? {
            PairingState::Authenticated => {
                info!(%address, "paired with bridge");
                Ok(credential)
            }
            PairingState::Unauthenticated => Err(CoreError::PairingVerificationFailed {
                reason: "bridge does not recognize the new credential".into(),
            }),
        }
    }
}
