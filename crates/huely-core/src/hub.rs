// ── Hub facade ──
//
// The entry points the presentation layer calls. Every call builds its
// own session; nothing is shared between calls.

use std::sync::Mutex;

use crate::catalog;
use crate::config::HubConfig;
use crate::discovery::{BridgeLocator, Discovery};
use crate::error::CoreError;
use crate::model::{BridgeAddress, Credential, Device};
use crate::pairing::{LinkButtonPairing, Pairing};
use crate::session::{Session, SessionFactory};
use crate::store::CredentialStore;

/// Front door for listing and toggling lights.
///
/// Generic over its collaborators so tests and embedders can swap any of
/// them; [`Hub::from_config`] wires the production ones.
#[derive(Debug)]
pub struct Hub<D, S, P> {
    sessions: SessionFactory<D, S, P>,
    /// Non-fatal session warnings not yet picked up by the caller.
    warnings: Mutex<Vec<String>>,
}

impl<S: CredentialStore> Hub<BridgeLocator, S, LinkButtonPairing> {
    /// Production wiring: configured discovery and the link-button handshake.
    pub fn from_config(config: &HubConfig, store: S) -> Result<Self, CoreError> {
        let discovery = BridgeLocator::from_config(config)?;
        let pairing = LinkButtonPairing::new(config.connection.clone());
        Ok(Self::new(SessionFactory::new(
            discovery,
            store,
            pairing,
            config.connection.clone(),
        )))
    }
}

impl<D, S, P> Hub<D, S, P>
where
    D: Discovery,
    S: CredentialStore,
    P: Pairing,
{
    pub fn new(sessions: SessionFactory<D, S, P>) -> Self {
        Self {
            sessions,
            warnings: Mutex::new(Vec::new()),
        }
    }

    pub fn sessions(&self) -> &SessionFactory<D, S, P> {
        &self.sessions
    }

    async fn session(&self) -> Result<Session, CoreError> {
        let mut session = self.sessions.get_session().await?;
        if let Ok(mut pending) = self.warnings.lock() {
            pending.extend(session.take_warnings());
        }
        Ok(session)
    }

    /// Drain the warnings raised while building sessions, e.g. a freshly
    /// paired credential that could not be saved.
    pub fn take_warnings(&self) -> Vec<String> {
        self.warnings
            .lock()
            .map(|mut pending| std::mem::take(&mut *pending))
            .unwrap_or_default()
    }

    /// Resolve the bridge address without touching credentials.
    pub async fn discover(&self) -> Result<BridgeAddress, CoreError> {
        self.sessions.discovery().discover().await
    }

    /// Pair with the bridge and store the result, replacing any stored
    /// credential. Unlike implicit pairing, a failed save is an error.
    pub async fn pair(&self) -> Result<(BridgeAddress, Credential), CoreError> {
        let address = self.sessions.discovery().discover().await?;
        let credential = self.sessions.pairing().pair(&address).await?;
        self.sessions.store().save(&credential)?;
        Ok((address, credential))
    }

    pub async fn list_devices(&self) -> Result<Vec<Device>, CoreError> {
        let session = self.session().await?;
        catalog::list_devices(&session).await
    }

    pub async fn get_device(&self, id: &str) -> Result<Device, CoreError> {
        let session = self.session().await?;
        catalog::get_device(&session, id).await
    }

    pub async fn toggle_device(&self, device: &Device) -> Result<Device, CoreError> {
        let session = self.session().await?;
        catalog::toggle(&session, device).await
    }

    /// Toggle by id: read the current state, then flip it.
    pub async fn toggle_device_by_id(&self, id: &str) -> Result<Device, CoreError> {
        let session = self.session().await?;
        let device = catalog::get_device(&session, id).await?;
        catalog::toggle(&session, &device).await
    }
}
