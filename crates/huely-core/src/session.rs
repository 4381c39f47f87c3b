// ── Authenticated session factory ──
//
// Store -> Discovery -> (Pairing + save) -> Session, on every call.
// Nothing is cached between calls: a bridge that moved to a new address
// is picked up on the next request.

use huely_api::BridgeClient;
use tracing::{debug, warn};

use crate::config::ConnectionSettings;
use crate::discovery::Discovery;
use crate::error::CoreError;
use crate::model::{BridgeAddress, Credential};
use crate::pairing::Pairing;
use crate::store::CredentialStore;

/// An authenticated connection to one bridge, valid for one operation.
#[derive(Debug)]
pub struct Session {
    address: BridgeAddress,
    credential: Credential,
    client: BridgeClient,
    warnings: Vec<String>,
}

impl Session {
    pub fn new(
        address: BridgeAddress,
        credential: Credential,
        connection: &ConnectionSettings,
    ) -> Result<Self, CoreError> {
        let client = BridgeClient::new(address.as_str(), connection.scheme, &connection.transport())?
            .with_username(credential.secret().clone());
        Ok(Self {
            address,
            credential,
            client,
            warnings: Vec::new(),
        })
    }

    pub fn address(&self) -> &BridgeAddress {
        &self.address
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn client(&self) -> &BridgeClient {
        &self.client
    }

    /// Non-fatal problems hit while building the session.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn take_warnings(&mut self) -> Vec<String> {
        std::mem::take(&mut self.warnings)
    }
}

/// Builds a fresh [`Session`] per call.
#[derive(Debug)]
pub struct SessionFactory<D, S, P> {
    discovery: D,
    store: S,
    pairing: P,
    connection: ConnectionSettings,
}

impl<D, S, P> SessionFactory<D, S, P>
where
    D: Discovery,
    S: CredentialStore,
    P: Pairing,
{
    pub fn new(discovery: D, store: S, pairing: P, connection: ConnectionSettings) -> Self {
        Self {
            discovery,
            store,
            pairing,
            connection,
        }
    }

    pub fn discovery(&self) -> &D {
        &self.discovery
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn pairing(&self) -> &P {
        &self.pairing
    }

    pub fn connection(&self) -> &ConnectionSettings {
        &self.connection
    }

    /// Build an authenticated session, pairing first if nothing is stored.
    ///
    /// A failure to persist a freshly paired credential does not fail the
    /// call; it is logged and recorded in [`Session::warnings`], and the
    /// next cold start will pair again.
    pub async fn get_session(&self) -> Result<Session, CoreError> {
        let stored = self.store.load()?;
        let address = self.discovery.discover().await?;

        let mut warnings = Vec::new();
        let credential = if let Some(credential) = stored {
            debug!(%address, "using stored credential");
            credential
        } else {
            debug!(%address, "no stored credential, pairing");
            let credential = self.pairing.pair(&address).await?;
            if let Err(e) = self.store.save(&credential) {
                warn!("paired, but the credential was not saved: {e}");
                warnings.push(format!(
                    "{e}. This session works, but pairing will be required again next time."
                ));
            }
            credential
        };

        let mut session = Session::new(address, credential, &self.connection)?;
        session.warnings = warnings;
        Ok(session)
    }
}
