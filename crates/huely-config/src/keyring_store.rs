// ── OS keyring credential store ──

use huely_core::{CREDENTIAL_KEY, CoreError, Credential, CredentialStore};
use tracing::debug;

/// Keyring service name the bridge credential lives under.
pub const KEYRING_SERVICE: &str = "huely";

/// Stores the bridge credential in the platform keyring
/// (Keychain, Credential Manager, Secret Service).
#[derive(Debug)]
pub struct KeyringCredentialStore {
    entry: keyring::Entry,
}

impl KeyringCredentialStore {
    /// The entry `huely` / `username`.
    pub fn new() -> Result<Self, CoreError> {
        Self::with_service(KEYRING_SERVICE)
    }

    /// Use a different keyring service name.
    pub fn with_service(service: &str) -> Result<Self, CoreError> {
        let entry = keyring::Entry::new(service, CREDENTIAL_KEY).map_err(|e| {
            CoreError::StoreReadError {
                message: e.to_string(),
            }
        })?;
        Ok(Self::from_entry(entry))
    }

    /// Wrap an existing keyring entry.
    pub fn from_entry(entry: keyring::Entry) -> Self {
        Self { entry }
    }
}

impl CredentialStore for KeyringCredentialStore {
    fn load(&self) -> Result<Option<Credential>, CoreError> {
        match self.entry.get_password() {
            Ok(token) => {
                debug!("credential loaded from keyring");
                Ok(Some(Credential::new(token)))
            }
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(CoreError::StoreReadError {
                message: e.to_string(),
            }),
        }
    }

    fn save(&self, credential: &Credential) -> Result<(), CoreError> {
        self.entry
            .set_password(credential.expose())
            .map_err(|e| CoreError::StoreWriteError {
                message: e.to_string(),
            })?;
        debug!("credential saved to keyring");
        Ok(())
    }
}
