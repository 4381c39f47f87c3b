// ── Credential store ──
//
// One opaque token under one fixed key, in storage that outlives the
// process. Single writer assumed; no locking.

use std::sync::Mutex;

use crate::error::CoreError;
use crate::model::Credential;

/// Key under which the bridge credential is stored.
pub const CREDENTIAL_KEY: &str = "username";

/// Persistent home of the bridge credential.
pub trait CredentialStore: Send + Sync {
    /// Read the stored credential. A missing entry is `Ok(None)`, never an error.
    fn load(&self) -> Result<Option<Credential>, CoreError>;

    /// Overwrite the stored credential. Durable once this returns `Ok`.
    fn save(&self, credential: &Credential) -> Result<(), CoreError>;
}

/// Process-local store, for embedders that handle persistence themselves.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    slot: Mutex<Option<Credential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_credential(credential: Credential) -> Self {
        Self {
            slot: Mutex::new(Some(credential)),
        }
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self) -> Result<Option<Credential>, CoreError> {
        self.slot
            .lock()
            .map(|slot| slot.clone())
            .map_err(|e| CoreError::StoreReadError {
                message: e.to_string(),
            })
    }

    fn save(&self, credential: &Credential) -> Result<(), CoreError> {
        let mut slot = self.slot.lock().map_err(|e| CoreError::StoreWriteError {
            message: e.to_string(),
        })?;
        *slot = Some(credential.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_store_loads_none() {
        let store = MemoryCredentialStore::new();
        assert!(matches!(store.load(), Ok(None)));
    }

    #[test]
    fn save_overwrites() {
        let store = MemoryCredentialStore::with_credential(Credential::new("old"));
        store
            .save(&Credential::new("new"))
            .unwrap_or_else(|e| panic!("{e}"));
        let loaded = store.load().ok().flatten();
        assert_eq!(loaded, Some(Credential::new("new")));
    }
}
