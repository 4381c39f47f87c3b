// Light endpoints

use serde_json::Value;
use tracing::debug;

use crate::bridge::client::BridgeClient;
use crate::bridge::models::{Light, LightMap, OnStateRequest};
use crate::error::Error;

impl BridgeClient {
    /// List all lights known to the bridge.
    ///
    /// `GET /api/{username}/lights`
    pub async fn list_lights(&self) -> Result<LightMap, Error> {
        let url = self.user_url("lights")?;
        debug!("listing lights");
        self.get(url).await
    }

    /// Get a single light.
    ///
    /// `GET /api/{username}/lights/{id}`
    pub async fn get_light(&self, id: &str) -> Result<Light, Error> {
        let url = self.user_url(&format!("lights/{id}"))?;
        debug!(id, "fetching light");
        self.get(url).await
    }

    /// Switch a light on or off.
    ///
    /// `PUT /api/{username}/lights/{id}/state` with `{"on": bool}`
    ///
    /// Returns the number of `success` entries the bridge acknowledged.
    /// Error entries surface as [`Error::Bridge`].
    pub async fn set_light_on(&self, id: &str, on: bool) -> Result<usize, Error> {
        let url = self.user_url(&format!("lights/{id}/state"))?;
        debug!(id, on, "setting light state");
        let entries: Vec<Value> = self.put(url, &OnStateRequest { on }).await?;
        Ok(entries
            .iter()
            .filter(|entry| entry.get("success").is_some())
            .count())
    }
}
