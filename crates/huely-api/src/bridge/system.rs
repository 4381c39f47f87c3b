// Bridge configuration endpoint

use tracing::debug;

use crate::bridge::client::BridgeClient;
use crate::bridge::models::BridgeConfig;
use crate::error::Error;

impl BridgeClient {
    /// Read the bridge configuration.
    ///
    /// `GET /api/{username}/config`
    pub async fn get_config(&self) -> Result<BridgeConfig, Error> {
        let url = self.user_url("config")?;
        debug!("fetching bridge config");
        self.get(url).await
    }
}
