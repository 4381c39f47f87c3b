// Whitelist (user) endpoints
//
// `POST /api` is the only call the bridge accepts without a username.
// It succeeds only within ~30 seconds of the physical link button press.

use tracing::debug;

use crate::bridge::client::BridgeClient;
use crate::bridge::models::{CreateUserRequest, CreatedUser, SuccessEntry};
use crate::error::Error;

impl BridgeClient {
    /// Ask the bridge to whitelist a new user.
    ///
    /// `POST /api` with `{"devicetype": "<app>#<device>"}`
    ///
    /// Fails with an [`Error::Bridge`] of type
    /// [`LINK_BUTTON_NOT_PRESSED`](crate::error_type::LINK_BUTTON_NOT_PRESSED)
    /// when the button was not pressed recently.
    pub async fn create_user(&self, app_name: &str, device_name: &str) -> Result<CreatedUser, Error> {
        let url = self.api_url()?;
        let devicetype = format!("{app_name}#{device_name}");
        debug!(devicetype, "requesting new bridge user");

        let mut entries: Vec<SuccessEntry<CreatedUser>> = self
            .post(url, &CreateUserRequest {
                devicetype: &devicetype,
            })
            .await?;

        if entries.is_empty() {
            return Err(Error::Deserialization {
                message: "bridge returned an empty reply to user creation".into(),
                body: "[]".into(),
            });
        }
        Ok(entries.swap_remove(0).success)
    }
}
