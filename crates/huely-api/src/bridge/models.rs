// Bridge v1 wire models
//
// Only the fields huely reads are modelled; the bridge sends far more
// (color gamut, capabilities, swupdate, ...) and serde ignores the rest.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// `{"error": {...}}` entry in a reply array.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEntry {
    pub error: BridgeErrorBody,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BridgeErrorBody {
    #[serde(rename = "type")]
    pub kind: u16,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub description: String,
}

/// `{"success": {...}}` entry in a reply array.
#[derive(Debug, Deserialize)]
pub(crate) struct SuccessEntry<T> {
    pub success: T,
}

/// Request body for `POST /api`.
#[derive(Debug, Serialize)]
pub(crate) struct CreateUserRequest<'a> {
    pub devicetype: &'a str,
}

/// Payload of a successful `POST /api`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedUser {
    pub username: String,
}

/// Subset of `GET /api/{username}/config`.
///
/// An unknown username still gets a reduced public config back
/// (name, bridgeid, apiversion, ...) without an error entry. The
/// `whitelist` section only appears for whitelisted users.
#[derive(Debug, Clone, Deserialize)]
pub struct BridgeConfig {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub bridgeid: Option<String>,
    #[serde(default)]
    pub apiversion: Option<String>,
    #[serde(default)]
    pub swversion: Option<String>,
    #[serde(default)]
    pub ipaddress: Option<String>,
    #[serde(default)]
    pub whitelist: Option<serde_json::Map<String, serde_json::Value>>,
}

impl BridgeConfig {
    /// Whether the bridge answered with the full, authenticated config.
    pub fn is_authenticated_view(&self) -> bool {
        self.whitelist.is_some()
    }
}

/// A light resource from `GET /api/{username}/lights[/{id}]`.
#[derive(Debug, Clone, Deserialize)]
pub struct Light {
    pub name: String,
    pub state: LightState,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub modelid: Option<String>,
    #[serde(default)]
    pub uniqueid: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LightState {
    #[serde(default)]
    pub on: bool,
    #[serde(default)]
    pub reachable: bool,
}

/// `GET /api/{username}/lights` keyed by bridge light id, in bridge order.
pub type LightMap = IndexMap<String, Light>;

/// Request body for `PUT /api/{username}/lights/{id}/state`.
#[derive(Debug, Serialize)]
pub(crate) struct OnStateRequest {
    pub on: bool,
}
