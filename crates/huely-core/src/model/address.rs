use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Network address of exactly one bridge: a host or `host:port`.
///
/// Never empty. Resolved fresh for every session request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BridgeAddress(String);

impl BridgeAddress {
    pub fn new(address: impl Into<String>) -> Result<Self, CoreError> {
        let address = address.into().trim().to_owned();
        if address.is_empty() {
            return Err(CoreError::Config {
                message: "bridge address must not be empty".into(),
            });
        }
        Ok(Self(address))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BridgeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for BridgeAddress {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for BridgeAddress {
    type Error = CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BridgeAddress> for String {
    fn from(addr: BridgeAddress) -> Self {
        addr.0
    }
}
