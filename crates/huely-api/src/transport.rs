// Shared transport configuration for building reqwest::Client instances.
//
// The bridge client and the cloud discovery client share TLS and timeout
// settings through this module.

use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::error::Error;

const USER_AGENT: &str = concat!("huely/", env!("CARGO_PKG_VERSION"));

/// URL scheme used to reach the bridge.
///
/// Bridges serve the v1 API on plain HTTP (port 80) and on HTTPS (port 443)
/// with a certificate signed by the vendor's private CA.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Scheme {
    #[default]
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Https => "https",
        }
    }

    /// Build the bridge root URL for an address like `192.168.1.2` or `host:8080`.
    /// Bare IPv6 literals (as mDNS reports them) are bracketed.
    pub fn base_url(self, address: &str) -> Result<Url, Error> {
        let address = address.trim().trim_end_matches('/');
        let host = match address.parse::<std::net::Ipv6Addr>() {
            Ok(v6) => format!("[{v6}]"),
            Err(_) => address.to_owned(),
        };
        Ok(Url::parse(&format!("{}://{host}/", self.as_str()))?)
    }
}

/// TLS verification mode (api-level mirror of core's TlsVerification).
#[derive(Debug, Clone)]
pub enum TlsMode {
    /// Use the system certificate store.
    System,
    /// Use a custom CA certificate from the given PEM file.
    CustomCa(PathBuf),
    /// Accept any certificate (bridges present self-signed certificates).
    DangerAcceptInvalid,
}

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub tls: TlsMode,
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            tls: TlsMode::DangerAcceptInvalid,
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` from this config.
    pub fn build_client(&self) -> Result<reqwest::Client, Error> {
        let mut builder = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT);

        match &self.tls {
            TlsMode::System => {}
            TlsMode::CustomCa(path) => {
                let cert_pem = std::fs::read(path)
                    .map_err(|e| Error::Tls(format!("failed to read CA cert: {e}")))?;
                let cert = reqwest::Certificate::from_pem(&cert_pem)
                    .map_err(|e| Error::Tls(format!("invalid CA cert: {e}")))?;
                builder = builder.add_root_certificate(cert);
            }
            TlsMode::DangerAcceptInvalid => {
                builder = builder.danger_accept_invalid_certs(true);
            }
        }

        builder
            .build()
            .map_err(|e| Error::Tls(format!("failed to build HTTP client: {e}")))
    }
}
