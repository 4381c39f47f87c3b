// Bridge REST client
//
// Wraps `reqwest::Client` with bridge URL construction and reply
// unwrapping. Endpoint groups (users, config, lights) are implemented
// as inherent methods in sibling files to keep this module focused on
// transport mechanics.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::bridge::models::ErrorEntry;
use crate::error::Error;
use crate::transport::{Scheme, TransportConfig};

/// Raw HTTP client for a single bridge's v1 REST API.
///
/// A client starts unauthenticated (only `POST /api` is usable) and is
/// promoted with [`with_username`](Self::with_username) once a whitelisted
/// username is known. Bridge error entries are turned into
/// [`Error::Bridge`] before the caller sees the payload.
#[derive(Clone)]
pub struct BridgeClient {
    http: reqwest::Client,
    base_url: Url,
    username: Option<SecretString>,
}

impl std::fmt::Debug for BridgeClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeClient")
            .field("base_url", &self.base_url.as_str())
            .field("authenticated", &self.username.is_some())
            .finish_non_exhaustive()
    }
}

impl BridgeClient {
    /// Create an unauthenticated client for the bridge at `address`.
    ///
    /// `address` is a host or `host:port`, as returned by discovery.
    pub fn new(address: &str, scheme: Scheme, transport: &TransportConfig) -> Result<Self, Error> {
        let base_url = scheme.base_url(address)?;
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            username: None,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self {
            http,
            base_url,
            username: None,
        }
    }

    /// Promote this client to an authenticated one.
    pub fn with_username(mut self, username: SecretString) -> Self {
        self.username = Some(username);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.username.is_some()
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// `{base}/api` -- the only unauthenticated endpoint.
    pub(crate) fn api_url(&self) -> Result<Url, Error> {
        Ok(self.base_url.join("api")?)
    }

    /// `{base}/api/{username}/{path}`
    pub(crate) fn user_url(&self, path: &str) -> Result<Url, Error> {
        let username = self.username.as_ref().ok_or(Error::Unauthenticated)?;
        let path = path.trim_start_matches('/');
        Ok(self
            .base_url
            .join(&format!("api/{}/{path}", username.expose_secret()))?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the reply.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", redact(&url));
        let resp = self.http.get(url).send().await?;
        Self::parse_reply(resp).await
    }

    /// Send a POST request with JSON body and decode the reply.
    pub(crate) async fn post<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("POST {}", redact(&url));
        let resp = self.http.post(url).json(body).send().await?;
        Self::parse_reply(resp).await
    }

    /// Send a PUT request with JSON body and decode the reply.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("PUT {}", redact(&url));
        let resp = self.http.put(url).json(body).send().await?;
        Self::parse_reply(resp).await
    }

    /// Decode a bridge reply.
    ///
    /// The v1 API answers errors with HTTP 200 and a body of the form
    /// `[{"error": {"type": N, "address": "...", "description": "..."}}]`.
    /// The first error entry wins, even when mixed with `success` entries.
    async fn parse_reply<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Http {
                status: status.as_u16(),
                body: body.chars().take(200).collect(),
            });
        }

        let body = resp.text().await?;
        trace!(len = body.len(), "bridge reply");

        let value: Value = serde_json::from_str(&body).map_err(|e| Error::Deserialization {
            message: e.to_string(),
            body: body.clone(),
        })?;

        if let Some(err) = first_error(&value) {
            return Err(Error::Bridge {
                kind: err.kind,
                address: err.address,
                description: err.description,
            });
        }

        // Decode from the text, not `value`: `Value` maps lose key order.
        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }
}

/// Extract the first `{"error": {...}}` entry from a reply array.
fn first_error(value: &Value) -> Option<crate::bridge::models::BridgeErrorBody> {
    value.as_array()?.iter().find_map(|entry| {
        serde_json::from_value::<ErrorEntry>(entry.clone())
            .ok()
            .map(|e| e.error)
    })
}

/// The username is part of every authenticated URL; keep it out of logs.
fn redact(url: &Url) -> String {
    let mut segments = url.path().trim_start_matches('/').split('/');
    match (segments.next(), segments.next()) {
        (Some("api"), Some(user)) if !user.is_empty() => {
            let rest: Vec<&str> = segments.collect();
            let tail = if rest.is_empty() {
                String::new()
            } else {
                format!("/{}", rest.join("/"))
            };
            format!(
                "{}://{}/api/<user>{tail}",
                url.scheme(),
                url.host_str().unwrap_or_default()
            )
        }
        _ => url.to_string(),
    }
}
