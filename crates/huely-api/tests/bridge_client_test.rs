#![allow(clippy::unwrap_used)]
// Integration tests for `BridgeClient` and `DiscoveryClient` using wiremock.

use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use huely_api::{BridgeClient, DiscoveryClient, Error, error_type};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, BridgeClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&format!("{}/", server.uri())).unwrap();
    let client = BridgeClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn authed(client: BridgeClient) -> BridgeClient {
    client.with_username(SecretString::from("test-user".to_owned()))
}

// ── User creation ───────────────────────────────────────────────────

#[tokio::test]
async fn test_create_user_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api"))
        .and(body_json(json!({ "devicetype": "huely#test-rig" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "success": { "username": "83b7780291a6ceffbe0bd049104df" } }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let user = client.create_user("huely", "test-rig").await.unwrap();
    assert_eq!(user.username, "83b7780291a6ceffbe0bd049104df");
}

#[tokio::test]
async fn test_create_user_link_button_not_pressed() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "error": { "type": 101, "address": "", "description": "link button not pressed" } }
        ])))
        .mount(&server)
        .await;

    let err = client.create_user("huely", "test-rig").await.unwrap_err();

    match err {
        Error::Bridge { kind, .. } => assert_eq!(kind, error_type::LINK_BUTTON_NOT_PRESSED),
        ref other => panic!("expected Bridge error, got: {other:?}"),
    }
    assert!(err.is_link_button_not_pressed());
}

// ── Config ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_config_authenticated_view() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/test-user/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Philips hue",
            "bridgeid": "001788FFFE100491",
            "apiversion": "1.60.0",
            "ipaddress": "192.168.2.23",
            "whitelist": { "test-user": { "name": "huely#test-rig" } }
        })))
        .mount(&server)
        .await;

    let config = authed(client).get_config().await.unwrap();
    assert_eq!(config.name.as_deref(), Some("Philips hue"));
    assert!(config.is_authenticated_view());
}

#[tokio::test]
async fn test_get_config_public_view() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/test-user/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Philips hue",
            "apiversion": "1.60.0"
        })))
        .mount(&server)
        .await;

    let config = authed(client).get_config().await.unwrap();
    assert!(!config.is_authenticated_view());
}

#[tokio::test]
async fn test_authenticated_call_without_username() {
    let (_server, client) = setup().await;
    let result = client.get_config().await;
    assert!(matches!(result, Err(Error::Unauthenticated)));
}

// ── Lights ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_lights_preserves_bridge_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/test-user/lights"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{
                "2": { "name": "Kitchen", "type": "Extended color light",
                       "state": { "on": true, "bri": 254, "reachable": true } },
                "10": { "name": "Porch", "type": "On/Off plug-in unit",
                        "state": { "on": false, "reachable": true } },
                "1": { "name": "Hallway", "type": "Dimmable light",
                       "state": { "on": false, "reachable": false } }
            }"#,
            "application/json",
        ))
        .mount(&server)
        .await;

    let lights = authed(client).list_lights().await.unwrap();
    let ids: Vec<&str> = lights.keys().map(String::as_str).collect();
    assert_eq!(ids, ["2", "10", "1"]);
    assert!(lights["2"].state.on);
    assert!(!lights["1"].state.reachable);
    assert_eq!(lights["1"].kind.as_deref(), Some("Dimmable light"));
}

#[tokio::test]
async fn test_get_light_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/test-user/lights/99"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "error": { "type": 3, "address": "/lights/99", "description": "resource, /lights/99, not available" } }
        ])))
        .mount(&server)
        .await;

    let err = authed(client).get_light("99").await.unwrap_err();
    assert!(err.is_not_found(), "expected not-found, got: {err:?}");
}

#[tokio::test]
async fn test_set_light_on_acknowledged() {
    let (server, client) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/test-user/lights/1/state"))
        .and(body_json(json!({ "on": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "success": { "/lights/1/state/on": true } }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let acked = authed(client).set_light_on("1", true).await.unwrap();
    assert_eq!(acked, 1);
}

#[tokio::test]
async fn test_unauthorized_user() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/test-user/lights"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "error": { "type": 1, "address": "/", "description": "unauthorized user" } }
        ])))
        .mount(&server)
        .await;

    let err = authed(client).list_lights().await.unwrap_err();
    assert!(err.is_unauthorized());
}

#[tokio::test]
async fn test_http_error_status() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = authed(client).list_lights().await.unwrap_err();
    assert!(matches!(err, Error::Http { status: 502, .. }));
}

// ── Discovery ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_discovery_search() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": "001788fffe100491", "internalipaddress": "192.168.2.23", "port": 443 },
            { "id": "001788fffe09b1b1", "internalipaddress": "192.168.2.40", "port": 443 }
        ])))
        .mount(&server)
        .await;

    let client = DiscoveryClient::with_client(
        reqwest::Client::new(),
        Url::parse(&format!("{}/", server.uri())).unwrap(),
    );
    let bridges = client.search().await.unwrap();
    assert_eq!(bridges.len(), 2);
    assert_eq!(bridges[0].internal_ip_address, "192.168.2.23");
}

#[tokio::test]
async fn test_discovery_search_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = DiscoveryClient::with_client(
        reqwest::Client::new(),
        Url::parse(&server.uri()).unwrap(),
    );
    assert!(client.search().await.unwrap().is_empty());
}
