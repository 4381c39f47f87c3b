#![allow(clippy::unwrap_used)]
// Device catalog and the Hub entry points against a wiremock bridge.

use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use huely_core::{
    BridgeAddress, ConnectionSettings, CoreError, Credential, CredentialStore, Device, Hub,
    LinkButtonPairing, MemoryCredentialStore, SessionFactory, StaticDiscovery,
};

type TestHub = Hub<StaticDiscovery, MemoryCredentialStore, LinkButtonPairing>;

// ── Helpers ─────────────────────────────────────────────────────────

fn hub_for(server: &MockServer, store: MemoryCredentialStore) -> TestHub {
    let address = BridgeAddress::new(server.address().to_string()).unwrap();
    let connection = ConnectionSettings::default();
    Hub::new(SessionFactory::new(
        StaticDiscovery::new(address),
        store,
        LinkButtonPairing::new(connection.clone()),
        connection,
    ))
}

async fn setup() -> (MockServer, TestHub) {
    let server = MockServer::start().await;
    let hub = hub_for(
        &server,
        MemoryCredentialStore::with_credential(Credential::new("test-user")),
    );
    (server, hub)
}

fn lamp(id: &str, name: &str, on: bool, reachable: bool) -> Device {
    Device {
        id: id.into(),
        name: name.into(),
        on,
        reachable,
    }
}

async fn mount_lights(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/test-user/lights"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "1": { "name": "Lamp B", "state": { "on": true,  "reachable": true } },
            "2": { "name": "lamp a", "state": { "on": false, "reachable": true } },
            "3": { "name": "Lamp C", "state": { "on": false, "reachable": false } }
        })))
        .mount(server)
        .await;
}

// ── Listing ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_devices_sorted_case_insensitively() {
    let (server, hub) = setup().await;
    mount_lights(&server).await;

    let devices = hub.list_devices().await.unwrap();

    assert_eq!(
        devices,
        vec![
            lamp("2", "lamp a", false, true),
            lamp("1", "Lamp B", true, true),
            lamp("3", "Lamp C", false, false),
        ]
    );
}

#[tokio::test]
async fn test_list_devices_twice_is_stable_and_refetches() {
    let (server, hub) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/test-user/lights"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "1": { "name": "Desk", "state": { "on": true, "reachable": true } }
        })))
        .expect(2)
        .mount(&server)
        .await;

    let first = hub.list_devices().await.unwrap();
    let second = hub.list_devices().await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_list_devices_with_revoked_credential() {
    let (server, hub) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "error": { "type": 1, "address": "/lights", "description": "unauthorized user" } }
        ])))
        .mount(&server)
        .await;

    let err = hub.list_devices().await.unwrap_err();
    assert!(err.needs_pairing(), "got: {err:?}");
}

// ── Toggle ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_toggle_off_device_turns_it_on() {
    let (server, hub) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/test-user/lights/2/state"))
        .and(body_json(json!({ "on": true })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "success": { "/lights/2/state/on": true } }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let before = lamp("2", "lamp a", false, true);
    let after = hub.toggle_device(&before).await.unwrap();

    assert_eq!(after, lamp("2", "lamp a", true, true));
    assert!(!before.on);
}

#[tokio::test]
async fn test_toggle_rejected_leaves_record_untouched() {
    let (server, hub) = setup().await;

    Mock::given(method("PUT"))
        .and(path("/api/test-user/lights/3/state"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "error": { "type": 201, "address": "/lights/3/state/on", "description": "device is not reachable" } }
        ])))
        .mount(&server)
        .await;

    let before = lamp("3", "Lamp C", false, false);
    let err = hub.toggle_device(&before).await.unwrap_err();

    match err {
        CoreError::DeviceCommandFailed { device_id, .. } => assert_eq!(device_id, "3"),
        other => panic!("expected DeviceCommandFailed, got: {other:?}"),
    }
    assert_eq!(before, lamp("3", "Lamp C", false, false));
}

#[tokio::test]
async fn test_toggle_without_acknowledgement_fails() {
    let (server, hub) = setup().await;

    Mock::given(method("PUT"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let err = hub
        .toggle_device(&lamp("1", "Desk", true, true))
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::DeviceCommandFailed { .. }), "got: {err:?}");
}

#[tokio::test]
async fn test_toggle_by_id_reads_current_state_first() {
    let (server, hub) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/test-user/lights/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Lamp B", "state": { "on": true, "reachable": true }
        })))
        .mount(&server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/api/test-user/lights/1/state"))
        .and(body_json(json!({ "on": false })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "success": { "/lights/1/state/on": false } }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let device = hub.toggle_device_by_id("1").await.unwrap();
    assert_eq!(device, lamp("1", "Lamp B", false, true));
}

#[tokio::test]
async fn test_toggle_by_unknown_id() {
    let (server, hub) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/test-user/lights/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "error": { "type": 3, "address": "/lights/42", "description": "resource, /lights/42, not available" } }
        ])))
        .mount(&server)
        .await;

    let err = hub.toggle_device_by_id("42").await.unwrap_err();
    match err {
        CoreError::DeviceNotFound { device_id } => assert_eq!(device_id, "42"),
        other => panic!("expected DeviceNotFound, got: {other:?}"),
    }
}

// ── First use ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_first_use_pairs_then_lists() {
    let server = MockServer::start().await;
    let hub = hub_for(&server, MemoryCredentialStore::new());

    Mock::given(method("POST"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "success": { "username": "test-user" } }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/test-user/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "whitelist": { "test-user": {} }
        })))
        .mount(&server)
        .await;

    mount_lights(&server).await;

    let devices = hub.list_devices().await.unwrap();
    assert_eq!(devices.len(), 3);

    let stored = hub.sessions().store().load().unwrap();
    assert_eq!(stored, Some(Credential::new("test-user")));

    // Second call uses the stored credential; the POST mock expects exactly one hit.
    hub.list_devices().await.unwrap();
}

#[tokio::test]
async fn test_explicit_pair_overwrites_stored_credential() {
    let server = MockServer::start().await;
    let hub = hub_for(
        &server,
        MemoryCredentialStore::with_credential(Credential::new("stale")),
    );

    Mock::given(method("POST"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "success": { "username": "replacement" } }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/replacement/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "whitelist": { "replacement": {} }
        })))
        .mount(&server)
        .await;

    let (address, credential) = hub.pair().await.unwrap();
    assert_eq!(address.as_str(), server.address().to_string());
    assert_eq!(credential, Credential::new("replacement"));
    assert_eq!(
        hub.sessions().store().load().unwrap(),
        Some(Credential::new("replacement"))
    );
}

// ── Degraded persistence ────────────────────────────────────────────

struct LockedStore;

impl CredentialStore for LockedStore {
    fn load(&self) -> Result<Option<Credential>, CoreError> {
        Ok(None)
    }

    fn save(&self, _credential: &Credential) -> Result<(), CoreError> {
        Err(CoreError::StoreWriteError {
            message: "keyring locked".into(),
        })
    }
}

#[tokio::test]
async fn test_unsaved_credential_surfaces_as_hub_warning() {
    let server = MockServer::start().await;
    let address = BridgeAddress::new(server.address().to_string()).unwrap();
    let connection = ConnectionSettings::default();
    let hub = Hub::new(SessionFactory::new(
        StaticDiscovery::new(address),
        LockedStore,
        LinkButtonPairing::new(connection.clone()),
        connection,
    ));

    Mock::given(method("POST"))
        .and(path("/api"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "success": { "username": "test-user" } }
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/test-user/config"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "whitelist": { "test-user": {} }
        })))
        .mount(&server)
        .await;

    mount_lights(&server).await;

    let devices = hub.list_devices().await.unwrap();
    assert_eq!(devices.len(), 3);

    let warnings = hub.take_warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("keyring locked"), "got: {warnings:?}");
    assert!(hub.take_warnings().is_empty());
}
