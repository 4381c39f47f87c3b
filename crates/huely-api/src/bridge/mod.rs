// Bridge REST client modules
//
// Hand-written client for the bridge's local v1 API. Every authenticated
// path is scoped under `/api/{username}/`; errors come back as HTTP 200
// with `[{"error": {...}}]` bodies.

pub mod client;
pub mod lights;
pub mod models;
pub mod system;
pub mod users;

pub use client::BridgeClient;
