// ── Domain model ──
//
// Canonical types handed to the presentation layer. None of them are
// cached: addresses and devices are re-read on every operation.

pub mod address;
pub mod credential;
pub mod device;

pub use address::BridgeAddress;
pub use credential::Credential;
pub use device::Device;
