// ── Device catalog & control ──
//
// Reads always hit the bridge. Toggles are optimistic: an acknowledged
// command returns the flipped record without re-reading the light.

use tracing::debug;

use crate::error::CoreError;
use crate::model::Device;
use crate::session::Session;

/// All lights on the bridge, ordered by name (case-insensitive).
pub async fn list_devices(session: &Session) -> Result<Vec<Device>, CoreError> {
    let lights = session.client().list_lights().await?;
    let mut devices: Vec<Device> = lights
        .into_iter()
        .map(|(id, light)| Device::from_light(id, light))
        .collect();
    devices.sort_by(Device::cmp_by_name);
    debug!(count = devices.len(), "listed devices");
    Ok(devices)
}

/// A single light by bridge id.
pub async fn get_device(session: &Session, id: &str) -> Result<Device, CoreError> {
    match session.client().get_light(id).await {
        Ok(light) => Ok(Device::from_light(id, light)),
        Err(e) if e.is_not_found() => Err(CoreError::DeviceNotFound {
            device_id: id.to_owned(),
        }),
        Err(e) => Err(e.into()),
    }
}

/// Ask the bridge for the opposite of `device.on`.
///
/// On acknowledgement returns a flipped copy; `device` itself is never
/// modified. Rejections and missing acknowledgements fail with
/// [`CoreError::DeviceCommandFailed`].
pub async fn toggle(session: &Session, device: &Device) -> Result<Device, CoreError> {
    let target = !device.on;
    let acked = session
        .client()
        .set_light_on(&device.id, target)
        .await
        .map_err(|e| CoreError::DeviceCommandFailed {
            device_id: device.id.clone(),
            reason: e.to_string(),
        })?;

    if acked == 0 {
        return Err(CoreError::DeviceCommandFailed {
            device_id: device.id.clone(),
            reason: "bridge did not acknowledge the command".into(),
        });
    }

    debug!(id = %device.id, on = target, "device toggled");
    Ok(device.toggled())
}
