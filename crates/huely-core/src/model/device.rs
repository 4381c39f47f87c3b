// ── Device domain type ──

use std::cmp::Ordering;

use icu_collator::{Collator, CollatorOptions, Strength};
use serde::{Deserialize, Serialize};

thread_local! {
    // Root-locale collation; case differences are ignored, accents are not.
    static NAME_COLLATOR: Option<Collator> = name_collator();
}

fn name_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Secondary);
    Collator::try_new(&Default::default(), options).ok()
}

/// A light as seen by the presentation layer.
///
/// Read from the bridge on every fetch. Copies returned by a toggle are
/// optimistic: they reflect the command the bridge accepted, not a re-read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub on: bool,
    pub reachable: bool,
}

impl Device {
    pub(crate) fn from_light(id: impl Into<String>, light: huely_api::Light) -> Self {
        Self {
            id: id.into(),
            name: light.name,
            on: light.state.on,
            reachable: light.state.reachable,
        }
    }

    /// The same device with its on/off flag flipped.
    pub fn toggled(&self) -> Self {
        Self {
            on: !self.on,
            ..self.clone()
        }
    }

    /// Locale-aware, case-insensitive name ordering. Ties fall back to the
    /// raw name, then the id, so the order is total and stable across fetches.
    pub fn cmp_by_name(&self, other: &Self) -> Ordering {
        NAME_COLLATOR
            .with(|collator| match collator {
                Some(collator) => collator.compare(&self.name, &other.name),
                None => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            })
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.id.cmp(&other.id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn device(id: &str, name: &str) -> Device {
        Device {
            id: id.into(),
            name: name.into(),
            on: false,
            reachable: true,
        }
    }

    #[test]
    fn orders_names_case_insensitively() {
        let mut devices = vec![device("1", "Lamp B"), device("2", "lamp a"), device("3", "Lamp C")];
        devices.sort_by(Device::cmp_by_name);
        let names: Vec<&str> = devices.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["lamp a", "Lamp B", "Lamp C"]);
    }

    #[test]
    fn accented_names_sort_with_their_base_letter() {
        let mut devices = vec![
            device("1", "Bad"),
            device("2", "Ärger Lampe"),
            device("3", "Zimmer"),
            device("4", "éclair"),
            device("5", "Küche"),
        ];
        devices.sort_by(Device::cmp_by_name);
        let names: Vec<&str> = devices.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Ärger Lampe", "Bad", "éclair", "Küche", "Zimmer"]);
    }

    #[test]
    fn names_differing_only_in_case_fall_back_to_raw_order() {
        let mut devices = vec![device("1", "desk"), device("2", "Desk")];
        devices.sort_by(Device::cmp_by_name);
        assert_eq!(devices[0].name, "Desk");
    }

    #[test]
    fn duplicate_names_order_by_id() {
        let mut devices = vec![device("7", "Desk"), device("3", "Desk")];
        devices.sort_by(Device::cmp_by_name);
        assert_eq!(devices[0].id, "3");
    }

    #[test]
    fn toggled_only_flips_on() {
        let d = device("1", "Desk");
        let t = d.toggled();
        assert!(t.on);
        assert_eq!((t.id.as_str(), t.name.as_str(), t.reachable), ("1", "Desk", true));
        assert!(!d.on);
    }
}
