use crate::models::SettingsOverlay;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

const SETTINGS_KEY: &str = "customizedSettings";

/// Routing preferences the user saved in the customize-search panel,
/// persisted locally on the device.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CustomizedSettings {
    #[serde(flatten)]
    pub settings: SettingsOverlay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modes: Option<Vec<String>>,
}

/// Read access to persisted settings. The quick-settings core only reads;
/// writes happen in the customize-search panel, outside this crate's scope.
pub trait SettingsStore {
    fn get(&self) -> CustomizedSettings;
}

/// Persisted settings in `window.localStorage` under `customizedSettings`,
/// stored as JSON. Absent or malformed payloads degrade to defaults.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageSettings;

#[cfg(target_arch = "wasm32")]
impl SettingsStore for LocalStorageSettings {
    fn get(&self) -> CustomizedSettings {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        let Some(storage) = storage else {
            return CustomizedSettings::default();
        };
        match storage.get_item(SETTINGS_KEY) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                leptos::logging::warn!("Discarding malformed customized settings: {err}");
                CustomizedSettings::default()
            }),
            _ => CustomizedSettings::default(),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl SettingsStore for LocalStorageSettings {
    fn get(&self) -> CustomizedSettings {
        CustomizedSettings::default()
    }
}

/// In-process settings store for the native build and tests.
#[derive(Debug, Default)]
pub struct MemorySettings {
    settings: RefCell<CustomizedSettings>,
}

impl MemorySettings {
    #[must_use]
    pub fn new(settings: CustomizedSettings) -> Self {
        Self {
            settings: RefCell::new(settings),
        }
    }

    pub fn set(&self, settings: CustomizedSettings) {
        *self.settings.borrow_mut() = settings;
    }
}

impl SettingsStore for MemorySettings {
    fn get(&self) -> CustomizedSettings {
        self.settings.borrow().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_parses_settings_and_modes() {
        let parsed: CustomizedSettings = serde_json::from_str(
            r#"{"walkSpeed": 0.8, "transferPenalty": 120, "modes": ["BUS", "FERRY"]}"#,
        )
        .expect("payload parses");
        assert_eq!(parsed.settings.walk_speed, Some(0.8));
        assert_eq!(parsed.settings.transfer_penalty, Some(120.0));
        assert_eq!(parsed.modes, Some(vec!["BUS".to_string(), "FERRY".to_string()]));
    }

    #[test]
    fn test_unknown_keys_are_dropped() {
        let parsed: CustomizedSettings =
            serde_json::from_str(r#"{"walkSpeed": 0.8, "ticketTypes": "HSL:AB"}"#)
                .expect("payload parses");
        assert_eq!(parsed.settings.walk_speed, Some(0.8));
        assert_eq!(parsed, CustomizedSettings {
            settings: SettingsOverlay {
                walk_speed: Some(0.8),
                ..SettingsOverlay::default()
            },
            modes: None,
        });
    }

    #[test]
    fn test_malformed_payload_degrades_to_default() {
        let parsed: CustomizedSettings =
            serde_json::from_str("{not json").unwrap_or_default();
        assert_eq!(parsed, CustomizedSettings::default());
    }

    #[test]
    fn test_memory_store_round_trip() {
        let custom = CustomizedSettings {
            modes: Some(vec!["RAIL".to_string()]),
            ..CustomizedSettings::default()
        };
        let seeded = MemorySettings::new(custom.clone());
        assert_eq!(seeded.get(), custom);

        let store = MemorySettings::default();
        assert_eq!(store.get(), CustomizedSettings::default());
        store.set(custom.clone());
        assert_eq!(store.get(), custom);
    }
}
