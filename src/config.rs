use crate::models::SettingsOverlay;
use indexmap::IndexMap;

/// Per-mode deployment switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportModeConfig {
    /// Shown as a toggle in the quick-settings mode filter.
    pub available_for_selection: bool,
    /// Enabled when the user has expressed no mode preference at all.
    pub default_value: bool,
}

/// Deployment configuration consumed by the quick-settings core: routing
/// preference overrides, the transport-mode catalogue and the path prefix
/// of itinerary pages (used by the stale-panel-flag cleanup).
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub default_settings: SettingsOverlay,
    pub transport_modes: IndexMap<String, TransportModeConfig>,
    pub path_prefix: String,
}

impl Default for Config {
    fn default() -> Self {
        let mut transport_modes = IndexMap::new();
        let mut insert = |name: &str, available_for_selection: bool, default_value: bool| {
            transport_modes.insert(
                name.to_string(),
                TransportModeConfig {
                    available_for_selection,
                    default_value,
                },
            );
        };
        insert("bus", true, true);
        insert("tram", true, true);
        insert("rail", true, true);
        insert("subway", true, true);
        insert("ferry", true, true);
        insert("citybike", true, false);
        insert("airplane", true, false);

        Self {
            default_settings: SettingsOverlay::default(),
            transport_modes,
            path_prefix: "/reitti/".to_string(),
        }
    }
}

impl Config {
    /// Modes enabled when neither the URL nor persisted settings name any,
    /// as uppercase wire identifiers, in catalogue order.
    #[must_use]
    pub fn default_modes(&self) -> Vec<String> {
        self.transport_modes
            .iter()
            .filter(|(_, mode)| mode.default_value)
            .map(|(name, _)| name.to_uppercase())
            .collect()
    }

    /// Modes offered as toggles in the mode filter, in catalogue order.
    #[must_use]
    pub fn selectable_modes(&self) -> Vec<String> {
        self.transport_modes
            .iter()
            .filter(|(_, mode)| mode.available_for_selection)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_modes_are_uppercased_defaults_only() {
        let config = Config::default();
        let defaults = config.default_modes();
        assert_eq!(defaults, vec!["BUS", "TRAM", "RAIL", "SUBWAY", "FERRY"]);
    }

    #[test]
    fn test_selectable_modes_respect_flag() {
        let mut config = Config::default();
        if let Some(mode) = config.transport_modes.get_mut("airplane") {
            mode.available_for_selection = false;
        }
        assert!(!config.selectable_modes().contains(&"airplane".to_string()));
        assert!(config.selectable_modes().contains(&"citybike".to_string()));
    }

    #[test]
    fn test_custom_catalogue_preserves_order() {
        let mut transport_modes = IndexMap::new();
        transport_modes.insert(
            "rail".to_string(),
            TransportModeConfig {
                available_for_selection: true,
                default_value: true,
            },
        );
        transport_modes.insert(
            "bus".to_string(),
            TransportModeConfig {
                available_for_selection: true,
                default_value: true,
            },
        );
        let config = Config {
            transport_modes,
            ..Config::default()
        };
        assert_eq!(config.default_modes(), vec!["RAIL", "BUS"]);
    }
}
