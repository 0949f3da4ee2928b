use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Itinerary search preferences as sent to the journey planner backend.
///
/// The five "quick option" fields (`min_transfer_time` through
/// `transfer_penalty`) are the ones the quick-settings presets track;
/// the remaining fields ride along through the layered merge unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingSettings {
    pub min_transfer_time: f64,
    pub walk_speed: f64,
    pub walk_board_cost: f64,
    pub walk_reluctance: f64,
    pub transfer_penalty: f64,
    pub accessibility_option: f64,
    pub max_walk_distance: f64,
}

impl Default for RoutingSettings {
    fn default() -> Self {
        Self {
            min_transfer_time: 120.0,
            walk_speed: 1.2,
            walk_board_cost: 600.0,
            walk_reluctance: 2.0,
            transfer_penalty: 0.0,
            accessibility_option: 0.0,
            max_walk_distance: 10_000.0,
        }
    }
}

impl RoutingSettings {
    /// Apply an overlay on top of these settings. Fields absent from the
    /// overlay are inherited unchanged.
    #[must_use]
    pub fn overlaid(&self, overlay: &SettingsOverlay) -> Self {
        Self {
            min_transfer_time: overlay.min_transfer_time.unwrap_or(self.min_transfer_time),
            walk_speed: overlay.walk_speed.unwrap_or(self.walk_speed),
            walk_board_cost: overlay.walk_board_cost.unwrap_or(self.walk_board_cost),
            walk_reluctance: overlay.walk_reluctance.unwrap_or(self.walk_reluctance),
            transfer_penalty: overlay.transfer_penalty.unwrap_or(self.transfer_penalty),
            accessibility_option: overlay
                .accessibility_option
                .unwrap_or(self.accessibility_option),
            max_walk_distance: overlay.max_walk_distance.unwrap_or(self.max_walk_distance),
        }
    }
}

/// A partial [`RoutingSettings`]: one layer of the default < persisted < URL
/// merge. Only fields named here can enter the effective settings, so stray
/// keys from persisted or URL state are dropped on the floor instead of
/// silently merged.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_transfer_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walk_speed: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walk_board_cost: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub walk_reluctance: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_penalty: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accessibility_option: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_walk_distance: Option<f64>,
}

impl SettingsOverlay {
    /// Extract an overlay from URL query parameters. Values are coerced
    /// to numbers; a malformed value becomes `NaN`, which never compares
    /// equal to any preset and therefore classifies as customized.
    #[must_use]
    pub fn from_query(query: &IndexMap<String, String>) -> Self {
        let number = |key: &str| {
            query
                .get(key)
                .map(|raw| raw.parse::<f64>().unwrap_or(f64::NAN))
        };
        Self {
            min_transfer_time: number("minTransferTime"),
            walk_speed: number("walkSpeed"),
            walk_board_cost: number("walkBoardCost"),
            walk_reluctance: number("walkReluctance"),
            transfer_penalty: number("transferPenalty"),
            accessibility_option: number("accessibilityOption"),
            max_walk_distance: number("maxWalkDistance"),
        }
    }
}
