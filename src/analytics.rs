/// Fire-and-forget usage tracking. The sink is optional; a deployment
/// without one simply drops the events.
pub trait AnalyticsSink {
    fn track_event(&self, category: &str, action: &str, label: &str);
}

pub const CATEGORY_ITINERARY_SETTINGS: &str = "ItinerarySettings";

pub const ACTION_QUICK_SETTINGS_SELECTION: &str = "ItineraryQuickSettingsSelection";
pub const ACTION_TRANSPORT_MODE_SELECTION: &str = "QuickSettingsTransportModeSelection";
pub const ACTION_LEAVING_ARRIVING_SELECTION: &str = "LeavingArrivingSelection";
pub const ACTION_EXTRA_SETTINGS_PANEL_CLICK: &str = "ExtraSettingsPanelClick";

pub const LABEL_SELECT_ARRIVING: &str = "SelectArriving";
pub const LABEL_SELECT_LEAVING: &str = "SelectLeaving";
pub const LABEL_PANEL_OPEN: &str = "ExtraSettingsPanelOpen";
pub const LABEL_PANEL_CLOSE: &str = "ExtraSettingsPanelClose";
