pub mod mode_set;
pub mod quick_option;
pub mod routing_settings;

pub use quick_option::{build_quick_options, QuickOption, QuickOptionTable};
pub use routing_settings::{RoutingSettings, SettingsOverlay};
