use crate::config::Config;
use crate::models::routing_settings::RoutingSettings;
use indexmap::IndexMap;

/// A named quick-settings selection. The four route presets have entries in
/// the [`QuickOptionTable`]; `CustomizedMode` is a sentinel meaning "the
/// effective settings match no preset" and never appears in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuickOption {
    DefaultRoute,
    FastestRoute,
    LeastTransfers,
    LeastWalking,
    CustomizedMode,
}

impl QuickOption {
    /// The presets offered in the quick-settings dropdown, in display and
    /// classification order.
    pub const SELECTABLE: [Self; 4] = [
        Self::DefaultRoute,
        Self::FastestRoute,
        Self::LeastTransfers,
        Self::LeastWalking,
    ];

    #[must_use]
    pub const fn id(self) -> &'static str {
        match self {
            Self::DefaultRoute => "default-route",
            Self::FastestRoute => "fastest-route",
            Self::LeastTransfers => "least-transfers",
            Self::LeastWalking => "least-walking",
            Self::CustomizedMode => "customized-mode",
        }
    }

    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "default-route" => Some(Self::DefaultRoute),
            "fastest-route" => Some(Self::FastestRoute),
            "least-transfers" => Some(Self::LeastTransfers),
            "least-walking" => Some(Self::LeastWalking),
            "customized-mode" => Some(Self::CustomizedMode),
            _ => None,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::DefaultRoute => "Default route",
            Self::FastestRoute => "Fastest route",
            Self::LeastTransfers => "Least transfers",
            Self::LeastWalking => "Least walking",
            Self::CustomizedMode => "Customized mode",
        }
    }
}

/// Ordered preset table; iteration order is the classification order.
pub type QuickOptionTable = IndexMap<QuickOption, RoutingSettings>;

/// Build the preset table from the hard-coded base defaults overlaid with
/// the configuration's default-settings overrides. Pure function of the
/// config; callers recompute it whenever the config can have changed.
#[must_use]
pub fn build_quick_options(config: &Config) -> QuickOptionTable {
    let base = RoutingSettings::default().overlaid(&config.default_settings);

    let mut table = QuickOptionTable::new();
    table.insert(QuickOption::DefaultRoute, base);
    table.insert(
        QuickOption::FastestRoute,
        RoutingSettings {
            min_transfer_time: 60.0,
            walk_speed: 1.5,
            walk_board_cost: 540.0,
            walk_reluctance: 1.5,
            transfer_penalty: 0.0,
            ..base
        },
    );
    table.insert(
        QuickOption::LeastTransfers,
        RoutingSettings {
            walk_board_cost: 600.0,
            walk_reluctance: 3.0,
            transfer_penalty: 5460.0,
            ..base
        },
    );
    table.insert(
        QuickOption::LeastWalking,
        RoutingSettings {
            walk_board_cost: 360.0,
            walk_reluctance: 5.0,
            transfer_penalty: 0.0,
            ..base
        },
    );
    table
}
