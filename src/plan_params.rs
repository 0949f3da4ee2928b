//! The quick-settings core: resolves effective routing settings from layered
//! sources, classifies them against the preset table, and turns every user
//! action into a single router transition. All state flows in as explicit
//! arguments; nothing here caches resolved settings across navigations.

use crate::analytics::{self, AnalyticsSink};
use crate::config::Config;
use crate::models::mode_set;
use crate::models::{build_quick_options, QuickOption, QuickOptionTable, RoutingSettings, SettingsOverlay};
use crate::navigation::{Location, Router};
use crate::storage::SettingsStore;
use std::rc::Rc;

pub const MODES_PARAM: &str = "modes";
pub const ARRIVE_BY_PARAM: &str = "arriveBy";

/// Everything the quick-settings operations collaborate with, injected
/// explicitly instead of looked up ambiently.
#[derive(Clone)]
pub struct PlanContext {
    pub config: Rc<Config>,
    pub router: Rc<dyn Router>,
    pub settings_store: Rc<dyn SettingsStore>,
    pub analytics: Option<Rc<dyn AnalyticsSink>>,
}

impl PlanContext {
    fn track(&self, action: &str, label: &str) {
        if let Some(sink) = &self.analytics {
            sink.track_event(analytics::CATEGORY_ITINERARY_SETTINGS, action, label);
        }
    }
}

/// Layered merge of the default preset, persisted settings and the current
/// URL query, in increasing priority. Missing layers are empty overlays.
#[must_use]
pub fn resolve_effective_settings(
    table: &QuickOptionTable,
    persisted: &SettingsOverlay,
    query: &SettingsOverlay,
) -> RoutingSettings {
    table
        .get(&QuickOption::DefaultRoute)
        .copied()
        .unwrap_or_default()
        .overlaid(persisted)
        .overlaid(query)
}

/// Classify effective settings against the preset table by the five quick
/// option fields, with exact numeric equality. The table iterates in its
/// declared order and the LAST matching preset wins; effective settings
/// matching nothing (including any `NaN` field) are `CustomizedMode`.
#[must_use]
pub fn classify_quick_option(
    effective: &RoutingSettings,
    table: &QuickOptionTable,
) -> QuickOption {
    let mut current = QuickOption::CustomizedMode;
    for (option, preset) in table {
        if quick_fields_match(effective, preset) {
            current = *option;
        }
    }
    current
}

fn quick_fields_match(a: &RoutingSettings, b: &RoutingSettings) -> bool {
    a.min_transfer_time == b.min_transfer_time
        && a.walk_speed == b.walk_speed
        && a.walk_board_cost == b.walk_board_cost
        && a.walk_reluctance == b.walk_reluctance
        && a.transfer_penalty == b.transfer_penalty
}

/// The quick option currently in effect for a location.
#[must_use]
pub fn match_quick_option(ctx: &PlanContext, location: &Location) -> QuickOption {
    let table = build_quick_options(&ctx.config);
    let effective = resolve_effective_settings(
        &table,
        &ctx.settings_store.get().settings,
        &SettingsOverlay::from_query(&location.query),
    );
    classify_quick_option(&effective, &table)
}

/// Write a preset's five quick fields into the URL query, preserving every
/// other parameter. Selecting the customized sentinel is a no-op.
pub fn apply_quick_option(ctx: &PlanContext, location: &Location, option: QuickOption) {
    let table = build_quick_options(&ctx.config);
    let Some(preset) = table.get(&option) else {
        return;
    };
    ctx.track(analytics::ACTION_QUICK_SETTINGS_SELECTION, option.id());
    ctx.router.replace(location.with_query_params(vec![
        ("minTransferTime", format_param(preset.min_transfer_time)),
        ("walkSpeed", format_param(preset.walk_speed)),
        ("walkBoardCost", format_param(preset.walk_board_cost)),
        ("walkReluctance", format_param(preset.walk_reluctance)),
        ("transferPenalty", format_param(preset.transfer_penalty)),
    ]));
}

/// Active transport modes for a location. Priority: URL `modes` parameter,
/// then persisted settings, then the configuration's defaults. An empty
/// `modes=` value counts as absent, not as an empty selection.
#[must_use]
pub fn active_modes(ctx: &PlanContext, location: &Location) -> Vec<String> {
    if let Some(raw) = location.query.get(MODES_PARAM) {
        if !raw.is_empty() {
            return mode_set::parse_modes_param(raw);
        }
    }
    if let Some(modes) = ctx.settings_store.get().modes {
        return modes;
    }
    ctx.config.default_modes()
}

/// Case-insensitive membership test against [`active_modes`].
#[must_use]
pub fn is_mode_active(ctx: &PlanContext, location: &Location, mode: &str) -> bool {
    let upper = mode.to_uppercase();
    active_modes(ctx, location).iter().any(|m| *m == upper)
}

/// Toggle a transport mode and write the resulting list to the `modes`
/// query parameter. `wire_name` overrides the toggled identifier when the
/// display name differs from the one on the wire (citybike and friends).
pub fn toggle_transport_mode(
    ctx: &PlanContext,
    location: &Location,
    mode: &str,
    wire_name: Option<&str>,
) {
    let toggled = wire_name.unwrap_or(mode).to_uppercase();
    let modes = mode_set::symmetric_difference(&active_modes(ctx, location), &toggled).join(",");
    ctx.track(analytics::ACTION_TRANSPORT_MODE_SELECTION, &modes);
    ctx.router
        .replace(location.with_query_params(vec![(MODES_PARAM, modes)]));
}

/// Whether the itinerary search is anchored on arrival time. Absent or
/// non-`"true"` query values mean departure.
#[must_use]
pub fn arrive_by(location: &Location) -> bool {
    location.query.get(ARRIVE_BY_PARAM).map(String::as_str) == Some("true")
}

/// Switch between depart-at and arrive-by search.
pub fn set_arrive_by(ctx: &PlanContext, location: &Location, arrive: bool) {
    ctx.track(
        analytics::ACTION_LEAVING_ARRIVING_SELECTION,
        if arrive {
            analytics::LABEL_SELECT_ARRIVING
        } else {
            analytics::LABEL_SELECT_LEAVING
        },
    );
    ctx.router
        .replace(location.with_query_params(vec![(ARRIVE_BY_PARAM, arrive.to_string())]));
}

/// Open or close the customize-search panel. Opening pushes a new history
/// entry carrying the flag so the browser back button closes the panel;
/// closing therefore pops the stack instead of pushing a "closed" entry.
pub fn set_panel_open(ctx: &PlanContext, location: &Location, open: bool) {
    ctx.track(
        analytics::ACTION_EXTRA_SETTINGS_PANEL_CLICK,
        if open {
            analytics::LABEL_PANEL_OPEN
        } else {
            analytics::LABEL_PANEL_CLOSE
        },
    );
    if open {
        let mut next = location.clone();
        next.state.customize_search_offcanvas = true;
        next.state.corrected = false;
        ctx.router.push(next);
    } else {
        ctx.router.go_back();
    }
}

/// Render a numeric parameter the way it reads best in a URL: integral
/// values without a decimal point.
#[allow(clippy::cast_possible_truncation)]
fn format_param(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::MemoryRouter;
    use crate::storage::{CustomizedSettings, MemorySettings};
    use std::cell::RefCell;

    #[derive(Default)]
    struct RecordingSink {
        events: RefCell<Vec<(String, String, String)>>,
    }

    impl AnalyticsSink for RecordingSink {
        fn track_event(&self, category: &str, action: &str, label: &str) {
            self.events.borrow_mut().push((
                category.to_string(),
                action.to_string(),
                label.to_string(),
            ));
        }
    }

    struct Harness {
        ctx: PlanContext,
        router: Rc<MemoryRouter>,
        store: Rc<MemorySettings>,
        sink: Rc<RecordingSink>,
    }

    fn harness(config: Config) -> Harness {
        let router = Rc::new(MemoryRouter::new(Location::new("/reitti/a/b")));
        let store = Rc::new(MemorySettings::default());
        let sink = Rc::new(RecordingSink::default());
        let ctx = PlanContext {
            config: Rc::new(config),
            router: router.clone(),
            settings_store: store.clone(),
            analytics: Some(sink.clone()),
        };
        Harness {
            ctx,
            router,
            store,
            sink,
        }
    }

    fn current(h: &Harness) -> Location {
        h.router.current().expect("router stack not empty")
    }

    #[test]
    fn test_unmodified_defaults_classify_as_default_route() {
        let h = harness(Config::default());
        assert_eq!(
            match_quick_option(&h.ctx, &current(&h)),
            QuickOption::DefaultRoute
        );
    }

    #[test]
    fn test_query_matching_fastest_classifies_as_fastest() {
        let h = harness(Config::default());
        let location = current(&h).with_query_params(vec![
            ("minTransferTime", "60".to_string()),
            ("walkSpeed", "1.5".to_string()),
            ("walkBoardCost", "540".to_string()),
            ("walkReluctance", "1.5".to_string()),
            ("transferPenalty", "0".to_string()),
        ]);
        assert_eq!(
            match_quick_option(&h.ctx, &location),
            QuickOption::FastestRoute
        );
    }

    #[test]
    fn test_off_preset_value_classifies_as_customized() {
        let h = harness(Config::default());
        let location = current(&h).with_query_params(vec![("walkSpeed", "0.9".to_string())]);
        assert_eq!(
            match_quick_option(&h.ctx, &location),
            QuickOption::CustomizedMode
        );
    }

    #[test]
    fn test_malformed_query_value_classifies_as_customized() {
        let h = harness(Config::default());
        let location = current(&h).with_query_params(vec![("walkSpeed", "brisk".to_string())]);
        assert_eq!(
            match_quick_option(&h.ctx, &location),
            QuickOption::CustomizedMode
        );
    }

    #[test]
    fn test_classification_tie_last_match_wins() {
        // Impossible with the shipped constants, pinned structurally: two
        // table entries with identical quick fields.
        let base = RoutingSettings::default();
        let mut table = QuickOptionTable::new();
        table.insert(QuickOption::DefaultRoute, base);
        table.insert(QuickOption::FastestRoute, base);
        assert_eq!(
            classify_quick_option(&base, &table),
            QuickOption::FastestRoute
        );
    }

    #[test]
    fn test_persisted_layer_overrides_defaults() {
        let h = harness(Config::default());
        h.store.set(CustomizedSettings {
            settings: SettingsOverlay {
                walk_reluctance: Some(5.0),
                ..SettingsOverlay::default()
            },
            modes: None,
        });
        assert_eq!(
            match_quick_option(&h.ctx, &current(&h)),
            QuickOption::CustomizedMode
        );
    }

    #[test]
    fn test_query_layer_overrides_persisted() {
        let h = harness(Config::default());
        h.store.set(CustomizedSettings {
            settings: SettingsOverlay {
                walk_reluctance: Some(5.0),
                ..SettingsOverlay::default()
            },
            modes: None,
        });
        // URL pins walkReluctance back to the default
        let location = current(&h).with_query_params(vec![("walkReluctance", "2".to_string())]);
        assert_eq!(
            match_quick_option(&h.ctx, &location),
            QuickOption::DefaultRoute
        );
    }

    #[test]
    fn test_apply_quick_option_round_trip() {
        let h = harness(Config::default());
        let start = current(&h).with_query_params(vec![("time", "1500".to_string())]);
        apply_quick_option(&h.ctx, &start, QuickOption::FastestRoute);

        let landed = current(&h);
        // Unrelated parameter survives
        assert_eq!(landed.query.get("time").map(String::as_str), Some("1500"));
        assert_eq!(
            match_quick_option(&h.ctx, &landed),
            QuickOption::FastestRoute
        );
        assert_eq!(
            h.sink.events.borrow().last(),
            Some(&(
                "ItinerarySettings".to_string(),
                "ItineraryQuickSettingsSelection".to_string(),
                "fastest-route".to_string()
            ))
        );
    }

    #[test]
    fn test_apply_customized_sentinel_is_noop() {
        let h = harness(Config::default());
        let before = current(&h);
        apply_quick_option(&h.ctx, &before, QuickOption::CustomizedMode);
        assert_eq!(current(&h), before);
        assert!(h.sink.events.borrow().is_empty());
    }

    #[test]
    fn test_active_modes_prefers_url_over_persisted_and_defaults() {
        let h = harness(Config::default());
        h.store.set(CustomizedSettings {
            settings: SettingsOverlay::default(),
            modes: Some(vec!["FERRY".to_string()]),
        });
        let location = current(&h).with_query_params(vec![("modes", "BUS,RAIL".to_string())]);
        assert_eq!(active_modes(&h.ctx, &location), vec!["BUS", "RAIL"]);
    }

    #[test]
    fn test_active_modes_falls_back_to_persisted() {
        let h = harness(Config::default());
        h.store.set(CustomizedSettings {
            settings: SettingsOverlay::default(),
            modes: Some(vec!["FERRY".to_string()]),
        });
        assert_eq!(active_modes(&h.ctx, &current(&h)), vec!["FERRY"]);
    }

    #[test]
    fn test_active_modes_falls_back_to_config_defaults() {
        let mut config = Config::default();
        config
            .transport_modes
            .retain(|name, _| name.as_str() == "bus" || name.as_str() == "rail");
        let h = harness(config);
        assert_eq!(active_modes(&h.ctx, &current(&h)), vec!["BUS", "RAIL"]);
    }

    #[test]
    fn test_active_modes_empty_query_value_falls_through() {
        let h = harness(Config::default());
        let location = current(&h).with_query_params(vec![("modes", String::new())]);
        assert_eq!(
            active_modes(&h.ctx, &location),
            Config::default().default_modes()
        );

        h.store.set(CustomizedSettings {
            settings: SettingsOverlay::default(),
            modes: Some(vec!["FERRY".to_string()]),
        });
        assert_eq!(active_modes(&h.ctx, &location), vec!["FERRY"]);
    }

    #[test]
    fn test_active_modes_strips_query_suffix() {
        let h = harness(Config::default());
        let location =
            current(&h).with_query_params(vec![("modes", "BUS,RAIL?foo=bar".to_string())]);
        assert_eq!(active_modes(&h.ctx, &location), vec!["BUS", "RAIL"]);
    }

    #[test]
    fn test_is_mode_active_is_case_insensitive() {
        let h = harness(Config::default());
        let location = current(&h).with_query_params(vec![("modes", "BUS,RAIL".to_string())]);
        assert!(is_mode_active(&h.ctx, &location, "bus"));
        assert!(is_mode_active(&h.ctx, &location, "Rail"));
        assert!(!is_mode_active(&h.ctx, &location, "ferry"));
    }

    #[test]
    fn test_toggle_transport_mode_writes_symmetric_difference() {
        let h = harness(Config::default());
        let location = current(&h).with_query_params(vec![("modes", "BUS,RAIL".to_string())]);
        toggle_transport_mode(&h.ctx, &location, "bus", None);
        let landed = current(&h);
        assert_eq!(landed.query.get("modes").map(String::as_str), Some("RAIL"));

        // Toggling again from the landed location re-enables it
        toggle_transport_mode(&h.ctx, &landed, "bus", None);
        assert_eq!(
            current(&h).query.get("modes").map(String::as_str),
            Some("RAIL,BUS")
        );
    }

    #[test]
    fn test_toggle_transport_mode_uses_wire_name() {
        let h = harness(Config::default());
        let location = current(&h).with_query_params(vec![("modes", "BUS".to_string())]);
        toggle_transport_mode(&h.ctx, &location, "citybike", Some("bicycle_rent"));
        assert_eq!(
            current(&h).query.get("modes").map(String::as_str),
            Some("BUS,BICYCLE_RENT")
        );
    }

    #[test]
    fn test_arrive_by_round_trip() {
        let h = harness(Config::default());
        let start = current(&h);
        assert!(!arrive_by(&start));
        set_arrive_by(&h.ctx, &start, true);
        let landed = current(&h);
        assert!(arrive_by(&landed));
        assert_eq!(
            h.sink.events.borrow().last(),
            Some(&(
                "ItinerarySettings".to_string(),
                "LeavingArrivingSelection".to_string(),
                "SelectArriving".to_string()
            ))
        );
        set_arrive_by(&h.ctx, &landed, false);
        assert!(!arrive_by(&current(&h)));
    }

    #[test]
    fn test_set_panel_open_pushes_then_pops() {
        let h = harness(Config::default());
        let start = current(&h);
        assert_eq!(h.router.depth(), 1);

        set_panel_open(&h.ctx, &start, true);
        assert_eq!(h.router.depth(), 2);
        assert!(current(&h).panel_open());

        set_panel_open(&h.ctx, &current(&h), false);
        assert_eq!(h.router.depth(), 1);
        assert!(!current(&h).panel_open());
    }

    #[test]
    fn test_set_panel_open_false_on_empty_stack_does_not_panic() {
        let router = Rc::new(MemoryRouter::default());
        let ctx = PlanContext {
            config: Rc::new(Config::default()),
            router: router.clone(),
            settings_store: Rc::new(MemorySettings::default()),
            analytics: None,
        };
        set_panel_open(&ctx, &Location::new("/reitti/a/b"), false);
        assert_eq!(router.depth(), 0);
    }

    #[test]
    fn test_missing_analytics_sink_is_fine() {
        let router = Rc::new(MemoryRouter::new(Location::new("/reitti/a/b")));
        let ctx = PlanContext {
            config: Rc::new(Config::default()),
            router: router.clone(),
            settings_store: Rc::new(MemorySettings::default()),
            analytics: None,
        };
        let location = router.current().expect("stack not empty");
        toggle_transport_mode(&ctx, &location, "bus", None);
        set_arrive_by(&ctx, &router.current().expect("stack not empty"), true);
    }

    #[test]
    fn test_format_param() {
        assert_eq!(format_param(540.0), "540");
        assert_eq!(format_param(1.5), "1.5");
        assert_eq!(format_param(0.0), "0");
    }
}
