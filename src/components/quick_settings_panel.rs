use crate::components::mode_filter::ModeFilter;
use crate::models::QuickOption;
use crate::navigation::Location;
use crate::plan_params::{
    apply_quick_option, arrive_by, match_quick_option, set_arrive_by, set_panel_open, PlanContext,
};
use leptos::{
    component, event_target_value, view, IntoView, Signal, SignalGet, SignalGetUntracked,
};

/// The quick-settings strip under the itinerary search: depart/arrive
/// select, route-preset select, mode toggles and the customize-search
/// offcanvas toggle. All state is a projection of the current location;
/// every handler requests a single router transition.
#[component]
#[must_use]
pub fn QuickSettingsPanel(
    ctx: PlanContext,
    location: Signal<Location>,
    visible: Signal<bool>,
    has_default_preferences: Signal<bool>,
) -> impl IntoView {
    let quick_option = Signal::derive({
        let ctx = ctx.clone();
        move || match_quick_option(&ctx, &location.get())
    });

    let on_arrive_change = {
        let ctx = ctx.clone();
        move |ev: web_sys::Event| {
            set_arrive_by(&ctx, &location.get_untracked(), event_target_value(&ev) == "true");
        }
    };

    let on_quick_option_change = {
        let ctx = ctx.clone();
        move |ev: web_sys::Event| {
            if let Some(option) = QuickOption::from_id(&event_target_value(&ev)) {
                apply_quick_option(&ctx, &location.get_untracked(), option);
            }
        }
    };

    let toggle_offcanvas = {
        let ctx = ctx.clone();
        move |_| {
            let current = location.get_untracked();
            let open = current.panel_open();
            set_panel_open(&ctx, &current, !open);
        }
    };

    view! {
        <div class="quicksettings-container" class:visible=move || visible.get()>
            <div class="top-row">
                <div class="select-wrapper">
                    <select class="arrive" on:change=on_arrive_change>
                        <option value="false" selected=move || !arrive_by(&location.get())>
                            "Leaving"
                        </option>
                        <option value="true" selected=move || arrive_by(&location.get())>
                            "Arriving"
                        </option>
                    </select>
                </div>
                <div class="select-wrapper">
                    <select class="select-route-modes" on:change=on_quick_option_change>
                        {QuickOption::SELECTABLE.iter().map(|option| {
                            let option = *option;
                            view! {
                                <option
                                    value=option.id()
                                    selected=move || quick_option.get() == option
                                >
                                    {option.label()}
                                </option>
                            }
                        }).collect::<Vec<_>>()}
                        {move || (quick_option.get() == QuickOption::CustomizedMode).then(|| view! {
                            <option value=QuickOption::CustomizedMode.id() selected=true>
                                {QuickOption::CustomizedMode.label()}
                            </option>
                        })}
                    </select>
                </div>
            </div>
            <div class="bottom-row">
                <div class="toggle-modes">
                    <ModeFilter ctx=ctx.clone() location=location/>
                </div>
                <button
                    class="open-advanced-settings"
                    class:adjusted=move || !has_default_preferences.get()
                    title="Customize search"
                    on:click=toggle_offcanvas
                >
                    <i class="fa-solid fa-sliders"></i>
                </button>
            </div>
        </div>
    }
}
