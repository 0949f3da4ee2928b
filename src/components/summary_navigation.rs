use crate::components::quick_settings_panel::QuickSettingsPanel;
use crate::models::QuickOption;
use crate::navigation::{defer, Location, TransitionGuard};
use crate::plan_params::{match_quick_option, set_panel_open, PlanContext};
use leptos::{
    component, create_signal, on_cleanup, view, IntoView, Signal, SignalGet, SignalGetUntracked,
    SignalSet,
};
use std::cell::RefCell;
use std::rc::Rc;

/// Itinerary search header: the settings toggle, the quick-settings strip
/// and the customize-search offcanvas flag handling. Registers the
/// post-transition guard that clears a stale "panel open" flag when an
/// unrelated navigation lands, one correction per transition.
#[component]
#[must_use]
pub fn SummaryNavigation(ctx: PlanContext, location: Signal<Location>) -> impl IntoView {
    let (panel_visible, set_panel_visible) = create_signal(false);

    let guard = Rc::new(RefCell::new(TransitionGuard::new(
        ctx.config.path_prefix.clone(),
        location.get_untracked(),
    )));
    let listener_id = ctx.router.listen(Rc::new({
        let guard = guard.clone();
        let router = ctx.router.clone();
        move |next: &Location| {
            // Bind before the `if let` so the guard borrow is released
            // ahead of the deferred replace re-entering the listener.
            let fixed = guard.borrow_mut().on_transition(next);
            if let Some(fixed) = fixed {
                let router = router.clone();
                defer(move || router.replace(fixed));
            }
        }
    }));
    {
        let router = ctx.router.clone();
        on_cleanup(move || router.unlisten(listener_id));
    }

    let has_default_preferences = Signal::derive({
        let ctx = ctx.clone();
        move || match_quick_option(&ctx, &location.get()) == QuickOption::DefaultRoute
    });

    let settings_icon = move || {
        if panel_visible.get() {
            "fa-solid fa-xmark"
        } else if has_default_preferences.get() {
            "fa-solid fa-gear"
        } else {
            "fa-solid fa-sliders"
        }
    };

    let close_offcanvas = {
        let ctx = ctx.clone();
        move |_| set_panel_open(&ctx, &location.get_untracked(), false)
    };

    view! {
        <div class="summary-navigation">
            <div class="time-selector-settings-row">
                <div class="icon-holder">
                    {move || (!has_default_preferences.get() && !panel_visible.get()).then(|| view! {
                        <i class="fa-solid fa-circle-exclamation super-icon"></i>
                    })}
                </div>
                <button
                    class="standalone-btn"
                    aria-label=move || if panel_visible.get() { "close" } else { "settings" }
                    on:click=move |_| set_panel_visible.set(!panel_visible.get_untracked())
                >
                    <i class=settings_icon></i>
                </button>
            </div>
            <div class="quicksettings-separator-line" class:hidden=move || !panel_visible.get()></div>
            <QuickSettingsPanel
                ctx=ctx.clone()
                location=location
                visible=panel_visible.into()
                has_default_preferences=has_default_preferences
            />
            <aside
                class="customize-search-offcanvas"
                class:open=move || location.get().panel_open()
            >
                <button class="offcanvas-close" on:click=close_offcanvas>
                    <i class="fa-solid fa-arrow-right"></i>
                </button>
            </aside>
        </div>
    }
}
