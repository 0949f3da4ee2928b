use crate::navigation::Location;
use crate::plan_params::{is_mode_active, toggle_transport_mode, PlanContext};
use leptos::{component, view, IntoView, Signal, SignalGet, SignalGetUntracked};

/// One toggle button per transport mode the deployment offers for
/// selection. Active state is derived from the current location; clicking
/// requests a router transition with the toggled `modes` list.
#[component]
#[must_use]
pub fn ModeFilter(ctx: PlanContext, location: Signal<Location>) -> impl IntoView {
    let modes = ctx.config.selectable_modes();

    view! {
        <div class="btn-bar mode-filter">
            {modes.into_iter().map(|mode| {
                let toggle_ctx = ctx.clone();
                let toggle_mode = mode.clone();
                let active_ctx = ctx.clone();
                let active_mode = mode.clone();
                view! {
                    <button
                        class="btn mode-icon"
                        class:active=move || is_mode_active(&active_ctx, &location.get(), &active_mode)
                        title=mode.clone()
                        on:click=move |_| {
                            toggle_transport_mode(
                                &toggle_ctx,
                                &location.get_untracked(),
                                &toggle_mode,
                                None,
                            );
                        }
                    >
                        {mode}
                    </button>
                }
            }).collect::<Vec<_>>()}
        </div>
    }
}
