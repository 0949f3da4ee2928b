use leptos::{
    component, event_target_value, store_value, view, IntoView, RwSignal, Signal, SignalGet,
    SignalSet,
};

/// A stop offered in the from/to schedule dropdowns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopOption {
    pub display_name: String,
    pub value: usize,
}

#[must_use]
pub fn stop_options(stops: &[String]) -> Vec<StopOption> {
    stops
        .iter()
        .enumerate()
        .map(|(index, name)| StopOption {
            display_name: name.clone(),
            value: index,
        })
        .collect()
}

/// Stops selectable as the range start: everything strictly before `to`.
#[must_use]
pub fn from_options(options: &[StopOption], to: usize) -> Vec<StopOption> {
    options[..to.min(options.len())].to_vec()
}

/// Stops selectable as the range end: everything strictly after `from`.
#[must_use]
pub fn to_options(options: &[StopOption], from: usize) -> Vec<StopOption> {
    options[(from + 1).min(options.len())..].to_vec()
}

#[component]
#[must_use]
pub fn RouteScheduleStopSelect(
    selected: Signal<usize>,
    options: Signal<Vec<StopOption>>,
    on_select_change: impl Fn(usize) + 'static + Copy,
) -> impl IntoView {
    view! {
        <select
            class="route-schedule-stop-select"
            on:change=move |ev| {
                if let Ok(value) = event_target_value(&ev).parse::<usize>() {
                    on_select_change(value);
                }
            }
        >
            {move || options.get().into_iter().map(|option| {
                let value = option.value;
                view! {
                    <option
                        value=value.to_string()
                        selected=move || selected.get() == value
                    >
                        {option.display_name}
                    </option>
                }
            }).collect::<Vec<_>>()}
        </select>
    }
}

/// From/to stop pickers over a route's stop list. The option lists narrow
/// each other so an empty range cannot be selected.
#[component]
#[must_use]
pub fn RouteScheduleHeader(
    stops: Vec<String>,
    from: RwSignal<usize>,
    to: RwSignal<usize>,
) -> impl IntoView {
    let options = store_value(stop_options(&stops));
    let from_opts = Signal::derive(move || from_options(&options.get_value(), to.get()));
    let to_opts = Signal::derive(move || to_options(&options.get_value(), from.get()));

    view! {
        <div class="route-schedule-header row">
            <div class="columns small-6">
                <RouteScheduleStopSelect
                    selected=from.into()
                    options=from_opts
                    on_select_change=move |value| from.set(value)
                />
            </div>
            <div class="columns small-6">
                <RouteScheduleStopSelect
                    selected=to.into()
                    options=to_opts
                    on_select_change=move |value| to.set(value)
                />
            </div>
        </div>
    }
}
