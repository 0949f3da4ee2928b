use crate::components::summary_navigation::SummaryNavigation;
use crate::config::Config;
use crate::navigation::{self, initial_location, Location};
use crate::plan_params::PlanContext;
use crate::storage::{LocalStorageSettings, SettingsStore};
use leptos::{component, create_signal, on_cleanup, view, IntoView, SignalSet};
use leptos_meta::{provide_meta_context, Stylesheet, Title};
use leptos_router::{Route, Router, Routes};
use std::rc::Rc;

#[cfg(target_arch = "wasm32")]
fn create_router() -> Rc<dyn navigation::Router> {
    Rc::new(crate::browser_router::BrowserRouter::new())
}

#[cfg(not(target_arch = "wasm32"))]
fn create_router() -> Rc<dyn navigation::Router> {
    Rc::new(navigation::MemoryRouter::new(initial_location()))
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let router: Rc<dyn navigation::Router> = create_router();
    let store: Rc<dyn SettingsStore> = Rc::new(LocalStorageSettings);
    let ctx = PlanContext {
        config: Rc::new(Config::default()),
        router: router.clone(),
        settings_store: store,
        analytics: None,
    };

    // Project the router's navigation state into a signal the component
    // tree re-renders from.
    let (location, set_location) = create_signal(initial_location());
    let listener_id = router.listen(Rc::new(move |next: &Location| {
        set_location.set(next.clone());
    }));
    {
        let router = router.clone();
        on_cleanup(move || router.unlisten(listener_id));
    }

    view! {
        <Stylesheet id="leptos" href="/pkg/journey_graph.css"/>
        <Title text="Journey Planner"/>

        <Router>
            <main class="app">
                <Routes>
                    <Route
                        path="/*any"
                        view=move || view! {
                            <SummaryNavigation ctx=ctx.clone() location=location.into()/>
                        }
                    />
                </Routes>
            </main>
        </Router>
    }
}
