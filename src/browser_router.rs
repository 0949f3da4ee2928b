//! History-API backed implementation of the [`Router`] boundary.
//!
//! The history payload is stored as a JSON string so it survives the
//! structured clone into `popstate` events without a custom JS shim.

use crate::navigation::{parse_query, HistoryState, ListenerId, Location, Router};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

pub struct BrowserRouter {
    inner: Rc<RouterInner>,
}

#[derive(Default)]
struct RouterInner {
    listeners: RefCell<Vec<(ListenerId, Rc<dyn Fn(&Location)>)>>,
    next_listener: Cell<ListenerId>,
}

impl RouterInner {
    fn notify(&self, location: &Location) {
        let listeners: Vec<Rc<dyn Fn(&Location)>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(location);
        }
    }
}

impl BrowserRouter {
    #[must_use]
    pub fn new() -> Self {
        let inner = Rc::new(RouterInner::default());

        // Back/forward transitions originate in the browser; forward them
        // to subscribers with the payload recovered from the event.
        let popstate_inner = inner.clone();
        let closure = Closure::wrap(Box::new(move |event: web_sys::PopStateEvent| {
            let mut location = read_window_location();
            location.state = parse_state(&event.state());
            popstate_inner.notify(&location);
        }) as Box<dyn FnMut(web_sys::PopStateEvent)>);

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }
        closure.forget();

        Self { inner }
    }

    fn transition(&self, location: Location, replace: bool) {
        let Some(history) = web_sys::window().and_then(|w| w.history().ok()) else {
            return;
        };
        let state = state_to_js(&location.state);
        let url = location.href();
        let result = if replace {
            history.replace_state_with_url(&state, "", Some(&url))
        } else {
            history.push_state_with_url(&state, "", Some(&url))
        };
        if let Err(err) = result {
            leptos::logging::error!("History transition failed: {err:?}");
            return;
        }
        self.inner.notify(&location);
    }
}

impl Default for BrowserRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Router for BrowserRouter {
    fn push(&self, location: Location) {
        self.transition(location, false);
    }

    fn replace(&self, location: Location) {
        self.transition(location, true);
    }

    fn go_back(&self) {
        // Underflow is the browser's problem; back() past the first entry
        // does nothing. Subscribers hear about it via popstate.
        if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
            let _ = history.back();
        }
    }

    fn listen(&self, callback: Rc<dyn Fn(&Location)>) -> ListenerId {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner.listeners.borrow_mut().push((id, callback));
        id
    }

    fn unlisten(&self, id: ListenerId) {
        self.inner
            .listeners
            .borrow_mut()
            .retain(|(lid, _)| *lid != id);
    }
}

/// Current pathname and query from `window.location`; the history payload
/// of the current entry is not recoverable here and defaults to empty.
#[must_use]
pub fn read_window_location() -> Location {
    let Some(window) = web_sys::window() else {
        return Location::new("/");
    };
    let browser = window.location();
    let pathname = browser.pathname().unwrap_or_else(|_| "/".to_string());
    let search = browser.search().unwrap_or_default();
    Location {
        pathname,
        query: parse_query(&search),
        state: HistoryState::default(),
    }
}

fn state_to_js(state: &HistoryState) -> JsValue {
    serde_json::to_string(state).map_or(JsValue::NULL, |json| JsValue::from_str(&json))
}

fn parse_state(value: &JsValue) -> HistoryState {
    value
        .as_string()
        .and_then(|json| serde_json::from_str(&json).ok())
        .unwrap_or_default()
}
