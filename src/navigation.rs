use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Auxiliary payload carried on the history stack alongside the URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HistoryState {
    /// Whether the customize-search offcanvas panel is open.
    #[serde(default, rename = "customizeSearchOffcanvas")]
    pub customize_search_offcanvas: bool,
    /// Set once a stale offcanvas flag has been cleaned up for this entry,
    /// so the cleanup never runs twice for the same transition.
    #[serde(default)]
    pub corrected: bool,
}

/// A point in navigation state: pathname, parsed query and history payload.
/// Owned by the router; the rest of the app only reads it and requests
/// transitions to new values.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Location {
    pub pathname: String,
    pub query: IndexMap<String, String>,
    pub state: HistoryState,
}

impl Location {
    #[must_use]
    pub fn new(pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            ..Self::default()
        }
    }

    /// Whether the customize-search panel is open, defaulting to closed
    /// when the entry carries no payload.
    #[must_use]
    pub const fn panel_open(&self) -> bool {
        self.state.customize_search_offcanvas
    }

    /// A copy of this location with the given query parameters overwritten
    /// or added; every other query key is preserved.
    #[must_use]
    pub fn with_query_params(&self, entries: Vec<(&str, String)>) -> Self {
        let mut next = self.clone();
        for (key, value) in entries {
            next.query.insert(key.to_string(), value);
        }
        next
    }

    /// Pathname plus serialized query string.
    #[must_use]
    pub fn href(&self) -> String {
        format!("{}{}", self.pathname, encode_query(&self.query))
    }
}

pub type ListenerId = usize;

/// The external routing subsystem. The core never mutates navigation state
/// directly; every change goes through one of these transition requests,
/// keeping a single writer at the router boundary.
pub trait Router {
    fn push(&self, location: Location);
    fn replace(&self, location: Location);
    fn go_back(&self);
    fn listen(&self, callback: Rc<dyn Fn(&Location)>) -> ListenerId;
    fn unlisten(&self, id: ListenerId);
}

/// In-process router over a plain location stack. Backs the native test
/// suite and any non-browser build; `go_back` on an exhausted stack is a
/// no-op rather than an error.
#[derive(Default)]
pub struct MemoryRouter {
    stack: RefCell<Vec<Location>>,
    listeners: RefCell<Vec<(ListenerId, Rc<dyn Fn(&Location)>)>>,
    next_listener: Cell<ListenerId>,
}

impl MemoryRouter {
    #[must_use]
    pub fn new(initial: Location) -> Self {
        Self {
            stack: RefCell::new(vec![initial]),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<Location> {
        self.stack.borrow().last().cloned()
    }

    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.borrow().len()
    }

    fn notify(&self, location: &Location) {
        // Listeners may themselves request transitions; release the borrow
        // before calling out.
        let listeners: Vec<Rc<dyn Fn(&Location)>> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(location);
        }
        // Deferred work runs only once the transition has reached every
        // subscriber.
        flush_deferred();
    }
}

impl Router for MemoryRouter {
    fn push(&self, location: Location) {
        self.stack.borrow_mut().push(location.clone());
        self.notify(&location);
    }

    fn replace(&self, location: Location) {
        {
            let mut stack = self.stack.borrow_mut();
            stack.pop();
            stack.push(location.clone());
        }
        self.notify(&location);
    }

    fn go_back(&self) {
        let landed = {
            let mut stack = self.stack.borrow_mut();
            stack.pop();
            stack.last().cloned()
        };
        if let Some(location) = landed {
            self.notify(&location);
        }
    }

    fn listen(&self, callback: Rc<dyn Fn(&Location)>) -> ListenerId {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().push((id, callback));
        id
    }

    fn unlisten(&self, id: ListenerId) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }
}

/// Post-transition hook that clears a stale "panel open" flag when an
/// unrelated navigation (pathname outside `path_prefix`) lands while the
/// previous entry had the panel open. Emits at most one replacement per
/// transition: a replacement is tagged `corrected` and never re-corrected.
pub struct TransitionGuard {
    path_prefix: String,
    last: Location,
}

impl TransitionGuard {
    #[must_use]
    pub fn new(path_prefix: impl Into<String>, initial: Location) -> Self {
        Self {
            path_prefix: path_prefix.into(),
            last: initial,
        }
    }

    /// Feed the landed location; returns the replacement to request (via a
    /// deferred `router.replace`) when a correction is due.
    pub fn on_transition(&mut self, next: &Location) -> Option<Location> {
        let was_open = self.last.panel_open();
        let replacement = if was_open
            && !next.panel_open()
            && !next.state.corrected
            && !next.pathname.starts_with(&self.path_prefix)
        {
            let mut fixed = next.clone();
            fixed.state.customize_search_offcanvas = false;
            fixed.state.corrected = true;
            Some(fixed)
        } else {
            None
        };
        self.last = next.clone();
        replacement
    }
}

/// Run a callback on the next turn of the event queue, strictly after the
/// current navigation event has reached every subscriber.
#[cfg(target_arch = "wasm32")]
pub fn defer(callback: impl FnOnce() + 'static) {
    gloo_timers::callback::Timeout::new(0, callback).forget();
}

/// The native build has no browser event loop; callbacks queue in a
/// thread-local and run once the in-flight notification has finished
/// (the memory router drains the queue after notifying subscribers).
#[cfg(not(target_arch = "wasm32"))]
pub fn defer(callback: impl FnOnce() + 'static) {
    DEFERRED.with(|queue| queue.borrow_mut().push(Box::new(callback)));
}

#[cfg(not(target_arch = "wasm32"))]
thread_local! {
    static DEFERRED: RefCell<Vec<Box<dyn FnOnce()>>> = RefCell::new(Vec::new());
}

/// Drain callbacks queued by [`defer`]. A drained callback may request a
/// new transition or queue further work; the loop keeps going until the
/// queue is empty, one callback at a time with the queue unborrowed.
#[cfg(not(target_arch = "wasm32"))]
fn flush_deferred() {
    loop {
        let next = DEFERRED.with(|queue| {
            let mut queue = queue.borrow_mut();
            if queue.is_empty() {
                None
            } else {
                Some(queue.remove(0))
            }
        });
        let Some(callback) = next else { break };
        callback();
    }
}

// On wasm the browser event loop owns scheduling.
#[cfg(target_arch = "wasm32")]
fn flush_deferred() {}

/// Parse a `?a=b&c=d` search string into an ordered query map, decoding
/// percent escapes. Pairs with an empty key are skipped.
#[must_use]
pub fn parse_query(search: &str) -> IndexMap<String, String> {
    let mut query = IndexMap::new();
    let raw = search.trim_start_matches('?');
    if raw.is_empty() {
        return query;
    }
    for pair in raw.split('&') {
        let mut kv = pair.splitn(2, '=');
        let key = kv.next().unwrap_or("");
        if key.is_empty() {
            continue;
        }
        let value = kv.next().unwrap_or("");
        query.insert(percent_decode(key), percent_decode(value));
    }
    query
}

/// Serialize a query map back to a `?`-prefixed search string, or an empty
/// string for an empty map.
#[must_use]
pub fn encode_query(query: &IndexMap<String, String>) -> String {
    if query.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = query
        .iter()
        .map(|(key, value)| format!("{}={}", percent_encode(key), percent_encode(value)))
        .collect();
    format!("?{}", pairs.join("&"))
}

/// Decode `%XX` escapes; malformed escapes pass through untouched.
#[must_use]
pub fn percent_decode(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            if let Ok(byte) = u8::from_str_radix(&input[i + 1..i + 3], 16) {
                out.push(byte);
                i += 3;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Percent-encode for the query string. Commas stay literal so `modes`
/// lists remain readable in shared URLs.
#[must_use]
pub fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b',' | b'/' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

/// The location the app starts from.
#[cfg(target_arch = "wasm32")]
#[must_use]
pub fn initial_location() -> Location {
    crate::browser_router::read_window_location()
}

#[cfg(not(target_arch = "wasm32"))]
#[must_use]
pub fn initial_location() -> Location {
    Location::new("/")
}
