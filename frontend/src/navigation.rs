//! Browser side of view activation: the scroll container, the `popstate`
//! subscription, and navigation away from the list.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use shared::ScrollContainer;

use crate::dataflow::Relay;
use crate::utils::js_error_message;

/// Value of the `data-scroll-container` attribute on the list element.
pub const SERVER_LIST_CONTAINER: &str = "server-list";

/// The server list's scrollable element, found through its data attribute.
pub struct DomScrollContainer {
    element: web_sys::Element,
}

impl DomScrollContainer {
    /// `None` while the list is not attached to the document.
    pub fn find() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        let selector = format!("[data-scroll-container='{}']", SERVER_LIST_CONTAINER);
        document
            .query_selector(&selector)
            .ok()
            .flatten()
            .map(|element| Self { element })
    }
}

impl ScrollContainer for DomScrollContainer {
    fn scroll_offset(&self) -> u32 {
        u32::try_from(self.element.scroll_top()).unwrap_or(0)
    }

    fn apply_scroll_offset(&self, offset: u32) {
        self.element
            .set_scroll_top(i32::try_from(offset).unwrap_or(i32::MAX));
    }
}

struct PopStateListener {
    window: web_sys::Window,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl PopStateListener {
    fn register(history_navigated_relay: Relay<()>) -> Option<Self> {
        let window = web_sys::window()?;
        let callback = Closure::wrap(Box::new(move |_event: web_sys::Event| {
            history_navigated_relay.send(());
        }) as Box<dyn FnMut(_)>);

        match window.add_event_listener_with_callback("popstate", callback.as_ref().unchecked_ref()) {
            Ok(()) => Some(Self { window, callback }),
            Err(error) => {
                zoon::eprintln!("🧭 NAVIGATION: popstate listener not registered: {}", js_error_message(&error));
                None
            }
        }
    }
}

impl Drop for PopStateListener {
    fn drop(&mut self) {
        if let Err(error) = self
            .window
            .remove_event_listener_with_callback("popstate", self.callback.as_ref().unchecked_ref())
        {
            zoon::eprintln!("🧭 NAVIGATION: popstate listener not removed: {}", js_error_message(&error));
        }
    }
}

/// Holds at most one listener, shared by all clones.
struct ListenerSlot<L> {
    listener: Rc<RefCell<Option<L>>>,
}

impl<L> Clone for ListenerSlot<L> {
    fn clone(&self) -> Self {
        Self {
            listener: Rc::clone(&self.listener),
        }
    }
}

impl<L> Default for ListenerSlot<L> {
    fn default() -> Self {
        Self {
            listener: Rc::new(RefCell::new(None)),
        }
    }
}

impl<L> ListenerSlot<L> {
    /// Calls `register` only while the slot is empty.
    fn start(&self, register: impl FnOnce() -> Option<L>) {
        let mut listener = self.listener.borrow_mut();
        if listener.is_none() {
            *listener = register();
        }
    }

    fn stop(&self) {
        // Dropped outside the borrow; removing the listener touches the DOM.
        let listener = self.listener.borrow_mut().take();
        drop(listener);
    }
}

/// `popstate` subscription of one mounted view.
///
/// Clones share the slot, so the mount and unmount callbacks of an element
/// can both hold it. Starting twice keeps a single listener; stopping drops
/// it, after which no navigation event reaches the view.
#[derive(Clone, Default)]
pub struct NavigationSubscription {
    slot: ListenerSlot<PopStateListener>,
}

impl NavigationSubscription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&self, history_navigated_relay: &Relay<()>) {
        self.slot
            .start(|| PopStateListener::register(history_navigated_relay.clone()));
    }

    pub fn stop(&self) {
        self.slot.stop();
    }
}

/// Leaves the list for the global (map) view.
pub fn navigate_to(url: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    if let Err(error) = window.location().set_href(url) {
        zoon::eprintln!("🧭 NAVIGATION: cannot open {}: {}", url, js_error_message(&error));
    }
}
