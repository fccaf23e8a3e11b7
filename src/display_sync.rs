use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use gloo::events::EventListener;
use gloo::timers::callback::Interval;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{BroadcastChannel, CustomEvent, MessageEvent, StorageEvent};

use loto_regie_core::{codec, DisplayReducer, GameSession, StateSnapshot, SYNC_POLL_MS};

use crate::local_state;
use crate::sync_channel::{CHANNEL_NAME, UPDATE_EVENT};

#[derive(Clone)]
pub(crate) struct DisplayHooks {
    pub(crate) on_state: Rc<dyn Fn(GameSession)>,
}

/// Consumer-side wiring. Four redundant sources feed one reducer: the
/// broadcast channel, the cross-tab `storage` event, the same-document
/// custom event, and a low-frequency poll of the persisted blob in case
/// every event path is throttled away. Dropping the adapter tears all of
/// them down.
pub(crate) struct DisplaySyncAdapter {
    channel: Option<BroadcastChannel>,
    _on_message: Option<Closure<dyn FnMut(MessageEvent)>>,
    _storage_listener: Option<EventListener>,
    _update_listener: Option<EventListener>,
    _poll: Interval,
}

impl DisplaySyncAdapter {
    pub(crate) fn start(hooks: DisplayHooks) -> Self {
        let reducer = Rc::new(RefCell::new(DisplayReducer::new()));

        // Initial snapshot, before any event has a chance to fire.
        reload_from_storage(&reducer, &hooks);

        let channel = BroadcastChannel::new(CHANNEL_NAME).ok();
        if channel.is_none() {
            console::warn!("broadcast channel unavailable, falling back to storage and polling");
        }
        let on_message = channel.as_ref().map(|channel| {
            let reducer = reducer.clone();
            let hooks = hooks.clone();
            let closure = Closure::wrap(Box::new(move |event: MessageEvent| {
                let Some(raw) = event.data().as_string() else {
                    return;
                };
                if let Some(snapshot) = codec::decode::<StateSnapshot>(&raw) {
                    apply_snapshot(&reducer, &hooks, snapshot);
                }
            }) as Box<dyn FnMut(MessageEvent)>);
            channel.set_onmessage(Some(closure.as_ref().unchecked_ref()));
            closure
        });

        let storage_listener = web_sys::window().map(|window| {
            let reducer = reducer.clone();
            let hooks = hooks.clone();
            EventListener::new(&window, "storage", move |event| {
                let Some(event) = event.dyn_ref::<StorageEvent>() else {
                    return;
                };
                // The trigger key carries no payload; either key means the
                // persisted blob is worth re-reading.
                match event.key() {
                    Some(key)
                        if key == local_state::STATE_KEY || key == local_state::TRIGGER_KEY =>
                    {
                        reload_from_storage(&reducer, &hooks);
                    }
                    _ => {}
                }
            })
        });

        let update_listener = web_sys::window().map(|window| {
            let reducer = reducer.clone();
            let hooks = hooks.clone();
            EventListener::new(&window, UPDATE_EVENT, move |event| {
                let Some(event) = event.dyn_ref::<CustomEvent>() else {
                    return;
                };
                let Some(raw) = event.detail().as_string() else {
                    return;
                };
                if let Some(snapshot) = codec::decode::<StateSnapshot>(&raw) {
                    apply_snapshot(&reducer, &hooks, snapshot);
                }
            })
        });

        let poll = {
            let reducer = reducer.clone();
            let hooks = hooks.clone();
            Interval::new(SYNC_POLL_MS, move || {
                reload_from_storage(&reducer, &hooks);
            })
        };

        Self {
            channel,
            _on_message: on_message,
            _storage_listener: storage_listener,
            _update_listener: update_listener,
            _poll: poll,
        }
    }
}

impl Drop for DisplaySyncAdapter {
    fn drop(&mut self) {
        if let Some(channel) = self.channel.take() {
            channel.set_onmessage(None);
            channel.close();
        }
    }
}

fn apply_snapshot(
    reducer: &Rc<RefCell<DisplayReducer>>,
    hooks: &DisplayHooks,
    snapshot: StateSnapshot,
) {
    let applied = reducer.borrow_mut().apply(snapshot);
    if applied {
        let session = reducer.borrow().session().clone();
        (hooks.on_state)(session);
    }
}

fn reload_from_storage(reducer: &Rc<RefCell<DisplayReducer>>, hooks: &DisplayHooks) {
    if let Some(snapshot) = local_state::load_state() {
        apply_snapshot(reducer, hooks, snapshot);
    }
}
