use gloo::console;
use wasm_bindgen::JsValue;
use web_sys::{BroadcastChannel, CustomEvent, CustomEventInit};

use loto_regie_core::{codec, StateSnapshot};

use crate::local_state;

pub(crate) const CHANNEL_NAME: &str = "loto-regie.updates";
pub(crate) const UPDATE_EVENT: &str = "loto-regie-update";

/// Operator-side fan-out. Every write goes through three independent paths
/// at once; each one fails on its own without taking the others down, and
/// the consumer's poll covers the case where all three are missing.
pub(crate) struct SyncPublisher {
    channel: Option<BroadcastChannel>,
}

impl SyncPublisher {
    pub(crate) fn new() -> Self {
        let channel = match BroadcastChannel::new(CHANNEL_NAME) {
            Ok(channel) => Some(channel),
            Err(_) => {
                console::warn!("broadcast channel unavailable, storage events and polling remain");
                None
            }
        };
        Self { channel }
    }

    pub(crate) fn publish(&self, snapshot: &StateSnapshot) {
        let Some(raw) = codec::encode(snapshot) else {
            return;
        };
        if let Some(channel) = self.channel.as_ref() {
            if channel.post_message(&JsValue::from_str(&raw)).is_err() {
                console::warn!("broadcast post failed");
            }
        }
        write_trigger(snapshot.timestamp);
        dispatch_update_event(&raw);
    }
}

impl Drop for SyncPublisher {
    fn drop(&mut self) {
        if let Some(channel) = self.channel.take() {
            channel.close();
        }
    }
}

/// The trigger key never carries state; writing it is what fires the
/// `storage` event in other tabs, which then re-read the persisted blob.
fn write_trigger(timestamp: u64) {
    if let Some(storage) = local_state::storage() {
        let _ = storage.set_item(local_state::TRIGGER_KEY, &timestamp.to_string());
    }
}

/// Same-document path, for listeners living in the operator tab itself.
fn dispatch_update_event(raw: &str) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let init = CustomEventInit::new();
    init.set_detail(&JsValue::from_str(raw));
    let Ok(event) = CustomEvent::new_with_event_init_dict(UPDATE_EVENT, &init) else {
        return;
    };
    let _ = window.dispatch_event(&event);
}
