use gloo::console;
use web_sys::Storage;

use loto_regie_core::snapshot::parse_saved;
use loto_regie_core::{codec, LocalImage, StateSnapshot};

pub(crate) const STATE_KEY: &str = "loto-regie.state.v1";
pub(crate) const IMAGES_KEY: &str = "loto-regie.images.v1";
pub(crate) const TRIGGER_KEY: &str = "loto-regie.sync.v1";

pub(crate) fn storage() -> Option<Storage> {
    web_sys::window().and_then(|window| window.local_storage().ok().flatten())
}

/// Persist the primary blob (images excluded) and the image blob under its
/// own key. A quota failure retries once without the history arrays, then
/// gives up silently: the in-memory state stays authoritative and the event
/// goes on.
pub(crate) fn save_state(snapshot: &StateSnapshot) {
    let Some(storage) = storage() else {
        return;
    };
    let primary = snapshot.for_storage();
    let Some(raw) = codec::encode(&primary) else {
        return;
    };
    if storage.set_item(STATE_KEY, &raw).is_err() {
        console::warn!("state save failed, retrying without history");
        if let Some(raw) = codec::encode(&primary.reduced_for_quota()) {
            if storage.set_item(STATE_KEY, &raw).is_err() {
                console::warn!("reduced state save failed, keeping state in memory only");
            }
        }
    }
    save_images(&storage, &snapshot.session.local_images);
}

fn save_images(storage: &Storage, images: &[LocalImage]) {
    let Some(raw) = codec::encode(&images) else {
        return;
    };
    if storage.set_item(IMAGES_KEY, &raw).is_err() {
        console::warn!("image blob save failed, slides will not survive a reload");
    }
}

/// Read the persisted snapshot back, merging the image blob in. A corrupt
/// primary blob is deleted and reported as absent so the caller falls back
/// to defaults instead of crashing mid-event.
pub(crate) fn load_state() -> Option<StateSnapshot> {
    let storage = storage()?;
    let raw = storage.get_item(STATE_KEY).ok()??;
    let Some(mut snapshot) = parse_saved(&raw) else {
        console::warn!("corrupt saved state, clearing it");
        let _ = storage.remove_item(STATE_KEY);
        return None;
    };
    if let Ok(Some(images_raw)) = storage.get_item(IMAGES_KEY) {
        match codec::decode::<Vec<LocalImage>>(&images_raw) {
            Some(images) => snapshot.session.local_images = images,
            None => {
                console::warn!("corrupt image blob, clearing it");
                let _ = storage.remove_item(IMAGES_KEY);
            }
        }
    }
    Some(snapshot)
}
