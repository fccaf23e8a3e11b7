use serde::{Deserialize, Deserializer, Serialize};

use crate::codec;
use crate::session::GameSession;

/// The payload carried by every propagation channel and stored in the
/// primary blob: one flat JSON object, the whole session plus a write
/// timestamp in milliseconds, strictly increasing per write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateSnapshot {
    #[serde(default)]
    pub timestamp: u64,
    #[serde(flatten)]
    pub session: GameSession,
}

impl StateSnapshot {
    pub fn new(timestamp: u64, session: GameSession) -> Self {
        Self { timestamp, session }
    }

    /// The persisted form: images are kept out of the primary blob because
    /// base64 payloads can blow the quota on their own.
    pub fn for_storage(&self) -> StateSnapshot {
        let mut stored = self.clone();
        stored.session.local_images.clear();
        stored
    }

    /// The quota-exceeded retry payload: the history arrays are the only
    /// unbounded parts of the state, so they are dropped first.
    pub fn reduced_for_quota(&self) -> StateSnapshot {
        let mut reduced = self.for_storage();
        reduced.session.game_history.clear();
        reduced.session.wheel_draw_history.clear();
        reduced
    }
}

/// The one place persisted JSON is turned back into a session. Missing
/// fields take defaults, list fields tolerate non-list junk, and a snapshot
/// that is not an object at all parses to `None` so the caller can drop the
/// corrupt key.
pub fn parse_saved(raw: &str) -> Option<StateSnapshot> {
    codec::decode(raw)
}

/// Deserialize a list field, coercing anything that is not a list to empty
/// and skipping unreadable entries instead of failing the whole snapshot.
pub(crate) fn lenient_seq<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: serde::de::DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}
