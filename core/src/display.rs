use crate::session::GameSession;
use crate::snapshot::StateSnapshot;

/// What the projection screen is showing. Exactly one mode at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    ImageSlide,
    Wheel,
    NumberGrid,
}

pub fn display_mode(session: &GameSession) -> DisplayMode {
    if session.is_image_display_mode && session.selected_image().is_some() {
        DisplayMode::ImageSlide
    } else if session.is_wheel_mode {
        DisplayMode::Wheel
    } else {
        DisplayMode::NumberGrid
    }
}

/// Passive consumer state. The same logical update can arrive up to four
/// times over the redundant channels, in any order; the timestamp guard
/// makes application idempotent and monotonic.
#[derive(Debug, Clone, Default)]
pub struct DisplayReducer {
    last_applied: u64,
    session: GameSession,
}

impl DisplayReducer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the local state with `snapshot` if and only if it is strictly
    /// newer than everything applied so far.
    pub fn apply(&mut self, snapshot: StateSnapshot) -> bool {
        if snapshot.timestamp <= self.last_applied {
            return false;
        }
        self.last_applied = snapshot.timestamp;
        self.session = snapshot.session;
        true
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn last_applied(&self) -> u64 {
        self.last_applied
    }

    pub fn mode(&self) -> DisplayMode {
        display_mode(&self.session)
    }
}
