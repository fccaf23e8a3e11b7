pub mod action;
pub mod codec;
pub mod display;
pub mod game;
pub mod session;
pub mod snapshot;
pub mod wheel;

pub use action::SessionAction;
pub use codec::{decode, encode};
pub use display::{display_mode, DisplayMode, DisplayReducer};
pub use game::{
    next_tier, GameTier, BINGO_POOL, DRAW_ANIMATION_MS, LOTO_POOL, SYNC_POLL_MS, WHEEL_SPIN_MS,
};
pub use session::{GameRecord, GameSession, LocalImage, PrizeDescriptions, WheelRecord};
pub use snapshot::StateSnapshot;
