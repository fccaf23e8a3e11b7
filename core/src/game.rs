use rand::{CryptoRng, Rng};
use serde::{Deserialize, Serialize};

pub const LOTO_POOL: u8 = 90;
pub const BINGO_POOL: u8 = 75;

pub const DRAW_ANIMATION_MS: u32 = 1_000;
pub const WHEEL_SPIN_MS: u32 = 5_000;
pub const SYNC_POLL_MS: u32 = 500;

/// Prize tiers of a loto round, in playing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameTier {
    Quine,
    DoubleQuine,
    CartonPlein,
}

impl GameTier {
    pub const ALL: [GameTier; 3] = [GameTier::Quine, GameTier::DoubleQuine, GameTier::CartonPlein];

    pub fn label(&self) -> &'static str {
        match self {
            GameTier::Quine => "Quine",
            GameTier::DoubleQuine => "Double Quine",
            GameTier::CartonPlein => "Carton Plein",
        }
    }
}

/// Fixed progression quine -> double-quine -> carton-plein -> end.
pub fn next_tier(current: GameTier) -> Option<GameTier> {
    match current {
        GameTier::Quine => Some(GameTier::DoubleQuine),
        GameTier::DoubleQuine => Some(GameTier::CartonPlein),
        GameTier::CartonPlein => None,
    }
}

/// Uniform pick among the numbers of `[1, pool]` not yet drawn.
///
/// The draw result is the product's entire fairness guarantee to a live
/// audience, so the generator is required to be cryptographically strong.
pub fn draw_remaining<R: Rng + CryptoRng>(pool: u8, drawn: &[u8], rng: &mut R) -> Option<u8> {
    let available: Vec<u8> = (1..=pool).filter(|n| !drawn.contains(n)).collect();
    if available.is_empty() {
        return None;
    }
    let index = rng.gen_range(0..available.len());
    Some(available[index])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn draw_skips_already_drawn() {
        let mut rng = StdRng::seed_from_u64(7);
        let drawn: Vec<u8> = (1..=89).collect();
        for _ in 0..20 {
            assert_eq!(draw_remaining(LOTO_POOL, &drawn, &mut rng), Some(90));
        }
    }

    #[test]
    fn draw_on_exhausted_pool_is_none() {
        let mut rng = StdRng::seed_from_u64(7);
        let drawn: Vec<u8> = (1..=BINGO_POOL).collect();
        assert_eq!(draw_remaining(BINGO_POOL, &drawn, &mut rng), None);
    }

    #[test]
    fn tier_progression_ends_after_carton_plein() {
        assert_eq!(next_tier(GameTier::Quine), Some(GameTier::DoubleQuine));
        assert_eq!(next_tier(GameTier::DoubleQuine), Some(GameTier::CartonPlein));
        assert_eq!(next_tier(GameTier::CartonPlein), None);
    }
}
