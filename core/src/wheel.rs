use rand::{CryptoRng, Rng};

/// Minimum number of complete turns every spin makes.
pub const FULL_TURNS_BASE: u32 = 5;
/// Spread added on top of the base, so a spin makes 5 to 7 turns.
pub const FULL_TURNS_SPREAD: u32 = 3;
/// Share of a segment kept clear on each side so the pointer never
/// stops on a boundary line.
pub const SEGMENT_EDGE_MARGIN_RATIO: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpinOutcome {
    pub winning_number: u32,
    pub target_rotation: f64,
}

/// Absolute rotation (degrees) at which the wheel must stop so the pointer
/// lands inside the winning segment.
///
/// The accumulator only ever grows: the target is the first occurrence of the
/// landing angle at least `full_turns` complete turns past `current_rotation`,
/// so repeated spins never make the wheel rewind on screen.
///
/// `offset_unit` is a random value in `[-0.5, 0.5)` spreading the stop point
/// across the margin-trimmed width of the segment.
pub fn target_rotation(
    count: u32,
    winning_number: u32,
    current_rotation: f64,
    offset_unit: f64,
    full_turns: u32,
) -> f64 {
    let count = count.max(1);
    let segment_angle = 360.0 / count as f64;
    let winning_center = (winning_number.saturating_sub(1)) as f64 * segment_angle + segment_angle / 2.0;
    let margin = segment_angle * SEGMENT_EDGE_MARGIN_RATIO;
    let random_offset = offset_unit * (segment_angle - 2.0 * margin);
    let final_angle = 360.0 - winning_center + random_offset;

    let base_rotation = (current_rotation / 360.0).floor() * 360.0;
    let mut target = base_rotation + final_angle;
    while target < current_rotation + full_turns as f64 * 360.0 {
        target += 360.0;
    }
    target
}

/// Pick a winning segment uniformly and compute where the wheel stops.
pub fn spin<R: Rng + CryptoRng>(count: u32, current_rotation: f64, rng: &mut R) -> SpinOutcome {
    let count = count.max(1);
    let winning_number = rng.gen_range(0..count) + 1;
    let offset_unit = rng.gen::<f64>() - 0.5;
    let full_turns = FULL_TURNS_BASE + rng.gen_range(0..FULL_TURNS_SPREAD);
    SpinOutcome {
        winning_number,
        target_rotation: target_rotation(count, winning_number, current_rotation, offset_unit, full_turns),
    }
}
