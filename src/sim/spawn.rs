//! Procedural placement and the weighted decoy draw
//!
//! Every placement loop is bounded: after [`PLACEMENT_RETRIES`] rejected
//! candidates the last one is used as-is, so spawning can never stall the
//! game loop. Callers describe what blocks a candidate with a closure.

use glam::{IVec2, Vec2};
use rand::Rng;
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand_pcg::Pcg32;

use super::state::{ColorPair, DecoyKind, Food, SnakeColor};
use crate::SimConfig;
use crate::consts::PLACEMENT_RETRIES;

const fn pair(fill: [u8; 3], accent: [u8; 3]) -> ColorPair {
    ColorPair { fill, accent }
}

/// Food color pairs, shared by both modes
pub const FOOD_COLORS: [ColorPair; 3] = [
    pair([255, 105, 180], [255, 200, 220]),
    pair([135, 206, 250], [200, 230, 255]),
    pair([255, 255, 0], [255, 255, 200]),
];

/// Decoy color pairs
///
/// Drawn independently of the concealed kind so the renderer cannot infer
/// what a decoy hides from its color.
pub const DECOY_COLORS: [ColorPair; 8] = [
    pair([255, 105, 180], [255, 200, 220]),
    pair([135, 206, 250], [200, 230, 255]),
    pair([255, 255, 0], [255, 255, 200]),
    pair([255, 69, 0], [255, 150, 100]),
    pair([144, 238, 144], [200, 255, 200]),
    pair([255, 182, 193], [255, 200, 210]),
    pair([176, 224, 230], [200, 235, 240]),
    pair([221, 160, 221], [230, 180, 230]),
];

/// Solid colors a recolor decoy may switch the snake to
pub const SNAKE_PALETTE: [[u8; 3]; 16] = [
    [255, 182, 193],
    [144, 238, 144],
    [173, 216, 230],
    [255, 255, 0],
    [255, 165, 0],
    [128, 0, 128],
    [255, 255, 255],
    [128, 128, 128],
    [255, 0, 0],
    [0, 255, 255],
    [255, 0, 255],
    [50, 205, 50],
    [0, 128, 128],
    [0, 0, 128],
    [255, 215, 0],
    [192, 192, 192],
];

/// Index 0 is the bomb; the re-draw on a capped bomb samples from the rest
const DECOY_KINDS: [DecoyKind; 6] = [
    DecoyKind::Bomb,
    DecoyKind::Recolor,
    DecoyKind::SpeedUp,
    DecoyKind::SpeedDown,
    DecoyKind::Freeze,
    DecoyKind::Inert,
];
const DECOY_WEIGHTS: [u32; 6] = [10, 15, 15, 15, 15, 30];

/// Uniform-random free cell, falling back to the last candidate
pub fn place_cell(grid: IVec2, rng: &mut Pcg32, occupied: impl Fn(IVec2) -> bool) -> IVec2 {
    let mut candidate = IVec2::ZERO;
    for _ in 0..PLACEMENT_RETRIES {
        candidate = IVec2::new(rng.random_range(0..grid.x), rng.random_range(0..grid.y));
        if !occupied(candidate) {
            return candidate;
        }
    }
    candidate
}

/// Uniform-random clear point within `[min, max]`, same fallback discipline
pub fn place_point(min: Vec2, max: Vec2, rng: &mut Pcg32, blocked: impl Fn(Vec2) -> bool) -> Vec2 {
    let mut candidate = min;
    for _ in 0..PLACEMENT_RETRIES {
        candidate = Vec2::new(
            rng.random_range(min.x..=max.x),
            rng.random_range(min.y..=max.y),
        );
        if !blocked(candidate) {
            return candidate;
        }
    }
    candidate
}

/// Weighted categorical draw of a decoy's concealed kind
///
/// A bomb draw past the cap re-draws uniformly among the non-bomb kinds.
pub fn draw_decoy_kind(rng: &mut Pcg32, live_bombs: usize, bomb_cap: usize) -> DecoyKind {
    let weights = WeightedIndex::new(DECOY_WEIGHTS).expect("decoy weights are fixed and positive");
    let kind = DECOY_KINDS[weights.sample(rng)];
    if kind == DecoyKind::Bomb && live_bombs >= bomb_cap {
        return DECOY_KINDS[rng.random_range(1..DECOY_KINDS.len())];
    }
    kind
}

pub fn food_colors(rng: &mut Pcg32) -> ColorPair {
    FOOD_COLORS[rng.random_range(0..FOOD_COLORS.len())]
}

pub fn decoy_colors(rng: &mut Pcg32) -> ColorPair {
    DECOY_COLORS[rng.random_range(0..DECOY_COLORS.len())]
}

/// A fresh food item at `pos` with rolled colors and bonus flag
pub fn new_food<P>(pos: P, cfg: &SimConfig, rng: &mut Pcg32) -> Food<P> {
    Food {
        pos,
        colors: food_colors(rng),
        bonus: rng.random_bool(cfg.bonus_chance as f64),
    }
}

/// Re-roll the snake color for a recolor decoy
///
/// Even odds of a solid palette color or a named gradient; all-solid when no
/// gradients are configured.
pub fn reroll_snake_color(rng: &mut Pcg32, gradients: &[String]) -> SnakeColor {
    if gradients.is_empty() || rng.random_bool(0.5) {
        SnakeColor::Solid(SNAKE_PALETTE[rng.random_range(0..SNAKE_PALETTE.len())])
    } else {
        SnakeColor::Gradient(gradients[rng.random_range(0..gradients.len())].clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    #[test]
    fn test_place_cell_avoids_occupied() {
        let mut rng = Pcg32::seed_from_u64(7);
        let grid = IVec2::new(10, 10);
        for _ in 0..200 {
            let cell = place_cell(grid, &mut rng, |c| c.x < 5);
            assert!(cell.x >= 5);
            assert!(cell.x < 10 && cell.y < 10);
        }
    }

    #[test]
    fn test_place_cell_terminates_when_everything_is_occupied() {
        let mut rng = Pcg32::seed_from_u64(7);
        // Fallback candidate still lands in bounds
        let cell = place_cell(IVec2::new(4, 4), &mut rng, |_| true);
        assert!(cell.x >= 0 && cell.x < 4);
        assert!(cell.y >= 0 && cell.y < 4);
    }

    #[test]
    fn test_place_point_respects_margins() {
        let mut rng = Pcg32::seed_from_u64(11);
        for _ in 0..200 {
            let p = place_point(
                Vec2::new(100.0, 100.0),
                Vec2::new(1180.0, 620.0),
                &mut rng,
                |_| false,
            );
            assert!(p.x >= 100.0 && p.x <= 1180.0);
            assert!(p.y >= 100.0 && p.y <= 620.0);
        }
    }

    #[test]
    fn test_weighted_draw_reaches_every_kind() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut seen = [false; 6];
        for _ in 0..2000 {
            let kind = draw_decoy_kind(&mut rng, 0, 6);
            let i = DECOY_KINDS.iter().position(|&k| k == kind).unwrap();
            seen[i] = true;
        }
        assert_eq!(seen, [true; 6]);
    }

    #[test]
    fn test_reroll_without_gradients_stays_solid() {
        let mut rng = Pcg32::seed_from_u64(3);
        for _ in 0..50 {
            assert!(matches!(
                reroll_snake_color(&mut rng, &[]),
                SnakeColor::Solid(_)
            ));
        }
    }

    proptest! {
        #[test]
        fn capped_draw_never_yields_a_bomb(seed in any::<u64>()) {
            let mut rng = Pcg32::seed_from_u64(seed);
            for _ in 0..50 {
                prop_assert_ne!(draw_decoy_kind(&mut rng, 12, 12), DecoyKind::Bomb);
            }
        }
    }
}
