//! Collision classification for both movement modes
//!
//! Classic mode classifies the candidate head cell with a first-match-wins
//! ladder; glide mode tests the tracked head against item and obstacle
//! rectangles every frame. Glide has no self-collision check: a crossing
//! trail is legal there, matching the two product surfaces.

use glam::{IVec2, Vec2};

use super::state::{Decoy, DecoyKind, Food, GameOverReason, Obstacle};
use super::trail::CellTrail;
use crate::{SimConfig, point_in_rect};

/// What a classic-mode step runs into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Open cell, no growth
    Safe,
    /// Live food at this index was consumed
    Food(usize),
    /// Live non-bomb decoy at this index was consumed
    Decoy(usize),
    Terminal(GameOverReason),
}

/// Classify the candidate head cell, first match wins
pub fn classify_step(
    candidate: IVec2,
    grid: IVec2,
    body: &CellTrail,
    obstacles: &[Obstacle<IVec2>],
    decoys: &[Decoy<IVec2>],
    food: &[Food<IVec2>],
) -> StepOutcome {
    if candidate.x < 0 || candidate.y < 0 || candidate.x >= grid.x || candidate.y >= grid.y {
        return StepOutcome::Terminal(GameOverReason::Bounds);
    }
    // The tail cell counts even though it would vacate this step
    if body.contains(candidate) {
        return StepOutcome::Terminal(GameOverReason::SelfHit);
    }
    if obstacles.iter().any(|o| o.pos == candidate) {
        return StepOutcome::Terminal(GameOverReason::Obstacle);
    }
    if let Some(i) = decoys.iter().position(|d| d.pos == candidate) {
        if decoys[i].kind == DecoyKind::Bomb {
            return StepOutcome::Terminal(GameOverReason::Bomb);
        }
        return StepOutcome::Decoy(i);
    }
    if let Some(i) = food.iter().position(|f| f.pos == candidate) {
        return StepOutcome::Food(i);
    }
    StepOutcome::Safe
}

/// Index of the food item whose rectangle the tracked head is inside
pub fn glide_food_hit(head: Vec2, food: &[Food<Vec2>], cfg: &SimConfig) -> Option<usize> {
    let half = Vec2::splat(cfg.food_size * 0.5);
    food.iter().position(|f| point_in_rect(head, f.pos, half))
}

/// Terminal check for the tracked head: obstacles first, then the border
///
/// Obstacle rectangles are inflated by the head radius; the border test
/// keeps the whole head circle inside the arena.
pub fn glide_terminal(
    head: Vec2,
    obstacles: &[Obstacle<Vec2>],
    cfg: &SimConfig,
) -> Option<GameOverReason> {
    let half = Vec2::splat(cfg.obstacle_size * 0.5 + cfg.head_radius);
    if obstacles.iter().any(|o| point_in_rect(head, o.pos, half)) {
        return Some(GameOverReason::Obstacle);
    }
    let r = cfg.head_radius;
    if head.x - r < 0.0
        || head.x + r > cfg.arena_width
        || head.y - r < 0.0
        || head.y + r > cfg.arena_height
    {
        return Some(GameOverReason::Bounds);
    }
    None
}
