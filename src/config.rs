//! Simulation tuning for both movement modes
//!
//! One flat tunables table: every cadence, count, cap, and margin the engine
//! consults lives here. Invalid values are repaired by `sanitized()` rather
//! than rejected, so a bad config can never keep the game loop from running.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::state::SnakeColor;

/// Simulation tuning knobs
///
/// Build one with [`SimConfig::classic`] or [`SimConfig::glide`] and tweak
/// fields as needed, then pass it through [`SimConfig::sanitized`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Arena dimensions in pixels
    pub arena_width: f32,
    pub arena_height: f32,
    /// Classic mode cell edge in pixels
    pub cell_size: i32,

    // === Food ===
    /// Live food count range, rolled at reset and on each full refresh
    pub food_count_min: usize,
    pub food_count_max: usize,
    /// Chance a spawned food doubles the score instead of adding one
    pub bonus_chance: f32,
    /// Glide mode food footprint (square, pixels)
    pub food_size: f32,

    // === Decoys ===
    /// Decoy pool size range at reset and on full refresh
    pub decoy_count_min: usize,
    pub decoy_count_max: usize,
    /// The pool is topped back up whenever it drops below this
    pub decoy_floor: usize,
    /// Cap on bomb-tagged decoys at pool generation
    pub bomb_cap_initial: usize,
    /// Looser cap used while replacing consumed decoys
    pub bomb_cap_topup: usize,

    // === Obstacles ===
    pub obstacle_count_min: usize,
    pub obstacle_count_max: usize,
    /// Glide mode obstacle footprint (square, pixels)
    pub obstacle_size: f32,
    /// Glide mode: obstacle centers keep this distance from the arena edge
    pub spawn_margin: f32,
    /// Glide mode: food centers keep this distance from the arena edge
    pub food_margin: f32,

    // === Cadence ===
    pub base_step_interval: f32,
    pub min_step_interval: f32,
    pub step_interval_per_segment: f32,
    /// Full food-set regeneration period (seconds), None disables
    pub food_refresh_secs: Option<f32>,
    /// Obstacle relocation period (seconds), None disables
    pub obstacle_refresh_secs: Option<f32>,

    // === Effects ===
    pub speed_up_secs: f32,
    pub speed_down_secs: f32,
    pub freeze_secs: f32,
    pub speed_up_factor: f32,
    pub speed_down_factor: f32,

    // === Trail ===
    /// Glide mode arc-length budget at reset
    pub base_length_budget: f32,
    /// Budget gained per food eaten
    pub budget_per_food: f32,
    /// Glide mode head circle radius
    pub head_radius: f32,

    // === Appearance ===
    pub snake_color: SnakeColor,
    /// Gradient names a recolor decoy may switch to; resolved by the renderer
    pub gradient_names: Vec<String>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::classic()
    }
}

impl SimConfig {
    /// Tuning for the keyboard-driven grid mode
    pub fn classic() -> Self {
        Self {
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            cell_size: CELL_SIZE,
            food_count_min: 2,
            food_count_max: 3,
            bonus_chance: 0.2,
            food_size: GLIDE_FOOD_SIZE,
            decoy_count_min: 20,
            decoy_count_max: 28,
            decoy_floor: 4,
            bomb_cap_initial: 6,
            bomb_cap_topup: 12,
            obstacle_count_min: 3,
            obstacle_count_max: 5,
            obstacle_size: GLIDE_OBSTACLE_SIZE,
            spawn_margin: 100.0,
            food_margin: 100.0,
            base_step_interval: BASE_STEP_INTERVAL,
            min_step_interval: MIN_STEP_INTERVAL,
            step_interval_per_segment: STEP_INTERVAL_PER_SEGMENT,
            food_refresh_secs: Some(10.0),
            obstacle_refresh_secs: Some(15.0),
            speed_up_secs: SPEED_UP_SECS,
            speed_down_secs: SPEED_DOWN_SECS,
            freeze_secs: FREEZE_SECS,
            speed_up_factor: SPEED_UP_FACTOR,
            speed_down_factor: SPEED_DOWN_FACTOR,
            base_length_budget: BASE_LENGTH_BUDGET,
            budget_per_food: BUDGET_PER_FOOD,
            head_radius: HEAD_RADIUS,
            snake_color: SnakeColor::Solid([255, 182, 193]),
            gradient_names: default_gradients(),
        }
    }

    /// Tuning for the tracked-pointer glide mode
    ///
    /// No decoy pool and a single food item; obstacles relocate on a faster
    /// timer than classic mode.
    pub fn glide() -> Self {
        Self {
            food_count_min: 1,
            food_count_max: 1,
            bonus_chance: 0.0,
            decoy_count_min: 0,
            decoy_count_max: 0,
            decoy_floor: 0,
            obstacle_count_min: 6,
            obstacle_count_max: 6,
            food_refresh_secs: None,
            obstacle_refresh_secs: Some(10.0),
            snake_color: SnakeColor::Solid([200, 0, 200]),
            ..Self::classic()
        }
    }

    /// Classic mode playfield width in cells
    pub fn grid_width(&self) -> i32 {
        ((self.arena_width as i32 - 2 * GRID_FRAME) / self.cell_size).max(1)
    }

    /// Classic mode playfield height in cells
    pub fn grid_height(&self) -> i32 {
        ((self.arena_height as i32 - 2 * GRID_FRAME) / self.cell_size).max(1)
    }

    /// Repair out-of-range values instead of failing
    ///
    /// Arena dimensions clamp to the minimum playable size, count ranges are
    /// reordered, and probabilities clamp to [0, 1].
    pub fn sanitized(mut self) -> Self {
        if self.arena_width < MIN_ARENA_WIDTH || self.arena_height < MIN_ARENA_HEIGHT {
            log::warn!(
                "arena {}x{} below minimum, clamping",
                self.arena_width,
                self.arena_height
            );
            self.arena_width = self.arena_width.max(MIN_ARENA_WIDTH);
            self.arena_height = self.arena_height.max(MIN_ARENA_HEIGHT);
        }
        self.cell_size = self.cell_size.max(4);

        if self.food_count_min > self.food_count_max {
            std::mem::swap(&mut self.food_count_min, &mut self.food_count_max);
        }
        if self.decoy_count_min > self.decoy_count_max {
            std::mem::swap(&mut self.decoy_count_min, &mut self.decoy_count_max);
        }
        if self.obstacle_count_min > self.obstacle_count_max {
            std::mem::swap(&mut self.obstacle_count_min, &mut self.obstacle_count_max);
        }
        self.bonus_chance = self.bonus_chance.clamp(0.0, 1.0);

        self.min_step_interval = self.min_step_interval.max(0.001);
        self.base_step_interval = self.base_step_interval.max(self.min_step_interval);
        self.head_radius = self.head_radius.max(1.0);

        // Margins past the arena midpoint would leave no room to place anything
        let max_margin = (self.arena_width.min(self.arena_height) / 2.0 - 10.0).max(0.0);
        self.spawn_margin = self.spawn_margin.clamp(0.0, max_margin);
        self.food_margin = self.food_margin.clamp(0.0, max_margin);
        self
    }
}

fn default_gradients() -> Vec<String> {
    ["rainbow", "sunset", "ocean", "aurora"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}
