//! Serpent Arena - a snake arcade simulation engine
//!
//! Core modules:
//! - `sim`: Deterministic simulation (trail growth, spawning, collisions, game state)
//! - `config`: Data-driven tuning for both movement modes
//! - `profile`: Player bests and color preference, persisted as JSON
//!
//! Rendering, input capture, and audio live outside this crate. The engine
//! consumes directional commands or a tracked head position, and hands back
//! read-only snapshots each tick.

pub mod config;
pub mod profile;
pub mod sim;

pub use config::SimConfig;
pub use profile::PlayerProfile;

use glam::Vec2;

/// Engine baseline constants
pub mod consts {
    /// Default arena dimensions in pixels
    pub const ARENA_WIDTH: f32 = 1280.0;
    pub const ARENA_HEIGHT: f32 = 720.0;

    /// Smallest playable arena; smaller configs are clamped, not rejected
    pub const MIN_ARENA_WIDTH: f32 = 320.0;
    pub const MIN_ARENA_HEIGHT: f32 = 240.0;

    /// Classic mode: cell edge in pixels and playfield inset on each side
    pub const CELL_SIZE: i32 = 30;
    pub const GRID_FRAME: i32 = 10;

    /// Classic mode step cadence (seconds)
    pub const BASE_STEP_INTERVAL: f32 = 0.2;
    pub const MIN_STEP_INTERVAL: f32 = 0.08;
    /// Interval reduction per trail segment beyond the first
    pub const STEP_INTERVAL_PER_SEGMENT: f32 = 0.005;

    /// Status effect durations (seconds) and interval factors
    pub const SPEED_UP_SECS: f32 = 5.0;
    pub const SPEED_DOWN_SECS: f32 = 12.0;
    pub const FREEZE_SECS: f32 = 30.0;
    pub const SPEED_UP_FACTOR: f32 = 0.5;
    pub const SPEED_DOWN_FACTOR: f32 = 25.0;

    /// Glide mode trail budget (pixels of arc length)
    pub const BASE_LENGTH_BUDGET: f32 = 150.0;
    pub const BUDGET_PER_FOOD: f32 = 50.0;

    /// Glide mode head circle used for border and obstacle overlap
    pub const HEAD_RADIUS: f32 = 20.0;

    /// Glide mode footprints in pixels (square sprites)
    pub const GLIDE_OBSTACLE_SIZE: f32 = 80.0;
    pub const GLIDE_FOOD_SIZE: f32 = 50.0;

    /// Placement attempts before falling back to the last candidate
    pub const PLACEMENT_RETRIES: u32 = 100;
}

/// Whether a point lies inside a rectangle centered at `center`
#[inline]
pub fn point_in_rect(p: Vec2, center: Vec2, half_extent: Vec2) -> bool {
    (p.x - center.x).abs() < half_extent.x && (p.y - center.y).abs() < half_extent.y
}

/// Axis-aligned overlap test for two rectangles given centers and half extents
#[inline]
pub fn rects_overlap(a: Vec2, a_half: Vec2, b: Vec2, b_half: Vec2) -> bool {
    (a.x - b.x).abs() < a_half.x + b_half.x && (a.y - b.y).abs() < a_half.y + b_half.y
}
