//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Advanced only by caller-supplied ticks and elapsed time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod effects;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod trail;

pub use collision::{StepOutcome, classify_step, glide_food_hit, glide_terminal};
pub use effects::{Effect, EffectClock, EffectSummary};
pub use state::{
    ColorPair, Decoy, DecoyKind, DecoyView, Food, FoodView, GameOverInfo, GameOverReason,
    GamePhase, Obstacle, SnakeColor, Snapshot, World,
};
pub use tick::{
    Direction, GridMovement, Movement, Simulation, TickEvents, TickInput, TrackedMovement,
};
pub use trail::{CellTrail, GlideTrail};
