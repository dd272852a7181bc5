//! World state, entities, and the render-facing snapshot
//!
//! The [`World`] is generic over the position type: classic mode runs on
//! `IVec2` grid cells, glide mode on `Vec2` pixel points. Everything the
//! renderer may see goes through [`Snapshot`]; a decoy's concealed kind is
//! deliberately absent from that view.

use serde::{Deserialize, Serialize};

use super::effects::EffectClock;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first directional command or tracked position
    NotStarted,
    /// Active gameplay
    Running,
    /// Run ended
    GameOver,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverReason {
    /// Head left the arena
    Bounds,
    /// Head entered the snake's own body
    SelfHit,
    /// Head entered an obstacle
    Obstacle,
    /// Head consumed a bomb-tagged decoy
    Bomb,
}

/// Terminal info frozen at the moment of death
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverInfo {
    pub reason: GameOverReason,
    /// Score at time of death
    pub score: u32,
}

/// Fill and accent colors for a spawned item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorPair {
    pub fill: [u8; 3],
    pub accent: [u8; 3],
}

/// Snake body color, resolved to pixels only by the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnakeColor {
    Solid([u8; 3]),
    /// Named gradient looked up in the renderer's gradient table
    Gradient(String),
}

/// What a decoy does when consumed
///
/// Never serialized: the renderer must not learn a decoy's kind before the
/// snake eats it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecoyKind {
    Bomb,
    Recolor,
    SpeedUp,
    SpeedDown,
    Freeze,
    Inert,
}

/// A consumable item that grows the snake and awards score
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Food<P> {
    pub pos: P,
    pub colors: ColorPair,
    /// Doubles the score instead of adding one
    pub bonus: bool,
}

/// A spawned item whose effect stays hidden until consumed
#[derive(Debug, Clone, PartialEq)]
pub struct Decoy<P> {
    pub pos: P,
    /// Drawn independently of the kind so the color reveals nothing
    pub colors: ColorPair,
    pub kind: DecoyKind,
}

/// A static hazard, periodically relocated
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Obstacle<P> {
    pub pos: P,
}

/// Everything the engine mutates over a run, minus the trail
///
/// The trail lives in the movement strategy; entities, score, effects, and
/// the refresh timers are shared by both modes and live here.
#[derive(Debug, Clone)]
pub struct World<P> {
    pub phase: GamePhase,
    pub score: u32,
    /// Best score seen this session, updated live
    pub high_score: u32,
    pub snake_color: SnakeColor,
    pub effects: EffectClock,
    pub food: Vec<Food<P>>,
    pub decoys: Vec<Decoy<P>>,
    pub obstacles: Vec<Obstacle<P>>,
    pub game_over: Option<GameOverInfo>,
    /// Seconds since the last full food/decoy regeneration
    pub food_refresh_timer: f32,
    /// Seconds since obstacles last moved
    pub obstacle_refresh_timer: f32,
}

impl<P> World<P> {
    pub fn new(snake_color: SnakeColor) -> Self {
        Self {
            phase: GamePhase::NotStarted,
            score: 0,
            high_score: 0,
            snake_color,
            effects: EffectClock::new(),
            food: Vec::new(),
            decoys: Vec::new(),
            obstacles: Vec::new(),
            game_over: None,
            food_refresh_timer: 0.0,
            obstacle_refresh_timer: 0.0,
        }
    }

    /// Live bomb-tagged decoys, checked against the spawn caps
    pub fn live_bombs(&self) -> usize {
        self.decoys
            .iter()
            .filter(|d| d.kind == DecoyKind::Bomb)
            .count()
    }
}

/// Food as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FoodView<P> {
    pub pos: P,
    pub colors: ColorPair,
    pub bonus: bool,
}

/// Decoy as the renderer sees it: position and colors, never the kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DecoyView<P> {
    pub pos: P,
    pub colors: ColorPair,
}

/// Read-only view of one tick's results, handed to the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot<P> {
    pub phase: GamePhase,
    /// Trail positions, head first
    pub trail: Vec<P>,
    pub food: Vec<FoodView<P>>,
    pub decoys: Vec<DecoyView<P>>,
    pub obstacles: Vec<P>,
    pub score: u32,
    pub high_score: u32,
    pub snake_color: SnakeColor,
    pub effects: super::effects::EffectSummary,
    pub game_over: Option<GameOverInfo>,
}

impl<P> Snapshot<P> {
    pub fn is_terminal(&self) -> bool {
        self.phase == GamePhase::GameOver
    }
}
