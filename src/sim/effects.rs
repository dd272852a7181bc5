//! Timed status effects and their movement-interval precedence

use serde::Serialize;

/// Timed effects a decoy can attach to the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    SpeedUp,
    SpeedDown,
    Freeze,
}

/// Remaining duration of every effect plus the sticky recolor flag
///
/// Timed effects decay by real elapsed time each tick and clamp at zero.
/// The recolor flag never decays; a recolor decoy sets it.
#[derive(Debug, Clone, Default)]
pub struct EffectClock {
    speed_up: f32,
    speed_down: f32,
    freeze: f32,
    recolored: bool,
}

/// Render-facing view of the active effects
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EffectSummary {
    pub speed_up: f32,
    pub speed_down: f32,
    pub freeze: f32,
    pub recolored: bool,
}

impl EffectClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decay every timed effect by `dt` seconds, clamping at zero
    pub fn tick(&mut self, dt: f32) {
        self.speed_up = (self.speed_up - dt).max(0.0);
        self.speed_down = (self.speed_down - dt).max(0.0);
        self.freeze = (self.freeze - dt).max(0.0);
    }

    /// Set an effect's remaining duration
    ///
    /// Last write wins: durations replace rather than accumulate, and the
    /// opposing speed effect is cleared so the most recent one governs.
    pub fn apply(&mut self, effect: Effect, secs: f32) {
        match effect {
            Effect::SpeedUp => {
                self.speed_up = secs.max(0.0);
                self.speed_down = 0.0;
            }
            Effect::SpeedDown => {
                self.speed_down = secs.max(0.0);
                self.speed_up = 0.0;
            }
            Effect::Freeze => self.freeze = secs.max(0.0),
        }
    }

    pub fn remaining(&self, effect: Effect) -> f32 {
        match effect {
            Effect::SpeedUp => self.speed_up,
            Effect::SpeedDown => self.speed_down,
            Effect::Freeze => self.freeze,
        }
    }

    /// Freeze suppresses stepping and directional input entirely
    pub fn frozen(&self) -> bool {
        self.freeze > 0.0
    }

    pub fn mark_recolored(&mut self) {
        self.recolored = true;
    }

    pub fn recolored(&self) -> bool {
        self.recolored
    }

    /// Apply speed effects to a base step interval
    ///
    /// Freeze is not handled here; callers skip the step outright while
    /// [`EffectClock::frozen`] holds. Speed-up is checked before slow-down.
    pub fn scale_interval(
        &self,
        base: f32,
        min_interval: f32,
        speed_up_factor: f32,
        speed_down_factor: f32,
    ) -> f32 {
        if self.speed_up > 0.0 {
            (base * speed_up_factor).max(min_interval)
        } else if self.speed_down > 0.0 {
            base * speed_down_factor
        } else {
            base
        }
    }

    /// Drop every effect, including the sticky recolor flag
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn summary(&self) -> EffectSummary {
        EffectSummary {
            speed_up: self.speed_up,
            speed_down: self.speed_down,
            freeze: self.freeze,
            recolored: self.recolored,
        }
    }
}
