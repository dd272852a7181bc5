//! Per-tick orchestration shared by both movement modes
//!
//! One [`Simulation`] drives either mode through the [`Movement`] strategy:
//! [`GridMovement`] steps a cell trail on a dynamically scaled interval,
//! [`TrackedMovement`] follows an externally tracked head every frame. The
//! engine owns what the modes share: effect decay, periodic refresh, outcome
//! application, scoring, and the one-way game-over transition.

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::{self, StepOutcome, classify_step};
use super::effects::Effect;
use super::spawn;
use super::state::{
    Decoy, DecoyKind, DecoyView, FoodView, GameOverInfo, GameOverReason, GamePhase, Obstacle,
    Snapshot, World,
};
use super::trail::{CellTrail, GlideTrail};
use crate::{SimConfig, rects_overlap};

/// A discrete directional command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Grid delta, y grows downward
    pub fn delta(self) -> IVec2 {
        match self {
            Direction::Up => IVec2::new(0, -1),
            Direction::Down => IVec2::new(0, 1),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Right => IVec2::new(1, 0),
        }
    }
}

/// Caller-supplied input for one tick
///
/// Classic mode reads `direction`, glide mode reads `tracked`. Directional
/// commands are applied as given: a 180° reversal is not filtered, even
/// though reversing into a body segment is fatal.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub direction: Option<Direction>,
    /// Tracked head position for this frame
    pub tracked: Option<Vec2>,
}

/// What one advance call did; the engine applies these to the world
#[derive(Debug, Clone, Copy, Default)]
pub struct TickEvents {
    /// A movement/growth event actually happened this tick
    pub stepped: bool,
    pub food_eaten: Option<usize>,
    pub decoy_eaten: Option<usize>,
    pub game_over: Option<GameOverReason>,
}

/// Mode strategy: trail growth, collision semantics, and placement geometry
///
/// Implementations own the trail. The engine calls `advance` once per tick
/// and the placement hooks whenever something needs a fresh position.
pub trait Movement {
    /// Grid cell or pixel point
    type Pos: Copy + PartialEq + std::fmt::Debug + Serialize;

    /// Rebuild the trail for a fresh run
    fn reset(&mut self, cfg: &SimConfig);

    /// Whether this input begins a run from [`GamePhase::NotStarted`]
    fn starts(&self, input: &TickInput) -> bool;

    /// Advance one tick, mutating the trail and classifying what the head hit
    fn advance(
        &mut self,
        world: &World<Self::Pos>,
        cfg: &SimConfig,
        input: &TickInput,
        dt: f32,
    ) -> TickEvents;

    fn place_food(&self, world: &World<Self::Pos>, cfg: &SimConfig, rng: &mut Pcg32) -> Self::Pos;

    fn place_decoy(&self, world: &World<Self::Pos>, cfg: &SimConfig, rng: &mut Pcg32) -> Self::Pos;

    fn place_obstacle(
        &self,
        world: &World<Self::Pos>,
        cfg: &SimConfig,
        rng: &mut Pcg32,
    ) -> Self::Pos;

    /// New position for the obstacle at `index`, avoiding food and its peers
    fn relocate_obstacle(
        &self,
        world: &World<Self::Pos>,
        cfg: &SimConfig,
        rng: &mut Pcg32,
        index: usize,
    ) -> Self::Pos;

    /// Head-first copy of the trail for snapshots
    fn trail_positions(&self) -> Vec<Self::Pos>;
}

/// Classic mode: directional commands step a cell trail on a timed interval
#[derive(Debug, Clone)]
pub struct GridMovement {
    pub trail: CellTrail,
    pub direction: Direction,
    /// Seconds since the last step; keeps accumulating while frozen
    pub step_timer: f32,
}

impl Default for GridMovement {
    fn default() -> Self {
        Self {
            trail: CellTrail::spawn_at(IVec2::ZERO),
            direction: Direction::Right,
            step_timer: 0.0,
        }
    }
}

impl GridMovement {
    fn grid(cfg: &SimConfig) -> IVec2 {
        IVec2::new(cfg.grid_width(), cfg.grid_height())
    }

    fn cell_occupied(&self, world: &World<IVec2>, cell: IVec2) -> bool {
        self.trail.contains(cell)
            || world.food.iter().any(|f| f.pos == cell)
            || world.decoys.iter().any(|d| d.pos == cell)
            || world.obstacles.iter().any(|o| o.pos == cell)
    }
}

impl Movement for GridMovement {
    type Pos = IVec2;

    fn reset(&mut self, cfg: &SimConfig) {
        self.trail = CellTrail::spawn_at(Self::grid(cfg) / 2);
        self.direction = Direction::Right;
        self.step_timer = 0.0;
    }

    fn starts(&self, input: &TickInput) -> bool {
        input.direction.is_some()
    }

    fn advance(
        &mut self,
        world: &World<IVec2>,
        cfg: &SimConfig,
        input: &TickInput,
        dt: f32,
    ) -> TickEvents {
        let mut events = TickEvents::default();
        self.step_timer += dt;

        // Freeze suppresses stepping and directional input outright
        if world.effects.frozen() {
            return events;
        }
        if let Some(direction) = input.direction {
            self.direction = direction;
        }

        // Longer snakes step faster, down to the floor interval
        let base = (cfg.base_step_interval
            - cfg.step_interval_per_segment * (self.trail.len() as f32 - 1.0))
            .max(cfg.min_step_interval);
        let interval = world.effects.scale_interval(
            base,
            cfg.min_step_interval,
            cfg.speed_up_factor,
            cfg.speed_down_factor,
        );
        if self.step_timer < interval {
            return events;
        }
        self.step_timer = 0.0;
        events.stepped = true;

        let candidate = self.trail.head() + self.direction.delta();
        match classify_step(
            candidate,
            Self::grid(cfg),
            &self.trail,
            &world.obstacles,
            &world.decoys,
            &world.food,
        ) {
            StepOutcome::Terminal(reason) => events.game_over = Some(reason),
            StepOutcome::Food(i) => {
                self.trail.step(candidate, true);
                events.food_eaten = Some(i);
            }
            StepOutcome::Decoy(i) => {
                self.trail.step(candidate, false);
                events.decoy_eaten = Some(i);
            }
            StepOutcome::Safe => self.trail.step(candidate, false),
        }
        events
    }

    fn place_food(&self, world: &World<IVec2>, cfg: &SimConfig, rng: &mut Pcg32) -> IVec2 {
        spawn::place_cell(Self::grid(cfg), rng, |c| self.cell_occupied(world, c))
    }

    fn place_decoy(&self, world: &World<IVec2>, cfg: &SimConfig, rng: &mut Pcg32) -> IVec2 {
        spawn::place_cell(Self::grid(cfg), rng, |c| self.cell_occupied(world, c))
    }

    fn place_obstacle(&self, world: &World<IVec2>, cfg: &SimConfig, rng: &mut Pcg32) -> IVec2 {
        spawn::place_cell(Self::grid(cfg), rng, |c| self.cell_occupied(world, c))
    }

    fn relocate_obstacle(
        &self,
        world: &World<IVec2>,
        cfg: &SimConfig,
        rng: &mut Pcg32,
        index: usize,
    ) -> IVec2 {
        spawn::place_cell(Self::grid(cfg), rng, |c| {
            world.food.iter().any(|f| f.pos == c)
                || world
                    .obstacles
                    .iter()
                    .enumerate()
                    .any(|(j, o)| j != index && o.pos == c)
        })
    }

    fn trail_positions(&self) -> Vec<IVec2> {
        self.trail.cells()
    }
}

/// Glide mode: an externally tracked head extends an arc-length trail
#[derive(Debug, Clone)]
pub struct TrackedMovement {
    pub trail: GlideTrail,
}

impl Default for TrackedMovement {
    fn default() -> Self {
        Self {
            trail: GlideTrail::new(crate::consts::BASE_LENGTH_BUDGET),
        }
    }
}

impl TrackedMovement {
    fn margin_bounds(cfg: &SimConfig, margin: f32) -> (Vec2, Vec2) {
        (
            Vec2::splat(margin),
            Vec2::new(cfg.arena_width - margin, cfg.arena_height - margin),
        )
    }

    fn item_blocked(&self, world: &World<Vec2>, cfg: &SimConfig, p: Vec2) -> bool {
        let item_half = Vec2::splat(cfg.food_size * 0.5);
        let obstacle_half = Vec2::splat(cfg.obstacle_size * 0.5);
        self.trail.near(p, cfg.head_radius + cfg.food_size * 0.5)
            || world
                .food
                .iter()
                .any(|f| rects_overlap(p, item_half, f.pos, item_half))
            || world
                .decoys
                .iter()
                .any(|d| rects_overlap(p, item_half, d.pos, item_half))
            || world
                .obstacles
                .iter()
                .any(|o| rects_overlap(p, item_half, o.pos, obstacle_half))
    }

    fn obstacle_blocked(
        &self,
        world: &World<Vec2>,
        cfg: &SimConfig,
        p: Vec2,
        skip: Option<usize>,
    ) -> bool {
        let item_half = Vec2::splat(cfg.food_size * 0.5);
        let obstacle_half = Vec2::splat(cfg.obstacle_size * 0.5);
        world
            .food
            .iter()
            .any(|f| rects_overlap(p, obstacle_half, f.pos, item_half))
            || world
                .obstacles
                .iter()
                .enumerate()
                .any(|(j, o)| Some(j) != skip && rects_overlap(p, obstacle_half, o.pos, obstacle_half))
    }
}

impl Movement for TrackedMovement {
    type Pos = Vec2;

    fn reset(&mut self, cfg: &SimConfig) {
        self.trail = GlideTrail::new(cfg.base_length_budget);
    }

    fn starts(&self, input: &TickInput) -> bool {
        input.tracked.is_some()
    }

    fn advance(
        &mut self,
        world: &World<Vec2>,
        cfg: &SimConfig,
        input: &TickInput,
        _dt: f32,
    ) -> TickEvents {
        let mut events = TickEvents::default();
        let Some(head) = input.tracked else {
            return events;
        };
        self.trail.extend(head);
        self.trail.trim();
        events.stepped = true;

        if let Some(i) = collision::glide_food_hit(head, &world.food, cfg) {
            self.trail.grow(cfg.budget_per_food);
            events.food_eaten = Some(i);
        }
        // No self-collision here: a crossing trail is legal in glide mode
        events.game_over = collision::glide_terminal(head, &world.obstacles, cfg);
        events
    }

    fn place_food(&self, world: &World<Vec2>, cfg: &SimConfig, rng: &mut Pcg32) -> Vec2 {
        let (min, max) = Self::margin_bounds(cfg, cfg.food_margin);
        spawn::place_point(min, max, rng, |p| self.item_blocked(world, cfg, p))
    }

    fn place_decoy(&self, world: &World<Vec2>, cfg: &SimConfig, rng: &mut Pcg32) -> Vec2 {
        let (min, max) = Self::margin_bounds(cfg, cfg.food_margin);
        spawn::place_point(min, max, rng, |p| self.item_blocked(world, cfg, p))
    }

    fn place_obstacle(&self, world: &World<Vec2>, cfg: &SimConfig, rng: &mut Pcg32) -> Vec2 {
        let (min, max) = Self::margin_bounds(cfg, cfg.spawn_margin);
        spawn::place_point(min, max, rng, |p| {
            self.trail.near(p, cfg.head_radius + cfg.obstacle_size * 0.5)
                || self.obstacle_blocked(world, cfg, p, None)
        })
    }

    fn relocate_obstacle(
        &self,
        world: &World<Vec2>,
        cfg: &SimConfig,
        rng: &mut Pcg32,
        index: usize,
    ) -> Vec2 {
        let (min, max) = Self::margin_bounds(cfg, cfg.spawn_margin);
        spawn::place_point(min, max, rng, |p| {
            self.obstacle_blocked(world, cfg, p, Some(index))
        })
    }

    fn trail_positions(&self) -> Vec<Vec2> {
        self.trail.points()
    }
}

/// The simulation engine, parameterized over the movement strategy
///
/// Advance it with one [`Simulation::tick`] per rendered frame, passing the
/// real elapsed seconds since the previous call. Single-threaded, exclusively
/// owned by its caller.
#[derive(Debug, Clone)]
pub struct Simulation<M: Movement> {
    pub world: World<M::Pos>,
    pub mode: M,
    pub cfg: SimConfig,
    rng: Pcg32,
}

impl Simulation<GridMovement> {
    pub fn classic(cfg: SimConfig, seed: u64) -> Self {
        Self::new(GridMovement::default(), cfg, seed)
    }
}

impl Simulation<TrackedMovement> {
    pub fn glide(cfg: SimConfig, seed: u64) -> Self {
        Self::new(TrackedMovement::default(), cfg, seed)
    }
}

impl<M: Movement> Simulation<M> {
    pub fn new(mut mode: M, cfg: SimConfig, seed: u64) -> Self {
        let cfg = cfg.sanitized();
        mode.reset(&cfg);
        let world = World::new(cfg.snake_color.clone());
        let mut sim = Self {
            world,
            mode,
            cfg,
            rng: Pcg32::seed_from_u64(seed),
        };
        sim.populate();
        sim
    }

    /// Advance the simulation by one tick
    ///
    /// `dt` is the caller-measured real time since the previous tick, in
    /// seconds. Before the first start signal and after game over this is a
    /// no-op.
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        match self.world.phase {
            GamePhase::GameOver => return,
            GamePhase::NotStarted => {
                if !self.mode.starts(input) {
                    return;
                }
                self.world.phase = GamePhase::Running;
                log::info!("run started");
            }
            GamePhase::Running => {}
        }

        self.world.effects.tick(dt);
        self.refresh(dt);
        let events = self.mode.advance(&self.world, &self.cfg, input, dt);
        self.apply(events);
    }

    /// Return to a fresh spawner-populated world
    ///
    /// The session best and the current snake color survive; everything else
    /// is rebuilt.
    pub fn reset(&mut self) {
        let high_score = self.world.high_score;
        let snake_color = self.world.snake_color.clone();
        self.mode.reset(&self.cfg);
        self.world = World::new(snake_color);
        self.world.high_score = high_score;
        self.populate();
        log::info!("simulation reset, session best {}", high_score);
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<M::Pos> {
        Snapshot {
            phase: self.world.phase,
            trail: self.mode.trail_positions(),
            food: self
                .world
                .food
                .iter()
                .map(|f| FoodView {
                    pos: f.pos,
                    colors: f.colors,
                    bonus: f.bonus,
                })
                .collect(),
            decoys: self
                .world
                .decoys
                .iter()
                .map(|d| DecoyView {
                    pos: d.pos,
                    colors: d.colors,
                })
                .collect(),
            obstacles: self.world.obstacles.iter().map(|o| o.pos).collect(),
            score: self.world.score,
            high_score: self.world.high_score,
            snake_color: self.world.snake_color.clone(),
            effects: self.world.effects.summary(),
            game_over: self.world.game_over,
        }
    }

    fn populate(&mut self) {
        let count = self
            .rng
            .random_range(self.cfg.obstacle_count_min..=self.cfg.obstacle_count_max);
        for _ in 0..count {
            let pos = self.mode.place_obstacle(&self.world, &self.cfg, &mut self.rng);
            self.world.obstacles.push(Obstacle { pos });
        }
        self.regenerate_food();
        self.regenerate_decoys();
        log::debug!(
            "world populated: {} obstacles, {} food, {} decoys",
            self.world.obstacles.len(),
            self.world.food.len(),
            self.world.decoys.len()
        );
    }

    fn regenerate_food(&mut self) {
        self.world.food.clear();
        let count = self
            .rng
            .random_range(self.cfg.food_count_min..=self.cfg.food_count_max);
        for _ in 0..count {
            let pos = self.mode.place_food(&self.world, &self.cfg, &mut self.rng);
            let food = spawn::new_food(pos, &self.cfg, &mut self.rng);
            self.world.food.push(food);
        }
    }

    fn regenerate_decoys(&mut self) {
        self.world.decoys.clear();
        let count = self
            .rng
            .random_range(self.cfg.decoy_count_min..=self.cfg.decoy_count_max);
        for _ in 0..count {
            self.spawn_decoy(self.cfg.bomb_cap_initial);
        }
    }

    /// Keep the decoy pool at its floor
    fn top_up_decoys(&mut self) {
        while self.world.decoys.len() < self.cfg.decoy_floor {
            self.spawn_decoy(self.cfg.bomb_cap_topup);
        }
    }

    fn spawn_decoy(&mut self, bomb_cap: usize) {
        let kind = spawn::draw_decoy_kind(&mut self.rng, self.world.live_bombs(), bomb_cap);
        let pos = self.mode.place_decoy(&self.world, &self.cfg, &mut self.rng);
        let colors = spawn::decoy_colors(&mut self.rng);
        self.world.decoys.push(Decoy { pos, colors, kind });
    }

    /// Periodic regeneration, gated by elapsed time rather than steps
    fn refresh(&mut self, dt: f32) {
        if let Some(period) = self.cfg.food_refresh_secs {
            self.world.food_refresh_timer += dt;
            if self.world.food_refresh_timer >= period {
                self.world.food_refresh_timer = 0.0;
                self.regenerate_food();
                self.regenerate_decoys();
                log::debug!("periodic food and decoy refresh");
            }
        }
        if let Some(period) = self.cfg.obstacle_refresh_secs {
            self.world.obstacle_refresh_timer += dt;
            if self.world.obstacle_refresh_timer >= period {
                self.world.obstacle_refresh_timer = 0.0;
                for i in 0..self.world.obstacles.len() {
                    let pos = self
                        .mode
                        .relocate_obstacle(&self.world, &self.cfg, &mut self.rng, i);
                    self.world.obstacles[i].pos = pos;
                }
                log::debug!("obstacles relocated");
            }
        }
    }

    fn apply(&mut self, events: TickEvents) {
        if let Some(i) = events.food_eaten {
            self.eat_food(i);
        }
        if let Some(i) = events.decoy_eaten {
            self.eat_decoy(i);
        }
        if self.world.score > self.world.high_score {
            self.world.high_score = self.world.score;
        }
        if let Some(reason) = events.game_over {
            self.world.phase = GamePhase::GameOver;
            self.world.game_over = Some(GameOverInfo {
                reason,
                score: self.world.score,
            });
            log::info!("game over: {:?}, final score {}", reason, self.world.score);
        }
    }

    fn eat_food(&mut self, i: usize) {
        if self.world.food[i].bonus {
            self.world.score = if self.world.score == 0 {
                2
            } else {
                self.world.score * 2
            };
            log::debug!("bonus food eaten, score doubled to {}", self.world.score);
        } else {
            self.world.score += 1;
            log::debug!("food eaten, score {}", self.world.score);
        }
        let pos = self.mode.place_food(&self.world, &self.cfg, &mut self.rng);
        self.world.food[i] = spawn::new_food(pos, &self.cfg, &mut self.rng);
    }

    fn eat_decoy(&mut self, i: usize) {
        match self.world.decoys[i].kind {
            // Bombs classify as terminal before reaching here
            DecoyKind::Bomb => {}
            DecoyKind::Recolor => {
                self.world.snake_color =
                    spawn::reroll_snake_color(&mut self.rng, &self.cfg.gradient_names);
                self.world.effects.mark_recolored();
                log::info!("recolor decoy: snake is now {:?}", self.world.snake_color);
            }
            DecoyKind::SpeedUp => {
                self.world
                    .effects
                    .apply(Effect::SpeedUp, self.cfg.speed_up_secs);
                self.world.score += 1;
                log::info!("speed-up decoy, {}s", self.cfg.speed_up_secs);
            }
            DecoyKind::SpeedDown => {
                self.world
                    .effects
                    .apply(Effect::SpeedDown, self.cfg.speed_down_secs);
                self.world.score = self.world.score.saturating_sub(1);
                log::info!("speed-down decoy, {}s", self.cfg.speed_down_secs);
            }
            DecoyKind::Freeze => {
                self.world.effects.apply(Effect::Freeze, self.cfg.freeze_secs);
                log::info!("freeze decoy, {}s", self.cfg.freeze_secs);
            }
            DecoyKind::Inert => {}
        }
        let kind =
            spawn::draw_decoy_kind(&mut self.rng, self.world.live_bombs(), self.cfg.bomb_cap_topup);
        let pos = self.mode.place_decoy(&self.world, &self.cfg, &mut self.rng);
        let colors = spawn::decoy_colors(&mut self.rng);
        self.world.decoys[i] = Decoy { pos, colors, kind };
        self.top_up_decoys();
    }
}
