//! The two trail growth strategies
//!
//! [`GlideTrail`] keeps a continuous point chain under an arc-length budget;
//! [`CellTrail`] keeps a discrete cell list whose length changes only on
//! growth steps. Both store the head first.

use std::collections::VecDeque;

use glam::{IVec2, Vec2};

/// Continuous trail: points plus per-segment lengths under a length budget
///
/// `lengths[i]` is the distance between `points[i]` and `points[i + 1]`, so
/// the oldest segment sits at the back and trimming pops from there.
#[derive(Debug, Clone)]
pub struct GlideTrail {
    points: VecDeque<Vec2>,
    lengths: VecDeque<f32>,
    total: f32,
    budget: f32,
}

impl GlideTrail {
    pub fn new(budget: f32) -> Self {
        Self {
            points: VecDeque::new(),
            lengths: VecDeque::new(),
            total: 0.0,
            budget,
        }
    }

    /// Append a tracked head position, accounting the segment it creates
    ///
    /// The first point creates no segment; its distance to nothing would
    /// otherwise register as a huge jump from the origin.
    pub fn extend(&mut self, point: Vec2) {
        if let Some(&head) = self.points.front() {
            let length = point.distance(head);
            self.lengths.push_front(length);
            self.total += length;
        }
        self.points.push_front(point);
    }

    /// Drop oldest segments until the running total fits the budget
    pub fn trim(&mut self) {
        while self.total > self.budget {
            let Some(length) = self.lengths.pop_back() else {
                break;
            };
            self.total -= length;
            self.points.pop_back();
        }
    }

    /// Raise the budget, e.g. when food is eaten
    pub fn grow(&mut self, amount: f32) {
        self.budget += amount;
    }

    pub fn head(&self) -> Option<Vec2> {
        self.points.front().copied()
    }

    /// Whether any trail point lies within `clearance` of `pos`
    pub fn near(&self, pos: Vec2, clearance: f32) -> bool {
        self.points.iter().any(|p| p.distance(pos) < clearance)
    }

    pub fn total(&self) -> f32 {
        self.total
    }

    pub fn budget(&self) -> f32 {
        self.budget
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Head-first copy of the point chain
    pub fn points(&self) -> Vec<Vec2> {
        self.points.iter().copied().collect()
    }
}

/// Discrete trail: grid cells, head at the front
#[derive(Debug, Clone)]
pub struct CellTrail {
    cells: VecDeque<IVec2>,
}

impl CellTrail {
    /// A length-1 trail at the given cell
    pub fn spawn_at(cell: IVec2) -> Self {
        let mut cells = VecDeque::new();
        cells.push_front(cell);
        Self { cells }
    }

    /// Insert the new head; unless this step grew the snake, drop the tail
    pub fn step(&mut self, head: IVec2, grew: bool) {
        self.cells.push_front(head);
        if !grew {
            self.cells.pop_back();
        }
    }

    pub fn contains(&self, cell: IVec2) -> bool {
        self.cells.contains(&cell)
    }

    pub fn head(&self) -> IVec2 {
        // spawn_at guarantees at least one cell and step never empties it
        self.cells.front().copied().unwrap_or(IVec2::ZERO)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Head-first copy of the cell list
    pub fn cells(&self) -> Vec<IVec2> {
        self.cells.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_glide_first_point_accounts_no_length() {
        let mut trail = GlideTrail::new(150.0);
        trail.extend(Vec2::new(640.0, 360.0));
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.total(), 0.0);
    }

    #[test]
    fn test_glide_trim_pops_oldest() {
        let mut trail = GlideTrail::new(15.0);
        for x in [0.0, 10.0, 20.0, 30.0] {
            trail.extend(Vec2::new(x, 0.0));
        }
        assert_eq!(trail.total(), 30.0);
        trail.trim();
        // Two oldest segments dropped, the (0,0) and (10,0) points with them
        assert_eq!(trail.total(), 10.0);
        assert_eq!(
            trail.points(),
            vec![Vec2::new(30.0, 0.0), Vec2::new(20.0, 0.0)]
        );
        assert_eq!(trail.head(), Some(Vec2::new(30.0, 0.0)));
    }

    #[test]
    fn test_glide_grow_raises_budget() {
        let mut trail = GlideTrail::new(150.0);
        trail.grow(50.0);
        assert_eq!(trail.budget(), 200.0);
    }

    #[test]
    fn test_glide_near() {
        let mut trail = GlideTrail::new(150.0);
        trail.extend(Vec2::new(100.0, 100.0));
        assert!(trail.near(Vec2::new(105.0, 100.0), 10.0));
        assert!(!trail.near(Vec2::new(150.0, 100.0), 10.0));
    }

    #[test]
    fn test_cell_step_without_growth_keeps_length() {
        let mut trail = CellTrail::spawn_at(IVec2::new(5, 5));
        for x in 6..10 {
            trail.step(IVec2::new(x, 5), false);
        }
        assert_eq!(trail.len(), 1);
        assert_eq!(trail.head(), IVec2::new(9, 5));
    }

    #[test]
    fn test_cell_growth_step_adds_exactly_one() {
        let mut trail = CellTrail::spawn_at(IVec2::new(5, 5));
        trail.step(IVec2::new(6, 5), true);
        assert_eq!(trail.len(), 2);
        trail.step(IVec2::new(7, 5), false);
        assert_eq!(trail.len(), 2);
        assert_eq!(trail.cells(), vec![IVec2::new(7, 5), IVec2::new(6, 5)]);
    }

    #[test]
    fn test_cell_contains_covers_tail() {
        let mut trail = CellTrail::spawn_at(IVec2::new(5, 7));
        trail.step(IVec2::new(5, 6), true);
        trail.step(IVec2::new(5, 5), true);
        assert!(trail.contains(IVec2::new(5, 7)));
        assert!(trail.contains(IVec2::new(5, 5)));
        assert!(!trail.contains(IVec2::new(6, 5)));
    }

    proptest! {
        #[test]
        fn arc_length_never_exceeds_budget(
            points in prop::collection::vec((0.0f32..1280.0, 0.0f32..720.0), 1..200),
        ) {
            let mut trail = GlideTrail::new(150.0);
            for (i, &(x, y)) in points.iter().enumerate() {
                trail.extend(Vec2::new(x, y));
                if i % 10 == 9 {
                    trail.grow(50.0);
                }
                trail.trim();
                prop_assert!(trail.total() <= trail.budget() + 1e-3);
            }
        }

        #[test]
        fn cell_length_tracks_growth_steps(grow_flags in prop::collection::vec(any::<bool>(), 1..100)) {
            let mut trail = CellTrail::spawn_at(IVec2::ZERO);
            let mut expected = 1usize;
            for (i, &grew) in grow_flags.iter().enumerate() {
                trail.step(IVec2::new(i as i32 + 1, 0), grew);
                if grew {
                    expected += 1;
                }
                prop_assert_eq!(trail.len(), expected);
            }
        }
    }
}
