//! Bubble layout by rejection sampling
//!
//! Candidates are drawn uniformly over the area of the disk the bubble
//! centers may occupy (square-root radial sampling) and kept only if they are
//! at least `min_separation` away from every bubble already placed. A bubble
//! that runs out of attempts is dropped, so a board can come back short.
//!
//! Positions are expressed in normalized arena coordinates: the arena spans
//! [0, 100] on both axes with its center at (50, 50). The separation
//! threshold is measured in those units and does not scale with bubble size.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::Rng;

use super::mode::Mode;
use super::state::{Board, Bubble, IdAllocator};
use crate::consts::*;
use crate::polar_to_cartesian;

/// Center of the arena in normalized coordinates
pub const ARENA_CENTER: Vec2 = Vec2::new(NORMALIZED_HALF_EXTENT, NORMALIZED_HALF_EXTENT);

/// Geometry and budget for one board
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    /// Bubbles requested per board
    pub count: usize,
    /// Arena radius (any unit, e.g. pixels)
    pub arena_radius: f32,
    /// Bubble radius, same unit as `arena_radius`
    pub bubble_radius: f32,
    /// Minimum center distance in normalized units
    pub min_separation: f32,
    /// Candidate draws per bubble before it is dropped
    pub max_attempts: u32,
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::for_arena(NORMALIZED_HALF_EXTENT, BUBBLE_DIAMETER_RATIO)
    }
}

impl LayoutParams {
    /// Standard rules for an arena of `arena_radius` where each bubble's
    /// diameter is `diameter_ratio` of the arena width
    pub fn for_arena(arena_radius: f32, diameter_ratio: f32) -> Self {
        Self {
            count: BUBBLES_PER_BOARD,
            arena_radius,
            bubble_radius: arena_radius * diameter_ratio,
            min_separation: MIN_SEPARATION,
            max_attempts: PLACEMENT_ATTEMPTS,
        }
    }

    /// Multiplier from arena units to normalized units
    pub fn scale(&self) -> f32 {
        if self.arena_radius > 0.0 {
            NORMALIZED_HALF_EXTENT / self.arena_radius
        } else {
            0.0
        }
    }

    /// Largest distance from the center a bubble center may sit, in arena units
    pub fn max_center_distance(&self) -> f32 {
        (self.arena_radius - self.bubble_radius).max(0.0)
    }

    /// Bubble radius in normalized units
    pub fn normalized_bubble_radius(&self) -> f32 {
        self.bubble_radius * self.scale()
    }
}

/// Draw one candidate center, uniform over the allowed disk
pub fn sample_candidate<R: Rng + ?Sized>(params: &LayoutParams, rng: &mut R) -> Vec2 {
    let angle = rng.random::<f32>() * TAU;
    let r = rng.random::<f32>().sqrt() * params.max_center_distance();
    ARENA_CENTER + polar_to_cartesian(r, angle) * params.scale()
}

/// True if `candidate` keeps the separation to every placed center
pub fn is_clear(candidate: Vec2, placed: &[Vec2], min_separation: f32) -> bool {
    placed
        .iter()
        .all(|p| p.distance(candidate) >= min_separation)
}

/// Try to find a position for one more bubble
pub fn find_position<R: Rng + ?Sized>(
    params: &LayoutParams,
    placed: &[Vec2],
    rng: &mut R,
) -> Option<Vec2> {
    (0..params.max_attempts)
        .map(|_| sample_candidate(params, rng))
        .find(|&candidate| is_clear(candidate, placed, params.min_separation))
}

/// Place up to `params.count` non-overlapping centers
pub fn place_positions<R: Rng + ?Sized>(params: &LayoutParams, rng: &mut R) -> Vec<Vec2> {
    let mut placed = Vec::with_capacity(params.count);
    for i in 0..params.count {
        match find_position(params, &placed, rng) {
            Some(pos) => placed.push(pos),
            None => log::debug!(
                "Bubble {} dropped after {} attempts",
                i,
                params.max_attempts
            ),
        }
    }
    placed
}

/// Lay out a full board for `mode`
pub fn place_board<R: Rng + ?Sized>(
    mode: Mode,
    params: &LayoutParams,
    ids: &mut IdAllocator,
    rng: &mut R,
) -> Board {
    let fill_rule = mode.fill_rule();
    let radius = params.normalized_bubble_radius();

    let mut board = Board::new(params.count);
    for pos in place_positions(params, rng) {
        let symbol = mode.random_symbol(rng);
        let fill = fill_rule.fill_for(symbol, rng);
        board
            .bubbles
            .push(Bubble::new(ids.allocate(), symbol, pos, radius, fill));
    }

    if board.len() < params.count {
        log::info!(
            "Board came back short: {} of {} bubbles placed",
            board.len(),
            params.count
        );
    }
    board
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn board_for(seed: u64, mode: Mode, params: &LayoutParams) -> Board {
        let mut rng = Pcg32::seed_from_u64(seed);
        place_board(mode, params, &mut IdAllocator::default(), &mut rng)
    }

    #[test]
    fn test_default_params_match_arena_rules() {
        let params = LayoutParams::default();
        assert_eq!(params.count, 12);
        assert_eq!(params.max_attempts, 80);
        assert_eq!(params.min_separation, 12.0);
        assert!((params.normalized_bubble_radius() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_generous_arena_places_every_bubble() {
        // Tiny bubbles in a large arena leave plenty of room
        let params = LayoutParams {
            bubble_radius: 4.0,
            ..LayoutParams::for_arena(400.0, 0.0)
        };
        for seed in 0..20 {
            let board = board_for(seed, Mode::Letters, &params);
            assert_eq!(board.len(), 12, "seed {seed}");
            assert_eq!(board.requested, 12);
        }
    }

    #[test]
    fn test_scale_invariance() {
        // Same seed, same ratio: arena units do not change normalized output
        let small = LayoutParams::for_arena(50.0, 0.05);
        let large = LayoutParams::for_arena(500.0, 0.05);
        let a = board_for(3, Mode::Digits, &small);
        let b = board_for(3, Mode::Digits, &large);
        assert_eq!(a.len(), b.len());
        for (x, y) in a.bubbles.iter().zip(&b.bubbles) {
            assert!(x.pos.distance(y.pos) < 1e-3);
            assert_eq!(x.symbol, y.symbol);
        }
    }

    #[test]
    fn test_crowded_arena_drops_bubbles() {
        // Separation far larger than the arena: only the first bubble fits
        let params = LayoutParams {
            min_separation: 500.0,
            ..LayoutParams::default()
        };
        let board = board_for(11, Mode::Letters, &params);
        assert_eq!(board.len(), 1);
        assert_eq!(board.requested, 12);
    }

    #[test]
    fn test_bubble_larger_than_arena_collapses_to_center() {
        let params = LayoutParams {
            bubble_radius: 80.0,
            ..LayoutParams::for_arena(50.0, 0.1)
        };
        let board = board_for(5, Mode::Letters, &params);
        assert_eq!(board.len(), 1);
        assert!(board.bubbles[0].pos.distance(ARENA_CENTER) < 1e-4);
    }

    #[test]
    fn test_zero_count_gives_empty_board() {
        let params = LayoutParams {
            count: 0,
            ..LayoutParams::default()
        };
        assert!(board_for(1, Mode::Colors, &params).is_empty());
    }

    #[test]
    fn test_same_seed_same_board() {
        let params = LayoutParams::default();
        let a = board_for(42, Mode::Letters, &params);
        let b = board_for(42, Mode::Letters, &params);
        let sym_a: Vec<_> = a.bubbles.iter().map(|b| (b.symbol, b.pos)).collect();
        let sym_b: Vec<_> = b.bubbles.iter().map(|b| (b.symbol, b.pos)).collect();
        assert_eq!(sym_a, sym_b);
    }

    #[test]
    fn test_is_clear_boundary() {
        let placed = [Vec2::new(50.0, 50.0)];
        assert!(is_clear(Vec2::new(62.0, 50.0), &placed, 12.0));
        assert!(!is_clear(Vec2::new(61.9, 50.0), &placed, 12.0));
        assert!(is_clear(Vec2::new(0.0, 0.0), &[], 12.0));
    }

    proptest! {
        #[test]
        fn prop_board_respects_separation(
            seed in any::<u64>(),
            arena in 20.0f32..1000.0,
            ratio in 0.01f32..0.2,
            mode_idx in 0usize..3,
        ) {
            let mode = Mode::ALL[mode_idx];
            let params = LayoutParams::for_arena(arena, ratio);
            let board = board_for(seed, mode, &params);

            prop_assert!(board.len() <= params.count);
            for (i, a) in board.bubbles.iter().enumerate() {
                prop_assert!(mode.contains(a.symbol));
                // Center stays inside the arena, leaving room for the bubble
                let limit = NORMALIZED_HALF_EXTENT - params.normalized_bubble_radius() + 1e-3;
                prop_assert!(a.pos.distance(ARENA_CENTER) <= limit);
                for b in &board.bubbles[i + 1..] {
                    prop_assert!(a.pos.distance(b.pos) >= MIN_SEPARATION);
                }
            }
        }
    }
}
