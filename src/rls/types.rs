//! Sort rules and the neighborhood moves applied to them.

use crate::shape::{Coord, Shape};
use rand::Rng;
use std::cmp::Reverse;

/// A placement ordering and the best bin area it has produced.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SortRule {
    /// Permutation of shape indices.
    pub sequence: Vec<usize>,
    /// `bin_width * height` of the construction, or `Coord::MAX` if the
    /// ordering has not produced a feasible construction.
    pub target_area: Coord,
}

impl SortRule {
    pub fn new(sequence: Vec<usize>) -> Self {
        Self {
            sequence,
            target_area: Coord::MAX,
        }
    }

    /// The four seed rules: input order, area descending, longest edge
    /// descending and a random shuffle.
    pub fn seeds<R: Rng>(shapes: &[Shape], rng: &mut R) -> Vec<SortRule> {
        let input: Vec<usize> = (0..shapes.len()).collect();

        let mut by_area = input.clone();
        by_area.sort_by_key(|&i| Reverse(shapes[i].area()));

        let mut by_length = input.clone();
        by_length.sort_by_key(|&i| Reverse(shapes[i].max_length()));

        let mut shuffled = input.clone();
        crate::random::shuffle(&mut shuffled, rng);

        [input, by_area, by_length, shuffled]
            .into_iter()
            .map(SortRule::new)
            .collect()
    }

    /// Swaps two distinct positions. No-op for fewer than two shapes.
    pub fn swap_move<R: Rng>(&mut self, rng: &mut R) {
        let n = self.sequence.len();
        if n < 2 {
            return;
        }
        let a = rng.random_range(0..n);
        let mut b = rng.random_range(0..n);
        while a == b {
            b = rng.random_range(0..n);
        }
        self.sequence.swap(a, b);
    }

    /// Rotates the sequence left by a uniform offset in `[0, n)`.
    pub fn rotate_move<R: Rng>(&mut self, rng: &mut R) {
        let n = self.sequence.len();
        if n == 0 {
            return;
        }
        let offset = rng.random_range(0..n);
        self.sequence.rotate_left(offset);
    }
}

/// Neighborhood move applied to a picked rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Move {
    Swap,
    Rotate,
}

impl Move {
    /// Every fourth round rotates; all other rounds swap.
    pub(crate) fn for_round(round: usize) -> Self {
        if round.is_multiple_of(4) {
            Move::Rotate
        } else {
            Move::Swap
        }
    }

    pub(crate) fn apply<R: Rng>(self, rule: &mut SortRule, rng: &mut R) {
        match self {
            Move::Swap => rule.swap_move(rng),
            Move::Rotate => rule.rotate_move(rng),
        }
    }
}

/// Orders rules worst first, so the heavier tail of the selection weights
/// lands on the best rules. Stable on equal areas.
pub(crate) fn sort_worst_first(rules: &mut [SortRule]) {
    rules.sort_by_key(|rule| Reverse(rule.target_area));
}

/// Selection weights `2, 4, 6, ...` by position.
pub(crate) fn rank_weights(len: usize) -> Vec<u64> {
    (1..=len as u64).map(|rank| 2 * rank).collect()
}
