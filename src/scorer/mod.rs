//! Shape placement scorer.
//!
//! Given a skyline and the index of a target segment, each shape family
//! enumerates its admissible rotations and alignments, materializes the
//! skyline each one would produce and returns the best as a [`Fit`].
//! Nothing here mutates the input skyline; a failed attempt is `None`.
//!
//! Ranking differs per family:
//! - rectangles use a closed-form score in `0..=7` (higher wins),
//! - L shapes minimize wasted area first, then the segment-count delta,
//! - T and U shapes minimize the segment-count delta only.
//!
//! Ties keep the first candidate in evaluation order.

mod concave;
mod lshape;
mod rectangle;
mod tshape;

use crate::shape::{Coord, Placement, Point, Rotation, Shape};
use crate::skyline::{Segment, Skyline};

pub use rectangle::score_rectangle;

/// Wall height reported for an open bin edge.
pub const OPEN_WALL: Coord = Coord::MAX / 4;

/// The outcome of placing one shape on one skyline segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fit {
    pub rotation: Rotation,
    pub anchor: Point,
    /// Skyline after the placement.
    pub skyline: Skyline,
    /// Top edge of the placed shape.
    pub top: Coord,
    /// Rectangle score in `0..=7`; zero for the other families.
    pub score: i32,
    /// Area left unusable under the shape (L shapes only).
    pub waste: Coord,
    /// Segment count after minus segment count before.
    pub delta: isize,
}

impl Fit {
    pub fn placement(&self, index: usize, shape: Shape) -> Placement {
        Placement {
            index,
            shape,
            rotation: self.rotation,
            anchor: self.anchor,
        }
    }
}

/// Capability implemented once per shape family.
pub trait Placeable {
    /// Best admissible placement on `skyline.segments()[index]`, if any.
    fn try_place(&self, skyline: &Skyline, index: usize) -> Option<Fit>;
}

impl Placeable for Shape {
    fn try_place(&self, skyline: &Skyline, index: usize) -> Option<Fit> {
        match self {
            Shape::Rectangle(r) => r.try_place(skyline, index),
            Shape::L(l) => l.try_place(skyline, index),
            Shape::T(t) => t.try_place(skyline, index),
            Shape::Concave(c) => c.try_place(skyline, index),
        }
    }
}

/// Target segment plus the relative heights of the walls around it.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Space {
    pub x: Coord,
    pub y: Coord,
    pub width: Coord,
    /// Left neighbor height above this segment, or [`OPEN_WALL`].
    pub left_wall: Coord,
    /// Right neighbor height above this segment, or [`OPEN_WALL`].
    pub right_wall: Coord,
    pub left: Option<Segment>,
    pub right: Option<Segment>,
}

impl Space {
    pub fn at(skyline: &Skyline, index: usize) -> Self {
        let segments = skyline.segments();
        let seg = segments[index];
        let left = index.checked_sub(1).map(|i| segments[i]);
        let right = segments.get(index + 1).copied();
        Self {
            x: seg.x,
            y: seg.y,
            width: seg.width,
            left_wall: left.map_or(OPEN_WALL, |l| l.y - seg.y),
            right_wall: right.map_or(OPEN_WALL, |r| r.y - seg.y),
            left,
            right,
        }
    }

    pub fn end(&self) -> Coord {
        self.x + self.width
    }
}

/// One rotation/alignment before its skyline is materialized.
pub(crate) struct Candidate {
    pub rotation: Rotation,
    pub anchor: Point,
    /// New profile over the x-interval the shape occupies.
    pub run: Vec<Segment>,
    pub waste: Coord,
}

impl Candidate {
    pub fn new(rotation: Rotation, anchor: Point, run: Vec<Segment>) -> Self {
        Self {
            rotation,
            anchor,
            run,
            waste: 0,
        }
    }

    pub fn with_waste(mut self, waste: Coord) -> Self {
        self.waste = waste;
        self
    }

    fn realize(self, skyline: &Skyline) -> Fit {
        let mut next = skyline.clone();
        next.insert_and_merge(&self.run);
        let top = self.run.iter().map(|s| s.y).max().unwrap_or(0);
        let delta = next.len() as isize - skyline.len() as isize;
        Fit {
            rotation: self.rotation,
            anchor: self.anchor,
            skyline: next,
            top,
            score: 0,
            waste: self.waste,
            delta,
        }
    }
}

/// Materializes every candidate and keeps the lowest `(waste, delta)`.
pub(crate) fn best_by_waste_then_delta(
    skyline: &Skyline,
    candidates: impl IntoIterator<Item = Candidate>,
) -> Option<Fit> {
    let mut best: Option<Fit> = None;
    for candidate in candidates {
        let fit = candidate.realize(skyline);
        let better = best
            .as_ref()
            .is_none_or(|b| (fit.waste, fit.delta) < (b.waste, b.delta));
        if better {
            best = Some(fit);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_space_walls() {
        let skyline = Skyline::from_segments(vec![
            Segment::new(0, 6, 4),
            Segment::new(4, 2, 5),
            Segment::new(9, 5, 6),
        ])
        .unwrap();

        let mid = Space::at(&skyline, 1);
        assert_eq!((mid.left_wall, mid.right_wall), (4, 3));

        let first = Space::at(&skyline, 0);
        assert_eq!(first.left_wall, OPEN_WALL);
        assert_eq!(first.right_wall, -4);

        let flat = Space::at(&Skyline::new(10), 0);
        assert_eq!((flat.left_wall, flat.right_wall), (OPEN_WALL, OPEN_WALL));
    }

    #[test]
    fn test_try_place_does_not_mutate() {
        let skyline = Skyline::new(10);
        let before = skyline.clone();
        let fit = Shape::l_shape(3, 6, 4, 2).try_place(&skyline, 0);
        assert!(fit.is_some());
        assert_eq!(skyline, before);
    }
}
