//! T-shape scoring.
//!
//! Candidates in order: 0° (stem up) flush left, 0° flush right, 90° with
//! the stem resting on the right neighbor, 180° (stem down) filling the
//! segment exactly, and 270° with the stem resting on the left neighbor.
//! The rotated poses require exact wall matches, so they never waste area.

use super::{best_by_waste_then_delta, Candidate, Fit, Placeable, Space};
use crate::shape::{Point, Rotation, TShape};
use crate::skyline::{Segment, Skyline};

impl Placeable for TShape {
    fn try_place(&self, skyline: &Skyline, index: usize) -> Option<Fit> {
        let space = Space::at(skyline, index);
        let Space { x, y, width: w, .. } = space;
        let stem = self.stem_height();
        let mut candidates = Vec::with_capacity(5);

        if self.base_width <= w {
            candidates.push(Candidate::new(
                Rotation::R0,
                Point::new(x, y),
                upright_run(self, x, y),
            ));
        }

        if self.base_width < w {
            let left = x + w - self.base_width;
            candidates.push(Candidate::new(
                Rotation::R0,
                Point::new(left, y),
                upright_run(self, left, y),
            ));
        }

        if let Some(right) = space.right {
            if self.right_rise <= right.width
                && self.right_width == space.right_wall
                && self.right_height <= w
            {
                let left = x + w - self.right_height;
                let top = y + self.base_width;
                candidates.push(Candidate::new(
                    Rotation::R90,
                    Point::new(left, top),
                    vec![
                        Segment::new(left, top, self.left_height),
                        Segment::new(
                            left + self.left_height,
                            top - self.left_width,
                            self.left_rise,
                        ),
                    ],
                ));
            }
        }

        if let (Some(left_seg), Some(right)) = (space.left, space.right) {
            if self.left_width <= right.width
                && self.right_width <= left_seg.width
                && self.left_rise == space.right_wall
                && self.right_rise == space.left_wall
                && self.stem_width == w
            {
                candidates.push(Candidate::new(
                    Rotation::R180,
                    Point::new(x + self.stem_width + self.left_width, y + stem),
                    vec![Segment::new(x - self.right_width, y + stem, self.base_width)],
                ));
            }
        }

        if let Some(left_seg) = space.left {
            if self.left_rise <= left_seg.width
                && self.left_width == space.left_wall
                && self.left_height <= w
            {
                let left = x - self.left_rise;
                candidates.push(Candidate::new(
                    Rotation::R270,
                    Point::new(x + self.left_height, y),
                    vec![
                        Segment::new(
                            left,
                            y + self.left_width + self.stem_width,
                            self.right_rise,
                        ),
                        Segment::new(
                            left + self.right_rise,
                            y + self.base_width,
                            self.right_height,
                        ),
                    ],
                ));
            }
        }

        best_by_waste_then_delta(skyline, candidates)
    }
}

/// Profile of the 0° pose with its lower-left corner at `(x, y)`.
fn upright_run(t: &TShape, x: i64, y: i64) -> Vec<Segment> {
    let stem_left = x + t.left_width;
    let stem_right = stem_left + t.stem_width;
    vec![
        Segment::new(x, y + t.left_height, t.left_width),
        Segment::new(stem_left, y + t.stem_height(), t.stem_width),
        Segment::new(stem_right, y + t.right_height, t.right_width),
    ]
}
