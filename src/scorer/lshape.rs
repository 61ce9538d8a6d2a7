//! L-shape scoring.
//!
//! Six candidates, tried in order: 0° flush left, 0° flush right, 270°
//! flush left, 270° flush right, 90° hooked over the right neighbor and
//! 180° hooked over the left neighbor. The two hooked poses may leave a
//! gap under the shape; that gap is the candidate's waste.

use super::{best_by_waste_then_delta, Candidate, Fit, Placeable, Space};
use crate::shape::{LShape, Point, Rotation};
use crate::skyline::{Segment, Skyline};

impl Placeable for LShape {
    fn try_place(&self, skyline: &Skyline, index: usize) -> Option<Fit> {
        let space = Space::at(skyline, index);
        let Space { x, y, width: w, .. } = space;
        let mut candidates = Vec::with_capacity(6);

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

        if self.height <= w {
            candidates.push(Candidate::new(
                Rotation::R270,
                Point::new(x + self.height, y),
                lying_run(self, x, y),
            ));
        }

        if self.height < w {
            let left = x + w - self.height;
            candidates.push(Candidate::new(
                Rotation::R270,
                Point::new(x + w, y),
                lying_run(self, left, y),
            ));
        }

        // Step points down into the segment, the arm rests on the right neighbor.
        if let Some(right) = space.right {
            if self.notch_depth <= right.width && self.step_height <= w {
                let hook = self.arm_width + space.right_wall;
                let rise = self.base_width.max(hook);
                let left = x + w - self.step_height;
                let waste = if self.base_width > hook {
                    (self.base_width - hook) * self.notch_depth
                } else {
                    (hook - self.base_width) * self.step_height
                };
                candidates.push(
                    Candidate::new(
                        Rotation::R90,
                        Point::new(left, y + rise),
                        vec![Segment::new(left, y + rise, self.height)],
                    )
                    .with_waste(waste),
                );
            }
        }

        // Arm points down into the segment, the step rests on the left neighbor.
        if let Some(left_seg) = space.left {
            if self.step_width <= left_seg.width && self.arm_width <= w {
                let hook = self.step_height + space.left_wall;
                let rise = self.height.max(hook);
                let waste = if self.height > hook {
                    (self.height - hook) * self.step_width
                } else {
                    (hook - self.height) * self.arm_width
                };
                candidates.push(
                    Candidate::new(
                        Rotation::R180,
                        Point::new(x + self.arm_width, y + rise),
                        vec![Segment::new(
                            x - self.step_width,
                            y + rise,
                            self.base_width,
                        )],
                    )
                    .with_waste(waste),
                );
            }
        }

        best_by_waste_then_delta(skyline, candidates)
    }
}

/// Profile of the 0° pose with its lower-left corner at `(x, y)`.
fn upright_run(l: &LShape, x: i64, y: i64) -> Vec<Segment> {
    vec![
        Segment::new(x, y + l.height, l.arm_width),
        Segment::new(x + l.arm_width, y + l.step_height, l.step_width),
    ]
}

/// Profile of the 270° pose occupying `[x, x + height)`.
fn lying_run(l: &LShape, x: i64, y: i64) -> Vec<Segment> {
    vec![
        Segment::new(x, y + l.arm_width, l.notch_depth),
        Segment::new(x + l.notch_depth, y + l.base_width, l.step_height),
    ]
}
