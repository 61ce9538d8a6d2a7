//! U-shape scoring. Only the opening-up pose is used, flush left or right.

use super::{best_by_waste_then_delta, Candidate, Fit, Placeable, Space};
use crate::shape::{Concave, Point, Rotation};
use crate::skyline::{Segment, Skyline};

impl Placeable for Concave {
    fn try_place(&self, skyline: &Skyline, index: usize) -> Option<Fit> {
        let Space { x, y, width: w, .. } = Space::at(skyline, index);
        let mut candidates = Vec::with_capacity(2);

        if self.base_width <= w {
            candidates.push(Candidate::new(
                Rotation::R0,
                Point::new(x, y),
                open_up_run(self, x, y),
            ));
        }
        if self.base_width < w {
            let left = x + w - self.base_width;
            candidates.push(Candidate::new(
                Rotation::R0,
                Point::new(left, y),
                open_up_run(self, left, y),
            ));
        }

        best_by_waste_then_delta(skyline, candidates)
    }
}

fn open_up_run(c: &Concave, x: i64, y: i64) -> Vec<Segment> {
    let gap_left = x + c.left_width;
    let gap_right = gap_left + c.gap_width;
    vec![
        Segment::new(x, y + c.left_height, c.left_width),
        Segment::new(gap_left, y + c.floor_height(), c.gap_width),
        Segment::new(gap_right, y + c.right_height, c.right_width),
    ]
}
