//! Rectangle scoring.

use super::{Fit, Placeable, Space};
use crate::shape::{Coord, Point, Rectangle, Rotation};
use crate::skyline::{Segment, Skyline};

/// Scores a `width` x `height` box on the space at `index`.
///
/// Returns `(score, x)` where `x` is the left edge chosen for the box, or
/// `None` if the box is wider than the segment or matches no rule. A box
/// whose width and height exactly match the segment and the taller wall
/// scores 7; see the table in the body for the rest.
pub fn score_rectangle(
    skyline: &Skyline,
    index: usize,
    width: Coord,
    height: Coord,
) -> Option<(i32, Coord)> {
    let space = Space::at(skyline, index);
    if width > space.width {
        return None;
    }

    let exact = width == space.width;
    let narrower = width < space.width;
    let flush_right = space.end() - width;

    let (score, x) = if space.left_wall >= space.right_wall {
        let (hi, lo) = (space.left_wall, space.right_wall);
        let score = if exact && height == hi {
            7
        } else if exact && height == lo {
            6
        } else if exact && height > hi {
            5
        } else if narrower && height == hi {
            4
        } else if exact && height < hi && height > lo {
            3
        } else if narrower && height == lo {
            2
        } else if exact && height < lo {
            1
        } else if narrower && height != hi {
            0
        } else {
            return None;
        };
        // against the lower right wall
        let x = if score == 2 { flush_right } else { space.x };
        (score, x)
    } else {
        let (hi, lo) = (space.right_wall, space.left_wall);
        let score = if exact && height == hi {
            7
        } else if exact && height == lo {
            6
        } else if exact && height > hi {
            5
        } else if narrower && height == hi {
            4
        } else if exact && height < hi && height > lo {
            3
        } else if narrower && height == lo {
            2
        } else if exact && height < lo {
            1
        } else if narrower && height != hi {
            0
        } else {
            return None;
        };
        // the taller wall is on the right
        let x = if score == 4 || score == 0 {
            flush_right
        } else {
            space.x
        };
        (score, x)
    };

    if x + width > skyline.bin_width() {
        return None;
    }
    Some((score, x))
}

impl Placeable for Rectangle {
    fn try_place(&self, skyline: &Skyline, index: usize) -> Option<Fit> {
        let y = skyline.segments()[index].y;
        let mut best: Option<(i32, Coord, Rotation)> = None;

        for rotation in [Rotation::R0, Rotation::R90] {
            let (w, h) = oriented(self, rotation);
            if let Some((score, x)) = score_rectangle(skyline, index, w, h) {
                if best.is_none_or(|(s, _, _)| s < score) {
                    best = Some((score, x, rotation));
                }
            }
        }

        let (score, x, rotation) = best?;
        let (w, h) = oriented(self, rotation);
        let mut next = skyline.clone();
        next.insert_and_merge(&[Segment::new(x, y + h, w)]);
        let delta = next.len() as isize - skyline.len() as isize;
        Some(Fit {
            rotation,
            anchor: Point::new(x, y),
            skyline: next,
            top: y + h,
            score,
            waste: 0,
            delta,
        })
    }
}

fn oriented(rect: &Rectangle, rotation: Rotation) -> (Coord, Coord) {
    match rotation {
        Rotation::R90 | Rotation::R270 => (rect.height, rect.width),
        Rotation::R0 | Rotation::R180 => (rect.width, rect.height),
    }
}
