//! Placed shapes and their outlines in bin coordinates.

use super::types::{Coord, Point, Rotation, Shape};

/// A shape committed to the bin.
///
/// The placement carries its own copy of the shape so that consumers
/// (renderers, recorders) never need the input list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    /// Index of the shape in the input list.
    pub index: usize,
    pub shape: Shape,
    pub rotation: Rotation,
    /// For rectangles, the lower-left corner of the placed box. For L, T and
    /// U shapes, where the 0° lower-left corner lands after rotation.
    pub anchor: Point,
}

impl Placement {
    /// Vertices of the placed polygon, counter-clockwise.
    pub fn outline(&self) -> Vec<Point> {
        if let Shape::Rectangle(r) = self.shape {
            let (w, h) = match self.rotation {
                Rotation::R0 | Rotation::R180 => (r.width, r.height),
                Rotation::R90 | Rotation::R270 => (r.height, r.width),
            };
            let Point { x, y } = self.anchor;
            return vec![
                Point::new(x, y),
                Point::new(x + w, y),
                Point::new(x + w, y + h),
                Point::new(x, y + h),
            ];
        }

        local_outline(&self.shape)
            .into_iter()
            .map(|p| {
                let (dx, dy) = rotate_clockwise(p, self.rotation);
                Point::new(self.anchor.x + dx, self.anchor.y + dy)
            })
            .collect()
    }

    /// Axis-aligned bounding box as `(min, max)` corners.
    pub fn bounds(&self) -> (Point, Point) {
        let outline = self.outline();
        let mut min = Point::new(Coord::MAX, Coord::MAX);
        let mut max = Point::new(Coord::MIN, Coord::MIN);
        for p in outline {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        (min, max)
    }
}

fn rotate_clockwise(p: Point, rotation: Rotation) -> (Coord, Coord) {
    match rotation {
        Rotation::R0 => (p.x, p.y),
        Rotation::R90 => (p.y, -p.x),
        Rotation::R180 => (-p.x, -p.y),
        Rotation::R270 => (-p.y, p.x),
    }
}

/// 0° outline with the lower-left corner at the origin.
fn local_outline(shape: &Shape) -> Vec<Point> {
    match shape {
        Shape::Rectangle(r) => vec![
            Point::new(0, 0),
            Point::new(r.width, 0),
            Point::new(r.width, r.height),
            Point::new(0, r.height),
        ],
        Shape::L(l) => vec![
            Point::new(0, 0),
            Point::new(l.base_width, 0),
            Point::new(l.base_width, l.step_height),
            Point::new(l.arm_width, l.step_height),
            Point::new(l.arm_width, l.height),
            Point::new(0, l.height),
        ],
        Shape::T(t) => {
            let stem_right = t.left_width + t.stem_width;
            vec![
                Point::new(0, 0),
                Point::new(t.base_width, 0),
                Point::new(t.base_width, t.right_height),
                Point::new(stem_right, t.right_height),
                Point::new(stem_right, t.stem_height()),
                Point::new(t.left_width, t.stem_height()),
                Point::new(t.left_width, t.left_height),
                Point::new(0, t.left_height),
            ]
        }
        Shape::Concave(c) => {
            let gap_right = c.left_width + c.gap_width;
            vec![
                Point::new(0, 0),
                Point::new(c.base_width, 0),
                Point::new(c.base_width, c.right_height),
                Point::new(gap_right, c.right_height),
                Point::new(gap_right, c.floor_height()),
                Point::new(c.left_width, c.floor_height()),
                Point::new(c.left_width, c.left_height),
                Point::new(0, c.left_height),
            ]
        }
    }
}

/// Twice the signed area of a polygon (shoelace).
pub fn doubled_signed_area(outline: &[Point]) -> Coord {
    let n = outline.len();
    (0..n)
        .map(|i| {
            let a = outline[i];
            let b = outline[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placed(shape: Shape, rotation: Rotation, anchor: Point) -> Placement {
        Placement {
            index: 0,
            shape,
            rotation,
            anchor,
        }
    }

    #[test]
    fn test_outline_area_matches_shape_area() {
        let shapes = [
            Shape::rectangle(3, 5),
            Shape::l_shape(3, 10, 5, 4),
            Shape::t_shape(2, 3, 4, 5, 9, 6),
            Shape::concave(2, 6, 3, 8, 2, 5),
        ];
        for shape in shapes {
            for rotation in [Rotation::R0, Rotation::R90, Rotation::R180, Rotation::R270] {
                let p = placed(shape, rotation, Point::new(50, 50));
                let doubled = doubled_signed_area(&p.outline());
                assert_eq!(doubled, 2 * shape.area(), "{shape:?} at {rotation:?}");
            }
        }
    }

    #[test]
    fn test_rectangle_rotation_swaps_box() {
        let p = placed(Shape::rectangle(3, 5), Rotation::R90, Point::new(1, 2));
        let (min, max) = p.bounds();
        assert_eq!(min, Point::new(1, 2));
        assert_eq!(max, Point::new(6, 5));
    }

    #[test]
    fn test_l_rotated_270_extends_left_of_anchor() {
        // arm 3 wide and 10 tall, step 5 wide and 4 tall
        let p = placed(Shape::l_shape(3, 10, 5, 4), Rotation::R270, Point::new(10, 0));
        let (min, max) = p.bounds();
        assert_eq!(min, Point::new(0, 0));
        assert_eq!(max, Point::new(10, 8));
    }
}
