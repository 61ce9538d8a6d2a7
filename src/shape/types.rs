//! Shape descriptors for the four supported families.

use crate::error::PackError;

/// Integer coordinate / length type used throughout the engine.
pub type Coord = i64;

/// A point in bin coordinates (x to the right, y upward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: Coord,
    pub y: Coord,
}

impl Point {
    pub const fn new(x: Coord, y: Coord) -> Self {
        Self { x, y }
    }
}

/// Clockwise rotation by a multiple of 90°.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    #[default]
    R0,
    R90,
    R180,
    R270,
}

impl Rotation {
    /// Rotation angle in degrees.
    pub fn degrees(self) -> u16 {
        match self {
            Rotation::R0 => 0,
            Rotation::R90 => 90,
            Rotation::R180 => 180,
            Rotation::R270 => 270,
        }
    }
}

/// Family tag of a [`Shape`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeKind {
    Rectangle,
    L,
    T,
    Concave,
}

/// Axis-aligned rectangle. Allowed rotations: 0° and 90° (swapped sides).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rectangle {
    pub width: Coord,
    pub height: Coord,
}

impl Rectangle {
    pub fn new(width: Coord, height: Coord) -> Self {
        Self { width, height }
    }
}

/// L shape. At 0° the full-height arm stands on the left of the base:
///
/// ```text
///  +----+
///  |    |          arm_width  = width of the tall arm
///  |    +-----+    step_width = width of the low step
///  |          |    height     = arm height, step_height = step height
///  +----------+
/// ```
///
/// `base_width = arm_width + step_width` and `height = notch_depth + step_height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LShape {
    pub base_width: Coord,
    pub arm_width: Coord,
    pub step_width: Coord,
    pub height: Coord,
    pub notch_depth: Coord,
    pub step_height: Coord,
}

impl LShape {
    pub fn new(arm_width: Coord, height: Coord, step_width: Coord, step_height: Coord) -> Self {
        Self {
            base_width: arm_width + step_width,
            arm_width,
            step_width,
            height,
            notch_depth: height - step_height,
            step_height,
        }
    }
}

/// T shape. At 0° it stands upside down: a wide base with a raised stem.
///
/// ```text
///       +----+
///  +----+    |          left/stem/right widths along the base
///  |         +----+     left_height, stem_height, right_height measured
///  |              |     from the base line
///  +--------------+
/// ```
///
/// `left_rise = stem_height - left_height`, `right_rise = stem_height - right_height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TShape {
    pub base_width: Coord,
    pub left_width: Coord,
    pub stem_width: Coord,
    pub right_width: Coord,
    pub left_height: Coord,
    pub left_rise: Coord,
    pub right_rise: Coord,
    pub right_height: Coord,
}

impl TShape {
    pub fn new(
        left_width: Coord,
        stem_width: Coord,
        right_width: Coord,
        left_height: Coord,
        stem_height: Coord,
        right_height: Coord,
    ) -> Self {
        Self {
            base_width: left_width + stem_width + right_width,
            left_width,
            stem_width,
            right_width,
            left_height,
            left_rise: stem_height - left_height,
            right_rise: stem_height - right_height,
            right_height,
        }
    }

    pub fn stem_height(&self) -> Coord {
        self.left_height + self.left_rise
    }
}

/// U shape (concave). At 0° the opening faces up.
///
/// ```text
///  +--+       +--+
///  |  |       |  |      left/gap/right widths along the base
///  |  +-------+  |      floor_height = height of the gap floor
///  |             |
///  +-------------+
/// ```
///
/// `left_depth = left_height - floor`, `right_depth = right_height - floor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Concave {
    pub base_width: Coord,
    pub left_width: Coord,
    pub gap_width: Coord,
    pub right_width: Coord,
    pub left_height: Coord,
    pub left_depth: Coord,
    pub right_depth: Coord,
    pub right_height: Coord,
}

impl Concave {
    pub fn new(
        left_width: Coord,
        gap_width: Coord,
        right_width: Coord,
        left_height: Coord,
        floor_height: Coord,
        right_height: Coord,
    ) -> Self {
        Self {
            base_width: left_width + gap_width + right_width,
            left_width,
            gap_width,
            right_width,
            left_height,
            left_depth: left_height - floor_height,
            right_depth: right_height - floor_height,
            right_height,
        }
    }

    pub fn floor_height(&self) -> Coord {
        self.left_height - self.left_depth
    }
}

/// A shape to be packed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Shape {
    Rectangle(Rectangle),
    L(LShape),
    T(TShape),
    Concave(Concave),
}

impl Shape {
    pub fn rectangle(width: Coord, height: Coord) -> Self {
        Shape::Rectangle(Rectangle::new(width, height))
    }

    pub fn l_shape(arm_width: Coord, height: Coord, step_width: Coord, step_height: Coord) -> Self {
        Shape::L(LShape::new(arm_width, height, step_width, step_height))
    }

    pub fn t_shape(
        left_width: Coord,
        stem_width: Coord,
        right_width: Coord,
        left_height: Coord,
        stem_height: Coord,
        right_height: Coord,
    ) -> Self {
        Shape::T(TShape::new(
            left_width,
            stem_width,
            right_width,
            left_height,
            stem_height,
            right_height,
        ))
    }

    pub fn concave(
        left_width: Coord,
        gap_width: Coord,
        right_width: Coord,
        left_height: Coord,
        floor_height: Coord,
        right_height: Coord,
    ) -> Self {
        Shape::Concave(Concave::new(
            left_width,
            gap_width,
            right_width,
            left_height,
            floor_height,
            right_height,
        ))
    }

    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::L(_) => ShapeKind::L,
            Shape::T(_) => ShapeKind::T,
            Shape::Concave(_) => ShapeKind::Concave,
        }
    }

    /// Area of the shape.
    pub fn area(&self) -> Coord {
        match self {
            Shape::Rectangle(r) => r.width * r.height,
            Shape::L(l) => l.arm_width * l.height + l.step_width * l.step_height,
            Shape::T(t) => {
                t.left_width * t.left_height
                    + t.stem_width * t.stem_height()
                    + t.right_width * t.right_height
            }
            Shape::Concave(c) => {
                c.left_width * c.left_height
                    + c.gap_width * c.floor_height()
                    + c.right_width * c.right_height
            }
        }
    }

    /// Longest side of the 0° bounding box.
    pub fn max_length(&self) -> Coord {
        match self {
            Shape::Rectangle(r) => r.width.max(r.height),
            Shape::L(l) => l.base_width.max(l.height),
            Shape::T(t) => t.base_width.max(t.stem_height()),
            Shape::Concave(c) => c.base_width.max(c.left_height).max(c.right_height),
        }
    }

    /// Checks that every edge is positive and the heights are consistent.
    pub fn validate(&self) -> Result<(), String> {
        fn positive(name: &str, value: Coord) -> Result<(), String> {
            if value <= 0 {
                return Err(format!("{name} must be positive, got {value}"));
            }
            Ok(())
        }

        match self {
            Shape::Rectangle(r) => {
                positive("width", r.width)?;
                positive("height", r.height)
            }
            Shape::L(l) => {
                positive("arm_width", l.arm_width)?;
                positive("step_width", l.step_width)?;
                positive("step_height", l.step_height)?;
                positive("notch_depth", l.notch_depth)?;
                if l.base_width != l.arm_width + l.step_width
                    || l.height != l.notch_depth + l.step_height
                {
                    return Err("L edges do not close".into());
                }
                Ok(())
            }
            Shape::T(t) => {
                positive("left_width", t.left_width)?;
                positive("stem_width", t.stem_width)?;
                positive("right_width", t.right_width)?;
                positive("left_height", t.left_height)?;
                positive("right_height", t.right_height)?;
                positive("left_rise", t.left_rise)?;
                positive("right_rise", t.right_rise)?;
                if t.base_width != t.left_width + t.stem_width + t.right_width
                    || t.left_height + t.left_rise != t.right_height + t.right_rise
                {
                    return Err("T edges do not close".into());
                }
                Ok(())
            }
            Shape::Concave(c) => {
                positive("left_width", c.left_width)?;
                positive("gap_width", c.gap_width)?;
                positive("right_width", c.right_width)?;
                positive("floor_height", c.floor_height())?;
                positive("left_depth", c.left_depth)?;
                positive("right_depth", c.right_depth)?;
                if c.base_width != c.left_width + c.gap_width + c.right_width
                    || c.left_height - c.left_depth != c.right_height - c.right_depth
                {
                    return Err("U edges do not close".into());
                }
                Ok(())
            }
        }
    }
}

/// Validates every shape of an instance, reporting the first bad index.
pub fn validate_shapes(shapes: &[Shape]) -> Result<(), PackError> {
    for (index, shape) in shapes.iter().enumerate() {
        shape
            .validate()
            .map_err(|reason| PackError::InvalidShape { index, reason })?;
    }
    Ok(())
}

/// Sum of all shape areas.
pub fn total_area(shapes: &[Shape]) -> Coord {
    shapes.iter().map(Shape::area).sum()
}
