//! Shape model.
//!
//! Immutable descriptors for the four supported rectilinear families
//! (rectangle, L, T and concave U), plus the [`Placement`] record produced
//! when a shape is committed to the bin.

mod placement;
mod types;

pub use placement::{doubled_signed_area, Placement};
pub use types::{
    total_area, validate_shapes, Concave, Coord, LShape, Point, Rectangle, Rotation, Shape,
    ShapeKind, TShape,
};
