//! Construction loop and global best-shape selection.

use super::types::Construction;
use crate::error::{PackError, Result};
use crate::scorer::{Fit, Placeable};
use crate::shape::{Coord, Placement, Shape, ShapeKind};
use crate::skyline::Skyline;

/// The shape chosen for a segment.
#[derive(Debug, Clone)]
pub struct Choice {
    /// Position of the shape within the remaining list.
    pub position: usize,
    /// Index of the shape in the input list.
    pub index: usize,
    pub fit: Fit,
}

/// Best remaining shape for `segment`, or `None` if no shape fits there.
pub fn select_best(
    shapes: &[Shape],
    remaining: &[usize],
    skyline: &Skyline,
    segment: usize,
) -> Option<Choice> {
    let mut best_rect: Option<Choice> = None;
    let mut best_other: Option<Choice> = None;
    // Only L candidates update this; T and U compare on delta alone.
    let mut best_l_waste = Coord::MAX;

    for (position, &index) in remaining.iter().enumerate() {
        let shape = &shapes[index];
        let Some(fit) = shape.try_place(skyline, segment) else {
            continue;
        };
        let choice = Choice {
            position,
            index,
            fit,
        };

        match shape.kind() {
            ShapeKind::Rectangle => {
                if best_rect
                    .as_ref()
                    .is_none_or(|b| b.fit.score < choice.fit.score)
                {
                    best_rect = Some(choice);
                }
            }
            ShapeKind::L => {
                let best_delta = best_other.as_ref().map_or(isize::MAX, |b| b.fit.delta);
                if choice.fit.waste < best_l_waste
                    || (choice.fit.waste == best_l_waste && choice.fit.delta < best_delta)
                {
                    best_l_waste = choice.fit.waste;
                    best_other = Some(choice);
                }
            }
            ShapeKind::T | ShapeKind::Concave => {
                let best_delta = best_other.as_ref().map_or(isize::MAX, |b| b.fit.delta);
                if choice.fit.delta < best_delta {
                    best_other = Some(choice);
                }
            }
        }
    }

    match (best_rect, best_other) {
        (Some(rect), Some(other)) => {
            if shapes[rect.index].area() > shapes[other.index].area() {
                Some(rect)
            } else {
                Some(other)
            }
        }
        (rect, other) => rect.or(other),
    }
}

/// Checks that every shape fits an empty bin of `bin_width` on its own.
///
/// This is the only way a construction can fail without a height bound:
/// filling eventually flattens the profile, and a flat profile accepts
/// exactly the shapes an empty bin accepts.
pub fn ensure_feasible(shapes: &[Shape], bin_width: Coord) -> Result<()> {
    if bin_width <= 0 {
        return Err(PackError::InvalidWidth(bin_width));
    }
    let empty = Skyline::new(bin_width);
    match shapes
        .iter()
        .position(|shape| shape.try_place(&empty, 0).is_none())
    {
        Some(index) => Err(PackError::Infeasible {
            index,
            width: bin_width,
        }),
        None => Ok(()),
    }
}

/// Greedy bottom-left constructor over a fixed shape list.
#[derive(Debug, Clone, Copy)]
pub struct GreedyConstructor<'a> {
    shapes: &'a [Shape],
    height_bound: Option<Coord>,
}

impl<'a> GreedyConstructor<'a> {
    pub fn new(shapes: &'a [Shape]) -> Self {
        Self {
            shapes,
            height_bound: None,
        }
    }

    /// Fails a construction as soon as a placed shape's top exceeds `bound`.
    pub fn with_height_bound(mut self, bound: Option<Coord>) -> Self {
        self.height_bound = bound;
        self
    }

    pub fn shapes(&self) -> &'a [Shape] {
        self.shapes
    }

    /// Packs `order` into an empty bin of `bin_width`.
    pub fn construct(&self, order: &[usize], bin_width: Coord) -> Result<Construction> {
        if bin_width <= 0 {
            return Err(PackError::InvalidWidth(bin_width));
        }
        self.complete(
            Skyline::new(bin_width),
            order.to_vec(),
            Vec::with_capacity(order.len()),
        )
    }

    /// Finishes a partial packing without branching.
    ///
    /// `remaining` gives the order in which shapes are offered to the
    /// scorer; earlier shapes win ties.
    pub fn complete(
        &self,
        mut skyline: Skyline,
        mut remaining: Vec<usize>,
        mut placements: Vec<Placement>,
    ) -> Result<Construction> {
        while !remaining.is_empty() {
            let segment = skyline.lowest();
            let Some(choice) = select_best(self.shapes, &remaining, &skyline, segment) else {
                if !skyline.fill(segment) {
                    // flat profile and still nothing fits: the bin is too narrow
                    return Err(PackError::Infeasible {
                        index: remaining[0],
                        width: skyline.bin_width(),
                    });
                }
                continue;
            };

            remaining.remove(choice.position);
            placements.push(choice.fit.placement(choice.index, self.shapes[choice.index]));
            let top = choice.fit.top;
            skyline = choice.fit.skyline;

            if let Some(bound) = self.height_bound {
                if top > bound {
                    return Err(PackError::HeightBoundExceeded { height: top, bound });
                }
            }
        }

        let height = skyline.height();
        Ok(Construction {
            placements,
            skyline,
            height,
        })
    }
}
