//! Beam search tree nodes.

use crate::scorer::{Fit, Placeable};
use crate::shape::{Coord, Placement, Shape};
use crate::skyline::Skyline;

/// A node of the search tree: shapes placed so far and the ones left.
///
/// Every node owns its skyline, so siblings never observe each other's
/// trial placements or fills.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartialSolution {
    pub skyline: Skyline,
    /// Placements in commit order.
    pub placements: Vec<Placement>,
    /// Shapes still to place, in the order they are offered.
    pub remaining: Vec<usize>,
    /// Highest shape top placed so far.
    pub current_height: Coord,
    /// Sum of the placed shapes' areas.
    pub placed_area: Coord,
    /// `placed_area / (current_height * bin_width)`, in `[0, 1]`.
    pub area_percentage: f64,
    /// Height reached by greedily completing this node; `Coord::MAX` until
    /// evaluated.
    pub future_height: Coord,
}

impl PartialSolution {
    /// An empty bin with `remaining` left to place.
    pub fn empty(bin_width: Coord, remaining: Vec<usize>) -> Self {
        Self {
            skyline: Skyline::new(bin_width),
            placements: Vec::with_capacity(remaining.len()),
            remaining,
            current_height: 0,
            placed_area: 0,
            area_percentage: 0.0,
            future_height: Coord::MAX,
        }
    }

    /// Places `order[position]` alone on an empty bin; the rest of `order`
    /// stays remaining. `None` if the shape does not fit the bin.
    pub fn start(
        shapes: &[Shape],
        order: &[usize],
        position: usize,
        bin_width: Coord,
    ) -> Option<Self> {
        let mut node = Self::empty(bin_width, order.to_vec());
        let index = node.remaining.remove(position);
        let fit = shapes[index].try_place(&node.skyline, 0)?;
        node.commit(shapes, index, fit);
        Some(node)
    }

    pub fn is_complete(&self) -> bool {
        self.remaining.is_empty()
    }

    pub fn bin_width(&self) -> Coord {
        self.skyline.bin_width()
    }

    /// Tries `remaining[position]` on the lowest segment.
    ///
    /// If it does not fit, the child is the parent with that segment
    /// filled instead. `None` only when there is nothing to fill.
    pub fn child(&self, shapes: &[Shape], position: usize) -> Option<Self> {
        let mut child = self.clone();
        child.future_height = Coord::MAX;

        let segment = child.skyline.lowest();
        let index = child.remaining[position];
        match shapes[index].try_place(&child.skyline, segment) {
            Some(fit) => {
                child.remaining.remove(position);
                child.commit(shapes, index, fit);
            }
            None => {
                if !child.skyline.fill(segment) {
                    return None;
                }
            }
        }
        Some(child)
    }

    fn commit(&mut self, shapes: &[Shape], index: usize, fit: Fit) {
        let shape = shapes[index];
        self.placements.push(fit.placement(index, shape));
        self.placed_area += shape.area();
        self.current_height = self.current_height.max(fit.top);
        self.skyline = fit.skyline;
        self.area_percentage = utilization(self.placed_area, self.current_height, self.bin_width());
    }
}

fn utilization(placed: Coord, height: Coord, width: Coord) -> f64 {
    if height <= 0 || width <= 0 {
        return 0.0;
    }
    placed as f64 / (height as f64 * width as f64)
}
