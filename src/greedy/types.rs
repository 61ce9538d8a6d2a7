//! Output of a complete construction.

use crate::shape::{Coord, Placement};
use crate::skyline::Skyline;

/// A finished packing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Construction {
    /// Placements in commit order.
    pub placements: Vec<Placement>,
    /// Final skyline.
    pub skyline: Skyline,
    /// Highest point of the final skyline.
    pub height: Coord,
}

impl Construction {
    /// Bin width times packing height.
    pub fn area(&self) -> Coord {
        self.skyline.bin_width() * self.height
    }

    /// Sum of the placed shapes' areas.
    pub fn placed_area(&self) -> Coord {
        self.placements.iter().map(|p| p.shape.area()).sum()
    }

    /// Placed area over bin area, in `[0, 1]`.
    pub fn fill_ratio(&self) -> f64 {
        let area = self.area();
        if area == 0 {
            return 0.0;
        }
        self.placed_area() as f64 / area as f64
    }
}
