//! Skyline profile.
//!
//! The upper boundary of packed material across the bin width, stored as
//! a left-to-right list of horizontal segments. After every public
//! mutation the profile is contiguous, covers exactly `[0, bin_width)`,
//! contains no empty segment and has no two adjacent segments at the same
//! height.

use crate::shape::Coord;

/// One horizontal piece of the skyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub x: Coord,
    pub y: Coord,
    pub width: Coord,
}

impl Segment {
    pub const fn new(x: Coord, y: Coord, width: Coord) -> Self {
        Self { x, y, width }
    }

    /// Right edge (exclusive).
    pub fn end(&self) -> Coord {
        self.x + self.width
    }
}

/// Skyline over a bin of fixed width.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skyline {
    bin_width: Coord,
    segments: Vec<Segment>,
}

impl Skyline {
    /// Empty bin: a single segment at height zero.
    pub fn new(bin_width: Coord) -> Self {
        Self {
            bin_width,
            segments: vec![Segment::new(0, 0, bin_width)],
        }
    }

    /// Builds a profile from explicit segments, merging equal neighbors.
    ///
    /// Fails if the segments are not contiguous from zero or contain an
    /// empty piece.
    pub fn from_segments(segments: Vec<Segment>) -> Result<Self, String> {
        let bin_width = segments.last().map(Segment::end).unwrap_or(0);
        let mut skyline = Self {
            bin_width,
            segments,
        };
        skyline.merge();
        skyline.check_invariants()?;
        Ok(skyline)
    }

    pub fn bin_width(&self) -> Coord {
        self.bin_width
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Index of the lowest segment; the leftmost one on ties.
    pub fn lowest(&self) -> usize {
        let mut best = 0;
        for (i, seg) in self.segments.iter().enumerate().skip(1) {
            if seg.y < self.segments[best].y {
                best = i;
            }
        }
        best
    }

    /// Highest point of the profile.
    pub fn height(&self) -> Coord {
        self.segments.iter().map(|s| s.y).max().unwrap_or(0)
    }

    /// Overlays a contiguous run of new segments and merges.
    ///
    /// The run replaces whatever the profile held over its x-interval,
    /// trimming the segments it partially covers. Placing a shape always
    /// raises the profile, so the run lies on or above what it replaces.
    pub fn insert_and_merge(&mut self, run: &[Segment]) {
        let (Some(first), Some(last)) = (run.first(), run.last()) else {
            return;
        };
        let start = first.x;
        let end = last.end();
        debug_assert!(start >= 0 && end <= self.bin_width, "run outside the bin");
        debug_assert!(
            run.windows(2).all(|w| w[0].end() == w[1].x),
            "run is not contiguous"
        );

        let mut out = Vec::with_capacity(self.segments.len() + run.len() + 1);
        for seg in &self.segments {
            if seg.x < start {
                let right = seg.end().min(start);
                out.push(Segment::new(seg.x, seg.y, right - seg.x));
            }
        }
        out.extend_from_slice(run);
        for seg in &self.segments {
            if seg.end() > end {
                let left = seg.x.max(end);
                out.push(Segment::new(left, seg.y, seg.end() - left));
            }
        }

        self.segments = out;
        self.merge();
    }

    /// Raises an unusable segment to its lower neighbor and merges.
    ///
    /// At either edge the single neighbor is used. Only a pit can be
    /// filled: returns `false` and leaves the profile untouched when the
    /// target is not above the segment, which includes a flat profile.
    pub fn fill(&mut self, index: usize) -> bool {
        let n = self.segments.len();
        if n < 2 || index >= n {
            return false;
        }

        let target = if index == 0 {
            self.segments[1].y
        } else if index == n - 1 {
            self.segments[n - 2].y
        } else {
            self.segments[index - 1].y.min(self.segments[index + 1].y)
        };
        if target <= self.segments[index].y {
            return false;
        }
        self.segments[index].y = target;
        self.merge();
        true
    }

    /// Drops empty segments and joins equal-height neighbors.
    fn merge(&mut self) {
        self.segments.retain(|s| s.width > 0);
        let mut merged: Vec<Segment> = Vec::with_capacity(self.segments.len());
        for seg in self.segments.drain(..) {
            match merged.last_mut() {
                Some(prev) if prev.y == seg.y => prev.width += seg.width,
                _ => merged.push(seg),
            }
        }
        self.segments = merged;
    }

    /// Verifies contiguity, coverage and the merged form.
    pub fn check_invariants(&self) -> Result<(), String> {
        let Some(first) = self.segments.first() else {
            return Err("skyline has no segments".into());
        };
        if first.x != 0 {
            return Err(format!("first segment starts at {}", first.x));
        }
        for seg in &self.segments {
            if seg.width <= 0 {
                return Err(format!("empty segment at x={}", seg.x));
            }
        }
        for w in self.segments.windows(2) {
            if w[0].end() != w[1].x {
                return Err(format!("gap or overlap at x={}", w[0].end()));
            }
            if w[0].y == w[1].y {
                return Err(format!("unmerged neighbors at x={}", w[1].x));
            }
        }
        let total: Coord = self.segments.iter().map(|s| s.width).sum();
        if total != self.bin_width {
            return Err(format!(
                "segments cover {total}, bin width is {}",
                self.bin_width
            ));
        }
        Ok(())
    }
}
