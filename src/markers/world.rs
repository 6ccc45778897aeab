//! World coordinates and their region decomposition.
//!
//! The world is cut into 64x64 tile regions. A region id packs the region's column
//! into the high byte and its row into the low byte.

use std::fmt;

use super::RegionId;

const REGION_SHIFT: i32 = 6;
const REGION_MASK: i32 = (1 << REGION_SHIFT) - 1;

/// A tile in world space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WorldPoint {
    pub x: i32,
    pub y: i32,
    pub plane: i32,
}

impl WorldPoint {
    pub const fn new(x: i32, y: i32, plane: i32) -> Self {
        Self { x, y, plane }
    }

    /// Resolve region-local coordinates into world space.
    pub fn from_region(region_id: RegionId, region_x: i32, region_y: i32, plane: i32) -> Self {
        Self {
            x: ((region_id >> 8) << REGION_SHIFT) + region_x,
            y: ((region_id & 0xFF) << REGION_SHIFT) + region_y,
            plane,
        }
    }

    pub fn region_id(&self) -> RegionId {
        ((self.x >> REGION_SHIFT) << 8) | (self.y >> REGION_SHIFT)
    }

    pub fn region_x(&self) -> i32 {
        self.x & REGION_MASK
    }

    pub fn region_y(&self) -> i32 {
        self.y & REGION_MASK
    }
}

impl fmt::Display for WorldPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.plane)
    }
}
