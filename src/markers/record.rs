use serde::{Deserialize, Serialize};

use super::{Rgba, WorldPoint};

/// Identifier of a 64x64 map region; the storage partition key.
pub type RegionId = i32;

/// One marked tile, as stored per region and as written to the export format.
///
/// Optional fields are left out of the serialized form when absent, so an absent
/// label and an empty label survive a round trip as different values.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerRecord {
    pub region_id: RegionId,
    pub region_x: i32,
    pub region_y: i32,
    pub z: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub waves: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<String>>,
}

impl MarkerRecord {
    pub fn new(region_id: RegionId, region_x: i32, region_y: i32, z: i32) -> Self {
        Self {
            region_id,
            region_x,
            region_y,
            z,
            color: None,
            label: None,
            waves: None,
            roles: None,
        }
    }

    /// Build a record for the tile at `point`, partitioned under the point's region.
    pub fn from_world_point(point: WorldPoint) -> Self {
        Self::new(point.region_id(), point.region_x(), point.region_y(), point.plane)
    }

    pub fn with_color(mut self, color: Rgba) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_waves(mut self, waves: Vec<i32>) -> Self {
        self.waves = Some(waves);
        self
    }

    pub fn with_roles(mut self, roles: Vec<String>) -> Self {
        self.roles = Some(roles);
        self
    }

    /// World coordinates of the marked tile.
    pub fn world_point(&self) -> WorldPoint {
        WorldPoint::from_region(self.region_id, self.region_x, self.region_y, self.z)
    }
}
