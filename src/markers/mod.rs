//! Tile marker data model.
//!
//! A [`MarkerRecord`] is the unit that gets stored, exported and imported. Records
//! are partitioned by their region id; two records are the same marker exactly when
//! every field compares equal, optional ones included.
//!
//! ## Module Structure
//!
//! - [`record`] - The serializable marker record
//! - [`color`] - `#AARRGGBB` color value used by records
//! - [`world`] - Conversion between region-local and world coordinates

mod color;
mod record;
mod world;


pub use color::{ParseColorError, Rgba};
pub use record::{MarkerRecord, RegionId};
pub use world::WorldPoint;
