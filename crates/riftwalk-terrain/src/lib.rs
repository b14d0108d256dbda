//! Collidable ground surfaces and the downward ray query used to plant feet.

pub mod aabb;
pub mod error;
pub mod heightfield;
pub mod mesh;
pub mod query;
pub mod surface;

pub use aabb::Aabb;
pub use error::TerrainError;
pub use heightfield::HeightField;
pub use mesh::{TriMesh, Displacement};
pub use query::{GroundQuery, CAST_MARGIN};
pub use surface::{Surface, Terrain};
