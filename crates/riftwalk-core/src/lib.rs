pub mod axis;
pub mod hash;
pub mod ids;
pub mod scalar;
pub mod types;

pub use axis::Axis;
pub use hash::{StepHasher, hash_vec3, hash_quat, hex32};
pub use ids::{FootId, Side};
pub use scalar::wrap01;
pub use types::{Isometry, vec3, iso, horizontal_dir, WORLD_UP, DEFAULT_FORWARD};
pub use glam::{Quat, Vec2, Vec3};
