use glam::{Quat, Vec3};

/// World up. Everything in riftwalk is Z-up, right-handed.
pub const WORLD_UP: Vec3 = Vec3::Z;
/// Heading used whenever a direction degenerates to zero length.
pub const DEFAULT_FORWARD: Vec3 = Vec3::X;

#[inline] pub fn vec3(x: f32, y: f32, z: f32) -> Vec3 { Vec3::new(x, y, z) }
#[inline] pub fn iso(pos: Vec3, rot: Quat) -> Isometry { Isometry { pos, rot } }

/// Rigid world-from-local transform (no scale).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Isometry { pub pos: Vec3, pub rot: Quat }

impl Default for Isometry {
    fn default() -> Self { Self { pos: Vec3::ZERO, rot: Quat::IDENTITY } }
}

impl Isometry {
    #[inline] pub fn transform_point(&self, p: Vec3) -> Vec3 { self.pos + self.rot * p }

    pub fn inverse(&self) -> Self {
        let inv = self.rot.inverse();
        Self { pos: -(inv * self.pos), rot: inv }
    }

    /// World point -> local space of this transform.
    #[inline] pub fn to_local(&self, p: Vec3) -> Vec3 { self.inverse().transform_point(p) }
}

/// `v` projected onto the ground plane and normalised; `None` when it has no horizontal extent.
#[inline]
pub fn horizontal_dir(v: Vec3) -> Option<Vec3> {
    let h = Vec3::new(v.x, v.y, 0.0);
    if h.length_squared() < 1.0e-12 { None } else { Some(h.normalize()) }
}
