use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Signed body axis, used to say which local axis of a rig faces forward / up.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    #[serde(rename = "+X")] PosX,
    #[serde(rename = "-X")] NegX,
    #[serde(rename = "+Y")] PosY,
    #[serde(rename = "-Y")] NegY,
    #[serde(rename = "+Z")] PosZ,
    #[serde(rename = "-Z")] NegZ,
}

impl Axis {
    #[inline]
    pub fn vector(self) -> Vec3 {
        match self {
            Axis::PosX => Vec3::X,
            Axis::NegX => Vec3::NEG_X,
            Axis::PosY => Vec3::Y,
            Axis::NegY => Vec3::NEG_Y,
            Axis::PosZ => Vec3::Z,
            Axis::NegZ => Vec3::NEG_Z,
        }
    }

    /// Two axes are usable as a forward/up pair only if they are not collinear.
    #[inline]
    pub fn is_collinear(self, other: Axis) -> bool {
        self.vector().cross(other.vector()).length_squared() < 0.5
    }
}
