use core::f32::consts::TAU;

use glam::{Mat3, Quat, Vec3};
use riftwalk_core::{horizontal_dir, Isometry, Side, DEFAULT_FORWARD, WORLD_UP};
use riftwalk_path::PathSampler;
use riftwalk_terrain::GroundQuery;

use crate::GaitParameters;

/// Open paths never sample exactly `t = 1`.
const OPEN_T_MAX: f32 = 1.0 - 1.0e-6;

/// The character root on one frame, in world space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RootPose {
    pub position: Vec3,
    pub rotation: Quat,
    /// Horizontal unit heading.
    pub forward: Vec3,
    /// Horizontal unit vector to the character's right.
    pub right: Vec3,
    /// The path gave no usable heading and `DEFAULT_FORWARD` stood in.
    pub degenerate: bool,
}

impl RootPose {
    #[inline] pub fn transform(&self) -> Isometry { Isometry { pos: self.position, rot: self.rotation } }

    /// Sideways offset of a foot line from the root.
    #[inline]
    pub fn lateral_offset(&self, side: Side, spacing: f32) -> Vec3 {
        self.right * (side.sign() * spacing * 0.5)
    }
}

/// Root placement: XY and heading from the path, Z from the ground plus hip height and bob.
pub struct RootMotion<'a> {
    sampler: PathSampler<'a>,
    start_frame: i32,
    end_frame: i32,
    hip_height: f32,
    bounce_amplitude: f32,
    body_basis: Mat3,
}

impl<'a> RootMotion<'a> {
    pub fn new(sampler: PathSampler<'a>, start_frame: i32, end_frame: i32, params: &GaitParameters) -> Self {
        Self {
            sampler,
            start_frame,
            end_frame,
            hip_height: params.hip_height,
            bounce_amplitude: params.bounce_amplitude,
            body_basis: basis(params.forward_axis.vector(), params.up_axis.vector()),
        }
    }

    /// Normalized path progress for `frame`.
    pub fn progress(&self, frame: i32) -> f32 {
        let span = self.end_frame as i64 - self.start_frame as i64;
        let t = if span <= 0 { 0.0 } else { (frame as i64 - self.start_frame as i64) as f32 / span as f32 };
        if self.sampler.path().cyclic { t } else { t.clamp(0.0, OPEN_T_MAX) }
    }

    /// `root_phase` is the un-offset gait phase; the bob runs at twice the cycle rate.
    pub fn evaluate(&self, frame: i32, root_phase: f32, ground: &GroundQuery<'_>) -> RootPose {
        let s = self.sampler.sample(self.progress(frame));
        let (forward, degenerate) = match horizontal_dir(s.tangent) {
            Some(f) if !s.degenerate => (f, false),
            Some(f) => (f, true),
            None => (DEFAULT_FORWARD, true),
        };
        let right = forward.cross(WORLD_UP).try_normalize().unwrap_or(Vec3::NEG_Y);

        let xy = s.position.truncate();
        let bounce = self.bounce_amplitude * (2.0 * TAU * root_phase).sin();
        let z = ground.height(xy) + self.hip_height + bounce;

        let world_basis = basis(forward, WORLD_UP);
        let rotation = Quat::from_mat3(&(world_basis * self.body_basis.transpose())).normalize();

        RootPose { position: xy.extend(z), rotation, forward, right, degenerate }
    }
}

// Columns: forward, up, forward x up. Orthonormal when the inputs are.
#[inline]
fn basis(forward: Vec3, up: Vec3) -> Mat3 {
    Mat3::from_cols(forward, up, forward.cross(up))
}
