use riftwalk_core::Axis;
use serde::{Deserialize, Serialize};

use crate::LocomotionError;

/// Everything that shapes the walk. Immutable for the duration of a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaitParameters {
    /// Root height above the ground (m).
    pub hip_height: f32,
    /// Distance between successive plants of one foot (m).
    pub stride_length: f32,
    /// Peak foot lift at mid-swing (m).
    pub step_height: f32,
    /// Distance between the left and right foot lines (m).
    pub foot_spacing: f32,
    /// Cadence multiplier; read once per run.
    pub speed: f32,
    /// Frames per gait cycle at `speed == 1`.
    pub base_cycle_frames: f32,
    /// Root bob, twice per cycle (m).
    pub bounce_amplitude: f32,
    /// Knee pole: distance ahead of the root (m).
    pub pole_forward: f32,
    /// Knee pole: height relative to the root (m).
    pub pole_height: f32,
    /// Rig axis that should face along the path.
    pub forward_axis: Axis,
    /// Rig axis that should face world up.
    pub up_axis: Axis,
    /// Height used when a ground ray misses. `None` means the path anchor's Z.
    pub ground_default: Option<f32>,
}

impl Default for GaitParameters {
    fn default() -> Self { Self::humanoid() }
}

impl GaitParameters {
    pub fn humanoid() -> Self {
        Self {
            hip_height: 1.0,
            stride_length: 0.8,
            step_height: 0.15,
            foot_spacing: 0.3,
            speed: 1.0,
            base_cycle_frames: 24.0,
            bounce_amplitude: 0.03,
            pole_forward: 0.5,
            pole_height: -0.45,
            forward_axis: Axis::NegY,
            up_axis: Axis::PosZ,
            ground_default: None,
        }
    }

    /// Short-legged character: quicker, shorter steps and a smaller bob.
    pub fn stocky() -> Self {
        Self {
            hip_height: 0.6,
            stride_length: 0.45,
            step_height: 0.08,
            foot_spacing: 0.35,
            speed: 1.0,
            base_cycle_frames: 18.0,
            bounce_amplitude: 0.015,
            pole_forward: 0.35,
            pole_height: -0.3,
            forward_axis: Axis::NegY,
            up_axis: Axis::PosZ,
            ground_default: None,
        }
    }

    /// Frames per gait cycle, derived once from `speed`. Never below 2, so every cycle
    /// has at least one stance frame and one swing frame.
    pub fn cycle_length(&self) -> u32 {
        let frames = (self.base_cycle_frames / self.speed).round();
        if frames.is_finite() { (frames as u32).max(2) } else { 2 }
    }

    pub fn validate(&self) -> Result<(), LocomotionError> {
        if !(self.speed.is_finite() && self.speed > 0.0) {
            return Err(LocomotionError::invalid_gait(format!("speed must be positive, got {}", self.speed)));
        }
        if !(self.base_cycle_frames.is_finite() && self.base_cycle_frames > 0.0) {
            return Err(LocomotionError::invalid_gait(format!(
                "base_cycle_frames must be positive, got {}", self.base_cycle_frames
            )));
        }
        let non_negative = [
            ("stride_length", self.stride_length),
            ("step_height", self.step_height),
            ("foot_spacing", self.foot_spacing),
            ("bounce_amplitude", self.bounce_amplitude),
        ];
        for (name, v) in non_negative {
            if !(v.is_finite() && v >= 0.0) {
                return Err(LocomotionError::invalid_gait(format!("{name} must be finite and >= 0, got {v}")));
            }
        }
        for (name, v) in [("hip_height", self.hip_height), ("pole_forward", self.pole_forward), ("pole_height", self.pole_height)] {
            if !v.is_finite() {
                return Err(LocomotionError::invalid_gait(format!("{name} must be finite, got {v}")));
            }
        }
        if self.ground_default.is_some_and(|z| !z.is_finite()) {
            return Err(LocomotionError::invalid_gait("ground_default must be finite"));
        }
        if self.forward_axis.is_collinear(self.up_axis) {
            return Err(LocomotionError::DegenerateAxes);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cadence_from_speed() {
        let mut g = GaitParameters::humanoid();
        assert_eq!(g.cycle_length(), 24);
        g.speed = 2.0;
        assert_eq!(g.cycle_length(), 12);
        g.speed = 100.0;
        assert_eq!(g.cycle_length(), 2);
        assert_eq!(GaitParameters::stocky().cycle_length(), 18);
    }

    #[test]
    fn validation() {
        assert!(GaitParameters::humanoid().validate().is_ok());
        assert!(GaitParameters::stocky().validate().is_ok());

        let g = GaitParameters { speed: 0.0, ..GaitParameters::humanoid() };
        assert!(matches!(g.validate(), Err(LocomotionError::InvalidGait { .. })));

        let g = GaitParameters { step_height: -0.1, ..GaitParameters::humanoid() };
        assert!(matches!(g.validate(), Err(LocomotionError::InvalidGait { reason }) if reason.contains("step_height")));

        let g = GaitParameters { forward_axis: Axis::PosZ, ..GaitParameters::humanoid() };
        assert_eq!(g.validate(), Err(LocomotionError::DegenerateAxes));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let g: GaitParameters = serde_json::from_str(r#"{ "stride_length": 1.2, "forward_axis": "+X" }"#).unwrap();
        assert_eq!(g.stride_length, 1.2);
        assert_eq!(g.forward_axis, Axis::PosX);
        assert_eq!(g.hip_height, 1.0);
    }
}
