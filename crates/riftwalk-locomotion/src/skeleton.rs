use riftwalk_core::{FootId, Side};
use serde::{Deserialize, Serialize};

/// IK channels of one leg.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FootRig {
    pub side: Side,
    /// Channel receiving the foot IK target (root-local).
    pub ik_target: String,
    /// Channel receiving the knee pole target (root-local).
    pub pole_target: String,
    /// Gait phase offset; defaults to 0.0 on the left and 0.5 on the right.
    #[serde(default)]
    pub phase_offset: Option<f32>,
}

impl FootRig {
    pub fn new(side: Side, ik_target: impl Into<String>, pole_target: impl Into<String>) -> Self {
        Self { side, ik_target: ik_target.into(), pole_target: pole_target.into(), phase_offset: None }
    }

    pub fn with_phase_offset(mut self, offset: f32) -> Self { self.phase_offset = Some(offset); self }

    #[inline]
    pub fn phase_offset(&self) -> f32 {
        self.phase_offset.unwrap_or(match self.side { Side::Left => 0.0, Side::Right => 0.5 })
    }
}

/// The character being driven: its output channel names and legs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Skeleton {
    pub name: String,
    #[serde(default = "default_root_location")]
    pub root_location: String,
    #[serde(default = "default_root_rotation")]
    pub root_rotation: String,
    pub feet: Vec<FootRig>,
}

fn default_root_location() -> String { "root.location".into() }
fn default_root_rotation() -> String { "root.rotation".into() }

impl Skeleton {
    /// Two-legged rig with conventional `.L` / `.R` channel names.
    pub fn biped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            root_location: default_root_location(),
            root_rotation: default_root_rotation(),
            feet: vec![
                FootRig::new(Side::Left, "ik_foot.L", "pole_knee.L"),
                FootRig::new(Side::Right, "ik_foot.R", "pole_knee.R"),
            ],
        }
    }

    pub fn foot_ids(&self) -> impl Iterator<Item = FootId> + '_ {
        (0..self.feet.len()).map(|i| FootId(i as u8))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn biped_defaults() {
        let s = Skeleton::biped("hero");
        assert_eq!(s.feet.len(), 2);
        assert_eq!(s.feet[0].phase_offset(), 0.0);
        assert_eq!(s.feet[1].phase_offset(), 0.5);
        assert_eq!(s.feet[1].side, Side::Right);
        assert_eq!(s.foot_ids().count(), 2);
    }

    #[test]
    fn json_fills_root_channels() {
        let s: Skeleton = serde_json::from_str(r#"{
            "name": "crab",
            "feet": [{ "side": "left", "ik_target": "a", "pole_target": "b", "phase_offset": 0.25 }]
        }"#).unwrap();
        assert_eq!(s.root_location, "root.location");
        assert_eq!(s.feet[0].phase_offset(), 0.25);
    }
}
