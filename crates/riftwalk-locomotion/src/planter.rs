use std::collections::BTreeMap;

use core::f32::consts::PI;

use glam::{Vec2, Vec3};
use log::debug;
use riftwalk_core::{FootId, Side, WORLD_UP};
use riftwalk_terrain::GroundQuery;

use crate::{ClockSample, GaitParameters, RootPose};

/// `(foot cycle, foot)`.
pub type PlantKey = (i64, FootId);

/// Run-scoped stance plants. Each key is written by exactly one stance entry.
#[derive(Clone, Debug, Default)]
pub struct PlantCache {
    plants: BTreeMap<PlantKey, Vec3>,
}

impl PlantCache {
    pub fn new() -> Self { Self::default() }

    #[inline] pub fn get(&self, key: PlantKey) -> Option<Vec3> { self.plants.get(&key).copied() }
    #[inline] pub fn len(&self) -> usize { self.plants.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.plants.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = (&PlantKey, &Vec3)> { self.plants.iter() }

    pub fn insert(&mut self, key: PlantKey, plant: Vec3) -> Vec3 {
        self.plants.insert(key, plant);
        plant
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FootPhase {
    /// Nothing evaluated yet this run.
    Idle,
    /// Planted; the target is `plant[(cycle, foot)]`.
    Stance { cycle: i64 },
    /// Airborne, travelling away from `plant[(cycle, foot)]`.
    Swing { cycle: i64 },
}

/// World-space IK targets for one foot on one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FootTarget {
    pub position: Vec3,
    pub pole: Vec3,
    pub phase: FootPhase,
    pub clock: ClockSample,
}

/// Per-foot stance/swing state machine.
///
/// The single entry action is Stance entry (from `Idle`, `Swing`, or a stance of another
/// foot cycle): compute the plant (ground under the spot half a stride ahead of the hip
/// line) and cache it. Every other stance frame reads the cache.
#[derive(Clone, Debug)]
pub struct FootPlanter {
    pub foot: FootId,
    pub side: Side,
    pub phase_offset: f32,
    state: FootPhase,
}

impl FootPlanter {
    pub fn new(foot: FootId, side: Side, phase_offset: f32) -> Self {
        Self { foot, side, phase_offset, state: FootPhase::Idle }
    }

    #[inline] pub fn state(&self) -> FootPhase { self.state }

    pub fn evaluate(
        &mut self,
        clock: ClockSample,
        root: &RootPose,
        params: &GaitParameters,
        ground: &GroundQuery<'_>,
        plants: &mut PlantCache,
    ) -> FootTarget {
        let lateral = root.lateral_offset(self.side, params.foot_spacing);
        let half_stride = (root.forward * (params.stride_length * 0.5)).truncate();
        let hip_line = root.position.truncate() + lateral.truncate();
        let landing = hip_line + half_stride;
        let key = (clock.foot_cycle, self.foot);

        let position = if clock.is_stance() {
            let next = FootPhase::Stance { cycle: clock.foot_cycle };
            let entering = self.state != next;
            self.state = next;
            match plants.get(key) {
                Some(p) if !entering => p,
                _ => {
                    let p = landing.extend(ground.height(landing));
                    debug!("plant {} cycle {} at ({:.3}, {:.3}, {:.3})", self.foot, key.0, p.x, p.y, p.z);
                    plants.insert(key, p)
                }
            }
        } else {
            self.state = FootPhase::Swing { cycle: clock.foot_cycle };
            let start = plants.get(key).unwrap_or_else(|| {
                // run began mid-swing: pretend the foot left from half a stride behind
                let behind = hip_line - half_stride;
                behind.extend(ground.height(behind))
            });
            swing_point(start, landing, params.step_height, clock.swing_t(), ground)
        };

        let pole = root.position + root.forward * params.pole_forward + lateral + WORLD_UP * params.pole_height;
        FootTarget { position, pole, phase: self.state, clock }
    }
}

/// Foot position `s` of the way through swing: XY straight from `start` to `landing`,
/// Z following the ground plus a `sin(πs)` lift.
pub fn swing_point(start: Vec3, landing: Vec2, lift: f32, s: f32, ground: &GroundQuery<'_>) -> Vec3 {
    let xy = start.truncate().lerp(landing, s);
    xy.extend(ground.height(xy) + lift * (PI * s).sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GaitClock;
    use glam::Quat;
    use riftwalk_terrain::{Aabb, Surface, Terrain};

    fn pose_at(x: f32) -> RootPose {
        RootPose {
            position: Vec3::new(x, 0.0, 1.0),
            rotation: Quat::IDENTITY,
            forward: Vec3::X,
            right: Vec3::NEG_Y,
            degenerate: false,
        }
    }

    #[test]
    fn stance_target_is_cached_verbatim() {
        let t = Terrain::new().with("g", Surface::Plane { z: 0.2 });
        let q = GroundQuery::all(&t, 0.0).unwrap();
        let params = GaitParameters::humanoid();
        let clock = GaitClock::new(0, 20);
        let mut cache = PlantCache::new();
        let mut left = FootPlanter::new(FootId(0), Side::Left, 0.0);

        let first = left.evaluate(clock.sample(0, 0.0), &pose_at(0.0), &params, &q, &mut cache);
        assert_eq!(first.position, Vec3::new(0.4, 0.15, 0.2));
        assert_eq!(first.phase, FootPhase::Stance { cycle: 0 });
        for f in 1..10 {
            let tgt = left.evaluate(clock.sample(f, 0.0), &pose_at(f as f32 * 0.1), &params, &q, &mut cache);
            assert_eq!(tgt.position, first.position);
        }
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn stance_entry_plants_and_staying_reads_back() {
        // nothing under the feet, so every ground query shows up as a miss
        let far = Aabb::new(Vec3::new(100.0, 100.0, -1.0), Vec3::new(101.0, 101.0, 0.0));
        let t = Terrain::new().with("far", Surface::Box(far));
        let q = GroundQuery::new(&t, &["far"], 0.0).unwrap();
        let params = GaitParameters::humanoid();
        let clock = GaitClock::new(0, 20);
        let mut cache = PlantCache::new();
        cache.insert((0, FootId(0)), Vec3::splat(99.0));
        let mut left = FootPlanter::new(FootId(0), Side::Left, 0.0);
        assert_eq!(left.state(), FootPhase::Idle);

        // Idle -> Stance re-plants even though the key is already cached
        let first = left.evaluate(clock.sample(0, 0.0), &pose_at(0.0), &params, &q, &mut cache);
        assert_eq!(first.position, Vec3::new(0.4, 0.15, 0.0));
        assert_eq!(cache.get((0, FootId(0))), Some(first.position));
        assert_eq!(left.state(), FootPhase::Stance { cycle: 0 });
        assert_eq!(q.misses(), 1);

        // Stance -> Stance of the same cycle never touches the ground again
        for f in 1..10 {
            let tgt = left.evaluate(clock.sample(f, 0.0), &pose_at(f as f32 * 0.1), &params, &q, &mut cache);
            assert_eq!(tgt.position, first.position);
        }
        assert_eq!(q.misses(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn swing_leaves_from_the_plant_and_lifts() {
        let t = Terrain::new().with("g", Surface::Plane { z: 0.0 });
        let q = GroundQuery::all(&t, 0.0).unwrap();
        let params = GaitParameters::humanoid();
        let clock = GaitClock::new(0, 20);
        let mut cache = PlantCache::new();
        let mut left = FootPlanter::new(FootId(0), Side::Left, 0.0);

        let plant = left.evaluate(clock.sample(9, 0.0), &pose_at(0.9), &params, &q, &mut cache).position;
        let lift_off = left.evaluate(clock.sample(10, 0.0), &pose_at(1.0), &params, &q, &mut cache);
        assert_eq!(lift_off.phase, FootPhase::Swing { cycle: 0 });
        assert_eq!(lift_off.position, plant);

        let mid = left.evaluate(clock.sample(15, 0.0), &pose_at(1.5), &params, &q, &mut cache);
        assert!((mid.position.z - params.step_height).abs() < 1e-6);

        let back = left.evaluate(clock.sample(20, 0.0), &pose_at(2.0), &params, &q, &mut cache);
        assert_eq!(back.phase, FootPhase::Stance { cycle: 1 });
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn mid_swing_start_synthesizes_lift_off() {
        let t = Terrain::new().with("g", Surface::Plane { z: 0.0 });
        let q = GroundQuery::all(&t, 0.0).unwrap();
        let params = GaitParameters::humanoid();
        let mut cache = PlantCache::new();
        let mut right = FootPlanter::new(FootId(1), Side::Right, 0.5);
        // right foot starts the run at swing_t = 0
        let first = right.evaluate(GaitClock::new(0, 20).sample(0, 0.5), &pose_at(0.0), &params, &q, &mut cache);
        assert_eq!(first.position, Vec3::new(-0.4, -0.15, 0.0));
        assert!(cache.is_empty());
    }

    #[test]
    fn pole_tracks_root() {
        let t = Terrain::new().with("g", Surface::Plane { z: 0.0 });
        let q = GroundQuery::all(&t, 0.0).unwrap();
        let params = GaitParameters::humanoid();
        let mut cache = PlantCache::new();
        let mut left = FootPlanter::new(FootId(0), Side::Left, 0.0);
        let clock = GaitClock::new(0, 20);
        let a = left.evaluate(clock.sample(0, 0.0), &pose_at(0.0), &params, &q, &mut cache);
        let b = left.evaluate(clock.sample(1, 0.0), &pose_at(0.3), &params, &q, &mut cache);
        assert!((b.pole - a.pole - Vec3::new(0.3, 0.0, 0.0)).length() < 1e-6);
        assert!((a.pole - Vec3::new(0.5, 0.15, 0.55)).length() < 1e-6);
    }
}
