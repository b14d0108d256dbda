use glam::Vec3;
use log::{info, warn};
use riftwalk_path::{Path, PathSampler};
use riftwalk_terrain::{GroundQuery, Terrain};
use serde::{Deserialize, Serialize};

use crate::{
    FootPlanter, FootTarget, GaitClock, GaitParameters, LocomotionError, PlantCache, PoseSink,
    PoseValue, RootMotion, RootPose, Skeleton,
};

/// Summary of one run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalkReport {
    pub frames: u32,
    pub cycle_length: u32,
    pub plants: u32,
    pub ground_misses: u32,
    pub degenerate_frames: u32,
}

/// World-space result of the most recent frame.
#[derive(Clone, Debug, PartialEq)]
pub struct FrameEval {
    pub frame: i32,
    pub root: RootPose,
    pub feet: Vec<FootTarget>,
}

/// Owns all mutable state of one walk: the plant cache, every foot's state machine and
/// the frame cursor. Frames are evaluated strictly in increasing order.
pub struct LocomotionDriver<'a> {
    skeleton: &'a Skeleton,
    params: GaitParameters,
    clock: GaitClock,
    root: RootMotion<'a>,
    ground: GroundQuery<'a>,
    planters: Vec<FootPlanter>,
    plants: PlantCache,
    next_frame: i64,
    end_frame: i32,
    last: Option<FrameEval>,
    report: WalkReport,
}

impl<'a> LocomotionDriver<'a> {
    pub fn new(
        skeleton: &'a Skeleton,
        path: &'a Path,
        terrain: &'a Terrain,
        surfaces: &[&str],
        start_frame: i32,
        end_frame: i32,
        params: GaitParameters,
    ) -> Result<Self, LocomotionError> {
        if skeleton.feet.is_empty() {
            return Err(LocomotionError::NoFeet(skeleton.name.clone()));
        }
        if path.len() < 2 {
            return Err(LocomotionError::PathTooShort { required: 2, actual: path.len() });
        }
        if end_frame < start_frame {
            return Err(LocomotionError::InvalidFrameRange { start: start_frame, end: end_frame });
        }
        params.validate()?;

        let ground = GroundQuery::new(terrain, surfaces, params.ground_default.unwrap_or(path.anchor().z))?;
        let cycle_length = params.cycle_length();
        let planters = skeleton
            .foot_ids()
            .zip(&skeleton.feet)
            .map(|(id, rig)| FootPlanter::new(id, rig.side, rig.phase_offset()))
            .collect();

        info!(
            "walk {:?}: frames {}..={}, cycle {} frames, path {:.2} m over {} samples{}",
            skeleton.name, start_frame, end_frame, cycle_length, path.length(), path.len(),
            if path.cyclic { " (cyclic)" } else { "" },
        );

        Ok(Self {
            skeleton,
            root: RootMotion::new(PathSampler::new(path), start_frame, end_frame, &params),
            clock: GaitClock::new(start_frame, cycle_length),
            params,
            ground,
            planters,
            plants: PlantCache::new(),
            next_frame: start_frame as i64,
            end_frame,
            last: None,
            report: WalkReport { cycle_length, ..WalkReport::default() },
        })
    }

    #[inline] pub fn clock(&self) -> GaitClock { self.clock }
    #[inline] pub fn plants(&self) -> &PlantCache { &self.plants }
    #[inline] pub fn last_frame(&self) -> Option<&FrameEval> { self.last.as_ref() }
    #[inline] pub fn is_done(&self) -> bool { self.next_frame > self.end_frame as i64 }

    pub fn report(&self) -> WalkReport {
        WalkReport { plants: self.plants.len() as u32, ground_misses: self.ground.misses(), ..self.report }
    }

    /// Evaluate the next frame and push its keys into `sink`. `None` once the range is exhausted.
    pub fn step<S: PoseSink + ?Sized>(&mut self, sink: &mut S) -> Option<i32> {
        if self.is_done() { return None; }
        // at most end_frame here, so it fits
        let frame = self.next_frame as i32;

        let root_phase = self.clock.sample(frame, 0.0).phase;
        let root = self.root.evaluate(frame, root_phase, &self.ground);
        if root.degenerate { self.report.degenerate_frames += 1; }

        let mut feet = Vec::with_capacity(self.planters.len());
        for planter in &mut self.planters {
            let clock = self.clock.sample(frame, planter.phase_offset);
            feet.push(planter.evaluate(clock, &root, &self.params, &self.ground, &mut self.plants));
        }

        let xf = root.transform();
        let inv = xf.inverse();
        sink.record(&self.skeleton.root_location, PoseValue::Vec3(root.position), frame);
        sink.record(&self.skeleton.root_rotation, PoseValue::Quat(root.rotation), frame);
        for (rig, tgt) in self.skeleton.feet.iter().zip(&feet) {
            sink.record(&rig.ik_target, PoseValue::Vec3(inv.transform_point(tgt.position)), frame);
            sink.record(&rig.pole_target, PoseValue::Vec3(inv.transform_point(tgt.pole)), frame);
        }

        self.last = Some(FrameEval { frame, root, feet });
        self.report.frames += 1;
        self.next_frame += 1;
        Some(frame)
    }

    /// Evaluate every remaining frame.
    pub fn run<S: PoseSink + ?Sized>(&mut self, sink: &mut S) -> WalkReport {
        while self.step(sink).is_some() {}
        let report = self.report();
        if report.degenerate_frames > 0 {
            warn!(
                "walk {:?}: {} frame(s) had no usable path heading; used the default forward",
                self.skeleton.name, report.degenerate_frames
            );
        }
        info!(
            "walk {:?}: {} frames, {} plants, {} ground misses",
            self.skeleton.name, report.frames, report.plants, report.ground_misses
        );
        report
    }

    /// World-space foot target of `foot` on the last evaluated frame.
    pub fn foot_world(&self, foot: usize) -> Option<Vec3> {
        self.last.as_ref().and_then(|f| f.feet.get(foot)).map(|t| t.position)
    }
}

/// Generate a whole walk for `skeleton` along `path` over `start_frame..=end_frame`,
/// writing every key into `sink`. Fails only on configuration errors, before any key is
/// written.
#[allow(clippy::too_many_arguments)]
pub fn generate_walk<S: PoseSink + ?Sized>(
    skeleton: Option<&Skeleton>,
    path: &Path,
    terrain: &Terrain,
    surfaces: &[&str],
    start_frame: i32,
    end_frame: i32,
    params: &GaitParameters,
    sink: &mut S,
) -> Result<WalkReport, LocomotionError> {
    let skeleton = skeleton.ok_or(LocomotionError::MissingSkeleton)?;
    let mut driver = LocomotionDriver::new(skeleton, path, terrain, surfaces, start_frame, end_frame, params.clone())?;
    Ok(driver.run(sink))
}
