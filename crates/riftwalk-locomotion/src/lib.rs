//! Procedural, terrain-adaptive walking.
//!
//! A run turns a path, a ground surface set and a [`GaitParameters`] record into per-frame
//! root and foot poses. Feet land on the ground and do not move while planted: each
//! stance plant is computed once per `(foot cycle, foot)` and then reused verbatim.
//!
//! Evaluation order per frame is fixed: root first, then every foot, then the pose sink.

pub mod clock;
pub mod driver;
pub mod error;
pub mod gait;
pub mod planter;
pub mod pose;
pub mod root;
pub mod skeleton;

pub use clock::{GaitClock, ClockSample, phase};
pub use driver::{LocomotionDriver, FrameEval, WalkReport, generate_walk};
pub use error::LocomotionError;
pub use gait::GaitParameters;
pub use planter::{FootPlanter, FootPhase, FootTarget, PlantCache, PlantKey};
pub use pose::{PoseSink, PoseSample, PoseTrack, PoseValue};
pub use root::{RootMotion, RootPose};
pub use skeleton::{Skeleton, FootRig};
