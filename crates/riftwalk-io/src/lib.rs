//! Scenario files in, baked pose tracks out.

pub mod output;
pub mod scenario;

pub use output::{Key, PoseDocument, POSE_DOC_VERSION, pose_document, write_pose_json, write_pose_file, track_hash};
pub use scenario::{Scenario, SurfaceDesc, DisplacementDesc, Preset, bake};
