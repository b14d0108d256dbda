use riftwalk_terrain::TerrainError;
use thiserror::Error;

/// Configuration problems. All of them are raised before the first frame is evaluated;
/// ground misses and degenerate directions are recovered inside the frame loop instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LocomotionError {
    #[error("no skeleton given for the walk")]
    MissingSkeleton,

    #[error("skeleton {0:?} has no feet")]
    NoFeet(String),

    #[error("path too short: need at least {required} samples, got {actual}")]
    PathTooShort { required: usize, actual: usize },

    #[error("invalid frame range {start}..={end}")]
    InvalidFrameRange { start: i32, end: i32 },

    #[error("invalid gait parameters: {reason}")]
    InvalidGait { reason: String },

    #[error("forward and up body axes are collinear")]
    DegenerateAxes,

    #[error(transparent)]
    Terrain(#[from] TerrainError),
}

impl LocomotionError {
    #[must_use]
    pub fn invalid_gait(reason: impl Into<String>) -> Self {
        Self::InvalidGait { reason: reason.into() }
    }
}
