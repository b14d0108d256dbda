use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TerrainError {
    #[error("unknown collidable surface {0:?}")]
    UnknownSurface(String),

    #[error("no collidable surfaces selected for ground queries")]
    EmptySurfaceSet,

    #[error("heightfield expects {expected} samples, got {actual}")]
    HeightCount { expected: usize, actual: usize },

    #[error("triangle {index} references vertex {vertex} but the mesh has {vertex_count} vertices")]
    BadTriangle { index: usize, vertex: u32, vertex_count: usize },
}
