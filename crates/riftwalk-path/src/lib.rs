//! Tessellated character paths and the normalized-progress sampler that walks them.

pub mod path;
pub mod sampler;

pub use path::{Path, TangentMode};
pub use sampler::{PathSampler, PathSample};
