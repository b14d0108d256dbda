use glam::Vec3;
use riftwalk_core::DEFAULT_FORWARD;

use crate::path::{Path, TangentMode};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PathSample {
    pub position: Vec3,
    /// Unit length. `DEFAULT_FORWARD` when the local geometry has no direction.
    pub tangent: Vec3,
    /// Set when the anchor and default heading were substituted.
    pub degenerate: bool,
}

/// Maps normalized progress `t` to a position and heading on a tessellated path.
///
/// Open paths index `t * (N - 1)`; cyclic paths index `t * N` and wrap, so the closing
/// segment runs from the last sample back to the first.
pub struct PathSampler<'a> {
    path: &'a Path,
    vertex_tangents: Vec<Vec3>,
}

impl<'a> PathSampler<'a> {
    pub fn new(path: &'a Path) -> Self {
        let vertex_tangents = match path.tangents {
            TangentMode::Smooth => vertex_tangents(path),
            TangentMode::Segment => Vec::new(),
        };
        Self { path, vertex_tangents }
    }

    #[inline] pub fn path(&self) -> &Path { self.path }

    pub fn sample(&self, t: f32) -> PathSample {
        let pts = &self.path.points;
        let n = pts.len();
        if n < 2 {
            return PathSample { position: self.path.anchor(), tangent: DEFAULT_FORWARD, degenerate: true };
        }

        let (i0, i1, frac) = if self.path.cyclic {
            let idx = t * n as f32;
            let base = idx.floor();
            let i0 = (base as i64).rem_euclid(n as i64) as usize;
            (i0, (i0 + 1) % n, (idx - base).clamp(0.0, 1.0))
        } else {
            let idx = t.clamp(0.0, 1.0) * (n - 1) as f32;
            let i0 = (idx.floor() as usize).min(n - 2);
            (i0, i0 + 1, (idx - i0 as f32).clamp(0.0, 1.0))
        };

        let (a, b) = (pts[i0], pts[i1]);
        let seg = b - a;
        if seg.length_squared() < 1.0e-12 {
            return PathSample { position: self.path.anchor(), tangent: DEFAULT_FORWARD, degenerate: true };
        }
        let position = a.lerp(b, frac);
        let tangent = if self.vertex_tangents.is_empty() {
            seg.normalize()
        } else {
            self.vertex_tangents[i0]
                .lerp(self.vertex_tangents[i1], frac)
                .try_normalize()
                .unwrap_or_else(|| seg.normalize())
        };
        PathSample { position, tangent, degenerate: false }
    }
}

// Central differences; one-sided at the ends of open paths.
fn vertex_tangents(path: &Path) -> Vec<Vec3> {
    let pts = &path.points;
    let n = pts.len();
    if n < 2 { return Vec::new(); }
    (0..n)
        .map(|i| {
            let (prev, next) = if path.cyclic {
                (pts[(i + n - 1) % n], pts[(i + 1) % n])
            } else {
                (pts[i.saturating_sub(1)], pts[(i + 1).min(n - 1)])
            };
            (next - prev).try_normalize().unwrap_or(DEFAULT_FORWARD)
        })
        .collect()
}
