use glam::Vec3;
use serde::{Deserialize, Serialize};

/// How the sampler derives a heading from the tessellation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TangentMode {
    /// Direction of the bracketing segment (piecewise constant).
    #[default]
    Segment,
    /// Per-vertex central differences blended across the segment.
    Smooth,
}

/// Ordered, optionally cyclic polyline in world space. Read-only input to a run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub points: Vec<Vec3>,
    #[serde(default)]
    pub cyclic: bool,
    /// Object origin of the path. Returned by the sampler when the path is degenerate.
    #[serde(default)]
    pub anchor: Option<Vec3>,
    #[serde(default)]
    pub tangents: TangentMode,
}

impl Path {
    pub fn new(points: Vec<Vec3>, cyclic: bool) -> Self {
        Self { points, cyclic, anchor: None, tangents: TangentMode::Segment }
    }

    pub fn with_anchor(mut self, anchor: Vec3) -> Self { self.anchor = Some(anchor); self }
    pub fn with_tangents(mut self, mode: TangentMode) -> Self { self.tangents = mode; self }

    /// Straight open path from `a` to `b` with `n` samples (at least 2).
    pub fn line(a: Vec3, b: Vec3, n: usize) -> Self {
        let n = n.max(2);
        let pts = (0..n).map(|i| a.lerp(b, i as f32 / (n - 1) as f32)).collect();
        Self::new(pts, false)
    }

    /// Closed circle in the plane `z = center.z`, counter-clockwise seen from above.
    pub fn circle(center: Vec3, radius: f32, n: usize) -> Self {
        let n = n.max(3);
        let pts = (0..n)
            .map(|i| {
                let a = core::f32::consts::TAU * i as f32 / n as f32;
                center + Vec3::new(radius * a.cos(), radius * a.sin(), 0.0)
            })
            .collect();
        Self::new(pts, true).with_anchor(center)
    }

    #[inline] pub fn len(&self) -> usize { self.points.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.points.is_empty() }

    /// Anchor if set, else the first sample, else the origin.
    pub fn anchor(&self) -> Vec3 {
        self.anchor.or_else(|| self.points.first().copied()).unwrap_or(Vec3::ZERO)
    }

    /// Total polyline length, including the closing segment on cyclic paths.
    pub fn length(&self) -> f32 {
        let open: f32 = self.points.windows(2).map(|w| w[0].distance(w[1])).sum();
        match (self.cyclic, self.points.first(), self.points.last()) {
            (true, Some(first), Some(last)) if self.points.len() > 2 => open + last.distance(*first),
            _ => open,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn line_and_circle_lengths() {
        let l = Path::line(Vec3::ZERO, Vec3::new(4.0, 0.0, 0.0), 5);
        assert_eq!(l.len(), 5);
        assert_relative_eq!(l.length(), 4.0, epsilon = 1e-5);

        let c = Path::circle(Vec3::ZERO, 1.0, 4);
        // square inscribed in the unit circle
        assert_relative_eq!(c.length(), 4.0 * 2.0_f32.sqrt(), epsilon = 1e-5);
        assert_eq!(c.anchor(), Vec3::ZERO);
    }

    #[test]
    fn deserializes_with_defaults() {
        let p: Path = serde_json::from_str(r#"{ "points": [[0,0,0],[1,0,0]] }"#).unwrap();
        assert!(!p.cyclic);
        assert_eq!(p.tangents, TangentMode::Segment);
        assert_eq!(p.anchor(), Vec3::ZERO);
    }
}
