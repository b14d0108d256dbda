use glam::{Vec2, Vec3};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Aabb { pub min: Vec3, pub max: Vec3 }

impl Aabb {
    #[inline] pub fn new(min: Vec3, max: Vec3) -> Self { Self { min: min.min(max), max: min.max(max) } }
    /// Footprint test, edges inclusive.
    #[inline] pub fn contains_xy(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
    pub fn from_points(pts: &[Vec3]) -> Option<Self> {
        let first = *pts.first()?;
        let (mn, mx) = pts.iter().fold((first, first), |(mn, mx), p| (mn.min(*p), mx.max(*p)));
        Some(Self { min: mn, max: mx })
    }
}
