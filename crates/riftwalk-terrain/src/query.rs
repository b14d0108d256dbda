use std::cell::Cell;

use glam::{Vec2, Vec3};
use log::trace;

use crate::{Surface, Terrain, TerrainError};

/// Rays start this far above the highest selected surface.
pub const CAST_MARGIN: f32 = 1.0;

/// Downward ray query against a selected subset of a [`Terrain`].
///
/// A miss is a normal outcome: `height` substitutes the fallback and keeps going.
/// The miss counter makes this a per-run, non-`Sync` object.
pub struct GroundQuery<'a> {
    surfaces: Vec<&'a Surface>,
    cast_z: f32,
    default_height: f32,
    misses: Cell<u32>,
}

impl<'a> GroundQuery<'a> {
    pub fn new(terrain: &'a Terrain, names: &[&str], default_height: f32) -> Result<Self, TerrainError> {
        if names.is_empty() {
            return Err(TerrainError::EmptySurfaceSet);
        }
        let mut surfaces = Vec::with_capacity(names.len());
        for &name in names {
            let s = terrain.get(name).ok_or_else(|| TerrainError::UnknownSurface(name.to_string()))?;
            surfaces.push(s);
        }
        let top = surfaces.iter().map(|s| s.top()).fold(f32::NEG_INFINITY, f32::max);
        let cast_z = if top.is_finite() { top + CAST_MARGIN } else { CAST_MARGIN };
        Ok(Self { surfaces, cast_z, default_height, misses: Cell::new(0) })
    }

    /// Query every surface of the terrain.
    pub fn all(terrain: &'a Terrain, default_height: f32) -> Result<Self, TerrainError> {
        let names: Vec<&str> = terrain.names().collect();
        Self::new(terrain, &names, default_height)
    }

    #[inline] pub fn cast_height(&self) -> f32 { self.cast_z }
    #[inline] pub fn default_height(&self) -> f32 { self.default_height }
    #[inline] pub fn misses(&self) -> u32 { self.misses.get() }

    /// Nearest hit below the cast origin, i.e. the highest selected surface under `xy`.
    pub fn probe(&self, xy: Vec2) -> Option<f32> {
        let origin = Vec3::new(xy.x, xy.y, self.cast_z);
        self.surfaces
            .iter()
            .filter_map(|s| s.raycast_down(origin))
            .fold(None, |best: Option<f32>, z| Some(best.map_or(z, |b| b.max(z))))
    }

    /// Ground height under `xy`, or the fallback height on a miss.
    pub fn height(&self, xy: Vec2) -> f32 {
        match self.probe(xy) {
            Some(z) => z,
            None => {
                self.misses.set(self.misses.get().saturating_add(1));
                trace!("ground miss at ({:.3}, {:.3}); using {:.3}", xy.x, xy.y, self.default_height);
                self.default_height
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Aabb;

    fn step_terrain() -> Terrain {
        Terrain::new()
            .with("low", Surface::Box(Aabb::new(Vec3::new(-10.0, -5.0, -1.0), Vec3::new(2.0, 5.0, 0.0))))
            .with("high", Surface::Box(Aabb::new(Vec3::new(2.0, -5.0, -1.0), Vec3::new(10.0, 5.0, 0.3))))
    }

    #[test]
    fn picks_topmost_surface_at_step_edge() {
        let t = step_terrain();
        let q = GroundQuery::all(&t, -7.0).unwrap();
        assert_eq!(q.height(Vec2::new(0.0, 0.0)), 0.0);
        assert_eq!(q.height(Vec2::new(2.0, 0.0)), 0.3);
        assert_eq!(q.height(Vec2::new(5.0, 1.0)), 0.3);
        assert_eq!(q.misses(), 0);
        assert!(q.cast_height() > 0.3);
    }

    #[test]
    fn miss_uses_default_and_counts() {
        let t = step_terrain();
        let q = GroundQuery::new(&t, &["low"], -7.0).unwrap();
        assert_eq!(q.height(Vec2::new(5.0, 0.0)), -7.0);
        assert_eq!(q.height(Vec2::new(50.0, 0.0)), -7.0);
        assert_eq!(q.misses(), 2);
    }

    #[test]
    fn only_selected_surfaces_are_hit() {
        let t = step_terrain().with("roof", Surface::Plane { z: 5.0 });
        let q = GroundQuery::new(&t, &["low", "high"], 0.0).unwrap();
        assert_eq!(q.height(Vec2::new(-3.0, 0.0)), 0.0);
    }

    #[test]
    fn rejects_unknown_or_empty_selection() {
        let t = step_terrain();
        assert_eq!(GroundQuery::new(&t, &["lava"], 0.0).err(), Some(TerrainError::UnknownSurface("lava".into())));
        assert_eq!(GroundQuery::new(&t, &[], 0.0).err(), Some(TerrainError::EmptySurfaceSet));
    }
}
