use glam::Vec3;

use crate::{Aabb, HeightField, TriMesh};

/// One collidable ground surface. Only these are ever hit by ground queries.
#[derive(Clone, Debug)]
pub enum Surface {
    /// Infinite horizontal plane.
    Plane { z: f32 },
    /// Solid box; only its top face is reachable from above.
    Box(Aabb),
    HeightField(HeightField),
    Mesh(TriMesh),
}

impl Surface {
    /// Z of the first hit of a ray cast straight down from `origin`.
    pub fn raycast_down(&self, origin: Vec3) -> Option<f32> {
        match self {
            Surface::Plane { z } => (*z <= origin.z).then_some(*z),
            Surface::Box(b) => (b.contains_xy(origin.truncate()) && b.max.z <= origin.z).then_some(b.max.z),
            Surface::HeightField(hf) => hf.raycast_down(origin),
            Surface::Mesh(m) => m.raycast_down(origin),
        }
    }

    /// Highest point of the surface; rays must start above this.
    pub fn top(&self) -> f32 {
        match self {
            Surface::Plane { z } => *z,
            Surface::Box(b) => b.max.z,
            Surface::HeightField(hf) => hf.max_z,
            Surface::Mesh(m) => m.bounds().max.z,
        }
    }
}

/// Named set of collidable surfaces (the terrain provider).
#[derive(Clone, Debug, Default)]
pub struct Terrain {
    surfaces: Vec<(String, Surface)>,
}

impl Terrain {
    pub fn new() -> Self { Self::default() }

    /// Insert or replace the surface called `name`.
    pub fn add(&mut self, name: impl Into<String>, surface: Surface) -> &mut Self {
        let name = name.into();
        match self.surfaces.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = surface,
            None => self.surfaces.push((name, surface)),
        }
        self
    }

    pub fn with(mut self, name: impl Into<String>, surface: Surface) -> Self {
        self.add(name, surface);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Surface> {
        self.surfaces.iter().find(|(n, _)| n == name).map(|(_, s)| s)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.surfaces.iter().map(|(n, _)| n.as_str())
    }

    #[inline] pub fn len(&self) -> usize { self.surfaces.len() }
    #[inline] pub fn is_empty(&self) -> bool { self.surfaces.is_empty() }
}
