use glam::{Vec2, Vec3};

use crate::{Aabb, TerrainError};

/// Procedural vertical displacement applied on top of a mesh's rest shape.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Displacement {
    /// `z += amplitude * sin(2πx/λ) * sin(2πy/λ)`
    Ripple { amplitude: f32, wavelength: f32 },
    /// `z += amplitude * sin(2π (p·dir)/λ)`
    Wave { amplitude: f32, wavelength: f32, direction: Vec2 },
}

impl Displacement {
    pub fn offset(&self, p: Vec3) -> f32 {
        use core::f32::consts::TAU;
        match *self {
            Displacement::Ripple { amplitude, wavelength } => {
                let k = TAU / wavelength.max(1e-6);
                amplitude * (k * p.x).sin() * (k * p.y).sin()
            }
            Displacement::Wave { amplitude, wavelength, direction } => {
                let d = direction.normalize_or_zero();
                amplitude * (TAU * p.truncate().dot(d) / wavelength.max(1e-6)).sin()
            }
        }
    }
}

/// Triangle soup ground. Ray casts run against `deformed`, never against `rest`.
#[derive(Clone, Debug)]
pub struct TriMesh {
    rest: Vec<Vec3>,
    deformed: Vec<Vec3>,
    triangles: Vec<[u32; 3]>,
    bounds: Aabb,
}

impl TriMesh {
    pub fn new(vertices: Vec<Vec3>, triangles: Vec<[u32; 3]>) -> Result<Self, TerrainError> {
        for (index, tri) in triangles.iter().enumerate() {
            if let Some(&vertex) = tri.iter().find(|&&v| v as usize >= vertices.len()) {
                return Err(TerrainError::BadTriangle { index, vertex, vertex_count: vertices.len() });
            }
        }
        let bounds = Aabb::from_points(&vertices).unwrap_or_default();
        Ok(Self { deformed: vertices.clone(), rest: vertices, triangles, bounds })
    }

    /// Flat `nx` x `ny` quad grid at height `z`, two triangles per cell.
    pub fn grid(min: Vec2, max: Vec2, nx: u32, ny: u32, z: f32) -> Self {
        let (nx, ny) = (nx.max(1), ny.max(1));
        let mut verts = Vec::with_capacity(((nx + 1) * (ny + 1)) as usize);
        for j in 0..=ny {
            for i in 0..=nx {
                let t = Vec2::new(i as f32 / nx as f32, j as f32 / ny as f32);
                let p = min + (max - min) * t;
                verts.push(Vec3::new(p.x, p.y, z));
            }
        }
        let row = nx + 1;
        let mut tris = Vec::with_capacity((nx * ny * 2) as usize);
        for j in 0..ny {
            for i in 0..nx {
                let a = j * row + i;
                let (b, c, d) = (a + 1, a + row, a + row + 1);
                tris.push([a, b, d]);
                tris.push([a, d, c]);
            }
        }
        let bounds = Aabb::from_points(&verts).unwrap_or_default();
        Self { deformed: verts.clone(), rest: verts, triangles: tris, bounds }
    }

    #[inline] pub fn rest_vertices(&self) -> &[Vec3] { &self.rest }
    #[inline] pub fn vertices(&self) -> &[Vec3] { &self.deformed }
    #[inline] pub fn triangles(&self) -> &[[u32; 3]] { &self.triangles }
    #[inline] pub fn bounds(&self) -> Aabb { self.bounds }

    /// Re-evaluate the deformed shape from the rest shape.
    pub fn displace(&mut self, f: impl Fn(Vec3) -> Vec3) {
        for (d, r) in self.deformed.iter_mut().zip(&self.rest) { *d = f(*r); }
        self.bounds = Aabb::from_points(&self.deformed).unwrap_or_default();
    }

    pub fn apply(&mut self, disp: Displacement) {
        self.displace(|p| p + Vec3::Z * disp.offset(p));
    }

    /// Highest deformed triangle under `origin`, at or below it. Edges count as inside.
    pub fn raycast_down(&self, origin: Vec3) -> Option<f32> {
        let p = origin.truncate();
        if !self.bounds.contains_xy(p) { return None; }
        let mut best: Option<f32> = None;
        for tri in &self.triangles {
            let [a, b, c] = tri.map(|i| self.deformed[i as usize]);
            let Some(z) = vertical_hit(a, b, c, p) else { continue };
            if z <= origin.z && best.map_or(true, |bz| z > bz) { best = Some(z); }
        }
        best
    }
}

// Barycentric test in the XY projection; triangles seen edge-on from above never hit.
fn vertical_hit(a: Vec3, b: Vec3, c: Vec3, p: Vec2) -> Option<f32> {
    const EPS: f32 = 1.0e-6;
    let (a2, b2, c2) = (a.truncate(), b.truncate(), c.truncate());
    let v0 = b2 - a2;
    let v1 = c2 - a2;
    let v2 = p - a2;
    let den = v0.perp_dot(v1);
    if den.abs() < 1.0e-12 { return None; }
    let v = v2.perp_dot(v1) / den;
    let w = v0.perp_dot(v2) / den;
    let u = 1.0 - v - w;
    if u < -EPS || v < -EPS || w < -EPS { return None; }
    Some(u * a.z + v * b.z + w * c.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn grid_hit_and_miss() {
        let m = TriMesh::grid(Vec2::splat(-2.0), Vec2::splat(2.0), 4, 4, 0.5);
        assert_relative_eq!(m.raycast_down(Vec3::new(0.3, -1.2, 10.0)).unwrap(), 0.5, epsilon = 1e-6);
        assert!(m.raycast_down(Vec3::new(3.0, 0.0, 10.0)).is_none());
        assert!(m.raycast_down(Vec3::new(0.0, 0.0, 0.0)).is_none());
    }

    #[test]
    fn sloped_triangle_interpolates() {
        let m = TriMesh::new(
            vec![Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 2.0), Vec3::new(0.0, 2.0, 0.0)],
            vec![[0, 1, 2]],
        ).unwrap();
        assert_relative_eq!(m.raycast_down(Vec3::new(0.5, 0.5, 5.0)).unwrap(), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn queries_see_the_deformed_shape() {
        let mut m = TriMesh::grid(Vec2::ZERO, Vec2::splat(4.0), 4, 4, 0.0);
        m.displace(|p| p + Vec3::Z * 0.25);
        assert_relative_eq!(m.raycast_down(Vec3::new(1.5, 1.5, 5.0)).unwrap(), 0.25, epsilon = 1e-6);
        assert_eq!(m.rest_vertices()[0].z, 0.0);
        assert_relative_eq!(m.bounds().max.z, 0.25);

        // ripple nodes sit on integer multiples of half a wavelength
        m.apply(Displacement::Ripple { amplitude: 0.3, wavelength: 4.0 });
        assert_relative_eq!(m.raycast_down(Vec3::new(2.0, 2.0, 5.0)).unwrap(), 0.0, epsilon = 1e-5);
        assert_relative_eq!(m.raycast_down(Vec3::new(1.0, 1.0, 5.0)).unwrap(), 0.3, epsilon = 1e-5);
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let e = TriMesh::new(vec![Vec3::ZERO; 3], vec![[0, 1, 3]]).unwrap_err();
        assert!(matches!(e, TerrainError::BadTriangle { index: 0, vertex: 3, .. }));
    }
}
