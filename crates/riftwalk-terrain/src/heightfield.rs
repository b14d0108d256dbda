use glam::{UVec2, Vec2, Vec3};

use crate::TerrainError;

/// Regular grid heightfield in the XY plane. Sample `(i, j)` sits at `origin + (i*sx, j*sy)`.
#[derive(Clone, Debug)]
pub struct HeightField {
    pub origin: Vec2,
    pub dims: UVec2,     // nx, ny (columns in x, rows in y)
    pub cell: Vec2,      // sx, sy (world units per cell)
    pub heights: Vec<f32>,
    pub min_z: f32,
    pub max_z: f32,
}

impl HeightField {
    pub fn from_heights(origin: Vec2, dims: UVec2, cell: Vec2, heights: Vec<f32>) -> Result<Self, TerrainError> {
        let expected = (dims.x as usize) * (dims.y as usize);
        if expected != heights.len() || dims.x < 2 || dims.y < 2 {
            return Err(TerrainError::HeightCount { expected: expected.max(4), actual: heights.len() });
        }
        let (mut min_z, mut max_z) = (f32::INFINITY, f32::NEG_INFINITY);
        for &h in &heights { min_z = min_z.min(h); max_z = max_z.max(h); }
        Ok(Self { origin, dims, cell, heights, min_z, max_z })
    }

    /// Build by evaluating `f(x, y)` at every grid point.
    pub fn from_fn(origin: Vec2, dims: UVec2, cell: Vec2, f: impl Fn(f32, f32) -> f32) -> Result<Self, TerrainError> {
        let mut heights = Vec::with_capacity((dims.x * dims.y) as usize);
        for j in 0..dims.y {
            for i in 0..dims.x {
                heights.push(f(origin.x + i as f32 * cell.x, origin.y + j as f32 * cell.y));
            }
        }
        Self::from_heights(origin, dims, cell, heights)
    }

    #[inline] fn idx(&self, x: i32, y: i32) -> usize {
        (x as usize) + (y as usize) * (self.dims.x as usize)
    }
    #[inline] fn h(&self, x: i32, y: i32) -> f32 { self.heights[self.idx(x, y)] }

    #[inline]
    pub fn extent(&self) -> Vec2 {
        Vec2::new((self.dims.x - 1) as f32 * self.cell.x, (self.dims.y - 1) as f32 * self.cell.y)
    }

    /// Whether world `xy` lies over the grid (edges inclusive).
    pub fn covers(&self, xy: Vec2) -> bool {
        let l = xy - self.origin;
        let e = self.extent();
        l.x >= 0.0 && l.y >= 0.0 && l.x <= e.x && l.y <= e.y
    }

    /// Bilinear height at world `xy`, clamped onto the grid.
    pub fn sample_height(&self, xy: Vec2) -> f32 {
        let nx = self.dims.x as i32; let ny = self.dims.y as i32;
        let l = xy - self.origin;
        let fx = (l.x / self.cell.x).clamp(0.0, (nx - 1) as f32);
        let fy = (l.y / self.cell.y).clamp(0.0, (ny - 1) as f32);
        let x0 = (fx.floor() as i32).min(nx - 2); let x1 = x0 + 1;
        let y0 = (fy.floor() as i32).min(ny - 2); let y1 = y0 + 1;
        let tx = fx - x0 as f32;    let ty = fy - y0 as f32;

        let h00 = self.h(x0, y0);
        let h10 = self.h(x1, y0);
        let h01 = self.h(x0, y1);
        let h11 = self.h(x1, y1);
        let a = h00 * (1.0 - tx) + h10 * tx;
        let b = h01 * (1.0 - tx) + h11 * tx;
        a * (1.0 - ty) + b * ty
    }

    /// Vertical ray hit. Misses outside the footprint or when the surface is above `origin`.
    pub fn raycast_down(&self, origin: Vec3) -> Option<f32> {
        let xy = origin.truncate();
        if !self.covers(xy) { return None; }
        let z = self.sample_height(xy);
        (z <= origin.z).then_some(z)
    }
}
