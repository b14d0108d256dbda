use std::path::Path as FsPath;

use anyhow::{anyhow, bail, Context, Result};
use glam::{UVec2, Vec2, Vec3};
use log::debug;
use riftwalk_locomotion::{generate_walk, GaitParameters, PoseTrack, Skeleton, WalkReport};
use riftwalk_path::Path;
use riftwalk_terrain::{Aabb, Displacement, HeightField, Surface, Terrain, TriMesh};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Named starting point for the gait; `gait` overrides individual fields on top.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    #[default]
    Humanoid,
    Stocky,
}

impl Preset {
    pub fn params(self) -> GaitParameters {
        match self {
            Preset::Humanoid => GaitParameters::humanoid(),
            Preset::Stocky => GaitParameters::stocky(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DisplacementDesc {
    Ripple { amplitude: f32, wavelength: f32 },
    Wave { amplitude: f32, wavelength: f32, direction: Vec2 },
}

impl From<DisplacementDesc> for Displacement {
    fn from(d: DisplacementDesc) -> Self {
        match d {
            DisplacementDesc::Ripple { amplitude, wavelength } => Displacement::Ripple { amplitude, wavelength },
            DisplacementDesc::Wave { amplitude, wavelength, direction } => Displacement::Wave { amplitude, wavelength, direction },
        }
    }
}

/// One collidable surface as written in a scenario file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SurfaceDesc {
    Plane { name: String, z: f32 },
    Box { name: String, min: Vec3, max: Vec3 },
    Heightfield { name: String, origin: Vec2, dims: UVec2, cell: Vec2, heights: Vec<f32> },
    Mesh {
        name: String,
        vertices: Vec<Vec3>,
        triangles: Vec<[u32; 3]>,
        #[serde(default)]
        displacement: Option<DisplacementDesc>,
    },
    Grid {
        name: String,
        min: Vec2,
        max: Vec2,
        nx: u32,
        ny: u32,
        #[serde(default)]
        z: f32,
        #[serde(default)]
        displacement: Option<DisplacementDesc>,
    },
}

impl SurfaceDesc {
    pub fn name(&self) -> &str {
        match self {
            SurfaceDesc::Plane { name, .. }
            | SurfaceDesc::Box { name, .. }
            | SurfaceDesc::Heightfield { name, .. }
            | SurfaceDesc::Mesh { name, .. }
            | SurfaceDesc::Grid { name, .. } => name,
        }
    }

    pub fn build(&self) -> Result<Surface> {
        Ok(match self {
            SurfaceDesc::Plane { z, .. } => Surface::Plane { z: *z },
            SurfaceDesc::Box { min, max, .. } => Surface::Box(Aabb::new(*min, *max)),
            SurfaceDesc::Heightfield { name, origin, dims, cell, heights } => Surface::HeightField(
                HeightField::from_heights(*origin, *dims, *cell, heights.clone())
                    .with_context(|| format!("surface {name:?}"))?,
            ),
            SurfaceDesc::Mesh { name, vertices, triangles, displacement } => {
                let mut m = TriMesh::new(vertices.clone(), triangles.clone())
                    .with_context(|| format!("surface {name:?}"))?;
                if let Some(d) = displacement { m.apply((*d).into()); }
                Surface::Mesh(m)
            }
            SurfaceDesc::Grid { min, max, nx, ny, z, displacement, .. } => {
                let mut m = TriMesh::grid(*min, *max, *nx, *ny, *z);
                if let Some(d) = displacement { m.apply((*d).into()); }
                Surface::Mesh(m)
            }
        })
    }
}

/// A complete walk description: who walks, where, over what, for which frames.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub start_frame: i32,
    pub end_frame: i32,
    /// Skeleton to drive, by name.
    pub skeleton: String,
    pub skeletons: Vec<Skeleton>,
    pub path: Path,
    pub terrain: Vec<SurfaceDesc>,
    /// Surfaces feet may land on; all of `terrain` when absent.
    #[serde(default)]
    pub collide_with: Option<Vec<String>>,
    #[serde(default)]
    pub preset: Preset,
    /// Field-wise overrides on top of `preset`.
    #[serde(default)]
    pub gait: Map<String, Value>,
}

impl Scenario {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &FsPath) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("failed to parse scenario {}", path.display()))
    }

    /// Preset with the `gait` overrides merged in.
    pub fn gait_parameters(&self) -> Result<GaitParameters> {
        let mut base = serde_json::to_value(self.preset.params())?;
        let obj = base.as_object_mut().ok_or_else(|| anyhow!("gait preset is not an object"))?;
        for (k, v) in &self.gait {
            if !obj.contains_key(k) { bail!("unknown gait field {k:?}"); }
            obj.insert(k.clone(), v.clone());
        }
        serde_json::from_value(base).context("invalid gait overrides")
    }

    pub fn build_terrain(&self) -> Result<Terrain> {
        let mut t = Terrain::new();
        for desc in &self.terrain {
            debug!("terrain surface {:?}", desc.name());
            t.add(desc.name(), desc.build()?);
        }
        Ok(t)
    }

    pub fn find_skeleton(&self, name: &str) -> Option<&Skeleton> {
        self.skeletons.iter().find(|s| s.name == name)
    }

    pub fn surface_names(&self) -> Vec<&str> {
        match &self.collide_with {
            Some(names) => names.iter().map(String::as_str).collect(),
            None => self.terrain.iter().map(SurfaceDesc::name).collect(),
        }
    }
}

/// Run the scenario. `skeleton` overrides the scenario's own choice.
pub fn bake(scenario: &Scenario, skeleton: Option<&str>) -> Result<(PoseTrack, WalkReport)> {
    let params = scenario.gait_parameters()?;
    let terrain = scenario.build_terrain()?;
    let name = skeleton.unwrap_or(scenario.skeleton.as_str());
    let mut track = PoseTrack::new();
    let report = generate_walk(
        scenario.find_skeleton(name),
        &scenario.path,
        &terrain,
        &scenario.surface_names(),
        scenario.start_frame,
        scenario.end_frame,
        &params,
        &mut track,
    )
    .with_context(|| format!("walk for skeleton {name:?}"))?;
    Ok((track, report))
}
