use std::path::PathBuf;

use thiserror::Error;

use crate::animation::OrbitConfig;
use crate::assets::{AssetSource, ObjError, TextureError};
use crate::device::RenderDevice;
use crate::render::GpuSync;

use super::{Scene, Shape};

/// What a shape does after it is loaded.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeRole {
    Static,
    /// Orbits around the scene centre, carrying the second light.
    Orbiting(OrbitConfig),
}

/// One line of the startup asset list.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetEntry {
    pub texture: PathBuf,
    pub mesh: PathBuf,
    pub role: ShapeRole,
}

impl AssetEntry {
    pub fn fixed(texture: impl Into<PathBuf>, mesh: impl Into<PathBuf>) -> Self {
        Self {
            texture: texture.into(),
            mesh: mesh.into(),
            role: ShapeRole::Static,
        }
    }

    pub fn orbiting(
        texture: impl Into<PathBuf>,
        mesh: impl Into<PathBuf>,
        config: OrbitConfig,
    ) -> Self {
        Self {
            texture: texture.into(),
            mesh: mesh.into(),
            role: ShapeRole::Orbiting(config),
        }
    }
}

#[derive(Debug, Error)]
#[error("failed to load `{}`", path.display())]
pub struct AssetLoadError {
    pub path: PathBuf,
    #[source]
    pub cause: AssetLoadCause,
}

#[derive(Debug, Error)]
pub enum AssetLoadCause {
    #[error(transparent)]
    Mesh(#[from] ObjError),

    #[error(transparent)]
    Texture(#[from] TextureError),

    #[error("only one orbiting shape is supported; `{}` already orbits", first.display())]
    SecondOrbitingShape { first: PathBuf },
}

impl AssetLoadError {
    fn new(path: PathBuf, cause: impl Into<AssetLoadCause>) -> Self {
        Self {
            path,
            cause: cause.into(),
        }
    }
}

/// Fixed roster of shapes, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct AssetTable {
    entries: Vec<AssetEntry>,
}

impl AssetTable {
    pub fn new(entries: Vec<AssetEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[AssetEntry] {
        &self.entries
    }

    /// Decodes every entry, then allocates and uploads GPU resources in entry order.
    ///
    /// Nothing is allocated on the device unless every file decodes.
    pub fn load<S, D>(&self, source: &S, device: &mut D) -> Result<Scene, AssetLoadError>
    where
        S: AssetSource + ?Sized,
        D: RenderDevice + ?Sized,
    {
        let orbiting = self.find_orbiting()?;

        let mut decoded = Vec::with_capacity(self.entries.len());
        for entry in &self.entries {
            let texture = source
                .load_texture(&entry.texture)
                .map_err(|e| AssetLoadError::new(source.describe(&entry.texture), e))?;
            let mesh = source
                .load_mesh(&entry.mesh)
                .map_err(|e| AssetLoadError::new(source.describe(&entry.mesh), e))?;
            decoded.push((entry, texture, mesh));
        }

        let mut shapes = Vec::with_capacity(decoded.len());
        for (entry, texture, mesh) in decoded {
            let label = entry.mesh.display().to_string();
            let texture = device.create_texture(&label, &texture);
            let buffers = GpuSync::allocate(&label, &mesh, device);

            log::info!(
                "loaded {label}: {} vertices, texture {}",
                mesh.vertex_count(),
                entry.texture.display()
            );
            shapes.push(Shape::new(label, mesh, texture, buffers));
        }

        Ok(Scene::new(shapes, orbiting))
    }

    fn find_orbiting(&self) -> Result<Option<(usize, OrbitConfig)>, AssetLoadError> {
        let mut found: Option<(usize, &OrbitConfig)> = None;

        for (index, entry) in self.entries.iter().enumerate() {
            let ShapeRole::Orbiting(config) = &entry.role else {
                continue;
            };
            if let Some((first, _)) = found {
                return Err(AssetLoadError::new(
                    entry.mesh.clone(),
                    AssetLoadCause::SecondOrbitingShape {
                        first: self.entries[first].mesh.clone(),
                    },
                ));
            }
            found = Some((index, config));
        }

        Ok(found.map(|(index, config)| (index, config.clone())))
    }
}

impl AssetLoadCause {
    /// True when the file could not be read at all (missing, permissions).
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            AssetLoadCause::Mesh(ObjError::Io(_)) | AssetLoadCause::Texture(TextureError::Io(_))
        )
    }
}
