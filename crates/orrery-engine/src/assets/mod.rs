//! Asset loaders: Wavefront OBJ meshes and BMP/PNG textures.

mod mesh;
mod obj;
mod texture;

use std::path::{Path, PathBuf};

pub use mesh::{MeshData, MeshError};
pub use obj::{ObjError, ObjLoader};
pub use texture::{decode_texture, load_texture, TextureError};

use crate::device::TextureData;

/// Where the asset table reads meshes and textures from.
pub trait AssetSource {
    fn load_mesh(&self, path: &Path) -> Result<MeshData, ObjError>;
    fn load_texture(&self, path: &Path) -> Result<TextureData, TextureError>;

    /// Path reported in errors and logs for `path`.
    fn describe(&self, path: &Path) -> PathBuf {
        path.to_path_buf()
    }
}

/// Reads assets from the filesystem relative to `root`.
#[derive(Debug, Clone)]
pub struct FsAssets {
    root: PathBuf,
}

impl FsAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl AssetSource for FsAssets {
    fn load_mesh(&self, path: &Path) -> Result<MeshData, ObjError> {
        ObjLoader::load(self.root.join(path))
    }

    fn load_texture(&self, path: &Path) -> Result<TextureData, TextureError> {
        texture::load_texture(self.root.join(path))
    }

    fn describe(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}
