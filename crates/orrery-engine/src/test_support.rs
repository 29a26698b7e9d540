//! In-memory stand-ins for the asset source and the GPU, shared by unit tests.

use std::collections::HashMap;
use std::io;
use std::path::{Path, PathBuf};

use glam::Vec3;
use slotmap::SlotMap;

use crate::assets::{AssetSource, MeshData, ObjError, ObjLoader, TextureError};
use crate::device::{BufferHandle, RenderDevice, TextureData, TextureHandle};

#[derive(Default)]
pub(crate) struct MemoryAssets {
    meshes: HashMap<PathBuf, String>,
    textures: HashMap<PathBuf, TextureData>,
}

impl MemoryAssets {
    /// A strip of `triangles` unit triangles along +X, three vertices each.
    pub(crate) fn with_triangle_mesh(mut self, path: &str, triangles: usize) -> Self {
        let mut src = String::new();
        for t in 0..triangles {
            let x = t as f32;
            src.push_str(&format!("v {x} 0 0\nv {} 0 0\nv {x} 1 0\n", x + 1.0));
        }
        src.push_str("vn 0 0 1\n");
        for t in 0..triangles {
            let i = t * 3 + 1;
            src.push_str(&format!("f {i}//1 {}//1 {}//1\n", i + 1, i + 2));
        }
        self.meshes.insert(PathBuf::from(path), src);
        self
    }

    pub(crate) fn with_texture(mut self, path: &str) -> Self {
        self.textures.insert(
            PathBuf::from(path),
            TextureData {
                width: 1,
                height: 1,
                rgba: vec![255, 255, 255, 255],
            },
        );
        self
    }
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, path.display().to_string())
}

impl AssetSource for MemoryAssets {
    fn load_mesh(&self, path: &Path) -> Result<MeshData, ObjError> {
        let src = self.meshes.get(path).ok_or_else(|| not_found(path))?;
        ObjLoader::parse(src.as_bytes())
    }

    fn load_texture(&self, path: &Path) -> Result<TextureData, TextureError> {
        self.textures
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path).into())
    }
}

/// Keeps buffer contents on the CPU and records every call.
#[derive(Default)]
pub(crate) struct RecordingDevice {
    pub(crate) buffers: SlotMap<BufferHandle, Vec<u8>>,
    pub(crate) textures: SlotMap<TextureHandle, TextureData>,
    pub(crate) writes: Vec<BufferHandle>,
    pub(crate) released_buffers: Vec<BufferHandle>,
    pub(crate) released_textures: Vec<TextureHandle>,
}

impl RecordingDevice {
    pub(crate) fn live_buffers(&self) -> usize {
        self.buffers.len()
    }

    pub(crate) fn live_textures(&self) -> usize {
        self.textures.len()
    }

    pub(crate) fn vec3s(&self, buffer: BufferHandle) -> Vec<Vec3> {
        let floats: Vec<f32> = self.buffers[buffer]
            .chunks_exact(4)
            .map(|b| f32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        floats
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect()
    }
}

impl RenderDevice for RecordingDevice {
    fn create_vertex_buffer(&mut self, _label: &str, contents: &[u8]) -> BufferHandle {
        self.buffers.insert(contents.to_vec())
    }

    fn write_vertex_buffer(&mut self, buffer: BufferHandle, contents: &[u8]) {
        let slot = &mut self.buffers[buffer];
        assert!(contents.len() <= slot.len(), "write past end of buffer");
        slot[..contents.len()].copy_from_slice(contents);
        self.writes.push(buffer);
    }

    fn create_texture(&mut self, _label: &str, data: &TextureData) -> TextureHandle {
        self.textures.insert(data.clone())
    }

    fn release_buffer(&mut self, buffer: BufferHandle) {
        assert!(self.buffers.remove(buffer).is_some(), "buffer released twice");
        self.released_buffers.push(buffer);
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        assert!(self.textures.remove(texture).is_some(), "texture released twice");
        self.released_textures.push(texture);
    }
}
