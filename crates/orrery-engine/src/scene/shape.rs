use glam::Vec3;

use crate::assets::MeshData;
use crate::device::{BufferHandle, TextureHandle};

/// GPU buffers holding a shape's three vertex attribute arrays.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ShapeBuffers {
    pub positions: BufferHandle,
    pub uvs: BufferHandle,
    pub normals: BufferHandle,
}

/// One renderable mesh with its texture and GPU buffers.
///
/// Every geometry edit bumps `revision`; the shape is synced once the revision
/// uploaded to its buffers catches up.
#[derive(Debug)]
pub struct Shape {
    label: String,
    mesh: MeshData,
    texture: TextureHandle,
    buffers: ShapeBuffers,
    revision: u64,
    uploaded_revision: u64,
}

impl Shape {
    /// `buffers` must already hold `mesh` as it is now.
    pub(crate) fn new(
        label: String,
        mesh: MeshData,
        texture: TextureHandle,
        buffers: ShapeBuffers,
    ) -> Self {
        Self {
            label,
            mesh,
            texture,
            buffers,
            revision: 0,
            uploaded_revision: 0,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn mesh(&self) -> &MeshData {
        &self.mesh
    }

    pub fn positions(&self) -> &[Vec3] {
        self.mesh.positions()
    }

    pub fn vertex_count(&self) -> u32 {
        self.mesh.vertex_count() as u32
    }

    pub fn texture(&self) -> TextureHandle {
        self.texture
    }

    pub fn buffers(&self) -> ShapeBuffers {
        self.buffers
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// True when the GPU buffers hold the current geometry.
    pub fn is_synced(&self) -> bool {
        self.uploaded_revision == self.revision
    }

    /// Rewrites positions in place and marks the shape for re-upload.
    pub fn edit_positions<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut [Vec3]),
    {
        edit(self.mesh.positions_mut());
        self.revision += 1;
    }

    pub(crate) fn mark_uploaded(&mut self) {
        self.uploaded_revision = self.revision;
    }
}
