use crate::assets::MeshData;
use crate::device::RenderDevice;
use crate::scene::{Scene, Shape, ShapeBuffers};

/// Keeps each shape's GPU buffers in step with its CPU geometry.
///
/// Buffers are allocated once per shape. Later changes are written into the
/// existing allocation; nothing is re-created while the scene animates.
#[derive(Debug, Default)]
pub struct GpuSync {
    uploads: u64,
}

impl GpuSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a shape's three vertex buffers holding `mesh` as it is now.
    pub fn allocate<D>(label: &str, mesh: &MeshData, device: &mut D) -> ShapeBuffers
    where
        D: RenderDevice + ?Sized,
    {
        ShapeBuffers {
            positions: device.create_vertex_buffer(&format!("{label} positions"), mesh.position_bytes()),
            uvs: device.create_vertex_buffer(&format!("{label} uvs"), mesh.uv_bytes()),
            normals: device.create_vertex_buffer(&format!("{label} normals"), mesh.normal_bytes()),
        }
    }

    /// Writes the shape's current arrays into its buffers.
    pub fn upload<D>(&mut self, shape: &mut Shape, device: &mut D)
    where
        D: RenderDevice + ?Sized,
    {
        let buffers = shape.buffers();
        let mesh = shape.mesh();
        device.write_vertex_buffer(buffers.positions, mesh.position_bytes());
        device.write_vertex_buffer(buffers.uvs, mesh.uv_bytes());
        device.write_vertex_buffer(buffers.normals, mesh.normal_bytes());

        shape.mark_uploaded();
        self.uploads += 1;
    }

    /// Uploads every shape whose geometry changed since its last upload.
    /// Returns how many shapes were uploaded.
    pub fn sync<D>(&mut self, scene: &mut Scene, device: &mut D) -> usize
    where
        D: RenderDevice + ?Sized,
    {
        let mut uploaded = 0;
        for shape in scene.shapes_mut() {
            if !shape.is_synced() {
                self.upload(shape, device);
                uploaded += 1;
            }
        }

        if uploaded > 0 {
            log::trace!("synced {uploaded} shapes ({} uploads total)", self.uploads);
        }
        uploaded
    }

    /// Shape uploads performed by `upload`/`sync` so far.
    pub fn uploads(&self) -> u64 {
        self.uploads
    }
}
