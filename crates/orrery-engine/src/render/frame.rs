use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::camera::CameraView;
use crate::core::AppControl;
use crate::device::TextureHandle;
use crate::scene::{Scene, ShapeBuffers, ShapeKey};

/// Per-frame uniform block.
///
/// Mirrors `Uniforms` in `standard_shading.wgsl` (224 bytes, std140-style padding).
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct FrameUniforms {
    pub mvp: [[f32; 4]; 4],
    pub model: [[f32; 4]; 4],
    pub view: [[f32; 4]; 4],
    pub light_position_1: [f32; 3],
    pub _pad0: f32,
    pub light_position_2: [f32; 3],
    pub _pad1: f32,
}

impl FrameUniforms {
    pub fn new(projection: Mat4, view: Mat4, model: Mat4, light_1: Vec3, light_2: Vec3) -> Self {
        Self {
            mvp: (projection * view * model).to_cols_array_2d(),
            model: model.to_cols_array_2d(),
            view: view.to_cols_array_2d(),
            light_position_1: light_1.to_array(),
            _pad0: 0.0,
            light_position_2: light_2.to_array(),
            _pad1: 0.0,
        }
    }
}

impl Default for FrameUniforms {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// One triangle-list draw with its full binding set.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MeshDraw {
    pub shape: ShapeKey,
    pub texture: TextureHandle,
    pub buffers: ShapeBuffers,
    pub vertex_count: u32,
}

/// Everything a presenter needs to draw one frame.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DrawList {
    pub uniforms: FrameUniforms,
    pub draws: Vec<MeshDraw>,
}

impl DrawList {
    pub fn clear(&mut self) {
        self.uniforms = FrameUniforms::default();
        self.draws.clear();
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }
}

/// Consumes a finished draw list, e.g. by recording and presenting a GPU frame.
pub trait FrameSink {
    /// Returns `AppControl::Exit` when the output can no longer be presented to.
    fn present(&mut self, frame: &DrawList) -> AppControl;
}

/// Turns scene + camera state into a [`DrawList`].
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    key_light: Vec3,
    resting_orbit_light: Vec3,
}

impl FrameRenderer {
    /// `key_light` is the fixed first light, in world space.
    pub fn new(key_light: Vec3) -> Self {
        Self {
            key_light,
            resting_orbit_light: Vec3::new(0.0, 1.0, 0.0),
        }
    }

    /// Second light position used when the scene has no orbiting shape.
    pub fn with_resting_orbit_light(mut self, position: Vec3) -> Self {
        self.resting_orbit_light = position;
        self
    }

    pub fn render_frame(&self, scene: &Scene, camera: &impl CameraView, aspect: f32) -> DrawList {
        let mut list = DrawList::default();
        self.render_into(scene, camera, aspect, &mut list);
        list
    }

    /// Like [`render_frame`](Self::render_frame), reusing `list`'s allocation.
    pub fn render_into(
        &self,
        scene: &Scene,
        camera: &impl CameraView,
        aspect: f32,
        list: &mut DrawList,
    ) {
        list.clear();
        list.uniforms = FrameUniforms::new(
            camera.projection(aspect),
            camera.view(),
            Mat4::IDENTITY,
            self.key_light,
            scene.orbit_light().unwrap_or(self.resting_orbit_light),
        );

        list.draws.extend(scene.iter().map(|(key, shape)| MeshDraw {
            shape: key,
            texture: shape.texture(),
            buffers: shape.buffers(),
            vertex_count: shape.vertex_count(),
        }));
    }
}
