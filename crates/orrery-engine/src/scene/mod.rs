//! Scene: the ordered shape roster and the one animated shape.
//!
//! Shapes are stored in load order, which is also draw order. The roster is
//! fixed after loading; only the orbiting shape's positions change at runtime.

mod shape;
mod table;

use std::time::Instant;

use glam::Vec3;

use crate::animation::{OrbitAnimator, OrbitConfig};
use crate::device::RenderDevice;

pub use shape::{Shape, ShapeBuffers};
pub use table::{AssetEntry, AssetLoadCause, AssetLoadError, AssetTable, ShapeRole};

/// Stable reference to a shape in its scene.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ShapeKey(usize);

impl ShapeKey {
    /// Position in load order.
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct AnimatedShape {
    key: ShapeKey,
    orbit: OrbitAnimator,
}

#[derive(Debug)]
pub struct Scene {
    shapes: Vec<Shape>,
    animated: Option<AnimatedShape>,
}

impl Scene {
    pub(crate) fn new(shapes: Vec<Shape>, orbiting: Option<(usize, OrbitConfig)>) -> Self {
        let animated = orbiting.and_then(|(index, config)| {
            let shape = shapes.get(index)?;
            Some(AnimatedShape {
                key: ShapeKey(index),
                orbit: OrbitAnimator::new(config, shape.positions()),
            })
        });

        Self { shapes, animated }
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn shape(&self, key: ShapeKey) -> Option<&Shape> {
        self.shapes.get(key.0)
    }

    pub fn shape_mut(&mut self, key: ShapeKey) -> Option<&mut Shape> {
        self.shapes.get_mut(key.0)
    }

    /// Keys paired with shapes, in draw order.
    pub fn iter(&self) -> impl Iterator<Item = (ShapeKey, &Shape)> {
        self.shapes
            .iter()
            .enumerate()
            .map(|(i, shape)| (ShapeKey(i), shape))
    }

    pub(crate) fn shapes_mut(&mut self) -> &mut [Shape] {
        &mut self.shapes
    }

    pub fn animated_key(&self) -> Option<ShapeKey> {
        self.animated.as_ref().map(|a| a.key)
    }

    pub fn orbit(&self) -> Option<&OrbitAnimator> {
        self.animated.as_ref().map(|a| &a.orbit)
    }

    /// Position of the light riding the orbit, if the scene has an orbiting shape.
    pub fn orbit_light(&self) -> Option<Vec3> {
        self.orbit().map(OrbitAnimator::light_position)
    }

    /// Advances the orbit. Returns true when geometry changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let Some(animated) = self.animated.as_mut() else {
            return false;
        };
        let Some(shape) = self.shapes.get_mut(animated.key.0) else {
            return false;
        };
        animated.orbit.tick(now, shape)
    }

    /// Releases every shape's buffers and texture. Consumes the scene, so it runs once.
    pub fn release<D: RenderDevice + ?Sized>(self, device: &mut D) {
        let count = self.shapes.len();
        for shape in self.shapes {
            let buffers = shape.buffers();
            device.release_buffer(buffers.positions);
            device.release_buffer(buffers.uvs);
            device.release_buffer(buffers.normals);
            device.release_texture(shape.texture());
        }
        log::debug!("released {count} shapes");
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::time::Duration;

    use super::*;
    use crate::test_support::{MemoryAssets, RecordingDevice};

    fn assets() -> MemoryAssets {
        MemoryAssets::default()
            .with_triangle_mesh("cube.obj", 1)
            .with_triangle_mesh("sphere.obj", 2)
            .with_texture("red.bmp")
            .with_texture("yellow.bmp")
    }

    fn table() -> AssetTable {
        AssetTable::new(vec![
            AssetEntry::fixed("red.bmp", "cube.obj"),
            AssetEntry::orbiting("yellow.bmp", "sphere.obj", OrbitConfig::default()),
        ])
    }

    #[test]
    fn load_keeps_entry_order_and_allocates_everything() {
        let mut device = RecordingDevice::default();
        let scene = table().load(&assets(), &mut device).unwrap();

        let labels: Vec<_> = scene.shapes().iter().map(Shape::label).collect();
        assert_eq!(labels, ["cube.obj", "sphere.obj"]);
        assert_eq!(scene.shapes()[1].vertex_count(), 6);
        assert_eq!(device.live_buffers(), 6);
        assert_eq!(device.live_textures(), 2);
        assert!(scene.shapes().iter().all(Shape::is_synced));
        assert_eq!(scene.animated_key(), Some(ShapeKey(1)));
    }

    #[test]
    fn missing_file_aborts_before_any_allocation() {
        let mut device = RecordingDevice::default();
        let mut entries = table().entries().to_vec();
        entries.push(AssetEntry::fixed("grass.bmp", "plane.obj"));

        let err = AssetTable::new(entries)
            .load(&assets(), &mut device)
            .unwrap_err();

        assert_eq!(err.path, PathBuf::from("grass.bmp"));
        assert!(err.cause.is_io());
        assert_eq!(device.live_buffers(), 0);
        assert_eq!(device.live_textures(), 0);
    }

    #[test]
    fn second_orbiting_entry_is_rejected() {
        let mut device = RecordingDevice::default();
        let table = AssetTable::new(vec![
            AssetEntry::orbiting("red.bmp", "cube.obj", OrbitConfig::default()),
            AssetEntry::orbiting("yellow.bmp", "sphere.obj", OrbitConfig::default()),
        ]);

        let err = table.load(&assets(), &mut device).unwrap_err();
        assert_eq!(err.path, PathBuf::from("sphere.obj"));
        assert!(matches!(
            err.cause,
            AssetLoadCause::SecondOrbitingShape { ref first } if first == &PathBuf::from("cube.obj")
        ));
    }

    #[test]
    fn tick_moves_only_the_orbiting_shape() {
        let mut device = RecordingDevice::default();
        let mut scene = table().load(&assets(), &mut device).unwrap();
        let cube_before = scene.shapes()[0].positions().to_vec();
        let start = Instant::now();

        assert!(scene.tick(start));
        assert!(!scene.tick(start + Duration::from_millis(3)));

        assert_eq!(scene.shapes()[0].positions(), cube_before.as_slice());
        assert!(scene.shapes()[0].is_synced());
        assert!(!scene.shapes()[1].is_synced());
        assert_eq!(scene.shapes()[1].revision(), 1);
    }

    #[test]
    fn static_scene_never_ticks() {
        let mut device = RecordingDevice::default();
        let table = AssetTable::new(vec![AssetEntry::fixed("red.bmp", "cube.obj")]);
        let mut scene = table.load(&assets(), &mut device).unwrap();

        assert!(!scene.tick(Instant::now()));
        assert_eq!(scene.orbit_light(), None);
    }

    #[test]
    fn release_frees_each_resource_once() {
        let mut device = RecordingDevice::default();
        let scene = table().load(&assets(), &mut device).unwrap();

        scene.release(&mut device);

        assert_eq!(device.live_buffers(), 0);
        assert_eq!(device.live_textures(), 0);
        assert_eq!(device.released_buffers.len(), 6);
        assert_eq!(device.released_textures.len(), 2);
    }
}
