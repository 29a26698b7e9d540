use std::path::PathBuf;

use glam::Vec3;
use orrery_engine::animation::OrbitConfig;
use orrery_engine::camera::CameraConfig;
use orrery_engine::scene::{AssetEntry, AssetTable};

/// Everything the viewer needs to build its scene.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Directory the asset paths are resolved against.
    pub asset_root: PathBuf,
    /// Load order is draw order.
    pub entries: Vec<AssetEntry>,
    /// Fixed world-space position of the first light.
    pub key_light: Vec3,
    pub clear_color: wgpu::Color,
    pub camera: CameraConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            asset_root: PathBuf::from("assets"),
            entries: vec![
                AssetEntry::fixed("red.bmp", "cube.obj"),
                AssetEntry::orbiting("yellow.bmp", "sphere.obj", OrbitConfig::default()),
                AssetEntry::fixed("grass.bmp", "plane.obj"),
                AssetEntry::fixed("minecraft_texture.bmp", "minecraft_cube.obj"),
                AssetEntry::fixed("soccerball.bmp", "soccerball.obj"),
                AssetEntry::fixed("cone.bmp", "cone.obj"),
                AssetEntry::fixed("banshee.bmp", "banshee.obj"),
                AssetEntry::fixed("spyro.bmp", "spyro.obj"),
                AssetEntry::fixed("di.bmp", "di.obj"),
                AssetEntry::fixed("MasterChief.bmp", "MasterChief.obj"),
                AssetEntry::fixed("crash.bmp", "crash.obj"),
            ],
            key_light: Vec3::new(5.0, 6.0, 0.0),
            clear_color: wgpu::Color {
                r: 0.0,
                g: 0.0,
                b: 0.4,
                a: 1.0,
            },
            camera: CameraConfig::default(),
        }
    }
}

impl SceneConfig {
    pub fn asset_table(&self) -> AssetTable {
        AssetTable::new(self.entries.clone())
    }
}
