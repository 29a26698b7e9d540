mod app;
mod config;

use anyhow::Result;
use orrery_engine::device::GpuInit;
use orrery_engine::logging::{init_logging, LoggingConfig};
use orrery_engine::window::{Runtime, RuntimeConfig};

use crate::app::ViewerApp;
use crate::config::SceneConfig;

/// Usage: `orrery [ASSET_DIR]` (defaults to `./assets`).
fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let mut scene = SceneConfig::default();
    if let Some(root) = std::env::args_os().nth(1) {
        scene.asset_root = root.into();
    }
    log::info!("loading assets from {}", scene.asset_root.display());

    let runtime = RuntimeConfig {
        title: "Orrery".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run(runtime, GpuInit::default(), ViewerApp::new(scene))
}
