use anyhow::{Context, Result};
use orrery_engine::assets::FsAssets;
use orrery_engine::camera::FreeLookCamera;
use orrery_engine::core::{App, AppControl, FrameCtx, FrameInput, LifecycleCtx, LoopState, MainLoop};
use orrery_engine::render::{FrameRenderer, MeshRenderer, RenderCtx, WgpuBackend};

use crate::config::SceneConfig;

const FALLBACK_ASPECT: f32 = 4.0 / 3.0;

pub struct ViewerApp {
    config: SceneConfig,
    running: Option<Running>,
}

/// State that only exists while the GPU does.
struct Running {
    renderer: MeshRenderer,
    main_loop: MainLoop,
}

impl ViewerApp {
    pub fn new(config: SceneConfig) -> Self {
        Self {
            config,
            running: None,
        }
    }
}

impl App for ViewerApp {
    fn init(&mut self, ctx: &mut LifecycleCtx<'_, '_>) -> Result<()> {
        let mut renderer = MeshRenderer::new(&RenderCtx::from_gpu(ctx.gpu));
        let source = FsAssets::new(self.config.asset_root.clone());

        let scene = self
            .config
            .asset_table()
            .load(&source, &mut renderer.device(ctx.gpu))
            .context("failed to load startup assets")?;
        log::info!("scene ready: {} shapes", scene.len());

        let main_loop = MainLoop::new(
            scene,
            FreeLookCamera::new(self.config.camera.clone()),
            FrameRenderer::new(self.config.key_light),
        );

        self.running = Some(Running {
            renderer,
            main_loop,
        });
        Ok(())
    }

    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        let Some(running) = self.running.as_mut() else {
            return AppControl::Exit;
        };

        let frame = FrameInput {
            input: ctx.input,
            input_frame: ctx.input_frame,
            time: ctx.time,
            aspect: ctx.aspect_ratio_or(FALLBACK_ASPECT),
        };
        let mut backend = WgpuBackend::new(ctx.gpu, ctx.window, &mut running.renderer)
            .with_clear(self.config.clear_color);

        match running.main_loop.step(&frame, &mut backend) {
            LoopState::Running => AppControl::Continue,
            LoopState::Exiting => AppControl::Exit,
        }
    }

    fn shutdown(&mut self, ctx: &mut LifecycleCtx<'_, '_>) {
        let Some(mut running) = self.running.take() else {
            return;
        };

        running
            .main_loop
            .shutdown(&mut running.renderer.device(ctx.gpu));
        log::info!(
            "shut down after {} frames ({} shape uploads)",
            running.main_loop.frames_presented(),
            running.main_loop.sync().uploads()
        );
    }
}
