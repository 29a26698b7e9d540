use crate::camera::FreeLookCamera;
use crate::device::RenderDevice;
use crate::input::{InputFrame, InputState, Key};
use crate::render::{DrawList, FrameRenderer, FrameSink, GpuSync};
use crate::scene::Scene;
use crate::time::FrameTime;

use super::AppControl;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LoopState {
    Running,
    Exiting,
}

/// What one iteration reads from the outside world.
#[derive(Debug, Copy, Clone)]
pub struct FrameInput<'a> {
    pub input: &'a InputState,
    pub input_frame: &'a InputFrame,
    pub time: FrameTime,
    /// Drawable width over height.
    pub aspect: f32,
}

/// Input → animate → sync → draw → present, once per step, until an exit
/// condition is seen.
///
/// Exit is evaluated once per iteration, after presenting: the exit key is held,
/// the window was asked to close, or the presenter gave up on the surface.
pub struct MainLoop {
    scene: Option<Scene>,
    camera: FreeLookCamera,
    renderer: FrameRenderer,
    sync: GpuSync,
    draw_list: DrawList,
    state: LoopState,
    frames_presented: u64,
    exit_key: Key,
}

impl MainLoop {
    pub fn new(scene: Scene, camera: FreeLookCamera, renderer: FrameRenderer) -> Self {
        Self {
            scene: Some(scene),
            camera,
            renderer,
            sync: GpuSync::new(),
            draw_list: DrawList::default(),
            state: LoopState::Running,
            frames_presented: 0,
            exit_key: Key::Escape,
        }
    }

    pub fn with_exit_key(mut self, key: Key) -> Self {
        self.exit_key = key;
        self
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames_presented
    }

    /// `None` once shut down.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }

    pub fn camera(&self) -> &FreeLookCamera {
        &self.camera
    }

    pub fn sync(&self) -> &GpuSync {
        &self.sync
    }

    /// The draw list of the most recent frame.
    pub fn last_frame(&self) -> &DrawList {
        &self.draw_list
    }

    /// Runs one iteration. Does nothing once the loop is exiting.
    pub fn step<B>(&mut self, frame: &FrameInput<'_>, backend: &mut B) -> LoopState
    where
        B: RenderDevice + FrameSink,
    {
        if self.state == LoopState::Exiting {
            return self.state;
        }
        let Some(scene) = self.scene.as_mut() else {
            self.state = LoopState::Exiting;
            return self.state;
        };

        self.camera
            .update(frame.input, frame.input_frame, frame.time.dt);
        scene.tick(frame.time.now);
        self.sync.sync(scene, backend);
        self.renderer
            .render_into(scene, &self.camera, frame.aspect, &mut self.draw_list);

        let control = backend.present(&self.draw_list);
        self.frames_presented += 1;

        let reason = if control == AppControl::Exit {
            Some("surface lost")
        } else if frame.input.key_down(self.exit_key) {
            Some("exit key")
        } else if frame.input.close_requested {
            Some("close requested")
        } else {
            None
        };

        if let Some(reason) = reason {
            log::info!(
                "main loop exiting ({reason}) after {} frames",
                self.frames_presented
            );
            self.state = LoopState::Exiting;
        }

        self.state
    }

    /// Stops the loop and releases the scene's GPU resources. Later calls do nothing.
    pub fn shutdown<D>(&mut self, device: &mut D)
    where
        D: RenderDevice + ?Sized,
    {
        self.state = LoopState::Exiting;
        if let Some(scene) = self.scene.take() {
            scene.release(device);
        }
    }
}
