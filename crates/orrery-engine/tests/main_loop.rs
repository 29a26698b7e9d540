use std::collections::HashMap;
use std::f32::consts::PI;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use approx::assert_relative_eq;
use glam::Vec3;
use slotmap::SlotMap;

use orrery_engine::animation::OrbitConfig;
use orrery_engine::assets::{AssetSource, MeshData, ObjError, ObjLoader, TextureError};
use orrery_engine::camera::{CameraConfig, FreeLookCamera};
use orrery_engine::core::{AppControl, FrameInput, LoopState, MainLoop};
use orrery_engine::device::{BufferHandle, RenderDevice, TextureData, TextureHandle};
use orrery_engine::input::{InputEvent, InputFrame, InputState, Key, KeyState};
use orrery_engine::render::{DrawList, FrameRenderer, FrameSink};
use orrery_engine::scene::{AssetEntry, AssetTable};
use orrery_engine::time::FrameTime;

// ── fixtures ──────────────────────────────────────────────────────────────

/// Twelve vertices: four triangles in a row along +X.
fn strip_obj(y: f32) -> String {
    let mut src = String::new();
    for t in 0..4 {
        let x = t as f32;
        src.push_str(&format!("v {x} {y} 0\nv {} {y} 0\nv {x} {} 0\n", x + 1.0, y + 1.0));
    }
    for t in 0..4 {
        let i = t * 3 + 1;
        src.push_str(&format!("f {i} {} {}\n", i + 1, i + 2));
    }
    src
}

struct Assets {
    meshes: HashMap<PathBuf, String>,
}

impl Assets {
    fn new() -> Self {
        let meshes = [("cube.obj", strip_obj(0.0)), ("sphere.obj", strip_obj(2.0))]
            .into_iter()
            .map(|(path, src)| (PathBuf::from(path), src))
            .collect();
        Self { meshes }
    }
}

impl AssetSource for Assets {
    fn load_mesh(&self, path: &Path) -> Result<MeshData, ObjError> {
        let src = self
            .meshes
            .get(path)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        ObjLoader::parse(src.as_bytes())
    }

    fn load_texture(&self, _path: &Path) -> Result<TextureData, TextureError> {
        Ok(TextureData {
            width: 2,
            height: 2,
            rgba: vec![200; 16],
        })
    }
}

/// CPU-side device that records uploads, releases and presented frames.
#[derive(Default)]
struct Recorder {
    buffers: SlotMap<BufferHandle, Vec<u8>>,
    textures: SlotMap<TextureHandle, TextureData>,
    releases: Vec<String>,
    presented: Vec<DrawList>,
    /// Contents of the watched buffer at each present.
    watch: Option<BufferHandle>,
    snapshots: Vec<Vec<Vec3>>,
    lose_surface_at: Option<usize>,
}

impl Recorder {
    fn vec3s(&self, buffer: BufferHandle) -> Vec<Vec3> {
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

impl RenderDevice for Recorder {
    fn create_vertex_buffer(&mut self, _label: &str, contents: &[u8]) -> BufferHandle {
        self.buffers.insert(contents.to_vec())
    }

    fn write_vertex_buffer(&mut self, buffer: BufferHandle, contents: &[u8]) {
        self.buffers[buffer][..contents.len()].copy_from_slice(contents);
    }

    fn create_texture(&mut self, _label: &str, data: &TextureData) -> TextureHandle {
        self.textures.insert(data.clone())
    }

    fn release_buffer(&mut self, buffer: BufferHandle) {
        assert!(self.buffers.remove(buffer).is_some(), "double release");
        self.releases.push(format!("{buffer:?}"));
    }

    fn release_texture(&mut self, texture: TextureHandle) {
        assert!(self.textures.remove(texture).is_some(), "double release");
        self.releases.push(format!("{texture:?}"));
    }
}

impl FrameSink for Recorder {
    fn present(&mut self, frame: &DrawList) -> AppControl {
        self.presented.push(frame.clone());
        if let Some(watch) = self.watch {
            let snapshot = self.vec3s(watch);
            self.snapshots.push(snapshot);
        }
        match self.lose_surface_at {
            Some(n) if self.presented.len() >= n => AppControl::Exit,
            _ => AppControl::Continue,
        }
    }
}

fn build(recorder: &mut Recorder) -> MainLoop {
    let table = AssetTable::new(vec![
        AssetEntry::fixed("red.bmp", "cube.obj"),
        AssetEntry::orbiting("yellow.bmp", "sphere.obj", OrbitConfig::default()),
    ]);
    let scene = table.load(&Assets::new(), recorder).unwrap();
    recorder.watch = Some(scene.shapes()[1].buffers().positions);

    MainLoop::new(
        scene,
        FreeLookCamera::new(CameraConfig::default()),
        FrameRenderer::new(Vec3::new(5.0, 6.0, 0.0)),
    )
}

struct Driver {
    start: Instant,
    input: InputState,
    frame: InputFrame,
    tick: u64,
}

impl Driver {
    fn new() -> Self {
        Self {
            start: Instant::now(),
            input: InputState::default(),
            frame: InputFrame::default(),
            tick: 0,
        }
    }

    /// One iteration at 1 ms of simulated time after the previous one.
    fn step(&mut self, main_loop: &mut MainLoop, recorder: &mut Recorder) -> LoopState {
        let now = self.start + Duration::from_millis(self.tick);
        let input = FrameInput {
            input: &self.input,
            input_frame: &self.frame,
            time: FrameTime::at(now, 0.001, self.tick),
            aspect: 4.0 / 3.0,
        };
        let state = main_loop.step(&input, recorder);
        self.frame.clear();
        self.tick += 1;
        state
    }

    fn send(&mut self, ev: InputEvent) {
        self.input.apply_event(&mut self.frame, ev);
    }
}

// ── scenarios ─────────────────────────────────────────────────────────────

#[test]
fn orbit_advances_once_per_interval_and_every_frame_sees_fresh_buffers() {
    let mut recorder = Recorder::default();
    let mut main_loop = build(&mut recorder);
    let mut driver = Driver::new();

    for _ in 0..100 {
        assert_eq!(driver.step(&mut main_loop, &mut recorder), LoopState::Running);

        let scene = main_loop.scene().unwrap();
        let snapshot = recorder.snapshots.last().unwrap();
        assert_eq!(snapshot.as_slice(), scene.shapes()[1].positions());
    }

    let orbit = main_loop.scene().unwrap().orbit().unwrap();
    assert_eq!(orbit.advances(), 10);
    assert_relative_eq!(orbit.angle(), 10.0 * PI / 144.0, epsilon = 1e-5);
    assert_eq!(main_loop.sync().uploads(), 10);
    assert_eq!(main_loop.frames_presented(), 100);
}

#[test]
fn a_thousand_ticks_give_a_hundred_advances() {
    let mut recorder = Recorder::default();
    let mut main_loop = build(&mut recorder);
    let mut driver = Driver::new();

    for _ in 0..1000 {
        driver.step(&mut main_loop, &mut recorder);
    }

    let orbit = main_loop.scene().unwrap().orbit().unwrap();
    assert_eq!(orbit.advances(), 100);
    assert_relative_eq!(orbit.angle(), 100.0 * PI / 144.0, epsilon = 1e-4);
}

#[test]
fn every_frame_draws_both_shapes_in_load_order() {
    let mut recorder = Recorder::default();
    let mut main_loop = build(&mut recorder);
    let mut driver = Driver::new();

    for _ in 0..25 {
        driver.step(&mut main_loop, &mut recorder);
    }

    for list in &recorder.presented {
        let order: Vec<_> = list.draws.iter().map(|d| d.shape.index()).collect();
        assert_eq!(order, [0, 1]);
        assert!(list.draws.iter().all(|d| d.vertex_count == 12));
        assert_eq!(list.uniforms.light_position_1, [5.0, 6.0, 0.0]);
    }
}

#[test]
fn static_shape_stays_at_its_loaded_position() {
    let mut recorder = Recorder::default();
    let mut main_loop = build(&mut recorder);
    let cube = main_loop.scene().unwrap().shapes()[0].buffers().positions;
    let before = recorder.vec3s(cube);
    let mut driver = Driver::new();

    for _ in 0..30 {
        driver.step(&mut main_loop, &mut recorder);
    }

    assert_eq!(recorder.vec3s(cube), before);
}

#[test]
fn escape_stops_the_loop_and_no_frames_follow() {
    let mut recorder = Recorder::default();
    let mut main_loop = build(&mut recorder);
    let mut driver = Driver::new();

    for _ in 0..5 {
        driver.step(&mut main_loop, &mut recorder);
    }
    driver.send(InputEvent::Key {
        key: Key::Escape,
        state: KeyState::Pressed,
        repeat: false,
    });

    // The iteration that observes the key still presents its frame.
    assert_eq!(driver.step(&mut main_loop, &mut recorder), LoopState::Exiting);
    assert_eq!(recorder.presented.len(), 6);

    for _ in 0..10 {
        assert_eq!(driver.step(&mut main_loop, &mut recorder), LoopState::Exiting);
    }
    assert_eq!(recorder.presented.len(), 6);
    assert_eq!(main_loop.frames_presented(), 6);
}

#[test]
fn close_request_stops_the_loop() {
    let mut recorder = Recorder::default();
    let mut main_loop = build(&mut recorder);
    let mut driver = Driver::new();

    driver.step(&mut main_loop, &mut recorder);
    driver.send(InputEvent::CloseRequested);

    assert_eq!(driver.step(&mut main_loop, &mut recorder), LoopState::Exiting);
    assert_eq!(main_loop.state(), LoopState::Exiting);
}

#[test]
fn lost_surface_stops_the_loop() {
    let mut recorder = Recorder {
        lose_surface_at: Some(3),
        ..Recorder::default()
    };
    let mut main_loop = build(&mut recorder);
    let mut driver = Driver::new();

    let states: Vec<_> = (0..5)
        .map(|_| driver.step(&mut main_loop, &mut recorder))
        .collect();

    assert_eq!(
        states,
        [
            LoopState::Running,
            LoopState::Running,
            LoopState::Exiting,
            LoopState::Exiting,
            LoopState::Exiting
        ]
    );
    assert_eq!(recorder.presented.len(), 3);
}

#[test]
fn shutdown_releases_each_resource_exactly_once() {
    let mut recorder = Recorder::default();
    let mut main_loop = build(&mut recorder);
    let mut driver = Driver::new();

    for _ in 0..20 {
        driver.step(&mut main_loop, &mut recorder);
    }

    main_loop.shutdown(&mut recorder);
    main_loop.shutdown(&mut recorder);

    // 2 shapes × (3 buffers + 1 texture)
    assert_eq!(recorder.releases.len(), 8);
    assert!(recorder.buffers.is_empty());
    assert!(recorder.textures.is_empty());
    assert!(main_loop.scene().is_none());

    let presented = recorder.presented.len();
    assert_eq!(driver.step(&mut main_loop, &mut recorder), LoopState::Exiting);
    assert_eq!(recorder.presented.len(), presented);
}

#[test]
fn held_arrow_key_moves_the_camera_each_frame() {
    let mut recorder = Recorder::default();
    let mut main_loop = build(&mut recorder);
    let mut driver = Driver::new();

    driver.send(InputEvent::Key {
        key: Key::ArrowUp,
        state: KeyState::Pressed,
        repeat: false,
    });
    for _ in 0..100 {
        driver.step(&mut main_loop, &mut recorder);
    }

    // 100 frames × 1 ms × 3 units/s
    assert_relative_eq!(main_loop.camera().position().z, 4.7, epsilon = 1e-3);
    let first = recorder.presented.first().unwrap().uniforms.view;
    let last = recorder.presented.last().unwrap().uniforms.view;
    assert_ne!(first, last);
}
