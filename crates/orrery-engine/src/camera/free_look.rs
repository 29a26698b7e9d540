use std::f32::consts::{FRAC_PI_2, PI};

use glam::{Mat4, Vec2, Vec3};

use crate::input::{InputFrame, InputState, Key};

use super::CameraView;

/// Pitch stays just short of straight up/down so `look_at` keeps a valid basis.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

#[derive(Debug, Clone, PartialEq)]
pub struct CameraConfig {
    pub position: Vec3,
    /// Radians around +Y. `π` looks down -Z.
    pub yaw: f32,
    pub pitch: f32,
    /// Vertical field of view in degrees.
    pub fov_y: f32,
    /// World units per second.
    pub move_speed: f32,
    /// Radians per unit of raw mouse motion.
    pub mouse_sensitivity: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 5.0),
            yaw: PI,
            pitch: 0.0,
            fov_y: 45.0,
            move_speed: 3.0,
            mouse_sensitivity: 0.005,
            near: 0.1,
            far: 100.0,
        }
    }
}

/// Mouse-look camera that flies along its view direction.
///
/// Arrow keys or WASD move forward/back and strafe; mouse motion turns.
#[derive(Debug, Clone)]
pub struct FreeLookCamera {
    config: CameraConfig,
    position: Vec3,
    yaw: f32,
    pitch: f32,
}

impl FreeLookCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            position: config.position,
            yaw: config.yaw,
            pitch: config.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            config,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn forward(&self) -> Vec3 {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw)
    }

    pub fn right(&self) -> Vec3 {
        let (sin, cos) = (self.yaw - FRAC_PI_2).sin_cos();
        Vec3::new(sin, 0.0, cos)
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward())
    }

    /// Applies this frame's mouse motion and held movement keys.
    pub fn update(&mut self, input: &InputState, frame: &InputFrame, dt: f32) {
        let Vec2 { x: dx, y: dy } = frame.mouse_delta;
        self.yaw -= dx * self.config.mouse_sensitivity;
        self.pitch = (self.pitch - dy * self.config.mouse_sensitivity)
            .clamp(-PITCH_LIMIT, PITCH_LIMIT);

        let held = |a: Key, b: Key| input.key_down(a) || input.key_down(b);
        let mut motion = Vec3::ZERO;
        if held(Key::ArrowUp, Key::W) {
            motion += self.forward();
        }
        if held(Key::ArrowDown, Key::S) {
            motion -= self.forward();
        }
        if held(Key::ArrowRight, Key::D) {
            motion += self.right();
        }
        if held(Key::ArrowLeft, Key::A) {
            motion -= self.right();
        }

        self.position += motion * self.config.move_speed * dt;
    }
}

impl CameraView for FreeLookCamera {
    fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), self.up())
    }

    fn projection(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh(
            self.config.fov_y.to_radians(),
            aspect.max(f32::EPSILON),
            self.config.near,
            self.config.far,
        )
    }
}
