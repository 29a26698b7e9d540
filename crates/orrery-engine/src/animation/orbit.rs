use std::f32::consts::{PI, TAU};
use std::time::{Duration, Instant};

use glam::Vec3;

use crate::scene::Shape;

/// Parameters of the circular orbit.
#[derive(Debug, Clone, PartialEq)]
pub struct OrbitConfig {
    /// Added to the loaded positions once to form the rest pose.
    pub rest_offset: Vec3,
    /// Orbit centre. Only `x` and `z` are used; the orbit lies in the XZ plane.
    pub center: Vec3,
    pub radius: f32,
    /// Radians advanced per eligible tick.
    pub angular_velocity: f32,
    /// Minimum wall-clock time between two advances.
    pub min_interval: Duration,
    /// Height of the light that rides along with the orbit.
    pub light_height: f32,
}

impl Default for OrbitConfig {
    fn default() -> Self {
        Self {
            rest_offset: Vec3::new(-3.0, 1.0, -1.0),
            center: Vec3::ZERO,
            radius: 10.0,
            angular_velocity: PI / 144.0,
            min_interval: Duration::from_millis(10),
            light_height: 1.0,
        }
    }
}

/// Moves one shape and its companion light around a circle.
///
/// Advances are gated on wall-clock time, not on frames: a tick less than
/// `min_interval` after the previous advance changes nothing. The first tick
/// always advances. Missed intervals are not caught up.
#[derive(Debug, Clone)]
pub struct OrbitAnimator {
    config: OrbitConfig,
    base_positions: Vec<Vec3>,
    angle: f32,
    light_position: Vec3,
    last_tick: Option<Instant>,
    advances: u64,
}

impl OrbitAnimator {
    /// Captures the rest pose from the shape's positions as loaded.
    pub fn new(config: OrbitConfig, loaded: &[Vec3]) -> Self {
        let base_positions = loaded.iter().map(|p| *p + config.rest_offset).collect();
        let light_position = Vec3::new(config.center.x, config.light_height, config.center.z);

        Self {
            config,
            base_positions,
            angle: 0.0,
            light_position,
            last_tick: None,
            advances: 0,
        }
    }

    pub fn config(&self) -> &OrbitConfig {
        &self.config
    }

    /// Current angle, always in `[0, 2π)`.
    pub fn angle(&self) -> f32 {
        self.angle
    }

    pub fn light_position(&self) -> Vec3 {
        self.light_position
    }

    pub fn base_positions(&self) -> &[Vec3] {
        &self.base_positions
    }

    /// Number of eligible ticks so far.
    pub fn advances(&self) -> u64 {
        self.advances
    }

    /// Displacement from the rest pose at the current angle.
    pub fn offset(&self) -> Vec3 {
        let (sin, cos) = self.angle.sin_cos();
        Vec3::new(
            self.config.center.x + self.config.radius * cos,
            0.0,
            self.config.center.z + self.config.radius * sin,
        )
    }

    /// Advances the angle and light if `now` is eligible. Returns whether it did.
    pub fn advance(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_tick {
            if now.saturating_duration_since(last) < self.config.min_interval {
                return false;
            }
        }

        self.angle += self.config.angular_velocity;
        if !(0.0..TAU).contains(&self.angle) {
            self.angle = 0.0;
        }

        let offset = self.offset();
        self.light_position = Vec3::new(offset.x, self.config.light_height, offset.z);
        self.last_tick = Some(now);
        self.advances += 1;
        true
    }

    /// Writes rest pose + current offset into `out`.
    pub fn write_positions(&self, out: &mut [Vec3]) {
        let offset = self.offset();
        for (dst, base) in out.iter_mut().zip(&self.base_positions) {
            *dst = *base + offset;
        }
    }

    /// Advances and, on an eligible tick, rewrites the shape's positions.
    pub fn tick(&mut self, now: Instant, shape: &mut Shape) -> bool {
        if !self.advance(now) {
            return false;
        }
        shape.edit_positions(|positions| self.write_positions(positions));
        true
    }
}
