//! Fly camera.
//!
//! The pose is stored as raw position/forward/up vectors rather than
//! yaw/pitch angles, and the rotation operators work on those vectors
//! directly.
//!
//! # Invariants
//! - `forward` and `up` are intended to stay unit-length and orthogonal
//!   but nothing re-orthonormalizes them; repeated [`Camera::rotate`]
//!   calls can accumulate roll. Movement tolerates this: strafing
//!   normalizes its axis, walking uses `forward` as stored.
//! - Matrix derivation never mutates the pose.

use std::f32::consts::PI;

use glam::{Mat4, Vec3};

#[derive(Clone, Debug)]
pub struct Camera {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width / height. Fixed for the window's lifetime.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            fov_y: PI * 0.25,
            aspect: 800.0 / 600.0,
            near: 0.01,
            far: 1000.0,
            position: Vec3::new(0.0, 5.0, 5.0),
            forward: Vec3::new(0.0, -1.0, -1.0),
            up: Vec3::new(0.0, 1.0, 0.0),
        }
    }
}

impl Camera {
    pub fn strafe_left(&mut self, dt: f32, speed: f32) {
        self.position -= speed * dt * self.forward.cross(self.up).normalize();
    }

    pub fn strafe_right(&mut self, dt: f32, speed: f32) {
        self.position += speed * dt * self.forward.cross(self.up).normalize();
    }

    /// Walks along `forward` as stored; an unnormalized forward walks
    /// proportionally faster.
    pub fn walk_forward(&mut self, dt: f32, speed: f32) {
        self.position += speed * dt * self.forward;
    }

    pub fn walk_backward(&mut self, dt: f32, speed: f32) {
        self.position -= speed * dt * self.forward;
    }

    /// Yaw then pitch, in that order, on the same mutable pose.
    ///
    /// The pitch axis is re-derived from the already-yawed forward, and
    /// `up` is reassigned from the pitch rotation without being
    /// re-orthonormalized against `forward`.
    pub fn rotate(&mut self, dx: f32, dy: f32, speed: f32) {
        let yaw = cubeview_transform::rotation3(self.up, PI * dx * speed);
        self.forward = yaw * self.forward;

        let pitch = cubeview_transform::rotation3(self.forward.cross(self.up), PI * dy * speed);
        self.forward = pitch * self.forward;
        self.up = pitch * self.up;
    }

    pub fn projection_matrix(&self) -> Mat4 {
        cubeview_transform::perspective(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_matrix(&self) -> Mat4 {
        cubeview_transform::direction_view(self.position, self.forward, self.up)
    }
}
