//! Model spin state.
//!
//! The cube's accumulated rotation angle. The angle grows without bound;
//! wrapping is implicit in the periodicity of the rotation matrix.

use std::f32::consts::PI;

use glam::{Mat4, Vec3};

/// Fixed model rotation axis (unnormalized; the rotation normalizes it).
pub const SPIN_AXIS: Vec3 = Vec3::new(0.25, 1.0, 0.5);

/// Angle advance per frame.
pub const SPIN_STEP: f32 = PI / 120.0;

#[derive(Debug, Default)]
pub struct ModelSpin {
    angle: f32,
}

impl ModelSpin {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame's step.
    pub fn advance(&mut self) {
        self.angle += SPIN_STEP;
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Model matrix: identity translation x spin rotation x identity scale.
    pub fn model_matrix(&self) -> Mat4 {
        cubeview_transform::translation(Vec3::ZERO)
            * cubeview_transform::rotation4(SPIN_AXIS, self.angle)
            * cubeview_transform::scale(Vec3::ONE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_accumulates_per_frame() {
        let mut spin = ModelSpin::new();
        for _ in 0..240 {
            spin.advance();
        }
        assert!((spin.angle() - 240.0 * SPIN_STEP).abs() < 1e-5);
        // 240 frames is exactly two half-turns; no explicit wrap.
        assert!(spin.angle() > PI);
    }

    #[test]
    fn zero_angle_model_matrix_is_identity() {
        let spin = ModelSpin::new();
        let m = spin.model_matrix();
        assert!(
            m.to_cols_array()
                .iter()
                .zip(Mat4::IDENTITY.to_cols_array().iter())
                .all(|(a, b)| (a - b).abs() < 1e-6)
        );
    }
}
