//! Matrix construction for the renderer.
//!
//! Every projection/view/model matrix in the workspace is built here;
//! callers hold `glam` vectors but never assemble these matrices
//! themselves. Inputs are trusted: no NaN guards, no orthonormality
//! checks.

use glam::{Mat3, Mat4, Vec3, Vec4};

/// Rotation about an arbitrary axis by `angle` radians (Rodrigues).
///
/// The axis is normalized here; callers routinely pass unnormalized
/// vectors such as raw cross products.
pub fn rotation3(axis: Vec3, angle: f32) -> Mat3 {
    let a = axis.normalize();
    let (s, c) = angle.sin_cos();
    let t = 1.0 - c;

    Mat3::from_cols(
        Vec3::new(t * a.x * a.x + c, t * a.x * a.y + s * a.z, t * a.x * a.z - s * a.y),
        Vec3::new(t * a.x * a.y - s * a.z, t * a.y * a.y + c, t * a.y * a.z + s * a.x),
        Vec3::new(t * a.x * a.z + s * a.y, t * a.y * a.z - s * a.x, t * a.z * a.z + c),
    )
}

/// 4x4 variant of [`rotation3`] with no translation component.
pub fn rotation4(axis: Vec3, angle: f32) -> Mat4 {
    let m = rotation3(axis, angle);
    Mat4::from_cols(
        (m.x_axis, 0.0).into(),
        (m.y_axis, 0.0).into(),
        (m.z_axis, 0.0).into(),
        Vec4::W,
    )
}

/// Right-handed perspective projection with 0..1 clip depth (the wgpu
/// convention). `fov_y` is the vertical field of view in radians.
pub fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    let f = 1.0 / (fov_y * 0.5).tan();
    let r = far / (near - far);

    Mat4::from_cols(
        Vec4::new(f / aspect, 0.0, 0.0, 0.0),
        Vec4::new(0.0, f, 0.0, 0.0),
        Vec4::new(0.0, 0.0, r, -1.0),
        Vec4::new(0.0, 0.0, r * near, 0.0),
    )
}

/// View matrix from an eye position plus forward/up directions.
///
/// Equivalent to a look-at matrix whose target is `eye + forward`.
pub fn direction_view(eye: Vec3, forward: Vec3, up: Vec3) -> Mat4 {
    let f = forward.normalize();
    let s = f.cross(up).normalize();
    let u = s.cross(f);

    Mat4::from_cols(
        Vec4::new(s.x, u.x, -f.x, 0.0),
        Vec4::new(s.y, u.y, -f.y, 0.0),
        Vec4::new(s.z, u.z, -f.z, 0.0),
        Vec4::new(-s.dot(eye), -u.dot(eye), f.dot(eye), 1.0),
    )
}

pub fn translation(v: Vec3) -> Mat4 {
    Mat4::from_translation(v)
}

pub fn scale(v: Vec3) -> Mat4 {
    Mat4::from_scale(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{FRAC_PI_2, FRAC_PI_4};

    const EPS: f32 = 1e-5;

    fn mat4_close(a: Mat4, b: Mat4) -> bool {
        a.to_cols_array()
            .iter()
            .zip(b.to_cols_array().iter())
            .all(|(x, y)| (x - y).abs() < EPS)
    }

    #[test]
    fn zero_angle_rotation_is_identity() {
        let m = rotation3(Vec3::new(0.0, 1.0, 0.0), 0.0);
        assert!((m * Vec3::X - Vec3::X).length() < EPS);
        assert!((m * Vec3::Y - Vec3::Y).length() < EPS);
        assert!((m * Vec3::Z - Vec3::Z).length() < EPS);
    }

    #[test]
    fn quarter_turn_about_z_maps_x_to_y() {
        let m = rotation3(Vec3::Z, FRAC_PI_2);
        assert!((m * Vec3::X - Vec3::Y).length() < EPS);
    }

    #[test]
    fn rotation_axis_is_normalized() {
        // A scaled axis must produce the same rotation as the unit axis.
        let a = rotation3(Vec3::new(0.0, 10.0, 0.0), 1.0);
        let b = rotation3(Vec3::Y, 1.0);
        assert!((a * Vec3::X - b * Vec3::X).length() < EPS);
    }

    #[test]
    fn rotation4_embeds_rotation3() {
        let axis = Vec3::new(0.25, 1.0, 0.5);
        let m3 = rotation3(axis, 1.3);
        let m4 = rotation4(axis, 1.3);
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert!((m4.transform_point3(v) - m3 * v).length() < EPS);
    }

    #[test]
    fn perspective_matches_glam() {
        let ours = perspective(FRAC_PI_4, 800.0 / 600.0, 0.01, 1000.0);
        let theirs = Mat4::perspective_rh(FRAC_PI_4, 800.0 / 600.0, 0.01, 1000.0);
        assert!(mat4_close(ours, theirs));
    }

    #[test]
    fn direction_view_matches_look_to() {
        let eye = Vec3::new(0.0, 5.0, 5.0);
        let fwd = Vec3::new(0.0, -1.0, -1.0);
        let ours = direction_view(eye, fwd, Vec3::Y);
        let theirs = Mat4::look_to_rh(eye, fwd, Vec3::Y);
        assert!(mat4_close(ours, theirs));
    }

    #[test]
    fn direction_view_centers_the_eye() {
        let eye = Vec3::new(3.0, -2.0, 7.0);
        let view = direction_view(eye, Vec3::NEG_Z, Vec3::Y);
        assert!((view.transform_point3(eye) - Vec3::ZERO).length() < EPS);
    }
}
