//! Math kernel: reflection, refraction, rotations, channel clamping

use crate::{Color, Mat3, Vec3};
use serde::{Deserialize, Serialize};

/// A vector as it appears in the scene file, a bare three-element array
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SerdeVector(pub [f64; 3]);
impl From<SerdeVector> for Vec3 {
    fn from(v: SerdeVector) -> Self {
        Vec3::new(v.0[0], v.0[1], v.0[2])
    }
}

/// Reflect a vector about a unit normal
pub fn reflect(v: &Vec3, normal: &Vec3) -> Vec3 {
    v - 2.0 * v.dot(normal) * normal
}

/// Refract a unit vector through a surface with the given ratio of indices
/// of refraction (Snell's law). Returns `None` on total internal reflection.
pub fn refract(unit_v: &Vec3, normal: &Vec3, etai_over_etat: f64) -> Option<Vec3> {
    let cos_theta = (-unit_v).dot(normal).min(1.0);
    let sin2_theta = 1.0 - cos_theta * cos_theta;
    if etai_over_etat * etai_over_etat * sin2_theta > 1.0 {
        return None;
    }
    let r_out_perp = etai_over_etat * (unit_v + cos_theta * normal);
    let r_out_parallel = -(1.0 - r_out_perp.norm_squared()).abs().sqrt() * normal;
    Some(r_out_perp + r_out_parallel)
}

/// Saturate a scalar to [0, 1]
pub fn clamp_unit(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Saturate every channel of a color to [0, 1]
pub fn clamp_color(color: &Color) -> Color {
    Color::new(
        clamp_unit(color[0]),
        clamp_unit(color[1]),
        clamp_unit(color[2]),
    )
}

/// Rotation about the X axis
pub fn rotation_x(theta: f64) -> Mat3 {
    let (sin, cos) = theta.sin_cos();
    Mat3::new(
        1.0, 0.0, 0.0, //
        0.0, cos, -sin, //
        0.0, sin, cos,
    )
}

/// Rotation about the Y axis
pub fn rotation_y(theta: f64) -> Mat3 {
    let (sin, cos) = theta.sin_cos();
    Mat3::new(
        cos, 0.0, sin, //
        0.0, 1.0, 0.0, //
        -sin, 0.0, cos,
    )
}

/// Rotation about the Z axis
pub fn rotation_z(theta: f64) -> Mat3 {
    let (sin, cos) = theta.sin_cos();
    Mat3::new(
        cos, -sin, 0.0, //
        sin, cos, 0.0, //
        0.0, 0.0, 1.0,
    )
}

/// Compose the per-axis rotations, Z applied first, then Y, then X. The
/// transpose therefore folds a point back through X, then Y, then Z.
pub fn euler_rotation(angles: &Vec3) -> Mat3 {
    rotation_x(angles[0]) * rotation_y(angles[1]) * rotation_z(angles[2])
}

/// Rotation of `theta` about an arbitrary unit axis (Rodrigues' formula)
pub fn axis_angle_rotation(axis: &Vec3, theta: f64) -> Mat3 {
    let k = Mat3::new(
        0.0, -axis[2], axis[1], //
        axis[2], 0.0, -axis[0], //
        -axis[1], axis[0], 0.0,
    );
    Mat3::identity() + theta.sin() * k + (1.0 - theta.cos()) * (k * k)
}
