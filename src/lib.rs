//! Fixed-size 3D math kernel: vectors, points, quaternions, 3×3/4×4 matrices
//! and an affine 3×4 transform.
//!
//! All types are plain `f32` arrays. Matrices are stored column-major: column
//! `c`, row `r` of an N-row matrix lives at index `c * N + r`, and every type
//! is `bytemuck::Pod` so it can be uploaded or cast without copying.
//!
//! Operations are total over IEEE-754 floats. Degenerate inputs (singular
//! matrices, zero-length axes, non-unit quaternions handed to `slerp`) are
//! documented preconditions: they propagate `Inf`/`NaN` instead of failing.
//! Enable the `diagnostics` feature to have violations reported through `log`.
#![warn(missing_docs)]

pub mod diagnostics;
#[cfg(feature = "glam")]
mod interop;
mod matrix3;
mod matrix4;
mod quat;
mod transform;
mod vector;

pub use matrix3::Matrix3;
pub use matrix4::Matrix4;
pub use quat::Quat;
pub use transform::Transform3;
pub use vector::{Point3, Vector3, Vector4};

/// Cosine threshold above which slerp falls back to a linear blend.
///
/// Past this point `sin(angle)` is too close to zero to divide by safely.
pub const SLERP_TOL: f32 = 0.999;

/// Weights for blending two unit inputs whose dot product is `cos_angle`.
///
/// Shared by every slerp so vectors and quaternions use the same tolerance and
/// the same linear fallback.
pub(crate) fn slerp_weights(t: f32, cos_angle: f32) -> (f32, f32) {
    if cos_angle < SLERP_TOL {
        let angle = cos_angle.acos();
        let recip_sin_angle = 1.0 / angle.sin();
        (
            ((1.0 - t) * angle).sin() * recip_sin_angle,
            (t * angle).sin() * recip_sin_angle,
        )
    } else {
        (1.0 - t, t)
    }
}
