//! Precondition checks for the kernel's unchecked operations.
//!
//! The kernel never validates its inputs: a singular matrix inverts to
//! `Inf`/`NaN`, a non-unit quaternion slerps to garbage. With the
//! `diagnostics` feature enabled, the operations listed below report such
//! inputs through [`log::warn!`] and then carry on with the exact same
//! arithmetic. Without the feature the hooks compile to nothing.
//!
//! | Check | Operations |
//! |-------|------------|
//! | unit length | `slerp`, `squad`, `Matrix3::from_quat`, `rotation_axis` |
//! | non-singular | `Matrix3::inverse`, `Matrix4::inverse`, `Transform3::inverse` |
//! | orthonormal | `Transform3::ortho_inverse`, `Matrix4::ortho_inverse` |
//!
//! The predicates themselves are always available.

use crate::{Matrix3, Quat, Vector3, Vector4};

/// Allowed deviation from unit length (and from orthogonality).
pub const UNIT_TOLERANCE: f32 = 1e-3;

/// Determinants at or below this magnitude are reported as singular.
pub const SINGULAR_TOLERANCE: f32 = 1e-12;

/// Returns `true` when `length_sqr` is within [`UNIT_TOLERANCE`] of one.
///
/// Takes the squared length so callers skip the square root.
pub fn is_unit(length_sqr: f32) -> bool {
    (length_sqr.sqrt() - 1.0).abs() <= UNIT_TOLERANCE
}

/// Returns `true` when `det` is far enough from zero to invert.
pub fn is_invertible(det: f32) -> bool {
    det.is_finite() && det.abs() > SINGULAR_TOLERANCE
}

#[cfg(feature = "diagnostics")]
mod hooks {
    use super::*;

    pub(crate) fn unit_quat(q: &Quat, op: &'static str) {
        if !q.is_normalized() {
            log::warn!("{op}: quaternion {q} is not unit length (norm {})", q.norm());
        }
    }

    pub(crate) fn unit_vector3(v: &Vector3, op: &'static str) {
        if !is_unit(v.length_sqr()) {
            log::warn!("{op}: vector {v} is not unit length");
        }
    }

    pub(crate) fn unit_vector4(v: &Vector4, op: &'static str) {
        if !is_unit(v.length_sqr()) {
            log::warn!("{op}: vector {v} is not unit length");
        }
    }

    pub(crate) fn invertible(det: f32, op: &'static str) {
        if !is_invertible(det) {
            log::warn!("{op}: matrix is singular (determinant {det})");
        }
    }

    pub(crate) fn orthonormal(m: &Matrix3, op: &'static str) {
        if !m.is_orthonormal() {
            log::warn!("{op}: linear block is not orthonormal:\n{m}");
        }
    }
}

#[cfg(not(feature = "diagnostics"))]
mod hooks {
    use super::*;

    #[inline(always)]
    pub(crate) fn unit_quat(_: &Quat, _: &'static str) {}

    #[inline(always)]
    pub(crate) fn unit_vector3(_: &Vector3, _: &'static str) {}

    #[inline(always)]
    pub(crate) fn unit_vector4(_: &Vector4, _: &'static str) {}

    #[inline(always)]
    pub(crate) fn invertible(_: f32, _: &'static str) {}

    #[inline(always)]
    pub(crate) fn orthonormal(_: &Matrix3, _: &'static str) {}
}

pub(crate) use hooks::*;
