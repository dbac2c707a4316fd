// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! xform-math: transform primitives for the render pipeline.
//!
//! Column-major [`Mat4`], unit-rotation [`Quat`], [`Vec3`] and the homogeneous
//! carrier [`Vec4`], plus the builders a renderer needs (compose, look-at,
//! perspective, orthographic) and [`Observed`] for owners that must learn
//! about component edits without polling.
//!
//! All storage is `f32` so matrices can be uploaded as uniforms verbatim.
//! Element `(row, col)` of a [`Mat4`] lives at index `col * 4 + row`.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::unreadable_literal,
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::many_single_char_names,
    clippy::module_name_repetitions,
    clippy::should_implement_trait
)]

use core::f32::consts::PI;

mod error;
mod mat4;
mod observed;
mod prng;
mod quat;
mod vec3;
mod vec4;

pub use error::{MathError, Result};
pub use mat4::Mat4;
pub use observed::Observed;
pub use prng::Prng;
pub use quat::Quat;
pub use vec3::Vec3;
pub use vec4::Vec4;

/// Degeneracy threshold shared by normalisation and approximate equality.
///
/// Lengths below this value are treated as zero: vectors normalise to
/// [`Vec3::ZERO`] and quaternions to [`Quat::IDENTITY`].
pub const EPSILON: f32 = 1e-6;

/// Multiply degrees by this to get radians.
pub const DEG2RAD: f32 = PI / 180.0;

/// Multiply radians by this to get degrees.
pub const RAD2DEG: f32 = 180.0 / PI;

/// Clamps `value` to the inclusive `[min, max]` range.
pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
    debug_assert!(min <= max, "invalid clamp range: {min} > {max}");
    value.max(min).min(max)
}

/// Clamps `value` to `[0, 1]`.
pub fn clamp01(value: f32) -> f32 {
    clamp(value, 0.0, 1.0)
}

/// Converts degrees to radians.
pub fn deg_to_rad(degrees: f32) -> f32 {
    degrees * DEG2RAD
}

/// Converts radians to degrees.
pub fn rad_to_deg(radians: f32) -> f32 {
    radians * RAD2DEG
}

/// Linear interpolation with `t` clamped to `[0, 1]`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    lerp_unclamped(a, b, clamp01(t))
}

/// Linear interpolation without clamping `t`.
pub fn lerp_unclamped(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
