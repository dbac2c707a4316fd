// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::f32::consts::{PI, TAU};
use core::fmt;
use core::ops::{Mul, Neg};

use bytemuck::{Pod, Zeroable};
use tracing::debug;

use crate::{clamp, deg_to_rad, Mat4, MathError, Prng, Result, Vec3, EPSILON};

/// Quaternion stored as `(x, y, z, w)` with `w` as the scalar part.
///
/// * All angles are expressed in radians except for the Euler constructors,
///   which take degrees.
/// * Plain algebra (`add`, `sub`, `scale`, `multiply`) does not renormalise.
///   Rotation constructors (`from_axis_angle`, `from_euler*`, `slerp`,
///   `normalize`) return unit quaternions.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Quat {
    data: [f32; 4],
}

impl Quat {
    /// The identity rotation `(0, 0, 0, 1)`.
    pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

    /// Above this `|dot(a, b)|`, [`Quat::slerp`] falls back to normalised lerp.
    pub const SLERP_DOT_THRESHOLD: f32 = 0.9995;

    /// Creates a quaternion from components.
    ///
    /// Callers should provide finite components; use
    /// [`Quat::from_axis_angle`] for axis/angle construction.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Returns the identity quaternion.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// X (i) component.
    pub const fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y (j) component.
    pub const fn y(&self) -> f32 {
        self.data[1]
    }

    /// Z (k) component.
    pub const fn z(&self) -> f32 {
        self.data[2]
    }

    /// Scalar component.
    pub const fn w(&self) -> f32 {
        self.data[3]
    }

    /// Overwrites the X component.
    pub fn set_x(&mut self, value: f32) {
        self.data[0] = value;
    }

    /// Overwrites the Y component.
    pub fn set_y(&mut self, value: f32) {
        self.data[1] = value;
    }

    /// Overwrites the Z component.
    pub fn set_z(&mut self, value: f32) {
        self.data[2] = value;
    }

    /// Overwrites the scalar component.
    pub fn set_w(&mut self, value: f32) {
        self.data[3] = value;
    }

    /// Returns the quaternion as an array.
    pub const fn to_array(self) -> [f32; 4] {
        self.data
    }

    /// Vector part `(x, y, z)`.
    pub const fn xyz(&self) -> Vec3 {
        Vec3::new(self.x(), self.y(), self.z())
    }

    fn zip(&self, other: &Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self::new(
            f(self.x(), other.x()),
            f(self.y(), other.y()),
            f(self.z(), other.z()),
            f(self.w(), other.w()),
        )
    }

    /// Four-component dot product.
    pub fn dot(&self, other: &Self) -> f32 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z() + self.w() * other.w()
    }

    /// Component-wise sum.
    pub fn add(&self, other: &Self) -> Self {
        self.zip(other, |a, b| a + b)
    }

    /// Component-wise difference.
    pub fn sub(&self, other: &Self) -> Self {
        self.zip(other, |a, b| a - b)
    }

    /// Multiplies every component by `s`.
    pub fn scale(&self, s: f32) -> Self {
        Self::new(self.x() * s, self.y() * s, self.z() * s, self.w() * s)
    }

    /// Divides every component by `s`.
    pub fn div_scalar(&self, s: f32) -> Result<Self> {
        if s == 0.0 {
            return Err(MathError::DivisionByZero);
        }
        Ok(Self::new(
            self.x() / s,
            self.y() / s,
            self.z() / s,
            self.w() / s,
        ))
    }

    /// `(-x, -y, -z, w)`.
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x(), -self.y(), -self.z(), self.w())
    }

    /// `(-x, -y, -z, -w)`; represents the same rotation.
    pub fn negate(&self) -> Self {
        Self::new(-self.x(), -self.y(), -self.z(), -self.w())
    }

    /// Squared norm.
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Norm, accumulated in f64 so large components do not overflow.
    pub fn magnitude(&self) -> f32 {
        self.magnitude_f64() as f32
    }

    fn magnitude_f64(&self) -> f64 {
        self.data
            .iter()
            .map(|&c| f64::from(c) * f64::from(c))
            .sum::<f64>()
            .sqrt()
    }

    /// Normalises with the default [`EPSILON`]; see [`Quat::normalize_with`].
    pub fn normalize(&self) -> Self {
        self.normalize_with(EPSILON)
    }

    /// Scales to unit length, or returns identity when the norm is below
    /// `epsilon`.
    pub fn normalize_with(&self, epsilon: f32) -> Self {
        let len = self.magnitude_f64();
        if len < f64::from(epsilon) {
            return Self::IDENTITY;
        }
        Self {
            data: self.data.map(|c| (f64::from(c) / len) as f32),
        }
    }

    /// Multiplicative inverse, `conjugate / dot(q, q)`.
    ///
    /// Fails with [`MathError::ZeroNormQuaternion`] for the zero quaternion.
    pub fn inverse(&self) -> Result<Self> {
        let norm_sq = self.length_squared();
        if norm_sq == 0.0 {
            return Err(MathError::ZeroNormQuaternion);
        }
        self.conjugate().div_scalar(norm_sq)
    }

    /// Hamilton product of two quaternions (`self * other`).
    ///
    /// Operand order matters: applied to a vector, the result rotates by
    /// `other` first and then by `self`. Quaternion multiplication is
    /// non‑commutative.
    ///
    /// The result is not renormalised; consider re-normalising over long
    /// chains.
    ///
    /// # Examples
    /// ```
    /// use core::f32::consts::FRAC_PI_2;
    /// use xform_math::{Quat, Vec3};
    /// let yaw = Quat::from_axis_angle(Vec3::UNIT_Y, FRAC_PI_2);
    /// let pitch = Quat::from_axis_angle(Vec3::UNIT_X, FRAC_PI_2);
    /// let composed = yaw.multiply(&pitch);
    /// let other = pitch.multiply(&yaw);
    /// assert_ne!(composed.to_array(), other.to_array());
    /// ```
    pub fn multiply(&self, other: &Self) -> Self {
        let [ax, ay, az, aw] = self.data;
        let [bx, by, bz, bw] = other.data;

        Self::new(
            aw * bx + ax * bw + ay * bz - az * by,
            aw * by - ax * bz + ay * bw + az * bx,
            aw * bz + ax * by - ay * bx + az * bw,
            aw * bw - ax * bx - ay * by - az * bz,
        )
    }

    /// Replaces `self` with `self * other`.
    pub fn multiply_in_place(&mut self, other: &Self) -> &mut Self {
        *self = self.multiply(other);
        self
    }

    /// Constructs a quaternion from a rotation axis and angle in radians.
    ///
    /// The axis is normalised first. Returns the identity when the axis
    /// length is below [`EPSILON`], since no orientation is defined.
    pub fn from_axis_angle(axis: Vec3, angle: f32) -> Self {
        let axis = axis.normalize();
        if axis == Vec3::ZERO {
            debug!(angle, "degenerate rotation axis; using identity");
            return Self::IDENTITY;
        }
        let (sin_half, cos_half) = (angle * 0.5).sin_cos();
        let v = axis.scale(sin_half);
        Self::new(v.x(), v.y(), v.z(), cos_half)
    }

    /// Builds a rotation from Euler angles in degrees packed as
    /// `(x = roll, y = pitch, z = yaw)`.
    ///
    /// Equivalent to `Rz(yaw) * Ry(pitch) * Rx(roll)`, i.e. roll is applied
    /// first; matches [`Mat4::rotation_from_euler`] fed the same angles in
    /// radians.
    pub fn from_euler_angles(angles: Vec3) -> Self {
        Self::from_euler(angles.x(), angles.y(), angles.z())
    }

    /// [`Quat::from_euler_angles`] taking the three angles separately.
    pub fn from_euler(x_deg: f32, y_deg: f32, z_deg: f32) -> Self {
        let (sr, cr) = (deg_to_rad(x_deg) * 0.5).sin_cos();
        let (sp, cp) = (deg_to_rad(y_deg) * 0.5).sin_cos();
        let (sy, cy) = (deg_to_rad(z_deg) * 0.5).sin_cos();

        Self::new(
            cp * sr * cy - cr * sp * sy,
            cr * sp * cy + sr * cp * sy,
            cr * cp * sy - sr * sp * cy,
            cr * cp * cy + sr * sp * sy,
        )
    }

    /// Recovers `(roll, pitch, yaw)` in radians, the inverse of
    /// [`Quat::from_euler_angles`] up to unit conversion.
    ///
    /// Pitch is clamped into `[-π/2, π/2]`; at the poles roll and yaw are
    /// not unique.
    pub fn to_euler_angles(&self) -> Vec3 {
        let [x, y, z, w] = self.data;

        let roll = (2.0 * (w * x + y * z)).atan2(1.0 - 2.0 * (x * x + y * y));
        let pitch = clamp(2.0 * (w * y - z * x), -1.0, 1.0).asin();
        let yaw = (2.0 * (w * z + x * y)).atan2(1.0 - 2.0 * (y * y + z * z));

        Vec3::new(roll, pitch, yaw)
    }

    /// Spherical linear interpolation along the shortest arc.
    ///
    /// * A negative dot product flips `b`, so the result at `t = 1` may be
    ///   `-b` (the same rotation).
    /// * Above [`Quat::SLERP_DOT_THRESHOLD`] the inputs are nearly parallel
    ///   and normalised lerp is used instead of the `acos` path.
    pub fn slerp(a: &Self, b: &Self, t: f32) -> Self {
        let mut dot = a.dot(b);
        let mut b = *b;
        if dot < 0.0 {
            b = b.negate();
            dot = -dot;
        }

        if dot > Self::SLERP_DOT_THRESHOLD {
            return Self::add(a, &Self::sub(&b, a).scale(t)).normalize();
        }

        let theta_0 = clamp(dot, -1.0, 1.0).acos();
        let theta = theta_0 * t;
        let relative = Self::sub(&b, &a.scale(dot)).normalize();
        let (sin_theta, cos_theta) = theta.sin_cos();

        Self::add(&a.scale(cos_theta), &relative.scale(sin_theta))
    }

    /// Rotates `v` by the sandwich product `q * (v, 0) * conjugate(q)`.
    pub fn rotate_vec3(&self, v: &Vec3) -> Vec3 {
        let pure = Self::new(v.x(), v.y(), v.z(), 0.0);
        self.multiply(&pure).multiply(&self.conjugate()).xyz()
    }

    /// [`Quat::rotate_vec3`] expanded by hand, writing into `v`.
    pub fn rotate_vec3_in_place<'v>(&self, v: &'v mut Vec3) -> &'v mut Vec3 {
        let [vx, vy, vz] = v.to_array();
        let [qx, qy, qz, qw] = self.data;

        // q * (v, 0)
        let ix = qw * vx + qy * vz - qz * vy;
        let iy = qw * vy + qz * vx - qx * vz;
        let iz = qw * vz + qx * vy - qy * vx;
        let iw = -qx * vx - qy * vy - qz * vz;

        // (q * v) * conjugate(q)
        v.set(
            ix * qw - iw * qx - iy * qz + iz * qy,
            iy * qw - iw * qy - iz * qx + ix * qz,
            iz * qw - iw * qz - ix * qy + iy * qx,
        )
    }

    /// Converts the quaternion to a rotation matrix (column-major 4×4).
    ///
    /// This simply forwards to [`Mat4::rotation`].
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::rotation(self)
    }

    /// Samples a random unit rotation.
    ///
    /// Draws a uniform rotation axis on the sphere and a uniform angle in
    /// `[0, 2π)`.
    pub fn random(prng: &mut Prng) -> Self {
        let azimuth = prng.next_f32() * TAU;
        let cos_polar = prng.next_f32() * 2.0 - 1.0;
        let sin_polar = (1.0 - cos_polar * cos_polar).max(0.0).sqrt();
        let axis = Vec3::new(
            sin_polar * azimuth.cos(),
            sin_polar * azimuth.sin(),
            cos_polar,
        );
        let angle = prng.next_f32() * 2.0 * PI;
        Self::from_axis_angle(axis, angle)
    }

    /// `true` when every component differs by less than `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).abs() < tolerance)
    }
}

impl Default for Quat {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Converts a 4‑element `[f32; 4]` array `(x, y, z, w)` into a `Quat`.
/// The components are taken verbatim; normalisation is not enforced.
impl From<[f32; 4]> for Quat {
    fn from(value: [f32; 4]) -> Self {
        Self { data: value }
    }
}

impl fmt::Display for Quat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Quat({}, {}, {}, {})", self.x(), self.y(), self.z(), self.w())
    }
}

impl Mul for Quat {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl Mul<Vec3> for Quat {
    type Output = Vec3;
    fn mul(self, rhs: Vec3) -> Self::Output {
        self.rotate_vec3(&rhs)
    }
}

impl Neg for Quat {
    type Output = Self;
    fn neg(self) -> Self::Output {
        self.negate()
    }
}
