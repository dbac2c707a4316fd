// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;
use core::ops::{Mul, MulAssign};

use bytemuck::{Pod, Zeroable};
use tracing::warn;

use crate::{deg_to_rad, MathError, Quat, Result, Vec3, Vec4};

/// Column‑major 4×4 matrix.
///
/// - Element `(row, col)` lives at index `col * 4 + row`, so the backing
///   buffer can be uploaded as a uniform without transposing.
/// - Represents affine transforms and projections; helper methods treat
///   points homogeneously (`w = 1`) and never perform a perspective divide.
///
/// # Examples
/// ```
/// use xform_math::{Mat4, Vec3};
/// let t = Mat4::translation(Vec3::new(5.0, -3.0, 2.0));
/// let p = Vec3::new(2.0, 4.0, -1.0);
/// assert_eq!(t.multiply_vec3(&p).to_array(), [7.0, 1.0, 1.0]);
/// ```
///
/// # Precision
/// - Storage and products are `f32`; inversion runs on an `f64` working
///   copy and rounds once at the end.
/// - Rotation helpers are consistent with [`Quat`] conversions.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Mat4 {
    data: [f32; 16],
}

/// Rotation block of `q` as three columns, before any scale is applied.
fn rotation_columns(q: &Quat) -> [[f32; 3]; 3] {
    let [x, y, z, w] = q.to_array();
    let (x2, y2, z2) = (x * 2.0, y * 2.0, z * 2.0);
    let (xx, yy, zz) = (x * x2, y * y2, z * z2);
    let (xy, xz, yz) = (x * y2, x * z2, y * z2);
    let (wx, wy, wz) = (w * x2, w * y2, w * z2);

    [
        [1.0 - (yy + zz), xy + wz, xz - wy],
        [xy - wz, 1.0 - (xx + zz), yz + wx],
        [xz + wy, yz - wx, 1.0 - (xx + yy)],
    ]
}

impl Mat4 {
    /// Number of scalars in the backing buffer.
    pub const SIZE: usize = 16;

    /// Size of the backing buffer in bytes.
    pub const BYTE_SIZE: usize = Self::SIZE * core::mem::size_of::<f32>();

    /// The identity matrix.
    pub const IDENTITY: Self = Self::new([
        1.0, 0.0, 0.0, 0.0, // col 0
        0.0, 1.0, 0.0, 0.0, // col 1
        0.0, 0.0, 1.0, 0.0, // col 2
        0.0, 0.0, 0.0, 1.0, // col 3
    ]);

    /// The all-zero matrix.
    pub const ZERO: Self = Self::new([0.0; 16]);

    /// Creates a matrix from column-major array data.
    pub const fn new(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        Self::IDENTITY
    }

    /// Returns the all-zero matrix.
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Replaces every element with `data` (column-major).
    pub fn set(&mut self, data: [f32; 16]) {
        self.data = data;
    }

    /// Returns the matrix as a column‑major array.
    pub const fn to_array(self) -> [f32; 16] {
        self.data
    }

    /// Borrows the column-major backing buffer.
    pub const fn as_array(&self) -> &[f32; 16] {
        &self.data
    }

    /// Borrows the backing buffer as [`Mat4::BYTE_SIZE`] native-endian bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }

    /// Element at `(row, col)`.
    pub const fn at(&self, row: usize, col: usize) -> f32 {
        self.data[col * 4 + row]
    }

    /// Overwrites the element at `(row, col)`.
    pub fn set_at(&mut self, row: usize, col: usize, value: f32) {
        self.data[col * 4 + row] = value;
    }

    /// Builds a translation matrix.
    ///
    /// Column-major layout: translation occupies the last column.
    pub const fn translation(t: Vec3) -> Self {
        Self::new([
            1.0, 0.0, 0.0, 0.0, // col 0
            0.0, 1.0, 0.0, 0.0, // col 1
            0.0, 0.0, 1.0, 0.0, // col 2
            t.x(), t.y(), t.z(), 1.0, // col 3 (translation)
        ])
    }

    /// Builds a non-uniform scale matrix.
    pub const fn scale(s: Vec3) -> Self {
        Self::new([
            s.x(), 0.0, 0.0, 0.0, // col 0
            0.0, s.y(), 0.0, 0.0, // col 1
            0.0, 0.0, s.z(), 0.0, // col 2
            0.0, 0.0, 0.0, 1.0, // col 3
        ])
    }

    /// Builds a rotation matrix from a quaternion.
    ///
    /// The quaternion is used as given; pass a unit quaternion to get a
    /// pure rotation.
    pub fn rotation(q: &Quat) -> Self {
        Self::compose(Vec3::ZERO, q, Vec3::ONE)
    }

    /// Builds a rotation matrix from an axis and angle in radians.
    ///
    /// The axis is normalized internally; a zero-length axis yields the
    /// identity rotation.
    pub fn rotation_axis_angle(axis: Vec3, angle: f32) -> Self {
        Self::rotation(&Quat::from_axis_angle(axis, angle))
    }

    /// Builds a rotation matrix around the X axis by `angle` radians.
    #[rustfmt::skip]
    pub fn rotation_x(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            1.0, 0.0, 0.0, 0.0,
            0.0, c,   s,   0.0,
            0.0, -s,  c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Builds a rotation matrix around the Y axis by `angle` radians.
    #[rustfmt::skip]
    pub fn rotation_y(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            c,   0.0, -s,  0.0,
            0.0, 1.0, 0.0, 0.0,
            s,   0.0, c,   0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Builds a rotation matrix around the Z axis by `angle` radians.
    #[rustfmt::skip]
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        Self::new([
            c,   s,   0.0, 0.0,
            -s,  c,   0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ])
    }

    /// Builds a rotation matrix from Euler angles in radians.
    ///
    /// Ordering: `R = R_z(z) * R_y(y) * R_x(x)`, so rotation about X is
    /// applied first. This is the matrix form of [`Quat::from_euler`].
    ///
    /// # Examples
    /// ```
    /// use core::f32::consts::FRAC_PI_2;
    /// use xform_math::{Mat4, Vec3};
    /// // 90° about Z: +X maps to +Y
    /// let r = Mat4::rotation_from_euler(0.0, 0.0, FRAC_PI_2);
    /// let v = r.transform_direction(&Vec3::UNIT_X);
    /// assert!((v.y() - 1.0).abs() < 1e-6);
    /// ```
    pub fn rotation_from_euler(x: f32, y: f32, z: f32) -> Self {
        Self::rotation_z(z)
            .multiply(&Self::rotation_y(y))
            .multiply(&Self::rotation_x(x))
    }

    /// Builds `T * R * S` in one pass.
    ///
    /// Each rotation column is pre-scaled by the matching scale component
    /// and the translation is written straight into column 3.
    #[rustfmt::skip]
    pub fn compose(translation: Vec3, rotation: &Quat, scale: Vec3) -> Self {
        let [c0, c1, c2] = rotation_columns(rotation);
        let (sx, sy, sz) = (scale.x(), scale.y(), scale.z());

        Self::new([
            sx * c0[0], sx * c0[1], sx * c0[2], 0.0,
            sy * c1[0], sy * c1[1], sy * c1[2], 0.0,
            sz * c2[0], sz * c2[1], sz * c2[2], 0.0,
            translation.x(), translation.y(), translation.z(), 1.0,
        ])
    }

    /// Right-handed view matrix looking from `eye` towards `target`.
    ///
    /// The camera basis is `z = normalize(eye - target)`,
    /// `x = normalize(up × z)`, `y = z × x`, stored as rows.
    ///
    /// Degenerate inputs are not guarded: `eye == target` or `up` parallel
    /// to the view direction produces a zero basis vector.
    #[rustfmt::skip]
    pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let z_axis = Vec3::sub(&eye, &target).normalize();
        let x_axis = up.cross(&z_axis).normalize();
        let y_axis = z_axis.cross(&x_axis);

        let tx = -x_axis.dot(&eye);
        let ty = -y_axis.dot(&eye);
        let tz = -z_axis.dot(&eye);

        Self::new([
            x_axis.x(), y_axis.x(), z_axis.x(), 0.0,
            x_axis.y(), y_axis.y(), z_axis.y(), 0.0,
            x_axis.z(), y_axis.z(), z_axis.z(), 0.0,
            tx,         ty,         tz,         1.0,
        ])
    }

    /// Perspective projection with a vertical field of view in degrees.
    ///
    /// Depth maps through `c = (far + near) / (far - near)` and
    /// `d = -2 * far * near / (far - near)`; element `(3, 2)` is `1` so the
    /// input `z` passes through to clip-space `w`.
    ///
    /// `near == far`, `aspect == 0` or `fov_deg == 0` divide by zero and
    /// yield non-finite entries.
    #[rustfmt::skip]
    pub fn perspective(fov_deg: f32, aspect: f32, near: f32, far: f32) -> Self {
        let tan_half_fov = (deg_to_rad(fov_deg) / 2.0).tan();
        let z_range = far - near;

        let a = 1.0 / (aspect * tan_half_fov);
        let b = 1.0 / tan_half_fov;
        let c = (far + near) / z_range;
        let d = (-2.0 * far * near) / z_range;

        Self::new([
            a,   0.0, 0.0, 0.0,
            0.0, b,   0.0, 0.0,
            0.0, 0.0, c,   1.0,
            0.0, 0.0, d,   0.0,
        ])
    }

    /// Orthographic projection of the box `[left, right] × [bottom, top] ×
    /// [near, far]`.
    ///
    /// Zero-width, zero-height or zero-depth boxes are not guarded.
    #[rustfmt::skip]
    pub fn orthographic(
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    ) -> Self {
        let sx = 2.0 / (right - left);
        let sy = 2.0 / (top - bottom);
        let sz = -2.0 / (far - near);

        let tx = -(right + left) / (right - left);
        let ty = -(top + bottom) / (top - bottom);
        let tz = -(far + near) / (far - near);

        Self::new([
            sx,  0.0, 0.0, 0.0,
            0.0, sy,  0.0, 0.0,
            0.0, 0.0, sz,  0.0,
            tx,  ty,  tz,  1.0,
        ])
    }

    /// Combined `projection * view`, e.g. the light matrix for shadow maps.
    pub fn view_projection(projection: &Self, view: &Self) -> Self {
        projection.multiply(view)
    }

    /// 90° square projection used for cube-map captures.
    pub fn cube_capture_projection() -> Self {
        Self::perspective(90.0, 1.0, 0.1, 10.0)
    }

    /// Multiplies the matrix with another matrix (`self * rhs`).
    ///
    /// Applied to a vector, `rhs` acts first. Callable as
    /// `Mat4::multiply(&lhs, &rhs)`.
    ///
    /// # Examples
    /// ```
    /// use xform_math::{Mat4, Vec3};
    /// let a = Mat4::identity();
    /// let b = Mat4::scale(Vec3::new(2.0, 3.0, 4.0));
    /// assert_eq!(a.multiply(&b).to_array(), b.to_array());
    /// ```
    pub fn multiply(&self, rhs: &Self) -> Self {
        let a = &self.data;
        let b = &rhs.data;
        let mut out = [0.0; 16];
        for col in 0..4 {
            for row in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += a[k * 4 + row] * b[col * 4 + k];
                }
                out[col * 4 + row] = sum;
            }
        }
        Self::new(out)
    }

    /// Returns `lhs * self`, i.e. applies `lhs` after this matrix.
    pub fn pre_multiply(&self, lhs: &Self) -> Self {
        lhs.multiply(self)
    }

    /// Swaps rows and columns.
    pub fn transpose(&self) -> Self {
        let mut out = [0.0; 16];
        for i in 0..4 {
            for j in 0..4 {
                out[i * 4 + j] = self.data[j * 4 + i];
            }
        }
        Self::new(out)
    }

    /// Inverts via Gauss-Jordan elimination with partial pivoting.
    ///
    /// Works on an `[M | I]` pair of `f64` buffers in lockstep. Returns
    /// [`MathError::SingularMatrix`] when a pivot is exactly zero after the
    /// row search.
    pub fn try_inverse(&self) -> Result<Self> {
        let mut work = self.data.map(f64::from);
        let mut inv = Self::IDENTITY.data.map(f64::from);

        for i in 0..4 {
            let mut pivot_row = i;
            let mut max_val = work[i * 4 + i].abs();
            for j in (i + 1)..4 {
                let val = work[j * 4 + i].abs();
                if val > max_val {
                    max_val = val;
                    pivot_row = j;
                }
            }

            if pivot_row != i {
                for k in 0..4 {
                    work.swap(i * 4 + k, pivot_row * 4 + k);
                    inv.swap(i * 4 + k, pivot_row * 4 + k);
                }
            }

            let pivot = work[i * 4 + i];
            if pivot == 0.0 {
                return Err(MathError::SingularMatrix { column: i });
            }

            for k in 0..4 {
                work[i * 4 + k] /= pivot;
                inv[i * 4 + k] /= pivot;
            }

            for j in (0..4).filter(|&j| j != i) {
                let factor = work[j * 4 + i];
                for k in 0..4 {
                    work[j * 4 + k] -= factor * work[i * 4 + k];
                    inv[j * 4 + k] -= factor * inv[i * 4 + k];
                }
            }
        }

        #[allow(clippy::cast_possible_truncation)]
        Ok(Self::new(inv.map(|v| v as f32)))
    }

    /// Inverse, falling back to identity for singular input.
    ///
    /// The fallback is indistinguishable from a matrix whose true inverse
    /// is the identity; use [`Mat4::try_inverse`] or [`Mat4::determinant`]
    /// when that matters.
    pub fn inverse(&self) -> Self {
        match self.try_inverse() {
            Ok(inv) => inv,
            Err(err) => {
                warn!(error = %err, "matrix not invertible; returning identity");
                Self::IDENTITY
            }
        }
    }

    /// Determinant by cofactor expansion along the first row.
    pub fn determinant(&self) -> f32 {
        let m = |r: usize, c: usize| self.at(r, c);

        // 2×2 minors of rows 2 and 3.
        let s0 = m(2, 0) * m(3, 1) - m(2, 1) * m(3, 0);
        let s1 = m(2, 0) * m(3, 2) - m(2, 2) * m(3, 0);
        let s2 = m(2, 0) * m(3, 3) - m(2, 3) * m(3, 0);
        let s3 = m(2, 1) * m(3, 2) - m(2, 2) * m(3, 1);
        let s4 = m(2, 1) * m(3, 3) - m(2, 3) * m(3, 1);
        let s5 = m(2, 2) * m(3, 3) - m(2, 3) * m(3, 2);

        let c0 = m(1, 1) * s5 - m(1, 2) * s4 + m(1, 3) * s3;
        let c1 = m(1, 0) * s5 - m(1, 2) * s2 + m(1, 3) * s1;
        let c2 = m(1, 0) * s4 - m(1, 1) * s2 + m(1, 3) * s0;
        let c3 = m(1, 0) * s3 - m(1, 1) * s1 + m(1, 2) * s0;

        m(0, 0) * c0 - m(0, 1) * c1 + m(0, 2) * c2 - m(0, 3) * c3
    }

    /// Matrix times column vector.
    pub fn multiply_vec4(&self, v: &Vec4) -> Vec4 {
        let a = &self.data;
        let [x, y, z, w] = v.to_array();
        Vec4::new(
            a[0] * x + a[4] * y + a[8] * z + a[12] * w,
            a[1] * x + a[5] * y + a[9] * z + a[13] * w,
            a[2] * x + a[6] * y + a[10] * z + a[14] * w,
            a[3] * x + a[7] * y + a[11] * z + a[15] * w,
        )
    }

    /// Treats `q` as a plain 4-vector `(x, y, z, w)` and multiplies it.
    pub fn multiply_quat(&self, q: &Quat) -> Quat {
        let r = self.multiply_vec4(&Vec4::from(q.to_array()));
        Quat::from(r.to_array())
    }

    /// Transforms a point (assumes `w = 1`) and drops the resulting `w`.
    ///
    /// No perspective divide is performed; for projections use
    /// [`Mat4::multiply_vec4`] followed by [`Vec4::perspective_divide`].
    pub fn multiply_vec3(&self, point: &Vec3) -> Vec3 {
        self.multiply_vec4(&Vec4::point(*point)).xyz()
    }

    /// Transforms a direction vector (ignores translation, `w = 0`).
    pub fn transform_direction(&self, direction: &Vec3) -> Vec3 {
        self.multiply_vec4(&Vec4::direction(*direction)).xyz()
    }

    /// Translation column as a vector.
    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.data[12], self.data[13], self.data[14])
    }

    /// `true` when every element differs by less than `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
        self.data
            .iter()
            .zip(other.data.iter())
            .all(|(a, b)| (a - b).abs() < tolerance)
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl From<[f32; 16]> for Mat4 {
    fn from(value: [f32; 16]) -> Self {
        Self::new(value)
    }
}

impl AsRef<[f32]> for Mat4 {
    fn as_ref(&self) -> &[f32] {
        &self.data
    }
}

fn format_element(value: f32) -> String {
    if value.is_sign_negative() {
        format!("{value:.2}")
    } else {
        format!("+{value:.2}")
    }
}

/// Debug-only rendering, one matrix row per line.
impl fmt::Display for Mat4 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cells = self.data.map(format_element);
        let width = cells.iter().map(String::len).max().unwrap_or(0);
        for row in 0..4 {
            writeln!(
                f,
                "[{:>w$}, {:>w$}, {:>w$}, {:>w$}]",
                cells[row],
                cells[4 + row],
                cells[8 + row],
                cells[12 + row],
                w = width
            )?;
        }
        Ok(())
    }
}

impl Mul for Mat4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, rhs: Vec4) -> Self::Output {
        self.multiply_vec4(&rhs)
    }
}

impl MulAssign for Mat4 {
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.multiply(&rhs);
    }
}

impl MulAssign<&Mat4> for Mat4 {
    fn mul_assign(&mut self, rhs: &Mat4) {
        *self = self.multiply(rhs);
    }
}
