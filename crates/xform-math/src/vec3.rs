// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::fmt;
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use bytemuck::{Pod, Zeroable};

use crate::{clamp01, Mat4, MathError, Prng, Result, Vec4, EPSILON};

/// 3D vector with value semantics.
///
/// * Components may represent points or directions; the type does not track
///   which. Use [`Mat4::multiply_vec3`] for points (homogeneous `w = 1`) and
///   [`Mat4::transform_direction`] for directions (`w = 0`).
/// * Every pure operation is callable either as `a.op(&b)` or as
///   `Vec3::op(&a, &b)`; mutating variants carry an `_in_place` suffix and
///   return `&mut Self` for chaining.
/// * Storage is `#[repr(C)] [f32; 3]` so slices can be cast to bytes.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    data: [f32; 3],
}

impl Vec3 {
    /// Number of scalars per vector in a packed buffer.
    pub const SIZE: usize = 3;

    /// `(0, 0, 0)`.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// `(1, 1, 1)`.
    pub const ONE: Self = Self::new(1.0, 1.0, 1.0);

    /// Unit vector pointing along the positive X axis.
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit vector pointing along the positive Y axis.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit vector pointing along the positive Z axis.
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// `(0, 1, 0)`.
    pub const UP: Self = Self::new(0.0, 1.0, 0.0);

    /// `(0, -1, 0)`.
    pub const DOWN: Self = Self::new(0.0, -1.0, 0.0);

    /// `(1, 0, 0)`.
    pub const RIGHT: Self = Self::new(1.0, 0.0, 0.0);

    /// `(-1, 0, 0)`.
    pub const LEFT: Self = Self::new(-1.0, 0.0, 0.0);

    /// `(0, 0, 1)`.
    pub const FORWARD: Self = Self::new(0.0, 0.0, 1.0);

    /// `(0, 0, -1)`.
    pub const BACK: Self = Self::new(0.0, 0.0, -1.0);

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z] }
    }

    /// Creates a vector with every component set to `value`.
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Returns the zero vector.
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Builds a vector from the first three scalars of `values`.
    ///
    /// Returns [`MathError::BufferLength`] when fewer than three are supplied.
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        match values {
            [x, y, z, ..] => Ok(Self::new(*x, *y, *z)),
            _ => Err(MathError::BufferLength {
                len: values.len(),
                stride: Self::SIZE,
            }),
        }
    }

    /// Samples each component uniformly from `[min, max)`.
    pub fn random(prng: &mut Prng, min: f32, max: f32) -> Result<Self> {
        Ok(Self::new(
            prng.next_f32_range(min, max)?,
            prng.next_f32_range(min, max)?,
            prng.next_f32_range(min, max)?,
        ))
    }

    /// X component.
    pub const fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y component.
    pub const fn y(&self) -> f32 {
        self.data[1]
    }

    /// Z component.
    pub const fn z(&self) -> f32 {
        self.data[2]
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

    /// Overwrites all components.
    pub fn set(&mut self, x: f32, y: f32, z: f32) -> &mut Self {
        self.data = [x, y, z];
        self
    }

    /// Returns the components as an array.
    pub const fn to_array(self) -> [f32; 3] {
        self.data
    }

    pub(crate) fn component(&self, idx: usize) -> f32 {
        self.data[idx]
    }

    fn map(&self, f: impl Fn(f32) -> f32) -> Self {
        Self::new(f(self.x()), f(self.y()), f(self.z()))
    }

    fn zip(&self, other: &Self, f: impl Fn(f32, f32) -> f32) -> Self {
        Self::new(
            f(self.x(), other.x()),
            f(self.y(), other.y()),
            f(self.z(), other.z()),
        )
    }

    /// Adds two vectors.
    pub fn add(&self, other: &Self) -> Self {
        self.zip(other, |a, b| a + b)
    }

    /// Subtracts another vector.
    pub fn sub(&self, other: &Self) -> Self {
        self.zip(other, |a, b| a - b)
    }

    /// Component-wise product.
    pub fn mul(&self, other: &Self) -> Self {
        self.zip(other, |a, b| a * b)
    }

    /// Component-wise quotient.
    ///
    /// A zero divisor component produces `0` in that component instead of
    /// `inf`/`NaN`.
    pub fn div(&self, other: &Self) -> Self {
        self.zip(other, |a, b| if b == 0.0 { 0.0 } else { a / b })
    }

    /// Scales the vector by a scalar.
    pub fn scale(&self, scalar: f32) -> Self {
        self.map(|c| c * scalar)
    }

    /// Divides every component by `scalar`.
    pub fn div_scalar(&self, scalar: f32) -> Result<Self> {
        if scalar == 0.0 {
            return Err(MathError::DivisionByZero);
        }
        Ok(self.map(|c| c / scalar))
    }

    /// Negates every component.
    pub fn neg(&self) -> Self {
        self.map(|c| -c)
    }

    /// Component-wise absolute value.
    pub fn abs(&self) -> Self {
        self.map(f32::abs)
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> f32 {
        self.x() * other.x() + self.y() * other.y() + self.z() * other.z()
    }

    /// Cross product with another vector (right-handed).
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.data;
        let [bx, by, bz] = other.data;
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Vector length (magnitude), accumulated in f64.
    pub fn length(&self) -> f32 {
        self.length_f64() as f32
    }

    fn length_f64(&self) -> f64 {
        self.data
            .iter()
            .map(|&c| f64::from(c) * f64::from(c))
            .sum::<f64>()
            .sqrt()
    }

    /// Squared magnitude of the vector.
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Self) -> f32 {
        self.sub(other).length()
    }

    /// Squared Euclidean distance to `other`.
    pub fn distance_squared(&self, other: &Self) -> f32 {
        self.sub(other).length_squared()
    }

    /// Normalises the vector, returning the zero vector if length < [`EPSILON`].
    pub fn normalize(&self) -> Self {
        let len = self.length_f64();
        if len < f64::from(EPSILON) {
            return Self::ZERO;
        }
        Self {
            data: self.data.map(|c| (f64::from(c) / len) as f32),
        }
    }

    /// Interpolates towards `end`; `t` is clamped to `[0, 1]`.
    pub fn lerp(&self, end: &Self, t: f32) -> Self {
        self.lerp_unclamped(end, clamp01(t))
    }

    /// Interpolates towards `end` without clamping `t`.
    pub fn lerp_unclamped(&self, end: &Self, t: f32) -> Self {
        self.zip(end, |a, b| a + (b - a) * t)
    }

    /// Point halfway between `self` and `other`.
    pub fn midpoint(&self, other: &Self) -> Self {
        self.zip(other, |a, b| (a + b) / 2.0)
    }

    /// Component-wise minimum.
    pub fn min(&self, other: &Self) -> Self {
        self.zip(other, f32::min)
    }

    /// Component-wise maximum.
    pub fn max(&self, other: &Self) -> Self {
        self.zip(other, f32::max)
    }

    /// Clamps each component into `[min, max]` of the matching bound.
    pub fn clamp(&self, min: &Self, max: &Self) -> Self {
        Self::new(
            min.x().max(self.x().min(max.x())),
            min.y().max(self.y().min(max.y())),
            min.z().max(self.z().min(max.z())),
        )
    }

    /// Raises every component to at least `floor`.
    pub fn at_least(&self, floor: f32) -> Self {
        self.map(|c| c.max(floor))
    }

    /// Lowers every component to at most `ceiling`.
    pub fn at_most(&self, ceiling: f32) -> Self {
        self.map(|c| c.min(ceiling))
    }

    /// Component-wise minimum over a slice.
    pub fn min_of(vectors: &[Self]) -> Result<Self> {
        vectors
            .iter()
            .copied()
            .reduce(|acc, v| acc.min(&v))
            .ok_or(MathError::EmptyInput)
    }

    /// Component-wise maximum over a slice.
    pub fn max_of(vectors: &[Self]) -> Result<Self> {
        vectors
            .iter()
            .copied()
            .reduce(|acc, v| acc.max(&v))
            .ok_or(MathError::EmptyInput)
    }

    /// `true` when every component differs by less than `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f32) -> bool {
        (0..3).all(|i| (self.component(i) - other.component(i)).abs() < tolerance)
    }

    /// [`Vec3::approx_eq`] with the default [`EPSILON`] tolerance.
    pub fn equals(&self, other: &Self) -> bool {
        self.approx_eq(other, EPSILON)
    }

    /// Transforms this point by `m` (homogeneous `w = 1`, no divide).
    pub fn transform(&self, m: &Mat4) -> Self {
        m.multiply_vec3(self)
    }

    /// Promotes to a homogeneous point (`w = 1`).
    pub fn to_vec4(&self) -> Vec4 {
        Vec4::point(*self)
    }

    /// In-place [`Vec3::add`].
    pub fn add_in_place(&mut self, other: &Self) -> &mut Self {
        *self = Self::add(self, other);
        self
    }

    /// In-place [`Vec3::sub`].
    pub fn sub_in_place(&mut self, other: &Self) -> &mut Self {
        *self = Self::sub(self, other);
        self
    }

    /// In-place [`Vec3::scale`].
    pub fn scale_in_place(&mut self, scalar: f32) -> &mut Self {
        *self = Self::scale(self, scalar);
        self
    }

    /// In-place [`Vec3::normalize`]; degenerate vectors become zero.
    pub fn normalize_in_place(&mut self) -> &mut Self {
        *self = Self::normalize(self);
        self
    }

    /// In-place [`Vec3::min`].
    pub fn min_in_place(&mut self, other: &Self) -> &mut Self {
        *self = Self::min(self, other);
        self
    }

    /// In-place [`Vec3::max`].
    pub fn max_in_place(&mut self, other: &Self) -> &mut Self {
        *self = Self::max(self, other);
        self
    }

    /// Packs vectors into an interleaved `x, y, z` buffer in input order.
    pub fn pack(vectors: &[Self]) -> Vec<f32> {
        bytemuck::cast_slice::<Self, f32>(vectors).to_vec()
    }

    /// Splits an interleaved `x, y, z` buffer back into vectors.
    ///
    /// Returns [`MathError::BufferLength`] if `data.len()` is not a multiple
    /// of three.
    pub fn unpack(data: &[f32]) -> Result<Vec<Self>> {
        if data.len() % Self::SIZE != 0 {
            return Err(MathError::BufferLength {
                len: data.len(),
                stride: Self::SIZE,
            });
        }
        Ok(data
            .chunks_exact(Self::SIZE)
            .map(|c| Self::new(c[0], c[1], c[2]))
            .collect())
    }
}

/// Converts a 3-element `[f32; 3]` array into a `Vec3` interpreted as `(x, y, z)`.
///
/// # Examples
/// ```
/// use xform_math::Vec3;
/// let v = Vec3::from([1.0, 2.0, 3.0]);
/// assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
/// ```
impl From<[f32; 3]> for Vec3 {
    fn from(value: [f32; 3]) -> Self {
        Self { data: value }
    }
}

impl From<Vec3> for [f32; 3] {
    fn from(value: Vec3) -> Self {
        value.data
    }
}

impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Vec3({:.2}, {:.2}, {:.2})", self.x(), self.y(), self.z())
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Self::add(&self, &rhs)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Self::sub(&self, &rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::neg(&self)
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f32) -> Self::Output {
        self.scale(rhs)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        self.add_in_place(&rhs);
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        self.sub_in_place(&rhs);
    }
}

impl MulAssign<f32> for Vec3 {
    fn mul_assign(&mut self, rhs: f32) {
        self.scale_in_place(rhs);
    }
}
