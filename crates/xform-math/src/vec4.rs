// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use bytemuck::{Pod, Zeroable};

use crate::{MathError, Result, Vec3};

/// Homogeneous 4-component vector.
///
/// Only used as the carrier for matrix products and the perspective divide.
/// `w == 0` conventionally marks a direction and `w == 1` a point; nothing
/// enforces it.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Default, Pod, Zeroable)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec4 {
    data: [f32; 4],
}

impl Vec4 {
    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Homogeneous point (`w = 1`).
    pub const fn point(v: Vec3) -> Self {
        Self::new(v.x(), v.y(), v.z(), 1.0)
    }

    /// Homogeneous direction (`w = 0`).
    pub const fn direction(v: Vec3) -> Self {
        Self::new(v.x(), v.y(), v.z(), 0.0)
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

    /// W component.
    pub const fn w(&self) -> f32 {
        self.data[3]
    }

    /// Returns the components as an array.
    pub const fn to_array(self) -> [f32; 4] {
        self.data
    }

    /// Drops `w` without dividing.
    pub const fn xyz(&self) -> Vec3 {
        Vec3::new(self.x(), self.y(), self.z())
    }

    /// Divides all four components by `scalar`.
    pub fn div_scalar(&self, scalar: f32) -> Result<Self> {
        if scalar == 0.0 {
            return Err(MathError::DivisionByZero);
        }
        let [x, y, z, w] = self.data;
        Ok(Self::new(x / scalar, y / scalar, z / scalar, w / scalar))
    }

    /// Projects to 3D by dividing `xyz` by `w`.
    ///
    /// A direction (`w == 0`) has no projection and yields [`Vec3::ZERO`].
    pub fn perspective_divide(&self) -> Vec3 {
        let w = self.w();
        if w == 0.0 {
            return Vec3::ZERO;
        }
        Vec3::new(self.x() / w, self.y() / w, self.z() / w)
    }
}

impl From<[f32; 4]> for Vec4 {
    fn from(value: [f32; 4]) -> Self {
        Self { data: value }
    }
}
