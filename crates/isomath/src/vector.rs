//! 3D vector math.

use std::fmt;
use std::iter::Sum;
use std::ops::*;

use approx::AbsDiffEq;

use crate::approx_cmp::{approx_eq, epsilon, is_approx_zero};
use crate::{EPSILON, Float};

/// Constructs a 3D vector from its components.
#[macro_export]
macro_rules! vector {
    [$x:expr, $y:expr, $z:expr $(,)?] => {
        $crate::Vector([$x, $y, $z])
    };
}

/// 3D vector.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Vector(pub [Float; 3]);

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [x, y, z] = self.0;
        write!(f, "(")?;
        x.fmt(f)?;
        write!(f, ", ")?;
        y.fmt(f)?;
        write!(f, ", ")?;
        z.fmt(f)?;
        write!(f, ")")
    }
}

impl Vector {
    /// Zero vector.
    pub const ZERO: Self = Self([0.0; 3]);
    /// Unit vector along the X axis.
    pub const X: Self = Self([1.0, 0.0, 0.0]);
    /// Unit vector along the Y axis.
    pub const Y: Self = Self([0.0, 1.0, 0.0]);
    /// Unit vector along the Z axis.
    pub const Z: Self = Self([0.0, 0.0, 1.0]);

    /// Constructs a vector from its components.
    pub const fn new(x: Float, y: Float, z: Float) -> Self {
        Self([x, y, z])
    }
    /// Returns a unit vector along an axis.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= 3`.
    pub fn unit(axis: u8) -> Self {
        let mut ret = Self::ZERO;
        ret[axis] = 1.0;
        ret
    }

    /// Returns the X component.
    pub fn x(self) -> Float {
        self.0[0]
    }
    /// Returns the Y component.
    pub fn y(self) -> Float {
        self.0[1]
    }
    /// Returns the Z component.
    pub fn z(self) -> Float {
        self.0[2]
    }

    /// Returns the dot product of this vector with another.
    pub fn dot(self, rhs: Self) -> Float {
        std::iter::zip(self.0, rhs.0).map(|(l, r)| l * r).sum()
    }
    /// Returns the cross product of this vector with another.
    pub fn cross(self, rhs: Self) -> Self {
        let [ax, ay, az] = self.0;
        let [bx, by, bz] = rhs.0;
        vector![ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx]
    }

    /// Returns the magnitude of the vector.
    pub fn mag(self) -> Float {
        self.mag2().sqrt()
    }
    /// Returns the squared magnitude of the vector.
    pub fn mag2(self) -> Float {
        self.dot(self)
    }

    /// Returns a normalized copy of the vector, or `None` if it is
    /// approximately zero.
    #[must_use]
    pub fn normalize(self) -> Option<Self> {
        let mag = self.mag();
        (mag > EPSILON * EPSILON).then(|| self / mag)
    }
    /// Returns a scaled copy of the vector.
    #[must_use]
    pub fn scale(self, scalar: Float) -> Self {
        Self(self.0.map(|x| x * scalar))
    }

    /// Returns the component of the vector that is perpendicular to `other`,
    /// or `None` if `other` is zero.
    pub fn rejected_from(self, other: Self) -> Option<Self> {
        let mag2 = other.mag2();
        (mag2 > 0.0).then(|| self - other * (self.dot(other) / mag2))
    }

    /// Returns whether the vector is approximately zero.
    pub fn is_approx_zero(self) -> bool {
        self.0.into_iter().all(is_approx_zero)
    }
    /// Returns whether two unit vectors lie on the same line through the
    /// origin, regardless of sign.
    pub fn is_parallel(self, other: Self) -> bool {
        self.cross(other).is_approx_zero()
    }
    /// Returns whether two vectors are perpendicular.
    pub fn is_perpendicular(self, other: Self) -> bool {
        is_approx_zero(self.dot(other))
    }

    /// Returns the vector or its negation, whichever has a positive first
    /// component that is not approximately zero. Two vectors on the same line
    /// through the origin have the same canonical direction.
    #[must_use]
    pub fn canonical_direction(self) -> Self {
        match self.0.into_iter().find(|&x| !is_approx_zero(x)) {
            Some(x) if x < 0.0 => -self,
            _ => self,
        }
    }

    /// Returns whether two unit vectors are approximately equal.
    pub fn approx_eq(self, other: Self) -> bool {
        approx_eq(&self, &other)
    }
}

impl AbsDiffEq for Vector {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        std::iter::zip(self.0, other.0).all(|(l, r)| l.abs_diff_eq(&r, epsilon))
    }
}

impl Index<u8> for Vector {
    type Output = Float;

    fn index(&self, index: u8) -> &Self::Output {
        &self.0[index as usize]
    }
}
impl IndexMut<u8> for Vector {
    fn index_mut(&mut self, index: u8) -> &mut Self::Output {
        &mut self.0[index as usize]
    }
}

impl Add<&Vector> for &Vector {
    type Output = Vector;

    fn add(self, rhs: &Vector) -> Self::Output {
        Vector(std::array::from_fn(|i| self.0[i] + rhs.0[i]))
    }
}
impl Sub<&Vector> for &Vector {
    type Output = Vector;

    fn sub(self, rhs: &Vector) -> Self::Output {
        Vector(std::array::from_fn(|i| self.0[i] - rhs.0[i]))
    }
}
impl_forward_bin_ops_to_ref! {
    impl Add for Vector { fn add() }
    impl Sub for Vector { fn sub() }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        Vector(self.0.map(|x| -x))
    }
}
impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        -*self
    }
}

impl Mul<Float> for Vector {
    type Output = Vector;

    fn mul(self, rhs: Float) -> Self::Output {
        self.scale(rhs)
    }
}
impl Mul<Float> for &Vector {
    type Output = Vector;

    fn mul(self, rhs: Float) -> Self::Output {
        self.scale(rhs)
    }
}
impl Div<Float> for Vector {
    type Output = Vector;

    #[allow(clippy::suspicious_arithmetic_impl)]
    fn div(self, rhs: Float) -> Self::Output {
        self.scale(1.0 / rhs)
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}
impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl From<[Float; 3]> for Vector {
    fn from(value: [Float; 3]) -> Self {
        Self(value)
    }
}

impl Sum for Vector {
    fn sum<I: Iterator<Item = Vector>>(iter: I) -> Self {
        iter.fold(Vector::ZERO, |a, b| a + b)
    }
}
