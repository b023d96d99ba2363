//! Unit quaternions representing 3D rotations.

use std::fmt;
use std::ops::{Mul, Neg};

use approx::AbsDiffEq;

use crate::approx_cmp::*;
use crate::{Float, Vector};

/// Largest rotation order that [`Rotor::order()`] searches for.
pub const MAX_ROTATION_ORDER: u32 = 1000;

/// Rotation represented by a unit quaternion.
///
/// A rotor and its negation represent the same rotation. Approximate
/// comparison treats them as equal; exact comparison does not.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rotor {
    /// Scalar component: `cos(angle / 2)`.
    s: Float,
    /// Vector component: `sin(angle / 2)` times the rotation axis.
    v: Vector,
}

impl Default for Rotor {
    fn default() -> Self {
        Self::ident()
    }
}

impl fmt::Display for Rotor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.axis() {
            Some(axis) => write!(f, "rot({axis}, {:.3}°)", self.angle().to_degrees()),
            None => write!(f, "ident"),
        }
    }
}

impl AbsDiffEq for Rotor {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        let same = |a: &Rotor, b: &Rotor| {
            a.s.abs_diff_eq(&b.s, epsilon) && a.v.abs_diff_eq(&b.v, epsilon)
        };
        same(self, other) || same(self, &-other)
    }
}

impl Rotor {
    /// Returns the identity rotor.
    pub const fn ident() -> Self {
        Self {
            s: 1.0,
            v: Vector::ZERO,
        }
    }

    /// Constructs a rotation by `angle` radians counterclockwise around `axis`.
    /// Returns `None` if the axis is zero.
    pub fn from_axis_angle(axis: Vector, angle: Float) -> Option<Self> {
        Some(Self::from_axis_angle_normalized(axis.normalize()?, angle))
    }
    /// Constructs a rotation by `angle` radians counterclockwise around `axis`.
    ///
    /// `axis` **must** be a unit vector.
    pub fn from_axis_angle_normalized(axis: Vector, angle: Float) -> Self {
        let half_angle = angle / 2.0;
        Self {
            s: half_angle.cos(),
            v: axis * half_angle.sin(),
        }
    }
    /// Constructs a half-turn around `axis`. Returns `None` if the axis is
    /// zero.
    pub fn half_turn(axis: Vector) -> Option<Self> {
        Some(Self {
            s: 0.0,
            v: axis.normalize()?,
        })
    }

    /// Returns the scalar component of the quaternion.
    pub fn s(&self) -> Float {
        self.s
    }
    /// Returns the vector component of the quaternion.
    pub fn v(&self) -> Vector {
        self.v
    }

    /// Returns the magnitude of the quaternion, which should always be one.
    pub fn mag(&self) -> Float {
        (self.s * self.s + self.v.mag2()).sqrt()
    }
    /// Normalizes the quaternion so that its magnitude is one.
    #[must_use]
    pub fn normalize(self) -> Option<Self> {
        let mag = self.mag();
        (mag > 0.0 && mag.is_finite()).then(|| Self {
            s: self.s / mag,
            v: self.v / mag,
        })
    }

    /// Returns the reverse rotor, which is also its inverse.
    #[must_use]
    pub fn reverse(&self) -> Self {
        Self {
            s: self.s,
            v: -self.v,
        }
    }

    /// Returns the equivalent quaternion whose scalar component is positive.
    /// For half-turns, the axis is put in its canonical direction.
    #[must_use]
    pub fn canonicalize(&self) -> Self {
        if is_approx_zero(self.s) {
            Self {
                s: 0.0,
                v: self.v.canonical_direction(),
            }
        } else if self.s < 0.0 {
            -self
        } else {
            *self
        }
    }

    /// Returns whether this is approximately the identity rotation.
    pub fn is_ident(&self) -> bool {
        self.v.is_approx_zero()
    }
    /// Returns the angle of the rotation in radians, in the range 0 to PI.
    pub fn angle(&self) -> Float {
        self.s.abs().clamp(0.0, 1.0).acos() * 2.0
    }
    /// Returns the rotation axis, oriented so that the rotation by
    /// [`Rotor::angle()`] is counterclockwise around it. Returns `None` for
    /// the identity.
    pub fn axis(&self) -> Option<Vector> {
        if self.is_ident() {
            return None;
        }
        self.canonicalize().v.normalize()
    }

    /// Returns the smallest `k` such that applying the rotation `k` times
    /// yields the identity, or `None` if there is no such `k` up to
    /// [`MAX_ROTATION_ORDER`].
    pub fn order(&self) -> Option<u32> {
        let turns = self.angle() / std::f64::consts::TAU;
        (1..=MAX_ROTATION_ORDER).find(|&k| to_approx_integer(turns * k as Float).is_some())
    }

    /// Transforms a vector by the rotation.
    pub fn transform_vector(&self, p: Vector) -> Vector {
        let t = self.v.cross(p) * 2.0;
        p + t * self.s + self.v.cross(t)
    }
}

impl Neg for Rotor {
    type Output = Rotor;

    fn neg(self) -> Self::Output {
        Rotor {
            s: -self.s,
            v: -self.v,
        }
    }
}
impl Neg for &Rotor {
    type Output = Rotor;

    fn neg(self) -> Self::Output {
        -*self
    }
}

impl Mul<&Rotor> for &Rotor {
    type Output = Rotor;

    /// Composes two rotations. `a * b` applies `b` first.
    fn mul(self, rhs: &Rotor) -> Self::Output {
        Rotor {
            s: self.s * rhs.s - self.v.dot(rhs.v),
            v: rhs.v * self.s + self.v * rhs.s + self.v.cross(rhs.v),
        }
    }
}
impl_forward_bin_ops_to_ref! {
    impl Mul for Rotor { fn mul() }
}
