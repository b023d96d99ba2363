//! Isometries of 3D space that keep the origin fixed.

use std::fmt;
use std::ops::{Mul, MulAssign};

use approx::AbsDiffEq;

use crate::approx_cmp::*;
use crate::{Float, Rotor, Vector};

/// [Isometry](https://w.wiki/7SP4) of 3D space that keeps the origin fixed.
///
/// Every such isometry is a rotation, optionally followed by central
/// inversion. Reflections and rotary inversions are both represented this
/// way: a reflection through the plane with normal `n` is a half-turn around
/// `n` composed with central inversion.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub struct Isometry {
    rotor: Rotor,
    inverted: bool,
}

impl fmt::Display for Isometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())
    }
}

impl AbsDiffEq for Isometry {
    type Epsilon = Float;

    fn default_epsilon() -> Self::Epsilon {
        epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.inverted == other.inverted && self.rotor.abs_diff_eq(&other.rotor, epsilon)
    }
}

impl From<Rotor> for Isometry {
    fn from(rotor: Rotor) -> Self {
        Self::from_rotor(rotor)
    }
}

impl Isometry {
    /// Returns the identity isometry.
    pub const fn ident() -> Self {
        Self {
            rotor: Rotor::ident(),
            inverted: false,
        }
    }
    /// Returns central inversion, which negates every vector.
    pub const fn central_inversion() -> Self {
        Self {
            rotor: Rotor::ident(),
            inverted: true,
        }
    }
    /// Constructs a direct isometry from a rotor.
    pub const fn from_rotor(rotor: Rotor) -> Self {
        Self {
            rotor,
            inverted: false,
        }
    }

    /// Constructs a rotation by `angle` radians counterclockwise around `axis`.
    /// Returns `None` if the axis is zero.
    pub fn rotation(axis: Vector, angle: Float) -> Option<Self> {
        Rotor::from_axis_angle(axis, angle).map(Self::from_rotor)
    }
    /// Constructs a half-turn around `axis`. Returns `None` if the axis is
    /// zero.
    pub fn half_turn(axis: Vector) -> Option<Self> {
        Rotor::half_turn(axis).map(Self::from_rotor)
    }
    /// Constructs a reflection through the plane with normal vector `normal`.
    /// Returns `None` if the normal is zero.
    pub fn reflection(normal: Vector) -> Option<Self> {
        Some(Self::half_turn(normal)?.inverted())
    }
    /// Constructs a rotation by `angle` radians counterclockwise around `axis`
    /// followed by central inversion. Returns `None` if the axis is zero.
    pub fn rotary_inversion(axis: Vector, angle: Float) -> Option<Self> {
        Some(Self::rotation(axis, angle)?.inverted())
    }
    /// Constructs the isometry described by `kind`. Returns `None` if its axis
    /// is zero.
    pub fn from_kind(kind: &IsometryKind) -> Option<Self> {
        match *kind {
            IsometryKind::Identity => Some(Self::ident()),
            IsometryKind::Rotation { axis, angle } => Self::rotation(axis, angle),
            IsometryKind::HalfTurn { axis } => Self::half_turn(axis),
            IsometryKind::CentralInversion => Some(Self::central_inversion()),
            IsometryKind::Reflection { normal } => Self::reflection(normal),
            IsometryKind::RotaryInversion { axis, angle } => Self::rotary_inversion(axis, angle),
        }
    }

    /// Returns the rotational part of the isometry.
    pub fn rotor(&self) -> Rotor {
        self.rotor
    }
    /// Returns whether the isometry includes central inversion, which is the
    /// case exactly when it reverses orientation.
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }
    /// Returns whether the isometry preserves orientation.
    pub fn is_direct(&self) -> bool {
        !self.inverted
    }
    /// Returns whether this is approximately the identity.
    pub fn is_ident(&self) -> bool {
        !self.inverted && self.rotor.is_ident()
    }

    /// Returns the isometry composed with central inversion.
    #[must_use]
    pub fn inverted(self) -> Self {
        Self {
            rotor: self.rotor,
            inverted: !self.inverted,
        }
    }
    /// Returns the inverse isometry.
    #[must_use]
    pub fn inverse(&self) -> Self {
        Self {
            rotor: self.rotor.reverse(),
            inverted: self.inverted,
        }
    }
    /// Returns the rotational part of the isometry, discarding central
    /// inversion.
    #[must_use]
    pub fn direct_part(&self) -> Self {
        Self::from_rotor(self.rotor)
    }

    /// Classifies the isometry.
    pub fn kind(&self) -> IsometryKind {
        let r = self.rotor.canonicalize();
        let angle = r.angle();
        let axis = r.axis();
        let is_half_turn = approx_eq(&angle, &std::f64::consts::PI);
        match (self.inverted, axis) {
            (false, None) => IsometryKind::Identity,
            (true, None) => IsometryKind::CentralInversion,
            (false, Some(axis)) if is_half_turn => IsometryKind::HalfTurn { axis },
            (true, Some(normal)) if is_half_turn => IsometryKind::Reflection { normal },
            (false, Some(axis)) => IsometryKind::Rotation { axis, angle },
            (true, Some(axis)) => IsometryKind::RotaryInversion { axis, angle },
        }
    }

    /// Returns the smallest `k` such that applying the isometry `k` times
    /// yields the identity, or `None` if the rotation angle is not a rational
    /// multiple of a full turn with small denominator.
    pub fn order(&self) -> Option<u32> {
        let rotor_order = self.rotor.order()?;
        Some(match self.inverted {
            false => rotor_order,
            true if rotor_order % 2 == 0 => rotor_order,
            true => rotor_order * 2,
        })
    }

    /// Transforms a vector by the isometry.
    pub fn transform_vector(&self, v: Vector) -> Vector {
        let ret = self.rotor.transform_vector(v);
        match self.inverted {
            true => -ret,
            false => ret,
        }
    }
    /// Returns `self * other * self⁻¹`.
    #[must_use]
    pub fn conjugate(&self, other: &Isometry) -> Isometry {
        self * other * self.inverse()
    }
}

impl Mul<&Isometry> for &Isometry {
    type Output = Isometry;

    /// Composes two isometries. `a * b` applies `b` first.
    fn mul(self, rhs: &Isometry) -> Self::Output {
        Isometry {
            rotor: self.rotor * rhs.rotor,
            inverted: self.inverted ^ rhs.inverted,
        }
    }
}
impl_forward_bin_ops_to_ref! {
    impl Mul for Isometry { fn mul() }
}
impl MulAssign<&Isometry> for Isometry {
    fn mul_assign(&mut self, rhs: &Isometry) {
        *self = &*self * rhs;
    }
}
impl MulAssign for Isometry {
    fn mul_assign(&mut self, rhs: Isometry) {
        *self *= &rhs;
    }
}

/// Geometric description of an isometry that fixes the origin.
///
/// Axes are unit vectors. Angles are in radians, strictly between zero and
/// PI, measured counterclockwise around the axis.
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", rename_all = "snake_case")
)]
#[derive(Debug, Copy, Clone, PartialEq)]
#[allow(missing_docs)]
pub enum IsometryKind {
    Identity,
    Rotation { axis: Vector, angle: Float },
    HalfTurn { axis: Vector },
    CentralInversion,
    Reflection { normal: Vector },
    RotaryInversion { axis: Vector, angle: Float },
}

impl fmt::Display for IsometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => write!(f, "identity"),
            Self::Rotation { axis, angle } => {
                write!(f, "rotation({axis}, {:.3}°)", angle.to_degrees())
            }
            Self::HalfTurn { axis } => write!(f, "half_turn({axis})"),
            Self::CentralInversion => write!(f, "central_inversion"),
            Self::Reflection { normal } => write!(f, "reflection({normal})"),
            Self::RotaryInversion { axis, angle } => {
                write!(f, "rotary_inversion({axis}, {:.3}°)", angle.to_degrees())
            }
        }
    }
}

impl IsometryKind {
    /// Returns the axis of a rotation, or the normal of a reflection.
    pub fn axis(&self) -> Option<Vector> {
        match *self {
            Self::Identity | Self::CentralInversion => None,
            Self::Rotation { axis, .. }
            | Self::HalfTurn { axis }
            | Self::RotaryInversion { axis, .. } => Some(axis),
            Self::Reflection { normal } => Some(normal),
        }
    }
}
