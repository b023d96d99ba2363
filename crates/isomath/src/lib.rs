//! Vector, rotor, and isometry primitives for 3D point-symmetry groups.
//!
//! Every isometry here fixes the origin, so it is either a rotation or a
//! rotation composed with central inversion. Comparisons are approximate and
//! use the tolerance managed by [`approx_cmp`].

pub use approx;

/// Floating-point type used for geometry.
pub type Float = f64;

/// Default tolerance used for approximate comparisons.
pub const EPSILON: Float = 0.000001;

/// Names for the three axes.
pub const AXIS_NAMES: &str = "XYZ";

/// Returns the axis number for a character.
pub fn axis_from_char(c: char) -> Option<u8> {
    AXIS_NAMES.find(c.to_ascii_uppercase()).map(|i| i as u8)
}

/// Asserts that both arguments are approximately equal, using the active
/// tolerance.
#[macro_export]
macro_rules! assert_approx_eq {
    ($a:expr, $b:expr $(,)?) => {
        $crate::approx::assert_abs_diff_eq!($a, $b, epsilon = $crate::approx_cmp::epsilon())
    };
}

#[macro_use]
mod impl_macros;
#[macro_use]
mod vector;

pub mod approx_cmp;
pub mod isometry;
pub mod rotor;

/// Structs, traits, and constants.
pub mod prelude {
    pub use approx::AbsDiffEq;

    pub use crate::approx_cmp::*;
    pub use crate::isometry::{Isometry, IsometryKind};
    pub use crate::rotor::Rotor;
    pub use crate::vector::*;
    pub use crate::{AXIS_NAMES, EPSILON, Float, vector};
}
pub use prelude::*;

#[cfg(test)]
mod tests;
