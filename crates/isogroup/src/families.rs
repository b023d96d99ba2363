//! Element lists for every group class.

use std::f64::consts::{PI, TAU};

use isomath::prelude::*;

use crate::setup::Frame;
use crate::{GroupClass, IsometrySet, fixed};

/// Returns the rotation by `angle` around a unit vector.
pub(crate) fn rot(axis: Vector, angle: Float) -> Isometry {
    Isometry::from_rotor(Rotor::from_axis_angle_normalized(axis, angle))
}
/// Returns the half-turn around a unit vector.
pub(crate) fn half_turn(axis: Vector) -> Isometry {
    rot(axis, PI)
}

/// Returns the rotations by multiples of `2π/n` around `axis`.
pub(crate) fn cyclic(n: u32, axis: Vector) -> IsometrySet {
    (0..n.max(1))
        .map(|k| rot(axis, TAU * k as Float / n.max(1) as Float))
        .collect()
}

/// Returns `Cn` around `axis_n` plus the half-turn around `axis_2` composed
/// with each of those rotations.
pub(crate) fn dihedral(n: u32, axis_n: Vector, axis_2: Vector) -> IsometrySet {
    let c = cyclic(n, axis_n);
    let flipped = c.premultiply_isometry(&half_turn(axis_2));
    c.union(&flipped)
}

/// Returns `direct ∪ (superset - direct) * I`.
///
/// `direct` must be an index-2 subgroup of `superset`.
pub(crate) fn mixed(direct: &IsometrySet, superset: &IsometrySet) -> IsometrySet {
    let mut ret = direct.clone();
    ret.extend(superset.difference(direct).into_iter().map(Isometry::inverted));
    ret
}

/// Returns the elements of a canonical class oriented by `frame`.
pub(crate) fn build(class: GroupClass, frame: &Frame) -> IsometrySet {
    let Frame { primary, secondary } = *frame;
    match class {
        GroupClass::E => IsometrySet::ident(),
        GroupClass::ExI => IsometrySet::ident().with_central_inversion(),

        GroupClass::Cn(n) => cyclic(n, primary),
        GroupClass::CnxI(n) => cyclic(n, primary).with_central_inversion(),
        GroupClass::C2nCn(n) => mixed(&cyclic(n, primary), &cyclic(2 * n, primary)),

        GroupClass::Dn(n) => dihedral(n, primary, secondary),
        GroupClass::DnCn(n) => mixed(&cyclic(n, primary), &dihedral(n, primary, secondary)),
        GroupClass::DnxI(n) => dihedral(n, primary, secondary).with_central_inversion(),
        GroupClass::D2nDn(n) => mixed(
            &dihedral(n, primary, secondary),
            &dihedral(2 * n, primary, secondary),
        ),

        GroupClass::A4 => fixed::tetrahedral(frame),
        GroupClass::A4xI => fixed::tetrahedral(frame).with_central_inversion(),
        GroupClass::S4A4 => mixed(&fixed::tetrahedral(frame), &fixed::octahedral(frame)),
        GroupClass::S4 => fixed::octahedral(frame),
        GroupClass::S4xI => fixed::octahedral(frame).with_central_inversion(),
        GroupClass::A5 => fixed::icosahedral(frame),
        GroupClass::A5xI => fixed::icosahedral(frame).with_central_inversion(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cyclic() {
        let c5 = cyclic(5, Vector::Z);
        assert_eq!(c5.len(), 5);
        assert!(c5.is_group());
        assert!(c5.contains(&rot(Vector::Z, -TAU / 5.0)));
    }

    #[test]
    fn test_mixed_reflection_group() {
        // `C2C1` is a single mirror plane.
        let cs = mixed(&cyclic(1, Vector::Y), &cyclic(2, Vector::Y));
        assert_eq!(cs.len(), 2);
        let reflection = Isometry::reflection(Vector::Y).unwrap();
        assert!(cs.contains(&reflection));
        isomath::assert_approx_eq!(
            reflection.transform_vector(vector![1.0, 2.0, 3.0]),
            vector![1.0, -2.0, 3.0],
        );
    }

    #[test]
    fn test_dihedral_mirrors() {
        let frame = Frame {
            primary: Vector::Z,
            secondary: Vector::X,
        };
        let d3c3 = build(GroupClass::DnCn(3), &frame);
        assert_eq!(d3c3.len(), 6);
        assert!(d3c3.is_group());
        let mirrors = d3c3.iter().filter(|e| e.is_inverted()).count();
        assert_eq!(mirrors, 3);
        assert!(d3c3.contains(&Isometry::reflection(Vector::X).unwrap()));
        assert!(!d3c3.contains(&Isometry::reflection(Vector::Y).unwrap()));
    }
}
