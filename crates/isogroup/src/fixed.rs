//! Polyhedral groups.

use std::f64::consts::TAU;

use isomath::prelude::*;

use crate::families::{half_turn, rot};
use crate::setup::{Frame, PHI, SetupKey, SetupValue, std_o3_axis, std_o5_axis};
use crate::{IsometrySet, Setup};

/// Returns the 12 rotations of a tetrahedron whose two-fold axes are the
/// frame axes.
pub(crate) fn tetrahedral(frame: &Frame) -> IsometrySet {
    let [a0, a1, a2] = [frame.primary, frame.secondary, frame.tertiary()];
    let mut ret = IsometrySet::ident();
    ret.extend([a0, a1, a2].map(half_turn));
    for diagonal in [a0 + a1 + a2, a0 - a1 - a2, -a0 + a1 - a2, -a0 - a1 + a2] {
        let d = diagonal / diagonal.mag();
        ret.extend([rot(d, TAU / 3.0), rot(d, -TAU / 3.0)]);
    }
    ret
}

/// Returns the 24 rotations of a cube whose four-fold axes are the frame
/// axes.
pub(crate) fn octahedral(frame: &Frame) -> IsometrySet {
    let axes = [frame.primary, frame.secondary, frame.tertiary()];
    let mut ret = IsometrySet::ident();
    for a in axes {
        ret.extend([rot(a, TAU / 4.0), half_turn(a), rot(a, -TAU / 4.0)]);
    }
    let [a0, a1, a2] = axes;
    for diagonal in [a0 + a1 + a2, a0 + a1 - a2, a0 - a1 + a2, a0 - a1 - a2] {
        let d = diagonal / diagonal.mag();
        ret.extend([rot(d, TAU / 3.0), rot(d, -TAU / 3.0)]);
    }
    for (i, j) in [(0, 1), (1, 2), (2, 0)] {
        for edge in [axes[i] + axes[j], axes[i] - axes[j]] {
            ret.insert(half_turn(edge / edge.mag()));
        }
    }
    ret
}

/// Returns the 60 rotations of an icosahedron with a three-fold axis along
/// `frame.primary` and an adjacent five-fold axis along `frame.secondary`.
pub(crate) fn icosahedral(frame: &Frame) -> IsometrySet {
    let axes = IcosahedralAxes::new(frame);
    let mut ret = IsometrySet::ident();
    for a in axes.five_fold {
        ret.extend((1..5).map(|k| rot(a, TAU * k as Float / 5.0)));
    }
    for a in axes.three_fold {
        ret.extend([rot(a, TAU / 3.0), rot(a, -TAU / 3.0)]);
    }
    ret.extend(axes.two_fold.map(half_turn));
    ret
}

/// Rotation axes of an icosahedral group, one direction per axis.
pub(crate) struct IcosahedralAxes {
    pub five_fold: [Vector; 6],
    pub three_fold: [Vector; 10],
    pub two_fold: [Vector; 15],
}

impl IcosahedralAxes {
    /// Returns the axes of the icosahedral group oriented by `frame`.
    pub fn new(frame: &Frame) -> Self {
        let std_basis = orthonormal_basis(std_o3_axis(), std_o5_axis());
        let basis = orthonormal_basis(frame.primary, frame.secondary);
        let map = |v: Vector| -> Vector {
            let v = v / v.mag();
            std::iter::zip(std_basis, basis)
                .map(|(e, f)| f * v.dot(e))
                .sum()
        };

        let ip = 1.0 / PHI;
        let mut five_fold = [Vector::ZERO; 6];
        for (i, s) in [1.0, -1.0].into_iter().enumerate() {
            let cycled = cyclic_permutations(vector![0.0, s, PHI]);
            five_fold[i * 3..i * 3 + 3].copy_from_slice(&cycled.map(map));
        }

        let mut three_fold = [Vector::ZERO; 10];
        for (i, (sx, sy)) in [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)]
            .into_iter()
            .enumerate()
        {
            three_fold[i] = map(vector![sx, sy, 1.0]);
        }
        for (i, s) in [1.0, -1.0].into_iter().enumerate() {
            let cycled = cyclic_permutations(vector![ip, 0.0, s * PHI]);
            three_fold[4 + i * 3..4 + i * 3 + 3].copy_from_slice(&cycled.map(map));
        }

        let mut two_fold = [Vector::ZERO; 15];
        two_fold[..3].copy_from_slice(&[Vector::X, Vector::Y, Vector::Z].map(map));
        for (i, (s1, s2)) in [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0), (-1.0, -1.0)]
            .into_iter()
            .enumerate()
        {
            let cycled = cyclic_permutations(vector![PHI, s1, s2 * ip]);
            two_fold[3 + i * 3..3 + i * 3 + 3].copy_from_slice(&cycled.map(map));
        }

        Self {
            five_fold,
            three_fold,
            two_fold,
        }
    }
}

fn cyclic_permutations(Vector([x, y, z]): Vector) -> [Vector; 3] {
    [vector![x, y, z], vector![z, x, y], vector![y, z, x]]
}

/// Returns an orthonormal basis whose first vector is along `p` and whose
/// second vector is in the plane spanned by `p` and `s`. `p` and `s` must be
/// linearly independent.
fn orthonormal_basis(p: Vector, s: Vector) -> [Vector; 3] {
    let e1 = p / p.mag();
    let r = s - e1 * s.dot(e1);
    let e2 = r / r.mag();
    [e1, e2, e1.cross(e2)]
}

/// Setups of the subgroups of an icosahedral group that are not determined
/// by a single axis.
#[derive(Debug, Clone, PartialEq)]
pub struct IcosahedralSetups {
    /// Setups for the five tetrahedral subgroups, one for each triple of
    /// mutually orthogonal two-fold axes.
    pub sub_a4: Vec<Setup>,
    /// Setups for the six `D5` subgroups, one for each five-fold axis paired
    /// with its first orthogonal two-fold axis.
    pub sub_d5: Vec<Setup>,
    /// Setups for the ten `D3` subgroups, one for each three-fold axis paired
    /// with its first orthogonal two-fold axis.
    pub sub_d3: Vec<Setup>,
}

impl IcosahedralSetups {
    /// Computes the setups from the rotation axes of an icosahedral group.
    pub(crate) fn new(five_fold: &[Vector], three_fold: &[Vector], two_fold: &[Vector]) -> Self {
        let mut sub_a4 = vec![];
        let mut used = vec![false; two_fold.len()];
        for (i, &a0) in two_fold.iter().enumerate() {
            if used[i] {
                continue;
            }
            let orthogonal: Vec<usize> = (i + 1..two_fold.len())
                .filter(|&j| a0.is_perpendicular(two_fold[j]))
                .collect();
            let Some(&j) = orthogonal.first() else {
                continue;
            };
            used[i] = true;
            for &k in &orthogonal {
                used[k] = true;
            }
            sub_a4.push(Setup::from([
                (SetupKey::O2Axis0, SetupValue::Axis(a0)),
                (SetupKey::O2Axis1, SetupValue::Axis(two_fold[j])),
            ]));
        }

        let dihedral_setups = |axes: &[Vector], n: u32| -> Vec<Setup> {
            axes.iter()
                .filter_map(|&axis_n| {
                    let &axis_2 = two_fold.iter().find(|b| axis_n.is_perpendicular(**b))?;
                    Some(Setup::from([
                        (SetupKey::AxisN, SetupValue::Axis(axis_n)),
                        (SetupKey::Axis2, SetupValue::Axis(axis_2)),
                        (SetupKey::N, SetupValue::Order(n)),
                    ]))
                })
                .collect()
        };

        Self {
            sub_a4,
            sub_d5: dihedral_setups(five_fold, 5),
            sub_d3: dihedral_setups(three_fold, 3),
        }
    }
}
