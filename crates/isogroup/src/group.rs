//! Concrete point groups: a class together with its oriented elements.

use std::collections::BTreeMap;
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, OnceLock};

use isomath::prelude::*;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::families;
use crate::fixed::IcosahedralSetups;
use crate::setup::{self, direct_setup, resolve, std_frame};
use crate::{GroupClass, GroupError, GroupResult, IsometrySet, Setup};

/// Axes that share a rotation order.
pub type AxisList = SmallVec<[Vector; 4]>;

/// Concrete point group: a class together with an oriented set of isometries.
#[derive(Debug, Clone)]
pub struct SymmetryGroup {
    class: GroupClass,
    elements: IsometrySet,
    /// Setup that generated the group, or `None` if it was constructed from
    /// an explicit list of isometries.
    setup: Option<Setup>,

    /// Each rotation axis with its maximum fold, in the order encountered.
    axes: Vec<(Vector, u32)>,
    rot_axes: BTreeMap<u32, AxisList>,
    refl_normals: AxisList,

    icosahedral_setups: OnceLock<IcosahedralSetups>,
}

impl PartialEq for SymmetryGroup {
    fn eq(&self, other: &Self) -> bool {
        self.class == other.class && self.elements == other.elements
    }
}

impl fmt::Display for SymmetryGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class)
    }
}

impl Deref for SymmetryGroup {
    type Target = IsometrySet;

    fn deref(&self) -> &Self::Target {
        &self.elements
    }
}

impl SymmetryGroup {
    /// Constructs a group of the given class.
    ///
    /// Keys missing from `setup` take their value from the standard
    /// orientation of the class.
    pub fn new(class: GroupClass, setup: &Setup) -> GroupResult<Self> {
        let class = class.canonicalize();
        let (frame, full_setup) = resolve(class, setup)?;
        let elements = families::build(class, &frame);
        Ok(Self::from_parts(class, elements, Some(full_setup)))
    }
    /// Constructs a group of the given class in its standard orientation.
    pub fn new_std(class: GroupClass) -> Self {
        let class = class.canonicalize();
        let elements = families::build(class, &std_frame(class));
        Self::from_parts(class, elements, Some(setup::std_setup(class)))
    }

    /// Constructs a group of the given class from an explicit set of
    /// isometries, checking that the isometries actually form a group of
    /// that class.
    pub fn from_isometries(class: GroupClass, elements: IsometrySet) -> GroupResult<Self> {
        let class = class.canonicalize();
        let mismatch = |reason: String| GroupError::ClassMismatch { class, reason };
        if elements.len() != class.order() {
            return Err(mismatch(format!(
                "expected {} isometries, got {}",
                class.order(),
                elements.len(),
            )));
        }
        if !elements.is_group() {
            return Err(mismatch("isometries do not form a group".to_owned()));
        }
        if !census_eq(&census(&elements), &census(&Self::new_std(class))) {
            return Err(mismatch(
                "rotation angles do not match those of the class".to_owned(),
            ));
        }
        Ok(Self::from_parts(class, elements, None))
    }

    /// Identifies the class of a set of isometries and constructs a group
    /// from it.
    pub fn identify(elements: IsometrySet) -> GroupResult<Self> {
        if !elements.is_group() {
            return Err(GroupError::Unidentified {
                reason: "isometries do not form a group".to_owned(),
            });
        }
        let set_census = census(&elements);
        let class = GroupClass::with_order(elements.len())
            .into_iter()
            .find(|&class| census_eq(&set_census, &census(&Self::new_std(class))))
            .ok_or_else(|| GroupError::Unidentified {
                reason: format!("no class of order {} matches", elements.len()),
            })?;
        log::debug!("identified {} isometries as {class}", elements.len());
        Ok(Self::from_parts(class, elements, None))
    }

    /// Constructs a group from its class and elements, which must already be
    /// consistent with each other.
    pub(crate) fn from_parts(
        class: GroupClass,
        elements: IsometrySet,
        setup: Option<Setup>,
    ) -> Self {
        let mut axes: Vec<(Vector, u32)> = vec![];
        let mut refl_normals = AxisList::new();
        for e in &elements {
            let rotor = e.rotor();
            let Some(axis) = rotor.axis().map(|v| v.canonical_direction()) else {
                continue;
            };
            if e.is_direct() {
                let fold = rotor.order().unwrap_or(1);
                match axes.iter_mut().find(|(a, _)| approx_eq(a, &axis)) {
                    Some((_, max_fold)) => *max_fold = (*max_fold).max(fold),
                    None => axes.push((axis, fold)),
                }
            } else if matches!(e.kind(), IsometryKind::Reflection { .. })
                && !refl_normals.iter().any(|n| approx_eq(n, &axis))
            {
                refl_normals.push(axis);
            }
        }

        let mut rot_axes = BTreeMap::<u32, AxisList>::new();
        for &(axis, fold) in &axes {
            rot_axes.entry(fold).or_default().push(axis);
        }

        Self {
            class,
            elements,
            setup,

            axes,
            rot_axes,
            refl_normals,

            icosahedral_setups: OnceLock::new(),
        }
    }

    /// Returns the class of the group.
    pub fn class(&self) -> GroupClass {
        self.class
    }
    /// Returns the elements of the group.
    pub fn elements(&self) -> &IsometrySet {
        &self.elements
    }
    /// Returns the setup that generated the group, or `None` if it was
    /// constructed from an explicit list of isometries.
    pub fn setup(&self) -> Option<&Setup> {
        self.setup.as_ref()
    }
    /// Returns the rotation axes of the group, grouped by their maximum fold.
    ///
    /// Each axis appears once, in its canonical direction.
    pub fn rot_axes(&self) -> &BTreeMap<u32, AxisList> {
        &self.rot_axes
    }
    /// Returns the normal vectors of the mirror planes of the group.
    pub fn refl_normals(&self) -> &[Vector] {
        &self.refl_normals
    }
    /// Returns every rotation axis whose maximum fold is a multiple of `k`,
    /// which is every axis that has a rotation of order `k`.
    pub fn axes_with_fold(&self, k: u32) -> Vec<Vector> {
        self.axes
            .iter()
            .filter(|&&(_, fold)| k != 0 && fold % k == 0)
            .map(|&(axis, _)| axis)
            .collect()
    }

    /// Returns the setups of the tetrahedral and dihedral subgroups of an
    /// icosahedral group, or `None` if the group is not icosahedral.
    ///
    /// The setups are computed on first access.
    pub fn icosahedral_setups(&self) -> Option<&IcosahedralSetups> {
        if !matches!(self.class, GroupClass::A5 | GroupClass::A5xI) {
            return None;
        }
        Some(self.icosahedral_setups.get_or_init(|| {
            IcosahedralSetups::new(
                &self.axes_with_fold(5),
                &self.axes_with_fold(3),
                &self.axes_with_fold(2),
            )
        }))
    }

    /// Returns every class that occurs as a subgroup of this group's class.
    pub fn subgroups(&self) -> Arc<[GroupClass]> {
        self.class.subgroups()
    }

    /// Returns the subgroup of orientation-preserving isometries.
    pub fn direct_parent(&self) -> SymmetryGroup {
        let setup = self.setup.as_ref().map(|s| direct_setup(self.class, s));
        Self::from_parts(
            self.class.direct_class(),
            self.elements.direct_elements(),
            setup,
        )
    }

    /// Returns whether every element of this group is an element of `other`.
    pub fn is_subgroup_of(&self, other: &SymmetryGroup) -> bool {
        self.elements.is_subgroup(&other.elements, false)
    }
}

/// Returns whether each isometry inverts space along with its rotation
/// angle, sorted.
///
/// Two point groups have the same class exactly when they have the same
/// census.
fn census(elements: &IsometrySet) -> Vec<(bool, Float)> {
    elements
        .iter()
        .map(|e| (e.is_inverted(), e.rotor().angle()))
        .sorted_by(|(inv1, angle1), (inv2, angle2)| {
            inv1.cmp(inv2).then(approx_cmp(*angle1, *angle2))
        })
        .collect()
}

fn census_eq(a: &[(bool, Float)], b: &[(bool, Float)]) -> bool {
    a.len() == b.len()
        && std::iter::zip(a, b)
            .all(|((inv1, angle1), (inv2, angle2))| inv1 == inv2 && approx_eq(angle1, angle2))
}
