//! Oriented subgroups of concrete groups.

use isomath::prelude::*;

use crate::setup::adjacent_o3_o5_cos;
use crate::{GroupClass, GroupResult, Setup, SetupValue, SubgroupError, SymmetryGroup};

impl SymmetryGroup {
    /// Returns every geometrically distinct subgroup of this group with the
    /// class `subgroup`.
    ///
    /// Returns [`SubgroupError::Unsupported`] if `subgroup` is not listed in
    /// [`GroupClass::subgroups()`] for this group's class.
    pub fn realise_subgroups(&self, subgroup: GroupClass) -> GroupResult<Vec<SymmetryGroup>> {
        let subgroup = subgroup.canonicalize();
        if !self.class().has_subgroup(subgroup) {
            return Err(SubgroupError::Unsupported {
                group: self.class(),
                subgroup,
            }
            .into());
        }
        if subgroup == self.class() {
            return Ok(vec![self.clone()]);
        }
        self.find_subgroups(subgroup)
    }

    /// Searches for subgroups with the class `subgroup` by building a
    /// candidate for each compatible arrangement of this group's axes.
    ///
    /// Unlike [`SymmetryGroup::realise_subgroups()`], this does not consult
    /// the static subgroup list, so it returns an empty list when there is no
    /// such subgroup.
    pub(crate) fn find_subgroups(&self, subgroup: GroupClass) -> GroupResult<Vec<SymmetryGroup>> {
        let subgroup = subgroup.canonicalize();
        let mut ret: Vec<SymmetryGroup> = vec![];
        for setup in self.candidate_setups(subgroup) {
            let candidate = SymmetryGroup::new(subgroup, &setup)?;
            let is_new = !ret.iter().any(|g| g.elements() == candidate.elements());
            if is_new && candidate.is_subgroup_of(self) {
                ret.push(candidate);
            }
        }
        log::debug!(
            "found {} realisations of {subgroup} in {}",
            ret.len(),
            self.class(),
        );
        Ok(ret)
    }

    fn candidate_setups(&self, subgroup: GroupClass) -> Vec<Setup> {
        if let Some(setups) = self.icosahedral_setups() {
            match subgroup {
                GroupClass::A4 | GroupClass::A4xI => return setups.sub_a4.clone(),
                GroupClass::Dn(5) | GroupClass::DnxI(5) => return setups.sub_d5.clone(),
                GroupClass::Dn(3) | GroupClass::DnxI(3) => return setups.sub_d3.clone(),
                _ => (),
            }
        }

        let perpendicular_pairs = |primary: &[Vector], secondary: &[Vector]| {
            primary
                .iter()
                .flat_map(|&a| {
                    secondary
                        .iter()
                        .filter(move |&&b| a.is_perpendicular(b))
                        .map(move |&b| (a, Some(b)))
                })
                .collect::<Vec<_>>()
        };
        let single = |axes: Vec<Vector>| axes.into_iter().map(|a| (a, None)).collect::<Vec<_>>();

        let two_fold = self.axes_with_fold(2);
        let pairs: Vec<(Vector, Option<Vector>)> = match subgroup {
            GroupClass::E | GroupClass::ExI => vec![(Vector::Z, None)],
            GroupClass::C2nCn(1) => single(self.refl_normals().to_vec()),
            GroupClass::Cn(n) | GroupClass::CnxI(n) | GroupClass::C2nCn(n) => {
                single(self.axes_with_fold(n))
            }
            GroupClass::Dn(n) | GroupClass::DnxI(n) | GroupClass::D2nDn(n) => {
                perpendicular_pairs(&self.axes_with_fold(n), &two_fold)
            }
            GroupClass::DnCn(n) => {
                perpendicular_pairs(&self.axes_with_fold(n), self.refl_normals())
            }
            GroupClass::A4 | GroupClass::A4xI | GroupClass::S4A4 => {
                perpendicular_pairs(&two_fold, &two_fold)
            }
            GroupClass::S4 | GroupClass::S4xI => {
                let four_fold = self.axes_with_fold(4);
                perpendicular_pairs(&four_fold, &four_fold)
            }
            GroupClass::A5 | GroupClass::A5xI => {
                let adjacent_cos = adjacent_o3_o5_cos();
                let five_fold = self.axes_with_fold(5);
                self.axes_with_fold(3)
                    .into_iter()
                    .flat_map(|o3| {
                        five_fold
                            .iter()
                            .flat_map(|&o5| [o5, -o5])
                            .filter(move |o5| approx_eq(&o3.dot(*o5), &adjacent_cos))
                            .map(move |o5| (o3, Some(o5)))
                    })
                    .collect()
            }
        };

        let keys = subgroup.setup_keys();
        pairs
            .into_iter()
            .map(|(primary, secondary)| {
                let values = [Some(primary), secondary].into_iter().flatten();
                std::iter::zip(keys, values)
                    .map(|(&k, v)| (k, SetupValue::Axis(v)))
                    .collect()
            })
            .collect()
    }
}
