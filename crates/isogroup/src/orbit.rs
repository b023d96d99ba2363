//! Dividing the orbit of a symmetric object into uniformly coloured classes.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use isomath::prelude::*;
use parking_lot::Mutex;

use crate::{GroupClass, GroupResult, IsometrySet, SubgroupError, SymmetryGroup};

/// Which family of stabiliser choices to use for a colouring.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum StabiliserOrder {
    /// Subgroups of the final group that contain the stabiliser.
    Higher,
    /// Subgroups of the direct parent of the final group that contain the
    /// direct parent of the stabiliser.
    Lower,
}

/// Subgroup class that can serve as the stabiliser of a colour class.
#[derive(Debug, Clone)]
pub struct StabiliserProp {
    /// Class of the subgroup.
    pub class: GroupClass,
    /// Number of cosets, which is the number of colours.
    pub index: usize,
    /// Realisations at positions before this have not been checked yet.
    /// The realisation at this position contains the stabiliser.
    filtered: usize,
    realisations: Vec<SymmetryGroup>,
}

/// Partition of a group into cosets of a stabiliser, each of which gets its
/// own colour.
#[derive(Debug, Clone, PartialEq)]
pub struct Colouring {
    /// Cosets, indexed by colour.
    pub cosets: Vec<IsometrySet>,
}

impl Colouring {
    /// Returns the number of colours.
    pub fn len(&self) -> usize {
        self.cosets.len()
    }
    /// Returns whether there are no colours.
    pub fn is_empty(&self) -> bool {
        self.cosets.is_empty()
    }
    /// Returns the colour of an isometry, or `None` if it is not in any
    /// coset.
    pub fn colour_of(&self, isometry: &Isometry) -> Option<usize> {
        self.cosets.iter().position(|coset| coset.contains(isometry))
    }
}

/// Orbit of an object with symmetry `stabiliser` under the group `final`.
///
/// Everything is computed lazily and cached.
#[derive(Debug)]
pub struct Orbit {
    final_group: SymmetryGroup,
    stabiliser: SymmetryGroup,

    higher_props: OnceLock<Vec<StabiliserProp>>,
    lower_props: OnceLock<Vec<StabiliserProp>>,
    higher_stabs: Mutex<HashMap<usize, Arc<[SymmetryGroup]>>>,
    lower_stabs: Mutex<HashMap<usize, Arc<[SymmetryGroup]>>>,
}

impl Orbit {
    /// Constructs an orbit. Returns [`SubgroupError::NotASubgroup`] if
    /// `stabiliser` is not a subgroup of `final_group`.
    pub fn new(final_group: SymmetryGroup, stabiliser: SymmetryGroup) -> GroupResult<Self> {
        if !stabiliser.is_subgroup_of(&final_group) {
            return Err(SubgroupError::NotASubgroup {
                group: final_group.class(),
                subgroup: stabiliser.class(),
            }
            .into());
        }
        Ok(Self {
            final_group,
            stabiliser,

            higher_props: OnceLock::new(),
            lower_props: OnceLock::new(),
            higher_stabs: Mutex::new(HashMap::new()),
            lower_stabs: Mutex::new(HashMap::new()),
        })
    }

    /// Returns the symmetry group of the whole orbit.
    pub fn final_group(&self) -> &SymmetryGroup {
        &self.final_group
    }
    /// Returns the symmetry group of a single object in the orbit.
    pub fn stabiliser(&self) -> &SymmetryGroup {
        &self.stabiliser
    }

    /// Returns every subgroup class of the final group that has a
    /// realisation containing the stabiliser.
    ///
    /// Entries with equal index are kept separately, because different
    /// classes give different colourings.
    pub fn higher_order_stabiliser_props(&self) -> GroupResult<&[StabiliserProp]> {
        if let Some(props) = self.higher_props.get() {
            return Ok(props);
        }
        let props = stabiliser_props(&self.final_group, &self.stabiliser, &[])?;
        log::debug!(
            "{} higher order stabiliser choices for {} in {}",
            props.len(),
            self.stabiliser,
            self.final_group,
        );
        Ok(self.higher_props.get_or_init(|| props))
    }

    /// Returns the stabiliser choices on the direct parents of the final
    /// group and the stabiliser, skipping indices that are already covered
    /// by [`Orbit::higher_order_stabiliser_props()`].
    ///
    /// This is empty unless the stabiliser contains orientation-reversing
    /// isometries.
    pub fn lower_order_stabiliser_props(&self) -> GroupResult<&[StabiliserProp]> {
        if let Some(props) = self.lower_props.get() {
            return Ok(props);
        }
        let props = if self.stabiliser.class().is_mixed() {
            let covered: Vec<usize> = self
                .higher_order_stabiliser_props()?
                .iter()
                .map(|prop| prop.index)
                .collect();
            stabiliser_props(
                &self.final_group.direct_parent(),
                &self.stabiliser.direct_parent(),
                &covered,
            )?
        } else {
            vec![]
        };
        log::debug!(
            "{} lower order stabiliser choices for {} in {}",
            props.len(),
            self.stabiliser,
            self.final_group,
        );
        Ok(self.lower_props.get_or_init(|| props))
    }

    /// Returns every realisation of the `i`th higher order stabiliser class
    /// that contains the stabiliser.
    pub fn higher_order_stabilisers(&self, i: usize) -> GroupResult<Arc<[SymmetryGroup]>> {
        let props = self.higher_order_stabiliser_props()?;
        Ok(complete_filter(&self.higher_stabs, props, i, &self.stabiliser))
    }
    /// Returns every realisation of the `i`th lower order stabiliser class
    /// that contains the direct parent of the stabiliser.
    pub fn lower_order_stabilisers(&self, i: usize) -> GroupResult<Arc<[SymmetryGroup]>> {
        let props = self.lower_order_stabiliser_props()?;
        let stabiliser = self.stabiliser.direct_parent();
        Ok(complete_filter(&self.lower_stabs, props, i, &stabiliser))
    }

    /// Returns the colouring given by a realisation of a stabiliser choice.
    ///
    /// For [`StabiliserOrder::Lower`], the colouring partitions the direct
    /// parent of the final group.
    pub fn colouring(
        &self,
        order: StabiliserOrder,
        prop_index: usize,
        realisation_index: usize,
    ) -> GroupResult<Colouring> {
        let (group, stabs) = match order {
            StabiliserOrder::Higher => (
                self.final_group.clone(),
                self.higher_order_stabilisers(prop_index)?,
            ),
            StabiliserOrder::Lower => (
                self.final_group.direct_parent(),
                self.lower_order_stabilisers(prop_index)?,
            ),
        };
        let realisation = stabs
            .get(realisation_index)
            .ok_or(SubgroupError::NotContained)?;
        let cosets = group.quotient_set(realisation)?;
        Ok(Colouring { cosets })
    }
}

fn stabiliser_props(
    final_group: &SymmetryGroup,
    stabiliser: &SymmetryGroup,
    covered: &[usize],
) -> GroupResult<Vec<StabiliserProp>> {
    let mut ret = vec![];
    for &class in final_group.subgroups().iter() {
        if !class.has_subgroup(stabiliser.class()) {
            continue;
        }
        let index = final_group.len() / class.order();
        if covered.contains(&index) {
            continue;
        }
        let realisations = final_group.realise_subgroups(class)?;
        let found = realisations
            .iter()
            .rposition(|realisation| stabiliser.is_subgroup_of(realisation));
        if let Some(filtered) = found {
            ret.push(StabiliserProp {
                class,
                index,
                filtered,
                realisations,
            });
        }
    }
    Ok(ret)
}

fn complete_filter(
    cache: &Mutex<HashMap<usize, Arc<[SymmetryGroup]>>>,
    props: &[StabiliserProp],
    i: usize,
    stabiliser: &SymmetryGroup,
) -> Arc<[SymmetryGroup]> {
    let Some(prop) = props.get(i) else {
        return Arc::from([]);
    };
    let mut cache = cache.lock();
    let stabs = cache.entry(i).or_insert_with(|| {
        let (unchecked, checked) = prop.realisations.split_at(prop.filtered);
        unchecked
            .iter()
            .filter(|realisation| stabiliser.is_subgroup_of(realisation))
            .chain(checked.first())
            .cloned()
            .collect()
    });
    Arc::clone(stabs)
}
