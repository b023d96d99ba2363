//! Finite sets of isometries and the group operations on them.

use std::ops::{BitAnd, BitOr, Mul, Sub};

use isomath::prelude::*;

use crate::{GroupError, GroupResult, SubgroupError};

/// Default iteration limit for [`IsometrySet::close()`].
pub const DEFAULT_CLOSE_MAX_ITER: usize = 5;
/// Default iteration limit for [`IsometrySet::group()`].
pub const DEFAULT_GROUP_MAX_ITER: usize = 50;

/// Finite set of isometries.
///
/// Membership uses approximate equality with the active tolerance, so
/// `contains()` is a linear scan. Groups here have at most 120 elements.
#[derive(Debug, Default, Clone)]
pub struct IsometrySet(Vec<Isometry>);

impl PartialEq for IsometrySet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.is_subset(other)
    }
}

impl FromIterator<Isometry> for IsometrySet {
    fn from_iter<T: IntoIterator<Item = Isometry>>(iter: T) -> Self {
        let mut ret = Self::new();
        ret.extend(iter);
        ret
    }
}
impl Extend<Isometry> for IsometrySet {
    fn extend<T: IntoIterator<Item = Isometry>>(&mut self, iter: T) {
        for elem in iter {
            self.insert(elem);
        }
    }
}
impl<'a> IntoIterator for &'a IsometrySet {
    type Item = &'a Isometry;
    type IntoIter = std::slice::Iter<'a, Isometry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
impl IntoIterator for IsometrySet {
    type Item = Isometry;
    type IntoIter = std::vec::IntoIter<Isometry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
impl From<Isometry> for IsometrySet {
    fn from(value: Isometry) -> Self {
        Self(vec![value])
    }
}

impl IsometrySet {
    /// Returns an empty set.
    pub const fn new() -> Self {
        Self(vec![])
    }
    /// Returns the set containing only the identity.
    pub fn ident() -> Self {
        Self(vec![Isometry::ident()])
    }

    /// Returns the number of elements in the set.
    pub fn len(&self) -> usize {
        self.0.len()
    }
    /// Returns whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    /// Returns an iterator over the elements of the set.
    pub fn iter(&self) -> std::slice::Iter<'_, Isometry> {
        self.0.iter()
    }
    /// Returns the elements of the set, in insertion order.
    pub fn as_slice(&self) -> &[Isometry] {
        &self.0
    }

    /// Returns whether some element is approximately equal to `x`.
    pub fn contains(&self, x: &Isometry) -> bool {
        self.0.iter().any(|elem| approx_eq(elem, x))
    }
    /// Returns whether every element of `self` is in `other`.
    pub fn is_subset(&self, other: &IsometrySet) -> bool {
        self.0.iter().all(|elem| other.contains(elem))
    }
    /// Adds an element to the set. Returns `false` if it was already present.
    pub fn insert(&mut self, x: Isometry) -> bool {
        let is_new = !self.contains(&x);
        if is_new {
            self.0.push(x);
        }
        is_new
    }

    /// Returns the union of two sets.
    #[must_use]
    pub fn union(&self, other: &IsometrySet) -> IsometrySet {
        let mut ret = self.clone();
        ret.extend(other.iter().copied());
        ret
    }
    /// Returns the elements of `self` that are not in `other`.
    #[must_use]
    pub fn difference(&self, other: &IsometrySet) -> IsometrySet {
        Self(self.0.iter().filter(|e| !other.contains(e)).copied().collect())
    }
    /// Returns the elements of `self` that are also in `other`.
    #[must_use]
    pub fn intersection(&self, other: &IsometrySet) -> IsometrySet {
        Self(self.0.iter().filter(|e| other.contains(e)).copied().collect())
    }

    /// Returns `{a * b}` for every `a` in `self` and `b` in `other`.
    #[must_use]
    pub fn multiply(&self, other: &IsometrySet) -> IsometrySet {
        itertools::iproduct!(&self.0, &other.0)
            .map(|(a, b)| a * b)
            .collect()
    }
    /// Returns `{a * t}` for every `a` in `self`.
    #[must_use]
    pub fn multiply_isometry(&self, t: &Isometry) -> IsometrySet {
        Self(self.0.iter().map(|a| a * t).collect())
    }
    /// Returns `{t * a}` for every `a` in `self`.
    #[must_use]
    pub fn premultiply_isometry(&self, t: &Isometry) -> IsometrySet {
        Self(self.0.iter().map(|a| t * a).collect())
    }
    /// Returns the union of `self` and `self` composed with central inversion.
    #[must_use]
    pub fn with_central_inversion(&self) -> IsometrySet {
        self.union(&self.multiply_isometry(&Isometry::central_inversion()))
    }

    /// Returns the orientation-preserving elements of the set.
    #[must_use]
    pub fn direct_elements(&self) -> IsometrySet {
        Self(self.0.iter().filter(|e| e.is_direct()).copied().collect())
    }
    /// Returns whether the set contains any orientation-reversing element.
    pub fn is_mixed(&self) -> bool {
        self.0.iter().any(|e| e.is_inverted())
    }

    /// Returns whether the set satisfies the group axioms: it is non-empty,
    /// contains the inverse of every element, and is closed under
    /// composition.
    pub fn is_group(&self) -> bool {
        if self.is_empty() {
            return false;
        }
        for e in &self.0 {
            if !self.contains(&e.inverse()) {
                log::trace!("missing inverse of {e}");
                return false;
            }
            for o in &self.0 {
                if !self.contains(&(e * o)) || !self.contains(&(o * e)) {
                    log::trace!("not closed under composition of {e} and {o}");
                    return false;
                }
            }
        }
        true
    }

    /// Repeatedly adds all products of pairs of elements until no new
    /// elements appear.
    ///
    /// Returns [`GroupError::NotClosed`] if new elements still appear after
    /// `max_iter` iterations. A finite group closes in a few iterations, so
    /// this indicates bad input.
    pub fn close(&self, max_iter: usize) -> GroupResult<IsometrySet> {
        let mut ret = self.clone();
        for i in 0..max_iter {
            let old_len = ret.len();
            ret = ret.union(&ret.multiply(&ret));
            log::trace!("closure iteration {i}: {old_len} -> {} elements", ret.len());
            if ret.len() == old_len {
                return Ok(ret);
            }
        }
        Err(GroupError::NotClosed { max_iter })
    }
    /// Returns the group generated by the set, by adding the identity and
    /// all inverses before closing.
    pub fn group(&self, max_iter: usize) -> GroupResult<IsometrySet> {
        let mut ret = self.clone();
        ret.extend(self.0.iter().map(|e| e.inverse()));
        ret.insert(Isometry::ident());
        ret.close(max_iter)
    }

    /// Returns whether `self` is a subgroup of `other`.
    ///
    /// If `check_group` is `false`, `self` is assumed to be a group and only
    /// containment is checked.
    pub fn is_subgroup(&self, other: &IsometrySet, check_group: bool) -> bool {
        self.len() <= other.len() && (!check_group || self.is_group()) && self.is_subset(other)
    }

    /// Returns the subgroup of `self` generated by a single element.
    pub fn subgroup_generated_by(&self, generator: &Isometry) -> GroupResult<IsometrySet> {
        if !self.contains(generator) {
            return Err(SubgroupError::NotContained.into());
        }
        let ret = IsometrySet::from(*generator).group(DEFAULT_GROUP_MAX_ITER)?;
        self.check_subgroup_size(ret)
    }
    /// Validates `candidate` as a subset of `self` and closes it into a
    /// subgroup.
    pub fn subgroup(&self, candidate: &IsometrySet) -> GroupResult<IsometrySet> {
        if !candidate.is_subset(self) {
            return Err(SubgroupError::NotContained.into());
        }
        let ret = if candidate.len() < self.len() {
            candidate.close(DEFAULT_CLOSE_MAX_ITER)?
        } else {
            candidate.clone()
        };
        self.check_subgroup_size(ret)
    }
    fn check_subgroup_size(&self, subgroup: IsometrySet) -> GroupResult<IsometrySet> {
        if subgroup.len() > self.len() {
            Err(SubgroupError::TooLarge.into())
        } else if !subgroup.is_subset(self) {
            Err(SubgroupError::NotContained.into())
        } else {
            Ok(subgroup)
        }
    }

    /// Partitions `self` into the cosets `e * subgroup`.
    ///
    /// `subgroup` is validated with [`IsometrySet::subgroup()`] first. The
    /// cosets are pairwise disjoint and their union is `self`.
    pub fn quotient_set(&self, subgroup: &IsometrySet) -> GroupResult<Vec<IsometrySet>> {
        let subgroup = self.subgroup(subgroup)?;
        let mut covered = IsometrySet::new();
        let mut cosets = vec![];
        for e in &self.0 {
            if !covered.contains(e) {
                let coset = subgroup.premultiply_isometry(e);
                covered.0.extend(coset.iter().copied());
                cosets.push(coset);
            }
        }
        log::trace!(
            "quotient of {} elements by {} elements has {} cosets",
            self.len(),
            subgroup.len(),
            cosets.len(),
        );
        Ok(cosets)
    }
}

impl Mul<&IsometrySet> for &IsometrySet {
    type Output = IsometrySet;

    fn mul(self, rhs: &IsometrySet) -> Self::Output {
        self.multiply(rhs)
    }
}
impl Mul<&Isometry> for &IsometrySet {
    type Output = IsometrySet;

    fn mul(self, rhs: &Isometry) -> Self::Output {
        self.multiply_isometry(rhs)
    }
}
impl Mul<&IsometrySet> for &Isometry {
    type Output = IsometrySet;

    fn mul(self, rhs: &IsometrySet) -> Self::Output {
        rhs.premultiply_isometry(self)
    }
}
impl BitOr for &IsometrySet {
    type Output = IsometrySet;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}
impl BitAnd for &IsometrySet {
    type Output = IsometrySet;

    fn bitand(self, rhs: Self) -> Self::Output {
        self.intersection(rhs)
    }
}
impl Sub for &IsometrySet {
    type Output = IsometrySet;

    fn sub(self, rhs: Self) -> Self::Output {
        self.difference(rhs)
    }
}
