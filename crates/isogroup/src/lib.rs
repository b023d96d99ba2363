//! Point-symmetry groups in 3D: construction, subgroup lattices, oriented
//! subgroup realisation, and orbit colourings.
//!
//! Every point group is one of the classes in [`GroupClass`]. A concrete
//! [`SymmetryGroup`] pairs a class with a set of isometries, oriented by a
//! [`Setup`].

mod class;
mod common;
mod families;
mod fixed;
mod group;
mod orbit;
mod realise;
mod repr;
mod set;
mod setup;

pub use class::{GroupClass, ParseGroupClassError};
pub use common::*;
pub use fixed::IcosahedralSetups;
pub use group::{AxisList, SymmetryGroup};
pub use orbit::{Colouring, Orbit, StabiliserOrder, StabiliserProp};
pub use repr::GroupRepr;
pub use set::*;
pub use setup::{Setup, SetupKey, SetupValue};

/// Structs, traits, and constants.
pub mod prelude {
    pub use crate::{
        GroupClass, GroupError, GroupRepr, GroupResult, IsometrySet, Orbit, Setup, SetupKey,
        SetupValue, StabiliserOrder, SubgroupError, SymmetryGroup,
    };
}

#[cfg(test)]
mod tests;
