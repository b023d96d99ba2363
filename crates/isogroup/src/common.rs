//! Errors for group construction and subgroup operations.

use crate::{GroupClass, SetupKey};

/// Error returned when a claimed subgroup relationship does not hold.
///
/// This is recoverable: it usually means that a stabiliser has the right
/// class but the wrong orientation.
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SubgroupError {
    #[error("isometry is not an element of the group")]
    NotContained,
    #[error("generated subgroup is larger than the group")]
    TooLarge,
    #[error("realising {subgroup} as a subgroup of {group} is not supported")]
    Unsupported {
        group: GroupClass,
        subgroup: GroupClass,
    },
    #[error("{subgroup} is not a subgroup of {group} in this orientation")]
    NotASubgroup {
        group: GroupClass,
        subgroup: GroupClass,
    },
}

/// Error that can occur during group construction.
#[allow(missing_docs)]
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum GroupError {
    #[error(transparent)]
    Subgroup(#[from] SubgroupError),

    #[error("isometry set did not close after {max_iter} iterations")]
    NotClosed { max_iter: usize },

    #[error("setup key {key} does not apply to {class}")]
    UnknownSetupKey { class: GroupClass, key: SetupKey },
    #[error("bad setup for {class}: {reason}")]
    BadSetup { class: GroupClass, reason: String },
    #[error("isometries do not form a {class} group: {reason}")]
    ClassMismatch { class: GroupClass, reason: String },
    #[error("isometries do not form any point group: {reason}")]
    Unidentified { reason: String },
    #[error("group representation has neither a setup nor a list of isometries")]
    EmptyRepr,
}

/// Result type returned by group construction operations.
pub type GroupResult<T> = Result<T, GroupError>;
