//! Serializable descriptions of groups.

use isomath::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{GroupClass, GroupError, GroupResult, IsometrySet, Setup, SymmetryGroup};

/// Serializable description of a [`SymmetryGroup`].
///
/// Groups built from a setup record the setup. Groups built from an explicit
/// list of isometries record the list instead.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct GroupRepr {
    /// Class of the group.
    pub class: GroupClass,
    /// Setup that generated the group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub setup: Option<Setup>,
    /// Elements of the group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isometries: Option<Vec<IsometryKind>>,
}

impl Default for GroupRepr {
    fn default() -> Self {
        Self {
            class: GroupClass::E,
            setup: None,
            isometries: None,
        }
    }
}

impl SymmetryGroup {
    /// Returns a serializable description of the group.
    pub fn repr(&self) -> GroupRepr {
        match self.setup() {
            Some(setup) => GroupRepr {
                class: self.class(),
                setup: Some(setup.clone()),
                isometries: None,
            },
            None => GroupRepr {
                class: self.class(),
                setup: None,
                isometries: Some(self.iter().map(|e| e.kind()).collect()),
            },
        }
    }

    /// Reconstructs a group from its description.
    pub fn from_repr(repr: &GroupRepr) -> GroupResult<Self> {
        if let Some(setup) = &repr.setup {
            return Self::new(repr.class, setup);
        }
        let Some(kinds) = &repr.isometries else {
            return Err(GroupError::EmptyRepr);
        };
        let elements = kinds
            .iter()
            .map(|kind| {
                Isometry::from_kind(kind).ok_or_else(|| GroupError::ClassMismatch {
                    class: repr.class,
                    reason: format!("{kind} has a zero axis"),
                })
            })
            .collect::<GroupResult<IsometrySet>>()?;
        Self::from_isometries(repr.class, elements)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{SetupKey, SetupValue};

    #[test]
    fn test_setup_repr_json() {
        let setup = Setup::from([(SetupKey::AxisN, SetupValue::Axis(Vector::Y))]);
        let group = SymmetryGroup::new(GroupClass::Dn(3), &setup).unwrap();
        let json = serde_json::to_string(&group.repr()).unwrap();
        assert_eq!(
            json,
            r#"{"class":"D3","setup":{"axis_n":[0.0,1.0,0.0],"axis_2":[1.0,0.0,0.0],"n":3}}"#,
        );
        let repr: GroupRepr = serde_json::from_str(&json).unwrap();
        assert_eq!(SymmetryGroup::from_repr(&repr).unwrap(), group);
    }

    #[test]
    fn test_default_setup_keys() {
        let repr: GroupRepr = serde_json::from_str(r#"{"class": "C4xI", "setup": {}}"#).unwrap();
        let group = SymmetryGroup::from_repr(&repr).unwrap();
        assert_eq!(group, SymmetryGroup::new_std(GroupClass::CnxI(4)));
    }

    #[test]
    fn test_isometry_repr_json() {
        let elements = SymmetryGroup::new_std(GroupClass::DnCn(2)).elements().clone();
        let group = SymmetryGroup::identify(elements).unwrap();
        let repr = group.repr();
        assert!(repr.setup.is_none());
        assert_eq!(repr.isometries.as_ref().map(|v| v.len()), Some(4));

        let json = serde_json::to_string(&repr).unwrap();
        let parsed: GroupRepr = serde_json::from_str(&json).unwrap();
        assert_eq!(SymmetryGroup::from_repr(&parsed).unwrap(), group);
    }

    #[test]
    fn test_bad_repr() {
        let repr: GroupRepr = serde_json::from_str(r#"{"class": "A4"}"#).unwrap();
        assert_eq!(SymmetryGroup::from_repr(&repr), Err(GroupError::EmptyRepr));

        let repr = GroupRepr {
            class: GroupClass::Cn(2),
            setup: None,
            isometries: Some(vec![IsometryKind::Identity, IsometryKind::HalfTurn {
                axis: Vector::ZERO,
            }]),
        };
        assert!(matches!(
            SymmetryGroup::from_repr(&repr),
            Err(GroupError::ClassMismatch { .. }),
        ));

        let json = r#"{"class": "D3", "setup": {"o5axis": [0, 0, 1]}}"#;
        let repr: GroupRepr = serde_json::from_str(json).unwrap();
        assert!(matches!(
            SymmetryGroup::from_repr(&repr),
            Err(GroupError::UnknownSetupKey { .. }),
        ));
    }
}
