//! Named parameters that orient a group.

use std::collections::BTreeMap;

use isomath::prelude::*;
use serde::{Deserialize, Serialize};

use crate::{GroupClass, GroupError, GroupResult};

/// Golden ratio.
pub(crate) const PHI: Float = 1.618_033_988_749_895;

/// Named parameters that orient a group, such as its principal axis.
///
/// Keys that are not set take their value from [`GroupClass::std_setup()`].
pub type Setup = BTreeMap<SetupKey, SetupValue>;

/// Name of a parameter in a [`Setup`].
#[allow(missing_docs)]
#[derive(
    Debug,
    Copy,
    Clone,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum SetupKey {
    /// Axis of a cyclic group.
    #[strum(serialize = "axis")]
    #[serde(rename = "axis")]
    Axis,
    /// Principal axis of a dihedral group.
    #[strum(serialize = "axis_n")]
    #[serde(rename = "axis_n")]
    AxisN,
    /// One of the two-fold axes of a dihedral group.
    #[strum(serialize = "axis_2")]
    #[serde(rename = "axis_2")]
    Axis2,
    /// Normal vector of one of the mirror planes.
    #[strum(serialize = "normal_r")]
    #[serde(rename = "normal_r")]
    NormalR,
    #[strum(serialize = "o2axis0")]
    #[serde(rename = "o2axis0")]
    O2Axis0,
    #[strum(serialize = "o2axis1")]
    #[serde(rename = "o2axis1")]
    O2Axis1,
    #[strum(serialize = "o3axis")]
    #[serde(rename = "o3axis")]
    O3Axis,
    #[strum(serialize = "o5axis")]
    #[serde(rename = "o5axis")]
    O5Axis,
    #[strum(serialize = "o4axis0")]
    #[serde(rename = "o4axis0")]
    O4Axis0,
    #[strum(serialize = "o4axis1")]
    #[serde(rename = "o4axis1")]
    O4Axis1,
    /// Order of the principal axis.
    #[strum(serialize = "n")]
    #[serde(rename = "n")]
    N,
}

/// Value of a parameter in a [`Setup`].
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SetupValue {
    Order(u32),
    Axis(Vector),
}
impl From<Vector> for SetupValue {
    fn from(value: Vector) -> Self {
        Self::Axis(value)
    }
}
impl From<u32> for SetupValue {
    fn from(value: u32) -> Self {
        Self::Order(value)
    }
}

/// Pair of unit axes that orients a group.
///
/// The meaning of each axis depends on the class. For the cyclic classes,
/// only `primary` is meaningful.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Frame {
    pub primary: Vector,
    pub secondary: Vector,
}

impl Frame {
    /// Returns the third axis of the right-handed frame.
    pub fn tertiary(&self) -> Vector {
        self.primary.cross(self.secondary)
    }
}

/// Returns the standard icosahedral three-fold axis.
pub(crate) fn std_o3_axis() -> Vector {
    vector![1.0, 1.0, 1.0] / (3.0 as Float).sqrt()
}
/// Returns the standard icosahedral five-fold axis adjacent to
/// [`std_o3_axis()`].
pub(crate) fn std_o5_axis() -> Vector {
    vector![0.0, 1.0, PHI] / (1.0 + PHI * PHI).sqrt()
}
/// Returns the cosine of the angle between adjacent three-fold and five-fold
/// axes of an icosahedral group, which is about 37.38 degrees.
pub(crate) fn adjacent_o3_o5_cos() -> Float {
    std_o3_axis().dot(std_o5_axis())
}

/// Returns the standard frame for a class.
pub(crate) fn std_frame(class: GroupClass) -> Frame {
    let (primary, secondary) = match class {
        GroupClass::A4 | GroupClass::A4xI => (Vector::X, Vector::Y),
        GroupClass::S4 | GroupClass::S4xI | GroupClass::S4A4 => (Vector::X, Vector::Y),
        GroupClass::A5 | GroupClass::A5xI => (std_o3_axis(), std_o5_axis()),
        _ => (Vector::Z, Vector::X),
    };
    Frame { primary, secondary }
}

/// Returns the setup for the standard orientation of a canonical class.
pub(crate) fn std_setup(class: GroupClass) -> Setup {
    let frame = std_frame(class);
    let mut ret: Setup = std::iter::zip(class.setup_keys(), [frame.primary, frame.secondary])
        .map(|(&k, v)| (k, SetupValue::Axis(v)))
        .collect();
    if class.n() != 0 {
        ret.insert(SetupKey::N, SetupValue::Order(class.n()));
    }
    ret
}

/// Validates a setup for a canonical class and fills in unset keys.
///
/// Returns the frame to build the group from and the complete setup.
pub(crate) fn resolve(class: GroupClass, setup: &Setup) -> GroupResult<(Frame, Setup)> {
    let bad_setup = |reason: String| GroupError::BadSetup { class, reason };

    let keys = class.setup_keys();
    for (&key, &value) in setup {
        match (key, value) {
            (SetupKey::N, SetupValue::Order(n)) if class.n() != 0 => {
                if n != class.n() {
                    return Err(bad_setup(format!("n is {n} but should be {}", class.n())));
                }
            }
            (SetupKey::N, _) if class.n() != 0 => {
                return Err(bad_setup("n must be an integer".to_owned()));
            }
            _ if !keys.contains(&key) => return Err(GroupError::UnknownSetupKey { class, key }),
            (_, SetupValue::Axis(_)) => (),
            (_, SetupValue::Order(_)) => {
                return Err(bad_setup(format!("{key} must be a vector")));
            }
        }
    }

    let mut full_setup = std_setup(class);
    full_setup.extend(setup.iter().map(|(&k, &v)| (k, v)));

    let std = std_frame(class);
    let mut axes = keys.iter().map(|key| match full_setup.get(key) {
        Some(SetupValue::Axis(v)) => v
            .normalize()
            .ok_or_else(|| bad_setup(format!("{key} must be nonzero"))),
        _ => Err(bad_setup(format!("{key} is missing"))),
    });
    let primary = axes.next().transpose()?.unwrap_or(std.primary);
    let secondary = axes.next().transpose()?;

    let frame = match secondary {
        None => Frame {
            primary,
            secondary: any_perpendicular(primary),
        },
        Some(secondary) => {
            let [k0, k1] = [keys[0], keys[1]];
            if matches!(class, GroupClass::A5 | GroupClass::A5xI) {
                let cos = primary.dot(secondary);
                if !approx_eq(&cos.abs(), &adjacent_o3_o5_cos()) {
                    let angle = cos.clamp(-1.0, 1.0).acos().to_degrees();
                    return Err(bad_setup(format!(
                        "{k0} and {k1} must be adjacent, but the angle between them is {angle}°",
                    )));
                }
                // Both directions of the five-fold axis describe the same line.
                let secondary = if cos < 0.0 { -secondary } else { secondary };
                Frame { primary, secondary }
            } else {
                if !primary.is_perpendicular(secondary) {
                    return Err(bad_setup(format!("{k0} and {k1} must be perpendicular")));
                }
                let secondary = secondary
                    .rejected_from(primary)
                    .and_then(|v| v.normalize())
                    .ok_or_else(|| bad_setup(format!("{k1} must be nonzero")))?;
                Frame { primary, secondary }
            }
        }
    };

    Ok((frame, full_setup))
}

/// Returns a unit vector perpendicular to `v`, which must be a unit vector.
fn any_perpendicular(v: Vector) -> Vector {
    let other = if v.x().abs() < 0.9 { Vector::X } else { Vector::Y };
    v.cross(other).normalize().unwrap_or(Vector::Y)
}

/// Translates the setup of a group to the setup of its direct subgroup.
pub(crate) fn direct_setup(class: GroupClass, setup: &Setup) -> Setup {
    let direct_class = class.direct_class();
    let direct_keys = direct_class.setup_keys();
    setup
        .iter()
        .filter_map(|(&key, &value)| {
            let key = match (class, key) {
                (GroupClass::DnCn(_), SetupKey::AxisN) => SetupKey::Axis,
                (GroupClass::S4A4, SetupKey::O4Axis0) => SetupKey::O2Axis0,
                (GroupClass::S4A4, SetupKey::O4Axis1) => SetupKey::O2Axis1,
                (_, key) => key,
            };
            let keep = match key {
                SetupKey::N => {
                    direct_class.n() != 0 && value == SetupValue::Order(direct_class.n())
                }
                _ => direct_keys.contains(&key),
            };
            keep.then_some((key, value))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_setup_key_names() {
        for (key, name) in [
            (SetupKey::Axis, "axis"),
            (SetupKey::AxisN, "axis_n"),
            (SetupKey::Axis2, "axis_2"),
            (SetupKey::NormalR, "normal_r"),
            (SetupKey::O2Axis0, "o2axis0"),
            (SetupKey::O5Axis, "o5axis"),
            (SetupKey::N, "n"),
        ] {
            assert_eq!(key.to_string(), name);
            assert_eq!(SetupKey::from_str(name), Ok(key));
            assert_eq!(serde_json::to_string(&key).unwrap(), format!("{name:?}"));
        }
        assert!(SetupKey::from_str("o6axis").is_err());
    }

    #[test]
    fn test_std_setup() {
        let setup = std_setup(GroupClass::Dn(4));
        assert_eq!(setup[&SetupKey::AxisN], SetupValue::Axis(Vector::Z));
        assert_eq!(setup[&SetupKey::Axis2], SetupValue::Axis(Vector::X));
        assert_eq!(setup[&SetupKey::N], SetupValue::Order(4));

        let setup = std_setup(GroupClass::C2nCn(1));
        assert_eq!(setup[&SetupKey::NormalR], SetupValue::Axis(Vector::Z));
        assert!(std_setup(GroupClass::ExI).is_empty());

        assert!(approx_eq(
            &adjacent_o3_o5_cos().acos().to_degrees(),
            &37.377_368_140_649_69,
        ));
    }

    #[test]
    fn test_resolve_setup() {
        let class = GroupClass::Dn(3);
        let setup = Setup::from([(SetupKey::AxisN, Vector::Y.into())]);
        let (frame, full) = resolve(class, &setup).unwrap();
        // The default `axis_2` is X, which is perpendicular to Y.
        assert_eq!(frame.primary, Vector::Y);
        assert_eq!(frame.secondary, Vector::X);
        assert_eq!(full.len(), 3);

        let setup = Setup::from([(SetupKey::O3Axis, Vector::Z.into())]);
        assert_eq!(
            resolve(class, &setup),
            Err(GroupError::UnknownSetupKey {
                class,
                key: SetupKey::O3Axis,
            }),
        );
        let setup = Setup::from([(SetupKey::N, SetupValue::Order(4))]);
        assert!(matches!(resolve(class, &setup), Err(GroupError::BadSetup { .. })));
        let setup = Setup::from([(SetupKey::N, SetupValue::Order(3))]);
        assert!(resolve(class, &setup).is_ok());
        let setup = Setup::from([(SetupKey::AxisN, Vector::X.into())]);
        assert!(matches!(resolve(class, &setup), Err(GroupError::BadSetup { .. })));
        let setup = Setup::from([(SetupKey::AxisN, Vector::ZERO.into())]);
        assert!(matches!(resolve(class, &setup), Err(GroupError::BadSetup { .. })));
        let setup = Setup::from([(SetupKey::N, SetupValue::Order(3))]);
        assert_eq!(
            resolve(GroupClass::A4, &setup),
            Err(GroupError::UnknownSetupKey {
                class: GroupClass::A4,
                key: SetupKey::N,
            }),
        );
    }

    #[test]
    fn test_resolve_icosahedral_setup() {
        let class = GroupClass::A5;
        let setup = Setup::from([(SetupKey::O5Axis, (-std_o5_axis()).into())]);
        let (frame, _) = resolve(class, &setup).unwrap();
        assert!(approx_eq(&frame.secondary, &std_o5_axis()));

        let setup = Setup::from([(SetupKey::O5Axis, Vector::Z.into())]);
        assert!(matches!(resolve(class, &setup), Err(GroupError::BadSetup { .. })));
    }

    #[test]
    fn test_direct_setup() {
        let class = GroupClass::DnCn(4);
        let direct = direct_setup(class, &std_setup(class));
        assert_eq!(direct, std_setup(GroupClass::Cn(4)));

        let class = GroupClass::S4A4;
        let direct = direct_setup(class, &std_setup(class));
        assert_eq!(direct, std_setup(GroupClass::A4));

        let class = GroupClass::C2nCn(1);
        assert!(direct_setup(class, &std_setup(class)).is_empty());
    }
}
