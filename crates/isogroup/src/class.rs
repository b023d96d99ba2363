//! Point-group families and their static subgroup tables.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use lazy_static::lazy_static;
use parking_lot::Mutex;

use crate::{Setup, SetupKey, setup};

lazy_static! {
    /// Subgroup list for each class that has been queried so far.
    static ref SUBGROUPS: Mutex<HashMap<GroupClass, Arc<[GroupClass]>>> =
        Mutex::new(HashMap::new());
}

/// Class of a 3D point group: its family and, for the axial families, its
/// order `n`.
///
/// Mixed classes are built from a direct group and a direct supergroup by
/// composing every element of the difference with central inversion.
///
/// Several tags describe the same group for small `n`. The constructors
/// ([`GroupClass::cn()`], etc.) and [`GroupClass::canonicalize()`] pick one
/// tag for each geometric group, so that equal classes compare equal.
#[allow(missing_docs)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupClass {
    /// Trivial group.
    E,
    /// Central inversion.
    ExI,
    Cn(u32),
    CnxI(u32),
    /// `Cn` plus `(C2n - Cn) * I`.
    C2nCn(u32),
    Dn(u32),
    /// `Cn` plus `(Dn - Cn) * I`.
    DnCn(u32),
    DnxI(u32),
    /// `Dn` plus `(D2n - Dn) * I`.
    D2nDn(u32),
    /// Chiral tetrahedral symmetry.
    A4,
    /// Full tetrahedral symmetry: `A4` plus `(S4 - A4) * I`.
    S4A4,
    /// Pyritohedral symmetry.
    A4xI,
    /// Chiral octahedral symmetry.
    S4,
    /// Full octahedral symmetry.
    S4xI,
    /// Chiral icosahedral symmetry.
    A5,
    /// Full icosahedral symmetry.
    A5xI,
}

impl fmt::Display for GroupClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::E => write!(f, "E"),
            Self::ExI => write!(f, "ExI"),
            Self::Cn(n) => write!(f, "C{n}"),
            Self::CnxI(n) => write!(f, "C{n}xI"),
            Self::C2nCn(n) => write!(f, "C{}C{n}", 2 * u64::from(*n)),
            Self::Dn(n) => write!(f, "D{n}"),
            Self::DnCn(n) => write!(f, "D{n}C{n}"),
            Self::DnxI(n) => write!(f, "D{n}xI"),
            Self::D2nDn(n) => write!(f, "D{}D{n}", 2 * u64::from(*n)),
            Self::A4 => write!(f, "A4"),
            Self::S4A4 => write!(f, "S4A4"),
            Self::A4xI => write!(f, "A4xI"),
            Self::S4 => write!(f, "S4"),
            Self::S4xI => write!(f, "S4xI"),
            Self::A5 => write!(f, "A5"),
            Self::A5xI => write!(f, "A5xI"),
        }
    }
}

/// Error returned when parsing an invalid group class name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid group class name {0:?}")]
pub struct ParseGroupClassError(pub String);

impl FromStr for GroupClass {
    type Err = ParseGroupClassError;

    /// Parses a class name such as `D4xI` or `C6C3`. The result is
    /// canonicalized, so `D1` parses as `C2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseGroupClassError(s.to_owned());

        match s {
            "E" => return Ok(Self::E),
            "ExI" => return Ok(Self::ExI),
            "A4" => return Ok(Self::A4),
            "S4A4" => return Ok(Self::S4A4),
            "A4xI" => return Ok(Self::A4xI),
            "S4" => return Ok(Self::S4),
            "S4xI" => return Ok(Self::S4xI),
            "A5" => return Ok(Self::A5),
            "A5xI" => return Ok(Self::A5xI),
            _ => (),
        }

        let (is_dihedral, rest) = if let Some(rest) = s.strip_prefix('C') {
            (false, rest)
        } else if let Some(rest) = s.strip_prefix('D') {
            (true, rest)
        } else {
            return Err(err());
        };
        let (rest, has_inversion) = match rest.strip_suffix("xI") {
            Some(rest) => (rest, true),
            None => (rest, false),
        };
        let (n, rest) = split_leading_number(rest).ok_or_else(err)?;

        match (is_dihedral, has_inversion, rest) {
            (false, false, "") => Ok(Self::cn(n)),
            (false, true, "") => Ok(Self::cnxi(n)),
            (true, false, "") => Ok(Self::dn(n)),
            (true, true, "") => Ok(Self::dnxi(n)),
            (_, true, _) => Err(err()),
            (is_dihedral, false, suffix) => {
                let (sub, suffix) = match suffix.chars().next() {
                    Some(c @ ('C' | 'D')) => (c, &suffix[1..]),
                    _ => return Err(err()),
                };
                let (m, "") = split_leading_number(suffix).ok_or_else(err)? else {
                    return Err(err());
                };
                match (is_dihedral, sub) {
                    (false, 'C') if m.checked_mul(2) == Some(n) => Ok(Self::c2ncn(m)),
                    (true, 'C') if n == m => Ok(Self::dncn(m)),
                    (true, 'D') if m.checked_mul(2) == Some(n) => Ok(Self::d2ndn(m)),
                    _ => Err(err()),
                }
            }
        }
    }
}

/// Splits a positive decimal number off the start of a string.
fn split_leading_number(s: &str) -> Option<(u32, &str)> {
    let end = s.find(|c: char| !c.is_ascii_digit()).unwrap_or(s.len());
    let n: u32 = s[..end].parse().ok()?;
    (n > 0).then_some((n, &s[end..]))
}

impl serde::Serialize for GroupClass {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
impl<'de> serde::Deserialize<'de> for GroupClass {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl GroupClass {
    /// Classes with no parameter.
    pub const FIXED: [GroupClass; 9] = [
        Self::E,
        Self::ExI,
        Self::A4,
        Self::S4A4,
        Self::A4xI,
        Self::S4,
        Self::S4xI,
        Self::A5,
        Self::A5xI,
    ];

    /// Returns the cyclic group of order `n`.
    pub fn cn(n: u32) -> Self {
        Self::Cn(n).canonicalize()
    }
    /// Returns the cyclic group of order `n` with central inversion.
    pub fn cnxi(n: u32) -> Self {
        Self::CnxI(n).canonicalize()
    }
    /// Returns the group with rotations of order `n` and rotary reflections of
    /// order `2n`.
    pub fn c2ncn(n: u32) -> Self {
        Self::C2nCn(n).canonicalize()
    }
    /// Returns the dihedral group of order `2n`.
    pub fn dn(n: u32) -> Self {
        Self::Dn(n).canonicalize()
    }
    /// Returns the group with rotations of order `n` and `n` mirror planes
    /// through the axis.
    pub fn dncn(n: u32) -> Self {
        Self::DnCn(n).canonicalize()
    }
    /// Returns the dihedral group of order `2n` with central inversion.
    pub fn dnxi(n: u32) -> Self {
        Self::DnxI(n).canonicalize()
    }
    /// Returns the dihedral group of order `2n` plus `(D2n - Dn) * I`.
    pub fn d2ndn(n: u32) -> Self {
        Self::D2nDn(n).canonicalize()
    }

    /// Returns the unique tag for this geometric group.
    ///
    /// An order of zero is treated as one.
    #[must_use]
    pub fn canonicalize(self) -> Self {
        match self {
            Self::Cn(0 | 1) => Self::E,
            Self::CnxI(0 | 1) => Self::ExI,
            Self::C2nCn(0) => Self::C2nCn(1),
            Self::Dn(0 | 1) => Self::Cn(2),
            Self::DnCn(0 | 1) => Self::C2nCn(1),
            Self::DnxI(0 | 1) => Self::CnxI(2),
            Self::D2nDn(0 | 1) => Self::DnCn(2),
            other => other,
        }
    }

    /// Returns the number of elements in the group.
    pub fn order(self) -> usize {
        match self {
            Self::E => 1,
            Self::ExI => 2,
            Self::Cn(n) => n as usize,
            Self::CnxI(n) | Self::C2nCn(n) | Self::Dn(n) | Self::DnCn(n) => 2 * n as usize,
            Self::DnxI(n) | Self::D2nDn(n) => 4 * n as usize,
            Self::A4 => 12,
            Self::S4A4 | Self::A4xI | Self::S4 => 24,
            Self::S4xI => 48,
            Self::A5 => 60,
            Self::A5xI => 120,
        }
    }
    /// Returns the order of the principal axis for the axial families, or
    /// zero for the fixed groups.
    pub fn n(self) -> u32 {
        match self {
            Self::Cn(n)
            | Self::CnxI(n)
            | Self::C2nCn(n)
            | Self::Dn(n)
            | Self::DnCn(n)
            | Self::DnxI(n)
            | Self::D2nDn(n) => n,
            _ => 0,
        }
    }
    /// Returns whether the group contains orientation-reversing isometries.
    pub fn is_mixed(self) -> bool {
        !matches!(self, Self::E | Self::Cn(_) | Self::Dn(_) | Self::A4 | Self::S4 | Self::A5)
    }
    /// Returns whether the group contains central inversion.
    pub fn has_central_inversion(self) -> bool {
        matches!(
            self,
            Self::ExI | Self::CnxI(_) | Self::DnxI(_) | Self::A4xI | Self::S4xI | Self::A5xI,
        )
    }
    /// Returns the class of the subgroup of orientation-preserving
    /// isometries.
    pub fn direct_class(self) -> Self {
        match self {
            Self::E | Self::ExI => Self::E,
            Self::Cn(n) | Self::CnxI(n) | Self::C2nCn(n) | Self::DnCn(n) => Self::cn(n),
            Self::Dn(n) | Self::DnxI(n) | Self::D2nDn(n) => Self::dn(n),
            Self::A4 | Self::S4A4 | Self::A4xI => Self::A4,
            Self::S4 | Self::S4xI => Self::S4,
            Self::A5 | Self::A5xI => Self::A5,
        }
    }

    /// Returns the keys that orient a group of this class. The key `n` is
    /// also accepted for the axial families but must match [`Self::n()`].
    pub fn setup_keys(self) -> &'static [SetupKey] {
        use SetupKey::*;
        match self.canonicalize() {
            Self::E | Self::ExI => &[],
            Self::C2nCn(1) => &[NormalR],
            Self::Cn(_) | Self::CnxI(_) | Self::C2nCn(_) => &[Axis],
            Self::Dn(_) | Self::DnxI(_) | Self::D2nDn(_) => &[AxisN, Axis2],
            Self::DnCn(_) => &[AxisN, NormalR],
            Self::A4 | Self::A4xI => &[O2Axis0, O2Axis1],
            Self::S4A4 | Self::S4 | Self::S4xI => &[O4Axis0, O4Axis1],
            Self::A5 | Self::A5xI => &[O3Axis, O5Axis],
        }
    }
    /// Returns the setup for the standard orientation of this class.
    pub fn std_setup(self) -> Setup {
        setup::std_setup(self.canonicalize())
    }

    /// Returns every canonical class with the given order.
    pub fn with_order(order: usize) -> Vec<GroupClass> {
        let mut ret: Vec<GroupClass> = Self::FIXED
            .into_iter()
            .filter(|class| class.order() == order)
            .collect();
        let n = u32::try_from(order).unwrap_or(0);
        let axial = [
            Self::cn(n),
            Self::cnxi(n / 2),
            Self::c2ncn(n / 2),
            Self::dn(n / 2),
            Self::dncn(n / 2),
            Self::dnxi(n / 4),
            Self::d2ndn(n / 4),
        ];
        for class in axial {
            if class.order() == order && !ret.contains(&class) {
                ret.push(class);
            }
        }
        ret
    }

    /// Returns every class that occurs as a subgroup of this class in some
    /// orientation, including the class itself, sorted by descending order.
    ///
    /// The list is computed once per class. Subsequent calls return the same
    /// allocation.
    pub fn subgroups(self) -> Arc<[GroupClass]> {
        let class = self.canonicalize();
        let mut cache = SUBGROUPS.lock();
        let list = cache.entry(class).or_insert_with(|| {
            log::trace!("computing subgroup list for {class}");
            class.compute_subgroups().into()
        });
        Arc::clone(list)
    }
    /// Returns whether `subgroup` occurs as a subgroup of this class in some
    /// orientation.
    pub fn has_subgroup(self, subgroup: GroupClass) -> bool {
        self.subgroups().contains(&subgroup.canonicalize())
    }

    fn compute_subgroups(self) -> Vec<GroupClass> {
        let mut ret = vec![self];
        match self {
            Self::E => (),
            Self::ExI => ret.push(Self::E),
            Self::A4 => ret.extend(A4_SUBGROUPS),
            Self::S4A4 => ret.extend(S4A4_SUBGROUPS),
            Self::A4xI => ret.extend(A4XI_SUBGROUPS),
            Self::S4 => ret.extend(S4_SUBGROUPS),
            Self::S4xI => ret.extend(S4XI_SUBGROUPS),
            Self::A5 => ret.extend(A5_SUBGROUPS),
            Self::A5xI => ret.extend(A5XI_SUBGROUPS),
            _ => {
                let n = self.n();
                for i in divisors(n) {
                    // Composing with inversion flips the parity of the
                    // multiples of `pi / i` that belong to the subgroup.
                    let even_quotient = (n / i) % 2 == 0;
                    match self {
                        Self::Cn(_) => ret.push(Self::cn(i)),
                        Self::CnxI(_) => {
                            ret.extend([Self::cnxi(i), Self::cn(i)]);
                            if even_quotient {
                                ret.push(Self::c2ncn(i));
                            }
                        }
                        Self::C2nCn(_) => {
                            ret.push(Self::cn(i));
                            if !even_quotient {
                                ret.push(Self::c2ncn(i));
                            }
                        }
                        Self::Dn(_) => ret.extend([Self::dn(i), Self::cn(i)]),
                        Self::DnCn(_) => ret.extend([Self::dncn(i), Self::cn(i)]),
                        Self::DnxI(_) => {
                            ret.extend([
                                Self::dnxi(i),
                                Self::cnxi(i),
                                Self::dn(i),
                                Self::cn(i),
                                Self::dncn(i),
                            ]);
                            if even_quotient {
                                ret.extend([Self::d2ndn(i), Self::c2ncn(i)]);
                            }
                        }
                        Self::D2nDn(_) => {
                            ret.extend([Self::dn(i), Self::cn(i), Self::dncn(i)]);
                            if !even_quotient {
                                ret.extend([Self::d2ndn(i), Self::c2ncn(i)]);
                            }
                        }
                        _ => (),
                    }
                }
            }
        }

        let mut deduped = Vec::with_capacity(ret.len());
        for class in ret {
            if !deduped.contains(&class) {
                deduped.push(class);
            }
        }
        deduped.sort_by_key(|class| std::cmp::Reverse(class.order()));
        deduped
    }
}

/// Returns the divisors of `n` in descending order.
fn divisors(n: u32) -> impl Iterator<Item = u32> {
    (1..=n).rev().filter(move |i| n % i == 0)
}

use GroupClass::*;

const A4_SUBGROUPS: [GroupClass; 4] = [Dn(2), Cn(3), Cn(2), E];
const S4A4_SUBGROUPS: [GroupClass; 10] = [
    A4,
    D2nDn(2),
    DnCn(3),
    C2nCn(2),
    Dn(2),
    DnCn(2),
    Cn(3),
    Cn(2),
    C2nCn(1),
    E,
];
const A4XI_SUBGROUPS: [GroupClass; 11] = [
    A4,
    DnxI(2),
    CnxI(3),
    Dn(2),
    DnCn(2),
    CnxI(2),
    Cn(3),
    Cn(2),
    C2nCn(1),
    ExI,
    E,
];
const S4_SUBGROUPS: [GroupClass; 8] = [A4, Dn(4), Dn(3), Cn(4), Dn(2), Cn(3), Cn(2), E];
const S4XI_SUBGROUPS: [GroupClass; 24] = [
    S4,
    S4A4,
    A4xI,
    A4,
    DnxI(4),
    DnxI(3),
    Dn(4),
    D2nDn(2),
    DnCn(4),
    CnxI(4),
    DnxI(2),
    Dn(3),
    DnCn(3),
    CnxI(3),
    Dn(2),
    DnCn(2),
    CnxI(2),
    Cn(4),
    C2nCn(2),
    Cn(3),
    Cn(2),
    C2nCn(1),
    ExI,
    E,
];
const A5_SUBGROUPS: [GroupClass; 8] = [A4, Dn(5), Dn(3), Cn(5), Dn(2), Cn(3), Cn(2), E];
const A5XI_SUBGROUPS: [GroupClass; 21] = [
    A5,
    A4xI,
    A4,
    DnxI(5),
    DnxI(3),
    Dn(5),
    DnCn(5),
    CnxI(5),
    DnxI(2),
    Dn(3),
    DnCn(3),
    CnxI(3),
    Cn(5),
    Dn(2),
    DnCn(2),
    CnxI(2),
    Cn(3),
    Cn(2),
    C2nCn(1),
    ExI,
    E,
];

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_class_names() {
        #[track_caller]
        fn assert_name(class: GroupClass, name: &str) {
            assert_eq!(class.to_string(), name);
            assert_eq!(name.parse::<GroupClass>(), Ok(class));
        }

        assert_name(E, "E");
        assert_name(ExI, "ExI");
        assert_name(Cn(5), "C5");
        assert_name(CnxI(3), "C3xI");
        assert_name(C2nCn(3), "C6C3");
        assert_name(C2nCn(1), "C2C1");
        assert_name(Dn(4), "D4");
        assert_name(DnCn(4), "D4C4");
        assert_name(DnxI(3), "D3xI");
        assert_name(D2nDn(3), "D6D3");
        assert_name(S4A4, "S4A4");
        assert_name(A5xI, "A5xI");

        assert_eq!("D1".parse::<GroupClass>(), Ok(Cn(2)));
        assert_eq!("C1".parse::<GroupClass>(), Ok(E));
        assert_eq!("D1C1".parse::<GroupClass>(), Ok(C2nCn(1)));
        assert_eq!("D2D1".parse::<GroupClass>(), Ok(DnCn(2)));
        for bad in ["", "C", "C0", "C6C2", "D4D4", "D3C2", "C3xIx", "F4", "C2C1xI"] {
            assert!(bad.parse::<GroupClass>().is_err(), "{bad:?} should not parse");
        }
    }

    #[test]
    fn test_huge_class_names() {
        for bad in ["C2C2147483648", "D2D2147483648", "C4294967296", "D99999999999C1"] {
            assert!(bad.parse::<GroupClass>().is_err(), "{bad:?} should not parse");
        }
        let max = u32::MAX;
        assert_eq!(C2nCn(max).to_string(), format!("C{}C{max}", 2 * u64::from(max)));
        assert_eq!(D2nDn(max).to_string(), format!("D{}D{max}", 2 * u64::from(max)));
        assert_name_round_trips(C2nCn(max / 2));
        assert_name_round_trips(D2nDn(max / 2));
    }

    #[track_caller]
    fn assert_name_round_trips(class: GroupClass) {
        assert_eq!(class.to_string().parse::<GroupClass>(), Ok(class));
    }

    #[test]
    fn test_class_orders() {
        for class in GroupClass::FIXED {
            assert!(GroupClass::with_order(class.order()).contains(&class));
        }
        assert_eq!(
            GroupClass::with_order(24),
            vec![S4A4, A4xI, S4, Cn(24), CnxI(12), C2nCn(12), Dn(12), DnCn(12), DnxI(6), D2nDn(6)],
        );
        assert_eq!(GroupClass::with_order(2), vec![ExI, Cn(2), C2nCn(1)]);
        assert_eq!(GroupClass::with_order(1), vec![E]);
    }

    #[test]
    fn test_fixed_subgroup_lists() {
        assert_eq!(&*A4.subgroups(), &[A4, Dn(2), Cn(3), Cn(2), E]);
        assert_eq!(
            &*A5.subgroups(),
            &[A5, A4, Dn(5), Dn(3), Cn(5), Dn(2), Cn(3), Cn(2), E],
        );
        assert_eq!(A5xI.subgroups().len(), 22);
        assert_eq!(S4xI.subgroups().len(), 25);
        assert_eq!(ExI.subgroups().to_vec(), vec![ExI, E]);
    }

    #[test]
    fn test_subgroup_lists_are_sorted_and_deduplicated() {
        for n in 1..=24 {
            for class in [Cn(n), CnxI(n), C2nCn(n), Dn(n), DnCn(n), DnxI(n), D2nDn(n)] {
                let subgroups = class.subgroups();
                assert_eq!(subgroups[0], class.canonicalize());
                for (i, a) in subgroups.iter().enumerate() {
                    assert_eq!(*a, a.canonicalize());
                    assert!(!subgroups[i + 1..].contains(a), "{a} repeated in {class}");
                    assert_eq!(class.order() % a.order(), 0);
                }
                assert!(subgroups.windows(2).all(|w| w[0].order() >= w[1].order()));
            }
        }
    }

    #[test]
    fn test_subgroup_list_is_memoized() {
        let a = GroupClass::cn(12).subgroups();
        let b = "C12".parse::<GroupClass>().unwrap().subgroups();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(Arc::ptr_eq(&D2nDn(5).subgroups(), &D2nDn(5).subgroups()));
    }
}
