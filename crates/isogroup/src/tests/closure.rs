use isomath::prelude::*;

use super::*;

#[test]
fn test_std_groups_are_closed() {
    for class in classes_with_orders(&TEST_ORDERS) {
        let group = SymmetryGroup::new_std(class);
        assert_eq!(group.len(), class.order(), "wrong order for {class}");
        assert!(group.is_group(), "{class} is not a group");
        assert_eq!(group.is_mixed(), class.is_mixed(), "{class}");
        assert_eq!(
            group.contains(&Isometry::central_inversion()),
            class.has_central_inversion(),
            "{class}",
        );
        assert_eq!(group.direct_parent().class(), class.direct_class());
    }
}

#[test]
fn test_oriented_groups_are_closed() {
    let axis = vector![1.0, 2.0, 3.0];
    let perpendicular = vector![3.0, 0.0, -1.0];
    for (class, setup) in [
        (GroupClass::Cn(7), Setup::from([(SetupKey::Axis, axis.into())])),
        (GroupClass::C2nCn(1), Setup::from([(SetupKey::NormalR, axis.into())])),
        (
            GroupClass::D2nDn(5),
            Setup::from([
                (SetupKey::AxisN, axis.into()),
                (SetupKey::Axis2, perpendicular.into()),
            ]),
        ),
        (
            GroupClass::DnCn(4),
            Setup::from([
                (SetupKey::AxisN, axis.into()),
                (SetupKey::NormalR, perpendicular.into()),
            ]),
        ),
        (
            GroupClass::S4A4,
            Setup::from([
                (SetupKey::O4Axis0, axis.into()),
                (SetupKey::O4Axis1, perpendicular.into()),
            ]),
        ),
        (
            GroupClass::S4xI,
            Setup::from([
                (SetupKey::O4Axis0, perpendicular.into()),
                (SetupKey::O4Axis1, axis.into()),
            ]),
        ),
    ] {
        let group = SymmetryGroup::new(class, &setup).unwrap();
        assert_eq!(group.len(), class.order(), "wrong order for {class}");
        assert!(group.is_group(), "{class} is not a group");
        let rebuilt = SymmetryGroup::new(class, group.setup().unwrap()).unwrap();
        assert_eq!(rebuilt, group);
    }
}

#[test]
fn test_rotated_icosahedral_group() {
    let adjacent = SymmetryGroup::new_std(GroupClass::A5);
    let o3 = adjacent.axes_with_fold(3)[1];
    let o5 = adjacent
        .axes_with_fold(5)
        .into_iter()
        .find(|o5| approx_eq(&o3.dot(*o5).abs(), &crate::setup::adjacent_o3_o5_cos()))
        .unwrap();
    let setup = Setup::from([(SetupKey::O3Axis, o3.into()), (SetupKey::O5Axis, o5.into())]);
    let group = SymmetryGroup::new(GroupClass::A5xI, &setup).unwrap();
    assert_eq!(group.len(), 120);
    assert!(group.is_group());
    // Any adjacent pair of axes of the same group gives the same group.
    assert_eq!(group, SymmetryGroup::new_std(GroupClass::A5xI));
}

#[test]
fn test_close_klein_group() {
    let hx = Isometry::half_turn(Vector::X).unwrap();
    let hy = Isometry::half_turn(Vector::Y).unwrap();
    let klein = IsometrySet::from_iter([hx, hy])
        .group(DEFAULT_GROUP_MAX_ITER)
        .unwrap();
    assert_eq!(klein, *SymmetryGroup::new_std(GroupClass::Dn(2)).elements());
    let identified = SymmetryGroup::identify(klein).unwrap();
    assert_eq!(identified.class(), GroupClass::Dn(2));
}

#[test]
fn test_generate_fixed_groups() {
    // The icosahedral group is generated by a five-fold and a three-fold
    // rotation around adjacent axes.
    let std = SymmetryGroup::new_std(GroupClass::A5);
    let o3 = std.axes_with_fold(3)[0];
    let o5 = std.axes_with_fold(5)[0];
    let generators = IsometrySet::from_iter([
        Isometry::rotation(o3, std::f64::consts::TAU / 3.0).unwrap(),
        Isometry::rotation(o5, std::f64::consts::TAU / 5.0).unwrap(),
    ]);
    let group = generators.group(DEFAULT_GROUP_MAX_ITER).unwrap();
    assert_eq!(group.len(), 60);
    assert_eq!(group, *std.elements());
}

fn gen_axis() -> impl proptest::strategy::Strategy<Value = Vector> {
    use proptest::prelude::*;
    [any::<i8>(), any::<i8>(), any::<i8>()]
        .prop_map(|[x, y, z]| vector![x as Float / 16.0, y as Float / 16.0, z as Float / 16.0])
        .prop_filter("axis must be nonzero", |v| v.mag() > 0.1)
}

proptest::proptest! {
    #![proptest_config(proptest::prelude::ProptestConfig::with_cases(64))]

    #[test]
    fn proptest_oriented_axial_groups(axis in gen_axis(), n in 2_u32..9) {
        let other = if axis.is_parallel(Vector::X) { Vector::Y } else { Vector::X };
        let perpendicular = axis.cross(other);
        let setup = Setup::from([
            (SetupKey::AxisN, axis.into()),
            (SetupKey::Axis2, perpendicular.into()),
        ]);
        let dn = SymmetryGroup::new(GroupClass::Dn(n), &setup).unwrap();
        proptest::prop_assert_eq!(dn.len(), 2 * n as usize);
        proptest::prop_assert!(dn.is_group());
        let turn = Isometry::rotation(axis, std::f64::consts::TAU / n as Float).unwrap();
        proptest::prop_assert!(dn.contains(&turn));
        proptest::prop_assert!(dn.contains(&Isometry::half_turn(perpendicular).unwrap()));

        let dnxi = SymmetryGroup::new(GroupClass::DnxI(n), &setup).unwrap();
        proptest::prop_assert!(dn.is_subgroup_of(&dnxi));
        proptest::prop_assert_eq!(dnxi.direct_parent(), dn);
    }
}
