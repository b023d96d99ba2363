use proptest::prelude::*;

use crate::*;

fn gen_reasonable_float() -> impl Strategy<Value = Float> {
    (any::<u8>(), any::<i8>()).prop_map(|(f, i)| i as Float / 16.0 + f as Float / 4096.0)
}
fn gen_vector() -> impl Strategy<Value = Vector> {
    [gen_reasonable_float(), gen_reasonable_float(), gen_reasonable_float()].prop_map(Vector)
}
fn gen_normalized_vector() -> impl Strategy<Value = Vector> {
    gen_vector().prop_filter_map("cannot normalize zero vector", |v| {
        (v.mag() > 0.01).then(|| v.normalize()).flatten()
    })
}
fn gen_isometry() -> impl Strategy<Value = Isometry> {
    (gen_normalized_vector(), -7.0..7.0_f64, any::<bool>()).prop_map(|(axis, angle, inverted)| {
        let rot = Isometry::from_rotor(Rotor::from_axis_angle_normalized(axis, angle));
        match inverted {
            true => rot.inverted(),
            false => rot,
        }
    })
}

proptest! {
    #[test]
    fn proptest_isometry_composition(
        a in gen_isometry(),
        b in gen_isometry(),
        v in gen_vector(),
    ) {
        let expected = a.transform_vector(b.transform_vector(v));
        prop_assert!(approx_eq(&(a * b).transform_vector(v), &expected));
        prop_assert_eq!((a * b).is_inverted(), a.is_inverted() != b.is_inverted());
    }

    #[test]
    fn proptest_isometry_associativity(
        a in gen_isometry(),
        b in gen_isometry(),
        c in gen_isometry(),
    ) {
        prop_assert!(approx_eq(&((a * b) * c), &(a * (b * c))));
    }

    #[test]
    fn proptest_isometry_inverse(a in gen_isometry(), v in gen_vector()) {
        prop_assert!((a * a.inverse()).is_ident());
        prop_assert!((a.inverse() * a).is_ident());
        prop_assert!(approx_eq(&a.inverse().transform_vector(a.transform_vector(v)), &v));
    }

    #[test]
    fn proptest_isometry_preserves_lengths(
        a in gen_isometry(),
        v in gen_vector(),
        w in gen_vector(),
    ) {
        let (av, aw) = (a.transform_vector(v), a.transform_vector(w));
        prop_assert!(approx_eq(&av.dot(aw), &v.dot(w)));
    }

    #[test]
    fn proptest_isometry_kind_round_trip(a in gen_isometry()) {
        let kind = a.kind();
        let b = Isometry::from_kind(&kind);
        prop_assert!(b.is_some_and(|b| approx_eq(&a, &b)), "{a:?} has kind {kind:?}");
    }

    #[test]
    fn proptest_central_inversion_commutes(a in gen_isometry()) {
        let i = Isometry::central_inversion();
        prop_assert!(approx_eq(&(a * i), &(i * a)));
        prop_assert!((i * i).is_ident());
    }
}
