use super::*;

#[track_caller]
fn assert_partition(group: &IsometrySet, subgroup: &IsometrySet) {
    let cosets = group.quotient_set(subgroup).unwrap();
    assert_eq!(cosets.len() * subgroup.len(), group.len());
    for (i, coset) in cosets.iter().enumerate() {
        assert_eq!(coset.len(), subgroup.len());
        assert!(coset.is_subset(group));
        for other in &cosets[..i] {
            assert!(coset.intersection(other).is_empty());
        }
    }
    let union = cosets
        .iter()
        .fold(IsometrySet::new(), |acc, coset| acc.union(coset));
    assert_eq!(&union, group);
}

#[test]
fn test_quotient_partitions_group() {
    for class in classes_with_orders(&[1, 2, 3, 4, 6]) {
        let group = SymmetryGroup::new_std(class);
        for &subgroup in group.subgroups().iter() {
            for realisation in group.realise_subgroups(subgroup).unwrap() {
                assert_partition(&group, &realisation);
            }
        }
    }
}

#[test]
fn test_a4_quotient_by_d2() {
    let a4 = SymmetryGroup::new_std(GroupClass::A4);
    let d2 = a4.realise_subgroups(GroupClass::Dn(2)).unwrap();
    assert_eq!(d2.len(), 1);
    let cosets = a4.quotient_set(&d2[0]).unwrap();
    assert_eq!(cosets.len(), 3);
    assert!(cosets.iter().all(|coset| coset.len() == 4));
    assert_partition(&a4, &d2[0]);
}

#[test]
fn test_quotient_by_non_subgroup() {
    let d3 = SymmetryGroup::new_std(GroupClass::Dn(3));
    let c4 = SymmetryGroup::new_std(GroupClass::Cn(4));
    assert_eq!(
        d3.quotient_set(&c4),
        Err(GroupError::Subgroup(SubgroupError::NotContained)),
    );
}
