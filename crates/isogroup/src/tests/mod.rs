use crate::*;

mod closure;
mod quotient;

/// Orders used for the axial families in exhaustive tests.
const TEST_ORDERS: [u32; 10] = [1, 2, 3, 4, 5, 6, 8, 9, 12, 15];

/// Returns every canonical class with an axial order in `orders`, plus every
/// class with no parameter.
fn classes_with_orders(orders: &[u32]) -> Vec<GroupClass> {
    let mut ret = vec![];
    for &n in orders {
        for class in [
            GroupClass::cn(n),
            GroupClass::cnxi(n),
            GroupClass::c2ncn(n),
            GroupClass::dn(n),
            GroupClass::dncn(n),
            GroupClass::dnxi(n),
            GroupClass::d2ndn(n),
        ] {
            if !ret.contains(&class) {
                ret.push(class);
            }
        }
    }
    for class in GroupClass::FIXED {
        if !ret.contains(&class) {
            ret.push(class);
        }
    }
    ret
}

/// Returns every canonical class whose order divides `order`.
fn classes_dividing(order: usize) -> Vec<GroupClass> {
    let divisors: Vec<u32> = (1..=order as u32)
        .filter(|&i| order % i as usize == 0)
        .collect();
    classes_with_orders(&divisors)
        .into_iter()
        .filter(|class| order % class.order() == 0)
        .collect()
}

#[track_caller]
fn assert_same_classes(actual: &[GroupClass], expected: &str) {
    let mut actual = actual.to_vec();
    let mut expected: Vec<GroupClass> = expected
        .split_whitespace()
        .map(|s| s.parse().unwrap())
        .collect();
    actual.sort();
    expected.sort();
    pretty_assertions::assert_eq!(actual, expected);
}
