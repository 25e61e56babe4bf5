// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::{Expr, Name, Prop};

#[test]
fn constants() {
    assert_eq!(Expr::num(0), Expr::zero());
    assert_eq!(Expr::num(1), Expr::one());
    assert!(Expr::zero().is_zero());
    assert!(!Expr::one().is_zero());
    assert!(Expr::inf().is_inf());
    assert!(!Expr::num(5).is_inf());
    assert!(!Expr::var(0).is_zero());
}

#[test]
fn names_compare_by_id() {
    assert_eq!(Name::new(3), Name::new(3));
    assert_ne!(Name::new(3), Name::new(4));
    assert_eq!(Name::new(27).id(), 27);
}

#[test]
fn equality_is_structural() {
    let sum = Expr::add(Expr::var(0), Expr::var(1));
    assert_eq!(sum, Expr::add(Expr::var(0), Expr::var(1)));
    assert_eq!(sum.clone(), sum);
    assert_ne!(sum, Expr::add(Expr::var(1), Expr::var(0)));
    assert_ne!(sum, Expr::sub(Expr::var(0), Expr::var(1)));
    assert_ne!(
        Prop::Eq(Expr::var(0), Expr::var(1)),
        Prop::EqNat(Expr::var(0), Expr::var(1))
    );
}

#[test]
fn from_bool() {
    assert_eq!(Prop::from_bool(true), Prop::True);
    assert_eq!(Prop::from_bool(false), Prop::False);
}

#[test]
fn contains_inf_finds_nested_literals() {
    assert!(!Expr::var(0).contains_inf());
    assert!(!Expr::num(3).contains_inf());
    assert!(Expr::inf().contains_inf());
    assert!(Expr::mul(Expr::var(0), Expr::add(Expr::var(1), Expr::inf())).contains_inf());
    assert!(Expr::lg2(Expr::inf()).contains_inf());
    assert!(Expr::len_from_then_to(Expr::var(0), Expr::var(1), Expr::inf()).contains_inf());
    assert!(!Expr::len_from_then_to(Expr::var(0), Expr::var(1), Expr::var(2)).contains_inf());
}

#[test]
fn size_counts_every_node() {
    assert_eq!(Expr::var(0).size(), 1);
    assert_eq!(Expr::add(Expr::var(0), Expr::mul(Expr::var(1), Expr::var(2))).size(), 5);
    assert_eq!(Expr::lg2(Expr::var(0)).size(), 2);
    assert_eq!(Expr::len_from_then(Expr::var(0), Expr::var(1), Expr::var(2)).size(), 4);
    assert_eq!(Prop::True.size(), 1);
    assert_eq!(Prop::Fin(Expr::add(Expr::var(0), Expr::var(1))).size(), 4);
    assert_eq!(Prop::not(Prop::True).size(), 2);
    assert_eq!(
        Prop::and(
            Prop::Fin(Expr::var(0)),
            Prop::Eq(Expr::var(0), Expr::zero())
        )
        .size(),
        6
    );
}
