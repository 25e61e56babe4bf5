// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use super::{nat_op, no_inf};
use crate::term::{Expr, Prop};
use expect_test::{expect, Expect};

fn check_tree(expr: &Expr, expect: &Expect) {
    expect.assert_eq(&no_inf(expr).to_string());
}

fn check_prop(prop: &Prop, expect: &Expect) {
    expect.assert_eq(&prop.to_string());
}

fn a() -> Expr {
    Expr::var(0)
}

fn b() -> Expr {
    Expr::var(1)
}

#[test]
fn leaves_pass_through() {
    check_tree(&a(), &expect![["a"]]);
    check_tree(&Expr::num(3), &expect![["3"]]);
    check_tree(&Expr::inf(), &expect![["inf"]]);
}

#[test]
fn add_absorbs_inf() {
    check_tree(&Expr::add(a(), b()), &expect![["a + b"]]);
    check_tree(&Expr::add(a(), Expr::inf()), &expect![["inf"]]);
    check_tree(&Expr::max(Expr::inf(), b()), &expect![["inf"]]);
}

#[test]
fn sub_rejects_infinite_subtrahend() {
    check_tree(&Expr::sub(a(), Expr::inf()), &expect![["impossible"]]);
    check_tree(&Expr::sub(Expr::inf(), b()), &expect![["inf"]]);
    check_tree(&Expr::sub(a(), b()), &expect![["a - b"]]);
}

#[test]
fn div_and_mod_by_inf() {
    check_tree(&Expr::div(Expr::inf(), b()), &expect![["impossible"]]);
    check_tree(&Expr::div(a(), Expr::inf()), &expect![["0"]]);
    check_tree(&Expr::rem(Expr::inf(), b()), &expect![["impossible"]]);
    check_tree(&Expr::rem(a(), Expr::inf()), &expect![["a"]]);
}

#[test]
fn min_drops_the_infinite_side() {
    check_tree(&Expr::min(Expr::inf(), b()), &expect![["b"]]);
    check_tree(&Expr::min(a(), Expr::inf()), &expect![["a"]]);
}

#[test]
fn mul_splits_on_the_finite_factor() {
    check_tree(
        &Expr::mul(Expr::inf(), b()),
        &expect![["if b :==: 0 then 0 else inf"]],
    );
    check_tree(
        &Expr::mul(a(), Expr::inf()),
        &expect![["if a :==: 0 then 0 else inf"]],
    );
    check_tree(&Expr::mul(Expr::inf(), Expr::inf()), &expect![["inf"]]);
}

#[test]
fn exp_splits_on_base_and_exponent() {
    check_tree(
        &Expr::exp(Expr::inf(), b()),
        &expect![["if b :==: 0 then 1 else inf"]],
    );
    check_tree(
        &Expr::exp(a(), Expr::inf()),
        &expect![["if a :==: 0 then 0 else if a :==: 1 then 1 else inf"]],
    );
    check_tree(&Expr::exp(Expr::inf(), Expr::inf()), &expect![["inf"]]);
}

#[test]
fn lg2_and_width_of_inf() {
    check_tree(&Expr::lg2(Expr::inf()), &expect![["inf"]]);
    check_tree(&Expr::width(Expr::inf()), &expect![["inf"]]);
    check_tree(&Expr::lg2(a()), &expect![["lg2 a"]]);
}

#[test]
fn enumerations_must_be_finite() {
    check_tree(
        &Expr::len_from_then(a(), b(), Expr::num(8)),
        &expect![["lenFromThen a b 8"]],
    );
    check_tree(
        &Expr::len_from_then(a(), Expr::inf(), Expr::num(8)),
        &expect![["impossible"]],
    );
    check_tree(
        &Expr::len_from_then_to(a(), b(), Expr::inf()),
        &expect![["impossible"]],
    );
}

#[test]
fn trees_compose_through_children() {
    check_tree(
        &Expr::mul(Expr::inf(), Expr::mul(Expr::inf(), Expr::add(a(), b()))),
        &expect![["if a + b :==: 0 then if 0 :==: 0 then 0 else inf else inf"]],
    );
    check_tree(
        &Expr::add(Expr::mul(Expr::inf(), a()), b()),
        &expect![["if a :==: 0 then 0 + b else inf"]],
    );
}

#[test]
fn nat_op_builds_strict_atoms() {
    check_prop(&nat_op(Prop::EqNat, &a(), &b()), &expect![["a :==: b"]]);
    check_prop(
        &nat_op(Prop::GtNat, &Expr::add(a(), b()), &Expr::num(1)),
        &expect![["a + b :>: 1"]],
    );
}

#[test]
fn nat_op_rejects_infinite_sides() {
    check_prop(&nat_op(Prop::EqNat, &a(), &Expr::inf()), &expect![["False"]]);
    check_prop(
        &nat_op(Prop::GtNat, &Expr::mul(Expr::inf(), a()), &b()),
        &expect![["a :==: 0 && 0 :>: b || not (a :==: 0) && False"]],
    );
}
