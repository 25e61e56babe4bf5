// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Property tests over randomly generated terms. The generator is seeded, so
//! the suite is deterministic. Enumeration lengths are exercised by targeted
//! unit tests instead of random generation: their rewrite table assumes
//! well-typed enumerations, which a blind generator does not produce.

use crate::{
    defined::defined,
    eval::{eval_expr, eval_prop, Env},
    no_inf::{no_inf, IfExpr},
    simplify::{simp_step, simplify},
    term::{Expr, Name, Prop},
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use szc_infnat::InfNat;

const VARS: u32 = 4;

fn gen_value(rng: &mut StdRng) -> InfNat {
    if rng.gen_range(0..5) == 0 {
        InfNat::Inf
    } else {
        InfNat::from(rng.gen_range(0..4u64))
    }
}

fn gen_env(rng: &mut StdRng) -> Env {
    (0..VARS).map(|id| (Name::new(id), gen_value(rng))).collect()
}

fn gen_leaf(rng: &mut StdRng) -> Expr {
    match rng.gen_range(0..6) {
        0 => Expr::inf(),
        1 | 2 => Expr::num(rng.gen_range(0..4)),
        _ => Expr::var(rng.gen_range(0..VARS)),
    }
}

fn gen_expr(rng: &mut StdRng, depth: u32) -> Expr {
    if depth == 0 {
        return gen_leaf(rng);
    }
    match rng.gen_range(0..11) {
        0 => gen_leaf(rng),
        1 => Expr::add(gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        2 => Expr::sub(gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        3 => Expr::mul(gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        4 => Expr::div(gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        5 => Expr::rem(gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        // A compound exponent can make a concrete value astronomically large,
        // so exponents stay leaves.
        6 => Expr::exp(gen_expr(rng, depth - 1), gen_leaf(rng)),
        7 => Expr::min(gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        8 => Expr::max(gen_expr(rng, depth - 1), gen_expr(rng, depth - 1)),
        9 => Expr::lg2(gen_expr(rng, depth - 1)),
        _ => Expr::width(gen_expr(rng, depth - 1)),
    }
}

fn gen_atom(rng: &mut StdRng, depth: u32) -> Prop {
    match rng.gen_range(0..8) {
        0 => Prop::True,
        1 => Prop::False,
        2 | 3 => Prop::Fin(gen_expr(rng, depth)),
        4 | 5 => Prop::Eq(gen_expr(rng, depth), gen_expr(rng, depth)),
        6 => Prop::Geq(gen_expr(rng, depth), gen_expr(rng, depth)),
        _ => Prop::Gt(gen_expr(rng, depth), gen_expr(rng, depth)),
    }
}

fn gen_prop(rng: &mut StdRng, depth: u32) -> Prop {
    if depth == 0 {
        return gen_atom(rng, 2);
    }
    match rng.gen_range(0..6) {
        0 | 1 => gen_atom(rng, 2),
        2 => Prop::and(gen_prop(rng, depth - 1), gen_prop(rng, depth - 1)),
        3 => Prop::or(gen_prop(rng, depth - 1), gen_prop(rng, depth - 1)),
        _ => Prop::not(gen_prop(rng, depth - 1)),
    }
}

#[test]
fn simplify_is_idempotent() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..300 {
        let prop = gen_prop(&mut rng, 3);
        let simplified = simplify(&prop);
        assert_eq!(simplify(&simplified), simplified, "input: {prop}");
    }
}

#[test]
fn normal_forms_have_no_step() {
    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..300 {
        let prop = gen_prop(&mut rng, 3);
        let simplified = simplify(&prop);
        assert!(
            simp_step(&simplified).is_none(),
            "not a fixpoint: {simplified}"
        );
    }
}

#[test]
fn simplification_preserves_evaluation() {
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..300 {
        let prop = gen_prop(&mut rng, 3);
        let simplified = simplify(&prop);
        for _ in 0..8 {
            let env = gen_env(&mut rng);
            if let (Ok(before), Ok(after)) =
                (eval_prop(&env, &prop), eval_prop(&env, &simplified))
            {
                assert_eq!(before, after, "input: {prop}\nsimplified: {simplified}");
            }
        }
    }
}

#[test]
fn defined_implies_evaluable() {
    let mut rng = StdRng::seed_from_u64(4);
    for _ in 0..500 {
        let expr = gen_expr(&mut rng, 3);
        let guard = defined(&expr);
        for _ in 0..8 {
            let env = gen_env(&mut rng);
            if eval_prop(&env, &guard) == Ok(true) {
                assert!(
                    eval_expr(&env, &expr).is_ok(),
                    "defined but not evaluable: {expr}"
                );
            }
        }
    }
}

#[test]
fn no_inf_leaves_are_inf_free() {
    let mut rng = StdRng::seed_from_u64(5);
    for _ in 0..500 {
        let expr = gen_expr(&mut rng, 3);
        let mut leaves = Vec::new();
        collect_leaves(&no_inf(&expr), &mut leaves);
        for leaf in leaves {
            assert!(
                leaf.is_inf() || !leaf.contains_inf(),
                "leaf with nested inf in no_inf({expr})"
            );
        }
    }
}

fn collect_leaves(tree: &IfExpr<Expr>, leaves: &mut Vec<Expr>) {
    match tree {
        IfExpr::If(_, t, e) => {
            collect_leaves(t, leaves);
            collect_leaves(e, leaves);
        }
        IfExpr::Return(expr) => leaves.push(expr.clone()),
        IfExpr::Impossible => {}
    }
}

#[test]
fn strict_atoms_are_inf_free() {
    let mut rng = StdRng::seed_from_u64(6);
    for _ in 0..300 {
        let prop = gen_prop(&mut rng, 3);
        let simplified = simplify(&prop);
        each_atom(&simplified, &mut |atom| {
            if let Prop::EqNat(x, y) | Prop::GtNat(x, y) = atom {
                assert!(
                    !x.contains_inf() && !y.contains_inf(),
                    "inf in strict atom of {simplified}"
                );
            }
        });
    }
}

fn each_atom(prop: &Prop, f: &mut impl FnMut(&Prop)) {
    match prop {
        Prop::And(p, q) | Prop::Or(p, q) => {
            each_atom(p, f);
            each_atom(q, f);
        }
        Prop::Not(p) => each_atom(p, f),
        _ => f(prop),
    }
}

#[test]
fn finiteness_propagates_out_of_the_tail() {
    let mut rng = StdRng::seed_from_u64(7);
    let target = Name::new(0);
    for _ in 0..300 {
        let tail = gen_prop(&mut rng, 3);
        for known in [true, false] {
            let atom = Prop::Fin(Expr::Var(target));
            let head = if known {
                atom.clone()
            } else {
                Prop::not(atom.clone())
            };
            let simplified = simplify(&Prop::and(head.clone(), tail.clone()));
            match &simplified {
                Prop::And(p, rest) if **p == head => {
                    assert_eq!(
                        fin_atom_count(rest, target),
                        0,
                        "stray fin atom in {simplified}"
                    );
                }
                other => assert!(
                    *other == head || *other == Prop::True || *other == Prop::False,
                    "unexpected shape: {other}"
                ),
            }
        }
    }
}

fn fin_atom_count(prop: &Prop, target: Name) -> usize {
    let mut count = 0;
    each_atom(prop, &mut |atom| {
        if matches!(atom, Prop::Fin(Expr::Var(x)) if *x == target) {
            count += 1;
        }
    });
    count
}
