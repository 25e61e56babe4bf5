// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The local one-step rewrite rules. Each rule inspects a specific syntactic
//! shape and either returns the rewritten proposition or reports that no rule
//! fires at this node; congruence is the driver's job. The finiteness case
//! tables in `is_0` and `is_fin` are the only points where ∞ interacts with
//! finite arithmetic, which is what lets the residual goal passed downstream
//! be free of ∞ entirely.


use crate::{
    no_inf::nat_op,
    term::{Expr, Name, Prop},
};
use szc_infnat::InfNat;

/// Decides or rewrites `x :== y`. Returns `None` when no rule applies (for
/// example `a == 0` for a variable `a`).
#[must_use]
pub fn is_eq(x: &Expr, y: &Expr) -> Option<Prop> {
    match (x, y) {
        (Expr::K(m), Expr::K(n)) => Some(Prop::from_bool(m == n)),
        (Expr::K(k), _) if k.is_zero() => is_0(y),
        (_, Expr::K(k)) if k.is_zero() => is_0(x),
        (Expr::K(InfNat::Inf), _) => Some(Prop::not(Prop::Fin(y.clone()))),
        (_, Expr::K(InfNat::Inf)) => Some(Prop::not(Prop::Fin(x.clone()))),
        _ => Some(Prop::or(
            Prop::and(
                Prop::not(Prop::Fin(x.clone())),
                Prop::not(Prop::Fin(y.clone())),
            ),
            Prop::and(
                Prop::Fin(x.clone()),
                Prop::and(Prop::Fin(y.clone()), nat_op(Prop::EqNat, x, y)),
            ),
        )),
    }
}

/// Rewrites `x :> y`. Always succeeds.
#[must_use]
pub fn is_gt(x: &Expr, y: &Expr) -> Prop {
    match (x, y) {
        (Expr::K(m), Expr::K(n)) => Prop::from_bool(m > n),
        (_, Expr::K(k)) if k.is_zero() => Prop::not(Prop::Eq(x.clone(), Expr::zero())),
        _ => Prop::and(
            Prop::Fin(y.clone()),
            Prop::or(
                Prop::Eq(x.clone(), Expr::inf()),
                Prop::and(Prop::Fin(x.clone()), nat_op(Prop::GtNat, x, y)),
            ),
        ),
    }
}

/// Decides or rewrites `e :== 0`, assuming `e` is defined.
#[must_use]
pub(crate) fn is_0(expr: &Expr) -> Option<Prop> {
    let eq_zero = |e: &Expr| Prop::Eq(e.clone(), Expr::zero());
    let gt = |x: &Expr, y: &Expr| Prop::Gt(x.clone(), y.clone());
    match expr {
        Expr::K(k) => Some(Prop::from_bool(k.is_zero())),
        Expr::Var(_) | Expr::Mod(..) => None,
        Expr::Add(a, b) => Some(Prop::and(eq_zero(a), eq_zero(b))),
        Expr::Sub(a, b) => Some(Prop::Eq((**a).clone(), (**b).clone())),
        Expr::Mul(a, b) => Some(Prop::or(eq_zero(a), eq_zero(b))),
        // a / b rounds to zero exactly when the divisor is too big.
        Expr::Div(a, b) => Some(gt(b, a)),
        // 0 ^ 0 = 1.
        Expr::Exp(a, b) => Some(Prop::and(eq_zero(a), Prop::Gt((**b).clone(), Expr::zero()))),
        Expr::Min(a, b) => Some(Prop::or(eq_zero(a), eq_zero(b))),
        Expr::Max(a, b) => Some(Prop::and(eq_zero(a), eq_zero(b))),
        Expr::Lg2(a) => Some(Prop::or(
            eq_zero(a),
            Prop::Eq((**a).clone(), Expr::one()),
        )),
        Expr::Width(a) => Some(eq_zero(a)),
        Expr::LenFromThen(x, y, w) => Some(Prop::or(eq_zero(w), gt(x, y))),
        Expr::LenFromThenTo(x, y, z) => Some(Prop::or(
            Prop::and(gt(x, y), gt(z, x)),
            Prop::and(gt(y, x), gt(x, z)),
        )),
    }
}

/// Decides or rewrites `fin e`.
#[must_use]
pub(crate) fn is_fin(expr: &Expr) -> Option<Prop> {
    let fin = |e: &Expr| Prop::Fin((*e).clone());
    let eq_zero = |e: &Expr| Prop::Eq((*e).clone(), Expr::zero());
    let eq_inf = |e: &Expr| Prop::Eq((*e).clone(), Expr::inf());
    match expr {
        Expr::K(k) => Some(Prop::from_bool(k.is_finite())),
        Expr::Var(_) => None,
        Expr::Add(a, b) | Expr::Max(a, b) => Some(Prop::and(fin(a), fin(b))),
        Expr::Sub(a, _) | Expr::Div(a, _) => Some(fin(a)),
        Expr::Mul(a, b) => Some(Prop::or(
            Prop::and(fin(a), fin(b)),
            Prop::or(
                Prop::and(eq_zero(a), eq_inf(b)),
                Prop::and(eq_zero(b), eq_inf(a)),
            ),
        )),
        Expr::Mod(..) | Expr::LenFromThen(..) | Expr::LenFromThenTo(..) => Some(Prop::True),
        Expr::Exp(a, b) => Some(Prop::or(
            Prop::and(fin(a), fin(b)),
            Prop::or(
                Prop::and(eq_inf(a), eq_zero(b)),
                Prop::and(
                    eq_inf(b),
                    Prop::or(eq_zero(a), Prop::Eq((**a).clone(), Expr::one())),
                ),
            ),
        )),
        Expr::Min(a, b) => Some(Prop::or(fin(a), fin(b))),
        Expr::Lg2(a) | Expr::Width(a) => Some(fin(a)),
    }
}

/// Pushes a negation inward or decides it. The argument is the negated
/// proposition; `not (fin _)`, negated strict comparisons, and `not (x == y)`
/// without an `inf` literal are left alone.
#[must_use]
pub(crate) fn not_step(prop: &Prop) -> Option<Prop> {
    match prop {
        Prop::True => Some(Prop::False),
        Prop::False => Some(Prop::True),
        Prop::Not(p) => Some((**p).clone()),
        Prop::And(p, q) => Some(Prop::or(
            Prop::not((**p).clone()),
            Prop::not((**q).clone()),
        )),
        Prop::Or(p, q) => Some(Prop::and(
            Prop::not((**p).clone()),
            Prop::not((**q).clone()),
        )),
        Prop::Geq(x, y) => Some(Prop::Gt(y.clone(), x.clone())),
        Prop::Gt(x, y) => Some(Prop::Geq(y.clone(), x.clone())),
        Prop::Eq(x, y) if y.is_inf() => Some(Prop::Fin(x.clone())),
        Prop::Eq(x, y) if x.is_inf() => Some(Prop::Fin(y.clone())),
        _ => None,
    }
}

/// One step on a conjunction: unit and absorbing constants, right
/// reassociation of conjunction chains, and finiteness propagation from a
/// leading `fin` atom on a variable.
#[must_use]
pub(crate) fn and_step(p: &Prop, q: &Prop) -> Option<Prop> {
    match p {
        Prop::True => return Some(q.clone()),
        Prop::False => return Some(Prop::False),
        Prop::And(p1, p2) => {
            return Some(Prop::and(
                (**p1).clone(),
                Prop::and((**p2).clone(), q.clone()),
            ));
        }
        Prop::Fin(Expr::Var(x)) => {
            if let Some(q) = known_fin(*x, true, q) {
                return Some(Prop::and(p.clone(), q));
            }
        }
        Prop::Not(inner) => {
            if let Prop::Fin(Expr::Var(x)) = &**inner {
                if let Some(q) = known_fin(*x, false, q) {
                    return Some(Prop::and(p.clone(), q));
                }
            }
        }
        _ => {}
    }
    match q {
        Prop::True => Some(p.clone()),
        Prop::False => Some(Prop::False),
        _ => None,
    }
}

/// One step on a disjunction: unit and absorbing constants only.
#[must_use]
pub(crate) fn or_step(p: &Prop, q: &Prop) -> Option<Prop> {
    match p {
        Prop::True => Some(Prop::True),
        Prop::False => Some(q.clone()),
        _ => match q {
            Prop::True => Some(Prop::True),
            Prop::False => Some(p.clone()),
            _ => None,
        },
    }
}

/// Replaces every `fin x` atom for the given variable with a constant,
/// descending through the connectives only. `None` means nothing changed, so
/// the caller must not count this as a step.
fn known_fin(x: Name, is_fin: bool, prop: &Prop) -> Option<Prop> {
    match prop {
        Prop::Fin(Expr::Var(y)) if *y == x => Some(Prop::from_bool(is_fin)),
        Prop::And(p, q) => match (known_fin(x, is_fin, p), known_fin(x, is_fin, q)) {
            (None, None) => None,
            (p2, q2) => Some(Prop::and(
                p2.unwrap_or_else(|| (**p).clone()),
                q2.unwrap_or_else(|| (**q).clone()),
            )),
        },
        Prop::Or(p, q) => match (known_fin(x, is_fin, p), known_fin(x, is_fin, q)) {
            (None, None) => None,
            (p2, q2) => Some(Prop::or(
                p2.unwrap_or_else(|| (**p).clone()),
                q2.unwrap_or_else(|| (**q).clone()),
            )),
        },
        Prop::Not(p) => known_fin(x, is_fin, p).map(Prop::not),
        _ => None,
    }
}
