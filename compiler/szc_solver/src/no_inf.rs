// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Infinity elimination. `no_inf` lifts every occurrence of ∞ out of an
//! expression into a decision tree whose tests are strict comparisons on
//! finite subexpressions. A leaf is either an expression free of ∞, the
//! literal `inf` itself (the branch denotes ∞), or impossible (the branch
//! would force a necessarily-finite subterm to be ∞). `nat_op` collapses a
//! pair of such trees back into a proposition, so the strict comparisons the
//! simplifier emits never mention ∞ at all.

#[cfg(test)]
mod tests;

use crate::term::{Expr, Prop};

/// A finite decision tree over propositions.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum IfExpr<A> {
    /// Case split on a proposition.
    If(Prop, Box<IfExpr<A>>, Box<IfExpr<A>>),
    /// A leaf value.
    Return(A),
    /// A semantically excluded branch.
    Impossible,
}

impl<A> IfExpr<A> {
    #[must_use]
    pub fn branch(cond: Prop, then: Self, els: Self) -> Self {
        Self::If(cond, Box::new(then), Box::new(els))
    }

    /// Sequential composition. `Impossible` is absorbing; the continuation
    /// runs once per reachable leaf.
    #[must_use]
    pub fn bind<B>(self, k: &impl Fn(A) -> IfExpr<B>) -> IfExpr<B> {
        match self {
            Self::If(p, t, e) => IfExpr::If(p, Box::new(t.bind(k)), Box::new(e.bind(k))),
            Self::Return(a) => k(a),
            Self::Impossible => IfExpr::Impossible,
        }
    }
}

/// Lifts ∞ out of an expression, recursing on children first and binding
/// their trees monadically. `Return` leaves are either exactly `inf` or free
/// of `inf` subterms.
#[must_use]
pub fn no_inf(expr: &Expr) -> IfExpr<Expr> {
    match expr {
        Expr::K(_) | Expr::Var(_) => IfExpr::Return(expr.clone()),
        Expr::Add(x, y) => bind2(x, y, |x, y| {
            if x.is_inf() || y.is_inf() {
                IfExpr::Return(Expr::inf())
            } else {
                IfExpr::Return(Expr::add(x, y))
            }
        }),
        Expr::Sub(x, y) => bind2(x, y, |x, y| {
            if y.is_inf() {
                IfExpr::Impossible
            } else if x.is_inf() {
                IfExpr::Return(Expr::inf())
            } else {
                IfExpr::Return(Expr::sub(x, y))
            }
        }),
        Expr::Mul(x, y) => bind2(x, y, |x, y| match (x.is_inf(), y.is_inf()) {
            (true, true) => IfExpr::Return(Expr::inf()),
            (true, false) => IfExpr::branch(
                Prop::EqNat(y, Expr::zero()),
                IfExpr::Return(Expr::zero()),
                IfExpr::Return(Expr::inf()),
            ),
            (false, true) => IfExpr::branch(
                Prop::EqNat(x, Expr::zero()),
                IfExpr::Return(Expr::zero()),
                IfExpr::Return(Expr::inf()),
            ),
            (false, false) => IfExpr::Return(Expr::mul(x, y)),
        }),
        Expr::Div(x, y) => bind2(x, y, |x, y| {
            if x.is_inf() {
                IfExpr::Impossible
            } else if y.is_inf() {
                IfExpr::Return(Expr::zero())
            } else {
                IfExpr::Return(Expr::div(x, y))
            }
        }),
        Expr::Mod(x, y) => bind2(x, y, |x, y| {
            if x.is_inf() {
                IfExpr::Impossible
            } else if y.is_inf() {
                IfExpr::Return(x)
            } else {
                IfExpr::Return(Expr::rem(x, y))
            }
        }),
        Expr::Exp(x, y) => bind2(x, y, |x, y| match (x.is_inf(), y.is_inf()) {
            (true, true) => IfExpr::Return(Expr::inf()),
            (true, false) => IfExpr::branch(
                Prop::EqNat(y, Expr::zero()),
                IfExpr::Return(Expr::one()),
                IfExpr::Return(Expr::inf()),
            ),
            (false, true) => IfExpr::branch(
                Prop::EqNat(x.clone(), Expr::zero()),
                IfExpr::Return(Expr::zero()),
                IfExpr::branch(
                    Prop::EqNat(x, Expr::one()),
                    IfExpr::Return(Expr::one()),
                    IfExpr::Return(Expr::inf()),
                ),
            ),
            (false, false) => IfExpr::Return(Expr::exp(x, y)),
        }),
        Expr::Min(x, y) => bind2(x, y, |x, y| {
            if x.is_inf() {
                IfExpr::Return(y)
            } else if y.is_inf() {
                IfExpr::Return(x)
            } else {
                IfExpr::Return(Expr::min(x, y))
            }
        }),
        Expr::Max(x, y) => bind2(x, y, |x, y| {
            if x.is_inf() || y.is_inf() {
                IfExpr::Return(Expr::inf())
            } else {
                IfExpr::Return(Expr::max(x, y))
            }
        }),
        Expr::Lg2(x) => bind1(x, |x| {
            if x.is_inf() {
                IfExpr::Return(Expr::inf())
            } else {
                IfExpr::Return(Expr::lg2(x))
            }
        }),
        Expr::Width(x) => bind1(x, |x| {
            if x.is_inf() {
                IfExpr::Return(Expr::inf())
            } else {
                IfExpr::Return(Expr::width(x))
            }
        }),
        Expr::LenFromThen(x, y, z) => bind3(x, y, z, |x, y, z| {
            if x.is_inf() || y.is_inf() || z.is_inf() {
                IfExpr::Impossible
            } else {
                IfExpr::Return(Expr::len_from_then(x, y, z))
            }
        }),
        Expr::LenFromThenTo(x, y, z) => bind3(x, y, z, |x, y, z| {
            if x.is_inf() || y.is_inf() || z.is_inf() {
                IfExpr::Impossible
            } else {
                IfExpr::Return(Expr::len_from_then_to(x, y, z))
            }
        }),
    }
}

/// The bridge from possibly-infinite comparisons to strict ones: branches
/// where either side would be ∞ become `False`, and the decision tree
/// collapses into a proposition.
#[must_use]
pub fn nat_op(op: fn(Expr, Expr) -> Prop, x: &Expr, y: &Expr) -> Prop {
    let tree = bind2(x, y, |x, y| {
        if x.is_inf() || y.is_inf() {
            IfExpr::Impossible
        } else {
            IfExpr::Return(op(x, y))
        }
    });
    to_prop(tree)
}

fn to_prop(tree: IfExpr<Prop>) -> Prop {
    match tree {
        IfExpr::If(p, t, e) => Prop::or(
            Prop::and(p.clone(), to_prop(*t)),
            Prop::and(Prop::not(p), to_prop(*e)),
        ),
        IfExpr::Return(p) => p,
        IfExpr::Impossible => Prop::False,
    }
}

fn bind1<B>(x: &Expr, k: impl Fn(Expr) -> IfExpr<B>) -> IfExpr<B> {
    no_inf(x).bind(&k)
}

fn bind2<B>(x: &Expr, y: &Expr, k: impl Fn(Expr, Expr) -> IfExpr<B>) -> IfExpr<B> {
    no_inf(x).bind(&|xv| {
        let k = &k;
        no_inf(y).bind(&move |yv| k(xv.clone(), yv))
    })
}

fn bind3<B>(
    x: &Expr,
    y: &Expr,
    z: &Expr,
    k: impl Fn(Expr, Expr, Expr) -> IfExpr<B>,
) -> IfExpr<B> {
    no_inf(x).bind(&|xv| {
        let k = &k;
        no_inf(y).bind(&move |yv| {
            let xv = xv.clone();
            no_inf(z).bind(&move |zv| k(xv.clone(), yv.clone(), zv))
        })
    })
}