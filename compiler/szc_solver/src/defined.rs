// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The well-definedness predicate. `defined` conservatively encodes the
//! partiality of the term algebra: the resulting proposition must hold for the
//! expression to denote a value at all. Callers typically conjoin it with the
//! property they actually want to ask about before handing the goal to the
//! decision procedure.


use crate::term::{Expr, Prop};

/// A proposition whose truth is necessary for the expression to be defined
/// under every assignment that satisfies it.
#[must_use]
pub fn defined(expr: &Expr) -> Prop {
    match expr {
        Expr::K(_) | Expr::Var(_) => Prop::True,
        Expr::Add(x, y) | Expr::Mul(x, y) | Expr::Exp(x, y) | Expr::Min(x, y) | Expr::Max(x, y) => {
            Prop::and(defined(x), defined(y))
        }
        // No negative results, and ∞ - ∞ has no value.
        Expr::Sub(x, y) => Prop::and(
            defined(x),
            Prop::and(
                defined(y),
                Prop::and(
                    Prop::Fin((**y).clone()),
                    Prop::Geq((**x).clone(), (**y).clone()),
                ),
            ),
        ),
        // The dividend must be finite: `div` and `mod` of ∞ are undefined here
        // rather than ∞, by agreement with the finite procedure downstream.
        Expr::Div(x, y) | Expr::Mod(x, y) => Prop::and(
            defined(x),
            Prop::and(
                defined(y),
                Prop::and(
                    Prop::Fin((**x).clone()),
                    Prop::not(Prop::Eq((**y).clone(), Expr::zero())),
                ),
            ),
        ),
        Expr::Lg2(x) | Expr::Width(x) => defined(x),
        Expr::LenFromThen(x, y, z) | Expr::LenFromThenTo(x, y, z) => Prop::and(
            defined(x),
            Prop::and(
                defined(y),
                Prop::and(
                    defined(z),
                    Prop::and(
                        Prop::Fin((**x).clone()),
                        Prop::and(
                            Prop::Fin((**y).clone()),
                            Prop::and(
                                Prop::Fin((**z).clone()),
                                Prop::not(Prop::Eq((**x).clone(), (**y).clone())),
                            ),
                        ),
                    ),
                ),
            ),
        ),
    }
}
