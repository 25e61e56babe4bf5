// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The reference semantics: evaluation of terms and propositions under a
//! total assignment of variables to ℕ∞ values. The simplifier itself never
//! evaluates anything; this module exists so that callers (and the property
//! tests) can check candidate assignments and so that soundness has a
//! definition to be sound against.


use crate::term::{Expr, Name, Prop};
use miette::Diagnostic;
use std::collections::HashMap;
use szc_infnat::InfNat;
use thiserror::Error;

/// A variable assignment.
pub type Env = HashMap<Name, InfNat>;

#[derive(Clone, Debug, Diagnostic, Error, Eq, PartialEq)]
pub enum Error {
    #[error("division by zero")]
    DivisionByZero,

    #[error("subtraction underflow")]
    Underflow,

    #[error("operand must be finite")]
    InfiniteOperand,

    #[error("enumeration from a point to itself")]
    EmptyStride,

    #[error("unbound variable `{0}`")]
    UnboundVariable(Name),
}

/// Evaluates an expression. Errors exactly where `defined` says the
/// expression may be undefined.
pub fn eval_expr(env: &Env, expr: &Expr) -> Result<InfNat, Error> {
    match expr {
        Expr::K(k) => Ok(k.clone()),
        Expr::Var(x) => env.get(x).cloned().ok_or(Error::UnboundVariable(*x)),
        Expr::Add(x, y) => Ok(eval_expr(env, x)?.add(eval_expr(env, y)?)),
        Expr::Sub(x, y) => eval_expr(env, x)?
            .checked_sub(eval_expr(env, y)?)
            .ok_or(Error::Underflow),
        Expr::Mul(x, y) => Ok(eval_expr(env, x)?.mul(eval_expr(env, y)?)),
        Expr::Div(x, y) => {
            let (x, y) = (eval_expr(env, x)?, eval_expr(env, y)?);
            if !x.is_finite() {
                Err(Error::InfiniteOperand)
            } else if y.is_zero() {
                Err(Error::DivisionByZero)
            } else {
                Ok(x.checked_div(y).expect("division is defined"))
            }
        }
        Expr::Mod(x, y) => {
            let (x, y) = (eval_expr(env, x)?, eval_expr(env, y)?);
            if !x.is_finite() {
                Err(Error::InfiniteOperand)
            } else if y.is_zero() {
                Err(Error::DivisionByZero)
            } else {
                Ok(x.checked_mod(y).expect("remainder is defined"))
            }
        }
        Expr::Exp(x, y) => Ok(eval_expr(env, x)?.exp(eval_expr(env, y)?)),
        Expr::Min(x, y) => Ok(eval_expr(env, x)?.min(eval_expr(env, y)?)),
        Expr::Max(x, y) => Ok(eval_expr(env, x)?.max(eval_expr(env, y)?)),
        Expr::Lg2(x) => Ok(eval_expr(env, x)?.lg2()),
        Expr::Width(x) => Ok(eval_expr(env, x)?.width()),
        Expr::LenFromThen(x, y, w) => {
            let (x, y, w) = (eval_expr(env, x)?, eval_expr(env, y)?, eval_expr(env, w)?);
            if !(x.is_finite() && y.is_finite() && w.is_finite()) {
                Err(Error::InfiniteOperand)
            } else if x == y {
                Err(Error::EmptyStride)
            } else {
                Ok(x.len_from_then(y, w).expect("enumeration is defined"))
            }
        }
        Expr::LenFromThenTo(x, y, z) => {
            let (x, y, z) = (eval_expr(env, x)?, eval_expr(env, y)?, eval_expr(env, z)?);
            if !(x.is_finite() && y.is_finite() && z.is_finite()) {
                Err(Error::InfiniteOperand)
            } else if x == y {
                Err(Error::EmptyStride)
            } else {
                Ok(x.len_from_then_to(y, z).expect("enumeration is defined"))
            }
        }
    }
}

/// Evaluates a proposition. The connectives evaluate lazily left to right: a
/// decided left operand short-circuits, which matches the guarded reading of
/// the rewrite rules (`fin x && x :==: y` never looks at the strict
/// comparison unless `x` is finite). Strict comparisons error on an infinite
/// operand.
pub fn eval_prop(env: &Env, prop: &Prop) -> Result<bool, Error> {
    match prop {
        Prop::Fin(x) => Ok(eval_expr(env, x)?.is_finite()),
        Prop::Eq(x, y) => Ok(eval_expr(env, x)? == eval_expr(env, y)?),
        Prop::Geq(x, y) => Ok(eval_expr(env, x)? >= eval_expr(env, y)?),
        Prop::Gt(x, y) => Ok(eval_expr(env, x)? > eval_expr(env, y)?),
        Prop::EqNat(x, y) => {
            let (x, y) = (eval_expr(env, x)?, eval_expr(env, y)?);
            if x.is_finite() && y.is_finite() {
                Ok(x == y)
            } else {
                Err(Error::InfiniteOperand)
            }
        }
        Prop::GtNat(x, y) => {
            let (x, y) = (eval_expr(env, x)?, eval_expr(env, y)?);
            if x.is_finite() && y.is_finite() {
                Ok(x > y)
            } else {
                Err(Error::InfiniteOperand)
            }
        }
        Prop::And(p, q) => {
            if eval_prop(env, p)? {
                eval_prop(env, q)
            } else {
                Ok(false)
            }
        }
        Prop::Or(p, q) => {
            if eval_prop(env, p)? {
                Ok(true)
            } else {
                eval_prop(env, q)
            }
        }
        Prop::Not(p) => Ok(!eval_prop(env, p)?),
        Prop::True => Ok(true),
        Prop::False => Ok(false),
    }
}
