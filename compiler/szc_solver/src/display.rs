// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Deterministic rendering of terms and propositions. The textual form is the
//! canonical surface for golden tests and diagnostics, and the parser accepts
//! exactly this syntax, so printing must be unambiguous under the precedence
//! below.
//!
//! Expression precedence, loosest first: `+` and `-` (left-associative), `*`,
//! `div`, `mod` (left-associative), `^^` (right-associative), then function
//! application (`lg2`, `min`, ...) whose arguments are atoms or parenthesized.
//! Proposition precedence: `||`, `&&` (right-associative), the comparisons
//! (non-associative), then `not` and `fin`.


use crate::{
    no_inf::IfExpr,
    term::{Expr, Name, Prop},
};
use std::fmt::{self, Display, Formatter};

/// The canonical name stream `a, b, ..., z, a1, b1, ..., z1, a2, ...`:
/// variable `i` renders as letter `i mod 26` with suffix `i / 26` when
/// nonzero.
#[must_use]
pub fn var_name(name: Name) -> String {
    let letter = char::from(b'a' + u8::try_from(name.id() % 26).expect("remainder fits in a byte"));
    match name.id() / 26 {
        0 => letter.to_string(),
        index => format!("{letter}{index}"),
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(&var_name(*self))
    }
}

// Expression precedence levels.
const E_ADD: u8 = 1;
const E_MUL: u8 = 2;
const E_EXP: u8 = 3;
const E_APP: u8 = 4;
const E_ATOM: u8 = 5;

// Proposition precedence levels.
const P_OR: u8 = 1;
const P_AND: u8 = 2;
const P_CMP: u8 = 3;
const P_PREFIX: u8 = 4;
const P_ATOM: u8 = 5;

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        expr_prec(self, 0, f)
    }
}

impl Display for Prop {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        prop_prec(self, 0, f)
    }
}

impl<A: Display> Display for IfExpr<A> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            IfExpr::If(p, t, e) => write!(f, "if {p} then {t} else {e}"),
            IfExpr::Return(a) => Display::fmt(a, f),
            IfExpr::Impossible => f.write_str("impossible"),
        }
    }
}

fn expr_prec(expr: &Expr, prec: u8, f: &mut Formatter) -> fmt::Result {
    match expr {
        Expr::K(k) => write!(f, "{k}"),
        Expr::Var(name) => write!(f, "{name}"),
        Expr::Add(x, y) => expr_infix(f, prec, E_ADD, "+", x, y, Assoc::Left),
        Expr::Sub(x, y) => expr_infix(f, prec, E_ADD, "-", x, y, Assoc::Left),
        Expr::Mul(x, y) => expr_infix(f, prec, E_MUL, "*", x, y, Assoc::Left),
        Expr::Div(x, y) => expr_infix(f, prec, E_MUL, "div", x, y, Assoc::Left),
        Expr::Mod(x, y) => expr_infix(f, prec, E_MUL, "mod", x, y, Assoc::Left),
        Expr::Exp(x, y) => expr_infix(f, prec, E_EXP, "^^", x, y, Assoc::Right),
        Expr::Lg2(x) => app(f, prec, "lg2", &[x.as_ref()]),
        Expr::Width(x) => app(f, prec, "width", &[x.as_ref()]),
        Expr::Min(x, y) => app(f, prec, "min", &[x.as_ref(), y.as_ref()]),
        Expr::Max(x, y) => app(f, prec, "max", &[x.as_ref(), y.as_ref()]),
        Expr::LenFromThen(x, y, w) => {
            app(f, prec, "lenFromThen", &[x.as_ref(), y.as_ref(), w.as_ref()])
        }
        Expr::LenFromThenTo(x, y, z) => {
            app(f, prec, "lenFromThenTo", &[x.as_ref(), y.as_ref(), z.as_ref()])
        }
    }
}

#[derive(Clone, Copy)]
enum Assoc {
    Left,
    Right,
}

fn expr_infix(
    f: &mut Formatter,
    prec: u8,
    level: u8,
    op: &str,
    lhs: &Expr,
    rhs: &Expr,
    assoc: Assoc,
) -> fmt::Result {
    let (lhs_prec, rhs_prec) = match assoc {
        Assoc::Left => (level, level + 1),
        Assoc::Right => (level + 1, level),
    };
    if prec > level {
        f.write_str("(")?;
    }
    expr_prec(lhs, lhs_prec, f)?;
    write!(f, " {op} ")?;
    expr_prec(rhs, rhs_prec, f)?;
    if prec > level {
        f.write_str(")")?;
    }
    Ok(())
}

fn app(f: &mut Formatter, prec: u8, name: &str, args: &[&Expr]) -> fmt::Result {
    if prec > E_APP {
        f.write_str("(")?;
    }
    f.write_str(name)?;
    for arg in args {
        f.write_str(" ")?;
        expr_prec(arg, E_ATOM, f)?;
    }
    if prec > E_APP {
        f.write_str(")")?;
    }
    Ok(())
}

fn prop_prec(prop: &Prop, prec: u8, f: &mut Formatter) -> fmt::Result {
    match prop {
        Prop::True => f.write_str("True"),
        Prop::False => f.write_str("False"),
        Prop::Fin(x) => {
            if prec > P_PREFIX {
                f.write_str("(")?;
            }
            f.write_str("fin ")?;
            expr_prec(x, E_ATOM, f)?;
            if prec > P_PREFIX {
                f.write_str(")")?;
            }
            Ok(())
        }
        Prop::Not(p) => {
            if prec > P_PREFIX {
                f.write_str("(")?;
            }
            f.write_str("not ")?;
            prop_prec(p, P_ATOM, f)?;
            if prec > P_PREFIX {
                f.write_str(")")?;
            }
            Ok(())
        }
        Prop::Eq(x, y) => cmp(f, prec, "==", x, y),
        Prop::Geq(x, y) => cmp(f, prec, ">=", x, y),
        Prop::Gt(x, y) => cmp(f, prec, ">", x, y),
        Prop::EqNat(x, y) => cmp(f, prec, ":==:", x, y),
        Prop::GtNat(x, y) => cmp(f, prec, ":>:", x, y),
        Prop::And(p, q) => prop_infix(f, prec, P_AND, "&&", p, q),
        Prop::Or(p, q) => prop_infix(f, prec, P_OR, "||", p, q),
    }
}

fn cmp(f: &mut Formatter, prec: u8, op: &str, lhs: &Expr, rhs: &Expr) -> fmt::Result {
    if prec > P_CMP {
        f.write_str("(")?;
    }
    expr_prec(lhs, 0, f)?;
    write!(f, " {op} ")?;
    expr_prec(rhs, 0, f)?;
    if prec > P_CMP {
        f.write_str(")")?;
    }
    Ok(())
}

// Connectives are right-associated, so chains print flat.
fn prop_infix(
    f: &mut Formatter,
    prec: u8,
    level: u8,
    op: &str,
    lhs: &Prop,
    rhs: &Prop,
) -> fmt::Result {
    if prec > level {
        f.write_str("(")?;
    }
    prop_prec(lhs, level + 1, f)?;
    write!(f, " {op} ")?;
    prop_prec(rhs, level, f)?;
    if prec > level {
        f.write_str(")")?;
    }
    Ok(())
}
