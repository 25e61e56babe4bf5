// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The simplification driver. `simp_step` performs one leftmost-outermost
//! rewrite: the operator-specific rule is attempted at the current node first,
//! then the left subproposition, then the right. The strict comparisons are
//! fixed points by construction; they are what the external finite decision
//! procedure consumes.


use crate::{rules, term::Prop};

/// One simplification step, or `None` if the proposition is in normal form.
#[must_use]
pub fn simp_step(prop: &Prop) -> Option<Prop> {
    match prop {
        Prop::Fin(x) => rules::is_fin(x),
        Prop::Eq(x, y) => rules::is_eq(x, y),
        Prop::Gt(x, y) => Some(rules::is_gt(x, y)),
        Prop::Geq(..) | Prop::EqNat(..) | Prop::GtNat(..) | Prop::True | Prop::False => None,
        Prop::Not(p) => rules::not_step(p).or_else(|| Some(Prop::not(simp_step(p)?))),
        Prop::And(p, q) => rules::and_step(p, q)
            .or_else(|| Some(Prop::and(simp_step(p)?, (**q).clone())))
            .or_else(|| Some(Prop::and((**p).clone(), simp_step(q)?))),
        Prop::Or(p, q) => rules::or_step(p, q)
            .or_else(|| Some(Prop::or(simp_step(p)?, (**q).clone())))
            .or_else(|| Some(Prop::or((**p).clone(), simp_step(q)?))),
    }
}

/// The lazy sequence of intermediate forms under repeated `simp_step`,
/// starting with the form after the first step. The sequence is finite; it is
/// empty when the input is already in normal form.
#[must_use]
pub fn simp_steps(prop: &Prop) -> Steps {
    Steps {
        current: prop.clone(),
    }
}

/// Iterator over successive simplification steps. See [`simp_steps`].
pub struct Steps {
    current: Prop,
}

impl Iterator for Steps {
    type Item = Prop;

    fn next(&mut self) -> Option<Prop> {
        let next = simp_step(&self.current)?;
        self.current = next.clone();
        Some(next)
    }
}

/// The normal form of a proposition: `simp_step` applied until no rule fires.
///
/// Every rule is locally terminating, but no well-founded measure for the
/// whole system is claimed, so a step cap proportional to the square of the
/// input size backs the loop; exhausting it means a rule is looping and
/// panics with the offending proposition.
#[must_use]
pub fn simplify(prop: &Prop) -> Prop {
    let cap = step_cap(prop);
    let mut current = prop.clone();
    for _ in 0..cap {
        match simp_step(&current) {
            Some(next) => current = next,
            None => return current,
        }
    }
    panic!("simplification did not converge within {cap} steps: {current}");
}

fn step_cap(prop: &Prop) -> usize {
    let size = prop.size();
    256 * size * size + 1024
}
