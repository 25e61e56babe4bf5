// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The symbolic simplifier for numeric-size constraints over the extended
//! naturals. The type checker collects propositions about size-indexed types
//! (bit-vector widths, sequence lengths) as symbolic arithmetic over ℕ∞; this
//! crate normalizes those propositions by local rewriting until a fixpoint,
//! lifting infinity out of finite arithmetic along the way. What remains is
//! either decided outright or reduced to strict comparisons between
//! infinity-free expressions, which a finite arithmetic procedure downstream
//! can consume.

#![warn(clippy::mod_module_files, clippy::pedantic, clippy::unwrap_used)]

#[cfg(test)]
mod tests;

pub mod defined;
pub mod display;
pub mod eval;
pub mod no_inf;
pub mod parse;
pub mod rules;
pub mod simplify;
pub mod span;
pub mod term;

pub use defined::defined;
pub use rules::{is_eq, is_gt};
pub use simplify::{simp_step, simp_steps, simplify};
