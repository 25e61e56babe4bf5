// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! The extended naturals ℕ∞: arbitrary-precision natural numbers together with a
//! single infinity element that is greater than every finite value. Sizes in the
//! type system (bit-vector widths, sequence lengths) are drawn from this domain,
//! so the arithmetic here fixes the semantics that the constraint solver reasons
//! about symbolically.

#![warn(clippy::mod_module_files, clippy::pedantic, clippy::unwrap_used)]


use num_bigint::BigUint;
use num_traits::{One, Pow, Zero};
use std::{
    cmp::Ordering,
    fmt::{self, Display, Formatter},
};

/// An extended natural number: either a finite natural or infinity.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum InfNat {
    /// A finite natural number.
    Nat(BigUint),
    /// The infinity element.
    Inf,
}

impl InfNat {
    #[must_use]
    pub fn zero() -> Self {
        Self::Nat(BigUint::zero())
    }

    #[must_use]
    pub fn one() -> Self {
        Self::Nat(BigUint::one())
    }

    #[must_use]
    pub fn is_finite(&self) -> bool {
        matches!(self, Self::Nat(_))
    }

    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, Self::Nat(n) if n.is_zero())
    }

    #[must_use]
    pub fn is_one(&self) -> bool {
        matches!(self, Self::Nat(n) if n.is_one())
    }

    #[must_use]
    pub fn add(self, other: Self) -> Self {
        match (self, other) {
            (Self::Nat(x), Self::Nat(y)) => Self::Nat(x + y),
            _ => Self::Inf,
        }
    }

    /// Multiplication, with `0 * ∞ = 0`.
    #[must_use]
    pub fn mul(self, other: Self) -> Self {
        match (self, other) {
            (Self::Nat(x), Self::Nat(y)) => Self::Nat(x * y),
            (x, y) => {
                if x.is_zero() || y.is_zero() {
                    Self::zero()
                } else {
                    Self::Inf
                }
            }
        }
    }

    /// Exponentiation. `x ^ 0 = 1` for every `x`, including infinity; an
    /// infinite exponent yields `0`, `1`, or `∞` depending on the base.
    #[must_use]
    pub fn exp(self, power: Self) -> Self {
        match (self, power) {
            (_, Self::Nat(p)) if p.is_zero() => Self::one(),
            (Self::Inf, _) => Self::Inf,
            (Self::Nat(b), Self::Inf) => {
                if b.is_zero() {
                    Self::zero()
                } else if b.is_one() {
                    Self::one()
                } else {
                    Self::Inf
                }
            }
            (Self::Nat(b), Self::Nat(p)) => {
                if b.is_zero() || b.is_one() {
                    Self::Nat(b)
                } else {
                    let p = u64::try_from(&p).expect("exponent fits in 64 bits");
                    Self::Nat(Pow::pow(b, p))
                }
            }
        }
    }

    /// Base-two logarithm, rounded up: the least `y` such that `2 ^ y >= x`.
    /// `lg2 0 = 0`.
    #[must_use]
    pub fn lg2(self) -> Self {
        match self {
            Self::Inf => Self::Inf,
            Self::Nat(n) => {
                if n <= BigUint::one() {
                    Self::zero()
                } else {
                    Self::Nat(BigUint::from((n - 1u32).bits()))
                }
            }
        }
    }

    /// The number of bits needed to represent a value: `width n = lg2 (n + 1)`.
    #[must_use]
    pub fn width(self) -> Self {
        match self {
            Self::Inf => Self::Inf,
            Self::Nat(n) => Self::Nat(BigUint::from(n.bits())),
        }
    }

    /// Subtraction. Defined only when the subtrahend is finite and does not
    /// exceed the minuend; `∞ - n = ∞`.
    #[must_use]
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        match (self, other) {
            (_, Self::Inf) => None,
            (Self::Inf, Self::Nat(_)) => Some(Self::Inf),
            (Self::Nat(x), Self::Nat(y)) => {
                if x >= y {
                    Some(Self::Nat(x - y))
                } else {
                    None
                }
            }
        }
    }

    /// Division. Defined only when the dividend is finite and the divisor is
    /// nonzero; `n / ∞ = 0`.
    #[must_use]
    pub fn checked_div(self, other: Self) -> Option<Self> {
        match (self, other) {
            (Self::Inf, _) => None,
            (Self::Nat(_), Self::Nat(y)) if y.is_zero() => None,
            (Self::Nat(x), Self::Nat(y)) => Some(Self::Nat(x / y)),
            (Self::Nat(_), Self::Inf) => Some(Self::zero()),
        }
    }

    /// Remainder. Defined only when the dividend is finite and the divisor is
    /// nonzero; `n % ∞ = n`.
    #[must_use]
    pub fn checked_mod(self, other: Self) -> Option<Self> {
        match (self, other) {
            (Self::Inf, _) => None,
            (Self::Nat(_), Self::Nat(y)) if y.is_zero() => None,
            (Self::Nat(x), Self::Nat(y)) => Some(Self::Nat(x % y)),
            (Self::Nat(x), Self::Inf) => Some(Self::Nat(x)),
        }
    }

    /// The length of the enumeration `[first, then ..]` over values of the
    /// given bit width. Defined only when all three arguments are finite and
    /// `first != then`. Descending and zero-width enumerations are empty.
    #[must_use]
    pub fn len_from_then(self, then: Self, w: Self) -> Option<Self> {
        let (Self::Nat(x), Self::Nat(y), Self::Nat(bits)) = (self, then, w) else {
            return None;
        };
        if x == y {
            return None;
        }
        if x > y || bits.is_zero() {
            return Some(Self::zero());
        }
        let bits = u64::try_from(&bits).expect("width fits in 64 bits");
        let last = (BigUint::one() << bits) - BigUint::one();
        if x > last {
            return Some(Self::zero());
        }
        Some(Self::Nat((last - &x) / (y - x) + BigUint::one()))
    }

    /// The length of the enumeration `[first, then .. last]`. Defined only when
    /// all three arguments are finite and `first != then`.
    #[must_use]
    pub fn len_from_then_to(self, then: Self, to: Self) -> Option<Self> {
        let (Self::Nat(x), Self::Nat(y), Self::Nat(z)) = (self, then, to) else {
            return None;
        };
        match x.cmp(&y) {
            Ordering::Equal => None,
            Ordering::Less => Some(if z < x {
                Self::zero()
            } else {
                Self::Nat((z - &x) / (y - x) + BigUint::one())
            }),
            Ordering::Greater => Some(if z > x {
                Self::zero()
            } else {
                Self::Nat((&x - z) / (x - y) + BigUint::one())
            }),
        }
    }
}

impl From<u64> for InfNat {
    fn from(value: u64) -> Self {
        Self::Nat(BigUint::from(value))
    }
}

impl From<BigUint> for InfNat {
    fn from(value: BigUint) -> Self {
        Self::Nat(value)
    }
}

impl Ord for InfNat {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Nat(x), Self::Nat(y)) => x.cmp(y),
            (Self::Nat(_), Self::Inf) => Ordering::Less,
            (Self::Inf, Self::Nat(_)) => Ordering::Greater,
            (Self::Inf, Self::Inf) => Ordering::Equal,
        }
    }
}

impl PartialOrd for InfNat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Display for InfNat {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Self::Nat(n) => Display::fmt(n, f),
            Self::Inf => f.write_str("inf"),
        }
    }
}
