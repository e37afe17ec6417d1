//! Finite field arithmetic: prime fields and extension towers.

mod cubic;
mod cyclotomic;
mod params;
mod prime;
mod quadratic;

pub use cubic::{Cubic, CubicExtParams};
pub use params::{validate_params, FieldParams};
pub use prime::Fp;
pub use quadratic::{Quadratic, QuadraticExtParams};

use std::fmt::Debug;
use std::ops::{Add, Mul, Neg, Sub};

use crate::error::AlgebraError;

/// Capability surface shared by every field layer in a tower.
///
/// Prime fields and extension layers all implement this, so curve groups and
/// tower layers can be generic over their coefficient field.
pub trait FieldElement:
    Copy
    + PartialEq
    + Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
{
    fn zero() -> Self;
    fn one() -> Self;
    fn is_zero(&self) -> bool;

    /// Field squaring (faster than `self * self` on every layer).
    fn squared(&self) -> Self;

    /// `2 * self`.
    fn doubled(&self) -> Self;

    /// Multiplicative inverse. Fails on the zero element.
    fn inversed(&self) -> Result<Self, AlgebraError>;

    /// The `power`-th Frobenius endomorphism `x -> x^(p^power)`. Identity on
    /// prime fields.
    fn frobenius_map(&self, power: usize) -> Self;

    /// Uniformly random element.
    fn random_element() -> Self;

    fn is_one(&self) -> bool {
        *self == Self::one()
    }

    /// Exponentiation by a 256-bit little-endian limb exponent, via
    /// square-and-multiply from the most significant set bit.
    fn pow(&self, exp: &[u64; 4]) -> Self {
        if exp.iter().all(|&limb| limb == 0) {
            return Self::one();
        }
        let mut msb = 0u32;
        for i in (0..4).rev() {
            if exp[i] != 0 {
                msb = (i as u32) * 64 + (63 - exp[i].leading_zeros());
                break;
            }
        }
        let mut accumulator = *self;
        for i in (0..msb).rev() {
            accumulator = accumulator.squared();
            if (exp[(i / 64) as usize] >> (i % 64)) & 1 == 1 {
                accumulator = accumulator * *self;
            }
        }
        accumulator
    }

    fn pow_u64(&self, exp: u64) -> Self {
        self.pow(&[exp, 0, 0, 0])
    }
}
