//! Cyclotomic subgroup operations on the degree-12 tower shape
//! (quadratic over cubic over quadratic).
//!
//! Valid only for elements of the norm-1 (cyclotomic) subgroup, where the
//! conjugate equals the inverse. Callers outside that subgroup get wrong
//! results, not undefined behavior.

use crypto_bigint::U256;

use crate::numeric::U256Ext;

use super::cubic::{Cubic, CubicExtParams};
use super::quadratic::{Quadratic, QuadraticExtParams};
use super::FieldElement;

/// `(a + b*u)^2` in the implicit quartic extension `F[u] / (u^2 - xi)`, where
/// `xi` is the cubic layer's non-residue. Returns `(a^2 + xi*b^2, 2ab)`.
#[inline]
fn fp4_square<Q: CubicExtParams>(
    a: Q::BaseField,
    b: Q::BaseField,
) -> (Q::BaseField, Q::BaseField) {
    let t0 = a.squared();
    let t1 = b.squared();
    let t3 = (a + b).squared() - t0 - t1;
    (Q::mul_by_non_residue(&t1) + t0, t3)
}

impl<P, Q> Quadratic<P>
where
    P: QuadraticExtParams<BaseField = Cubic<Q>>,
    Q: CubicExtParams,
{
    /// Conjugate over the top quadratic layer. Equals the inverse on the
    /// norm-1 subgroup.
    #[inline]
    pub fn unitary_inverse(&self) -> Self {
        Self::new(self.c0, -self.c1)
    }

    /// Granger-Scott squaring via three `fp4` squarings.
    ///
    /// Roughly 3x cheaper than generic squaring; agrees with `squared()` on
    /// the cyclotomic subgroup only.
    pub fn cyclotomic_squared(&self) -> Self {
        let z0 = self.c0.c0;
        let z4 = self.c0.c1;
        let z3 = self.c0.c2;
        let z2 = self.c1.c0;
        let z1 = self.c1.c1;
        let z5 = self.c1.c2;

        let (t0, t1) = fp4_square::<Q>(z0, z1);
        // z0' = 3*t0 - 2*z0, z1' = 3*t1 + 2*z1
        let z0 = (t0 - z0).doubled() + t0;
        let z1 = (t1 + z1).doubled() + t1;

        let (t2, t3) = fp4_square::<Q>(z2, z3);
        let (t4, t5) = fp4_square::<Q>(z4, z5);

        let z4 = (t2 - z4).doubled() + t2;
        let z5 = (t3 + z5).doubled() + t3;

        let t6 = Q::mul_by_non_residue(&t5);
        let z2 = (t6 + z2).doubled() + t6;
        let z3 = (t4 - z3).doubled() + t4;

        Self::new(Cubic::new(z0, z4, z3), Cubic::new(z2, z1, z5))
    }

    /// Exponentiation on the cyclotomic subgroup by a 256-bit exponent.
    ///
    /// Uses a width-4 signed NAF recoding; negative digits substitute the
    /// unitary inverse of the table entry, so no field inversions occur.
    pub fn cyclotomic_pow(&self, exp: &[u64; 4]) -> Self {
        let digits = wnaf_digits(exp, 4);

        // Odd powers self^1, self^3, ..., self^15.
        let sq = self.cyclotomic_squared();
        let mut table = [*self; 8];
        for i in 1..8 {
            table[i] = table[i - 1] * sq;
        }

        let mut acc = Self::one();
        for &digit in digits.iter().rev() {
            acc = acc.cyclotomic_squared();
            if digit > 0 {
                acc = acc * table[(digit as usize - 1) >> 1];
            } else if digit < 0 {
                acc = acc * table[((-digit) as usize - 1) >> 1].unitary_inverse();
            }
        }
        acc
    }
}

/// Signed windowed NAF recoding: produces digits in
/// `{0, +/-1, +/-3, ..., +/-(2^w - 1)}`, least significant first, such that
/// `sum(digit_i * 2^i) == exp`.
fn wnaf_digits(exp: &[u64; 4], w: u32) -> Vec<i64> {
    let mut e = U256::from_words(*exp);
    let mut digits = Vec::with_capacity(260);
    let window = 1i64 << w;

    while e != U256::ZERO {
        if e.get_bit(0) {
            let mut digit = e.slice(0, w + 1) as i64;
            if digit >= window {
                digit -= window << 1;
            }
            if digit >= 0 {
                e = e.wrapping_sub(&U256::from_u64(digit as u64));
            } else {
                e = e.wrapping_add(&U256::from_u64((-digit) as u64));
            }
            digits.push(digit);
        } else {
            digits.push(0);
        }
        e = e.wrapping_shr_vartime(1);
    }
    digits
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wnaf_digits_reconstruct() {
        for exp in [
            [0u64, 0, 0, 0],
            [1, 0, 0, 0],
            [0xdead_beef, 0, 0, 0],
            [u64::MAX, u64::MAX, 0, 0],
            [0x1234_5678_9abc_def0, 0xfeed_face, 1, 0],
        ] {
            let digits = wnaf_digits(&exp, 4);
            // Reconstruct as a 320-bit signed accumulation, checking the low
            // 256 bits match.
            let mut acc = U256::ZERO;
            for &d in digits.iter().rev() {
                acc = acc.wrapping_shl_vartime(1);
                if d >= 0 {
                    acc = acc.wrapping_add(&U256::from_u64(d as u64));
                } else {
                    acc = acc.wrapping_sub(&U256::from_u64((-d) as u64));
                }
            }
            assert_eq!(acc, U256::from_words(exp), "recoding failed for {exp:?}");
        }
    }

    #[test]
    fn wnaf_digits_are_odd_or_zero() {
        let digits = wnaf_digits(&[0xffff_ffff_ffff_ffff, 3, 0, 0], 4);
        for d in digits {
            assert!(d == 0 || d % 2 != 0);
            assert!(d.abs() < 16);
        }
    }
}
