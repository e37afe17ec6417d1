use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use rand::Rng;

use crate::error::AlgebraError;

use super::params::FieldParams;
use super::FieldElement;

// ---------------------------------------------------------------------------
// Limb helpers
// ---------------------------------------------------------------------------

/// 64x64 -> 128-bit wide multiply, returns (lo, hi).
#[inline(always)]
const fn mul_wide(a: u64, b: u64) -> (u64, u64) {
    let res = a as u128 * b as u128;
    (res as u64, (res >> 64) as u64)
}

/// Multiply-accumulate: a + b*c + carry_in -> (result, carry_out).
#[inline(always)]
const fn mac(a: u64, b: u64, c: u64, carry_in: u64) -> (u64, u64) {
    let res = a as u128 + (b as u128 * c as u128) + carry_in as u128;
    (res as u64, (res >> 64) as u64)
}

/// Multiply-accumulate without carry_in.
#[inline(always)]
const fn mac_mini(a: u64, b: u64, c: u64) -> (u64, u64) {
    let res = a as u128 + (b as u128 * c as u128);
    (res as u64, (res >> 64) as u64)
}

/// Multiply-accumulate keeping only the high word of a + b*c.
#[inline(always)]
const fn mac_discard_lo(a: u64, b: u64, c: u64) -> u64 {
    let res = a as u128 + (b as u128 * c as u128);
    (res >> 64) as u64
}

/// Add with carry: a + b + carry_in -> (result, carry_out).
#[inline(always)]
const fn addc(a: u64, b: u64, carry_in: u64) -> (u64, u64) {
    let res = a as u128 + b as u128 + carry_in as u128;
    (res as u64, (res >> 64) as u64)
}

/// Subtract with borrow: a - b - (borrow_in >> 63) -> (result, borrow_out).
/// borrow_out is all-ones on underflow, zero otherwise.
#[inline(always)]
const fn sbb(a: u64, b: u64, borrow_in: u64) -> (u64, u64) {
    let res = (a as u128).wrapping_sub(b as u128 + (borrow_in >> 63) as u128);
    (res as u64, (res >> 64) as u64)
}

/// Square-accumulate: out = a + 2*b*c + carry_in_lo, carries propagated
/// through carry_in_hi.
#[inline(always)]
const fn square_accumulate(
    a: u64,
    b: u64,
    c: u64,
    carry_in_lo: u64,
    carry_in_hi: u64,
) -> (u64, u64, u64) {
    let product = b as u128 * c as u128;
    let r0 = product as u64;
    let r1 = (product >> 64) as u64;

    let mut out = r0.wrapping_add(r0);
    let mut carry_lo: u64 = if out < r0 { 1 } else { 0 };
    out = out.wrapping_add(a);
    carry_lo += if out < a { 1 } else { 0 };
    out = out.wrapping_add(carry_in_lo);
    carry_lo += if out < carry_in_lo { 1 } else { 0 };
    carry_lo = carry_lo.wrapping_add(r1);
    let mut carry_hi: u64 = if carry_lo < r1 { 1 } else { 0 };
    carry_lo = carry_lo.wrapping_add(r1);
    carry_hi += if carry_lo < r1 { 1 } else { 0 };
    carry_lo = carry_lo.wrapping_add(carry_in_hi);
    carry_hi += if carry_lo < carry_in_hi { 1 } else { 0 };
    (out, carry_lo, carry_hi)
}

// ---------------------------------------------------------------------------
// Fp<P>
// ---------------------------------------------------------------------------

/// A prime field element in Montgomery form, generic over parameters `P`.
///
/// Stores 4 x u64 little-endian limbs. For small moduli (< 2^254), values are
/// kept coarsely in `[0, 2p)`; full reduction to `[0, p)` happens on
/// `reduce()`, `from_montgomery_form()`, and comparisons, so the canonical
/// representative is what external callers observe.
#[repr(C, align(32))]
pub struct Fp<P: FieldParams> {
    pub data: [u64; 4],
    _phantom: PhantomData<P>,
}

// Manual Clone/Copy: PhantomData<P> must not force P: Copy.
impl<P: FieldParams> Clone for Fp<P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: FieldParams> Copy for Fp<P> {}

impl<P: FieldParams> std::fmt::Debug for Fp<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let r = self.reduce();
        write!(
            f,
            "Fp(0x{:016x}{:016x}{:016x}{:016x})",
            r.data[3], r.data[2], r.data[1], r.data[0]
        )
    }
}

// Constants derived from FieldParams at compile time.
impl<P: FieldParams> Fp<P> {
    const MODULUS: [u64; 4] = P::MODULUS;

    /// 2^256 - p (two's complement of the modulus), for branchless reduction.
    const NOT_MODULUS: [u64; 4] = Self::twos_complement(P::MODULUS);

    /// 2p. Valid because every small-path modulus is below 2^254.
    const TWICE_MODULUS: [u64; 4] = {
        let m = P::MODULUS;
        let (r0, c) = (m[0] << 1, m[0] >> 63);
        let (r1, c) = ((m[1] << 1) | c, m[1] >> 63);
        let (r2, c) = ((m[2] << 1) | c, m[2] >> 63);
        let r3 = (m[3] << 1) | c;
        [r0, r1, r2, r3]
    };

    /// 2^256 - 2p.
    const TWICE_NOT_MODULUS: [u64; 4] = Self::twos_complement(Self::TWICE_MODULUS);

    /// p - 2, the Fermat inversion exponent.
    const MODULUS_MINUS_TWO: [u64; 4] = {
        let m = P::MODULUS;
        [m[0].wrapping_sub(2), m[1], m[2], m[3]]
    };

    const fn twos_complement(v: [u64; 4]) -> [u64; 4] {
        let r0 = (!v[0]).wrapping_add(1);
        let c0 = (r0 < 1) as u64;
        let r1 = (!v[1]).wrapping_add(c0);
        let c1 = (r1 < c0) as u64;
        let r2 = (!v[2]).wrapping_add(c1);
        let c2 = (r2 < c1) as u64;
        let r3 = (!v[3]).wrapping_add(c2);
        [r0, r1, r2, r3]
    }
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

impl<P: FieldParams> Fp<P> {
    /// Additive identity. Zero is its own Montgomery form.
    #[inline]
    pub const fn zero() -> Self {
        Self::from_raw([0, 0, 0, 0])
    }

    /// Multiplicative identity in Montgomery form.
    #[inline]
    pub fn one() -> Self {
        Self::from(1u64)
    }

    /// Construct from a u64, converting into Montgomery form.
    #[inline]
    pub fn from(val: u64) -> Self {
        Self::from_limbs([val, 0, 0, 0])
    }

    /// Construct from raw limbs already in Montgomery form.
    #[inline]
    pub const fn from_raw(data: [u64; 4]) -> Self {
        Self {
            data,
            _phantom: PhantomData,
        }
    }

    /// Construct from standard-representation limbs, converting into
    /// Montgomery form.
    #[inline]
    pub fn from_limbs(data: [u64; 4]) -> Self {
        Self::from_raw(data).to_montgomery_form()
    }
}

// ---------------------------------------------------------------------------
// Core arithmetic
// ---------------------------------------------------------------------------

impl<P: FieldParams> Fp<P> {
    /// Full reduction from `[0, 2p)` to `[0, p)`.
    #[inline]
    pub fn reduce(&self) -> Self {
        if P::MODULUS_IS_BIG {
            if self.ge_modulus() {
                let mut borrow = 0u64;
                let (r0, b) = sbb(self.data[0], Self::MODULUS[0], borrow);
                borrow = b;
                let (r1, b) = sbb(self.data[1], Self::MODULUS[1], borrow);
                borrow = b;
                let (r2, b) = sbb(self.data[2], Self::MODULUS[2], borrow);
                borrow = b;
                let (r3, _) = sbb(self.data[3], Self::MODULUS[3], borrow);
                return Self::from_raw([r0, r1, r2, r3]);
            }
            *self
        } else {
            // Branchless: add 2^256 - p, keep the sum iff it carried out.
            let t0 = self.data[0].wrapping_add(Self::NOT_MODULUS[0]);
            let c = if t0 < self.data[0] { 1u64 } else { 0 };
            let (t1, c) = addc(self.data[1], Self::NOT_MODULUS[1], c);
            let (t2, c) = addc(self.data[2], Self::NOT_MODULUS[2], c);
            let (t3, c) = addc(self.data[3], Self::NOT_MODULUS[3], c);
            let mask = 0u64.wrapping_sub(c);
            let inv_mask = !mask;
            Self::from_raw([
                (self.data[0] & inv_mask) | (t0 & mask),
                (self.data[1] & inv_mask) | (t1 & mask),
                (self.data[2] & inv_mask) | (t2 & mask),
                (self.data[3] & inv_mask) | (t3 & mask),
            ])
        }
    }

    #[inline]
    fn ge_modulus(&self) -> bool {
        for i in (1..4).rev() {
            if self.data[i] > Self::MODULUS[i] {
                return true;
            }
            if self.data[i] < Self::MODULUS[i] {
                return false;
            }
        }
        self.data[0] >= Self::MODULUS[0]
    }

    /// Modular addition. Small path keeps the result coarse in `[0, 2p)`.
    #[inline]
    pub fn add_mod(&self, other: &Self) -> Self {
        if P::MODULUS_IS_BIG {
            let r0 = self.data[0].wrapping_add(other.data[0]);
            let c = if r0 < self.data[0] { 1u64 } else { 0 };
            let (r1, c) = addc(self.data[1], other.data[1], c);
            let (r2, c) = addc(self.data[2], other.data[2], c);
            let (r3, c) = addc(self.data[3], other.data[3], c);

            if c != 0 {
                let mut borrow = 0u64;
                let (mut r0, b) = sbb(r0, Self::MODULUS[0], borrow);
                borrow = b;
                let (mut r1, b) = sbb(r1, Self::MODULUS[1], borrow);
                borrow = b;
                let (mut r2, b) = sbb(r2, Self::MODULUS[2], borrow);
                borrow = b;
                let (mut r3, b) = sbb(r3, Self::MODULUS[3], borrow);

                // Still >= p after one subtraction: subtract again.
                if b == 0 {
                    borrow = 0;
                    let (s0, b2) = sbb(r0, Self::MODULUS[0], borrow);
                    borrow = b2;
                    let (s1, b2) = sbb(r1, Self::MODULUS[1], borrow);
                    borrow = b2;
                    let (s2, b2) = sbb(r2, Self::MODULUS[2], borrow);
                    borrow = b2;
                    let (s3, _) = sbb(r3, Self::MODULUS[3], borrow);
                    r0 = s0;
                    r1 = s1;
                    r2 = s2;
                    r3 = s3;
                }
                return Self::from_raw([r0, r1, r2, r3]);
            }
            Self::from_raw([r0, r1, r2, r3])
        } else {
            let r0 = self.data[0].wrapping_add(other.data[0]);
            let c = if r0 < self.data[0] { 1u64 } else { 0 };
            let (r1, c) = addc(self.data[1], other.data[1], c);
            let (r2, c) = addc(self.data[2], other.data[2], c);
            let r3 = self.data[3].wrapping_add(other.data[3]).wrapping_add(c);

            // Branchless conditional subtraction of 2p.
            let t0 = r0.wrapping_add(Self::TWICE_NOT_MODULUS[0]);
            let c2 = if t0 < Self::TWICE_NOT_MODULUS[0] { 1u64 } else { 0 };
            let (t1, c2) = addc(r1, Self::TWICE_NOT_MODULUS[1], c2);
            let (t2, c2) = addc(r2, Self::TWICE_NOT_MODULUS[2], c2);
            let (t3, c2) = addc(r3, Self::TWICE_NOT_MODULUS[3], c2);
            let mask = 0u64.wrapping_sub(c2);
            let inv_mask = !mask;
            Self::from_raw([
                (r0 & inv_mask) | (t0 & mask),
                (r1 & inv_mask) | (t1 & mask),
                (r2 & inv_mask) | (t2 & mask),
                (r3 & inv_mask) | (t3 & mask),
            ])
        }
    }

    /// Modular subtraction with full correction into `[0, p)` range behavior
    /// for the big-modulus path.
    #[inline]
    fn sub_mod(&self, other: &Self) -> Self {
        let mut borrow = 0u64;
        let (mut r0, b) = sbb(self.data[0], other.data[0], borrow);
        borrow = b;
        let (mut r1, b) = sbb(self.data[1], other.data[1], borrow);
        borrow = b;
        let (mut r2, b) = sbb(self.data[2], other.data[2], borrow);
        borrow = b;
        let (mut r3, b) = sbb(self.data[3], other.data[3], borrow);
        borrow = b;

        r0 = r0.wrapping_add(Self::MODULUS[0] & borrow);
        let mut carry = if r0 < (Self::MODULUS[0] & borrow) { 1u64 } else { 0 };
        let (v1, c) = addc(r1, Self::MODULUS[1] & borrow, carry);
        r1 = v1;
        carry = c;
        let (v2, c) = addc(r2, Self::MODULUS[2] & borrow, carry);
        r2 = v2;
        carry = c;
        let r3_wide = r3 as u128 + (Self::MODULUS[3] & borrow) as u128 + carry as u128;
        r3 = r3_wide as u64;
        let carry_out = (r3_wide >> 64) as u64;

        // First correction did not overflow back into range: add p again.
        if carry_out == 0 && borrow != 0 {
            let old_r0 = r0;
            r0 = r0.wrapping_add(Self::MODULUS[0] & borrow);
            carry = if r0 < old_r0 { 1 } else { 0 };
            let (v1, c) = addc(r1, Self::MODULUS[1] & borrow, carry);
            r1 = v1;
            carry = c;
            let (v2, c) = addc(r2, Self::MODULUS[2] & borrow, carry);
            r2 = v2;
            carry = c;
            r3 = r3.wrapping_add((Self::MODULUS[3] & borrow).wrapping_add(carry));
        }

        Self::from_raw([r0, r1, r2, r3])
    }

    /// Coarse subtraction: on underflow adds 2p, staying in `[0, 2p)`.
    #[inline]
    pub fn sub_coarse(&self, other: &Self) -> Self {
        if P::MODULUS_IS_BIG {
            return self.sub_mod(other);
        }
        let mut borrow = 0u64;
        let (r0, b) = sbb(self.data[0], other.data[0], borrow);
        borrow = b;
        let (r1, b) = sbb(self.data[1], other.data[1], borrow);
        borrow = b;
        let (r2, b) = sbb(self.data[2], other.data[2], borrow);
        borrow = b;
        let (r3, b) = sbb(self.data[3], other.data[3], borrow);
        borrow = b;

        let out0 = r0.wrapping_add(Self::TWICE_MODULUS[0] & borrow);
        let carry = if out0 < (Self::TWICE_MODULUS[0] & borrow) { 1u64 } else { 0 };
        let (out1, carry) = addc(r1, Self::TWICE_MODULUS[1] & borrow, carry);
        let (out2, carry) = addc(r2, Self::TWICE_MODULUS[2] & borrow, carry);
        let out3 = r3
            .wrapping_add(Self::TWICE_MODULUS[3] & borrow)
            .wrapping_add(carry);

        Self::from_raw([out0, out1, out2, out3])
    }

    /// CIOS Montgomery multiplication for moduli >= 2^254.
    #[inline]
    fn montgomery_mul_big(&self, other: &Self) -> Self {
        let modulus = Self::MODULUS;
        let r_inv = P::R_INV;

        let mut c: u64;
        let mut t0: u64 = 0;
        let mut t1: u64 = 0;
        let mut t2: u64 = 0;
        let mut t3: u64 = 0;
        let mut t4: u64 = 0;
        let mut t5: u64;

        for &element in &self.data {
            c = 0;
            let (v, co) = mac(t0, element, other.data[0], c);
            t0 = v;
            c = co;
            let (v, co) = mac(t1, element, other.data[1], c);
            t1 = v;
            c = co;
            let (v, co) = mac(t2, element, other.data[2], c);
            t2 = v;
            c = co;
            let (v, co) = mac(t3, element, other.data[3], c);
            t3 = v;
            c = co;
            let (v, ts) = addc(t4, c, 0);
            t4 = v;
            t5 = ts;

            let k = t0.wrapping_mul(r_inv);
            c = mac_discard_lo(t0, k, modulus[0]);
            let (v, co) = mac(t1, k, modulus[1], c);
            t0 = v;
            c = co;
            let (v, co) = mac(t2, k, modulus[2], c);
            t1 = v;
            c = co;
            let (v, co) = mac(t3, k, modulus[3], c);
            t2 = v;
            c = co;
            let (v, co2) = addc(c, t4, 0);
            t3 = v;
            t4 = t5 + co2;
        }

        // Conditional final subtraction.
        let mut borrow = 0u64;
        let (r0, b) = sbb(t0, modulus[0], borrow);
        borrow = b;
        let (r1, b) = sbb(t1, modulus[1], borrow);
        borrow = b;
        let (r2, b) = sbb(t2, modulus[2], borrow);
        borrow = b;
        let (r3, b) = sbb(t3, modulus[3], borrow);
        borrow = b;

        let borrow = borrow ^ (0u64.wrapping_sub(t4));

        let out0 = r0.wrapping_add(modulus[0] & borrow);
        let carry = if out0 < (modulus[0] & borrow) { 1u64 } else { 0 };
        let (out1, carry) = addc(r1, modulus[1] & borrow, carry);
        let (out2, carry) = addc(r2, modulus[2] & borrow, carry);
        let out3 = r3.wrapping_add(modulus[3] & borrow).wrapping_add(carry);

        Self::from_raw([out0, out1, out2, out3])
    }

    /// Unrolled 4-round interleaved Montgomery multiply for moduli < 2^254.
    #[inline]
    fn montgomery_mul_small(&self, other: &Self) -> Self {
        let modulus = Self::MODULUS;
        let r_inv = P::R_INV;

        // Round 0
        let (t0, c) = mul_wide(self.data[0], other.data[0]);
        let k = t0.wrapping_mul(r_inv);
        let a = mac_discard_lo(t0, k, modulus[0]);

        let (t1, a2) = mac_mini(a, self.data[0], other.data[1]);
        let (t0, c) = mac(t1, k, modulus[1], c);
        let (t2, a2b) = mac_mini(a2, self.data[0], other.data[2]);
        let (t1, c) = mac(t2, k, modulus[2], c);
        let (t3, a3) = mac_mini(a2b, self.data[0], other.data[3]);
        let (t2, c) = mac(t3, k, modulus[3], c);
        let t3 = c.wrapping_add(a3);

        // Round 1
        let (t0_new, a) = mac_mini(t0, self.data[1], other.data[0]);
        let k = t0_new.wrapping_mul(r_inv);
        let c = mac_discard_lo(t0_new, k, modulus[0]);
        let (t1_tmp, a2) = mac(t1, self.data[1], other.data[1], a);
        let (t0, c) = mac(t1_tmp, k, modulus[1], c);
        let (t2_tmp, a2b) = mac(t2, self.data[1], other.data[2], a2);
        let (t1, c) = mac(t2_tmp, k, modulus[2], c);
        let (t3_tmp, a3) = mac(t3, self.data[1], other.data[3], a2b);
        let (t2, c) = mac(t3_tmp, k, modulus[3], c);
        let t3 = c.wrapping_add(a3);

        // Round 2
        let (t0_new, a) = mac_mini(t0, self.data[2], other.data[0]);
        let k = t0_new.wrapping_mul(r_inv);
        let c = mac_discard_lo(t0_new, k, modulus[0]);
        let (t1_tmp, a2) = mac(t1, self.data[2], other.data[1], a);
        let (t0, c) = mac(t1_tmp, k, modulus[1], c);
        let (t2_tmp, a2b) = mac(t2, self.data[2], other.data[2], a2);
        let (t1, c) = mac(t2_tmp, k, modulus[2], c);
        let (t3_tmp, a3) = mac(t3, self.data[2], other.data[3], a2b);
        let (t2, c) = mac(t3_tmp, k, modulus[3], c);
        let t3 = c.wrapping_add(a3);

        // Round 3
        let (t0_new, a) = mac_mini(t0, self.data[3], other.data[0]);
        let k = t0_new.wrapping_mul(r_inv);
        let c = mac_discard_lo(t0_new, k, modulus[0]);
        let (t1_tmp, a2) = mac(t1, self.data[3], other.data[1], a);
        let (t0, c) = mac(t1_tmp, k, modulus[1], c);
        let (t2_tmp, a2b) = mac(t2, self.data[3], other.data[2], a2);
        let (t1, c) = mac(t2_tmp, k, modulus[2], c);
        let (t3_tmp, a3) = mac(t3, self.data[3], other.data[3], a2b);
        let (t2, c) = mac(t3_tmp, k, modulus[3], c);
        let t3 = c.wrapping_add(a3);

        Self::from_raw([t0, t1, t2, t3])
    }

    #[inline]
    pub fn montgomery_mul(&self, other: &Self) -> Self {
        if P::MODULUS_IS_BIG {
            self.montgomery_mul_big(other)
        } else {
            self.montgomery_mul_small(other)
        }
    }

    /// Montgomery squaring, specialized for the small-modulus path.
    #[inline]
    pub fn montgomery_square(&self) -> Self {
        if P::MODULUS_IS_BIG {
            return self.montgomery_mul_big(self);
        }

        let modulus = Self::MODULUS;
        let r_inv = P::R_INV;

        // Round 0
        let (t0, carry_lo) = mul_wide(self.data[0], self.data[0]);
        let carry_hi = 0u64;
        let (t1, carry_lo, carry_hi) =
            square_accumulate(0, self.data[1], self.data[0], carry_lo, carry_hi);
        let (t2, carry_lo, carry_hi) =
            square_accumulate(0, self.data[2], self.data[0], carry_lo, carry_hi);
        let (t3, carry_lo, _carry_hi) =
            square_accumulate(0, self.data[3], self.data[0], carry_lo, carry_hi);

        let round_carry = carry_lo;
        let k = t0.wrapping_mul(r_inv);
        let c = mac_discard_lo(t0, k, modulus[0]);
        let (t0, c) = mac(t1, k, modulus[1], c);
        let (t1, c) = mac(t2, k, modulus[2], c);
        let (t2, c) = mac(t3, k, modulus[3], c);
        let t3 = c.wrapping_add(round_carry);

        // Round 1
        let (t1_new, carry_lo) = mac_mini(t1, self.data[1], self.data[1]);
        let carry_hi = 0u64;
        let (t2_new, carry_lo, carry_hi) =
            square_accumulate(t2, self.data[2], self.data[1], carry_lo, carry_hi);
        let (t3_new, carry_lo, _carry_hi) =
            square_accumulate(t3, self.data[3], self.data[1], carry_lo, carry_hi);
        let round_carry = carry_lo;
        let k = t0.wrapping_mul(r_inv);
        let c = mac_discard_lo(t0, k, modulus[0]);
        let (t0, c) = mac(t1_new, k, modulus[1], c);
        let (t1, c) = mac(t2_new, k, modulus[2], c);
        let (t2, c) = mac(t3_new, k, modulus[3], c);
        let t3 = c.wrapping_add(round_carry);

        // Round 2
        let (t2_new, carry_lo) = mac_mini(t2, self.data[2], self.data[2]);
        let carry_hi = 0u64;
        let (t3_new, carry_lo, _carry_hi) =
            square_accumulate(t3, self.data[3], self.data[2], carry_lo, carry_hi);
        let round_carry = carry_lo;
        let k = t0.wrapping_mul(r_inv);
        let c = mac_discard_lo(t0, k, modulus[0]);
        let (t0, c) = mac(t1, k, modulus[1], c);
        let (t1, c) = mac(t2_new, k, modulus[2], c);
        let (t2, c) = mac(t3_new, k, modulus[3], c);
        let t3 = c.wrapping_add(round_carry);

        // Round 3
        let (t3_new, carry_lo) = mac_mini(t3, self.data[3], self.data[3]);
        let k = t0.wrapping_mul(r_inv);
        let round_carry = carry_lo;
        let c = mac_discard_lo(t0, k, modulus[0]);
        let (t0, c) = mac(t1, k, modulus[1], c);
        let (t1, c) = mac(t2, k, modulus[2], c);
        let (t2, c) = mac(t3_new, k, modulus[3], c);
        let t3 = c.wrapping_add(round_carry);

        Self::from_raw([t0, t1, t2, t3])
    }

    /// Enter Montgomery form: self * R^2 * R^-1 = self * R mod p.
    #[inline]
    pub fn to_montgomery_form(&self) -> Self {
        let r_squared = Self::from_raw(P::R_SQUARED);
        let mut tmp = self.reduce();
        tmp = tmp.reduce();
        tmp = tmp.reduce();
        tmp.montgomery_mul(&r_squared).reduce()
    }

    /// Leave Montgomery form: self * R^-1 mod p, fully reduced.
    #[inline]
    pub fn from_montgomery_form(&self) -> Self {
        let one_raw = Self::from_raw([1, 0, 0, 0]);
        self.montgomery_mul(&one_raw).reduce()
    }

    /// -self mod p.
    #[inline]
    pub fn negate(&self) -> Self {
        if P::MODULUS_IS_BIG {
            Self::from_raw(Self::MODULUS).sub_mod(self)
        } else {
            Self::from_raw(Self::TWICE_MODULUS).sub_coarse(self).reduce()
        }
    }

    /// True for the zero element (limb representation 0 or p).
    #[inline]
    pub fn is_zero_element(&self) -> bool {
        ((self.data[0] | self.data[1] | self.data[2] | self.data[3]) == 0)
            || (self.data[0] == P::MODULUS[0]
                && self.data[1] == P::MODULUS[1]
                && self.data[2] == P::MODULUS[2]
                && self.data[3] == P::MODULUS[3])
    }

    /// Multiplicative inverse via Fermat: self^(p-2).
    pub fn inversed(&self) -> Result<Self, AlgebraError> {
        if self.is_zero_element() {
            return Err(AlgebraError::ZeroInversion);
        }
        Ok(self.pow(&Self::MODULUS_MINUS_TWO))
    }

    /// Euler's criterion: self^((p-1)/2) is 1 for residues, p-1 otherwise.
    pub fn is_square(&self) -> bool {
        if self.is_zero_element() {
            return true;
        }
        let m = P::MODULUS;
        let exp = shr_limbs(&[m[0].wrapping_sub(1), m[1], m[2], m[3]], 1);
        self.pow(&exp) == Self::one()
    }

    /// Principal square root.
    ///
    /// Uses the `(p+1)/4` exponentiation when p = 3 (mod 4), and
    /// Tonelli-Shanks otherwise with every loop bounded by `P::TWO_ADICITY`.
    pub fn sqrt(&self) -> Result<Self, AlgebraError> {
        if self.is_zero_element() {
            return Ok(Self::zero());
        }
        if P::MODULUS[0] & 0x3 == 0x3 {
            let exp = {
                let m = P::MODULUS;
                let (a0, c) = addc(m[0], 1, 0);
                let (a1, c) = addc(m[1], 0, c);
                let (a2, c) = addc(m[2], 0, c);
                let a3 = m[3].wrapping_add(c);
                shr_limbs(&[a0, a1, a2, a3], 2)
            };
            let root = self.pow(&exp);
            if root.montgomery_square() == *self {
                Ok(root)
            } else {
                Err(AlgebraError::NotASquare)
            }
        } else {
            self.tonelli_shanks_sqrt()
        }
    }

    /// Tonelli-Shanks square root for p = 1 (mod 4).
    ///
    /// Writes p - 1 = q * 2^s with s = `P::TWO_ADICITY`; the order of every
    /// intermediate subgroup element divides 2^s, so each inner scan is
    /// bounded by s and non-residues are detected rather than looped on.
    fn tonelli_shanks_sqrt(&self) -> Result<Self, AlgebraError> {
        let s = P::TWO_ADICITY;
        let m = P::MODULUS;
        let q = shr_limbs(&[m[0].wrapping_sub(1), m[1], m[2], m[3]], s);

        // Smallest quadratic non-residue. Half of all elements qualify, so
        // the scan is short for any real modulus; the cap turns a corrupted
        // parameter set into an error instead of a spin.
        let p_minus_1_over_2 = shr_limbs(&[m[0].wrapping_sub(1), m[1], m[2], m[3]], 1);
        let neg_one = Self::one().negate();
        let mut z = Self::zero();
        let mut found = false;
        for candidate in 2u64..256 {
            let trial = Self::from(candidate);
            if trial.pow(&p_minus_1_over_2) == neg_one {
                z = trial;
                found = true;
                break;
            }
        }
        if !found {
            return Err(AlgebraError::InvalidParameters(
                "no quadratic non-residue below 256",
            ));
        }

        let mut m_val = s;
        let mut c = z.pow(&q);
        let mut t = self.pow(&q);
        let q_plus_1_over_2 = {
            let (a0, cy) = addc(q[0], 1, 0);
            let (a1, cy) = addc(q[1], 0, cy);
            let (a2, cy) = addc(q[2], 0, cy);
            let a3 = q[3].wrapping_add(cy);
            shr_limbs(&[a0, a1, a2, a3], 1)
        };
        let mut r = self.pow(&q_plus_1_over_2);

        // m_val strictly decreases each round, so at most TWO_ADICITY rounds.
        loop {
            if t == Self::one() {
                return Ok(r);
            }
            let mut i = 1u32;
            let mut tmp = t.montgomery_square();
            while tmp != Self::one() {
                tmp = tmp.montgomery_square();
                i += 1;
                if i >= m_val {
                    return Err(AlgebraError::NotASquare);
                }
            }
            let mut b = c;
            for _ in 0..(m_val - i - 1) {
                b = b.montgomery_square();
            }
            m_val = i;
            c = b.montgomery_square();
            t = t.montgomery_mul(&c);
            r = r.montgomery_mul(&b);
        }
    }
}

/// Right-shift a 4-limb little-endian value.
fn shr_limbs(val: &[u64; 4], shift: u32) -> [u64; 4] {
    if shift == 0 {
        return *val;
    }
    if shift >= 256 {
        return [0; 4];
    }
    let limb_shift = (shift / 64) as usize;
    let bit_shift = shift % 64;
    let mut result = [0u64; 4];
    for i in 0..4 {
        let src = i + limb_shift;
        if src < 4 {
            result[i] = val[src] >> bit_shift;
            if bit_shift > 0 && src + 1 < 4 {
                result[i] |= val[src + 1] << (64 - bit_shift);
            }
        }
    }
    result
}

// ---------------------------------------------------------------------------
// Marshalling and sampling
// ---------------------------------------------------------------------------

impl<P: FieldParams> Fp<P> {
    /// Serialized size of the canonical representative.
    pub const fn element_size() -> usize {
        32
    }

    /// Canonical representative as 32 big-endian bytes.
    pub fn to_be_bytes(&self) -> [u8; 32] {
        let reduced = self.from_montgomery_form();
        let mut bytes = [0u8; 32];
        bytes[0..8].copy_from_slice(&reduced.data[3].to_be_bytes());
        bytes[8..16].copy_from_slice(&reduced.data[2].to_be_bytes());
        bytes[16..24].copy_from_slice(&reduced.data[1].to_be_bytes());
        bytes[24..32].copy_from_slice(&reduced.data[0].to_be_bytes());
        bytes
    }

    /// Parse 32 big-endian bytes, reducing mod p.
    pub fn from_be_bytes(bytes: &[u8; 32]) -> Self {
        let mut limbs = [0u64; 4];
        for i in 0..4 {
            let mut word = [0u8; 8];
            word.copy_from_slice(&bytes[i * 8..i * 8 + 8]);
            limbs[3 - i] = u64::from_be_bytes(word);
        }
        Self::from_limbs(limbs)
    }

    /// Reduce a 512-bit value `(hi << 256) | lo` mod p.
    ///
    /// Maps 512 uniform bits (hash output, rng output) to a field element
    /// with negligible bias.
    pub fn from_u512(lo: [u64; 4], hi: [u64; 4]) -> Self {
        use crypto_bigint::{NonZero, U512};

        let mut val_words = [0u64; 8];
        val_words[..4].copy_from_slice(&lo);
        val_words[4..].copy_from_slice(&hi);
        let val = U512::from_words(val_words);

        let mut modulus_words = [0u64; 8];
        modulus_words[..4].copy_from_slice(&P::MODULUS);
        let modulus_wide = U512::from_words(modulus_words);
        // The modulus is a nonzero compile-time constant.
        let nz_mod: Option<NonZero<U512>> = NonZero::new(modulus_wide).into();
        let Some(nz_mod) = nz_mod else {
            return Self::zero();
        };
        let (_, remainder) = val.div_rem(&nz_mod);

        let words: [u64; 8] = remainder.to_words();
        Self::from_limbs([words[0], words[1], words[2], words[3]])
    }

    /// Uniformly random element from the thread rng.
    pub fn random() -> Self {
        Self::random_from(&mut rand::rng())
    }

    /// Uniformly random element from the given rng (seedable for tests).
    pub fn random_from<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let lo = [
            rng.random::<u64>(),
            rng.random::<u64>(),
            rng.random::<u64>(),
            rng.random::<u64>(),
        ];
        let hi = [
            rng.random::<u64>(),
            rng.random::<u64>(),
            rng.random::<u64>(),
            rng.random::<u64>(),
        ];
        Self::from_u512(lo, hi)
    }
}

// ---------------------------------------------------------------------------
// Operators and trait impls
// ---------------------------------------------------------------------------

impl<P: FieldParams> Add for Fp<P> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.add_mod(&rhs)
    }
}

impl<P: FieldParams> AddAssign for Fp<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = self.add_mod(&rhs);
    }
}

impl<P: FieldParams> Sub for Fp<P> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.sub_coarse(&rhs)
    }
}

impl<P: FieldParams> SubAssign for Fp<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.sub_coarse(&rhs);
    }
}

impl<P: FieldParams> Mul for Fp<P> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.montgomery_mul(&rhs)
    }
}

impl<P: FieldParams> MulAssign for Fp<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = self.montgomery_mul(&rhs);
    }
}

impl<P: FieldParams> Neg for Fp<P> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.negate()
    }
}

impl<P: FieldParams> PartialEq for Fp<P> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        let a = self.reduce();
        let b = other.reduce();
        a.data == b.data
    }
}

impl<P: FieldParams> Eq for Fp<P> {}

impl<P: FieldParams> FieldElement for Fp<P> {
    #[inline]
    fn zero() -> Self {
        Fp::zero()
    }

    #[inline]
    fn one() -> Self {
        Fp::one()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.is_zero_element()
    }

    #[inline]
    fn squared(&self) -> Self {
        self.montgomery_square()
    }

    #[inline]
    fn doubled(&self) -> Self {
        self.add_mod(self)
    }

    fn inversed(&self) -> Result<Self, AlgebraError> {
        Fp::inversed(self)
    }

    /// Frobenius is the identity on a prime field.
    #[inline]
    fn frobenius_map(&self, _power: usize) -> Self {
        *self
    }

    fn random_element() -> Self {
        Self::random()
    }
}
