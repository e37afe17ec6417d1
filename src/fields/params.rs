use crate::error::AlgebraError;

use super::prime::Fp;

/// Compile-time parameters describing a prime field.
///
/// All limb arrays are little-endian (limb 0 least significant). `R` denotes
/// the Montgomery radix `2^256`.
pub trait FieldParams: 'static + Sized + Send + Sync {
    /// The prime modulus `p`.
    const MODULUS: [u64; 4];

    /// `R^2 mod p`, used to enter Montgomery form.
    const R_SQUARED: [u64; 4];

    /// `(-p)^-1 mod 2^64`, the Montgomery reduction constant.
    const R_INV: u64;

    /// True when `p >= 2^254`; selects the wide multiplication path that
    /// cannot rely on the coarse `[0, 2p)` representation.
    const MODULUS_IS_BIG: bool = false;

    /// The exponent `s` in `p - 1 = q * 2^s` with `q` odd. Bounds the
    /// Tonelli-Shanks square root loops.
    const TWO_ADICITY: u32;
}

/// Explicit consistency check of a parameter set against its modulus.
///
/// Verifies the Montgomery reduction constant, the claimed two-adicity, the
/// big/small modulus classification, and that `R_SQUARED` really is
/// `R^2 mod p`. Intended to be exercised once per shipped field by its tests;
/// the arithmetic itself never re-checks.
pub fn validate_params<P: FieldParams>() -> Result<(), AlgebraError> {
    let m = P::MODULUS;
    if m[0] & 1 == 0 {
        return Err(AlgebraError::InvalidParameters("modulus must be odd"));
    }
    if m[0].wrapping_mul(P::R_INV) != u64::MAX {
        return Err(AlgebraError::InvalidParameters(
            "R_INV is not -MODULUS^-1 mod 2^64",
        ));
    }
    if !P::MODULUS_IS_BIG && m[3] >= 0x4000_0000_0000_0000 {
        return Err(AlgebraError::InvalidParameters(
            "modulus >= 2^254 requires MODULUS_IS_BIG",
        ));
    }

    // Two-adicity: trailing zero count of p - 1.
    let p_minus_1 = [m[0].wrapping_sub(1), m[1], m[2], m[3]];
    let mut adicity = 0u32;
    for (i, limb) in p_minus_1.iter().enumerate() {
        if *limb != 0 {
            adicity = (i as u32) * 64 + limb.trailing_zeros();
            break;
        }
    }
    if adicity != P::TWO_ADICITY {
        return Err(AlgebraError::InvalidParameters(
            "TWO_ADICITY does not match the modulus",
        ));
    }

    // R_SQUARED * R^-1 mod p must equal 2^256 mod p. The left side is the
    // Montgomery reduction of R_SQUARED; the right side is computed through
    // the 512-bit reduction path.
    let claimed = Fp::<P>::from_raw(P::R_SQUARED).from_montgomery_form();
    let expected = Fp::<P>::from_u512([0, 0, 0, 0], [1, 0, 0, 0]).from_montgomery_form();
    if claimed.data != expected.data {
        return Err(AlgebraError::InvalidParameters("R_SQUARED is not R^2 mod p"));
    }
    Ok(())
}
