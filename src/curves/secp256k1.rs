//! secp256k1: `y^2 = x^3 + 7` over a 256-bit prime field.
//!
//! Both moduli exceed `2^254`, so both fields run on the wide Montgomery
//! multiplication path. Generator coordinates are stored in standard form and
//! converted at the call site.

use crate::fields::{FieldParams, Fp};
use crate::groups::{SwAffine, SwCurveParams, SwJacobian, SwProjective};

pub struct Secp256k1FqParams;

impl FieldParams for Secp256k1FqParams {
    const MODULUS: [u64; 4] = [0xFFFFFFFEFFFFFC2F, u64::MAX, u64::MAX, u64::MAX];
    const R_SQUARED: [u64; 4] = [8392367050913, 1, 0, 0];
    const R_INV: u64 = 15580212934572586289;
    const MODULUS_IS_BIG: bool = true;
    const TWO_ADICITY: u32 = 1;
}

pub struct Secp256k1FrParams;

impl FieldParams for Secp256k1FrParams {
    const MODULUS: [u64; 4] = [
        0xBFD25E8CD0364141,
        0xBAAEDCE6AF48A03B,
        0xFFFFFFFFFFFFFFFE,
        0xFFFFFFFFFFFFFFFF,
    ];
    const R_SQUARED: [u64; 4] = [
        9902555850136342848,
        8364476168144746616,
        16616019711348246470,
        11342065889886772165,
    ];
    const R_INV: u64 = 5408259542528602431;
    const MODULUS_IS_BIG: bool = true;
    const TWO_ADICITY: u32 = 6;
}

pub type Fq = Fp<Secp256k1FqParams>;
pub type Fr = Fp<Secp256k1FrParams>;

pub struct Secp256k1G1Params;

impl SwCurveParams for Secp256k1G1Params {
    type BaseField = Fq;
    type ScalarFieldParams = Secp256k1FrParams;

    fn coeff_b() -> Fq {
        Fq::from(7)
    }

    fn generator() -> (Fq, Fq) {
        (
            Fq::from_limbs([
                0x59F2815B16F81798,
                0x029BFCDB2DCE28D9,
                0x55A06295CE870B07,
                0x79BE667EF9DCBBAC,
            ]),
            Fq::from_limbs([
                0x9C47D08FFB10D4B8,
                0xFD17B448A6855419,
                0x5DA4FBFC0E1108A8,
                0x483ADA7726A3C465,
            ]),
        )
    }
}

pub type G1Affine = SwAffine<Secp256k1G1Params>;
pub type G1Element = SwJacobian<Secp256k1G1Params>;
pub type G1Projective = SwProjective<Secp256k1G1Params>;
