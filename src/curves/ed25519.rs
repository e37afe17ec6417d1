//! Ed25519: the twisted-Edwards curve `-x^2 + y^2 = 1 + d*x^2*y^2` over
//! `GF(2^255 - 19)`, with the prime-order scalar field `l`.
//!
//! `a = -1` makes the extended-coordinate addition law complete, since `d` is
//! a non-square mod `p`.

use crate::edwards::{TeAffine, TeCurveParams, TeExtended, TeInverted};
use crate::fields::{FieldParams, Fp};

pub struct Ed25519FqParams;

impl FieldParams for Ed25519FqParams {
    const MODULUS: [u64; 4] = [
        0xffffffffffffffed,
        u64::MAX,
        u64::MAX,
        0x7fffffffffffffff,
    ];
    const R_SQUARED: [u64; 4] = [0x5a4, 0, 0, 0];
    const R_INV: u64 = 0x86bca1af286bca1b;
    const MODULUS_IS_BIG: bool = true;
    const TWO_ADICITY: u32 = 2;
}

pub struct Ed25519FrParams;

impl FieldParams for Ed25519FrParams {
    const MODULUS: [u64; 4] = [
        0x5812631a5cf5d3ed,
        0x14def9dea2f79cd6,
        0,
        0x1000000000000000,
    ];
    const R_SQUARED: [u64; 4] = [
        0xa40611e3449c0f01,
        0xd00e1ba768859347,
        0xceec73d217f5be65,
        0x0399411b7c309a3d,
    ];
    const R_INV: u64 = 0xd2b51da312547e1b;
    const TWO_ADICITY: u32 = 2;
}

pub type Fq = Fp<Ed25519FqParams>;
pub type Fr = Fp<Ed25519FrParams>;

pub struct Ed25519Params;

impl TeCurveParams for Ed25519Params {
    type BaseFieldParams = Ed25519FqParams;
    type ScalarFieldParams = Ed25519FrParams;

    fn coeff_a() -> Fq {
        Fq::one().negate()
    }

    /// `d = -121665/121666` in Montgomery form.
    fn coeff_d() -> Fq {
        Fq::from_raw([
            0x80ed8bfedf47e9fa,
            0x10a18777afc62973,
            0xe5939207bc188690,
            0x2c822b5a729fc526,
        ])
    }

    fn generator() -> (Fq, Fq) {
        (
            Fq::from_raw([
                0xe2cabc553f9da287,
                0x9ca598562396e489,
                0x9879936bade4b5b7,
                0x759e23707e6077d0,
            ]),
            Fq::from_raw([
                0x333333333333334a,
                0x3333333333333333,
                0x3333333333333333,
                0x3333333333333333,
            ]),
        )
    }
}

pub type PointAffine = TeAffine<Ed25519Params>;
pub type PointExtended = TeExtended<Ed25519Params>;
pub type PointInverted = TeInverted<Ed25519Params>;
