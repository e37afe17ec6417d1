//! Grumpkin: the field-swapped twin of BN254.
//!
//! Grumpkin's base field is BN254's scalar field and vice versa, which makes
//! the two curves form a cycle.

use crate::curves::bn254::{Bn254FqParams, Bn254FrParams};
use crate::fields::Fp;
use crate::groups::{SwAffine, SwCurveParams, SwJacobian};

pub type GrumpkinFq = Fp<Bn254FrParams>;
pub type GrumpkinFr = Fp<Bn254FqParams>;

/// Grumpkin G1: `y^2 = x^3 - 17`, generator `(1, y)`.
pub struct GrumpkinG1Params;

impl SwCurveParams for GrumpkinG1Params {
    type BaseField = GrumpkinFq;
    type ScalarFieldParams = Bn254FqParams;

    /// `b = -17` in Montgomery form.
    fn coeff_b() -> GrumpkinFq {
        GrumpkinFq::from_raw([
            0xdd7056026000005a,
            0x223fa97acb319311,
            0xcc388229877910c0,
            0x034394632b724eaa,
        ])
    }

    fn generator() -> (GrumpkinFq, GrumpkinFq) {
        (
            GrumpkinFq::one(),
            GrumpkinFq::from_raw([
                0x11b2dff1448c41d8,
                0x23d3446f21c77dc3,
                0xaa7b8cf435dfafbb,
                0x14b34cf69dc25d68,
            ]),
        )
    }
}

pub type G1Affine = SwAffine<GrumpkinG1Params>;
pub type G1Element = SwJacobian<GrumpkinG1Params>;
