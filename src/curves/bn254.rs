//! BN254 (alt_bn128): base and scalar fields, the Fq2/Fq6/Fq12 tower, and
//! the G1/G2 groups.
//!
//! All stored constants are in Montgomery form unless noted. The tower is
//! `Fq2 = Fq[u]/(u^2 + 1)`, `Fq6 = Fq2[v]/(v^3 - xi)` with `xi = 9 + u`, and
//! `Fq12 = Fq6[w]/(w^2 - v)`.

use crate::fields::{Cubic, CubicExtParams, FieldElement, FieldParams, Fp, Quadratic, QuadraticExtParams};
use crate::groups::{SwAffine, SwCurveParams, SwJacobian, SwProjective};

/// BN254 base field parameters.
pub struct Bn254FqParams;

impl FieldParams for Bn254FqParams {
    const MODULUS: [u64; 4] = [
        0x3C208C16D87CFD47,
        0x97816a916871ca8d,
        0xb85045b68181585d,
        0x30644e72e131a029,
    ];
    const R_SQUARED: [u64; 4] = [
        0xF32CFC5B538AFA89,
        0xB5E71911D44501FB,
        0x47AB1EFF0A417FF6,
        0x06D89F71CAB8351F,
    ];
    const R_INV: u64 = 0x87d20782e4866389;
    const TWO_ADICITY: u32 = 1;
}

/// BN254 scalar field parameters.
pub struct Bn254FrParams;

impl FieldParams for Bn254FrParams {
    const MODULUS: [u64; 4] = [
        0x43E1F593F0000001,
        0x2833E84879B97091,
        0xB85045B68181585D,
        0x30644E72E131A029,
    ];
    const R_SQUARED: [u64; 4] = [
        0x1BB8E645AE216DA7,
        0x53FE3AB1E35C59E3,
        0x8C49833D53BB8085,
        0x0216D0B17F4E44A5,
    ];
    const R_INV: u64 = 0xc2e1f593efffffff;
    const TWO_ADICITY: u32 = 28;
}

pub type Fq = Fp<Bn254FqParams>;
pub type Fr = Fp<Bn254FrParams>;

const fn fq2(c0: [u64; 4], c1: [u64; 4]) -> Fq2 {
    Quadratic::new(Fq::from_raw(c0), Fq::from_raw(c1))
}

/// `Fq2 = Fq[u] / (u^2 + 1)`.
pub struct Bn254Fq2Params;

impl QuadraticExtParams for Bn254Fq2Params {
    type BaseField = Fq;

    fn non_residue() -> Fq {
        Fq::one().negate()
    }

    /// `(-1)^((p^power - 1) / 2)`: `-1` for odd powers (p == 3 mod 4),
    /// `+1` for even.
    fn frobenius_coeff(power: usize) -> Fq {
        if power % 2 == 1 {
            Fq::one().negate()
        } else {
            Fq::one()
        }
    }

    #[inline]
    fn mul_by_non_residue(a: &Fq) -> Fq {
        a.negate()
    }
}

pub type Fq2 = Quadratic<Bn254Fq2Params>;

/// `Fq6 = Fq2[v] / (v^3 - (9 + u))`.
pub struct Bn254Fq6Params;

const FQ6_FROBENIUS_C1: [Fq2; 3] = [
    fq2(
        [
            0xb5773b104563ab30,
            0x347f91c8a9aa6454,
            0x7a007127242e0991,
            0x1956bcd8118214ec,
        ],
        [
            0x6e849f1ea0aa4757,
            0xaa1c7b6d89f89141,
            0xb6e713cdfae0ca3a,
            0x26694fbb4e82ebc3,
        ],
    ),
    fq2(
        [
            0x3350c88e13e80b9c,
            0x7dce557cdb5e56b9,
            0x6001b4b8b615564a,
            0x2682e617020217e0,
        ],
        [0, 0, 0, 0],
    ),
    fq2(
        [
            0xc9af22f716ad6bad,
            0xb311782a4aa662b2,
            0x19eeaf64e248c7f4,
            0x20273e77e3439f82,
        ],
        [
            0xacc02860f7ce93ac,
            0x3933d5817ba76b4c,
            0x69e6188b446c8467,
            0x0a46036d4417cc55,
        ],
    ),
];

const FQ6_FROBENIUS_C2: [Fq2; 3] = [
    fq2(
        [
            0x7361d77f843abe92,
            0xa5bb2bd3273411fb,
            0x9c941f314b3e2399,
            0x15df9cddbb9fd3ec,
        ],
        [
            0x5dddfd154bd8c949,
            0x62cb29a5a4445b60,
            0x37bc870a0c7dd2b9,
            0x24830a9d3171f0fd,
        ],
    ),
    fq2(
        [
            0x71930c11d782e155,
            0xa6bb947cffbe3323,
            0xaa303344d4741444,
            0x2c3b3f0d26594943,
        ],
        [0, 0, 0, 0],
    ),
    fq2(
        [
            0x448a93a57b6762df,
            0xbfd62df528fdeadf,
            0xd858f5d00e9bd47a,
            0x06b03d4d3476ec58,
        ],
        [
            0x2b19daf4bcc936d1,
            0xa1a54e7a56f4299f,
            0xb533eee05adeaef1,
            0x170c812b84dda0b2,
        ],
    ),
];

impl CubicExtParams for Bn254Fq6Params {
    type BaseField = Fq2;

    fn non_residue() -> Fq2 {
        Fq2::new(Fq::from(9), Fq::one())
    }

    fn frobenius_coeff_c1(power: usize) -> Fq2 {
        match power {
            1 | 2 | 3 => FQ6_FROBENIUS_C1[power - 1],
            _ => Fq2::one(),
        }
    }

    fn frobenius_coeff_c2(power: usize) -> Fq2 {
        match power {
            1 | 2 | 3 => FQ6_FROBENIUS_C2[power - 1],
            _ => Fq2::one(),
        }
    }

    /// `(9 + u)(a0 + a1*u) = (9*a0 - a1) + (9*a1 + a0)*u`, with the
    /// multiplications by 9 as three doublings and an add.
    #[inline]
    fn mul_by_non_residue(a: &Fq2) -> Fq2 {
        let t0 = a.c0.doubled().doubled().doubled() + a.c0;
        let t1 = a.c1.doubled().doubled().doubled() + a.c1;
        Fq2::new(t0 - a.c1, t1 + a.c0)
    }
}

pub type Fq6 = Cubic<Bn254Fq6Params>;

/// `Fq12 = Fq6[w] / (w^2 - v)`.
pub struct Bn254Fq12Params;

const FQ12_FROBENIUS: [Fq2; 3] = [
    fq2(
        [
            0xaf9ba69633144907,
            0xca6b1d7387afb78a,
            0x11bded5ef08a2087,
            0x02f34d751a1f3a7c,
        ],
        [
            0xa222ae234c492d72,
            0xd00f02a4565de15b,
            0xdc2ff3a253dfc926,
            0x10a75716b3899551,
        ],
    ),
    fq2(
        [
            0xca8d800500fa1bf2,
            0xf0c5d61468b39769,
            0x0e201271ad0d4418,
            0x04290f65bad856e6,
        ],
        [0, 0, 0, 0],
    ),
    fq2(
        [
            0x365316184e46d97d,
            0x0af7129ed4c96d9f,
            0x659da72fca1009b5,
            0x08116d8983a20d23,
        ],
        [
            0xb1df4af7c39c1939,
            0x3d9f02878a73bf7f,
            0x9b2220928caf0ae0,
            0x26684515eff054a6,
        ],
    ),
];

impl QuadraticExtParams for Bn254Fq12Params {
    type BaseField = Fq6;

    fn non_residue() -> Fq6 {
        Fq6::new(Fq2::zero(), Fq2::one(), Fq2::zero())
    }

    /// The coefficient is an Fq2 element embedded as the `c0` component.
    fn frobenius_coeff(power: usize) -> Fq6 {
        match power {
            1 | 2 | 3 => Fq6::new(FQ12_FROBENIUS[power - 1], Fq2::zero(), Fq2::zero()),
            _ => Fq6::one(),
        }
    }

    /// `v * (c0 + c1*v + c2*v^2) = xi*c2 + c0*v + c1*v^2`.
    #[inline]
    fn mul_by_non_residue(a: &Fq6) -> Fq6 {
        Fq6::new(Bn254Fq6Params::mul_by_non_residue(&a.c2), a.c0, a.c1)
    }
}

pub type Fq12 = Quadratic<Bn254Fq12Params>;

/// G1: `y^2 = x^3 + 3` over Fq, generator `(1, y)`.
pub struct Bn254G1Params;

impl SwCurveParams for Bn254G1Params {
    type BaseField = Fq;
    type ScalarFieldParams = Bn254FrParams;

    fn coeff_b() -> Fq {
        Fq::from_raw([
            0x7a17caa950ad28d7,
            0x1f6ac17ae15521b9,
            0x334bea4e696bd284,
            0x2a1f6744ce179d8e,
        ])
    }

    fn generator() -> (Fq, Fq) {
        (
            Fq::one(),
            Fq::from_raw([
                0xa6ba871b8b1e1b3a,
                0x14f1d651eb8e167b,
                0xccdd46def0f28c58,
                0x1c14ef83340fbe5e,
            ]),
        )
    }
}

pub type G1Affine = SwAffine<Bn254G1Params>;
pub type G1Element = SwJacobian<Bn254G1Params>;
pub type G1Projective = SwProjective<Bn254G1Params>;

/// G2: `y^2 = x^3 + b / xi` over Fq2 (the sextic twist).
pub struct Bn254G2Params;

impl SwCurveParams for Bn254G2Params {
    type BaseField = Fq2;
    type ScalarFieldParams = Bn254FrParams;

    fn coeff_b() -> Fq2 {
        fq2(
            [
                0x3bf938e377b802a8,
                0x020b1b273633535d,
                0x26b7edf049755260,
                0x2514c6324384a86d,
            ],
            [
                0x38e7ecccd1dcff67,
                0x65f0b37d93ce0d3e,
                0xd749d0dd22ac00aa,
                0x0141b9ce4a688d4d,
            ],
        )
    }

    fn generator() -> (Fq2, Fq2) {
        (
            fq2(
                [
                    0x8e83b5d102bc2026,
                    0xdceb1935497b0172,
                    0xfbb8264797811adf,
                    0x19573841af96503b,
                ],
                [
                    0xafb4737da84c6140,
                    0x6043dd5a5802d8c4,
                    0x09e950fc52a02f86,
                    0x14fef0833aea7b6b,
                ],
            ),
            fq2(
                [
                    0x619dfa9d886be9f6,
                    0xfe7fd297f59e9b78,
                    0xff9e1a62231b7dfe,
                    0x28fd7eebae9e4206,
                ],
                [
                    0x64095b56c71856ee,
                    0xdc57f922327d3cbb,
                    0x55f935be33351076,
                    0x0da4a0e693fd6482,
                ],
            ),
        )
    }
}

pub type G2Affine = SwAffine<Bn254G2Params>;
pub type G2Element = SwJacobian<Bn254G2Params>;
