//! Short-Weierstrass curve groups over three coordinate systems.

mod affine;
mod jacobian;
mod params;
mod projective;

pub use affine::SwAffine;
pub use jacobian::SwJacobian;
pub use params::SwCurveParams;
pub use projective::SwProjective;

use std::fmt::Debug;

use crate::fields::{FieldParams, Fp};
use crate::numeric::{U256Ext, U256};

/// Capability surface of a curve group in some coordinate system.
///
/// Implemented by the projective short-Weierstrass, Jacobian
/// short-Weierstrass, and extended twisted-Edwards types; the multiexp engine
/// is generic over this trait.
pub trait CurveGroup: Copy + PartialEq + Debug + Send + Sync + 'static {
    /// The affine form of a point, used by mixed addition. Taking the affine
    /// type here is what enforces the "second operand is normalized"
    /// precondition of `mixed_add` at compile time.
    type Affine: Copy + Send + Sync;

    /// Parameters of the scalar field (the group order).
    type ScalarFieldParams: FieldParams;

    /// The group identity.
    fn zero() -> Self;

    /// The published generator.
    fn one() -> Self;

    fn is_zero(&self) -> bool;

    fn add_element(&self, other: &Self) -> Self;

    fn doubled(&self) -> Self;

    fn negate(&self) -> Self;

    /// Add a normalized (affine) point.
    fn mixed_add(&self, other: &Self::Affine) -> Self;

    fn from_affine(a: &Self::Affine) -> Self;

    /// Normalize to affine. The identity maps to the affine zero sentinel and
    /// never divides.
    fn to_affine(&self) -> Self::Affine;

    fn affine_is_zero(a: &Self::Affine) -> bool;

    /// Curve membership, evaluated in native coordinates.
    fn is_well_formed(&self) -> bool;

    /// Normalize a batch of points to affine. Coordinate systems with a
    /// shared-inversion trick override this.
    fn batch_to_affine(points: &[Self]) -> Vec<Self::Affine> {
        points.iter().map(|p| p.to_affine()).collect()
    }

    /// Scalar multiplication by a scalar field element.
    fn scalar_mul(&self, scalar: &Fp<Self::ScalarFieldParams>) -> Self {
        self.mul_limbs(&scalar.from_montgomery_form().data)
    }

    /// Double-and-add scalar multiplication by a 256-bit little-endian limb
    /// scalar.
    fn mul_limbs(&self, scalar: &[u64; 4]) -> Self {
        let s = U256::from_words(*scalar);
        let bits = s.bits_vartime();
        if bits == 0 || self.is_zero() {
            return Self::zero();
        }
        let mut acc = *self;
        for i in (0..bits - 1).rev() {
            acc = acc.doubled();
            if s.get_bit(i) {
                acc = acc.add_element(self);
            }
        }
        acc
    }

    /// Fixed 4-bit-window scalar multiplication.
    fn windowed_mul_limbs(&self, scalar: &[u64; 4]) -> Self {
        let s = U256::from_words(*scalar);
        let bits = s.bits_vartime();
        if bits == 0 || self.is_zero() {
            return Self::zero();
        }

        let mut table = [Self::zero(); 16];
        table[1] = *self;
        for i in 2..16 {
            table[i] = table[i - 1].add_element(self);
        }

        let windows = (bits as usize + 3) / 4;
        let mut acc = Self::zero();
        for w in (0..windows).rev() {
            for _ in 0..4 {
                acc = acc.doubled();
            }
            let start = (w * 4) as u32;
            let digit = s.slice(start, start + 4) as usize;
            if digit != 0 {
                acc = acc.add_element(&table[digit]);
            }
        }
        acc
    }
}
