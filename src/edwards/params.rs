use crate::fields::{FieldParams, Fp};

/// Compile-time description of a twisted-Edwards curve
/// `a*x^2 + y^2 = 1 + d*x^2*y^2` over a prime field.
///
/// Completeness of the addition laws requires `a` square and `d` non-square
/// in the base field; that is a configuration contract of the params, not a
/// runtime check.
pub trait TeCurveParams: 'static + Sized + Send + Sync {
    type BaseFieldParams: FieldParams;
    type ScalarFieldParams: FieldParams;

    fn coeff_a() -> Fp<Self::BaseFieldParams>;

    fn coeff_d() -> Fp<Self::BaseFieldParams>;

    /// Affine coordinates of the published generator.
    fn generator() -> (Fp<Self::BaseFieldParams>, Fp<Self::BaseFieldParams>);

    /// Affine encoding of the identity. `(0, 1)` is the actual neutral
    /// element of the Edwards group law.
    fn zero_fill() -> (Fp<Self::BaseFieldParams>, Fp<Self::BaseFieldParams>) {
        (Fp::zero(), Fp::one())
    }
}
