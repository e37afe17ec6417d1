use crate::fields::{FieldElement, FieldParams};

/// Compile-time description of a short-Weierstrass curve
/// `y^2 = x^3 + a*x + b`.
///
/// The base field is any tower layer, so curves over extension fields (e.g. a
/// sextic twist over a quadratic extension) use the same machinery as curves
/// over prime fields.
pub trait SwCurveParams: 'static + Sized + Send + Sync {
    type BaseField: FieldElement;
    type ScalarFieldParams: FieldParams;

    /// True when `a != 0`; skips the `a*x` terms otherwise.
    const HAS_A: bool = false;

    fn coeff_a() -> Self::BaseField {
        Self::BaseField::zero()
    }

    fn coeff_b() -> Self::BaseField;

    /// Affine coordinates of the published generator.
    fn generator() -> (Self::BaseField, Self::BaseField);

    /// Sentinel coordinates encoding the identity in affine form. `(0, 0)` is
    /// safe for any curve with `b != 0`, since it never satisfies the curve
    /// equation.
    fn zero_fill() -> (Self::BaseField, Self::BaseField) {
        (Self::BaseField::zero(), Self::BaseField::zero())
    }
}
