use std::marker::PhantomData;

use crate::error::AlgebraError;
use crate::fields::Fp;

use super::params::TeCurveParams;

/// An affine twisted-Edwards point. The identity is the genuine group
/// element `(0, 1)` (or whatever `zero_fill` supplies).
pub struct TeAffine<E: TeCurveParams> {
    pub x: Fp<E::BaseFieldParams>,
    pub y: Fp<E::BaseFieldParams>,
    _phantom: PhantomData<E>,
}

impl<E: TeCurveParams> Clone for TeAffine<E> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: TeCurveParams> Copy for TeAffine<E> {}

impl<E: TeCurveParams> std::fmt::Debug for TeAffine<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TeAffine({:?}, {:?})", self.x, self.y)
    }
}

impl<E: TeCurveParams> TeAffine<E> {
    #[inline]
    pub const fn new(x: Fp<E::BaseFieldParams>, y: Fp<E::BaseFieldParams>) -> Self {
        Self {
            x,
            y,
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn zero() -> Self {
        let (x, y) = E::zero_fill();
        Self::new(x, y)
    }

    #[inline]
    pub fn one() -> Self {
        let (x, y) = E::generator();
        Self::new(x, y)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        let (zx, zy) = E::zero_fill();
        self.x == zx && self.y == zy
    }

    /// Edwards negation flips x only.
    #[inline]
    pub fn negate(&self) -> Self {
        Self::new(-self.x, self.y)
    }

    /// Curve membership: `a*x^2 + y^2 == 1 + d*x^2*y^2`.
    pub fn on_curve(&self) -> bool {
        let x2 = self.x.montgomery_square();
        let y2 = self.y.montgomery_square();
        E::coeff_a() * x2 + y2 == Fp::one() + E::coeff_d() * x2 * y2
    }

    /// Recover a point from its y coordinate:
    /// `x^2 = (1 - y^2) / (a - d*y^2)`. Fails when y is not on the curve.
    pub fn from_y_coordinate(y: Fp<E::BaseFieldParams>) -> Result<Self, AlgebraError> {
        let y2 = y.montgomery_square();
        let denominator = E::coeff_a() - E::coeff_d() * y2;
        let x2 = (Fp::one() - y2) * denominator.inversed()?;
        let x = x2.sqrt()?;
        Ok(Self::new(x, y))
    }

    /// Uniformly random curve point.
    pub fn random_element() -> Self {
        loop {
            if let Ok(point) = Self::from_y_coordinate(Fp::random()) {
                return point;
            }
        }
    }
}

impl<E: TeCurveParams> PartialEq for TeAffine<E> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl<E: TeCurveParams> Eq for TeAffine<E> {}
