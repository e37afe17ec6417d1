use std::marker::PhantomData;

use crate::error::AlgebraError;
use crate::fields::{FieldElement, FieldParams, Fp};

use super::params::SwCurveParams;

/// An affine short-Weierstrass point.
///
/// The identity is encoded by the params-supplied `zero_fill` sentinel pair;
/// no separate flag is carried.
pub struct SwAffine<C: SwCurveParams> {
    pub x: C::BaseField,
    pub y: C::BaseField,
    _phantom: PhantomData<C>,
}

impl<C: SwCurveParams> Clone for SwAffine<C> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: SwCurveParams> Copy for SwAffine<C> {}

impl<C: SwCurveParams> std::fmt::Debug for SwAffine<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SwAffine({:?}, {:?})", self.x, self.y)
    }
}

impl<C: SwCurveParams> SwAffine<C> {
    #[inline]
    pub const fn new(x: C::BaseField, y: C::BaseField) -> Self {
        Self {
            x,
            y,
            _phantom: PhantomData,
        }
    }

    /// The identity sentinel.
    #[inline]
    pub fn zero() -> Self {
        let (x, y) = C::zero_fill();
        Self::new(x, y)
    }

    /// The published generator.
    #[inline]
    pub fn one() -> Self {
        let (x, y) = C::generator();
        Self::new(x, y)
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        let (zx, zy) = C::zero_fill();
        self.x == zx && self.y == zy
    }

    /// Negation flips y only; the identity is fixed.
    #[inline]
    pub fn negate(&self) -> Self {
        if self.is_zero() {
            return *self;
        }
        Self::new(self.x, -self.y)
    }

    /// Curve membership: `y^2 == x^3 + a*x + b`. The identity sentinel is
    /// considered on-curve.
    pub fn on_curve(&self) -> bool {
        if self.is_zero() {
            return true;
        }
        let mut rhs = self.x.squared() * self.x + C::coeff_b();
        if C::HAS_A {
            rhs = rhs + C::coeff_a() * self.x;
        }
        self.y.squared() == rhs
    }
}

impl<C, P> SwAffine<C>
where
    P: FieldParams,
    C: SwCurveParams<BaseField = Fp<P>>,
{
    /// Recover a point from its x coordinate, choosing the root returned by
    /// the field's `sqrt`. Fails when x is not on the curve.
    pub fn from_x_coordinate(x: Fp<P>) -> Result<Self, AlgebraError> {
        let mut rhs = x.montgomery_square() * x + C::coeff_b();
        if C::HAS_A {
            rhs = rhs + C::coeff_a() * x;
        }
        let y = rhs.sqrt()?;
        Ok(Self::new(x, y))
    }

    /// Uniformly random curve point: random x until the curve equation has a
    /// root. Two tries succeed on average.
    pub fn random_element() -> Self {
        loop {
            if let Ok(point) = Self::from_x_coordinate(Fp::random()) {
                if !point.is_zero() {
                    return point;
                }
            }
        }
    }
}

impl<C: SwCurveParams> PartialEq for SwAffine<C> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl<C: SwCurveParams> Eq for SwAffine<C> {}
