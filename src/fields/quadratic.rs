//! Generic quadratic extension layer `F[w] / (w^2 - beta)`.
//!
//! Elements are pairs `(c0, c1)` representing `c0 + c1*w`. The non-residue
//! `beta` and the Frobenius coefficient table come from the params trait, so
//! the layer composes: quadratic over prime, quadratic over cubic (degree 12),
//! quadratic over quadratic (degree 4). Irreducibility of `w^2 - beta` is a
//! construction-time contract of the params, not a runtime check.

use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::AlgebraError;

use super::FieldElement;

/// Parameters of one quadratic extension layer.
pub trait QuadraticExtParams: 'static + Sized + Send + Sync {
    type BaseField: FieldElement;

    /// The non-residue `beta` with `w^2 = beta`.
    fn non_residue() -> Self::BaseField;

    /// `beta^((p^power - 1) / 2)`, the coefficient applied to `c1` by the
    /// `power`-th Frobenius. Layers over a prime field need powers 1..=3;
    /// even powers are the identity coefficient there.
    fn frobenius_coeff(power: usize) -> Self::BaseField;

    /// Multiply by `beta`. Overridable where the non-residue admits a cheap
    /// rotation/scale instead of a full multiply.
    #[inline]
    fn mul_by_non_residue(a: &Self::BaseField) -> Self::BaseField {
        Self::non_residue() * *a
    }
}

pub struct Quadratic<P: QuadraticExtParams> {
    pub c0: P::BaseField,
    pub c1: P::BaseField,
    _phantom: PhantomData<P>,
}

impl<P: QuadraticExtParams> Clone for Quadratic<P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: QuadraticExtParams> Copy for Quadratic<P> {}

impl<P: QuadraticExtParams> std::fmt::Debug for Quadratic<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Quadratic({:?}, {:?})", self.c0, self.c1)
    }
}

impl<P: QuadraticExtParams> Quadratic<P> {
    #[inline]
    pub const fn new(c0: P::BaseField, c1: P::BaseField) -> Self {
        Self {
            c0,
            c1,
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::new(P::BaseField::zero(), P::BaseField::zero())
    }

    #[inline]
    pub fn one() -> Self {
        Self::new(P::BaseField::one(), P::BaseField::zero())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero()
    }

    /// Embed a base field element into the extension.
    #[inline]
    pub fn from_base(a: P::BaseField) -> Self {
        Self::new(a, P::BaseField::zero())
    }

    /// Multiply both components by a base field element.
    #[inline]
    pub fn scale(&self, a: P::BaseField) -> Self {
        Self::new(a * self.c0, a * self.c1)
    }

    /// Squaring: `(c0 + c1*w)^2 = c0^2 + beta*c1^2 + 2*c0*c1*w`, computed
    /// with two base multiplications.
    #[inline]
    pub fn squared(&self) -> Self {
        let t = self.c0 * self.c1;
        let c0 = (self.c0 + self.c1) * (self.c0 + P::mul_by_non_residue(&self.c1))
            - t
            - P::mul_by_non_residue(&t);
        Self::new(c0, t.doubled())
    }

    #[inline]
    pub fn doubled(&self) -> Self {
        Self::new(self.c0.doubled(), self.c1.doubled())
    }

    /// Inversion through the norm: `1/(c0 + c1*w) = (c0 - c1*w) / (c0^2 -
    /// beta*c1^2)`. One base field inversion.
    pub fn inversed(&self) -> Result<Self, AlgebraError> {
        let norm = self.c0.squared() - P::mul_by_non_residue(&self.c1.squared());
        let t = norm.inversed().map_err(|_| AlgebraError::ZeroInversion)?;
        Ok(Self::new(self.c0 * t, -(self.c1 * t)))
    }

    /// `x -> x^(p^power)`: Frobenius on each component, then the table
    /// coefficient on `c1`.
    pub fn frobenius_map(&self, power: usize) -> Self {
        Self::new(
            self.c0.frobenius_map(power),
            P::frobenius_coeff(power) * self.c1.frobenius_map(power),
        )
    }

    pub fn random_element() -> Self {
        Self::new(P::BaseField::random_element(), P::BaseField::random_element())
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<P: QuadraticExtParams> Add for Quadratic<P> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1)
    }
}

impl<P: QuadraticExtParams> AddAssign for Quadratic<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: QuadraticExtParams> Sub for Quadratic<P> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1)
    }
}

impl<P: QuadraticExtParams> SubAssign for Quadratic<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: QuadraticExtParams> Mul for Quadratic<P> {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        // Karatsuba with three base multiplications:
        // (a0 + a1*w)(b0 + b1*w)
        //   = a0*b0 + beta*a1*b1 + ((a0+a1)(b0+b1) - a0*b0 - a1*b1)*w
        let t0 = self.c0 * rhs.c0;
        let t1 = self.c1 * rhs.c1;
        Self::new(
            t0 + P::mul_by_non_residue(&t1),
            (self.c0 + self.c1) * (rhs.c0 + rhs.c1) - (t0 + t1),
        )
    }
}

impl<P: QuadraticExtParams> MulAssign for Quadratic<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: QuadraticExtParams> Neg for Quadratic<P> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1)
    }
}

impl<P: QuadraticExtParams> PartialEq for Quadratic<P> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1
    }
}

impl<P: QuadraticExtParams> Eq for Quadratic<P> {}

impl<P: QuadraticExtParams> FieldElement for Quadratic<P> {
    #[inline]
    fn zero() -> Self {
        Quadratic::zero()
    }

    #[inline]
    fn one() -> Self {
        Quadratic::one()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        Quadratic::is_zero(self)
    }

    #[inline]
    fn squared(&self) -> Self {
        Quadratic::squared(self)
    }

    #[inline]
    fn doubled(&self) -> Self {
        Quadratic::doubled(self)
    }

    fn inversed(&self) -> Result<Self, AlgebraError> {
        Quadratic::inversed(self)
    }

    fn frobenius_map(&self, power: usize) -> Self {
        Quadratic::frobenius_map(self, power)
    }

    fn random_element() -> Self {
        Quadratic::random_element()
    }
}
