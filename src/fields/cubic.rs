//! Generic cubic extension layer `F[v] / (v^3 - xi)`.
//!
//! Elements are triples `(c0, c1, c2)` of base field elements. Multiplication
//! is the Devegili et al. Karatsuba variant; squaring is CH-SQR2; inversion is
//! Algorithm 17 from "High-Speed Software Implementation of the Optimal Ate
//! Pairing over Barreto-Naehrig Curves".

use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::AlgebraError;

use super::FieldElement;

/// Parameters of one cubic extension layer.
pub trait CubicExtParams: 'static + Sized + Send + Sync {
    type BaseField: FieldElement;

    /// The non-residue `xi` with `v^3 = xi`.
    fn non_residue() -> Self::BaseField;

    /// `xi^((p^power - 1) / 3)`, applied to `c1` by the `power`-th Frobenius.
    fn frobenius_coeff_c1(power: usize) -> Self::BaseField;

    /// `xi^((2*p^power - 2) / 3)`, applied to `c2` by the `power`-th
    /// Frobenius.
    fn frobenius_coeff_c2(power: usize) -> Self::BaseField;

    /// Multiply by `xi`; overridable as a rotation/scale.
    #[inline]
    fn mul_by_non_residue(a: &Self::BaseField) -> Self::BaseField {
        Self::non_residue() * *a
    }
}

pub struct Cubic<P: CubicExtParams> {
    pub c0: P::BaseField,
    pub c1: P::BaseField,
    pub c2: P::BaseField,
    _phantom: PhantomData<P>,
}

impl<P: CubicExtParams> Clone for Cubic<P> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<P: CubicExtParams> Copy for Cubic<P> {}

impl<P: CubicExtParams> std::fmt::Debug for Cubic<P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cubic({:?}, {:?}, {:?})", self.c0, self.c1, self.c2)
    }
}

impl<P: CubicExtParams> Cubic<P> {
    #[inline]
    pub const fn new(c0: P::BaseField, c1: P::BaseField, c2: P::BaseField) -> Self {
        Self {
            c0,
            c1,
            c2,
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn zero() -> Self {
        Self::new(P::BaseField::zero(), P::BaseField::zero(), P::BaseField::zero())
    }

    #[inline]
    pub fn one() -> Self {
        Self::new(P::BaseField::one(), P::BaseField::zero(), P::BaseField::zero())
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.c0.is_zero() && self.c1.is_zero() && self.c2.is_zero()
    }

    /// Embed a base field element.
    #[inline]
    pub fn from_base(a: P::BaseField) -> Self {
        Self::new(a, P::BaseField::zero(), P::BaseField::zero())
    }

    /// Multiply every component by a base field element.
    #[inline]
    pub fn scale(&self, a: P::BaseField) -> Self {
        Self::new(a * self.c0, a * self.c1, a * self.c2)
    }

    /// CH-SQR2 squaring.
    pub fn squared(&self) -> Self {
        let s0 = self.c0.squared();
        let s1 = (self.c0 * self.c1).doubled();
        let s2 = (self.c0 + self.c2 - self.c1).squared();
        let s3 = (self.c1 * self.c2).doubled();
        let s4 = self.c2.squared();
        Self::new(
            P::mul_by_non_residue(&s3) + s0,
            P::mul_by_non_residue(&s4) + s1,
            s1 + s2 + s3 - s0 - s4,
        )
    }

    #[inline]
    pub fn doubled(&self) -> Self {
        Self::new(self.c0.doubled(), self.c1.doubled(), self.c2.doubled())
    }

    /// Algorithm 17 inversion: one base field inversion via the cubic norm.
    pub fn inversed(&self) -> Result<Self, AlgebraError> {
        let cap_c0 = self.c0.squared() - P::mul_by_non_residue(&(self.c1 * self.c2));
        let cap_c1 = P::mul_by_non_residue(&self.c2.squared()) - self.c0 * self.c1;
        let cap_c2 = self.c1.squared() - self.c0 * self.c2;

        let norm = self.c0 * cap_c0
            + P::mul_by_non_residue(&(self.c2 * cap_c1 + self.c1 * cap_c2));
        let t0 = norm.inversed().map_err(|_| AlgebraError::ZeroInversion)?;

        Ok(Self::new(t0 * cap_c0, t0 * cap_c1, t0 * cap_c2))
    }

    /// `x -> x^(p^power)`: component Frobenius plus the two coefficient
    /// tables.
    pub fn frobenius_map(&self, power: usize) -> Self {
        Self::new(
            self.c0.frobenius_map(power),
            P::frobenius_coeff_c1(power) * self.c1.frobenius_map(power),
            P::frobenius_coeff_c2(power) * self.c2.frobenius_map(power),
        )
    }

    pub fn random_element() -> Self {
        Self::new(
            P::BaseField::random_element(),
            P::BaseField::random_element(),
            P::BaseField::random_element(),
        )
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<P: CubicExtParams> Add for Cubic<P> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self::new(self.c0 + rhs.c0, self.c1 + rhs.c1, self.c2 + rhs.c2)
    }
}

impl<P: CubicExtParams> AddAssign for Cubic<P> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<P: CubicExtParams> Sub for Cubic<P> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self::new(self.c0 - rhs.c0, self.c1 - rhs.c1, self.c2 - rhs.c2)
    }
}

impl<P: CubicExtParams> SubAssign for Cubic<P> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<P: CubicExtParams> Mul for Cubic<P> {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        // Devegili et al., Section 4 (six base multiplications).
        let t0 = self.c0 * rhs.c0;
        let t1 = self.c1 * rhs.c1;
        let t2 = self.c2 * rhs.c2;

        let t3 = (self.c0 + self.c2) * (rhs.c0 + rhs.c2);
        let t4 = (self.c0 + self.c1) * (rhs.c0 + rhs.c1);
        let t5 = (self.c1 + self.c2) * (rhs.c1 + rhs.c2);

        Self::new(
            t0 + P::mul_by_non_residue(&(t5 - (t1 + t2))),
            t4 - (t0 + t1) + P::mul_by_non_residue(&t2),
            t3 + t1 - (t0 + t2),
        )
    }
}

impl<P: CubicExtParams> MulAssign for Cubic<P> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<P: CubicExtParams> Neg for Cubic<P> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        Self::new(-self.c0, -self.c1, -self.c2)
    }
}

impl<P: CubicExtParams> PartialEq for Cubic<P> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.c0 == other.c0 && self.c1 == other.c1 && self.c2 == other.c2
    }
}

impl<P: CubicExtParams> Eq for Cubic<P> {}

impl<P: CubicExtParams> FieldElement for Cubic<P> {
    #[inline]
    fn zero() -> Self {
        Cubic::zero()
    }

    #[inline]
    fn one() -> Self {
        Cubic::one()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        Cubic::is_zero(self)
    }

    #[inline]
    fn squared(&self) -> Self {
        Cubic::squared(self)
    }

    #[inline]
    fn doubled(&self) -> Self {
        Cubic::doubled(self)
    }

    fn inversed(&self) -> Result<Self, AlgebraError> {
        Cubic::inversed(self)
    }

    fn frobenius_map(&self, power: usize) -> Self {
        Cubic::frobenius_map(self, power)
    }

    fn random_element() -> Self {
        Cubic::random_element()
    }
}
