use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::fields::FieldElement;

use super::affine::SwAffine;
use super::params::SwCurveParams;
use super::CurveGroup;

/// A short-Weierstrass point in Jacobian coordinates `(X, Y, Z)`,
/// representing the affine point `(X/Z^2, Y/Z^3)`.
///
/// The formulas assume `a = 0`; curves with a nonzero `a` coefficient use the
/// projective system instead. The identity is any point with `Z == 0`,
/// constructed as `(1, 1, 0)`.
pub struct SwJacobian<C: SwCurveParams> {
    pub x: C::BaseField,
    pub y: C::BaseField,
    pub z: C::BaseField,
    _phantom: PhantomData<C>,
}

impl<C: SwCurveParams> Clone for SwJacobian<C> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: SwCurveParams> Copy for SwJacobian<C> {}

impl<C: SwCurveParams> std::fmt::Debug for SwJacobian<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SwJacobian({:?}, {:?}, {:?})", self.x, self.y, self.z)
    }
}

impl<C: SwCurveParams> SwJacobian<C> {
    #[inline]
    pub const fn from_coords(x: C::BaseField, y: C::BaseField, z: C::BaseField) -> Self {
        Self {
            x,
            y,
            z,
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn identity() -> Self {
        Self::from_coords(C::BaseField::one(), C::BaseField::one(), C::BaseField::zero())
    }

    #[inline]
    pub fn generator() -> Self {
        let (x, y) = C::generator();
        Self::from_coords(x, y, C::BaseField::one())
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.z.is_zero()
    }

    /// dbl-2009-l.
    pub fn dbl(&self) -> Self {
        if self.is_identity() {
            return *self;
        }
        let a = self.x.squared();
        let b = self.y.squared();
        let c = b.squared();
        let d = ((self.x + b).squared() - a - c).doubled();
        let e = a.doubled() + a;
        let f = e.squared();

        let x3 = f - d.doubled();
        let c8 = c.doubled().doubled().doubled();
        let y3 = e * (d - x3) - c8;
        let z3 = (self.y * self.z).doubled();
        Self::from_coords(x3, y3, z3)
    }

    /// add-2007-bl, with the equal-x cases dispatched to doubling or the
    /// identity (the generic formula is invalid for P = Q and P = -Q).
    pub fn add_jacobian(&self, other: &Self) -> Self {
        if self.is_identity() {
            return *other;
        }
        if other.is_identity() {
            return *self;
        }

        let z1z1 = self.z.squared();
        let z2z2 = other.z.squared();
        let u1 = self.x * z2z2;
        let u2 = other.x * z1z1;
        let s1 = self.y * other.z * z2z2;
        let s2 = other.y * self.z * z1z1;

        let h = u2 - u1;
        let r = s2 - s1;
        if h.is_zero() {
            if r.is_zero() {
                return self.dbl();
            }
            return Self::identity();
        }

        let i = h.doubled().squared();
        let j = h * i;
        let r = r.doubled();
        let v = u1 * i;

        let x3 = r.squared() - j - v.doubled();
        let y3 = r * (v - x3) - (s1 * j).doubled();
        let z3 = ((self.z + other.z).squared() - z1z1 - z2z2) * h;
        Self::from_coords(x3, y3, z3)
    }

    /// madd-2007-bl: add an affine point (implicit Z2 = 1).
    pub fn add_affine(&self, other: &SwAffine<C>) -> Self {
        if other.is_zero() {
            return *self;
        }
        if self.is_identity() {
            return Self::from_coords(other.x, other.y, C::BaseField::one());
        }

        let z1z1 = self.z.squared();
        let u2 = other.x * z1z1;
        let s2 = other.y * self.z * z1z1;

        let h = u2 - self.x;
        let r = s2 - self.y;
        if h.is_zero() {
            if r.is_zero() {
                return self.dbl();
            }
            return Self::identity();
        }

        let hh = h.squared();
        let i = hh.doubled().doubled();
        let j = h * i;
        let r = r.doubled();
        let v = self.x * i;

        let x3 = r.squared() - j - v.doubled();
        let y3 = r * (v - x3) - (self.y * j).doubled();
        let z3 = (self.z + h).squared() - z1z1 - hh;
        Self::from_coords(x3, y3, z3)
    }

    /// Convert to projective coordinates: `(X*Z, Y, Z^3)`.
    pub fn to_projective(&self) -> super::projective::SwProjective<C> {
        if self.is_identity() {
            return super::projective::SwProjective::identity();
        }
        super::projective::SwProjective::from_coords(
            self.x * self.z,
            self.y,
            self.z.squared() * self.z,
        )
    }

    /// Montgomery-trick batch normalization: one field inversion for the
    /// whole slice. Identity points map to the affine zero sentinel.
    pub fn batch_normalize(points: &[Self]) -> Vec<SwAffine<C>> {
        let n = points.len();
        let mut results = vec![SwAffine::zero(); n];
        if n == 0 {
            return results;
        }

        // Forward pass: prefix products of the nonzero Z coordinates.
        let mut prefix = vec![C::BaseField::one(); n];
        let mut accumulator = C::BaseField::one();
        for (i, point) in points.iter().enumerate() {
            prefix[i] = accumulator;
            if !point.is_identity() {
                accumulator = accumulator * point.z;
            }
        }

        // The accumulator is a product of nonzero factors.
        let mut inverse = match accumulator.inversed() {
            Ok(inv) => inv,
            Err(_) => return results,
        };

        // Backward pass: peel off individual 1/Z values.
        for (i, point) in points.iter().enumerate().rev() {
            if point.is_identity() {
                continue;
            }
            let z_inv = prefix[i] * inverse;
            inverse = inverse * point.z;

            let zz_inv = z_inv.squared();
            results[i] = SwAffine::new(point.x * zz_inv, point.y * zz_inv * z_inv);
        }
        results
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<C: SwCurveParams> Add for SwJacobian<C> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.add_jacobian(&rhs)
    }
}

impl<C: SwCurveParams> AddAssign for SwJacobian<C> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = self.add_jacobian(&rhs);
    }
}

impl<C: SwCurveParams> Sub for SwJacobian<C> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.add_jacobian(&rhs.negate())
    }
}

impl<C: SwCurveParams> SubAssign for SwJacobian<C> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.add_jacobian(&rhs.negate());
    }
}

impl<C: SwCurveParams> Neg for SwJacobian<C> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        CurveGroup::negate(&self)
    }
}

/// Equality modulo the projective scaling: `X1*Z2^2 == X2*Z1^2` and
/// `Y1*Z2^3 == Y2*Z1^3`.
impl<C: SwCurveParams> PartialEq for SwJacobian<C> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_identity() || other.is_identity() {
            return self.is_identity() && other.is_identity();
        }
        let z1z1 = self.z.squared();
        let z2z2 = other.z.squared();
        self.x * z2z2 == other.x * z1z1
            && self.y * z2z2 * other.z == other.y * z1z1 * self.z
    }
}

impl<C: SwCurveParams> Eq for SwJacobian<C> {}

impl<C: SwCurveParams> CurveGroup for SwJacobian<C> {
    type Affine = SwAffine<C>;
    type ScalarFieldParams = C::ScalarFieldParams;

    #[inline]
    fn zero() -> Self {
        Self::identity()
    }

    #[inline]
    fn one() -> Self {
        Self::generator()
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.is_identity()
    }

    #[inline]
    fn add_element(&self, other: &Self) -> Self {
        self.add_jacobian(other)
    }

    #[inline]
    fn doubled(&self) -> Self {
        self.dbl()
    }

    #[inline]
    fn negate(&self) -> Self {
        if self.is_identity() {
            return *self;
        }
        Self::from_coords(self.x, -self.y, self.z)
    }

    #[inline]
    fn mixed_add(&self, other: &Self::Affine) -> Self {
        self.add_affine(other)
    }

    #[inline]
    fn from_affine(a: &Self::Affine) -> Self {
        if a.is_zero() {
            return Self::identity();
        }
        Self::from_coords(a.x, a.y, C::BaseField::one())
    }

    fn to_affine(&self) -> Self::Affine {
        if self.is_identity() {
            return SwAffine::zero();
        }
        let z_inv = match self.z.inversed() {
            Ok(inv) => inv,
            Err(_) => return SwAffine::zero(),
        };
        let zz_inv = z_inv.squared();
        SwAffine::new(self.x * zz_inv, self.y * zz_inv * z_inv)
    }

    #[inline]
    fn affine_is_zero(a: &Self::Affine) -> bool {
        a.is_zero()
    }

    /// `Y^2 == X^3 + b*Z^6` (Jacobian form of the `a = 0` curve equation).
    fn is_well_formed(&self) -> bool {
        if self.is_identity() {
            return true;
        }
        let zz = self.z.squared();
        let z6 = zz.squared() * zz;
        self.y.squared() == self.x.squared() * self.x + C::coeff_b() * z6
    }

    fn batch_to_affine(points: &[Self]) -> Vec<Self::Affine> {
        Self::batch_normalize(points)
    }
}
