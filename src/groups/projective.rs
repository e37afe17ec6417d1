use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::fields::FieldElement;

use super::affine::SwAffine;
use super::jacobian::SwJacobian;
use super::params::SwCurveParams;
use super::CurveGroup;

/// A short-Weierstrass point in homogeneous projective coordinates
/// `(X, Y, Z)`, representing the affine point `(X/Z, Y/Z)`.
///
/// Valid for any `a` coefficient. The identity is encoded as `X == 0 &&
/// Z == 0`, constructed as `(0, 1, 0)`.
pub struct SwProjective<C: SwCurveParams> {
    pub x: C::BaseField,
    pub y: C::BaseField,
    pub z: C::BaseField,
    _phantom: PhantomData<C>,
}

impl<C: SwCurveParams> Clone for SwProjective<C> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<C: SwCurveParams> Copy for SwProjective<C> {}

impl<C: SwCurveParams> std::fmt::Debug for SwProjective<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SwProjective({:?}, {:?}, {:?})", self.x, self.y, self.z)
    }
}

impl<C: SwCurveParams> SwProjective<C> {
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
        Self::from_coords(C::BaseField::zero(), C::BaseField::one(), C::BaseField::zero())
    }

    #[inline]
    pub fn generator() -> Self {
        let (x, y) = C::generator();
        Self::from_coords(x, y, C::BaseField::one())
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.x.is_zero() && self.z.is_zero()
    }

    /// dbl-2007-bl (valid for any `a`).
    pub fn dbl(&self) -> Self {
        if self.is_identity() {
            return *self;
        }
        let xx = self.x.squared();
        let mut w = xx.doubled() + xx;
        if C::HAS_A {
            w = w + C::coeff_a() * self.z.squared();
        }
        let s = (self.y * self.z).doubled();
        let ss = s.squared();
        let sss = s * ss;
        let r = self.y * s;
        let rr = r.squared();
        let b = (self.x + r).squared() - xx - rr;
        let h = w.squared() - b.doubled();

        let x3 = h * s;
        let y3 = w * (b - h) - rr.doubled();
        let z3 = sss;
        Self::from_coords(x3, y3, z3)
    }

    /// add-1998-cmo-2, with the equal-x cases dispatched explicitly (the
    /// generic formula is invalid for P = Q and P = -Q).
    pub fn add_projective(&self, other: &Self) -> Self {
        if self.is_identity() {
            return *other;
        }
        if other.is_identity() {
            return *self;
        }

        let y1z2 = self.y * other.z;
        let x1z2 = self.x * other.z;
        let z1z2 = self.z * other.z;
        let u = other.y * self.z - y1z2;
        let v = other.x * self.z - x1z2;

        if v.is_zero() {
            if u.is_zero() {
                return self.dbl();
            }
            return Self::identity();
        }

        let uu = u.squared();
        let vv = v.squared();
        let vvv = v * vv;
        let r = vv * x1z2;
        let a = uu * z1z2 - vvv - r.doubled();

        let x3 = v * a;
        let y3 = u * (r - a) - vvv * y1z2;
        let z3 = vvv * z1z2;
        Self::from_coords(x3, y3, z3)
    }

    /// Mixed addition with an affine point (implicit Z2 = 1).
    pub fn add_affine(&self, other: &SwAffine<C>) -> Self {
        if other.is_zero() {
            return *self;
        }
        if self.is_identity() {
            return Self::from_coords(other.x, other.y, C::BaseField::one());
        }

        let u = other.y * self.z - self.y;
        let v = other.x * self.z - self.x;

        if v.is_zero() {
            if u.is_zero() {
                return self.dbl();
            }
            return Self::identity();
        }

        let uu = u.squared();
        let vv = v.squared();
        let vvv = v * vv;
        let r = vv * self.x;
        let a = uu * self.z - vvv - r.doubled();

        let x3 = v * a;
        let y3 = u * (r - a) - vvv * self.y;
        let z3 = vvv * self.z;
        Self::from_coords(x3, y3, z3)
    }

    /// Convert to Jacobian coordinates: `(X*Z, Y*Z^2, Z)`.
    pub fn to_jacobian(&self) -> SwJacobian<C> {
        if self.is_identity() {
            return SwJacobian::identity();
        }
        SwJacobian::from_coords(self.x * self.z, self.y * self.z.squared(), self.z)
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<C: SwCurveParams> Add for SwProjective<C> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.add_projective(&rhs)
    }
}

impl<C: SwCurveParams> AddAssign for SwProjective<C> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = self.add_projective(&rhs);
    }
}

impl<C: SwCurveParams> Sub for SwProjective<C> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.add_projective(&rhs.negate())
    }
}

impl<C: SwCurveParams> SubAssign for SwProjective<C> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.add_projective(&rhs.negate());
    }
}

impl<C: SwCurveParams> Neg for SwProjective<C> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        CurveGroup::negate(&self)
    }
}

/// Equality modulo the projective scaling: `X1*Z2 == X2*Z1` and
/// `Y1*Z2 == Y2*Z1`.
impl<C: SwCurveParams> PartialEq for SwProjective<C> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_identity() || other.is_identity() {
            return self.is_identity() && other.is_identity();
        }
        self.x * other.z == other.x * self.z && self.y * other.z == other.y * self.z
    }
}

impl<C: SwCurveParams> Eq for SwProjective<C> {}

impl<C: SwCurveParams> CurveGroup for SwProjective<C> {
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
        self.add_projective(other)
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
        SwAffine::new(self.x * z_inv, self.y * z_inv)
    }

    #[inline]
    fn affine_is_zero(a: &Self::Affine) -> bool {
        a.is_zero()
    }

    /// `Y^2*Z == X^3 + a*X*Z^2 + b*Z^3`.
    fn is_well_formed(&self) -> bool {
        if self.is_identity() {
            return true;
        }
        let zz = self.z.squared();
        let mut rhs = self.x.squared() * self.x + C::coeff_b() * zz * self.z;
        if C::HAS_A {
            rhs = rhs + C::coeff_a() * self.x * zz;
        }
        self.y.squared() * self.z == rhs
    }
}
