use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::fields::{FieldElement, Fp};

use super::affine::TeAffine;
use super::params::TeCurveParams;
use crate::groups::CurveGroup;

/// A twisted-Edwards point in extended coordinates `(X, Y, Z, T)` with
/// `T = X*Y/Z`, representing the affine point `(X/Z, Y/Z)`.
///
/// The addition law is the `a = -1` Hisil-Wong-Carter-Dawson formula, which
/// is complete when `d` is a non-square; curves must therefore have
/// `a = -1`. The identity is `(0, 1, 1, 0)`, detected as
/// `X == 0 && T == 0 && Y == Z`.
pub struct TeExtended<E: TeCurveParams> {
    pub x: Fp<E::BaseFieldParams>,
    pub y: Fp<E::BaseFieldParams>,
    pub z: Fp<E::BaseFieldParams>,
    pub t: Fp<E::BaseFieldParams>,
    _phantom: PhantomData<E>,
}

impl<E: TeCurveParams> Clone for TeExtended<E> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: TeCurveParams> Copy for TeExtended<E> {}

impl<E: TeCurveParams> std::fmt::Debug for TeExtended<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TeExtended({:?}, {:?}, {:?}, {:?})",
            self.x, self.y, self.z, self.t
        )
    }
}

impl<E: TeCurveParams> TeExtended<E> {
    #[inline]
    pub const fn from_coords(
        x: Fp<E::BaseFieldParams>,
        y: Fp<E::BaseFieldParams>,
        z: Fp<E::BaseFieldParams>,
        t: Fp<E::BaseFieldParams>,
    ) -> Self {
        Self {
            x,
            y,
            z,
            t,
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn identity() -> Self {
        Self::from_coords(Fp::zero(), Fp::one(), Fp::one(), Fp::zero())
    }

    #[inline]
    pub fn generator() -> Self {
        let (x, y) = E::generator();
        Self::from_coords(x, y, Fp::one(), x * y)
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.x.is_zero_element() && self.t.is_zero_element() && self.y == self.z
    }

    /// dbl-2008-hwcd (works for any `a`; `a = -1` in practice here).
    pub fn dbl(&self) -> Self {
        let a = self.x.montgomery_square();
        let b = self.y.montgomery_square();
        let c = self.z.montgomery_square().doubled();
        let d = E::coeff_a() * a;
        let e = (self.x + self.y).montgomery_square() - a - b;
        let g = d + b;
        let f = g - c;
        let h = d - b;

        Self::from_coords(e * f, g * h, f * g, e * h)
    }

    /// add-2008-hwcd-3: complete addition for `a = -1`, `d` non-square.
    /// No case dispatch; the identity and doubling cases fall out of the
    /// formula.
    pub fn add_extended(&self, other: &Self) -> Self {
        let a = (self.y - self.x) * (other.y - other.x);
        let b = (self.y + self.x) * (other.y + other.x);
        let c = self.t * E::coeff_d().doubled() * other.t;
        let d = self.z.doubled() * other.z;
        let e = b - a;
        let f = d - c;
        let g = d + c;
        let h = b + a;

        Self::from_coords(e * f, g * h, f * g, e * h)
    }

    /// Mixed addition with an affine point (implicit Z2 = 1, T2 = x2*y2).
    pub fn add_affine(&self, other: &TeAffine<E>) -> Self {
        let t2 = other.x * other.y;
        let a = (self.y - self.x) * (other.y - other.x);
        let b = (self.y + self.x) * (other.y + other.x);
        let c = self.t * E::coeff_d().doubled() * t2;
        let d = self.z.doubled();
        let e = b - a;
        let f = d - c;
        let g = d + c;
        let h = b + a;

        Self::from_coords(e * f, g * h, f * g, e * h)
    }

    /// Convert to inverted coordinates `(Y*Z, X*Z, X*Y)`. Requires a point
    /// with both affine coordinates nonzero; the identity maps to the
    /// inverted sentinel.
    pub fn to_inverted(&self) -> super::inverted::TeInverted<E> {
        if self.is_identity() {
            return super::inverted::TeInverted::identity();
        }
        super::inverted::TeInverted::from_coords(
            self.y * self.z,
            self.x * self.z,
            self.x * self.y,
        )
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<E: TeCurveParams> Add for TeExtended<E> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.add_extended(&rhs)
    }
}

impl<E: TeCurveParams> AddAssign for TeExtended<E> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = self.add_extended(&rhs);
    }
}

impl<E: TeCurveParams> Sub for TeExtended<E> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.add_extended(&rhs.negate())
    }
}

impl<E: TeCurveParams> SubAssign for TeExtended<E> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.add_extended(&rhs.negate());
    }
}

impl<E: TeCurveParams> Neg for TeExtended<E> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        CurveGroup::negate(&self)
    }
}

/// Equality modulo projective scaling: `X1*Z2 == X2*Z1` and
/// `Y1*Z2 == Y2*Z1`.
impl<E: TeCurveParams> PartialEq for TeExtended<E> {
    fn eq(&self, other: &Self) -> bool {
        self.x * other.z == other.x * self.z && self.y * other.z == other.y * self.z
    }
}

impl<E: TeCurveParams> Eq for TeExtended<E> {}

impl<E: TeCurveParams> CurveGroup for TeExtended<E> {
    type Affine = TeAffine<E>;
    type ScalarFieldParams = E::ScalarFieldParams;

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
        self.add_extended(other)
    }

    #[inline]
    fn doubled(&self) -> Self {
        self.dbl()
    }

    #[inline]
    fn negate(&self) -> Self {
        Self::from_coords(-self.x, self.y, self.z, -self.t)
    }

    #[inline]
    fn mixed_add(&self, other: &Self::Affine) -> Self {
        self.add_affine(other)
    }

    #[inline]
    fn from_affine(a: &Self::Affine) -> Self {
        Self::from_coords(a.x, a.y, Fp::one(), a.x * a.y)
    }

    fn to_affine(&self) -> Self::Affine {
        if self.is_identity() {
            return TeAffine::zero();
        }
        let z_inv = match self.z.inversed() {
            Ok(inv) => inv,
            Err(_) => return TeAffine::zero(),
        };
        TeAffine::new(self.x * z_inv, self.y * z_inv)
    }

    #[inline]
    fn affine_is_zero(a: &Self::Affine) -> bool {
        a.is_zero()
    }

    /// Projective curve equation `a*X^2 + Y^2 == Z^2 + d*T^2` together with
    /// the extended-coordinate constraint `X*Y == T*Z`.
    fn is_well_formed(&self) -> bool {
        let lhs = E::coeff_a() * self.x.montgomery_square() + self.y.montgomery_square();
        let rhs = self.z.montgomery_square() + E::coeff_d() * self.t.montgomery_square();
        lhs == rhs && self.x * self.y == self.t * self.z
    }
}
