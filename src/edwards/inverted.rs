use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::fields::{FieldElement, Fp};

use super::affine::TeAffine;
use super::params::TeCurveParams;

/// A twisted-Edwards point in inverted coordinates `(X, Y, Z)`, representing
/// the affine point `(Z/X, Z/Y)`.
///
/// Points with a zero affine coordinate (other than the identity) are not
/// representable; use the extended system for those. The identity is the
/// sentinel `(0, 1, 0)`, detected as `X == 0 && Z == 0`.
pub struct TeInverted<E: TeCurveParams> {
    pub x: Fp<E::BaseFieldParams>,
    pub y: Fp<E::BaseFieldParams>,
    pub z: Fp<E::BaseFieldParams>,
    _phantom: PhantomData<E>,
}

impl<E: TeCurveParams> Clone for TeInverted<E> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<E: TeCurveParams> Copy for TeInverted<E> {}

impl<E: TeCurveParams> std::fmt::Debug for TeInverted<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TeInverted({:?}, {:?}, {:?})", self.x, self.y, self.z)
    }
}

impl<E: TeCurveParams> TeInverted<E> {
    #[inline]
    pub const fn from_coords(
        x: Fp<E::BaseFieldParams>,
        y: Fp<E::BaseFieldParams>,
        z: Fp<E::BaseFieldParams>,
    ) -> Self {
        Self {
            x,
            y,
            z,
            _phantom: PhantomData,
        }
    }

    #[inline]
    pub fn identity() -> Self {
        Self::from_coords(Fp::zero(), Fp::one(), Fp::zero())
    }

    #[inline]
    pub fn generator() -> Self {
        let (x, y) = E::generator();
        Self::from_coords(y, x, x * y)
    }

    #[inline]
    pub fn is_identity(&self) -> bool {
        self.x.is_zero_element() && self.z.is_zero_element()
    }

    /// Lift an affine point: `(x, y) -> (y, x, x*y)`, which satisfies
    /// `Z/X = x` and `Z/Y = y` without any inversion.
    pub fn from_affine(a: &TeAffine<E>) -> Self {
        if a.is_zero() {
            return Self::identity();
        }
        Self::from_coords(a.y, a.x, a.x * a.y)
    }

    pub fn to_affine(&self) -> TeAffine<E> {
        if self.is_identity() {
            return TeAffine::zero();
        }
        let xy_inv = match (self.x * self.y).inversed() {
            Ok(inv) => inv,
            Err(_) => return TeAffine::zero(),
        };
        TeAffine::new(self.z * self.y * xy_inv, self.z * self.x * xy_inv)
    }

    /// dbl-2008-bbjlp for inverted twisted-Edwards coordinates.
    pub fn dbl(&self) -> Self {
        if self.is_identity() {
            return *self;
        }
        let a = self.x.montgomery_square();
        let b = self.y.montgomery_square();
        let u = E::coeff_a() * b;
        let c = a + u;
        let d = a - u;
        let e = (self.x + self.y).montgomery_square() - a - b;

        let x3 = c * d;
        let y3 = e * (c - E::coeff_d().doubled() * self.z.montgomery_square());
        let z3 = d * e;
        Self::from_coords(x3, y3, z3)
    }

    /// add-2008-bbjlp, with the degenerate cases (equal or opposite points)
    /// dispatched to doubling or the identity.
    pub fn add_inverted(&self, other: &Self) -> Self {
        if self.is_identity() {
            return *other;
        }
        if other.is_identity() {
            return *self;
        }
        if self == other {
            return self.dbl();
        }
        if *self == other.negate() {
            return Self::identity();
        }

        let a = self.z * other.z;
        let b = E::coeff_d() * a.montgomery_square();
        let c = self.x * other.x;
        let d = self.y * other.y;
        let e = c * d;
        let h = c - E::coeff_a() * d;
        let i = (self.x + self.y) * (other.x + other.y) - c - d;

        let x3 = (e + b) * h;
        let y3 = (e - b) * i;
        let z3 = a * h * i;
        Self::from_coords(x3, y3, z3)
    }

    /// Edwards negation: affine `x -> -x` is `X -> -X` here.
    #[inline]
    pub fn negate(&self) -> Self {
        Self::from_coords(-self.x, self.y, self.z)
    }

    /// Inverted-coordinate curve equation:
    /// `(X^2 + a*Y^2)*Z^2... ` rewritten from `a*x^2 + y^2 = 1 + d*x^2*y^2`
    /// with `x = Z/X`, `y = Z/Y`:
    /// `Z^2*(a*Y^2 + X^2) == X^2*Y^2 + d*Z^4`.
    pub fn is_well_formed(&self) -> bool {
        if self.is_identity() {
            return true;
        }
        let x2 = self.x.montgomery_square();
        let y2 = self.y.montgomery_square();
        let z2 = self.z.montgomery_square();
        z2 * (E::coeff_a() * y2 + x2) == x2 * y2 + E::coeff_d() * z2.montgomery_square()
    }
}

// ---------------------------------------------------------------------------
// Operator impls
// ---------------------------------------------------------------------------

impl<E: TeCurveParams> Add for TeInverted<E> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Self) -> Self {
        self.add_inverted(&rhs)
    }
}

impl<E: TeCurveParams> AddAssign for TeInverted<E> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = self.add_inverted(&rhs);
    }
}

impl<E: TeCurveParams> Sub for TeInverted<E> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Self) -> Self {
        self.add_inverted(&rhs.negate())
    }
}

impl<E: TeCurveParams> SubAssign for TeInverted<E> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = self.add_inverted(&rhs.negate());
    }
}

impl<E: TeCurveParams> Neg for TeInverted<E> {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self {
        self.negate()
    }
}

/// Equality modulo projective scaling: affine coordinates are `Z/X` and
/// `Z/Y`, so compare `Z1*X2 == Z2*X1` and `Z1*Y2 == Z2*Y1`.
impl<E: TeCurveParams> PartialEq for TeInverted<E> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_identity() || other.is_identity() {
            return self.is_identity() && other.is_identity();
        }
        self.z * other.x == other.z * self.x && self.z * other.y == other.z * self.y
    }
}

impl<E: TeCurveParams> Eq for TeInverted<E> {}
