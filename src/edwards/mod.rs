//! Twisted-Edwards curve groups: `a*x^2 + y^2 = 1 + d*x^2*y^2`.

mod affine;
mod extended;
mod inverted;
mod params;

pub use affine::TeAffine;
pub use extended::TeExtended;
pub use inverted::TeInverted;
pub use params::TeCurveParams;
