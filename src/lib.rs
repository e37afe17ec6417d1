//! Algebraic foundation layer for elliptic-curve cryptography.
//!
//! Provides prime fields in Montgomery form, quadratic/cubic extension towers
//! with Frobenius and cyclotomic operations, short-Weierstrass and
//! twisted-Edwards curve groups over several coordinate systems, and a
//! multi-scalar multiplication engine with selectable strategies.

pub mod curves;
pub mod edwards;
pub mod error;
pub mod fields;
pub mod groups;
pub mod multiexp;
pub mod numeric;

pub use error::AlgebraError;

#[cfg(test)]
mod tests;
