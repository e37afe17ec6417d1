//! Concrete curve and field instantiations.

pub mod bn254;
pub mod ed25519;
pub mod grumpkin;
pub mod secp256k1;
