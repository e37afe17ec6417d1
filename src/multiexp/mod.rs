//! Multi-scalar multiplication: `sum_i scalars[i] * bases[i]`.
//!
//! Three strategies with identical results and different running times,
//! selected explicitly at the call site, plus a chunk-and-combine parallel
//! driver. Zero scalars and identity bases are handled values everywhere; a
//! length mismatch is the one input error.

mod bos_coster;
mod pippenger;

pub use bos_coster::bos_coster;
pub use pippenger::{pippenger, pippenger_with_window_size, window_size};

use rayon::prelude::*;

use crate::error::AlgebraError;
use crate::fields::Fp;
use crate::groups::CurveGroup;

/// Multiexp evaluation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiexpPolicy {
    /// Per-pair double-and-add; the reference semantics.
    NaivePlain,
    /// Bucketed windows (Pippenger, as analyzed by
    /// Bernstein-Doumen-Lange-Oosterwijk).
    Bdlo12,
    /// Heap-driven scalar reduction (Bos-Coster).
    BosCoster,
}

/// `sum_i scalars[i] * bases[i]` under the given policy.
///
/// Empty input yields the identity.
pub fn multiexp<G: CurveGroup>(
    scalars: &[Fp<G::ScalarFieldParams>],
    bases: &[G],
    policy: MultiexpPolicy,
) -> Result<G, AlgebraError> {
    if scalars.len() != bases.len() {
        return Err(AlgebraError::LengthMismatch {
            scalars: scalars.len(),
            bases: bases.len(),
        });
    }
    Ok(match policy {
        MultiexpPolicy::NaivePlain => naive_plain(scalars, bases),
        MultiexpPolicy::Bdlo12 => pippenger(scalars, bases),
        MultiexpPolicy::BosCoster => bos_coster(scalars, bases),
    })
}

/// Chunk-and-combine parallel driver: splits the pairs into disjoint chunks,
/// evaluates each with the given policy on the rayon pool, and sums the
/// partial results. Combination is explicit here, never hidden inside a
/// policy.
pub fn multiexp_chunked<G: CurveGroup>(
    scalars: &[Fp<G::ScalarFieldParams>],
    bases: &[G],
    policy: MultiexpPolicy,
    chunk_size: usize,
) -> Result<G, AlgebraError> {
    if scalars.len() != bases.len() {
        return Err(AlgebraError::LengthMismatch {
            scalars: scalars.len(),
            bases: bases.len(),
        });
    }
    if scalars.is_empty() {
        return Ok(G::zero());
    }
    let chunk = chunk_size.max(1);
    scalars
        .par_chunks(chunk)
        .zip(bases.par_chunks(chunk))
        .map(|(s, b)| multiexp(s, b, policy))
        .try_reduce(G::zero, |a, b| Ok(a.add_element(&b)))
}

fn naive_plain<G: CurveGroup>(scalars: &[Fp<G::ScalarFieldParams>], bases: &[G]) -> G {
    let mut accumulator = G::zero();
    for (scalar, base) in scalars.iter().zip(bases.iter()) {
        let reduced = scalar.from_montgomery_form();
        if reduced.is_zero_element() {
            continue;
        }
        accumulator = accumulator.add_element(&base.mul_limbs(&reduced.data));
    }
    accumulator
}
