//! Bos-Coster heap-driven multiexp.
//!
//! Repeatedly rewrites the two largest remaining terms `x*A + y*B` (with
//! `x >= y`) as `(x - y)*A + y*(A + B)`, falling back to a direct windowed
//! multiplication when the scalar gap makes the rewrite a bad trade.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::fields::Fp;
use crate::groups::CurveGroup;
use crate::numeric::{U256Ext, U256};

/// Heap entry ordered by remaining scalar magnitude.
#[derive(Clone, Copy, PartialEq, Eq)]
struct Term {
    scalar: U256,
    index: usize,
}

impl Ord for Term {
    fn cmp(&self, other: &Self) -> Ordering {
        self.scalar
            .cmp(&other.scalar)
            .then_with(|| self.index.cmp(&other.index))
    }
}

impl PartialOrd for Term {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// When the bit-length gap between the two largest scalars exceeds this,
/// stop widening the direct-multiplication check.
const GAP_LIMIT: u32 = 20;

pub fn bos_coster<G: CurveGroup>(scalars: &[Fp<G::ScalarFieldParams>], bases: &[G]) -> G {
    if scalars.is_empty() {
        return G::zero();
    }

    let mut points: Vec<G> = bases.to_vec();
    let mut heap: BinaryHeap<Term> = scalars
        .iter()
        .enumerate()
        .map(|(index, s)| Term {
            scalar: U256::from_words(s.from_montgomery_form().data),
            index,
        })
        .collect();

    // Pad to an odd number of terms so the heap never empties mid-reduction:
    // every round pops two and pushes two, and the zero term ends the run.
    if heap.len() % 2 == 0 {
        points.push(G::zero());
        heap.push(Term {
            scalar: U256::ZERO,
            index: points.len() - 1,
        });
    }

    let mut partial = G::zero();
    loop {
        let Some(largest) = heap.pop() else {
            return partial;
        };
        let Some(second) = heap.pop() else {
            // Single remaining term.
            return partial.add_element(
                &points[largest.index].windowed_mul_limbs(&largest.scalar.to_words()),
            );
        };

        // All other scalars are zero: finish with one windowed multiply.
        if second.scalar == U256::ZERO {
            return partial.add_element(
                &points[largest.index].windowed_mul_limbs(&largest.scalar.to_words()),
            );
        }

        let a_bits = largest.scalar.get_msb() + 1;
        let b_bits = second.scalar.get_msb() + 1;
        let limit = (a_bits - b_bits).min(GAP_LIMIT);

        if limit != 0 && (b_bits as u64) < (1u64 << limit) {
            // The gap is wide enough that reducing `largest` against
            // `second` would take ~2^limit rounds; a direct multiply is
            // cheaper. Fold it into the partial result and retire the term.
            partial = partial.add_element(
                &points[largest.index].windowed_mul_limbs(&largest.scalar.to_words()),
            );
            heap.push(Term {
                scalar: U256::ZERO,
                index: largest.index,
            });
            heap.push(second);
            continue;
        }

        // x*A + y*B -> (x - y)*A + y*(A + B)
        let reduced = largest.scalar.wrapping_sub(&second.scalar);
        points[second.index] =
            points[second.index].add_element(&points[largest.index]);
        heap.push(Term {
            scalar: reduced,
            index: largest.index,
        });
        heap.push(second);
    }
}
