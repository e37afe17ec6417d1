//! Pippenger bucket-window multiexp.

use crate::fields::Fp;
use crate::groups::CurveGroup;
use crate::numeric::{U256Ext, U256};

/// Default bucket window width for `n` pairs:
/// `floor(log2 n) - (floor(log2 n)/3 - 2)`, clamped to at least 1.
///
/// An empirical tunable, not an invariant; callers with better knowledge of
/// their point counts use [`pippenger_with_window_size`] directly.
pub fn window_size(num_pairs: usize) -> usize {
    if num_pairs < 2 {
        return 1;
    }
    let log2n = (usize::BITS - 1 - num_pairs.leading_zeros()) as i64;
    let c = log2n - (log2n / 3 - 2);
    c.max(1) as usize
}

/// Bucketed-window multiexp with the default window width.
pub fn pippenger<G: CurveGroup>(scalars: &[Fp<G::ScalarFieldParams>], bases: &[G]) -> G {
    pippenger_with_window_size(scalars, bases, window_size(scalars.len()))
}

/// Bucketed-window multiexp with an explicit window width `c`.
///
/// Bases are normalized to affine once up front so every bucket accumulation
/// is a mixed addition. Windows are processed most-significant first: bucket
/// the nonzero `c`-bit digits, combine buckets `2^c - 1` down to `1` through
/// a running sum, fold into the accumulator, then double the accumulator `c`
/// times before the next window.
pub fn pippenger_with_window_size<G: CurveGroup>(
    scalars: &[Fp<G::ScalarFieldParams>],
    bases: &[G],
    c: usize,
) -> G {
    if scalars.is_empty() {
        return G::zero();
    }
    let c = c.clamp(1, 31);

    let affine_bases = G::batch_to_affine(bases);
    let reduced: Vec<U256> = scalars
        .iter()
        .map(|s| U256::from_words(s.from_montgomery_form().data))
        .collect();

    // Highest bit actually present across the scalars.
    let max_bits = reduced
        .iter()
        .map(|s| s.bits_vartime() as usize)
        .max()
        .unwrap_or(0);
    if max_bits == 0 {
        return G::zero();
    }
    let num_windows = max_bits.div_ceil(c);

    let mut result = G::zero();
    for w in (0..num_windows).rev() {
        for _ in 0..c {
            result = result.doubled();
        }

        let start = (w * c) as u32;
        let end = ((w + 1) * c).min(256) as u32;

        let mut buckets = vec![G::zero(); (1usize << c) - 1];
        for (scalar, base) in reduced.iter().zip(affine_bases.iter()) {
            let digit = scalar.slice(start, end) as usize;
            if digit != 0 {
                buckets[digit - 1] = buckets[digit - 1].mixed_add(base);
            }
        }

        // running_sum visits buckets high-to-low, so bucket k is added k
        // times overall.
        let mut running_sum = G::zero();
        let mut window_sum = G::zero();
        for bucket in buckets.iter().rev() {
            running_sum = running_sum.add_element(bucket);
            window_sum = window_sum.add_element(&running_sum);
        }
        result = result.add_element(&window_sum);
    }
    result
}
