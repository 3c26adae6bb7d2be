//! Shannon entropy of a frequency table and the encoder's buffer size estimate.

/// `H = -Σ p·log2(p)` in bits per symbol. Zero frequencies contribute nothing.
pub fn entropy(frequencies: impl IntoIterator<Item = u64> + Clone) -> f64 {
    let total: f64 = frequencies.clone().into_iter().map(|f| f as f64).sum();
    if total <= 0.0 {
        return 0.0;
    }
    frequencies
        .into_iter()
        .filter(|&f| f > 0)
        .map(|f| {
            let p = f as f64 / total;
            -p * libm::log2(p)
        })
        .sum()
}

/// Byte count that should hold `num_symbols` symbols encoded at `entropy`
/// bits per symbol: `ceil((H·N + 8) / 8) * 2`.
///
/// This is a heuristic. Skewed tables can have codes well above the entropy,
/// so writers must still grow past it.
pub fn estimate_buffer_size(entropy: f64, num_symbols: usize) -> usize {
    let bits = entropy * num_symbols as f64 + 8.0;
    (libm::ceil(bits / 8.0) as usize).saturating_mul(2)
}
