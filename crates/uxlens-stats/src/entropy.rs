//! Shannon entropy of discrete distributions.
//!
//! For a sample with relative frequencies `p(v)`, the Shannon entropy is
//!
//! ```text
//! H = -Σ p(v) · log2(p(v))
//! ```
//!
//! measured in bits. The maximum possible entropy for `c` distinct values is
//! `log2(c)`, reached when every value is equally frequent, so the normalized
//! entropy `H / log2(c)` lies in `[0, 1]`. With a single distinct value the
//! maximum is zero and the normalized entropy is defined as `0`.

use crate::frequency::FrequencyTable;

/// Entropy of a frequency table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entropy {
    /// Shannon entropy in bits.
    pub bits: f64,
    /// Entropy divided by `log2(distinct)`, or `0` when fewer than two values are distinct.
    pub normalized: f64,
}

impl Entropy {
    /// Computes the entropy of a frequency table.
    ///
    /// # Examples
    ///
    /// ```
    /// use uxlens_stats::{entropy::Entropy, frequency::FrequencyTable};
    ///
    /// let uniform = Entropy::from_table(&FrequencyTable::new(["a", "b", "c", "d"]));
    /// assert_eq!(uniform.bits, 2.0);
    /// assert_eq!(uniform.normalized, 1.0);
    ///
    /// let constant = Entropy::from_table(&FrequencyTable::new(["a", "a", "a"]));
    /// assert_eq!(constant.bits, 0.0);
    /// assert_eq!(constant.normalized, 0.0);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn from_table<T>(table: &FrequencyTable<T>) -> Self {
        let bits = shannon_entropy(table.probabilities());
        let distinct = table.distinct();
        let normalized = if distinct > 1 {
            // Rounding can push H slightly above log2(c) for uniform samples.
            (bits / (distinct as f64).log2()).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Self { bits, normalized }
    }
}

/// Shannon entropy in bits of a sequence of probabilities.
///
/// Zero probabilities contribute nothing.
#[must_use]
pub fn shannon_entropy<I>(probabilities: I) -> f64
where
    I: IntoIterator<Item = f64>,
{
    let sum = probabilities
        .into_iter()
        .filter(|&p| p > 0.0)
        .map(|p| p * p.log2())
        .sum::<f64>();
    // Avoid reporting -0.0 for single-valued samples.
    if sum == 0.0 { 0.0 } else { -sum }
}
