//! Frequency tables over discrete values.
//!
//! A [`FrequencyTable`] counts how often each distinct value occurs in a sample.
//! Values are kept in a `BTreeMap`, so iteration is in ascending value order and
//! does not depend on the order in which values were observed.
//!
//! # Most common value
//!
//! [`FrequencyTable::most_common`] selects the value with the highest count.
//! When several values share the highest count, the smallest one (by `Ord`)
//! wins. For strings this is the lexically smallest value.

use std::collections::BTreeMap;

/// Occurrence counts of distinct values in a sample.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable<T> {
    counts: BTreeMap<T, usize>,
    total: usize,
}

impl<T> Default for FrequencyTable<T> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
            total: 0,
        }
    }
}

impl<T> FrequencyTable<T>
where
    T: Ord,
{
    /// Builds a frequency table from a sample of values.
    ///
    /// # Examples
    ///
    /// ```
    /// use uxlens_stats::frequency::FrequencyTable;
    ///
    /// let table = FrequencyTable::new(["b", "a", "b"]);
    /// assert_eq!(table.total(), 3);
    /// assert_eq!(table.distinct(), 2);
    /// assert_eq!(table.count(&"b"), 2);
    /// ```
    #[must_use]
    pub fn new<I>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut table = Self::default();
        for value in values {
            table.insert(value);
        }
        table
    }

    /// Records one more occurrence of `value`.
    pub fn insert(&mut self, value: T) {
        *self.counts.entry(value).or_default() += 1;
        self.total += 1;
    }

    /// Number of occurrences of `value`.
    #[must_use]
    pub fn count(&self, value: &T) -> usize {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Returns the most frequent value and its count.
    ///
    /// Ties are broken in favor of the smallest value.
    /// Returns `None` for an empty table.
    ///
    /// # Examples
    ///
    /// ```
    /// use uxlens_stats::frequency::FrequencyTable;
    ///
    /// let table = FrequencyTable::new(["light", "dark", "dark", "light"]);
    /// assert_eq!(table.most_common(), Some((&"dark", 2)));
    /// ```
    #[must_use]
    pub fn most_common(&self) -> Option<(&T, usize)> {
        // Ascending iteration + strict comparison keeps the smallest value on ties.
        let mut best: Option<(&T, usize)> = None;
        for (value, &count) in &self.counts {
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((value, count));
            }
        }
        best
    }
}

impl<T> FrequencyTable<T> {
    /// Total number of observed values.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct values.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterates over `(value, count)` pairs in ascending value order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> {
        self.counts.iter().map(|(value, &count)| (value, count))
    }

    /// Iterates over the relative frequency of each distinct value.
    #[expect(clippy::cast_precision_loss)]
    pub fn probabilities(&self) -> impl Iterator<Item = f64> + '_ {
        let total = self.total as f64;
        self.counts.values().map(move |&count| count as f64 / total)
    }

    /// Share of the sample held by the most frequent value.
    ///
    /// Always in `(0, 1]` for a non-empty table; `None` when empty.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn coverage(&self) -> Option<f64> {
        let max = self.counts.values().copied().max()?;
        Some(max as f64 / self.total as f64)
    }
}

impl<T> FromIterator<T> for FrequencyTable<T>
where
    T: Ord,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}
