//! Statistical building blocks for the uxlens pattern detectors.
//!
//! This crate provides the small set of measures the detectors are built on:
//!
//! - **Frequency tables**: Count occurrences of discrete values and select the most common one
//! - **Entropy**: Shannon entropy and normalized entropy of a frequency table
//! - **Descriptive statistics**: Summarize continuous samples (min, max, mean, median, etc.)
//!
//! # Modules
//!
//! - [`frequency`]: Frequency tables with a deterministic "most common" rule
//! - [`entropy`]: Shannon entropy in bits, scaled to `[0, 1]`
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//!
//! # Examples
//!
//! ## Finding the dominant value
//!
//! ```
//! use uxlens_stats::frequency::FrequencyTable;
//!
//! let table = FrequencyTable::new(["a", "b", "a", "c", "a"]);
//! assert_eq!(table.most_common(), Some((&"a", 3)));
//! assert_eq!(table.coverage(), Some(0.6));
//! ```
//!
//! ## Measuring value variety
//!
//! ```
//! use uxlens_stats::{entropy::Entropy, frequency::FrequencyTable};
//!
//! let table = FrequencyTable::new(["x", "y"]);
//! let entropy = Entropy::from_table(&table);
//! assert_eq!(entropy.bits, 1.0);
//! assert_eq!(entropy.normalized, 1.0);
//! ```
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use uxlens_stats::descriptive::DescriptiveStats;
//!
//! let values = [1.0, 2.0, 3.0, 4.0, 5.0];
//! let stats = DescriptiveStats::new(values).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```

pub mod descriptive;
pub mod entropy;
pub mod frequency;
