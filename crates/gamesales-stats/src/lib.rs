//! Statistical helpers shared by the cleaning, imputation and analysis crates.
//!
//! This crate provides a small set of dependency-free statistical tools:
//!
//! - **Descriptive statistics**: count, mean, median, sample standard deviation, quartiles
//! - **Percentiles**: linear-interpolated quantiles over sorted data
//! - **Mode**: most frequent value with a deterministic tie-break
//! - **Correlation**: Pearson correlation coefficient between paired samples
//!
//! # Modules
//!
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Quantile computation
//! - [`mode`]: Most-frequent-value computation
//! - [`correlation`]: Pearson correlation
//!
//! # Examples
//!
//! ## Computing a median
//!
//! ```
//! use gamesales_stats::descriptive::median;
//!
//! assert_eq!(median([4.0, 1.0, 3.0, 2.0]), Some(2.5));
//! assert_eq!(median([]), None);
//! ```
//!
//! ## Computing a mode
//!
//! ```
//! use gamesales_stats::mode::mode;
//!
//! // "E" and "M" are tied; the smallest value wins.
//! assert_eq!(mode(["M", "E", "M", "E", "T"]), Some("E"));
//! ```
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use gamesales_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! assert_eq!(stats.median, 3.0);
//! ```

pub mod correlation;
pub mod descriptive;
pub mod mode;
pub mod percentiles;
