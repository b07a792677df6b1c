//! Derived views over cleaned video-game sales data
//!
//! Every view is a pure function of a record slice; none of them mutate the
//! dataset. Rankings are deterministic: equal values are ordered by key.
//!
//! - [`temporal`]: releases per year, lookback windows, relevant-period filter
//! - [`platform`]: totals, yearly pivot, lifecycles, growth trends, score correlation
//! - [`genre`]: distribution, sales summary, high/low tiers
//! - [`regional`]: per-region rankings, market shares, rating breakdown
//! - [`report`]: all of the above combined for the CLI
//!
//! # Examples
//!
//! ```
//! use gamesales_analysis::{genre::genre_distribution, platform::platform_total_sales};
//! use gamesales_data::record::Record;
//!
//! let release = |platform: &str, genre: &str, total| Record {
//!     platform: Some(platform.to_owned()),
//!     genre: Some(genre.to_owned()),
//!     total_sales: Some(total),
//!     ..Record::default()
//! };
//! let records = [
//!     release("PS4", "Shooter", 2.0),
//!     release("XOne", "Shooter", 1.0),
//!     release("PS4", "Sports", 0.5),
//! ];
//!
//! assert_eq!(platform_total_sales(&records)[0].key, "PS4");
//! assert_eq!(genre_distribution(&records)[0].genre, "Shooter");
//! ```

pub mod genre;
pub mod platform;
pub mod ranking;
pub mod regional;
pub mod report;
pub mod temporal;
