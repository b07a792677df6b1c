//! Cleaning and hierarchical imputation of video-game sales records
//!
//! This crate turns a raw sales table into an analysis-ready dataset.
//!
//! # Overview
//!
//! Cleaning runs as a fixed sequence of stages. Each stage consumes one
//! [`record::Dataset`] and returns a new one:
//!
//! 1. **Schema normalization** ([`schema::normalize`]): lower-case headers, typed
//!    cells, malformed values coerced to null
//! 2. **Year resolution** ([`year::resolve_years`]): recover missing release years
//!    from titles and from the same game on other platforms
//! 3. **Row filtering** ([`filter::drop_incomplete`]): drop records without
//!    name, genre or year
//! 4. **Sales aggregation** ([`sales::add_total_sales`]): derive total sales
//! 5. **Deduplication** ([`dedup::drop_duplicates`]): keep the best-selling
//!    record per (name, platform, genre, year)
//!
//! [`pipeline::clean`] runs all five. Imputation ([`impute`]) is applied
//! afterwards, once per target field.
//!
//! # Examples
//!
//! ```
//! use gamesales_data::{
//!     impute::{ImputeConfig, impute_dataset},
//!     pipeline::clean,
//!     table::RawTable,
//! };
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//!
//! let raw = RawTable::from_csv_reader(
//!     "Name,Platform,Year_of_Release,Genre,NA_Sales,Critic_Score,User_Score,Rating\n\
//!      Tetris,GB,1989,Puzzle,23.2,,tbd,E\n\
//!      Tetris,NES,,Puzzle,2.97,90,8.1,\n"
//!         .as_bytes(),
//! )?;
//!
//! let cleaned = clean(raw)?;
//! let config = ImputeConfig {
//!     min_samples: 1,
//!     ..ImputeConfig::default()
//! };
//! let (imputed, report) = impute_dataset(cleaned, &config)?;
//!
//! assert!(imputed.records().iter().all(|r| r.year_of_release == Some(1989)));
//! assert!(imputed.records().iter().all(|r| r.critic_score == Some(90.0)));
//! assert!(imputed.records().iter().all(|r| r.rating.as_deref() == Some("E")));
//! println!("{report:?}");
//! # Ok(())
//! # }
//! ```

pub mod dedup;
pub mod filter;
pub mod impute;
pub mod pipeline;
pub mod record;
pub mod sales;
pub mod schema;
pub mod table;
pub mod year;
