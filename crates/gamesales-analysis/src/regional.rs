//! Sales split by market region
//!
//! Only the three major regions are compared; `other_sales` takes no part.

use std::{collections::BTreeMap, fmt};

use gamesales_data::record::{Column, Record};
use serde::Serialize;

use crate::ranking::{self, KeyedSales};

/// A market region with its own sales column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Region {
    #[serde(rename = "NA")]
    NorthAmerica,
    #[serde(rename = "EU")]
    Europe,
    #[serde(rename = "JP")]
    Japan,
}

impl Region {
    pub const ALL: [Self; 3] = [Self::NorthAmerica, Self::Europe, Self::Japan];

    #[must_use]
    pub const fn sales_column(self) -> Column {
        match self {
            Self::NorthAmerica => Column::NaSales,
            Self::Europe => Column::EuSales,
            Self::Japan => Column::JpSales,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NorthAmerica => "NA",
            Self::Europe => "EU",
            Self::Japan => "JP",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Top `top_n` platforms by sales in each region.
#[must_use]
pub fn top_platforms_by_region(
    records: &[Record],
    top_n: usize,
) -> BTreeMap<Region, Vec<KeyedSales>> {
    top_by_region(records, Column::Platform, top_n)
}

/// Top `top_n` genres by sales in each region.
#[must_use]
pub fn top_genres_by_region(records: &[Record], top_n: usize) -> BTreeMap<Region, Vec<KeyedSales>> {
    top_by_region(records, Column::Genre, top_n)
}

fn top_by_region(
    records: &[Record],
    key: Column,
    top_n: usize,
) -> BTreeMap<Region, Vec<KeyedSales>> {
    Region::ALL
        .into_iter()
        .map(|region| {
            let mut top = ranking::ranked(ranking::sum_by(records, key, region.sales_column()));
            top.truncate(top_n);
            (region, top)
        })
        .collect()
}

/// Percentage of each region's sales held by one platform or genre.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarketShare {
    pub key: String,
    pub shares: BTreeMap<Region, f64>,
}

impl MarketShare {
    /// Share in `region`, in percent.
    #[must_use]
    pub fn share(&self, region: Region) -> f64 {
        self.shares.get(&region).copied().unwrap_or(0.0)
    }
}

/// Market shares of the top `top_n` platforms of every region.
///
/// A platform appears if it is in the top `top_n` of any region. Regions
/// where it is not in the top `top_n` report a share of zero.
#[must_use]
pub fn market_share_platforms(records: &[Record], top_n: usize) -> Vec<MarketShare> {
    market_share(records, Column::Platform, top_n)
}

/// Market shares of the top `top_n` genres of every region.
///
/// # Examples
///
/// ```
/// use gamesales_analysis::regional::{Region, market_share_genres};
/// use gamesales_data::record::Record;
///
/// let release = |genre: &str, na, jp| Record {
///     genre: Some(genre.to_owned()),
///     na_sales: Some(na),
///     jp_sales: Some(jp),
///     ..Record::default()
/// };
/// let records = [release("Shooter", 3.0, 0.0), release("Role-Playing", 1.0, 2.0)];
/// let shares = market_share_genres(&records, 1);
/// assert_eq!(shares[0].key, "Shooter");
/// assert_eq!(shares[0].share(Region::NorthAmerica), 75.0);
/// assert_eq!(shares[1].share(Region::Japan), 100.0);
/// assert_eq!(shares[1].share(Region::NorthAmerica), 0.0);
/// ```
#[must_use]
pub fn market_share_genres(records: &[Record], top_n: usize) -> Vec<MarketShare> {
    market_share(records, Column::Genre, top_n)
}

/// Shares are ordered by North American share (largest first), ties by key.
/// A region without any sales reports zero shares.
fn market_share(records: &[Record], key: Column, top_n: usize) -> Vec<MarketShare> {
    let mut table = BTreeMap::<String, BTreeMap<Region, f64>>::new();
    for region in Region::ALL {
        let column = region.sales_column();
        let region_total = records.iter().filter_map(|r| r.number(column)).sum::<f64>();
        let top = ranking::ranked(ranking::sum_by(records, key, column));
        for entry in top.into_iter().take(top_n) {
            let share = if region_total > 0.0 {
                entry.sales / region_total * 100.0
            } else {
                0.0
            };
            table.entry(entry.key).or_default().insert(region, share);
        }
    }

    let mut shares = table
        .into_iter()
        .map(|(key, mut shares)| {
            for region in Region::ALL {
                shares.entry(region).or_insert(0.0);
            }
            MarketShare { key, shares }
        })
        .collect::<Vec<_>>();
    shares.sort_by(|a, b| {
        ranking::by_value_desc(
            (a.key.as_str(), a.share(Region::NorthAmerica)),
            (b.key.as_str(), b.share(Region::NorthAmerica)),
        )
    });
    shares
}

/// Regional sales of one age rating.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingSales {
    pub rating: String,
    pub total: BTreeMap<Region, f64>,
    /// Mean over releases with known regional sales; zero when there are none.
    pub mean: BTreeMap<Region, f64>,
}

/// Total and mean regional sales per rating, ordered by rating.
///
/// Releases without a rating are skipped.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn rating_sales_by_region(records: &[Record]) -> Vec<RatingSales> {
    let mut by_rating = BTreeMap::<&str, Vec<&Record>>::new();
    for record in records {
        if let Some(rating) = record.rating.as_deref() {
            by_rating.entry(rating).or_default().push(record);
        }
    }

    by_rating
        .into_iter()
        .map(|(rating, group)| {
            let mut total = BTreeMap::new();
            let mut mean = BTreeMap::new();
            for region in Region::ALL {
                let values = group
                    .iter()
                    .filter_map(|r| r.number(region.sales_column()))
                    .collect::<Vec<_>>();
                let sum = values.iter().sum::<f64>();
                total.insert(region, sum);
                mean.insert(
                    region,
                    if values.is_empty() {
                        0.0
                    } else {
                        sum / values.len() as f64
                    },
                );
            }
            RatingSales {
                rating: rating.to_owned(),
                total,
                mean,
            }
        })
        .collect()
}
