//! Genre popularity and sales tiers

use std::collections::BTreeMap;

use gamesales_data::record::Record;
use gamesales_stats::{descriptive::median, percentiles::Percentiles};
use serde::Serialize;

use crate::ranking;

/// Number of releases in one genre.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: usize,
}

/// Releases per genre, most common first.
#[must_use]
pub fn genre_distribution(records: &[Record]) -> Vec<GenreCount> {
    let mut counts = BTreeMap::<&str, usize>::new();
    for genre in records.iter().filter_map(|r| r.genre.as_deref()) {
        *counts.entry(genre).or_insert(0) += 1;
    }
    let mut counts = counts.into_iter().collect::<Vec<_>>();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    counts
        .into_iter()
        .map(|(genre, count)| GenreCount {
            genre: genre.to_owned(),
            count,
        })
        .collect()
}

/// Aggregated total sales of one genre.
///
/// `count` only includes releases with a known total. The averages are
/// `None` when it is zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenreSales {
    pub genre: String,
    pub sum: f64,
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub count: usize,
    pub avg_per_game: Option<f64>,
}

/// Sales summary per genre, highest total first.
///
/// # Examples
///
/// ```
/// use gamesales_analysis::genre::genre_sales_summary;
/// use gamesales_data::record::Record;
///
/// let release = |genre: &str, total| Record {
///     genre: Some(genre.to_owned()),
///     total_sales: Some(total),
///     ..Record::default()
/// };
/// let records = [release("Puzzle", 1.0), release("Shooter", 3.0), release("Shooter", 5.0)];
/// let summary = genre_sales_summary(&records);
/// assert_eq!(summary[0].genre, "Shooter");
/// assert_eq!(summary[0].sum, 8.0);
/// assert_eq!(summary[0].median, Some(4.0));
/// ```
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn genre_sales_summary(records: &[Record]) -> Vec<GenreSales> {
    let mut totals = BTreeMap::<&str, Vec<f64>>::new();
    for record in records {
        if let Some(genre) = record.genre.as_deref() {
            let sales = totals.entry(genre).or_default();
            sales.extend(record.total_sales);
        }
    }

    let mut summary = totals
        .into_iter()
        .map(|(genre, sales)| {
            let sum = sales.iter().sum::<f64>();
            let count = sales.len();
            let mean = (count > 0).then(|| sum / count as f64);
            GenreSales {
                genre: genre.to_owned(),
                sum,
                mean,
                median: median(sales),
                count,
                avg_per_game: mean,
            }
        })
        .collect::<Vec<_>>();
    summary.sort_by(|a, b| {
        ranking::by_value_desc((a.genre.as_str(), a.sum), (b.genre.as_str(), b.sum))
    });
    summary
}

/// Genres at the top and bottom of the per-game sales distribution.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GenreTiers {
    /// Genres whose average sales per game reach the upper quartile.
    pub high_sales: Vec<String>,
    /// Genres whose average sales per game are at or below the lower quartile.
    pub low_sales: Vec<String>,
}

/// Splits genres into high and low sellers by average sales per game.
///
/// Quartiles are linearly interpolated over the genres' averages. Both tiers
/// list genres in [`genre_sales_summary`] order.
#[must_use]
pub fn classify_genres(records: &[Record]) -> GenreTiers {
    let summary = genre_sales_summary(records);
    let averages = summary
        .iter()
        .filter_map(|g| g.avg_per_game)
        .collect::<Vec<_>>();
    let quartiles = Percentiles::new(&averages, &[0.25, 0.75]);
    let (Some(q25), Some(q75)) = (quartiles.get(0.25), quartiles.get(0.75)) else {
        return GenreTiers::default();
    };

    let select = |keep: &dyn Fn(f64) -> bool| {
        summary
            .iter()
            .filter(|g| g.avg_per_game.is_some_and(keep))
            .map(|g| g.genre.clone())
            .collect::<Vec<_>>()
    };
    GenreTiers {
        high_sales: select(&|avg| avg >= q75),
        low_sales: select(&|avg| avg <= q25),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(genre: Option<&str>, total: Option<f64>) -> Record {
        Record {
            genre: genre.map(str::to_owned),
            total_sales: total,
            ..Record::default()
        }
    }

    fn records() -> Vec<Record> {
        vec![
            release(Some("Action"), Some(1.0)),
            release(Some("Action"), Some(1.0)),
            release(Some("Action"), Some(1.0)),
            release(Some("Shooter"), Some(6.0)),
            release(Some("Shooter"), Some(2.0)),
            release(Some("Puzzle"), Some(0.2)),
            release(Some("Sports"), Some(2.0)),
            release(Some("Sports"), None),
            release(None, Some(50.0)),
        ]
    }

    #[test]
    fn distribution_counts_all_releases() {
        let counts = genre_distribution(&records());
        let pairs = counts
            .iter()
            .map(|c| (c.genre.as_str(), c.count))
            .collect::<Vec<_>>();
        assert_eq!(
            pairs,
            [("Action", 3), ("Shooter", 2), ("Sports", 2), ("Puzzle", 1)]
        );
    }

    #[test]
    fn summary_skips_null_totals() {
        let summary = genre_sales_summary(&records());
        let genres = summary.iter().map(|g| g.genre.as_str()).collect::<Vec<_>>();
        assert_eq!(genres, ["Shooter", "Action", "Sports", "Puzzle"]);

        let sports = &summary[2];
        assert_eq!(sports.count, 1);
        assert_eq!(sports.sum, 2.0);
        assert_eq!(sports.avg_per_game, Some(2.0));

        let shooter = &summary[0];
        assert_eq!(shooter.mean, Some(4.0));
        assert_eq!(shooter.median, Some(4.0));
    }

    #[test]
    fn genre_without_totals_has_no_averages() {
        let summary = genre_sales_summary(&[release(Some("Music"), None)]);
        assert_eq!(summary[0].count, 0);
        assert_eq!(summary[0].mean, None);
        assert_eq!(summary[0].median, None);
    }

    #[test]
    fn classifies_by_quartiles() {
        // averages: Shooter 4.0, Action 1.0, Sports 2.0, Puzzle 0.2
        // sorted [0.2, 1.0, 2.0, 4.0]: q25 = 0.8, q75 = 2.5
        let tiers = classify_genres(&records());
        assert_eq!(tiers.high_sales, ["Shooter"]);
        assert_eq!(tiers.low_sales, ["Puzzle"]);
    }

    #[test]
    fn single_genre_is_both_high_and_low() {
        let tiers = classify_genres(&[release(Some("Racing"), Some(1.0))]);
        assert_eq!(tiers.high_sales, ["Racing"]);
        assert_eq!(tiers.low_sales, ["Racing"]);
        assert_eq!(classify_genres(&[]), GenreTiers::default());
    }
}
