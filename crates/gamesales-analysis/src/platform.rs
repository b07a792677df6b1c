//! Platform sales, lifecycles and growth trends
//!
//! Most views start from [`platform_yearly_sales`], a platform × year pivot of
//! total sales. A platform is *active* in a year when it sold more than zero
//! units that year.

use std::{
    collections::{BTreeMap, BTreeSet},
    fmt,
};

use gamesales_data::record::{Column, Record};
use gamesales_stats::{correlation::pearson, descriptive::DescriptiveStats};
use serde::Serialize;

use crate::ranking::{self, KeyedSales};

/// Relative change (in percent) above which a platform counts as growing.
pub const TREND_THRESHOLD_PERCENT: f64 = 20.0;

/// Minimum complete rows before a score/sales correlation is reported.
pub const MIN_CORRELATION_ROWS: usize = 10;

/// Total sales per platform, largest first.
#[must_use]
pub fn platform_total_sales(records: &[Record]) -> Vec<KeyedSales> {
    ranking::ranked(ranking::sum_by(records, Column::Platform, Column::TotalSales))
}

/// Sales per platform and year.
///
/// Every platform row spans the same set of years; years a platform did not
/// sell in hold `0.0`.
pub type YearlySales = BTreeMap<String, BTreeMap<i32, f64>>;

/// Builds the platform × year sales pivot.
///
/// With `platforms`, only those platforms are included. Records lacking a
/// platform or a year are skipped.
///
/// # Examples
///
/// ```
/// use gamesales_analysis::platform::platform_yearly_sales;
/// use gamesales_data::record::Record;
///
/// let release = |platform: &str, year, total| Record {
///     platform: Some(platform.to_owned()),
///     year_of_release: Some(year),
///     total_sales: Some(total),
///     ..Record::default()
/// };
/// let records = [release("PS4", 2014, 1.0), release("PS4", 2014, 0.5), release("PC", 2015, 2.0)];
/// let yearly = platform_yearly_sales(&records, None);
/// assert_eq!(yearly["PS4"][&2014], 1.5);
/// assert_eq!(yearly["PS4"][&2015], 0.0);
/// ```
#[must_use]
pub fn platform_yearly_sales(records: &[Record], platforms: Option<&[&str]>) -> YearlySales {
    let selected = records.iter().filter(|r| {
        platforms.is_none_or(|wanted| r.platform.as_deref().is_some_and(|p| wanted.contains(&p)))
    });

    let mut yearly = YearlySales::new();
    let mut years = BTreeSet::new();
    for record in selected {
        let (Some(platform), Some(year)) = (record.platform.as_deref(), record.year_of_release)
        else {
            continue;
        };
        years.insert(year);
        *yearly
            .entry(platform.to_owned())
            .or_default()
            .entry(year)
            .or_insert(0.0) += record.total_sales.unwrap_or(0.0);
    }
    for sales in yearly.values_mut() {
        for year in &years {
            sales.entry(*year).or_insert(0.0);
        }
    }
    yearly
}

/// Lifetime summary of one platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformLifecycle {
    pub platform: String,
    pub first_year: i32,
    pub last_year: i32,
    pub peak_year: i32,
    pub peak_sales: f64,
    /// Years from the first to the last active year, inclusive.
    pub life_cycle: i32,
    pub total_sales: f64,
    /// Whether the platform still sold in the latest year of the pivot.
    pub is_active: bool,
}

/// Lifecycle metrics for every platform with at least one active year,
/// ordered by total sales (largest first).
///
/// The peak year is the earliest year with the highest sales.
#[must_use]
pub fn platform_lifecycle(yearly: &YearlySales) -> Vec<PlatformLifecycle> {
    let latest_year = yearly.values().flat_map(BTreeMap::keys).max().copied();

    let mut lifecycles = yearly
        .iter()
        .filter_map(|(platform, sales)| {
            let active = active_years(sales);
            let (first_year, _) = *active.first()?;
            let (last_year, _) = *active.last()?;
            let (peak_year, peak_sales) = active
                .iter()
                .copied()
                .reduce(|best, cur| if cur.1 > best.1 { cur } else { best })?;
            let is_active = latest_year
                .is_some_and(|latest| sales.range(latest..).any(|(_, s)| *s > 0.0));
            Some(PlatformLifecycle {
                platform: platform.clone(),
                first_year,
                last_year,
                peak_year,
                peak_sales,
                life_cycle: last_year - first_year + 1,
                total_sales: sales.values().sum(),
                is_active,
            })
        })
        .collect::<Vec<_>>();
    lifecycles.sort_by(|a, b| {
        ranking::by_value_desc(
            (a.platform.as_str(), a.total_sales),
            (b.platform.as_str(), b.total_sales),
        )
    });
    lifecycles
}

fn active_years(sales: &BTreeMap<i32, f64>) -> Vec<(i32, f64)> {
    sales
        .iter()
        .filter(|(_, s)| **s > 0.0)
        .map(|(y, s)| (*y, *s))
        .collect()
}

/// Direction of a platform's sales between its early and recent active years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Trend {
    #[serde(rename = "GROWTH")]
    Growth,
    #[serde(rename = "DECLINE")]
    Decline,
    #[serde(rename = "STABLE")]
    Stable,
    /// Too few active years to compare.
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Growth => "GROWTH",
            Self::Decline => "DECLINE",
            Self::Stable => "STABLE",
            Self::NotApplicable => "N/A",
        })
    }
}

impl Trend {
    /// Classifies a relative change given in percent.
    #[must_use]
    pub fn from_change_percent(change: f64) -> Self {
        if change > TREND_THRESHOLD_PERCENT {
            Self::Growth
        } else if change < -TREND_THRESHOLD_PERCENT {
            Self::Decline
        } else {
            Self::Stable
        }
    }
}

/// Growth figures for one platform.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlatformGrowth {
    pub platform: String,
    pub total_sales: f64,
    /// Percent change from the first to the last active year.
    pub growth_rate: f64,
    pub trend: Trend,
    pub last_year_sales: f64,
}

/// Growth rate and trend of every platform with at least two active years.
///
/// The trend compares the mean of the first two active years with the mean
/// of the last two and needs at least four active years; with fewer it is
/// [`Trend::NotApplicable`]. Output is ordered by total sales, largest first.
///
/// # Examples
///
/// ```
/// use gamesales_analysis::platform::{Trend, platform_growth_analysis};
/// use gamesales_data::record::Record;
///
/// let release = |year, total| Record {
///     platform: Some("DS".to_owned()),
///     year_of_release: Some(year),
///     total_sales: Some(total),
///     ..Record::default()
/// };
/// let records = [release(2005, 4.0), release(2006, 4.0), release(2007, 2.0), release(2008, 1.0)];
/// let growth = platform_growth_analysis(&records);
/// assert_eq!(growth[0].trend, Trend::Decline);
/// assert_eq!(growth[0].growth_rate, -75.0);
/// ```
#[must_use]
pub fn platform_growth_analysis(records: &[Record]) -> Vec<PlatformGrowth> {
    let yearly = platform_yearly_sales(records, None);
    platform_total_sales(records)
        .into_iter()
        .filter_map(|KeyedSales { key, sales }| {
            let active = active_years(yearly.get(&key)?);
            if active.len() < 2 {
                return None;
            }
            let (_, first_sales) = active[0];
            let (_, last_sales) = active[active.len() - 1];
            let trend = if active.len() >= 4 {
                let early = f64::midpoint(active[0].1, active[1].1);
                let recent = f64::midpoint(active[active.len() - 2].1, last_sales);
                Trend::from_change_percent(percent_change(early, recent))
            } else {
                Trend::NotApplicable
            };
            Some(PlatformGrowth {
                platform: key,
                total_sales: sales,
                growth_rate: percent_change(first_sales, last_sales),
                trend,
                last_year_sales: last_sales,
            })
        })
        .collect()
}

/// Percent change from `from` to `to`; zero when `from` is not positive.
fn percent_change(from: f64, to: f64) -> f64 {
    if from > 0.0 {
        (to - from) / from * 100.0
    } else {
        0.0
    }
}

/// Distribution summary of per-release total sales.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesStats {
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
}

impl From<DescriptiveStats> for SalesStats {
    fn from(stats: DescriptiveStats) -> Self {
        Self {
            count: stats.count,
            mean: stats.mean,
            std: stats.std_dev,
            min: stats.min,
            q1: stats.q1,
            median: stats.median,
            q3: stats.q3,
            max: stats.max,
        }
    }
}

/// Descriptive statistics of per-release total sales for each platform.
///
/// Null totals are ignored; platforms with no totals at all are omitted.
#[must_use]
pub fn platform_sales_stats(
    records: &[Record],
    platforms: Option<&[&str]>,
) -> BTreeMap<String, SalesStats> {
    let mut by_platform = BTreeMap::<&str, Vec<f64>>::new();
    for record in records {
        let (Some(platform), Some(total)) = (record.platform.as_deref(), record.total_sales) else {
            continue;
        };
        if platforms.is_none_or(|wanted| wanted.contains(&platform)) {
            by_platform.entry(platform).or_default().push(total);
        }
    }
    by_platform
        .into_iter()
        .filter_map(|(platform, sales)| {
            Some((platform.to_owned(), DescriptiveStats::new(sales)?.into()))
        })
        .collect()
}

/// Pearson correlations between review scores and total sales.
///
/// `None` means the correlation is undefined for the data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreCorrelation {
    pub critic_score: Option<f64>,
    pub user_score: Option<f64>,
}

/// Correlates critic and user scores with total sales on one platform.
///
/// Critic scores are rescaled to the user-score range (divided by 10) when
/// any exceeds 10. Only records with both scores and a total take part, and
/// fewer than [`MIN_CORRELATION_ROWS`] of them yield undefined correlations.
#[must_use]
pub fn score_sales_correlation(records: &[Record], platform: &str) -> ScoreCorrelation {
    let on_platform = records
        .iter()
        .filter(|r| r.platform.as_deref() == Some(platform))
        .collect::<Vec<_>>();
    let critic_scale = if on_platform
        .iter()
        .filter_map(|r| r.critic_score)
        .any(|c| c > 10.0)
    {
        10.0
    } else {
        1.0
    };

    let complete = on_platform
        .iter()
        .filter_map(|r| Some((r.critic_score? / critic_scale, r.user_score?, r.total_sales?)))
        .collect::<Vec<_>>();
    if complete.len() < MIN_CORRELATION_ROWS {
        return ScoreCorrelation {
            critic_score: None,
            user_score: None,
        };
    }

    let critic = complete.iter().map(|c| c.0).collect::<Vec<_>>();
    let user = complete.iter().map(|c| c.1).collect::<Vec<_>>();
    let sales = complete.iter().map(|c| c.2).collect::<Vec<_>>();
    ScoreCorrelation {
        critic_score: pearson(&critic, &sales),
        user_score: pearson(&user, &sales),
    }
}

/// One platform release of a multi-platform game.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiplatformRelease {
    pub game: String,
    pub platform: Option<String>,
    pub sales: Option<f64>,
}

/// Releases of games available on at least `min_platforms` distinct platforms.
///
/// Qualifying titles are taken in alphabetical order, at most `max_games` of
/// them. Each title's releases appear in dataset order.
#[must_use]
pub fn multiplatform_analysis(
    records: &[Record],
    min_platforms: usize,
    max_games: usize,
) -> Vec<MultiplatformRelease> {
    let mut platforms_by_game = BTreeMap::<&str, BTreeSet<&str>>::new();
    for record in records {
        if let Some(name) = record.name.as_deref() {
            let platforms = platforms_by_game.entry(name).or_default();
            platforms.extend(record.platform.as_deref());
        }
    }
    let games = platforms_by_game
        .into_iter()
        .filter(|(_, platforms)| platforms.len() >= min_platforms)
        .map(|(game, _)| game)
        .take(max_games);

    games
        .flat_map(move |game| {
            records
                .iter()
                .filter(move |r| r.name.as_deref() == Some(game))
                .map(move |r| MultiplatformRelease {
                    game: game.to_owned(),
                    platform: r.platform.clone(),
                    sales: r.total_sales,
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn release(name: &str, platform: &str, year: i32, total: f64) -> Record {
        Record {
            name: Some(name.to_owned()),
            platform: Some(platform.to_owned()),
            year_of_release: Some(year),
            total_sales: Some(total),
            ..Record::default()
        }
    }

    fn records() -> Vec<Record> {
        vec![
            release("A", "PS3", 2010, 5.0),
            release("B", "PS3", 2011, 3.0),
            release("C", "PS3", 2012, 2.0),
            release("D", "PS3", 2013, 1.0),
            release("A", "PS4", 2013, 1.0),
            release("E", "PS4", 2014, 2.0),
            release("F", "PS4", 2015, 4.0),
            release("G", "PS4", 2016, 6.0),
            release("A", "Wii", 2010, 0.5),
        ]
    }

    #[test]
    fn totals_are_ranked() {
        let totals = platform_total_sales(&records());
        let keys = totals.iter().map(|e| e.key.as_str()).collect::<Vec<_>>();
        assert_eq!(keys, ["PS4", "PS3", "Wii"]);
        assert_eq!(totals[0].sales, 13.0);
    }

    #[test]
    fn yearly_pivot_is_rectangular() {
        let yearly = platform_yearly_sales(&records(), Some(&["Wii", "PS3"]));
        assert_eq!(yearly.len(), 2);
        assert!(yearly.values().all(|row| row.len() == 4));
        assert_eq!(yearly["Wii"][&2013], 0.0);
    }

    #[test]
    fn lifecycle_metrics() {
        let lifecycles = platform_lifecycle(&platform_yearly_sales(&records(), None));
        let ps3 = lifecycles.iter().find(|l| l.platform == "PS3").unwrap();
        assert_eq!((ps3.first_year, ps3.last_year), (2010, 2013));
        assert_eq!((ps3.peak_year, ps3.peak_sales), (2010, 5.0));
        assert_eq!(ps3.life_cycle, 4);
        assert!(!ps3.is_active);

        let ps4 = &lifecycles[0];
        assert_eq!(ps4.platform, "PS4");
        assert!(ps4.is_active);
        assert_eq!(ps4.life_cycle, 4);
    }

    #[test]
    fn growth_trends() {
        let growth = platform_growth_analysis(&records());
        // Wii has a single active year and is skipped
        assert_eq!(growth.len(), 2);
        let ps4 = &growth[0];
        assert_eq!(ps4.trend, Trend::Growth);
        assert_eq!(ps4.growth_rate, 500.0);
        assert_eq!(ps4.last_year_sales, 6.0);
        let ps3 = &growth[1];
        assert_eq!(ps3.trend, Trend::Decline);
    }

    #[test]
    fn three_active_years_have_no_trend() {
        let records = [
            release("A", "GC", 2002, 1.0),
            release("B", "GC", 2003, 1.0),
            release("C", "GC", 2004, 1.1),
        ];
        let growth = platform_growth_analysis(&records);
        assert_eq!(growth[0].trend, Trend::NotApplicable);
        assert!((growth[0].growth_rate - 10.0).abs() < 1e-9);
    }

    #[test]
    fn trend_thresholds_are_exclusive() {
        assert_eq!(Trend::from_change_percent(20.0), Trend::Stable);
        assert_eq!(Trend::from_change_percent(20.1), Trend::Growth);
        assert_eq!(Trend::from_change_percent(-20.1), Trend::Decline);
        assert_eq!(
            serde_json::to_string(&Trend::NotApplicable).unwrap(),
            r#""N/A""#
        );
    }

    #[test]
    fn sales_stats_per_platform() {
        let stats = platform_sales_stats(&records(), Some(&["PS3"]));
        assert_eq!(stats.len(), 1);
        let ps3 = &stats["PS3"];
        assert_eq!(ps3.count, 4);
        assert_eq!(ps3.median, 2.5);
        assert_eq!(ps3.max, 5.0);
    }

    #[test]
    fn correlation_needs_enough_rows() {
        let scored = |critic: f64, user: f64, total: f64| Record {
            platform: Some("PS4".to_owned()),
            critic_score: Some(critic),
            user_score: Some(user),
            total_sales: Some(total),
            ..Record::default()
        };
        let mut records = (1..=9)
            .map(|i| {
                let i = f64::from(i);
                scored(i * 10.0, 10.0 - i, i)
            })
            .collect::<Vec<_>>();
        assert_eq!(
            score_sales_correlation(&records, "PS4"),
            ScoreCorrelation {
                critic_score: None,
                user_score: None
            }
        );

        records.push(scored(100.0, 0.0, 10.0));
        let corr = score_sales_correlation(&records, "PS4");
        assert!((corr.critic_score.unwrap() - 1.0).abs() < 1e-9);
        assert!((corr.user_score.unwrap() + 1.0).abs() < 1e-9);
        assert_eq!(score_sales_correlation(&records, "PC").critic_score, None);
    }

    #[test]
    fn multiplatform_titles_in_name_order() {
        let releases = multiplatform_analysis(&records(), 3, 10);
        assert_eq!(releases.len(), 3);
        assert!(releases.iter().all(|r| r.game == "A"));
        assert_eq!(releases[1].platform.as_deref(), Some("PS4"));
        assert!(multiplatform_analysis(&records(), 1, 0).is_empty());
    }
}
