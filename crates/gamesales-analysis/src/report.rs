//! Combined analysis report over a cleaned dataset

use std::collections::BTreeMap;

use gamesales_data::record::Dataset;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    genre::{self, GenreCount, GenreSales, GenreTiers},
    platform::{
        self, MultiplatformRelease, PlatformGrowth, PlatformLifecycle, SalesStats,
        ScoreCorrelation,
    },
    ranking::KeyedSales,
    regional::{self, MarketShare, RatingSales, Region},
    temporal::{self, LookbackWindow},
};

/// Settings for [`AnalysisReport::build`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// First year of the period the platform, genre and regional views cover.
    pub start_year: i32,
    /// Last year covered by the data, used to anchor lookback windows.
    pub current_year: i32,
    /// Candidate lookback window sizes, in years.
    pub lookback_years: Vec<i32>,
    /// Number of entries kept in top-N rankings.
    pub top_n: usize,
    /// Minimum distinct platforms for a multi-platform title.
    pub min_platforms: usize,
    /// Maximum number of multi-platform titles listed.
    pub max_games: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            start_year: 2013,
            current_year: 2016,
            lookback_years: vec![3, 4, 5, 6, 7, 8],
            top_n: 5,
            min_platforms: 4,
            max_games: 20,
        }
    }
}

/// Every analysis view, computed in one pass.
///
/// Temporal views cover the whole dataset; all others cover the relevant
/// period starting at [`AnalysisConfig::start_year`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub total_rows: usize,
    pub games_per_year: BTreeMap<i32, usize>,
    pub significant_years: BTreeMap<i32, usize>,
    pub lookback_windows: Vec<LookbackWindow>,
    pub start_year: i32,
    pub relevant_rows: usize,
    pub platform_total_sales: Vec<KeyedSales>,
    pub platform_lifecycle: Vec<PlatformLifecycle>,
    pub platform_growth: Vec<PlatformGrowth>,
    pub platform_sales_stats: BTreeMap<String, SalesStats>,
    pub score_sales_correlation: BTreeMap<String, ScoreCorrelation>,
    pub multiplatform: Vec<MultiplatformRelease>,
    pub genre_distribution: Vec<GenreCount>,
    pub genre_sales: Vec<GenreSales>,
    pub genre_tiers: GenreTiers,
    pub top_platforms_by_region: BTreeMap<Region, Vec<KeyedSales>>,
    pub top_genres_by_region: BTreeMap<Region, Vec<KeyedSales>>,
    pub market_share_platforms: Vec<MarketShare>,
    pub market_share_genres: Vec<MarketShare>,
    pub rating_sales_by_region: Vec<RatingSales>,
}

impl AnalysisReport {
    /// Builds the report from a cleaned (and usually imputed) dataset.
    ///
    /// # Examples
    ///
    /// ```
    /// use gamesales_analysis::report::{AnalysisConfig, AnalysisReport};
    /// use gamesales_data::record::{Dataset, Record};
    ///
    /// let release = |year, total| Record {
    ///     name: Some("Tetris".to_owned()),
    ///     platform: Some("GB".to_owned()),
    ///     genre: Some("Puzzle".to_owned()),
    ///     year_of_release: Some(year),
    ///     total_sales: Some(total),
    ///     ..Record::default()
    /// };
    /// let dataset = Dataset::from_records(vec![release(1989, 30.0), release(2014, 1.0)]);
    /// let report = AnalysisReport::build(dataset, &AnalysisConfig::default());
    /// assert_eq!(report.total_rows, 2);
    /// assert_eq!(report.relevant_rows, 1);
    /// assert_eq!(report.platform_total_sales[0].sales, 1.0);
    /// ```
    #[must_use]
    pub fn build(dataset: Dataset, config: &AnalysisConfig) -> Self {
        let all = dataset.records();
        let total_rows = all.len();
        let games_per_year = temporal::games_per_year(all);
        let significant_years = temporal::significant_years(all, None);
        let lookback_windows =
            temporal::evaluate_lookback_windows(all, config.current_year, &config.lookback_years);

        let relevant = temporal::filter_relevant_period(dataset, config.start_year);
        let records = relevant.records();
        info!(
            total_rows,
            relevant_rows = records.len(),
            start_year = config.start_year,
            "building analysis report"
        );

        let platform_total_sales = platform::platform_total_sales(records);
        let top_platforms = platform_total_sales
            .iter()
            .take(config.top_n)
            .map(|e| e.key.as_str())
            .collect::<Vec<_>>();
        let platform_sales_stats = platform::platform_sales_stats(records, Some(top_platforms.as_slice()));
        let score_sales_correlation = top_platforms
            .iter()
            .map(|p| ((*p).to_owned(), platform::score_sales_correlation(records, p)))
            .collect();
        let platform_lifecycle =
            platform::platform_lifecycle(&platform::platform_yearly_sales(records, None));

        Self {
            total_rows,
            games_per_year,
            significant_years,
            lookback_windows,
            start_year: config.start_year,
            relevant_rows: records.len(),
            platform_lifecycle,
            platform_growth: platform::platform_growth_analysis(records),
            platform_sales_stats,
            score_sales_correlation,
            multiplatform: platform::multiplatform_analysis(
                records,
                config.min_platforms,
                config.max_games,
            ),
            genre_distribution: genre::genre_distribution(records),
            genre_sales: genre::genre_sales_summary(records),
            genre_tiers: genre::classify_genres(records),
            top_platforms_by_region: regional::top_platforms_by_region(records, config.top_n),
            top_genres_by_region: regional::top_genres_by_region(records, config.top_n),
            market_share_platforms: regional::market_share_platforms(records, config.top_n),
            market_share_genres: regional::market_share_genres(records, config.top_n),
            rating_sales_by_region: regional::rating_sales_by_region(records),
            platform_total_sales,
        }
    }
}
