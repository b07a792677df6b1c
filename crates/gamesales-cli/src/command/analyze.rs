use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use gamesales_analysis::{
    regional::Region,
    report::{AnalysisConfig, AnalysisReport},
};
use gamesales_data::{record::Column, sales::add_total_sales, schema};
use tracing::info;

use crate::{config::PipelineConfig, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct AnalyzeArg {
    /// Processed CSV file (defaults to the configured processed path)
    #[arg(long)]
    input: Option<PathBuf>,
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// First year of the relevant period, overriding the configuration
    #[arg(long)]
    start_year: Option<i32>,
    /// Write the full report as JSON to this file instead of printing a summary
    #[arg(long)]
    json: Option<PathBuf>,
}

pub(crate) fn run(arg: &AnalyzeArg) -> anyhow::Result<()> {
    let AnalyzeArg {
        input,
        config,
        start_year,
        json,
    } = arg;

    let config = PipelineConfig::load(config.as_deref())?;
    let input = input.clone().unwrap_or(config.data.processed_path);
    let analysis_config = AnalysisConfig {
        start_year: start_year.unwrap_or(config.analysis.start_year),
        ..config.analysis
    };

    let raw = util::read_csv_file("processed", &input)?;
    let mut dataset = schema::normalize(raw)
        .with_context(|| format!("Failed to load processed dataset: {}", input.display()))?;
    if !dataset.has_column(Column::TotalSales) {
        dataset = add_total_sales(dataset);
    }
    info!(rows = dataset.len(), path = %input.display(), "loaded processed data");

    let report = AnalysisReport::build(dataset, &analysis_config);
    match json {
        Some(path) => {
            util::write_json_file("analysis report", &report, path)?;
            info!(path = %path.display(), "saved analysis report");
        }
        None => write_text_report(&mut io::stdout().lock(), &report)
            .context("Failed to write analysis report")?,
    }
    Ok(())
}

fn write_text_report<W>(w: &mut W, report: &AnalysisReport) -> io::Result<()>
where
    W: Write,
{
    writeln!(w, "--- Temporal Analysis ---")?;
    writeln!(w, "  Years with data: {}", report.games_per_year.len())?;
    if let (Some(first), Some(last)) = (
        report.significant_years.keys().next(),
        report.significant_years.keys().next_back(),
    ) {
        writeln!(
            w,
            "  Significant years (>= mean): {} ({first}-{last})",
            report.significant_years.len()
        )?;
    }
    for window in &report.lookback_windows {
        writeln!(
            w,
            "  {}: {} games on {} platforms, ${:.1}M",
            window.period, window.games, window.platforms, window.total_sales
        )?;
    }
    writeln!(
        w,
        "  Relevant period ({}+): {} rows",
        report.start_year, report.relevant_rows
    )?;

    writeln!(w)?;
    writeln!(w, "--- Platform Analysis ---")?;
    let top = report
        .platform_total_sales
        .iter()
        .take(5)
        .map(|e| e.key.as_str())
        .collect::<Vec<_>>();
    writeln!(w, "  Top platforms: {}", top.join(", "))?;
    for growth in report.platform_growth.iter().take(5) {
        writeln!(
            w,
            "    {}: ${:.1}M, trend={}",
            growth.platform, growth.total_sales, growth.trend
        )?;
    }

    writeln!(w)?;
    writeln!(w, "--- Genre Analysis ---")?;
    writeln!(w, "  Top genres by total sales:")?;
    for genre in report.genre_sales.iter().take(5) {
        writeln!(
            w,
            "    {}: ${:.1}M ({} games)",
            genre.genre, genre.sum, genre.count
        )?;
    }
    writeln!(
        w,
        "  High-sales genres: {}",
        report.genre_tiers.high_sales.join(", ")
    )?;
    writeln!(
        w,
        "  Low-sales genres: {}",
        report.genre_tiers.low_sales.join(", ")
    )?;

    writeln!(w)?;
    writeln!(w, "--- Regional Analysis ---")?;
    for region in Region::ALL {
        if let Some(top) = report
            .top_platforms_by_region
            .get(&region)
            .and_then(|t| t.first())
        {
            writeln!(w, "  {region} top platform: {} (${:.1}M)", top.key, top.sales)?;
        }
    }
    for region in Region::ALL {
        if let Some(top) = report
            .top_genres_by_region
            .get(&region)
            .and_then(|t| t.first())
        {
            writeln!(w, "  {region} top genre: {} (${:.1}M)", top.key, top.sales)?;
        }
    }
    Ok(())
}
