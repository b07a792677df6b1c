use std::{
    io::{self, Write},
    path::PathBuf,
};

use anyhow::Context;
use gamesales_data::{
    impute::{ImputationReport, impute_dataset},
    pipeline,
};
use tracing::info;

use crate::{config::PipelineConfig, util};

#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct PreprocessArg {
    /// Raw CSV file (defaults to the configured raw path)
    #[arg(long, env = "DATA_PATH")]
    input: Option<PathBuf>,
    /// Processed CSV file (defaults to the configured processed path)
    #[arg(long)]
    output: Option<PathBuf>,
    /// JSON configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Minimum group size for imputation, overriding the configuration
    #[arg(long)]
    min_samples: Option<usize>,
    /// Add a provenance column for each imputed field
    #[arg(long)]
    with_provenance: bool,
    /// Also write the imputation summary as JSON to this file
    #[arg(long)]
    report: Option<PathBuf>,
}

pub(crate) fn run(arg: &PreprocessArg) -> anyhow::Result<()> {
    let PreprocessArg {
        input,
        output,
        config,
        min_samples,
        with_provenance,
        report: report_path,
    } = arg;

    let config = PipelineConfig::load(config.as_deref())?;
    let input = input.clone().unwrap_or(config.data.raw_path);
    let output = output.clone().unwrap_or(config.data.processed_path);
    let mut impute_config = config.imputation;
    if let Some(min_samples) = min_samples {
        impute_config.min_samples = *min_samples;
    }
    impute_config.with_provenance |= *with_provenance;

    let raw = util::read_csv_file("raw", &input)?;
    info!(rows = raw.rows.len(), path = %input.display(), "loaded raw data");

    let cleaned = pipeline::clean(raw)
        .with_context(|| format!("Failed to clean dataset: {}", input.display()))?;
    info!(rows = cleaned.len(), "cleaned dataset");

    let (imputed, report) =
        impute_dataset(cleaned, &impute_config).context("Failed to impute missing values")?;
    info!(rows = imputed.len(), "imputed missing values");

    util::write_csv_file(&imputed.to_raw_table(), &output)?;
    info!(path = %output.display(), "saved processed data");

    write_imputation_summary(&mut io::stdout().lock(), &report)
        .context("Failed to write imputation summary")?;
    if let Some(path) = report_path {
        util::write_json_file("imputation report", &report, path)?;
    }
    Ok(())
}

fn write_imputation_summary<W>(writer: &mut W, report: &ImputationReport) -> io::Result<()>
where
    W: Write,
{
    writeln!(writer, "Imputation summary:")?;
    for (field, counts) in &report.fields {
        let counts = counts
            .iter()
            .map(|(tag, count)| format!("{tag}={count}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(writer, "  {field}: {counts}")?;
    }
    Ok(())
}
