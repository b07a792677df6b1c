//! Pipeline configuration file
//!
//! The configuration is a JSON document; every section and field is optional.
//!
//! ```json
//! {
//!   "data": { "raw_path": "data/raw/games.csv" },
//!   "imputation": { "min_samples": 3 },
//!   "analysis": { "start_year": 2014, "top_n": 3 }
//! }
//! ```

use std::path::{Path, PathBuf};

use gamesales_analysis::report::AnalysisConfig;
use gamesales_data::impute::ImputeConfig;
use serde::{Deserialize, Serialize};

use crate::util;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub data: DataConfig,
    pub imputation: ImputeConfig,
    pub analysis: AnalysisConfig,
}

/// Default locations of the raw and processed datasets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub raw_path: PathBuf,
    pub processed_path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            raw_path: PathBuf::from("data/raw/games.csv"),
            processed_path: PathBuf::from("data/processed/games_clean.csv"),
        }
    }
}

impl PipelineConfig {
    /// Reads the configuration file, or returns the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => util::read_json_file("config", path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use gamesales_data::impute::{FieldPlan, ImputeField};

    use super::*;

    #[test]
    fn no_path_means_defaults() {
        let config = PipelineConfig::load(None).unwrap();
        assert_eq!(config, PipelineConfig::default());
        assert_eq!(config.imputation.min_samples, 5);
        assert_eq!(config.analysis.start_year, 2013);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{
                "data": { "raw_path": "in.csv" },
                "imputation": { "fields": [{ "field": "user_score", "max_level": 3 }] }
            }"#,
        )
        .unwrap();

        let config = PipelineConfig::load(Some(&path)).unwrap();
        assert_eq!(config.data.raw_path, PathBuf::from("in.csv"));
        assert_eq!(config.data.processed_path, DataConfig::default().processed_path);
        assert_eq!(
            config.imputation.fields,
            [FieldPlan {
                field: ImputeField::UserScore,
                max_level: 3
            }]
        );
        assert_eq!(config.analysis, AnalysisConfig::default());
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        let err = PipelineConfig::load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("broken.json"));
    }
}
