use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::{ImputationTag, ImputeError, ImputeField, ImputedColumn, ImputedValues, impute};
use crate::record::{Dataset, Record};

/// Cascade ceiling for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldPlan {
    pub field: ImputeField,
    pub max_level: usize,
}

/// Settings for imputing a whole dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImputeConfig {
    /// Minimum non-null values a group needs before it may supply a fill.
    pub min_samples: usize,
    /// Fields to impute, each with its own highest cascade level.
    pub fields: Vec<FieldPlan>,
    /// Append a `<field>_imputation` column holding each value's provenance tag.
    pub with_provenance: bool,
}

impl Default for ImputeConfig {
    /// Scores use the full cascade; ratings stop at level 2 and fall back to `TBD`.
    fn default() -> Self {
        Self {
            min_samples: 5,
            fields: vec![
                FieldPlan {
                    field: ImputeField::CriticScore,
                    max_level: 4,
                },
                FieldPlan {
                    field: ImputeField::UserScore,
                    max_level: 4,
                },
                FieldPlan {
                    field: ImputeField::Rating,
                    max_level: 2,
                },
            ],
            with_provenance: false,
        }
    }
}

/// Count of records per provenance tag, for each imputed field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImputationReport {
    pub fields: BTreeMap<ImputeField, BTreeMap<ImputationTag, usize>>,
}

impl ImputationReport {
    fn record(&mut self, column: &ImputedColumn) {
        let counts = self.fields.entry(column.field).or_default();
        counts.clear();
        for tag in &column.tags {
            *counts.entry(*tag).or_insert(0) += 1;
        }
    }

    /// Number of records of `field` carrying `tag`.
    #[must_use]
    pub fn count(&self, field: ImputeField, tag: ImputationTag) -> usize {
        self.fields
            .get(&field)
            .and_then(|counts| counts.get(&tag))
            .copied()
            .unwrap_or(0)
    }
}

/// Imputes every configured field and writes the results back.
///
/// All fields are imputed from the input dataset, so the order of
/// `config.fields` does not affect the result.
///
/// # Errors
///
/// Returns [`ImputeError`] if a configured field has no column in the dataset.
///
/// # Examples
///
/// ```
/// use gamesales_data::{
///     impute::{ImputeConfig, impute_dataset},
///     record::{Dataset, Record},
/// };
///
/// let dataset = Dataset::from_records(vec![Record::default()]);
/// let (imputed, report) = impute_dataset(dataset, &ImputeConfig::default()).unwrap();
/// assert_eq!(imputed.records()[0].rating.as_deref(), Some("TBD"));
/// assert_eq!(report.fields.len(), 3);
/// ```
pub fn impute_dataset(
    mut dataset: Dataset,
    config: &ImputeConfig,
) -> Result<(Dataset, ImputationReport), ImputeError> {
    let columns = config
        .fields
        .iter()
        .map(|plan| impute(&dataset, plan.field, config.min_samples, plan.max_level))
        .collect::<Result<Vec<_>, _>>()?;

    let mut report = ImputationReport::default();
    for column in &columns {
        apply(dataset.records_mut(), column);
        report.record(column);
        info!(
            field = %column.field,
            imputed = column.tags.iter().filter(|t| t.is_imputed()).count(),
            tbd = column.tags.iter().filter(|t| **t == ImputationTag::Tbd).count(),
            not_imputed = column.tags.iter().filter(|t| **t == ImputationTag::NotImputed).count(),
            "imputed field"
        );
        if config.with_provenance {
            let tags = column.tags.iter().map(|t| Some(t.to_string())).collect();
            dataset.set_extra_column(&format!("{}_imputation", column.field), tags);
        }
    }
    Ok((dataset, report))
}

fn apply(records: &mut [Record], column: &ImputedColumn) {
    match (&column.values, column.field) {
        (ImputedValues::Numeric(values), ImputeField::CriticScore) => {
            for (record, value) in records.iter_mut().zip(values) {
                record.critic_score = *value;
            }
        }
        (ImputedValues::Numeric(values), ImputeField::UserScore) => {
            for (record, value) in records.iter_mut().zip(values) {
                record.user_score = *value;
            }
        }
        (ImputedValues::Categorical(values), ImputeField::Rating) => {
            for (record, value) in records.iter_mut().zip(values) {
                record.rating = Some(value.clone());
            }
        }
        (values, field) => unreachable!("{field} never yields {values:?}"),
    }
}
