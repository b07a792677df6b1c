//! Hierarchical missing-value imputation
//!
//! Missing critic scores, user scores and ratings are filled from groups of
//! similar records, falling back from specific to general groupings:
//!
//! | Level | Group by                         | Gated by `min_samples` |
//! |-------|----------------------------------|------------------------|
//! | 0     | name                             | yes                    |
//! | 1     | platform, genre, year of release | yes                    |
//! | 2     | genre, year of release           | yes                    |
//! | 3     | genre                            | yes                    |
//! | 4     | whole dataset                    | no                     |
//!
//! Numeric fields are filled with the group median, categorical fields with the
//! group mode (ties go to the smallest value). A group supplies a value only
//! when it holds at least `min_samples` non-null values of the field; groups
//! and their aggregates are always computed from the values present in the
//! input, never from values filled by an earlier level.
//!
//! Each level only considers records still missing after the previous levels.
//! A level whose grouping columns are absent from the dataset is skipped.
//! Categorical values still missing after the last configured level become
//! [`TBD`]; numeric ones stay null.
//!
//! # Examples
//!
//! ```
//! use gamesales_data::{
//!     impute::{ImputationTag, ImputeField, ImputedValues, impute},
//!     record::{Dataset, Record},
//! };
//!
//! let game = |name: &str, score| Record {
//!     name: Some(name.to_owned()),
//!     platform: Some("PS4".to_owned()),
//!     genre: Some("Action".to_owned()),
//!     year_of_release: Some(2015),
//!     critic_score: score,
//!     ..Record::default()
//! };
//! let dataset = Dataset::from_records(vec![game("A", Some(80.0)), game("A", None)]);
//!
//! let column = impute(&dataset, ImputeField::CriticScore, 1, 4).unwrap();
//! assert_eq!(column.values, ImputedValues::Numeric(vec![Some(80.0), Some(80.0)]));
//! assert_eq!(column.tags, [ImputationTag::Original, ImputationTag::Level(0)]);
//! ```

use std::{collections::HashMap, fmt};

use gamesales_stats::{descriptive::median, mode::mode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::record::{Column, Dataset};

pub use self::{
    dataset::{FieldPlan, ImputationReport, ImputeConfig, impute_dataset},
    provenance::{ImputationTag, TBD},
    tier::{MAX_LEVEL, TIERS, Tier},
};

mod dataset;
mod provenance;
mod tier;

/// How a field's values are aggregated within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Filled with the group median.
    Numeric,
    /// Filled with the group mode; unresolved values become [`TBD`].
    Categorical,
}

/// Fields the imputer can fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImputeField {
    CriticScore,
    UserScore,
    Rating,
}

impl ImputeField {
    #[must_use]
    pub const fn column(self) -> Column {
        match self {
            Self::CriticScore => Column::CriticScore,
            Self::UserScore => Column::UserScore,
            Self::Rating => Column::Rating,
        }
    }

    #[must_use]
    pub const fn kind(self) -> FieldKind {
        match self {
            Self::CriticScore | Self::UserScore => FieldKind::Numeric,
            Self::Rating => FieldKind::Categorical,
        }
    }
}

impl fmt::Display for ImputeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.column().fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ImputeError {
    #[display("cannot impute '{column}': column is missing from the dataset")]
    MissingColumn { column: Column },
}

/// Filled values of one field, one entry per record.
#[derive(Debug, Clone, PartialEq)]
pub enum ImputedValues {
    /// Numeric fields stay `None` only if the whole column was null.
    Numeric(Vec<Option<f64>>),
    /// Categorical fields are never null; unresolved entries hold [`TBD`].
    Categorical(Vec<String>),
}

/// Result of imputing one field: values plus per-record provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ImputedColumn {
    pub field: ImputeField,
    pub values: ImputedValues,
    pub tags: Vec<ImputationTag>,
}

/// Fills missing values of `field` through the tier cascade.
///
/// Levels `0..=max_level` are tried in ascending order; `max_level` is
/// clamped to [`MAX_LEVEL`]. The input dataset is not modified.
///
/// # Errors
///
/// Returns [`ImputeError::MissingColumn`] if the dataset has no column for `field`.
pub fn impute(
    dataset: &Dataset,
    field: ImputeField,
    min_samples: usize,
    max_level: usize,
) -> Result<ImputedColumn, ImputeError> {
    let column = field.column();
    if !dataset.has_column(column) {
        return Err(ImputeError::MissingColumn { column });
    }
    let max_level = max_level.min(MAX_LEVEL);

    let (values, tags) = match field.kind() {
        FieldKind::Numeric => {
            let original = dataset
                .records()
                .iter()
                .map(|r| r.number(column))
                .collect::<Vec<_>>();
            let (values, tags) = cascade(
                dataset,
                field,
                &original,
                median::<Vec<f64>>,
                min_samples,
                max_level,
            );
            (ImputedValues::Numeric(values), tags)
        }
        FieldKind::Categorical => {
            let original = dataset
                .records()
                .iter()
                .map(|r| r.text(column))
                .collect::<Vec<_>>();
            let (values, mut tags) = cascade(
                dataset,
                field,
                &original,
                mode::<&str, Vec<&str>>,
                min_samples,
                max_level,
            );
            let values = values
                .into_iter()
                .zip(&mut tags)
                .map(|(value, tag)| {
                    value.map_or_else(
                        || {
                            *tag = ImputationTag::Tbd;
                            TBD.to_owned()
                        },
                        str::to_owned,
                    )
                })
                .collect();
            (ImputedValues::Categorical(values), tags)
        }
    };

    Ok(ImputedColumn { field, values, tags })
}

/// Runs the tier loop over one field's original values.
fn cascade<T, F>(
    dataset: &Dataset,
    field: ImputeField,
    original: &[Option<T>],
    aggregate: F,
    min_samples: usize,
    max_level: usize,
) -> (Vec<Option<T>>, Vec<ImputationTag>)
where
    T: Clone,
    F: Fn(Vec<T>) -> Option<T>,
{
    let records = dataset.records();
    let mut values = original.to_vec();
    let mut tags = original
        .iter()
        .map(|v| {
            if v.is_some() {
                ImputationTag::Original
            } else {
                ImputationTag::NotImputed
            }
        })
        .collect::<Vec<_>>();

    for (level, tier) in TIERS.iter().enumerate().take(max_level + 1) {
        let missing = values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.is_none().then_some(i))
            .collect::<Vec<_>>();
        if missing.is_empty() {
            break;
        }
        if !tier.applies_to(dataset) {
            debug!(%field, level, "grouping columns absent, skipping level");
            continue;
        }

        let mut groups: HashMap<_, Vec<T>> = HashMap::new();
        for (record, value) in records.iter().zip(original) {
            if let (Some(key), Some(value)) = (tier.group_key(record), value) {
                groups.entry(key).or_default().push(value.clone());
            }
        }
        let fills = groups
            .into_iter()
            .filter(|(_, group)| !tier.gated || group.len() >= min_samples)
            .filter_map(|(key, group)| Some((key, aggregate(group)?)))
            .collect::<HashMap<_, _>>();

        let mut filled = 0_usize;
        for i in missing {
            let fill = tier.group_key(&records[i]).and_then(|key| fills.get(&key));
            if let Some(fill) = fill {
                values[i] = Some(fill.clone());
                tags[i] = ImputationTag::Level(level);
                filled += 1;
            }
        }
        debug!(%field, level, filled, groups = fills.len(), "imputation level applied");
    }

    (values, tags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Record;

    /// Twelve records, two per title, with every second score missing.
    fn sample_dataset() -> Dataset {
        let names = ["A", "A", "B", "B", "C", "C", "D", "D", "E", "E", "F", "F"];
        let genres = [
            "Action", "Action", "Action", "Action", "Sports", "Sports", "Sports", "Sports",
            "Action", "Action", "Sports", "Sports",
        ];
        let critic = [
            Some(80.0),
            Some(85.0),
            None,
            Some(70.0),
            Some(75.0),
            None,
            Some(90.0),
            Some(88.0),
            None,
            Some(60.0),
            Some(65.0),
            None,
        ];
        let user = [
            Some(8.0),
            Some(8.5),
            None,
            Some(7.0),
            Some(7.5),
            None,
            Some(9.0),
            Some(8.8),
            None,
            Some(6.0),
            Some(6.5),
            None,
        ];
        let rating = [
            Some("M"),
            Some("M"),
            None,
            Some("E"),
            Some("T"),
            None,
            Some("M"),
            Some("T"),
            None,
            Some("E"),
            Some("E"),
            None,
        ];
        let records = (0..12)
            .map(|i| Record {
                name: Some(names[i].to_owned()),
                platform: Some(if i < 6 { "PS4" } else { "PC" }.to_owned()),
                genre: Some(genres[i].to_owned()),
                year_of_release: Some(2015),
                critic_score: critic[i],
                user_score: user[i],
                rating: rating[i].map(str::to_owned),
                ..Record::default()
            })
            .collect();
        Dataset::from_records(records)
    }

    fn numeric(column: &ImputedColumn) -> &[Option<f64>] {
        match &column.values {
            ImputedValues::Numeric(values) => values,
            ImputedValues::Categorical(_) => panic!("expected numeric values"),
        }
    }

    fn categorical(column: &ImputedColumn) -> &[String] {
        match &column.values {
            ImputedValues::Categorical(values) => values,
            ImputedValues::Numeric(_) => panic!("expected categorical values"),
        }
    }

    #[test]
    fn numeric_imputation_leaves_no_nulls() {
        let dataset = sample_dataset();
        for field in [ImputeField::CriticScore, ImputeField::UserScore] {
            let column = impute(&dataset, field, 1, 4).unwrap();
            assert!(numeric(&column).iter().all(Option::is_some));
        }
    }

    #[test]
    fn originals_are_never_overwritten() {
        let dataset = sample_dataset();
        let column = impute(&dataset, ImputeField::CriticScore, 1, 4).unwrap();
        for (record, (value, tag)) in dataset
            .records()
            .iter()
            .zip(numeric(&column).iter().zip(&column.tags))
        {
            if let Some(original) = record.critic_score {
                assert_eq!(*value, Some(original));
                assert_eq!(*tag, ImputationTag::Original);
            } else {
                assert!(tag.is_imputed());
            }
        }
    }

    #[test]
    fn same_title_sibling_fills_at_level_zero() {
        let dataset = sample_dataset();
        let column = impute(&dataset, ImputeField::CriticScore, 1, 4).unwrap();
        assert_eq!(column.tags[2], ImputationTag::Level(0));
        assert_eq!(numeric(&column)[2], Some(70.0));
        assert_eq!(numeric(&column)[11], Some(65.0));
    }

    #[test]
    fn categorical_imputation_uses_sibling_mode() {
        let dataset = sample_dataset();
        let column = impute(&dataset, ImputeField::Rating, 1, 2).unwrap();
        let values = categorical(&column);
        assert_eq!(values[2], "E");
        assert_eq!(values[5], "T");
        assert!(values.iter().all(|v| !v.is_empty()));
        assert!(column.tags.iter().all(|t| *t != ImputationTag::NotImputed));
    }

    #[test]
    fn high_threshold_forces_global_level() {
        let dataset = sample_dataset();
        let column = impute(&dataset, ImputeField::CriticScore, 100, 4).unwrap();
        let expected = median(dataset.records().iter().filter_map(|r| r.critic_score));
        for (record, (value, tag)) in dataset
            .records()
            .iter()
            .zip(numeric(&column).iter().zip(&column.tags))
        {
            if record.critic_score.is_none() {
                assert_eq!(*tag, ImputationTag::Level(4));
                assert_eq!(*value, expected);
            }
        }
    }

    #[test]
    fn first_qualifying_level_wins() {
        // Title groups hold one value each, so min_samples = 2 rejects level 0
        // while the (platform, genre, year) group of row 2 has three values.
        let dataset = sample_dataset();
        let column = impute(&dataset, ImputeField::CriticScore, 2, 4).unwrap();
        assert_eq!(column.tags[2], ImputationTag::Level(1));
        assert_eq!(numeric(&column)[2], Some(80.0));
    }

    #[test]
    fn truncated_cascade_marks_unresolved_categorical_as_tbd() {
        let dataset = sample_dataset();
        let column = impute(&dataset, ImputeField::Rating, 100, 2).unwrap();
        let values = categorical(&column);
        for (i, record) in dataset.records().iter().enumerate() {
            if record.rating.is_none() {
                assert_eq!(values[i], TBD);
                assert_eq!(column.tags[i], ImputationTag::Tbd);
            }
        }
    }

    #[test]
    fn all_null_numeric_column_stays_null() {
        let records = (0..3)
            .map(|_| Record {
                name: Some("A".to_owned()),
                genre: Some("Puzzle".to_owned()),
                year_of_release: Some(2000),
                ..Record::default()
            })
            .collect();
        let dataset = Dataset::from_records(records);
        let column = impute(&dataset, ImputeField::UserScore, 1, 4).unwrap();
        assert_eq!(numeric(&column), [None, None, None]);
        assert!(column.tags.iter().all(|t| *t == ImputationTag::NotImputed));

        let column = impute(&dataset, ImputeField::Rating, 1, 4).unwrap();
        assert_eq!(categorical(&column), ["TBD", "TBD", "TBD"]);
    }

    #[test]
    fn absent_grouping_column_skips_its_level() {
        let record = |name: &str, score| Record {
            name: Some(name.to_owned()),
            genre: Some("Action".to_owned()),
            year_of_release: Some(2015),
            critic_score: score,
            ..Record::default()
        };
        let dataset = Dataset::with_columns(
            [Column::Name, Column::Genre, Column::YearOfRelease, Column::CriticScore],
            vec![record("A", Some(50.0)), record("B", Some(70.0)), record("C", None)],
        );
        let column = impute(&dataset, ImputeField::CriticScore, 2, 4).unwrap();
        assert_eq!(column.tags[2], ImputationTag::Level(2));
        assert_eq!(numeric(&column)[2], Some(60.0));
    }

    #[test]
    fn null_key_parts_belong_to_no_group() {
        let dataset = Dataset::from_records(vec![
            Record {
                critic_score: Some(40.0),
                ..Record::default()
            },
            Record::default(),
        ]);
        let column = impute(&dataset, ImputeField::CriticScore, 1, 3).unwrap();
        assert_eq!(numeric(&column), [Some(40.0), None]);
        let column = impute(&dataset, ImputeField::CriticScore, 1, 4).unwrap();
        assert_eq!(column.tags[1], ImputationTag::Level(4));
    }

    #[test]
    fn missing_target_column_is_an_error() {
        let dataset = Dataset::with_columns([Column::Name], vec![]);
        assert_eq!(
            impute(&dataset, ImputeField::Rating, 5, 2),
            Err(ImputeError::MissingColumn {
                column: Column::Rating
            })
        );
    }

    #[test]
    fn max_level_is_clamped() {
        let dataset = sample_dataset();
        let column = impute(&dataset, ImputeField::CriticScore, 100, 42).unwrap();
        assert!(column.tags.iter().all(|t| matches!(
            t,
            ImputationTag::Original | ImputationTag::Level(4)
        )));
    }
}
