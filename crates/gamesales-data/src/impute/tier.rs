//! The declarative cascade of grouping tiers
//!
//! Each [`Tier`] names the columns that define its groups. Tiers are tried in
//! table order, from the most specific grouping (same title) to the global
//! aggregate. Adding a tier means adding a row here; the cascade loop in
//! [`super::impute`] does not change.

use crate::record::{Column, Dataset, KeyPart, Record};

/// One level of the imputation cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tier {
    /// Columns whose values form the grouping key. Empty means one global group.
    pub keys: &'static [Column],
    /// Whether a group needs `min_samples` non-null values to supply a fill.
    pub gated: bool,
}

/// Cascade levels in ascending order; the index is the level number.
pub const TIERS: [Tier; 5] = [
    Tier {
        keys: &[Column::Name],
        gated: true,
    },
    Tier {
        keys: &[Column::Platform, Column::Genre, Column::YearOfRelease],
        gated: true,
    },
    Tier {
        keys: &[Column::Genre, Column::YearOfRelease],
        gated: true,
    },
    Tier {
        keys: &[Column::Genre],
        gated: true,
    },
    Tier {
        keys: &[],
        gated: false,
    },
];

/// Highest level number available in [`TIERS`].
pub const MAX_LEVEL: usize = TIERS.len() - 1;

/// Grouping key of one record under a tier.
pub(super) type GroupKey<'a> = Vec<KeyPart<'a>>;

impl Tier {
    /// Whether every key column exists in the dataset's layout.
    #[must_use]
    pub fn applies_to(&self, dataset: &Dataset) -> bool {
        self.keys.iter().all(|column| dataset.has_column(*column))
    }

    /// The record's group under this tier, or `None` if a key part is null.
    pub(super) fn group_key<'a>(&self, record: &'a Record) -> Option<GroupKey<'a>> {
        self.keys
            .iter()
            .map(|column| record.key_part(*column))
            .collect()
    }
}
