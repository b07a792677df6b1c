//! Grouped sums and deterministic rankings shared by the views

use std::{cmp::Ordering, collections::BTreeMap};

use gamesales_data::record::{Column, Record};
use serde::Serialize;

/// Sales attributed to one group key (a platform, genre or rating).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyedSales {
    pub key: String,
    pub sales: f64,
}

/// Sums `value` per text value of `key`.
///
/// Records with a null key are skipped. Null values contribute nothing, but
/// their key still appears with a sum of 0.
pub(crate) fn sum_by<'a>(
    records: &'a [Record],
    key: Column,
    value: Column,
) -> BTreeMap<&'a str, f64> {
    let mut sums = BTreeMap::new();
    for record in records {
        if let Some(k) = record.text(key) {
            *sums.entry(k).or_insert(0.0) += record.number(value).unwrap_or(0.0);
        }
    }
    sums
}

/// Orders by value descending, then by key ascending.
pub(crate) fn by_value_desc(a: (&str, f64), b: (&str, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

/// Ranks grouped sums from largest to smallest.
pub(crate) fn ranked(sums: BTreeMap<&str, f64>) -> Vec<KeyedSales> {
    let mut entries = sums.into_iter().collect::<Vec<_>>();
    entries.sort_by(|a, b| by_value_desc(*a, *b));
    entries
        .into_iter()
        .map(|(key, sales)| KeyedSales {
            key: key.to_owned(),
            sales,
        })
        .collect()
}
