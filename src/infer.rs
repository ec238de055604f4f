//! Column discovery, per-cell coercion, and the numeric/categorical split.

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

use crate::{record::RawRecord, value::TypedValue};

/// One row after coercion, keyed by column name in dataset order.
pub type TypedRow = IndexMap<String, TypedValue>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Categorical => write!(f, "categorical"),
        }
    }
}

/// Column names in first-record order. The first record fixes the schema for
/// the entire dataset.
pub fn column_names(records: &[RawRecord]) -> Vec<String> {
    records
        .first()
        .map(|record| record.keys().cloned().collect())
        .unwrap_or_default()
}

/// Coerces every record against the discovered columns. Cells for keys the
/// first record did not declare are ignored; columns a later record lacks
/// come out `Null`.
pub fn type_rows(records: &[RawRecord], columns: &[String]) -> Vec<TypedRow> {
    records
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|name| {
                    let value = TypedValue::coerce(record.get(name).map(String::as_str));
                    (name.clone(), value)
                })
                .collect()
        })
        .collect()
}

/// Splits columns into numeric and categorical, preserving dataset order in
/// both lists. A column is numeric only when it has at least one non-null
/// value and strictly more than 80% of its non-null values are numbers, so
/// an all-null column and an exactly-80% column are both categorical.
pub fn classify_columns(rows: &[TypedRow], columns: &[String]) -> (Vec<String>, Vec<String>) {
    let mut numeric = Vec::new();
    let mut categorical = Vec::new();
    for name in columns {
        let mut non_null = 0usize;
        let mut numbers = 0usize;
        for row in rows {
            match row.get(name) {
                Some(TypedValue::Number(_)) => {
                    non_null += 1;
                    numbers += 1;
                }
                Some(TypedValue::Text(_)) => non_null += 1,
                Some(TypedValue::Null) | None => {}
            }
        }
        if non_null > 0 && numbers as f64 > 0.8 * non_null as f64 {
            numeric.push(name.clone());
        } else {
            categorical.push(name.clone());
        }
    }
    (numeric, categorical)
}
