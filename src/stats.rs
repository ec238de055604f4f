use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::{
    infer::{ColumnKind, TypedRow},
    value::{TypedValue, ValueKey},
};

/// Summary statistics for one column. The numeric block is populated only
/// for numeric columns with at least one number, and `mode` only for
/// categorical columns with at least one non-null value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnStats {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ColumnKind,
    pub count: usize,
    pub null_count: usize,
    pub unique_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub std: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,
}

/// Computes per-column statistics in dataset order.
pub fn column_stats(
    rows: &[TypedRow],
    columns: &[String],
    numeric_columns: &[String],
) -> Vec<ColumnStats> {
    let numeric: HashSet<&str> = numeric_columns.iter().map(String::as_str).collect();
    columns
        .iter()
        .map(|name| {
            let kind = if numeric.contains(name.as_str()) {
                ColumnKind::Numeric
            } else {
                ColumnKind::Categorical
            };
            stats_for_column(rows, name, kind)
        })
        .collect()
}

fn stats_for_column(rows: &[TypedRow], name: &str, kind: ColumnKind) -> ColumnStats {
    let mut count = 0usize;
    let mut numbers = Vec::new();
    let mut unique: HashSet<ValueKey> = HashSet::new();
    for row in rows {
        let value = row.get(name).unwrap_or(&TypedValue::Null);
        if value.is_null() {
            continue;
        }
        count += 1;
        if let Some(key) = value.unique_key() {
            unique.insert(key);
        }
        if let Some(number) = value.as_number() {
            numbers.push(number);
        }
    }

    let mut stats = ColumnStats {
        name: name.to_string(),
        kind,
        count,
        null_count: rows.len() - count,
        unique_count: unique.len(),
        mean: None,
        median: None,
        std: None,
        min: None,
        max: None,
        mode: None,
    };

    match kind {
        // Text outliers in a numeric column are excluded from the numeric
        // summary but still count toward count/unique above.
        ColumnKind::Numeric => {
            if let Some(summary) = NumericSummary::from_values(&numbers) {
                stats.mean = Some(summary.mean);
                stats.median = Some(summary.median);
                stats.std = Some(summary.std);
                stats.min = Some(summary.min);
                stats.max = Some(summary.max);
            }
        }
        ColumnKind::Categorical => {
            stats.mode = mode_value(rows, name);
        }
    }
    stats
}

struct NumericSummary {
    mean: f64,
    median: f64,
    std: f64,
    min: f64,
    max: f64,
}

impl NumericSummary {
    fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let n = values.len();
        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mean = sorted.iter().sum::<f64>() / n as f64;
        let variance = sorted
            .iter()
            .map(|value| (value - mean).powi(2))
            .sum::<f64>()
            / n as f64;
        Some(Self {
            mean,
            // Upper middle for even counts, never an interpolated midpoint.
            median: sorted[n / 2],
            // Population standard deviation: the divisor is n, not n - 1.
            std: variance.sqrt(),
            min: sorted[0],
            max: sorted[n - 1],
        })
    }
}

/// Most frequent display value in a single left-to-right pass. On a tie the
/// first value to reach the winning frequency is kept, so earlier values
/// beat later ones with equal counts.
fn mode_value(rows: &[TypedRow], name: &str) -> Option<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    let mut best: Option<(String, usize)> = None;
    for row in rows {
        let value = row.get(name).unwrap_or(&TypedValue::Null);
        if value.is_null() {
            continue;
        }
        let display = value.as_display();
        let count = counts.entry(display.clone()).or_insert(0);
        *count += 1;
        let improved = match &best {
            Some((_, best_count)) => *count > *best_count,
            None => true,
        };
        if improved {
            best = Some((display, *count));
        }
    }
    best.map(|(value, _)| value)
}
