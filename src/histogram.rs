use anyhow::{Result, anyhow, bail};
use log::info;

use crate::{
    cli::HistogramArgs,
    infer::TypedRow,
    profile::{self, ProfileResult},
    table,
    value::TypedValue,
};

pub const MIN_BINS: usize = 5;
pub const MAX_BINS: usize = 20;

/// One histogram bucket. `lower` is inclusive; `upper` is exclusive except
/// in the last bucket, which also takes values equal to the column maximum.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

/// Bins a column's non-null numbers into uniform-width buckets. The bucket
/// count follows the square-root rule, rounded and clamped to [5, 20].
pub fn numeric_histogram(rows: &[TypedRow], column: &str) -> Vec<HistogramBin> {
    let values: Vec<f64> = rows
        .iter()
        .filter_map(|row| row.get(column).and_then(TypedValue::as_number))
        .collect();
    if values.is_empty() {
        return Vec::new();
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let bins = bin_count(values.len());
    let width = (max - min) / bins as f64;
    let mut histogram: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();
    for value in values {
        // A zero-width range puts every value in the first bucket.
        let idx = if width > 0.0 {
            (((value - min) / width) as usize).min(bins - 1)
        } else {
            0
        };
        histogram[idx].count += 1;
    }
    histogram
}

fn bin_count(values: usize) -> usize {
    ((values as f64).sqrt().round() as usize).clamp(MIN_BINS, MAX_BINS)
}

pub fn execute(args: &HistogramArgs) -> Result<()> {
    let result = profile::profile_file(
        &args.input,
        args.delimiter,
        args.input_encoding.as_deref(),
        args.limit,
        args.max_bytes,
    )?;
    let columns = resolve_columns(&result, &args.columns)?;
    if columns.is_empty() {
        bail!("No numeric columns found for distribution analysis");
    }
    let headers = vec![
        "column".to_string(),
        "range".to_string(),
        "count".to_string(),
    ];
    let mut rows = Vec::new();
    for column in &columns {
        for bin in numeric_histogram(&result.rows, column) {
            rows.push(vec![
                column.clone(),
                format!("{:.2}-{:.2}", bin.lower, bin.upper),
                bin.count.to_string(),
            ]);
        }
    }
    table::print_table(&headers, &rows);
    info!("Computed distributions for {} column(s)", columns.len());
    Ok(())
}

fn resolve_columns(result: &ProfileResult, specified: &[String]) -> Result<Vec<String>> {
    if specified.is_empty() {
        return Ok(result.numeric_columns.clone());
    }
    specified
        .iter()
        .map(|name| {
            if !result.columns.contains(name) {
                return Err(anyhow!("Column '{name}' not found in input"));
            }
            if !result.numeric_columns.contains(name) {
                return Err(anyhow!(
                    "Column '{name}' is categorical and cannot be binned"
                ));
            }
            Ok(name.clone())
        })
        .collect()
}
