use anyhow::{Result, bail};
use indexmap::IndexMap;
use itertools::Itertools;
use log::info;
use serde::Serialize;

use crate::{cli::CorrelationsArgs, infer::TypedRow, profile, table, value::TypedValue};

/// Pairwise Pearson correlations over the numeric columns. The matrix is
/// fully materialized: both triangles carry entries and every diagonal cell
/// is exactly 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct CorrelationMatrix {
    entries: IndexMap<String, IndexMap<String, f64>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        self.entries.get(row).and_then(|cells| cells.get(column)).copied()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the correlation matrix for the given numeric columns.
///
/// Each column contributes its non-null numbers in row order; a pair is
/// correlated over the first `min(len_a, len_b)` values of each slice, not
/// over rows where both columns happen to be present. Degenerate pairs
/// (fewer than two paired values, or zero variance on either side) get 0.
pub fn correlation_matrix(rows: &[TypedRow], numeric_columns: &[String]) -> CorrelationMatrix {
    let series = numeric_columns
        .iter()
        .map(|name| numeric_values(rows, name))
        .collect_vec();

    let mut entries = IndexMap::with_capacity(numeric_columns.len());
    for (i, row_name) in numeric_columns.iter().enumerate() {
        let mut cells = IndexMap::with_capacity(numeric_columns.len());
        for (j, column_name) in numeric_columns.iter().enumerate() {
            let r = if i == j {
                1.0
            } else {
                pearson(&series[i], &series[j])
            };
            cells.insert(column_name.clone(), r);
        }
        entries.insert(row_name.clone(), cells);
    }
    CorrelationMatrix { entries }
}

fn numeric_values(rows: &[TypedRow], column: &str) -> Vec<f64> {
    rows.iter()
        .filter_map(|row| row.get(column).and_then(TypedValue::as_number))
        .collect()
}

fn pearson(x: &[f64], y: &[f64]) -> f64 {
    let n = x.len().min(y.len());
    if n < 2 {
        return 0.0;
    }
    let xs = &x[..n];
    let ys = &y[..n];
    let x_mean = xs.iter().sum::<f64>() / n as f64;
    let y_mean = ys.iter().sum::<f64>() / n as f64;
    let mut numerator = 0.0;
    let mut x_dev_sq = 0.0;
    let mut y_dev_sq = 0.0;
    for (x_value, y_value) in xs.iter().zip(ys) {
        let dx = x_value - x_mean;
        let dy = y_value - y_mean;
        numerator += dx * dy;
        x_dev_sq += dx * dx;
        y_dev_sq += dy * dy;
    }
    let denominator = (x_dev_sq * y_dev_sq).sqrt();
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// Flattens the matrix into table headers and rows for terminal rendering.
pub fn matrix_table(matrix: &CorrelationMatrix) -> (Vec<String>, Vec<Vec<String>>) {
    let names: Vec<String> = matrix.entries.keys().cloned().collect();
    let mut headers = Vec::with_capacity(names.len() + 1);
    headers.push("column".to_string());
    headers.extend(names.iter().cloned());
    let rows = names
        .iter()
        .map(|row_name| {
            let mut cells = Vec::with_capacity(names.len() + 1);
            cells.push(row_name.clone());
            for column_name in &names {
                let r = matrix.get(row_name, column_name).unwrap_or(0.0);
                cells.push(format_number(r));
            }
            cells
        })
        .collect();
    (headers, rows)
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}

pub fn execute(args: &CorrelationsArgs) -> Result<()> {
    let result = profile::profile_file(
        &args.input,
        args.delimiter,
        args.input_encoding.as_deref(),
        args.limit,
        args.max_bytes,
    )?;
    if result.numeric_columns.len() < 2 {
        bail!(
            "Correlation analysis requires at least 2 numeric columns; found {}",
            result.numeric_columns.len()
        );
    }
    let (headers, rows) = matrix_table(&result.correlations);
    table::print_table(&headers, &rows);
    info!(
        "Computed correlations across {} numeric column(s)",
        result.numeric_columns.len()
    );
    Ok(())
}
