//! The profiling pipeline: ingest, coerce, classify, summarize, correlate.
//!
//! [`profile`] is pure and deterministic; everything the subcommands print
//! or export is derived from one [`ProfileResult`].

use std::path::Path;

use anyhow::{Result, bail};
use log::{debug, info};
use serde::Serialize;

use crate::{
    cli::ProfileArgs,
    correlation::{self, CorrelationMatrix, correlation_matrix},
    infer::{TypedRow, classify_columns, column_names, type_rows},
    io_utils, record,
    stats::{ColumnStats, column_stats},
    table,
};

/// Everything the profiling pipeline produces for one dataset.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResult {
    pub rows: Vec<TypedRow>,
    pub columns: Vec<String>,
    pub numeric_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
    pub stats: Vec<ColumnStats>,
    pub correlations: CorrelationMatrix,
}

impl ProfileResult {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Profiles a parsed dataset. An empty record set produces the empty result
/// rather than an error; callers that need data decide for themselves.
pub fn profile(records: &[record::RawRecord]) -> ProfileResult {
    if records.is_empty() {
        return ProfileResult::default();
    }
    let columns = column_names(records);
    let rows = type_rows(records, &columns);
    let (numeric_columns, categorical_columns) = classify_columns(&rows, &columns);
    let stats = column_stats(&rows, &columns, &numeric_columns);
    let correlations = correlation_matrix(&rows, &numeric_columns);
    ProfileResult {
        rows,
        columns,
        numeric_columns,
        categorical_columns,
        stats,
        correlations,
    }
}

/// Reads a CSV input and profiles it. Errors when the input is oversized,
/// unreadable, or contains no data rows.
pub fn profile_file(
    input: &Path,
    delimiter: Option<u8>,
    encoding_label: Option<&str>,
    limit: usize,
    max_bytes: u64,
) -> Result<ProfileResult> {
    let delimiter = io_utils::resolve_input_delimiter(input, delimiter);
    let encoding = io_utils::resolve_encoding(encoding_label)?;
    debug!(
        "Reading {input:?} with delimiter '{}' and encoding {}",
        crate::printable_delimiter(delimiter),
        encoding.name()
    );
    record::enforce_size_limit(input, max_bytes)?;
    let records = record::read_records(input, delimiter, encoding, limit)?;
    if records.is_empty() {
        bail!("No data rows found in {input:?}");
    }
    let result = profile(&records);
    debug!(
        "Classified {} numeric and {} categorical column(s) in {input:?}",
        result.numeric_columns.len(),
        result.categorical_columns.len()
    );
    Ok(result)
}

pub fn execute(args: &ProfileArgs) -> Result<()> {
    let result = profile_file(
        &args.input,
        args.delimiter,
        args.input_encoding.as_deref(),
        args.limit,
        args.max_bytes,
    )?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    let overview_headers = vec![
        "rows".to_string(),
        "columns".to_string(),
        "numeric".to_string(),
        "categorical".to_string(),
    ];
    let overview_row = vec![
        result.row_count().to_string(),
        result.columns.len().to_string(),
        result.numeric_columns.len().to_string(),
        result.categorical_columns.len().to_string(),
    ];
    table::print_table(&overview_headers, &[overview_row]);

    println!();
    table::print_table(&stats_headers(), &stats_rows(&result.stats));

    if result.numeric_columns.len() >= 2 {
        println!();
        let (headers, rows) = correlation::matrix_table(&result.correlations);
        table::print_table(&headers, &rows);
    } else {
        info!("Correlation matrix skipped; it requires at least 2 numeric columns");
    }

    info!(
        "Profiled {} row(s) across {} column(s)",
        result.row_count(),
        result.columns.len()
    );
    Ok(())
}

fn stats_headers() -> Vec<String> {
    [
        "column", "type", "count", "nulls", "unique", "mean", "median", "std_dev", "min", "max",
        "mode",
    ]
    .iter()
    .map(|header| header.to_string())
    .collect()
}

fn stats_rows(stats: &[ColumnStats]) -> Vec<Vec<String>> {
    stats
        .iter()
        .map(|column| {
            vec![
                column.name.clone(),
                column.kind.to_string(),
                column.count.to_string(),
                column.null_count.to_string(),
                column.unique_count.to_string(),
                format_metric(column.mean),
                format_metric(column.median),
                format_metric(column.std),
                format_metric(column.min),
                format_metric(column.max),
                column.mode.clone().unwrap_or_default(),
            ]
        })
        .collect()
}

fn format_metric(metric: Option<f64>) -> String {
    metric.map(format_number).unwrap_or_default()
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.4}")
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;
    use crate::record::RawRecord;

    fn record(cells: &[(&str, &str)]) -> RawRecord {
        cells
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect::<IndexMap<_, _>>()
    }

    #[test]
    fn empty_input_profiles_to_the_empty_result() {
        let result = profile(&[]);
        assert_eq!(result, ProfileResult::default());
        assert_eq!(result.row_count(), 0);
        assert!(result.correlations.is_empty());
    }

    #[test]
    fn profile_wires_the_full_pipeline_together() {
        let records = vec![
            record(&[("a", "1"), ("b", "x")]),
            record(&[("a", "2"), ("b", "y")]),
            record(&[("a", "3"), ("b", "x")]),
        ];
        let result = profile(&records);
        assert_eq!(result.columns, ["a", "b"]);
        assert_eq!(result.numeric_columns, ["a"]);
        assert_eq!(result.categorical_columns, ["b"]);
        assert_eq!(result.stats.len(), 2);
        assert_eq!(result.stats[0].mean, Some(2.0));
        assert_eq!(result.stats[1].mode, Some("x".to_string()));
        assert_eq!(result.correlations.get("a", "a"), Some(1.0));
    }

    #[test]
    fn json_shape_uses_camel_case_keys() {
        let records = vec![record(&[("a", "1"), ("b", "x")])];
        let result = profile(&records);
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("numericColumns").is_some());
        assert!(json.get("categoricalColumns").is_some());
        let stats = json["stats"].as_array().unwrap();
        assert_eq!(stats[0]["type"], "numeric");
        assert_eq!(stats[1]["type"], "categorical");
        assert!(stats[0].get("nullCount").is_some());
        // Null cells serialize as JSON null, numbers as numbers.
        assert_eq!(json["rows"][0]["a"], 1.0);
    }
}
