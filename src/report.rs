use std::fmt::Write as _;
use std::fs;

use anyhow::{Context, Result};
use chrono::Local;
use itertools::Itertools;
use log::info;

use crate::{
    cli::ReportArgs,
    infer::ColumnKind,
    io_utils,
    profile::{self, ProfileResult},
    table,
};

/// The report summarizes at most this many columns.
const SUMMARY_ROW_LIMIT: usize = 15;
/// The report's correlation block shows at most this many columns.
const MATRIX_COLUMN_LIMIT: usize = 6;

pub fn execute(args: &ReportArgs) -> Result<()> {
    let result = profile::profile_file(
        &args.input,
        args.delimiter,
        args.input_encoding.as_deref(),
        args.limit,
        args.max_bytes,
    )?;
    let generated_on = Local::now().format("%Y-%m-%d").to_string();
    let report = render_report(&result, &generated_on);
    match &args.output {
        Some(path) if !io_utils::is_dash(path) => {
            fs::write(path, &report)
                .with_context(|| format!("Writing report to {path:?}"))?;
            info!("Wrote analysis report to {path:?}");
        }
        _ => print!("{report}"),
    }
    Ok(())
}

/// Renders the full plain-text report. The caller supplies the date line so
/// the output is reproducible.
pub fn render_report(result: &ProfileResult, generated_on: &str) -> String {
    let mut out = String::new();
    heading(&mut out, "CSV Analysis Report", '=');
    let _ = writeln!(out, "Generated on: {generated_on}");
    let _ = writeln!(
        out,
        "Dataset: {} rows x {} columns",
        result.row_count(),
        result.columns.len()
    );
    let _ = writeln!(out);

    heading(&mut out, "Dataset Overview", '-');
    let _ = writeln!(out, "Total Rows: {}", result.row_count());
    let _ = writeln!(out, "Total Columns: {}", result.columns.len());
    let _ = writeln!(out, "Numeric Columns: {}", result.numeric_columns.len());
    let _ = writeln!(
        out,
        "Categorical Columns: {}",
        result.categorical_columns.len()
    );
    let _ = writeln!(out);

    heading(&mut out, "Summary Statistics", '-');
    out.push_str(&table::render_table(&summary_headers(), &summary_rows(result)));
    if result.stats.len() > SUMMARY_ROW_LIMIT {
        let _ = writeln!(
            out,
            "(showing first {SUMMARY_ROW_LIMIT} of {} columns)",
            result.stats.len()
        );
    }

    if result.numeric_columns.len() >= 2 {
        let _ = writeln!(out);
        heading(&mut out, "Correlation Matrix", '-');
        out.push_str(&table::render_table(
            &matrix_headers(result),
            &matrix_rows(result),
        ));
        if result.numeric_columns.len() > MATRIX_COLUMN_LIMIT {
            let _ = writeln!(
                out,
                "(showing first {MATRIX_COLUMN_LIMIT} of {} numeric columns)",
                result.numeric_columns.len()
            );
        }
    }
    out
}

fn heading(out: &mut String, text: &str, underline: char) {
    let _ = writeln!(out, "{text}");
    let _ = writeln!(out, "{}", underline.to_string().repeat(text.chars().count()));
}

fn summary_headers() -> Vec<String> {
    ["Column", "Type", "Count", "Null", "Unique", "Mean/Mode"]
        .iter()
        .map(|header| header.to_string())
        .collect()
}

fn summary_rows(result: &ProfileResult) -> Vec<Vec<String>> {
    result
        .stats
        .iter()
        .take(SUMMARY_ROW_LIMIT)
        .map(|stat| {
            let highlight = match stat.kind {
                ColumnKind::Numeric => stat
                    .mean
                    .map(|mean| format!("{mean:.2}"))
                    .unwrap_or_else(|| "N/A".to_string()),
                ColumnKind::Categorical => stat
                    .mode
                    .as_deref()
                    .map(|mode| clip(mode, 10, ""))
                    .unwrap_or_else(|| "N/A".to_string()),
            };
            vec![
                clip(&stat.name, 15, "..."),
                stat.kind.to_string(),
                stat.count.to_string(),
                stat.null_count.to_string(),
                stat.unique_count.to_string(),
                highlight,
            ]
        })
        .collect()
}

fn matrix_headers(result: &ProfileResult) -> Vec<String> {
    let mut headers = vec![String::new()];
    headers.extend(
        result
            .numeric_columns
            .iter()
            .take(MATRIX_COLUMN_LIMIT)
            .map(|name| clip(name, 8, "..")),
    );
    headers
}

fn matrix_rows(result: &ProfileResult) -> Vec<Vec<String>> {
    let shown = result
        .numeric_columns
        .iter()
        .take(MATRIX_COLUMN_LIMIT)
        .collect_vec();
    shown
        .iter()
        .map(|row_name| {
            let mut cells = vec![clip(row_name, 12, "..")];
            for column_name in &shown {
                let r = result
                    .correlations
                    .get(row_name, column_name)
                    .unwrap_or(0.0);
                cells.push(format!("{r:.2}"));
            }
            cells
        })
        .collect()
}

fn clip(text: &str, limit: usize, suffix: &str) -> String {
    if text.chars().count() > limit {
        let mut clipped: String = text.chars().take(limit).collect();
        clipped.push_str(suffix);
        clipped
    } else {
        text.to_string()
    }
}
