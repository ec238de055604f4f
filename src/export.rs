use std::path::Path;

use anyhow::{Result, bail};
use log::info;

use crate::{
    cli::ExportArgs,
    io_utils,
    profile::{self, ProfileResult},
};

const STATS_HEADERS: [&str; 11] = [
    "Column",
    "Type",
    "Count",
    "Null Count",
    "Unique Count",
    "Mean",
    "Median",
    "Std Dev",
    "Min",
    "Max",
    "Mode",
];

pub fn execute(args: &ExportArgs) -> Result<()> {
    if args.stats.is_none() && args.correlations.is_none() {
        bail!("Nothing to export; pass --stats and/or --correlations");
    }
    let result = profile::profile_file(
        &args.input,
        args.delimiter,
        args.input_encoding.as_deref(),
        args.limit,
        args.max_bytes,
    )?;
    if let Some(path) = &args.stats {
        write_stats_csv(&result, path)?;
        info!("Wrote summary statistics to {path:?}");
    }
    if let Some(path) = &args.correlations {
        if result.numeric_columns.len() < 2 {
            bail!(
                "Correlation export requires at least 2 numeric columns; found {}",
                result.numeric_columns.len()
            );
        }
        write_correlation_csv(&result, path)?;
        info!("Wrote correlation matrix to {path:?}");
    }
    Ok(())
}

/// Writes one row per column with 4-decimal statistics; fields that do not
/// apply to the column's kind hold `N/A`.
pub fn write_stats_csv(result: &ProfileResult, path: &Path) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(Some(path))?;
    writer.write_record(STATS_HEADERS)?;
    for stat in &result.stats {
        let row = vec![
            stat.name.clone(),
            stat.kind.to_string(),
            stat.count.to_string(),
            stat.null_count.to_string(),
            stat.unique_count.to_string(),
            format_stat(stat.mean),
            format_stat(stat.median),
            format_stat(stat.std),
            format_stat(stat.min),
            format_stat(stat.max),
            stat.mode.clone().unwrap_or_else(|| "N/A".to_string()),
        ];
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the square correlation matrix with a `Variable` label column and
/// 4-decimal coefficients.
pub fn write_correlation_csv(result: &ProfileResult, path: &Path) -> Result<()> {
    let mut writer = io_utils::open_csv_writer(Some(path))?;
    let mut headers = vec!["Variable".to_string()];
    headers.extend(result.numeric_columns.iter().cloned());
    writer.write_record(&headers)?;
    for row_name in &result.numeric_columns {
        let mut row = vec![row_name.clone()];
        for column_name in &result.numeric_columns {
            let r = result
                .correlations
                .get(row_name, column_name)
                .unwrap_or(0.0);
            row.push(format!("{r:.4}"));
        }
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn format_stat(value: Option<f64>) -> String {
    value
        .map(|value| format!("{value:.4}"))
        .unwrap_or_else(|| "N/A".to_string())
}
