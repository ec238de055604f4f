use anyhow::{Result, bail};
use log::info;

use crate::{
    cli::PreviewArgs,
    infer::{column_names, type_rows},
    io_utils, record, table,
};

/// Shows the first rows of a dataset as the profiler sees them: headers
/// trimmed, cells coerced, null cells blank.
pub fn execute(args: &PreviewArgs) -> Result<()> {
    let delimiter = io_utils::resolve_input_delimiter(&args.input, args.delimiter);
    let encoding = io_utils::resolve_encoding(args.input_encoding.as_deref())?;
    record::enforce_size_limit(&args.input, args.max_bytes)?;
    let records = record::read_records(&args.input, delimiter, encoding, args.rows)?;
    if records.is_empty() {
        bail!("No data rows found in {:?}", args.input);
    }
    let columns = column_names(&records);
    let typed = type_rows(&records, &columns);
    let rows: Vec<Vec<String>> = typed
        .iter()
        .map(|row| row.values().map(|value| value.as_display()).collect())
        .collect();
    table::print_table(&columns, &rows);
    info!("Displayed {} row(s) from {:?}", rows.len(), args.input);
    Ok(())
}
