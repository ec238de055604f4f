use std::{fs, path::Path};

use anyhow::{Context, Result, bail};
use encoding_rs::Encoding;
use indexmap::IndexMap;

use crate::io_utils;

/// One parsed CSV row: trimmed column name to raw cell text, in file order.
pub type RawRecord = IndexMap<String, String>;

/// Default cap on input file size: 10 MiB.
pub const DEFAULT_MAX_INPUT_BYTES: u64 = 10 * 1024 * 1024;

/// Rejects inputs larger than `max_bytes` before any parsing starts.
/// A limit of 0 disables the check, and stdin is never gated.
pub fn enforce_size_limit(path: &Path, max_bytes: u64) -> Result<()> {
    if max_bytes == 0 || io_utils::is_dash(path) {
        return Ok(());
    }
    let metadata =
        fs::metadata(path).with_context(|| format!("Reading metadata for {path:?}"))?;
    if metadata.len() > max_bytes {
        bail!(
            "Input file {:?} is {} bytes, over the {} byte limit; raise it with --max-bytes (0 disables)",
            path,
            metadata.len(),
            max_bytes
        );
    }
    Ok(())
}

/// Reads the whole input into memory as records keyed by header name.
///
/// Header names are trimmed of surrounding whitespace. Rows whose cells are
/// all empty are dropped. A `limit` above 0 stops after that many data rows
/// have been scanned.
pub fn read_records(
    path: &Path,
    delimiter: u8,
    encoding: &'static Encoding,
    limit: usize,
) -> Result<Vec<RawRecord>> {
    let mut reader = io_utils::open_csv_reader_from_path(path, delimiter)?;
    let headers: Vec<String> = io_utils::reader_headers(&mut reader, encoding)?
        .into_iter()
        .map(|header| header.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for (row_idx, record) in reader.byte_records().enumerate() {
        if limit > 0 && row_idx >= limit {
            break;
        }
        // Line numbers in errors are 1-based and count the header line.
        let record = record.with_context(|| format!("Reading row {}", row_idx + 2))?;
        let cells = io_utils::decode_record(&record, encoding)?;
        if cells.iter().all(|cell| cell.is_empty()) {
            continue;
        }
        let mut row = RawRecord::with_capacity(headers.len());
        for (idx, header) in headers.iter().enumerate() {
            let cell = cells.get(idx).cloned().unwrap_or_default();
            row.insert(header.clone(), cell);
        }
        records.push(row);
    }
    Ok(records)
}
