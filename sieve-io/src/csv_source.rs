// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::cells::RawCell;
use crate::sheet::RawSheet;
use sieve_core::LoadError;
use std::path::Path;

fn csv_error(path: &Path, err: &csv::Error) -> LoadError {
    match err.kind() {
        csv::ErrorKind::Io(io) => LoadError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(io.kind(), io.to_string()),
        },
        _ => LoadError::Csv {
            path: path.to_path_buf(),
            context: err.to_string(),
        },
    }
}

/// Reads a CSV file with a header row. Rows must all have the header's width.
pub(crate) fn read(path: &Path) -> Result<RawSheet, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_path(path)
        .map_err(|e| csv_error(path, &e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| csv_error(path, &e))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| csv_error(path, &e))?;
        rows.push(record.iter().map(RawCell::from_text).collect());
    }

    Ok(RawSheet { headers, rows })
}
