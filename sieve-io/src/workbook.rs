// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::cells::{parse_date, RawCell};
use crate::sheet::RawSheet;
use calamine::{open_workbook_auto, Data, Reader};
use sieve_core::LoadError;
use std::path::Path;

/// Reads one worksheet; the first row is the header.
pub(crate) fn read(path: &Path, sheet: Option<&str>) -> Result<RawSheet, LoadError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| LoadError::workbook(path, e.to_string()))?;

    let sheet_name = match sheet {
        Some(name) => name.to_string(),
        None => workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| LoadError::workbook(path, "workbook has no sheets"))?,
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| LoadError::workbook(path, format!("sheet {sheet_name}: {e}")))?;

    let mut rows = range.rows();
    let headers = match rows.next() {
        Some(header) => header.iter().map(|c| header_text(c)).collect(),
        None => Vec::new(),
    };

    let mut body = Vec::new();
    for (index, row) in rows.enumerate() {
        let cells = row
            .iter()
            .enumerate()
            .map(|(col, cell)| {
                to_raw(cell).ok_or_else(|| {
                    LoadError::workbook(
                        path,
                        format!(
                            "sheet {sheet_name}: error cell {cell} at row {}, column {}",
                            index + 2,
                            col + 1
                        ),
                    )
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        body.push(cells);
    }

    Ok(RawSheet {
        headers,
        rows: body,
    })
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        other => other.to_string().trim().to_string(),
    }
}

/// `None` for spreadsheet error cells (`#DIV/0!` and friends).
fn to_raw(cell: &Data) -> Option<RawCell> {
    Some(match cell {
        Data::Empty => RawCell::Empty,
        Data::String(text) => RawCell::from_text(text),
        Data::Float(f) => RawCell::Number(*f),
        Data::Int(i) => RawCell::Number(*i as f64),
        Data::Bool(b) => RawCell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(dt) => RawCell::Date(dt.date()),
            None => RawCell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(text) => match parse_date(text) {
            Some(date) => RawCell::Date(date),
            None => RawCell::from_text(text),
        },
        Data::DurationIso(text) => RawCell::from_text(text),
        Data::Error(_) => return None,
    })
}
