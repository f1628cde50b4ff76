// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared plumbing of the `;` separated record files.

use rayon::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{Error, Result};

pub const SEPARATOR: char = ';';

/// Result of reading a record file: the readable records plus one message
/// per unreadable line
#[derive(Debug, Clone, Default)]
pub struct CsvBatch<T> {
    pub items: Vec<T>,
    pub errors: Vec<String>,
}

impl<T> CsvBatch<T> {
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Split a record into its fields.
pub(crate) fn fields(line: &str) -> Vec<&str> {
    line.split(SEPARATOR).collect()
}

/// Reject empty lines before splitting.
pub(crate) fn non_empty<'a>(line: &'a str, source_name: &'static str) -> Result<&'a str> {
    if line.is_empty() {
        Err(Error::EmptyLine(source_name))
    } else {
        Ok(line)
    }
}

pub(crate) fn unreadable(source_name: &'static str, line: &str) -> Error {
    Error::UnreadableLine {
        source_name,
        line: line.to_string(),
    }
}

/// Parse every line after the header.
///
/// Lines are parsed in parallel; records and messages keep file order.
/// Messages read `Line {n} has Error: {message}` with the header as line 1.
pub(crate) fn parse_lines<T, F>(content: &str, source_name: &'static str, parse: F) -> Result<CsvBatch<T>>
where
    T: Send,
    F: Fn(&str) -> Result<T> + Sync,
{
    let lines: Vec<&str> = content.lines().collect();
    if lines.len() <= 1 {
        return Err(Error::NoData(source_name));
    }

    let results: Vec<Result<T>> = lines[1..].par_iter().map(|line| parse(line)).collect();

    let mut batch = CsvBatch {
        items: Vec::with_capacity(results.len()),
        errors: Vec::new(),
    };
    for (i, result) in results.into_iter().enumerate() {
        match result {
            Ok(item) => batch.items.push(item),
            Err(e) => {
                let message = format!("Line {} has Error: {}", i + 2, e);
                tracing::warn!(source = source_name, line = i + 2, error = %e, "Unreadable CSV line");
                batch.errors.push(message);
            }
        }
    }

    tracing::debug!(
        source = source_name,
        records = batch.items.len(),
        errors = batch.errors.len(),
        "Parsed CSV"
    );
    Ok(batch)
}

/// Read a whole file and parse it with [`parse_lines`].
pub(crate) fn read_file<T, F>(path: &Path, source_name: &'static str, parse: F) -> Result<CsvBatch<T>>
where
    T: Send,
    F: Fn(&str) -> Result<T> + Sync,
{
    let content = std::fs::read_to_string(path)?;
    tracing::info!(path = %path.display(), bytes = content.len(), "Reading {}", source_name);
    parse_lines(&content, source_name, parse)
}

/// Write a header and one line per record.
pub(crate) fn write_file<I>(path: &Path, header: &str, lines: I) -> Result<usize>
where
    I: IntoIterator<Item = String>,
{
    let mut out = BufWriter::new(File::create(path)?);
    writeln!(out, "{}", header)?;
    let mut count = 0;
    for line in lines {
        writeln!(out, "{}", line)?;
        count += 1;
    }
    out.flush()?;
    tracing::info!(path = %path.display(), records = count, "Wrote CSV");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_int(line: &str) -> Result<i64> {
        let line = non_empty(line, "Test")?;
        line.parse().map_err(|_| unreadable("Test", line))
    }

    #[test]
    fn test_partial_failures_keep_order() {
        let batch = parse_lines("Value\n1\nx\n3\n\n5", "Test", parse_int).unwrap();
        assert_eq!(batch.items, vec![1, 3, 5]);
        assert_eq!(batch.errors.len(), 2);
        assert_eq!(batch.errors[0], "Line 3 has Error: Test: Line: x is not readable");
        assert!(batch.errors[1].starts_with("Line 5 has Error: "));
        assert!(!batch.is_clean());
    }

    #[test]
    fn test_header_only_has_no_data() {
        let err = parse_lines::<i64, _>("Value\n", "Test", parse_int).unwrap_err();
        assert_eq!(err.to_string(), "Test: CSV-File has no data lines");
    }
}
