// rowtree - Streaming tree reconstruction from ordered rows
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! CSV files as a forward-only row source.

use crate::error::{CsvSourceError, Result};
use csv::StringRecord;
use rowtree_core::{Header, Row, RowSource, Value};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Configuration for reading CSV rows.
///
/// # Examples
///
/// ```
/// use rowtree_csv::CsvSourceConfig;
///
/// let config = CsvSourceConfig {
///     delimiter: b';',
///     infer_types: true,
///     ..Default::default()
/// };
/// assert!(config.has_headers);
/// ```
#[derive(Debug, Clone)]
pub struct CsvSourceConfig {
    /// Field delimiter (default: `,`).
    pub delimiter: u8,
    /// Whether the first record holds column names (default: `true`).
    ///
    /// Without headers, columns are named `col1`, `col2`, ... after the
    /// width of the first record.
    pub has_headers: bool,
    /// Trim leading/trailing whitespace from fields and names (default: `true`).
    pub trim: bool,
    /// Type fields as null, bool, int or float where they parse as such
    /// (default: `false`, every field is text).
    pub infer_types: bool,
    /// Type name per column, reported in the header. Empty means every
    /// column is `"text"`.
    pub column_types: Vec<String>,
}

impl Default for CsvSourceConfig {
    fn default() -> Self {
        Self {
            delimiter: b',',
            has_headers: true,
            trim: true,
            infer_types: false,
            column_types: Vec::new(),
        }
    }
}

/// A [`RowSource`] over CSV input.
///
/// One [`StringRecord`] and one [`Row`] are reused for every record, so
/// memory stays flat however long the input is.
///
/// # Examples
///
/// ```
/// use rowtree_core::{RowSource, Value};
/// use rowtree_csv::CsvRowSource;
///
/// let data = "id,name\n1,Ada\n2,Linus\n";
/// let mut source = CsvRowSource::new(data.as_bytes())?;
/// assert_eq!(source.header().name(2), Some("name"));
///
/// let first = source.next_row()?.map(|row| row.get(2).cloned());
/// assert_eq!(first, Some(Some(Value::from("Ada"))));
/// # Ok::<(), rowtree_csv::CsvSourceError>(())
/// ```
pub struct CsvRowSource<R> {
    reader: csv::Reader<R>,
    header: Header,
    record: StringRecord,
    row: Row,
    /// The first record was read to size a headerless file and is still
    /// waiting in `record`.
    buffered: bool,
    infer_types: bool,
    rows_read: usize,
}

impl<R: Read> CsvRowSource<R> {
    /// Read CSV with the default configuration.
    pub fn new(input: R) -> Result<Self> {
        Self::with_config(input, CsvSourceConfig::default())
    }

    pub fn with_config(input: R, config: CsvSourceConfig) -> Result<Self> {
        let reader = builder(&config).from_reader(input);
        Self::from_csv_reader(reader, config)
    }

    fn from_csv_reader(mut reader: csv::Reader<R>, config: CsvSourceConfig) -> Result<Self> {
        let mut record = StringRecord::new();
        let mut buffered = false;

        let names: Vec<String> = if config.has_headers {
            reader.headers()?.iter().map(str::to_owned).collect()
        } else {
            buffered = reader.read_record(&mut record)?;
            (1..=record.len()).map(|i| format!("col{}", i)).collect()
        };

        if !config.column_types.is_empty() && config.column_types.len() != names.len() {
            return Err(CsvSourceError::ColumnTypes {
                expected: names.len(),
                found: config.column_types.len(),
            });
        }

        let mut header = Header::new();
        for (i, name) in names.into_iter().enumerate() {
            let type_name = config
                .column_types
                .get(i)
                .map(String::as_str)
                .unwrap_or("text");
            header.push(name, type_name);
        }

        debug!(
            columns = header.len(),
            has_headers = config.has_headers,
            infer_types = config.infer_types,
            "opened CSV row source"
        );

        Ok(Self {
            reader,
            header,
            record,
            row: Row::default(),
            buffered,
            infer_types: config.infer_types,
            rows_read: 0,
        })
    }

    /// Number of rows handed out so far.
    pub fn rows_read(&self) -> usize {
        self.rows_read
    }
}

impl CsvRowSource<File> {
    /// Open a CSV file.
    pub fn from_path(path: impl AsRef<Path>, config: CsvSourceConfig) -> Result<Self> {
        let reader = builder(&config).from_path(path)?;
        Self::from_csv_reader(reader, config)
    }
}

fn builder(config: &CsvSourceConfig) -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder
        .delimiter(config.delimiter)
        .has_headers(config.has_headers)
        .trim(if config.trim {
            csv::Trim::All
        } else {
            csv::Trim::None
        });
    builder
}

impl<R: Read> RowSource for CsvRowSource<R> {
    type Error = CsvSourceError;

    fn header(&self) -> &Header {
        &self.header
    }

    fn next_row(&mut self) -> Result<Option<&Row>> {
        if self.buffered {
            self.buffered = false;
        } else if !self.reader.read_record(&mut self.record)? {
            return Ok(None);
        }
        self.rows_read += 1;

        let infer = self.infer_types;
        let values = self.row.values_mut();
        values.clear();
        values.extend(self.record.iter().map(|field| {
            if infer {
                infer_value(field)
            } else {
                Value::from(field)
            }
        }));
        Ok(Some(&self.row))
    }
}

/// Type a field from its text: empty is null, then bool, int, float, text.
fn infer_value(field: &str) -> Value {
    let trimmed = field.trim();
    if trimmed.is_empty() {
        return Value::Null;
    }
    match trimmed {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Value::Int(n);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Value::Float(f);
    }
    Value::from(field)
}
