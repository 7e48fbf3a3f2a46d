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

//! Row sources: headers, rows and the forward-only iteration contract.
//!
//! A [`RowSource`] yields one row at a time. The row it returns borrows the
//! source, which is free to overwrite the same buffer on the next call. Any
//! builder state that must survive from one row to the next is therefore an
//! owned snapshot, never a reference into the row.

use crate::attributes::AttributeView;
use crate::value::Value;

/// Column names and type names, valid for the whole stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    names: Vec<String>,
    type_names: Vec<String>,
}

impl Header {
    /// Create an empty header.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a header from `(name, type_name)` pairs.
    pub fn from_columns<N, T>(columns: impl IntoIterator<Item = (N, T)>) -> Self
    where
        N: Into<String>,
        T: Into<String>,
    {
        let mut header = Self::new();
        for (name, type_name) in columns {
            header.push(name, type_name);
        }
        header
    }

    /// Append a column.
    pub fn push(&mut self, name: impl Into<String>, type_name: impl Into<String>) {
        self.names.push(name.into());
        self.type_names.push(type_name.into());
    }

    /// Number of columns.
    #[inline]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Column name by 1-based index.
    pub fn name(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.names.get(i))
            .map(String::as_str)
    }

    /// Column type name by 1-based index.
    pub fn type_name(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.type_names.get(i))
            .map(String::as_str)
    }

    /// All column names in order.
    #[inline]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// The header as attributes: column name to type name.
    pub fn attributes(&self) -> AttributeView<'_> {
        AttributeView::new(&self.names, &self.type_names)
    }
}

/// One row of field values, addressed by 1-based position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: Vec<Value>,
}

impl Row {
    pub fn new(values: Vec<Value>) -> Self {
        Self { values }
    }

    /// Field value by 1-based index.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&Value> {
        index.checked_sub(1).and_then(|i| self.values.get(i))
    }

    #[inline]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Mutable access to the backing buffer, for sources that refill one row
    /// in place.
    pub fn values_mut(&mut self) -> &mut Vec<Value> {
        &mut self.values
    }
}

impl FromIterator<Value> for Row {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// Forward-only iteration over rows.
///
/// # Examples
///
/// ```rust
/// use rowtree_core::{Header, Row, RowSource, Value, VecRowSource};
///
/// let header = Header::from_columns([("id", "int")]);
/// let mut source = VecRowSource::new(header, vec![Row::new(vec![Value::Int(1)])]);
///
/// let mut ids = Vec::new();
/// while let Some(row) = source.next_row().unwrap() {
///     ids.push(row.get(1).cloned());
/// }
/// assert_eq!(ids, vec![Some(Value::Int(1))]);
/// ```
pub trait RowSource {
    /// Error raised while advancing; passed through to the caller unchanged.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Column header for the whole stream.
    fn header(&self) -> &Header;

    /// Advance to the next row. `Ok(None)` means the source is exhausted.
    fn next_row(&mut self) -> Result<Option<&Row>, Self::Error>;
}

impl<R: RowSource + ?Sized> RowSource for &mut R {
    type Error = R::Error;

    fn header(&self) -> &Header {
        (**self).header()
    }

    fn next_row(&mut self) -> Result<Option<&Row>, Self::Error> {
        (**self).next_row()
    }
}

/// In-memory row source.
///
/// Each row is copied into a single reused buffer before being handed out,
/// the same way a database cursor hands out its current row.
#[derive(Debug, Clone)]
pub struct VecRowSource {
    header: Header,
    rows: Vec<Row>,
    cursor: usize,
    current: Row,
}

impl VecRowSource {
    pub fn new(header: Header, rows: Vec<Row>) -> Self {
        Self {
            header,
            rows,
            cursor: 0,
            current: Row::default(),
        }
    }

    /// Rows not yet handed out.
    pub fn remaining(&self) -> usize {
        self.rows.len() - self.cursor
    }
}

impl RowSource for VecRowSource {
    type Error = std::convert::Infallible;

    fn header(&self) -> &Header {
        &self.header
    }

    fn next_row(&mut self) -> Result<Option<&Row>, Self::Error> {
        match self.rows.get(self.cursor) {
            Some(next) => {
                self.cursor += 1;
                self.current.values.clone_from(&next.values);
                Ok(Some(&self.current))
            }
            None => Ok(None),
        }
    }
}
