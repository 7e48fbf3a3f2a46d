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

//! Error types for the CSV row source.

use thiserror::Error;

/// CSV row source error types.
///
/// # Examples
///
/// ```
/// use rowtree_csv::CsvSourceError;
///
/// let err = CsvSourceError::ColumnTypes { expected: 3, found: 2 };
/// assert_eq!(
///     err.to_string(),
///     "Column type count mismatch: 3 columns, 2 type names"
/// );
/// ```
#[derive(Debug, Error)]
pub enum CsvSourceError {
    /// The underlying CSV reader failed: I/O, invalid UTF-8, or a record
    /// with the wrong number of fields.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// `column_types` was given but does not cover every column.
    #[error("Column type count mismatch: {expected} columns, {found} type names")]
    ColumnTypes { expected: usize, found: usize },
}

impl CsvSourceError {
    /// Line in the input where the error was detected, if known (1-based).
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::Csv(err) => err.position().map(|p| p.line()),
            Self::ColumnTypes { .. } => None,
        }
    }
}

/// Result alias for CSV source operations.
pub type Result<T> = std::result::Result<T, CsvSourceError>;
