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

//! Error types for tree construction.
//!
//! # Error Categories
//!
//! - **Parameter Errors**: a builder was configured with a selector that can
//!   never be valid (zero field index, non-positive id index, zero grouping
//!   width) or that points past the header
//! - **Field Errors**: a control field could not be read as the expected kind
//!   of value (for example a depth column holding `"abc"`)
//! - **Upstream Errors**: the row source or the event sink failed; the original
//!   error is kept as the [`source`](std::error::Error::source)
//!
//! Malformed tree shapes (depth gaps, unknown parent ids) are *not* errors.
//! The builders repair them and keep going.
//!
//! # Examples
//!
//! ```rust
//! use rowtree_core::{LevelTreeBuilder, TagNames, TreeError};
//!
//! let err = LevelTreeBuilder::new(0, TagNames::default()).unwrap_err();
//! assert!(matches!(err, TreeError::InvalidParameter { .. }));
//! assert!(err.to_string().contains("level_field"));
//! ```

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while building a tree from rows.
#[derive(Error, Debug)]
pub enum TreeError {
    /// A construction parameter was rejected.
    #[error("Invalid parameter {parameter}: {message}")]
    InvalidParameter {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Why it was rejected.
        message: String,
    },

    /// A control field of a row could not be interpreted.
    #[error("Invalid field at row {row}, column {column}: {message}")]
    InvalidField {
        /// Row number (1-based).
        row: usize,
        /// Column index (1-based).
        column: usize,
        message: String,
    },

    /// The row source failed.
    #[error("Row source error: {0}")]
    Source(#[source] BoxError),

    /// The event sink failed.
    #[error("Event sink error: {0}")]
    Sink(#[source] BoxError),
}

impl TreeError {
    /// Create a parameter error.
    #[inline]
    pub fn invalid_parameter(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            parameter,
            message: message.into(),
        }
    }

    /// Create a field error.
    #[inline]
    pub fn invalid_field(row: usize, column: usize, message: impl Into<String>) -> Self {
        Self::InvalidField {
            row,
            column,
            message: message.into(),
        }
    }

    /// Wrap a row source error.
    pub fn from_source<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Source(Box::new(err))
    }

    /// Wrap an event sink error.
    pub fn from_sink<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Sink(Box::new(err))
    }

    /// Get the row number if the error is tied to one.
    #[inline]
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::InvalidField { row, .. } => Some(*row),
            _ => None,
        }
    }

    /// True for errors raised by the row source or the sink rather than by
    /// the builder itself.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Source(_) | Self::Sink(_))
    }
}

/// Result type for tree construction.
pub type TreeResult<T> = Result<T, TreeError>;
