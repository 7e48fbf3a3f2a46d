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

//! Error types for XML output and replay.

use rowtree_core::TreeError;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur while writing or replaying XML.
#[derive(Error, Debug)]
pub enum XmlError {
    /// The input document is not well-formed.
    ///
    /// ```text
    /// XML parse error at position 42: ill-formed document: expected `</r>`, but `</rs>` was found
    /// ```
    #[error("XML parse error at position {pos}: {message}")]
    Parse {
        /// Byte offset in the input where the error was detected.
        pos: usize,
        message: String,
    },

    /// quick-xml failed to write an event.
    #[error("XML write error: {0}")]
    Write(#[from] quick_xml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input names or output bytes were not valid UTF-8.
    #[error("Invalid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The downstream sink of a replay failed.
    #[error("Event sink error: {0}")]
    Sink(#[source] BoxError),

    /// Tree construction failed.
    #[error(transparent)]
    Tree(#[from] TreeError),
}

impl XmlError {
    /// Create a parse error at a byte offset.
    pub fn parse(pos: usize, message: impl std::fmt::Display) -> Self {
        Self::Parse {
            pos,
            message: message.to_string(),
        }
    }

    /// Wrap a downstream sink error.
    pub fn from_sink<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Sink(Box::new(err))
    }
}

/// Result alias for XML operations.
pub type XmlResult<T> = Result<T, XmlError>;
