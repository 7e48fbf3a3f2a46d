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

//! Parent-link ("connect-by-prior") construction.
//!
//! Each row carries its own id and its parent's id. Rows must arrive in
//! preorder: a node's descendants immediately follow it. The builder keeps
//! the ids of the open ancestors on a stack; a row closes ancestors until
//! the top of the stack is its parent, then opens itself and is pushed.
//!
//! A parent id that matches nothing open (including a null parent) unwinds
//! the stack completely and the row becomes a child of the root. Input that
//! is not in preorder yields a differently shaped tree, never an unbalanced
//! one.

use tracing::debug;

use crate::builder::{check_column, sink, strip_count, Record, TreeBuilder};
use crate::error::{TreeError, TreeResult};
use crate::row::Header;
use crate::sink::{EventSink, TagNames};

/// Builds a tree from id and parent-id columns.
///
/// `parent_field` is the 1-based parent column; when negative, that many
/// leading columns are dropped from the emitted attributes. `id_field` must
/// be positive. Both columns are still read when stripped.
///
/// # Examples
///
/// ```rust
/// use rowtree_core::{ParentLinkTreeBuilder, TagNames};
///
/// let builder = ParentLinkTreeBuilder::new(-1, 2, TagNames::default()).unwrap();
/// assert_eq!(builder.depth(), 0);
///
/// assert!(ParentLinkTreeBuilder::new(0, 2, TagNames::default()).is_err());
/// assert!(ParentLinkTreeBuilder::new(1, -2, TagNames::default()).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ParentLinkTreeBuilder {
    tags: TagNames,
    parent_field: i32,
    id_field: i32,
    strip: usize,
    /// Ids of the open records, innermost last. Owned copies: the row
    /// buffer they came from is gone by the time they are compared.
    stack: Vec<Option<String>>,
}

impl ParentLinkTreeBuilder {
    pub fn new(parent_field: i32, id_field: i32, tags: TagNames) -> TreeResult<Self> {
        if parent_field == 0 {
            return Err(TreeError::invalid_parameter(
                "parent_field",
                "must be non-zero",
            ));
        }
        if id_field <= 0 {
            return Err(TreeError::invalid_parameter(
                "id_field",
                format!("must be positive, got {}", id_field),
            ));
        }
        Ok(Self {
            tags,
            parent_field,
            id_field,
            strip: strip_count(parent_field),
            stack: Vec::new(),
        })
    }

    /// Number of records currently open (the root is not counted).
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    fn parent_column(&self) -> usize {
        self.parent_field.unsigned_abs() as usize
    }

    fn id_column(&self) -> usize {
        self.id_field as usize
    }
}

impl TreeBuilder for ParentLinkTreeBuilder {
    fn begin<S: EventSink>(&mut self, header: &Header, out: &mut S) -> TreeResult<()> {
        check_column("parent_field", self.parent_field, header)?;
        check_column("id_field", self.id_field, header)?;
        sink(out.open(&self.tags.root, header.attributes().skip(self.strip)))
    }

    fn push_row<S: EventSink>(&mut self, record: Record<'_>, out: &mut S) -> TreeResult<()> {
        let parent = record.row.get(self.parent_column()).and_then(|v| v.as_text());

        let open_before = self.stack.len();
        while let Some(top) = self.stack.last() {
            if parent.is_some() && top.as_deref() == parent.as_deref() {
                break;
            }
            self.stack.pop();
            sink(out.close(&self.tags.record))?;
        }
        if self.stack.is_empty() && open_before > 0 && parent.is_some() {
            debug!(
                row = record.number,
                parent = parent.as_deref().unwrap_or_default(),
                "parent not open, attaching to root"
            );
        }

        sink(out.open(&self.tags.record, record.attributes.skip(self.strip)))?;

        let id = record
            .row
            .get(self.id_column())
            .and_then(|v| v.as_text())
            .map(|id| id.into_owned());
        self.stack.push(id);
        Ok(())
    }

    fn finish<S: EventSink>(&mut self, out: &mut S) -> TreeResult<()> {
        while self.stack.pop().is_some() {
            sink(out.close(&self.tags.record))?;
        }
        sink(out.close(&self.tags.root))
    }
}
