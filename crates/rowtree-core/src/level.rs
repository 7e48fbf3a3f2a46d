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

//! Level-based construction: each row names its own depth.
//!
//! The depth column plus row order fully determine the tree. A row at depth
//! `d` closes every open record at depth `>= d` and opens itself at `d`.
//!
//! A row that jumps more than one level below the deepest open record does
//! not abort the stream. Empty filler records are opened to bridge the gap,
//! so the row still lands at the depth it asked for.

use tracing::{debug, warn};

use crate::attributes::AttributeView;
use crate::builder::{check_column, sink, strip_count, Record, TreeBuilder};
use crate::error::{TreeError, TreeResult};
use crate::row::Header;
use crate::sink::{EventSink, TagNames};

/// Builds a tree from a depth column.
///
/// `level_field` is the 1-based depth column. When negative, the column
/// `|level_field|` is read and it plus every column left of it is dropped
/// from the emitted attributes.
///
/// # Cost of depth gaps
///
/// A gap is bridged with one filler record per missing level, so a single
/// row at depth `n` emits `n` opens and, eventually, `n` closes. Depth
/// values are not capped; a gap wider than [`LARGE_DEPTH_GAP`] is logged at
/// `warn` level.
///
/// # Examples
///
/// ```rust
/// use rowtree_core::{LevelTreeBuilder, TagNames};
///
/// let builder = LevelTreeBuilder::new(-1, TagNames::default()).unwrap();
/// assert_eq!(builder.depth(), 0);
///
/// assert!(LevelTreeBuilder::new(0, TagNames::default()).is_err());
/// ```
/// Gap width above which filler insertion is logged as a warning.
pub const LARGE_DEPTH_GAP: usize = 1024;

#[derive(Debug, Clone)]
pub struct LevelTreeBuilder {
    tags: TagNames,
    level_field: i32,
    column: usize,
    strip: usize,
    depth: usize,
}

impl LevelTreeBuilder {
    pub fn new(level_field: i32, tags: TagNames) -> TreeResult<Self> {
        if level_field == 0 {
            return Err(TreeError::invalid_parameter(
                "level_field",
                "must be non-zero",
            ));
        }
        Ok(Self {
            tags,
            level_field,
            column: level_field.unsigned_abs() as usize,
            strip: strip_count(level_field),
            depth: 0,
        })
    }

    /// Number of records currently open (the root is not counted).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    fn read_depth(&self, record: &Record<'_>) -> TreeResult<usize> {
        let value = record.row.get(self.column).ok_or_else(|| {
            TreeError::invalid_field(record.number, self.column, "missing depth column")
        })?;
        let depth = value
            .as_depth()
            .map_err(|msg| TreeError::invalid_field(record.number, self.column, msg))?;
        // depths at or below zero attach directly under the root
        Ok(usize::try_from(depth.max(1)).unwrap_or(usize::MAX))
    }
}

impl TreeBuilder for LevelTreeBuilder {
    fn begin<S: EventSink>(&mut self, header: &Header, out: &mut S) -> TreeResult<()> {
        check_column("level_field", self.level_field, header)?;
        sink(out.open(&self.tags.root, header.attributes().skip(self.strip)))
    }

    fn push_row<S: EventSink>(&mut self, record: Record<'_>, out: &mut S) -> TreeResult<()> {
        let target = self.read_depth(&record)?;

        while self.depth >= target {
            sink(out.close(&self.tags.record))?;
            self.depth -= 1;
        }

        self.depth += 1;

        if target - self.depth > LARGE_DEPTH_GAP {
            warn!(
                row = record.number,
                from = self.depth,
                to = target,
                "large depth gap, inserting {} filler records",
                target - self.depth
            );
        } else if target > self.depth {
            debug!(
                row = record.number,
                from = self.depth,
                to = target,
                "depth gap, inserting filler records"
            );
        }
        while self.depth < target {
            sink(out.open(&self.tags.record, AttributeView::empty()))?;
            self.depth += 1;
        }

        sink(out.open(&self.tags.record, record.attributes.skip(self.strip)))
    }

    fn finish<S: EventSink>(&mut self, out: &mut S) -> TreeResult<()> {
        while self.depth > 0 {
            sink(out.close(&self.tags.record))?;
            self.depth -= 1;
        }
        sink(out.close(&self.tags.root))
    }
}
