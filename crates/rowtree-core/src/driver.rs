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

//! Pull rows from a source, push tree events into a sink.

use std::fmt;

use tracing::debug;

use crate::attributes::AttributeView;
use crate::builder::{sink, FlatEmitter, Record, TreeBuilder};
use crate::error::{TreeError, TreeResult};
use crate::group::{Grouping, PrefixGroupBuilder};
use crate::level::LevelTreeBuilder;
use crate::parent::ParentLinkTreeBuilder;
use crate::row::RowSource;
use crate::sink::{EventSink, TagNames};
use crate::value::{default_serializer, Serializer, Value};

/// Which tree to build from the rows.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Layout {
    /// One record per row under the root.
    Flat,
    /// Nesting from a depth column (see [`LevelTreeBuilder`]).
    ByLevel { level_field: i32 },
    /// Nesting from id / parent-id columns (see [`ParentLinkTreeBuilder`]).
    ConnectByPrior { parent_field: i32, id_field: i32 },
    /// Shared group elements over leading values (see [`PrefixGroupBuilder`]).
    Grouped { grouping: Grouping },
}

impl Layout {
    /// Depth in the first column, which is not emitted.
    pub fn by_level() -> Self {
        Layout::ByLevel { level_field: -1 }
    }

    /// Parent id in the first column (not emitted), id in the second.
    pub fn connect_by_prior() -> Self {
        Layout::ConnectByPrior {
            parent_field: -1,
            id_field: 2,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Layout::Flat => "flat",
            Layout::ByLevel { .. } => "by-level",
            Layout::ConnectByPrior { .. } => "connect-by-prior",
            Layout::Grouped { .. } => "grouped",
        }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::Flat
    }
}

/// Configuration for [`transform`].
///
/// # Examples
///
/// ```rust
/// use rowtree_core::{Layout, TransformConfig, Value};
/// use std::sync::Arc;
///
/// let config = TransformConfig {
///     layout: Layout::by_level(),
///     serializer: Some(Arc::new(|v: &Value| v.to_string().to_uppercase())),
///     ..Default::default()
/// };
/// assert_eq!(config.tags.record, "r");
/// ```
#[derive(Clone)]
pub struct TransformConfig {
    pub layout: Layout,
    /// Element names (default: `rs` / `r` / `g`).
    pub tags: TagNames,
    /// Value-to-text conversion for record attributes. `None` uses
    /// [`default_serializer`].
    pub serializer: Option<Serializer>,
    /// Emit a `Grouping[..]` comment under the root for grouped layouts
    /// (default: `true`).
    pub annotate_grouping: bool,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            tags: TagNames::default(),
            serializer: None,
            annotate_grouping: true,
        }
    }
}

impl fmt::Debug for TransformConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransformConfig")
            .field("layout", &self.layout)
            .field("tags", &self.tags)
            .field("serializer", &self.serializer.as_ref().map(|_| "custom"))
            .field("annotate_grouping", &self.annotate_grouping)
            .finish()
    }
}

/// Build the configured tree from `source` into `sink`.
///
/// Brackets the output with `start_stream` / `end_stream` and returns the
/// number of rows consumed. If the source or sink fails, the error is
/// returned as is and the partially written stream is left open.
///
/// # Examples
///
/// ```rust
/// use rowtree_core::{transform, Header, Layout, Row, TransformConfig, Value, VecRowSource};
/// # use rowtree_core::{AttributeView, EventSink};
/// # #[derive(Default)]
/// # struct Depth { now: usize, max: usize }
/// # impl EventSink for Depth {
/// #     type Error = std::convert::Infallible;
/// #     fn start_stream(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn end_stream(&mut self) -> Result<(), Self::Error> { Ok(()) }
/// #     fn open(&mut self, _: &str, _: AttributeView<'_>) -> Result<(), Self::Error> {
/// #         self.now += 1; self.max = self.max.max(self.now); Ok(())
/// #     }
/// #     fn close(&mut self, _: &str) -> Result<(), Self::Error> { self.now -= 1; Ok(()) }
/// #     fn text(&mut self, _: &str) -> Result<(), Self::Error> { Ok(()) }
/// # }
///
/// let header = Header::from_columns([("level", "int"), ("name", "text")]);
/// let rows = [(1, "root"), (2, "child"), (3, "grandchild")]
///     .into_iter()
///     .map(|(l, n)| Row::new(vec![Value::Int(l), Value::from(n)]))
///     .collect();
/// let mut source = VecRowSource::new(header, rows);
///
/// let config = TransformConfig { layout: Layout::by_level(), ..Default::default() };
/// let mut sink = Depth::default();
/// let count = transform(&mut source, &mut sink, &config)?;
///
/// assert_eq!(count, 3);
/// assert_eq!(sink.max, 4); // root element plus three levels
/// assert_eq!(sink.now, 0);
/// # Ok::<(), rowtree_core::TreeError>(())
/// ```
pub fn transform<R, S>(source: &mut R, sink: &mut S, config: &TransformConfig) -> TreeResult<usize>
where
    R: RowSource,
    S: EventSink,
{
    debug!(layout = config.layout.name(), "starting transform");

    let tags = config.tags.clone();
    let count = match &config.layout {
        Layout::Flat => drive(FlatEmitter::new(tags), source, sink, config)?,
        Layout::ByLevel { level_field } => {
            drive(LevelTreeBuilder::new(*level_field, tags)?, source, sink, config)?
        }
        Layout::ConnectByPrior {
            parent_field,
            id_field,
        } => drive(
            ParentLinkTreeBuilder::new(*parent_field, *id_field, tags)?,
            source,
            sink,
            config,
        )?,
        Layout::Grouped { grouping } => drive(
            PrefixGroupBuilder::new(grouping.clone(), tags)
                .with_annotation(config.annotate_grouping),
            source,
            sink,
            config,
        )?,
    };

    debug!(rows = count, "transform complete");
    Ok(count)
}

/// Run one builder over the whole source.
pub fn drive<B, R, S>(
    mut builder: B,
    source: &mut R,
    out: &mut S,
    config: &TransformConfig,
) -> TreeResult<usize>
where
    B: TreeBuilder,
    R: RowSource,
    S: EventSink,
{
    let serialize: &(dyn Fn(&Value) -> String + Send + Sync) = match &config.serializer {
        Some(f) => f.as_ref(),
        None => &default_serializer,
    };

    sink(out.start_stream())?;
    builder.begin(source.header(), out)?;

    // the header outlives each row borrow, so keep its names
    let names = source.header().names().to_vec();
    let mut values: Vec<String> = Vec::with_capacity(names.len());
    let mut count = 0;

    while let Some(row) = source.next_row().map_err(TreeError::from_source)? {
        count += 1;
        values.clear();
        values.extend(row.values().iter().map(serialize));

        let record = Record {
            number: count,
            row,
            attributes: AttributeView::new(&names, &values),
        };
        builder.push_row(record, out)?;
    }

    builder.finish(out)?;
    sink(out.end_stream())?;
    Ok(count)
}
