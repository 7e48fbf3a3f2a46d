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

//! Streaming tree reconstruction from ordered flat rows.
//!
//! A result set is a flat sequence of rows, but the rows often describe a
//! tree: a depth column, an id/parent-id pair, or repeated leading values.
//! This crate turns such a row stream into a nested event stream (open,
//! close, text, comment) without buffering the input. Each builder keeps
//! O(depth) state and sees each row exactly once.
//!
//! # Layouts
//!
//! - **Flat** ([`FlatEmitter`]): one record element per row under a root
//! - **By level** ([`LevelTreeBuilder`]): a depth column places each row;
//!   gaps are bridged with empty filler records
//! - **Connect-by-prior** ([`ParentLinkTreeBuilder`]): id and parent-id
//!   columns; rows arrive in preorder
//! - **Grouped** ([`PrefixGroupBuilder`], [`GroupFilter`]): consecutive rows
//!   sharing leading values share group ancestors
//!
//! # Quick Start
//!
//! ```rust
//! use rowtree_core::{transform, Grouping, Header, Layout, Row, TransformConfig, Value, VecRowSource};
//! # use rowtree_core::{AttributeView, EventSink};
//! # #[derive(Default)]
//! # struct Tags(Vec<String>);
//! # impl EventSink for Tags {
//! #     type Error = std::convert::Infallible;
//! #     fn start_stream(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn end_stream(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn open(&mut self, n: &str, _: AttributeView<'_>) -> Result<(), Self::Error> { self.0.push(n.into()); Ok(()) }
//! #     fn close(&mut self, n: &str) -> Result<(), Self::Error> { self.0.push(format!("/{}", n)); Ok(()) }
//! #     fn text(&mut self, _: &str) -> Result<(), Self::Error> { Ok(()) }
//! # }
//!
//! let header = Header::from_columns([("dept", "text"), ("name", "text")]);
//! let rows = vec![
//!     Row::new(vec![Value::from("R&D"), Value::from("Ada")]),
//!     Row::new(vec![Value::from("R&D"), Value::from("Linus")]),
//! ];
//! let mut source = VecRowSource::new(header, rows);
//!
//! let config = TransformConfig {
//!     layout: Layout::Grouped { grouping: Grouping::new(vec![1])? },
//!     ..Default::default()
//! };
//!
//! let mut sink = Tags::default();
//! transform(&mut source, &mut sink, &config)?;
//! assert_eq!(sink.0, ["rs", "g", "r", "/r", "r", "/r", "/g", "/rs"]);
//! # Ok::<(), rowtree_core::TreeError>(())
//! ```
//!
//! # Failsafe behavior
//!
//! Inconsistent tree data never aborts the stream. A depth that skips
//! levels gets filler ancestors; a parent id that is not open attaches the
//! row to the root. Only invalid builder parameters, unreadable control
//! fields, and upstream source/sink failures are errors ([`TreeError`]).

mod attributes;
mod builder;
mod driver;
mod error;
mod group;
mod level;
mod parent;
mod row;
mod sink;
mod value;

pub use attributes::{AttributeView, GroupKey};
pub use builder::{FlatEmitter, Record, TreeBuilder};
pub use driver::{drive, transform, Layout, TransformConfig};
pub use error::{TreeError, TreeResult};
pub use group::{GroupFilter, Grouping, PrefixGroupBuilder};
pub use level::{LevelTreeBuilder, LARGE_DEPTH_GAP};
pub use parent::ParentLinkTreeBuilder;
pub use row::{Header, Row, RowSource, VecRowSource};
pub use sink::{EventSink, TagNames};
pub use value::{default_serializer, Serializer, Value};
