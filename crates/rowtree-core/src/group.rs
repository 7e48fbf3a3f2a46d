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

//! Prefix-grouping construction.
//!
//! Records that share leading values are gathered under shared group
//! elements. With grouping `[g0, g1, ...]`, the first `g0` attributes of a
//! record key the outermost group, the next `g1` key the group inside it,
//! and so on; whatever is left stays on the record. A group stays open for
//! as long as consecutive records repeat its key (and the keys of every
//! group above it).
//!
//! ```text
//! grouping [1]            dept  name         <rs>
//!                         R&D   Ada            <g dept="R&D">
//!                         R&D   Linus            <r name="Ada"/>
//!                         Ops   Grace            <r name="Linus"/>
//!                                              </g>
//!                                              <g dept="Ops">
//!                                                <r name="Grace"/>
//!                                              </g>
//!                                            </rs>
//! ```
//!
//! Two entry points share one state machine: [`GroupFilter`] rewrites an
//! existing flat event stream on its way to another sink, and
//! [`PrefixGroupBuilder`] is the same thing as a [`TreeBuilder`].

use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::attributes::{AttributeView, GroupKey};
use crate::builder::{sink, Record, TreeBuilder};
use crate::error::{TreeError, TreeResult};
use crate::row::Header;
use crate::sink::{EventSink, TagNames};

/// Validated grouping widths, outermost level first.
///
/// # Examples
///
/// ```rust
/// use rowtree_core::Grouping;
///
/// let grouping: Grouping = "2, 1".parse().unwrap();
/// assert_eq!(grouping.widths(), &[2, 1]);
/// assert_eq!(grouping.to_string(), "[2, 1]");
///
/// assert!(Grouping::new(vec![1, 0]).is_err());
/// assert!("".parse::<Grouping>().unwrap().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<usize>", into = "Vec<usize>"))]
pub struct Grouping(Vec<usize>);

impl Grouping {
    pub fn new(widths: Vec<usize>) -> TreeResult<Self> {
        if let Some(level) = widths.iter().position(|w| *w == 0) {
            return Err(TreeError::invalid_parameter(
                "grouping",
                format!("width at level {} must be positive", level),
            ));
        }
        Ok(Self(widths))
    }

    #[inline]
    pub fn widths(&self) -> &[usize] {
        &self.0
    }

    /// Number of grouping levels.
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of leading attributes consumed by all levels.
    pub fn total_width(&self) -> usize {
        self.0.iter().sum()
    }
}

impl fmt::Display for Grouping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl FromStr for Grouping {
    type Err = TreeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('[').trim_end_matches(']');
        if trimmed.trim().is_empty() {
            return Ok(Self::default());
        }
        let widths = trimmed
            .split(',')
            .map(|part| {
                part.trim().parse::<usize>().map_err(|_| {
                    TreeError::invalid_parameter(
                        "grouping",
                        format!("not a width: {:?}", part.trim()),
                    )
                })
            })
            .collect::<TreeResult<Vec<_>>>()?;
        Self::new(widths)
    }
}

impl TryFrom<Vec<usize>> for Grouping {
    type Error = TreeError;

    fn try_from(widths: Vec<usize>) -> Result<Self, Self::Error> {
        Self::new(widths)
    }
}

impl From<Grouping> for Vec<usize> {
    fn from(grouping: Grouping) -> Self {
        grouping.0
    }
}

/// Open groups and the keys they were opened with.
///
/// `cache[i]` is the key of the open group at level `i`; the cache is as
/// long as the number of open groups.
#[derive(Debug, Clone, Default)]
struct GroupState {
    grouping: Grouping,
    cache: Vec<GroupKey>,
}

impl GroupState {
    fn new(grouping: Grouping) -> Self {
        Self {
            grouping,
            cache: Vec::new(),
        }
    }

    /// Close stale groups, open new ones, return the record's residual
    /// attributes.
    fn open_record<'a, S: EventSink>(
        &mut self,
        out: &mut S,
        group_tag: &str,
        attributes: AttributeView<'a>,
    ) -> Result<AttributeView<'a>, S::Error> {
        let mut rest = attributes;
        for level in 0..self.grouping.len() {
            let (window, tail) = rest.split_at(self.grouping.widths()[level]);

            if level < self.cache.len() && self.cache[level] != window {
                self.close_from(out, group_tag, level)?;
            }

            if level >= self.cache.len() {
                trace!(level, key = ?window, "opening group");
                self.cache.push(window.snapshot());
                out.open(group_tag, window)?;
            }

            rest = tail;
        }
        Ok(rest)
    }

    /// Close the group at `level` and every group inside it, innermost first.
    fn close_from<S: EventSink>(
        &mut self,
        out: &mut S,
        group_tag: &str,
        level: usize,
    ) -> Result<(), S::Error> {
        while self.cache.len() > level {
            self.cache.pop();
            trace!(level = self.cache.len(), "closing group");
            out.close(group_tag)?;
        }
        Ok(())
    }

    fn annotation(&self) -> Option<String> {
        (!self.grouping.is_empty()).then(|| format!("Grouping{}", self.grouping))
    }
}

/// An [`EventSink`] that inserts shared group elements around records.
///
/// Opens of the record tag (matched ASCII case-insensitively) get their
/// groups opened first and are forwarded with the leftover attributes. The
/// root close first closes every open group. Everything else passes through.
///
/// # Examples
///
/// ```rust
/// use rowtree_core::{AttributeView, EventSink, GroupFilter, Grouping, TagNames};
/// # use std::convert::Infallible;
/// # #[derive(Default)]
/// # struct Names(Vec<String>);
/// # impl EventSink for Names {
/// #     type Error = Infallible;
/// #     fn start_stream(&mut self) -> Result<(), Infallible> { Ok(()) }
/// #     fn end_stream(&mut self) -> Result<(), Infallible> { Ok(()) }
/// #     fn open(&mut self, n: &str, _: AttributeView<'_>) -> Result<(), Infallible> { self.0.push(n.into()); Ok(()) }
/// #     fn close(&mut self, n: &str) -> Result<(), Infallible> { self.0.push(format!("/{}", n)); Ok(()) }
/// #     fn text(&mut self, _: &str) -> Result<(), Infallible> { Ok(()) }
/// # }
///
/// let grouping = Grouping::new(vec![1]).unwrap();
/// let mut filter = GroupFilter::new(Names::default(), grouping, TagNames::default());
///
/// let names = vec!["dept".to_string(), "name".to_string()];
/// let ada = vec!["R&D".to_string(), "Ada".to_string()];
/// let linus = vec!["R&D".to_string(), "Linus".to_string()];
///
/// filter.open("rs", AttributeView::empty()).unwrap();
/// for values in [&ada, &linus] {
///     filter.open("r", AttributeView::new(&names, values)).unwrap();
///     filter.close("r").unwrap();
/// }
/// filter.close("rs").unwrap();
///
/// let events = filter.into_inner().0;
/// assert_eq!(events, ["rs", "g", "r", "/r", "r", "/r", "/g", "/rs"]);
/// ```
#[derive(Debug)]
pub struct GroupFilter<S> {
    inner: S,
    tags: TagNames,
    state: GroupState,
    annotate: bool,
}

impl<S: EventSink> GroupFilter<S> {
    pub fn new(inner: S, grouping: Grouping, tags: TagNames) -> Self {
        Self {
            inner,
            tags,
            state: GroupState::new(grouping),
            annotate: true,
        }
    }

    /// Enable or disable the `Grouping[..]` comment after the root opens.
    pub fn with_annotation(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    pub fn grouping(&self) -> &Grouping {
        &self.state.grouping
    }

    /// Number of group elements currently open.
    pub fn open_levels(&self) -> usize {
        self.state.cache.len()
    }

    pub fn get_ref(&self) -> &S {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: EventSink> EventSink for GroupFilter<S> {
    type Error = S::Error;

    fn start_stream(&mut self) -> Result<(), Self::Error> {
        self.inner.start_stream()
    }

    fn end_stream(&mut self) -> Result<(), Self::Error> {
        self.inner.end_stream()
    }

    fn open(&mut self, name: &str, attributes: AttributeView<'_>) -> Result<(), Self::Error> {
        let attributes = if name.eq_ignore_ascii_case(&self.tags.record) {
            self.state
                .open_record(&mut self.inner, &self.tags.group, attributes)?
        } else {
            attributes
        };

        self.inner.open(name, attributes)?;

        if self.annotate && name.eq_ignore_ascii_case(&self.tags.root) {
            if let Some(note) = self.state.annotation() {
                self.inner.comment(&note)?;
            }
        }
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<(), Self::Error> {
        if name.eq_ignore_ascii_case(&self.tags.root) {
            self.state.close_from(&mut self.inner, &self.tags.group, 0)?;
        }
        self.inner.close(name)
    }

    fn text(&mut self, data: &str) -> Result<(), Self::Error> {
        self.inner.text(data)
    }

    fn comment(&mut self, data: &str) -> Result<(), Self::Error> {
        self.inner.comment(data)
    }
}

/// Prefix grouping as a [`TreeBuilder`].
///
/// Emits exactly what [`FlatEmitter`](crate::FlatEmitter) would emit through
/// a [`GroupFilter`], without the extra hop.
#[derive(Debug, Clone)]
pub struct PrefixGroupBuilder {
    tags: TagNames,
    state: GroupState,
    annotate: bool,
}

impl PrefixGroupBuilder {
    pub fn new(grouping: Grouping, tags: TagNames) -> Self {
        Self {
            tags,
            state: GroupState::new(grouping),
            annotate: true,
        }
    }

    /// Enable or disable the `Grouping[..]` comment after the root opens.
    pub fn with_annotation(mut self, annotate: bool) -> Self {
        self.annotate = annotate;
        self
    }

    /// Number of group elements currently open.
    pub fn open_levels(&self) -> usize {
        self.state.cache.len()
    }
}

impl TreeBuilder for PrefixGroupBuilder {
    fn begin<S: EventSink>(&mut self, header: &Header, out: &mut S) -> TreeResult<()> {
        sink(out.open(&self.tags.root, header.attributes()))?;
        if self.annotate {
            if let Some(note) = self.state.annotation() {
                sink(out.comment(&note))?;
            }
        }
        Ok(())
    }

    fn push_row<S: EventSink>(&mut self, record: Record<'_>, out: &mut S) -> TreeResult<()> {
        let rest = sink(
            self.state
                .open_record(out, &self.tags.group, record.attributes),
        )?;
        sink(out.open(&self.tags.record, rest))?;
        sink(out.close(&self.tags.record))
    }

    fn finish<S: EventSink>(&mut self, out: &mut S) -> TreeResult<()> {
        sink(self.state.close_from(out, &self.tags.group, 0))?;
        sink(out.close(&self.tags.root))
    }
}
