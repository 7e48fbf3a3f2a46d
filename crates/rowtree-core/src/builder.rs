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

//! The builder contract and the flat baseline.
//!
//! Every layout is an independent state machine behind [`TreeBuilder`]:
//! `begin` opens the root, `push_row` is called once per row in source
//! order, `finish` unwinds whatever is still open and closes the root.
//! Builders never see the row source and never buffer rows; the driver in
//! [`transform`](crate::transform) pulls rows and pushes them in.

use crate::attributes::AttributeView;
use crate::error::{TreeError, TreeResult};
use crate::row::{Header, Row};
use crate::sink::{EventSink, TagNames};

/// One row as seen by a builder.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    /// Position in the stream (1-based), for error reporting.
    pub number: usize,
    /// Raw values, for reading control fields.
    pub row: &'a Row,
    /// Serialized values paired with column names.
    pub attributes: AttributeView<'a>,
}

/// Consume rows in order, drive a sink.
pub trait TreeBuilder {
    /// Open the root element. Selectors are checked against the header here.
    fn begin<S: EventSink>(&mut self, header: &Header, sink: &mut S) -> TreeResult<()>;

    /// Emit the events for one row.
    fn push_row<S: EventSink>(&mut self, record: Record<'_>, sink: &mut S) -> TreeResult<()>;

    /// Close everything still open, root included.
    fn finish<S: EventSink>(&mut self, sink: &mut S) -> TreeResult<()>;
}

/// Convert a sink result into a tree result.
#[inline]
pub(crate) fn sink<T, E>(result: Result<T, E>) -> TreeResult<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.map_err(TreeError::from_sink)
}

/// Column count to strip for a signed selector: negative strips that many
/// leading columns, positive strips none.
#[inline]
pub(crate) fn strip_count(selector: i32) -> usize {
    if selector < 0 {
        selector.unsigned_abs() as usize
    } else {
        0
    }
}

/// Reject selectors that point past the header.
pub(crate) fn check_column(
    parameter: &'static str,
    selector: i32,
    header: &Header,
) -> TreeResult<usize> {
    let column = selector.unsigned_abs() as usize;
    if column > header.len() {
        return Err(TreeError::invalid_parameter(
            parameter,
            format!(
                "column {} is out of range for a header of {} columns",
                selector,
                header.len()
            ),
        ));
    }
    Ok(column)
}

/// One record element per row under a single root.
///
/// ```text
/// <rs id="int" name="text">
///   <r id="1" name="a"/>
///   <r id="2" name="b"/>
/// </rs>
/// ```
#[derive(Debug, Clone, Default)]
pub struct FlatEmitter {
    tags: TagNames,
}

impl FlatEmitter {
    pub fn new(tags: TagNames) -> Self {
        Self { tags }
    }

    pub fn tags(&self) -> &TagNames {
        &self.tags
    }
}

impl TreeBuilder for FlatEmitter {
    fn begin<S: EventSink>(&mut self, header: &Header, out: &mut S) -> TreeResult<()> {
        sink(out.open(&self.tags.root, header.attributes()))
    }

    fn push_row<S: EventSink>(&mut self, record: Record<'_>, out: &mut S) -> TreeResult<()> {
        sink(out.open(&self.tags.record, record.attributes))?;
        sink(out.close(&self.tags.record))
    }

    fn finish<S: EventSink>(&mut self, out: &mut S) -> TreeResult<()> {
        sink(out.close(&self.tags.root))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::run;
    use super::*;

    #[test]
    fn test_flat_wraps_each_row() {
        let mut flat = FlatEmitter::default();
        let trace = run(&mut flat, &["a", "b"], &[&["1", "x"], &["2", "y"]]);
        assert_eq!(
            trace.joined(),
            "+rs[text,text] +r[1,x] -r +r[2,y] -r -rs"
        );
        assert_eq!(trace.max_open, 2);
        assert_eq!(trace.open, 0);
    }

    #[test]
    fn test_flat_empty_stream() {
        let mut flat = FlatEmitter::default();
        let trace = run(&mut flat, &["a"], &[]);
        assert_eq!(trace.joined(), "+rs[text] -rs");
    }

    #[test]
    fn test_strip_count() {
        assert_eq!(strip_count(-3), 3);
        assert_eq!(strip_count(2), 0);
        assert_eq!(strip_count(i32::MIN), 2_147_483_648);
    }

    #[test]
    fn test_check_column() {
        let header = Header::from_columns([("a", "t"), ("b", "t")]);
        assert_eq!(check_column("level_field", -2, &header).unwrap(), 2);
        let err = check_column("level_field", 3, &header).unwrap_err();
        assert!(err.to_string().contains("out of range"));
    }
}
