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

//! XML output for rowtree event streams.
//!
//! - [`XmlSink`]: an [`EventSink`](rowtree_core::EventSink) that writes XML
//!   with quick-xml
//! - [`replay`]: parse an XML document and forward its events to any sink
//! - [`group_xml`]: regroup a flat result-set document in one streaming pass
//!
//! # Examples
//!
//! ```rust
//! use rowtree_core::{Header, Layout, Row, TransformConfig, Value, VecRowSource};
//! use rowtree_xml::{to_xml_string, XmlWriterConfig};
//!
//! let header = Header::from_columns([("level", "int"), ("name", "text")]);
//! let rows = vec![
//!     Row::new(vec![Value::Int(1), Value::from("root")]),
//!     Row::new(vec![Value::Int(2), Value::from("leaf")]),
//! ];
//! let mut source = VecRowSource::new(header, rows);
//!
//! let config = TransformConfig { layout: Layout::by_level(), ..Default::default() };
//! let xml = to_xml_string(&mut source, &config, &XmlWriterConfig::fragment())?;
//! assert_eq!(xml, r#"<rs name="text"><r name="root"><r name="leaf"/></r></rs>"#);
//! # Ok::<(), rowtree_xml::XmlError>(())
//! ```

mod error;
mod reader;
mod writer;

pub use error::{XmlError, XmlResult};
pub use reader::{group_xml, replay};
pub use writer::{XmlSink, XmlWriterConfig};

use rowtree_core::{transform, RowSource, TransformConfig};
use std::io::Write;

/// Build the configured tree from `source` and write it as XML to `out`.
///
/// Returns the number of rows consumed.
pub fn write_xml<R, W>(
    source: &mut R,
    out: W,
    config: &TransformConfig,
    xml: &XmlWriterConfig,
) -> XmlResult<usize>
where
    R: RowSource,
    W: Write,
{
    let mut sink = XmlSink::new(out, xml.clone());
    Ok(transform(source, &mut sink, config)?)
}

/// Build the configured tree from `source` and return it as an XML string.
pub fn to_xml_string<R: RowSource>(
    source: &mut R,
    config: &TransformConfig,
    xml: &XmlWriterConfig,
) -> XmlResult<String> {
    let mut buf = Vec::new();
    write_xml(source, &mut buf, config, xml)?;
    String::from_utf8(buf).map_err(|e| XmlError::Utf8(e.utf8_error()))
}
