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

//! Event sink that writes XML.

use crate::error::{XmlError, XmlResult};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use rowtree_core::{AttributeView, EventSink};
use std::borrow::Cow;
use std::io::Write;

/// Configuration for XML output
#[derive(Debug, Clone)]
pub struct XmlWriterConfig {
    /// Write `<?xml version="1.0" encoding="UTF-8"?>` first
    pub declaration: bool,
    /// Pretty-print with indentation
    pub pretty: bool,
    /// Spaces per nesting level when `pretty` is set
    pub indent: usize,
}

impl Default for XmlWriterConfig {
    fn default() -> Self {
        Self {
            declaration: true,
            pretty: false,
            indent: 2,
        }
    }
}

impl XmlWriterConfig {
    /// Compact output without a declaration, for embedding and tests.
    pub fn fragment() -> Self {
        Self {
            declaration: false,
            ..Default::default()
        }
    }
}

/// Writes an event stream as an XML document.
///
/// The start tag of the most recent open is held back until the next event,
/// so an element with no content comes out as `<r a="1"/>`.
///
/// # Examples
///
/// ```rust
/// use rowtree_core::{AttributeView, EventSink};
/// use rowtree_xml::{XmlSink, XmlWriterConfig};
///
/// let mut sink = XmlSink::new(Vec::new(), XmlWriterConfig::fragment());
/// let names = vec!["id".to_string()];
/// let values = vec!["7".to_string()];
///
/// sink.start_stream()?;
/// sink.open("rs", AttributeView::empty())?;
/// sink.open("r", AttributeView::new(&names, &values))?;
/// sink.close("r")?;
/// sink.close("rs")?;
/// sink.end_stream()?;
///
/// let xml = String::from_utf8(sink.into_inner()).unwrap();
/// assert_eq!(xml, r#"<rs><r id="7"/></rs>"#);
/// # Ok::<(), rowtree_xml::XmlError>(())
/// ```
pub struct XmlSink<W: Write> {
    writer: Writer<W>,
    declaration: bool,
    pending: Option<BytesStart<'static>>,
}

impl<W: Write> XmlSink<W> {
    pub fn new(inner: W, config: XmlWriterConfig) -> Self {
        let writer = if config.pretty {
            Writer::new_with_indent(inner, b' ', config.indent)
        } else {
            Writer::new(inner)
        };
        Self {
            writer,
            declaration: config.declaration,
            pending: None,
        }
    }

    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    /// Consume the sink and return the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    /// Write the held-back start tag, if any, as a real start tag.
    fn flush_pending(&mut self) -> XmlResult<()> {
        if let Some(start) = self.pending.take() {
            self.writer.write_event(Event::Start(start))?;
        }
        Ok(())
    }
}

impl<W: Write> EventSink for XmlSink<W> {
    type Error = XmlError;

    fn start_stream(&mut self) -> XmlResult<()> {
        if self.declaration {
            self.writer
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }
        Ok(())
    }

    fn end_stream(&mut self) -> XmlResult<()> {
        self.flush_pending()?;
        self.writer.get_mut().flush()?;
        Ok(())
    }

    fn open(&mut self, name: &str, attributes: AttributeView<'_>) -> XmlResult<()> {
        self.flush_pending()?;
        let mut start = BytesStart::new(name.to_owned());
        for attribute in attributes.iter() {
            start.push_attribute(attribute);
        }
        self.pending = Some(start);
        Ok(())
    }

    fn close(&mut self, name: &str) -> XmlResult<()> {
        match self.pending.take() {
            Some(start) => self.writer.write_event(Event::Empty(start))?,
            None => self.writer.write_event(Event::End(BytesEnd::new(name)))?,
        }
        Ok(())
    }

    fn text(&mut self, data: &str) -> XmlResult<()> {
        self.flush_pending()?;
        self.writer.write_event(Event::Text(BytesText::new(data)))?;
        Ok(())
    }

    fn comment(&mut self, data: &str) -> XmlResult<()> {
        self.flush_pending()?;
        self.writer
            .write_event(Event::Comment(BytesText::from_escaped(comment_text(data))))?;
        Ok(())
    }
}

/// Make `data` legal comment content: XML forbids `--` inside a comment and
/// a trailing `-`, so a space is put between adjacent dashes and after a
/// final dash.
fn comment_text(data: &str) -> Cow<'_, str> {
    if !data.contains("--") && !data.ends_with('-') {
        return Cow::Borrowed(data);
    }
    let mut out = String::with_capacity(data.len() + 4);
    let mut previous = None;
    for c in data.chars() {
        if c == '-' && previous == Some('-') {
            out.push(' ');
        }
        out.push(c);
        previous = Some(c);
    }
    if out.ends_with('-') {
        out.push(' ');
    }
    Cow::Owned(out)
}
