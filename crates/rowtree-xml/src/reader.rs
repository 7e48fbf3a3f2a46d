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

//! Replaying an XML document into an event sink.
//!
//! The document is parsed with quick-xml and forwarded event by event, so a
//! flat result-set document can be regrouped without ever building a DOM.

use crate::error::{XmlError, XmlResult};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use rowtree_core::{AttributeView, EventSink, GroupFilter, Grouping, TagNames};
use std::io::BufRead;
use tracing::debug;

/// Parse `input` and forward its events to `sink`.
///
/// Start, end and empty elements become `open` / `close`; text and CDATA
/// become `text`; comments become `comment`. Whitespace-only text is dropped;
/// any other text is forwarded with its surrounding whitespace intact.
/// Declarations, processing instructions and doctypes are skipped. The whole
/// replay is bracketed by `start_stream` / `end_stream`.
///
/// Returns the number of elements opened.
pub fn replay<R, S>(input: R, sink: &mut S) -> XmlResult<usize>
where
    R: BufRead,
    S: EventSink,
{
    let mut reader = Reader::from_reader(input);

    let mut buf = Vec::new();
    let mut names = Vec::new();
    let mut values = Vec::new();
    let mut elements = 0;

    sink.start_stream().map_err(XmlError::from_sink)?;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let name = read_element(&reader, &e, &mut names, &mut values)?;
                sink.open(&name, AttributeView::new(&names, &values))
                    .map_err(XmlError::from_sink)?;
                elements += 1;
            }
            Ok(Event::Empty(e)) => {
                let name = read_element(&reader, &e, &mut names, &mut values)?;
                sink.open(&name, AttributeView::new(&names, &values))
                    .map_err(XmlError::from_sink)?;
                sink.close(&name).map_err(XmlError::from_sink)?;
                elements += 1;
            }
            Ok(Event::End(e)) => {
                let name = std::str::from_utf8(e.name().as_ref())?.to_owned();
                sink.close(&name).map_err(XmlError::from_sink)?;
            }
            Ok(Event::Text(e)) => {
                let text = e
                    .unescape()
                    .map_err(|err| XmlError::parse(reader.buffer_position(), err))?;
                if !text.trim().is_empty() {
                    sink.text(&text).map_err(XmlError::from_sink)?;
                }
            }
            Ok(Event::CData(e)) => {
                let text = std::str::from_utf8(&e)?;
                if !text.trim().is_empty() {
                    sink.text(text).map_err(XmlError::from_sink)?;
                }
            }
            Ok(Event::Comment(e)) => {
                let text = std::str::from_utf8(&e)?;
                sink.comment(text).map_err(XmlError::from_sink)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(err) => return Err(XmlError::parse(reader.buffer_position(), err)),
        }
        buf.clear();
    }

    sink.end_stream().map_err(XmlError::from_sink)?;
    Ok(elements)
}

/// Decode an element name and refill the attribute buffers.
fn read_element<R>(
    reader: &Reader<R>,
    element: &BytesStart<'_>,
    names: &mut Vec<String>,
    values: &mut Vec<String>,
) -> XmlResult<String> {
    names.clear();
    values.clear();
    for attribute in element.attributes() {
        let attribute =
            attribute.map_err(|err| XmlError::parse(reader.buffer_position(), err))?;
        names.push(std::str::from_utf8(attribute.key.as_ref())?.to_owned());
        let value = attribute
            .unescape_value()
            .map_err(|err| XmlError::parse(reader.buffer_position(), err))?;
        values.push(value.into_owned());
    }
    Ok(std::str::from_utf8(element.name().as_ref())?.to_owned())
}

/// Regroup a flat result-set document.
///
/// Records (`tags.record`) sharing leading attribute values are wrapped in
/// shared group elements (`tags.group`) according to `grouping`; everything
/// else is copied through to `sink`.
///
/// # Examples
///
/// ```rust
/// use rowtree_core::{Grouping, TagNames};
/// use rowtree_xml::{group_xml, XmlSink, XmlWriterConfig};
///
/// let flat = r#"<rs><r dept="R&amp;D" name="Ada"/><r dept="R&amp;D" name="Linus"/></rs>"#;
/// let mut sink = XmlSink::new(Vec::new(), XmlWriterConfig::fragment());
/// group_xml(flat.as_bytes(), &mut sink, Grouping::new(vec![1])?, TagNames::default())?;
///
/// let xml = String::from_utf8(sink.into_inner()).unwrap();
/// assert_eq!(
///     xml,
///     r#"<rs><!--Grouping[1]--><g dept="R&amp;D"><r name="Ada"/><r name="Linus"/></g></rs>"#
/// );
/// # Ok::<(), rowtree_xml::XmlError>(())
/// ```
pub fn group_xml<R, S>(input: R, sink: &mut S, grouping: Grouping, tags: TagNames) -> XmlResult<usize>
where
    R: BufRead,
    S: EventSink,
{
    debug!(grouping = %grouping, "regrouping XML document");
    let mut filter = GroupFilter::new(sink, grouping, tags);
    replay(input, &mut filter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    /// Minimal recorder; the shared test crate is used from `tests/`.
    #[derive(Default)]
    struct Log(Vec<String>);

    impl EventSink for Log {
        type Error = Infallible;

        fn start_stream(&mut self) -> Result<(), Infallible> {
            self.0.push("<<".into());
            Ok(())
        }

        fn end_stream(&mut self) -> Result<(), Infallible> {
            self.0.push(">>".into());
            Ok(())
        }

        fn open(&mut self, name: &str, attributes: AttributeView<'_>) -> Result<(), Infallible> {
            let pairs: Vec<String> = attributes.iter().map(|(n, v)| format!("{}={}", n, v)).collect();
            self.0.push(format!("+{}[{}]", name, pairs.join(",")));
            Ok(())
        }

        fn close(&mut self, name: &str) -> Result<(), Infallible> {
            self.0.push(format!("-{}", name));
            Ok(())
        }

        fn text(&mut self, data: &str) -> Result<(), Infallible> {
            self.0.push(format!("'{}'", data));
            Ok(())
        }

        fn comment(&mut self, data: &str) -> Result<(), Infallible> {
            self.0.push(format!("#{}", data));
            Ok(())
        }
    }

    fn replayed(xml: &str) -> Vec<String> {
        let mut log = Log::default();
        replay(xml.as_bytes(), &mut log).unwrap();
        log.0
    }

    #[test]
    fn test_replay_elements_and_attributes() {
        let events = replayed(r#"<rs a="int"><r a="1"/><r a="2">x</r></rs>"#);
        assert_eq!(
            events,
            [
                "<<", "+rs[a=int]", "+r[a=1]", "-r", "+r[a=2]", "'x'", "-r", "-rs", ">>"
            ]
        );
    }

    #[test]
    fn test_replay_drops_whitespace_text() {
        let events = replayed("<?xml version=\"1.0\"?>\n<rs>\n  <r/>\n</rs>\n");
        assert_eq!(events, ["<<", "+rs[]", "+r[]", "-r", "-rs", ">>"]);
    }

    #[test]
    fn test_replay_keeps_padding_inside_text() {
        let events = replayed("<rs>\n  <r>  padded  </r>\n</rs>");
        assert_eq!(events, ["<<", "+rs[]", "+r[]", "'  padded  '", "-r", "-rs", ">>"]);
    }

    #[test]
    fn test_replay_unescapes() {
        let events = replayed(r#"<r v="a&amp;b">1 &lt; 2</r>"#);
        assert_eq!(events, ["<<", "+r[v=a&b]", "'1 < 2'", "-r", ">>"]);
    }

    #[test]
    fn test_replay_cdata_and_comment() {
        let events = replayed("<r><!--note--><![CDATA[<raw>]]></r>");
        assert_eq!(events, ["<<", "+r[]", "#note", "'<raw>'", "-r", ">>"]);
    }

    #[test]
    fn test_replay_counts_elements() {
        let mut log = Log::default();
        let count = replay(r#"<rs><r/><r><x/></r></rs>"#.as_bytes(), &mut log).unwrap();
        assert_eq!(count, 4);
    }

    #[test]
    fn test_replay_rejects_mismatched_end() {
        let mut log = Log::default();
        let err = replay("<rs><r></rs>".as_bytes(), &mut log).unwrap_err();
        assert!(matches!(err, XmlError::Parse { .. }));
    }

    #[test]
    fn test_group_xml_uppercase_record() {
        let mut log = Log::default();
        let grouping = Grouping::new(vec![1]).unwrap();
        group_xml(
            r#"<rs><R k="a" v="1"/><R k="a" v="2"/></rs>"#.as_bytes(),
            &mut log,
            grouping,
            TagNames::default(),
        )
        .unwrap();
        assert_eq!(
            log.0,
            [
                "<<",
                "+rs[]",
                "#Grouping[1]",
                "+g[k=a]",
                "+R[v=1]",
                "-R",
                "+R[v=2]",
                "-R",
                "-g",
                "-rs",
                ">>"
            ]
        );
    }
}
