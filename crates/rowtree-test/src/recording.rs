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

//! An [`EventSink`] that keeps every event for later inspection.

use rowtree_core::{AttributeView, EventSink};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt::Write as _;

/// A recorded sink event with owned data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    StartStream,
    EndStream,
    Open {
        name: String,
        attributes: Vec<(String, String)>,
    },
    Close {
        name: String,
    },
    Text(String),
    Comment(String),
}

impl Event {
    /// Shorthand for an open event.
    pub fn open(name: &str, attributes: &[(&str, &str)]) -> Self {
        Event::Open {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        }
    }

    pub fn close(name: &str) -> Self {
        Event::Close {
            name: name.to_string(),
        }
    }
}

/// Records events in order. Never fails.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub events: Vec<Event>,
    depth: usize,
    max_depth: usize,
    depth_trace: Vec<usize>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Elements currently open.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Deepest nesting seen, root included.
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Open-element count right after each open/close event.
    pub fn depth_trace(&self) -> &[usize] {
        &self.depth_trace
    }

    /// Structural events only (open, close, text), no stream markers or
    /// comments.
    pub fn structure(&self) -> Vec<Event> {
        self.events
            .iter()
            .filter(|e| matches!(e, Event::Open { .. } | Event::Close { .. } | Event::Text(_)))
            .cloned()
            .collect()
    }

    /// Per element name: `(opens, closes)`.
    pub fn tag_counts(&self) -> BTreeMap<String, (usize, usize)> {
        let mut counts: BTreeMap<String, (usize, usize)> = BTreeMap::new();
        for event in &self.events {
            match event {
                Event::Open { name, .. } => counts.entry(name.clone()).or_default().0 += 1,
                Event::Close { name } => counts.entry(name.clone()).or_default().1 += 1,
                _ => {}
            }
        }
        counts
    }

    /// Every element name opened as often as closed, closes matching opens
    /// in nesting order, and nothing left open.
    pub fn is_balanced(&self) -> bool {
        let mut stack: Vec<&str> = Vec::new();
        for event in &self.events {
            match event {
                Event::Open { name, .. } => stack.push(name),
                Event::Close { name } => {
                    if stack.pop() != Some(name.as_str()) {
                        return false;
                    }
                }
                _ => {}
            }
        }
        stack.is_empty()
    }

    /// Number of opens of `name`.
    pub fn count_opens(&self, name: &str) -> usize {
        self.tag_counts().get(name).map_or(0, |c| c.0)
    }

    /// Render the structure as compact markup for assertions.
    ///
    /// An open immediately followed by its close is written as an empty
    /// element. Attribute values are written verbatim (no escaping).
    /// Comments render as `<!--..-->`; stream markers are omitted.
    pub fn outline(&self) -> String {
        let mut out = String::new();
        let mut iter = self.events.iter().peekable();
        while let Some(event) = iter.next() {
            match event {
                Event::Open { name, attributes } => {
                    let _ = write!(out, "<{}", name);
                    for (n, v) in attributes {
                        let _ = write!(out, " {}=\"{}\"", n, v);
                    }
                    if matches!(iter.peek(), Some(Event::Close { name: next }) if next == name) {
                        iter.next();
                        out.push_str("/>");
                    } else {
                        out.push('>');
                    }
                }
                Event::Close { name } => {
                    let _ = write!(out, "</{}>", name);
                }
                Event::Text(text) => out.push_str(text),
                Event::Comment(text) => {
                    let _ = write!(out, "<!--{}-->", text);
                }
                Event::StartStream | Event::EndStream => {}
            }
        }
        out
    }
}

impl EventSink for RecordingSink {
    type Error = Infallible;

    fn start_stream(&mut self) -> Result<(), Infallible> {
        self.events.push(Event::StartStream);
        Ok(())
    }

    fn end_stream(&mut self) -> Result<(), Infallible> {
        self.events.push(Event::EndStream);
        Ok(())
    }

    fn open(&mut self, name: &str, attributes: AttributeView<'_>) -> Result<(), Infallible> {
        self.events.push(Event::Open {
            name: name.to_string(),
            attributes: attributes
                .iter()
                .map(|(n, v)| (n.to_string(), v.to_string()))
                .collect(),
        });
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.depth_trace.push(self.depth);
        Ok(())
    }

    fn close(&mut self, name: &str) -> Result<(), Infallible> {
        self.events.push(Event::Close {
            name: name.to_string(),
        });
        self.depth = self.depth.saturating_sub(1);
        self.depth_trace.push(self.depth);
        Ok(())
    }

    fn text(&mut self, data: &str) -> Result<(), Infallible> {
        self.events.push(Event::Text(data.to_string()));
        Ok(())
    }

    fn comment(&mut self, data: &str) -> Result<(), Infallible> {
        self.events.push(Event::Comment(data.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outline_collapses_empty_elements() {
        let mut sink = RecordingSink::new();
        let names = vec!["a".to_string()];
        let values = vec!["1".to_string()];
        sink.open("rs", AttributeView::empty()).unwrap();
        sink.comment("note").unwrap();
        sink.open("r", AttributeView::new(&names, &values)).unwrap();
        sink.close("r").unwrap();
        sink.close("rs").unwrap();

        assert_eq!(sink.outline(), r#"<rs><!--note--><r a="1"/></rs>"#);
        assert!(sink.is_balanced());
        assert_eq!(sink.max_depth(), 2);
        assert_eq!(sink.depth_trace(), &[1, 2, 1, 0]);
    }

    #[test]
    fn test_unbalanced_detected() {
        let mut sink = RecordingSink::new();
        sink.open("a", AttributeView::empty()).unwrap();
        sink.open("b", AttributeView::empty()).unwrap();
        sink.close("a").unwrap();
        assert!(!sink.is_balanced());
    }

    #[test]
    fn test_tag_counts() {
        let mut sink = RecordingSink::new();
        sink.open("a", AttributeView::empty()).unwrap();
        sink.close("a").unwrap();
        sink.open("a", AttributeView::empty()).unwrap();
        assert_eq!(sink.tag_counts().get("a"), Some(&(2, 1)));
        assert_eq!(sink.count_opens("b"), 0);
    }
}
