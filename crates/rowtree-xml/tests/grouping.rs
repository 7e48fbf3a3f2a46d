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

//! XML-to-XML grouping of a flat result-set document.

use rowtree_core::{Grouping, Layout, TagNames, TransformConfig, TreeError};
use rowtree_test::{fixtures, RecordingSink};
use rowtree_xml::{
    group_xml, replay, to_xml_string, write_xml, XmlError, XmlSink, XmlWriterConfig,
};
use std::io::{self, Write};

const FLAT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rs a="varchar" b="varchar" c="int">
  <r a="x" b="p" c="1"/>
  <r a="x" b="p" c="2"/>
  <r a="x" b="q" c="3"/>
  <r a="y" b="q" c="4"/>
</rs>
"#;

fn regroup(widths: &[usize]) -> String {
    let mut sink = XmlSink::new(Vec::new(), XmlWriterConfig::fragment());
    let grouping = Grouping::new(widths.to_vec()).unwrap();
    group_xml(FLAT.as_bytes(), &mut sink, grouping, TagNames::default()).unwrap();
    String::from_utf8(sink.into_inner()).unwrap()
}

// ============================================================================
// Regrouping a flat document
// ============================================================================

#[test]
fn test_group_by_first_attribute() {
    assert_eq!(
        regroup(&[1]),
        concat!(
            r#"<rs a="varchar" b="varchar" c="int"><!--Grouping[1]-->"#,
            r#"<g a="x"><r b="p" c="1"/><r b="p" c="2"/><r b="q" c="3"/></g>"#,
            r#"<g a="y"><r b="q" c="4"/></g>"#,
            "</rs>"
        )
    );
}

#[test]
fn test_group_nested_one_one() {
    assert_eq!(
        regroup(&[1, 1]),
        concat!(
            r#"<rs a="varchar" b="varchar" c="int"><!--Grouping[1, 1]-->"#,
            r#"<g a="x">"#,
            r#"<g b="p"><r c="1"/><r c="2"/></g>"#,
            r#"<g b="q"><r c="3"/></g>"#,
            "</g>",
            r#"<g a="y"><g b="q"><r c="4"/></g></g>"#,
            "</rs>"
        )
    );
}

#[test]
fn test_group_by_two_attributes() {
    assert_eq!(
        regroup(&[2]),
        concat!(
            r#"<rs a="varchar" b="varchar" c="int"><!--Grouping[2]-->"#,
            r#"<g a="x" b="p"><r c="1"/><r c="2"/></g>"#,
            r#"<g a="x" b="q"><r c="3"/></g>"#,
            r#"<g a="y" b="q"><r c="4"/></g>"#,
            "</rs>"
        )
    );
}

#[test]
fn test_empty_grouping_copies_document() {
    assert_eq!(
        regroup(&[]),
        concat!(
            r#"<rs a="varchar" b="varchar" c="int">"#,
            r#"<r a="x" b="p" c="1"/><r a="x" b="p" c="2"/>"#,
            r#"<r a="x" b="q" c="3"/><r a="y" b="q" c="4"/>"#,
            "</rs>"
        )
    );
}

#[test]
fn test_custom_tags_leave_other_records_alone() {
    let tags = TagNames {
        root: "table".into(),
        record: "row".into(),
        group: "section".into(),
    };
    let input = r#"<table><row k="1" v="a"/><r k="1" v="b"/><row k="1" v="c"/></table>"#;

    let mut sink = RecordingSink::new();
    group_xml(input.as_bytes(), &mut sink, Grouping::new(vec![1]).unwrap(), tags).unwrap();

    // `r` is not the record tag here, so it passes through inside the open group.
    assert_eq!(
        sink.outline(),
        concat!(
            "<table><!--Grouping[1]-->",
            r#"<section k="1"><row v="a"/><r k="1" v="b"/><row v="c"/></section>"#,
            "</table>"
        )
    );
}

// ============================================================================
// Writing trees as XML
// ============================================================================

#[test]
fn test_flat_layout_as_xml() {
    let xml = to_xml_string(
        &mut fixtures::table(&["k", "v"], &[&["a&b", "1"], &["<c>", "2"]]),
        &TransformConfig::default(),
        &XmlWriterConfig::fragment(),
    )
    .unwrap();
    assert_eq!(
        xml,
        r#"<rs k="text" v="text"><r k="a&amp;b" v="1"/><r k="&lt;c&gt;" v="2"/></rs>"#
    );
}

#[test]
fn test_connect_by_prior_as_xml() {
    let config = TransformConfig {
        layout: Layout::connect_by_prior(),
        ..Default::default()
    };
    let xml = to_xml_string(
        &mut fixtures::reporting_lines(),
        &config,
        &XmlWriterConfig::fragment(),
    )
    .unwrap();
    assert_eq!(
        xml,
        concat!(
            r#"<rs employee_id="int" name="varchar">"#,
            r#"<r employee_id="1" name="Ada">"#,
            r#"<r employee_id="2" name="Linus"><r employee_id="4" name="Ken"/></r>"#,
            r#"<r employee_id="3" name="Grace">"#,
            r#"<r employee_id="5" name="Dennis"/><r employee_id="6" name="Margaret"/>"#,
            "</r></r></rs>"
        )
    );
}

#[test]
fn test_declaration_is_written_by_default() {
    let xml = to_xml_string(
        &mut fixtures::levels(&[1]),
        &TransformConfig {
            layout: Layout::by_level(),
            ..Default::default()
        },
        &XmlWriterConfig::default(),
    )
    .unwrap();
    assert_eq!(
        xml,
        r#"<?xml version="1.0" encoding="UTF-8"?><rs name="text"><r name="n1"/></rs>"#
    );
}

#[test]
fn test_pretty_output_replays_to_same_events() {
    let config = TransformConfig {
        layout: Layout::Grouped {
            grouping: Grouping::new(vec![1, 1]).unwrap(),
        },
        ..Default::default()
    };
    let pretty = XmlWriterConfig {
        pretty: true,
        ..Default::default()
    };

    let mut buf = Vec::new();
    let rows = write_xml(&mut fixtures::org_chart(), &mut buf, &config, &pretty).unwrap();
    assert_eq!(rows, 6);

    let mut replayed = RecordingSink::new();
    replay(buf.as_slice(), &mut replayed).unwrap();

    let mut direct = RecordingSink::new();
    rowtree_core::transform(&mut fixtures::org_chart(), &mut direct, &config).unwrap();

    assert_eq!(replayed.events, direct.events);
}

#[test]
fn test_malformed_input_is_a_parse_error() {
    let mut sink = RecordingSink::new();
    let err = group_xml(
        "<rs><r a=\"1\"></rs>".as_bytes(),
        &mut sink,
        Grouping::new(vec![1]).unwrap(),
        TagNames::default(),
    )
    .unwrap_err();
    assert!(err.to_string().starts_with("XML parse error"));
}

// ============================================================================
// Output failures
// ============================================================================

/// Accepts `room` bytes, then reports the disk as full.
struct FullDisk {
    room: usize,
}

impl Write for FullDisk {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        if self.room == 0 {
            return Err(io::Error::new(io::ErrorKind::Other, "disk full"));
        }
        let n = buf.len().min(self.room);
        self.room -= n;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_xml_surfaces_writer_errors() {
    for room in [0, 10, 40] {
        let err = write_xml(
            &mut fixtures::org_chart(),
            FullDisk { room },
            &TransformConfig::default(),
            &XmlWriterConfig::default(),
        )
        .unwrap_err();

        let sink_error = match &err {
            XmlError::Tree(TreeError::Sink(inner)) => inner.downcast_ref::<XmlError>(),
            other => panic!("expected a sink error, got {:?}", other),
        };
        assert!(
            matches!(sink_error, Some(XmlError::Write(_))),
            "room {}: {:?}",
            room,
            err
        );
        assert!(err.to_string().contains("disk full"), "{}", err);
    }
}

