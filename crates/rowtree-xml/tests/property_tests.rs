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

//! Property-based tests for XML output and replay.
//!
//! # Properties Tested
//!
//! 1. **Replay fidelity**: writing a tree as XML and replaying it yields the
//!    events the builder emitted
//! 2. **Regrouping**: grouping a flat document equals building the grouped
//!    tree from the rows directly

use proptest::prelude::*;
use rowtree_core::{
    transform, Grouping, Header, Layout, Row, TagNames, TransformConfig, Value, VecRowSource,
};
use rowtree_test::RecordingSink;
use rowtree_xml::{group_xml, replay, to_xml_string, XmlWriterConfig};

const COLUMNS: &[&str] = &["c1", "c2", "c3"];

/// Values that need escaping, over a small alphabet so prefixes repeat.
fn rows() -> impl Strategy<Value = Vec<Vec<&'static str>>> {
    prop::collection::vec(
        prop::collection::vec(
            prop::sample::select(vec!["a", "b&c", "<d>", "\"e\"", "f g"]),
            COLUMNS.len(),
        ),
        0..30,
    )
}

fn source(rows: &[Vec<&str>]) -> VecRowSource {
    let header = Header::from_columns(COLUMNS.iter().map(|c| (*c, "varchar")));
    let rows = rows
        .iter()
        .map(|r| r.iter().map(|v| Value::from(*v)).collect::<Row>())
        .collect();
    VecRowSource::new(header, rows)
}

fn config(layout: Layout) -> TransformConfig {
    TransformConfig {
        layout,
        ..Default::default()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    /// Property: tree -> XML -> events equals tree -> events
    #[test]
    fn prop_replay_matches_direct(rows in rows(), pretty in any::<bool>()) {
        let config = config(Layout::Grouped { grouping: Grouping::new(vec![1]).unwrap() });
        let xml_config = XmlWriterConfig { pretty, ..Default::default() };

        let xml = to_xml_string(&mut source(&rows), &config, &xml_config)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let mut replayed = RecordingSink::new();
        replay(xml.as_bytes(), &mut replayed)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let mut direct = RecordingSink::new();
        transform(&mut source(&rows), &mut direct, &config).unwrap();

        prop_assert_eq!(replayed.events, direct.events);
    }

    /// Property: regrouping flat XML equals grouping the rows
    #[test]
    fn prop_group_xml_matches_builder(
        rows in rows(),
        widths in prop::collection::vec(1_usize..3, 0..3),
    ) {
        let grouping = Grouping::new(widths).unwrap();

        let fragment = XmlWriterConfig::fragment();
        let flat = to_xml_string(&mut source(&rows), &config(Layout::Flat), &fragment)
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let mut regrouped = RecordingSink::new();
        group_xml(flat.as_bytes(), &mut regrouped, grouping.clone(), TagNames::default())
            .map_err(|e| TestCaseError::fail(e.to_string()))?;

        let mut direct = RecordingSink::new();
        let grouped = config(Layout::Grouped { grouping });
        transform(&mut source(&rows), &mut direct, &grouped).unwrap();

        prop_assert!(regrouped.is_balanced());
        prop_assert_eq!(regrouped.events, direct.events);
    }
}
