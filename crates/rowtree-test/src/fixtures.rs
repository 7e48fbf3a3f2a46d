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

//! Canned row sources.
//!
//! ```rust
//! use rowtree_core::RowSource;
//! use rowtree_test::fixtures;
//!
//! let source = fixtures::org_chart();
//! assert_eq!(source.header().names(), &["dept", "team", "name", "role"]);
//! ```

use rowtree_core::{Header, Row, Value, VecRowSource};

/// A source where every column is text.
pub fn table(columns: &[&str], rows: &[&[&str]]) -> VecRowSource {
    let header = Header::from_columns(columns.iter().map(|c| (*c, "text")));
    let rows = rows
        .iter()
        .map(|fields| fields.iter().map(|f| Value::from(*f)).collect())
        .collect();
    VecRowSource::new(header, rows)
}

/// `(level, name)` rows with names `n1, n2, ...`.
pub fn levels(depths: &[i64]) -> VecRowSource {
    let header = Header::from_columns([("level", "int"), ("name", "text")]);
    let rows = depths
        .iter()
        .enumerate()
        .map(|(i, d)| Row::new(vec![Value::Int(*d), Value::Text(format!("n{}", i + 1))]))
        .collect();
    VecRowSource::new(header, rows)
}

/// `(parent, id, name)` rows with names `n<id>`; `None` parents are null.
pub fn links(pairs: &[(Option<i64>, i64)]) -> VecRowSource {
    let header = Header::from_columns([("parent", "int"), ("id", "int"), ("name", "text")]);
    let rows = pairs
        .iter()
        .map(|(parent, id)| {
            Row::new(vec![
                Value::from(*parent),
                Value::Int(*id),
                Value::Text(format!("n{}", id)),
            ])
        })
        .collect();
    VecRowSource::new(header, rows)
}

/// Staff sorted by department and team.
pub fn org_chart() -> VecRowSource {
    table(
        &["dept", "team", "name", "role"],
        &[
            &["Engineering", "Platform", "Ada", "lead"],
            &["Engineering", "Platform", "Linus", "dev"],
            &["Engineering", "Tools", "Grace", "lead"],
            &["Engineering", "Tools", "Ken", "dev"],
            &["Sales", "EMEA", "Margaret", "lead"],
            &["Sales", "Tools", "Dennis", "dev"],
        ],
    )
}

/// Reporting lines in preorder, as a connect-by-prior query returns them.
pub fn reporting_lines() -> VecRowSource {
    let header = Header::from_columns([
        ("manager_id", "int"),
        ("employee_id", "int"),
        ("name", "varchar"),
    ]);
    let lines: [(Option<i64>, i64, &str); 6] = [
        (None, 1, "Ada"),
        (Some(1), 2, "Linus"),
        (Some(2), 4, "Ken"),
        (Some(1), 3, "Grace"),
        (Some(3), 5, "Dennis"),
        (Some(3), 6, "Margaret"),
    ];
    let rows = lines
        .into_iter()
        .map(|(manager, id, name)| {
            Row::new(vec![Value::from(manager), Value::Int(id), Value::from(name)])
        })
        .collect();
    VecRowSource::new(header, rows)
}
