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

//! Shared test fixtures and utilities for rowtree builders and sinks.
//!
//! # Quick Start
//!
//! ```rust
//! use rowtree_core::{transform, Layout, TransformConfig};
//! use rowtree_test::{fixtures, RecordingSink};
//!
//! let mut sink = RecordingSink::default();
//! let config = TransformConfig { layout: Layout::by_level(), ..Default::default() };
//! transform(&mut fixtures::levels(&[1, 2, 2]), &mut sink, &config).unwrap();
//!
//! assert!(sink.is_balanced());
//! assert_eq!(sink.max_depth(), 3);
//! assert_eq!(
//!     sink.outline(),
//!     r#"<rs name="text"><r name="n1"><r name="n2"/><r name="n3"/></r></rs>"#
//! );
//! ```

pub mod fixtures;
mod recording;

pub use recording::{Event, RecordingSink};
