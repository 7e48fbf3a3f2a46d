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

//! CSV input for rowtree builders.
//!
//! [`CsvRowSource`] reads CSV with the `csv` crate and hands out one row at
//! a time, so a file of any length can be turned into a tree in a single
//! pass.
//!
//! # Examples
//!
//! ```
//! use rowtree_core::{transform, Grouping, Layout, TransformConfig};
//! use rowtree_csv::CsvRowSource;
//! # use rowtree_core::{AttributeView, EventSink};
//! # #[derive(Default)]
//! # struct Count(usize);
//! # impl EventSink for Count {
//! #     type Error = std::convert::Infallible;
//! #     fn start_stream(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn end_stream(&mut self) -> Result<(), Self::Error> { Ok(()) }
//! #     fn open(&mut self, n: &str, _: AttributeView<'_>) -> Result<(), Self::Error> {
//! #         if n == "g" { self.0 += 1 } Ok(())
//! #     }
//! #     fn close(&mut self, _: &str) -> Result<(), Self::Error> { Ok(()) }
//! #     fn text(&mut self, _: &str) -> Result<(), Self::Error> { Ok(()) }
//! # }
//!
//! let data = "dept,name\nR&D,Ada\nR&D,Linus\nSales,Grace\n";
//! let mut source = CsvRowSource::new(data.as_bytes())?;
//!
//! let config = TransformConfig {
//!     layout: Layout::Grouped { grouping: Grouping::new(vec![1])? },
//!     ..Default::default()
//! };
//! let mut groups = Count::default();
//! let rows = transform(&mut source, &mut groups, &config)?;
//!
//! assert_eq!(rows, 3);
//! assert_eq!(groups.0, 2);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod source;

pub use error::{CsvSourceError, Result};
pub use source::{CsvRowSource, CsvSourceConfig};
