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

//! The nested event sink every builder writes to.

use crate::attributes::AttributeView;

/// Receiver of a single-pass, well-nested event stream.
///
/// Builders only ever talk to this trait. Implementations decide what an
/// event means: the `rowtree-xml` sink writes markup, the test crate records
/// events, [`GroupFilter`](crate::GroupFilter) rewrites them and forwards.
pub trait EventSink {
    /// Error raised by the sink; builders pass it through unchanged.
    type Error: std::error::Error + Send + Sync + 'static;

    fn start_stream(&mut self) -> Result<(), Self::Error>;

    fn end_stream(&mut self) -> Result<(), Self::Error>;

    /// Open an element with its ordered attributes.
    fn open(&mut self, name: &str, attributes: AttributeView<'_>) -> Result<(), Self::Error>;

    /// Close the most recently opened element.
    fn close(&mut self, name: &str) -> Result<(), Self::Error>;

    fn text(&mut self, data: &str) -> Result<(), Self::Error>;

    /// Informational aside. Sinks that cannot represent comments ignore it.
    fn comment(&mut self, _data: &str) -> Result<(), Self::Error> {
        Ok(())
    }
}

impl<S: EventSink + ?Sized> EventSink for &mut S {
    type Error = S::Error;

    fn start_stream(&mut self) -> Result<(), Self::Error> {
        (**self).start_stream()
    }

    fn end_stream(&mut self) -> Result<(), Self::Error> {
        (**self).end_stream()
    }

    fn open(&mut self, name: &str, attributes: AttributeView<'_>) -> Result<(), Self::Error> {
        (**self).open(name, attributes)
    }

    fn close(&mut self, name: &str) -> Result<(), Self::Error> {
        (**self).close(name)
    }

    fn text(&mut self, data: &str) -> Result<(), Self::Error> {
        (**self).text(data)
    }

    fn comment(&mut self, data: &str) -> Result<(), Self::Error> {
        (**self).comment(data)
    }
}

/// Element names used for the tree.
///
/// One group name is shared by every grouping level; levels are told apart
/// by nesting only.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TagNames {
    /// Root element wrapping the whole result set (default: `rs`).
    pub root: String,
    /// Element per row (default: `r`).
    pub record: String,
    /// Shared grouping ancestor (default: `g`).
    pub group: String,
}

impl Default for TagNames {
    fn default() -> Self {
        Self {
            root: "rs".to_string(),
            record: "r".to_string(),
            group: "g".to_string(),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Minimal in-crate sink for unit tests.

    use super::*;
    use std::convert::Infallible;

    /// Records events as compact strings: `+name[v1,v2]`, `-name`, `#comment`.
    #[derive(Debug, Default)]
    pub struct Trace {
        pub events: Vec<String>,
        pub open: usize,
        pub max_open: usize,
    }

    impl Trace {
        pub fn joined(&self) -> String {
            self.events.join(" ")
        }
    }

    impl EventSink for Trace {
        type Error = Infallible;

        fn start_stream(&mut self) -> Result<(), Infallible> {
            self.events.push("<<".into());
            Ok(())
        }

        fn end_stream(&mut self) -> Result<(), Infallible> {
            self.events.push(">>".into());
            Ok(())
        }

        fn open(&mut self, name: &str, attributes: AttributeView<'_>) -> Result<(), Infallible> {
            self.open += 1;
            self.max_open = self.max_open.max(self.open);
            self.events
                .push(format!("+{}[{}]", name, attributes.values().join(",")));
            Ok(())
        }

        fn close(&mut self, name: &str) -> Result<(), Infallible> {
            self.open -= 1;
            self.events.push(format!("-{}", name));
            Ok(())
        }

        fn text(&mut self, data: &str) -> Result<(), Infallible> {
            self.events.push(format!("'{}'", data));
            Ok(())
        }

        fn comment(&mut self, data: &str) -> Result<(), Infallible> {
            self.events.push(format!("#{}", data));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::Trace;
    use super::*;

    #[test]
    fn test_default_tags() {
        let tags = TagNames::default();
        assert_eq!(tags.root, "rs");
        assert_eq!(tags.record, "r");
        assert_eq!(tags.group, "g");
    }

    #[test]
    fn test_forward_through_mut_ref() {
        let mut trace = Trace::default();
        {
            let mut sink = &mut trace;
            sink.open("a", AttributeView::empty()).unwrap();
            sink.comment("note").unwrap();
            sink.close("a").unwrap();
        }
        assert_eq!(trace.joined(), "+a[] #note -a");
    }

    #[test]
    fn test_comment_defaults_to_noop() {
        struct Silent;
        impl EventSink for Silent {
            type Error = std::convert::Infallible;
            fn start_stream(&mut self) -> Result<(), Self::Error> {
                Ok(())
            }
            fn end_stream(&mut self) -> Result<(), Self::Error> {
                Ok(())
            }
            fn open(&mut self, _: &str, _: AttributeView<'_>) -> Result<(), Self::Error> {
                Ok(())
            }
            fn close(&mut self, _: &str) -> Result<(), Self::Error> {
                Ok(())
            }
            fn text(&mut self, _: &str) -> Result<(), Self::Error> {
                Ok(())
            }
        }
        assert!(Silent.comment("ignored").is_ok());
    }
}
