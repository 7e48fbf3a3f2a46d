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

//! Ordered, sliceable views over `(name, value)` attribute pairs.
//!
//! All three builders split a row's attributes into control columns (depth,
//! id, parent, grouping keys) and data columns. [`AttributeView`] does this
//! without copying: it is two parallel borrowed slices that can be windowed.
//! [`GroupKey`] is the owned snapshot taken when a value sequence has to
//! outlive the row it came from.

use std::fmt;

/// A borrowed window over parallel name and value slices.
///
/// Equality compares value sequences only; names are ignored.
///
/// # Examples
///
/// ```rust
/// use rowtree_core::AttributeView;
///
/// let names = vec!["dept".to_string(), "team".to_string(), "name".to_string()];
/// let values = vec!["R&D".to_string(), "core".to_string(), "Ada".to_string()];
/// let view = AttributeView::new(&names, &values);
///
/// let (key, rest) = view.split_at(2);
/// assert_eq!(key.len(), 2);
/// assert_eq!(rest.get(0), Some(("name", "Ada")));
///
/// // Widths past the end are clamped.
/// let (all, none) = view.split_at(10);
/// assert_eq!(all.len(), 3);
/// assert!(none.is_empty());
/// ```
#[derive(Clone, Copy)]
pub struct AttributeView<'a> {
    names: &'a [String],
    values: &'a [String],
}

impl<'a> AttributeView<'a> {
    /// Create a view over parallel slices. If the lengths differ, the view is
    /// cut to the shorter one.
    pub fn new(names: &'a [String], values: &'a [String]) -> Self {
        let len = names.len().min(values.len());
        Self {
            names: &names[..len],
            values: &values[..len],
        }
    }

    /// A view with no attributes.
    pub fn empty() -> Self {
        Self {
            names: &[],
            values: &[],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The `(name, value)` pair at a 0-based position.
    pub fn get(&self, index: usize) -> Option<(&'a str, &'a str)> {
        Some((self.names.get(index)?.as_str(), self.values.get(index)?.as_str()))
    }

    pub fn names(&self) -> &'a [String] {
        self.names
    }

    pub fn values(&self) -> &'a [String] {
        self.values
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.names
            .iter()
            .zip(self.values.iter())
            .map(|(n, v)| (n.as_str(), v.as_str()))
    }

    /// The sub-range `[lo, hi)`, clamped to the view.
    pub fn window(&self, lo: usize, hi: usize) -> Self {
        let hi = hi.min(self.len());
        let lo = lo.min(hi);
        Self {
            names: &self.names[lo..hi],
            values: &self.values[lo..hi],
        }
    }

    /// Everything after the first `n` attributes.
    #[inline]
    pub fn skip(&self, n: usize) -> Self {
        self.window(n, self.len())
    }

    /// The first `n` attributes and the rest. `n` is clamped to the view.
    #[inline]
    pub fn split_at(&self, n: usize) -> (Self, Self) {
        let n = n.min(self.len());
        (self.window(0, n), self.window(n, self.len()))
    }

    /// Copy the values out so they survive the row buffer being reused.
    pub fn snapshot(&self) -> GroupKey {
        GroupKey(self.values.to_vec())
    }
}

impl PartialEq for AttributeView<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for AttributeView<'_> {}

impl fmt::Debug for AttributeView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl Default for AttributeView<'_> {
    fn default() -> Self {
        Self::empty()
    }
}

/// An owned snapshot of an attribute window's values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct GroupKey(Vec<String>);

impl GroupKey {
    pub fn values(&self) -> &[String] {
        &self.0
    }
}

impl PartialEq<AttributeView<'_>> for GroupKey {
    fn eq(&self, other: &AttributeView<'_>) -> bool {
        self.0.as_slice() == other.values
    }
}

impl From<Vec<String>> for GroupKey {
    fn from(values: Vec<String>) -> Self {
        Self(values)
    }
}
