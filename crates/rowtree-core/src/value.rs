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

//! Field values carried by rows.

use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

/// A single field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// SQL-style NULL; renders as the empty string.
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
}

impl Value {
    /// Returns true if this is a null value.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Default stringification, or `None` for null.
    ///
    /// Parent and id comparisons go through this, so a null parent never
    /// matches an open ancestor.
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        match self {
            Value::Null => None,
            Value::Text(s) => Some(Cow::Borrowed(s)),
            other => Some(Cow::Owned(other.to_string())),
        }
    }

    /// Read the value as a tree depth.
    ///
    /// Null reads as 0 and floats are truncated toward zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use rowtree_core::Value;
    ///
    /// assert_eq!(Value::Text(" 3 ".into()).as_depth(), Ok(3));
    /// assert_eq!(Value::Float(2.9).as_depth(), Ok(2));
    /// assert_eq!(Value::Null.as_depth(), Ok(0));
    /// assert!(Value::Text("deep".into()).as_depth().is_err());
    /// ```
    pub fn as_depth(&self) -> Result<i64, String> {
        match self {
            Value::Null => Ok(0),
            Value::Bool(b) => Ok(i64::from(*b)),
            Value::Int(n) => Ok(*n),
            Value::Float(f) if f.is_finite() => Ok(f.trunc() as i64),
            Value::Float(f) => Err(format!("not a finite number: {}", f)),
            Value::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(0);
                }
                trimmed
                    .parse::<i64>()
                    .map_err(|_| format!("not an integer: {:?}", s))
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", x),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Injectable value-to-text conversion used for record attributes.
pub type Serializer = Arc<dyn Fn(&Value) -> String + Send + Sync>;

/// The serializer used when none is configured.
pub fn default_serializer(value: &Value) -> String {
    value.to_string()
}
