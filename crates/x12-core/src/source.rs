// Dweve X12 - ANSI X12 EDI toolkit
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

//! Construction inputs, batch updates and replacement values.
//!
//! A [`Document`](crate::Document) can be built from a closed set of input
//! shapes, each a variant of [`Source`]. Batch writes take a [`Batch`].
//! With the `json` feature both can also be decoded from untyped JSON, which
//! is the only path on which an unsupported shape can be supplied.

use std::collections::BTreeMap;
use std::fmt;
use std::io::Read;

use crate::document::Document;
use crate::segment::join_parts;

/// A value written through a selector.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Replacement {
    /// No value. Writes one empty part; skipped by batch updates.
    #[default]
    Absent,
    /// A single string.
    Text(String),
    /// Ordered parts, joined on the delimiter of the level being written.
    Parts(Vec<String>),
}

impl Replacement {
    /// Whether this is [`Replacement::Absent`].
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Flatten into one string, joining parts with `delimiter`.
    pub fn joined(&self, delimiter: char) -> String {
        match self {
            Self::Absent => String::new(),
            Self::Text(text) => text.clone(),
            Self::Parts(parts) => join_parts(parts, delimiter),
        }
    }

    /// Apply `f` to the text of every part.
    pub fn map_text<F: Fn(&str) -> String>(&self, f: F) -> Self {
        match self {
            Self::Absent => Self::Absent,
            Self::Text(text) => Self::Text(f(text)),
            Self::Parts(parts) => Self::Parts(parts.iter().map(|p| f(p)).collect()),
        }
    }
}

impl From<&str> for Replacement {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Replacement {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for Replacement {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl From<Vec<String>> for Replacement {
    fn from(parts: Vec<String>) -> Self {
        Self::Parts(parts)
    }
}

impl From<Vec<&str>> for Replacement {
    fn from(parts: Vec<&str>) -> Self {
        Self::Parts(parts.into_iter().map(str::to_string).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Replacement {
    fn from(parts: [&str; N]) -> Self {
        Self::Parts(parts.iter().map(|p| p.to_string()).collect())
    }
}

impl<T: Into<Replacement>> From<Option<T>> for Replacement {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Absent, Into::into)
    }
}

/// Ordered `(selector, value)` pairs.
pub type Pairs = Vec<(String, Replacement)>;

/// The input a document is constructed from.
#[derive(Default)]
pub enum Source {
    /// No input: a document holding only a default ISA header.
    #[default]
    Empty,
    /// Document text.
    Text(String),
    /// A stream of document text, read to the end at construction.
    Reader(Box<dyn Read>),
    /// Another document, copied through its serialized form.
    Document(Document),
    /// Writes applied in order to an empty document.
    Pairs(Pairs),
    /// Writes applied in key order to an empty document.
    Map(BTreeMap<String, Replacement>),
}

impl Source {
    /// Wrap any reader.
    pub fn reader<R: Read + 'static>(reader: R) -> Self {
        Self::Reader(Box::new(reader))
    }

    /// Short name of the variant, used in log output.
    pub fn shape(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Text(_) => "text",
            Self::Reader(_) => "reader",
            Self::Document(_) => "document",
            Self::Pairs(_) => "pairs",
            Self::Map(_) => "map",
        }
    }
}

impl fmt::Debug for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Source::Empty"),
            Self::Text(text) => f.debug_tuple("Source::Text").field(&text.len()).finish(),
            Self::Reader(_) => write!(f, "Source::Reader(..)"),
            Self::Document(doc) => f.debug_tuple("Source::Document").field(doc).finish(),
            Self::Pairs(pairs) => f.debug_tuple("Source::Pairs").field(pairs).finish(),
            Self::Map(map) => f.debug_tuple("Source::Map").field(map).finish(),
        }
    }
}

impl From<&str> for Source {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Source {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<Document> for Source {
    fn from(doc: Document) -> Self {
        Self::Document(doc)
    }
}

impl From<&Document> for Source {
    fn from(doc: &Document) -> Self {
        Self::Document(doc.clone())
    }
}

impl<S: Into<String>, R: Into<Replacement>> From<Vec<(S, R)>> for Source {
    fn from(pairs: Vec<(S, R)>) -> Self {
        Self::Pairs(collect_pairs(pairs))
    }
}

impl From<BTreeMap<String, Replacement>> for Source {
    fn from(map: BTreeMap<String, Replacement>) -> Self {
        Self::Map(map)
    }
}

/// A set of writes applied by [`Document::update`](crate::Document::update).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Batch {
    /// Applied in the given order.
    Pairs(Pairs),
    /// Applied in key order.
    Map(BTreeMap<String, Replacement>),
}

impl Batch {
    /// Flatten into ordered pairs.
    pub fn into_pairs(self) -> Pairs {
        match self {
            Self::Pairs(pairs) => pairs,
            Self::Map(map) => map.into_iter().collect(),
        }
    }

    /// Number of pairs, absent values included.
    pub fn len(&self) -> usize {
        match self {
            Self::Pairs(pairs) => pairs.len(),
            Self::Map(map) => map.len(),
        }
    }

    /// Whether the batch holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<S: Into<String>, R: Into<Replacement>> From<Vec<(S, R)>> for Batch {
    fn from(pairs: Vec<(S, R)>) -> Self {
        Self::Pairs(collect_pairs(pairs))
    }
}

impl From<BTreeMap<String, Replacement>> for Batch {
    fn from(map: BTreeMap<String, Replacement>) -> Self {
        Self::Map(map)
    }
}

fn collect_pairs<S: Into<String>, R: Into<Replacement>>(pairs: Vec<(S, R)>) -> Pairs {
    pairs
        .into_iter()
        .map(|(selector, value)| (selector.into(), value.into()))
        .collect()
}

// ==================== JSON decoding ====================

#[cfg(feature = "json")]
mod json {
    use super::{Batch, Pairs, Replacement, Source};
    use crate::error::X12Result;
    use crate::errors::messages;
    use serde_json::{Map, Value};
    use std::collections::BTreeMap;

    fn shape(value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            Value::Bool(_) => "a boolean",
            Value::Number(_) => "a number",
            Value::String(_) => "a string",
            Value::Array(_) => "an array",
            Value::Object(_) => "an object",
        }
    }

    fn replacement(value: Value) -> Result<Replacement, &'static str> {
        match value {
            Value::Null => Ok(Replacement::Absent),
            Value::String(text) => Ok(Replacement::Text(text)),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(text) => Ok(text),
                    other => Err(shape(&other)),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Replacement::Parts),
            other => Err(shape(&other)),
        }
    }

    fn pairs(items: Vec<Value>) -> Result<Pairs, &'static str> {
        items
            .into_iter()
            .map(|item| match item {
                Value::Array(mut pair) if pair.len() == 2 => {
                    let value = pair.pop().unwrap_or(Value::Null);
                    match pair.pop() {
                        Some(Value::String(selector)) => Ok((selector, replacement(value)?)),
                        _ => Err("a pair whose selector is not a string"),
                    }
                }
                Value::Array(_) => Err("an array entry that is not a [selector, value] pair"),
                other => Err(shape(&other)),
            })
            .collect()
    }

    fn mapping(map: Map<String, Value>) -> Result<BTreeMap<String, Replacement>, &'static str> {
        map.into_iter()
            .map(|(selector, value)| Ok((selector, replacement(value)?)))
            .collect()
    }

    impl Source {
        /// Decode a construction input from JSON.
        ///
        /// `null` is empty, a string is document text, an object is a
        /// selector/value mapping and an array holds `[selector, value]` pairs.
        ///
        /// # Errors
        ///
        /// Returns `UnsupportedSource` for any other shape.
        pub fn from_json(value: Value) -> X12Result<Self> {
            match value {
                Value::Null => Ok(Self::Empty),
                Value::String(text) => Ok(Self::Text(text)),
                Value::Object(map) => mapping(map)
                    .map(Self::Map)
                    .map_err(messages::unsupported_source),
                Value::Array(items) => pairs(items)
                    .map(Self::Pairs)
                    .map_err(messages::unsupported_source),
                other => Err(messages::unsupported_source(shape(&other))),
            }
        }
    }

    impl Batch {
        /// Decode a batch from JSON: an object mapping or an array of pairs.
        ///
        /// # Errors
        ///
        /// Returns `UnsupportedBatch` for any other shape.
        pub fn from_json(value: Value) -> X12Result<Self> {
            match value {
                Value::Object(map) => mapping(map)
                    .map(Self::Map)
                    .map_err(messages::unsupported_batch),
                Value::Array(items) => pairs(items)
                    .map(Self::Pairs)
                    .map_err(messages::unsupported_batch),
                other => Err(messages::unsupported_batch(shape(&other))),
            }
        }
    }
}
