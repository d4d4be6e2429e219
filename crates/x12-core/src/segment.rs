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

//! Segment rows.

/// One segment: the tag at position 0 followed by its fields.
///
/// Fields hold raw text. Repetitions and components are split out of that
/// text on demand and flattened back into it on write.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Segment {
    /// Tag followed by field values.
    pub fields: Vec<String>,
}

impl Segment {
    /// Create a segment from its tag and field values.
    pub fn new(fields: Vec<String>) -> Self {
        Self { fields }
    }

    /// A new segment holding only `tag` (upper-cased).
    pub fn blank(tag: &str) -> Self {
        Self {
            fields: vec![tag.to_ascii_uppercase()],
        }
    }

    /// Split segment text on `field_delimiter`, keeping empty trailing fields.
    pub fn parse(text: &str, field_delimiter: char) -> Self {
        Self {
            fields: text.split(field_delimiter).map(str::to_string).collect(),
        }
    }

    /// The segment tag.
    pub fn tag(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or("")
    }

    /// Whether the tag equals `tag`, ignoring ASCII case.
    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag().eq_ignore_ascii_case(tag)
    }

    /// Field `index` (1-based; 0 is the tag).
    pub fn field(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Number of positions including the tag.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the segment has no tag.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Grow to at least `len` positions with empty fields.
    pub fn ensure_len(&mut self, len: usize) {
        if self.fields.len() < len {
            self.fields.resize(len, String::new());
        }
    }

    /// Join fields with `field_delimiter`.
    pub fn to_text(&self, field_delimiter: char) -> String {
        join_parts(&self.fields, field_delimiter)
    }
}

impl From<Vec<String>> for Segment {
    fn from(fields: Vec<String>) -> Self {
        Self::new(fields)
    }
}

impl From<Vec<&str>> for Segment {
    fn from(fields: Vec<&str>) -> Self {
        Self::new(fields.into_iter().map(str::to_string).collect())
    }
}

/// Split field or repetition text into its parts. Empty text has no parts.
pub(crate) fn split_parts(text: &str, delimiter: char) -> Vec<String> {
    if text.is_empty() {
        Vec::new()
    } else {
        text.split(delimiter).map(str::to_string).collect()
    }
}

/// Flatten parts back into field or repetition text.
pub(crate) fn join_parts(parts: &[String], delimiter: char) -> String {
    let mut buf = [0u8; 4];
    parts.join(&*delimiter.encode_utf8(&mut buf))
}
