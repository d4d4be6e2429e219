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

//! Delimiter extraction from the ISA header.
//!
//! An interchange declares its own structural characters inside the ISA
//! segment. In the fixed 106-byte layout they sit at:
//!
//! | offset | role                | source field |
//! |--------|---------------------|--------------|
//! | 3      | field separator     | after `ISA`  |
//! | 82     | repetition          | ISA-11       |
//! | 104    | component           | ISA-16       |
//! | 105    | segment terminator  | after ISA-16 |
//!
//! Extraction walks the first sixteen field separators instead of trusting
//! the byte offsets, so headers whose fields were never padded to width
//! (e.g. `ISA*00**00**ZZ**ZZ****^*00501**0*P*:~`) yield the same result.

use crate::error::X12Result;
use crate::errors::messages;
use crate::header::{HEADER_FIELD_COUNT, HEADER_TAG};
use std::fmt;
use tracing::debug;

/// Legacy ISA-11 value (interchange standards identifier) in pre-4020 headers.
const LEGACY_REPETITION: char = 'U';

/// Byte offset of the segment terminator in a fixed-width header.
const FIXED_TERMINATOR_OFFSET: usize = 105;

/// The four structural delimiters of one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delimiters {
    /// Separates fields within a segment.
    pub field: char,
    /// Separates components within a repetition.
    pub component: char,
    /// Separates repetitions within a field.
    pub repetition: char,
    /// Terminates each segment.
    pub segment: char,
}

impl Default for Delimiters {
    /// ISA-standard defaults: `*`, `:`, `^`, `~`.
    fn default() -> Self {
        Self {
            field: '*',
            component: ':',
            repetition: '^',
            segment: '~',
        }
    }
}

impl Delimiters {
    /// Derive the delimiters declared by the ISA header at the start of `text`.
    ///
    /// Leading whitespace is ignored. The tag match is case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns `MalformedHeader` if the text does not start with `ISA`, the
    /// header has fewer than sixteen delimited fields, a delimiter position is
    /// empty or holds a multi-byte character, or two roles share a character.
    pub fn from_header(text: &str) -> X12Result<Self> {
        let text = text.trim_start();
        let bytes = text.as_bytes();

        if bytes.len() < 4 || !bytes[..3].eq_ignore_ascii_case(HEADER_TAG.as_bytes()) {
            let found: String = text.chars().take(3).collect();
            return Err(messages::header_tag_missing(&found));
        }

        let field = ascii_at(text, 3, "field")?;

        // Offsets of the sixteen separators that precede ISA-01 through ISA-16.
        let separators: Vec<usize> = memchr::memchr_iter(field as u8, bytes)
            .take(HEADER_FIELD_COUNT)
            .collect();
        if separators.len() < HEADER_FIELD_COUNT {
            return Err(messages::header_truncated(separators.len()));
        }

        let isa11 = &text[separators[10] + 1..separators[11]];
        let repetition = match isa11.chars().next() {
            Some(LEGACY_REPETITION) => '^',
            Some(c) if c.is_ascii() => c,
            Some(c) => return Err(messages::header_delimiter_not_ascii("repetition", c)),
            None => {
                return Err(messages::header_delimiter_missing(
                    "repetition",
                    separators[10] + 1,
                ))
            }
        };

        let isa16 = separators[15] + 1;
        let component = ascii_at(text, isa16, "component")?;
        let segment = ascii_at(text, isa16 + 1, "segment")?;

        let delimiters = Self {
            field,
            component,
            repetition,
            segment,
        };
        delimiters.ensure_distinct()?;

        if isa16 + 1 != FIXED_TERMINATOR_OFFSET {
            debug!(
                terminator_offset = isa16 + 1,
                "ISA header is not fixed-width; delimiters taken from field positions"
            );
        }
        debug!(%delimiters, "derived delimiters from ISA header");

        Ok(delimiters)
    }

    /// All four delimiters in structural order (field, repetition, component, segment).
    pub fn as_array(&self) -> [char; 4] {
        [self.field, self.repetition, self.component, self.segment]
    }

    /// Whether `c` is one of the four structural delimiters.
    pub fn contains(&self, c: char) -> bool {
        self.as_array().contains(&c)
    }

    fn ensure_distinct(&self) -> X12Result<()> {
        let all = self.as_array();
        for (i, c) in all.iter().enumerate() {
            if all[i + 1..].contains(c) {
                return Err(messages::header_delimiters_not_distinct(*c));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Delimiters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "field={} component={} repetition={} segment={}",
            self.field.escape_default(),
            self.component.escape_default(),
            self.repetition.escape_default(),
            self.segment.escape_default()
        )
    }
}

/// The single-byte character at byte `offset`, or a `MalformedHeader` error.
fn ascii_at(text: &str, offset: usize, which: &str) -> X12Result<char> {
    match text.get(offset..).and_then(|rest| rest.chars().next()) {
        Some(c) if c.is_ascii() => Ok(c),
        Some(c) => Err(messages::header_delimiter_not_ascii(which, c)),
        None => Err(messages::header_delimiter_missing(which, offset)),
    }
}
