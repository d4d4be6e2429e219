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

//! Selector grammar.
//!
//! A selector addresses a segment occurrence, field, repetition and
//! component in one compact string:
//!
//! ```text
//! selector   := segtag occurrence? ('-' field)? repetition? ('.' component)?
//! segtag     := 2 or 3 characters, the 3rd excluding '-', '.', '('
//! occurrence := '(' (digits | '+' | '?' | '*')? ')'
//! field      := digits
//! repetition := '(' (digits | '+' | '?' | '*')? ')'
//! component  := digits
//! ```
//!
//! # Examples
//!
//! ```
//! use x12_core::{Selector, Spec};
//!
//! let sel: Selector = "EB(2)-3(+).1".parse().unwrap();
//! assert_eq!(sel.tag, "EB");
//! assert_eq!(sel.occurrence, Spec::Index(2));
//! assert_eq!(sel.field, Some(3));
//! assert_eq!(sel.repetition, Spec::Append);
//! assert_eq!(sel.component, Some(1));
//! ```
//!
//! An empty group `()` is an explicit index of zero, which is distinct from
//! an absent group.

use crate::error::X12Result;
use crate::errors::messages;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

/// How an occurrence or repetition slot was specified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Spec {
    /// No group: first on read, last on write.
    #[default]
    Absent,
    /// `(n)` or `()`: an explicit index, 1-based (`()` is zero).
    Index(usize),
    /// `(+)`: a new entry after the last one.
    Append,
    /// `(?)`: the number of entries.
    Count,
    /// `(*)`: every entry.
    All,
}

impl fmt::Display for Spec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => Ok(()),
            Self::Index(n) => write!(f, "({})", n),
            Self::Append => write!(f, "(+)"),
            Self::Count => write!(f, "(?)"),
            Self::All => write!(f, "(*)"),
        }
    }
}

/// A parsed selector address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Selector {
    /// Segment tag, matched case-insensitively.
    pub tag: String,
    /// Which matching segment(s).
    pub occurrence: Spec,
    /// Field index (1-based).
    pub field: Option<usize>,
    /// Which repetition(s) within the field.
    pub repetition: Spec,
    /// Component index (1-based) within the repetition.
    pub component: Option<usize>,
}

impl Selector {
    /// Parse selector text.
    ///
    /// # Errors
    ///
    /// Returns `BadSelector` if `text` does not match the grammar.
    pub fn parse(text: &str) -> X12Result<Self> {
        let selector = Parser::new(text).parse()?;
        trace!(text, ?selector, "parsed selector");
        Ok(selector)
    }

    /// Whether this selector gathers every matching segment.
    pub fn is_gather(&self) -> bool {
        self.occurrence == Spec::All
    }

    /// Reject zero field/component indexes and parts addressed without a field.
    pub(crate) fn check_read(&self) -> X12Result<()> {
        let text = self.to_string();
        if self.field == Some(0) {
            return Err(messages::zero_index(&text, "field"));
        }
        if self.component == Some(0) {
            return Err(messages::zero_index(&text, "component"));
        }
        if self.field.is_none() {
            if self.repetition != Spec::Absent {
                return Err(messages::part_without_field(&text, "repetition"));
            }
            if self.component.is_some() {
                return Err(messages::part_without_field(&text, "component"));
            }
        }
        Ok(())
    }

    /// Read checks plus: no count queries, no zero occurrence or repetition.
    pub(crate) fn check_write(&self) -> X12Result<()> {
        self.check_read()?;
        let text = self.to_string();
        if self.occurrence == Spec::Count || self.repetition == Spec::Count {
            return Err(messages::count_not_writable(&text));
        }
        if self.occurrence == Spec::Index(0) {
            return Err(messages::zero_index(&text, "occurrence"));
        }
        if self.repetition == Spec::Index(0) {
            return Err(messages::zero_index(&text, "repetition"));
        }
        Ok(())
    }
}

impl FromStr for Selector {
    type Err = crate::error::X12Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.tag, self.occurrence)?;
        if let Some(field) = self.field {
            write!(f, "-{}", field)?;
        }
        write!(f, "{}", self.repetition)?;
        if let Some(component) = self.component {
            write!(f, ".{}", component)?;
        }
        Ok(())
    }
}

/// Single-pass recursive-descent parser over the selector characters.
struct Parser<'a> {
    text: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            chars: text.chars().collect(),
            pos: 0,
        }
    }

    fn parse(mut self) -> X12Result<Selector> {
        if self.chars.is_empty() {
            return Err(messages::empty_selector());
        }

        let tag = self.tag()?;
        let occurrence = self.group()?;
        let field = if self.eat('-') {
            Some(self.digits("a field index")?)
        } else {
            None
        };
        let repetition = self.group()?;
        let component = if self.eat('.') {
            Some(self.digits("a component index")?)
        } else {
            None
        };

        if let Some(&c) = self.chars.get(self.pos) {
            return Err(messages::unexpected_selector_char(self.text, c, self.pos));
        }

        Ok(Selector {
            tag,
            occurrence,
            field,
            repetition,
            component,
        })
    }

    fn tag(&mut self) -> X12Result<String> {
        if self.chars.len() < 2 {
            return Err(messages::bad_segment_tag(self.text));
        }
        let len = match self.chars.get(2) {
            Some('-' | '.' | '(') | None => 2,
            Some(_) => 3,
        };
        self.pos = len;
        Ok(self.chars[..len].iter().collect())
    }

    fn group(&mut self) -> X12Result<Spec> {
        if !self.eat('(') {
            return Ok(Spec::Absent);
        }
        let spec = match self.chars.get(self.pos) {
            None => return Err(messages::unterminated_selector(self.text, "')'")),
            Some(')') => Spec::Index(0),
            Some('+') => self.advance(Spec::Append),
            Some('?') => self.advance(Spec::Count),
            Some('*') => self.advance(Spec::All),
            Some(c) if c.is_ascii_digit() => Spec::Index(self.digits("an index")?),
            Some(&c) => return Err(messages::unexpected_selector_char(self.text, c, self.pos)),
        };
        match self.chars.get(self.pos) {
            Some(')') => {
                self.pos += 1;
                Ok(spec)
            }
            Some(&c) => Err(messages::unexpected_selector_char(self.text, c, self.pos)),
            None => Err(messages::unterminated_selector(self.text, "')'")),
        }
    }

    fn digits(&mut self, expected: &str) -> X12Result<usize> {
        let start = self.pos;
        while self.chars.get(self.pos).is_some_and(char::is_ascii_digit) {
            self.pos += 1;
        }
        if start == self.pos {
            return match self.chars.get(self.pos) {
                Some(&c) => Err(messages::unexpected_selector_char(self.text, c, self.pos)),
                None => Err(messages::unterminated_selector(self.text, expected)),
            };
        }
        self.chars[start..self.pos]
            .iter()
            .collect::<String>()
            .parse()
            .map_err(|_| messages::index_overflow(self.text, start))
    }

    fn eat(&mut self, c: char) -> bool {
        if self.chars.get(self.pos) == Some(&c) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn advance(&mut self, spec: Spec) -> Spec {
        self.pos += 1;
        spec
    }
}
