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

//! Character-class compilation for the X12 basic character set.
//!
//! A [`CharClass`] is built from an unordered set of characters. The set is
//! sorted, deduplicated and run-length compressed into closed ranges, then
//! rendered as one regex bracket expression:
//!
//! ```
//! use x12_core::CharClass;
//!
//! let class = CharClass::compile("GECAFB".chars());
//! assert_eq!(class.ranges(), &[('A', 'C'), ('E', 'G')]);
//! assert_eq!(class.pattern(), "[A-CE-G]");
//! assert!(class.contains('F'));
//! assert!(!class.contains('D'));
//! ```
//!
//! Each document owns a [`CharSet`] with two classes: one for raw segment
//! text (basic set plus the document's delimiters) and one for user-supplied
//! values (basic set minus the delimiters).

use crate::delimiters::Delimiters;
use regex::Regex;
use std::borrow::Cow;

/// Punctuation in the X12 basic character set.
const BASIC_PUNCTUATION: &str = "!\"#&'()*+,-./:;=?";

/// Every character of the X12 basic character set.
pub fn basic_charset() -> impl Iterator<Item = char> {
    ('A'..='Z')
        .chain('0'..='9')
        .chain(std::iter::once(' '))
        .chain(BASIC_PUNCTUATION.chars())
}

/// A compiled set of allowed characters.
#[derive(Debug, Clone)]
pub struct CharClass {
    ranges: Vec<(char, char)>,
    pattern: String,
    forbidden: Regex,
}

impl CharClass {
    /// Compile a class from an unordered collection of characters.
    pub fn compile<I: IntoIterator<Item = char>>(chars: I) -> Self {
        let mut chars: Vec<char> = chars.into_iter().collect();
        chars.sort_unstable();
        chars.dedup();

        let mut ranges: Vec<(char, char)> = Vec::new();
        for c in chars {
            match ranges.last_mut() {
                Some((_, last)) if *last as u32 + 1 == c as u32 => *last = c,
                _ => ranges.push((c, c)),
            }
        }

        let body: String = ranges
            .iter()
            .map(|&(first, last)| {
                if first == last {
                    escape(first)
                } else {
                    format!("{}-{}", escape(first), escape(last))
                }
            })
            .collect();

        // An empty class forbids everything.
        let (pattern, inverse) = if body.is_empty() {
            (String::new(), "(?s).".to_string())
        } else {
            (format!("[{}]", body), format!("[^{}]", body))
        };
        let forbidden =
            Regex::new(&inverse).expect("escaped character ranges always form a valid class");

        Self {
            ranges,
            pattern,
            forbidden,
        }
    }

    /// The merged, sorted ranges of allowed characters.
    pub fn ranges(&self) -> &[(char, char)] {
        &self.ranges
    }

    /// The bracket expression matching one allowed character.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The compiled matcher for one forbidden character.
    pub fn forbidden(&self) -> &Regex {
        &self.forbidden
    }

    /// Whether `c` is allowed.
    pub fn contains(&self, c: char) -> bool {
        self.ranges
            .binary_search_by(|&(first, last)| {
                if last < c {
                    std::cmp::Ordering::Less
                } else if first > c {
                    std::cmp::Ordering::Greater
                } else {
                    std::cmp::Ordering::Equal
                }
            })
            .is_ok()
    }

    /// Whether every character of `text` is allowed.
    pub fn is_valid(&self, text: &str) -> bool {
        !self.forbidden.is_match(text)
    }

    /// Byte offset and value of the first forbidden character in `text`.
    pub fn find_invalid(&self, text: &str) -> Option<(usize, char)> {
        self.forbidden
            .find(text)
            .and_then(|m| m.as_str().chars().next().map(|c| (m.start(), c)))
    }

    /// Replace each forbidden character of `text` with `replacement`.
    pub fn replace_invalid<'a>(&self, text: &'a str, replacement: &str) -> Cow<'a, str> {
        self.forbidden.replace_all(text, regex::NoExpand(replacement))
    }
}

fn escape(c: char) -> String {
    regex::escape(c.encode_utf8(&mut [0u8; 4]))
}

/// The two character classes derived from one document's delimiters.
#[derive(Debug, Clone)]
pub struct CharSet {
    payload: CharClass,
    user_data: CharClass,
}

impl CharSet {
    /// Build both classes for `delimiters`.
    pub fn new(delimiters: &Delimiters) -> Self {
        let payload = CharClass::compile(basic_charset().chain(delimiters.as_array()));
        let user_data =
            CharClass::compile(basic_charset().filter(|c| !delimiters.contains(*c)));
        Self { payload, user_data }
    }

    /// Characters allowed in raw segment text: the basic set plus the delimiters.
    pub fn payload(&self) -> &CharClass {
        &self.payload
    }

    /// Characters allowed in user-supplied values: the basic set minus the delimiters.
    pub fn user_data(&self) -> &CharClass {
        &self.user_data
    }
}
