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

//! Centralized error message constructors for X12 processing.
//!
//! This module provides a single source of truth for all error messages,
//! so the wording of a failure is the same wherever it is raised.

use crate::error::X12Error;

// ==================== Header Errors ====================

/// Document does not begin with the ISA tag.
pub fn header_tag_missing(found: &str) -> X12Error {
    X12Error::malformed_header(format!(
        "expected document to start with 'ISA', found '{}'",
        found
    ))
}

/// Header ended before all sixteen ISA fields were delimited.
pub fn header_truncated(fields_found: usize) -> X12Error {
    X12Error::malformed_header(format!(
        "ISA header ends after {} of 16 fields",
        fields_found
    ))
}

/// A delimiter position in the header holds no character.
pub fn header_delimiter_missing(which: &str, offset: usize) -> X12Error {
    X12Error::malformed_header(format!("no {} delimiter in ISA header", which))
        .with_position(offset)
}

/// Two structural delimiters share the same character.
pub fn header_delimiters_not_distinct(c: char) -> X12Error {
    X12Error::malformed_header(format!(
        "delimiter '{}' is used for more than one structural role",
        c.escape_default()
    ))
}

/// Delimiter is not a single-byte character.
pub fn header_delimiter_not_ascii(which: &str, c: char) -> X12Error {
    X12Error::malformed_header(format!(
        "{} delimiter '{}' is not a single-byte character",
        which,
        c.escape_default()
    ))
}

// ==================== Source Errors ====================

/// Construction input has an unsupported shape.
pub fn unsupported_source(shape: &str) -> X12Error {
    X12Error::unsupported_source(format!(
        "cannot build a document from {}; expected text, a document, or selector/value pairs",
        shape
    ))
}

/// Batch input has an unsupported shape.
pub fn unsupported_batch(shape: &str) -> X12Error {
    X12Error::unsupported_batch(format!(
        "cannot apply {} as a batch; expected [selector, value] pairs or a selector/value mapping",
        shape
    ))
}

/// A stream source failed to read.
pub fn read_failed(err: &std::io::Error) -> X12Error {
    X12Error::io(format!("failed to read document source: {}", err))
}

// ==================== Selector Errors ====================

/// Selector text is empty.
pub fn empty_selector() -> X12Error {
    X12Error::bad_selector("selector is empty")
}

/// Segment tag is not two or three characters.
pub fn bad_segment_tag(selector: &str) -> X12Error {
    X12Error::bad_selector("segment tag must be 2 or 3 characters")
        .with_position(0)
        .with_context(selector)
}

/// Unexpected character in selector.
pub fn unexpected_selector_char(selector: &str, c: char, position: usize) -> X12Error {
    X12Error::bad_selector(format!("unexpected '{}'", c))
        .with_position(position)
        .with_context(selector)
}

/// Selector ended in the middle of a group or index.
pub fn unterminated_selector(selector: &str, expected: &str) -> X12Error {
    X12Error::bad_selector(format!("selector ends where {} was expected", expected))
        .with_position(selector.chars().count())
        .with_context(selector)
}

/// Numeric index does not fit in `usize`.
pub fn index_overflow(selector: &str, position: usize) -> X12Error {
    X12Error::bad_selector("index is too large")
        .with_position(position)
        .with_context(selector)
}

/// Repetition or component addressed without a field.
pub fn part_without_field(selector: &str, part: &str) -> X12Error {
    X12Error::bad_selector(format!("a {} can only be addressed inside a field", part))
        .with_context(selector)
}

/// A count query was used as a write target.
pub fn count_not_writable(selector: &str) -> X12Error {
    X12Error::bad_selector("a count query '?' cannot be written to").with_context(selector)
}

/// A zero field, component, occurrence or repetition index.
pub fn zero_index(selector: &str, part: &str) -> X12Error {
    X12Error::zero_index(format!("{} index must be 1 or greater", part)).with_context(selector)
}

// ==================== Write Errors ====================

/// Value contains a delimiter that belongs to a higher structural level.
pub fn delimiter_conflict(selector: &str, level: &str, delimiter: char) -> X12Error {
    X12Error::delimiter_conflict(format!(
        "{} value contains the '{}' delimiter",
        level,
        delimiter.escape_default()
    ))
    .with_context(selector)
}

/// Header write that would change the delimiters the header declares.
pub fn header_delimiters_changed(selector: &str) -> X12Error {
    X12Error::delimiter_conflict(
        "write would change the delimiters declared by the ISA header",
    )
    .with_context(selector)
}

/// Gather-all selector mixed with other selectors.
pub fn incompatible_query(selector: &str, count: usize) -> X12Error {
    X12Error::incompatible_query(format!(
        "gather-all selector cannot be combined with {} other selector(s)",
        count.saturating_sub(1)
    ))
    .with_context(selector)
}

// ==================== Character Errors ====================

/// Segment text contains a character outside the allowed set.
pub fn invalid_character(c: char, segment: usize) -> X12Error {
    X12Error::invalid_character(format!(
        "character '{}' (U+{:04X}) is not allowed",
        c.escape_default(),
        c as u32
    ))
    .with_context(format!("segment {}", segment + 1))
}

// ==================== Limit Errors ====================

/// Input exceeds maximum size.
pub fn input_too_large(size: usize, limit: usize) -> X12Error {
    X12Error::limit_exceeded(format!(
        "input too large: {} bytes exceeds limit of {} bytes",
        size, limit
    ))
}

/// Too many segments.
pub fn too_many_segments(limit: usize) -> X12Error {
    X12Error::limit_exceeded(format!("document exceeds {} segments", limit))
}

/// Too many fields in one segment.
pub fn too_many_fields(count: usize, limit: usize, segment: usize) -> X12Error {
    X12Error::limit_exceeded(format!(
        "segment has {} fields, exceeding limit of {}",
        count, limit
    ))
    .with_context(format!("segment {}", segment + 1))
}

/// Write would pad structure beyond the configured index limit.
pub fn index_too_large(selector: &str, index: usize, limit: usize) -> X12Error {
    X12Error::limit_exceeded(format!(
        "index {} exceeds the padding limit of {}",
        index, limit
    ))
    .with_context(selector)
}
