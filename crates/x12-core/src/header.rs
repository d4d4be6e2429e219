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

//! Fixed-width ISA header layout.
//!
//! The ISA segment is the only segment with fixed field widths. Every write
//! that touches it re-clamps each field to the declared width.

use crate::delimiters::Delimiters;
use tracing::debug;

/// Tag of the interchange header segment.
pub const HEADER_TAG: &str = "ISA";

/// Number of data fields in the ISA segment.
pub const HEADER_FIELD_COUNT: usize = 16;

/// Declared widths by row position: the tag, then ISA-01 through ISA-16.
pub const HEADER_FIELD_WIDTHS: [usize; HEADER_FIELD_COUNT + 1] =
    [3, 2, 10, 2, 10, 2, 15, 2, 15, 6, 4, 1, 5, 9, 1, 1, 1];

/// Whether `tag` names the interchange header (case-insensitive).
pub fn is_header_tag(tag: &str) -> bool {
    tag.eq_ignore_ascii_case(HEADER_TAG)
}

/// Declared width of the ISA row position `index` (0 is the tag).
pub fn field_width(index: usize) -> Option<usize> {
    HEADER_FIELD_WIDTHS.get(index).copied()
}

/// Left-justify `value` into exactly `width` characters.
pub fn fit_width(value: &str, width: usize) -> String {
    let clamped: String = value.chars().take(width).collect();
    format!("{:<width$}", clamped, width = width)
}

/// Fit an ISA row to the fixed layout: exactly ISA-01 through ISA-16, each
/// clamped or padded to its declared width.
pub fn normalize_header(fields: &mut Vec<String>) {
    let mut changed = 0usize;
    if fields.len() != HEADER_FIELD_COUNT + 1 {
        debug!(from = fields.len(), to = HEADER_FIELD_COUNT + 1, "resized ISA row");
        fields.resize(HEADER_FIELD_COUNT + 1, String::new());
    }
    for (index, value) in fields.iter_mut().enumerate() {
        if let Some(width) = field_width(index) {
            if value.chars().count() != width {
                *value = fit_width(value, width);
                changed += 1;
            }
        }
    }
    if changed > 0 {
        debug!(fields = changed, "normalized ISA field widths");
    }
}

/// A minimal ISA header row declaring `delimiters`, already width-normalized.
pub fn default_header(delimiters: &Delimiters) -> Vec<String> {
    let repetition = delimiters.repetition.to_string();
    let component = delimiters.component.to_string();
    let mut fields: Vec<String> = [
        HEADER_TAG,
        "00",
        "",
        "00",
        "",
        "ZZ",
        "",
        "ZZ",
        "",
        "",
        "",
        repetition.as_str(),
        "00501",
        "",
        "0",
        "P",
        component.as_str(),
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();
    normalize_header(&mut fields);
    fields
}
