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

//! Resource limits for X12 documents.

/// Configurable limits for document construction and structural writes.
///
/// Writes pad missing structure on demand, so a selector such as
/// `EB(5000000)-1` would otherwise allocate millions of blank segments.
/// `max_index` bounds that padding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Limits {
    /// Maximum input size in bytes (default: 256MB).
    pub max_input_size: usize,
    /// Maximum number of segments in a document (default: 10M).
    pub max_segments: usize,
    /// Maximum number of fields in one segment, tag included (default: 4096).
    pub max_fields: usize,
    /// Largest 1-based occurrence, field, repetition or component index a
    /// write may pad out to (default: 100k).
    pub max_index: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_input_size: 256 * 1024 * 1024, // 256MB
            max_segments: 10_000_000,
            max_fields: 4096,
            max_index: 100_000,
        }
    }
}

impl Limits {
    /// Create limits with no restrictions (for testing).
    pub fn unlimited() -> Self {
        Self {
            max_input_size: usize::MAX,
            max_segments: usize::MAX,
            max_fields: usize::MAX,
            max_index: usize::MAX,
        }
    }
}
