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

//! Options controlling how documents are built.
//!
//! # Creating ParseOptions
//!
//! ```
//! use x12_core::ParseOptions;
//!
//! // Reject anything outside the basic character set
//! let opts = ParseOptions::builder()
//!     .strict_charset(true)
//!     .max_index(500)
//!     .build();
//! assert!(opts.strict_charset);
//! assert_eq!(opts.limits.max_index, 500);
//! ```

use crate::limits::Limits;

/// Options for document construction.
///
/// - `limits`: resource limits applied at construction and on every write
/// - `strict_charset`: when true, construction fails on the first character
///   outside the basic character set plus the document's delimiters
#[derive(Debug, Clone, Default)]
pub struct ParseOptions {
    /// Resource limits.
    pub limits: Limits,
    /// Reject characters outside the basic X12 character set.
    pub strict_charset: bool,
}

impl ParseOptions {
    /// Create a new builder for ParseOptions.
    pub fn builder() -> ParseOptionsBuilder {
        ParseOptionsBuilder::new()
    }
}

/// Builder for ergonomic construction of ParseOptions.
#[derive(Debug, Clone, Default)]
pub struct ParseOptionsBuilder {
    limits: Limits,
    strict_charset: bool,
}

impl ParseOptionsBuilder {
    /// Create a new builder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum input size in bytes (default: 256MB).
    pub fn max_input_size(mut self, size: usize) -> Self {
        self.limits.max_input_size = size;
        self
    }

    /// Set the maximum number of segments (default: 10M).
    pub fn max_segments(mut self, count: usize) -> Self {
        self.limits.max_segments = count;
        self
    }

    /// Set the maximum fields per segment (default: 4096).
    pub fn max_fields(mut self, count: usize) -> Self {
        self.limits.max_fields = count;
        self
    }

    /// Set the largest index a write may pad out to (default: 100k).
    pub fn max_index(mut self, index: usize) -> Self {
        self.limits.max_index = index;
        self
    }

    /// Replace all limits at once.
    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Enable strict character validation at construction.
    pub fn strict_charset(mut self, strict: bool) -> Self {
        self.strict_charset = strict;
        self
    }

    /// Build the ParseOptions.
    pub fn build(self) -> ParseOptions {
        ParseOptions {
            limits: self.limits,
            strict_charset: self.strict_charset,
        }
    }
}
