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

//! Error types for X12 documents and selectors.

use std::fmt;
use thiserror::Error;

/// The kind of error raised by a document operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum X12ErrorKind {
    /// Input is non-empty but does not start with a well-formed ISA header.
    MalformedHeader,
    /// Construction input has a shape the document cannot be built from.
    UnsupportedSource,
    /// Batch update input is neither ordered pairs nor a key/value mapping.
    UnsupportedBatch,
    /// Selector text does not match the address grammar.
    BadSelector,
    /// An explicit 1-based index resolved to zero.
    ZeroIndex,
    /// A value would reintroduce a higher-level delimiter.
    DelimiterConflict,
    /// A gather-all selector was combined with other selectors.
    IncompatibleQuery,
    /// Segment text contains a character outside the allowed set.
    InvalidCharacter,
    /// A configured resource limit was exceeded.
    LimitExceeded,
    /// Reading a stream source failed.
    Io,
}

impl fmt::Display for X12ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedHeader => write!(f, "MalformedHeader"),
            Self::UnsupportedSource => write!(f, "UnsupportedSource"),
            Self::UnsupportedBatch => write!(f, "UnsupportedBatch"),
            Self::BadSelector => write!(f, "BadSelector"),
            Self::ZeroIndex => write!(f, "ZeroIndex"),
            Self::DelimiterConflict => write!(f, "DelimiterConflict"),
            Self::IncompatibleQuery => write!(f, "IncompatibleQuery"),
            Self::InvalidCharacter => write!(f, "InvalidCharacter"),
            Self::LimitExceeded => write!(f, "LimitExceeded"),
            Self::Io => write!(f, "IOError"),
        }
    }
}

/// An error raised while building, reading or writing an X12 document.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct X12Error {
    /// The kind of error.
    pub kind: X12ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// Character offset into the offending input (selector or header), if known.
    pub position: Option<usize>,
    /// Additional context (e.g., the selector being applied).
    pub context: Option<String>,
}

impl X12Error {
    /// Create a new error.
    pub fn new(kind: X12ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            position: None,
            context: None,
        }
    }

    /// Add position information.
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Add context information.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    // Convenience constructors for each error kind
    pub fn malformed_header(message: impl Into<String>) -> Self {
        Self::new(X12ErrorKind::MalformedHeader, message)
    }

    pub fn unsupported_source(message: impl Into<String>) -> Self {
        Self::new(X12ErrorKind::UnsupportedSource, message)
    }

    pub fn unsupported_batch(message: impl Into<String>) -> Self {
        Self::new(X12ErrorKind::UnsupportedBatch, message)
    }

    pub fn bad_selector(message: impl Into<String>) -> Self {
        Self::new(X12ErrorKind::BadSelector, message)
    }

    pub fn zero_index(message: impl Into<String>) -> Self {
        Self::new(X12ErrorKind::ZeroIndex, message)
    }

    pub fn delimiter_conflict(message: impl Into<String>) -> Self {
        Self::new(X12ErrorKind::DelimiterConflict, message)
    }

    pub fn incompatible_query(message: impl Into<String>) -> Self {
        Self::new(X12ErrorKind::IncompatibleQuery, message)
    }

    pub fn invalid_character(message: impl Into<String>) -> Self {
        Self::new(X12ErrorKind::InvalidCharacter, message)
    }

    pub fn limit_exceeded(message: impl Into<String>) -> Self {
        Self::new(X12ErrorKind::LimitExceeded, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        Self::new(X12ErrorKind::Io, message)
    }
}

impl From<std::io::Error> for X12Error {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string())
    }
}

/// Result type for X12 operations.
pub type X12Result<T> = Result<T, X12Error>;
