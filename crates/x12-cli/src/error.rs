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


//! Error types for the X12 CLI.
//!
//! Every command returns `Result<T, CliError>`. The type is `Clone` so that
//! per-file failures can be collected from parallel workers.

use std::io;
use std::path::PathBuf;

use thiserror::Error;
use x12_core::X12Error;

/// Failure of a CLI operation.
#[derive(Error, Debug, Clone)]
pub enum CliError {
    /// File read, write, or metadata access failed.
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path being accessed
        path: PathBuf,
        /// The underlying error message
        message: String,
    },

    /// File size exceeds the configured maximum.
    #[error("File '{path}' is too large ({actual} bytes). Maximum allowed: {max} bytes ({max_mb} MB)")]
    FileTooLarge {
        /// The oversized file
        path: PathBuf,
        /// Actual size in bytes
        actual: u64,
        /// Limit in bytes
        max: u64,
        /// Limit in MB, for display
        max_mb: u64,
    },

    /// Error raised by the document model.
    #[error("{0}")]
    Document(#[from] X12Error),

    /// JSON encoding or decoding failed.
    #[error("JSON format error: {message}")]
    JsonFormat {
        /// The error message
        message: String,
    },

    /// Malformed command-line input.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// One or more files in a multi-file run failed.
    #[error("{failed} of {total} files failed")]
    Failures {
        /// Number of failed files
        failed: usize,
        /// Number of files processed
        total: usize,
    },
}

impl CliError {
    /// I/O error with file path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// File-too-large error; `max_mb` is derived from `max`.
    pub fn file_too_large(path: impl Into<PathBuf>, actual: u64, max: u64) -> Self {
        Self::FileTooLarge {
            path: path.into(),
            actual,
            max,
            max_mb: max / (1024 * 1024),
        }
    }

    /// Invalid command-line input.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonFormat {
            message: err.to_string(),
        }
    }
}
