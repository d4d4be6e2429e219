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


//! Per-file processing across many inputs.
//!
//! Each file gets its own [`x12_core::Document`]; no state is shared between
//! files, so large inputs are spread over Rayon's thread pool. A failure in
//! one file is recorded and processing continues with the rest.
//!
//! Results come back in input order regardless of which mode ran them.

use std::path::{Path, PathBuf};
use std::time::Instant;

use colored::Colorize;
use rayon::prelude::*;
use tracing::debug;

use crate::error::CliError;

/// Controls when processing switches from serial to parallel.
#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Minimum number of files that triggers parallel processing.
    ///
    /// Default: 10
    pub parallel_threshold: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            parallel_threshold: 10,
        }
    }
}

/// Outcome for one input file.
#[derive(Debug, Clone)]
pub struct FileResult<T> {
    /// The file that was processed
    pub path: PathBuf,
    /// Operation output or the error that stopped it
    pub result: Result<T, CliError>,
}

impl<T> FileResult<T> {
    /// Check if the file was processed successfully.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Check if processing the file failed.
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// All per-file outcomes of one run, in input order.
#[derive(Debug, Clone)]
pub struct BatchResults<T> {
    /// Individual results
    pub results: Vec<FileResult<T>>,
    /// Wall-clock time in milliseconds
    pub elapsed_ms: u128,
}

impl<T> BatchResults<T> {
    /// Number of files processed.
    pub fn total_files(&self) -> usize {
        self.results.len()
    }

    /// Number of files that succeeded.
    pub fn success_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_success()).count()
    }

    /// Number of files that failed.
    pub fn failure_count(&self) -> usize {
        self.results.iter().filter(|r| r.is_failure()).count()
    }

    /// Check if any file failed.
    pub fn has_failures(&self) -> bool {
        self.results.iter().any(|r| r.is_failure())
    }

    /// Print every failure to stderr as `✗ path: error`.
    pub fn report_failures(&self) {
        for file in &self.results {
            if let Err(e) = &file.result {
                eprintln!("{} {}: {}", "✗".red().bold(), file.path.display(), e);
            }
        }
    }

    /// `Ok` when every file succeeded, otherwise a [`CliError::Failures`]
    /// summary.
    pub fn status(&self) -> Result<(), CliError> {
        if self.has_failures() {
            Err(CliError::Failures {
                failed: self.failure_count(),
                total: self.total_files(),
            })
        } else {
            Ok(())
        }
    }
}

/// An operation applied independently to each input file.
///
/// Implementations must be `Send + Sync` so files can be processed in
/// parallel.
pub trait BatchOperation: Send + Sync {
    /// Output produced for one file.
    type Output: Send;

    /// Process one file.
    fn process_file(&self, path: &Path) -> Result<Self::Output, CliError>;

    /// Operation name, for logging.
    fn name(&self) -> &str;
}

/// Runs a [`BatchOperation`] over a list of files.
#[derive(Debug, Clone, Default)]
pub struct BatchProcessor {
    config: BatchConfig,
}

impl BatchProcessor {
    /// Create a processor with the given configuration.
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Process every file, collecting one result per file.
    pub fn process<O: BatchOperation>(&self, files: &[PathBuf], operation: &O) -> BatchResults<O::Output> {
        let start = Instant::now();
        let run = |path: &PathBuf| FileResult {
            path: path.clone(),
            result: operation.process_file(path),
        };

        let parallel = files.len() >= self.config.parallel_threshold;
        let results: Vec<_> = if parallel {
            files.par_iter().map(run).collect()
        } else {
            files.iter().map(run).collect()
        };

        let elapsed_ms = start.elapsed().as_millis();
        debug!(
            operation = operation.name(),
            files = files.len(),
            parallel,
            elapsed_ms = u64::try_from(elapsed_ms).unwrap_or(u64::MAX),
            "batch finished"
        );

        BatchResults { results, elapsed_ms }
    }
}
