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


//! `x12 validate`: check that files parse as X12 documents.

use std::path::{Path, PathBuf};

use colored::Colorize;
use x12_core::Delimiters;

use super::{load_document, parse_options};
use crate::batch::{BatchOperation, BatchProcessor};
use crate::error::CliError;

/// Summary of a document that parsed.
#[derive(Debug, Clone)]
pub struct Report {
    /// Number of segments
    pub segments: usize,
    /// Delimiters read from the header
    pub delimiters: Delimiters,
    /// Characters outside the basic set plus delimiters
    pub invalid_characters: usize,
}

struct ValidationOperation {
    strict: bool,
}

impl BatchOperation for ValidationOperation {
    type Output = Report;

    fn process_file(&self, path: &Path) -> Result<Report, CliError> {
        let mut doc = load_document(path, &parse_options(self.strict))?;
        Ok(Report {
            segments: doc.len(),
            delimiters: doc.delimiters(),
            invalid_characters: doc.invalid_characters().len(),
        })
    }

    fn name(&self) -> &str {
        "validate"
    }
}

/// Validate every file and print a per-file verdict.
///
/// With `strict`, a character outside the X12 basic set (other than a
/// delimiter) fails the file.
///
/// # Errors
///
/// [`CliError::Failures`] if any file did not validate.
pub fn validate(files: &[PathBuf], strict: bool) -> Result<(), CliError> {
    let results = BatchProcessor::default().process(files, &ValidationOperation { strict });

    for file in &results.results {
        match &file.result {
            Ok(report) => {
                println!("{} {}", "✓".green().bold(), file.path.display());
                println!("  Segments: {}", report.segments);
                println!("  Delimiters: {}", report.delimiters);
                if report.invalid_characters > 0 {
                    println!(
                        "  {} {} character(s) outside the basic set",
                        "warning:".yellow().bold(),
                        report.invalid_characters
                    );
                }
                if strict {
                    println!("  Mode: strict (basic character set enforced)");
                }
            }
            Err(_) => println!("{} {}", "✗".red().bold(), file.path.display()),
        }
    }

    results.report_failures();
    results.status()
}
