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


//! `x12 raw`: print the canonical raw form of each document.

use std::path::{Path, PathBuf};

use super::{load_document, parse_options, write_output};
use crate::batch::{BatchOperation, BatchProcessor};
use crate::error::CliError;

struct RawOperation;

impl BatchOperation for RawOperation {
    type Output = String;

    fn process_file(&self, path: &Path) -> Result<String, CliError> {
        Ok(load_document(path, &parse_options(false))?.raw())
    }

    fn name(&self) -> &str {
        "raw"
    }
}

/// Print one raw line per file.
pub fn raw(files: &[PathBuf]) -> Result<(), CliError> {
    let results = BatchProcessor::default().process(files, &RawOperation);

    let mut out = String::new();
    for text in results.results.iter().filter_map(|r| r.result.as_ref().ok()) {
        out.push_str(text);
        out.push('\n');
    }
    write_output(&out, None)?;

    results.report_failures();
    results.status()
}
