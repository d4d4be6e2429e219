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


//! CLI command implementations

mod get;
mod raw;
mod set;
mod show;
mod validate;

pub use get::{get, GetArgs};
pub use raw::raw;
pub use set::{set, SetArgs};
pub use show::{show, ShowArgs, ShowFormatter};
pub use validate::validate;

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use x12_core::{Document, ParseOptions};

use crate::error::CliError;

/// Default maximum input file size (256 MB), matching the document model's
/// default input limit. Override with `X12_MAX_FILE_SIZE` (bytes).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 256 * 1024 * 1024;

/// Maximum file size from `X12_MAX_FILE_SIZE`, or the default when unset or
/// unparseable.
pub fn max_file_size() -> u64 {
    std::env::var("X12_MAX_FILE_SIZE")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(DEFAULT_MAX_FILE_SIZE)
}

/// Read a file, rejecting it before allocation if it exceeds
/// [`max_file_size`].
///
/// # Errors
///
/// - `Io` if metadata cannot be read or the file is not valid UTF-8
/// - `FileTooLarge` if the size limit is exceeded
pub fn read_file(path: &Path) -> Result<String, CliError> {
    let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;

    let max = max_file_size();
    if metadata.len() > max {
        return Err(CliError::file_too_large(path, metadata.len(), max));
    }

    fs::read_to_string(path).map_err(|e| CliError::io_error(path, e))
}

/// Parse options for documents loaded from disk.
pub fn parse_options(strict_charset: bool) -> ParseOptions {
    let max = usize::try_from(max_file_size()).unwrap_or(usize::MAX);
    ParseOptions::builder()
        .max_input_size(max)
        .strict_charset(strict_charset)
        .build()
}

/// Read and parse one document.
pub fn load_document(path: &Path, options: &ParseOptions) -> Result<Document, CliError> {
    let text = read_file(path)?;
    Ok(Document::with_options(text, options)?)
}

/// Write `content` to `output`, or to stdout when `output` is `None`.
pub fn write_output(content: &str, output: Option<&Path>) -> Result<(), CliError> {
    match output {
        Some(path) => fs::write(path, content).map_err(|e| CliError::io_error(path, e)),
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            handle
                .write_all(content.as_bytes())
                .and_then(|_| handle.flush())
                .map_err(|e| CliError::io_error("<stdout>", e))
        }
    }
}
