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


//! `x12 set`: write values into one document.

use std::path::{Path, PathBuf};

use tracing::debug;
use x12_core::{Batch, Document, Pairs, Replacement};

use super::{load_document, parse_options, read_file, write_output};
use crate::error::CliError;

/// Options for `x12 set`.
#[derive(Debug, Clone, Default)]
pub struct SetArgs {
    /// `SELECTOR=VALUE` assignments, applied in order.
    pub assignments: Vec<String>,
    /// JSON batch file (object or array of pairs), applied before assignments.
    pub batch: Option<PathBuf>,
    /// Scrub values before writing.
    pub scrub: bool,
    /// Write the result here instead of stdout.
    pub output: Option<PathBuf>,
    /// Overwrite the input file.
    pub in_place: bool,
}

/// Split `SELECTOR=VALUE` at the first `=`.
pub fn parse_assignment(text: &str) -> Result<(String, Replacement), CliError> {
    let (selector, value) = text
        .split_once('=')
        .ok_or_else(|| CliError::invalid_input(format!("expected SELECTOR=VALUE, got '{}'", text)))?;
    let selector = selector.trim();
    if selector.is_empty() {
        return Err(CliError::invalid_input(format!("missing selector in '{}'", text)));
    }
    Ok((selector.to_string(), Replacement::from(value)))
}

fn read_batch(path: &Path) -> Result<Pairs, CliError> {
    let text = read_file(path)?;
    let json: serde_json::Value = serde_json::from_str(&text)?;
    Ok(Batch::from_json(json)?.into_pairs())
}

/// Apply the batch file and assignments of `args` to `doc`.
///
/// Returns the number of values written.
pub fn apply(doc: &mut Document, args: &SetArgs) -> Result<usize, CliError> {
    let mut pairs = match &args.batch {
        Some(path) => read_batch(path)?,
        None => Pairs::new(),
    };
    for assignment in &args.assignments {
        pairs.push(parse_assignment(assignment)?);
    }

    if args.scrub {
        for (_, value) in pairs.iter_mut() {
            *value = value.map_text(|text| doc.scrub(text));
        }
    }

    Ok(doc.update(pairs)?)
}

/// Load `file`, apply the writes, and emit the result.
pub fn set(file: &Path, args: &SetArgs) -> Result<(), CliError> {
    if args.in_place && args.output.is_some() {
        return Err(CliError::invalid_input("--in-place and --output are mutually exclusive"));
    }

    let mut doc = load_document(file, &parse_options(false))?;
    let applied = apply(&mut doc, args)?;
    debug!(file = %file.display(), applied, "applied writes");

    let text = doc.text().to_string();
    if args.in_place {
        write_output(&text, Some(file))
    } else if let Some(out) = &args.output {
        write_output(&text, Some(out))
    } else {
        write_output(&format!("{}\n", text), None)
    }
}
