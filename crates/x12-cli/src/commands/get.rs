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


//! `x12 get`: run a multi-selector query against each file.

use std::path::{Path, PathBuf};

use serde_json::json;
use x12_core::Value;

use super::{load_document, parse_options, write_output};
use crate::batch::{BatchOperation, BatchProcessor};
use crate::error::CliError;

/// Options for `x12 get`.
#[derive(Debug, Clone, Default)]
pub struct GetArgs {
    /// Comma-separated selectors; an empty slot yields an empty column.
    pub query: String,
    /// Emit a JSON array instead of tab-delimited lines.
    pub json: bool,
}

/// Split a comma-separated query into selector slots.
pub fn parse_query(query: &str) -> Vec<Option<String>> {
    query
        .split(',')
        .map(str::trim)
        .map(|s| (!s.is_empty()).then(|| s.to_string()))
        .collect()
}

struct GetOperation {
    selectors: Vec<Option<String>>,
}

impl BatchOperation for GetOperation {
    type Output = Vec<Option<Value>>;

    fn process_file(&self, path: &Path) -> Result<Self::Output, CliError> {
        let mut doc = load_document(path, &parse_options(false))?;
        Ok(doc.find(&self.selectors)?)
    }

    fn name(&self) -> &str {
        "get"
    }
}

fn render_line(path: &Path, values: &[Option<Value>], with_path: bool) -> String {
    let mut columns: Vec<String> = Vec::with_capacity(values.len() + 1);
    if with_path {
        columns.push(path.display().to_string());
    }
    columns.extend(
        values
            .iter()
            .map(|v| v.as_ref().map(Value::to_string).unwrap_or_default()),
    );
    columns.join("\t")
}

/// Query every file and print one line (or JSON record) per file.
///
/// With more than one file, each line starts with the file path.
pub fn get(files: &[PathBuf], args: &GetArgs) -> Result<(), CliError> {
    let selectors = parse_query(&args.query);
    if selectors.iter().all(Option::is_none) {
        return Err(CliError::invalid_input("query has no selectors"));
    }

    let results = BatchProcessor::default().process(files, &GetOperation { selectors });
    let with_path = files.len() > 1;

    let out = if args.json {
        let records: Vec<_> = results
            .results
            .iter()
            .filter_map(|r| r.result.as_ref().ok().map(|values| (r, values)))
            .map(|(r, values)| json!({ "file": r.path.display().to_string(), "values": values }))
            .collect();
        let mut text = serde_json::to_string_pretty(&records)?;
        text.push('\n');
        text
    } else {
        let mut text = String::new();
        for r in &results.results {
            if let Ok(values) = &r.result {
                text.push_str(&render_line(&r.path, values, with_path));
                text.push('\n');
            }
        }
        text
    };
    write_output(&out, None)?;

    results.report_failures();
    results.status()
}
