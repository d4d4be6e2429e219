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


//! `x12 show`: print documents one segment per line.

use std::collections::HashMap;
use std::convert::Infallible;
use std::path::{Path, PathBuf};

use colored::{Color, Colorize};
use x12_core::traverse::{traverse, SegmentVisitor, VisitorContext};
use x12_core::Segment;

use super::{load_document, parse_options, write_output};
use crate::batch::{BatchOperation, BatchProcessor};
use crate::error::CliError;

const PALETTE: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Blue,
    Color::Red,
];

/// Display switches for `x12 show`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShowArgs {
    /// Lower-case segment tags.
    pub lower: bool,
    /// Highlight tags.
    pub color: bool,
    /// Only the first occurrence of each tag.
    pub first: bool,
    /// Blank line between files.
    pub spacer: bool,
    /// Tab-separated fields.
    pub tabs: bool,
}

/// Renders segments as lines of text.
///
/// Tag colors are assigned in order of first appearance and remembered for
/// the lifetime of the formatter.
#[derive(Debug, Default)]
pub struct ShowFormatter {
    args: ShowArgs,
    colors: HashMap<String, Color>,
    out: String,
}

impl ShowFormatter {
    /// Create a formatter with the given switches.
    pub fn new(args: ShowArgs) -> Self {
        Self {
            args,
            ..Self::default()
        }
    }

    /// Take the rendered text, leaving the formatter ready for the next
    /// document.
    pub fn finish(&mut self) -> String {
        std::mem::take(&mut self.out)
    }

    fn color_for(&mut self, tag: &str) -> Color {
        let next = PALETTE[self.colors.len() % PALETTE.len()];
        *self.colors.entry(tag.to_ascii_uppercase()).or_insert(next)
    }

    fn render_tag(&mut self, tag: &str) -> String {
        let tag = if self.args.lower {
            tag.to_ascii_lowercase()
        } else {
            tag.to_string()
        };
        if self.args.color {
            let color = self.color_for(&tag);
            tag.color(color).bold().to_string()
        } else {
            tag
        }
    }
}

impl SegmentVisitor for ShowFormatter {
    type Error = Infallible;

    fn visit_segment(&mut self, segment: &Segment, ctx: &VisitorContext) -> Result<(), Infallible> {
        if self.args.first && ctx.occurrence > 1 {
            return Ok(());
        }

        let tag = self.render_tag(segment.tag());
        let rest = segment.fields.get(1..).unwrap_or_default();
        let line = if self.args.tabs {
            std::iter::once(tag)
                .chain(rest.iter().cloned())
                .collect::<Vec<_>>()
                .join("\t")
        } else {
            let field = ctx.delimiters.field;
            let mut line = tag;
            for value in rest {
                line.push(field);
                line.push_str(value);
            }
            line.push(ctx.delimiters.segment);
            line
        };

        self.out.push_str(&line);
        self.out.push('\n');
        Ok(())
    }
}

struct ShowOperation {
    args: ShowArgs,
}

impl BatchOperation for ShowOperation {
    type Output = String;

    fn process_file(&self, path: &Path) -> Result<String, CliError> {
        let mut doc = load_document(path, &parse_options(false))?;
        let mut formatter = ShowFormatter::new(self.args);
        match traverse(&mut doc, &mut formatter) {
            Ok(()) => Ok(formatter.finish()),
            Err(never) => match never {},
        }
    }

    fn name(&self) -> &str {
        "show"
    }
}

/// Print every file, in order, one segment per line.
pub fn show(files: &[PathBuf], args: ShowArgs) -> Result<(), CliError> {
    let results = BatchProcessor::default().process(files, &ShowOperation { args });

    let mut out = String::new();
    for (i, text) in results.results.iter().filter_map(|r| r.result.as_ref().ok()).enumerate() {
        if args.spacer && i > 0 {
            out.push('\n');
        }
        out.push_str(text);
    }
    write_output(&out, None)?;

    results.report_failures();
    results.status()
}
