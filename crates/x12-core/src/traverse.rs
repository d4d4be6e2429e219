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

//! Segment traversal.
//!
//! [`Document::each`] and [`Document::grep`] iterate rows by tag. For
//! output that needs position information (occurrence numbering, first
//! segment of a tag), implement [`SegmentVisitor`] and call [`traverse`]:
//!
//! ```
//! use x12_core::traverse::{traverse, SegmentVisitor, VisitorContext};
//! use x12_core::{Document, Segment};
//!
//! struct TagCounter(usize);
//!
//! impl SegmentVisitor for TagCounter {
//!     type Error = std::convert::Infallible;
//!
//!     fn visit_segment(&mut self, _segment: &Segment, ctx: &VisitorContext) -> Result<(), Self::Error> {
//!         if ctx.occurrence == 1 {
//!             self.0 += 1;
//!         }
//!         Ok(())
//!     }
//! }
//!
//! let mut doc = Document::from_pairs([("GS-1", "HS"), ("ST(2)-1", "270")]).unwrap();
//! let mut counter = TagCounter(0);
//! traverse(&mut doc, &mut counter).unwrap();
//! assert_eq!(counter.0, 3);
//! ```

use std::collections::HashMap;

use crate::delimiters::Delimiters;
use crate::document::Document;
use crate::segment::Segment;

/// Position of a segment during traversal.
#[derive(Debug, Clone, Copy)]
pub struct VisitorContext<'a> {
    /// 0-based position in the document.
    pub index: usize,
    /// 1-based occurrence among segments with the same tag.
    pub occurrence: usize,
    /// Delimiters of the document being traversed.
    pub delimiters: &'a Delimiters,
}

/// Callbacks for walking a document's segments in order.
pub trait SegmentVisitor {
    /// Error type returned by visitor methods.
    type Error;

    /// Called before the first segment.
    fn begin_document(&mut self, _delimiters: &Delimiters) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called once per segment, in document order.
    fn visit_segment(&mut self, segment: &Segment, ctx: &VisitorContext) -> Result<(), Self::Error>;

    /// Called after the last segment.
    fn end_document(&mut self, _segments: usize) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Walk every segment of `doc`, stopping at the first visitor error.
pub fn traverse<V: SegmentVisitor>(doc: &mut Document, visitor: &mut V) -> Result<(), V::Error> {
    let delimiters = doc.delimiters();
    visitor.begin_document(&delimiters)?;

    let rows = doc.segments();
    let mut seen: HashMap<String, usize> = HashMap::new();
    for (index, segment) in rows.iter().enumerate() {
        let occurrence = seen.entry(segment.tag().to_ascii_uppercase()).or_insert(0);
        *occurrence += 1;
        let ctx = VisitorContext {
            index,
            occurrence: *occurrence,
            delimiters: &delimiters,
        };
        visitor.visit_segment(segment, &ctx)?;
    }

    visitor.end_document(rows.len())
}

fn matches(segment: &Segment, tag: Option<&str>) -> bool {
    tag.map_or(true, |tag| segment.is_tag(tag))
}

impl Document {
    /// Iterate over segments, optionally only those tagged `tag`.
    ///
    /// Each call starts a fresh pass.
    pub fn each<'a>(&'a mut self, tag: Option<&'a str>) -> impl Iterator<Item = &'a Segment> + 'a {
        self.segments().iter().filter(move |s| matches(s, tag))
    }

    /// As [`Document::each`], yielding rows for in-place editing.
    pub fn each_mut<'a>(
        &'a mut self,
        tag: Option<&'a str>,
    ) -> impl Iterator<Item = &'a mut Segment> + 'a {
        self.segments_mut()
            .iter_mut()
            .filter(move |s| matches(s, tag))
    }

    /// Every segment tagged `tag`.
    pub fn grep(&mut self, tag: &str) -> Vec<&Segment> {
        self.segments().iter().filter(|s| s.is_tag(tag)).collect()
    }

    /// Every segment tagged `tag`, projected through `f`.
    pub fn grep_map<T, F: FnMut(&Segment) -> T>(&mut self, tag: &str, f: F) -> Vec<T> {
        self.segments().iter().filter(|s| s.is_tag(tag)).map(f).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "ISA*00**00**ZZ**ZZ****^*00501**0*P*:~\nGS*HS~\nNM1*IL*1*DOE~\nNM1*PR*2*ACME~\nnm1*1P*2*CLINIC~\nSE*4~";

    fn doc() -> Document {
        Document::parse(SAMPLE).unwrap()
    }

    // ==================== Iteration tests ====================

    #[test]
    fn test_each_all() {
        let mut d = doc();
        assert_eq!(d.each(None).count(), 6);
    }

    #[test]
    fn test_each_filtered_case_insensitive() {
        let mut d = doc();
        let ids: Vec<&str> = d.each(Some("NM1")).filter_map(|s| s.field(1)).collect();
        assert_eq!(ids, vec!["IL", "PR", "1P"]);
    }

    #[test]
    fn test_each_is_restartable() {
        let mut d = doc();
        assert_eq!(d.each(Some("NM1")).count(), 3);
        assert_eq!(d.each(Some("NM1")).count(), 3);
    }

    #[test]
    fn test_each_mut_edits_in_place() {
        let mut d = doc();
        for row in d.each_mut(Some("nm1")) {
            row.fields[0] = "NM1".to_string();
        }
        assert!(d.text().contains("NM1*1P*2*CLINIC~"));
        assert!(!d.text().contains("nm1"));
    }

    #[test]
    fn test_grep() {
        let mut d = doc();
        assert_eq!(d.grep("GS").len(), 1);
        assert!(d.grep("ZZ").is_empty());
    }

    #[test]
    fn test_grep_map() {
        let mut d = doc();
        let names = d.grep_map("NM1", |s| s.field(3).unwrap_or_default().to_string());
        assert_eq!(names, vec!["DOE", "ACME", "CLINIC"]);
    }

    // ==================== Visitor tests ====================

    struct Recorder {
        seen: Vec<(usize, String, usize)>,
        ended: Option<usize>,
    }

    impl SegmentVisitor for Recorder {
        type Error = String;

        fn visit_segment(&mut self, segment: &Segment, ctx: &VisitorContext) -> Result<(), String> {
            if segment.tag() == "SE" {
                return Err("stop".to_string());
            }
            self.seen.push((ctx.index, segment.tag().to_string(), ctx.occurrence));
            Ok(())
        }

        fn end_document(&mut self, segments: usize) -> Result<(), String> {
            self.ended = Some(segments);
            Ok(())
        }
    }

    #[test]
    fn test_traverse_occurrences() {
        let mut d = doc();
        let mut rec = Recorder { seen: Vec::new(), ended: None };
        let err = traverse(&mut d, &mut rec).unwrap_err();
        assert_eq!(err, "stop");
        assert_eq!(rec.seen[2], (2, "NM1".to_string(), 1));
        assert_eq!(rec.seen[4], (4, "nm1".to_string(), 3));
        assert_eq!(rec.ended, None);
    }
}
