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

//! Document structure for X12 interchanges.
//!
//! A document holds exactly one authoritative representation at a time:
//! either its serialized text or its parsed segment rows. Structural reads
//! and writes switch it to rows; [`Document::text`] switches it back. The
//! other form is rebuilt on demand, so the two can never disagree.

use std::cell::OnceCell;
use std::fmt;
use std::io::Read;
use std::str::FromStr;

use tracing::debug;

use crate::charclass::CharSet;
use crate::delimiters::Delimiters;
use crate::error::{X12Error, X12Result};
use crate::errors::messages;
use crate::header::default_header;
use crate::limits::Limits;
use crate::options::ParseOptions;
use crate::segment::Segment;
use crate::source::Source;

/// The two representations of a document's content.
#[derive(Debug, Clone)]
enum Repr {
    Text(String),
    Rows(Vec<Segment>),
}

impl Repr {
    /// Switch to rows, parsing the text form if that is what is held.
    fn rows_mut(&mut self, delimiters: &Delimiters) -> &mut Vec<Segment> {
        if let Self::Text(text) = self {
            let rows = split_rows(text, delimiters);
            *self = Self::Rows(rows);
        }
        match self {
            Self::Rows(rows) => rows,
            Self::Text(_) => unreachable!("text form was replaced by rows above"),
        }
    }

    /// Switch to text, serializing the rows if that is what is held.
    fn text(&mut self, delimiters: &Delimiters) -> &str {
        if let Self::Rows(rows) = self {
            let text = serialize(rows, delimiters);
            *self = Self::Text(text);
        }
        match self {
            Self::Text(text) => text,
            Self::Rows(_) => unreachable!("rows were replaced by text above"),
        }
    }
}

/// A parsed X12 interchange.
#[derive(Debug, Clone)]
pub struct Document {
    delimiters: Delimiters,
    repr: Repr,
    limits: Limits,
    charset: OnceCell<CharSet>,
}

impl Document {
    /// Build a document with default options.
    ///
    /// # Errors
    ///
    /// See [`Document::with_options`].
    pub fn new(source: impl Into<Source>) -> X12Result<Self> {
        Self::with_options(source, &ParseOptions::default())
    }

    /// Build a document from any supported source.
    ///
    /// Empty or whitespace-only text yields a document holding only a
    /// default ISA header. Pairs and mappings are written in order into such
    /// a document.
    ///
    /// # Errors
    ///
    /// - `MalformedHeader` if non-empty text does not start with a valid ISA header
    /// - `LimitExceeded` if the input breaks a configured limit
    /// - `InvalidCharacter` if `strict_charset` is set and the text has a
    ///   character outside the basic set plus the delimiters
    /// - `Io` if a reader source fails
    /// - any write error raised while applying pairs
    pub fn with_options(source: impl Into<Source>, options: &ParseOptions) -> X12Result<Self> {
        let source = source.into();
        debug!(shape = source.shape(), "building document");

        match source {
            Source::Empty => Ok(Self::blank(&options.limits)),
            Source::Text(text) => Self::from_text(&text, options),
            Source::Reader(reader) => {
                let text = read_bounded(reader, options.limits.max_input_size)?;
                Self::from_text(&text, options)
            }
            Source::Document(doc) => Self::from_text(&doc.to_string(), options),
            Source::Pairs(pairs) => {
                let mut doc = Self::blank(&options.limits);
                for (selector, value) in pairs {
                    doc.set(&selector, value)?;
                }
                Ok(doc)
            }
            Source::Map(map) => {
                let mut doc = Self::blank(&options.limits);
                for (selector, value) in map {
                    doc.set(&selector, value)?;
                }
                Ok(doc)
            }
        }
    }

    /// Parse document text with default options.
    ///
    /// # Errors
    ///
    /// See [`Document::with_options`].
    pub fn parse(text: &str) -> X12Result<Self> {
        Self::from_text(text, &ParseOptions::default())
    }

    /// Read a document from a stream with default options.
    ///
    /// # Errors
    ///
    /// See [`Document::with_options`].
    pub fn from_reader<R: Read + 'static>(reader: R) -> X12Result<Self> {
        Self::new(Source::reader(reader))
    }

    /// A document holding only a default ISA header.
    pub fn empty() -> Self {
        Self::blank(&Limits::default())
    }

    /// Build a document by writing each `(selector, value)` pair in order.
    ///
    /// # Errors
    ///
    /// Returns the first write error.
    pub fn from_pairs<I, S, V>(pairs: I) -> X12Result<Self>
    where
        I: IntoIterator<Item = (S, V)>,
        S: AsRef<str>,
        V: Into<crate::source::Replacement>,
    {
        let mut doc = Self::empty();
        for (selector, value) in pairs {
            doc.set(selector.as_ref(), value)?;
        }
        Ok(doc)
    }

    fn blank(limits: &Limits) -> Self {
        let delimiters = Delimiters::default();
        Self {
            delimiters,
            repr: Repr::Rows(vec![Segment::new(default_header(&delimiters))]),
            limits: limits.clone(),
            charset: OnceCell::new(),
        }
    }

    fn from_text(text: &str, options: &ParseOptions) -> X12Result<Self> {
        let limits = &options.limits;
        if text.len() > limits.max_input_size {
            return Err(messages::input_too_large(text.len(), limits.max_input_size));
        }
        if text.trim().is_empty() {
            return Ok(Self::blank(limits));
        }

        let delimiters = Delimiters::from_header(text)?;
        let rows = parse_rows(text, &delimiters, limits)?;
        debug!(segments = rows.len(), %delimiters, "parsed document");

        let mut doc = Self {
            delimiters,
            repr: Repr::Rows(rows),
            limits: limits.clone(),
            charset: OnceCell::new(),
        };

        if options.strict_charset {
            if let Some(&(segment, c)) = doc.invalid_characters().first() {
                return Err(messages::invalid_character(c, segment));
            }
        }

        Ok(doc)
    }

    /// The delimiters declared by this document's header.
    pub fn delimiters(&self) -> Delimiters {
        self.delimiters
    }

    /// The limits this document enforces on writes.
    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Compiled character classes for this document's delimiters.
    pub fn charset(&self) -> &CharSet {
        self.charset.get_or_init(|| CharSet::new(&self.delimiters))
    }

    /// Serialized form: one segment per line, each ending in the terminator.
    pub fn text(&mut self) -> &str {
        self.repr.text(&self.delimiters)
    }

    /// Canonical form: segments back to back, no line breaks, upper-cased.
    pub fn raw(&mut self) -> String {
        let delimiters = self.delimiters;
        let terminator = delimiters.segment;
        let mut out = String::new();
        for row in self.rows_mut().iter() {
            out.push_str(&row.to_text(delimiters.field));
            out.push(terminator);
        }
        out.retain(|c| c == terminator || (c != '\r' && c != '\n'));
        out.to_uppercase()
    }

    /// The segment rows.
    pub fn segments(&mut self) -> &[Segment] {
        self.rows_mut()
    }

    /// The segment rows, for in-place editing.
    pub fn segments_mut(&mut self) -> &mut Vec<Segment> {
        self.rows_mut()
    }

    /// Number of segments.
    pub fn len(&mut self) -> usize {
        self.rows_mut().len()
    }

    /// Whether the document has no segments.
    pub fn is_empty(&mut self) -> bool {
        self.rows_mut().is_empty()
    }

    /// Every `(segment index, character)` outside the basic set plus delimiters.
    pub fn invalid_characters(&mut self) -> Vec<(usize, char)> {
        let rows = self.repr.rows_mut(&self.delimiters);
        let class = self
            .charset
            .get_or_init(|| CharSet::new(&self.delimiters))
            .payload();

        let mut found = Vec::new();
        for (index, row) in rows.iter().enumerate() {
            for field in &row.fields {
                for m in class.forbidden().find_iter(field) {
                    found.extend(m.as_str().chars().map(|c| (index, c)));
                }
            }
        }
        found
    }

    /// Normalize free text for insertion as a value.
    ///
    /// ASCII letters are upper-cased, then every character that is not in
    /// the basic set, or that is one of this document's delimiters, becomes
    /// a space.
    pub fn scrub(&self, value: &str) -> String {
        let upper = value.to_ascii_uppercase();
        self.charset()
            .user_data()
            .replace_invalid(&upper, " ")
            .into_owned()
    }

    /// Rows view; drops the text form.
    pub(crate) fn rows_mut(&mut self) -> &mut Vec<Segment> {
        self.repr.rows_mut(&self.delimiters)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            Repr::Text(text) => f.write_str(text),
            Repr::Rows(rows) => f.write_str(&serialize(rows, &self.delimiters)),
        }
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.delimiters == other.delimiters && self.to_string() == other.to_string()
    }
}

impl Eq for Document {}

impl FromStr for Document {
    type Err = X12Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Split text into segment rows, tolerating CR/LF around terminators.
fn split_rows(text: &str, delimiters: &Delimiters) -> Vec<Segment> {
    segment_texts(text, delimiters)
        .map(|piece| Segment::parse(piece, delimiters.field))
        .collect()
}

/// As [`split_rows`], failing once a limit is crossed.
fn parse_rows(text: &str, delimiters: &Delimiters, limits: &Limits) -> X12Result<Vec<Segment>> {
    let mut rows = Vec::new();
    for piece in segment_texts(text, delimiters) {
        if rows.len() >= limits.max_segments {
            return Err(messages::too_many_segments(limits.max_segments));
        }
        let row = Segment::parse(piece, delimiters.field);
        if row.len() > limits.max_fields {
            return Err(messages::too_many_fields(row.len(), limits.max_fields, rows.len()));
        }
        rows.push(row);
    }
    Ok(rows)
}

fn segment_texts<'a>(
    text: &'a str,
    delimiters: &Delimiters,
) -> impl Iterator<Item = &'a str> + 'a {
    text.trim_start()
        .split(delimiters.segment)
        .map(|piece| piece.trim_matches(|c| c == '\r' || c == '\n'))
        .filter(|piece| !piece.is_empty())
}

/// Join rows with the terminator and a newline, without a final newline.
fn serialize(rows: &[Segment], delimiters: &Delimiters) -> String {
    let mut out = String::new();
    for (i, row) in rows.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&row.to_text(delimiters.field));
        out.push(delimiters.segment);
    }
    out
}

fn read_bounded(reader: Box<dyn Read>, limit: usize) -> X12Result<String> {
    let mut text = String::new();
    reader
        .take((limit as u64).saturating_add(1))
        .read_to_string(&mut text)
        .map_err(|e| messages::read_failed(&e))?;
    if text.len() > limit {
        return Err(messages::input_too_large(text.len(), limit));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::X12ErrorKind;

    const SAMPLE: &str = "ISA*00*          *00*          *ZZ*SUBMITTERS ID  *ZZ*RECEIVERS ID   *200101*1253*^*00501*000000905*1*T*:~\nGS*HS*SENDER*RECEIVER*20200101*1253*1*X*005010X279A1~\nST*270*0001~\nEB*1*IND~\nEB**FAM~\nEB*C*IND~\nSE*5*0001~";

    // ==================== Construction tests ====================

    #[test]
    fn test_parse_sample() {
        let mut doc = Document::parse(SAMPLE).unwrap();
        assert_eq!(doc.len(), 7);
        assert_eq!(doc.segments()[1].tag(), "GS");
        assert_eq!(doc.delimiters(), Delimiters::default());
    }

    #[test]
    fn test_empty_input_synthesizes_header() {
        for text in ["", "   \n"] {
            let mut doc = Document::parse(text).unwrap();
            assert_eq!(doc.len(), 1);
            assert_eq!(doc.segments()[0].tag(), "ISA");
            assert_eq!(doc.delimiters(), Delimiters::default());
        }
    }

    #[test]
    fn test_default_header_round_trips() {
        let mut doc = Document::empty();
        let text = doc.text().to_string();
        let again = Document::parse(&text).unwrap();
        assert_eq!(doc, again);
        assert_eq!(again.delimiters(), Delimiters::default());
    }

    #[test]
    fn test_malformed_header() {
        let err = Document::parse("GS*HS*A*B~").unwrap_err();
        assert_eq!(err.kind, X12ErrorKind::MalformedHeader);
    }

    #[test]
    fn test_from_reader() {
        let mut doc = Document::from_reader(std::io::Cursor::new(SAMPLE.as_bytes().to_vec())).unwrap();
        assert_eq!(doc.len(), 7);
    }

    #[test]
    fn test_from_document_copies() {
        let original = Document::parse(SAMPLE).unwrap();
        let copy = Document::new(&original).unwrap();
        assert_eq!(copy, original);
    }

    #[test]
    fn test_from_pairs() {
        let mut doc = Document::from_pairs([("GS-1", "HS"), ("ST-1", "270")]).unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.segments()[1].fields, vec!["GS", "HS"]);
        assert_eq!(doc.segments()[2].fields, vec!["ST", "270"]);
    }

    #[test]
    fn test_stray_line_breaks_tolerated() {
        let text = SAMPLE.replace('\n', "\r\n");
        let mut doc = Document::parse(&text).unwrap();
        assert_eq!(doc.len(), 7);
        assert_eq!(doc.segments()[6].fields, vec!["SE", "5", "0001"]);
    }

    #[test]
    fn test_newline_terminator() {
        let text = "ISA|00||00||ZZ||ZZ||||!|00501||0|P|>\nGS|HC\nST|837\n";
        let mut doc = Document::parse(text).unwrap();
        assert_eq!(doc.len(), 3);
        assert_eq!(doc.segments()[2].fields, vec!["ST", "837"]);
    }

    // ==================== Limit tests ====================

    #[test]
    fn test_input_size_limit() {
        let opts = ParseOptions::builder().max_input_size(10).build();
        let err = Document::with_options(SAMPLE, &opts).unwrap_err();
        assert_eq!(err.kind, X12ErrorKind::LimitExceeded);
    }

    #[test]
    fn test_reader_size_limit() {
        let opts = ParseOptions::builder().max_input_size(10).build();
        let source = Source::reader(std::io::Cursor::new(SAMPLE.as_bytes().to_vec()));
        let err = Document::with_options(source, &opts).unwrap_err();
        assert_eq!(err.kind, X12ErrorKind::LimitExceeded);
    }

    #[test]
    fn test_segment_limit() {
        let opts = ParseOptions::builder().max_segments(3).build();
        let err = Document::with_options(SAMPLE, &opts).unwrap_err();
        assert_eq!(err.kind, X12ErrorKind::LimitExceeded);
    }

    #[test]
    fn test_field_limit() {
        let opts = ParseOptions::builder().max_fields(8).build();
        let err = Document::with_options(SAMPLE, &opts).unwrap_err();
        assert_eq!(err.kind, X12ErrorKind::LimitExceeded);
        assert_eq!(err.context.as_deref(), Some("segment 1"));
    }

    // ==================== Representation tests ====================

    #[test]
    fn test_serialize_layout() {
        let mut doc = Document::parse(SAMPLE).unwrap();
        let text = doc.text();
        assert!(text.ends_with("SE*5*0001~"));
        assert_eq!(text.lines().count(), 7);
        assert!(text.lines().all(|line| line.ends_with('~')));
    }

    #[test]
    fn test_text_then_rows_then_text() {
        let mut doc = Document::parse(SAMPLE).unwrap();
        let first = doc.text().to_string();
        doc.segments_mut()[3].fields[1] = "6".to_string();
        let second = doc.text().to_string();
        assert_ne!(first, second);
        assert!(second.contains("EB*6*IND~"));
    }

    #[test]
    fn test_display_matches_text() {
        let mut doc = Document::parse(SAMPLE).unwrap();
        let shown = doc.to_string();
        assert_eq!(shown, doc.text());
        assert_eq!(doc.to_string(), shown);
    }

    #[test]
    fn test_raw_form() {
        let mut doc = Document::parse("isa*00**00**ZZ**ZZ****^*00501**0*P*:~\ngs*hs*a~").unwrap();
        let raw = doc.raw();
        assert!(!raw.contains('\n'));
        assert!(raw.starts_with("ISA*00*"));
        assert!(raw.ends_with("~GS*HS*A~"));
    }

    #[test]
    fn test_raw_keeps_newline_terminator() {
        let mut doc = Document::parse("ISA|00||00||ZZ||ZZ||||!|00501||0|P|>\nGS|hc\n").unwrap();
        assert!(doc.raw().ends_with(">\nGS|HC\n"));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut doc = Document::parse(SAMPLE).unwrap();
        let mut copy = doc.clone();
        copy.segments_mut().pop();
        assert_eq!(doc.len(), 7);
        assert_eq!(copy.len(), 6);
        assert_ne!(doc, copy);
    }

    #[test]
    fn test_from_str() {
        let doc: Document = SAMPLE.parse().unwrap();
        assert_eq!(doc.delimiters().segment, '~');
    }

    // ==================== Character tests ====================

    #[test]
    fn test_invalid_characters() {
        let mut doc = Document::parse("ISA*00**00**ZZ**ZZ****^*00501**0*P*:~\nNM1*IL*1*doe~").unwrap();
        let found = doc.invalid_characters();
        assert_eq!(found, vec![(1, 'd'), (1, 'o'), (1, 'e')]);
    }

    #[test]
    fn test_strict_charset() {
        let opts = ParseOptions::builder().strict_charset(true).build();
        let err = Document::with_options("ISA*00**00**ZZ**ZZ****^*00501**0*P*:~\nNM1*IL*1*D@E~", &opts)
            .unwrap_err();
        assert_eq!(err.kind, X12ErrorKind::InvalidCharacter);
        assert_eq!(err.context.as_deref(), Some("segment 2"));
        assert!(Document::with_options(SAMPLE, &opts).is_ok());
    }

    #[test]
    fn test_scrub() {
        let doc = Document::empty();
        assert_eq!(doc.scrub("Doe*John~"), "DOE JOHN ");
        assert_eq!(doc.scrub("a:b^c"), "A B C");
        assert_eq!(doc.scrub("O'NEIL-SMITH"), "O'NEIL-SMITH");
    }
}
