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

//! X12 Conformance Tests
//!
//! End-to-end checks of the documented behavior of the document model and
//! selector engine, one test per guaranteed property.

use x12_core::{CharClass, Delimiters, Document, ParseOptions, Value, X12ErrorKind};

const HEADER: &str = "ISA*00**00**ZZ**ZZ****^*00501**0*P*:~";

fn with_body(body: &str) -> Document {
    Document::parse(&format!("{}\n{}", HEADER, body)).unwrap()
}

// =============================================================================
// Header derivation
// =============================================================================

/// Compact header yields the four delimiters from field positions.
#[test]
fn test_header_derivation() {
    let d = Delimiters::from_header(HEADER).unwrap();
    assert_eq!(d.field, '*');
    assert_eq!(d.component, ':');
    assert_eq!(d.repetition, '^');
    assert_eq!(d.segment, '~');
}

/// Fixed-width header: offsets 3, 82, 104 and 105.
#[test]
fn test_fixed_width_offsets() {
    let header = "ISA*00*          *00*          *ZZ*SENDER         *ZZ*RECEIVER       *210315*0930*!*00501*000000001*0*P*>|";
    assert_eq!(header.len(), 106);
    let mut doc = Document::parse(&format!("{}GS*HC|", header)).unwrap();
    let d = doc.delimiters();
    assert_eq!((d.field, d.repetition, d.component, d.segment), ('*', '!', '>', '|'));
    assert_eq!(doc.len(), 2);
}

/// Non-header input is rejected, not guessed.
#[test]
fn test_malformed_header() {
    for text in ["GS*HC~", "ISA*00~", "hello"] {
        let err = Document::parse(text).unwrap_err();
        assert_eq!(err.kind, X12ErrorKind::MalformedHeader, "{}", text);
    }
}

// =============================================================================
// Round trip
// =============================================================================

/// parse(serialize(d)) == d.
#[test]
fn test_round_trip() {
    let mut doc = with_body("GS*HS*A*B~\nNM1*IL*1*DOE*JOHN****MI*123^456~\nREF*EJ**~");
    doc.set("NM1-9(3)", "789").unwrap();
    doc.set("DTP(2)-3.2", "D8").unwrap();
    let text = doc.text().to_string();
    let mut again = Document::parse(&text).unwrap();
    assert_eq!(doc, again);
    assert_eq!(again.segments(), doc.segments());
}

// =============================================================================
// Read defaults and modes
// =============================================================================

/// Reads default to the first occurrence, independently of writes.
#[test]
fn test_default_occurrence_on_read() {
    let mut doc = with_body("EB*1~\nEB*2~");
    assert_eq!(doc.get("EB-1").unwrap(), Value::Text("1".into()));
    doc.set("EB(+)-1", "3").unwrap();
    assert_eq!(doc.get("EB-1").unwrap(), Value::Text("1".into()));
    assert_eq!(doc.get("EB(3)-1").unwrap(), Value::Text("3".into()));
}

/// EB(?) counts matching segments.
#[test]
fn test_auto_count() {
    let mut doc = with_body("EB*1~\nEB*2~\nEB*3~");
    assert_eq!(doc.get("EB(?)").unwrap(), Value::Count(3));
}

/// EB(*)-1 gathers non-empty values only.
#[test]
fn test_wildcard_gather() {
    let mut doc = with_body("EB*1~\nEB**X~\nEB*C~");
    assert_eq!(
        doc.get("EB(*)-1").unwrap(),
        Value::List(vec!["1".into(), "C".into()])
    );
}

/// Missing data reads as empty text, never an error.
#[test]
fn test_no_match_is_not_an_error() {
    let mut doc = with_body("EB*1~");
    assert_eq!(doc.get("DTP-3").unwrap(), Value::Text(String::new()));
    assert_eq!(doc.get("EB(4)-1").unwrap(), Value::Text(String::new()));
}

/// Several selectors, one pass, parallel results.
#[test]
fn test_multi_query() {
    let mut doc = with_body("GS*HS~\nEB*1~\nEB*2~");
    let results = doc.find(&[Some("GS-1"), None, Some("EB(?)")]).unwrap();
    assert_eq!(
        results,
        vec![Some(Value::Text("HS".into())), None, Some(Value::Count(2))]
    );
    let err = doc.find(&[Some("EB(*)-1"), Some("GS-1")]).unwrap_err();
    assert_eq!(err.kind, X12ErrorKind::IncompatibleQuery);
}

// =============================================================================
// Writes
// =============================================================================

/// REF-2(3) = "x" gives ^^x.
#[test]
fn test_padding_on_write() {
    let mut doc = with_body("REF~");
    doc.set("REF-2(3)", "x").unwrap();
    assert_eq!(doc.get("REF-2").unwrap(), Value::Text("^^x".into()));
}

/// A repetition value carrying the field delimiter fails and changes nothing.
#[test]
fn test_delimiter_conflict() {
    let mut doc = with_body("REF*EJ~");
    let before = doc.text().to_string();
    let err = doc.set("REF-1(2)", "A*B").unwrap_err();
    assert_eq!(err.kind, X12ErrorKind::DelimiterConflict);
    assert_eq!(doc.text(), before);
}

/// ISA-6 is always 15 characters after a write.
#[test]
fn test_header_width_enforcement() {
    let mut doc = Document::empty();
    for value in ["", "A", "EXACTLY15CHARSX", "MUCH LONGER THAN FIFTEEN"] {
        doc.set("ISA-6", value).unwrap();
        let field = doc.get("ISA-6").unwrap().to_string();
        assert_eq!(field.chars().count(), 15, "{:?}", value);
        assert!(field.starts_with(&value[..value.len().min(15)]));
    }
}

/// EB-0 as a write selector fails with ZeroIndex.
#[test]
fn test_zero_index() {
    let mut doc = Document::empty();
    let err = doc.set("EB-0", "X").unwrap_err();
    assert_eq!(err.kind, X12ErrorKind::ZeroIndex);
}

/// A malformed selector fails before any mutation.
#[test]
fn test_bad_selector_leaves_document_unchanged() {
    let mut doc = with_body("EB*1~");
    let before = doc.to_string();
    for sel in ["", "E", "EB(", "EB-x", "EB.1"] {
        let err = doc.set(sel, "X").unwrap_err();
        assert_eq!(err.kind, X12ErrorKind::BadSelector, "{}", sel);
    }
    assert_eq!(doc.to_string(), before);
}

// =============================================================================
// Character classes
// =============================================================================

/// {A,B,C,E,F,G} compiles to the ranges A-C and E-G.
#[test]
fn test_char_class_compression() {
    let class = CharClass::compile(['G', 'A', 'F', 'C', 'B', 'E']);
    assert_eq!(class.ranges(), &[('A', 'C'), ('E', 'G')]);
    assert_eq!(class.pattern(), "[A-CE-G]");
}

/// User values cannot smuggle delimiters in once scrubbed.
#[test]
fn test_scrub_then_write() {
    let mut doc = with_body("NM1*IL~");
    let value = doc.scrub("o'brien*jr~");
    doc.set("NM1-3", value.as_str()).unwrap();
    assert_eq!(doc.get("NM1-3").unwrap(), Value::Text("O'BRIEN JR ".into()));
}

/// Strict character checking rejects lower-case payloads.
#[test]
fn test_strict_charset() {
    let opts = ParseOptions::builder().strict_charset(true).build();
    let err = Document::with_options(format!("{}\nnm1*il~", HEADER), &opts).unwrap_err();
    assert_eq!(err.kind, X12ErrorKind::InvalidCharacter);
}

// =============================================================================
// Construction
// =============================================================================

/// Pairs are written in order into a default document.
#[test]
fn test_construct_from_pairs() {
    let mut doc = Document::new(vec![("GS-1", "HS"), ("GS-2", "SENDER")]).unwrap();
    assert_eq!(doc.get("GS").unwrap(), Value::Text("GS*HS*SENDER".into()));
    assert_eq!(doc.delimiters(), Delimiters::default());
}

/// Copying a document yields an equal, independent document.
#[test]
fn test_construct_from_document() {
    let original = with_body("GS*HS~");
    let mut copy = Document::new(&original).unwrap();
    assert_eq!(copy, original);
    copy.set("GS-1", "HC").unwrap();
    assert_ne!(copy, original);
}
