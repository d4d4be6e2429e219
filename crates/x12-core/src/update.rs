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

//! Selector writes.
//!
//! Writes default to the last matching segment and create whatever is
//! missing on the way to the target: segments, fields, repetitions and
//! components are padded with empty entries. A write either fails before
//! touching the document or applies completely.
//!
//! The level of the write follows from the selector:
//!
//! | selector       | level      | value joined on | rejects               |
//! |----------------|------------|-----------------|-----------------------|
//! | `REF` / `REF-2`| fields     | field           | terminator            |
//! | `REF-2(3)`     | repetition | repetition      | field, terminator     |
//! | `REF-2(3).1`   | component  | component       | field, repetition, terminator |

use tracing::debug;

use crate::delimiters::Delimiters;
use crate::document::Document;
use crate::error::X12Result;
use crate::errors::messages;
use crate::header::{is_header_tag, normalize_header};
use crate::limits::Limits;
use crate::segment::{join_parts, split_parts, Segment};
use crate::selector::{Selector, Spec};
use crate::source::{Batch, Replacement};

/// A value shaped for the level it is written at.
enum Shaped {
    /// Field values spliced in from the selected field (or after the tag).
    Fields(Vec<String>),
    /// Text of one repetition.
    Repetition(String),
    /// Text of one component.
    Component(String),
}

impl Shaped {
    fn new(selector: &Selector, value: &Replacement, delimiters: &Delimiters) -> X12Result<Self> {
        let text = selector.to_string();
        // Line breaks around a segment are dropped on parse, so a value may
        // only carry one when it is the terminator itself.
        let conflict = |level: &str, value: &str, structural: &[char]| {
            let forbidden = structural
                .iter()
                .chain(['\r', '\n'].iter().filter(|&&c| c != delimiters.segment));
            match forbidden.copied().find(|&c| value.contains(c)) {
                Some(c) => Err(messages::delimiter_conflict(&text, level, c)),
                None => Ok(()),
            }
        };

        if selector.component.is_some() {
            let value = value.joined(delimiters.component);
            conflict(
                "component",
                &value,
                &[delimiters.field, delimiters.repetition, delimiters.segment],
            )?;
            Ok(Self::Component(value))
        } else if selector.repetition != Spec::Absent {
            let value = value.joined(delimiters.repetition);
            conflict("repetition", &value, &[delimiters.field, delimiters.segment])?;
            Ok(Self::Repetition(value))
        } else {
            let value = value.joined(delimiters.field);
            conflict("field", &value, &[delimiters.segment])?;
            Ok(Self::Fields(
                value.split(delimiters.field).map(str::to_string).collect(),
            ))
        }
    }
}

/// Which segments a write lands on, after any new ones are inserted.
struct Plan {
    /// Where new blank segments go, and how many.
    insert_at: usize,
    created: usize,
    /// Row indexes (after insertion) to write.
    targets: Vec<usize>,
}

fn plan(rows: &[Segment], selector: &Selector) -> Plan {
    let matches: Vec<usize> = rows
        .iter()
        .enumerate()
        .filter(|(_, row)| row.is_tag(&selector.tag))
        .map(|(i, _)| i)
        .collect();
    let insert_at = matches.last().map_or(rows.len(), |&last| last + 1);

    let (created, targets) = match selector.occurrence {
        Spec::All => (0, matches),
        Spec::Absent => match matches.last() {
            Some(&last) => (0, vec![last]),
            None => (1, vec![insert_at]),
        },
        Spec::Append => (1, vec![insert_at]),
        // Rejected by `check_write`.
        Spec::Index(0) | Spec::Count => (0, Vec::new()),
        Spec::Index(n) if n <= matches.len() => (0, vec![matches[n - 1]]),
        Spec::Index(n) => {
            let created = n - matches.len();
            (created, vec![insert_at + created - 1])
        }
    };

    Plan {
        insert_at,
        created,
        targets,
    }
}

impl Document {
    /// Write `value` at `selector`.
    ///
    /// # Examples
    ///
    /// ```
    /// use x12_core::Document;
    ///
    /// let mut doc = Document::empty();
    /// doc.set("REF-1", "EJ").unwrap();
    /// doc.set("REF-2(3)", "x").unwrap();
    /// assert_eq!(doc.get("REF-2").unwrap().to_string(), "^^x");
    /// ```
    ///
    /// # Errors
    ///
    /// - `BadSelector` for an invalid selector, a `(?)` group, or a
    ///   repetition or component without a field
    /// - `ZeroIndex` for a zero index at any level
    /// - `DelimiterConflict` if the value contains a higher-level delimiter
    /// - `LimitExceeded` if padding would cross a configured limit
    pub fn set(&mut self, selector: &str, value: impl Into<Replacement>) -> X12Result<()> {
        let selector = Selector::parse(selector)?;
        self.set_selector(&selector, &value.into())
    }

    /// Write `value` at a parsed selector.
    ///
    /// # Errors
    ///
    /// See [`Document::set`].
    pub fn set_selector(&mut self, selector: &Selector, value: &Replacement) -> X12Result<()> {
        selector.check_write()?;
        let delimiters = self.delimiters();
        let limits = self.limits().clone();
        let shaped = Shaped::new(selector, value, &delimiters)?;
        check_indexes(selector, &shaped, &limits)?;

        let rows = self.rows_mut();
        let plan = plan(rows, selector);
        if rows.len().saturating_add(plan.created) > limits.max_segments {
            return Err(messages::too_many_segments(limits.max_segments));
        }

        if plan.insert_at > 0 && plan.targets.contains(&0) {
            check_header_write(&rows[0], selector, &shaped, &delimiters)?;
        }

        if plan.created > 0 {
            let tag = selector.tag.to_ascii_uppercase();
            rows.splice(
                plan.insert_at..plan.insert_at,
                std::iter::repeat_with(|| Segment::blank(&tag)).take(plan.created),
            );
            debug!(selector = %selector, created = plan.created, "padded segments");
        }

        for &target in &plan.targets {
            let row = &mut rows[target];
            write_row(row, selector, &shaped, &delimiters);
            if is_header_tag(row.tag()) {
                normalize_header(&mut row.fields);
            }
        }
        Ok(())
    }

    /// Apply each `(selector, value)` pair in order, skipping absent values.
    ///
    /// Returns the number of pairs written. A failing pair stops the batch;
    /// pairs already written stay written.
    ///
    /// # Errors
    ///
    /// Returns the first write error.
    pub fn update(&mut self, batch: impl Into<Batch>) -> X12Result<usize> {
        let mut applied = 0;
        for (selector, value) in batch.into().into_pairs() {
            if value.is_absent() {
                debug!(selector = %selector, "skipped pair without value");
                continue;
            }
            self.set(&selector, value)?;
            debug!(selector = %selector, "applied pair");
            applied += 1;
        }
        Ok(applied)
    }
}

/// Every index the write may pad out to must be within `max_index`, and the
/// widest segment it produces within `max_fields`.
fn check_indexes(selector: &Selector, shaped: &Shaped, limits: &Limits) -> X12Result<()> {
    let text = selector.to_string();
    let indexes = [
        match selector.occurrence {
            Spec::Index(n) => Some(n),
            _ => None,
        },
        selector.field,
        match selector.repetition {
            Spec::Index(n) => Some(n),
            _ => None,
        },
        selector.component,
    ];
    for index in indexes.into_iter().flatten() {
        if index > limits.max_index {
            return Err(messages::index_too_large(&text, index, limits.max_index));
        }
    }

    let width = match shaped {
        Shaped::Fields(parts) => selector.field.unwrap_or(1).saturating_add(parts.len()),
        _ => selector.field.unwrap_or(0).saturating_add(1),
    };
    if width > limits.max_fields {
        return Err(messages::too_many_fields(width, limits.max_fields, 0).with_context(text));
    }
    Ok(())
}

/// The leading ISA row declares the document's delimiters; a write to it
/// must leave that declaration intact so the text parses back the same.
fn check_header_write(
    row: &Segment,
    selector: &Selector,
    shaped: &Shaped,
    delimiters: &Delimiters,
) -> X12Result<()> {
    if !is_header_tag(row.tag()) {
        return Ok(());
    }
    let mut candidate = row.clone();
    write_row(&mut candidate, selector, shaped, delimiters);
    normalize_header(&mut candidate.fields);

    let mut text = candidate.to_text(delimiters.field);
    text.push(delimiters.segment);
    match Delimiters::from_header(&text) {
        Ok(declared) if declared == *delimiters => Ok(()),
        _ => Err(messages::header_delimiters_changed(&selector.to_string())),
    }
}

fn write_row(row: &mut Segment, selector: &Selector, shaped: &Shaped, delimiters: &Delimiters) {
    match (shaped, selector.field) {
        (Shaped::Fields(parts), None) => {
            row.fields.truncate(1);
            row.fields.extend(parts.iter().cloned());
        }
        (Shaped::Fields(parts), Some(field)) => {
            row.ensure_len(field + parts.len());
            for (slot, part) in row.fields[field..].iter_mut().zip(parts) {
                slot.clone_from(part);
            }
        }
        (Shaped::Repetition(value), Some(field)) => {
            row.ensure_len(field + 1);
            let mut repetitions = split_parts(&row.fields[field], delimiters.repetition);
            write_repetitions(&mut repetitions, selector.repetition, |rep| {
                rep.clone_from(value)
            });
            row.fields[field] = join_parts(&repetitions, delimiters.repetition);
        }
        (Shaped::Component(value), Some(field)) => {
            let component = selector.component.unwrap_or(1);
            row.ensure_len(field + 1);
            let mut repetitions = split_parts(&row.fields[field], delimiters.repetition);
            write_repetitions(&mut repetitions, selector.repetition, |rep| {
                let mut components = split_parts(rep, delimiters.component);
                pad(&mut components, component);
                components[component - 1].clone_from(value);
                *rep = join_parts(&components, delimiters.component);
            });
            row.fields[field] = join_parts(&repetitions, delimiters.repetition);
        }
        // Rejected by `check_write`.
        (Shaped::Repetition(_) | Shaped::Component(_), None) => {}
    }
}

/// Apply `write` to the repetitions selected by `spec`, padding as needed.
fn write_repetitions<F: FnMut(&mut String)>(repetitions: &mut Vec<String>, spec: Spec, mut write: F) {
    match spec {
        Spec::All => repetitions.iter_mut().for_each(write),
        Spec::Append => {
            repetitions.push(String::new());
            if let Some(last) = repetitions.last_mut() {
                write(last);
            }
        }
        Spec::Absent => {
            pad(repetitions, 1);
            if let Some(last) = repetitions.last_mut() {
                write(last);
            }
        }
        Spec::Index(n) if n > 0 => {
            pad(repetitions, n);
            write(&mut repetitions[n - 1]);
        }
        // Rejected by `check_write`.
        Spec::Index(_) | Spec::Count => {}
    }
}

fn pad(parts: &mut Vec<String>, len: usize) {
    if parts.len() < len {
        parts.resize(len, String::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::X12ErrorKind;
    use crate::options::ParseOptions;
    use crate::query::Value;

    const SAMPLE: &str = "ISA*00**00**ZZ**ZZ****^*00501**0*P*:~\nEB*1*IND~\nEB**FAM~\nREF*EJ~\nSE*4*0001~";

    fn doc() -> Document {
        Document::parse(SAMPLE).unwrap()
    }

    fn text(doc: &mut Document, selector: &str) -> String {
        doc.get(selector).unwrap().to_string()
    }

    fn tags(doc: &mut Document) -> Vec<String> {
        doc.segments().iter().map(|s| s.tag().to_string()).collect()
    }

    // ==================== Occurrence tests ====================

    #[test]
    fn test_default_writes_last_match() {
        let mut d = doc();
        d.set("EB-1", "X").unwrap();
        assert_eq!(text(&mut d, "EB(1)-1"), "1");
        assert_eq!(text(&mut d, "EB(2)-1"), "X");
    }

    #[test]
    fn test_default_creates_when_missing() {
        let mut d = doc();
        d.set("DTP-1", "291").unwrap();
        assert_eq!(tags(&mut d), vec!["ISA", "EB", "EB", "REF", "SE", "DTP"]);
        assert_eq!(text(&mut d, "DTP-1"), "291");
    }

    #[test]
    fn test_append_inserts_after_last_match() {
        let mut d = doc();
        d.set("eb(+)-1", "C").unwrap();
        assert_eq!(tags(&mut d), vec!["ISA", "EB", "EB", "EB", "REF", "SE"]);
        assert_eq!(text(&mut d, "EB(3)-1"), "C");
        assert_eq!(text(&mut d, "EB-1"), "1");
    }

    #[test]
    fn test_index_pads_segments() {
        let mut d = doc();
        d.set("EB(5)-2", "EMP").unwrap();
        assert_eq!(text(&mut d, "EB(?)"), "5");
        assert_eq!(text(&mut d, "EB(3)"), "EB");
        assert_eq!(text(&mut d, "EB(5)"), "EB**EMP");
        assert_eq!(tags(&mut d)[6], "REF");
    }

    #[test]
    fn test_all_writes_every_match() {
        let mut d = doc();
        d.set("EB(*)-3", "Y").unwrap();
        assert_eq!(d.get("EB(*)-3").unwrap(), Value::List(vec!["Y".into(), "Y".into()]));
    }

    #[test]
    fn test_all_without_matches_is_noop() {
        let mut d = doc();
        let before = d.to_string();
        d.set("DTP(*)-1", "X").unwrap();
        assert_eq!(d.to_string(), before);
    }

    // ==================== Field tests ====================

    #[test]
    fn test_field_pads() {
        let mut d = doc();
        d.set("REF-4", "Z").unwrap();
        assert_eq!(text(&mut d, "REF"), "REF*EJ***Z");
    }

    #[test]
    fn test_field_value_splits_on_field_delimiter() {
        let mut d = doc();
        d.set("REF-2", "A*B").unwrap();
        assert_eq!(text(&mut d, "REF"), "REF*EJ*A*B");
    }

    #[test]
    fn test_field_parts_splice() {
        let mut d = doc();
        d.set("SE-1", vec!["9", "0002", "X"]).unwrap();
        assert_eq!(text(&mut d, "SE"), "SE*9*0002*X");
    }

    #[test]
    fn test_whole_field_list_replaced() {
        let mut d = doc();
        d.set("EB", "6*EMP").unwrap();
        assert_eq!(text(&mut d, "EB(2)"), "EB*6*EMP");
        d.set("EB", None::<&str>).unwrap();
        assert_eq!(text(&mut d, "EB(2)"), "EB*");
    }

    #[test]
    fn test_absent_value_clears() {
        let mut d = doc();
        d.set("EB(1)-2", None::<String>).unwrap();
        assert_eq!(text(&mut d, "EB(1)"), "EB*1*");
    }

    // ==================== Repetition tests ====================

    #[test]
    fn test_repetition_padding() {
        let mut d = doc();
        d.set("REF-2(3)", "x").unwrap();
        assert_eq!(text(&mut d, "REF-2"), "^^x");
    }

    #[test]
    fn test_repetition_padding_keeps_existing() {
        let mut d = doc();
        d.set("REF-1(3)", "x").unwrap();
        assert_eq!(text(&mut d, "REF-1"), "EJ^^x");
    }

    #[test]
    fn test_repetition_append() {
        let mut d = doc();
        d.set("REF-1(+)", "ZZ").unwrap();
        assert_eq!(text(&mut d, "REF-1"), "EJ^ZZ");
    }

    #[test]
    fn test_repetition_all() {
        let mut d = doc();
        d.set("REF-1(3)", "x").unwrap();
        d.set("REF-1(*)", "Q").unwrap();
        assert_eq!(text(&mut d, "REF-1"), "Q^Q^Q");
    }

    #[test]
    fn test_repetition_parts_joined() {
        let mut d = doc();
        d.set("REF-3(1)", vec!["A", "B"]).unwrap();
        assert_eq!(text(&mut d, "REF-3"), "A^B");
    }

    #[test]
    fn test_repetition_conflict_leaves_document_unchanged() {
        let mut d = doc();
        let before = d.to_string();
        let err = d.set("REF-2(2)", "A*B").unwrap_err();
        assert_eq!(err.kind, X12ErrorKind::DelimiterConflict);
        assert_eq!(d.to_string(), before);
    }

    // ==================== Component tests ====================

    #[test]
    fn test_component_defaults_to_last_repetition() {
        let mut d = doc();
        d.set("REF-1(2)", "A:B").unwrap();
        d.set("REF-1.3", "C").unwrap();
        assert_eq!(text(&mut d, "REF-1"), "EJ^A:B:C");
    }

    #[test]
    fn test_component_in_new_field() {
        let mut d = doc();
        d.set("DTP-3.2", "D8").unwrap();
        assert_eq!(text(&mut d, "DTP"), "DTP***:D8");
    }

    #[test]
    fn test_component_conflicts() {
        let mut d = doc();
        assert_eq!(d.set("REF-2.1", "A^B").unwrap_err().kind, X12ErrorKind::DelimiterConflict);
        assert_eq!(d.set("REF-2.1", "A*B").unwrap_err().kind, X12ErrorKind::DelimiterConflict);
        assert_eq!(d.set("REF-2", "A~B").unwrap_err().kind, X12ErrorKind::DelimiterConflict);
    }

    #[test]
    fn test_line_breaks_rejected_at_every_level() {
        let mut d = doc();
        let before = d.to_string();
        for (sel, value) in [("REF-2", "X\n"), ("REF-2", "\rX"), ("REF-2(2)", "A\nB"), ("REF-2.1", "\n")] {
            let err = d.set(sel, value).unwrap_err();
            assert_eq!(err.kind, X12ErrorKind::DelimiterConflict, "{}", sel);
        }
        assert_eq!(d.to_string(), before);
    }

    #[test]
    fn test_written_values_survive_reparse() {
        let mut d = doc();
        d.set("REF-2", "X ").unwrap();
        d.set("REF-3(2).2", " Y").unwrap();
        let mut again = Document::parse(d.text()).unwrap();
        assert_eq!(text(&mut again, "REF-2"), "X ");
        assert_eq!(text(&mut again, "REF-3(2).2"), " Y");
    }

    #[test]
    fn test_component_parts_joined() {
        let mut d = doc();
        d.set("REF-3(1).1", vec!["A", "B"]).unwrap();
        assert_eq!(text(&mut d, "REF-3"), "A:B");
    }

    // ==================== Header tests ====================

    #[test]
    fn test_header_width_enforced() {
        let mut d = doc();
        d.set("ISA-6", "SHORT").unwrap();
        assert_eq!(text(&mut d, "ISA-6"), "SHORT          ");
        d.set("ISA-6", "THIS VALUE IS FAR TOO LONG").unwrap();
        assert_eq!(text(&mut d, "ISA-6"), "THIS VALUE IS F");
    }

    #[test]
    fn test_header_write_keeps_delimiters() {
        let mut d = doc();
        d.set("ISA-13", "905").unwrap();
        let again = Document::parse(d.text()).unwrap();
        assert_eq!(again.delimiters(), Delimiters::default());
        assert_eq!(d.text().find('~'), Some(105));
    }

    #[test]
    fn test_header_write_cannot_add_fields() {
        let mut d = Document::empty();
        let before = d.to_string();
        let err = d.set("ISA-16", "*").unwrap_err();
        assert_eq!(err.kind, X12ErrorKind::DelimiterConflict);
        assert_eq!(d.to_string(), before);
    }

    #[test]
    fn test_header_write_cannot_change_delimiters() {
        let mut d = Document::empty();
        for (sel, value) in [("ISA-11", "|"), ("ISA-16", ">"), ("ISA-16", "")] {
            let err = d.set(sel, value).unwrap_err();
            assert_eq!(err.kind, X12ErrorKind::DelimiterConflict, "{}", sel);
        }
        d.set("ISA-11", "U").unwrap();
        assert_eq!(Document::parse(d.text()).unwrap().delimiters(), Delimiters::default());
    }

    #[test]
    fn test_whole_header_write_is_fixed_to_sixteen_fields() {
        let mut d = Document::empty();
        d.set(
            "ISA",
            "00**00**ZZ*SENDER*ZZ*RECEIVER*250101*1200*^*00501*7*0*P*:*EXTRA*MORE",
        )
        .unwrap();
        assert_eq!(d.segments()[0].len(), 17);

        let mut again = Document::parse(d.text()).unwrap();
        assert_eq!(again.delimiters(), Delimiters::default());
        assert_eq!(again.get("ISA-6").unwrap().to_string(), "SENDER         ");
        assert_eq!(again, d);
    }

    #[test]
    fn test_second_header_row_normalized() {
        let mut d = Document::empty();
        d.set("ISA(2)-6", "OTHER").unwrap();
        assert_eq!(d.segments()[1].len(), 17);
        assert!(Document::parse(d.text()).is_ok());
    }

    // ==================== Rejection tests ====================

    #[test]
    fn test_zero_indexes_rejected() {
        let mut d = doc();
        for sel in ["EB-0", "EB-1.0", "EB()-1", "EB-1()"] {
            assert_eq!(d.set(sel, "X").unwrap_err().kind, X12ErrorKind::ZeroIndex, "{}", sel);
        }
    }

    #[test]
    fn test_count_rejected() {
        let mut d = doc();
        assert_eq!(d.set("EB(?)-1", "X").unwrap_err().kind, X12ErrorKind::BadSelector);
        assert_eq!(d.set("EB-1(?)", "X").unwrap_err().kind, X12ErrorKind::BadSelector);
    }

    #[test]
    fn test_index_limit() {
        let opts = ParseOptions::builder().max_index(10).build();
        let mut d = Document::with_options(SAMPLE, &opts).unwrap();
        let before = d.to_string();
        let err = d.set("EB(11)-1", "X").unwrap_err();
        assert_eq!(err.kind, X12ErrorKind::LimitExceeded);
        assert_eq!(d.set("REF-2(500)", "X").unwrap_err().kind, X12ErrorKind::LimitExceeded);
        assert_eq!(d.to_string(), before);
    }

    #[test]
    fn test_field_limit_on_write() {
        let opts = ParseOptions::builder().max_fields(20).build();
        let mut d = Document::with_options(SAMPLE, &opts).unwrap();
        assert!(d.set("REF-19", "X").is_ok());
        assert_eq!(d.set("REF-20", "X").unwrap_err().kind, X12ErrorKind::LimitExceeded);
    }

    // ==================== Batch tests ====================

    #[test]
    fn test_update_skips_absent() {
        let mut d = doc();
        let applied = d
            .update(vec![("EB(1)-1", Some("A")), ("EB(2)-1", None), ("REF-2", Some("1L"))])
            .unwrap();
        assert_eq!(applied, 2);
        assert_eq!(text(&mut d, "EB(1)-1"), "A");
        assert_eq!(text(&mut d, "EB(2)-1"), "");
        assert_eq!(text(&mut d, "REF-2"), "1L");
    }

    #[test]
    fn test_update_is_not_transactional() {
        let mut d = doc();
        let err = d
            .update(vec![("EB(1)-1", "A"), ("EB-0", "B"), ("REF-1", "C")])
            .unwrap_err();
        assert_eq!(err.kind, X12ErrorKind::ZeroIndex);
        assert_eq!(text(&mut d, "EB(1)-1"), "A");
        assert_eq!(text(&mut d, "REF-1"), "EJ");
    }
}
