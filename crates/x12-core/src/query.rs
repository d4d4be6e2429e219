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

//! Selector reads.
//!
//! Reads default to the first matching segment and, when a component is
//! requested, the first repetition. An index past the end reads as empty
//! text; missing data is never an error.
//!
//! When the occurrence group is `(?)` or `(*)`, the repetition group's
//! `(?)` and `(*)` are ignored: the occurrence-level modifier decides the
//! shape of the result.

use std::collections::HashMap;
use std::fmt;

use crate::delimiters::Delimiters;
use crate::document::Document;
use crate::error::X12Result;
use crate::errors::messages;
use crate::segment::{split_parts, Segment};
use crate::selector::{Selector, Spec};

/// The result of a read.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(untagged)
)]
pub enum Value {
    /// A single value (possibly empty).
    Text(String),
    /// The answer to a `(?)` query.
    Count(usize),
    /// The values gathered by a `(*)` query.
    List(Vec<String>),
}

impl Value {
    /// The text of a single value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            _ => None,
        }
    }

    /// The answer of a count query.
    pub fn as_count(&self) -> Option<usize> {
        match self {
            Self::Count(n) => Some(*n),
            _ => None,
        }
    }

    /// The values of a gather query.
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Whether this is empty text or an empty list.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Text(text) => text.is_empty(),
            Self::Count(_) => false,
            Self::List(items) => items.is_empty(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Count(n) => write!(f, "{}", n),
            Self::List(items) => f.write_str(&items.join(",")),
        }
    }
}

impl Document {
    /// Read the value addressed by `selector`.
    ///
    /// # Examples
    ///
    /// ```
    /// use x12_core::{Document, Value};
    ///
    /// let mut doc = Document::from_pairs([("EB(1)-1", "1"), ("EB(2)-1", "C")]).unwrap();
    /// assert_eq!(doc.get("EB-1").unwrap(), Value::Text("1".into()));
    /// assert_eq!(doc.get("EB(?)").unwrap(), Value::Count(2));
    /// ```
    ///
    /// # Errors
    ///
    /// Returns `BadSelector` or `ZeroIndex` for an invalid selector.
    pub fn get(&mut self, selector: &str) -> X12Result<Value> {
        let selector = Selector::parse(selector)?;
        self.get_selector(&selector)
    }

    /// Read the value addressed by a parsed selector.
    ///
    /// # Errors
    ///
    /// Returns `BadSelector` or `ZeroIndex` for an invalid selector.
    pub fn get_selector(&mut self, selector: &Selector) -> X12Result<Value> {
        selector.check_read()?;
        let delimiters = self.delimiters();
        let matches: Vec<&Segment> = self
            .rows_mut()
            .iter()
            .filter(|row| row.is_tag(&selector.tag))
            .collect();
        Ok(resolve(selector, &matches, &delimiters))
    }

    /// Read several selectors in one pass; `None` entries yield `None`.
    ///
    /// # Errors
    ///
    /// Returns `IncompatibleQuery` when a `(*)` selector is combined with
    /// any other selector, or the first selector error.
    pub fn find<S: AsRef<str>>(&mut self, selectors: &[Option<S>]) -> X12Result<Vec<Option<Value>>> {
        let parsed = selectors
            .iter()
            .map(|s| s.as_ref().map(|s| Selector::parse(s.as_ref())).transpose())
            .collect::<X12Result<Vec<Option<Selector>>>>()?;

        let active = parsed.iter().flatten().count();
        if active > 1 {
            if let Some(gather) = parsed.iter().flatten().find(|s| s.is_gather()) {
                return Err(messages::incompatible_query(&gather.to_string(), active));
            }
        }
        for selector in parsed.iter().flatten() {
            selector.check_read()?;
        }

        let delimiters = self.delimiters();
        let mut index: HashMap<String, Vec<&Segment>> = HashMap::new();
        for row in self.rows_mut().iter() {
            index
                .entry(row.tag().to_ascii_uppercase())
                .or_default()
                .push(row);
        }

        Ok(parsed
            .iter()
            .map(|selector| {
                selector.as_ref().map(|selector| {
                    let matches = index
                        .get(&selector.tag.to_ascii_uppercase())
                        .map(Vec::as_slice)
                        .unwrap_or(&[]);
                    resolve(selector, matches, &delimiters)
                })
            })
            .collect())
    }
}

/// What a read of a missing segment yields: the empty form of the
/// repetition mode.
fn missing(selector: &Selector) -> Value {
    match selector.repetition {
        Spec::Count if selector.field.is_some() => Value::Count(0),
        Spec::All if selector.field.is_some() => Value::List(Vec::new()),
        _ => Value::Text(String::new()),
    }
}

fn resolve(selector: &Selector, matches: &[&Segment], delimiters: &Delimiters) -> Value {
    match selector.occurrence {
        Spec::Count => Value::Count(matches.len()),
        Spec::All => {
            let repetition = match selector.repetition {
                Spec::Count | Spec::All => Spec::Absent,
                other => other,
            };
            Value::List(
                matches
                    .iter()
                    .filter_map(|row| read_row(row, selector, repetition, delimiters))
                    .filter_map(|value| match value {
                        Value::Text(text) if !text.is_empty() => Some(text),
                        _ => None,
                    })
                    .collect(),
            )
        }
        Spec::Absent => matches
            .first()
            .and_then(|row| read_row(row, selector, selector.repetition, delimiters))
            .unwrap_or_else(|| missing(selector)),
        Spec::Index(n) => n
            .checked_sub(1)
            .and_then(|i| matches.get(i))
            .and_then(|row| read_row(row, selector, selector.repetition, delimiters))
            .unwrap_or_else(|| missing(selector)),
        Spec::Append => Value::Text(String::new()),
    }
}

/// Field, repetition and component resolution within one segment.
/// `None` means something along the path does not exist. A missing field
/// reads as empty text.
fn read_row(
    row: &Segment,
    selector: &Selector,
    repetition: Spec,
    delimiters: &Delimiters,
) -> Option<Value> {
    let Some(field_index) = selector.field else {
        return Some(Value::Text(row.to_text(delimiters.field)));
    };
    let field = row.field(field_index).unwrap_or_default();
    if repetition == Spec::Absent && selector.component.is_none() {
        return Some(Value::Text(field.to_string()));
    }

    let repetitions = split_parts(field, delimiters.repetition);
    let chosen = match repetition {
        Spec::Count => return Some(Value::Count(repetitions.len())),
        Spec::All => {
            return Some(Value::List(
                repetitions
                    .iter()
                    .filter_map(|rep| read_component(rep, selector.component, delimiters))
                    .filter(|text| !text.is_empty())
                    .collect(),
            ))
        }
        Spec::Absent => repetitions.first()?,
        Spec::Index(n) => repetitions.get(n.checked_sub(1)?)?,
        Spec::Append => return None,
    };
    read_component(chosen, selector.component, delimiters).map(Value::Text)
}

fn read_component(repetition: &str, component: Option<usize>, delimiters: &Delimiters) -> Option<String> {
    match component {
        None => Some(repetition.to_string()),
        Some(c) => split_parts(repetition, delimiters.component)
            .into_iter()
            .nth(c.checked_sub(1)?),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::X12ErrorKind;

    const SAMPLE: &str = "ISA*00**00**ZZ**ZZ****^*00501**0*P*:~\nNM1*IL*1*DOE*JOHN~\nEB*1*IND**30^60~\nEB**FAM~\nEB*C*IND**A:B:C^D:E~\nREF*EJ*X^Y^Z~";

    fn doc() -> Document {
        Document::parse(SAMPLE).unwrap()
    }

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    // ==================== Default resolution tests ====================

    #[test]
    fn test_first_occurrence_by_default() {
        assert_eq!(doc().get("EB-1").unwrap(), text("1"));
    }

    #[test]
    fn test_explicit_occurrence() {
        let mut d = doc();
        assert_eq!(d.get("EB(3)-1").unwrap(), text("C"));
        assert_eq!(d.get("EB(2)-2").unwrap(), text("FAM"));
    }

    #[test]
    fn test_case_insensitive_tag() {
        assert_eq!(doc().get("nm1-3").unwrap(), text("DOE"));
    }

    #[test]
    fn test_whole_segment_without_field() {
        assert_eq!(doc().get("NM1").unwrap(), text("NM1*IL*1*DOE*JOHN"));
    }

    #[test]
    fn test_field_returns_unsplit_text() {
        assert_eq!(doc().get("REF-2").unwrap(), text("X^Y^Z"));
    }

    #[test]
    fn test_repetition_index() {
        let mut d = doc();
        assert_eq!(d.get("REF-2(2)").unwrap(), text("Y"));
        assert_eq!(d.get("EB-4(2)").unwrap(), text("60"));
    }

    #[test]
    fn test_component_defaults_to_first_repetition() {
        let mut d = doc();
        assert_eq!(d.get("EB(3)-4.2").unwrap(), text("B"));
        assert_eq!(d.get("EB(3)-4(2).1").unwrap(), text("D"));
    }

    // ==================== Out-of-range tests ====================

    #[test]
    fn test_out_of_range_is_empty_text() {
        let mut d = doc();
        for sel in ["EB(9)-1", "EB-20", "REF-2(9)", "EB(3)-4.9", "ZZZ-1", "EB()-1", "EB(+)-1", "REF-2()"] {
            assert_eq!(d.get(sel).unwrap(), text(""), "{}", sel);
        }
    }

    // ==================== Count tests ====================

    #[test]
    fn test_occurrence_count() {
        let mut d = doc();
        assert_eq!(d.get("EB(?)").unwrap(), Value::Count(3));
        assert_eq!(d.get("ZZ(?)").unwrap(), Value::Count(0));
    }

    #[test]
    fn test_repetition_count() {
        let mut d = doc();
        assert_eq!(d.get("REF-2(?)").unwrap(), Value::Count(3));
        assert_eq!(d.get("EB-3(?)").unwrap(), Value::Count(0));
    }

    #[test]
    fn test_repetition_count_of_missing_field_or_segment() {
        let mut d = doc();
        assert_eq!(d.get("REF-3(?)").unwrap(), Value::Count(0));
        assert_eq!(d.get("DTP-1(?)").unwrap(), Value::Count(0));
        assert_eq!(d.get("EB(7)-1(?)").unwrap(), Value::Count(0));
    }

    #[test]
    fn test_repetition_gather_of_missing_field_or_segment() {
        let mut d = doc();
        assert_eq!(d.get("REF-3(*)").unwrap(), Value::List(Vec::new()));
        assert_eq!(d.get("DTP-1(*)").unwrap(), Value::List(Vec::new()));
    }

    #[test]
    fn test_occurrence_count_wins_over_repetition() {
        assert_eq!(doc().get("EB(?)-4(?)").unwrap(), Value::Count(3));
    }

    // ==================== Gather tests ====================

    #[test]
    fn test_gather_omits_empty() {
        let value = doc().get("EB(*)-1").unwrap();
        assert_eq!(value, Value::List(vec!["1".into(), "C".into()]));
    }

    #[test]
    fn test_gather_components() {
        let value = doc().get("EB(*)-4.1").unwrap();
        assert_eq!(value, Value::List(vec!["30".into(), "A".into()]));
    }

    #[test]
    fn test_gather_repetitions_within_field() {
        let value = doc().get("REF-2(*)").unwrap();
        assert_eq!(value, Value::List(vec!["X".into(), "Y".into(), "Z".into()]));
    }

    #[test]
    fn test_gather_ignores_repetition_modifier() {
        let value = doc().get("EB(*)-4(*)").unwrap();
        assert_eq!(value, Value::List(vec!["30^60".into(), "A:B:C^D:E".into()]));
    }

    // ==================== Error tests ====================

    #[test]
    fn test_zero_field_read() {
        assert_eq!(doc().get("EB-0").unwrap_err().kind, X12ErrorKind::ZeroIndex);
    }

    #[test]
    fn test_bad_selector_read() {
        assert_eq!(doc().get("E").unwrap_err().kind, X12ErrorKind::BadSelector);
    }

    // ==================== Multi-query tests ====================

    #[test]
    fn test_find_parallel_results() {
        let results = doc()
            .find(&[Some("NM1-3"), None, Some("EB(?)"), Some("REF-2(3)")])
            .unwrap();
        assert_eq!(
            results,
            vec![Some(text("DOE")), None, Some(Value::Count(3)), Some(text("Z"))]
        );
    }

    #[test]
    fn test_find_single_gather_allowed() {
        let results = doc().find(&[Some("EB(*)-2")]).unwrap();
        assert_eq!(
            results,
            vec![Some(Value::List(vec!["IND".into(), "FAM".into(), "IND".into()]))]
        );
    }

    #[test]
    fn test_find_gather_with_others_rejected() {
        let err = doc().find(&[Some("EB(*)-2"), Some("NM1-3")]).unwrap_err();
        assert_eq!(err.kind, X12ErrorKind::IncompatibleQuery);
    }

    #[test]
    fn test_find_gather_with_skip_marker_allowed() {
        assert!(doc().find(&[Some("EB(*)-2"), None]).is_ok());
    }

    // ==================== Value tests ====================

    #[test]
    fn test_value_display() {
        assert_eq!(text("A").to_string(), "A");
        assert_eq!(Value::Count(4).to_string(), "4");
        assert_eq!(Value::List(vec!["A".into(), "B".into()]).to_string(), "A,B");
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(text("A").as_text(), Some("A"));
        assert_eq!(Value::Count(2).as_count(), Some(2));
        assert!(Value::List(vec![]).is_empty());
        assert!(text("").is_empty());
        assert_eq!(Value::List(vec!["A".into()]).as_list().map(|l| l.len()), Some(1));
    }
}
