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

//! Core document model and selector engine for ANSI X12 EDI.
//!
//! An X12 interchange is plain text split by four delimiters that the
//! interchange itself declares in its fixed-width ISA header. This crate
//! derives those delimiters, parses the text into segment rows and reads or
//! writes any field, repetition or component through a compact selector:
//!
//! ```text
//! EB(2)-3(1).2
//! │  │  │ │  └ component 2
//! │  │  │ └─── repetition 1
//! │  │  └───── field 3
//! │  └──────── second EB segment
//! └─────────── segment tag
//! ```
//!
//! # Example
//!
//! ```
//! use x12_core::{Document, Value};
//!
//! let text = "ISA*00**00**ZZ**ZZ****^*00501**0*P*:~\nEB*1*IND~\nEB**FAM~\nEB*C*IND~";
//! let mut doc = Document::parse(text).unwrap();
//!
//! assert_eq!(doc.get("EB-1").unwrap(), Value::Text("1".into()));
//! assert_eq!(doc.get("EB(?)").unwrap(), Value::Count(3));
//! assert_eq!(
//!     doc.get("EB(*)-1").unwrap(),
//!     Value::List(vec!["1".into(), "C".into()])
//! );
//!
//! doc.set("EB(+)-1", "6").unwrap();
//! doc.set("REF-2(3)", "x").unwrap();
//! assert_eq!(doc.get("REF-2").unwrap().to_string(), "^^x");
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for [`Delimiters`], [`Selector`],
//!   [`Spec`] and [`Value`]
//! - `json`: [`Source::from_json`] and [`Batch::from_json`]

pub mod charclass;
mod delimiters;
mod document;
mod error;
pub mod errors;
pub mod header;
mod limits;
mod options;
mod query;
mod segment;
mod selector;
mod source;
pub mod traverse;
mod update;

pub use charclass::{CharClass, CharSet};
pub use delimiters::Delimiters;
pub use document::Document;
pub use error::{X12Error, X12ErrorKind, X12Result};
pub use limits::Limits;
pub use options::{ParseOptions, ParseOptionsBuilder};
pub use query::Value;
pub use segment::Segment;
pub use selector::{Selector, Spec};
pub use source::{Batch, Pairs, Replacement, Source};
pub use traverse::{traverse, SegmentVisitor, VisitorContext};
