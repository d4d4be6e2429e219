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


//! X12 command-line interface.
//!
//! The `x12` binary inspects and edits ANSI X12 EDI files through the
//! selector engine of [`x12_core`]:
//!
//! - `show`: one segment per line, with optional tag highlighting
//! - `get`: multi-selector queries, tab-delimited or JSON
//! - `set`: selector writes from arguments or a JSON batch
//! - `raw`: the canonical raw form
//! - `validate`: per-file parse check, optionally enforcing the basic
//!   character set
//!
//! Multi-file commands build one document per file and run files in
//! parallel. A failing file is reported on stderr and the remaining files
//! are still processed; the exit status is non-zero if any file failed.

pub mod batch;
pub mod cli;
pub mod commands;
pub mod error;
pub mod walk;
