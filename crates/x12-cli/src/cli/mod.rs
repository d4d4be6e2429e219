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


//! Command-line argument definitions.
//!
//! Commands that read documents take one or more paths; directories expand
//! through [`crate::walk`] using the shared [`InputArgs`] switches.

use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::commands::{self, GetArgs, SetArgs, ShowArgs};
use crate::error::CliError;
use crate::walk::{discover, WalkOptions};

/// Input paths shared by the multi-file commands.
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Files or directories to read
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,

    /// Descend into subdirectories
    #[arg(short, long)]
    pub recursive: bool,

    /// Only files modified within the last SECS seconds
    #[arg(long, value_name = "SECS")]
    pub after: Option<u64>,
}

impl InputArgs {
    /// Expand the paths into the list of files to process.
    pub fn files(&self) -> Result<Vec<PathBuf>, CliError> {
        discover(
            &self.paths,
            WalkOptions {
                recursive: self.recursive,
                after: self.after,
            },
        )
    }
}

/// X12 commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print documents one segment per line
    Show {
        #[command(flatten)]
        input: InputArgs,

        /// Lower-case segment tags
        #[arg(long)]
        lower: bool,

        /// Highlight segment tags
        #[arg(long)]
        color: bool,

        /// Show only the first occurrence of each tag
        #[arg(long)]
        first: bool,

        /// Print a blank line between files
        #[arg(long)]
        spacer: bool,

        /// Separate fields with tabs
        #[arg(long)]
        tabs: bool,
    },

    /// Read values by selector
    ///
    /// Prints one tab-delimited line per file. Gathered lists are joined
    /// with ','.
    Get {
        #[command(flatten)]
        input: InputArgs,

        /// Comma-separated selectors, e.g. "GS-2,NM1(?),EB(*)-1"
        #[arg(short, long, value_name = "SELECTORS")]
        query: String,

        /// Emit JSON
        #[arg(long)]
        json: bool,
    },

    /// Write values by selector
    ///
    /// The batch file is applied first, then each --set in order.
    Set {
        /// Input file path
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Assignment SELECTOR=VALUE (repeatable)
        #[arg(short, long = "set", value_name = "SELECTOR=VALUE")]
        set: Vec<String>,

        /// JSON batch: an object or an array of [selector, value] pairs
        #[arg(long, value_name = "FILE")]
        batch: Option<PathBuf>,

        /// Upper-case values and blank out characters outside the basic set
        #[arg(long)]
        scrub: bool,

        /// Output file path (defaults to stdout)
        #[arg(short, long, conflicts_with = "in_place")]
        output: Option<PathBuf>,

        /// Overwrite the input file
        #[arg(long)]
        in_place: bool,
    },

    /// Print the raw canonical form
    Raw {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Check that files parse as X12 documents
    Validate {
        #[command(flatten)]
        input: InputArgs,

        /// Reject characters outside the basic set
        #[arg(short, long)]
        strict: bool,
    },
}

impl Commands {
    /// Run the command.
    ///
    /// # Errors
    ///
    /// Any I/O or document error; for multi-file commands, a
    /// [`CliError::Failures`] summary after all files have been attempted.
    pub fn execute(self) -> Result<(), CliError> {
        match self {
            Commands::Show {
                input,
                lower,
                color,
                first,
                spacer,
                tabs,
            } => commands::show(
                &input.files()?,
                ShowArgs {
                    lower,
                    color,
                    first,
                    spacer,
                    tabs,
                },
            ),
            Commands::Get { input, query, json } => {
                commands::get(&input.files()?, &GetArgs { query, json })
            }
            Commands::Set {
                file,
                set,
                batch,
                scrub,
                output,
                in_place,
            } => commands::set(
                &file,
                &SetArgs {
                    assignments: set,
                    batch,
                    scrub,
                    output,
                    in_place,
                },
            ),
            Commands::Raw { input } => commands::raw(&input.files()?),
            Commands::Validate { input, strict } => commands::validate(&input.files()?, strict),
        }
    }
}
