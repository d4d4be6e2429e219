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


//! X12 Command Line Interface

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;
use x12_cli::cli::Commands;

/// X12 - ANSI X12 EDI toolkit
///
/// ```bash
/// # Show a file with highlighted tags
/// x12 show claim.x12 --color
///
/// # Query every file under a directory
/// x12 get -r inbox/ -q "ISA-13,ST-1,NM1(?)"
///
/// # Edit in place
/// x12 set claim.x12 -s "NM1(2)-3=ACME" --in-place
/// ```
#[derive(Parser)]
#[command(name = "x12")]
#[command(author, version, about = "X12 - ANSI X12 EDI toolkit", long_about = None)]
struct Cli {
    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

fn init_logging(verbose: bool) {
    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("x12=warn"));
    if verbose {
        filter = filter.add_directive("x12=debug".parse().expect("valid log directive"));
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command.execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
