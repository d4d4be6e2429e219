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


//! Input file discovery.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::CliError;

/// How command-line paths expand into files.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkOptions {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Keep only files modified within this many seconds.
    pub after: Option<u64>,
}

/// Expand `paths` into a sorted, de-duplicated list of files.
///
/// A file argument is kept as given. A directory contributes the files it
/// contains; its subdirectories are entered only when `recursive` is set.
/// Entries that are not regular files (after following symlinks) are skipped.
pub fn discover(paths: &[PathBuf], options: WalkOptions) -> Result<Vec<PathBuf>, CliError> {
    let cutoff = options
        .after
        .and_then(|secs| SystemTime::now().checked_sub(Duration::from_secs(secs)));

    let mut files = Vec::new();
    for path in paths {
        let metadata = fs::metadata(path).map_err(|e| CliError::io_error(path, e))?;
        if metadata.is_dir() {
            walk_dir(path, options.recursive, &mut files);
        } else {
            files.push(path.clone());
        }
    }

    if let Some(cutoff) = cutoff {
        let before = files.len();
        files.retain(|file| modified_since(file, cutoff));
        debug!(kept = files.len(), dropped = before - files.len(), "applied modification-time filter");
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn walk_dir(dir: &Path, recursive: bool, out: &mut Vec<PathBuf>) {
    let walker = if recursive {
        WalkDir::new(dir)
    } else {
        WalkDir::new(dir).max_depth(1)
    };

    out.extend(
        walker
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.path().to_path_buf()),
    );
}

fn modified_since(path: &Path, cutoff: SystemTime) -> bool {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map(|mtime| mtime >= cutoff)
        .unwrap_or(false)
}
