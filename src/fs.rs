// Copyright 2015 Axel Rasmussen
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::error::*;
use regex::Regex;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// This is a simple utility to create a new empty file. If a file at the
/// given path already exists, it will be truncated. It's an error if the
/// path already exists but is, for example, a directory.
pub fn create_file<P: AsRef<Path>>(path: P) -> Result<()> {
    let _f = fs::File::create(path)?;
    Ok(())
}

/// Read an entire file into a String. If the file does not exist and
/// ignore_missing is set, None is returned; otherwise a missing file is
/// a NotFound error. Any other I/O failure is propagated as-is.
pub fn read_to_string_opt<P: AsRef<Path>>(path: P, ignore_missing: bool) -> Result<Option<String>> {
    match fs::read_to_string(path.as_ref()) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) => {
            if e.kind() == ErrorKind::NotFound {
                if ignore_missing {
                    Ok(None)
                } else {
                    Err(Error::NotFound(format_err!(
                        "unable to open missing file '{}' for read",
                        path.as_ref().display()
                    )))
                }
            } else {
                Err(e.into())
            }
        }
    }
}

/// List the names of the entries in the given directory whose file names
/// match the given expression. If the directory does not exist, None is
/// returned, unless error_on_missing is set in which case this is a
/// NotFound error. The result is in directory order; callers wanting a
/// stable order must sort it themselves.
pub fn list_matching<P: AsRef<Path>>(
    path: P,
    expression: &Regex,
    error_on_missing: bool,
) -> Result<Option<Vec<String>>> {
    let entries = match fs::read_dir(path.as_ref()) {
        Ok(entries) => entries,
        Err(e) => {
            if e.kind() == ErrorKind::NotFound {
                if error_on_missing {
                    return Err(Error::NotFound(format_err!(
                        "unable to list missing path '{}'",
                        path.as_ref().display()
                    )));
                } else {
                    return Ok(None);
                }
            }
            return Err(e.into());
        }
    };

    let mut names: Vec<String> = vec![];
    for entry in entries {
        let entry = entry?;
        // Non-UTF-8 names cannot be configuration files of ours; skip them.
        if let Some(name) = entry.file_name().to_str() {
            if expression.is_match(name) {
                names.push(name.to_owned());
            }
        }
    }

    Ok(Some(names))
}
