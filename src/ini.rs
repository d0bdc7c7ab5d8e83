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

/// A single key within a section. Repeating a key within its section
/// turns the value into a list; this is the file format's only list
/// encoding.
#[derive(Debug, Eq, PartialEq)]
struct Key {
    name: String,
    values: Vec<String>,
}

/// A named section and its keys, in order of first appearance.
#[derive(Debug, Eq, PartialEq)]
struct Section {
    name: String,
    keys: Vec<Key>,
}

/// Ini is a parsed configuration file. Sections and keys are kept in
/// order of first appearance, so enumeration is deterministic and
/// matches the file the user wrote (the duplicate-option diagnostics in
/// the config parser rely on this).
#[derive(Debug, Eq, PartialEq)]
pub struct Ini {
    sections: Vec<Section>,
}

impl Ini {
    /// Parse the given configuration file contents. Blank lines and
    /// lines starting with '#' are ignored, '[name]' opens a section,
    /// and everything else must be a key=value pair within a section.
    /// Any malformed line fails with a Format error naming the 1-origin
    /// line number.
    pub fn parse(content: &str) -> Result<Ini> {
        let mut sections: Vec<Section> = vec![];
        // Index into sections of the section opened most recently.
        let mut current: Option<usize> = None;

        for (idx, raw_line) in content.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line.starts_with('[') {
                if !line.ends_with(']') {
                    return Err(Error::Format(format_err!(
                        "ini section should end with ] at line {}: {}",
                        line_no,
                        raw_line
                    )));
                }

                let name = line[1..line.len() - 1].trim();

                if name.is_empty() {
                    return Err(Error::Format(format_err!(
                        "ini section name is empty at line {}: {}",
                        line_no,
                        raw_line
                    )));
                }

                // A section may be reopened; keys accumulate into the
                // original entry.
                current = Some(match sections.iter().position(|s| s.name == name) {
                    Some(pos) => pos,
                    None => {
                        sections.push(Section {
                            name: name.to_owned(),
                            keys: vec![],
                        });
                        sections.len() - 1
                    }
                });

                continue;
            }

            let section = match current {
                Some(pos) => &mut sections[pos],
                None => {
                    return Err(Error::Format(format_err!(
                        "key/value found outside of section at line {}: {}",
                        line_no,
                        raw_line
                    )));
                }
            };

            let equal_idx = match line.find('=') {
                Some(equal_idx) => equal_idx,
                None => {
                    return Err(Error::Format(format_err!(
                        "missing '=' in key/value at line {}: {}",
                        line_no,
                        raw_line
                    )));
                }
            };

            let key = line[..equal_idx].trim();
            let value = line[equal_idx + 1..].trim();

            if key.is_empty() {
                return Err(Error::Format(format_err!(
                    "key is zero-length at line {}: {}",
                    line_no,
                    raw_line
                )));
            }

            match section.keys.iter_mut().find(|k| k.name == key) {
                Some(key) => key.values.push(value.to_owned()),
                None => section.keys.push(Key {
                    name: key.to_owned(),
                    values: vec![value.to_owned()],
                }),
            }
        }

        Ok(Ini { sections: sections })
    }

    fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    fn key(&self, section: &str, key: &str) -> Option<&Key> {
        self.section(section)
            .and_then(|s| s.keys.iter().find(|k| k.name == key))
    }

    /// List the keys of the given section, in order of first appearance.
    /// A missing section yields an empty list.
    pub fn section_key_list(&self, section: &str) -> Vec<&str> {
        match self.section(section) {
            None => vec![],
            Some(section) => section.keys.iter().map(|k| k.name.as_str()).collect(),
        }
    }

    /// Returns whether the given key was repeated within its section
    /// (i.e., whether its value is a list).
    pub fn section_key_is_list(&self, section: &str, key: &str) -> bool {
        self.key(section, key).map_or(false, |k| k.values.len() > 1)
    }

    /// Get the value of a single-valued key. For a list key this returns
    /// the first value; callers interested in lists should check
    /// section_key_is_list first and use get_list.
    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.key(section, key).map(|k| k.values[0].as_str())
    }

    /// Get all values of a key, in file order.
    pub fn get_list(&self, section: &str, key: &str) -> Option<Vec<&str>> {
        self.key(section, key)
            .map(|k| k.values.iter().map(|v| v.as_str()).collect())
    }
}
