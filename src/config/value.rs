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

use crate::config::spec::{Cmd, Opt, OptGroup, Role, OPTION_GROUP_TOTAL, OPTION_TOTAL};
use std::collections::HashMap;

/// The provenance of a resolved option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// The compiled-in default.
    Default,
    /// The command line.
    Param,
    /// The environment or a configuration file.
    Config,
}

impl Default for Source {
    fn default() -> Self {
        Source::Default
    }
}

/// A resolved option value. The variant is determined by the option's
/// declared type, never by the input text.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<String>),
    Hash(HashMap<String, String>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(v) => Some(v.as_slice()),
            _ => None,
        }
    }

    pub fn as_hash(&self) -> Option<&HashMap<String, String>> {
        match self {
            Value::Hash(v) => Some(v),
            _ => None,
        }
    }
}

/// One resolved option value slot: the value (None when the option did
/// not resolve, e.g. an unmet dependency or an explicit negation), where
/// it came from, and the negate/reset modifiers seen during parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OptionValue {
    pub(crate) value: Option<Value>,
    pub(crate) source: Source,
    pub(crate) negate: bool,
    pub(crate) reset: bool,
}

impl OptionValue {
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn source(&self) -> Source {
        self.source
    }

    pub fn negate(&self) -> bool {
        self.negate
    }

    pub fn reset(&self) -> bool {
        self.reset
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ConfigOption {
    pub(crate) valid: bool,
    pub(crate) index: Vec<OptionValue>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ConfigOptionGroup {
    pub(crate) index_total: usize,
    /// Raw (1-origin) index for each dense external index, ascending.
    pub(crate) index: Vec<usize>,
}

/// The fully resolved configuration. Constructed once per process
/// invocation by config::parse and read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub(crate) exe: String,
    pub(crate) command: Cmd,
    pub(crate) role: Role,
    pub(crate) help: bool,
    pub(crate) params: Vec<String>,
    pub(crate) options: Vec<ConfigOption>,
    pub(crate) groups: Vec<ConfigOptionGroup>,
}

impl Config {
    pub(crate) fn new(exe: String) -> Config {
        Config {
            exe: exe,
            command: Cmd::None,
            role: Role::Default,
            help: false,
            params: vec![],
            options: vec![ConfigOption::default(); OPTION_TOTAL],
            groups: vec![ConfigOptionGroup::default(); OPTION_GROUP_TOTAL],
        }
    }

    /// The path this binary was invoked as.
    pub fn exe(&self) -> &str {
        &self.exe
    }

    pub fn command(&self) -> Cmd {
        self.command
    }

    pub fn command_role(&self) -> Role {
        self.role
    }

    /// Whether help was requested, either explicitly or by running with
    /// no arguments.
    pub fn command_help(&self) -> bool {
        self.help
    }

    /// Positional parameters given after the command.
    pub fn command_params(&self) -> &[String] {
        &self.params
    }

    /// Whether the option is valid for the parsed command. Values are
    /// only resolved for valid options.
    pub fn option_valid(&self, option: Opt) -> bool {
        self.options[option.id()].valid
    }

    /// The number of resolved indexes for the option: the group's index
    /// total for group members, 1 otherwise (0 when the option is not
    /// valid).
    pub fn option_index_total(&self, option: Opt) -> usize {
        self.options[option.id()].index.len()
    }

    /// The resolved record for the option at the given dense index, or
    /// None when the option is not valid for the command or the index is
    /// out of range.
    pub fn option_idx(&self, option: Opt, index: usize) -> Option<&OptionValue> {
        self.options[option.id()].index.get(index)
    }

    /// Convenience access to the resolved value at dense index 0.
    pub fn option(&self, option: Opt) -> Option<&Value> {
        self.option_idx(option, 0).and_then(|v| v.value())
    }

    pub fn option_str(&self, option: Opt) -> Option<&str> {
        self.option(option).and_then(|v| v.as_str())
    }

    pub fn option_bool(&self, option: Opt) -> Option<bool> {
        self.option(option).and_then(|v| v.as_bool())
    }

    pub fn option_int(&self, option: Opt) -> Option<i64> {
        self.option(option).and_then(|v| v.as_int())
    }

    pub fn option_float(&self, option: Opt) -> Option<f64> {
        self.option(option).and_then(|v| v.as_float())
    }

    /// The number of indexes in use for the group.
    pub fn group_index_total(&self, group: OptGroup) -> usize {
        self.groups[group.id()].index_total
    }

    /// The raw (1-origin) option index for a dense external group index.
    pub fn group_index(&self, group: OptGroup, index: usize) -> usize {
        self.groups[group.id()].index[index]
    }
}
