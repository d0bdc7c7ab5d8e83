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

/// file implements the configuration file loading policy: which file(s)
/// to read, when a missing file is an error, and how include files are
/// accumulated.
pub mod file;
/// parse implements the five parse phases: command-line scan,
/// environment scan, file application, group compaction, and the final
/// resolve/validate pass.
pub mod parse;
/// size parses size values with binary qualifiers (e.g. "2GB") into
/// bytes.
pub mod size;
/// spec holds the generated command and option metadata consumed
/// read-only by the parser.
pub mod spec;
/// value defines the resolved option values and the immutable Config
/// produced by a successful parse.
pub mod value;

// Re-export the most commonly used symbols, so most users of this module
// can just do "use pgbackrest::config::*;" and get the right thing.

pub use self::parse::{parse, parse_process};
pub use self::spec::{Cmd, Opt, OptGroup, Role};
pub use self::value::{Config, Source, Value};
