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

#![deny(
    anonymous_parameters,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces
)]
#![warn(bare_trait_objects, missing_docs, unreachable_pub, unused_qualifications)]

//! pgbackrest is a backup and restore tool for PostgreSQL clusters. This
// crate contains the configuration subsystem: command-line arguments, the
// process environment and on-disk configuration files are merged, in that
// order of precedence, into a single validated Config which the command
// dispatcher consumes.

#[macro_use]
extern crate failure;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

/// The config module parses and validates configuration from the command
/// line, the environment and configuration files, and exposes the result
/// through the Config structure.
pub mod config;
/// error defines error types specific to pgbackrest, covering both user
/// input problems and errors from underlying libraries.
pub mod error;
/// fs provides the small filesystem surface the configuration loader
/// needs, on top of what is available in std.
pub mod fs;
/// ini implements the configuration file tokenizer: sections, key/value
/// pairs and repeated-key lists.
pub mod ini;
/// logging provides a Logger implementation suitable for a command-line
/// tool, plus parsing for the log level option values.
pub mod logging;
/// testing provides utilities which are useful for unit testing real
/// production code.
pub mod testing;
