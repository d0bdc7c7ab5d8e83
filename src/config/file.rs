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

//! Loading of the configuration file(s).
//
// Rules:
// - config and config-include-path are default. The config file will be
//   loaded, if it exists, and *.conf files in the config-include-path
//   will be appended, if they exist. A missing/empty dir is ignored,
//   except that the original default for the config file will be
//   attempted if the current default is not found.
// - config only is specified. Only the specified config file will be
//   loaded and is required. The default config-include-path is ignored.
// - config and config-path are specified. The specified config file will
//   be loaded and is required. The overridden default of the
//   config-include-path (<config-path>/conf.d) will be loaded if it
//   exists but is not required.
// - config-include-path only is specified. *.conf files in the
//   config-include-path will be loaded and the path is required to
//   exist. The default config will be loaded if it exists.
// - config-include-path and config-path are specified. The *.conf files
//   in the config-include-path will be loaded and the directory passed
//   must exist. The overridden default of the config file path
//   (<config-path>/pgbackrest.conf) will be loaded if it exists but is
//   not required.
// - If --no-config is specified and --config-include-path is specified
//   then only *.conf files in the config-include-path will be loaded;
//   the directory is required.
// - If --no-config is specified and --config-path is specified then only
//   *.conf files in the overridden default config-include-path
//   (<config-path>/conf.d) will be loaded if they exist but are not
//   required.
// - If --no-config is specified and neither --config-include-path nor
//   --config-path are specified then no configs will be loaded.
// - If --config-path only, the defaults for config and
//   config-include-path are rebased onto it, but the files are not
//   required to exist since this is a default override.

use crate::config::parse::ParseOptionTable;
use crate::config::spec::Opt;
use crate::error::*;
use crate::fs;
use crate::ini::Ini;
use regex::Regex;
use std::path::Path;

/// Path of the configuration file before the default moved under
/// /etc/pgbackrest. This is the sole legacy fallback.
pub const CONFIG_ORIG_PATH_FILE: &str = "/etc/pgbackrest.conf";

/// Name of the default configuration include directory.
const CONFIG_INCLUDE_DIR: &str = "conf.d";

/// Validate a single file's contents and append them to the assembled
/// configuration. A separator is always inserted first, since the
/// previous part may not have ended with a newline.
fn load_part(config: &mut Option<String>, part: Option<String>) -> Result<()> {
    if let Some(part) = part {
        if !part.is_empty() {
            // Parse the part so a syntax error names the file at fault
            // rather than surfacing later from the combined buffer.
            Ini::parse(&part)?;

            let config = config.get_or_insert_with(String::new);
            config.push('\n');
            config.push_str(&part);
        }
    }

    Ok(())
}

/// The file name component of a path (the path itself if it has none).
fn base_name(path: &str) -> &str {
    Path::new(path)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(path)
}

fn first_value(options: &ParseOptionTable, option: Opt) -> Option<&str> {
    options
        .get(option, 0)
        .filter(|value| value.found)
        .and_then(|value| value.value_list.first())
        .map(|value| value.as_str())
}

/// Load the configuration file(s) according to the rules above and
/// return the assembled contents, or None when nothing was loaded. The
/// defaults are passed in rather than read from the option table to
/// enable more complete test coverage.
pub(crate) fn load(
    options: &ParseOptionTable,
    config_default: &str,
    config_include_default: &str,
    orig_config_default: &str,
) -> Result<Option<String>> {
    let mut load_config = true;
    let mut load_config_include = true;

    // If an option was given on the command line the file it names is
    // required to exist, else it is optional.
    let mut config_required = options.get(Opt::Config, 0).map_or(false, |v| v.found);
    let config_path_required = options.get(Opt::ConfigPath, 0).map_or(false, |v| v.found);
    let mut config_include_required = options
        .get(Opt::ConfigIncludePath, 0)
        .map_or(false, |v| v.found);

    // Save the default so we can later determine whether the old
    // original default config path must be checked.
    let config_default_current = config_default.to_owned();

    // A config-path on the command line overrides the base path defaults
    // for config and config-include-path.
    let (config_default, config_include_default) = match first_value(options, Opt::ConfigPath) {
        Some(config_path) if config_path_required => (
            format!("{}/{}", config_path, base_name(&config_default_current)),
            format!("{}/{}", config_path, CONFIG_INCLUDE_DIR),
        ),
        _ => (
            config_default.to_owned(),
            config_include_default.to_owned(),
        ),
    };

    // If --no-config was passed then do not load the config file.
    if options.get(Opt::Config, 0).map_or(false, |v| v.negate) {
        load_config = false;
        config_required = false;
    }

    // If --config is specified but neither --config-include-path nor
    // --config-path are, do not attempt to load the include files.
    if config_required && !(config_path_required || config_include_required) {
        load_config_include = false;
        config_include_required = false;
    }

    let mut result: Option<String> = None;

    // Load the main config file.
    if load_config {
        let config_file_name = match first_value(options, Opt::Config) {
            Some(value) if config_required => value.to_owned(),
            _ => config_default.clone(),
        };

        match fs::read_to_string_opt(&config_file_name, !config_required)? {
            Some(buffer) => result = Some(buffer),
            None => {
                // If config is the current default and was not found,
                // attempt to load the config file from the old default
                // location.
                if config_file_name == config_default_current {
                    result = fs::read_to_string_opt(orig_config_default, !config_required)?;
                }
            }
        }
    }

    // Load *.conf files from the include directory.
    if load_config_include {
        // Validate the main file by parsing it before accumulating
        // include parts behind it.
        if let Some(result) = &result {
            Ini::parse(result)?;
        }

        let config_include_path = match first_value(options, Opt::ConfigIncludePath) {
            Some(value) if config_include_required => value.to_owned(),
            _ => config_include_default,
        };

        lazy_static! {
            static ref CONF_EXPRESSION: Regex = Regex::new(r".+\.conf$").unwrap();
        }

        let list = fs::list_matching(
            &config_include_path,
            &CONF_EXPRESSION,
            config_include_required,
        )?;

        if let Some(mut list) = list {
            // Sort the list for reproducibility only -- the sections are
            // searched by name, so semantics do not depend on the order.
            list.sort();

            for file_name in &list {
                load_part(
                    &mut result,
                    fs::read_to_string_opt(
                        &format!("{}/{}", config_include_path, file_name),
                        true,
                    )?,
                )?;
            }
        }
    }

    Ok(result)
}
