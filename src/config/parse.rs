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

//! Command and option parsing. Parsing runs in five phases: the
// command-line scan, the environment scan, configuration file
// application, group index compaction, and the resolve/validate pass
// which commits final values into the Config. Values stay raw strings
// until the final phase so diagnostics can quote exactly what the user
// typed.

use crate::config::file;
use crate::config::size::parse_size;
use crate::config::spec::{
    self, Cmd, Depend, Opt, OptionName, OptionSection, OptionSpec, OptionType, Role,
    OPTION_GROUP_TOTAL, OPTION_SPECS, OPTION_TOTAL,
};
use crate::config::value::{Config, ConfigOptionGroup, OptionValue, Source, Value};
use crate::error::*;
use crate::ini::Ini;
use crate::logging;
use std::collections::HashMap;

/// Prefix for environment variables.
const ENV_PREFIX: &str = "PGBACKREST_";

/// A single option as collected from one of the three sources, still in
/// raw string form.
#[derive(Debug, Clone, Default)]
pub(crate) struct ParseOptionValue {
    pub(crate) found: bool,
    pub(crate) negate: bool,
    pub(crate) reset: bool,
    pub(crate) source: Source,
    pub(crate) value_list: Vec<String>,
}

#[derive(Debug, Default)]
struct ParseOption {
    /// Values per staging slot (raw index - 1 for group members, always
    /// slot 0 otherwise). Grown on demand; gaps stay default until
    /// compaction.
    index_list: Vec<ParseOptionValue>,
}

/// Staging storage for all options found in the command line, the
/// environment and the configuration files.
pub(crate) struct ParseOptionTable {
    options: Vec<ParseOption>,
}

impl ParseOptionTable {
    pub(crate) fn new() -> ParseOptionTable {
        ParseOptionTable {
            options: (0..OPTION_TOTAL).map(|_| ParseOption::default()).collect(),
        }
    }

    pub(crate) fn get(&self, option: Opt, slot: usize) -> Option<&ParseOptionValue> {
        self.options[option.id()].index_list.get(slot)
    }

    pub(crate) fn get_mut(&mut self, option: Opt, slot: usize) -> &mut ParseOptionValue {
        let index_list = &mut self.options[option.id()].index_list;
        if index_list.len() <= slot {
            index_list.resize(slot + 1, ParseOptionValue::default());
        }
        &mut index_list[slot]
    }

    fn slots(&self, option: Opt) -> &[ParseOptionValue] {
        &self.options[option.id()].index_list
    }

    /// Whether anything was collected for the option at any index.
    fn touched(&self, option: Opt) -> bool {
        !self.options[option.id()].index_list.is_empty()
    }
}

/// The staging slot for a name row: group members use their raw index
/// less one, everything else slot 0.
fn staging_slot(spec: &OptionSpec, index: usize) -> usize {
    match spec.group {
        Some(_) => index - 1,
        None => 0,
    }
}

/// Split a command token into command and role. A single colon separates
/// an optional role suffix; anything else is part of the command name.
fn command_and_role(token: &str) -> Result<(Cmd, Role)> {
    if let Some(command) = Cmd::from_name(token) {
        return Ok((command, Role::Default));
    }

    let part: Vec<&str> = token.split(':').collect();

    if part.len() == 2 {
        if let Some(command) = Cmd::from_name(part[0]) {
            let role = match Role::from_name(part[1]) {
                Some(role) => role,
                None => {
                    return Err(Error::CommandInvalid(format_err!(
                        "invalid command role '{}'",
                        part[1]
                    )));
                }
            };

            return Ok((command, role));
        }
    }

    Err(Error::CommandInvalid(format_err!(
        "invalid command '{}'",
        token
    )))
}

/// Record one command-line option occurrence into the staging table,
/// enforcing the negate/reset/set conflict rules.
fn apply_arg_option(
    options: &mut ParseOptionTable,
    deprecations: &mut Vec<String>,
    row: &OptionName,
    arg_value: Option<String>,
) -> Result<()> {
    let spec = row.option.spec();

    // Secure options cannot be passed on the command line.
    if spec.secure {
        return Err(Error::OptionInvalid(format_err!(
            "option '{}' is not allowed on the command-line\n\
             HINT: this option could expose secrets in the process list.\n\
             HINT: specify the option in a configuration file or an environment variable instead.",
            row.option.idx_name(row.index)
        )));
    }

    if row.deprecated {
        deprecations.push(format!(
            "option '{}' is deprecated and will be removed in a future release, use '{}' instead",
            row.name,
            row.option.idx_name(row.index)
        ));
    }

    let value = options.get_mut(row.option, staging_slot(spec, row.index));

    if !value.found {
        value.found = true;
        value.negate = row.negate;
        value.reset = row.reset;
        value.source = Source::Param;

        if let Some(arg_value) = arg_value {
            value.value_list.push(arg_value);
        }

        return Ok(());
    }

    let name = row.option.idx_name(row.index);

    // It probably wouldn't hurt anything to accept repeated negation,
    // but there's no point in allowing the user to be sloppy.
    if value.negate && row.negate {
        return Err(Error::OptionInvalid(format_err!(
            "option '{}' is negated multiple times",
            name
        )));
    }

    if value.reset && row.reset {
        return Err(Error::OptionInvalid(format_err!(
            "option '{}' is reset multiple times",
            name
        )));
    }

    if (value.reset && row.negate) || (value.negate && row.reset) {
        return Err(Error::OptionInvalid(format_err!(
            "option '{}' cannot be negated and reset",
            name
        )));
    }

    if value.negate != row.negate {
        return Err(Error::OptionInvalid(format_err!(
            "option '{}' cannot be set and negated",
            name
        )));
    }

    if value.reset != row.reset {
        return Err(Error::OptionInvalid(format_err!(
            "option '{}' cannot be set and reset",
            name
        )));
    }

    match arg_value {
        Some(arg_value) if row.has_arg && spec.multi() => {
            value.value_list.push(arg_value);
            Ok(())
        }
        _ => Err(Error::OptionInvalid(format_err!(
            "option '{}' cannot be set multiple times",
            name
        ))),
    }
}

/// Phase 2: look for options in the environment. Anything the command
/// line already set wins; malformed names warn and are skipped.
fn apply_env(
    env: &[(String, String)],
    options: &mut ParseOptionTable,
    command: Cmd,
) -> Result<()> {
    for (env_key, env_value) in env {
        if !env_key.starts_with(ENV_PREFIX) {
            continue;
        }

        let key = env_key[ENV_PREFIX.len()..].to_lowercase().replace('_', "-");

        let row = match spec::option_find(&key) {
            Some(row) => row,
            None => {
                warn!("environment contains invalid option '{}'", key);
                continue;
            }
        };

        if row.negate {
            warn!("environment contains invalid negate option '{}'", key);
            continue;
        }

        if row.reset {
            warn!("environment contains invalid reset option '{}'", key);
            continue;
        }

        let spec = row.option.spec();

        if !spec.valid_for(command) {
            continue;
        }

        if env_value.is_empty() {
            return Err(Error::OptionInvalidValue(format_err!(
                "environment variable '{}' must have a value",
                key
            )));
        }

        let slot = staging_slot(spec, row.index);

        // The command line takes precedence.
        if options.get(row.option, slot).map_or(false, |v| v.found) {
            continue;
        }

        let value = options.get_mut(row.option, slot);
        value.found = true;
        value.source = Source::Config;

        if spec.option_type == OptionType::Boolean {
            if env_value == "n" {
                value.negate = true;
            } else if env_value != "y" {
                return Err(Error::OptionInvalidValue(format_err!(
                    "environment boolean option '{}' must be 'y' or 'n'",
                    key
                )));
            }
        } else if spec.multi() {
            value.value_list = env_value.split(':').map(|v| v.to_owned()).collect();
        } else {
            value.value_list.push(env_value.clone());
        }
    }

    Ok(())
}

/// Phase 3: apply the assembled configuration file contents. Sections
/// are searched from most to least specific and the first section to
/// provide an option wins; anything already set from the command line or
/// environment is left alone.
fn apply_file(contents: &str, options: &mut ParseOptionTable, command: Cmd) -> Result<()> {
    let ini = Ini::parse(contents)?;

    let stanza: Option<String> = options
        .get(Opt::Stanza, 0)
        .filter(|value| value.found)
        .and_then(|value| value.value_list.first())
        .cloned();

    // Build the list of sections to search for options.
    let mut section_list: Vec<String> = vec![];

    if let Some(stanza) = &stanza {
        section_list.push(format!("{}:{}", stanza, command.name()));
        section_list.push(stanza.clone());
    }

    section_list.push(format!("global:{}", command.name()));
    section_list.push("global".to_owned());

    for section in &section_list {
        let key_list: Vec<String> = ini
            .section_key_list(section)
            .iter()
            .map(|key| key.to_string())
            .collect();

        // First name seen for each (option, index), to catch the same
        // option appearing under an alternate name.
        let mut option_found: HashMap<(usize, usize), String> = HashMap::new();

        for key in &key_list {
            let row = match spec::option_find(key) {
                Some(row) => row,
                None => {
                    warn!("configuration file contains invalid option '{}'", key);
                    continue;
                }
            };

            if row.negate {
                warn!("configuration file contains negate option '{}'", key);
                continue;
            }

            if row.reset {
                warn!("configuration file contains reset option '{}'", key);
                continue;
            }

            let spec = row.option.spec();

            if spec.section == OptionSection::CommandLine {
                warn!(
                    "configuration file contains command-line only option '{}'",
                    key
                );
                continue;
            }

            match option_found.get(&(row.option.id(), row.index)) {
                Some(first) => {
                    return Err(Error::OptionInvalid(format_err!(
                        "configuration file contains duplicate options ('{}', '{}') in section '[{}]'",
                        first,
                        key,
                        section
                    )));
                }
                None => {
                    option_found.insert((row.option.id(), row.index), key.clone());
                }
            }

            if !spec.valid_for(command) {
                // Only warn in a command-specific section; in the
                // generic sections the option may be there for another
                // command.
                if section.contains(':') {
                    warn!(
                        "configuration file contains option '{}' invalid for section '{}'",
                        key, section
                    );
                }

                continue;
            }

            if spec.section == OptionSection::Stanza && section.starts_with("global") {
                warn!(
                    "configuration file contains stanza-only option '{}' in global section '{}'",
                    key, section
                );
                continue;
            }

            let slot = staging_slot(spec, row.index);

            // Skip if set on the command line, in the environment, or by
            // an earlier section.
            if options.get(row.option, slot).map_or(false, |v| v.found) {
                continue;
            }

            if ini.section_key_is_list(section, key) {
                if !spec.multi() {
                    return Err(Error::OptionInvalid(format_err!(
                        "option '{}' cannot be set multiple times",
                        row.option.idx_name(row.index)
                    )));
                }

                let list: Vec<String> = match ini.get_list(section, key) {
                    Some(list) => list.iter().map(|v| v.to_string()).collect(),
                    None => vec![],
                };

                let value = options.get_mut(row.option, slot);
                value.found = true;
                value.source = Source::Config;
                value.value_list = list;
            } else {
                let ini_value = match ini.get(section, key) {
                    Some(ini_value) => ini_value.to_owned(),
                    None => continue,
                };

                if ini_value.is_empty() {
                    return Err(Error::OptionInvalidValue(format_err!(
                        "section '{}', key '{}' must have a value",
                        section,
                        key
                    )));
                }

                let value = options.get_mut(row.option, slot);
                value.found = true;
                value.source = Source::Config;

                if spec.option_type == OptionType::Boolean {
                    if ini_value == "n" {
                        value.negate = true;
                    } else if ini_value != "y" {
                        return Err(Error::OptionInvalidValue(format_err!(
                            "boolean option '{}' must be 'y' or 'n'",
                            key
                        )));
                    }
                } else {
                    value.value_list.push(ini_value);
                }
            }
        }
    }

    Ok(())
}

/// The user-visible name of an option at the first index it was actually
/// set at, for diagnostics about the option as a whole.
fn first_found_name(options: &ParseOptionTable, spec: &OptionSpec) -> String {
    let raw = options
        .slots(spec.option)
        .iter()
        .position(|value| value.found)
        .map_or(
            match spec.group {
                Some(_) => 1,
                None => 0,
            },
            |slot| match spec.group {
                Some(_) => slot + 1,
                None => 0,
            },
        );

    spec.option.idx_name(raw)
}

/// Phase 4: mark option validity, reject invalid command-line options,
/// and compact each group's discovered raw indexes into a dense external
/// ordering.
fn build_config_options(
    config: &mut Config,
    options: &ParseOptionTable,
    command: Cmd,
) -> Result<()> {
    let mut group_index_map =
        vec![vec![false; spec::OPTION_INDEX_MAX]; OPTION_GROUP_TOTAL];

    for spec in OPTION_SPECS {
        if spec.valid_for(command) {
            config.options[spec.option.id()].valid = true;
        } else {
            // Error if the invalid option was explicitly set on the
            // command line. The environment and file scans skip invalid
            // options, so anything staged here came from the command
            // line.
            if options.touched(spec.option) {
                return Err(Error::OptionInvalid(format_err!(
                    "option '{}' not valid for command '{}'",
                    first_found_name(options, spec),
                    command.name()
                )));
            }

            continue;
        }

        if let Some(group) = spec.group {
            for (slot, value) in options.slots(spec.option).iter().enumerate() {
                if value.found {
                    group_index_map[group.id()][slot] = true;
                }
            }
        }
    }

    // Write the raw indexes into each group in ascending order. A group
    // nothing was set in still gets one index so required options are
    // validated.
    for (group_id, map) in group_index_map.iter().enumerate() {
        let mut index: Vec<usize> = map
            .iter()
            .enumerate()
            .filter(|(_, marked)| **marked)
            .map(|(slot, _)| slot + 1)
            .collect();

        if index.is_empty() {
            index.push(1);
        }

        config.groups[group_id] = ConfigOptionGroup {
            index_total: index.len(),
            index: index,
        };
    }

    // Size each valid option's output list now that group totals are
    // known.
    for spec in OPTION_SPECS {
        if config.options[spec.option.id()].valid {
            let index_total = match spec.group {
                Some(group) => config.groups[group.id()].index_total,
                None => 1,
            };

            config.options[spec.option.id()].index = vec![OptionValue::default(); index_total];
        }
    }

    Ok(())
}

/// Convert a compiled-in default to its resolved value. Defaults are
/// part of the option schema, so a malformed one is a programmer error.
fn default_to_value(spec: &OptionSpec, default: &str) -> Result<Value> {
    Ok(match spec.option_type {
        OptionType::Boolean => Value::Bool(default == "y"),
        OptionType::Integer => match default.parse() {
            Ok(value) => Value::Int(value),
            Err(_) => {
                return Err(Error::Assert(format_err!(
                    "invalid integer default '{}' for option '{}'",
                    default,
                    spec.name
                )));
            }
        },
        OptionType::Float => match default.parse() {
            Ok(value) => Value::Float(value),
            Err(_) => {
                return Err(Error::Assert(format_err!(
                    "invalid float default '{}' for option '{}'",
                    default,
                    spec.name
                )));
            }
        },
        OptionType::Size => Value::Int(parse_size(default)? as i64),
        OptionType::String | OptionType::Path => Value::Str(default.to_owned()),
        OptionType::List | OptionType::Hash => {
            return Err(Error::Assert(format_err!(
                "option '{}' may not have a default",
                spec.name
            )));
        }
    })
}

/// The resolved value of a depend target as a comparison string:
/// booleans become "0"/"1", strings and paths are themselves.
fn depend_value_str(value: Option<&Value>) -> Option<String> {
    match value {
        None => None,
        Some(Value::Bool(value)) => Some(if *value { "1" } else { "0" }.to_owned()),
        Some(Value::Str(value)) => Some(value.clone()),
        // Depend targets are restricted to boolean/string/path types by
        // the schema.
        Some(_) => None,
    }
}

/// Build the error for an option whose depend target resolved outside
/// the allowed value list.
fn depend_error(
    option_name: String,
    depend: &Depend,
    depend_name: String,
) -> Error {
    let depend_spec = depend.option.spec();
    let mut depend_name = depend_name;
    let mut value_list: Vec<String> = vec![];

    for allowed in depend.values {
        if depend_spec.option_type == OptionType::Boolean {
            // Boolean depends name the no- form when the option must be
            // unset.
            if *allowed == "0" {
                depend_name = format!("no-{}", depend_name);
            }
        } else {
            value_list.push(format!("'{}'", allowed));
        }
    }

    let error_value = match value_list.len() {
        0 => String::new(),
        1 => format!(" = {}", value_list[0]),
        _ => format!(" in ({})", value_list.join(", ")),
    };

    Error::OptionInvalid(format_err!(
        "option '{}' not valid without option '{}'{}",
        option_name,
        depend_name,
        error_value
    ))
}

/// Phase 5: resolve and validate every option in dependency order and
/// commit the final values.
fn resolve(config: &mut Config, options: &ParseOptionTable, command: Cmd) -> Result<()> {
    let unfound = ParseOptionValue::default();

    for &option in spec::RESOLVE_ORDER.iter() {
        let spec = option.spec();

        if !config.options[option.id()].valid {
            continue;
        }

        let index_total = match spec.group {
            Some(group) => config.groups[group.id()].index_total,
            None => 1,
        };

        for index in 0..index_total {
            let raw = match spec.group {
                Some(group) => config.groups[group.id()].index[index],
                None => 0,
            };

            let slot = match spec.group {
                Some(_) => raw - 1,
                None => 0,
            };

            let parse_value = options.get(option, slot).unwrap_or(&unfound);

            let option_set = parse_value.found
                && (spec.option_type == OptionType::Boolean || !parse_value.negate)
                && !parse_value.reset;

            config.options[option.id()].index[index].negate = parse_value.negate;
            config.options[option.id()].index[index].reset = parse_value.reset;

            // Check option dependencies.
            let mut depend_resolved = true;

            if let Some(depend) = &spec.depend {
                let depend_spec = depend.option.spec();

                // A depend target in the same group is read at the same
                // external index; anything else at the first.
                let depend_index = match (spec.group, depend_spec.group) {
                    (Some(group), Some(depend_group)) if group == depend_group => index,
                    _ => 0,
                };

                let depend_raw = match depend_spec.group {
                    Some(group) => config.groups[group.id()].index[depend_index],
                    None => 0,
                };

                let depend_value = if config.options[depend.option.id()].valid {
                    depend_value_str(
                        config.options[depend.option.id()].index[depend_index]
                            .value
                            .as_ref(),
                    )
                } else {
                    None
                };

                match depend_value {
                    // Can't resolve if the depend option value is null.
                    None => {
                        depend_resolved = false;

                        if option_set && parse_value.source == Source::Param {
                            return Err(Error::OptionInvalid(format_err!(
                                "option '{}' not valid without option '{}'",
                                option.idx_name(raw),
                                depend.option.idx_name(depend_raw)
                            )));
                        }
                    }
                    Some(depend_value) => {
                        // If a depend list exists, make sure the value
                        // is in the list.
                        if !depend.values.is_empty() {
                            depend_resolved =
                                depend.values.contains(&depend_value.as_str());

                            // It's OK to have unresolved options in the
                            // config file because they may be there for
                            // another command. For instance, spool-path
                            // is only loaded for archive-push when
                            // archive-async=y, and its presence in the
                            // file should not cause an error here, it
                            // will just end up null.
                            if !depend_resolved
                                && option_set
                                && parse_value.source == Source::Param
                            {
                                return Err(depend_error(
                                    option.idx_name(raw),
                                    depend,
                                    depend.option.idx_name(depend_raw),
                                ));
                            }
                        }
                    }
                }
            }

            if !depend_resolved {
                continue;
            }

            if option_set {
                let committed = resolve_value(spec, option, raw, parse_value)?;
                let record = &mut config.options[option.id()].index[index];
                record.value = Some(committed);
                record.source = parse_value.source;
            } else if parse_value.negate {
                // An explicit negation suppresses any default.
                let record = &mut config.options[option.id()].index[index];
                record.value = None;
                record.source = parse_value.source;
            } else if let Some(default) = spec.default {
                let record = &mut config.options[option.id()].index[index];
                record.value = Some(default_to_value(spec, default)?);
                record.source = Source::Default;
            } else if spec.required_for(command) && !config.help {
                let hint = match spec.section {
                    OptionSection::Stanza => "\nHINT: does this stanza exist?",
                    _ => "",
                };

                return Err(Error::OptionRequired(format_err!(
                    "{} command requires option: {}{}",
                    command.name(),
                    option.idx_name(raw),
                    hint
                )));
            }
        }
    }

    Ok(())
}

/// Validate and convert one set option value according to its type.
fn resolve_value(
    spec: &OptionSpec,
    option: Opt,
    raw: usize,
    parse_value: &ParseOptionValue,
) -> Result<Value> {
    let name = option.idx_name(raw);

    Ok(match spec.option_type {
        OptionType::Boolean => Value::Bool(!parse_value.negate),
        OptionType::Hash => {
            let mut hash: HashMap<String, String> = HashMap::new();

            for pair in &parse_value.value_list {
                match pair.find('=') {
                    None => {
                        return Err(Error::OptionInvalid(format_err!(
                            "key/value '{}' not valid for '{}' option",
                            pair,
                            name
                        )));
                    }
                    Some(equal_idx) => {
                        hash.insert(
                            pair[..equal_idx].to_owned(),
                            pair[equal_idx + 1..].to_owned(),
                        );
                    }
                }
            }

            Value::Hash(hash)
        }
        OptionType::List => Value::List(parse_value.value_list.clone()),
        OptionType::Integer | OptionType::Float | OptionType::Size => {
            let raw_value = match parse_value.value_list.first() {
                Some(raw_value) => raw_value,
                None => {
                    return Err(Error::Assert(format_err!(
                        "option '{}' is set but has no value",
                        name
                    )));
                }
            };

            // Check that the value can be converted.
            let (value_dbl, value) = match spec.option_type {
                OptionType::Integer => match raw_value.parse::<i64>() {
                    Ok(value) => (value as f64, Value::Int(value)),
                    Err(_) => {
                        return Err(Error::OptionInvalidValue(format_err!(
                            "'{}' is not valid for '{}' option",
                            raw_value,
                            name
                        )));
                    }
                },
                OptionType::Size => match parse_size(raw_value) {
                    Ok(value) => (value, Value::Int(value as i64)),
                    Err(_) => {
                        return Err(Error::OptionInvalidValue(format_err!(
                            "'{}' is not valid for '{}' option",
                            raw_value,
                            name
                        )));
                    }
                },
                _ => match raw_value.parse::<f64>() {
                    Ok(value) => (value, Value::Float(value)),
                    Err(_) => {
                        return Err(Error::OptionInvalidValue(format_err!(
                            "'{}' is not valid for '{}' option",
                            raw_value,
                            name
                        )));
                    }
                },
            };

            if let Some((min, max)) = spec.allow_range {
                if value_dbl < min || value_dbl > max {
                    return Err(Error::OptionInvalidValue(format_err!(
                        "'{}' is out of range for '{}' option",
                        raw_value,
                        name
                    )));
                }
            }

            if !spec.allow_list.is_empty() && !spec.allow_list.contains(&raw_value.as_str()) {
                return Err(Error::OptionInvalidValue(format_err!(
                    "'{}' is not allowed for '{}' option",
                    raw_value,
                    name
                )));
            }

            value
        }
        OptionType::String | OptionType::Path => {
            let mut value = match parse_value.value_list.first() {
                Some(value) => value.clone(),
                None => {
                    return Err(Error::Assert(format_err!(
                        "option '{}' is set but has no value",
                        name
                    )));
                }
            };

            if spec.option_type == OptionType::Path {
                if value.is_empty() {
                    return Err(Error::OptionInvalidValue(format_err!(
                        "'{}' must be >= 1 character for '{}' option",
                        value,
                        name
                    )));
                }

                if !value.starts_with('/') {
                    return Err(Error::OptionInvalidValue(format_err!(
                        "'{}' must begin with / for '{}' option",
                        value,
                        name
                    )));
                }

                if value.contains("//") {
                    return Err(Error::OptionInvalidValue(format_err!(
                        "'{}' cannot contain // for '{}' option",
                        value,
                        name
                    )));
                }

                // Strip a trailing / unless the value is just /.
                if value.ends_with('/') && value.len() != 1 {
                    value.truncate(value.len() - 1);
                }
            }

            if !spec.allow_list.is_empty() && !spec.allow_list.contains(&value.as_str()) {
                return Err(Error::OptionInvalidValue(format_err!(
                    "'{}' is not allowed for '{}' option",
                    value,
                    name
                )));
            }

            Value::Str(value)
        }
    })
}

/// Parse the command line, the environment and the configuration files
/// into a Config.
///
/// The environment is passed explicitly as ordered key/value pairs so
/// callers (tests in particular) control exactly what the parser sees.
/// When reset_log_level is set, logging is initialized at WARN before
/// the environment and file scans so their warnings reach the user
/// (except for the local and remote roles, whose logging is managed by
/// the coordinating process).
pub fn parse(args: &[String], env: &[(String, String)], reset_log_level: bool) -> Result<Config> {
    let exe = match args.first() {
        Some(exe) => exe.clone(),
        None => {
            return Err(Error::Assert(format_err!(
                "parse called with empty argument list"
            )));
        }
    };

    let mut config = Config::new(exe);
    let mut options = ParseOptionTable::new();
    let mut params: Vec<String> = vec![];
    let mut deprecations: Vec<String> = vec![];

    // Phase 1: parse command line parameters.
    let mut command_set = false;
    let mut arg_found = false;
    let mut only_params = false;
    let mut arg_idx = 1;

    while arg_idx < args.len() {
        let arg = &args[arg_idx];
        arg_idx += 1;

        if !only_params && arg == "--" {
            only_params = true;
            continue;
        }

        arg_found = true;

        // Commands and parameters passed to commands.
        if only_params || !arg.starts_with('-') || arg == "-" {
            if !command_set {
                let (command, role) = command_and_role(arg)?;

                config.role = role;

                // Only the first non-option is the command, except that
                // help leaves the slot open so "help <command>" works.
                if command == Cmd::Help {
                    config.help = true;
                    config.command = Cmd::Help;
                } else {
                    config.command = command;
                    command_set = true;
                }
            } else {
                params.push(arg.clone());
            }

            continue;
        }

        if arg.starts_with("--") {
            let body = &arg[2..];

            let (name, inline_value) = match body.find('=') {
                Some(equal_idx) => (
                    &body[..equal_idx],
                    Some(body[equal_idx + 1..].to_owned()),
                ),
                None => (body, None),
            };

            let row = match spec::option_find(name) {
                Some(row) => row,
                None => {
                    return Err(Error::OptionInvalid(format_err!(
                        "invalid option '{}'",
                        arg
                    )));
                }
            };

            // A flag that takes no argument cannot be given one inline.
            if !row.has_arg && inline_value.is_some() {
                return Err(Error::OptionInvalid(format_err!(
                    "invalid option '{}'",
                    arg
                )));
            }

            let arg_value = match row.has_arg {
                false => None,
                true => match inline_value {
                    Some(inline_value) => Some(inline_value),
                    // The next argument is consumed as the value whether
                    // or not it looks like an option.
                    None => match args.get(arg_idx) {
                        Some(next) => {
                            arg_idx += 1;
                            Some(next.clone())
                        }
                        None => {
                            return Err(Error::OptionInvalid(format_err!(
                                "option '{}' requires argument",
                                arg
                            )));
                        }
                    },
                },
            };

            apply_arg_option(&mut options, &mut deprecations, row, arg_value)?;
        } else {
            // No short option aliases are declared in the schema.
            return Err(Error::OptionInvalid(format_err!(
                "invalid option '{}'",
                arg
            )));
        }
    }

    // Handle command not found.
    if !command_set && !config.help {
        // If there are args then error, otherwise help is implied.
        if arg_found {
            return Err(Error::CommandRequired(format_err!("no command found")));
        }

        config.help = true;
    }

    // Set command params.
    if !params.is_empty() {
        if !config.help && !config.command.parameter_allowed() {
            return Err(Error::ParamInvalid(format_err!(
                "command does not allow parameters"
            )));
        }

        config.params = params;
    }

    // Enable logging (except for the local and remote roles) so config
    // file warnings will be output.
    if reset_log_level && config.role != Role::Local && config.role != Role::Remote {
        logging::init_for_parse();
    }

    for deprecation in &deprecations {
        warn!("{}", deprecation);
    }

    // Only continue if options need to be validated, i.e. a real command
    // is running.
    if config.command != Cmd::None
        && config.command != Cmd::Help
        && config.command != Cmd::Version
    {
        let command = config.command;

        // Phase 2: parse environment variables.
        apply_env(env, &mut options, command)?;

        // Phase 3: parse config file unless --no-config was passed.
        let contents = file::load(
            &options,
            spec::CONFIG_DEFAULT,
            spec::CONFIG_INCLUDE_PATH_DEFAULT,
            file::CONFIG_ORIG_PATH_FILE,
        )?;

        if let Some(contents) = contents {
            apply_file(&contents, &mut options, command)?;
        }

        // Phase 4: resolve indexed options for each group.
        build_config_options(&mut config, &options, command)?;

        // Phase 5: validate option definitions and load into the
        // configuration.
        resolve(&mut config, &options, command)?;
    }

    Ok(config)
}

/// Parse using this process's arguments and environment.
pub fn parse_process(reset_log_level: bool) -> Result<Config> {
    let args: Vec<String> = ::std::env::args().collect();
    let env: Vec<(String, String)> = ::std::env::vars().collect();

    parse(&args, &env, reset_log_level)
}
