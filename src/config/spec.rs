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

//! The command and option metadata tables. These are maintained from the
// option schema and consumed read-only by the parser; nothing here
// carries parse state. Each literal flag name a user can type (canonical
// names per group index, no- and reset- forms, deprecated aliases) is
// expanded into its own OptionName row with explicit variant tags, so
// the scanners never re-derive structure from the name text.

/// Default path of the main configuration file.
pub const CONFIG_DEFAULT: &str = "/etc/pgbackrest/pgbackrest.conf";
/// Default path of the configuration include directory.
pub const CONFIG_INCLUDE_PATH_DEFAULT: &str = "/etc/pgbackrest/conf.d";

/// Cmd identifies a command. None means no command has been set (e.g.
/// plain "pgbackrest help").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cmd {
    None,
    ArchiveGet,
    ArchivePush,
    Backup,
    Check,
    Expire,
    Help,
    Info,
    Restore,
    StanzaCreate,
    StanzaDelete,
    StanzaUpgrade,
    Start,
    Stop,
    Version,
}

impl Cmd {
    /// The name of this command as the user types it.
    pub fn name(self) -> &'static str {
        match self {
            Cmd::None => "none",
            Cmd::ArchiveGet => "archive-get",
            Cmd::ArchivePush => "archive-push",
            Cmd::Backup => "backup",
            Cmd::Check => "check",
            Cmd::Expire => "expire",
            Cmd::Help => "help",
            Cmd::Info => "info",
            Cmd::Restore => "restore",
            Cmd::StanzaCreate => "stanza-create",
            Cmd::StanzaDelete => "stanza-delete",
            Cmd::StanzaUpgrade => "stanza-upgrade",
            Cmd::Start => "start",
            Cmd::Stop => "stop",
            Cmd::Version => "version",
        }
    }

    /// Look up a command by name. The internal None command is not a
    /// name users may type.
    pub fn from_name(name: &str) -> Option<Cmd> {
        Some(match name {
            "archive-get" => Cmd::ArchiveGet,
            "archive-push" => Cmd::ArchivePush,
            "backup" => Cmd::Backup,
            "check" => Cmd::Check,
            "expire" => Cmd::Expire,
            "help" => Cmd::Help,
            "info" => Cmd::Info,
            "restore" => Cmd::Restore,
            "stanza-create" => Cmd::StanzaCreate,
            "stanza-delete" => Cmd::StanzaDelete,
            "stanza-upgrade" => Cmd::StanzaUpgrade,
            "start" => Cmd::Start,
            "stop" => Cmd::Stop,
            "version" => Cmd::Version,
            _ => return None,
        })
    }

    /// Returns whether this command accepts positional parameters after
    /// the command name.
    pub fn parameter_allowed(self) -> bool {
        match self {
            Cmd::ArchiveGet | Cmd::ArchivePush | Cmd::Help => true,
            _ => false,
        }
    }
}

/// Role is a sub-mode of a command which changes logging and
/// coordination behavior, given as "command:role".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Default,
    Async,
    Local,
    Remote,
}

impl Role {
    pub fn name(self) -> &'static str {
        match self {
            Role::Default => "default",
            Role::Async => "async",
            Role::Local => "local",
            Role::Remote => "remote",
        }
    }

    /// Look up a role by suffix name. The default role has no suffix.
    pub fn from_name(name: &str) -> Option<Role> {
        Some(match name {
            "async" => Role::Async,
            "local" => Role::Local,
            "remote" => Role::Remote,
            _ => return None,
        })
    }
}

/// An option group collects indexed option peers, e.g. pg1-path and
/// pg2-path, which share metadata but carry independent values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptGroup {
    Pg,
    Repo,
}

/// Total number of option groups.
pub const OPTION_GROUP_TOTAL: usize = 2;

/// The largest index_max of any group.
pub const OPTION_INDEX_MAX: usize = 8;

impl OptGroup {
    pub fn id(self) -> usize {
        self as usize
    }

    /// The name prefix shared by the group's members ("pg" in
    /// "pg1-path").
    pub fn prefix(self) -> &'static str {
        match self {
            OptGroup::Pg => "pg",
            OptGroup::Repo => "repo",
        }
    }

    /// The highest raw index a member of this group may carry.
    pub fn index_max(self) -> usize {
        match self {
            OptGroup::Pg => 8,
            OptGroup::Repo => 4,
        }
    }
}

/// The configuration file section an option may be set from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionSection {
    /// The option may only be given on the command line (or in the
    /// environment); configuration files warn and skip it.
    CommandLine,
    /// The option may appear in global sections and stanza sections.
    Global,
    /// The option is only meaningful within a stanza section.
    Stanza,
}

/// The value type of an option, which selects the validation applied
/// during the resolve phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Boolean,
    Integer,
    Float,
    Size,
    String,
    Path,
    List,
    Hash,
}

impl OptionType {
    /// Multi-valued types may be repeated on the command line and may be
    /// given as lists in the environment and in configuration files.
    pub fn multi(self) -> bool {
        match self {
            OptionType::List | OptionType::Hash => true,
            _ => false,
        }
    }
}

/// A dependency of one option upon another. When the values list is
/// empty, the target merely has to resolve to a value; otherwise the
/// target's resolved value must be in the list (booleans are compared as
/// "0"/"1").
#[derive(Debug)]
pub struct Depend {
    pub option: Opt,
    pub values: &'static [&'static str],
}

/// The static metadata of a single option.
#[derive(Debug)]
pub struct OptionSpec {
    pub option: Opt,
    /// Canonical name. Group members store the unindexed stem, e.g.
    /// "pg-path"; Opt::idx_name produces the user-visible form.
    pub name: &'static str,
    pub group: Option<OptGroup>,
    pub section: OptionSection,
    pub option_type: OptionType,
    /// Secure options may not appear on the command line, where they
    /// would be visible in the process list.
    pub secure: bool,
    /// Whether a no- form exists. True for booleans and for the config
    /// option, whose negation suppresses file loading.
    pub negatable: bool,
    pub default: Option<&'static str>,
    pub allow_list: &'static [&'static str],
    pub allow_range: Option<(f64, f64)>,
    pub depend: Option<Depend>,
    /// Commands the option is valid for.
    pub commands: &'static [Cmd],
    /// Commands the option must resolve a value for.
    pub required: &'static [Cmd],
}

impl OptionSpec {
    pub fn valid_for(&self, command: Cmd) -> bool {
        self.commands.contains(&command)
    }

    pub fn required_for(&self, command: Cmd) -> bool {
        self.required.contains(&command)
    }

    pub fn multi(&self) -> bool {
        self.option_type.multi()
    }
}

/// Opt identifies an option. The discriminant is the option id; entries
/// are ordered alphabetically by canonical name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opt {
    ArchiveAsync,
    ArchiveTimeout,
    BufferSize,
    Compress,
    CompressLevel,
    CompressLevelNetwork,
    Config,
    ConfigIncludePath,
    ConfigPath,
    DbInclude,
    DbTimeout,
    Delta,
    Force,
    LinkMap,
    LogLevelConsole,
    LogLevelFile,
    LogPath,
    LogTimestamp,
    NeutralUmask,
    Online,
    PgHost,
    PgHostUser,
    PgPath,
    PgPort,
    ProcessMax,
    ProtocolTimeout,
    RecoveryOption,
    RepoCipherPass,
    RepoCipherType,
    RepoHardlink,
    RepoPath,
    RepoRetentionFull,
    RepoS3Bucket,
    RepoS3Key,
    RepoType,
    Set,
    SpoolPath,
    Stanza,
    Target,
    Type,
}

/// Total number of options.
pub const OPTION_TOTAL: usize = 40;

impl Opt {
    pub fn id(self) -> usize {
        self as usize
    }

    /// The metadata for this option.
    pub fn spec(self) -> &'static OptionSpec {
        &OPTION_SPECS[self as usize]
    }

    /// The user-visible name of this option at the given raw index:
    /// "compress" for non-group options, "pg3-path" for group members.
    pub fn idx_name(self, index: usize) -> String {
        let spec = self.spec();
        match spec.group {
            None => spec.name.to_owned(),
            Some(group) => {
                let stem = &spec.name[group.prefix().len() + 1..];
                format!("{}{}-{}", group.prefix(), index, stem)
            }
        }
    }
}

/// Commands which operate on a repository and may need repo options.
const COMMANDS_REPO: &[Cmd] = &[
    Cmd::ArchiveGet,
    Cmd::ArchivePush,
    Cmd::Backup,
    Cmd::Check,
    Cmd::Expire,
    Cmd::Info,
    Cmd::Restore,
    Cmd::StanzaCreate,
    Cmd::StanzaDelete,
    Cmd::StanzaUpgrade,
];

/// All real commands; used by options like config and the log settings
/// which apply everywhere.
const COMMANDS_ALL: &[Cmd] = &[
    Cmd::ArchiveGet,
    Cmd::ArchivePush,
    Cmd::Backup,
    Cmd::Check,
    Cmd::Expire,
    Cmd::Info,
    Cmd::Restore,
    Cmd::StanzaCreate,
    Cmd::StanzaDelete,
    Cmd::StanzaUpgrade,
    Cmd::Start,
    Cmd::Stop,
];

const LOG_LEVELS: &[&str] = &["off", "error", "warn", "info", "detail", "debug", "trace"];

/// The option metadata table, indexed by option id.
pub const OPTION_SPECS: &[OptionSpec] = &[
    OptionSpec {
        option: Opt::ArchiveAsync,
        name: "archive-async",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::Boolean,
        secure: false,
        negatable: true,
        default: Some("n"),
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: &[Cmd::ArchiveGet, Cmd::ArchivePush],
        required: &[],
    },
    OptionSpec {
        option: Opt::ArchiveTimeout,
        name: "archive-timeout",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::Float,
        secure: false,
        negatable: false,
        default: Some("60"),
        allow_list: &[],
        allow_range: Some((0.1, 86400.0)),
        depend: None,
        commands: &[Cmd::ArchivePush, Cmd::Backup, Cmd::Check],
        required: &[],
    },
    OptionSpec {
        option: Opt::BufferSize,
        name: "buffer-size",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::Size,
        secure: false,
        negatable: false,
        default: Some("1048576"),
        allow_list: &[],
        allow_range: Some((16384.0, 4294967296.0)),
        depend: None,
        commands: COMMANDS_ALL,
        required: &[],
    },
    OptionSpec {
        option: Opt::Compress,
        name: "compress",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::Boolean,
        secure: false,
        negatable: true,
        default: Some("y"),
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: &[Cmd::ArchiveGet, Cmd::ArchivePush, Cmd::Backup, Cmd::Restore],
        required: &[],
    },
    OptionSpec {
        option: Opt::CompressLevel,
        name: "compress-level",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::Integer,
        secure: false,
        negatable: false,
        default: Some("6"),
        allow_list: &[],
        allow_range: Some((0.0, 9.0)),
        depend: None,
        commands: &[Cmd::ArchiveGet, Cmd::ArchivePush, Cmd::Backup, Cmd::Restore],
        required: &[],
    },
    OptionSpec {
        option: Opt::CompressLevelNetwork,
        name: "compress-level-network",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::Integer,
        secure: false,
        negatable: false,
        default: Some("3"),
        allow_list: &[],
        allow_range: Some((0.0, 9.0)),
        depend: None,
        commands: &[
            Cmd::ArchiveGet,
            Cmd::ArchivePush,
            Cmd::Backup,
            Cmd::Check,
            Cmd::Restore,
        ],
        required: &[],
    },
    OptionSpec {
        option: Opt::Config,
        name: "config",
        group: None,
        section: OptionSection::CommandLine,
        option_type: OptionType::String,
        secure: false,
        negatable: true,
        default: Some(CONFIG_DEFAULT),
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: COMMANDS_ALL,
        required: &[],
    },
    OptionSpec {
        option: Opt::ConfigIncludePath,
        name: "config-include-path",
        group: None,
        section: OptionSection::CommandLine,
        option_type: OptionType::String,
        secure: false,
        negatable: false,
        default: Some(CONFIG_INCLUDE_PATH_DEFAULT),
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: COMMANDS_ALL,
        required: &[],
    },
    OptionSpec {
        option: Opt::ConfigPath,
        name: "config-path",
        group: None,
        section: OptionSection::CommandLine,
        option_type: OptionType::String,
        secure: false,
        negatable: false,
        default: None,
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: COMMANDS_ALL,
        required: &[],
    },
    OptionSpec {
        option: Opt::DbInclude,
        name: "db-include",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::List,
        secure: false,
        negatable: false,
        default: None,
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: &[Cmd::Restore],
        required: &[],
    },
    OptionSpec {
        option: Opt::DbTimeout,
        name: "db-timeout",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::Float,
        secure: false,
        negatable: false,
        default: Some("1800"),
        allow_list: &[],
        allow_range: Some((0.1, 604800.0)),
        depend: None,
        commands: &[
            Cmd::Backup,
            Cmd::Check,
            Cmd::StanzaCreate,
            Cmd::StanzaDelete,
            Cmd::StanzaUpgrade,
        ],
        required: &[],
    },
    OptionSpec {
        option: Opt::Delta,
        name: "delta",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::Boolean,
        secure: false,
        negatable: true,
        default: Some("n"),
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: &[Cmd::Backup, Cmd::Restore],
        required: &[],
    },
    OptionSpec {
        option: Opt::Force,
        name: "force",
        group: None,
        section: OptionSection::CommandLine,
        option_type: OptionType::Boolean,
        secure: false,
        negatable: true,
        default: Some("n"),
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: &[
            Cmd::Backup,
            Cmd::Restore,
            Cmd::StanzaCreate,
            Cmd::StanzaDelete,
            Cmd::Stop,
        ],
        required: &[],
    },
    OptionSpec {
        option: Opt::LinkMap,
        name: "link-map",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::Hash,
        secure: false,
        negatable: false,
        default: None,
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: &[Cmd::Restore],
        required: &[],
    },
    OptionSpec {
        option: Opt::LogLevelConsole,
        name: "log-level-console",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::String,
        secure: false,
        negatable: false,
        default: Some("warn"),
        allow_list: LOG_LEVELS,
        allow_range: None,
        depend: None,
        commands: COMMANDS_ALL,
        required: &[],
    },
    OptionSpec {
        option: Opt::LogLevelFile,
        name: "log-level-file",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::String,
        secure: false,
        negatable: false,
        default: Some("info"),
        allow_list: LOG_LEVELS,
        allow_range: None,
        depend: None,
        commands: COMMANDS_ALL,
        required: &[],
    },
    OptionSpec {
        option: Opt::LogPath,
        name: "log-path",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::Path,
        secure: false,
        negatable: false,
        default: Some("/var/log/pgbackrest"),
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: COMMANDS_ALL,
        required: &[],
    },
    OptionSpec {
        option: Opt::LogTimestamp,
        name: "log-timestamp",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::Boolean,
        secure: false,
        negatable: true,
        default: Some("y"),
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: COMMANDS_ALL,
        required: &[],
    },
    OptionSpec {
        option: Opt::NeutralUmask,
        name: "neutral-umask",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::Boolean,
        secure: false,
        negatable: true,
        default: Some("y"),
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: COMMANDS_ALL,
        required: &[],
    },
    OptionSpec {
        option: Opt::Online,
        name: "online",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::Boolean,
        secure: false,
        negatable: true,
        default: Some("y"),
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: &[Cmd::Backup, Cmd::Check, Cmd::StanzaCreate, Cmd::StanzaUpgrade],
        required: &[],
    },
    OptionSpec {
        option: Opt::PgHost,
        name: "pg-host",
        group: Some(OptGroup::Pg),
        section: OptionSection::Stanza,
        option_type: OptionType::String,
        secure: false,
        negatable: false,
        default: None,
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: &[
            Cmd::ArchiveGet,
            Cmd::ArchivePush,
            Cmd::Backup,
            Cmd::Check,
            Cmd::Restore,
            Cmd::StanzaCreate,
            Cmd::StanzaDelete,
            Cmd::StanzaUpgrade,
            Cmd::Start,
            Cmd::Stop,
        ],
        required: &[],
    },
    OptionSpec {
        option: Opt::PgHostUser,
        name: "pg-host-user",
        group: Some(OptGroup::Pg),
        section: OptionSection::Stanza,
        option_type: OptionType::String,
        secure: false,
        negatable: false,
        default: Some("postgres"),
        allow_list: &[],
        allow_range: None,
        depend: Some(Depend {
            option: Opt::PgHost,
            values: &[],
        }),
        commands: &[
            Cmd::ArchiveGet,
            Cmd::ArchivePush,
            Cmd::Backup,
            Cmd::Check,
            Cmd::Restore,
            Cmd::StanzaCreate,
            Cmd::StanzaDelete,
            Cmd::StanzaUpgrade,
            Cmd::Start,
            Cmd::Stop,
        ],
        required: &[],
    },
    OptionSpec {
        option: Opt::PgPath,
        name: "pg-path",
        group: Some(OptGroup::Pg),
        section: OptionSection::Stanza,
        option_type: OptionType::Path,
        secure: false,
        negatable: false,
        default: None,
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: &[
            Cmd::ArchiveGet,
            Cmd::ArchivePush,
            Cmd::Backup,
            Cmd::Check,
            Cmd::Restore,
            Cmd::StanzaCreate,
            Cmd::StanzaDelete,
            Cmd::StanzaUpgrade,
        ],
        required: &[
            Cmd::ArchiveGet,
            Cmd::ArchivePush,
            Cmd::Backup,
            Cmd::Check,
            Cmd::Restore,
            Cmd::StanzaCreate,
            Cmd::StanzaUpgrade,
        ],
    },
    OptionSpec {
        option: Opt::PgPort,
        name: "pg-port",
        group: Some(OptGroup::Pg),
        section: OptionSection::Stanza,
        option_type: OptionType::Integer,
        secure: false,
        negatable: false,
        default: Some("5432"),
        allow_list: &[],
        allow_range: Some((1.0, 65535.0)),
        depend: None,
        commands: &[
            Cmd::Backup,
            Cmd::Check,
            Cmd::StanzaCreate,
            Cmd::StanzaDelete,
            Cmd::StanzaUpgrade,
        ],
        required: &[],
    },
    OptionSpec {
        option: Opt::ProcessMax,
        name: "process-max",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::Integer,
        secure: false,
        negatable: false,
        default: Some("1"),
        allow_list: &[],
        allow_range: Some((1.0, 999.0)),
        depend: None,
        commands: &[Cmd::ArchiveGet, Cmd::ArchivePush, Cmd::Backup, Cmd::Restore],
        required: &[],
    },
    OptionSpec {
        option: Opt::ProtocolTimeout,
        name: "protocol-timeout",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::Float,
        secure: false,
        negatable: false,
        default: Some("1830"),
        allow_list: &[],
        allow_range: Some((0.1, 604800.0)),
        depend: None,
        commands: COMMANDS_REPO,
        required: &[],
    },
    OptionSpec {
        option: Opt::RecoveryOption,
        name: "recovery-option",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::Hash,
        secure: false,
        negatable: false,
        default: None,
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: &[Cmd::Restore],
        required: &[],
    },
    OptionSpec {
        option: Opt::RepoCipherPass,
        name: "repo-cipher-pass",
        group: Some(OptGroup::Repo),
        section: OptionSection::Global,
        option_type: OptionType::String,
        secure: true,
        negatable: false,
        default: None,
        allow_list: &[],
        allow_range: None,
        depend: Some(Depend {
            option: Opt::RepoCipherType,
            values: &["aes-256-cbc"],
        }),
        commands: COMMANDS_REPO,
        required: &[],
    },
    OptionSpec {
        option: Opt::RepoCipherType,
        name: "repo-cipher-type",
        group: Some(OptGroup::Repo),
        section: OptionSection::Global,
        option_type: OptionType::String,
        secure: false,
        negatable: false,
        default: Some("none"),
        allow_list: &["none", "aes-256-cbc"],
        allow_range: None,
        depend: None,
        commands: COMMANDS_REPO,
        required: &[],
    },
    OptionSpec {
        option: Opt::RepoHardlink,
        name: "repo-hardlink",
        group: Some(OptGroup::Repo),
        section: OptionSection::Global,
        option_type: OptionType::Boolean,
        secure: false,
        negatable: true,
        default: Some("n"),
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: &[Cmd::Backup],
        required: &[],
    },
    OptionSpec {
        option: Opt::RepoPath,
        name: "repo-path",
        group: Some(OptGroup::Repo),
        section: OptionSection::Global,
        option_type: OptionType::Path,
        secure: false,
        negatable: false,
        default: Some("/var/lib/pgbackrest"),
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: COMMANDS_REPO,
        required: &[],
    },
    OptionSpec {
        option: Opt::RepoRetentionFull,
        name: "repo-retention-full",
        group: Some(OptGroup::Repo),
        section: OptionSection::Global,
        option_type: OptionType::Integer,
        secure: false,
        negatable: false,
        default: None,
        allow_list: &[],
        allow_range: Some((1.0, 9999999.0)),
        depend: None,
        commands: &[Cmd::Backup, Cmd::Expire],
        required: &[],
    },
    OptionSpec {
        option: Opt::RepoS3Bucket,
        name: "repo-s3-bucket",
        group: Some(OptGroup::Repo),
        section: OptionSection::Global,
        option_type: OptionType::String,
        secure: false,
        negatable: false,
        default: None,
        allow_list: &[],
        allow_range: None,
        depend: Some(Depend {
            option: Opt::RepoType,
            values: &["s3"],
        }),
        commands: COMMANDS_REPO,
        required: &[],
    },
    OptionSpec {
        option: Opt::RepoS3Key,
        name: "repo-s3-key",
        group: Some(OptGroup::Repo),
        section: OptionSection::Global,
        option_type: OptionType::String,
        secure: true,
        negatable: false,
        default: None,
        allow_list: &[],
        allow_range: None,
        depend: Some(Depend {
            option: Opt::RepoType,
            values: &["s3"],
        }),
        commands: COMMANDS_REPO,
        required: &[],
    },
    OptionSpec {
        option: Opt::RepoType,
        name: "repo-type",
        group: Some(OptGroup::Repo),
        section: OptionSection::Global,
        option_type: OptionType::String,
        secure: false,
        negatable: false,
        default: Some("posix"),
        allow_list: &["cifs", "posix", "s3"],
        allow_range: None,
        depend: None,
        commands: COMMANDS_REPO,
        required: &[],
    },
    OptionSpec {
        option: Opt::Set,
        name: "set",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::String,
        secure: false,
        negatable: false,
        default: Some("latest"),
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: &[Cmd::Restore],
        required: &[],
    },
    OptionSpec {
        option: Opt::SpoolPath,
        name: "spool-path",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::Path,
        secure: false,
        negatable: false,
        default: Some("/var/spool/pgbackrest"),
        allow_list: &[],
        allow_range: None,
        depend: Some(Depend {
            option: Opt::ArchiveAsync,
            values: &["1"],
        }),
        commands: &[Cmd::ArchiveGet, Cmd::ArchivePush],
        required: &[],
    },
    OptionSpec {
        option: Opt::Stanza,
        name: "stanza",
        group: None,
        section: OptionSection::CommandLine,
        option_type: OptionType::String,
        secure: false,
        negatable: false,
        default: None,
        allow_list: &[],
        allow_range: None,
        depend: None,
        commands: COMMANDS_ALL,
        required: &[
            Cmd::ArchiveGet,
            Cmd::ArchivePush,
            Cmd::Backup,
            Cmd::Check,
            Cmd::Expire,
            Cmd::Restore,
            Cmd::StanzaCreate,
            Cmd::StanzaDelete,
            Cmd::StanzaUpgrade,
        ],
    },
    OptionSpec {
        option: Opt::Target,
        name: "target",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::String,
        secure: false,
        negatable: false,
        default: None,
        allow_list: &[],
        allow_range: None,
        depend: Some(Depend {
            option: Opt::Type,
            values: &["name", "time", "xid"],
        }),
        commands: &[Cmd::Restore],
        required: &[],
    },
    OptionSpec {
        option: Opt::Type,
        name: "type",
        group: None,
        section: OptionSection::Global,
        option_type: OptionType::String,
        secure: false,
        negatable: false,
        default: Some("default"),
        allow_list: &[
            "default",
            "immediate",
            "name",
            "time",
            "xid",
            "preserve",
            "none",
            "standby",
        ],
        allow_range: None,
        depend: None,
        commands: &[Cmd::Restore],
        required: &[],
    },
];

/// Deprecated alias names, the option each resolves to, and the raw
/// index implied by the alias. These are honored everywhere an option
/// name is accepted; the command line additionally warns.
const DEPRECATIONS: &[(&str, Opt, usize)] = &[
    ("db-path", Opt::PgPath, 1),
    ("db-port", Opt::PgPort, 1),
    ("hardlink", Opt::RepoHardlink, 1),
    ("repo-cipher-pass", Opt::RepoCipherPass, 1),
    ("repo-cipher-type", Opt::RepoCipherType, 1),
    ("repo-path", Opt::RepoPath, 1),
    ("repo-s3-bucket", Opt::RepoS3Bucket, 1),
    ("repo-s3-key", Opt::RepoS3Key, 1),
    ("repo-type", Opt::RepoType, 1),
];

/// A single literal flag name, with the structure the scanners need
/// already resolved.
#[derive(Debug)]
pub struct OptionName {
    pub name: String,
    pub option: Opt,
    /// Raw index extracted from the name, 1-origin for group members
    /// (pg3-path carries 3) and 0 for everything else.
    pub index: usize,
    pub negate: bool,
    pub reset: bool,
    pub deprecated: bool,
    /// Whether the flag consumes an argument. Booleans and all no-/
    /// reset- forms do not.
    pub has_arg: bool,
}

fn push_name_rows(rows: &mut Vec<OptionName>, spec: &OptionSpec, name: String, index: usize) {
    rows.push(OptionName {
        name: name.clone(),
        option: spec.option,
        index: index,
        negate: false,
        reset: false,
        deprecated: false,
        has_arg: spec.option_type != OptionType::Boolean,
    });

    if spec.negatable {
        rows.push(OptionName {
            name: format!("no-{}", name),
            option: spec.option,
            index: index,
            negate: true,
            reset: false,
            deprecated: false,
            has_arg: false,
        });
    }

    if spec.section != OptionSection::CommandLine {
        rows.push(OptionName {
            name: format!("reset-{}", name),
            option: spec.option,
            index: index,
            negate: false,
            reset: true,
            deprecated: false,
            has_arg: false,
        });
    }
}

fn build_option_names() -> Vec<OptionName> {
    let mut rows: Vec<OptionName> = vec![];

    for spec in OPTION_SPECS {
        match spec.group {
            None => push_name_rows(&mut rows, spec, spec.name.to_owned(), 0),
            Some(group) => {
                for index in 1..=group.index_max() {
                    push_name_rows(&mut rows, spec, spec.option.idx_name(index), index);
                }
            }
        }
    }

    for &(name, option, index) in DEPRECATIONS {
        let spec = option.spec();

        rows.push(OptionName {
            name: name.to_owned(),
            option: option,
            index: index,
            negate: false,
            reset: false,
            deprecated: true,
            has_arg: spec.option_type != OptionType::Boolean,
        });

        if spec.negatable {
            rows.push(OptionName {
                name: format!("no-{}", name),
                option: option,
                index: index,
                negate: true,
                reset: false,
                deprecated: true,
                has_arg: false,
            });
        }
    }

    rows
}

fn build_resolve_order() -> Vec<Opt> {
    // Kahn's algorithm over the depend graph, ties broken by option id
    // ascending, so every option resolves after the option it depends
    // on.
    let mut in_degree = [0usize; OPTION_TOTAL];
    for spec in OPTION_SPECS {
        if spec.depend.is_some() {
            in_degree[spec.option.id()] += 1;
        }
    }

    let mut emitted = [false; OPTION_TOTAL];
    let mut order: Vec<Opt> = Vec::with_capacity(OPTION_TOTAL);

    while order.len() < OPTION_TOTAL {
        let mut picked: Option<Opt> = None;

        for spec in OPTION_SPECS {
            if !emitted[spec.option.id()] && in_degree[spec.option.id()] == 0 {
                picked = Some(spec.option);
                break;
            }
        }

        let picked = match picked {
            // A cycle in the option table is a schema bug, not an input
            // problem.
            None => panic!("cycle detected in option dependency graph"),
            Some(picked) => picked,
        };

        emitted[picked.id()] = true;
        order.push(picked);

        for spec in OPTION_SPECS {
            if let Some(depend) = &spec.depend {
                if depend.option == picked {
                    in_degree[spec.option.id()] -= 1;
                }
            }
        }
    }

    order
}

lazy_static! {
    /// Every literal flag name the parser recognizes.
    pub static ref OPTION_NAMES: Vec<OptionName> = build_option_names();

    /// The order options are resolved in, such that every option appears
    /// after all options it depends on.
    pub static ref RESOLVE_ORDER: Vec<Opt> = build_resolve_order();
}

/// Find the name row for the given literal option name, or None if the
/// name is unknown.
pub fn option_find(name: &str) -> Option<&'static OptionName> {
    OPTION_NAMES.iter().find(|row| row.name == name)
}
