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

use crate::config::{Cmd, Opt, OptGroup, Role, Source, Value};
use crate::tests::config::*;

// Most tests pass --no-config so results do not depend on configuration
// files present on the machine running them.
const BACKUP: &[&str] = &["backup", "--no-config", "--stanza=demo", "--pg1-path=/db"];
const RESTORE: &[&str] = &["restore", "--no-config", "--stanza=demo", "--pg1-path=/db"];

fn with<'a>(base: &[&'a str], extra: &[&'a str]) -> Vec<&'a str> {
    base.iter().chain(extra.iter()).cloned().collect()
}

#[test]
fn test_no_arguments_implies_help() {
    let config = parse_args(&[]).unwrap();
    assert!(config.command_help());
    assert_eq!(Cmd::None, config.command());
    assert_eq!("pgbackrest", config.exe());
}

#[test]
fn test_version_command() {
    let config = parse_args(&["version"]).unwrap();
    assert_eq!(Cmd::Version, config.command());
    assert!(!config.command_help());
    // No validation happens for the version command.
    assert!(!config.option_valid(Opt::Compress));
}

#[test]
fn test_help_command() {
    let config = parse_args(&["help"]).unwrap();
    assert!(config.command_help());
    assert_eq!(Cmd::Help, config.command());
}

#[test]
fn test_help_with_command_resolves_options() {
    let config = parse_args(&["help", "backup", "--no-config"]).unwrap();
    assert!(config.command_help());
    assert_eq!(Cmd::Backup, config.command());
    // Options resolve so help can show effective values, but required
    // options are not enforced.
    assert_eq!(Some(true), config.option_bool(Opt::Compress));
    assert_eq!(None, config.option(Opt::Stanza));
}

#[test]
fn test_invalid_command() {
    assert_command_invalid(parse_args(&["bogus"]), "invalid command 'bogus'");
}

#[test]
fn test_command_role() {
    let config = parse_args(&[
        "backup:local",
        "--no-config",
        "--stanza=demo",
        "--pg1-path=/db",
    ])
    .unwrap();
    assert_eq!(Cmd::Backup, config.command());
    assert_eq!(Role::Local, config.command_role());
}

#[test]
fn test_invalid_command_role() {
    assert_command_invalid(
        parse_args(&["backup:bogus"]),
        "invalid command role 'bogus'",
    );
    assert_command_invalid(
        parse_args(&["backup:local:remote"]),
        "invalid command 'backup:local:remote'",
    );
}

#[test]
fn test_no_command_with_arguments() {
    assert_command_required(parse_args(&["--stanza=demo"]), "no command found");
}

#[test]
fn test_command_parameters() {
    let config = parse_args(&[
        "archive-push",
        "--no-config",
        "--stanza=demo",
        "--pg1-path=/db",
        "pg_wal/000000010000000100000001",
    ])
    .unwrap();
    assert_eq!(
        &["pg_wal/000000010000000100000001".to_owned()],
        config.command_params()
    );
}

#[test]
fn test_parameters_not_allowed() {
    assert_param_invalid(
        parse_args(&with(BACKUP, &["param"])),
        "command does not allow parameters",
    );
}

#[test]
fn test_parameters_after_double_dash() {
    let config = parse_args(&[
        "archive-push",
        "--no-config",
        "--stanza=demo",
        "--pg1-path=/db",
        "--",
        "--looks-like-an-option",
    ])
    .unwrap();
    assert_eq!(
        &["--looks-like-an-option".to_owned()],
        config.command_params()
    );
}

#[test]
fn test_unknown_option() {
    assert_option_invalid(
        parse_args(&with(BACKUP, &["--bogus"])),
        "invalid option '--bogus'",
    );
    assert_option_invalid(parse_args(&with(BACKUP, &["-x"])), "invalid option '-x'");
}

#[test]
fn test_option_requires_argument() {
    assert_option_invalid(
        parse_args(&["backup", "--no-config", "--pg1-path=/db", "--stanza"]),
        "option '--stanza' requires argument",
    );
}

#[test]
fn test_boolean_option_rejects_inline_value() {
    assert_option_invalid(
        parse_args(&with(BACKUP, &["--compress=y"])),
        "invalid option '--compress=y'",
    );
}

#[test]
fn test_option_value_in_next_argument() {
    let config = parse_args(&[
        "backup",
        "--no-config",
        "--stanza",
        "demo",
        "--pg1-path",
        "/db",
    ])
    .unwrap();
    assert_eq!(Some("demo"), config.option_str(Opt::Stanza));
    assert_eq!(Some("/db"), config.option_str(Opt::PgPath));
}

#[test]
fn test_secure_option_not_allowed_on_command_line() {
    assert_option_invalid(
        parse_args(&with(BACKUP, &["--repo1-cipher-pass=secret"])),
        "option 'repo1-cipher-pass' is not allowed on the command-line\n\
         HINT: this option could expose secrets in the process list.\n\
         HINT: specify the option in a configuration file or an environment variable instead.",
    );
}

#[test]
fn test_negate_reset_conflicts() {
    assert_option_invalid(
        parse_args(&with(BACKUP, &["--no-compress", "--no-compress"])),
        "option 'compress' is negated multiple times",
    );
    assert_option_invalid(
        parse_args(&with(BACKUP, &["--reset-compress", "--reset-compress"])),
        "option 'compress' is reset multiple times",
    );
    assert_option_invalid(
        parse_args(&with(BACKUP, &["--no-compress", "--reset-compress"])),
        "option 'compress' cannot be negated and reset",
    );
    assert_option_invalid(
        parse_args(&with(BACKUP, &["--compress", "--no-compress"])),
        "option 'compress' cannot be set and negated",
    );
    assert_option_invalid(
        parse_args(&with(BACKUP, &["--log-path=/log", "--reset-log-path"])),
        "option 'log-path' cannot be set and reset",
    );
}

#[test]
fn test_single_valued_option_set_multiple_times() {
    assert_option_invalid(
        parse_args(&[
            "backup",
            "--no-config",
            "--pg1-path=/db",
            "--stanza=a",
            "--stanza=b",
        ]),
        "option 'stanza' cannot be set multiple times",
    );
    // Booleans may not be repeated either.
    assert_option_invalid(
        parse_args(&with(BACKUP, &["--compress", "--compress"])),
        "option 'compress' cannot be set multiple times",
    );
}

#[test]
fn test_multi_valued_option_set_multiple_times() {
    let config = parse_args(&with(RESTORE, &["--db-include=db1", "--db-include=db2"])).unwrap();
    assert_eq!(
        Some(&Value::List(vec!["db1".to_owned(), "db2".to_owned()])),
        config.option(Opt::DbInclude)
    );
}

#[test]
fn test_negate_takes_precedence_over_default() {
    let config = parse_args(&with(BACKUP, &["--no-compress"])).unwrap();
    let value = config.option_idx(Opt::Compress, 0).unwrap();
    assert_eq!(Some(&Value::Bool(false)), value.value());
    assert_eq!(Source::Param, value.source());
    assert!(value.negate());
}

#[test]
fn test_boolean_on_command_line() {
    let config = parse_args(&with(BACKUP, &["--delta"])).unwrap();
    let value = config.option_idx(Opt::Delta, 0).unwrap();
    assert_eq!(Some(&Value::Bool(true)), value.value());
    assert_eq!(Source::Param, value.source());
    assert!(!value.negate());
}

#[test]
fn test_default_applied_when_not_set() {
    let config = parse_args(&with(BACKUP, &[])).unwrap();
    let value = config.option_idx(Opt::Compress, 0).unwrap();
    assert_eq!(Some(&Value::Bool(true)), value.value());
    assert_eq!(Source::Default, value.source());

    assert_eq!(Some(6), config.option_int(Opt::CompressLevel));
    assert_eq!(Some(1048576), config.option_int(Opt::BufferSize));
    assert_eq!(Some(1800.0), config.option_float(Opt::DbTimeout));
    assert_eq!(Some("warn"), config.option_str(Opt::LogLevelConsole));
}

#[test]
fn test_reset_forces_default() {
    let config = parse_args(&with(BACKUP, &["--reset-repo1-hardlink"])).unwrap();
    let value = config.option_idx(Opt::RepoHardlink, 0).unwrap();
    assert_eq!(Some(&Value::Bool(false)), value.value());
    assert_eq!(Source::Default, value.source());
    assert!(value.reset());
}

#[test]
fn test_integer_option_rejects_size_qualifier() {
    assert_option_invalid_value(
        parse_args(&with(BACKUP, &["--process-max=2GB"])),
        "'2GB' is not valid for 'process-max' option",
    );
}

#[test]
fn test_size_option_accepts_qualifier() {
    let config = parse_args(&with(BACKUP, &["--buffer-size=2GB"])).unwrap();
    assert_eq!(Some(2147483648), config.option_int(Opt::BufferSize));
}

#[test]
fn test_numeric_validation() {
    assert_option_invalid_value(
        parse_args(&with(BACKUP, &["--process-max=abc"])),
        "'abc' is not valid for 'process-max' option",
    );
    assert_option_invalid_value(
        parse_args(&with(BACKUP, &["--process-max=1000"])),
        "'1000' is out of range for 'process-max' option",
    );
    assert_option_invalid_value(
        parse_args(&with(BACKUP, &["--archive-timeout=0.05"])),
        "'0.05' is out of range for 'archive-timeout' option",
    );

    let config = parse_args(&with(BACKUP, &["--archive-timeout=30.5"])).unwrap();
    assert_eq!(Some(30.5), config.option_float(Opt::ArchiveTimeout));
}

#[test]
fn test_path_validation() {
    assert_option_invalid_value(
        parse_args(&["backup", "--no-config", "--stanza=demo", "--pg1-path=db"]),
        "'db' must begin with / for 'pg1-path' option",
    );
    assert_option_invalid_value(
        parse_args(&[
            "backup",
            "--no-config",
            "--stanza=demo",
            "--pg1-path=/db//cluster",
        ]),
        "'/db//cluster' cannot contain // for 'pg1-path' option",
    );

    // A trailing slash is stripped, but a root path is left alone.
    let config = parse_args(&[
        "backup",
        "--no-config",
        "--stanza=demo",
        "--pg1-path=/db/",
    ])
    .unwrap();
    assert_eq!(Some("/db"), config.option_str(Opt::PgPath));

    let config = parse_args(&["backup", "--no-config", "--stanza=demo", "--pg1-path=/"]).unwrap();
    assert_eq!(Some("/"), config.option_str(Opt::PgPath));
}

#[test]
fn test_allow_list() {
    assert_option_invalid_value(
        parse_args(&with(BACKUP, &["--repo1-type=bogus"])),
        "'bogus' is not allowed for 'repo1-type' option",
    );

    let config = parse_args(&with(BACKUP, &["--repo1-type=cifs"])).unwrap();
    assert_eq!(Some("cifs"), config.option_str(Opt::RepoType));
}

#[test]
fn test_hash_option() {
    let config = parse_args(&with(
        RESTORE,
        &[
            "--recovery-option=primary_conninfo=host=backup",
            "--recovery-option=recovery_target_timeline=current",
        ],
    ))
    .unwrap();

    let hash = config.option(Opt::RecoveryOption).unwrap().as_hash().unwrap();
    assert_eq!(2, hash.len());
    // The value is split at the first equal sign only.
    assert_eq!("host=backup", hash["primary_conninfo"]);
    assert_eq!("current", hash["recovery_target_timeline"]);
}

#[test]
fn test_hash_option_requires_key_value() {
    assert_option_invalid(
        parse_args(&with(RESTORE, &["--recovery-option=bogus"])),
        "key/value 'bogus' not valid for 'recovery-option' option",
    );
}

#[test]
fn test_depend_on_unset_option() {
    assert_option_invalid(
        parse_args(&with(BACKUP, &["--pg1-host-user=bob"])),
        "option 'pg1-host-user' not valid without option 'pg1-host'",
    );

    // Once the dependency is satisfied the value commits, and the
    // dependent default applies when the option itself is unset.
    let config = parse_args(&with(BACKUP, &["--pg1-host=backup1"])).unwrap();
    let value = config.option_idx(Opt::PgHostUser, 0).unwrap();
    assert_eq!(Some(&Value::Str("postgres".to_owned())), value.value());
    assert_eq!(Source::Default, value.source());
}

#[test]
fn test_depend_with_single_allowed_value() {
    assert_option_invalid(
        parse_args(&with(BACKUP, &["--repo1-s3-bucket=backups"])),
        "option 'repo1-s3-bucket' not valid without option 'repo1-type' = 's3'",
    );

    let config = parse_args(&with(
        BACKUP,
        &["--repo1-type=s3", "--repo1-s3-bucket=backups"],
    ))
    .unwrap();
    assert_eq!(Some("backups"), config.option_str(Opt::RepoS3Bucket));
}

#[test]
fn test_depend_with_multiple_allowed_values() {
    assert_option_invalid(
        parse_args(&with(RESTORE, &["--target=release"])),
        "option 'target' not valid without option 'type' in ('name', 'time', 'xid')",
    );

    let config = parse_args(&with(RESTORE, &["--type=name", "--target=release"])).unwrap();
    assert_eq!(Some("release"), config.option_str(Opt::Target));
}

#[test]
fn test_depend_on_boolean_option() {
    let argv = &[
        "archive-push",
        "--no-config",
        "--stanza=demo",
        "--pg1-path=/db",
        "--spool-path=/var/spool/custom",
    ];

    assert_option_invalid(
        parse_args(argv),
        "option 'spool-path' not valid without option 'archive-async'",
    );

    // An explicit negation produces the same diagnostic.
    assert_option_invalid(
        parse_args(&with(argv, &["--no-archive-async"])),
        "option 'spool-path' not valid without option 'archive-async'",
    );

    let config = parse_args(&with(argv, &["--archive-async"])).unwrap();
    assert_eq!(Some("/var/spool/custom"), config.option_str(Opt::SpoolPath));
}

#[test]
fn test_depend_default_left_unresolved() {
    // spool-path has a default, but it only applies when the dependency
    // resolves.
    let config = parse_args(&[
        "archive-push",
        "--no-config",
        "--stanza=demo",
        "--pg1-path=/db",
    ])
    .unwrap();
    assert_eq!(None, config.option(Opt::SpoolPath));

    let config = parse_args(&[
        "archive-push",
        "--no-config",
        "--stanza=demo",
        "--pg1-path=/db",
        "--archive-async",
    ])
    .unwrap();
    let value = config.option_idx(Opt::SpoolPath, 0).unwrap();
    assert_eq!(Some(&Value::Str("/var/spool/pgbackrest".to_owned())), value.value());
    assert_eq!(Source::Default, value.source());
}

#[test]
fn test_required_option_missing() {
    assert_option_required(
        parse_args(&["backup", "--no-config", "--pg1-path=/db"]),
        "backup command requires option: stanza",
    );

    // Stanza section options carry a hint.
    assert_option_required(
        parse_args(&["backup", "--no-config", "--stanza=demo"]),
        "backup command requires option: pg1-path\nHINT: does this stanza exist?",
    );
}

#[test]
fn test_option_not_valid_for_command() {
    assert_option_invalid(
        parse_args(&with(BACKUP, &["--archive-async"])),
        "option 'archive-async' not valid for command 'backup'",
    );
    assert_option_invalid(
        parse_args(&with(BACKUP, &["--target=release"])),
        "option 'target' not valid for command 'backup'",
    );
}

#[test]
fn test_group_compaction() {
    let config = parse_args(&[
        "backup",
        "--no-config",
        "--stanza=demo",
        "--pg3-path=/p3",
        "--pg1-path=/p1",
    ])
    .unwrap();

    assert_eq!(2, config.group_index_total(OptGroup::Pg));
    assert_eq!(1, config.group_index(OptGroup::Pg, 0));
    assert_eq!(3, config.group_index(OptGroup::Pg, 1));

    assert_eq!(2, config.option_index_total(Opt::PgPath));
    assert_eq!(
        Some(&Value::Str("/p1".to_owned())),
        config.option_idx(Opt::PgPath, 0).unwrap().value()
    );
    assert_eq!(
        Some(&Value::Str("/p3".to_owned())),
        config.option_idx(Opt::PgPath, 1).unwrap().value()
    );

    // Defaults apply at every discovered index.
    assert_eq!(
        Some(&Value::Int(5432)),
        config.option_idx(Opt::PgPort, 0).unwrap().value()
    );
    assert_eq!(
        Some(&Value::Int(5432)),
        config.option_idx(Opt::PgPort, 1).unwrap().value()
    );
}

#[test]
fn test_deprecated_alias_on_command_line() {
    let config = parse_args(&with(BACKUP, &["--repo-path=/backups"])).unwrap();
    assert_eq!(Some("/backups"), config.option_str(Opt::RepoPath));

    let config = parse_args(&[
        "backup",
        "--no-config",
        "--stanza=demo",
        "--db-path=/db",
    ])
    .unwrap();
    assert_eq!(Some("/db"), config.option_str(Opt::PgPath));
}

#[test]
fn test_env_sets_option() {
    let config = parse_args_env(BACKUP, &[("PGBACKREST_PROCESS_MAX", "4")]).unwrap();
    let value = config.option_idx(Opt::ProcessMax, 0).unwrap();
    assert_eq!(Some(&Value::Int(4)), value.value());
    assert_eq!(Source::Config, value.source());
}

#[test]
fn test_env_boolean() {
    let config = parse_args_env(BACKUP, &[("PGBACKREST_COMPRESS", "n")]).unwrap();
    let value = config.option_idx(Opt::Compress, 0).unwrap();
    assert_eq!(Some(&Value::Bool(false)), value.value());
    assert_eq!(Source::Config, value.source());

    assert_option_invalid_value(
        parse_args_env(BACKUP, &[("PGBACKREST_COMPRESS", "true")]),
        "environment boolean option 'compress' must be 'y' or 'n'",
    );
}

#[test]
fn test_env_empty_value() {
    assert_option_invalid_value(
        parse_args_env(BACKUP, &[("PGBACKREST_COMPRESS", "")]),
        "environment variable 'compress' must have a value",
    );
}

#[test]
fn test_env_multi_value_split() {
    let config = parse_args_env(RESTORE, &[("PGBACKREST_DB_INCLUDE", "db1:db2")]).unwrap();
    assert_eq!(
        Some(&Value::List(vec!["db1".to_owned(), "db2".to_owned()])),
        config.option(Opt::DbInclude)
    );
}

#[test]
fn test_env_invalid_names_are_skipped() {
    // Unknown, negate and reset names warn and are ignored.
    let config = parse_args_env(
        BACKUP,
        &[
            ("PGBACKREST_BOGUS", "x"),
            ("PGBACKREST_NO_COMPRESS", "y"),
            ("PGBACKREST_RESET_COMPRESS", "y"),
        ],
    )
    .unwrap();
    let value = config.option_idx(Opt::Compress, 0).unwrap();
    assert_eq!(Some(&Value::Bool(true)), value.value());
    assert_eq!(Source::Default, value.source());
}

#[test]
fn test_env_option_not_valid_for_command_is_skipped() {
    // archive-async is not valid for backup; from the environment this
    // is not an error.
    let config = parse_args_env(BACKUP, &[("PGBACKREST_ARCHIVE_ASYNC", "y")]).unwrap();
    assert!(!config.option_valid(Opt::ArchiveAsync));
}

#[test]
fn test_env_secure_option_allowed() {
    let config = parse_args_env(
        &[
            "backup",
            "--no-config",
            "--stanza=demo",
            "--pg1-path=/db",
            "--repo1-type=s3",
        ],
        &[("PGBACKREST_REPO1_S3_KEY", "accesskey")],
    )
    .unwrap();
    assert_eq!(Some("accesskey"), config.option_str(Opt::RepoS3Key));
}

#[test]
fn test_env_deprecated_alias() {
    let config = parse_args_env(BACKUP, &[("PGBACKREST_REPO_TYPE", "cifs")]).unwrap();
    assert_eq!(Some("cifs"), config.option_str(Opt::RepoType));
}

#[test]
fn test_command_line_wins_over_env() {
    let config = parse_args_env(
        &with(BACKUP, &["--process-max=2"]),
        &[("PGBACKREST_PROCESS_MAX", "8")],
    )
    .unwrap();
    let value = config.option_idx(Opt::ProcessMax, 0).unwrap();
    assert_eq!(Some(&Value::Int(2)), value.value());
    assert_eq!(Source::Param, value.source());
}

#[test]
fn test_parse_is_idempotent() {
    let argv = &with(BACKUP, &["--delta", "--repo1-type=cifs", "--process-max=4"]);
    let env = &[("PGBACKREST_COMPRESS_LEVEL", "2")];
    let first = parse_args_env(argv, env).unwrap();
    let second = parse_args_env(argv, env).unwrap();
    assert_eq!(first, second);
}
