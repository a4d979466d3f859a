use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use recfile_types::{FILE_NAME_FLAG, FLAG_NAMES, ID_FLAG, ITEM_FLAG, OPERATION_FLAG};

const ABOUT: &str = r#"Manage a list of records kept as a JSON array in a single file.

Each record is an object of the form {"id": "...", "email": "...", "age": N}.
Flags may be written with one dash (-operation list) or two (--operation list).

  recfile -operation list -fileName items.json
  recfile -operation add -fileName items.json -item '{"id":"1","email":"a@x.com","age":30}'
  recfile -operation findById -fileName items.json -id 1
  recfile -operation remove -fileName items.json -id 1"#;

/// Flags passed on the command line. Flags given as the empty string are
/// treated as absent; nothing else is checked until dispatch.
///
/// A repeated flag keeps its last value. Parsing stops at the first argument
/// that is not a flag; it and everything after it land in `ignored`.
#[derive(Parser, Debug, Clone, Default, PartialEq, Eq)]
#[command(name = "recfile")]
#[command(about = ABOUT)]
#[command(version)]
#[command(args_override_self = true)]
pub struct Flags {
    #[arg(
        long = OPERATION_FLAG,
        value_name = "OPERATION",
        allow_hyphen_values = true,
        help = "One of add, remove, list, findById"
    )]
    pub operation: Option<String>,

    #[arg(
        long = FILE_NAME_FLAG,
        value_name = "PATH",
        allow_hyphen_values = true,
        help = "JSON file holding the records (created if missing)"
    )]
    pub file_name: Option<String>,

    #[arg(
        long = ITEM_FLAG,
        value_name = "JSON",
        allow_hyphen_values = true,
        help = "Record to add, as a JSON object"
    )]
    pub item: Option<String>,

    #[arg(
        long = ID_FLAG,
        value_name = "ID",
        allow_hyphen_values = true,
        help = "Record id for remove and findById"
    )]
    pub id: Option<String>,

    #[arg(long, value_name = "PATH", help = "Config file (default: ~/.config/recfile/config.toml)")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Print timing information for profiling to stderr")]
    pub profile: bool,

    #[arg(trailing_var_arg = true, hide = true, value_name = "ARGS")]
    pub ignored: Vec<OsString>,
}

impl Flags {
    /// Parses the process arguments, exiting with a usage error on unknown flags.
    pub fn from_env() -> Self {
        Self::parse_from(normalize_args(std::env::args_os())).without_empty_values()
    }

    pub fn try_from_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args)).map(Self::without_empty_values)
    }

    fn without_empty_values(self) -> Self {
        Self {
            operation: self.operation.filter(|v| !v.is_empty()),
            file_name: self.file_name.filter(|v| !v.is_empty()),
            item: self.item.filter(|v| !v.is_empty()),
            id: self.id.filter(|v| !v.is_empty()),
            config: self.config.filter(|v| !v.as_os_str().is_empty()),
            profile: self.profile,
            ignored: self.ignored,
        }
    }
}

/// Rewrites single-dash long flags (`-fileName x`, `-id=1`) to the
/// double-dash form clap expects. Flag values, `--`, the first non-flag
/// argument and everything after either are left alone.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut normalized = Vec::new();
    let mut passthrough = false;
    let mut expecting_value = false;

    for (index, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if index == 0 || passthrough || expecting_value {
            expecting_value = false;
            normalized.push(arg);
            continue;
        }

        let Some(text) = arg.to_str() else {
            passthrough = true;
            normalized.push(arg);
            continue;
        };

        if text == "--" {
            passthrough = true;
            normalized.push(arg);
            continue;
        }

        let (dashes, body) = if let Some(body) = text.strip_prefix("--") {
            ("--", body)
        } else if let Some(body) = text.strip_prefix('-').filter(|b| !b.is_empty()) {
            ("-", body)
        } else {
            passthrough = true;
            normalized.push(arg);
            continue;
        };

        let (name, inline_value) = match body.split_once('=') {
            Some((name, _)) => (name, true),
            None => (body, false),
        };

        if is_long_flag(name) {
            expecting_value = !inline_value && takes_value(name);
            if dashes == "-" {
                normalized.push(OsString::from(format!("-{}", text)));
                continue;
            }
        }
        normalized.push(arg);
    }

    normalized
}

fn is_long_flag(name: &str) -> bool {
    FLAG_NAMES.contains(&name) || matches!(name, "config" | "profile" | "help" | "version")
}

fn takes_value(name: &str) -> bool {
    !matches!(name, "profile" | "help" | "version")
}
