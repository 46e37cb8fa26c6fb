//! Command-line surface and root directory resolution

use clap::{Command, CommandFactory, Parser};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};

use gdext_config::layout::is_plugin_root;
use gdext_config::settings::DEFAULT_COMPATIBILITY_MINIMUM;

use crate::common::GlobalOpts;
use crate::upgrade::UpgradeOptions;

#[derive(Parser, Debug)]
#[command(name = "gdext-upgrade")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(
    about = "Upgrade a GDExtension plugin project to a newer godot-cpp",
    long_about = "Upgrade a GDExtension plugin project to a newer godot-cpp.\n\n\
        Switches the godot-cpp submodule to the target branch, updates .gitmodules, \
        dont_touch.txt and the plugin's .gdextension file, then cleans old build \
        files with `scons -c`."
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    /// Plugin project root. Defaults to the parent of the tool's directory
    /// when it holds dont_touch.txt, otherwise the current directory.
    /// Only the first path is used.
    #[arg(value_name = "ROOT")]
    pub roots: Vec<PathBuf>,

    /// compatibility_minimum to write into the .gdextension file
    #[arg(
        long = "min",
        value_name = "VERSION",
        default_value = DEFAULT_COMPATIBILITY_MINIMUM,
        allow_hyphen_values = true
    )]
    pub compatibility_minimum: String,

    /// Skip cleaning old build files
    #[arg(long)]
    pub no_clean: bool,
}

impl Cli {
    /// Parse raw process arguments. Tokens that are not a recognized option
    /// become positional roots instead of parse errors.
    pub fn parse_lenient<I>(args: I) -> Self
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::parse_from(positionals_last(args))
    }

    /// Turn the parsed arguments into upgrade options. `exe` is the running
    /// binary's path, `cwd` the current directory.
    pub fn into_options(self, exe: Option<&Path>, cwd: &Path) -> UpgradeOptions {
        UpgradeOptions {
            root: resolve_root(self.roots.first().map(PathBuf::as_path), exe, cwd),
            compatibility_minimum: self.compatibility_minimum,
            clean: !self.no_clean,
        }
    }
}

/// Reorder `args` (binary name first) so every known option precedes a `--`
/// separator and every other token follows it as a positional.
///
/// An option that takes a value only does so when a value follows it; a
/// trailing `--min` is a positional like any unknown token.
pub fn positionals_last<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    let mut command = Cli::command();
    command.build();

    let mut args = args.into_iter();
    let mut options: Vec<OsString> = args.next().into_iter().collect();
    let mut positionals = Vec::new();

    while let Some(arg) = args.next() {
        let Some(token) = arg.to_str() else {
            positionals.push(arg);
            continue;
        };
        if token == "--" {
            positionals.extend(args.by_ref());
            break;
        }
        match option_kind(&command, token) {
            Some(OptionKind::Flag) => options.push(arg),
            Some(OptionKind::TakesValue) => match args.next() {
                Some(value) => {
                    // `--min=<value>` keeps clap from reading a flag-like value as a flag
                    let mut joined = arg;
                    joined.push("=");
                    joined.push(value);
                    options.push(joined);
                }
                None => positionals.push(arg),
            },
            None => positionals.push(arg),
        }
    }

    if !positionals.is_empty() {
        options.push(OsString::from("--"));
        options.extend(positionals);
    }
    options
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OptionKind {
    /// Complete on its own, including `--long=value`
    Flag,
    /// Consumes the next token as its value
    TakesValue,
}

fn option_kind(command: &Command, token: &str) -> Option<OptionKind> {
    if let Some(long) = token.strip_prefix("--") {
        let (name, inline_value) = match long.split_once('=') {
            Some((name, _)) => (name, true),
            None => (long, false),
        };
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_long() == Some(name))?;
        let takes_values = arg.get_action().takes_values();
        return match (takes_values, inline_value) {
            (true, false) => Some(OptionKind::TakesValue),
            (true, true) | (false, false) => Some(OptionKind::Flag),
            (false, true) => None,
        };
    }

    // Short clusters such as `-vv` or `-qv`; none of the short options take values
    let shorts = token.strip_prefix('-').filter(|shorts| !shorts.is_empty())?;
    shorts
        .chars()
        .all(|short| {
            command
                .get_arguments()
                .any(|arg| arg.get_short() == Some(short) && !arg.get_action().takes_values())
        })
        .then_some(OptionKind::Flag)
}

/// Absolute plugin root: the explicit path, else the tool's grandparent
/// directory (`<root>/tools/gdext-upgrade`) if it is a plugin root, else `cwd`.
pub fn resolve_root(explicit: Option<&Path>, exe: Option<&Path>, cwd: &Path) -> PathBuf {
    if let Some(path) = explicit {
        return absolutize(path, cwd);
    }

    exe.map(|exe| absolutize(exe, cwd))
        .as_deref()
        .and_then(Path::parent)
        .and_then(Path::parent)
        .filter(|candidate| is_plugin_root(candidate))
        .map(Path::to_path_buf)
        .unwrap_or_else(|| normalize(cwd))
}

fn absolutize(path: &Path, cwd: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize(path)
    } else {
        normalize(&cwd.join(path))
    }
}

/// Lexically drop `.` components and fold `..` into the parent
fn normalize(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !normalized.pop() {
                    normalized.push(component);
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}
