//! Pure text rewrites applied to the project files
//!
//! Each function takes the whole file content and returns the new content;
//! reading and writing the file is left to the caller.

use once_cell::sync::Lazy;
use regex::{Captures, NoExpand, Regex};

#[expect(clippy::expect_used, reason = "the pattern is a literal")]
static BRANCH_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(branch\s*=\s*)\S+").expect("valid branch regex"));

#[expect(clippy::expect_used, reason = "the pattern is a literal")]
static COMPATIBILITY_MINIMUM_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"compatibility_minimum\s*=\s*"[^"]*""#)
        .expect("valid compatibility_minimum regex")
});

/// Point every `branch = <value>` entry at `branch`, keeping the spacing
/// around `=` and everything else in the file.
pub fn set_submodule_branch(content: &str, branch: &str) -> String {
    BRANCH_RE
        .replace_all(content, |caps: &Captures| format!("{}{}", &caps[1], branch))
        .into_owned()
}

/// Replace every `compatibility_minimum = "..."` value with `value`.
///
/// The key is rewritten in canonical `key = "value"` form; `value` is
/// inserted literally, so `$` and `\` are not treated as replacement syntax.
pub fn set_compatibility_minimum(content: &str, value: &str) -> String {
    let replacement = format!("compatibility_minimum = \"{}\"", value);
    COMPATIBILITY_MINIMUM_RE
        .replace_all(content, NoExpand(&replacement))
        .into_owned()
}

/// Outcome of rewriting the version-marker file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkerEdit {
    /// Line 2 was replaced; `plugin_id` is line 1 trimmed and lower-cased
    Rewritten {
        content: String,
        plugin_id: Option<String>,
    },
    /// Fewer than two lines; the file must stay as it is. `plugin_id` is the
    /// trimmed first line, if any.
    TooShort { plugin_id: Option<String> },
}

/// Replace line 2 of the version-marker with `version`.
///
/// Line 1 and any lines after line 2 are kept byte for byte. The new line 2
/// keeps a CRLF terminator if the old one had it and ends in `\n` otherwise.
pub fn rewrite_version_marker(content: &str, version: &str) -> MarkerEdit {
    let lines: Vec<&str> = content.split_inclusive('\n').collect();

    if lines.len() < 2 {
        return MarkerEdit::TooShort {
            plugin_id: lines.first().and_then(|line| non_empty(line.trim())),
        };
    }

    let terminator = if lines[1].ends_with("\r\n") { "\r\n" } else { "\n" };

    let mut rewritten = String::with_capacity(content.len() + version.len());
    rewritten.push_str(lines[0]);
    rewritten.push_str(version);
    rewritten.push_str(terminator);
    for line in &lines[2..] {
        rewritten.push_str(line);
    }

    MarkerEdit::Rewritten {
        content: rewritten,
        plugin_id: non_empty(&lines[0].trim().to_lowercase()),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
