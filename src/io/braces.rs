//! Brace expansion for glob patterns.
//!
//! The `glob` crate has no `{a,b}` alternation, so patterns such as
//! `docs/**/*.{md,omni}` are expanded into one pattern per alternative.

use std::io;
use std::path::PathBuf;

use super::file_system::FileSystem;

/// Expands every `{a,b,...}` group of `pattern`, left to right.
///
/// Unbalanced braces are kept literally.
pub fn expand_braces(pattern: &str) -> Vec<String> {
    let Some(open) = pattern.find('{') else {
        return vec![pattern.to_string()];
    };
    let Some(close) = pattern[open..].find('}').map(|i| open + i) else {
        return vec![pattern.to_string()];
    };

    let prefix = &pattern[..open];
    let suffix = &pattern[close + 1..];
    let mut expanded = Vec::new();
    for alternative in pattern[open + 1..close].split(',') {
        for rest in expand_braces(suffix) {
            expanded.push(format!("{prefix}{alternative}{rest}"));
        }
    }
    expanded
}

/// Globs a brace pattern; results are sorted and de-duplicated.
pub fn glob_braced(fs: &dyn FileSystem, pattern: &str) -> io::Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for expanded in expand_braces(pattern) {
        files.extend(fs.glob(&expanded)?);
    }
    files.sort();
    files.dedup();
    Ok(files)
}

/// Builds the `**/*.{ext,...}` pattern for a set of extensions.
pub fn extension_pattern(file_types: &[String]) -> String {
    match file_types {
        [single] => format!("**/*.{single}"),
        types => format!("**/*.{{{}}}", types.join(",")),
    }
}
