//! Code fence extraction.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::text_location::TextLocation;

/// Pattern for matching code fence openings.
static FENCE_OPEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?P<indent>\s*)(?P<fence>`{3,}|~{3,})(?P<info>.*)$").unwrap());

/// A fenced region extracted from input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DelimitedToken {
    /// The info string after the opening fence.
    pub info: String,
    /// The content between the fences.
    pub content: String,
    /// Location of the opening fence.
    pub location: TextLocation,
    /// Indentation of the opening fence.
    pub indent: String,
}

/// Result of attempting to extract a fenced region.
#[derive(Debug)]
pub enum ExtractResult {
    /// A complete fenced region.
    Token(DelimitedToken),
    /// A line outside any fence.
    NotDelimited(String),
    /// Input ended before the closing fence.
    Unclosed {
        info: String,
        content: String,
        location: TextLocation,
    },
}

/// Extracts fenced regions line by line.
pub struct DelimitedTokenGetter {
    /// Current line number (1-indexed).
    line_number: usize,
}

impl DelimitedTokenGetter {
    /// Creates a new getter.
    pub fn new() -> Self {
        Self { line_number: 1 }
    }

    /// Extracts the next token from the line iterator.
    pub fn extract<'a, I>(&mut self, lines: &mut I) -> Option<ExtractResult>
    where
        I: Iterator<Item = &'a str>,
    {
        let line = lines.next()?;
        let start_line = self.line_number;
        self.line_number += 1;

        let Some(caps) = FENCE_OPEN.captures(line) else {
            return Some(ExtractResult::NotDelimited(line.to_string()));
        };

        let indent = caps["indent"].to_string();
        let fence = &caps["fence"];
        let info = caps["info"].trim().to_string();
        let mut content_lines = Vec::new();

        for content_line in lines.by_ref() {
            self.line_number += 1;

            if is_closing_fence(content_line, fence) {
                return Some(ExtractResult::Token(DelimitedToken {
                    info,
                    content: content_lines.join("\n"),
                    location: TextLocation::line_only(start_line),
                    indent,
                }));
            }

            let stripped = content_line.strip_prefix(indent.as_str()).unwrap_or(content_line);
            content_lines.push(stripped);
        }

        Some(ExtractResult::Unclosed {
            info,
            content: content_lines.join("\n"),
            location: TextLocation::line_only(start_line),
        })
    }
}

impl Default for DelimitedTokenGetter {
    fn default() -> Self {
        Self::new()
    }
}

/// A closing fence uses the opening character at least as many times, alone on its line.
fn is_closing_fence(line: &str, opening: &str) -> bool {
    let trimmed = line.trim();
    let Some(fence_char) = opening.chars().next() else {
        return false;
    };
    trimmed.len() >= opening.len() && trimmed.chars().all(|c| c == fence_char)
}

/// Convenience function to extract all tokens from a string.
pub fn extract_all_tokens(input: &str) -> Vec<ExtractResult> {
    let mut getter = DelimitedTokenGetter::new();
    let mut lines = input.lines().peekable();
    let mut results = Vec::new();

    while lines.peek().is_some() {
        if let Some(result) = getter.extract(&mut lines) {
            results.push(result);
        }
    }

    results
}
