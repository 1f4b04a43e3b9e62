//! Fence info string parsing.
//!
//! Parses info strings like `json config`, `js export=bundle.js` or
//! `{.js export run}` into a block type and its directives.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{escaped_transform, tag, take_while1},
    character::complete::{char, multispace0, multispace1, none_of},
    combinator::{map, opt, value},
    multi::many0,
    sequence::{delimited, preceded},
};

use crate::model::{Directive, DirectiveValue, Directives};

/// A parsed info string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InfoString {
    /// The block type, empty when the fence has none.
    pub language: String,
    /// Directives following the type.
    pub directives: Directives,
}

/// Check if a character is valid in a type or directive name.
fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '_' | '-' | ':' | '/' | '.' | '+')
}

fn parse_ident(input: &str) -> IResult<&str, &str> {
    take_while1(is_ident_char).parse(input)
}

/// Parse a quoted string value with escape handling.
fn parse_quoted_string(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        escaped_transform(
            none_of("\\\""),
            '\\',
            alt((
                value("\\", tag("\\")),
                value("\"", tag("\"")),
                value("\n", tag("n")),
                value("\t", tag("t")),
            )),
        ),
        char('"'),
    )
    .parse(input)
}

/// Parse an unquoted value; `true` and `false` become flags.
fn parse_unquoted_value(input: &str) -> IResult<&str, DirectiveValue> {
    map(
        take_while1(|c: char| !c.is_whitespace() && c != '"' && c != '}'),
        |s: &str| match s {
            "true" => DirectiveValue::Flag(true),
            "false" => DirectiveValue::Flag(false),
            other => DirectiveValue::Text(other.to_string()),
        },
    )
    .parse(input)
}

fn parse_value(input: &str) -> IResult<&str, DirectiveValue> {
    alt((map(parse_quoted_string, DirectiveValue::Text), parse_unquoted_value)).parse(input)
}

/// Parse a directive: `name` or `name=value`.
fn parse_directive(input: &str) -> IResult<&str, (Directive, DirectiveValue)> {
    map(
        (parse_ident, opt(preceded(char('='), parse_value))),
        |(name, value)| {
            (
                Directive::from(name),
                value.unwrap_or(DirectiveValue::Flag(true)),
            )
        },
    )
    .parse(input)
}

type Parsed<'a> = (Option<&'a str>, Vec<(Directive, DirectiveValue)>);

fn parse_info_inner(input: &str) -> IResult<&str, Parsed<'_>> {
    let (input, _) = multispace0.parse(input)?;
    let (input, language) = opt(parse_ident).parse(input)?;
    let (input, directives) = many0(preceded(multispace1, parse_directive)).parse(input)?;
    let (input, _) = multispace0.parse(input)?;
    Ok((input, (language, directives)))
}

/// Strips one pair of surrounding braces, as in `{.js export}`.
fn strip_braces(s: &str) -> &str {
    s.strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .unwrap_or(s)
}

/// Returns the block type of an info string, ignoring whatever follows it.
pub fn leading_type(info: &str) -> String {
    let inner = strip_braces(info.trim()).trim_start();
    parse_ident(inner)
        .map_or("", |(_, language)| language)
        .trim_start_matches('.')
        .to_string()
}

/// Parses an info string into a block type and directives.
pub fn parse_info_string(info: &str) -> Result<InfoString, String> {
    let inner = strip_braces(info.trim());
    match parse_info_inner(inner) {
        Ok(("", (language, items))) => {
            let mut directives = Directives::new();
            for (directive, value) in items {
                directives.set(directive, value);
            }
            Ok(InfoString {
                language: language.unwrap_or_default().trim_start_matches('.').to_string(),
                directives,
            })
        }
        Ok((remaining, _)) => Err(format!("Unexpected input: '{}'", remaining)),
        Err(e) => Err(format!("Parse error: {}", e)),
    }
}
