//! Block extraction from literate documents.

use std::path::Path;

use crate::errors::{OmniError, Result};
use crate::model::Block;
use crate::text_location::TextLocation;

use super::delimiters::{extract_all_tokens, DelimitedToken, ExtractResult};
use super::info_string::{leading_type, parse_info_string, InfoString};

/// Extracts every fenced block of `input` in document order.
///
/// An unclosed fence is an error at the location of the opening fence. When
/// the info string does not parse, the block keeps its type and gets no
/// directives.
pub fn parse_blocks(input: &str, source_path: Option<&Path>) -> Result<Vec<Block>> {
    let locate = |location: TextLocation| match source_path {
        Some(path) => location.with_filename(path.to_path_buf()),
        None => location,
    };

    let mut blocks = Vec::new();
    for result in extract_all_tokens(input) {
        match result {
            ExtractResult::Token(token) => {
                let location = locate(token.location.clone());
                blocks.push(block_from_token(token, location));
            }
            ExtractResult::Unclosed { info, location, .. } => {
                return Err(OmniError::Parse {
                    location: locate(location),
                    message: format!("unclosed code fence `{}`", info),
                });
            }
            ExtractResult::NotDelimited(_) => {}
        }
    }
    Ok(blocks)
}

fn block_from_token(token: DelimitedToken, location: TextLocation) -> Block {
    let info = parse_info_string(&token.info).unwrap_or_else(|message| {
        tracing::warn!(
            "{}: ignoring directives in `{}`: {}",
            location,
            token.info,
            message
        );
        InfoString {
            language: leading_type(&token.info),
            ..InfoString::default()
        }
    });

    Block::new(info.language, token.content)
        .with_directives(info.directives)
        .with_location(location)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_parse_document() {
        let input = r#"# Settings

```json config
{"title": "Guide"}
```

Some prose.

```js export
console.log(_shared.title)
```

```
plain text
```
"#;
        let blocks = parse_blocks(input, Some(Path::new("guide.md"))).unwrap();

        assert_eq!(blocks.len(), 3);
        assert_eq!(blocks[0].language, "json");
        assert!(blocks[0].directives.is_config());
        assert_eq!(blocks[0].code, r#"{"title": "Guide"}"#);

        assert_eq!(blocks[1].language, "js");
        assert!(blocks[1].directives.is_export());
        assert_eq!(blocks[1].location.line, 9);
        assert_eq!(blocks[1].location.filename, Some(PathBuf::from("guide.md")));

        assert_eq!(blocks[2].language, "");
        assert!(blocks[2].directives.is_empty());
    }

    #[test]
    fn test_no_blocks() {
        let blocks = parse_blocks("just prose\n", None).unwrap();
        assert!(blocks.is_empty());
    }

    #[test]
    fn test_unclosed_fence_error() {
        let err = parse_blocks("text\n```js export\nx = 1\n", Some(Path::new("a.md"))).unwrap_err();
        match err {
            OmniError::Parse { location, message } => {
                assert_eq!(location.line, 2);
                assert_eq!(location.filename, Some(PathBuf::from("a.md")));
                assert!(message.contains("unclosed"));
            }
            other => panic!("Expected Parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_unparsable_info_string_keeps_type() {
        let input = "```js {1,3}\nhighlighted()\n```\n\n```css export\na {}\n```\n";
        let blocks = parse_blocks(input, None).unwrap();

        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].language, "js");
        assert!(blocks[0].directives.is_empty());
        assert_eq!(blocks[0].code, "highlighted()");
        assert_eq!(blocks[1].language, "css");
        assert!(blocks[1].directives.is_export());
    }
}
