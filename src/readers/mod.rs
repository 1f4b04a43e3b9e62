//! Readers for extracting blocks from literate documents.

mod blocks;
mod delimiters;
mod info_string;

pub use blocks::parse_blocks;
pub use delimiters::{extract_all_tokens, DelimitedToken, DelimitedTokenGetter, ExtractResult};
pub use info_string::{parse_info_string, InfoString};
