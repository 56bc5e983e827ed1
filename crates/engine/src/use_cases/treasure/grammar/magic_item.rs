//! Magic item grammar.
//!
//! Entries end in a roll count and a numbered table, e.g.
//! `"1d4 rolls on table #3"` or `"1 roll on table #7"`. The count sits right
//! before the word roll/rolls and is either a number or dice to roll; the
//! table number follows a `#`.

use std::sync::OnceLock;

use super::{split_entries, CountToken, GrammarError};

static MAGIC_ENTRY_REGEX: OnceLock<regex_lite::Regex> = OnceLock::new();

fn magic_entry_regex() -> &'static regex_lite::Regex {
    MAGIC_ENTRY_REGEX.get_or_init(|| {
        regex_lite::Regex::new(r"(?i)(\S+)\s+rolls?\b.*#\s*(\S+)")
            .expect("MAGIC_ENTRY_REGEX pattern is invalid")
    })
}

/// One parsed magic item entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MagicItemEntry {
    pub count: CountToken,
    /// The token after `#`, kept raw; it is resolved to a worksheet later
    pub table_token: String,
}

impl MagicItemEntry {
    /// The numbered table this entry rolls on, if the token is a number.
    pub fn table_number(&self) -> Option<u32> {
        self.table_token
            .trim_end_matches(|c: char| !c.is_ascii_alphanumeric())
            .parse()
            .ok()
    }

    fn parse(entry: &str) -> Result<Self, GrammarError> {
        let caps = magic_entry_regex().captures(entry).ok_or_else(|| {
            GrammarError::malformed(entry, "expected '<count> roll(s) ... #<table>'")
        })?;
        Ok(Self {
            count: CountToken::parse(&caps[1], entry)?,
            table_token: caps[2].to_string(),
        })
    }
}

/// Parse a full magic item result text.
pub fn parse_magic_item_text(text: &str) -> Result<Vec<MagicItemEntry>, GrammarError> {
    split_entries(text)
        .into_iter()
        .map(MagicItemEntry::parse)
        .collect()
}
