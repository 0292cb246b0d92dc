//! Line parser for pasted bilingual word lists.
//!
//! # Format
//! One card per line, term first:
//! ```text
//! look | 看
//! good morning :: 早上好
//! thank you	谢谢
//! hello 你好
//! ```
//!
//! Each line is split by the first strategy that applies, in this order:
//! tab, ` | `, ` :: `, the first Chinese character or full-width punctuation
//! mark, and finally the first run of whitespace.

use crate::error::{ParseError, Result};
use crate::types::Card;
use serde::{Deserialize, Serialize};

/// Demonstration deck the input box starts with.
pub const SAMPLE_INPUT: &str = "look | 看
look at... :: 看......
it's=it is | 它是
A red balloon, please. | 请给我一个红色的气球
hello | 你好
thank you | 谢谢
good morning :: 早上好
how are you | 你好吗
what is this | 这是什么
I love you | 我爱你";

const PIPE: &str = " | ";
const DOUBLE_COLON: &str = " :: ";

/// Full-width punctuation that marks the start of the translation.
const BOUNDARY_PUNCTUATION: &[char] = &[
    '，', '。', '！', '？', '；', '：', '“', '”', '‘', '’', '（', '）', '【', '】', '《', '》',
];

/// How a line was split into front and back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    Tab,
    Pipe,
    DoubleColon,
    ScriptBoundary,
    Whitespace,
}

/// A line split into its two sides, both trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLine<'a> {
    pub strategy: SplitStrategy,
    pub front: &'a str,
    pub back: String,
}

/// Cards parsed from an input block plus the number of lines dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedDeck {
    pub cards: Vec<Card>,
    pub skipped: usize,
}

impl ParsedDeck {
    /// Take the cards, failing when every line was skipped.
    pub fn into_cards(self) -> Result<Vec<Card>> {
        if self.cards.is_empty() {
            return Err(ParseError::NoValidCards {
                skipped: self.skipped,
            });
        }
        Ok(self.cards)
    }
}

/// Parse pasted text into cards.
///
/// Card ids are positions among the non-blank lines, so a skipped line still
/// uses up its id.
pub fn parse(raw: &str) -> Result<ParsedDeck> {
    if raw.trim().is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let mut deck = ParsedDeck::default();

    for (id, line) in entries(raw).enumerate() {
        match split_line(line) {
            Some(split) if !split.front.is_empty() && !split.back.is_empty() => {
                tracing::trace!(id, strategy = ?split.strategy, "split line");
                deck.cards.push(Card::new(id, split.front, split.back));
            }
            _ => {
                tracing::debug!(id, line, "skipping unparsable line");
                deck.skipped += 1;
            }
        }
    }

    Ok(deck)
}

/// Number of non-blank lines, i.e. how many cards the input claims to hold.
pub fn count_entries(raw: &str) -> usize {
    entries(raw).count()
}

fn entries(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Split a single line into front and back.
///
/// Returns `None` only when no strategy applies at all. A split with an empty
/// side (for example a line that starts with Chinese text) is returned as-is;
/// the caller decides whether to keep it.
pub fn split_line(line: &str) -> Option<SplitLine<'_>> {
    let line = line.trim();

    if let Some((front, back)) = line.split_once('\t') {
        return Some(SplitLine::new(SplitStrategy::Tab, front, back));
    }
    if let Some((front, back)) = line.split_once(PIPE) {
        return Some(SplitLine::new(SplitStrategy::Pipe, front, back));
    }
    if let Some((front, back)) = line.split_once(DOUBLE_COLON) {
        return Some(SplitLine::new(SplitStrategy::DoubleColon, front, back));
    }
    if let Some(pos) = line.find(is_boundary_char) {
        let (front, back) = line.split_at(pos);
        return Some(SplitLine::new(SplitStrategy::ScriptBoundary, front, back));
    }

    let mut tokens = line.split_whitespace();
    let front = tokens.next()?;
    let back = tokens.collect::<Vec<_>>().join(" ");
    if back.is_empty() {
        return None;
    }
    Some(SplitLine {
        strategy: SplitStrategy::Whitespace,
        front,
        back,
    })
}

impl<'a> SplitLine<'a> {
    fn new(strategy: SplitStrategy, front: &'a str, back: &str) -> Self {
        Self {
            strategy,
            front: front.trim(),
            back: back.trim().to_string(),
        }
    }
}

fn is_boundary_char(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c) || BOUNDARY_PUNCTUATION.contains(&c)
}
