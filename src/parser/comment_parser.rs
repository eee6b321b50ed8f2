//! Column comment heuristics
//!
//! Hand-written MySQL column comments often carry a display name followed by
//! an inline value table, for example:
//!
//! ```text
//! 任务状态 1-待处理 2-处理中 3-成功 4-失败
//! 任务状态 1：待处理 2：处理中
//! Phase parse_file:Parse collect_data:Collect
//! ```
//!
//! The comment is split into a leading name and a remainder, then a fixed,
//! ordered list of delimiter strategies is tried against the remainder. The
//! first strategy that matches anywhere wins; matches of different strategies
//! are never merged. A comment without any value table is kept whole as the
//! display name.

use std::sync::LazyLock;

use regex::Regex;

/// Leading name, first whitespace run, remainder
static NAME_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)\s+(.*)$").unwrap());

/// `1-待处理`, `A-Option`
static DASH_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z0-9_]+)-(\S+)").unwrap());

/// `1：待处理` (full-width colon)
static FULLWIDTH_COLON_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z0-9_]+)：(\S+)").unwrap());

/// `1:待处理`
static COLON_PAIR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Za-z0-9_]+):(\S+)").unwrap());

/// One `literal<delim>description` entry of an inline value table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumPair {
    pub literal: String,
    pub description: String,
}

impl EnumPair {
    pub fn new(literal: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            literal: literal.into(),
            description: description.into(),
        }
    }
}

/// Result of reading a column comment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedComment {
    pub display_name: String,
    /// Pairs in order of first appearance; empty when the comment has no value table
    pub enum_pairs: Vec<EnumPair>,
}

impl ParsedComment {
    fn name_only(display_name: &str) -> Self {
        Self {
            display_name: display_name.to_string(),
            enum_pairs: Vec::new(),
        }
    }

    pub fn has_enum(&self) -> bool {
        !self.enum_pairs.is_empty()
    }
}

/// A delimiter convention for inline value tables
#[derive(Debug, Clone, Copy)]
pub struct DelimiterStrategy {
    pub name: &'static str,
    pattern: &'static LazyLock<Regex>,
}

impl DelimiterStrategy {
    /// All pairs of this convention, or `None` when it does not match at all
    pub fn try_match(&self, text: &str) -> Option<Vec<EnumPair>> {
        let pattern: &Regex = self.pattern;
        if !pattern.is_match(text) {
            return None;
        }
        let pairs = pattern
            .captures_iter(text)
            .map(|caps| EnumPair::new(caps[1].trim(), caps[2].trim()))
            .collect();
        Some(pairs)
    }
}

/// Strategies in priority order
pub static DELIMITER_STRATEGIES: [DelimiterStrategy; 3] = [
    DelimiterStrategy {
        name: "dash",
        pattern: &DASH_PAIR_RE,
    },
    DelimiterStrategy {
        name: "fullwidth-colon",
        pattern: &FULLWIDTH_COLON_PAIR_RE,
    },
    DelimiterStrategy {
        name: "colon",
        pattern: &COLON_PAIR_RE,
    },
];

/// Run strategies in order; the first one that matches decides the result
fn first_match(strategies: &[DelimiterStrategy], text: &str) -> Option<Vec<EnumPair>> {
    strategies.iter().find_map(|s| s.try_match(text))
}

/// Collapse repeated literals: the last description wins, the first position is kept
fn dedup_last_wins(pairs: Vec<EnumPair>) -> Vec<EnumPair> {
    let mut result: Vec<EnumPair> = Vec::with_capacity(pairs.len());
    for pair in pairs {
        match result.iter_mut().find(|p| p.literal == pair.literal) {
            Some(existing) => existing.description = pair.description,
            None => result.push(pair),
        }
    }
    result
}

/// Extract a display name and an optional inline value table from a comment
pub fn parse_comment(comment: &str) -> ParsedComment {
    let comment = comment.trim();
    let Some(caps) = NAME_SPLIT_RE.captures(comment) else {
        return ParsedComment::name_only(comment);
    };
    let name = caps[1].trim();
    let remainder = &caps[2];

    let Some(pairs) = first_match(&DELIMITER_STRATEGIES, remainder) else {
        return ParsedComment::name_only(name);
    };
    let enum_pairs = dedup_last_wins(pairs);
    if enum_pairs.is_empty() {
        return ParsedComment::name_only(name);
    }

    ParsedComment {
        display_name: name.to_string(),
        enum_pairs,
    }
}
