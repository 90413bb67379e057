//! 模式解析：把带间隙的模式字符串拆成 token 序列，并从中抽取可索引的种子。

pub mod seed;
pub mod tokenize;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::util::dna::{symbols_to_string, Symbol};

pub use seed::{extract_seeds, Seed};
pub use tokenize::tokenize;

/// 单个模式跨度的上限；种子偏移与长度以 `u32` 存放在自动机中
pub const MAX_PATTERN_LEN: usize = u32::MAX as usize;

/// 模式的基本单元：字面序列或定长间隙
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    /// 非空的字面序列
    Literal(Vec<Symbol>),
    /// 定长 "don't care" 区间，长度 > 0
    Gap(usize),
}

impl Token {
    #[inline]
    pub fn len(&self) -> usize {
        match self {
            Token::Literal(run) => run.len(),
            Token::Gap(k) => *k,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Token::Literal(_))
    }
}

/// What the tokenizer does with a character outside `ACGTN . { }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnrecognizedSymbol {
    #[default]
    Drop,
    Error,
}

/// What the tokenizer does with `{` that has no closing brace or a non-numeric body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MalformedGap {
    #[default]
    DegradeToOne,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ParsePolicy {
    pub on_unrecognized_symbol: UnrecognizedSymbol,
    pub on_malformed_gap: MalformedGap,
}

impl ParsePolicy {
    pub fn strict() -> Self {
        Self {
            on_unrecognized_symbol: UnrecognizedSymbol::Error,
            on_malformed_gap: MalformedGap::Error,
        }
    }
}

/// `N` 在建索引和验证两个阶段的语义
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NPolicy {
    /// 种子内 N 是普通字母（只匹配文本中的 N），验证时 N 为通配符
    #[default]
    Legacy,
    /// 两阶段一致视为通配符：种子只取不含 N 的片段
    Wildcard,
    /// 两阶段一致视为普通字母
    Strict,
}

impl NPolicy {
    #[inline]
    pub fn n_is_wildcard_at_verify(self) -> bool {
        !matches!(self, NPolicy::Strict)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern '{pattern}': malformed gap syntax at column {column}")]
    MalformedGap { pattern: String, column: usize },
    #[error("pattern '{pattern}': unrecognized symbol '{symbol}' at column {column}")]
    UnrecognizedSymbol {
        pattern: String,
        symbol: char,
        column: usize,
    },
    #[error("pattern '{pattern}' spans more than {max} positions")]
    TooLong { pattern: String, max: usize },
    #[error("pattern #{id} '{pattern}' has no literal to index")]
    Unindexable { id: usize, pattern: String },
}

/// A parsed, immutable pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub id: usize,
    pub source: String,
    pub tokens: Vec<Token>,
    /// Sum of literal and gap lengths; the span a full match covers in the text.
    pub total_len: usize,
}

impl Pattern {
    pub fn parse(id: usize, source: &str, policy: &ParsePolicy) -> Result<Self, PatternError> {
        let tokens = tokenize(source, policy)?;
        let total_len = tokens
            .iter()
            .try_fold(0usize, |acc, t| acc.checked_add(t.len()))
            .filter(|&t| t <= MAX_PATTERN_LEN)
            .ok_or_else(|| PatternError::TooLong { pattern: source.to_string(), max: MAX_PATTERN_LEN })?;
        Ok(Self { id, source: source.to_string(), tokens, total_len })
    }

    pub fn has_literal(&self) -> bool {
        self.tokens.iter().any(Token::is_literal)
    }

    pub fn has_gap(&self) -> bool {
        self.tokens.iter().any(|t| !t.is_literal())
    }

    /// Canonical rendering: literal runs as letters, gaps as `{k}`.
    pub fn canonical(&self) -> String {
        let mut out = String::with_capacity(self.total_len);
        for t in &self.tokens {
            match t {
                Token::Literal(run) => out.push_str(&symbols_to_string(run)),
                Token::Gap(k) => out.push_str(&format!("{{{}}}", k)),
            }
        }
        out
    }
}

/// Pattern-provider cleaning: strip all whitespace and uppercase.
pub fn clean_pattern(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| c.to_ascii_uppercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_length_counts_literals_and_gaps() {
        let p = Pattern::parse(0, "AC.T", &ParsePolicy::default()).unwrap();
        assert_eq!(p.total_len, 4);
        assert!(p.has_gap());
        assert!(p.has_literal());

        let p = Pattern::parse(1, "ACG{10}TT..A", &ParsePolicy::default()).unwrap();
        assert_eq!(p.total_len, 3 + 10 + 2 + 2 + 1);
        assert_eq!(p.canonical(), "ACG{10}TT{2}A");
    }

    #[test]
    fn pure_gap_pattern_has_no_literal() {
        let p = Pattern::parse(0, "..{3}", &ParsePolicy::default()).unwrap();
        assert!(!p.has_literal());
        assert_eq!(p.total_len, 5);
    }

    #[test]
    fn huge_gaps_stay_within_the_span_limit() {
        let p = Pattern::parse(0, "ACG{18446744073709551614}T", &ParsePolicy::default()).unwrap();
        assert_eq!(p.total_len, 5);
        let p = Pattern::parse(0, "A{4294967294}", &ParsePolicy::default()).unwrap();
        assert_eq!(p.total_len, MAX_PATTERN_LEN);
    }

    #[test]
    fn clean_pattern_strips_whitespace_and_uppercases() {
        assert_eq!(clean_pattern(" ac g.\tt\r\n"), "ACG.T");
    }

    #[test]
    fn n_policy_verify_semantics() {
        assert!(NPolicy::Legacy.n_is_wildcard_at_verify());
        assert!(NPolicy::Wildcard.n_is_wildcard_at_verify());
        assert!(!NPolicy::Strict.n_is_wildcard_at_verify());
    }
}
