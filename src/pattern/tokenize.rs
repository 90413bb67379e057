use super::{MalformedGap, ParsePolicy, PatternError, Token, UnrecognizedSymbol, MAX_PATTERN_LEN};
use crate::util::dna::Symbol;

/// 从左到右扫描模式字符串，生成 token 序列。
///
/// - `ACGTN` 的最大连续段 → `Literal`
/// - 连续 k 个 `.` → `Gap(k)`
/// - `{k}` → `Gap(k)`（`{0}` 不产生 token）
/// - 未闭合、内容非数字或使总长超过 `MAX_PATTERN_LEN` 的 `{` → 按策略降级为 `Gap(1)`，只消费 `{` 本身
/// - 其它字符 → 按策略丢弃或报错
pub fn tokenize(pat: &str, policy: &ParsePolicy) -> Result<Vec<Token>, PatternError> {
    let s: Vec<char> = pat.chars().collect();
    let n = s.len();
    let mut toks = Vec::new();
    let mut i = 0usize;
    // 已产生 token 的长度之和
    let mut span = 0usize;

    while i < n {
        let c = s[i];
        if let Some(sym) = literal_symbol(c) {
            let mut run = vec![sym];
            let mut j = i + 1;
            while j < n {
                match literal_symbol(s[j]) {
                    Some(x) => run.push(x),
                    None => break,
                }
                j += 1;
            }
            span = span.saturating_add(run.len());
            toks.push(Token::Literal(run));
            i = j;
        } else if c == '.' {
            let mut j = i;
            while j < n && s[j] == '.' {
                j += 1;
            }
            span = span.saturating_add(j - i);
            toks.push(Token::Gap(j - i));
            i = j;
        } else if c == '{' {
            let fits = |&(k, _): &(usize, usize)| span.checked_add(k).map_or(false, |t| t <= MAX_PATTERN_LEN);
            match braced_gap(&s, i).filter(fits) {
                Some((k, close)) => {
                    if k > 0 {
                        span += k;
                        toks.push(Token::Gap(k));
                    }
                    i = close + 1;
                }
                None => {
                    if policy.on_malformed_gap == MalformedGap::Error {
                        return Err(PatternError::MalformedGap { pattern: pat.to_string(), column: i });
                    }
                    span = span.saturating_add(1);
                    toks.push(Token::Gap(1));
                    i += 1;
                }
            }
        } else {
            if policy.on_unrecognized_symbol == UnrecognizedSymbol::Error {
                return Err(PatternError::UnrecognizedSymbol {
                    pattern: pat.to_string(),
                    symbol: c,
                    column: i,
                });
            }
            i += 1;
        }
    }

    Ok(toks)
}

#[inline]
fn literal_symbol(c: char) -> Option<Symbol> {
    if c.is_ascii_uppercase() {
        Symbol::try_from_byte(c as u8)
    } else {
        None
    }
}

/// Parse `{k}` starting at `open`. Returns the gap length and the index of `}`.
fn braced_gap(s: &[char], open: usize) -> Option<(usize, usize)> {
    let close = open + 1 + s[open + 1..].iter().position(|&c| c == '}')?;
    let body = &s[open + 1..close];
    if body.is_empty() || !body.iter().all(char::is_ascii_digit) {
        return None;
    }
    let k = body.iter().collect::<String>().parse::<usize>().ok()?;
    Some((k, close))
}
