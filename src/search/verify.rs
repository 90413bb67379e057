use super::scan::SeedHit;
use crate::pattern::{NPolicy, Pattern, Token};
use crate::util::dna::Symbol;

/// 经完整验证的匹配，文本坐标 [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Match {
    pub pattern_id: usize,
    pub start: usize,
    pub end: usize,
}

/// Why a seed hit did not become a match. Local to one candidate, never fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// 候选区间越出文本边界
    OutOfRange,
    /// 字面比较失败，`column` 为模式坐标中的位置
    LiteralMismatch { column: usize },
}

/// Pattern start implied by a seed hit, or `None` if it would precede the text.
#[inline]
pub fn candidate_start(hit: &SeedHit) -> Option<usize> {
    (hit.end + 1).checked_sub(hit.seed.len as usize + hit.seed.offset as usize)
}

/// 以种子命中为锚点，按 token 顺序回放整个模式。
///
/// 字面 token 逐字符比较（N 按 `n_policy` 决定是否通配），间隙 token 直接跳过。
pub fn verify(text: &[u8], hit: &SeedHit, pattern: &Pattern, n_policy: NPolicy) -> Result<Match, Rejection> {
    let start = candidate_start(hit).ok_or(Rejection::OutOfRange)?;
    let end = start
        .checked_add(pattern.total_len)
        .filter(|&e| e <= text.len())
        .ok_or(Rejection::OutOfRange)?;

    let n_wild = n_policy.n_is_wildcard_at_verify();
    let mut tpos = start;
    for tok in &pattern.tokens {
        match tok {
            Token::Literal(run) => {
                for (i, &p) in run.iter().enumerate() {
                    if p == Symbol::N && n_wild {
                        continue;
                    }
                    if Symbol::from_byte(text[tpos + i]) != p {
                        return Err(Rejection::LiteralMismatch { column: tpos + i - start });
                    }
                }
                tpos += run.len();
            }
            Token::Gap(k) => tpos += k,
        }
    }

    Ok(Match { pattern_id: pattern.id, start, end })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::automaton::SeedRef;
    use crate::pattern::ParsePolicy;

    fn pat(src: &str) -> Pattern {
        Pattern::parse(0, src, &ParsePolicy::default()).unwrap()
    }

    fn hit(end: usize, offset: u32, len: u32) -> SeedHit {
        SeedHit { end, seed: SeedRef { pattern_id: 0, offset, len } }
    }

    #[test]
    fn gapped_pattern_accepts_and_rejects() {
        let p = pat("AC.T");
        let text = b"ACGTACGTNN";
        assert_eq!(verify(text, &hit(1, 0, 2), &p, NPolicy::Legacy), Ok(Match { pattern_id: 0, start: 0, end: 4 }));
        assert_eq!(verify(text, &hit(5, 0, 2), &p, NPolicy::Legacy), Ok(Match { pattern_id: 0, start: 4, end: 8 }));
        assert_eq!(
            verify(b"ACGAACGT", &hit(1, 0, 2), &p, NPolicy::Legacy),
            Err(Rejection::LiteralMismatch { column: 3 })
        );
    }

    #[test]
    fn out_of_range_candidates_are_rejected() {
        let p = pat("ACG{5}T");
        // seed "T" at offset 8 ending at 3 would start before the text
        assert_eq!(verify(b"AAAT", &hit(3, 8, 1), &p, NPolicy::Legacy), Err(Rejection::OutOfRange));
        // seed "ACG" near the end: the span would run past the text
        assert_eq!(verify(b"TTTTACGAA", &hit(6, 0, 3), &p, NPolicy::Legacy), Err(Rejection::OutOfRange));
        assert_eq!(candidate_start(&hit(3, 8, 1)), None);
        assert_eq!(candidate_start(&hit(10, 2, 3)), Some(6));
    }

    #[test]
    fn offset_anchors_second_seed() {
        let p = pat("ACG..TTA");
        let text = b"GGACGCCTTAGG";
        // "TTA" at pattern offset 5 ends at text index 9
        assert_eq!(verify(text, &hit(9, 5, 3), &p, NPolicy::Legacy), Ok(Match { pattern_id: 0, start: 2, end: 10 }));
    }

    #[test]
    fn n_wildcard_depends_on_policy() {
        let p = pat("ANT");
        assert!(verify(b"AGT", &hit(2, 0, 3), &p, NPolicy::Legacy).is_ok());
        assert!(verify(b"AGT", &hit(2, 0, 3), &p, NPolicy::Wildcard).is_ok());
        assert_eq!(
            verify(b"AGT", &hit(2, 0, 3), &p, NPolicy::Strict),
            Err(Rejection::LiteralMismatch { column: 1 })
        );
        assert!(verify(b"ANT", &hit(2, 0, 3), &p, NPolicy::Strict).is_ok());
    }

    #[test]
    fn gap_positions_are_not_compared() {
        let p = pat("A{3}C");
        assert!(verify(b"AXYZC", &hit(0, 0, 1), &p, NPolicy::Legacy).is_ok());
    }

    #[test]
    fn span_overflow_is_out_of_range() {
        let mut p = pat("ACG");
        p.tokens.push(Token::Gap(usize::MAX - 3));
        p.total_len = usize::MAX;
        assert_eq!(verify(b"TTACGTT", &hit(4, 0, 3), &p, NPolicy::Legacy), Err(Rejection::OutOfRange));
    }
}
