use super::{NPolicy, Pattern, Token};
use crate::util::dna::Symbol;

/// 种子：模式中一段可由自动机直接识别的连续字面序列
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    pub content: Vec<Symbol>,
    pub pattern_id: usize,
    /// 种子在模式坐标系中的起点（前面所有 token 长度之和）
    pub offset: usize,
}

/// 抽取长度 >= `min_len` 的字面片段作为种子。
///
/// 若没有任何片段达到 `min_len`，退而选第一个非空片段（偏移同样按模式坐标计算），
/// 保证只要模式含字面序列就一定可被索引。纯间隙模式返回空。
///
/// `NPolicy::Wildcard` 下候选片段是字面 token 中不含 N 的最大子段。
pub fn extract_seeds(pattern: &Pattern, min_len: usize, n_policy: NPolicy) -> Vec<Seed> {
    let candidates = literal_segments(&pattern.tokens, n_policy);

    let mut seeds: Vec<Seed> = candidates
        .iter()
        .filter(|(_, run)| run.len() >= min_len)
        .map(|(off, run)| Seed { content: run.to_vec(), pattern_id: pattern.id, offset: *off })
        .collect();

    if seeds.is_empty() {
        if let Some((off, run)) = candidates.iter().find(|(_, run)| !run.is_empty()) {
            seeds.push(Seed { content: run.to_vec(), pattern_id: pattern.id, offset: *off });
        }
    }
    seeds
}

fn literal_segments(tokens: &[Token], n_policy: NPolicy) -> Vec<(usize, &[Symbol])> {
    let mut out = Vec::new();
    let mut offset = 0usize;
    for t in tokens {
        if let Token::Literal(run) = t {
            if n_policy == NPolicy::Wildcard {
                let mut start = 0usize;
                for (i, &s) in run.iter().enumerate() {
                    if s == Symbol::N {
                        if i > start {
                            out.push((offset + start, &run[start..i]));
                        }
                        start = i + 1;
                    }
                }
                if start < run.len() {
                    out.push((offset + start, &run[start..]));
                }
            } else {
                out.push((offset, run.as_slice()));
            }
        }
        offset += t.len();
    }
    out
}
