use anyhow::{bail, Result};

use crate::util::dna::normalize_seq;

/// 线性同余随机数发生器，固定种子保证测试集可复现
#[derive(Debug, Clone)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        self.state >> 16
    }

    /// Uniform-ish value in `[0, n)`; `n` must be non-zero.
    pub fn below(&mut self, n: usize) -> usize {
        let hi = self.next_u32() as u64;
        let lo = self.next_u32() as u64;
        (((hi << 16) | lo) % n as u64) as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeneratorOpt {
    pub count: usize,
    pub length: usize,
    /// 被替换成 `.` 的位置比例，0 表示不加间隙
    pub gap_fraction: f64,
}

/// 默认生成的三组 (数量, 长度)
pub const DEFAULT_SETS: [(usize, usize); 3] = [(10, 10), (50, 12), (200, 20)];

/// Replace `max(1, round(len * gap_fraction))` distinct positions of `motif` with `.`.
pub fn add_gaps(motif: &[u8], gap_fraction: f64, rng: &mut Lcg) -> Vec<u8> {
    let mut out = motif.to_vec();
    if gap_fraction <= 0.0 || out.is_empty() {
        return out;
    }
    let to_gap = ((out.len() as f64 * gap_fraction).round() as usize).max(1).min(out.len());

    // partial Fisher–Yates over positions
    let mut pos: Vec<usize> = (0..out.len()).collect();
    for i in 0..to_gap {
        let j = i + rng.below(pos.len() - i);
        pos.swap(i, j);
        out[pos[i]] = b'.';
    }
    out
}

/// 从参考序列的随机位置截取 motif，并按比例打上间隙。
pub fn generate_patterns(text: &[u8], opt: &GeneratorOpt, rng: &mut Lcg) -> Result<Vec<String>> {
    if opt.length == 0 {
        bail!("pattern length must be positive");
    }
    if !(0.0..1.0).contains(&opt.gap_fraction) {
        bail!("gap fraction must be in [0, 1), got {}", opt.gap_fraction);
    }
    if text.len() <= opt.length {
        bail!("sequence of {} bp is too short for {} bp patterns", text.len(), opt.length);
    }

    let span = text.len() - opt.length;
    let mut pats = Vec::with_capacity(opt.count);
    for _ in 0..opt.count {
        let p = rng.below(span);
        let motif = add_gaps(&normalize_seq(&text[p..p + opt.length]), opt.gap_fraction, rng);
        pats.push(String::from_utf8_lossy(&motif).into_owned());
    }
    Ok(pats)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEXT: &[u8] = b"ACGTTGCAAGGCTTACCGATAGCTAGGATCCATGCAAGT";

    #[test]
    fn same_seed_same_patterns() {
        let opt = GeneratorOpt { count: 5, length: 8, gap_fraction: 0.25 };
        let a = generate_patterns(TEXT, &opt, &mut Lcg::new(123_456)).unwrap();
        let b = generate_patterns(TEXT, &opt, &mut Lcg::new(123_456)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 5);
    }

    #[test]
    fn patterns_come_from_text_with_exact_gap_count() {
        let opt = GeneratorOpt { count: 20, length: 10, gap_fraction: 0.2 };
        let pats = generate_patterns(TEXT, &opt, &mut Lcg::new(7)).unwrap();
        let text = std::str::from_utf8(TEXT).unwrap();
        for p in &pats {
            assert_eq!(p.len(), 10);
            assert_eq!(p.bytes().filter(|&b| b == b'.').count(), 2);
            // 把 '.' 视作通配，模式必须能在原序列中找到
            let found = (0..=text.len() - 10).any(|s| {
                p.bytes().zip(text[s..s + 10].bytes()).all(|(a, b)| a == b'.' || a == b)
            });
            assert!(found, "{} not found in text", p);
        }
    }

    #[test]
    fn small_fraction_still_adds_one_gap() {
        let out = add_gaps(b"ACGTACGTAC", 0.01, &mut Lcg::new(1));
        assert_eq!(out.iter().filter(|&&b| b == b'.').count(), 1);
        assert_eq!(add_gaps(b"ACGT", 0.0, &mut Lcg::new(1)), b"ACGT");
    }

    #[test]
    fn rejects_bad_options() {
        let mut rng = Lcg::new(1);
        assert!(generate_patterns(b"ACGT", &GeneratorOpt { count: 1, length: 4, gap_fraction: 0.0 }, &mut rng).is_err());
        assert!(generate_patterns(TEXT, &GeneratorOpt { count: 1, length: 4, gap_fraction: 1.0 }, &mut rng).is_err());
        assert!(generate_patterns(TEXT, &GeneratorOpt { count: 1, length: 0, gap_fraction: 0.0 }, &mut rng).is_err());
    }
}
