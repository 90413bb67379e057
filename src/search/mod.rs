pub mod collect;
pub mod scan;
pub mod verify;

use rayon::prelude::*;

use crate::index::MotifIndex;

pub use collect::{DuplicatePolicy, MatchCollector};
pub use scan::{Scanner, SeedHit, UnknownSymbolPolicy};
pub use verify::{candidate_start, verify, Match, Rejection};

/// 搜索参数
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchOpt {
    pub on_unknown_symbol: UnknownSymbolPolicy,
    pub duplicates: DuplicatePolicy,
    /// 大于 1 时把文本切成相应数量的窗口并行扫描
    pub threads: usize,
}

impl Default for SearchOpt {
    fn default() -> Self {
        Self {
            on_unknown_symbol: UnknownSymbolPolicy::default(),
            duplicates: DuplicatePolicy::default(),
            threads: 1,
        }
    }
}

/// 扫描统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    pub seed_hits: usize,
    pub out_of_range: usize,
    pub mismatches: usize,
    pub confirmed: usize,
}

impl ScanStats {
    fn record(&mut self, r: &Result<Match, Rejection>) {
        self.seed_hits += 1;
        match r {
            Ok(_) => self.confirmed += 1,
            Err(Rejection::OutOfRange) => self.out_of_range += 1,
            Err(Rejection::LiteralMismatch { .. }) => self.mismatches += 1,
        }
    }

    fn merge(&mut self, other: &ScanStats) {
        self.seed_hits += other.seed_hits;
        self.out_of_range += other.out_of_range;
        self.mismatches += other.mismatches;
        self.confirmed += other.confirmed;
    }
}

#[derive(Debug, Clone)]
pub struct SearchReport {
    pub matches: MatchCollector,
    pub stats: ScanStats,
    pub node_count: usize,
}

impl SearchReport {
    pub fn total_matches(&self) -> usize {
        self.matches.total()
    }
}

/// 一个并行窗口：从 `scan_from` 开始扫描，只保留结束位置落在 [own_from, own_to) 的命中
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub scan_from: usize,
    pub own_from: usize,
    pub own_to: usize,
}

/// Split `[0, len)` into `parts` owned ranges, each preceded by `lead_in` extra symbols.
pub fn plan_windows(len: usize, parts: usize, lead_in: usize) -> Vec<Window> {
    let parts = parts.max(1).min(len.max(1));
    let step = (len + parts - 1) / parts;
    let mut out = Vec::with_capacity(parts);
    let mut own_from = 0usize;
    while own_from < len || out.is_empty() {
        let own_to = (own_from + step).min(len);
        out.push(Window { scan_from: own_from.saturating_sub(lead_in), own_from, own_to });
        if own_to == own_from {
            break;
        }
        own_from = own_to;
    }
    out
}

/// Scan one window and verify its hits against the full text.
fn scan_window(index: &MotifIndex, text: &[u8], w: Window, opt: &SearchOpt) -> (Vec<Match>, ScanStats) {
    let mut stats = ScanStats::default();
    let mut found = Vec::new();
    let scanner = Scanner::over_range(&index.automaton, text, w.scan_from, w.own_to, opt.on_unknown_symbol);
    for hit in scanner.filter(|h| h.end >= w.own_from) {
        let pattern = index.pattern(hit.seed.pattern_id);
        let r = verify(text, &hit, pattern, index.opt.n_policy);
        stats.record(&r);
        if let Ok(m) = r {
            found.push(m);
        }
    }
    (found, stats)
}

/// 单遍扫描文本：自动机产生种子命中 → 验证 → 收集。
///
/// `opt.threads > 1` 时按窗口并行（rayon），窗口之间重叠 `max_total_len - 1`，
/// 结果与顺序扫描完全一致（包括顺序与统计）。
pub fn search(index: &MotifIndex, text: &[u8], opt: &SearchOpt) -> SearchReport {
    let lead_in = index.max_total_len.saturating_sub(1);
    let windows = plan_windows(text.len(), opt.threads, lead_in);

    let parts: Vec<(Vec<Match>, ScanStats)> = if windows.len() > 1 {
        windows.par_iter().map(|&w| scan_window(index, text, w, opt)).collect()
    } else {
        windows.iter().map(|&w| scan_window(index, text, w, opt)).collect()
    };

    let mut matches = MatchCollector::new(opt.duplicates);
    let mut stats = ScanStats::default();
    for (found, s) in parts {
        stats.merge(&s);
        for m in found {
            matches.push(m);
        }
    }

    log::debug!(
        "scanned {} bp in {} window(s): {} seed hits, {} confirmed, {} out of range, {} mismatched",
        text.len(),
        windows.len(),
        stats.seed_hits,
        stats.confirmed,
        stats.out_of_range,
        stats.mismatches
    );

    SearchReport { matches, stats, node_count: index.node_count() }
}

/// Build an index from raw patterns and scan `text` once with default search options.
pub fn search_with_gaps<S: AsRef<str>>(
    text: &[u8],
    patterns: &[S],
    min_seed_len: usize,
) -> Result<SearchReport, crate::pattern::PatternError> {
    let opt = crate::index::IndexOpt { min_seed_len, ..Default::default() };
    let index = MotifIndex::build(patterns, opt)?;
    Ok(search(&index, text, &SearchOpt::default()))
}
