use anyhow::Result;
use std::io::Write;

use crate::index::MotifIndex;
use crate::search::SearchReport;

/// TSV：pattern_id, pattern, start, end（0-based, 半开区间）
pub fn write_matches<W: Write>(w: &mut W, index: &MotifIndex, report: &SearchReport) -> Result<()> {
    writeln!(w, "#pattern_id\tpattern\tstart\tend")?;
    for m in report.matches.matches() {
        let p = &index.patterns[m.pattern_id];
        writeln!(w, "{}\t{}\t{}\t{}", m.pattern_id, p.source, m.start, m.end)?;
    }
    Ok(())
}

pub fn write_summary<W: Write>(w: &mut W, text_len: usize, index: &MotifIndex, report: &SearchReport) -> Result<()> {
    writeln!(w, "text_length: {}", text_len)?;
    writeln!(w, "patterns: {}", index.patterns.len())?;
    writeln!(w, "gapped_patterns: {}", index.patterns.iter().filter(|p| p.has_gap()).count())?;
    writeln!(w, "automaton_nodes: {}", report.node_count)?;
    writeln!(w, "seed_hits: {}", report.stats.seed_hits)?;
    writeln!(w, "total_matches: {}", report.total_matches())?;
    Ok(())
}

/// 每个模式一行：pattern_id, 原始模式, 规范形式, 跨度, 命中次数
pub fn write_per_pattern<W: Write>(w: &mut W, index: &MotifIndex, report: &SearchReport) -> Result<()> {
    writeln!(w, "#pattern_id\tpattern\tcanonical\tspan\tmatches")?;
    let groups = report.matches.by_pattern();
    for p in &index.patterns {
        let n = groups.get(&p.id).map_or(0, Vec::len);
        writeln!(w, "{}\t{}\t{}\t{}\t{}", p.id, p.source, p.canonical(), p.total_len, n)?;
    }
    Ok(())
}
