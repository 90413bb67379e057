use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::automaton::{Automaton, AutomatonBuilder, SeedRef};
use crate::pattern::{extract_seeds, NPolicy, ParsePolicy, Pattern, PatternError, MAX_PATTERN_LEN};

/// 纯间隙模式（无字面序列）的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnindexablePolicy {
    /// 接受但永远不会命中，记录 warn 日志
    #[default]
    Accept,
    Reject,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexOpt {
    pub min_seed_len: usize,
    pub parse: ParsePolicy,
    pub n_policy: NPolicy,
    pub unindexable: UnindexablePolicy,
}

impl Default for IndexOpt {
    fn default() -> Self {
        Self {
            min_seed_len: 3,
            parse: ParsePolicy::default(),
            n_policy: NPolicy::default(),
            unindexable: UnindexablePolicy::default(),
        }
    }
}

impl IndexOpt {
    /// Settings in `requested` that were changed from their defaults but disagree with `self`.
    /// A loaded index keeps the options it was built with, so these have no effect.
    pub fn ignored_overrides(&self, requested: &IndexOpt) -> Vec<&'static str> {
        let d = IndexOpt::default();
        let mut out = Vec::new();
        if requested.min_seed_len != d.min_seed_len && requested.min_seed_len != self.min_seed_len {
            out.push("min_seed_len");
        }
        if requested.parse != d.parse && requested.parse != self.parse {
            out.push("parse");
        }
        if requested.n_policy != d.n_policy && requested.n_policy != self.n_policy {
            out.push("n_policy");
        }
        if requested.unindexable != d.unindexable && requested.unindexable != self.unindexable {
            out.push("unindexable");
        }
        out
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexMeta {
    pub pattern_file: Option<String>,
    pub build_args: Option<String>,
    pub build_timestamp: Option<String>,
}

/// 编译后的模式集合：解析好的模式 + 种子自动机。构建后只读，可跨线程共享。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotifIndex {
    pub patterns: Vec<Pattern>,
    pub automaton: Automaton,
    pub opt: IndexOpt,
    pub meta: IndexMeta,
    /// 最长模式跨度，决定并行分窗的重叠长度
    pub max_total_len: usize,
}

impl MotifIndex {
    /// Parse every pattern, extract its seeds and build the automaton.
    /// Pattern ids are positions in `sources`.
    pub fn build<S: AsRef<str>>(sources: &[S], opt: IndexOpt) -> Result<Self, PatternError> {
        let mut patterns = Vec::with_capacity(sources.len());
        let mut builder = AutomatonBuilder::new();
        let mut unindexable = 0usize;

        for (id, src) in sources.iter().enumerate() {
            let pattern = Pattern::parse(id, src.as_ref(), &opt.parse)?;
            let seeds = extract_seeds(&pattern, opt.min_seed_len, opt.n_policy);
            if seeds.is_empty() {
                if opt.unindexable == UnindexablePolicy::Reject {
                    return Err(PatternError::Unindexable { id, pattern: pattern.source });
                }
                log::warn!("pattern #{} '{}' has no literal and can never match", id, pattern.source);
                unindexable += 1;
            }
            for seed in &seeds {
                let too_long = || PatternError::TooLong { pattern: pattern.source.clone(), max: MAX_PATTERN_LEN };
                let offset = u32::try_from(seed.offset).map_err(|_| too_long())?;
                let len = u32::try_from(seed.content.len()).map_err(|_| too_long())?;
                builder.insert(&seed.content, SeedRef { pattern_id: id as u32, offset, len });
            }
            patterns.push(pattern);
        }

        let automaton = builder.build();
        let max_total_len = patterns.iter().map(|p| p.total_len).max().unwrap_or(0);
        log::debug!(
            "indexed {} patterns ({} unindexable), {} automaton nodes",
            patterns.len(),
            unindexable,
            automaton.node_count()
        );

        Ok(Self { patterns, automaton, opt, meta: IndexMeta::default(), max_total_len })
    }

    pub fn set_meta(&mut self, meta: IndexMeta) {
        self.meta = meta;
    }

    #[inline]
    pub fn pattern(&self, id: u32) -> &Pattern {
        &self.patterns[id as usize]
    }

    pub fn node_count(&self) -> usize {
        self.automaton.node_count()
    }

    pub fn save_to_file(&self, path: &str) -> Result<()> {
        let f = std::fs::File::create(path)?;
        let mut w = std::io::BufWriter::new(f);
        bincode::serialize_into(&mut w, self)?;
        Ok(())
    }

    pub fn load_from_file(path: &str) -> Result<Self> {
        let f = std::fs::File::open(path)?;
        let idx: Self = bincode::deserialize_from(std::io::BufReader::new(f))?;
        Ok(idx)
    }
}
