use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use super::verify::Match;

/// 同一模式的多个种子可能验证出同一个区间
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// 每次验证成功都记录一次
    #[default]
    Keep,
    /// 相同 (pattern_id, start, end) 只记录第一次
    Collapse,
}

/// Accumulates confirmed matches for one scan, in scan order.
#[derive(Debug, Clone, Default)]
pub struct MatchCollector {
    policy: DuplicatePolicy,
    matches: Vec<Match>,
    seen: HashSet<Match>,
}

impl MatchCollector {
    pub fn new(policy: DuplicatePolicy) -> Self {
        Self { policy, matches: Vec::new(), seen: HashSet::new() }
    }

    /// Returns `false` when the match was collapsed into an earlier identical one.
    pub fn push(&mut self, m: Match) -> bool {
        if self.policy == DuplicatePolicy::Collapse && !self.seen.insert(m) {
            return false;
        }
        self.matches.push(m);
        true
    }

    pub fn matches(&self) -> &[Match] {
        &self.matches
    }

    pub fn total(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// 按模式分组，组内保持扫描顺序
    pub fn by_pattern(&self) -> BTreeMap<usize, Vec<(usize, usize)>> {
        let mut groups: BTreeMap<usize, Vec<(usize, usize)>> = BTreeMap::new();
        for m in &self.matches {
            groups.entry(m.pattern_id).or_default().push((m.start, m.end));
        }
        groups
    }

    pub fn reset(&mut self) {
        self.matches.clear();
        self.seen.clear();
    }
}
