use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::util::dna::{Symbol, SIGMA};

pub type NodeId = u32;

/// 根节点，永久存在
pub const ROOT: NodeId = 0;
const NONE: NodeId = NodeId::MAX;

/// 节点输出项：某个模式的某个种子在此结束
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SeedRef {
    pub pattern_id: u32,
    /// 种子在模式坐标系中的偏移
    pub offset: u32,
    pub len: u32,
}

/// Insert phase of the automaton. `build()` freezes it.
#[derive(Debug, Clone)]
pub struct AutomatonBuilder {
    next: Vec<[NodeId; SIGMA]>,
    depth: Vec<u32>,
    out: Vec<Vec<SeedRef>>,
    seeds: usize,
}

impl Default for AutomatonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AutomatonBuilder {
    pub fn new() -> Self {
        Self { next: vec![[NONE; SIGMA]], depth: vec![0], out: vec![Vec::new()], seeds: 0 }
    }

    /// 将种子插入 trie，按需创建节点，在终点节点登记输出。空种子被忽略。
    pub fn insert(&mut self, word: &[Symbol], meta: SeedRef) {
        if word.is_empty() {
            return;
        }
        let mut v = ROOT as usize;
        for &s in word {
            let c = s.index();
            if self.next[v][c] == NONE {
                let id = self.next.len() as NodeId;
                self.next[v][c] = id;
                self.next.push([NONE; SIGMA]);
                self.depth.push(self.depth[v] + 1);
                self.out.push(Vec::new());
            }
            v = self.next[v][c] as usize;
        }
        self.out[v].push(meta);
        self.seeds += 1;
    }

    /// BFS 计算 fail 链接，同时补全每个节点的转移表并一次性继承输出集合。
    pub fn build(self) -> Automaton {
        let AutomatonBuilder { mut next, depth, mut out, seeds } = self;
        let n = next.len();
        let mut fail = vec![ROOT; n];
        let mut q: VecDeque<NodeId> = VecDeque::new();

        for c in 0..SIGMA {
            let v = next[0][c];
            if v == NONE {
                next[0][c] = ROOT;
            } else {
                fail[v as usize] = ROOT;
                q.push_back(v);
            }
        }

        while let Some(r) = q.pop_front() {
            let r = r as usize;
            for c in 0..SIGMA {
                let u = next[r][c];
                // 子节点的深度恰为父节点 +1；其余非 NONE 项已是补全后的转移
                if u != NONE && depth[u as usize] == depth[r] + 1 {
                    let f = next[fail[r] as usize][c];
                    fail[u as usize] = f;
                    let inherited = out[f as usize].clone();
                    out[u as usize].extend(inherited);
                    q.push_back(u);
                } else {
                    let via_fail = next[fail[r] as usize][c];
                    next[r][c] = via_fail;
                }
            }
        }

        let max_depth = depth.iter().copied().max().unwrap_or(0) as usize;
        log::debug!("automaton built: {} nodes, {} seeds, max depth {}", n, seeds, max_depth);
        Automaton { next, fail, depth, out, seeds, max_depth }
    }
}

/// 构建完成的 Aho–Corasick 自动机，只读。
///
/// 节点以稠密整数编号存放在 arena 中，0 号为根。每个节点的转移表对全部 5 个符号完整定义，
/// 输出集合已包含 fail 链上所有节点的输出。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Automaton {
    next: Vec<[NodeId; SIGMA]>,
    fail: Vec<NodeId>,
    depth: Vec<u32>,
    out: Vec<Vec<SeedRef>>,
    seeds: usize,
    max_depth: usize,
}

impl Automaton {
    #[inline]
    pub fn step(&self, state: NodeId, sym: Symbol) -> NodeId {
        self.next[state as usize][sym.index()]
    }

    #[inline]
    pub fn outputs(&self, state: NodeId) -> &[SeedRef] {
        &self.out[state as usize]
    }

    #[inline]
    pub fn fail(&self, state: NodeId) -> NodeId {
        self.fail[state as usize]
    }

    #[inline]
    pub fn depth(&self, state: NodeId) -> usize {
        self.depth[state as usize] as usize
    }

    /// Trie child of `state` via `sym`, if one was created during insertion.
    pub fn trie_child(&self, state: NodeId, sym: Symbol) -> Option<NodeId> {
        let v = self.step(state, sym);
        (self.depth(v) == self.depth(state) + 1).then_some(v)
    }

    /// Node reached by walking `word` from the root.
    pub fn walk(&self, word: &[Symbol]) -> NodeId {
        word.iter().fold(ROOT, |v, &s| self.step(v, s))
    }

    pub fn node_count(&self) -> usize {
        self.next.len()
    }

    pub fn seed_count(&self) -> usize {
        self.seeds
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}
