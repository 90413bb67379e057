use serde::{Deserialize, Serialize};

use crate::index::automaton::{Automaton, NodeId, SeedRef, ROOT};
use crate::util::dna::Symbol;

/// 扫描时遇到 ACGTN 以外字符的处理方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UnknownSymbolPolicy {
    /// 回到根节点，丢弃进行中的部分匹配
    #[default]
    Reset,
    /// 当作 N 继续转移
    FoldToN,
}

/// 种子命中事件：`end` 为种子最后一个字符在文本中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedHit {
    pub end: usize,
    pub seed: SeedRef,
}

/// Single forward pass of the text through the automaton, yielding seed hits lazily.
pub struct Scanner<'a> {
    ac: &'a Automaton,
    text: &'a [u8],
    pos: usize,
    end: usize,
    state: NodeId,
    on_unknown: UnknownSymbolPolicy,
    // outputs of the current state not yet yielded, and the position they belong to
    pending: &'a [SeedRef],
    pending_end: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(ac: &'a Automaton, text: &'a [u8], on_unknown: UnknownSymbolPolicy) -> Self {
        Self::over_range(ac, text, 0, text.len(), on_unknown)
    }

    /// Scan `text[from..to]` starting at the root, reporting absolute positions.
    pub fn over_range(
        ac: &'a Automaton,
        text: &'a [u8],
        from: usize,
        to: usize,
        on_unknown: UnknownSymbolPolicy,
    ) -> Self {
        let end = to.min(text.len());
        Self {
            ac,
            text,
            pos: from.min(end),
            end,
            state: ROOT,
            on_unknown,
            pending: &[],
            pending_end: 0,
        }
    }
}

impl<'a> Iterator for Scanner<'a> {
    type Item = SeedHit;

    fn next(&mut self) -> Option<SeedHit> {
        loop {
            if let Some((first, rest)) = self.pending.split_first() {
                self.pending = rest;
                return Some(SeedHit { end: self.pending_end, seed: *first });
            }
            if self.pos >= self.end {
                return None;
            }

            let i = self.pos;
            self.pos += 1;
            let sym = match Symbol::try_from_byte(self.text[i]) {
                Some(s) => s,
                None => match self.on_unknown {
                    UnknownSymbolPolicy::Reset => {
                        self.state = ROOT;
                        continue;
                    }
                    UnknownSymbolPolicy::FoldToN => Symbol::N,
                },
            };
            let ac = self.ac;
            self.state = ac.step(self.state, sym);
            self.pending = ac.outputs(self.state);
            self.pending_end = i;
        }
    }
}
