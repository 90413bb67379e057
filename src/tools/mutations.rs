use std::fmt;

/// 两条序列之间的一处差异，位置均为 0-based
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    Snp { pos: usize, from: char, to: char },
    Deletion { pos: usize, base: char },
    Insertion { pos: usize, base: char },
    Complex { pos_a: usize, pos_b: usize },
    DeletionAtEnd { base: char },
    InsertionAtEnd { base: char },
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Snp { pos, from, to } => write!(f, "SNP at pos {}: {} → {}", pos, from, to),
            Change::Deletion { pos, base } => write!(f, "Deletion at pos {}: deleted {}", pos, base),
            Change::Insertion { pos, base } => write!(f, "Insertion at pos {}: inserted {}", pos, base),
            Change::Complex { pos_a, pos_b } => write!(f, "Complex mutation around pos {}/{}", pos_a, pos_b),
            Change::DeletionAtEnd { base } => write!(f, "Deletion at end: {}", base),
            Change::InsertionAtEnd { base } => write!(f, "Insertion at end: {}", base),
        }
    }
}

/// 贪心双指针比较：每处不一致只向前看一个字符来判断 SNP / 缺失 / 插入。
///
/// 不做全局对齐，相邻的多处变化可能被归为 `Complex`。
pub fn compare_sequences(a: &[u8], b: &[u8]) -> Vec<Change> {
    let mut changes = Vec::new();
    let (la, lb) = (a.len(), b.len());
    let (mut i, mut j) = (0usize, 0usize);

    while i < la && j < lb {
        if a[i] == b[j] {
            i += 1;
            j += 1;
        } else if i + 1 < la && j + 1 < lb && a[i + 1] == b[j + 1] {
            changes.push(Change::Snp { pos: i, from: a[i] as char, to: b[j] as char });
            i += 1;
            j += 1;
        } else if i + 1 < la && a[i + 1] == b[j] {
            changes.push(Change::Deletion { pos: i, base: a[i] as char });
            i += 1;
        } else if j + 1 < lb && a[i] == b[j + 1] {
            changes.push(Change::Insertion { pos: i, base: b[j] as char });
            j += 1;
        } else {
            changes.push(Change::Complex { pos_a: i, pos_b: j });
            i += 1;
            j += 1;
        }
    }

    changes.extend(a[i..].iter().map(|&c| Change::DeletionAtEnd { base: c as char }));
    changes.extend(b[j..].iter().map(|&c| Change::InsertionAtEnd { base: c as char }));
    changes
}
