use std::io::Write;

use super::automaton::{Automaton, NodeId, ROOT};
use crate::util::dna::Symbol;

/// Export the automaton as Graphviz DOT. Only nodes with id `< limit` are drawn.
/// Solid edges are trie transitions, dashed gray edges are fail links.
pub fn write_dot<W: Write>(ac: &Automaton, w: &mut W, limit: usize) -> std::io::Result<()> {
    let n = ac.node_count().min(limit) as NodeId;

    writeln!(w, "digraph aho {{")?;
    writeln!(w, "  rankdir=LR;")?;
    writeln!(w, "  node [shape=circle,fontname=Helvetica];")?;

    for v in 0..n {
        let outs = ac.outputs(v).len();
        if outs > 0 {
            writeln!(w, "  n{} [label=\"{}\\nout={}\",style=filled,fillcolor=lightblue];", v, v, outs)?;
        } else {
            writeln!(w, "  n{} [label=\"{}\"];", v, v)?;
        }
    }

    for v in 0..n {
        for s in Symbol::ALL {
            if let Some(u) = ac.trie_child(v, s) {
                if u < n {
                    writeln!(w, "  n{} -> n{} [label=\"{}\"];", v, u, s.as_char())?;
                }
            }
        }
    }

    for v in 0..n {
        if v == ROOT {
            continue;
        }
        let f = ac.fail(v);
        if f < n {
            writeln!(w, "  n{} -> n{} [style=dashed,color=gray,label=\"f\"];", v, f)?;
        }
    }

    writeln!(w, "}}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::automaton::{AutomatonBuilder, SeedRef};
    use crate::util::dna::to_symbols;

    fn small() -> Automaton {
        let mut b = AutomatonBuilder::new();
        b.insert(&to_symbols(b"AC"), SeedRef { pattern_id: 0, offset: 0, len: 2 });
        b.insert(&to_symbols(b"C"), SeedRef { pattern_id: 1, offset: 0, len: 1 });
        b.build()
    }

    fn render(ac: &Automaton, limit: usize) -> String {
        let mut buf = Vec::new();
        write_dot(ac, &mut buf, limit).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn dot_lists_trie_and_fail_edges() {
        let dot = render(&small(), 1500);
        assert!(dot.starts_with("digraph aho {"));
        assert!(dot.trim_end().ends_with('}'));
        // nodes: 0 root, 1 A, 2 AC, 3 C
        assert!(dot.contains("n0 -> n1 [label=\"A\"];"));
        assert!(dot.contains("n1 -> n2 [label=\"C\"];"));
        assert!(dot.contains("n0 -> n3 [label=\"C\"];"));
        assert!(dot.contains("n2 -> n3 [style=dashed,color=gray,label=\"f\"];"));
        assert!(dot.contains("n2 [label=\"2\\nout=2\",style=filled,fillcolor=lightblue];"));
        assert!(!dot.contains("n0 -> n0"));
        // 补全出来的转移不属于 trie，不画
        assert!(!dot.contains("n2 -> n3 [label"));
    }

    #[test]
    fn dot_respects_node_limit() {
        let dot = render(&small(), 2);
        assert!(dot.contains("n0 -> n1"));
        assert!(!dot.contains("n2"));
        assert!(!dot.contains("n3"));
    }
}
