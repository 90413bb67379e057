pub mod automaton;
pub mod dot;
pub mod motif_index;

pub use automaton::{Automaton, AutomatonBuilder, NodeId, SeedRef, ROOT};
pub use motif_index::{IndexMeta, IndexOpt, MotifIndex, UnindexablePolicy};
