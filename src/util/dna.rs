use serde::{Deserialize, Serialize};

pub const SIGMA: usize = 5; // {0:A, 1:C, 2:G, 3:T, 4:N}

/// Automaton alphabet. Every input byte folds to exactly one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Symbol {
    A = 0,
    C = 1,
    G = 2,
    T = 3,
    N = 4,
}

impl Symbol {
    pub const ALL: [Symbol; SIGMA] = [Symbol::A, Symbol::C, Symbol::G, Symbol::T, Symbol::N];

    /// Total mapping: anything outside ACGTN (case-insensitive) becomes `N`.
    #[inline]
    pub fn from_byte(b: u8) -> Symbol {
        Self::try_from_byte(b).unwrap_or(Symbol::N)
    }

    /// Strict mapping used where an unknown character must be told apart from `N`.
    #[inline]
    pub fn try_from_byte(b: u8) -> Option<Symbol> {
        match b.to_ascii_uppercase() {
            b'A' => Some(Symbol::A),
            b'C' => Some(Symbol::C),
            b'G' => Some(Symbol::G),
            b'T' => Some(Symbol::T),
            b'N' => Some(Symbol::N),
            _ => None,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    #[inline]
    pub fn as_byte(self) -> u8 {
        match self {
            Symbol::A => b'A',
            Symbol::C => b'C',
            Symbol::G => b'G',
            Symbol::T => b'T',
            Symbol::N => b'N',
        }
    }

    #[inline]
    pub fn as_char(self) -> char {
        self.as_byte() as char
    }
}

pub fn to_symbols(seq: &[u8]) -> Vec<Symbol> {
    seq.iter().map(|&b| Symbol::from_byte(b)).collect()
}

pub fn symbols_to_string(run: &[Symbol]) -> String {
    run.iter().map(|s| s.as_char()).collect()
}

/// Uppercase and fold every non-ACGTN byte to `N`.
pub fn normalize_seq(seq: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(seq.len());
    for &b in seq {
        out.push(Symbol::from_byte(b).as_byte());
    }
    out
}
