use anyhow::{Context, Result};
use std::io::{BufRead, Write};

use crate::pattern::clean_pattern;

/// One pattern per line; whitespace removed, uppercased, blank lines skipped.
pub fn read_patterns_from<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut out = Vec::new();
    for line in reader.lines() {
        let clean = clean_pattern(&line?);
        if !clean.is_empty() {
            out.push(clean);
        }
    }
    Ok(out)
}

pub fn read_patterns(path: &str) -> Result<Vec<String>> {
    let fh = std::fs::File::open(path).with_context(|| format!("cannot open pattern file '{}'", path))?;
    read_patterns_from(std::io::BufReader::new(fh)).with_context(|| format!("cannot read pattern file '{}'", path))
}

pub fn write_patterns(path: &str, patterns: &[String]) -> Result<()> {
    let fh = std::fs::File::create(path).with_context(|| format!("cannot create '{}'", path))?;
    let mut w = std::io::BufWriter::new(fh);
    for p in patterns {
        writeln!(w, "{}", p)?;
    }
    w.flush()?;
    Ok(())
}
