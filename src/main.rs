use anyhow::{anyhow, bail, Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::io::Write;
use std::time::Instant;

use gapseek::index::{self, IndexMeta, IndexOpt, MotifIndex, UnindexablePolicy};
use gapseek::io::{fasta, patterns, report};
use gapseek::pattern::{MalformedGap, NPolicy, ParsePolicy, UnrecognizedSymbol};
use gapseek::search::{self, DuplicatePolicy, SearchOpt, UnknownSymbolPolicy};
use gapseek::tools::{generate, mutations};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(name = "gapseek", author, version, about = "Gapped multi-pattern DNA motif search", arg_required_else_help = true)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compile a pattern file into a reusable motif index (.gsx)
    Index {
        /// Pattern file, one pattern per line
        patterns: String,
        /// Output prefix for the index file
        #[arg(short, long, default_value = "motifs")]
        output: String,
        #[command(flatten)]
        build: BuildArgs,
    },
    /// Search a FASTA sequence for gapped motifs
    Search {
        /// Sequence FASTA file (all records are concatenated)
        fasta: String,
        /// Pattern file, one pattern per line
        #[arg(required_unless_present = "index")]
        patterns: Option<String>,
        /// Prebuilt motif index (.gsx) instead of a pattern file
        #[arg(short = 'i', long = "index", conflicts_with = "patterns")]
        index: Option<String>,
        /// Output TSV path (stdout if omitted)
        #[arg(short, long)]
        out: Option<String>,
        /// Print per-pattern match counts instead of individual matches
        #[arg(long)]
        per_pattern: bool,
        /// Record a span once even if several seeds confirm it
        #[arg(long)]
        collapse_duplicates: bool,
        /// Treat non-ACGTN text characters as N instead of resetting the automaton
        #[arg(long)]
        fold_unknown: bool,
        #[arg(short = 't', long = "threads", default_value_t = 1)]
        threads: usize,
        #[command(flatten)]
        build: BuildArgs,
    },
    /// Export the seed automaton as Graphviz DOT
    Dot {
        /// Pattern file, one pattern per line
        #[arg(required_unless_present = "index")]
        patterns: Option<String>,
        #[arg(short = 'i', long = "index", conflicts_with = "patterns")]
        index: Option<String>,
        #[arg(short, long, default_value = "automaton.dot")]
        out: String,
        /// Draw at most this many nodes
        #[arg(long, default_value_t = 1500)]
        limit: usize,
        #[command(flatten)]
        build: BuildArgs,
    },
    /// Sample random (optionally gapped) test patterns from a FASTA sequence
    Generate {
        fasta: String,
        /// Output files are <prefix>_<count>.txt
        #[arg(long, default_value = "patterns")]
        prefix: String,
        /// Fraction of positions replaced by '.' (0.0 - 0.9)
        #[arg(long, default_value_t = 0.2)]
        gaps: f64,
        #[arg(long, default_value_t = 123_456)]
        seed: u32,
        /// Pattern set as COUNTxLENGTH, repeatable (default 10x10, 50x12, 200x20)
        #[arg(long = "set", value_parser = parse_set)]
        sets: Vec<(usize, usize)>,
    },
    /// Greedy character-level diff of two sequences
    Diff { seq1: String, seq2: String },
}

#[derive(Args, Debug, Clone)]
struct BuildArgs {
    /// Minimum literal length used as an automaton seed
    #[arg(short = 'k', long = "min-seed-len", default_value_t = 3)]
    min_seed_len: usize,
    /// Meaning of N in patterns
    #[arg(long = "n-policy", value_enum, default_value_t = CliNPolicy::Legacy)]
    n_policy: CliNPolicy,
    /// Fail on characters outside ACGTN . { } instead of dropping them
    #[arg(long)]
    strict_symbols: bool,
    /// Fail on unterminated or non-numeric {k} instead of reading it as a 1-gap
    #[arg(long)]
    strict_gaps: bool,
    /// Fail on patterns without any literal
    #[arg(long)]
    reject_unindexable: bool,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
enum CliNPolicy {
    /// N concrete in seeds, wildcard during verification
    Legacy,
    /// N is a wildcard everywhere
    Wildcard,
    /// N only matches N
    Strict,
}

impl From<&BuildArgs> for IndexOpt {
    fn from(a: &BuildArgs) -> Self {
        IndexOpt {
            min_seed_len: a.min_seed_len,
            parse: ParsePolicy {
                on_unrecognized_symbol: if a.strict_symbols { UnrecognizedSymbol::Error } else { UnrecognizedSymbol::Drop },
                on_malformed_gap: if a.strict_gaps { MalformedGap::Error } else { MalformedGap::DegradeToOne },
            },
            n_policy: match a.n_policy {
                CliNPolicy::Legacy => NPolicy::Legacy,
                CliNPolicy::Wildcard => NPolicy::Wildcard,
                CliNPolicy::Strict => NPolicy::Strict,
            },
            unindexable: if a.reject_unindexable { UnindexablePolicy::Reject } else { UnindexablePolicy::Accept },
        }
    }
}

fn parse_set(s: &str) -> Result<(usize, usize), String> {
    let (c, l) = s.split_once(|ch: char| ch == 'x' || ch == 'X').ok_or_else(|| format!("expected COUNTxLENGTH, got '{}'", s))?;
    let count = c.parse::<usize>().map_err(|_| format!("invalid count in '{}'", s))?;
    let length = l.parse::<usize>().map_err(|_| format!("invalid length in '{}'", s))?;
    Ok((count, length))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => log::LevelFilter::Info,
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    match cli.command {
        Commands::Index { patterns, output, build } => run_index(&patterns, &output, &build),
        Commands::Search {
            fasta,
            patterns,
            index,
            out,
            per_pattern,
            collapse_duplicates,
            fold_unknown,
            threads,
            build,
        } => {
            let opt = SearchOpt {
                on_unknown_symbol: if fold_unknown { UnknownSymbolPolicy::FoldToN } else { UnknownSymbolPolicy::Reset },
                duplicates: if collapse_duplicates { DuplicatePolicy::Collapse } else { DuplicatePolicy::Keep },
                threads: threads.max(1),
            };
            let idx = obtain_index(patterns.as_deref(), index.as_deref(), &build)?;
            run_search(&fasta, &idx, out.as_deref(), per_pattern, opt)
        }
        Commands::Dot { patterns, index, out, limit, build } => {
            let idx = obtain_index(patterns.as_deref(), index.as_deref(), &build)?;
            run_dot(&idx, &out, limit)
        }
        Commands::Generate { fasta, prefix, gaps, seed, sets } => run_generate(&fasta, &prefix, gaps, seed, &sets),
        Commands::Diff { seq1, seq2 } => {
            let changes = mutations::compare_sequences(seq1.as_bytes(), seq2.as_bytes());
            println!("Differences:");
            for c in &changes {
                println!(" - {}", c);
            }
            Ok(())
        }
    }
}

fn build_index(pattern_path: &str, build: &BuildArgs) -> Result<MotifIndex> {
    let pats = patterns::read_patterns(pattern_path)?;
    if pats.is_empty() {
        bail!("pattern file '{}' contains no patterns", pattern_path);
    }
    let t0 = Instant::now();
    let mut idx = MotifIndex::build(pats.as_slice(), IndexOpt::from(build))
        .with_context(|| format!("cannot compile patterns from '{}'", pattern_path))?;
    idx.set_meta(IndexMeta {
        pattern_file: Some(pattern_path.to_string()),
        build_args: Some(std::env::args().collect::<Vec<_>>().join(" ")),
        build_timestamp: Some(chrono::Utc::now().to_rfc3339()),
    });
    log::info!(
        "patterns: {}; automaton nodes: {}; build time: {:.3} s",
        idx.patterns.len(),
        idx.node_count(),
        t0.elapsed().as_secs_f64()
    );
    Ok(idx)
}

fn obtain_index(pattern_path: Option<&str>, index_path: Option<&str>, build: &BuildArgs) -> Result<MotifIndex> {
    match (pattern_path, index_path) {
        (_, Some(p)) => {
            let idx = MotifIndex::load_from_file(p).map_err(|e| anyhow!("cannot load index '{}': {}", p, e))?;
            log::info!(
                "index: {} ({} patterns, {} nodes, built {})",
                p,
                idx.patterns.len(),
                idx.node_count(),
                idx.meta.build_timestamp.as_deref().unwrap_or("?")
            );
            let ignored = idx.opt.ignored_overrides(&IndexOpt::from(build));
            if !ignored.is_empty() {
                log::warn!(
                    "index '{}' keeps the options it was built with; ignoring: {}",
                    p,
                    ignored.join(", ")
                );
            }
            Ok(idx)
        }
        (Some(p), None) => build_index(p, build),
        (None, None) => bail!("either a pattern file or --index is required"),
    }
}

fn run_index(pattern_path: &str, output: &str, build: &BuildArgs) -> Result<()> {
    let idx = build_index(pattern_path, build)?;
    let out_path = format!("{}.gsx", output);
    idx.save_to_file(&out_path)
        .map_err(|e| anyhow!("cannot write index to '{}': {}", out_path, e))?;
    log::info!("motif index saved: {}", out_path);
    Ok(())
}

fn run_search(fasta_path: &str, idx: &MotifIndex, out_path: Option<&str>, per_pattern: bool, opt: SearchOpt) -> Result<()> {
    let text = fasta::read_sequence(fasta_path)?;
    if text.is_empty() {
        bail!("FASTA file '{}' contains no sequence", fasta_path);
    }
    log::info!("sequence: {} ({} bp)", fasta_path, text.len());

    if opt.threads > 1 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(opt.threads)
            .build_global()
            .map_err(|e| anyhow!("cannot start {} worker threads: {}", opt.threads, e))?;
    }

    let t0 = Instant::now();
    let result = search::search(idx, &text, &opt);
    let elapsed = t0.elapsed().as_secs_f64();

    let mut out: Box<dyn Write> = if let Some(p) = out_path {
        Box::new(std::io::BufWriter::new(
            std::fs::File::create(p).with_context(|| format!("cannot create '{}'", p))?,
        ))
    } else {
        Box::new(std::io::BufWriter::new(std::io::stdout()))
    };
    if per_pattern {
        report::write_per_pattern(&mut out, idx, &result)?;
    } else {
        report::write_matches(&mut out, idx, &result)?;
    }
    out.flush()?;

    let mut summary = Vec::new();
    report::write_summary(&mut summary, text.len(), idx, &result)?;
    for line in String::from_utf8_lossy(&summary).lines() {
        log::info!("{}", line);
    }
    log::info!("search time: {:.3} s", elapsed);
    Ok(())
}

fn run_dot(idx: &MotifIndex, out_path: &str, limit: usize) -> Result<()> {
    let f = std::fs::File::create(out_path).with_context(|| format!("cannot create '{}'", out_path))?;
    let mut w = std::io::BufWriter::new(f);
    index::dot::write_dot(&idx.automaton, &mut w, limit)?;
    w.flush()?;
    log::info!(
        "DOT automaton saved to {} ({} of {} nodes)",
        out_path,
        idx.node_count().min(limit),
        idx.node_count()
    );
    Ok(())
}

fn run_generate(fasta_path: &str, prefix: &str, gaps: f64, seed: u32, sets: &[(usize, usize)]) -> Result<()> {
    let text = fasta::read_sequence(fasta_path)?;
    let sets: &[(usize, usize)] = if sets.is_empty() { &generate::DEFAULT_SETS } else { sets };
    let mut rng = generate::Lcg::new(seed);

    for &(count, length) in sets {
        let opt = generate::GeneratorOpt { count, length, gap_fraction: gaps };
        let pats = generate::generate_patterns(&text, &opt, &mut rng)?;
        let fname = format!("{}_{}.txt", prefix, count);
        patterns::write_patterns(&fname, &pats)?;
        log::info!("saved {} (patterns: {}, length: {})", fname, count, length);
    }
    Ok(())
}
