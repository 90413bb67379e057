use criterion::{black_box, criterion_group, criterion_main, Criterion};

use gapseek::index::{IndexOpt, MotifIndex};
use gapseek::search::{self, Scanner, SearchOpt, UnknownSymbolPolicy};
use gapseek::tools::generate::{generate_patterns, GeneratorOpt, Lcg};

fn make_reference(len: usize) -> Vec<u8> {
    let bases = [b'A', b'C', b'G', b'T'];
    let mut seq = Vec::with_capacity(len);
    let mut x: u32 = 42;
    for _ in 0..len {
        x = x.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        seq.push(bases[(x >> 16) as usize % 4]);
    }
    seq
}

fn make_patterns(reference: &[u8], count: usize, length: usize, gap_fraction: f64) -> Vec<String> {
    let opt = GeneratorOpt { count, length, gap_fraction };
    generate_patterns(reference, &opt, &mut Lcg::new(123_456)).expect("reference long enough")
}

fn bench_build_index(c: &mut Criterion) {
    let reference = make_reference(100_000);
    let pats = make_patterns(&reference, 200, 20, 0.2);

    c.bench_function("build_index_200x20", |b| {
        b.iter(|| {
            black_box(MotifIndex::build(black_box(pats.as_slice()), IndexOpt::default()).unwrap());
        })
    });
}

fn bench_scan_only(c: &mut Criterion) {
    let reference = make_reference(100_000);
    let pats = make_patterns(&reference, 200, 20, 0.2);
    let idx = MotifIndex::build(pats.as_slice(), IndexOpt::default()).unwrap();

    c.bench_function("scan_seed_hits_100kb", |b| {
        b.iter(|| {
            let n = Scanner::new(&idx.automaton, black_box(&reference), UnknownSymbolPolicy::Reset).count();
            black_box(n);
        })
    });
}

fn bench_search_gapped(c: &mut Criterion) {
    let reference = make_reference(100_000);
    let pats = make_patterns(&reference, 200, 20, 0.2);
    let idx = MotifIndex::build(pats.as_slice(), IndexOpt::default()).unwrap();

    c.bench_function("search_gapped_200x20_100kb", |b| {
        b.iter(|| {
            black_box(search::search(&idx, black_box(&reference), &SearchOpt::default()));
        })
    });
}

fn bench_search_literal(c: &mut Criterion) {
    let reference = make_reference(100_000);
    let pats = make_patterns(&reference, 50, 12, 0.0);
    let idx = MotifIndex::build(pats.as_slice(), IndexOpt::default()).unwrap();

    c.bench_function("search_literal_50x12_100kb", |b| {
        b.iter(|| {
            black_box(search::search(&idx, black_box(&reference), &SearchOpt::default()));
        })
    });
}

fn bench_search_windows(c: &mut Criterion) {
    let reference = make_reference(1_000_000);
    let pats = make_patterns(&reference, 200, 20, 0.2);
    let idx = MotifIndex::build(pats.as_slice(), IndexOpt::default()).unwrap();
    let opt = SearchOpt { threads: 4, ..SearchOpt::default() };

    c.bench_function("search_gapped_4_windows_1mb", |b| {
        b.iter(|| {
            black_box(search::search(&idx, black_box(&reference), &opt));
        })
    });
}

criterion_group!(
    benches,
    bench_build_index,
    bench_scan_only,
    bench_search_gapped,
    bench_search_literal,
    bench_search_windows
);
criterion_main!(benches);
