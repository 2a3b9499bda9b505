use criterion::{black_box, criterion_group, criterion_main, Criterion};

use seqmatch::align;
use seqmatch::assembly;
use seqmatch::index::KmerIndex;
use seqmatch::matching::{self, ApproxParams, BoyerMoore};
use seqmatch::util::dna::Alphabet;

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

fn bench_exact(c: &mut Criterion) {
    let reference = make_reference(100_000);
    let pattern = reference[5_000..5_024].to_vec();
    let bm = BoyerMoore::new(&pattern, &Alphabet::dna()).expect("pattern over ACGT");

    c.bench_function("naive_exact_24bp_100k", |b| {
        b.iter(|| black_box(matching::naive_exact(black_box(&pattern), black_box(&reference))))
    });
    c.bench_function("boyer_moore_24bp_100k", |b| {
        b.iter(|| black_box(matching::boyer_moore(black_box(&bm), black_box(&reference))))
    });
}

fn bench_kmer_index(c: &mut Criterion) {
    let reference = make_reference(100_000);
    c.bench_function("kmer_index_build_8_100k", |b| {
        b.iter(|| black_box(KmerIndex::build(black_box(&reference), 8)))
    });
    let idx = KmerIndex::build(&reference, 8).expect("k <= text length");
    let query = reference[777..785].to_vec();
    c.bench_function("kmer_index_query_8", |b| b.iter(|| black_box(idx.query(black_box(&query)))));
}

fn bench_approximate(c: &mut Criterion) {
    let reference = make_reference(50_000);
    let mut pattern = reference[10_000..10_024].to_vec();
    pattern[5] = if pattern[5] == b'A' { b'C' } else { b'A' };
    let params = ApproxParams::default();
    c.bench_function("approximate_match_24bp_2mm_50k", |b| {
        b.iter(|| {
            let r = matching::approximate_match(black_box(&pattern), black_box(&reference), 2, &params);
            black_box(r)
        })
    });
}

fn bench_edit_distance(c: &mut Criterion) {
    let reference = make_reference(5_000);
    let pattern = make_reference(16);
    c.bench_function("approximate_edit_distance_16bp_5k", |b| {
        b.iter(|| {
            black_box(align::approximate_edit_distance(black_box(&pattern), black_box(&reference)))
        })
    });
}

fn bench_greedy_assembly(c: &mut Criterion) {
    let genome = make_reference(600);
    let reads: Vec<Vec<u8>> = (0..=genome.len() - 50)
        .step_by(25)
        .map(|i| genome[i..i + 50].to_vec())
        .collect();
    c.bench_function("greedy_scs_23_reads", |b| {
        b.iter(|| black_box(assembly::greedy_scs(black_box(&reads), 20)))
    });
}

criterion_group!(
    benches,
    bench_exact,
    bench_kmer_index,
    bench_approximate,
    bench_edit_distance,
    bench_greedy_assembly
);
criterion_main!(benches);
