//! # SPV Filtering Benchmarks
//!
//! | Operation | Scales with |
//! |-----------|-------------|
//! | Filter insert / match | hash rounds |
//! | Merkle block build | block size |
//! | Proof extraction | block size (tree height) and match count |

use std::collections::HashSet;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use shared_types::{serialize, Hash256};
use spv_bloom_filter::{BloomFilter, BloomUpdateFlag};
use spv_merkle_block::{MerkleBlock, MerkleBlockService, ProofLimits};
use spv_tests::fixtures::{header_for, txids};

fn random_hashes(rng: &mut StdRng, count: usize) -> Vec<Hash256> {
    (0..count).map(|_| Hash256::from_bytes(rng.gen())).collect()
}

// ============================================================================
// BLOOM FILTER
// ============================================================================

fn bench_bloom_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("bloom-filter");
    let mut rng = StdRng::seed_from_u64(7);
    let elements = random_hashes(&mut rng, 1_000);

    for fpr in [0.01, 0.0001, 0.000_001] {
        let mut filter = BloomFilter::new(1_000, fpr, 0, BloomUpdateFlag::All)
            .expect("valid false positive rate");
        for e in &elements {
            filter.insert_hash(e);
        }
        let label = format!("k{}", filter.hash_funcs());

        group.throughput(Throughput::Elements(elements.len() as u64));
        group.bench_with_input(BenchmarkId::new("insert", &label), &elements, |b, elements| {
            let mut fresh = BloomFilter::new(1_000, fpr, 0, BloomUpdateFlag::All)
                .expect("valid false positive rate");
            b.iter(|| {
                for e in elements {
                    fresh.insert_hash(black_box(e));
                }
            })
        });

        let probes = random_hashes(&mut rng, 1_000);
        group.bench_with_input(BenchmarkId::new("match_miss", &label), &probes, |b, probes| {
            b.iter(|| probes.iter().filter(|p| filter.matches_hash(black_box(p))).count())
        });
    }

    group.finish();
}

// ============================================================================
// MERKLE BLOCK
// ============================================================================

fn bench_merkle_block(c: &mut Criterion) {
    let mut group = c.benchmark_group("merkle-block");
    let service = MerkleBlockService::new(ProofLimits::default()).expect("default limits");

    for size in [100u32, 1_000, 10_000] {
        let block_txids = txids(size);
        let header = header_for(&block_txids).expect("non-empty block");
        let wanted: HashSet<Hash256> = block_txids.iter().step_by(50).copied().collect();

        group.throughput(Throughput::Elements(u64::from(size)));
        group.bench_with_input(BenchmarkId::new("build", size), &block_txids, |b, txids| {
            b.iter(|| MerkleBlock::from_txids(header.clone(), black_box(txids), &wanted))
        });

        let (block, _) =
            MerkleBlock::from_txids(header.clone(), &block_txids, &wanted).expect("honest block");
        let bytes = serialize(&block);
        group.bench_with_input(BenchmarkId::new("decode_and_verify", size), &bytes, |b, bytes| {
            b.iter(|| service.decode_and_verify(black_box(bytes)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_bloom_filter, bench_merkle_block);
criterion_main!(benches);
