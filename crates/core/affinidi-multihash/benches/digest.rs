use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use affinidi_multihash::{Algorithm, Base, check, digest, infer_base};

fn payload() -> Vec<u8> {
    (0u8..=255).cycle().take(64 * 1024).collect()
}

fn bench_digest(c: &mut Criterion) {
    let data = payload();
    let mut group = c.benchmark_group("digest_64k");
    for algorithm in Algorithm::ALL {
        group.bench_function(algorithm.name(), |b| {
            b.iter(|| digest(black_box(algorithm), black_box(&data)))
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let mh = digest(Algorithm::Sha2_256, b"benchmark");
    for base in Base::SUPPORTED {
        c.bench_function(&format!("encode_{base}"), |b| {
            b.iter(|| black_box(&mh).encode(base))
        });
    }
}

fn bench_infer_and_check(c: &mut Criterion) {
    let mh = digest(Algorithm::Sha2_512, b"benchmark");
    let texts: Vec<String> = Base::SUPPORTED
        .iter()
        .filter_map(|base| mh.encode(*base).ok())
        .collect();

    c.bench_function("infer_base", |b| {
        b.iter(|| {
            for text in &texts {
                let _ = infer_base(black_box(text));
            }
        })
    });

    c.bench_function("check_hex", |b| {
        b.iter(|| check(black_box(&texts[0]), black_box(b"benchmark")))
    });
}

criterion_group!(benches, bench_digest, bench_encode, bench_infer_and_check);
criterion_main!(benches);
