use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use polystruct_core::selection::{PositionCounts, compute_ratios};
use polystruct_core::structure::ResidueCoordinates;
use polystruct_core::types::{Coordinate, PositionLabel};
use polystruct_core::wcn::calculate_wcn;
use std::time::Duration;

// The largest chain is about four million pair terms per iteration.
fn configure_criterion() -> Criterion {
    Criterion::default()
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
        .sample_size(50)
        .noise_threshold(0.03)
}

// Residues along a helix-like spiral so no two coordinates coincide
fn synthetic_chain(length: usize) -> Vec<ResidueCoordinates> {
    (0..length)
        .map(|i| {
            let t = i as f64;
            let ca = Coordinate::new(2.3 * (t * 1.745).cos(), 2.3 * (t * 1.745).sin(), 1.5 * t);
            ResidueCoordinates {
                amino_acid: 'A',
                position: PositionLabel::new(i as i64 + 1, None),
                chain: "A".to_string(),
                ca,
                sidechain_center: ca * 1.4,
            }
        })
        .collect()
}

fn bench_wcn(c: &mut Criterion) {
    let mut group = c.benchmark_group("wcn");
    for length in [100usize, 500, 2000] {
        let residues = synthetic_chain(length);
        // quadratic in chain length
        group.throughput(Throughput::Elements((length * length) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(length), &residues, |b, residues| {
            b.iter(|| calculate_wcn(black_box(residues.clone())))
        });
    }
    group.finish();
}

fn bench_ratios(c: &mut Criterion) {
    let counts: Vec<PositionCounts> = (2..50_000)
        .map(|position| PositionCounts {
            protein_id: "P1".to_string(),
            position,
            codon_index: position.to_string(),
            species_count: 3,
            expected_nonsynonymous: 2.25,
            expected_synonymous: 0.75,
            observed_nonsynonymous: (position % 4) as usize,
            observed_synonymous: (position % 3) as usize,
        })
        .collect();

    c.bench_function("compute_ratios", |b| {
        b.iter(|| compute_ratios(black_box(counts.clone())))
    });
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets = bench_wcn, bench_ratios
}
criterion_main!(benches);
