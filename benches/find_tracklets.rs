use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use mpc80::{constants::MJD, find_tracklets, TrackletParams};

const SITES: [&str; 6] = ["F51", "G96", "703", "H01", "807", "T05"];

/// A synthetic arc: each night, a random site takes 2 to 6 exposures a few minutes apart.
fn synthetic_arc(rng: &mut StdRng, nights: usize) -> Vec<(MJD, &'static str)> {
    let mut arc = Vec::new();
    for night in 0..nights {
        let site = SITES[rng.random_range(0..SITES.len())];
        let start = 59000. + night as f64 + rng.random_range(0.0..0.3);
        for k in 0..rng.random_range(2..=6) {
            arc.push((start + k as f64 * rng.random_range(0.005..0.02), site));
        }
    }
    arc
}

fn bench_find_tracklets(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);
    let params = TrackletParams::default();
    let mut group = c.benchmark_group("find_tracklets");

    for nights in [10usize, 100, 1_000] {
        let arc = synthetic_arc(&mut rng, nights);
        group.bench_with_input(BenchmarkId::from_parameter(arc.len()), &arc, |b, arc| {
            b.iter(|| find_tracklets(black_box(arc), &params))
        });
    }
    group.finish();
}

/// Worst case for the reduction: one site, evenly spaced, wider than every threshold.
fn bench_uniform_cadence(c: &mut Criterion) {
    let params = TrackletParams::default();
    let arc: Vec<(MJD, &str)> = (0..2_000).map(|i| (59000. + i as f64 * 0.3, "F51")).collect();

    c.bench_function("find_tracklets/uniform_cadence_2000", |b| {
        b.iter(|| find_tracklets(black_box(&arc), &params))
    });
}

criterion_group!(benches, bench_find_tracklets, bench_uniform_cadence);
criterion_main!(benches);
