//! Region Algebra Benchmarks
//!
//! - Inclusion on deep paths with stars (the backtracking `under` search)
//! - Disjointness of diverging paths
//! - Substitution through long substitution vectors

use asap_rpl::{CaptureIds, Rpl, RplElement, Substitutable, Substitution, SubstitutionVector};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// `R0:R1:...:Rn`
fn deep_path(depth: usize) -> Rpl {
    (0..depth).map(|i| RplElement::named(format!("R{i}"))).collect()
}

/// `R0:*:R2:*:...`, a star at every odd position.
fn starred_path(depth: usize) -> Rpl {
    (0..depth)
        .map(|i| {
            if i % 2 == 1 {
                RplElement::star()
            } else {
                RplElement::named(format!("R{i}"))
            }
        })
        .collect()
}

// ============================================================================
// Inclusion
// ============================================================================

fn bench_inclusion(c: &mut Criterion) {
    let mut group = c.benchmark_group("rpl_inclusion");
    let mut ids = CaptureIds::new();

    for depth in [4, 16, 64] {
        let lhs = deep_path(depth);
        let rhs = starred_path(depth);
        group.bench_with_input(BenchmarkId::new("deep_vs_starred", depth), &depth, |b, _| {
            b.iter(|| black_box(&lhs).is_included_in(black_box(&rhs)))
        });

        let captured = rhs.capture(&mut ids);
        group.bench_with_input(BenchmarkId::new("through_capture", depth), &depth, |b, _| {
            b.iter(|| black_box(&captured).is_included_in(black_box(&rhs)))
        });
    }

    group.finish();
}

// ============================================================================
// Disjointness
// ============================================================================

fn bench_disjointness(c: &mut Criterion) {
    let mut group = c.benchmark_group("rpl_disjointness");

    for depth in [4, 16, 64] {
        let lhs = deep_path(depth);
        let mut rhs = deep_path(depth - 1);
        rhs.push(RplElement::named("Other"));
        group.bench_with_input(BenchmarkId::new("diverge_at_tail", depth), &depth, |b, _| {
            b.iter(|| black_box(&lhs).is_disjoint(black_box(&rhs)))
        });
    }

    group.finish();
}

// ============================================================================
// Substitution
// ============================================================================

fn bench_substitution(c: &mut Criterion) {
    let mut group = c.benchmark_group("rpl_substitution");

    for count in [1, 8, 32] {
        // P0 <- P1, P1 <- P2, ..., Pn-1 <- Local
        let subs: SubstitutionVector = (0..count)
            .map(|i| {
                let to = if i + 1 == count {
                    Rpl::local()
                } else {
                    Rpl::single(RplElement::parameter(format!("P{}", i + 1)))
                };
                Substitution::parameter(format!("P{i}"), to)
            })
            .collect();
        let mut source = Rpl::single(RplElement::parameter("P0"));
        source.append(&deep_path(8));

        group.bench_with_input(BenchmarkId::new("chain", count), &subs, |b, subs| {
            b.iter(|| {
                let mut rpl = source.clone();
                rpl.substitute_all(black_box(subs));
                black_box(rpl)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_inclusion, bench_disjointness, bench_substitution);

criterion_main!(benches);
