//! Effect Summary Benchmarks
//!
//! - Minimality reduction on summaries with many redundant members
//! - Coverage checks against large summaries
//! - Constraint export through a session

use asap_effects::{ConcreteEffectSummary, Effect, EffectSummary, EffectVector};
use asap_rpl::{Rpl, RplElement};
use asap_session::{Session, SessionConfig};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn region(i: usize) -> Rpl {
    Rpl::new(vec![
        RplElement::parameter("P"),
        RplElement::named(format!("R{i}")),
    ])
}

/// Reads and writes of `count` regions, with every read covered by a write.
fn redundant_effects(count: usize) -> Vec<Effect> {
    (0..count)
        .flat_map(|i| [Effect::Reads(region(i)), Effect::Writes(region(i))])
        .collect()
}

// ============================================================================
// Minimality
// ============================================================================

fn bench_make_minimal(c: &mut Criterion) {
    let mut group = c.benchmark_group("make_minimal");

    for count in [4, 16, 64] {
        let summary: ConcreteEffectSummary = redundant_effects(count).into_iter().collect();
        group.throughput(Throughput::Elements(summary.len() as u64));
        group.bench_with_input(BenchmarkId::new("summary", count), &summary, |b, summary| {
            b.iter(|| {
                let mut summary = summary.clone();
                black_box(summary.make_minimal())
            })
        });

        let vector: EffectVector = redundant_effects(count).into_iter().collect();
        group.bench_with_input(BenchmarkId::new("vector", count), &vector, |b, vector| {
            b.iter(|| {
                let mut vector = vector.clone();
                black_box(vector.make_minimal())
            })
        });
    }

    group.finish();
}

// ============================================================================
// Coverage
// ============================================================================

fn bench_covers(c: &mut Criterion) {
    let mut group = c.benchmark_group("covers");

    for count in [4, 16, 64] {
        let star: Rpl = [RplElement::parameter("P"), RplElement::star()].into_iter().collect();
        let mut members = redundant_effects(count);
        members.push(Effect::Writes(star));
        let summary = EffectSummary::concrete(members);
        // Only the trailing `P:*` member covers this one.
        let effect = Effect::Reads(region(count + 1));
        group.bench_with_input(BenchmarkId::new("last_member", count), &summary, |b, summary| {
            b.iter(|| black_box(summary.covers(black_box(&effect))))
        });
    }

    group.finish();
}

// ============================================================================
// Export
// ============================================================================

fn bench_export(c: &mut Criterion) {
    let mut group = c.benchmark_group("export");

    for functions in [8, 64] {
        let mut session = Session::new(SessionConfig::inference());
        for f in 0..functions {
            let name = format!("f{f}");
            let _ = session.declare_function(&name, None);
            let effects: EffectVector = redundant_effects(4).into_iter().collect();
            let _ = session.check_covered(&name, &effects, None);
        }
        group.bench_with_input(BenchmarkId::new("program", functions), &session, |b, session| {
            b.iter(|| black_box(session.export_program()))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_make_minimal, bench_covers, bench_export);

criterion_main!(benches);
