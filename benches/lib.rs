//! Criterion benchmarks for the region and effect algebra; see `benches/`.
