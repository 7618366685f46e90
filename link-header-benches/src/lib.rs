//! Benchmarks for `link-header`. See `benches/`.
