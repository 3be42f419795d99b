//! Common test utilities shared across integration tests.
#![allow(dead_code)]

use dleq::{Group, SecureRng, Witness};

/// Initialize test tracing (call once at the beginning of tests).
///
/// Shows the crate's debug events on the test writer. Subsequent calls are ignored.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::new("dleq=debug");

    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(filter)
        .try_init();
}

/// Seed-derived generators `g_i = G{i}`, `h_i = H{i}` and fresh secrets for a batch of `n`.
pub fn batch_inputs<G: Group>(n: usize) -> (Vec<G::Element>, Vec<G::Element>, Vec<Witness<G>>) {
    let mut rng = SecureRng::new();
    let g = (0..n)
        .map(|i| G::element_from_seed(format!("G{}", i).as_bytes()).expect("seeded generator"))
        .collect();
    let h = (0..n)
        .map(|i| G::element_from_seed(format!("H{}", i).as_bytes()).expect("seeded generator"))
        .collect();
    let x = (0..n).map(|_| Witness::random(&mut rng)).collect();
    (g, h, x)
}
