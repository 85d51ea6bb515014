//! Shared fixtures for integration tests

#![allow(dead_code)]

use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::EnvFilter;

/// Test filter size, shared between tests
pub const FILTER_SIZE: usize = 512;

pub const WORDS: [&str; 13] = [
    "Bloom", "Poney", "GitHub", "Pwet", "Toto", "Billy", "Jacob", "Omelette", "De", "Fromage",
    "FooBar", "Bar", "Baz",
];

/// Install a test subscriber once; `RUST_LOG` overrides the default level
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

/// `count` distinct dictionary-like words
pub fn words(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("word_{:07}", i)).collect()
}

/// Deterministic RNG for probe generation
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Random alphanumeric string; never collides with [`words`] (no `_`)
pub fn random_string(rng: &mut StdRng, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}
