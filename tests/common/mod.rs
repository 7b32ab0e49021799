#![allow(dead_code)]

use std::sync::Arc;

use chargen::{Generator, NameRegistry, Setting};
use rand::SeedableRng;
use rand::rngs::SmallRng;

pub fn sample_setting() -> Setting {
    Setting::sample().expect("sample setting is valid")
}

pub fn build_generator() -> Generator {
    Generator::new(sample_setting()).expect("sample setting builds a generator")
}

pub fn shared_generator() -> (Arc<Generator>, Arc<NameRegistry>) {
    let registry = Arc::new(NameRegistry::new());
    let generator = Generator::with_registry(sample_setting(), Arc::clone(&registry))
        .expect("sample setting builds a generator");
    (Arc::new(generator), registry)
}

pub fn seeded(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}
