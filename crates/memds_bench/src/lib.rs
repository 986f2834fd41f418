//! Benchmark utilities.

#![deny(unsafe_code)]
#![warn(missing_docs)]

use memds_core::{Datastore, Entity, Key, PutRequest};
use rand::seq::SliceRandom;
use rand::Rng;

/// Kind used by benchmark entities.
pub const BENCH_KIND: &str = "Bench";

/// Builds one benchmark entity with random property values.
pub fn random_entity<R: Rng>(rng: &mut R, id: i64) -> Entity {
    Entity::new(Key::with_id(BENCH_KIND, id))
        .with_property("IntProp", rng.gen_range(0..1_000i64))
        .with_property("StrProp", format!("s{:06}", rng.gen_range(0..1_000_000)))
        .with_property("DblProp", rng.gen::<f64>())
        .with_property("BoolProp", rng.gen::<bool>())
}

/// Generates `count` entities with ids `1..=count`, in shuffled order.
pub fn generate_entities(count: usize) -> Vec<Entity> {
    let mut rng = rand::thread_rng();
    let mut entities: Vec<_> = (1..=count as i64)
        .map(|id| random_entity(&mut rng, id))
        .collect();
    entities.shuffle(&mut rng);
    entities
}

/// Returns a datastore holding `count` benchmark entities.
pub fn populated_datastore(count: usize) -> Datastore {
    let ds = Datastore::new();
    ds.put(PutRequest::new(generate_entities(count)))
        .expect("populating benchmark datastore");
    ds
}
