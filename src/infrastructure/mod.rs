pub mod id_gen;
pub mod memory_repo;
pub mod seed;

pub use id_gen::{SequentialIdGenerator, UuidIdGenerator};
pub use memory_repo::{Collection, Repository};
pub use seed::{SeedData, SeedError};
