// crates/geobrew-core/src/store/mod.rs

//! # Store Client Adapters
//!
//! [`RedisStore`] is the production adapter. [`MemoryStore`] keeps the same
//! contract in process so the builders and queries can be exercised without
//! a server.

mod memory;
mod redis_store;

pub use memory::MemoryStore;
pub use redis_store::RedisStore;
