//! Database layer: account directory trait, PostgreSQL and in-memory implementations.

mod directory;
mod memory;
mod pool;
mod repositories;

pub use directory::AccountDirectory;
pub use memory::MemoryAccountDirectory;
pub use pool::{create_pool, DbPool};
pub use repositories::PgAccountDirectory;
