pub mod log;
pub mod migrate;
pub mod schema;
pub mod store;

pub use migrate::{SCHEMA_VERSION, run_pending_migrations};
pub use store::{MutationScope, Store};
