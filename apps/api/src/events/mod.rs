pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod store;

#[cfg(test)]
pub use memory::MemoryEventStore;
pub use store::{EventStore, PgEventStore};
