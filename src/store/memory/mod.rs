//! In-memory record store implementation

mod state;
mod store;

#[cfg(test)]
mod tests;

pub use store::InMemoryStore;
