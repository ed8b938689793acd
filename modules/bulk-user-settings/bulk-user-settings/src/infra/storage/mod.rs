pub mod mapper;
pub mod memory_store;

pub use memory_store::InMemorySettingsStore;

#[cfg(test)]
mod memory_store_test;
