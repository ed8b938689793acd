pub mod batch;
pub mod directory;
pub mod display;
pub mod error;
pub mod field_state;
pub mod loader;
pub mod merge;
pub mod pending;
pub mod session;

#[cfg(test)]
mod directory_test;
#[cfg(test)]
mod pending_test;
#[cfg(test)]
mod test_support;
