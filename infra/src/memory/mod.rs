//! In-process repositories
//!
//! Table-free implementations of the repository traits, for local runs
//! without MySQL and for exercising the HTTP surface in tests.

mod prefix_repository;
mod verification_repository;

#[cfg(test)]
mod tests;

pub use prefix_repository::InMemoryPrefixRepository;
pub use verification_repository::InMemoryVerificationRepository;
