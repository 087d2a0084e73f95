//! MySQL repository implementations

mod prefix_repository_impl;
mod verification_repository_impl;

pub use prefix_repository_impl::{MySqlPrefixRepository, PREFIX_TABLE};
pub use verification_repository_impl::{MySqlVerificationRepository, VERIFICATION_TABLE};

#[cfg(test)]
pub(crate) use prefix_repository_impl::escape_like;
