pub mod prefix;
pub mod verification;

pub use prefix::PrefixRepository;
pub use verification::VerificationRepository;

#[cfg(test)]
pub use prefix::MockPrefixRepository;
#[cfg(test)]
pub use verification::MockVerificationRepository;
