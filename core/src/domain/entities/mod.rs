//! Domain entities representing core business objects.

pub mod prefix;
pub mod verification;


// Re-export commonly used types
pub use prefix::{PrefixRecord, MULTIPLE_NETWORKS_NAME, MULTIPLE_PREFIX, MAX_PREFIX_LENGTH, MIN_PREFIX_LENGTH};
pub use verification::{Presence, VerificationRecord};
