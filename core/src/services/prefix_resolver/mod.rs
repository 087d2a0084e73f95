//! Prefix resolution: map a raw phone number to its network prefix record
//!
//! Longer prefixes always win. Numbers whose length falls outside the
//! matched prefix's bounds are reported as partial or length-mismatched
//! rather than resolved, and short inputs get a forward search so that
//! live-typing feedback can name candidate networks.

mod resolver;
mod types;


pub use resolver::PrefixResolver;
pub use types::Resolution;
