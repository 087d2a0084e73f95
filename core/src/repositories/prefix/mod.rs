pub mod r#trait {
    pub use super::trait_::*;
}
#[path = "trait.rs"]
mod trait_;

pub use r#trait::PrefixRepository;

#[cfg(test)]
pub mod mock;
#[cfg(test)]
pub use mock::MockPrefixRepository;

#[cfg(test)]
mod tests;
