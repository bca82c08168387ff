// lazyapp-core/src/check/mod.rs
pub mod collision;
pub mod identifier;

pub use collision::{detect_collisions, PreDescriptor};
pub use identifier::validate_identifier;
