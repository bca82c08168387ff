// lazyapp-core/src/resolve/mod.rs
pub mod icon;
pub mod metadata;
pub mod name;

pub use icon::resolve_icon;
pub use metadata::{resolve_metadata, MetadataOverrides};
pub use name::normalize_name;
