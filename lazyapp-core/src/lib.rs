// lazyapp-core/src/lib.rs
//! Turns application references into launch descriptors.
//!
//! `check` holds the validators (identifiers, batch collisions), `resolve` the lookups
//! (metadata, names, icons) and `build` the assembly of single descriptors and whole batches.

pub mod build;
pub mod check;
pub mod resolve;

pub use build::{assemble, build_batch, check_batch};
pub use check::{detect_collisions, validate_identifier, PreDescriptor};
pub use resolve::{normalize_name, resolve_icon, resolve_metadata};
