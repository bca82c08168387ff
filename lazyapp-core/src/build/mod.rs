// lazyapp-core/src/build/mod.rs
pub mod assemble;
pub mod batch;

pub use assemble::{assemble, assemble_reference, display_name_for};
pub use batch::{build_batch, check_batch};
