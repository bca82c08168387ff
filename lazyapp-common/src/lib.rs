// lazyapp-common/src/lib.rs
pub mod config;
pub mod error;
pub mod model;
pub mod repository;

// Re-export key types
pub use config::Config;
pub use error::{LazyAppError, Result};
pub use model::{AppRequest, LaunchDescriptor, PackageReference};
pub use repository::Repository;
