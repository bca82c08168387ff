// src/model/mod.rs
// Declares the modules within the model directory.
pub mod collision;
pub mod descriptor;
pub mod package;
pub mod request;

// Re-export
pub use collision::{CollisionMember, CollisionReport, OriginKind};
pub use descriptor::{AcquisitionStrategy, LaunchDescriptor};
pub use package::{
    DirectPackage, License, LicenseList, PackageEntry, PackageMeta, PackageReference,
    ResolvedMetadata,
};
pub use request::{AppEntry, AppOptions, AppRequest, Manifest};
