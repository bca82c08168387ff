// lazyapp-core/src/resolve/metadata.rs
use lazyapp_common::error::Result;
use lazyapp_common::model::package::{DirectPackage, PackageReference, ResolvedMetadata};
use lazyapp_common::repository::Repository;
use tracing::debug;

use super::name::normalize_name;

pub const FALLBACK_DESCRIPTION: &str = "Application";
pub const UNKNOWN_SHORT_NAME: &str = "unknown";

/// Explicit values that win over anything the repository or caller declared.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataOverrides<'a> {
    pub executable: Option<&'a str>,
    pub description: Option<&'a str>,
}

/// Short name of a caller-supplied package, without touching any repository.
pub fn direct_short_name(package: &DirectPackage) -> String {
    if let Some(pname) = &package.pname {
        return pname.clone();
    }
    package
        .name
        .as_deref()
        .map(normalize_name)
        .unwrap_or_else(|| UNKNOWN_SHORT_NAME.to_string())
}

/// Produces the uniform metadata record for a reference. `ByName` reads the repository's
/// declarative entry only.
pub fn resolve_metadata(
    reference: &PackageReference,
    repository: &Repository,
    overrides: MetadataOverrides<'_>,
) -> Result<ResolvedMetadata> {
    let (short_name, declared_exec, declared_desc, is_license_free) = match reference {
        PackageReference::ByName { path } => {
            let entry = repository.lookup(path)?;
            // lookup only succeeds on a non-empty path
            let last = path.last().cloned().unwrap_or_default();
            debug!("Resolved '{}' from repository", path.join("."));
            (
                last.clone(),
                entry.meta.main_program.clone().unwrap_or(last),
                entry.meta.description.clone(),
                entry.meta.license.is_free(),
            )
        }
        PackageReference::Direct(package) => {
            let short_name = direct_short_name(package);
            (
                short_name.clone(),
                package.main_program.clone().unwrap_or(short_name),
                package.description.clone(),
                package.licenses.is_free(),
            )
        }
    };

    let executable = overrides
        .executable
        .map(str::to_string)
        .unwrap_or(declared_exec);
    let description = overrides
        .description
        .map(str::to_string)
        .or(declared_desc)
        .unwrap_or_else(|| FALLBACK_DESCRIPTION.to_string());

    Ok(ResolvedMetadata {
        short_name,
        executable,
        description,
        is_license_free,
    })
}

#[cfg(test)]
mod tests {
    use lazyapp_common::error::LazyAppError;
    use lazyapp_common::model::package::License;

    use super::*;

    fn repo() -> Repository {
        Repository::from_json_str(
            r#"{
            "hello": { "type": "package", "name": "hello-2.12.1", "meta": { "mainProgram": "hello", "description": "Program that produces a familiar, friendly greeting" } },
            "obs-studio": { "type": "package", "meta": { "mainProgram": "obs" } },
            "bc": { "type": "package" },
            "steam": { "type": "package", "meta": { "license": { "shortName": "unfree", "free": false } } },
            "dual": { "type": "package", "meta": { "license": [ { "spdxId": "MIT" }, { "spdxId": "GPL-2.0", "free": true } ] } }
        }"#,
        )
        .unwrap()
    }

    #[test]
    fn by_name_uses_declared_metadata() {
        let meta = resolve_metadata(
            &PackageReference::by_name("obs-studio"),
            &repo(),
            MetadataOverrides::default(),
        )
        .unwrap();
        assert_eq!(meta.short_name, "obs-studio");
        assert_eq!(meta.executable, "obs");
        assert_eq!(meta.description, FALLBACK_DESCRIPTION);
        assert!(meta.is_license_free);
    }

    #[test]
    fn by_name_falls_back_to_last_segment() {
        let meta = resolve_metadata(
            &PackageReference::by_name("bc"),
            &repo(),
            MetadataOverrides::default(),
        )
        .unwrap();
        assert_eq!(meta.executable, "bc");
    }

    #[test]
    fn license_freedom() {
        let steam = resolve_metadata(
            &PackageReference::by_name("steam"),
            &repo(),
            MetadataOverrides::default(),
        )
        .unwrap();
        assert!(!steam.is_license_free);
        let dual = resolve_metadata(
            &PackageReference::by_name("dual"),
            &repo(),
            MetadataOverrides::default(),
        )
        .unwrap();
        assert!(dual.is_license_free);
    }

    #[test]
    fn overrides_win() {
        let meta = resolve_metadata(
            &PackageReference::by_name("hello"),
            &repo(),
            MetadataOverrides {
                executable: Some("hi"),
                description: Some("Greeter"),
            },
        )
        .unwrap();
        assert_eq!(meta.executable, "hi");
        assert_eq!(meta.description, "Greeter");
    }

    #[test]
    fn missing_package_is_reported() {
        let err = resolve_metadata(
            &PackageReference::by_name("this-package-does-not-exist"),
            &repo(),
            MetadataOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LazyAppError::PackageNotFound { .. }));
    }

    #[test]
    fn direct_derives_short_name() {
        let package = DirectPackage {
            name: Some("hello-2.12.1".into()),
            drv_path: "/store/x-hello.drv".into(),
            out_path: "/store/x-hello".into(),
            ..Default::default()
        };
        let meta = resolve_metadata(
            &PackageReference::Direct(package.clone()),
            &Repository::default(),
            MetadataOverrides::default(),
        )
        .unwrap();
        assert_eq!(meta.short_name, "hello");
        assert_eq!(meta.executable, "hello");

        let anonymous = DirectPackage {
            name: None,
            licenses: vec![License {
                free: Some(false),
                ..Default::default()
            }]
            .into(),
            ..package
        };
        let meta = resolve_metadata(
            &PackageReference::Direct(anonymous),
            &Repository::default(),
            MetadataOverrides::default(),
        )
        .unwrap();
        assert_eq!(meta.short_name, UNKNOWN_SHORT_NAME);
        assert!(!meta.is_license_free);
    }

    #[test]
    fn direct_prefers_pname_and_main_program() {
        let package = DirectPackage {
            pname: Some("vlc".into()),
            name: Some("vlc-3.0.20".into()),
            main_program: Some("VLC".into()),
            drv_path: "/store/y-vlc.drv".into(),
            out_path: "/store/y-vlc".into(),
            ..Default::default()
        };
        let meta = resolve_metadata(
            &PackageReference::Direct(package),
            &Repository::default(),
            MetadataOverrides::default(),
        )
        .unwrap();
        assert_eq!(meta.short_name, "vlc");
        assert_eq!(meta.executable, "VLC");
    }
}
