// lazyapp-core/src/build/assemble.rs
use lazyapp_common::config::Config;
use lazyapp_common::error::{LazyAppError, Result};
use lazyapp_common::model::descriptor::{AcquisitionStrategy, LaunchDescriptor};
use lazyapp_common::model::package::PackageReference;
use lazyapp_common::model::request::{AppOptions, AppRequest};
use lazyapp_common::repository::Repository;
use tracing::{debug, instrument};

use crate::check::identifier::validate_identifier;
use crate::resolve::icon::resolve_icon;
use crate::resolve::metadata::{direct_short_name, resolve_metadata, MetadataOverrides};

/// The identifier comes from exactly one source: the override, else the reference itself.
pub fn choose_identifier(reference: &PackageReference, identifier_override: Option<&str>) -> String {
    if let Some(id) = identifier_override {
        return id.to_string();
    }
    match reference {
        PackageReference::ByName { path } => path.join("."),
        PackageReference::Direct(package) => direct_short_name(package),
    }
}

/// `obs-studio` -> `Obs Studio`
pub fn display_name_for(identifier: &str) -> String {
    identifier
        .split('-')
        .map(|segment| {
            let mut chars = segment.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Builds the descriptor for one batch entry.
pub fn assemble(
    request: &AppRequest,
    repository: &Repository,
    config: &Config,
) -> Result<LaunchDescriptor> {
    let reference = request.reference()?;
    assemble_reference(
        &reference,
        request.id.as_deref(),
        &request.options,
        repository,
        config,
    )
}

#[instrument(skip(reference, options, repository, config), fields(reference = %reference))]
pub fn assemble_reference(
    reference: &PackageReference,
    identifier_override: Option<&str>,
    options: &AppOptions,
    repository: &Repository,
    config: &Config,
) -> Result<LaunchDescriptor> {
    // Validation runs before the repository is consulted.
    let identifier = choose_identifier(reference, identifier_override);
    validate_identifier(&identifier)?;

    let metadata = resolve_metadata(
        reference,
        repository,
        MetadataOverrides {
            executable: options.executable.as_deref(),
            description: options.description.as_deref(),
        },
    )?;

    // Direct packages were already admitted by whoever evaluated them.
    let needs_unfree = !reference.is_direct() && !metadata.is_license_free;
    if needs_unfree && !options.allow_unfree {
        return Err(LazyAppError::UnfreeNotAllowed(identifier));
    }

    let icon_path = resolve_icon(
        config.icon_theme_root(),
        &metadata.short_name,
        &metadata.executable,
        options.icon.as_deref(),
    );

    let display_name = options
        .display_name
        .clone()
        .unwrap_or_else(|| display_name_for(&identifier));

    let acquisition_strategy = match reference {
        PackageReference::ByName { path } => AcquisitionStrategy::RegistryFetch {
            repository_ref: options
                .repository_ref
                .clone()
                .unwrap_or_else(|| config.default_repository_ref.clone()),
            package_path: path.join("."),
        },
        PackageReference::Direct(package) => AcquisitionStrategy::StoreRealize {
            build_recipe_path: package.drv_path.clone(),
            output_path: package.out_path.clone(),
        },
    };

    debug!(
        "Assembled '{}' ({}) with {} strategy",
        identifier,
        metadata.executable,
        acquisition_strategy.kind_str()
    );

    Ok(LaunchDescriptor {
        terminal_command: metadata.executable.to_lowercase(),
        identifier,
        executable: metadata.executable,
        display_name,
        description: metadata.description,
        icon_path,
        categories: options.categories.clone(),
        create_terminal_command: options.create_terminal_command,
        acquisition_strategy,
        requires_elevated_evaluation: needs_unfree && options.allow_unfree,
        create_persistence_root: options.create_persistence_root,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use lazyapp_common::config::DEFAULT_REPOSITORY_REF;
    use lazyapp_common::model::package::{DirectPackage, License};

    use super::*;

    fn repo() -> Repository {
        Repository::from_json_str(
            r#"{
            "hello": { "type": "package", "name": "hello-2.12.1", "meta": { "mainProgram": "hello", "description": "Program that produces a familiar, friendly greeting" } },
            "obs-studio": { "type": "package", "meta": { "mainProgram": "obs", "description": "Free and open source software for video recording and live streaming" } },
            "steam": { "type": "package", "meta": { "mainProgram": "Steam", "license": { "shortName": "unfree", "free": false } } },
            "kdePackages": { "kate": { "type": "package", "meta": { "mainProgram": "kate" } } }
        }"#,
        )
        .unwrap()
    }

    fn config() -> Config {
        Config::with_root("/nonexistent/lazyapp")
    }

    fn direct_package() -> DirectPackage {
        DirectPackage {
            name: Some("mytool-0.3.1".into()),
            licenses: vec![License {
                free: Some(false),
                ..Default::default()
            }]
            .into(),
            drv_path: "/store/aaaa-mytool-0.3.1.drv".into(),
            out_path: "/store/bbbb-mytool-0.3.1".into(),
            ..Default::default()
        }
    }

    #[test]
    fn display_names() {
        assert_eq!(display_name_for("obs-studio"), "Obs Studio");
        assert_eq!(display_name_for("bc"), "Bc");
        assert_eq!(display_name_for("libvirt-glib"), "Libvirt Glib");
        assert_eq!(display_name_for("kdePackages.kate"), "KdePackages.kate");
    }

    #[test]
    fn hello_end_to_end() {
        let d = assemble(&AppRequest::by_name("hello"), &repo(), &config()).unwrap();
        assert_eq!(d.identifier, "hello");
        assert_eq!(d.terminal_command, "hello");
        assert_eq!(d.display_name, "Hello");
        assert!(!d.requires_elevated_evaluation);
        assert!(d.create_terminal_command);
        assert!(!d.create_persistence_root);
        assert_eq!(d.icon_path, "hello");
        assert_eq!(
            d.acquisition_strategy,
            AcquisitionStrategy::RegistryFetch {
                repository_ref: DEFAULT_REPOSITORY_REF.into(),
                package_path: "hello".into(),
            }
        );
    }

    #[test]
    fn obs_studio_uses_main_program() {
        let d = assemble(&AppRequest::by_name("obs-studio"), &repo(), &config()).unwrap();
        assert_eq!(d.terminal_command, "obs");
        assert_eq!(d.display_name, "Obs Studio");
    }

    #[test]
    fn terminal_command_is_lowercase_override() {
        let request = AppRequest::by_name("hello").with_executable("HeLLo-World");
        let d = assemble(&request, &repo(), &config()).unwrap();
        assert_eq!(d.executable, "HeLLo-World");
        assert_eq!(d.terminal_command, "hello-world");
    }

    #[test]
    fn nested_path_and_override_identifier() {
        let d = assemble(&AppRequest::by_name("kdePackages.kate"), &repo(), &config()).unwrap();
        assert_eq!(d.identifier, "kdePackages.kate");

        let mut request = AppRequest::by_name("kdePackages.kate").with_id("editor");
        request.options.display_name = Some("Kate".into());
        request.options.repository_ref = Some("pinned".into());
        let d = assemble(&request, &repo(), &config()).unwrap();
        assert_eq!(d.identifier, "editor");
        assert_eq!(d.display_name, "Kate");
        assert_eq!(
            d.acquisition_strategy,
            AcquisitionStrategy::RegistryFetch {
                repository_ref: "pinned".into(),
                package_path: "kdePackages.kate".into(),
            }
        );
    }

    #[test]
    fn unfree_requires_opt_in() {
        let err = assemble(&AppRequest::by_name("steam"), &repo(), &config()).unwrap_err();
        assert!(matches!(err, LazyAppError::UnfreeNotAllowed(ref id) if id == "steam"));

        let mut request = AppRequest::by_name("steam");
        request.options.allow_unfree = true;
        let d = assemble(&request, &repo(), &config()).unwrap();
        assert!(d.requires_elevated_evaluation);
        assert_eq!(d.terminal_command, "steam");
    }

    #[test]
    fn allow_unfree_on_free_package_needs_no_elevation() {
        let mut request = AppRequest::by_name("hello");
        request.options.allow_unfree = true;
        let d = assemble(&request, &repo(), &config()).unwrap();
        assert!(!d.requires_elevated_evaluation);
    }

    #[test]
    fn direct_reference_realizes_from_store() {
        let mut request = AppRequest::direct(direct_package());
        request.options.create_persistence_root = true;
        let d = assemble(&request, &Repository::default(), &config()).unwrap();
        assert_eq!(d.identifier, "mytool");
        assert_eq!(d.display_name, "Mytool");
        assert!(!d.requires_elevated_evaluation);
        assert!(d.create_persistence_root);
        assert_eq!(
            d.acquisition_strategy,
            AcquisitionStrategy::StoreRealize {
                build_recipe_path: "/store/aaaa-mytool-0.3.1.drv".into(),
                output_path: "/store/bbbb-mytool-0.3.1".into(),
            }
        );
    }

    #[test]
    fn reference_kind_must_be_unambiguous() {
        let mut both = AppRequest::by_name("hello");
        both.direct = Some(direct_package());
        assert!(matches!(
            assemble(&both, &repo(), &config()),
            Err(LazyAppError::AmbiguousReference(_))
        ));
        assert!(matches!(
            assemble(&AppRequest::default(), &repo(), &config()),
            Err(LazyAppError::MissingReference(_))
        ));
    }

    #[test]
    fn validation_happens_before_lookup() {
        let err = assemble(
            &AppRequest::by_name("this-package-does-not-exist").with_id("bad id"),
            &repo(),
            &config(),
        )
        .unwrap_err();
        assert!(matches!(err, LazyAppError::InvalidIdentifier { .. }));

        let err = assemble(
            &AppRequest::by_name("this-package-does-not-exist"),
            &repo(),
            &config(),
        )
        .unwrap_err();
        assert!(matches!(err, LazyAppError::PackageNotFound { .. }));
    }

    #[test]
    fn assembly_is_pure() {
        let theme = tempfile::TempDir::new().unwrap();
        let apps = theme.path().join("scalable").join("apps");
        fs::create_dir_all(&apps).unwrap();
        fs::write(apps.join("obs.svg"), "<svg/>").unwrap();
        let mut config = config();
        config.icon_theme_root = Some(theme.path().to_path_buf());

        let mut request = AppRequest::by_name("obs-studio");
        request.options.categories = ["AudioVideo", "Recorder"]
            .into_iter()
            .map(String::from)
            .collect();

        let first = assemble(&request, &repo(), &config).unwrap();
        let second = assemble(&request, &repo(), &config).unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
        assert!(first.icon_path.ends_with("scalable/apps/obs.svg"));
    }
}
