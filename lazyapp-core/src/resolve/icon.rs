// lazyapp-core/src/resolve/icon.rs
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

/// Size buckets in search order: launcher-friendly sizes first, vector before the small rasters.
pub const ICON_SIZE_BUCKETS: [&str; 10] = [
    "64x64", "scalable", "48x48", "128x128", "96x96", "256x256", "32x32", "24x24", "22x22",
    "16x16",
];

fn find_in_theme(theme_root: &Path, name: &str) -> Option<PathBuf> {
    ICON_SIZE_BUCKETS.iter().find_map(|bucket| {
        let candidate = theme_root
            .join(bucket)
            .join("apps")
            .join(format!("{name}.svg"));
        if !candidate.exists() {
            return None;
        }
        // Follow symlinks so the result points at the real asset.
        match fs::canonicalize(&candidate) {
            Ok(resolved) => Some(resolved),
            Err(e) => {
                debug!("Could not canonicalize {}: {}", candidate.display(), e);
                None
            }
        }
    })
}

/// Resolves the icon for a descriptor at build time.
///
/// An absolute `explicit` path is returned as is. A relative `explicit` value is an icon name and
/// replaces `primary`. The theme is searched for the primary name across all buckets, then for
/// the fallback name. On a miss the bare primary name is returned so the display layer can still
/// try its own lookup.
pub fn resolve_icon(
    theme_root: Option<&Path>,
    primary: &str,
    fallback: &str,
    explicit: Option<&str>,
) -> String {
    let primary = match explicit {
        Some(path) if Path::new(path).is_absolute() => return path.to_string(),
        Some(name) => {
            debug!("Icon name '{}' replaces primary name '{}'", name, primary);
            name
        }
        None => primary,
    };

    let found = theme_root.and_then(|root| {
        find_in_theme(root, primary).or_else(|| find_in_theme(root, fallback))
    });

    match found {
        Some(path) => {
            debug!("Resolved icon '{}' to {}", primary, path.display());
            path.to_string_lossy().into_owned()
        }
        None => {
            match theme_root {
                Some(root) => warn!(
                    "No icon found for '{}' (fallback '{}') in {}; using bare name",
                    primary,
                    fallback,
                    root.display()
                ),
                None => warn!(
                    "No icon theme configured; using bare icon name '{}'",
                    primary
                ),
            }
            primary.to_string()
        }
    }
}
