// lazyapp-core/src/resolve/name.rs
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // `2.12.1`, `24.08rc2`
    static ref DOTTED_VERSION_RE: Regex = Regex::new(r"^[0-9]+\.[0-9]+.*$").unwrap();
    // `2rc1`, `3beta`
    static ref TAGGED_VERSION_RE: Regex =
        Regex::new(r"^[0-9]+(rc|alpha|beta|pre|post)[0-9]*$").unwrap();
}

fn is_version_part(part: &str) -> bool {
    DOTTED_VERSION_RE.is_match(part) || TAGGED_VERSION_RE.is_match(part)
}

/// Strips the version from a combined `name-version` string.
///
/// Keeps the parts before the first version-shaped part. Bare numbers such as the `2048` in
/// `2048-in-terminal` are not versions. If nothing is left the input is returned unchanged.
pub fn normalize_name(combined: &str) -> String {
    let kept: Vec<&str> = combined
        .split('-')
        .take_while(|part| !is_version_part(part))
        .collect();
    let joined = kept.join("-");
    if joined.is_empty() {
        combined.to_string()
    } else {
        joined
    }
}
