//! URL helpers for telling local files from remote ones.

use std::path::{Path, PathBuf};

/// Schemes that refer to the local filesystem.
const LOCAL_SCHEMES: &[&str] = &["file", "osfs"];

/// Split a URL into its scheme (if any) and the resource part.
///
/// `"syn://syn123"` yields `(Some("syn"), "syn123")`; a bare path yields
/// `(None, path)`.
pub fn split_scheme(url: &str) -> (Option<&str>, &str) {
    match url.split_once("://") {
        Some((scheme, resource)) if !scheme.is_empty() => (Some(scheme), resource),
        _ => (None, url),
    }
}

/// Whether the URL points at the local filesystem.
pub fn is_url_local(url: &str) -> bool {
    match split_scheme(url) {
        (None, _) => true,
        (Some(scheme), _) => LOCAL_SCHEMES.contains(&scheme.to_lowercase().as_str()),
    }
}

/// Filesystem path of a local URL (the URL with any local scheme removed).
pub fn local_path_of(url: &str) -> Option<PathBuf> {
    if is_url_local(url) {
        Some(PathBuf::from(split_scheme(url).1))
    } else {
        None
    }
}

/// Last path segment of a URL's resource part.
pub fn file_name_of(url: &str) -> String {
    let (_, resource) = split_scheme(url);
    let trimmed = resource.trim_end_matches('/');
    trimmed
        .rsplit('/')
        .next()
        .unwrap_or(trimmed)
        .to_string()
}

/// Re-base a relative local URL onto `relative_to`; other URLs are untouched.
pub fn rebase_local_url(url: &str, relative_to: &Path) -> String {
    if !is_url_local(url) {
        log::warn!(
            "URL ({}) is remote. Ignoring relative_to ({})",
            url,
            relative_to.display()
        );
        return url.to_string();
    }
    let (scheme, resource) = split_scheme(url);
    let path = Path::new(resource);
    if path.is_absolute() {
        return url.to_string();
    }
    let rebased = relative_to.join(path);
    match scheme {
        Some(scheme) => format!("{}://{}", scheme, rebased.display()),
        None => rebased.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_scheme() {
        assert_eq!(split_scheme("syn://syn123"), (Some("syn"), "syn123"));
        assert_eq!(split_scheme("data/test.txt"), (None, "data/test.txt"));
        assert_eq!(split_scheme("://odd"), (None, "://odd"));
    }

    #[test]
    fn test_is_url_local() {
        assert!(is_url_local("data/test.txt"));
        assert!(is_url_local("/abs/test.txt"));
        assert!(is_url_local("file:///abs/test.txt"));
        assert!(is_url_local("osfs://data/test.txt"));
        assert!(!is_url_local("syn://syn123"));
        assert!(!is_url_local("mem://test.txt"));
    }

    #[test]
    fn test_local_path_of() {
        assert_eq!(
            local_path_of("file:///abs/test.txt"),
            Some(PathBuf::from("/abs/test.txt"))
        );
        assert_eq!(local_path_of("s3://bucket/key.txt"), None);
    }

    #[test]
    fn test_file_name_of() {
        assert_eq!(file_name_of("data/circuit.tif"), "circuit.tif");
        assert_eq!(file_name_of("s3://bucket/dir/key.txt"), "key.txt");
        assert_eq!(file_name_of("syn://syn50555279"), "syn50555279");
        assert_eq!(file_name_of("mem://test.txt"), "test.txt");
    }

    #[test]
    fn test_rebase_local_url() {
        let base = Path::new("/manifests");
        assert_eq!(rebase_local_url("test.txt", base), "/manifests/test.txt");
        assert_eq!(rebase_local_url("/abs/test.txt", base), "/abs/test.txt");
        assert_eq!(rebase_local_url("syn://syn1", base), "syn://syn1");
        assert_eq!(
            rebase_local_url("file://sub/test.txt", base),
            "file:///manifests/sub/test.txt"
        );
    }
}
