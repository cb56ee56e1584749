//! URI normalization for document identity.
//!
//! Documents, symbols, and cache entries are all keyed by URI. Editors are
//! inconsistent about casing (Windows drive letters) and percent-encoding,
//! so every URI that enters the core is normalized through [`DocumentUri`]
//! before it is used as a map key.

use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// A normalized document identity.
///
/// Two URIs that denote the same resource normalize to the same
/// `DocumentUri`, so it is safe to use as a `HashMap`/index key directly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DocumentUri(String);

impl DocumentUri {
    /// Parse and normalize. Special schemes (`untitled:`, `git:`, ...) and
    /// malformed input are preserved rather than rejected — the core has no
    /// opinion on what a valid document identity looks like beyond needing
    /// one consistent string per resource.
    pub fn parse(raw: &str) -> Self {
        Self(normalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_file(&self) -> bool {
        self.0.starts_with("file://")
    }

    pub fn is_special_scheme(&self) -> bool {
        !self.is_file()
    }

    pub fn extension(&self) -> Option<&str> {
        let last_segment = self.0.rsplit('/').next()?;
        let last_segment = last_segment.split('?').next()?;
        let last_segment = last_segment.split('#').next()?;
        let dot = last_segment.rfind('.')?;
        let ext = &last_segment[dot + 1..];
        if ext.is_empty() { None } else { Some(ext) }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn to_fs_path(&self) -> Option<std::path::PathBuf> {
        let url = Url::parse(&self.0).ok()?;
        if url.scheme() != "file" {
            return None;
        }
        url.to_file_path().ok()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_fs_path<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let abs = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_err(|e| format!("cannot resolve cwd: {e}"))?.join(path)
        };
        Url::from_file_path(&abs)
            .map(|u| Self(u.to_string()))
            .map_err(|_| format!("cannot convert path to uri: {}", abs.display()))
    }
}

impl std::fmt::Display for DocumentUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentUri {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<String> for DocumentUri {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn normalize(raw: &str) -> String {
    let normalized = if let Ok(url) = Url::parse(raw) {
        url.to_string()
    } else if let Ok(uri) = DocumentUri::from_fs_path(raw) {
        uri.0
    } else {
        raw.to_string()
    };
    lowercase_windows_drive(&normalized)
}

#[cfg(target_arch = "wasm32")]
fn normalize(raw: &str) -> String {
    let normalized = if let Ok(url) = Url::parse(raw) { url.to_string() } else { raw.to_string() };
    lowercase_windows_drive(&normalized)
}

fn lowercase_windows_drive(uri: &str) -> String {
    let Some(rest) = uri.strip_prefix("file:///") else {
        return uri.to_string();
    };
    let bytes = rest.as_bytes();
    if rest.len() > 1 && bytes[1] == b':' && bytes[0].is_ascii_alphabetic() {
        format!("file:///{}{}", rest[0..1].to_ascii_lowercase(), &rest[1..])
    } else {
        uri.to_string()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn windows_drive_letter_is_case_folded() {
        let a = DocumentUri::parse("file:///C:/Users/test.txt");
        let b = DocumentUri::parse("file:///c:/Users/test.txt");
        assert_eq!(a, b);
    }

    #[test]
    fn special_schemes_pass_through() {
        let uri = DocumentUri::parse("untitled:Untitled-1");
        assert!(uri.is_special_scheme());
        assert_eq!(uri.as_str(), "untitled:Untitled-1");
    }

    #[test]
    fn extension_extraction() {
        assert_eq!(DocumentUri::parse("file:///tmp/test.src").extension(), Some("src"));
        assert_eq!(DocumentUri::parse("file:///tmp/no-ext").extension(), None);
        assert_eq!(DocumentUri::parse("file:///tmp/file.src?query=1").extension(), Some("src"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn fs_path_round_trip() {
        let original = "/tmp/scriptls-roundtrip-test.src";
        let uri = DocumentUri::from_fs_path(original).unwrap();
        let path = uri.to_fs_path().unwrap();
        assert!(path.ends_with("scriptls-roundtrip-test.src"));
    }

    #[test]
    fn two_uris_for_same_resource_hash_equal() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        set.insert(DocumentUri::parse("file:///C:/a.src"));
        assert!(set.contains(&DocumentUri::parse("file:///c:/a.src")));
    }
}
