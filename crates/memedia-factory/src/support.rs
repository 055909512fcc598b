use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::FactoryError;

/// Embedded support tables.
const EMBEDDED_TABLES: &str = include_str!("../data/support.toml");

/// The URI schemes, file extensions and platforms a factory advertises.
///
/// Built once when the factory module starts and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupportTables {
    /// URI schemes (e.g., "file", "rtsp"). Membership is case-sensitive.
    #[serde(default)]
    pub schemes: BTreeSet<String>,
    /// File extensions without the leading dot. Only used for `file` URLs.
    #[serde(default)]
    pub extensions: BTreeSet<String>,
    /// Platforms the player runs on, in declaration order.
    #[serde(default)]
    pub platforms: Vec<String>,
}

impl SupportTables {
    /// Create empty tables. Every URL is rejected against these.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the embedded support tables.
    pub fn embedded() -> Self {
        Self::from_toml(EMBEDDED_TABLES).expect("embedded support.toml should be valid")
    }

    /// Parse tables from a TOML string. Scheme and extension tokens are lowercased
    /// and a leading dot on an extension is dropped.
    pub fn from_toml(toml_str: &str) -> Result<Self, FactoryError> {
        let raw: SupportTables = toml::from_str(toml_str)?;
        Ok(raw.normalized())
    }

    /// Read and parse a user tables file.
    pub fn load_user(path: &Path) -> Result<Self, FactoryError> {
        let content = std::fs::read_to_string(path).map_err(|source| FactoryError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let tables = Self::from_toml(&content)?;
        tracing::debug!(
            path = %path.display(),
            schemes = tables.schemes.len(),
            extensions = tables.extensions.len(),
            "loaded user support tables"
        );
        Ok(tables)
    }

    /// Merge user tables into these ones.
    /// Schemes and extensions are unioned; new platforms are appended in order.
    pub fn merge_user(&mut self, user: &SupportTables) {
        self.schemes.extend(user.schemes.iter().cloned());
        self.extensions.extend(user.extensions.iter().cloned());
        for platform in &user.platforms {
            if !self.platforms.contains(platform) {
                self.platforms.push(platform.clone());
            }
        }
    }

    /// Whether `scheme` is supported (exact, case-sensitive).
    pub fn supports_scheme(&self, scheme: &str) -> bool {
        self.schemes.contains(scheme)
    }

    /// Whether `extension` is supported. Expects a lowercase token without a dot.
    pub fn supports_extension(&self, extension: &str) -> bool {
        self.extensions.contains(extension)
    }

    fn normalized(self) -> Self {
        Self {
            schemes: self
                .schemes
                .into_iter()
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            extensions: self
                .extensions
                .into_iter()
                .map(|e| e.trim().trim_start_matches('.').to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
            platforms: self
                .platforms
                .into_iter()
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_loads() {
        let tables = SupportTables::embedded();
        assert_eq!(tables.schemes.len(), 8);
        assert_eq!(tables.extensions.len(), 18);
        assert_eq!(tables.platforms, vec!["Windows".to_string()]);
    }

    #[test]
    fn test_embedded_schemes() {
        let tables = SupportTables::embedded();
        for scheme in ["file", "http", "httpd", "https", "mms", "rtsp", "rtspt", "rtspu"] {
            assert!(tables.supports_scheme(scheme), "missing scheme {scheme}");
        }
        assert!(!tables.supports_scheme("ftp"));
        assert!(!tables.supports_scheme("HTTP"));
    }

    #[test]
    fn test_embedded_extensions() {
        let tables = SupportTables::embedded();
        for ext in [
            "3g2", "3gp", "3gp2", "3gpp", "aac", "adts", "asf", "avi", "m4a", "m4v", "mov", "mp3",
            "mp4", "sami", "smi", "wav", "wma", "wmv",
        ] {
            assert!(tables.supports_extension(ext), "missing extension {ext}");
        }
        assert!(!tables.supports_extension("mkv"));
    }

    #[test]
    fn test_default_is_empty() {
        let tables = SupportTables::default();
        assert_eq!(tables, SupportTables::new());
        assert!(tables.schemes.is_empty());
        assert!(tables.extensions.is_empty());
        assert!(tables.platforms.is_empty());
    }

    #[test]
    fn test_embedded_is_idempotent() {
        assert_eq!(SupportTables::embedded(), SupportTables::embedded());
    }

    #[test]
    fn test_from_toml_normalizes_tokens() {
        let toml = r#"
            schemes = ["RTMP", " srt "]
            extensions = [".MKV", "webm", ""]
            platforms = ["Linux"]
        "#;
        let tables = SupportTables::from_toml(toml).unwrap();
        assert!(tables.supports_scheme("rtmp"));
        assert!(tables.supports_scheme("srt"));
        assert!(tables.supports_extension("mkv"));
        assert!(tables.supports_extension("webm"));
        assert_eq!(tables.extensions.len(), 2);
    }

    #[test]
    fn test_from_toml_missing_sections_default_empty() {
        let tables = SupportTables::from_toml("schemes = [\"file\"]").unwrap();
        assert!(tables.extensions.is_empty());
        assert!(tables.platforms.is_empty());
    }

    #[test]
    fn test_from_toml_rejects_bad_types() {
        let err = SupportTables::from_toml("schemes = 3").unwrap_err();
        assert!(matches!(err, FactoryError::Toml(_)));
    }

    #[test]
    fn test_merge_user() {
        let mut tables = SupportTables::embedded();
        let user = SupportTables::from_toml(
            r#"
            schemes = ["rtmp", "file"]
            extensions = ["mkv"]
            platforms = ["Windows", "XboxOne"]
        "#,
        )
        .unwrap();
        tables.merge_user(&user);

        assert_eq!(tables.schemes.len(), 9);
        assert!(tables.supports_scheme("rtmp"));
        assert!(tables.supports_extension("mkv"));
        assert_eq!(tables.platforms, vec!["Windows".to_string(), "XboxOne".to_string()]);
    }

    #[test]
    fn test_load_user_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SupportTables::load_user(&dir.path().join("nope.toml")).unwrap_err();
        assert!(matches!(err, FactoryError::Read { .. }));
    }

    #[test]
    fn test_load_user_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("support.toml");
        std::fs::write(&path, "extensions = [\"flac\"]\n").unwrap();
        let tables = SupportTables::load_user(&path).unwrap();
        assert!(tables.supports_extension("flac"));
        assert!(tables.schemes.is_empty());
    }
}
