use serde::Serialize;
use thiserror::Error;

use crate::support::SupportTables;

/// Separator between the URI scheme and the location.
pub const SCHEME_SEPARATOR: &str = "://";

/// Scheme whose URLs additionally have their file extension checked.
pub const FILE_SCHEME: &str = "file";

/// Why a URL was rejected. The `Display` output is the user-facing message.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Rejection {
    #[error("No URI scheme found")]
    NoScheme,

    #[error("The URI scheme '{0}' is not supported")]
    SchemeNotSupported(String),

    #[error("The file extension '{0}' is not supported")]
    ExtensionNotSupported(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

/// A single message produced while matching a URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub reason: Rejection,
    pub message: String,
}

impl Diagnostic {
    pub fn error(reason: Rejection) -> Self {
        let message = reason.to_string();
        Self {
            severity: Severity::Error,
            reason,
            message,
        }
    }
}

/// Outcome of a capability match.
///
/// An empty diagnostics list does not mean the URL was accepted; check
/// [`CapabilityResult::accepted`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CapabilityResult {
    pub accepted: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl CapabilityResult {
    pub fn accept() -> Self {
        Self {
            accepted: true,
            diagnostics: Vec::new(),
        }
    }

    pub fn reject(reason: Rejection) -> Self {
        Self {
            accepted: false,
            diagnostics: vec![Diagnostic::error(reason)],
        }
    }

    /// Diagnostics with [`Severity::Error`].
    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
    }

    /// Diagnostics with [`Severity::Warning`].
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }
}

/// Split a URL into `(scheme, location)` at the first `"://"`.
pub fn split_url(url: &str) -> Option<(&str, &str)> {
    url.split_once(SCHEME_SEPARATOR)
}

/// Extension of the last path segment of `location`, lowercased and without the dot.
///
/// Both `/` and `\` separate segments. Returns an empty string when the last
/// segment has no dot.
pub fn file_extension(location: &str) -> String {
    let segment = location
        .rfind(['/', '\\'])
        .map_or(location, |i| &location[i + 1..]);
    segment
        .rfind('.')
        .map(|i| segment[i + 1..].to_lowercase())
        .unwrap_or_default()
}

/// Decide whether a URL can be opened with the given support tables.
///
/// Strategy: scheme separator → scheme membership → (file only) extension membership.
/// Remote schemes are accepted without looking at the extension.
pub fn match_url(url: &str, tables: &SupportTables) -> CapabilityResult {
    let Some((scheme, location)) = split_url(url) else {
        tracing::trace!(url, "rejected: no scheme");
        return CapabilityResult::reject(Rejection::NoScheme);
    };

    if !tables.supports_scheme(scheme) {
        tracing::trace!(url, scheme, "rejected: scheme not supported");
        return CapabilityResult::reject(Rejection::SchemeNotSupported(scheme.to_string()));
    }

    if scheme == FILE_SCHEME {
        let extension = file_extension(location);
        if !tables.supports_extension(&extension) {
            tracing::trace!(url, extension = %extension, "rejected: extension not supported");
            return CapabilityResult::reject(Rejection::ExtensionNotSupported(extension));
        }
    }

    tracing::trace!(url, scheme, "accepted");
    CapabilityResult::accept()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables() -> SupportTables {
        SupportTables::embedded()
    }

    fn only_reason(result: &CapabilityResult) -> &Rejection {
        assert_eq!(result.diagnostics.len(), 1);
        &result.diagnostics[0].reason
    }

    #[test]
    fn test_file_supported_extension() {
        let result = match_url("file://video.mp4", &tables());
        assert!(result.accepted);
        assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn test_file_unsupported_extension() {
        let result = match_url("file://clip.xyz", &tables());
        assert!(!result.accepted);
        assert_eq!(
            only_reason(&result),
            &Rejection::ExtensionNotSupported("xyz".into())
        );
        assert!(result.diagnostics[0].message.contains("xyz"));
    }

    #[test]
    fn test_unsupported_scheme() {
        let result = match_url("ftp://server/video.mp4", &tables());
        assert!(!result.accepted);
        assert_eq!(
            only_reason(&result),
            &Rejection::SchemeNotSupported("ftp".into())
        );
        assert_eq!(
            result.diagnostics[0].message,
            "The URI scheme 'ftp' is not supported"
        );
    }

    #[test]
    fn test_remote_scheme_skips_extension() {
        assert!(match_url("http://server/stream", &tables()).accepted);
        assert!(match_url("https://server/clip.xyz", &tables()).accepted);
        assert!(match_url("rtsp://cam.local/live.sdp", &tables()).accepted);
    }

    #[test]
    fn test_every_remote_scheme_skips_extension() {
        let tables = tables();
        for scheme in ["http", "httpd", "https", "mms", "rtsp", "rtspt", "rtspu"] {
            let url = format!("{scheme}://server/clip.xyz");
            let result = match_url(&url, &tables);
            assert!(result.accepted, "{url} should be accepted");
            assert!(result.diagnostics.is_empty());
        }
    }

    #[test]
    fn test_no_scheme() {
        let result = match_url("novalidurl", &tables());
        assert!(!result.accepted);
        assert_eq!(only_reason(&result), &Rejection::NoScheme);
        assert_eq!(result.diagnostics[0].message, "No URI scheme found");
        assert_eq!(result.diagnostics[0].severity, Severity::Error);
    }

    #[test]
    fn test_single_slash_is_not_a_separator() {
        let result = match_url("file:/video.mp4", &tables());
        assert_eq!(only_reason(&result), &Rejection::NoScheme);
    }

    #[test]
    fn test_empty_scheme_is_unsupported() {
        let result = match_url("://video.mp4", &tables());
        assert_eq!(
            only_reason(&result),
            &Rejection::SchemeNotSupported(String::new())
        );
    }

    #[test]
    fn test_scheme_is_case_sensitive() {
        let result = match_url("HTTP://server/stream", &tables());
        assert_eq!(
            only_reason(&result),
            &Rejection::SchemeNotSupported("HTTP".into())
        );
    }

    #[test]
    fn test_first_separator_wins() {
        assert_eq!(
            split_url("http://proxy/?u=ftp://x/y.avi"),
            Some(("http", "proxy/?u=ftp://x/y.avi"))
        );
        // The second "://" stays in the location, so the extension comes from its tail.
        assert!(match_url("file://a://b/movie.mov", &tables()).accepted);
        let result = match_url("ftp://a/http://b", &tables());
        assert_eq!(
            only_reason(&result),
            &Rejection::SchemeNotSupported("ftp".into())
        );
    }

    #[test]
    fn test_file_extension_is_lowercased() {
        assert_eq!(file_extension("C:/Movies/Clip.MP4"), "mp4");
        assert!(match_url("file://C:/Movies/Clip.MP4", &tables()).accepted);
    }

    #[test]
    fn test_file_extension_uses_last_segment() {
        assert_eq!(file_extension("/media/v1.2/trailer"), "");
        assert_eq!(file_extension("C:\\media\\song.wma"), "wma");
        assert_eq!(file_extension("/media/archive.tar.mp3"), "mp3");
        assert_eq!(file_extension("/media/.hidden"), "hidden");
        assert_eq!(file_extension(""), "");
    }

    #[test]
    fn test_file_without_extension() {
        let result = match_url("file:///media/v1.2/trailer", &tables());
        assert!(!result.accepted);
        assert_eq!(
            only_reason(&result),
            &Rejection::ExtensionNotSupported(String::new())
        );
    }

    #[test]
    fn test_match_is_idempotent() {
        let tables = tables();
        for url in ["file://a.wmv", "file://a.mkv", "mms://host/x", "gopher://x", "nope"] {
            assert_eq!(match_url(url, &tables), match_url(url, &tables));
        }
    }

    #[test]
    fn test_empty_tables_reject_everything() {
        let tables = SupportTables::new();
        assert!(!match_url("file://video.mp4", &tables).accepted);
        assert!(!match_url("http://server/stream", &tables).accepted);
    }

    #[test]
    fn test_errors_and_warnings_split() {
        let result = match_url("gopher://x", &tables());
        assert_eq!(result.errors().count(), 1);
        assert_eq!(result.warnings().count(), 0);
        assert_eq!(CapabilityResult::accept().errors().count(), 0);
    }

    #[test]
    fn test_result_serializes() {
        let json = serde_json::to_value(match_url("file://clip.xyz", &tables())).unwrap();
        assert_eq!(json["accepted"], false);
        assert_eq!(json["diagnostics"][0]["severity"], "error");
        assert_eq!(json["diagnostics"][0]["reason"]["kind"], "extension_not_supported");
        assert_eq!(json["diagnostics"][0]["reason"]["value"], "xyz");
    }
}
