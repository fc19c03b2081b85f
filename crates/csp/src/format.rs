//! Header serialization and source-token quoting.

use std::fmt;

use crate::policy::Policy;

/// Keywords the CSP grammar requires to be single-quoted.
const KEYWORDS: [&str; 8] = [
    "none",
    "self",
    "unsafe-inline",
    "unsafe-eval",
    "strict-dynamic",
    "unsafe-hashes",
    "report-sample",
    "unsafe-allow-redirects",
];

const DIGEST_PREFIXES: [&str; 3] = ["sha256-", "sha384-", "sha512-"];

/// Return the quoted form if `token` is a keyword, quoted or unquoted.
fn keyword(token: &str) -> Option<String> {
    let bare = token
        .strip_prefix('\'')
        .and_then(|t| t.strip_suffix('\''))
        .unwrap_or(token);
    if KEYWORDS.contains(&bare) {
        Some(format!("'{}'", bare))
    } else {
        None
    }
}

/// Render one source token with the quoting its class requires.
///
/// Tokens matching no known source class pass through untouched, with a
/// warning event, so forward-compatible policies survive a round trip.
pub(crate) fn format_source(source: &str) -> String {
    if let Some(kw) = keyword(source) {
        return kw;
    }
    // URLs, bare schemes (trailing colon), and hosts (anything with a dot)
    // stay unquoted.
    if source.starts_with("https://") || source.starts_with("http://") {
        return source.to_string();
    }
    if source.ends_with(':') {
        return source.to_string();
    }
    if source.contains('.') {
        return source.to_string();
    }
    // Nonces and digests require quotes; add them when absent.
    if source.starts_with("nonce-") {
        return format!("'{}'", source);
    }
    if source.starts_with("'nonce-") {
        return source.to_string();
    }
    if DIGEST_PREFIXES.iter().any(|p| source.starts_with(p)) {
        return format!("'{}'", source);
    }
    if source.starts_with('\'') && DIGEST_PREFIXES.iter().any(|p| source[1..].starts_with(p)) {
        return source.to_string();
    }

    tracing::warn!("source '{}' matches no known CSP source class", source);
    source.to_string()
}

impl Policy {
    /// Serialize into a Content-Security-Policy header value.
    ///
    /// Directives appear in declaration order, each as
    /// `<name> <sources...>;` with sources in insertion order; a directive
    /// without sources renders as `<name>;`.
    pub fn to_header_value(&self) -> String {
        let mut directives = Vec::with_capacity(self.len());
        for (name, sources) in self.iter() {
            let rendered: Vec<String> = sources.iter().map(format_source).collect();
            if rendered.is_empty() {
                directives.push(format!("{};", name));
            } else {
                directives.push(format!("{} {};", name, rendered.join(" ")));
            }
        }
        directives.join(" ")
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_header_value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip_single_directive() {
        let header = "img-src 'none';";
        assert_eq!(Policy::parse(header).to_header_value(), header);
    }

    #[test]
    fn test_round_trip_multiple_directives() {
        let header = "img-src https: 'self'; object-src 'none'; default-src 'none';";
        assert_eq!(Policy::parse(header).to_header_value(), header);
    }

    #[test]
    fn test_duplicate_directive_dropped_from_output() {
        let policy = Policy::parse("img-src https: 'self'; img-src 'none';");
        assert_eq!(policy.to_header_value(), "img-src https: 'self';");
    }

    #[test]
    fn test_directive_without_sources() {
        let policy = Policy::parse("upgrade-insecure-requests;");
        assert_eq!(policy.to_header_value(), "upgrade-insecure-requests;");
    }

    #[test]
    fn test_parse_format_parse_is_idempotent() {
        let first = Policy::parse("script-src 'self' https://cdn.example.com; img-src 'self'");
        let second = Policy::parse(&first.to_header_value());
        assert_eq!(first, second);
    }

    #[test]
    fn test_keyword_gains_quotes() {
        assert_eq!(format_source("none"), "'none'");
        assert_eq!(format_source("self"), "'self'");
        assert_eq!(format_source("strict-dynamic"), "'strict-dynamic'");
    }

    #[test]
    fn test_quoted_keyword_unchanged() {
        assert_eq!(format_source("'none'"), "'none'");
        assert_eq!(format_source("'unsafe-inline'"), "'unsafe-inline'");
    }

    #[test]
    fn test_url_scheme_and_host_unquoted() {
        assert_eq!(format_source("https://cdn.example.com"), "https://cdn.example.com");
        assert_eq!(format_source("http://example.com"), "http://example.com");
        assert_eq!(format_source("https:"), "https:");
        assert_eq!(format_source("cdn.example.com"), "cdn.example.com");
        assert_eq!(format_source("*.example.com"), "*.example.com");
    }

    #[test]
    fn test_nonce_gains_quotes() {
        assert_eq!(format_source("nonce-ABC123"), "'nonce-ABC123'");
        assert_eq!(format_source("'nonce-ABC123'"), "'nonce-ABC123'");
    }

    #[test]
    fn test_digest_gains_quotes() {
        assert_eq!(format_source("sha256-deadbeef"), "'sha256-deadbeef'");
        assert_eq!(format_source("sha384-deadbeef"), "'sha384-deadbeef'");
        assert_eq!(format_source("sha512-deadbeef"), "'sha512-deadbeef'");
        assert_eq!(format_source("'sha256-deadbeef'"), "'sha256-deadbeef'");
    }

    #[test]
    fn test_unrecognized_source_passes_through() {
        assert_eq!(format_source("wasm-unsafe-eval"), "wasm-unsafe-eval");
    }

    #[test]
    fn test_display_matches_header_value() {
        let policy = Policy::parse("default-src 'none';");
        assert_eq!(policy.to_string(), policy.to_header_value());
    }
}
