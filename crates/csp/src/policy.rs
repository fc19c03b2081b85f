//! CSP policy model and header parsing.

use indexmap::IndexMap;

use crate::source_set::SourceSet;

/// A structured Content-Security-Policy header value.
///
/// Directives keep the order in which they were first declared; each
/// directive keeps its source tokens in first-seen order. Directive names
/// are normalized to lowercase, source tokens are stored verbatim.
#[derive(Clone, Debug, Default)]
pub struct Policy {
    directives: IndexMap<String, SourceSet>,
    nonce: Option<String>,
}

impl Policy {
    /// Create a new empty policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a CSP header value.
    ///
    /// Parsing never fails: empty segments are skipped, and a repeated
    /// directive is discarded in favor of its first occurrence (the CSP
    /// "first directive wins" rule) with a warning event. Segments are
    /// trimmed and split on Unicode whitespace, slightly looser than the
    /// ASCII-only header grammar.
    pub fn parse(header: &str) -> Self {
        let mut policy = Policy::new();

        for segment in header.split(';') {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            let mut parts = segment.split_whitespace();
            if let Some(name) = parts.next() {
                let name = name.to_lowercase();
                if policy.directives.contains_key(&name) {
                    tracing::warn!("duplicate directive '{}', discarding: {}", name, segment);
                    continue;
                }
                let mut sources = SourceSet::new();
                for token in parts {
                    sources.insert(token);
                }
                policy.directives.insert(name, sources);
            }
        }

        policy
    }

    /// Replace a directive's source list, creating the directive if absent.
    /// An existing directive keeps its place in declaration order.
    pub fn set<I, S>(&mut self, directive: &str, sources: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let sources: SourceSet = sources.into_iter().collect();
        self.directives.insert(directive.to_lowercase(), sources);
    }

    /// Append a single source token to a directive, creating the directive
    /// (at the end of declaration order) if absent. Appending a token that
    /// is already present is a no-op.
    pub fn append_source(&mut self, directive: &str, token: &str) {
        self.directives
            .entry(directive.to_lowercase())
            .or_default()
            .insert(token);
    }

    /// Check if a directive is declared. A directive declared with zero
    /// sources still counts as declared.
    pub fn contains_directive(&self, directive: &str) -> bool {
        self.directives.contains_key(&directive.to_lowercase())
    }

    /// Get a directive's source list.
    pub fn sources(&self, directive: &str) -> Option<&SourceSet> {
        self.directives.get(&directive.to_lowercase())
    }

    /// Iterate over directive names in declaration order.
    pub fn directive_names(&self) -> impl Iterator<Item = &str> {
        self.directives.keys().map(|k| k.as_str())
    }

    /// Iterate over directives and their source lists in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SourceSet)> {
        self.directives.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Get number of declared directives.
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Check if no directives are declared.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// The nonce most recently generated by a preset, if any.
    pub fn nonce(&self) -> Option<&str> {
        self.nonce.as_deref()
    }

    pub(crate) fn record_nonce(&mut self, nonce: &str) {
        self.nonce = Some(nonce.to_string());
    }
}

// Order-sensitive equality over declaration order and source order.
impl PartialEq for Policy {
    fn eq(&self, other: &Self) -> bool {
        self.nonce == other.nonce
            && self.directives.len() == other.directives.len()
            && self
                .directives
                .iter()
                .zip(other.directives.iter())
                .all(|((name_a, src_a), (name_b, src_b))| name_a == name_b && src_a == src_b)
    }
}

impl Eq for Policy {}
