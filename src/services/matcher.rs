//! Matching engine: applies every loaded pattern to an input byte string.
//!
//! The pattern set is an immutable snapshot. Reloading means building a new
//! [`Matcher`] and swapping it in; a running match never observes a
//! partially updated set.

use std::path::Path;
use std::sync::Arc;

use crate::client::{ClientError, RegistryClient};
use crate::models::pattern::{Pattern, PatternMatch};

/// Failure to load a pattern snapshot.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read pattern file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse patterns: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("failed to fetch patterns from registry: {0}")]
    Registry(#[from] ClientError),
}

/// Run every pattern against `input`, in order, collecting all matches.
pub fn run_matcher(patterns: &[Pattern], input: &[u8]) -> Vec<PatternMatch> {
    patterns
        .iter()
        .filter_map(|pattern| pattern.match_bytes(input))
        .collect()
}

#[derive(Debug, Clone)]
pub struct Matcher {
    patterns: Arc<[Pattern]>,
}

impl Matcher {
    pub fn new(patterns: Vec<Pattern>) -> Self {
        Self {
            patterns: patterns.into(),
        }
    }

    /// Parse a JSON array of patterns. One invalid expression fails the whole load.
    pub fn from_json(bytes: &[u8]) -> Result<Self, LoadError> {
        let patterns: Vec<Pattern> = serde_json::from_slice(bytes)?;
        Ok(Self::new(patterns))
    }

    pub fn load_file(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&bytes)
    }

    /// Snapshot the registry's public pattern listing.
    pub async fn from_registry(client: &RegistryClient) -> Result<Self, LoadError> {
        let patterns = client
            .fetch_patterns()
            .await?
            .into_iter()
            .map(|rp| rp.into_pattern())
            .collect();
        Ok(Self::new(patterns))
    }

    pub fn patterns(&self) -> &[Pattern] {
        &self.patterns
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    pub fn run(&self, input: &[u8]) -> Vec<PatternMatch> {
        run_matcher(&self.patterns, input)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn pattern(id: i64, expr: &str, component: &str) -> Pattern {
        Pattern::new(id, expr, component).unwrap()
    }

    #[test]
    fn collects_matches_in_pattern_order() {
        let patterns = vec![
            pattern(1, r"nginx/(?P<version>[\d.]+)", "nginx"),
            pattern(2, r"OpenSSL/(?P<version>[\d.a-z]+)", "openssl"),
        ];
        let matches = run_matcher(&patterns, b"Server: nginx/1.25.3 OpenSSL/3.0.2");
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].pattern().component(), "nginx");
        assert_eq!(matches[0].version(), "1.25.3");
        assert_eq!(matches[1].pattern().component(), "openssl");
        assert_eq!(matches[1].version(), "3.0.2");
    }

    #[test]
    fn non_matching_patterns_are_skipped_without_short_circuit() {
        let patterns = vec![
            pattern(1, "^ERROR", "syslog"),
            pattern(2, "nothing-here", "other"),
            pattern(3, "disk", "storage"),
        ];
        let matches = run_matcher(&patterns, b"ERROR: disk full");
        let ids: Vec<i64> = matches.iter().map(|m| m.pattern().id()).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn empty_set_or_no_match_yields_empty_list() {
        assert!(run_matcher(&[], b"anything").is_empty());
        let matcher = Matcher::new(vec![pattern(1, "^x$", "x")]);
        assert!(matcher.run(b"y").is_empty());
    }

    #[test]
    fn matcher_is_reusable_across_threads() {
        let matcher = Matcher::new(vec![pattern(1, r"v(?P<version>\d+)", "app")]);
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let matcher = matcher.clone();
                std::thread::spawn(move || {
                    let input = format!("v{i}");
                    matcher.run(input.as_bytes())[0].version().to_string()
                })
            })
            .collect();
        let versions: Vec<String> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(versions, vec!["0", "1", "2", "3"]);
    }

    #[test]
    fn loads_patterns_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[
                {{"pattern": "^ERROR", "component": "syslog"}},
                {{"id": 4, "pattern": "v(?P<version>\\d+)", "component": "app"}}
            ]"#
        )
        .unwrap();

        let matcher = Matcher::load_file(file.path()).unwrap();
        assert_eq!(matcher.len(), 2);
        assert_eq!(matcher.patterns()[0].id(), 0);
        assert_eq!(matcher.patterns()[1].id(), 4);
        assert_eq!(matcher.run(b"ERROR v9").len(), 2);
    }

    #[test]
    fn invalid_expression_aborts_load() {
        let result = Matcher::from_json(br#"[{"pattern": "ok"}, {"pattern": "(bad"}]"#);
        assert!(matches!(result, Err(LoadError::Parse(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let result = Matcher::load_file("/nonexistent/patterns.json");
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }
}
