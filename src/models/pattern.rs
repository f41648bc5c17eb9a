//! Pattern model: a regular expression tagged with a component, plus its compiled form.
//!
//! The serializable half lives in [`PatternRecord`]. A [`Pattern`] can only be
//! obtained by compiling a record, so the compiled regex is always in sync with
//! the expression it was built from.

use regex::bytes::Regex;
use serde::{Deserialize, Serialize};

/// Name of the capture group whose text becomes [`PatternMatch::version`].
pub const VERSION_GROUP: &str = "version";

/// Error raised when an expression is not a valid regular expression.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PatternError {
    #[error("invalid pattern expression: {0}")]
    Compile(#[from] regex::Error),
}

/// Compile an expression into its matchable form.
pub fn compile(expression: &str) -> Result<Regex, PatternError> {
    Ok(Regex::new(expression)?)
}

/// Wire and storage shape of a pattern. Never carries the compiled form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PatternRecord {
    #[serde(default)]
    pub id: i64,
    pub pattern: String,
    #[serde(default)]
    pub component: String,
}

/// A compiled, matchable pattern.
///
/// Deserializing compiles the expression; an invalid expression fails
/// deserialization instead of producing a half-built value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "PatternRecord", into = "PatternRecord")]
pub struct Pattern {
    record: PatternRecord,
    compiled: Regex,
}

impl Pattern {
    pub fn new(
        id: i64,
        expression: impl Into<String>,
        component: impl Into<String>,
    ) -> Result<Self, PatternError> {
        Self::try_from(PatternRecord {
            id,
            pattern: expression.into(),
            component: component.into(),
        })
    }

    pub fn id(&self) -> i64 {
        self.record.id
    }

    pub fn expression(&self) -> &str {
        &self.record.pattern
    }

    pub fn component(&self) -> &str {
        &self.record.component
    }

    /// Replace the expression. On a compile error the pattern is left untouched.
    pub fn set_expression(&mut self, expression: impl Into<String>) -> Result<(), PatternError> {
        let expression = expression.into();
        self.compiled = compile(&expression)?;
        self.record.pattern = expression;
        Ok(())
    }

    /// Match the input once (leftmost-first), extracting the `version` group if present.
    ///
    /// Returns `None` when the expression does not match; a pattern never yields
    /// more than one match per call.
    pub fn match_bytes(&self, input: &[u8]) -> Option<PatternMatch> {
        let captures = self.compiled.captures(input)?;
        let version = captures
            .name(VERSION_GROUP)
            .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
            .unwrap_or_default();

        Some(PatternMatch {
            pattern: self.clone(),
            version,
        })
    }
}

impl TryFrom<PatternRecord> for Pattern {
    type Error = PatternError;

    fn try_from(record: PatternRecord) -> Result<Self, Self::Error> {
        let compiled = compile(&record.pattern)?;
        Ok(Self { record, compiled })
    }
}

impl From<Pattern> for PatternRecord {
    fn from(pattern: Pattern) -> Self {
        pattern.record
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.record == other.record
    }
}

impl Eq for Pattern {}

/// Snapshot of a successful match. `version` is empty when the expression has
/// no `version` group or the group did not participate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternMatch {
    pattern: Pattern,
    #[serde(skip_serializing_if = "String::is_empty")]
    version: String,
}

impl PatternMatch {
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn version(&self) -> &str {
        &self.version
    }
}
