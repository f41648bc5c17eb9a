//! Registry pattern model: an owned, versioned pattern as stored in the registry.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::pattern::{Pattern, PatternError, PatternRecord};

/// Row shape of the `patterns` table.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq, Eq)]
pub struct RegistryPatternRow {
    pub id: i64,
    pub pattern: String,
    pub component: String,
    #[serde(default)]
    pub owner: i64,
    #[serde(default)]
    pub version: i64,
}

/// A persisted pattern with its owning organization and revision counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RegistryPatternRow", into = "RegistryPatternRow")]
pub struct RegistryPattern {
    pattern: Pattern,
    owner: i64,
    version: i64,
}

impl RegistryPattern {
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn id(&self) -> i64 {
        self.pattern.id()
    }

    pub fn owner(&self) -> i64 {
        self.owner
    }

    pub fn version(&self) -> i64 {
        self.version
    }

    pub fn into_pattern(self) -> Pattern {
        self.pattern
    }
}

impl TryFrom<RegistryPatternRow> for RegistryPattern {
    type Error = PatternError;

    fn try_from(row: RegistryPatternRow) -> Result<Self, Self::Error> {
        let pattern = Pattern::try_from(PatternRecord {
            id: row.id,
            pattern: row.pattern,
            component: row.component,
        })?;
        Ok(Self {
            pattern,
            owner: row.owner,
            version: row.version,
        })
    }
}

impl From<RegistryPattern> for RegistryPatternRow {
    fn from(rp: RegistryPattern) -> Self {
        let record = PatternRecord::from(rp.pattern);
        Self {
            id: record.id,
            pattern: record.pattern,
            component: record.component,
            owner: rp.owner,
            version: rp.version,
        }
    }
}

/// Create payload. Ownership and versioning are never read from the client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePattern {
    pub pattern: String,
    #[serde(default)]
    pub component: String,
}

/// Update payload. `component` is write-once and must be left unset.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UpdatePattern {
    pub pattern: String,
    #[serde(default)]
    pub component: Option<String>,
}

impl UpdatePattern {
    pub fn touches_component(&self) -> bool {
        self.component.as_deref().is_some_and(|c| !c.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> RegistryPatternRow {
        RegistryPatternRow {
            id: 4,
            pattern: r"Apache/(?P<version>[\d.]+)".to_string(),
            component: "httpd".to_string(),
            owner: 7,
            version: 1,
        }
    }

    #[test]
    fn row_compiles_into_registry_pattern() {
        let rp = RegistryPattern::try_from(row()).unwrap();
        assert_eq!(rp.id(), 4);
        assert_eq!(rp.owner(), 7);
        assert_eq!(rp.version(), 1);
        let m = rp.pattern().match_bytes(b"Server: Apache/2.4.58").unwrap();
        assert_eq!(m.version(), "2.4.58");
    }

    #[test]
    fn row_with_broken_expression_is_rejected() {
        let mut bad = row();
        bad.pattern = "Apache/(".to_string();
        assert!(RegistryPattern::try_from(bad).is_err());
    }

    #[test]
    fn serializes_flat_with_owner_and_version() {
        let rp = RegistryPattern::try_from(row()).unwrap();
        let json = serde_json::to_value(&rp).unwrap();
        assert_eq!(json["id"], 4);
        assert_eq!(json["component"], "httpd");
        assert_eq!(json["owner"], 7);
        assert_eq!(json["version"], 1);
    }

    #[test]
    fn create_payload_ignores_owner() {
        let input: CreatePattern = serde_json::from_str(
            r#"{"pattern": "^x", "component": "c", "owner": 99, "version": 12}"#,
        )
        .unwrap();
        assert_eq!(input.pattern, "^x");
        assert_eq!(input.component, "c");
    }

    #[test]
    fn update_payload_component_detection() {
        let unset: UpdatePattern = serde_json::from_str(r#"{"pattern": "^x"}"#).unwrap();
        assert!(!unset.touches_component());

        let empty: UpdatePattern =
            serde_json::from_str(r#"{"pattern": "^x", "component": ""}"#).unwrap();
        assert!(!empty.touches_component());

        let set: UpdatePattern =
            serde_json::from_str(r#"{"pattern": "^x", "component": "new"}"#).unwrap();
        assert!(set.touches_component());
    }
}
