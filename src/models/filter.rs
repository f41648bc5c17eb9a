//! Client-supplied query filters of the form `attribute[operator]=value`.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static FILTER_KEY: LazyLock<Regex> = LazyLock::new(|| {
    // ASCII word characters only; `\w` would also accept Unicode letters.
    Regex::new(r"^(?P<attribute>[A-Za-z0-9_]+)\[(?P<operator>[A-Za-z0-9_]+)\]$")
        .expect("static filter key regex")
});

/// A single (attribute, operator, value) constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub attribute: String,
    pub operator: String,
    pub value: String,
}

impl Filter {
    pub fn new(
        attribute: impl Into<String>,
        operator: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            attribute: attribute.into(),
            operator: operator.into(),
            value: value.into(),
        }
    }

    /// Parse a single query key/value pair. Keys that are not `attr[op]` yield `None`.
    pub fn from_query_pair(key: &str, value: &str) -> Option<Self> {
        let caps = FILTER_KEY.captures(key)?;
        Some(Self::new(&caps["attribute"], &caps["operator"], value))
    }

    /// Parse every filter-shaped pair, keeping query-string order.
    pub fn from_query_pairs<K, V>(pairs: &[(K, V)]) -> Vec<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        pairs
            .iter()
            .filter_map(|(k, v)| Self::from_query_pair(k.as_ref(), v.as_ref()))
            .collect()
    }
}
