//! Filter translation: client filters into a parametrized WHERE predicate.
//!
//! The set of filterable attributes is closed and fixed when the
//! [`FilterRegistry`] is built. Values are never written into the predicate
//! text; each one travels as a separately bound argument.

use std::collections::HashMap;

use crate::models::filter::Filter;

/// Value shape an attribute expects once bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueShape {
    Number,
    Text,
}

/// Comparison operators understood by the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
}

impl Operator {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "eq" => Some(Self::Eq),
            _ => None,
        }
    }

    fn sql(self) -> &'static str {
        match self {
            Self::Eq => "=",
        }
    }
}

impl ValueShape {
    /// Operators each shape accepts.
    pub fn operators(self) -> &'static [Operator] {
        match self {
            Self::Number => &[Operator::Eq],
            Self::Text => &[Operator::Eq],
        }
    }

    fn condition(self, column: &str, token: &str) -> Result<String, FilterError> {
        let operator = Operator::parse(token)
            .filter(|op| self.operators().contains(op))
            .ok_or_else(|| FilterError::Operator {
                attribute: column.to_string(),
                operator: token.to_string(),
            })?;
        Ok(format!("{column} {} ?", operator.sql()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("attribute may not be filtered on: {0}")]
    Attribute(String),

    #[error("unsupported operator '{operator}' for attribute '{attribute}'")]
    Operator { attribute: String, operator: String },
}

/// A raw filter value together with the shape the store should bind it as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundArg {
    pub shape: ValueShape,
    pub raw: String,
}

/// Translated predicate: `?`-placeholder clause plus positional arguments.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    pub clause: String,
    pub args: Vec<BoundArg>,
}

impl Predicate {
    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }

    /// ` WHERE <clause>`, or nothing when there is no predicate.
    pub fn where_clause(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clause)
        }
    }
}

/// Immutable attribute-name to value-shape map.
#[derive(Debug, Clone)]
pub struct FilterRegistry {
    attributes: HashMap<&'static str, ValueShape>,
}

impl FilterRegistry {
    pub fn new(attributes: impl IntoIterator<Item = (&'static str, ValueShape)>) -> Self {
        Self {
            attributes: attributes.into_iter().collect(),
        }
    }

    /// Filterable columns of the `patterns` table.
    pub fn registry_patterns() -> Self {
        Self::new([
            ("id", ValueShape::Number),
            ("pattern", ValueShape::Text),
            ("component", ValueShape::Text),
            ("owner", ValueShape::Number),
            ("version", ValueShape::Number),
        ])
    }

    pub fn shape_of(&self, attribute: &str) -> Option<ValueShape> {
        self.attributes.get(attribute).copied()
    }

    /// Translate filters into one AND-joined predicate, in input order.
    ///
    /// The first untranslatable filter aborts the whole translation.
    pub fn translate(&self, filters: &[Filter]) -> Result<Predicate, FilterError> {
        let mut fragments = Vec::with_capacity(filters.len());
        let mut args = Vec::with_capacity(filters.len());

        for filter in filters {
            let (column, shape) = self
                .attributes
                .get_key_value(filter.attribute.as_str())
                .ok_or_else(|| FilterError::Attribute(filter.attribute.clone()))?;
            // Column text comes from the registry key, never from the request.
            fragments.push(shape.condition(column, &filter.operator)?);
            args.push(BoundArg {
                shape: *shape,
                raw: filter.value.clone(),
            });
        }

        Ok(Predicate {
            clause: fragments.join(" AND "),
            args,
        })
    }
}

impl Default for FilterRegistry {
    fn default() -> Self {
        Self::registry_patterns()
    }
}
