//! Ordered query parameters
//!
//! [`Params`] keeps parameters in insertion order so the serialized query
//! string is deterministic. Duplicate names are allowed; EspoCRM uses them
//! for array values such as `where[0][value][]`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort direction for list requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Order {
    /// Ascending
    #[default]
    Asc,
    /// Descending
    Desc,
}

impl Order {
    /// Returns the order as used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Filter types accepted in `where` clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub enum FilterType {
    Equals,
    NotEquals,
    Like,
    NotLike,
    Contains,
    StartsWith,
    EndsWith,
    GreaterThan,
    LessThan,
    GreaterThanOrEquals,
    LessThanOrEquals,
    IsNull,
    IsNotNull,
    IsTrue,
    IsFalse,
    In,
    NotIn,
    LinkedWith,
}

impl FilterType {
    /// Returns the filter name as used in query strings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Equals => "equals",
            Self::NotEquals => "notEquals",
            Self::Like => "like",
            Self::NotLike => "notLike",
            Self::Contains => "contains",
            Self::StartsWith => "startsWith",
            Self::EndsWith => "endsWith",
            Self::GreaterThan => "greaterThan",
            Self::LessThan => "lessThan",
            Self::GreaterThanOrEquals => "greaterThanOrEquals",
            Self::LessThanOrEquals => "lessThanOrEquals",
            Self::IsNull => "isNull",
            Self::IsNotNull => "isNotNull",
            Self::IsTrue => "isTrue",
            Self::IsFalse => "isFalse",
            Self::In => "in",
            Self::NotIn => "notIn",
            Self::LinkedWith => "linkedWith",
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single `where` filter of a list request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WhereClause {
    /// Filter type
    pub filter_type: FilterType,
    /// Attribute the filter applies to
    pub attribute: String,
    /// Filter values; empty for value-less filters such as `isNull`
    pub values: Vec<String>,
}

impl WhereClause {
    /// Create a filter without a value (e.g. `isNull`, `isTrue`)
    pub fn new(filter_type: FilterType, attribute: impl Into<String>) -> Self {
        Self {
            filter_type,
            attribute: attribute.into(),
            values: Vec::new(),
        }
    }

    /// Create an `equals` filter
    pub fn equals(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self::new(FilterType::Equals, attribute).with_value(value)
    }

    /// Create an `in` filter over several values
    pub fn any_of<I, V>(attribute: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        let mut clause = Self::new(FilterType::In, attribute);
        clause.values = values.into_iter().map(Into::into).collect();
        clause
    }

    /// Add a value to the filter
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.values.push(value.into());
        self
    }
}

/// Ordered mapping from parameter name to value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: Vec<(String, String)>,
    where_count: usize,
}

impl Params {
    /// Create an empty parameter list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.entries.push((name.into(), value.into()));
        self
    }

    /// Append a parameter, builder style
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Index of the first record to return
    pub fn offset(self, offset: u32) -> Self {
        self.with("offset", offset.to_string())
    }

    /// Maximum number of records to return
    pub fn max_size(self, max_size: u32) -> Self {
        self.with("maxSize", max_size.to_string())
    }

    /// Restrict the returned attributes
    pub fn select<I, S>(self, attributes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let joined = attributes
            .into_iter()
            .map(|a| a.as_ref().to_string())
            .collect::<Vec<_>>()
            .join(",");
        self.with("select", joined)
    }

    /// Sort by an attribute
    pub fn order_by(self, attribute: impl Into<String>, order: Order) -> Self {
        self.with("orderBy", attribute).with("order", order.as_str())
    }

    /// Append a `where` filter
    ///
    /// Filters are numbered in the order they are added. A single value is
    /// sent as `where[i][value]`, several as repeated `where[i][value][]`.
    pub fn filter(mut self, clause: WhereClause) -> Self {
        let i = self.where_count;
        self.where_count += 1;

        self.insert(format!("where[{i}][type]"), clause.filter_type.as_str());
        self.insert(format!("where[{i}][attribute]"), clause.attribute);

        match clause.values.as_slice() {
            [] => {}
            [value] => {
                self.insert(format!("where[{i}][value]"), value.as_str());
            }
            values => {
                for value in values {
                    self.insert(format!("where[{i}][value][]"), value.as_str());
                }
            }
        }
        self
    }

    /// Get the first value for a parameter name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no parameters are set
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize to a `key=value&key2=value2` query string
    ///
    /// Names and values are form-urlencoded; the leading `?` is not included.
    pub fn to_query_string(&self) -> Result<String, serde_urlencoded::ser::Error> {
        serde_urlencoded::to_string(&self.entries)
    }
}

impl<K, V> FromIterator<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut params = Self::new();
        params.extend(iter);
        params
    }
}

impl<K, V> Extend<(K, V)> for Params
where
    K: Into<String>,
    V: Into<String>,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_is_preserved() {
        let params = Params::new().with("b", "2").with("a", "1").with("c", "3");
        let names: Vec<&str> = params.iter().map(|(k, _)| k).collect();
        assert_eq!(names, vec!["b", "a", "c"]);
        assert_eq!(params.to_query_string().unwrap(), "b=2&a=1&c=3");
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        let params = Params::new()
            .with("select", "name,emailAddress")
            .with("q", "a&b=c d");
        assert_eq!(
            params.to_query_string().unwrap(),
            "select=name%2CemailAddress&q=a%26b%3Dc+d"
        );
    }

    #[test]
    fn test_empty_params() {
        let params = Params::new();
        assert!(params.is_empty());
        assert_eq!(params.to_query_string().unwrap(), "");
    }

    #[test]
    fn test_list_helpers() {
        let params = Params::new()
            .offset(20)
            .max_size(10)
            .select(["id", "name"])
            .order_by("createdAt", Order::Desc);

        assert_eq!(params.get("offset"), Some("20"));
        assert_eq!(params.get("maxSize"), Some("10"));
        assert_eq!(params.get("select"), Some("id,name"));
        assert_eq!(params.get("orderBy"), Some("createdAt"));
        assert_eq!(params.get("order"), Some("desc"));
    }

    #[test]
    fn test_where_clauses_are_numbered() {
        let params = Params::new()
            .filter(WhereClause::equals("type", "Customer"))
            .filter(WhereClause::new(FilterType::IsNotNull, "emailAddress"));

        assert_eq!(params.get("where[0][type]"), Some("equals"));
        assert_eq!(params.get("where[0][attribute]"), Some("type"));
        assert_eq!(params.get("where[0][value]"), Some("Customer"));
        assert_eq!(params.get("where[1][type]"), Some("isNotNull"));
        assert_eq!(params.get("where[1][value]"), None);
        assert_eq!(
            params.to_query_string().unwrap(),
            "where%5B0%5D%5Btype%5D=equals\
             &where%5B0%5D%5Battribute%5D=type\
             &where%5B0%5D%5Bvalue%5D=Customer\
             &where%5B1%5D%5Btype%5D=isNotNull\
             &where%5B1%5D%5Battribute%5D=emailAddress"
        );
    }

    #[test]
    fn test_where_clause_with_many_values() {
        let params = Params::new().filter(WhereClause::any_of("stage", ["Prospecting", "Closed Won"]));
        let values: Vec<&str> = params
            .iter()
            .filter(|(k, _)| *k == "where[0][value][]")
            .map(|(_, v)| v)
            .collect();
        assert_eq!(values, vec!["Prospecting", "Closed Won"]);
        assert_eq!(params.get("where[0][type]"), Some("in"));
    }

    #[test]
    fn test_from_iterator() {
        let params: Params = vec![("maxSize", "5"), ("offset", "0")].into_iter().collect();
        assert_eq!(params.len(), 2);
        assert_eq!(params.to_query_string().unwrap(), "maxSize=5&offset=0");
    }
}
