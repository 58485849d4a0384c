//! Inbound parameter groups and typed extraction.
//!
//! An [`InboundRequest`] is already parsed: two groups of multi-valued
//! fields, `query` and `body`. Extraction reads the first value of a field and
//! optionally coerces it, without ever touching the group itself.

use std::collections::BTreeMap;
use std::num::ParseIntError;
use std::str::FromStr;

use crate::svc::error::ApiError;

/// One group of multi-valued fields keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamGroup {
    fields: BTreeMap<String, Vec<String>>,
}

impl ParamGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value to `name`, keeping earlier values in order.
    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.entry(name.into()).or_default().push(value.into());
    }

    /// First value of `name`, if the field was supplied with any value.
    pub fn first(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// All values of `name` in arrival order.
    pub fn values(&self, name: &str) -> &[String] {
        self.fields.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.first(name).is_some()
    }

    /// Iterate `(name, first value)` for every field that has a value.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .filter_map(|(name, values)| values.first().map(|v| (name.as_str(), v.as_str())))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// First value of `name`, or [`ApiError::MissingField`].
    pub fn extract(&self, name: &str) -> Result<&str, ApiError> {
        self.first(name).ok_or_else(|| ApiError::MissingField {
            field: name.to_string(),
        })
    }

    /// First value of `name` parsed as a base-10 integer of width `T`.
    ///
    /// Absence and malformed input are reported separately.
    pub fn extract_int<T>(&self, name: &str) -> Result<T, ApiError>
    where
        T: FromStr<Err = ParseIntError>,
    {
        let raw = self.extract(name)?;
        raw.parse::<T>().map_err(|e| ApiError::InvalidFormat {
            field: name.to_string(),
            value: raw.to_string(),
            reason: e.to_string(),
        })
    }
}

impl<K, V> FromIterator<(K, V)> for ParamGroup
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut group = ParamGroup::new();
        for (name, value) in iter {
            group.push(name, value);
        }
        group
    }
}

/// A pre-parsed inbound call: URL query fields and form body fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundRequest {
    pub query: ParamGroup,
    pub body: ParamGroup,
}

impl InboundRequest {
    pub fn new(query: ParamGroup, body: ParamGroup) -> Self {
        Self { query, body }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_first_value() {
        let group: ParamGroup = [("svc_id", "12"), ("svc_id", "99")].into_iter().collect();
        assert_eq!(group.extract("svc_id").unwrap(), "12");
        assert_eq!(group.values("svc_id"), ["12", "99"]);
        // Repeated extraction sees the same value.
        assert_eq!(group.extract("svc_id").unwrap(), "12");
    }

    #[test]
    fn test_missing_field() {
        let group = ParamGroup::new();
        let err = group.extract("svc_id").unwrap_err();
        assert!(matches!(err, ApiError::MissingField { ref field } if field == "svc_id"));
    }

    #[test]
    fn test_invalid_format_is_distinct() {
        let group: ParamGroup = [("svc_id", "abc")].into_iter().collect();
        let err = group.extract_int::<i64>("svc_id").unwrap_err();
        assert!(matches!(err, ApiError::InvalidFormat { ref value, .. } if value == "abc"));

        let err = ParamGroup::new().extract_int::<i64>("svc_id").unwrap_err();
        assert!(matches!(err, ApiError::MissingField { .. }));
    }

    #[test]
    fn test_int_width() {
        let group: ParamGroup = [("port", "4294967296"), ("id", "4294967296")]
            .into_iter()
            .collect();
        assert!(group.extract_int::<i32>("port").is_err());
        assert_eq!(group.extract_int::<i64>("id").unwrap(), 4_294_967_296);
    }

    #[test]
    fn test_empty_value_list_counts_as_absent() {
        let mut group = ParamGroup::new();
        group.fields.insert("svc_type".into(), Vec::new());
        assert!(!group.contains("svc_type"));
        assert_eq!(group.iter().count(), 0);
    }
}
