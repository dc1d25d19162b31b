use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Independently settable filter criteria. Every field is optional and an
/// absent or empty value places no constraint on the result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_term: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_filter: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_filter: Option<String>,
    /// Allowed values of the record's scope key. `Some` of an empty set
    /// admits nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<BTreeSet<String>>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.search_term = Some(term.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category_filter = Some(category.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status_filter = Some(status.into());
        self
    }

    pub fn with_scope<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.scope = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Trimmed, lower-cased search term, if one is active
    pub fn active_search(&self) -> Option<String> {
        self.search_term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_lowercase)
    }

    pub fn active_category(&self) -> Option<&str> {
        non_empty(self.category_filter.as_deref())
    }

    pub fn active_status(&self) -> Option<&str> {
        non_empty(self.status_filter.as_deref())
    }

    pub fn active_scope(&self) -> Option<&BTreeSet<String>> {
        self.scope.as_ref()
    }

    /// True when no criterion constrains the result
    pub fn is_empty(&self) -> bool {
        self.active_search().is_none()
            && self.active_category().is_none()
            && self.active_status().is_none()
            && self.scope.is_none()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_criteria_are_inactive() {
        let criteria = FilterCriteria::new()
            .with_search("   ")
            .with_category("")
            .with_status("");
        assert!(criteria.is_empty());
        assert_eq!(criteria.active_search(), None);
    }

    #[test]
    fn test_search_is_trimmed_and_lowered() {
        let criteria = FilterCriteria::new().with_search("  Greenfield ");
        assert_eq!(criteria.active_search().as_deref(), Some("greenfield"));
    }

    #[test]
    fn test_empty_scope_is_still_active() {
        let criteria = FilterCriteria::new().with_scope(Vec::<String>::new());
        assert!(!criteria.is_empty());
    }

    #[test]
    fn test_criteria_deserialize_from_camel_case() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"searchTerm":"blue","statusFilter":"Vacant"}"#).unwrap();
        assert_eq!(criteria.search_term.as_deref(), Some("blue"));
        assert_eq!(criteria.active_status(), Some("Vacant"));
        assert_eq!(criteria.active_category(), None);
    }
}
