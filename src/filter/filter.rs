use std::collections::BTreeSet;

use super::filter_fields::FieldAccessors;
use super::records::Filterable;
use super::types::FilterCriteria;

/// Narrow `records` to those satisfying every active criterion, preserving
/// input order. Pure; empty criteria return the input unchanged.
pub fn filter<T: Clone>(records: &[T], criteria: &FilterCriteria, accessors: &FieldAccessors<T>) -> Vec<T> {
    filter_refs(records, criteria, accessors).into_iter().cloned().collect()
}

/// Borrowing form of [`filter`]
pub fn filter_refs<'r, T>(records: &'r [T], criteria: &FilterCriteria, accessors: &FieldAccessors<T>) -> Vec<&'r T> {
    let active = ActiveCriteria::from(criteria);
    let out: Vec<&T> = records.iter().filter(|r| active.matches(*r, accessors)).collect();

    if crate::config::CONFIG.filter.debug_logging {
        tracing::debug!(
            "Filter kept {} of {} records (search={:?}, category={:?}, status={:?}, scoped={})",
            out.len(),
            records.len(),
            active.search,
            active.category,
            active.status,
            active.scope.is_some()
        );
    }

    out
}

/// Whether a single record satisfies every active criterion
pub fn matches<T>(record: &T, criteria: &FilterCriteria, accessors: &FieldAccessors<T>) -> bool {
    ActiveCriteria::from(criteria).matches(record, accessors)
}

/// Criteria with the search term normalized once per evaluation
struct ActiveCriteria<'c> {
    search: Option<String>,
    category: Option<&'c str>,
    status: Option<&'c str>,
    scope: Option<&'c BTreeSet<String>>,
}

impl<'c> From<&'c FilterCriteria> for ActiveCriteria<'c> {
    fn from(criteria: &'c FilterCriteria) -> Self {
        Self {
            search: criteria.active_search(),
            category: criteria.active_category(),
            status: criteria.active_status(),
            scope: criteria.active_scope(),
        }
    }
}

impl ActiveCriteria<'_> {
    fn matches<T>(&self, record: &T, accessors: &FieldAccessors<T>) -> bool {
        self.matches_search(record, accessors)
            && Self::matches_exact(self.category, accessors.category_value(record).as_deref())
            && Self::matches_exact(self.status, accessors.status_value(record).as_deref())
            && self.matches_scope(record, accessors)
    }

    fn matches_search<T>(&self, record: &T, accessors: &FieldAccessors<T>) -> bool {
        let Some(term) = self.search.as_deref() else { return true };
        accessors
            .text_values(record)
            .any(|value| value.to_lowercase().contains(term))
    }

    fn matches_exact(wanted: Option<&str>, actual: Option<&str>) -> bool {
        match wanted {
            None => true,
            Some(wanted) => actual == Some(wanted),
        }
    }

    fn matches_scope<T>(&self, record: &T, accessors: &FieldAccessors<T>) -> bool {
        let Some(scope) = self.scope else { return true };
        accessors
            .scope_value(record)
            .is_some_and(|key| scope.contains(key.as_ref()))
    }
}

/// Reusable filter binding a record shape's accessors to mutable criteria
pub struct Filter<T> {
    accessors: FieldAccessors<T>,
    criteria: FilterCriteria,
}

impl<T: Filterable> Filter<T> {
    /// Filter using the record type's standard field mapping
    pub fn for_records() -> Self {
        Self::new(T::accessors())
    }
}

impl<T> Filter<T> {
    pub fn new(accessors: FieldAccessors<T>) -> Self {
        Self {
            accessors,
            criteria: FilterCriteria::default(),
        }
    }

    pub fn assign(&mut self, criteria: FilterCriteria) -> &mut Self {
        self.criteria = criteria;
        self
    }

    pub fn search_term(&mut self, term: impl Into<String>) -> &mut Self {
        self.criteria.search_term = Some(term.into());
        self
    }

    pub fn category(&mut self, category: impl Into<String>) -> &mut Self {
        self.criteria.category_filter = Some(category.into());
        self
    }

    pub fn status(&mut self, status: impl Into<String>) -> &mut Self {
        self.criteria.status_filter = Some(status.into());
        self
    }

    pub fn scope<I, S>(&mut self, keys: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.criteria.scope = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn clear_scope(&mut self) -> &mut Self {
        self.criteria.scope = None;
        self
    }

    pub fn clear(&mut self) -> &mut Self {
        self.criteria = FilterCriteria::default();
        self
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn accessors(&self) -> &FieldAccessors<T> {
        &self.accessors
    }

    pub fn matches(&self, record: &T) -> bool {
        matches(record, &self.criteria, &self.accessors)
    }

    pub fn apply_refs<'r>(&self, records: &'r [T]) -> Vec<&'r T> {
        filter_refs(records, &self.criteria, &self.accessors)
    }

    pub fn apply(&self, records: &[T]) -> Vec<T>
    where
        T: Clone,
    {
        filter(records, &self.criteria, &self.accessors)
    }
}
