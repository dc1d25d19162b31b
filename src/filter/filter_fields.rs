use std::borrow::Cow;

/// Reads one logical field from a record. `None` means the value is absent.
pub type FieldFn<T> = Box<dyn for<'a> Fn(&'a T) -> Option<Cow<'a, str>> + Send + Sync>;

/// Maps the engine's logical fields onto a concrete record shape, so one
/// engine serves units, leases, tickets, invites and tenants alike.
pub struct FieldAccessors<T> {
    text: Vec<(String, FieldFn<T>)>,
    category: Option<FieldFn<T>>,
    status: Option<FieldFn<T>>,
    scope: Option<FieldFn<T>>,
}

impl<T> Default for FieldAccessors<T> {
    fn default() -> Self {
        Self {
            text: vec![],
            category: None,
            status: None,
            scope: None,
        }
    }
}

impl<T> FieldAccessors<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a free-text field searched by the search term
    pub fn text<F>(mut self, name: impl Into<String>, accessor: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> Option<Cow<'a, str>> + Send + Sync + 'static,
    {
        self.text.push((name.into(), Box::new(accessor)));
        self
    }

    pub fn category<F>(mut self, accessor: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> Option<Cow<'a, str>> + Send + Sync + 'static,
    {
        self.category = Some(Box::new(accessor));
        self
    }

    pub fn status<F>(mut self, accessor: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> Option<Cow<'a, str>> + Send + Sync + 'static,
    {
        self.status = Some(Box::new(accessor));
        self
    }

    /// Key tested against the criteria's scope set (a unit id, typically)
    pub fn scope<F>(mut self, accessor: F) -> Self
    where
        F: for<'a> Fn(&'a T) -> Option<Cow<'a, str>> + Send + Sync + 'static,
    {
        self.scope = Some(Box::new(accessor));
        self
    }

    pub fn has_category(&self) -> bool {
        self.category.is_some()
    }

    pub fn has_status(&self) -> bool {
        self.status.is_some()
    }

    /// Whether this record shape can be narrowed to a key set
    pub fn has_scope(&self) -> bool {
        self.scope.is_some()
    }

    pub fn text_field_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.text.iter().map(|(name, _)| name.as_str())
    }

    pub(crate) fn text_values<'a>(&'a self, record: &'a T) -> impl Iterator<Item = Cow<'a, str>> + 'a {
        self.text.iter().filter_map(move |(_, accessor)| accessor(record))
    }

    pub(crate) fn category_value<'a>(&self, record: &'a T) -> Option<Cow<'a, str>> {
        self.category.as_ref().and_then(|accessor| accessor(record))
    }

    pub(crate) fn status_value<'a>(&self, record: &'a T) -> Option<Cow<'a, str>> {
        self.status.as_ref().and_then(|accessor| accessor(record))
    }

    pub(crate) fn scope_value<'a>(&self, record: &'a T) -> Option<Cow<'a, str>> {
        self.scope.as_ref().and_then(|accessor| accessor(record))
    }
}

impl<T> std::fmt::Debug for FieldAccessors<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldAccessors")
            .field("text", &self.text_field_names().collect::<Vec<_>>())
            .field("category", &self.category.is_some())
            .field("status", &self.status.is_some())
            .field("scope", &self.scope.is_some())
            .finish()
    }
}

/// Borrow a string field as an accessor value
pub fn field(value: &str) -> Option<Cow<'_, str>> {
    Some(Cow::Borrowed(value))
}

/// Borrow an optional string field as an accessor value
pub fn optional_field(value: &Option<String>) -> Option<Cow<'_, str>> {
    value.as_deref().map(Cow::Borrowed)
}
