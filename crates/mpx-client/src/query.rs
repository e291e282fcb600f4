//! List queries against mpx data services
//!
//! A query carries optional field filters, a sort specification and a result
//! range. Sorting is always performed by the service.

use serde::{Deserialize, Serialize};

/// Sort direction for a single field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Ascending order (service default)
    Ascending,
    /// Descending order
    Descending,
}

/// Ordered list of sort fields
///
/// # Examples
/// ```
/// use mpx_client::query::{Sort, SortDirection};
///
/// let sort = Sort::new()
///     .add_sort("title")
///     .add_sort_with("added", SortDirection::Descending);
/// assert_eq!(sort.to_query_value(), "title,added|desc");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sort {
    fields: Vec<(String, SortDirection)>,
}

impl Sort {
    /// Create an empty sort
    pub fn new() -> Self {
        Self::default()
    }

    /// Sort ascending by a field
    pub fn add_sort(self, field: impl Into<String>) -> Self {
        self.add_sort_with(field, SortDirection::Ascending)
    }

    /// Sort by a field in the given direction
    pub fn add_sort_with(mut self, field: impl Into<String>, direction: SortDirection) -> Self {
        self.fields.push((field.into(), direction));
        self
    }

    /// Check if no sort fields were added
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Render the `sort` query parameter value
    pub fn to_query_value(&self) -> String {
        self.fields
            .iter()
            .map(|(field, direction)| match direction {
                SortDirection::Ascending => field.clone(),
                SortDirection::Descending => format!("{}|desc", field),
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// One-based inclusive result range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    /// First entry index
    pub start: u32,
    /// Last entry index
    pub end: u32,
}

impl Range {
    /// Create a new range
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Render the `range` query parameter value
    pub fn to_query_value(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }
}

/// Query for a list of objects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObjectListQuery {
    /// Field filters, e.g. `("byTitle", "Main")`
    pub filters: Vec<(String, String)>,
    /// Sort specification
    pub sort: Option<Sort>,
    /// Result range
    pub range: Option<Range>,
}

impl ObjectListQuery {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sort specification
    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Set the result range
    pub fn with_range(mut self, range: Range) -> Self {
        self.range = Some(range);
        self
    }

    /// Add a field filter
    pub fn with_filter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((key.into(), value.into()));
        self
    }

    /// Query parameters contributed by this query
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = self.filters.clone();

        if let Some(sort) = self.sort.as_ref().filter(|sort| !sort.is_empty()) {
            params.push(("sort".to_string(), sort.to_query_value()));
        }
        if let Some(range) = &self.range {
            params.push(("range".to_string(), range.to_query_value()));
        }

        params
    }
}

/// Page of objects returned by a list query
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectList<T> {
    /// Number of entries in this page
    #[serde(default)]
    pub entry_count: u32,
    /// One-based index of the first entry
    #[serde(default)]
    pub start_index: u32,
    /// Page size
    #[serde(default)]
    pub items_per_page: u32,
    /// Entries in service order
    #[serde(default = "Vec::new")]
    pub entries: Vec<T>,
}
