use crate::ProductRow;

/// Filter and pagination for product listings.
///
/// Results are ordered newest first (`created_at DESC`), ties broken by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductQuery {
    /// Exact category match.
    pub category: Option<String>,

    /// Exact status match.
    pub status: Option<String>,

    /// Rows with this status are left out.
    pub exclude_status: Option<String>,

    /// Maximum number of rows to return.
    pub limit: Option<usize>,

    /// Number of rows to skip.
    pub offset: usize,
}

impl ProductQuery {
    /// Creates a new empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Filters by category.
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filters by status.
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Excludes a status.
    pub fn exclude_status(mut self, status: impl Into<String>) -> Self {
        self.exclude_status = Some(status.into());
        self
    }

    /// Limits the number of results.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Skips a number of results.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Returns true if `row` passes the filters. Pagination is not considered.
    pub fn matches(&self, row: &ProductRow) -> bool {
        if let Some(ref category) = self.category
            && &row.category != category
        {
            return false;
        }
        if let Some(ref status) = self.status
            && &row.status != status
        {
            return false;
        }
        if let Some(ref excluded) = self.exclude_status
            && &row.status == excluded
        {
            return false;
        }
        true
    }
}

/// One page of products plus the total number of matching rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPage {
    pub rows: Vec<ProductRow>,
    pub total_count: u64,
}
