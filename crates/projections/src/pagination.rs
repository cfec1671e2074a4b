//! List filters and pagination.

use domain::ProductStatus;

use crate::view::ProductView;

/// Page size used when none is requested.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Largest page size a caller can get. Larger requests are clamped.
pub const MAX_PAGE_SIZE: usize = 100;

/// Filters for listing products.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductListFilter {
    /// Exact category match. Empty means no filter.
    pub category: Option<String>,

    /// Exact status match. Archived products only appear when this is
    /// [`ProductStatus::Archived`].
    pub status: Option<ProductStatus>,

    /// Shortcut for `status = active`. Takes precedence over `status`.
    pub active_only: bool,
}

impl ProductListFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn status(mut self, status: ProductStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn active_only(mut self) -> Self {
        self.active_only = true;
        self
    }

    /// The category to filter on, ignoring empty strings.
    pub fn effective_category(&self) -> Option<&str> {
        self.category.as_deref().filter(|c| !c.is_empty())
    }

    /// The status to filter on after applying the active-only shortcut.
    pub fn effective_status(&self) -> Option<ProductStatus> {
        if self.active_only {
            Some(ProductStatus::Active)
        } else {
            self.status
        }
    }

    /// Whether archived rows should be hidden from the results.
    pub fn excludes_archived(&self) -> bool {
        self.effective_status() != Some(ProductStatus::Archived)
    }
}

/// Requested window into a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    /// Requested page size. Missing or zero means [`DEFAULT_PAGE_SIZE`].
    pub limit: Option<usize>,
    pub offset: usize,
}

impl Pagination {
    pub fn new(limit: Option<usize>, offset: usize) -> Self {
        Self { limit, offset }
    }

    /// The page size actually used.
    pub fn effective_limit(&self) -> usize {
        match self.limit {
            None | Some(0) => DEFAULT_PAGE_SIZE,
            Some(limit) => limit.min(MAX_PAGE_SIZE),
        }
    }
}

/// One page of products.
#[derive(Debug, Clone)]
pub struct ProductPage {
    pub products: Vec<ProductView>,

    /// Number of matching products, ignoring the page window.
    pub total_count: u64,

    /// True when more matching products follow this page.
    pub has_more: bool,
}

impl ProductPage {
    pub fn new(products: Vec<ProductView>, total_count: u64, offset: usize) -> Self {
        let seen = offset as u64 + products.len() as u64;
        Self {
            has_more: seen < total_count,
            products,
            total_count,
        }
    }
}
