use async_trait::async_trait;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Pagination, Product, ProductFilter, UpdateProduct};

/// One page of documents plus the totals needed to navigate the rest
#[derive(Debug, Clone, PartialEq)]
pub struct Paginated<T> {
    pub total_docs: u64,
    pub docs: Vec<T>,
    pub total_pages: u64,
    /// One-based page number
    pub page: u64,
}

impl<T> Paginated<T> {
    pub fn new(docs: Vec<T>, total_docs: u64, pagination: Pagination) -> Self {
        Self {
            total_docs,
            docs,
            total_pages: pagination.total_pages(total_docs),
            page: pagination.current_page() + 1,
        }
    }
}

/// Repository trait for Product persistence
///
/// Each method is a single store operation; callers never retry.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Persist a new product, assigning its id
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>>;

    /// Overwrite the given fields; `false` when no document matched
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<bool>;

    /// `false` when no document was removed
    async fn delete(&self, id: Uuid) -> ProductResult<bool>;

    /// Remove every product, returning how many were deleted
    async fn delete_all(&self) -> ProductResult<u64>;

    /// Products matching `filter` in id order, windowed by `pagination`
    async fn paginate(
        &self,
        filter: ProductFilter,
        pagination: Pagination,
    ) -> ProductResult<Paginated<Product>>;
}
