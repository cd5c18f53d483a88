//! Product Service - Business logic layer

use std::sync::Arc;
use tracing::instrument;
use uuid::Uuid;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, DeleteAllResponse, ListQuery, MessageResponse, PageParams, Pagination,
    Product, ProductFilter, ProductPage, UpdateProduct,
};
use crate::repository::{Paginated, ProductRepository};

const CREATE_OR_LIST_FALLBACK: &str = "Something went wrong.";
const DELETE_ALL_FALLBACK: &str = "Something went wrong";

/// Product service providing business logic operations
///
/// Every operation validates its input, issues at most one repository call
/// and turns the outcome into either a response body or a [`ProductError`].
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input.validate()?;

        self.repository
            .create(input)
            .await
            .map_err(|e| keep_store_message(e, CREATE_OR_LIST_FALLBACK))
    }

    /// List products, optionally filtered by a title substring
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ListQuery) -> ProductResult<ProductPage> {
        let filter = ProductFilter {
            title: query.title.filter(|t| !t.is_empty()),
            published: None,
        };
        self.list(filter, Pagination::from_params(query.page, query.size))
            .await
    }

    /// List products with `published == true`
    #[instrument(skip(self))]
    pub async fn list_published(&self, params: PageParams) -> ProductResult<ProductPage> {
        self.list_by_published(true, params).await
    }

    /// List products with `published == false`
    #[instrument(skip(self))]
    pub async fn list_unpublished(&self, params: PageParams) -> ProductResult<ProductPage> {
        self.list_by_published(false, params).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: Uuid) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await
            .map_err(|e| {
                replace_store_message(e, format!("Error retrieving Product with id={}", id))
            })?
            .ok_or(ProductError::NotFound(id))
    }

    /// Overwrite the fields present in `input`
    #[instrument(skip(self, input))]
    pub async fn update_product(
        &self,
        id: Uuid,
        input: UpdateProduct,
    ) -> ProductResult<MessageResponse> {
        if input.is_empty() {
            return Err(ProductError::BadRequest(
                "Data to update can not be empty!".to_string(),
            ));
        }
        input.validate()?;

        let updated = self
            .repository
            .update(id, input)
            .await
            .map_err(|e| {
                replace_store_message(e, format!("Error updating Product with id={}", id))
            })?;

        if !updated {
            return Err(ProductError::MissingTarget {
                action: "update",
                id,
            });
        }

        Ok(MessageResponse::new("Product was updated successfully."))
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: Uuid) -> ProductResult<MessageResponse> {
        let deleted = self
            .repository
            .delete(id)
            .await
            .map_err(|e| {
                replace_store_message(e, format!("Error deleting Product with id={}", id))
            })?;

        if !deleted {
            return Err(ProductError::MissingTarget {
                action: "delete",
                id,
            });
        }

        Ok(MessageResponse::new("Product deleted successfully!"))
    }

    /// Delete every product
    #[instrument(skip(self))]
    pub async fn delete_all(&self) -> ProductResult<DeleteAllResponse> {
        let deleted_count = self
            .repository
            .delete_all()
            .await
            .map_err(|e| keep_store_message(e, DELETE_ALL_FALLBACK))?;

        Ok(DeleteAllResponse {
            message: format!("{} Products were deleted successfully!", deleted_count),
            deleted_count,
        })
    }

    async fn list_by_published(
        &self,
        published: bool,
        params: PageParams,
    ) -> ProductResult<ProductPage> {
        let filter = ProductFilter {
            title: None,
            published: Some(published),
        };
        self.list(filter, Pagination::from_params(params.page, params.size))
            .await
    }

    async fn list(
        &self,
        filter: ProductFilter,
        pagination: Pagination,
    ) -> ProductResult<ProductPage> {
        let Paginated {
            total_docs,
            docs,
            total_pages,
            page,
        } = self
            .repository
            .paginate(filter, pagination)
            .await
            .map_err(|e| keep_store_message(e, CREATE_OR_LIST_FALLBACK))?;

        Ok(ProductPage {
            total_items: total_docs,
            products: docs,
            total_pages,
            current_page: page.saturating_sub(1),
        })
    }
}

/// Surface the store's own message, or `fallback` when it has none.
fn keep_store_message(err: ProductError, fallback: &str) -> ProductError {
    let message = err.to_string();
    tracing::error!(error = %message, "Product store operation failed");

    if message.is_empty() {
        ProductError::Database(fallback.to_string())
    } else {
        ProductError::Database(message)
    }
}

/// Log the store's message and answer with `message` instead.
fn replace_store_message(err: ProductError, message: String) -> ProductError {
    tracing::error!(error = %err, "{}", message);
    ProductError::Internal(message)
}
