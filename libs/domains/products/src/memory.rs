//! In-memory implementation of ProductRepository
//!
//! Keeps products ordered by id, which matches the `_id` ordering the MongoDB
//! repository paginates with. Useful for tests and local runs without a
//! database.

use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::instrument;
use uuid::Uuid;

use crate::error::ProductResult;
use crate::models::{CreateProduct, Pagination, Product, ProductFilter, UpdateProduct};
use crate::repository::{Paginated, ProductRepository};

#[derive(Default)]
pub struct InMemoryProductRepository {
    products: RwLock<BTreeMap<Uuid, Product>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn matches(product: &Product, filter: &ProductFilter) -> bool {
        let title_matches = match filter.title.as_deref() {
            None | Some("") => true,
            Some(title) => product
                .title
                .to_lowercase()
                .contains(&title.to_lowercase()),
        };
        let published_matches = filter
            .published
            .is_none_or(|published| product.published == published);

        title_matches && published_matches
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    #[instrument(skip(self, input))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);
        self.products
            .write()
            .await
            .insert(product.id, product.clone());
        Ok(product)
    }

    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<bool> {
        let mut products = self.products.write().await;
        match products.get_mut(&id) {
            Some(product) => {
                product.apply_update(input);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        Ok(self.products.write().await.remove(&id).is_some())
    }

    async fn delete_all(&self) -> ProductResult<u64> {
        let mut products = self.products.write().await;
        let deleted = products.len() as u64;
        products.clear();
        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn paginate(
        &self,
        filter: ProductFilter,
        pagination: Pagination,
    ) -> ProductResult<Paginated<Product>> {
        let products = self.products.read().await;
        let matching: Vec<&Product> = products
            .values()
            .filter(|p| Self::matches(p, &filter))
            .collect();

        let total_docs = matching.len() as u64;
        let docs = matching
            .into_iter()
            .skip(usize::try_from(pagination.offset).unwrap_or(usize::MAX))
            .take(pagination.limit as usize)
            .cloned()
            .collect();

        Ok(Paginated::new(docs, total_docs, pagination))
    }
}
