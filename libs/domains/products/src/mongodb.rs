//! MongoDB implementation of ProductRepository

use async_trait::async_trait;
use mongodb::{
    bson::{doc, Document},
    options::IndexOptions,
    Collection, Database, IndexModel,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use uuid::Uuid;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Pagination, Product, ProductFilter, UpdateProduct};
use crate::repository::{Paginated, ProductRepository};

/// Stored shape of a product; the id lives in `_id` as its hyphenated string.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ProductDocument {
    #[serde(rename = "_id")]
    id: String,
    title: String,
    description: String,
    #[serde(default)]
    published: bool,
}

impl From<&Product> for ProductDocument {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            title: product.title.clone(),
            description: product.description.clone(),
            published: product.published,
        }
    }
}

impl TryFrom<ProductDocument> for Product {
    type Error = ProductError;

    fn try_from(document: ProductDocument) -> Result<Self, Self::Error> {
        let id = Uuid::parse_str(&document.id).map_err(|e| {
            ProductError::Database(format!("Stored product id '{}' is invalid: {}", document.id, e))
        })?;

        Ok(Product {
            id,
            title: document.title,
            description: document.description,
            published: document.published,
        })
    }
}

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<ProductDocument>,
}

impl MongoProductRepository {
    pub fn new(db: &Database) -> Self {
        Self::with_collection(db, "products")
    }

    pub fn with_collection(db: &Database, collection_name: &str) -> Self {
        let collection = db.collection::<ProductDocument>(collection_name);
        Self { collection }
    }

    /// Create the index backing title lookups
    pub async fn init_indexes(&self) -> ProductResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "title": 1 })
            .options(IndexOptions::builder().name("idx_title".to_string()).build())
            .build();

        self.collection.create_index(index).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    fn id_filter(id: Uuid) -> Document {
        doc! { "_id": id.to_string() }
    }

    /// Build a MongoDB filter document from ProductFilter
    fn build_filter(filter: &ProductFilter) -> Document {
        let mut doc = doc! {};

        if let Some(title) = filter.title.as_deref().filter(|t| !t.is_empty()) {
            doc.insert(
                "title",
                doc! { "$regex": regex::escape(title), "$options": "i" },
            );
        }

        if let Some(published) = filter.published {
            doc.insert("published", published);
        }

        doc
    }

    fn build_update(input: &UpdateProduct) -> Document {
        let mut set = doc! {};

        if let Some(ref title) = input.title {
            set.insert("title", title);
        }
        if let Some(ref description) = input.description {
            set.insert("description", description);
        }
        if let Some(published) = input.published {
            set.insert("published", published);
        }

        doc! { "$set": set }
    }
}

#[async_trait]
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, input))]
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let product = Product::new(input);

        self.collection
            .insert_one(ProductDocument::from(&product))
            .await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: Uuid) -> ProductResult<Option<Product>> {
        self.collection
            .find_one(Self::id_filter(id))
            .await?
            .map(Product::try_from)
            .transpose()
    }

    #[instrument(skip(self, input))]
    async fn update(&self, id: Uuid, input: UpdateProduct) -> ProductResult<bool> {
        let result = self
            .collection
            .update_one(Self::id_filter(id), Self::build_update(&input))
            .await?;

        if result.matched_count == 0 {
            return Ok(false);
        }

        tracing::info!(product_id = %id, "Product updated successfully");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Uuid) -> ProductResult<bool> {
        let result = self.collection.delete_one(Self::id_filter(id)).await?;

        if result.deleted_count == 0 {
            return Ok(false);
        }

        tracing::info!(product_id = %id, "Product deleted successfully");
        Ok(true)
    }

    #[instrument(skip(self))]
    async fn delete_all(&self) -> ProductResult<u64> {
        let result = self.collection.delete_many(doc! {}).await?;

        tracing::info!(deleted = result.deleted_count, "Products deleted");
        Ok(result.deleted_count)
    }

    #[instrument(skip(self))]
    async fn paginate(
        &self,
        filter: ProductFilter,
        pagination: Pagination,
    ) -> ProductResult<Paginated<Product>> {
        use futures_util::TryStreamExt;

        let mongo_filter = Self::build_filter(&filter);

        let total_docs = self.collection.count_documents(mongo_filter.clone()).await?;

        let options = mongodb::options::FindOptions::builder()
            .limit(pagination.limit as i64)
            .skip(pagination.offset)
            .sort(doc! { "_id": 1 })
            .build();

        let cursor = self
            .collection
            .find(mongo_filter)
            .with_options(options)
            .await?;
        let documents: Vec<ProductDocument> = cursor.try_collect().await?;

        let docs = documents
            .into_iter()
            .map(Product::try_from)
            .collect::<ProductResult<Vec<_>>>()?;

        Ok(Paginated::new(docs, total_docs, pagination))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter_empty() {
        let doc = MongoProductRepository::build_filter(&ProductFilter::default());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_build_filter_ignores_empty_title() {
        let filter = ProductFilter {
            title: Some(String::new()),
            ..Default::default()
        };
        assert!(MongoProductRepository::build_filter(&filter).is_empty());
    }

    #[test]
    fn test_build_filter_title_is_escaped_and_case_insensitive() {
        let filter = ProductFilter {
            title: Some("c++ (v2)".to_string()),
            ..Default::default()
        };
        let doc = MongoProductRepository::build_filter(&filter);
        let title = doc.get_document("title").unwrap();

        assert_eq!(title.get_str("$regex").unwrap(), r"c\+\+ \(v2\)");
        assert_eq!(title.get_str("$options").unwrap(), "i");
    }

    #[test]
    fn test_build_filter_with_published() {
        let filter = ProductFilter {
            published: Some(true),
            ..Default::default()
        };
        let doc = MongoProductRepository::build_filter(&filter);
        assert!(doc.get_bool("published").unwrap());
    }

    #[test]
    fn test_build_update_only_sets_present_fields() {
        let update = UpdateProduct {
            title: Some("new".to_string()),
            ..Default::default()
        };
        let doc = MongoProductRepository::build_update(&update);
        let set = doc.get_document("$set").unwrap();

        assert_eq!(set.get_str("title").unwrap(), "new");
        assert!(!set.contains_key("description"));
        assert!(!set.contains_key("published"));
    }

    #[test]
    fn test_document_round_trip_keeps_id() {
        let product = Product::new(CreateProduct::new("Lamp", "Desk lamp"));
        let document = ProductDocument::from(&product);
        assert_eq!(document.id, product.id.to_string());
        assert_eq!(Product::try_from(document).unwrap(), product);
    }

    #[test]
    fn test_document_with_foreign_id_is_rejected() {
        let document = ProductDocument {
            id: "5f1d7f0e8b3c2a0017a1b2c3".to_string(),
            title: "Lamp".to_string(),
            description: "Desk lamp".to_string(),
            published: false,
        };
        assert!(matches!(
            Product::try_from(document),
            Err(ProductError::Database(_))
        ));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_paginate_against_live_server() {
        let url = std::env::var("MONGODB_URL")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let client = mongodb::Client::with_uri_str(&url).await.unwrap();
        let repo = MongoProductRepository::with_collection(
            &client.database("products_test"),
            "products_paginate",
        );
        repo.delete_all().await.unwrap();

        for i in 0..5 {
            repo.create(CreateProduct::new(format!("Item {}", i), "d"))
                .await
                .unwrap();
        }

        let page = repo
            .paginate(ProductFilter::default(), Pagination::from_params(Some(1), Some(2)))
            .await
            .unwrap();
        assert_eq!(page.total_docs, 5);
        assert_eq!(page.docs.len(), 2);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 2);
        assert_eq!(page.docs[0].title, "Item 2");

        assert_eq!(repo.delete_all().await.unwrap(), 5);
    }
}
