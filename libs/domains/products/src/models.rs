use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt::Display;
use std::str::FromStr;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Product entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Identifier assigned when the product is stored
    pub id: Uuid,
    #[schema(example = "Mechanical keyboard")]
    pub title: String,
    #[schema(example = "Tenkeyless, brown switches")]
    pub description: String,
    pub published: bool,
}

/// DTO for creating a new product
///
/// Fields are optional at the type level so that a missing `title` or
/// `description` is reported as a validation failure rather than a
/// deserialization error.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    #[validate(
        required(message = "Products can not be empty!"),
        length(min = 1, message = "Products can not be empty!")
    )]
    #[schema(example = "Mechanical keyboard")]
    pub title: Option<String>,
    #[validate(
        required(message = "Products can not be empty!"),
        length(min = 1, message = "Products can not be empty!")
    )]
    #[schema(example = "Tenkeyless, brown switches")]
    pub description: Option<String>,
    /// Defaults to `false`
    #[serde(default)]
    pub published: Option<bool>,
}

/// DTO for a partial product update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    #[validate(length(min = 1, message = "title can not be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "description can not be empty"))]
    pub description: Option<String>,
    pub published: Option<bool>,
}

/// Query parameters for `GET /products`
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Zero-based page number (default 0)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<i64>,
    /// Page size (default 3, clamped to 1..=100)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub size: Option<i64>,
    /// Case-insensitive substring match on the title
    pub title: Option<String>,
}

/// Query parameters for the published/unpublished listings
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Zero-based page number (default 0)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub page: Option<i64>,
    /// Page size (default 3, clamped to 1..=100)
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub size: Option<i64>,
}

/// Store-level filter for paginated listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Case-insensitive, literal substring of the title
    pub title: Option<String>,
    pub published: Option<bool>,
}

/// Offset/limit window derived from `page` and `size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

impl Pagination {
    pub const DEFAULT_SIZE: u64 = 3;
    pub const MAX_SIZE: u64 = 100;

    /// Coerce raw query values: negative pages become 0, sizes are clamped
    /// to `1..=MAX_SIZE`.
    pub fn from_params(page: Option<i64>, size: Option<i64>) -> Self {
        let limit = size
            .map(|s| s.clamp(1, Self::MAX_SIZE as i64) as u64)
            .unwrap_or(Self::DEFAULT_SIZE);
        let page = page.unwrap_or(0).max(0) as u64;
        let offset = page.saturating_mul(limit).min(i64::MAX as u64);

        Self { limit, offset }
    }

    /// Zero-based page the window starts on
    pub fn current_page(&self) -> u64 {
        self.offset / self.limit
    }

    /// Never less than 1, even for an empty result
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit).max(1)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::from_params(None, None)
    }
}

/// Paginated listing response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub total_items: u64,
    pub products: Vec<Product>,
    pub total_pages: u64,
    /// Zero-based page number
    pub current_page: u64,
}

/// Acknowledgement body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Product deleted successfully!")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response for bulk deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAllResponse {
    #[schema(example = "3 Products were deleted successfully!")]
    pub message: String,
    pub deleted_count: u64,
}

impl Product {
    /// Build a product with a fresh id from a validated [`CreateProduct`]
    pub fn new(input: CreateProduct) -> Self {
        Self {
            id: Uuid::now_v7(),
            title: input.title.unwrap_or_default(),
            description: input.description.unwrap_or_default(),
            published: input.published.unwrap_or(false),
        }
    }

    /// Overwrite the fields present in `update`
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(published) = update.published {
            self.published = published;
        }
    }
}

impl CreateProduct {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
            published: None,
        }
    }

    pub fn published(mut self, published: bool) -> Self {
        self.published = Some(published);
        self
    }
}

impl UpdateProduct {
    /// `true` when the body carried no recognised field
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.published.is_none()
    }
}

/// Treat `?page=` like an absent parameter.
fn empty_string_as_none<'de, D, T>(de: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: Display,
{
    let opt = Option::<String>::deserialize(de)?;
    match opt.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_defaults() {
        let p = Pagination::from_params(None, None);
        assert_eq!(p.limit, 3);
        assert_eq!(p.offset, 0);
        assert_eq!(p.current_page(), 0);
    }

    #[test]
    fn test_pagination_offset_is_page_times_size() {
        let p = Pagination::from_params(Some(2), Some(5));
        assert_eq!(p.limit, 5);
        assert_eq!(p.offset, 10);
        assert_eq!(p.current_page(), 2);
    }

    #[test]
    fn test_pagination_clamps_out_of_range_values() {
        assert_eq!(Pagination::from_params(Some(-4), None).offset, 0);
        assert_eq!(Pagination::from_params(None, Some(0)).limit, 1);
        assert_eq!(Pagination::from_params(None, Some(-7)).limit, 1);
        assert_eq!(Pagination::from_params(None, Some(5000)).limit, 100);
        assert_eq!(
            Pagination::from_params(Some(i64::MAX), Some(100)).offset,
            i64::MAX as u64
        );
    }

    #[test]
    fn test_total_pages_is_at_least_one() {
        let p = Pagination::from_params(None, Some(3));
        assert_eq!(p.total_pages(0), 1);
        assert_eq!(p.total_pages(3), 1);
        assert_eq!(p.total_pages(4), 2);
        assert_eq!(p.total_pages(9), 3);
    }

    #[test]
    fn test_new_product_defaults_to_unpublished() {
        let product = Product::new(CreateProduct::new("Lamp", "Desk lamp"));
        assert_eq!(product.title, "Lamp");
        assert_eq!(product.description, "Desk lamp");
        assert!(!product.published);
    }

    #[test]
    fn test_create_product_validation() {
        assert!(CreateProduct::new("Lamp", "Desk lamp").validate().is_ok());
        assert!(CreateProduct::new("", "Desk lamp").validate().is_err());

        let missing = CreateProduct {
            title: Some("Lamp".into()),
            ..Default::default()
        };
        let errors = missing.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("description"));
    }

    #[test]
    fn test_apply_update_only_touches_present_fields() {
        let mut product = Product::new(CreateProduct::new("Lamp", "Desk lamp").published(true));
        product.apply_update(UpdateProduct {
            title: Some("Floor lamp".into()),
            ..Default::default()
        });

        assert_eq!(product.title, "Floor lamp");
        assert_eq!(product.description, "Desk lamp");
        assert!(product.published);
    }

    #[test]
    fn test_update_product_is_empty() {
        assert!(UpdateProduct::default().is_empty());
        let update: UpdateProduct = serde_json::from_str(r#"{"unknown": 1}"#).unwrap();
        assert!(update.is_empty());
        let update: UpdateProduct = serde_json::from_str(r#"{"published": false}"#).unwrap();
        assert!(!update.is_empty());
    }

    #[test]
    fn test_page_serializes_camel_case() {
        let page = ProductPage {
            total_items: 0,
            products: vec![],
            total_pages: 1,
            current_page: 0,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["totalItems"], 0);
        assert_eq!(json["totalPages"], 1);
        assert_eq!(json["currentPage"], 0);
    }
}
