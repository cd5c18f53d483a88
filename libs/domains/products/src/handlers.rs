//! HTTP handlers for Products API

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use axum_helpers::{
    errors::responses::{
        BadRequestUuidResponse, BadRequestValidationResponse, InternalServerErrorResponse,
        NotFoundResponse,
    },
    UuidPath, ValidatedJson,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, DeleteAllResponse, ListQuery, MessageResponse, PageParams, Product,
    ProductPage, UpdateProduct,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for Products API
#[derive(OpenApi)]
#[openapi(
    paths(
        list_products,
        create_product,
        delete_all_products,
        list_published,
        list_unpublished,
        get_product,
        update_product,
        delete_product,
    ),
    components(
        schemas(
            Product, CreateProduct, UpdateProduct, ProductPage,
            MessageResponse, DeleteAllResponse
        ),
        responses(
            NotFoundResponse,
            BadRequestValidationResponse,
            BadRequestUuidResponse,
            InternalServerErrorResponse
        )
    ),
    tags(
        (name = "Products", description = "Product management endpoints")
    )
)]
pub struct ApiDoc;

/// Create the products router with all HTTP endpoints
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route(
            "/",
            get(list_products)
                .post(create_product)
                .delete(delete_all_products),
        )
        .route("/published", get(list_published))
        .route("/unpublished", get(list_unpublished))
        .route(
            "/{id}",
            get(get_product).put(update_product).delete(delete_product),
        )
        .with_state(shared_service)
}

/// Query strings that fail to parse are answered in the standard error envelope.
fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> ProductResult<T> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| ProductError::BadRequest(rejection.body_text()))
}

/// List products, optionally filtered by title
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of products", body = ProductPage),
        (status = 400, description = "Malformed page or size"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ProductResult<Json<ProductPage>> {
    let page = service.list_products(query_params(query)?).await?;
    Ok(Json(page))
}

/// Create a new product
#[utoipa::path(
    post,
    path = "",
    tag = "Products",
    request_body = CreateProduct,
    responses(
        (status = 201, description = "Product created successfully", body = Product),
        (status = 400, response = BadRequestValidationResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn create_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    ValidatedJson(input): ValidatedJson<CreateProduct>,
) -> ProductResult<impl IntoResponse> {
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Delete every product
#[utoipa::path(
    delete,
    path = "",
    tag = "Products",
    responses(
        (status = 200, description = "Products deleted", body = DeleteAllResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_all_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
) -> ProductResult<Json<DeleteAllResponse>> {
    let response = service.delete_all().await?;
    Ok(Json(response))
}

/// List published products
#[utoipa::path(
    get,
    path = "/published",
    tag = "Products",
    params(PageParams),
    responses(
        (status = 200, description = "One page of published products", body = ProductPage),
        (status = 400, description = "Malformed page or size"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_published<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> ProductResult<Json<ProductPage>> {
    let page = service.list_published(query_params(query)?).await?;
    Ok(Json(page))
}

/// List unpublished products
#[utoipa::path(
    get,
    path = "/unpublished",
    tag = "Products",
    params(PageParams),
    responses(
        (status = 200, description = "One page of unpublished products", body = ProductPage),
        (status = 400, description = "Malformed page or size"),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn list_unpublished<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    query: Result<Query<PageParams>, QueryRejection>,
) -> ProductResult<Json<ProductPage>> {
    let page = service.list_unpublished(query_params(query)?).await?;
    Ok(Json(page))
}

/// Get a product by ID
#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product found", body = Product),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn get_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<Product>> {
    let product = service.get_product(id).await?;
    Ok(Json(product))
}

/// Update a product
#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    request_body = UpdateProduct,
    responses(
        (status = 200, description = "Product updated successfully", body = MessageResponse),
        (status = 400, response = BadRequestValidationResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn update_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
    ValidatedJson(input): ValidatedJson<UpdateProduct>,
) -> ProductResult<Json<MessageResponse>> {
    let response = service.update_product(id, input).await?;
    Ok(Json(response))
}

/// Delete a product
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Products",
    params(
        ("id" = Uuid, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product deleted successfully", body = MessageResponse),
        (status = 400, response = BadRequestUuidResponse),
        (status = 404, response = NotFoundResponse),
        (status = 500, response = InternalServerErrorResponse)
    )
)]
async fn delete_product<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    UuidPath(id): UuidPath,
) -> ProductResult<Json<MessageResponse>> {
    let response = service.delete_product(id).await?;
    Ok(Json(response))
}
