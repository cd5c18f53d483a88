use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Not Product Found with id={0}")]
    NotFound(Uuid),

    /// A write addressed an id that matched no document
    #[error("Cannot {action} Product with id={id}. Product was not found!")]
    MissingTarget { action: &'static str, id: Uuid },

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{0}")]
    BadRequest(String),

    /// Raw failure reported by the store
    #[error("{0}")]
    Database(String),

    /// Store failure replaced by an operation-specific message
    #[error("{0}")]
    Internal(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::NotFound(_) | ProductError::MissingTarget { .. } => {
                AppError::NotFound(err.to_string())
            }
            ProductError::Validation(errors) => AppError::ValidationError(errors),
            ProductError::BadRequest(msg) => AppError::BadRequest(msg),
            ProductError::Database(msg) => AppError::Database(msg),
            ProductError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for ProductError {
    fn from(err: mongodb::error::Error) -> Self {
        ProductError::Database(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_not_found_messages_name_the_id() {
        let id = Uuid::now_v7();
        assert_eq!(
            ProductError::NotFound(id).to_string(),
            format!("Not Product Found with id={}", id)
        );
        assert_eq!(
            ProductError::MissingTarget { action: "delete", id }.to_string(),
            format!("Cannot delete Product with id={}. Product was not found!", id)
        );
    }

    #[test]
    fn test_status_codes() {
        let id = Uuid::now_v7();
        assert_eq!(
            AppError::from(ProductError::NotFound(id)).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::from(ProductError::BadRequest("Data to update can not be empty!".into()))
                .status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::from(ProductError::Database("connection reset".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::from(ProductError::Internal(format!(
                "Error retrieving Product with id={}",
                id
            )))
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
