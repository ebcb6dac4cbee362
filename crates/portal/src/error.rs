//! HTTP-facing error type.
//!
//! Every handler returns [`AppError`]; its `IntoResponse` impl maps each
//! variant to a status code and a JSON failure body. Internal failures are
//! logged with their full detail but serialized as a generic message so
//! database and hashing internals never reach a client.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{AuthError, CheckoutError, OrderActionError};

/// Top-level error for request handlers.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Checkout(#[from] CheckoutError),

    #[error(transparent)]
    OrderAction(#[from] OrderActionError),

    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    #[error("Unauthorized")]
    AdminUnauthorized,

    #[error("{0}")]
    BadRequest(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            Self::Checkout(e) => match e {
                CheckoutError::Unauthenticated => StatusCode::UNAUTHORIZED,
                CheckoutError::EmptyCart
                | CheckoutError::InvalidVisitDate
                | CheckoutError::QuantityLimitExceeded { .. }
                | CheckoutError::InvalidCartItem
                | CheckoutError::PaymentDeclined(_) => StatusCode::BAD_REQUEST,
                CheckoutError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::OrderAction(e) => match e {
                OrderActionError::NotCancellable | OrderActionError::NotReschedulable => {
                    StatusCode::NOT_FOUND
                }
                OrderActionError::InvalidVisitDate => StatusCode::BAD_REQUEST,
                OrderActionError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
            },
            Self::Auth(e) => match e {
                AuthError::MissingFields | AuthError::InvalidEmail(_) | AuthError::WeakPassword => {
                    StatusCode::BAD_REQUEST
                }
                AuthError::EmailTaken => StatusCode::CONFLICT,
                AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
                AuthError::PasswordHash | AuthError::Repository(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::AdminUnauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
        }
    }

    /// The message serialized to the client. Server-side failures collapse
    /// to a generic message; everything else uses the error's `Display`.
    fn client_message(&self) -> String {
        if self.status() == StatusCode::INTERNAL_SERVER_ERROR {
            "Internal server error.".to_owned()
        } else {
            self.to_string()
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let body = Json(json!({
            "success": false,
            "message": self.client_message(),
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unauthenticated_maps_to_401() {
        let err = AppError::Checkout(CheckoutError::Unauthenticated);
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.client_message(), "You must be logged in to checkout.");
    }

    #[test]
    fn test_quantity_limit_maps_to_400() {
        let err = AppError::Checkout(CheckoutError::QuantityLimitExceeded { limit: 10 });
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "Max 10 tickets per order.");
    }

    #[test]
    fn test_not_cancellable_maps_to_404() {
        let err = AppError::OrderAction(OrderActionError::NotCancellable);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            err.client_message(),
            "Order not found or already cancelled."
        );
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AppError::Database(RepositoryError::DataCorruption(
            "unexpected status BORKED".to_owned(),
        ));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "Internal server error.");
    }

    #[test]
    fn test_admin_unauthorized_maps_to_401() {
        let err = AppError::AdminUnauthorized;
        assert_eq!(err.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(err.client_message(), "Unauthorized");
    }

    #[test]
    fn test_email_taken_maps_to_409() {
        let err = AppError::Auth(AuthError::EmailTaken);
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }
}
