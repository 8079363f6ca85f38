use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use coupon_core::CoreError;
use serde_json::json;

pub const INVALID_OPERATOR: &str = "Operador inválido";
pub const INVALID_COUPON_FORMAT: &str = "Formato de cupón inválido";
pub const COUPON_NOT_FOUND: &str = "Cupón no encontrado";
pub const RATE_LIMITED: &str = "Demasiadas consultas, intenta nuevamente en un minuto.";
pub const LOOKUP_FAILED: &str = "Error consultando el cupón";

#[derive(Debug)]
pub enum AppError {
    ValidationError(&'static str),
    NotFoundError(&'static str),
    RateLimited,
    /// Carries detail for the logs only; clients get a generic message.
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::RateLimited => (StatusCode::TOO_MANY_REQUESTS, RATE_LIMITED),
            AppError::InternalServerError(detail) => {
                tracing::error!("Coupon lookup failed: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, LOOKUP_FAILED)
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidOperator(_) => AppError::ValidationError(INVALID_OPERATOR),
            CoreError::InvalidCouponFormat => AppError::ValidationError(INVALID_COUPON_FORMAT),
            CoreError::NotFound => AppError::NotFoundError(COUPON_NOT_FOUND),
            CoreError::Upstream(detail) => AppError::InternalServerError(detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_errors_map_to_status_codes() {
        let cases = [
            (CoreError::InvalidOperator("x".into()), StatusCode::BAD_REQUEST),
            (CoreError::InvalidCouponFormat, StatusCode::BAD_REQUEST),
            (CoreError::NotFound, StatusCode::NOT_FOUND),
            (CoreError::Upstream("timeout".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
        assert_eq!(AppError::RateLimited.into_response().status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
