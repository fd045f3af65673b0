//! Mapping from domain errors to HTTP responses.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use validator::ValidationErrors;

use ds_core::errors::{DomainError, ErrorResponse};

/// HTTP status for each domain error variant
pub fn status_for(error: &DomainError) -> StatusCode {
    match error {
        DomainError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
        DomainError::Unavailable => StatusCode::CONFLICT,
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Forbidden => StatusCode::FORBIDDEN,
        DomainError::Conflict { .. } => StatusCode::CONFLICT,
        DomainError::InvalidWebhook { .. } => StatusCode::BAD_REQUEST,
        DomainError::Storage { .. } => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Translate a domain error to its HTTP response
///
/// Storage failures are logged server-side; the response body carries the
/// stable error code so clients can branch without parsing messages.
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    if let DomainError::Storage { message } = error {
        tracing::error!(error = %message, "storage failure surfaced to client");
    }
    HttpResponse::build(status_for(error)).json(ErrorResponse::from(error))
}

/// Build a 400 response from request body validation failures
pub fn validation_error_response(errors: &ValidationErrors) -> HttpResponse {
    let details: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let messages: Vec<String> = errors
                .iter()
                .map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string())
                })
                .collect();
            format!("{}: {}", field, messages.join(", "))
        })
        .collect();

    HttpResponse::BadRequest().json(ErrorResponse::new("INVALID_INPUT", details.join("; ")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&DomainError::invalid_input("bad")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(status_for(&DomainError::Unavailable), StatusCode::CONFLICT);
        assert_eq!(
            status_for(&DomainError::not_found("Booking")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(status_for(&DomainError::Forbidden), StatusCode::FORBIDDEN);
        assert_eq!(
            status_for(&DomainError::conflict("already accepted")),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&DomainError::InvalidWebhook {
                message: "bad signature".to_string()
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::Storage {
                message: "down".to_string()
            }),
            StatusCode::SERVICE_UNAVAILABLE
        );
    }
}
