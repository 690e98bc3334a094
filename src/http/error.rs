//! API error responses.

use axum::{
    extract::rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::observability::metrics;
use crate::pricing::PricingError;
use crate::routing::UnknownRole;

/// Errors surfaced by HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error(transparent)]
    Role(#[from] UnknownRole),

    #[error("{0}")]
    Disabled(&'static str),

    /// The request could not be extracted (bad JSON, query string, form or path).
    #[error("{message}")]
    Rejected {
        status: StatusCode,
        message: String,
        field: Option<String>,
    },
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Pricing(PricingError::PlanNotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Pricing(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Role(_) => StatusCode::BAD_REQUEST,
            ApiError::Disabled(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Rejected { status, .. } => *status,
        }
    }

    fn field(&self) -> Option<String> {
        match self {
            ApiError::Pricing(e) => e.field().map(str::to_string),
            ApiError::Role(_) => Some("role".to_string()),
            ApiError::Disabled(_) => None,
            ApiError::Rejected { field, .. } => field.clone(),
        }
    }

    fn rejected(status: StatusCode, message: String) -> Self {
        let field = rejected_field(&message);
        ApiError::Rejected {
            status,
            message,
            field,
        }
    }

    /// Name the offending field of an extractor rejection.
    pub fn with_field(self, name: &str) -> Self {
        match self {
            ApiError::Rejected { status, message, .. } => ApiError::Rejected {
                status,
                message,
                field: Some(name.to_string()),
            },
            other => other,
        }
    }
}

/// Pull the field name out of a serde message: either "missing field `x`"
/// or a `path.to.field: ...` prefix.
fn rejected_field(message: &str) -> Option<String> {
    if let Some(rest) = message.split("missing field `").nth(1) {
        return rest.split('`').next().map(str::to_string);
    }

    let detail = message.split_once(": ")?.1;
    let (candidate, _) = detail.split_once(": ")?;
    let is_path = !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
    is_path.then(|| candidate.to_string())
}

macro_rules! impl_from_rejection {
    ($($rejection:ty),*) => {
        $(
            impl From<$rejection> for ApiError {
                fn from(rejection: $rejection) -> Self {
                    ApiError::rejected(rejection.status(), rejection.body_text())
                }
            }
        )*
    };
}

impl_from_rejection!(JsonRejection, QueryRejection, FormRejection, PathRejection);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let field = self.field();

        if status == StatusCode::UNPROCESSABLE_ENTITY {
            let field = field.as_deref().unwrap_or("unknown");
            tracing::info!(field = %field, error = %self, "Pricing input rejected");
            metrics::record_pricing_rejection(field);
        }

        let body = ErrorBody {
            error: self.to_string(),
            field,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_status_mapping() {
        let err = ApiError::from(PricingError::NegativeFinalPrice(-5.0));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.field().as_deref(), Some("discount_value"));

        let err = ApiError::from(PricingError::PlanNotFound(Uuid::nil()));
        assert_eq!(err.status(), StatusCode::NOT_FOUND);

        let err = ApiError::from(UnknownRole("GUIDE".into()));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "unknown role 'GUIDE'");
    }

    #[test]
    fn test_rejected_field_extraction() {
        assert_eq!(
            rejected_field("Failed to deserialize query string: missing field `role`").as_deref(),
            Some("role")
        );
        assert_eq!(
            rejected_field(
                "Failed to deserialize the JSON body into the target type: base_price: \
                 invalid type: string \"100\", expected f64 at line 1 column 18"
            )
            .as_deref(),
            Some("base_price")
        );
        assert_eq!(
            rejected_field("Failed to parse the request body as JSON: EOF while parsing"),
            None
        );
        assert_eq!(rejected_field("Invalid URL: UUID parsing failed"), None);
    }

    #[test]
    fn test_with_field_names_rejections_only() {
        let err = ApiError::rejected(StatusCode::BAD_REQUEST, "Invalid URL: bad".to_string())
            .with_field("id");
        assert_eq!(err.field().as_deref(), Some("id"));
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(UnknownRole("GUIDE".into())).with_field("id");
        assert_eq!(err.field().as_deref(), Some("role"));
    }
}
