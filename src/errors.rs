use crate::backend::BackendError;
use crate::messages::ErrorKind;
use crate::stats::StatsError;
use axum::http::StatusCode;
use serde_json::json;

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: ErrorKind::SessionMissing.localized().to_string(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
        }
    }

    pub fn internal(err: impl std::error::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        Self::internal(err)
    }
}

/// Status to answer with when the backend call behind a request failed.
pub fn backend_status(err: &BackendError) -> StatusCode {
    match err {
        BackendError::Rejected { status, .. } => {
            StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
        }
        BackendError::Transport(_) | BackendError::Decode(_) => StatusCode::BAD_GATEWAY,
    }
}

impl From<BackendError> for AppError {
    fn from(err: BackendError) -> Self {
        Self {
            status: backend_status(&err),
            message: err.to_string(),
        }
    }
}

impl From<StatsError> for AppError {
    fn from(err: StatsError) -> Self {
        Self {
            status: StatusCode::UNPROCESSABLE_ENTITY,
            message: err.to_string(),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = axum::Json(json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_rejections_keep_their_status() {
        let err: AppError = BackendError::Rejected {
            status: 400,
            kind: ErrorKind::InvalidCredentials,
        }
        .into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.message, ErrorKind::InvalidCredentials.localized());

        let err: AppError = BackendError::Decode("bad json".into()).into();
        assert_eq!(err.status, StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn stats_failures_are_unprocessable() {
        let err: AppError = StatsError::RatingOutOfRange {
            id: "x".into(),
            rating: 7,
        }
        .into();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(err.message.contains("rating 7"));
    }
}
