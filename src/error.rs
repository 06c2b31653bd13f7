use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use log::{debug, error};
use serde::Serialize;

use crate::{auth, message, thread, user};

/// Shown instead of raw database failures.
pub const DATABASE_ERROR: &str =
    "Snap! Something went wrong. If this keeps happening, please contact us.";

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    _Auth(#[from] auth::Error),
    #[error(transparent)]
    _Message(#[from] message::Error),
    #[error(transparent)]
    _Thread(#[from] thread::Error),
    #[error(transparent)]
    _User(#[from] user::Error),
}

impl Error {
    fn is_database(&self) -> bool {
        match self {
            Self::_Auth(_) => false,
            Self::_Message(e) => e.is_database(),
            Self::_Thread(e) => e.is_database(),
            Self::_User(e) => e.is_database(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        #[derive(Serialize)]
        struct ErrorResponse {
            message: String,
        }

        let message = if self.is_database() {
            error!("{self:?}");
            DATABASE_ERROR.to_owned()
        } else {
            debug!("{self}");
            self.to_string()
        };

        let status = match self {
            Self::_Auth(e) => StatusCode::from(e),
            Self::_Message(e) => StatusCode::from(e),
            Self::_Thread(e) => StatusCode::from(e),
            Self::_User(e) => StatusCode::from(e),
        };

        (status, Json(ErrorResponse { message })).into_response()
    }
}

#[cfg(test)]
mod test {
    use axum::body::to_bytes;

    use super::*;

    async fn body_of(e: Error) -> (StatusCode, serde_json::Value) {
        let res = e.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn should_render_validation_error_message() {
        let (status, body) = body_of(message::Error::EmptyContent.into()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Please write a message.");
    }

    #[tokio::test]
    async fn should_render_forbidden_for_missing_auth() {
        let (status, body) = body_of(auth::Error::Forbidden.into()).await;

        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["message"], "Forbidden.");
    }
}
