use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use quill_db::StoreError;
use tracing::error;

/// Request-level failure. Denials are a plain 403 rather than a redirect;
/// only a missing session redirects, back to the login page.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    #[error("not found")]
    NotFound,
    #[error("forbidden")]
    Forbidden,
    #[error("authentication required")]
    Unauthorized,
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound => (StatusCode::NOT_FOUND, "not found").into_response(),
            Self::Forbidden => (StatusCode::FORBIDDEN, "forbidden").into_response(),
            Self::Unauthorized => Redirect::to("/login").into_response(),
            Self::Internal(err) => {
                error!("request failed: {err:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

impl From<StoreError> for PageError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => Self::NotFound,
            other => Self::Internal(other.into()),
        }
    }
}

/// Run a blocking storage closure off the async runtime. The outer error is
/// a failed join; the inner result is handed back so callers can pick apart
/// storage errors (duplicates in particular) before converting.
pub(crate) async fn run_blocking<T, F>(
    f: F,
) -> Result<Result<T, StoreError>, PageError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        error!("spawn_blocking join error: {e}");
        PageError::Internal(anyhow::anyhow!("blocking task failed: {e}"))
    })
}
