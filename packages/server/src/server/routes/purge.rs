use axum::{
    extract::{rejection::FormRejection, Extension},
    http::StatusCode,
    response::{IntoResponse, Response},
    Form, Json,
};
use purge::{PageRequest, PersistedArtifact};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;

pub const SUCCESS_MESSAGE: &str = "CSS files processed and merged successfully for each section.";

/// Message returned when no page URL could be read; same as a failed fetch.
pub const MISSING_URL_MESSAGE: &str = "Error fetching HTML.";

#[derive(Debug, Deserialize)]
pub struct PurgeForm {
    pub url: Option<String>,
}

#[derive(Serialize)]
pub struct PurgeResponse {
    message: &'static str,
    files: Vec<PersistedArtifact>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    message: &'static str,
}

fn error_response(status: StatusCode, message: &'static str) -> Response {
    (status, Json(ErrorResponse { message })).into_response()
}

/// Purge trigger endpoint
///
/// Runs the pipeline for the submitted `url` and lists the written files.
///
/// Returns 200 with `{message, files}` on success, 400 with `{message}` when
/// the page is unusable, and 500 when the service itself is misconfigured.
pub async fn purge_handler(
    Extension(state): Extension<AppState>,
    form: Result<Form<PurgeForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(rejection) => {
            tracing::warn!(error = %rejection, "Unreadable purge form");
            return error_response(StatusCode::BAD_REQUEST, MISSING_URL_MESSAGE);
        }
    };

    let Some(url) = form.url.filter(|url| !url.trim().is_empty()) else {
        tracing::warn!("Purge requested without a url");
        return error_response(StatusCode::BAD_REQUEST, MISSING_URL_MESSAGE);
    };

    match state.pipeline.run(&PageRequest::new(url.trim())).await {
        Ok(report) => (
            StatusCode::OK,
            Json(PurgeResponse {
                message: SUCCESS_MESSAGE,
                files: report.artifacts,
            }),
        )
            .into_response(),
        Err(e) if e.is_client_error() => {
            tracing::info!(url = %url, error = %e, "Purge rejected");
            error_response(StatusCode::BAD_REQUEST, e.user_message())
        }
        Err(e) => {
            tracing::error!(url = %url, error = %e, "Purge failed");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.user_message())
        }
    }
}
