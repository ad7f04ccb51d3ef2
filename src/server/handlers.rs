use super::{
    form::{prefill, read_submission_form},
    pages::{EstimatorPage, IndexPage},
    types::{ErrorResponse, EstimationResponse},
};
use crate::{
    Error,
    estimator::{Demographics, Estimator, Submission, Variant},
    llm::LlmClient,
};
use askama::Template;
use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
};
use std::sync::Arc;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    pub estimator: Arc<Estimator>,
}

impl AppState {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            estimator: Arc::new(Estimator::new(client)),
        }
    }
}

pub fn status_for(error: &Error) -> StatusCode {
    match error {
        Error::MissingInput(_) => StatusCode::BAD_REQUEST,
        Error::InvalidInput(_) | Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        Error::Multipart(e) => e.status(),
        e if e.is_upstream_error() => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn render(status: StatusCode, page: impl Template) -> Response {
    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            error!("Failed to render page: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to render page").into_response()
        }
    }
}

pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn index() -> Response {
    render(StatusCode::OK, IndexPage::new())
}

pub async fn composition_form() -> Response {
    render(
        StatusCode::OK,
        EstimatorPage::new(Variant::Composition, &Demographics::default()),
    )
}

pub async fn insight_form() -> Response {
    render(
        StatusCode::OK,
        EstimatorPage::new(Variant::Insight, &Demographics::default()),
    )
}

pub async fn submit_composition(State(state): State<AppState>, multipart: Multipart) -> Response {
    submit_form(&state, Variant::Composition, multipart).await
}

pub async fn submit_insight(State(state): State<AppState>, multipart: Multipart) -> Response {
    submit_form(&state, Variant::Insight, multipart).await
}

/// Browser flow: the form page is rendered again with the outcome below it.
async fn submit_form(state: &AppState, variant: Variant, multipart: Multipart) -> Response {
    let form = match read_submission_form(multipart).await {
        Ok(form) => form,
        Err(e) => {
            warn!(%variant, "Failed to read submitted form: {}", e);
            let page = EstimatorPage::new(variant, &Demographics::default()).with_warning(e.to_string());
            return render(status_for(&e), page);
        }
    };

    let page = EstimatorPage::new(variant, &prefill(&form));

    let submission = match form.into_submission(variant) {
        Ok(submission) => submission,
        Err(e) => {
            info!(%variant, "Rejected submission: {}", e);
            return render(status_for(&e), page.with_warning(e.to_string()));
        }
    };

    match state.estimator.estimate(&submission).await {
        Ok(result) => render(StatusCode::OK, page.with_result(&submission, result)),
        Err(e) => render(status_for(&e), page.with_error(variant.error_message(&e))),
    }
}

pub async fn api_composition(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EstimationResponse>, (StatusCode, Json<ErrorResponse>)> {
    submit_api(&state, Variant::Composition, multipart).await
}

pub async fn api_insight(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<EstimationResponse>, (StatusCode, Json<ErrorResponse>)> {
    submit_api(&state, Variant::Insight, multipart).await
}

async fn submit_api(
    state: &AppState,
    variant: Variant,
    multipart: Multipart,
) -> Result<Json<EstimationResponse>, (StatusCode, Json<ErrorResponse>)> {
    let reject = |e: Error| {
        (
            status_for(&e),
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    };

    let submission: Submission = read_submission_form(multipart)
        .await
        .and_then(|form| form.into_submission(variant))
        .map_err(|e| {
            info!(%variant, "Rejected API submission: {}", e);
            reject(e)
        })?;

    match state.estimator.estimate(&submission).await {
        Ok(result) => Ok(Json(EstimationResponse {
            request_id: submission.id.to_string(),
            variant,
            output: result.text,
        })),
        Err(e) => Err((
            status_for(&e),
            Json(ErrorResponse {
                error: variant.error_message(&e),
            }),
        )),
    }
}
