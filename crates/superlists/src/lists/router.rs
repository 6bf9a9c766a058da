use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use super::domain::ListId;
use super::outcome::Outcome;
use super::repository::ListRepository;
use super::service::{ListService, ListServiceError};

/// Form body of both submission routes. A missing field counts as empty text.
#[derive(Debug, Default, Deserialize)]
pub struct ItemSubmission {
    #[serde(default, alias = "itemText")]
    pub text: String,
}

/// Router builder exposing the home page and list endpoints.
pub fn lists_router<R>(service: Arc<ListService<R>>) -> Router
where
    R: ListRepository + 'static,
{
    Router::new()
        .route("/", get(home_handler::<R>))
        .route("/lists/new", post(new_list_handler::<R>))
        .route(
            "/lists/:list_id/",
            get(view_list_handler::<R>).post(add_item_handler::<R>),
        )
        .with_state(service)
}

pub(crate) async fn home_handler<R>(State(service): State<Arc<ListService<R>>>) -> Response
where
    R: ListRepository + 'static,
{
    outcome_response(service.home())
}

pub(crate) async fn new_list_handler<R>(
    State(service): State<Arc<ListService<R>>>,
    Form(submission): Form<ItemSubmission>,
) -> Response
where
    R: ListRepository + 'static,
{
    run_blocking(service, move |service| service.create_list(&submission.text)).await
}

pub(crate) async fn view_list_handler<R>(
    State(service): State<Arc<ListService<R>>>,
    Path(list_id): Path<String>,
) -> Response
where
    R: ListRepository + 'static,
{
    let Ok(id) = list_id.parse::<ListId>() else {
        return not_found(&list_id);
    };
    run_blocking(service, move |service| service.view_list(id)).await
}

pub(crate) async fn add_item_handler<R>(
    State(service): State<Arc<ListService<R>>>,
    Path(list_id): Path<String>,
    Form(submission): Form<ItemSubmission>,
) -> Response
where
    R: ListRepository + 'static,
{
    let Ok(id) = list_id.parse::<ListId>() else {
        return not_found(&list_id);
    };
    run_blocking(service, move |service| service.add_item(id, &submission.text)).await
}

/// Run a workflow on the blocking pool; the store locks a mutex and may write its
/// snapshot file.
async fn run_blocking<R, F>(service: Arc<ListService<R>>, work: F) -> Response
where
    R: ListRepository + 'static,
    F: FnOnce(&ListService<R>) -> Result<Outcome, ListServiceError> + Send + 'static,
{
    match tokio::task::spawn_blocking(move || work(&service)).await {
        Ok(Ok(outcome)) => outcome_response(outcome),
        Ok(Err(err)) => error_response(err),
        Err(join_err) => {
            error!(error = %join_err, "list workflow task failed");
            let payload = json!({
                "error": "list workflow did not complete",
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

pub fn outcome_response(outcome: Outcome) -> Response {
    match outcome {
        Outcome::Redirect(target) => {
            (StatusCode::FOUND, [(header::LOCATION, target)]).into_response()
        }
        Outcome::Render(view, context) => {
            let payload = json!({
                "view": view.template(),
                "context": context,
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
    }
}

fn error_response(err: ListServiceError) -> Response {
    match err {
        ListServiceError::ListNotFound(id) => not_found(&id.to_string()),
        ListServiceError::Repository(source) => {
            error!(error = %source, "list store failure");
            let payload = json!({
                "error": source.to_string(),
            });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
        }
    }
}

fn not_found(list_id: &str) -> Response {
    let payload = json!({
        "error": format!("list {list_id} not found"),
    });
    (StatusCode::NOT_FOUND, Json(payload)).into_response()
}
