use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request};
use axum::response::Response;
use serde_json::Value;

use crate::config::ListsConfig;
use crate::lists::domain::{ItemRecord, ListId, ListRecord};
use crate::lists::repository::{ListRepository, ListStore, RepositoryError};
use crate::lists::{lists_router, ListService, LocalListRepository};

pub(super) fn lists_config() -> ListsConfig {
    ListsConfig::default()
}

pub(super) fn build_service() -> (ListService<LocalListRepository>, Arc<LocalListRepository>) {
    let repository = Arc::new(LocalListRepository::in_memory());
    let service = ListService::new(repository.clone(), &lists_config());
    (service, repository)
}

pub(super) fn lists_router_with_service(service: ListService<LocalListRepository>) -> axum::Router {
    lists_router(Arc::new(service))
}

/// Seed a list holding `texts`, bypassing the workflow.
pub(super) fn seed_list(repository: &LocalListRepository, texts: &[&str]) -> ListId {
    let validator = crate::lists::ItemValidator::default();
    repository
        .transaction(|store| -> Result<ListId, RepositoryError> {
            let list = store.create_list()?;
            for text in texts {
                let text = validator.validate(text).expect("seed text is valid");
                store.create_item(list.id, text)?;
            }
            Ok(list.id)
        })
        .expect("seed list")
}

pub(super) fn item_texts(repository: &LocalListRepository, list: ListId) -> Vec<String> {
    repository
        .list_items(list)
        .expect("items load")
        .into_iter()
        .map(|item| item.text.as_str().to_string())
        .collect()
}

pub(super) struct UnavailableRepository;

impl ListRepository for UnavailableRepository {
    fn transaction<T, E, F>(&self, _work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn ListStore) -> Result<T, E>,
        E: From<RepositoryError>,
    {
        Err(RepositoryError::Unavailable("database offline".to_string()).into())
    }

    fn fetch_list(&self, _id: ListId) -> Result<Option<ListRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn list_items(&self, _list: ListId) -> Result<Vec<ItemRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

pub(super) fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request builds")
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
