use std::sync::Arc;

use tracing::{info, warn};

use crate::config::ListsConfig;

use super::domain::ListId;
use super::outcome::{ItemForm, Outcome, View, ViewContext};
use super::repository::{ListRepository, RepositoryError};
use super::validation::ItemValidator;

/// Service running the submission workflows against a repository.
pub struct ListService<R> {
    repository: Arc<R>,
    validator: ItemValidator,
    placeholder: String,
}

impl<R> ListService<R>
where
    R: ListRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: &ListsConfig) -> Self {
        Self {
            repository,
            validator: ItemValidator::from_config(config),
            placeholder: config.item_placeholder.clone(),
        }
    }

    /// Start a new list whose first item is `raw_text`.
    ///
    /// The list is created first and deleted again when the text is rejected, all in
    /// one transaction, so a failed submission leaves no list behind.
    pub fn create_list(&self, raw_text: &str) -> Result<Outcome, ListServiceError> {
        self.repository
            .transaction(|store| -> Result<Outcome, ListServiceError> {
                let list = store.create_list()?;

                match self.validator.validate(raw_text) {
                    Ok(text) => {
                        let item = store.create_item(list.id, text)?;
                        info!(list_id = %list.id, item_id = %item.id, "list created");
                        Ok(Outcome::Redirect(list.url()))
                    }
                    Err(rejection) => {
                        store.delete_list(list.id)?;
                        warn!(list_id = %list.id, "new list rejected, list removed");
                        let context = self.context().with_error(rejection.message());
                        Ok(Outcome::Render(View::Home, context))
                    }
                }
            })
    }

    /// Append `raw_text` to an existing list. Not idempotent: repeated submissions
    /// store repeated items.
    pub fn add_item(&self, list_id: ListId, raw_text: &str) -> Result<Outcome, ListServiceError> {
        self.repository
            .transaction(|store| -> Result<Outcome, ListServiceError> {
                let list = store
                    .fetch_list(list_id)?
                    .ok_or(ListServiceError::ListNotFound(list_id))?;

                match self.validator.validate(raw_text) {
                    Ok(text) => {
                        let item = store.create_item(list.id, text)?;
                        info!(list_id = %list.id, item_id = %item.id, "item added");
                        Ok(Outcome::Redirect(list.url()))
                    }
                    Err(rejection) => {
                        warn!(list_id = %list.id, "item rejected");
                        let items = store.list_items(list.id)?;
                        let context = self
                            .context()
                            .with_list(list, items)
                            .with_error(rejection.message());
                        Ok(Outcome::Render(View::List, context))
                    }
                }
            })
    }

    pub fn home(&self) -> Outcome {
        Outcome::Render(View::Home, self.context())
    }

    pub fn view_list(&self, list_id: ListId) -> Result<Outcome, ListServiceError> {
        let list = self
            .repository
            .fetch_list(list_id)?
            .ok_or(ListServiceError::ListNotFound(list_id))?;
        let items = self.repository.list_items(list.id)?;
        Ok(Outcome::Render(
            View::List,
            self.context().with_list(list, items),
        ))
    }

    fn context(&self) -> ViewContext {
        ViewContext::new(ItemForm::new(self.placeholder.clone()))
    }
}

/// Error raised by the list service.
#[derive(Debug, thiserror::Error)]
pub enum ListServiceError {
    #[error("list {0} not found")]
    ListNotFound(ListId),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
