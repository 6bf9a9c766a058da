//! To-do lists: item validation, list/item storage and the two submission workflows
//! (start a new list, add to an existing one).

pub mod domain;
pub mod outcome;
pub mod repository;
pub mod router;
pub mod service;
pub mod store;
pub mod validation;

#[cfg(test)]
mod tests;

pub use domain::{list_url, InvalidListId, ItemId, ItemRecord, ItemText, ListId, ListRecord};
pub use outcome::{ItemForm, Outcome, View, ViewContext};
pub use repository::{ListRepository, ListStore, RepositoryError};
pub use router::{lists_router, outcome_response, ItemSubmission};
pub use service::{ListService, ListServiceError};
pub use store::LocalListRepository;
pub use validation::{EmptyTextError, ItemValidator};
