use super::domain::{ItemRecord, ItemText, ListId, ListRecord};

/// Unit-of-work view of the list and item tables, valid inside one transaction.
pub trait ListStore {
    fn create_list(&mut self) -> Result<ListRecord, RepositoryError>;
    /// Removes the list and every item it owns.
    fn delete_list(&mut self, id: ListId) -> Result<(), RepositoryError>;
    fn fetch_list(&self, id: ListId) -> Result<Option<ListRecord>, RepositoryError>;
    fn create_item(&mut self, list: ListId, text: ItemText)
        -> Result<ItemRecord, RepositoryError>;
    /// Items of one list in insertion order.
    fn list_items(&self, list: ListId) -> Result<Vec<ItemRecord>, RepositoryError>;
}

/// Storage abstraction so the workflow can be exercised in isolation.
///
/// `transaction` commits the staged work only when `work` returns `Ok`; an `Err`
/// discards everything `work` did.
pub trait ListRepository: Send + Sync {
    fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn ListStore) -> Result<T, E>,
        E: From<RepositoryError>;

    fn fetch_list(&self, id: ListId) -> Result<Option<ListRecord>, RepositoryError>;
    fn list_items(&self, list: ListId) -> Result<Vec<ItemRecord>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("list {0} does not exist")]
    MissingList(ListId),
    #[error("repository unavailable: {0}")]
    Unavailable(String),
    #[error("snapshot io failed: {0}")]
    Snapshot(#[from] std::io::Error),
    #[error("snapshot is not valid json: {0}")]
    Corrupt(#[from] serde_json::Error),
}
