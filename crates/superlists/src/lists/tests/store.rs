use super::common::*;
use crate::lists::domain::ListId;
use crate::lists::repository::{ListRepository, RepositoryError};
use crate::lists::{ItemValidator, LocalListRepository};

#[test]
fn list_items_are_isolated_per_list() {
    let repository = LocalListRepository::in_memory();
    let correct = seed_list(&repository, &["itemey 1", "itemey 2"]);
    let other = seed_list(&repository, &["other list item 1", "other list item 2"]);

    assert_eq!(item_texts(&repository, correct), vec!["itemey 1", "itemey 2"]);
    assert_eq!(
        item_texts(&repository, other),
        vec!["other list item 1", "other list item 2"]
    );
    assert!(repository
        .list_items(correct)
        .expect("items load")
        .iter()
        .all(|item| item.list == correct));
}

#[test]
fn deleting_a_list_cascades_to_its_items() {
    let repository = LocalListRepository::in_memory();
    let doomed = seed_list(&repository, &["first", "second"]);
    let kept = seed_list(&repository, &["survivor"]);

    repository
        .transaction(|store| store.delete_list(doomed))
        .expect("delete succeeds");

    assert_eq!(repository.list_count().expect("count"), 1);
    assert_eq!(repository.item_count().expect("count"), 1);
    assert!(repository.fetch_list(doomed).expect("fetch").is_none());
    assert_eq!(item_texts(&repository, kept), vec!["survivor"]);
}

#[test]
fn items_require_an_existing_list() {
    let repository = LocalListRepository::in_memory();
    let text = ItemValidator::default().validate("orphan").expect("valid");

    let result = repository.transaction(|store| store.create_item(ListId(42), text));

    assert!(matches!(result, Err(RepositoryError::MissingList(ListId(42)))));
    assert_eq!(repository.item_count().expect("count"), 0);
}

#[test]
fn failed_transaction_discards_staged_work() {
    let repository = LocalListRepository::in_memory();

    let result = repository.transaction(|store| -> Result<(), RepositoryError> {
        store.create_list()?;
        Err(RepositoryError::Unavailable("connection dropped".to_string()))
    });

    assert!(result.is_err());
    assert_eq!(repository.list_count().expect("count"), 0);
}

#[test]
fn identifiers_follow_insertion_order() {
    let repository = LocalListRepository::in_memory();
    let first = seed_list(&repository, &["a", "b"]);
    let second = seed_list(&repository, &["c"]);

    assert!(first < second);
    let ids: Vec<_> = repository
        .list_items(first)
        .expect("items load")
        .into_iter()
        .map(|item| item.id)
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn snapshot_survives_reopen() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("data").join("lists.json");

    let list = {
        let repository = LocalListRepository::open(&path).expect("fresh store opens");
        seed_list(&repository, &["persisted item"])
    };
    assert!(path.exists());

    let reopened = LocalListRepository::open(&path).expect("store reopens");
    assert!(reopened.fetch_list(list).expect("fetch").is_some());
    assert_eq!(item_texts(&reopened, list), vec!["persisted item"]);

    let next = seed_list(&reopened, &["after reopen"]);
    assert!(next > list, "sequence continues after reopen");
}

#[test]
fn corrupt_snapshot_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("lists.json");
    std::fs::write(&path, b"{ not json").expect("write fixture");

    assert!(matches!(
        LocalListRepository::open(&path),
        Err(RepositoryError::Corrupt(_))
    ));
}

#[test]
fn failed_snapshot_write_keeps_live_tables_unchanged() {
    let dir = tempfile::tempdir().expect("temp dir");
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"not a directory").expect("write fixture");
    let repository =
        LocalListRepository::open(blocker.join("lists.json")).expect("missing file opens empty");

    let result = repository.transaction(|store| store.create_list());

    assert!(matches!(result, Err(RepositoryError::Snapshot(_))));
    assert_eq!(repository.list_count().expect("count"), 0);
}
