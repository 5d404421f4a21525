use phonebook_core::{
    AddContactError, Contact, ContactId, ContactPersistence, ContactStore, KeyValueStorage,
    MemoryStorage, StorageContactRepository, CONTACTS_STORAGE_KEY,
};

fn names(store: &ContactStore<impl ContactPersistence>) -> Vec<String> {
    store
        .visible_contacts()
        .into_iter()
        .map(|contact| contact.name().to_string())
        .collect()
}

fn persisted(storage: &MemoryStorage) -> Vec<Contact> {
    let raw = storage
        .get_item(CONTACTS_STORAGE_KEY)
        .unwrap()
        .expect("contacts should be persisted");
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn distinct_adds_are_listed_most_recent_first() {
    let storage = MemoryStorage::new();
    let mut store = ContactStore::open(StorageContactRepository::new(&storage));

    for (name, number) in [("Ann", "1"), ("Bob", "2"), ("Cid", "3"), ("Dee", "4")] {
        store.add_contact(name, number).unwrap();
    }

    assert_eq!(names(&store), vec!["Dee", "Cid", "Bob", "Ann"]);
    assert_eq!(store.contact_count(), 4);
}

#[test]
fn duplicate_name_keeps_first_contact_and_reports_error() {
    let storage = MemoryStorage::new();
    let mut store = ContactStore::open(StorageContactRepository::new(&storage));

    let ann = store.add_contact("Ann", "123").unwrap();
    let err = store.add_contact("Ann", "456").unwrap_err();

    assert_eq!(err, AddContactError::DuplicateName("Ann".to_string()));
    assert_eq!(store.contacts(), std::slice::from_ref(&ann));
    assert_eq!(store.contacts()[0].number(), "123");
    assert_eq!(persisted(&storage), vec![ann]);
}

#[test]
fn deleting_unknown_id_is_a_no_op() {
    let storage = MemoryStorage::new();
    let mut store = ContactStore::open(StorageContactRepository::new(&storage));
    store.add_contact("Ann", "1").unwrap();
    let before = store.contacts().to_vec();

    let removed = store.delete_contact(&ContactId::from("no-such-id"));

    assert!(!removed);
    assert_eq!(store.contacts(), before.as_slice());
    assert_eq!(persisted(&storage), before);
}

#[test]
fn delete_removes_contact_and_persists() {
    let storage = MemoryStorage::new();
    let mut store = ContactStore::open(StorageContactRepository::new(&storage));
    let ann = store.add_contact("Ann", "1").unwrap();
    let bob = store.add_contact("Bob", "2").unwrap();

    assert!(store.delete_contact(ann.id()));

    assert_eq!(store.contacts(), std::slice::from_ref(&bob));
    assert_eq!(persisted(&storage), vec![bob]);
}

#[test]
fn deleted_name_can_be_added_again() {
    let mut store = ContactStore::open(StorageContactRepository::new(MemoryStorage::new()));
    let ann = store.add_contact("Ann", "1").unwrap();
    store.delete_contact(ann.id());

    let again = store.add_contact("Ann", "2").unwrap();
    assert_ne!(again.id(), ann.id());
    assert_eq!(store.contact_count(), 1);
}

#[test]
fn filter_narrows_visible_contacts_case_insensitively() {
    let mut store = ContactStore::open(StorageContactRepository::new(MemoryStorage::new()));
    store.add_contact("Ann", "1").unwrap();
    store.add_contact("Bob", "2").unwrap();

    store.set_filter("an");
    assert_eq!(names(&store), vec!["Ann"]);
    assert_eq!(store.contact_count(), 2);

    store.set_filter("AN");
    assert_eq!(names(&store), vec!["Ann"]);

    store.set_filter("");
    assert_eq!(names(&store), vec!["Bob", "Ann"]);
}

#[test]
fn set_filter_does_not_touch_storage() {
    let storage = MemoryStorage::new();
    let mut store = ContactStore::open(StorageContactRepository::new(&storage));

    store.set_filter("anything");

    assert_eq!(store.filter(), "anything");
    assert!(storage.get_item(CONTACTS_STORAGE_KEY).unwrap().is_none());
}

#[test]
fn store_hydrates_from_existing_storage() {
    let storage = MemoryStorage::new();
    {
        let mut store = ContactStore::open(StorageContactRepository::new(&storage));
        store.add_contact("Ann", "1").unwrap();
        store.add_contact("Bob", "2").unwrap();
    }

    let mut reopened = ContactStore::open(StorageContactRepository::new(&storage));
    assert_eq!(names(&reopened), vec!["Bob", "Ann"]);

    let err = reopened.add_contact("Bob", "3").unwrap_err();
    assert_eq!(err, AddContactError::DuplicateName("Bob".to_string()));
}

#[test]
fn failed_save_keeps_in_memory_mutation() {
    let storage = MemoryStorage::with_quota(8);
    let mut store = ContactStore::open(StorageContactRepository::new(&storage));

    let ann = store.add_contact("Ann", "123").unwrap();

    assert_eq!(store.contacts(), std::slice::from_ref(&ann));
    assert!(storage.get_item(CONTACTS_STORAGE_KEY).unwrap().is_none());
}
