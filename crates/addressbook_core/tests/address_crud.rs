use addressbook_core::db::migrations::latest_version;
use addressbook_core::db::open_db_in_memory;
use addressbook_core::{
    AddressRepository, NewAddress, NewPerson, PersonId, PersonRepository, RepoError,
    SqliteAddressRepository, SqlitePersonRepository,
};
use rusqlite::Connection;

#[test]
fn create_and_get_roundtrip_preserves_all_fields() {
    let conn = open_db_in_memory().unwrap();
    let owner = seeded_person(&conn, "Ada", "Lovelace");
    let repo = SqliteAddressRepository::try_new(&conn).unwrap();

    let mut address = NewAddress::new(owner, "10 Downing St");
    address.title = Some("Home".to_string());
    address.city = Some("London".to_string());
    address.district = Some("Westminster".to_string());
    let id = repo.create_address(&address).unwrap();

    let loaded = repo.get_address(id).unwrap().unwrap();
    assert_eq!(loaded.id, id);
    assert_eq!(loaded.person_id, owner);
    assert_eq!(loaded.title.as_deref(), Some("Home"));
    assert_eq!(loaded.city.as_deref(), Some("London"));
    assert_eq!(loaded.district.as_deref(), Some("Westminster"));
    assert_eq!(loaded.address_line, "10 Downing St");
}

#[test]
fn missing_optional_fields_stay_null_through_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let owner = seeded_person(&conn, "Ada", "Lovelace");
    let repo = SqliteAddressRepository::try_new(&conn).unwrap();

    let id = repo
        .create_address(&NewAddress::new(owner, "5 Main St"))
        .unwrap();

    let loaded = repo.get_address(id).unwrap().unwrap();
    assert_eq!(loaded.title, None);
    assert_eq!(loaded.city, None);
    assert_eq!(loaded.district, None);
}

#[test]
fn list_for_person_is_scoped_and_newest_first() {
    let conn = open_db_in_memory().unwrap();
    let ada = seeded_person(&conn, "Ada", "Lovelace");
    let grace = seeded_person(&conn, "Grace", "Hopper");
    let repo = SqliteAddressRepository::try_new(&conn).unwrap();

    let first = repo.create_address(&NewAddress::new(ada, "1 First Rd")).unwrap();
    repo.create_address(&NewAddress::new(grace, "2 Other Rd")).unwrap();
    let third = repo.create_address(&NewAddress::new(ada, "3 Third Rd")).unwrap();

    let listed = repo.list_for_person(ada).unwrap();
    let ids: Vec<_> = listed.iter().map(|a| a.id).collect();
    assert_eq!(ids, [third, first]);

    // Re-reading must not change the result.
    assert_eq!(repo.list_for_person(ada).unwrap(), listed);
}

#[test]
fn list_for_person_without_addresses_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let owner = seeded_person(&conn, "Ada", "Lovelace");
    let repo = SqliteAddressRepository::try_new(&conn).unwrap();

    assert!(repo.list_for_person(owner).unwrap().is_empty());
}

#[test]
fn update_overwrites_location_fields_and_keeps_owner() {
    let conn = open_db_in_memory().unwrap();
    let owner = seeded_person(&conn, "Ada", "Lovelace");
    let repo = SqliteAddressRepository::try_new(&conn).unwrap();

    let id = repo
        .create_address(&NewAddress::new(owner, "1 Old Rd"))
        .unwrap();

    let mut address = repo.get_address(id).unwrap().unwrap();
    address.title = Some("Work".to_string());
    address.city = Some("Manchester".to_string());
    address.district = None;
    address.address_line = "2 New Rd".to_string();
    repo.update_address(&address).unwrap();

    let loaded = repo.get_address(id).unwrap().unwrap();
    assert_eq!(loaded.person_id, owner);
    assert_eq!(loaded.title.as_deref(), Some("Work"));
    assert_eq!(loaded.city.as_deref(), Some("Manchester"));
    assert_eq!(loaded.district, None);
    assert_eq!(loaded.address_line, "2 New Rd");
}

#[test]
fn update_missing_address_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let owner = seeded_person(&conn, "Ada", "Lovelace");
    let repo = SqliteAddressRepository::try_new(&conn).unwrap();

    let id = repo
        .create_address(&NewAddress::new(owner, "1 Old Rd"))
        .unwrap();
    let mut address = repo.get_address(id).unwrap().unwrap();
    address.id = 999;

    let err = repo.update_address(&address).unwrap_err();
    assert!(matches!(err, RepoError::AddressNotFound(999)));
}

#[test]
fn delete_missing_address_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let owner = seeded_person(&conn, "Ada", "Lovelace");
    let repo = SqliteAddressRepository::try_new(&conn).unwrap();

    let id = repo
        .create_address(&NewAddress::new(owner, "1 Old Rd"))
        .unwrap();
    repo.delete_address(999).unwrap();

    assert!(repo.get_address(id).unwrap().is_some());
}

#[test]
fn delete_removes_address() {
    let conn = open_db_in_memory().unwrap();
    let owner = seeded_person(&conn, "Ada", "Lovelace");
    let repo = SqliteAddressRepository::try_new(&conn).unwrap();

    let id = repo
        .create_address(&NewAddress::new(owner, "1 Old Rd"))
        .unwrap();
    repo.delete_address(id).unwrap();

    assert!(repo.get_address(id).unwrap().is_none());
    assert!(repo.list_for_person(owner).unwrap().is_empty());
}

#[test]
fn create_rejects_unknown_owner() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteAddressRepository::try_new(&conn).unwrap();

    let err = repo
        .create_address(&NewAddress::new(999, "1 Nowhere Rd"))
        .unwrap_err();
    assert!(matches!(err, RepoError::Db(_)));
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let owner = seeded_person(&conn, "Ada", "Lovelace");
    let repo = SqliteAddressRepository::try_new(&conn).unwrap();

    let err = repo
        .create_address(&NewAddress::new(owner, "   "))
        .unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));
    assert!(repo.list_for_person(owner).unwrap().is_empty());

    let id = repo
        .create_address(&NewAddress::new(owner, "1 Old Rd"))
        .unwrap();
    let mut address = repo.get_address(id).unwrap().unwrap();
    address.address_line = String::new();

    let err = repo.update_address(&address).unwrap_err();
    assert!(matches!(err, RepoError::Validation(_)));

    let loaded = repo.get_address(id).unwrap().unwrap();
    assert_eq!(loaded.address_line, "1 Old Rd");
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteAddressRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::UninitializedConnection { .. })
    ));
}

#[test]
fn repository_rejects_connection_without_required_addresses_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE persons (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            phone TEXT
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteAddressRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("addresses"))
    ));
}

#[test]
fn repository_rejects_connection_missing_required_addresses_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE persons (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            phone TEXT
        );
        CREATE TABLE addresses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            person_id INTEGER NOT NULL REFERENCES persons (id),
            title TEXT,
            city TEXT,
            address_line TEXT NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteAddressRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "addresses",
            column: "district"
        })
    ));
}

fn seeded_person(conn: &Connection, first_name: &str, last_name: &str) -> PersonId {
    let repo = SqlitePersonRepository::try_new(conn).unwrap();
    repo.create_person(&NewPerson::new(first_name, last_name))
        .unwrap()
}
