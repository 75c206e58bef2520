//! Address repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over `addresses` storage, scoped by owning person.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - `person_id` is written on insert and never touched by updates.
//! - Updating a missing address reports `NotFound`; deleting one is a no-op.
//! - Per-person listings are ordered newest first (`id DESC`).

use crate::model::address::{Address, AddressId, NewAddress};
use crate::model::person::PersonId;
use crate::repo::person_repo::{
    table_exists, table_has_column, RepoError, RepoResult, SqlitePersonRepository,
};
use rusqlite::{params, Connection, Row};

const ADDRESS_SELECT_SQL: &str = "SELECT
    id,
    person_id,
    title,
    city,
    district,
    address_line
FROM addresses";

/// Repository interface for address CRUD operations.
pub trait AddressRepository {
    /// Inserts one address and returns the store-assigned id.
    fn create_address(&self, address: &NewAddress) -> RepoResult<AddressId>;
    /// Overwrites the location fields of an existing address. The owning
    /// person is deliberately left out of the SET list.
    fn update_address(&self, address: &Address) -> RepoResult<()>;
    /// Gets one address by id.
    fn get_address(&self, id: AddressId) -> RepoResult<Option<Address>>;
    /// Lists every address owned by one person, newest first.
    fn list_for_person(&self, person_id: PersonId) -> RepoResult<Vec<Address>>;
    /// Deletes one address. Missing ids are a silent no-op.
    fn delete_address(&self, id: AddressId) -> RepoResult<()>;
}

/// SQLite-backed address repository.
pub struct SqliteAddressRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAddressRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// Address storage is meaningless without person storage, so the
    /// person-side guard runs first.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let _ = SqlitePersonRepository::try_new(conn)?;
        ensure_address_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl AddressRepository for SqliteAddressRepository<'_> {
    fn create_address(&self, address: &NewAddress) -> RepoResult<AddressId> {
        address.validate()?;

        self.conn.execute(
            "INSERT INTO addresses (person_id, title, city, district, address_line)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                address.person_id,
                address.title.as_deref(),
                address.city.as_deref(),
                address.district.as_deref(),
                address.address_line.as_str(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_address(&self, address: &Address) -> RepoResult<()> {
        address.validate()?;

        let changed = self.conn.execute(
            "UPDATE addresses
             SET
                title = ?1,
                city = ?2,
                district = ?3,
                address_line = ?4
             WHERE id = ?5;",
            params![
                address.title.as_deref(),
                address.city.as_deref(),
                address.district.as_deref(),
                address.address_line.as_str(),
                address.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::AddressNotFound(address.id));
        }

        Ok(())
    }

    fn get_address(&self, id: AddressId) -> RepoResult<Option<Address>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ADDRESS_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_address_row(row)?));
        }

        Ok(None)
    }

    fn list_for_person(&self, person_id: PersonId) -> RepoResult<Vec<Address>> {
        let mut stmt = self.conn.prepare(&format!(
            "{ADDRESS_SELECT_SQL} WHERE person_id = ?1 ORDER BY id DESC;"
        ))?;

        let mut rows = stmt.query([person_id])?;
        let mut addresses = Vec::new();
        while let Some(row) = rows.next()? {
            addresses.push(parse_address_row(row)?);
        }

        Ok(addresses)
    }

    fn delete_address(&self, id: AddressId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM addresses WHERE id = ?1;", [id])?;
        Ok(())
    }
}

fn parse_address_row(row: &Row<'_>) -> RepoResult<Address> {
    Ok(Address {
        id: row.get("id")?,
        person_id: row.get("person_id")?,
        title: row.get("title")?,
        city: row.get("city")?,
        district: row.get("district")?,
        address_line: row.get("address_line")?,
    })
}

fn ensure_address_connection_ready(conn: &Connection) -> RepoResult<()> {
    if !table_exists(conn, "addresses")? {
        return Err(RepoError::MissingRequiredTable("addresses"));
    }

    for column in [
        "id",
        "person_id",
        "title",
        "city",
        "district",
        "address_line",
    ] {
        if !table_has_column(conn, "addresses", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "addresses",
                column,
            });
        }
    }

    Ok(())
}
