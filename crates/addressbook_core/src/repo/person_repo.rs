//! Person repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD and search APIs over `persons` storage.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths call `validate()` before any SQL mutation runs.
//! - Updating a missing person reports `NotFound`; deleting one is a no-op.
//! - Listings are ordered newest first (`id DESC`).

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::address::AddressId;
use crate::model::person::{NewPerson, Person, PersonId};
use crate::model::ValidationError;
use rusqlite::{params, Connection, Row, Transaction, TransactionBehavior};
use std::error::Error;
use std::fmt::{Display, Formatter};

const PERSON_SELECT_SQL: &str = "SELECT
    id,
    first_name,
    last_name,
    phone
FROM persons";

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ValidationError),
    Db(DbError),
    PersonNotFound(PersonId),
    AddressNotFound(AddressId),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::PersonNotFound(id) => write!(f, "person not found: {id}"),
            Self::AddressNotFound(id) => write!(f, "address not found: {id}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection is not migrated: schema version {actual_version}, expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::PersonNotFound(_)
            | Self::AddressNotFound(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<ValidationError> for RepoError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Read model for the main person list: one person plus how many
/// addresses they own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonOverview {
    pub person: Person,
    pub address_count: u32,
}

/// Repository interface for person CRUD and search operations.
pub trait PersonRepository {
    /// Inserts one person and returns the store-assigned id.
    fn create_person(&self, person: &NewPerson) -> RepoResult<PersonId>;
    /// Overwrites name and phone of an existing person.
    fn update_person(&self, person: &Person) -> RepoResult<()>;
    /// Gets one person by id.
    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>>;
    /// Lists every person, newest first.
    fn list_persons(&self) -> RepoResult<Vec<Person>>;
    /// Case-insensitive substring search over full name and phone.
    /// A blank query returns the full list.
    fn search_persons(&self, query: &str) -> RepoResult<Vec<Person>>;
    /// Lists every person with their address count, newest first.
    fn list_person_overviews(&self) -> RepoResult<Vec<PersonOverview>>;
    /// Deletes one person. Missing ids are a silent no-op.
    fn delete_person(&self, id: PersonId) -> RepoResult<()>;
    /// Deletes one person together with every owned address in a single
    /// transaction. Returns the number of addresses removed.
    fn delete_person_with_addresses(&self, id: PersonId) -> RepoResult<usize>;
}

/// SQLite-backed person repository.
pub struct SqlitePersonRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqlitePersonRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_person_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl PersonRepository for SqlitePersonRepository<'_> {
    fn create_person(&self, person: &NewPerson) -> RepoResult<PersonId> {
        person.validate()?;

        self.conn.execute(
            "INSERT INTO persons (first_name, last_name, phone)
             VALUES (?1, ?2, ?3);",
            params![
                person.first_name.as_str(),
                person.last_name.as_str(),
                person.phone.as_deref(),
            ],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_person(&self, person: &Person) -> RepoResult<()> {
        person.validate()?;

        let changed = self.conn.execute(
            "UPDATE persons
             SET
                first_name = ?1,
                last_name = ?2,
                phone = ?3
             WHERE id = ?4;",
            params![
                person.first_name.as_str(),
                person.last_name.as_str(),
                person.phone.as_deref(),
                person.id,
            ],
        )?;

        if changed == 0 {
            return Err(RepoError::PersonNotFound(person.id));
        }

        Ok(())
    }

    fn get_person(&self, id: PersonId) -> RepoResult<Option<Person>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PERSON_SELECT_SQL} WHERE id = ?1;"))?;

        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_person_row(row)?));
        }

        Ok(None)
    }

    fn list_persons(&self) -> RepoResult<Vec<Person>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{PERSON_SELECT_SQL} ORDER BY id DESC;"))?;

        let mut rows = stmt.query([])?;
        let mut persons = Vec::new();
        while let Some(row) = rows.next()? {
            persons.push(parse_person_row(row)?);
        }

        Ok(persons)
    }

    fn search_persons(&self, query: &str) -> RepoResult<Vec<Person>> {
        // SQLite lower() folds ASCII only; fold the needle the same way so
        // non-ASCII text still matches verbatim.
        let needle = query.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return self.list_persons();
        }

        // instr instead of LIKE so `%` and `_` in the query stay literal.
        let mut stmt = self.conn.prepare(&format!(
            "{PERSON_SELECT_SQL}
             WHERE instr(lower(first_name || ' ' || last_name), ?1) > 0
                OR instr(lower(ifnull(phone, '')), ?1) > 0
             ORDER BY id DESC;"
        ))?;

        let mut rows = stmt.query([needle.as_str()])?;
        let mut persons = Vec::new();
        while let Some(row) = rows.next()? {
            persons.push(parse_person_row(row)?);
        }

        Ok(persons)
    }

    fn list_person_overviews(&self) -> RepoResult<Vec<PersonOverview>> {
        let mut stmt = self.conn.prepare(
            "SELECT
                p.id,
                p.first_name,
                p.last_name,
                p.phone,
                COUNT(a.id) AS address_count
             FROM persons p
             LEFT JOIN addresses a ON a.person_id = p.id
             GROUP BY p.id
             ORDER BY p.id DESC;",
        )?;

        let mut rows = stmt.query([])?;
        let mut overviews = Vec::new();
        while let Some(row) = rows.next()? {
            overviews.push(PersonOverview {
                person: parse_person_row(row)?,
                address_count: row.get("address_count")?,
            });
        }

        Ok(overviews)
    }

    fn delete_person(&self, id: PersonId) -> RepoResult<()> {
        self.conn
            .execute("DELETE FROM persons WHERE id = ?1;", [id])?;
        Ok(())
    }

    fn delete_person_with_addresses(&self, id: PersonId) -> RepoResult<usize> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;

        let removed_addresses =
            tx.execute("DELETE FROM addresses WHERE person_id = ?1;", [id])?;
        tx.execute("DELETE FROM persons WHERE id = ?1;", [id])?;

        tx.commit()?;
        Ok(removed_addresses)
    }
}

fn parse_person_row(row: &Row<'_>) -> RepoResult<Person> {
    Ok(Person {
        id: row.get("id")?,
        first_name: row.get("first_name")?,
        last_name: row.get("last_name")?,
        phone: row.get("phone")?,
    })
}

fn ensure_person_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    if !table_exists(conn, "persons")? {
        return Err(RepoError::MissingRequiredTable("persons"));
    }

    for column in ["id", "first_name", "last_name", "phone"] {
        if !table_has_column(conn, "persons", column)? {
            return Err(RepoError::MissingRequiredColumn {
                table: "persons",
                column,
            });
        }
    }

    Ok(())
}

pub(crate) fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

pub(crate) fn table_has_column(
    conn: &Connection,
    table: &str,
    column: &str,
) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
