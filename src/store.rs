//! Data access for the `parcel` table.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::{Result, StoreError};
use crate::parcel::Parcel;

const INSERT_PARCEL: &str =
    "INSERT INTO parcel (client, status, address, created_at) VALUES (?1, ?2, ?3, ?4)";

const SELECT_BY_NUMBER: &str =
    "SELECT number, client, status, address, created_at FROM parcel WHERE number = ?1";

const SELECT_BY_CLIENT: &str = "SELECT number, client, status, address, created_at FROM parcel \
     WHERE client = ?1 ORDER BY number";

const UPDATE_ADDRESS: &str = "UPDATE parcel SET address = ?1 WHERE number = ?2";

const UPDATE_STATUS: &str = "UPDATE parcel SET status = ?1 WHERE number = ?2";

const DELETE_PARCEL: &str = "DELETE FROM parcel WHERE number = ?1";

/// Maps [`Parcel`] values to rows of the `parcel` table.
///
/// The connection is borrowed: the caller opens it before building the store
/// and closes it once the store is gone. Every method issues exactly one
/// parameterized statement; there is no caching, retrying or batching.
pub struct ParcelStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> ParcelStore<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    /// Insert a parcel and return its newly assigned number.
    ///
    /// `parcel.number` is ignored.
    pub fn add(&self, parcel: &Parcel) -> Result<i64> {
        self.conn.execute(
            INSERT_PARCEL,
            params![
                parcel.client,
                parcel.status,
                parcel.address,
                parcel.created_at
            ],
        )?;
        let number = self.conn.last_insert_rowid();
        tracing::debug!(number, client = parcel.client, "parcel added");
        Ok(number)
    }

    /// Fetch a parcel by number, or [`StoreError::NotFound`] if no row matches.
    pub fn get(&self, number: i64) -> Result<Parcel> {
        self.conn
            .query_row(SELECT_BY_NUMBER, [number], parcel_from_row)
            .optional()?
            .ok_or(StoreError::NotFound(number))
    }

    /// All parcels owned by `client`; empty when the client has none.
    pub fn get_by_client(&self, client: i64) -> Result<Vec<Parcel>> {
        let mut stmt = self.conn.prepare(SELECT_BY_CLIENT)?;
        let parcels = stmt
            .query_map([client], parcel_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        tracing::debug!(client, count = parcels.len(), "parcels loaded by client");
        Ok(parcels)
    }

    /// Replace the address. Unknown numbers are not an error.
    pub fn set_address(&self, number: i64, address: &str) -> Result<()> {
        let affected = self.conn.execute(UPDATE_ADDRESS, params![address, number])?;
        tracing::debug!(number, affected, "parcel address updated");
        Ok(())
    }

    /// Replace the status. The value is stored as given.
    pub fn set_status(&self, number: i64, status: &str) -> Result<()> {
        let affected = self.conn.execute(UPDATE_STATUS, params![status, number])?;
        tracing::debug!(number, affected, "parcel status updated");
        Ok(())
    }

    /// Remove a parcel permanently. Unknown numbers are not an error.
    pub fn delete(&self, number: i64) -> Result<()> {
        let affected = self.conn.execute(DELETE_PARCEL, [number])?;
        tracing::debug!(number, affected, "parcel deleted");
        Ok(())
    }
}

fn parcel_from_row(row: &Row<'_>) -> rusqlite::Result<Parcel> {
    Ok(Parcel {
        number: Some(row.get(0)?),
        client: row.get(1)?,
        status: row.get(2)?,
        address: row.get(3)?,
        created_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parcel::status;
    use crate::schema::initialize_schema;

    fn create_test_db() -> rusqlite::Result<Connection> {
        let conn = Connection::open_in_memory()?;
        initialize_schema(&conn)?;
        Ok(conn)
    }

    fn test_parcel() -> Parcel {
        Parcel::new(1000, status::REGISTERED, "test", "2024-01-01T00:00:00Z")
    }

    #[test]
    fn test_add_get_delete() -> Result<()> {
        let conn = create_test_db()?;
        let store = ParcelStore::new(&conn);
        let parcel = test_parcel();

        let number = store.add(&parcel)?;
        assert!(number > 0);

        let stored = store.get(number)?;
        assert_eq!(stored, parcel.clone().with_number(number));

        store.set_address(number, "new address")?;
        assert_eq!(store.get(number)?.address, "new address");

        store.delete(number)?;
        let err = store.get(number).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(n) if n == number));
        Ok(())
    }

    #[test]
    fn test_add_ignores_supplied_number() -> Result<()> {
        let conn = create_test_db()?;
        let store = ParcelStore::new(&conn);

        let first = store.add(&test_parcel())?;
        let second = store.add(&test_parcel().with_number(first))?;
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn test_deleted_numbers_are_not_reused() -> Result<()> {
        let conn = create_test_db()?;
        let store = ParcelStore::new(&conn);

        let first = store.add(&test_parcel())?;
        store.delete(first)?;
        let second = store.add(&test_parcel())?;
        assert!(second > first);
        Ok(())
    }

    #[test]
    fn test_missing_table_is_a_database_error() {
        let conn = Connection::open_in_memory().unwrap();
        let store = ParcelStore::new(&conn);

        let err = store.get(1).unwrap_err();
        assert!(matches!(err, StoreError::Database(_)));
        assert!(store.add(&test_parcel()).is_err());
    }
}
