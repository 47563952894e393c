//! Schema version bookkeeping. The migration table maps stored schema
//! versions forward; today there is exactly one version, but the seam
//! exists for the next one.

use crate::error::PersistError;
use redb::{Database, ReadableTable, TableDefinition};

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

const SCHEMA_TABLE: TableDefinition<&str, u32> = TableDefinition::new("schema");

pub fn ensure_current(db: &Database) -> Result<(), PersistError> {
	let stored = read_version(db)?;
	match stored {
		None => write_version(db, CURRENT_SCHEMA_VERSION),
		Some(v) if v == CURRENT_SCHEMA_VERSION => Ok(()),
		Some(v) => migrate(v, db),
	}
}

fn read_version(db: &Database) -> Result<Option<u32>, PersistError> {
	let txn = db.begin_read()?;
	let table = match txn.open_table(SCHEMA_TABLE) {
		Ok(t) => t,
		Err(redb::TableError::TableDoesNotExist(_)) => return Ok(None),
		Err(e) => return Err(e.into()),
	};
	Ok(table.get("version")?.map(|v| v.value()))
}

fn write_version(db: &Database, version: u32) -> Result<(), PersistError> {
	let txn = db.begin_write()?;
	{
		let mut table = txn.open_table(SCHEMA_TABLE)?;
		table.insert("version", version)?;
	}
	txn.commit()?;
	Ok(())
}

fn migrate(from: u32, db: &Database) -> Result<(), PersistError> {
	if from > CURRENT_SCHEMA_VERSION {
		return Err(PersistError::Database(format!(
			"on-disk schema version {} is newer than this build supports ({})",
			from, CURRENT_SCHEMA_VERSION
		)));
	}
	// No migrations defined yet; a future schema bump adds arms here.
	write_version(db, CURRENT_SCHEMA_VERSION)
}

// vim: ts=4
