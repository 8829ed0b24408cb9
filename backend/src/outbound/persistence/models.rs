//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain.

use diesel::prelude::*;

use crate::domain::{NewRecord, Record, RecordId};

use super::schema::records;

/// Row struct for reading from the records table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = records)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RecordRow {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub age: i32,
}

impl From<RecordRow> for Record {
    fn from(row: RecordRow) -> Self {
        Self::from_new(
            RecordId::new(row.id),
            NewRecord::new(row.name, row.email, row.age),
        )
    }
}

/// Insertable struct for creating records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = records)]
pub(crate) struct NewRecordRow<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub age: i32,
}

impl<'a> From<&'a NewRecord> for NewRecordRow<'a> {
    fn from(record: &'a NewRecord) -> Self {
        Self {
            name: &record.name,
            email: &record.email,
            age: record.age,
        }
    }
}

/// Changeset struct for overwriting an existing record.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = records)]
pub(crate) struct RecordChangeset<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub age: i32,
}

impl<'a> From<&'a Record> for RecordChangeset<'a> {
    fn from(record: &'a Record) -> Self {
        Self {
            name: &record.name,
            email: &record.email,
            age: record.age,
        }
    }
}
