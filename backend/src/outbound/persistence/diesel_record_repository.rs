//! PostgreSQL-backed `RecordRepository` implementation using Diesel ORM.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use pagination::{Page, PageRequest};

use crate::domain::ports::{RecordRepository, RecordRepositoryError};
use crate::domain::{NewRecord, Record, RecordId};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewRecordRow, RecordChangeset, RecordRow};
use super::pool::DbPool;
use super::schema::records;

/// Diesel-backed implementation of the `RecordRepository` port.
#[derive(Clone)]
pub struct DieselRecordRepository {
    pool: DbPool,
}

impl DieselRecordRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// PostgreSQL caps a statement at this many bind parameters.
const MAX_BIND_PARAMS: usize = 65_535;
/// Bound columns per inserted row: name, email and age.
const BINDS_PER_ROW: usize = 3;
/// Rows per `INSERT` so a statement stays under [`MAX_BIND_PARAMS`].
const ROWS_PER_INSERT: usize = MAX_BIND_PARAMS / BINDS_PER_ROW;

fn to_sql_bound(value: u64) -> Result<i64, RecordRepositoryError> {
    i64::try_from(value)
        .map_err(|_| RecordRepositoryError::query(format!("page bound {value} out of range")))
}

#[async_trait]
impl RecordRepository for DieselRecordRepository {
    async fn find_all_by_email_in(
        &self,
        emails: &[String],
    ) -> Result<Vec<Record>, RecordRepositoryError> {
        if emails.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecordRow> = records::table
            .filter(records::email.eq_any(emails))
            .order(records::id.asc())
            .select(RecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Record::from).collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Record>, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RecordRow> = records::table
            .filter(records::email.eq(email))
            .order(records::id.asc())
            .select(RecordRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Record::from))
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Record>, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: Option<RecordRow> = records::table
            .find(id.get())
            .select(RecordRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(Record::from))
    }

    async fn exists_by_id(&self, id: RecordId) -> Result<bool, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::select(exists(records::table.find(id.get())))
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)
    }

    async fn save_all(&self, new_records: &[NewRecord]) -> Result<Vec<Record>, RecordRepositoryError> {
        if new_records.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<NewRecordRow<'_>> = new_records.iter().map(NewRecordRow::from).collect();
        let inserted: Vec<RecordRow> = conn
            .transaction(|conn| {
                async move {
                    let mut inserted = Vec::with_capacity(rows.len());
                    for chunk in rows.chunks(ROWS_PER_INSERT) {
                        let saved: Vec<RecordRow> = diesel::insert_into(records::table)
                            .values(chunk)
                            .returning(RecordRow::as_returning())
                            .get_results(conn)
                            .await?;
                        inserted.extend(saved);
                    }
                    Ok::<_, diesel::result::Error>(inserted)
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;

        Ok(inserted.into_iter().map(Record::from).collect())
    }

    async fn save(&self, record: &Record) -> Result<Record, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row: RecordRow = diesel::update(records::table.find(record.id.get()))
            .set(RecordChangeset::from(record))
            .returning(RecordRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Record::from(row))
    }

    async fn delete_by_id(&self, id: RecordId) -> Result<(), RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        diesel::delete(records::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn find_all(&self) -> Result<Vec<Record>, RecordRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows: Vec<RecordRow> = records::table
            .order(records::id.asc())
            .select(RecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Record::from).collect())
    }

    async fn find_page(&self, request: PageRequest) -> Result<Page<Record>, RecordRepositoryError> {
        let limit = to_sql_bound(u64::from(request.size()))?;
        let offset = to_sql_bound(request.offset())?;
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let total: i64 = records::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let rows: Vec<RecordRow> = records::table
            .order(records::id.asc())
            .limit(limit)
            .offset(offset)
            .select(RecordRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        let items = rows.into_iter().map(Record::from).collect();
        Ok(Page::new(items, u64::try_from(total).unwrap_or_default(), request))
    }
}
