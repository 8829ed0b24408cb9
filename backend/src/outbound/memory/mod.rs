//! In-process record repository.
//!
//! Used when no database URL is configured, and by tests that drive the full
//! HTTP stack. Records live in a `BTreeMap` keyed by identifier so scans come
//! back ordered. Identifiers start at 1 and are never reused.

use std::collections::{BTreeMap, HashSet};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use pagination::{Page, PageRequest};

use crate::domain::ports::{RecordRepository, RecordRepositoryError};
use crate::domain::{NewRecord, Record, RecordId};

#[derive(Debug)]
struct Store {
    records: BTreeMap<RecordId, Record>,
    next_id: i64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            records: BTreeMap::new(),
            next_id: 1,
        }
    }
}

/// Mutex-guarded record store implementing the `RecordRepository` port.
#[derive(Debug, Default)]
pub struct InMemoryRecordRepository {
    store: Mutex<Store>,
}

impl InMemoryRecordRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, RecordRepositoryError> {
        self.store
            .lock()
            .map_err(|_| RecordRepositoryError::query("in-memory record store poisoned"))
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepository {
    async fn find_all_by_email_in(
        &self,
        emails: &[String],
    ) -> Result<Vec<Record>, RecordRepositoryError> {
        let wanted: HashSet<&str> = emails.iter().map(String::as_str).collect();
        let store = self.lock()?;
        Ok(store
            .records
            .values()
            .filter(|record| wanted.contains(record.email.as_str()))
            .cloned()
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Record>, RecordRepositoryError> {
        let store = self.lock()?;
        Ok(store
            .records
            .values()
            .find(|record| record.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: RecordId) -> Result<Option<Record>, RecordRepositoryError> {
        Ok(self.lock()?.records.get(&id).cloned())
    }

    async fn exists_by_id(&self, id: RecordId) -> Result<bool, RecordRepositoryError> {
        Ok(self.lock()?.records.contains_key(&id))
    }

    async fn save_all(&self, records: &[NewRecord]) -> Result<Vec<Record>, RecordRepositoryError> {
        let mut store = self.lock()?;
        let mut saved = Vec::with_capacity(records.len());
        for record in records {
            let id = RecordId::new(store.next_id);
            store.next_id += 1;
            let stored = Record::from_new(id, record.clone());
            store.records.insert(id, stored.clone());
            saved.push(stored);
        }
        Ok(saved)
    }

    async fn save(&self, record: &Record) -> Result<Record, RecordRepositoryError> {
        let mut store = self.lock()?;
        let Some(slot) = store.records.get_mut(&record.id) else {
            return Err(RecordRepositoryError::query("record not found"));
        };
        *slot = record.clone();
        Ok(record.clone())
    }

    async fn delete_by_id(&self, id: RecordId) -> Result<(), RecordRepositoryError> {
        self.lock()?.records.remove(&id);
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<Record>, RecordRepositoryError> {
        Ok(self.lock()?.records.values().cloned().collect())
    }

    async fn find_page(&self, request: PageRequest) -> Result<Page<Record>, RecordRepositoryError> {
        let store = self.lock()?;
        let skip = usize::try_from(request.offset()).unwrap_or(usize::MAX);
        let take = usize::try_from(request.size()).unwrap_or(usize::MAX);
        let items = store
            .records
            .values()
            .skip(skip)
            .take(take)
            .cloned()
            .collect();
        let total = u64::try_from(store.records.len()).unwrap_or(u64::MAX);
        Ok(Page::new(items, total, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repo() -> InMemoryRecordRepository {
        InMemoryRecordRepository::new()
    }

    async fn seed(repo: &InMemoryRecordRepository, emails: &[&str]) -> Vec<Record> {
        let records: Vec<NewRecord> = emails
            .iter()
            .map(|email| NewRecord::new("Name", *email, 30))
            .collect();
        repo.save_all(&records).await.expect("seed records")
    }

    #[rstest]
    #[tokio::test]
    async fn save_all_assigns_sequential_ids(repo: InMemoryRecordRepository) {
        let saved = seed(&repo, &["a@x.com", "b@x.com"]).await;
        let ids: Vec<i64> = saved.iter().map(|record| record.id.get()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[rstest]
    #[tokio::test]
    async fn identifiers_are_not_reused_after_delete(repo: InMemoryRecordRepository) {
        seed(&repo, &["a@x.com"]).await;
        repo.delete_by_id(RecordId::new(1)).await.expect("delete");
        let saved = seed(&repo, &["b@x.com"]).await;
        assert_eq!(saved[0].id, RecordId::new(2));
        assert!(!repo.exists_by_id(RecordId::new(1)).await.expect("exists"));
    }

    #[rstest]
    #[tokio::test]
    async fn finds_records_by_email(repo: InMemoryRecordRepository) {
        seed(&repo, &["a@x.com", "b@x.com", "c@x.com"]).await;

        let found = repo
            .find_all_by_email_in(&["c@x.com".to_owned(), "a@x.com".to_owned(), "z@x.com".to_owned()])
            .await
            .expect("lookup");
        let emails: Vec<&str> = found.iter().map(|record| record.email.as_str()).collect();
        assert_eq!(emails, vec!["a@x.com", "c@x.com"]);

        let single = repo.find_by_email("b@x.com").await.expect("lookup");
        assert_eq!(single.map(|record| record.id), Some(RecordId::new(2)));
    }

    #[rstest]
    #[tokio::test]
    async fn save_overwrites_existing_record(repo: InMemoryRecordRepository) {
        let saved = seed(&repo, &["a@x.com"]).await;
        let changed = saved[0]
            .clone()
            .with_changes(NewRecord::new("Other", "a@x.com", 31));

        repo.save(&changed).await.expect("save");
        let fetched = repo.find_by_id(changed.id).await.expect("find");
        assert_eq!(fetched, Some(changed));
    }

    #[rstest]
    #[tokio::test]
    async fn save_of_unknown_record_fails(repo: InMemoryRecordRepository) {
        let ghost = Record::from_new(RecordId::new(9), NewRecord::new("G", "g@x.com", 1));
        let error = repo.save(&ghost).await.expect_err("unknown record");
        assert!(matches!(error, RecordRepositoryError::Query { .. }));
    }

    #[rstest]
    #[case(0, 2, vec![1, 2])]
    #[case(1, 2, vec![3])]
    #[case(5, 2, vec![])]
    #[tokio::test]
    async fn pages_are_ordered_by_id(
        repo: InMemoryRecordRepository,
        #[case] index: i64,
        #[case] size: i64,
        #[case] expected: Vec<i64>,
    ) {
        seed(&repo, &["a@x.com", "b@x.com", "c@x.com"]).await;
        let request = PageRequest::try_new(index, size, 100).expect("page request");

        let page = repo.find_page(request).await.expect("page");
        let ids: Vec<i64> = page.items().iter().map(|record| record.id.get()).collect();
        assert_eq!(ids, expected);
        assert_eq!(page.total_items(), 3);
        assert_eq!(page.total_pages(), 2);
    }
}
