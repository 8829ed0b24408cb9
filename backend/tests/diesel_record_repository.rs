//! Integration tests for `DieselRecordRepository` against embedded PostgreSQL.
//!
//! Each test gets a fresh database on an embedded cluster started through
//! `pg-embedded-setup-unpriv`, migrated with the binary's embedded migrations.
//! Tests stay synchronous and drive the adapter on a dedicated Tokio runtime.
//! Set `SKIP_TEST_CLUSTER=1` where the cluster cannot start.

use backend::domain::ports::RecordRepository;
use backend::domain::{NewRecord, Record, RecordId};
use backend::outbound::persistence::{
    DbPool, DieselRecordRepository, PoolConfig, run_pending_migrations,
};
use pagination::PageRequest;
use pg_embedded_setup_unpriv::TestCluster;
use rstest::{fixture, rstest};
use tokio::runtime::Runtime;
use uuid::Uuid;

mod support;

use support::{count_records, handle_cluster_setup_failure, reset_database, test_cluster};

struct TestContext {
    runtime: Runtime,
    repository: DieselRecordRepository,
    database_url: String,
    applied_migrations: usize,
    _cluster: TestCluster,
}

fn setup_context() -> Result<TestContext, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = test_cluster()?;
    let name = format!("records_repo_{}", Uuid::new_v4().simple());
    let database_url = reset_database(&cluster, &name)?;
    let applied_migrations = run_pending_migrations(&database_url).map_err(|err| err.to_string())?;

    let pool = runtime
        .block_on(DbPool::new(PoolConfig::new(&database_url).with_max_size(2)))
        .map_err(|err| err.to_string())?;

    Ok(TestContext {
        runtime,
        repository: DieselRecordRepository::new(pool),
        database_url,
        applied_migrations,
        _cluster: cluster,
    })
}

#[fixture]
fn repo_context() -> Option<TestContext> {
    match setup_context() {
        Ok(ctx) => Some(ctx),
        Err(reason) => handle_cluster_setup_failure(reason),
    }
}

fn people(count: usize) -> Vec<NewRecord> {
    (0..count)
        .map(|n| NewRecord::new(format!("Person {n}"), format!("person{n}@example.com"), 20))
        .collect()
}

impl TestContext {
    fn seed(&self, records: &[NewRecord]) -> Vec<Record> {
        self.runtime
            .block_on(self.repository.save_all(records))
            .expect("save_all succeeds")
    }
}

#[rstest]
fn migrations_apply_once(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: migrations_apply_once skipped");
        return;
    };

    assert!(context.applied_migrations > 0);
    assert_eq!(
        run_pending_migrations(&context.database_url).expect("rerun migrations"),
        0
    );
    assert_eq!(count_records(&context.database_url).expect("count rows"), 0);
}

#[rstest]
fn save_all_assigns_ascending_ids_in_input_order(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: save_all_assigns_ascending_ids_in_input_order skipped");
        return;
    };

    let saved = context.seed(&people(3));

    let emails: Vec<&str> = saved.iter().map(|record| record.email.as_str()).collect();
    assert_eq!(
        emails,
        vec!["person0@example.com", "person1@example.com", "person2@example.com"]
    );
    assert!(saved.windows(2).all(|pair| pair[0].id.get() < pair[1].id.get()));
    let listed = context
        .runtime
        .block_on(context.repository.find_all())
        .expect("find_all succeeds");
    assert_eq!(listed, saved);
}

#[rstest]
fn save_all_splits_batches_beyond_the_bind_limit(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: save_all_splits_batches_beyond_the_bind_limit skipped");
        return;
    };

    let saved = context.seed(&people(25_000));

    assert_eq!(saved.len(), 25_000);
    assert_eq!(saved[24_999].email, "person24999@example.com");
    assert_eq!(count_records(&context.database_url).expect("count rows"), 25_000);
}

#[rstest]
fn find_all_by_email_in_returns_only_matches(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: find_all_by_email_in_returns_only_matches skipped");
        return;
    };
    context.seed(&people(4));

    let wanted = vec![
        "person1@example.com".to_owned(),
        "person3@example.com".to_owned(),
        "nobody@example.com".to_owned(),
    ];
    let found = context
        .runtime
        .block_on(context.repository.find_all_by_email_in(&wanted))
        .expect("lookup succeeds");
    let none = context
        .runtime
        .block_on(context.repository.find_all_by_email_in(&[]))
        .expect("empty lookup succeeds");

    let emails: Vec<&str> = found.iter().map(|record| record.email.as_str()).collect();
    assert_eq!(emails, vec!["person1@example.com", "person3@example.com"]);
    assert!(none.is_empty());
}

#[rstest]
fn find_page_reports_totals(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: find_page_reports_totals skipped");
        return;
    };
    let saved = context.seed(&people(5));
    let request = PageRequest::try_new(1, 2, 1_000).expect("valid page request");

    let page = context
        .runtime
        .block_on(context.repository.find_page(request))
        .expect("page query succeeds");

    assert_eq!(page.total_items(), 5);
    assert_eq!(page.total_pages(), 3);
    assert_eq!(page.items(), &saved[2..4]);
}

#[rstest]
fn save_updates_and_delete_removes(repo_context: Option<TestContext>) {
    let Some(context) = repo_context else {
        eprintln!("SKIP-TEST-CLUSTER: save_updates_and_delete_removes skipped");
        return;
    };
    let original = context.seed(&people(1)).remove(0);
    let id = original.id;

    let changed = original.with_changes(NewRecord::new("Ada", "ada@example.com", 36));
    let updated = context
        .runtime
        .block_on(context.repository.save(&changed))
        .expect("save succeeds");
    let by_email = context
        .runtime
        .block_on(context.repository.find_by_email("ada@example.com"))
        .expect("email lookup succeeds");

    assert_eq!(updated, changed);
    assert_eq!(by_email, Some(changed));

    context
        .runtime
        .block_on(context.repository.delete_by_id(id))
        .expect("delete succeeds");
    let exists = context
        .runtime
        .block_on(context.repository.exists_by_id(id))
        .expect("exists query succeeds");
    let missing = context
        .runtime
        .block_on(context.repository.find_by_id(RecordId::new(id.get())))
        .expect("lookup succeeds");

    assert!(!exists);
    assert!(missing.is_none());
}
