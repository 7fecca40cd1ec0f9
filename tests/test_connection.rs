//! Connection manager tests: lazy open, close, reopen, health check

use rust_decimal::Decimal;
use subvention_desk::app::{subvention_count, subvention_find_all, subvention_insert};
use subvention_desk::domain::{SubsidyType, Subvention};
use subvention_desk::infra::{DbConfig, DbLocation, DbPool};
use subvention_desk::{startup_diagnostic, ShutdownGuard};
use tempfile::TempDir;

fn file_pool(dir: &TempDir) -> DbPool {
    DbPool::new(DbConfig::file(dir.path().join("nested").join("subvenciones.db")))
}

#[test]
fn new_pool_is_not_connected() {
    let pool = DbPool::new(DbConfig::in_memory());
    assert!(!pool.is_connected());
}

#[test]
fn acquire_opens_lazily() {
    let pool = DbPool::new(DbConfig::in_memory());
    {
        let _conn = pool.acquire().unwrap();
    }
    assert!(pool.is_connected());
}

#[test]
fn acquire_reuses_the_open_handle() {
    let pool = DbPool::new(DbConfig::in_memory());
    let mut record = Subvention::new("Spain", SubsidyType::Health, Decimal::ONE);
    subvention_insert(&pool, &mut record).unwrap();
    // A fresh in-memory handle would have lost the row
    assert_eq!(subvention_count(&pool).unwrap(), 1);
}

#[test]
fn close_is_idempotent() {
    let pool = DbPool::new(DbConfig::in_memory());
    pool.close();
    assert!(!pool.is_connected());

    pool.acquire().unwrap();
    pool.close();
    pool.close();
    assert!(!pool.is_connected());
}

#[test]
fn test_connection_reports_success_and_connects() {
    let pool = DbPool::new(DbConfig::in_memory());
    assert!(pool.test_connection());
    assert!(pool.is_connected());
}

#[test]
fn file_database_creates_parent_dirs_and_schema() {
    let dir = TempDir::new().unwrap();
    let pool = file_pool(&dir);
    assert!(pool.test_connection());
    assert!(dir.path().join("nested").join("subvenciones.db").exists());
    assert!(subvention_find_all(&pool).unwrap().is_empty());
}

#[test]
fn reacquire_after_close_sees_persisted_rows() {
    let dir = TempDir::new().unwrap();
    let pool = file_pool(&dir);
    let mut record = Subvention::new("Sweden", SubsidyType::Research, Decimal::new(12345, 2));
    subvention_insert(&pool, &mut record).unwrap();

    pool.close();
    assert!(!pool.is_connected());

    let all = subvention_find_all(&pool).unwrap();
    assert!(pool.is_connected());
    assert_eq!(all, vec![record]);
}

#[test]
fn migrations_run_once_across_reopens() {
    let dir = TempDir::new().unwrap();
    let pool = file_pool(&dir);
    pool.acquire().unwrap();
    pool.close();
    let conn = pool.acquire().unwrap();
    let applied: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_migrations", [], |r| r.get(0))
        .unwrap();
    assert_eq!(applied, 1);
}

#[test]
fn unopenable_location_fails_without_panicking() {
    let dir = TempDir::new().unwrap();
    // A directory cannot be opened as a database file
    let pool = DbPool::new(DbConfig::file(dir.path()));
    assert!(!pool.test_connection());
    assert!(!pool.is_connected());

    let err = subvention_count(&pool).unwrap_err();
    assert_eq!(err.code(), "CONNECTION_ERROR");
}

#[test]
fn shutdown_guard_closes_on_drop() {
    let pool = DbPool::new(DbConfig::in_memory());
    pool.acquire().unwrap();
    {
        let _guard = ShutdownGuard(&pool);
    }
    assert!(!pool.is_connected());
}

#[test]
fn startup_diagnostic_names_location_and_causes() {
    let msg = startup_diagnostic(&DbLocation::File("/srv/app/subvenciones.db".into()));
    assert!(msg.contains("/srv/app/subvenciones.db"));
    assert!(msg.contains("read and write"));
    assert!(msg.contains("SQLite database"));
}
