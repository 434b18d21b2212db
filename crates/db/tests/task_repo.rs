//! Integration tests for the task repository.
//!
//! Covers creation defaults, the category join, filtering and ordering, and
//! partial-update semantics.

use sqlx::SqlitePool;
use taskboard_core::category::NewCategory;
use taskboard_core::task::{NewTask, TaskPatch};
use taskboard_core::types::DbId;
use taskboard_db::repositories::{CategoryRepo, TaskRepo};
use taskboard_db::DbConnection;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_task(title: &str, category_id: Option<DbId>) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: None,
        category_id,
    }
}

async fn category(conn: &mut DbConnection, name: &str) -> DbId {
    CategoryRepo::create(
        conn,
        &NewCategory {
            name: name.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

// ---------------------------------------------------------------------------
// Create / read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_title_only_applies_defaults(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let task = TaskRepo::create(&mut conn, &new_task("Buy milk", None))
        .await
        .unwrap();

    assert!(task.id > 0);
    assert_eq!(task.title, "Buy milk");
    assert_eq!(task.description, None);
    assert_eq!(task.category_id, None);
    assert_eq!(task.category_name, None);
    assert!(!task.is_completed);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_round_trip_includes_category_name(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let work = category(&mut conn, "Work").await;

    let created = TaskRepo::create(
        &mut conn,
        &NewTask {
            title: "Report".into(),
            description: Some("Quarterly numbers".into()),
            category_id: Some(work),
        },
    )
    .await
    .unwrap();

    let fetched = TaskRepo::find_by_id(&mut conn, created.id)
        .await
        .unwrap()
        .expect("task should exist");
    assert_eq!(fetched, created);
    assert_eq!(fetched.description.as_deref(), Some("Quarterly numbers"));
    assert_eq!(fetched.category_id, Some(work));
    assert_eq!(fetched.category_name.as_deref(), Some("Work"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_unknown_category_is_rejected_by_store(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let err = TaskRepo::create(&mut conn, &new_task("Orphan", Some(777)))
        .await
        .unwrap_err();
    assert!(matches!(err, sqlx::Error::Database(_)));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_find_unknown_returns_none(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    assert!(TaskRepo::find_by_id(&mut conn, 31337)
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_is_newest_first(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let first = TaskRepo::create(&mut conn, &new_task("first", None))
        .await
        .unwrap();
    let second = TaskRepo::create(&mut conn, &new_task("second", None))
        .await
        .unwrap();
    let third = TaskRepo::create(&mut conn, &new_task("third", None))
        .await
        .unwrap();

    let ids: Vec<DbId> = TaskRepo::list(&mut conn, None)
        .await
        .unwrap()
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![third.id, second.id, first.id]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_filtered_by_category(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let work = category(&mut conn, "Work").await;
    let home = category(&mut conn, "Home").await;

    let w1 = TaskRepo::create(&mut conn, &new_task("w1", Some(work)))
        .await
        .unwrap();
    TaskRepo::create(&mut conn, &new_task("h1", Some(home)))
        .await
        .unwrap();
    TaskRepo::create(&mut conn, &new_task("loose", None))
        .await
        .unwrap();
    let w2 = TaskRepo::create(&mut conn, &new_task("w2", Some(work)))
        .await
        .unwrap();

    let filtered = TaskRepo::list(&mut conn, Some(work)).await.unwrap();
    let ids: Vec<DbId> = filtered.iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![w2.id, w1.id]);
    assert!(filtered.iter().all(|t| t.category_id == Some(work)));

    let all = TaskRepo::list(&mut conn, None).await.unwrap();
    assert_eq!(all.len(), 4);
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_completion_patch_leaves_other_fields(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let work = category(&mut conn, "Work").await;
    let created = TaskRepo::create(
        &mut conn,
        &NewTask {
            title: "Report".into(),
            description: Some("draft".into()),
            category_id: Some(work),
        },
    )
    .await
    .unwrap();

    let updated = TaskRepo::update(&mut conn, created.id, &TaskPatch::completion(true))
        .await
        .unwrap()
        .expect("task should exist");

    assert!(updated.is_completed);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.category_id, created.category_id);
    assert_eq!(updated.created_at, created.created_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_patch_clears_nullable_columns(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let work = category(&mut conn, "Work").await;
    let created = TaskRepo::create(
        &mut conn,
        &NewTask {
            title: "Report".into(),
            description: Some("draft".into()),
            category_id: Some(work),
        },
    )
    .await
    .unwrap();

    let patch = TaskPatch {
        title: Some("Final report".into()),
        description: Some(None),
        category_id: Some(None),
        is_completed: None,
    };
    let updated = TaskRepo::update(&mut conn, created.id, &patch)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.title, "Final report");
    assert_eq!(updated.description, None);
    assert_eq!(updated.category_id, None);
    assert_eq!(updated.category_name, None);
    assert!(!updated.is_completed);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_unknown_returns_none(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let updated = TaskRepo::update(&mut conn, 999, &TaskPatch::completion(true))
        .await
        .unwrap();
    assert!(updated.is_none());
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete(pool: SqlitePool) {
    let mut conn = pool.acquire().await.unwrap();
    let created = TaskRepo::create(&mut conn, &new_task("Temp", None))
        .await
        .unwrap();

    assert!(TaskRepo::delete(&mut conn, created.id).await.unwrap());
    assert!(!TaskRepo::delete(&mut conn, created.id).await.unwrap());
    assert!(TaskRepo::find_by_id(&mut conn, created.id)
        .await
        .unwrap()
        .is_none());
}
