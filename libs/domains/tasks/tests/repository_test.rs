//! Repository tests for the Tasks domain
//!
//! Run against a real SQLite database with migrations applied.

use domain_tasks::*;
use futures::future::join_all;
use test_utils::assertions::{assert_ids_in_order, assert_some};
use test_utils::{TestDatabase, TestDataBuilder};

fn new_task(title: &str) -> NewTask {
    NewTask {
        title: title.to_string(),
        description: None,
    }
}

fn complete_now() -> TaskMutation {
    TaskMutation::Complete {
        at: chrono::Utc::now(),
    }
}

#[tokio::test]
async fn test_create_then_get_is_pending() {
    let db = TestDatabase::new().await;
    let repo = SqliteTaskRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("repo_create_get");

    let created = repo
        .create(NewTask {
            title: builder.title("main"),
            description: Some(builder.description("main")),
        })
        .await
        .unwrap();

    let fetched = assert_some(repo.get_by_id(created.id).await.unwrap(), "created task");
    assert_eq!(fetched.title, builder.title("main"));
    assert_eq!(fetched.description, Some(builder.description("main")));
    assert_eq!(fetched.status, TaskStatus::Pending);
    assert!(fetched.completed_at.is_none());
    assert_eq!(fetched.created_at, created.created_at);
}

#[tokio::test]
async fn test_create_rejects_empty_title() {
    let db = TestDatabase::new().await;
    let repo = SqliteTaskRepository::new(db.connection());

    let result = repo.create(new_task("  ")).await;

    assert!(matches!(result, Err(TaskError::Validation(_))));
    assert_eq!(repo.count(None).await.unwrap(), 0);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let db = TestDatabase::new().await;
    let repo = SqliteTaskRepository::new(db.connection());

    let a = repo.create(new_task("A")).await.unwrap();
    let b = repo.create(new_task("B")).await.unwrap();
    let c = repo.create(new_task("C")).await.unwrap();

    let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|t| t.id).collect();
    assert_ids_in_order(&ids, &[c.id, b.id, a.id], "list order");
}

#[tokio::test]
async fn test_list_empty_store() {
    let db = TestDatabase::new().await;
    let repo = SqliteTaskRepository::new(db.connection());

    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_complete_is_idempotent() {
    let db = TestDatabase::new().await;
    let repo = SqliteTaskRepository::new(db.connection());
    let task = repo.create(new_task("Finish")).await.unwrap();

    repo.update(task.id, complete_now()).await.unwrap();
    let first = assert_some(repo.get_by_id(task.id).await.unwrap(), "completed task");
    let second = repo.update(task.id, complete_now()).await.unwrap();

    assert_eq!(first.status, TaskStatus::Completed);
    assert!(first.completed_at.is_some());
    assert_eq!(second.completed_at, first.completed_at);
    assert!(first.completed_at.unwrap() >= first.created_at);
}

#[tokio::test]
async fn test_update_unknown_id() {
    let db = TestDatabase::new().await;
    let repo = SqliteTaskRepository::new(db.connection());

    let result = repo.update(999, complete_now()).await;

    assert!(matches!(result, Err(TaskError::NotFound(999))));
}

#[tokio::test]
async fn test_concurrent_completes_agree() {
    let db = TestDatabase::new().await;
    let service = TaskService::new(SqliteTaskRepository::new(db.connection()));
    let repo = SqliteTaskRepository::new(db.connection());
    let task = repo.create(new_task("Race")).await.unwrap();

    let results = join_all((0..20).map(|_| service.complete_task(task.id))).await;

    let stored = assert_some(repo.get_by_id(task.id).await.unwrap(), "stored task");
    assert_eq!(stored.status, TaskStatus::Completed);
    let completed_at = assert_some(stored.completed_at, "stored completed_at");

    for result in results {
        let done = result.unwrap();
        assert_eq!(done.status, TaskStatus::Completed);
        assert_eq!(done.completed_at, Some(completed_at));
    }
}

#[tokio::test]
async fn test_delete_twice() {
    let db = TestDatabase::new().await;
    let repo = SqliteTaskRepository::new(db.connection());
    let task = repo.create(new_task("Remove me")).await.unwrap();

    assert!(repo.delete(task.id).await.unwrap());
    assert!(!repo.delete(task.id).await.unwrap());
    assert!(repo.get_by_id(task.id).await.unwrap().is_none());
}

#[tokio::test]
async fn test_concurrent_deletes_one_wins() {
    let db = TestDatabase::new().await;
    let repo = SqliteTaskRepository::new(db.connection());
    let task = repo.create(new_task("Contested")).await.unwrap();

    let (left, right) = tokio::join!(repo.delete(task.id), repo.delete(task.id));

    let wins = [left.unwrap(), right.unwrap()]
        .into_iter()
        .filter(|deleted| *deleted)
        .count();
    assert_eq!(wins, 1);
}

#[tokio::test]
async fn test_ids_not_reused_after_delete() {
    let db = TestDatabase::new().await;
    let repo = SqliteTaskRepository::new(db.connection());

    let first = repo.create(new_task("first")).await.unwrap();
    repo.delete(first.id).await.unwrap();
    let second = repo.create(new_task("second")).await.unwrap();

    assert!(second.id > first.id);
}

#[tokio::test]
async fn test_count_by_status() {
    let db = TestDatabase::new().await;
    let repo = SqliteTaskRepository::new(db.connection());

    let a = repo.create(new_task("a")).await.unwrap();
    repo.create(new_task("b")).await.unwrap();
    repo.create(new_task("c")).await.unwrap();
    repo.update(a.id, complete_now()).await.unwrap();

    assert_eq!(repo.count(None).await.unwrap(), 3);
    assert_eq!(repo.count(Some(TaskStatus::Completed)).await.unwrap(), 1);
    assert_eq!(repo.count(Some(TaskStatus::Pending)).await.unwrap(), 2);
}

#[tokio::test]
async fn test_service_stats_scenario() {
    let db = TestDatabase::new().await;
    let service = TaskService::new(SqliteTaskRepository::new(db.connection()));

    let mut ids = Vec::new();
    for title in ["one", "two", "three"] {
        let task = service
            .create_task(CreateTask {
                title: title.to_string(),
                description: None,
            })
            .await
            .unwrap();
        ids.push(task.id);
    }
    service.complete_task(ids[0]).await.unwrap();

    let stats = service.completion_stats().await.unwrap();
    assert_eq!(
        stats,
        CompletionStats {
            completed_count: 1,
            pending_count: 2
        }
    );

    service.delete_task(ids[1]).await.unwrap();
    assert!(matches!(
        service.get_task(ids[1]).await,
        Err(TaskError::NotFound(_))
    ));
}
