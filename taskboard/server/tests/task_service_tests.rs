use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait, PaginatorTrait};
use taskboard_server::entities::task;
use taskboard_server::service::ServiceError;
use taskboard_server::task::{Priority, TaskDraft, TaskService};

mod common;

use common::setup;

fn draft(title: &str) -> TaskDraft {
    TaskDraft {
        title: title.to_string(),
        description: None,
        completed: false,
        priority: Priority::default(),
        tags: Vec::new(),
        category: None,
        project: None,
        due_date: None,
    }
}

#[tokio::test]
async fn can_create_task() {
    let context = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&context.db);

    let created = service
        .create_task(draft("Buy milk"))
        .await
        .expect("Failed to create task");

    let stored = task::Entity::find_by_id(created.id)
        .one(&context.db)
        .await
        .expect("Failed to query task")
        .expect("Task was not stored");
    assert_eq!(stored.title, "Buy milk");
    assert_eq!(stored.priority, "medium");
    assert_eq!(stored.created_at, stored.updated_at);
}

#[tokio::test]
async fn can_read_tasks_inserted_outside_the_service() {
    let context = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&context.db);

    let active_model = task::ActiveModel {
        title: ActiveValue::Set("Imported".to_string()),
        ..Default::default()
    };
    let inserted = active_model
        .insert(&context.db)
        .await
        .expect("Failed to insert task");

    let tasks = service.get_all_tasks().await.expect("Failed to get tasks");

    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].id, inserted.id);
    assert!(!tasks[0].completed);
    assert_eq!(tasks[0].priority, "medium");
    assert!(tasks[0].tags.is_empty());
}

#[tokio::test]
async fn can_handle_update_when_task_not_found() {
    let context = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&context.db);

    let result = service.update_task_by_id(999, draft("Ghost")).await;

    assert!(matches!(
        result,
        Err(ServiceError::NotFound { resource: "Task", id: 999 })
    ));
    let count = task::Entity::find()
        .count(&context.db)
        .await
        .expect("Failed to count tasks");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn can_delete_task_by_id() {
    let context = setup().await.expect("Failed to setup test context");
    let service = TaskService::new(&context.db);
    let created = service
        .create_task(draft("Drop me"))
        .await
        .expect("Failed to create task");

    let deleted_id = service
        .delete_task_by_id(created.id)
        .await
        .expect("Failed to delete task");

    assert_eq!(deleted_id, created.id);
    let result = service.delete_task_by_id(created.id).await;
    assert!(matches!(result, Err(ServiceError::NotFound { .. })));
}
