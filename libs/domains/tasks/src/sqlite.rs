use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::{
    entity,
    error::{TaskError, TaskResult},
    models::{NewTask, Task, TaskMutation, TaskStatus},
    repository::TaskRepository,
};

pub struct SqliteTaskRepository {
    db: DatabaseConnection,
}

impl SqliteTaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepository {
    async fn create(&self, input: NewTask) -> TaskResult<Task> {
        if input.title.trim().is_empty() {
            return Err(TaskError::Validation("title must not be empty".to_string()));
        }

        let active_model = entity::ActiveModel {
            title: Set(input.title),
            description: Set(input.description),
            status: Set(TaskStatus::Pending),
            created_at: Set(Utc::now()),
            completed_at: Set(None),
            ..Default::default()
        };

        let model = active_model.insert(&self.db).await?;

        tracing::info!(task_id = model.id, "Created task");
        Ok(model.into())
    }

    async fn get_by_id(&self, id: i64) -> TaskResult<Option<Task>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;

        Ok(model.map(Into::into))
    }

    async fn list(&self) -> TaskResult<Vec<Task>> {
        let models = entity::Entity::find()
            .order_by_desc(entity::Column::CreatedAt)
            .order_by_desc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn update(&self, id: i64, mutation: TaskMutation) -> TaskResult<Task> {
        let current = self
            .get_by_id(id)
            .await?
            .ok_or(TaskError::NotFound(id))?;

        let Some(next) = mutation.apply(&current) else {
            tracing::debug!(task_id = id, status = %current.status, "Transition is a no-op");
            return Ok(current);
        };

        // Only write if nobody changed the status since we read it.
        let result = entity::Entity::update_many()
            .set(entity::ActiveModel {
                status: Set(next.status),
                completed_at: Set(next.completed_at),
                ..Default::default()
            })
            .filter(entity::Column::Id.eq(id))
            .filter(entity::Column::Status.eq(current.status))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            tracing::debug!(task_id = id, "Lost update race, returning current row");
            return self
                .get_by_id(id)
                .await?
                .ok_or(TaskError::NotFound(id));
        }

        tracing::info!(task_id = id, status = %next.status, "Updated task");
        Ok(next)
    }

    async fn delete(&self, id: i64) -> TaskResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(task_id = id, "Deleted task");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn count(&self, status: Option<TaskStatus>) -> TaskResult<u64> {
        let mut query = entity::Entity::find();

        if let Some(status) = status {
            query = query.filter(entity::Column::Status.eq(status));
        }

        Ok(query.count(&self.db).await?)
    }
}
