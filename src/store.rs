//!
//! # Data Access Layer
//!
//! Thin stores over the PostgreSQL pool. All task queries are owner-scoped:
//! every statement filters by `user_id`, so a caller can never observe or
//! mutate another user's tasks; a task that exists but belongs to someone else
//! is indistinguishable from one that does not exist.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, User};

#[derive(Clone)]
pub struct UserStore {
    pool: PgPool,
}

impl UserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Inserts a new user. `stored_secret` is the vault output; the clear-text
    /// password never reaches this layer.
    pub async fn create(
        &self,
        email: &str,
        name: &str,
        stored_secret: &str,
    ) -> Result<User, AppError> {
        let user = sqlx::query_as::<_, User>(
            "INSERT INTO users (id, name, email, password) VALUES ($1, $2, $3, $4) \
             RETURNING id, name, email, password, created_at",
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(email)
        .bind(stored_secret)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }
}

#[derive(Clone)]
pub struct TaskStore {
    pool: PgPool,
}

impl TaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self, user_id: Uuid) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, completed, user_id FROM tasks WHERE user_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    pub async fn find(&self, id: Uuid, user_id: Uuid) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, title, completed, user_id FROM tasks WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    pub async fn create(&self, title: &str, user_id: Uuid) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (id, title, completed, user_id) VALUES ($1, $2, false, $3) \
             RETURNING id, title, completed, user_id",
        )
        .bind(Uuid::new_v4())
        .bind(title)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(task)
    }

    /// Partial update: absent fields keep their stored values. Returns `None`
    /// when no owned task matches.
    pub async fn update(
        &self,
        id: Uuid,
        user_id: Uuid,
        title: Option<&str>,
        completed: Option<bool>,
    ) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET title = COALESCE($3, title), completed = COALESCE($4, completed) \
             WHERE id = $1 AND user_id = $2 \
             RETURNING id, title, completed, user_id",
        )
        .bind(id)
        .bind(user_id)
        .bind(title)
        .bind(completed)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    /// Returns whether an owned task was actually deleted.
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
