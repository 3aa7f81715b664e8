use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{CreateTaskRequest, UpdateTaskRequest},
    store::TaskStore,
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use serde_json::json;
use uuid::Uuid;
use validator::Validate;

/// 400 body whenever an owned task cannot be resolved. A task owned by
/// someone else answers identically to one that does not exist.
pub const MSG_TASK_NOT_FOUND: &str = "Task not found";

/// Retrieves all tasks owned by the authenticated user.
#[get("")]
pub async fn get_tasks(
    tasks: web::Data<TaskStore>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let tasks = tasks.list(user.0.id).await?;

    Ok(HttpResponse::Ok().json(json!({ "tasks": tasks })))
}

/// Retrieves a single owned task by id.
#[get("/{id}")]
pub async fn get_task(
    tasks: web::Data<TaskStore>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let task = tasks
        .find(task_id.into_inner(), user.0.id)
        .await?
        .ok_or_else(|| AppError::BadRequest(MSG_TASK_NOT_FOUND.into()))?;

    Ok(HttpResponse::Ok().json(task))
}

/// Creates a new task for the authenticated user. New tasks start
/// uncompleted.
#[post("")]
pub async fn create_task(
    tasks: web::Data<TaskStore>,
    task_data: web::Json<CreateTaskRequest>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = tasks.create(&task_data.title, user.0.id).await?;

    Ok(HttpResponse::Created().json(json!({
        "task": task,
        "message": "Task created successfully"
    })))
}

/// Partially updates an owned task; absent fields keep their stored values.
#[put("/{id}")]
pub async fn update_task(
    tasks: web::Data<TaskStore>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<UpdateTaskRequest>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    task_data.validate()?;

    let task = tasks
        .update(
            task_id.into_inner(),
            user.0.id,
            task_data.title.as_deref(),
            task_data.completed,
        )
        .await?
        .ok_or_else(|| AppError::BadRequest(MSG_TASK_NOT_FOUND.into()))?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Task updated successfully",
        "task": task
    })))
}

/// Deletes an owned task.
#[delete("/{id}")]
pub async fn delete_task(
    tasks: web::Data<TaskStore>,
    task_id: web::Path<Uuid>,
    user: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    let deleted = tasks.delete(task_id.into_inner(), user.0.id).await?;

    if !deleted {
        return Err(AppError::BadRequest(MSG_TASK_NOT_FOUND.into()));
    }

    Ok(HttpResponse::NoContent().finish())
}
