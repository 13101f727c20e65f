use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};

use crate::{
    ack_response::AckResponse, app_state::SharedState, services::task_service::TaskService,
    task_error::TaskError, task_request::TaskRequest, task_response::TaskResponse,
    tasks_response::TasksResponse, user::User, validation_error::ValidationError,
};

pub struct TaskController {}

impl TaskController {
    pub async fn get_all(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
    ) -> Result<Json<TasksResponse>, TaskError> {
        let tasks = TaskService::new(&state.data_context).list(user.id)?;
        Ok(Json(TasksResponse::new(tasks, "Tasks found successfully..")))
    }

    pub async fn get(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        Path(task_id): Path<String>,
    ) -> Result<Json<TaskResponse>, TaskError> {
        let task = TaskService::new(&state.data_context).get(user.id, &task_id)?;
        Ok(Json(TaskResponse::new(task, "Task found successfully..")))
    }

    pub async fn add(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        payload: Result<Json<TaskRequest>, JsonRejection>,
    ) -> Result<Json<TaskResponse>, TaskError> {
        let request = payload_or_invalid(payload)?;
        let task = TaskService::new(&state.data_context).create(user.id, &request)?;
        Ok(Json(TaskResponse::new(task, "Task created successfully..")))
    }

    pub async fn edit(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        Path(task_id): Path<String>,
        payload: Result<Json<TaskRequest>, JsonRejection>,
    ) -> Result<Json<TaskResponse>, TaskError> {
        let request = payload_or_invalid(payload)?;
        let task = TaskService::new(&state.data_context).update(user.id, &task_id, &request)?;
        Ok(Json(TaskResponse::new(task, "Task updated successfully..")))
    }

    pub async fn delete(
        State(state): State<SharedState>,
        Extension(user): Extension<User>,
        Path(task_id): Path<String>,
    ) -> Result<Json<AckResponse>, TaskError> {
        TaskService::new(&state.data_context).delete(user.id, &task_id)?;
        Ok(Json(AckResponse::success("Task deleted successfully..")))
    }
}

// An unreadable body is a field failure, so it is reported before the id.
fn payload_or_invalid(
    payload: Result<Json<TaskRequest>, JsonRejection>,
) -> Result<TaskRequest, TaskError> {
    match payload {
        Ok(Json(request)) => Ok(request),
        Err(rejection) => Err(ValidationError::single("body", rejection.body_text()).into()),
    }
}
