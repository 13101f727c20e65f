use uuid::Uuid;

use crate::{
    data_access::task_store::TaskStore,
    task::Task,
    task_error::{TaskAction, TaskError},
    task_request::TaskRequest,
    validation::{parse_task_id, validate_task_request},
};

pub struct TaskService<'a, S: TaskStore> {
    store: &'a S,
}

impl<'a, S: TaskStore> TaskService<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn list(&self, caller: Uuid) -> Result<Vec<Task>, TaskError> {
        Ok(self.store.list_tasks_by_user(caller)?)
    }

    /// A task owned by someone else is reported as missing.
    pub fn get(&self, caller: Uuid, raw_id: &str) -> Result<Task, TaskError> {
        let id = parse_task_id(raw_id)?;
        self.store
            .find_task(id)?
            .filter(|task| task.is_owned_by(caller))
            .ok_or(TaskError::NoTask)
    }

    pub fn create(&self, caller: Uuid, request: &TaskRequest) -> Result<Task, TaskError> {
        let fields = validate_task_request(request)?;
        let task = Task::new(caller, fields);
        self.store.insert_task(&task)?;
        tracing::debug!(task_id = %task.id, user_id = %caller, "task created");
        Ok(task)
    }

    /// Checks run in order: fields, id format, existence, ownership.
    pub fn update(
        &self,
        caller: Uuid,
        raw_id: &str,
        request: &TaskRequest,
    ) -> Result<Task, TaskError> {
        let fields = validate_task_request(request)?;
        let id = parse_task_id(raw_id)?;
        let mut task = self.owned_task(caller, id, TaskAction::Update)?;

        task.replace_fields(fields);
        if !self.store.replace_task(&task)? {
            return Err(TaskError::NotFound);
        }
        tracing::debug!(task_id = %task.id, user_id = %caller, "task updated");
        Ok(task)
    }

    pub fn delete(&self, caller: Uuid, raw_id: &str) -> Result<(), TaskError> {
        let id = parse_task_id(raw_id)?;
        self.owned_task(caller, id, TaskAction::Delete)?;

        if !self.store.remove_task(id)? {
            return Err(TaskError::NotFound);
        }
        tracing::debug!(task_id = %id, user_id = %caller, "task deleted");
        Ok(())
    }

    fn owned_task(&self, caller: Uuid, id: Uuid, action: TaskAction) -> Result<Task, TaskError> {
        let task = self.store.find_task(id)?.ok_or(TaskError::NotFound)?;
        if !task.is_owned_by(caller) {
            return Err(TaskError::Forbidden { action });
        }
        Ok(task)
    }
}
