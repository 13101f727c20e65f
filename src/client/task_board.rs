//! Every mutation refreshes the list before returning.

use thiserror::Error;
use uuid::Uuid;

use crate::{
    task::Task,
    task_api::{ApiClientError, TaskApi},
    task_form::{TaskForm, TaskFormMode},
    task_view::{SortKey, StatusFilter, TaskView},
    validation_error::ValidationError,
};

#[derive(Debug, Error)]
pub enum BoardError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Api(#[from] ApiClientError),
}

pub struct TaskBoard<A: TaskApi> {
    api: A,
    view: TaskView,
    loading: bool,
}

impl<A: TaskApi> TaskBoard<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            view: TaskView::new(),
            loading: false,
        }
    }

    pub fn view(&self) -> &TaskView {
        &self.view
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn select_filter(&mut self, filter: StatusFilter) {
        self.view.apply_filter(filter);
    }

    pub fn select_sort(&mut self, key: SortKey) {
        self.view.apply_sort(key);
    }

    pub async fn refresh(&mut self) -> Result<(), ApiClientError> {
        self.loading = true;
        let fetched = self.api.list_tasks().await;
        self.loading = false;
        self.view.replace_tasks(fetched?);
        Ok(())
    }

    /// Fetches one task and returns an edit form filled from it.
    pub async fn open_for_edit(&mut self, id: Uuid) -> Result<TaskForm, ApiClientError> {
        self.loading = true;
        let fetched = self.api.get_task(id).await;
        self.loading = false;
        Ok(TaskForm::from_task(&fetched?))
    }

    pub async fn submit(&mut self, mode: TaskFormMode, form: &TaskForm) -> Result<Task, BoardError> {
        match mode {
            TaskFormMode::Add => self.add(form).await,
            TaskFormMode::Edit(id) => self.edit(id, form).await,
        }
    }

    pub async fn add(&mut self, form: &TaskForm) -> Result<Task, BoardError> {
        form.validate()?;
        self.loading = true;
        let created = self.api.create_task(&form.to_request()).await;
        self.loading = false;
        let created = created?;
        self.refresh().await?;
        Ok(created)
    }

    pub async fn edit(&mut self, id: Uuid, form: &TaskForm) -> Result<Task, BoardError> {
        form.validate()?;
        self.loading = true;
        let updated = self.api.update_task(id, &form.to_request()).await;
        self.loading = false;
        let updated = updated?;
        self.refresh().await?;
        Ok(updated)
    }

    pub async fn remove(&mut self, id: Uuid) -> Result<(), BoardError> {
        self.loading = true;
        let deleted = self.api.delete_task(id).await;
        self.loading = false;
        deleted?;
        self.refresh().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        task_fields::TaskFields, task_request::TaskRequest, task_status::TaskStatus,
        validation::validate_task_request,
    };
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Mutex,
    };

    /// Server stand-in that keeps tasks in memory and counts list fetches.
    #[derive(Default)]
    struct FakeApi {
        tasks: Mutex<Vec<Task>>,
        list_calls: AtomicUsize,
        write_calls: AtomicUsize,
    }

    impl FakeApi {
        fn rejected(msg: &str) -> ApiClientError {
            ApiClientError::Rejected {
                status: 400,
                msg: msg.into(),
                errors: Vec::new(),
            }
        }

        fn fields(request: &TaskRequest) -> Result<TaskFields, ApiClientError> {
            validate_task_request(request).map_err(|e| FakeApi::rejected(&e.to_string()))
        }
    }

    impl TaskApi for FakeApi {
        async fn list_tasks(&self) -> Result<Vec<Task>, ApiClientError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.tasks.lock().unwrap().clone())
        }

        async fn get_task(&self, id: Uuid) -> Result<Task, ApiClientError> {
            self.tasks
                .lock()
                .unwrap()
                .iter()
                .find(|t| t.id == id)
                .cloned()
                .ok_or_else(|| FakeApi::rejected("No task found.."))
        }

        async fn create_task(&self, request: &TaskRequest) -> Result<Task, ApiClientError> {
            self.write_calls.fetch_add(1, Ordering::SeqCst);
            let task = Task::new(Uuid::nil(), FakeApi::fields(request)?);
            self.tasks.lock().unwrap().push(task.clone());
            Ok(task)
        }

        async fn update_task(&self, id: Uuid, request: &TaskRequest) -> Result<Task, ApiClientError> {
            self.write_calls.fetch_add(1, Ordering::SeqCst);
            let fields = FakeApi::fields(request)?;
            let mut tasks = self.tasks.lock().unwrap();
            let task = tasks
                .iter_mut()
                .find(|t| t.id == id)
                .ok_or_else(|| FakeApi::rejected("Task with given id not found"))?;
            task.replace_fields(fields);
            Ok(task.clone())
        }

        async fn delete_task(&self, id: Uuid) -> Result<(), ApiClientError> {
            self.write_calls.fetch_add(1, Ordering::SeqCst);
            let mut tasks = self.tasks.lock().unwrap();
            let before = tasks.len();
            tasks.retain(|t| t.id != id);
            if tasks.len() == before {
                return Err(FakeApi::rejected("Task with given id not found"));
            }
            Ok(())
        }
    }

    fn form(title: &str, priority: &str, deadline: &str) -> TaskForm {
        TaskForm {
            title: title.into(),
            description: format!("{title} details"),
            priority: priority.into(),
            deadline: deadline.into(),
            ..TaskForm::default()
        }
    }

    #[tokio::test]
    async fn add_returns_after_the_list_is_refreshed() {
        let mut board = TaskBoard::new(FakeApi::default());

        let created = board.add(&form("Call mom", "high", "2024-05-01")).await.unwrap();

        assert_eq!(board.api().list_calls.load(Ordering::SeqCst), 1);
        assert_eq!(board.view().visible().len(), 1);
        assert_eq!(board.view().visible()[0].id, created.id);
        assert!(!board.is_loading());
    }

    #[tokio::test]
    async fn invalid_form_sends_nothing() {
        let mut board = TaskBoard::new(FakeApi::default());

        let result = board.add(&form("", "high", "2024-05-01")).await;

        match result {
            Err(BoardError::Invalid(error)) => assert!(error.has_field("title")),
            other => panic!("expected a validation error, got {other:?}"),
        }
        assert_eq!(board.api().write_calls.load(Ordering::SeqCst), 0);
        assert_eq!(board.api().list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn edit_and_remove_refresh_the_view() {
        let mut board = TaskBoard::new(FakeApi::default());
        let task = board.add(&form("Draft", "low", "2024-03-15")).await.unwrap();

        let mut edit = board.open_for_edit(task.id).await.unwrap();
        edit.title = "Final".into();
        edit.status = "completed".into();
        board.submit(TaskFormMode::Edit(task.id), &edit).await.unwrap();

        assert_eq!(board.view().tasks()[0].title, "Final");
        assert_eq!(board.view().tasks()[0].status, TaskStatus::Completed);

        board.remove(task.id).await.unwrap();
        assert!(board.view().tasks().is_empty());
        assert_eq!(board.api().list_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn rejected_mutation_skips_the_refresh() {
        let mut board = TaskBoard::new(FakeApi::default());

        let result = board.remove(Uuid::new_v4()).await;

        assert!(matches!(result, Err(BoardError::Api(ApiClientError::Rejected { status: 400, .. }))));
        assert_eq!(board.api().list_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn refresh_keeps_the_selected_filter() {
        let mut board = TaskBoard::new(FakeApi::default());
        board.add(&form("open", "low", "2024-02-01")).await.unwrap();
        let mut done = form("done", "low", "2024-01-01");
        done.status = "completed".into();
        board.add(&done).await.unwrap();

        board.select_filter(StatusFilter::Completed);
        assert_eq!(board.view().visible().len(), 1);

        board.add(&form("another open", "high", "2024-03-01")).await.unwrap();
        assert_eq!(board.view().visible().len(), 1);
        assert_eq!(board.view().visible()[0].title, "done");
        assert_eq!(board.view().tasks().len(), 3);
    }
}
