use redb::{Database, ReadableTable, TableDefinition};
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
#[cfg(feature = "profile")]
use std::time::Instant;
use thiserror::Error;
use uuid::Uuid;

use crate::{data_access::task_store::TaskStore, task::Task, user::User};

const USERS_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("users");
const EMAIL_INDEX: TableDefinition<&str, &[u8]> = TableDefinition::new("email_index");
const TASKS_TABLE: TableDefinition<&[u8], &[u8]> = TableDefinition::new("tasks");

#[derive(Clone)]
pub struct DataContext {
    db: Arc<Database>,
}

impl DataContext {
    /// Open (or create) the database file and make sure every table exists.
    pub fn new(path: &str) -> Result<Self, DataError> {
        let db = Database::create(path)?;
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(USERS_TABLE)?;
            let _ = write_txn.open_table(EMAIL_INDEX)?;
            let _ = write_txn.open_table(TASKS_TABLE)?;
        }
        write_txn.commit()?;
        tracing::info!(path, "opened task database");
        Ok(DataContext { db: Arc::new(db) })
    }

    // USERS

    /// Returns false, writing nothing, when the email is already registered.
    pub fn create_user(&self, user: &User) -> Result<bool, DataError> {
        let write_txn = self.db.begin_write()?;
        {
            let mut email_index = write_txn.open_table(EMAIL_INDEX)?;
            if email_index.get(user.email.as_str())?.is_some() {
                return Ok(false);
            }
            let mut users_table = write_txn.open_table(USERS_TABLE)?;
            let user_bytes = encode(user)?;
            let id_bytes = user.id.as_bytes();
            users_table.insert(id_bytes.as_slice(), user_bytes.as_slice())?;
            email_index.insert(user.email.as_str(), id_bytes.as_slice())?;
        }
        write_txn.commit()?;
        Ok(true)
    }

    pub fn get_user(&self, id: Uuid) -> Result<Option<User>, DataError> {
        let read_txn = self.db.begin_read()?;
        let users_table = read_txn.open_table(USERS_TABLE)?;
        let id_bytes = id.as_bytes();
        match users_table.get(id_bytes.as_slice())? {
            Some(data) => Ok(Some(decode(data.value())?)),
            None => Ok(None),
        }
    }

    pub fn get_user_by_email(&self, email: &str) -> Result<Option<User>, DataError> {
        let read_txn = self.db.begin_read()?;
        let email_index = read_txn.open_table(EMAIL_INDEX)?;

        match email_index.get(email)? {
            Some(id_data) => {
                let users_table = read_txn.open_table(USERS_TABLE)?;
                match users_table.get(id_data.value())? {
                    Some(user_data) => Ok(Some(decode(user_data.value())?)),
                    None => Ok(None),
                }
            }
            None => Ok(None),
        }
    }
}

impl TaskStore for DataContext {
    fn insert_task(&self, task: &Task) -> Result<(), DataError> {
        self.write_task(task, false).map(|_| ())
    }

    fn find_task(&self, id: Uuid) -> Result<Option<Task>, DataError> {
        let read_txn = self.db.begin_read()?;
        let tasks_table = read_txn.open_table(TASKS_TABLE)?;

        let id_bytes = id.as_bytes();
        match tasks_table.get(id_bytes.as_slice())? {
            Some(data) => Ok(Some(decode(data.value())?)),
            None => Ok(None),
        }
    }

    fn list_tasks_by_user(&self, user_id: Uuid) -> Result<Vec<Task>, DataError> {
        #[cfg(feature = "profile")]
        let scan_start = Instant::now();
        let read_txn = self.db.begin_read()?;
        let tasks_table = read_txn.open_table(TASKS_TABLE)?;

        let mut tasks = Vec::new();
        for entry in tasks_table.iter()? {
            let (_, value) = entry?;
            let task: Task = decode(value.value())?;
            if task.is_owned_by(user_id) {
                tasks.push(task);
            }
        }
        #[cfg(feature = "profile")]
        tracing::debug!(elapsed_us = scan_start.elapsed().as_micros() as u64, found = tasks.len(), "scanned tasks table");
        Ok(tasks)
    }

    fn replace_task(&self, task: &Task) -> Result<bool, DataError> {
        self.write_task(task, true)
    }

    fn remove_task(&self, id: Uuid) -> Result<bool, DataError> {
        let write_txn = self.db.begin_write()?;
        let deleted;
        {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            let id_bytes = id.as_bytes();
            let result = tasks_table.remove(id_bytes.as_slice())?;
            deleted = result.is_some();
        }
        write_txn.commit()?;
        Ok(deleted)
    }
}

impl DataContext {
    // With `existing_only`, the existence check and the write share one
    // transaction, so a delete committed in between cannot be undone.
    fn write_task(&self, task: &Task, existing_only: bool) -> Result<bool, DataError> {
        #[cfg(feature = "profile")]
        let write_start = Instant::now();
        let write_txn = self.db.begin_write()?;
        {
            let mut tasks_table = write_txn.open_table(TASKS_TABLE)?;
            let id_bytes = task.id.as_bytes();
            if existing_only && tasks_table.get(id_bytes.as_slice())?.is_none() {
                return Ok(false);
            }
            let task_bytes = encode(task)?;
            tasks_table.insert(id_bytes.as_slice(), task_bytes.as_slice())?;
        }
        write_txn.commit()?;
        #[cfg(feature = "profile")]
        tracing::debug!(elapsed_us = write_start.elapsed().as_micros() as u64, "committed task write");
        Ok(true)
    }
}

fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, DataError> {
    postcard::to_allocvec(value).map_err(|e| DataError::Encode(e.to_string()))
}

fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, DataError> {
    postcard::from_bytes(bytes).map_err(|e| DataError::Decode(e.to_string()))
}

// ── Errors ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum DataError {
    #[error("redb: {0}")]
    Redb(String),
    #[error("decode: {0}")]
    Decode(String),
    #[error("encode: {0}")]
    Encode(String),
}

// redb 2.x has many error types. Blanket them all into DataError::Redb.
macro_rules! from_redb {
    ($($t:ty),*) => {
        $(impl From<$t> for DataError {
            fn from(e: $t) -> Self { DataError::Redb(e.to_string()) }
        })*
    };
}

from_redb!(
    redb::Error,
    redb::DatabaseError,
    redb::TableError,
    redb::TransactionError,
    redb::StorageError,
    redb::CommitError
);

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{task_fields::TaskFields, task_priority::TaskPriority, task_status::TaskStatus};
    use chrono::NaiveDate;
    use std::fs;

    /// Create a temp database that the test cleans up.
    fn temp_context(name: &str) -> (DataContext, String) {
        let path = format!("/tmp/task_manager_test_{name}_{}.redb", std::process::id());
        let _ = fs::remove_file(&path);
        let ctx = DataContext::new(&path).unwrap();
        (ctx, path)
    }

    fn cleanup(path: &str) {
        let _ = fs::remove_file(path);
    }

    fn task_for(owner: Uuid, title: &str) -> Task {
        Task::new(
            owner,
            TaskFields {
                title: title.into(),
                description: "details".into(),
                priority: TaskPriority::Low,
                deadline: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
                status: TaskStatus::Pending,
            },
        )
    }

    #[test]
    fn task_round_trip() {
        let (ctx, path) = temp_context("task_round_trip");
        let task = task_for(Uuid::new_v4(), "Stored");

        ctx.insert_task(&task).unwrap();
        let loaded = ctx.find_task(task.id).unwrap().unwrap();
        assert_eq!(loaded, task);

        assert!(ctx.find_task(Uuid::new_v4()).unwrap().is_none());

        cleanup(&path);
    }

    #[test]
    fn list_only_returns_owned_tasks() {
        let (ctx, path) = temp_context("list_owned");
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();

        ctx.insert_task(&task_for(alice, "a1")).unwrap();
        ctx.insert_task(&task_for(alice, "a2")).unwrap();
        ctx.insert_task(&task_for(bob, "b1")).unwrap();

        let mut titles: Vec<String> = ctx
            .list_tasks_by_user(alice)
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        titles.sort();
        assert_eq!(titles, ["a1", "a2"]);
        assert_eq!(ctx.list_tasks_by_user(bob).unwrap().len(), 1);
        assert!(ctx.list_tasks_by_user(Uuid::new_v4()).unwrap().is_empty());

        cleanup(&path);
    }

    #[test]
    fn replace_and_remove() {
        let (ctx, path) = temp_context("replace_remove");
        let mut task = task_for(Uuid::new_v4(), "Draft");
        ctx.insert_task(&task).unwrap();

        task.title = "Final".into();
        task.status = TaskStatus::Completed;
        assert!(ctx.replace_task(&task).unwrap());
        let loaded = ctx.find_task(task.id).unwrap().unwrap();
        assert_eq!(loaded.title, "Final");
        assert_eq!(loaded.status, TaskStatus::Completed);

        assert!(ctx.remove_task(task.id).unwrap());
        assert!(!ctx.remove_task(task.id).unwrap());
        assert!(ctx.find_task(task.id).unwrap().is_none());

        cleanup(&path);
    }

    #[test]
    fn replace_does_not_bring_back_a_removed_task() {
        let (ctx, path) = temp_context("replace_removed");
        let mut task = task_for(Uuid::new_v4(), "Gone");
        ctx.insert_task(&task).unwrap();
        assert!(ctx.remove_task(task.id).unwrap());

        task.title = "Edited".into();
        assert!(!ctx.replace_task(&task).unwrap());
        assert!(ctx.find_task(task.id).unwrap().is_none());

        cleanup(&path);
    }

    #[test]
    fn reopen_keeps_data() {
        let (ctx, path) = temp_context("reopen");
        let task = task_for(Uuid::new_v4(), "Durable");
        ctx.insert_task(&task).unwrap();
        drop(ctx);

        let ctx = DataContext::new(&path).unwrap();
        assert_eq!(ctx.find_task(task.id).unwrap().unwrap().title, "Durable");

        cleanup(&path);
    }

    #[test]
    fn users_are_unique_by_email() {
        let (ctx, path) = temp_context("users");
        let user = User::new("Ada", "ada@example.com", "pw").unwrap();

        assert!(ctx.create_user(&user).unwrap());
        let twin = User::new("Other Ada", "ada@example.com", "pw2").unwrap();
        assert!(!ctx.create_user(&twin).unwrap());

        let by_email = ctx.get_user_by_email("ada@example.com").unwrap().unwrap();
        assert_eq!(by_email.id, user.id);
        assert_eq!(by_email.name, "Ada");
        assert!(ctx.get_user(twin.id).unwrap().is_none());
        assert!(ctx.get_user_by_email("nobody@example.com").unwrap().is_none());

        cleanup(&path);
    }
}
