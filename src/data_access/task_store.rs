use uuid::Uuid;

use crate::{data_access::data_context::DataError, task::Task};

/// Storage operations the task service needs. Each call is one transaction.
pub trait TaskStore {
    fn insert_task(&self, task: &Task) -> Result<(), DataError>;

    fn find_task(&self, id: Uuid) -> Result<Option<Task>, DataError>;

    /// Tasks owned by `user_id`, in the store's natural order.
    fn list_tasks_by_user(&self, user_id: Uuid) -> Result<Vec<Task>, DataError>;

    /// Overwrites the stored record with the same id. Returns false, writing
    /// nothing, when that record is gone.
    fn replace_task(&self, task: &Task) -> Result<bool, DataError>;

    /// Returns false when nothing was stored under `id`.
    fn remove_task(&self, id: Uuid) -> Result<bool, DataError>;
}
