//! A filter recomputes from the full list. A sort reorders what is visible.

use std::cmp::Ordering;

use crate::{task::Task, task_priority::TaskPriority, task_status::TaskStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Pending,
    Completed,
}

impl StatusFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Pending => task.status == TaskStatus::Pending,
            StatusFilter::Completed => task.status == TaskStatus::Completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Priority,
    Deadline,
}

#[derive(Debug, Clone, Default)]
pub struct TaskView {
    tasks: Vec<Task>,
    visible: Vec<Task>,
    filter: StatusFilter,
    sort: Option<SortKey>,
}

impl TaskView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the full list after a fetch and rebuilds the visible list
    /// with the current filter, then the current sort.
    pub fn replace_tasks(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
        self.visible = filter_tasks(&self.tasks, self.filter);
        if let Some(key) = self.sort {
            sort_tasks(&mut self.visible, key);
        }
    }

    pub fn apply_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
        self.visible = filter_tasks(&self.tasks, filter);
    }

    pub fn apply_sort(&mut self, key: SortKey) {
        sort_tasks(&mut self.visible, key);
        self.sort = Some(key);
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn visible(&self) -> &[Task] {
        &self.visible
    }

    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    pub fn sort(&self) -> Option<SortKey> {
        self.sort
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

pub fn filter_tasks(tasks: &[Task], filter: StatusFilter) -> Vec<Task> {
    tasks.iter().filter(|t| filter.matches(t)).cloned().collect()
}

/// `sort_by` is stable, so tasks that compare equal keep their order.
pub fn sort_tasks(tasks: &mut [Task], key: SortKey) {
    match key {
        SortKey::Priority => tasks.sort_by(compare_priority),
        SortKey::Deadline => tasks.sort_by(compare_deadline),
    }
}

/// `high` sorts first. Any two other priorities compare equal.
pub fn compare_priority(a: &Task, b: &Task) -> Ordering {
    match (a.priority == TaskPriority::High, b.priority == TaskPriority::High) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => Ordering::Equal,
    }
}

pub fn compare_deadline(a: &Task, b: &Task) -> Ordering {
    a.deadline.cmp(&b.deadline)
}
