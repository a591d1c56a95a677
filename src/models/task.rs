use sqlx::FromRow;

use super::RecordBase;
use crate::store::{Record, RecordQuery};

pub const DEFAULT_STATUS: &str = "Todo";
pub const DEFAULT_PRIORITY: &str = "Medium";

// Status and priority are free-form; only their defaults are fixed.
#[derive(Debug, Clone, FromRow)]
pub struct Task {
    #[sqlx(flatten)]
    pub base: RecordBase,
    pub title: String,
    pub description: Option<String>,
    pub status: String,
    pub priority: String,
    pub sprint_id: i64,
    pub assignee_id: i64,
}

impl Task {
    pub fn new(title: String, description: Option<String>, sprint_id: i64, assignee_id: i64) -> Self {
        Task {
            base: RecordBase::default(),
            title,
            description,
            status: DEFAULT_STATUS.to_string(),
            priority: DEFAULT_PRIORITY.to_string(),
            sprint_id,
            assignee_id,
        }
    }
}

impl Record for Task {
    const TABLE: &'static str = "tasks";
    const ENTITY: &'static str = "task";
    const COLUMNS: &'static [&'static str] =
        &["title", "description", "status", "priority", "sprint_id", "assignee_id"];

    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn bind_columns<'q>(&'q self, query: RecordQuery<'q, Self>) -> RecordQuery<'q, Self> {
        query
            .bind(&self.title)
            .bind(&self.description)
            .bind(&self.status)
            .bind(&self.priority)
            .bind(self.sprint_id)
            .bind(self.assignee_id)
    }
}
