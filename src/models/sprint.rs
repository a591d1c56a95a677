use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::RecordBase;
use crate::store::{Record, RecordQuery};

#[derive(Debug, Clone, FromRow)]
pub struct Sprint {
    #[sqlx(flatten)]
    pub base: RecordBase,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub project_id: i64,
}

impl Sprint {
    pub fn new(name: String, start_date: DateTime<Utc>, end_date: DateTime<Utc>, project_id: i64) -> Self {
        Sprint {
            base: RecordBase::default(),
            name,
            start_date,
            end_date,
            project_id,
        }
    }
}

impl Record for Sprint {
    const TABLE: &'static str = "sprints";
    const ENTITY: &'static str = "sprint";
    const COLUMNS: &'static [&'static str] = &["name", "start_date", "end_date", "project_id"];

    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn bind_columns<'q>(&'q self, query: RecordQuery<'q, Self>) -> RecordQuery<'q, Self> {
        query
            .bind(&self.name)
            .bind(self.start_date)
            .bind(self.end_date)
            .bind(self.project_id)
    }
}
