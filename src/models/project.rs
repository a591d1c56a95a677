use sqlx::FromRow;

use super::{user::User, RecordBase};
use crate::store::{Record, RecordQuery};

#[derive(Debug, Clone, FromRow)]
pub struct Project {
    #[sqlx(flatten)]
    pub base: RecordBase,
    pub name: String,
    pub description: Option<String>,
    // Set by fetches that eager-load the project's members.
    #[sqlx(skip)]
    pub preloaded_users: Option<Vec<User>>,
}

impl Project {
    pub fn new(name: String, description: Option<String>) -> Self {
        Project {
            base: RecordBase::default(),
            name,
            description,
            preloaded_users: None,
        }
    }
}

impl Record for Project {
    const TABLE: &'static str = "projects";
    const ENTITY: &'static str = "project";
    const COLUMNS: &'static [&'static str] = &["name", "description"];

    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn bind_columns<'q>(&'q self, query: RecordQuery<'q, Self>) -> RecordQuery<'q, Self> {
        query.bind(&self.name).bind(&self.description)
    }
}
