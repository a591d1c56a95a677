use sqlx::FromRow;

use super::{project::Project, RecordBase};
use crate::store::{Record, RecordQuery};

#[derive(Debug, Clone, FromRow)]
pub struct User {
    #[sqlx(flatten)]
    pub base: RecordBase,
    pub username: String,
    pub email: String,
    // Stored as given; hashing is not part of this service.
    pub password: String,
    // Set by fetches that eager-load the user's projects.
    #[sqlx(skip)]
    pub preloaded_projects: Option<Vec<Project>>,
}

impl User {
    pub fn new(username: String, email: String, password: String) -> Self {
        User {
            base: RecordBase::default(),
            username,
            email,
            password,
            preloaded_projects: None,
        }
    }
}

impl Record for User {
    const TABLE: &'static str = "users";
    const ENTITY: &'static str = "user";
    const COLUMNS: &'static [&'static str] = &["username", "email", "password"];

    fn base(&self) -> &RecordBase {
        &self.base
    }

    fn bind_columns<'q>(&'q self, query: RecordQuery<'q, Self>) -> RecordQuery<'q, Self> {
        query
            .bind(&self.username)
            .bind(&self.email)
            .bind(&self.password)
    }
}
