// src/models/mod.rs

use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub mod user;
pub mod project;
pub mod sprint;
pub mod task;
pub mod user_project;

// Columns shared by every entity table. A row with `deleted_at` set is
// soft-deleted and invisible to the default fetches.
#[derive(Debug, Clone, Default, PartialEq, FromRow)]
pub struct RecordBase {
    pub id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
