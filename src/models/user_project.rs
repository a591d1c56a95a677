use crate::store::association::Association;

// Join relation between users and projects: (user_id, project_id) plus its own
// timestamps, at most one row per pair.
pub const TABLE: &str = "user_projects";

// Projects a user belongs to.
pub const USER_PROJECTS: Association = Association {
    table: TABLE,
    owner_key: "user_id",
    member_key: "project_id",
};

// Users that belong to a project.
pub const PROJECT_USERS: Association = Association {
    table: TABLE,
    owner_key: "project_id",
    member_key: "user_id",
};
