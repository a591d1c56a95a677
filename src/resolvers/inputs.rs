// Typed request structs, built from raw GraphQL arguments once at the schema
// boundary. Resolvers never look at untyped arguments.

use async_graphql::ID;

use super::error::ResolverError;
use crate::models::{project::Project, user::User};

/// Parses an opaque identifier into a record key.
pub fn parse_id(name: &'static str, raw: &ID) -> Result<i64, ResolverError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ResolverError::InvalidArgument {
            name,
            reason: format!("`{}` is not a record id", raw.as_str()),
        }),
    }
}

fn require_non_empty(name: &'static str, value: String) -> Result<String, ResolverError> {
    if value.is_empty() {
        return Err(ResolverError::InvalidArgument {
            name,
            reason: "must not be empty".to_string(),
        });
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl CreateUserInput {
    pub fn new(username: String, email: String, password: String) -> Result<Self, ResolverError> {
        Ok(CreateUserInput {
            username: require_non_empty("username", username)?,
            email: require_non_empty("email", email)?,
            password: require_non_empty("password", password)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateUserInput {
    pub id: i64,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

impl UpdateUserInput {
    pub fn new(
        id: &ID,
        username: Option<String>,
        email: Option<String>,
        password: Option<String>,
    ) -> Result<Self, ResolverError> {
        Ok(UpdateUserInput {
            id: parse_id("user id", id)?,
            username,
            email,
            password,
        })
    }

    // Only fields present in the request overwrite the stored values.
    pub fn apply_to(self, user: &mut User) {
        if let Some(username) = self.username {
            user.username = username;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(password) = self.password {
            user.password = password;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectInput {
    pub name: String,
    pub description: Option<String>,
}

impl CreateProjectInput {
    pub fn new(name: String, description: Option<String>) -> Result<Self, ResolverError> {
        Ok(CreateProjectInput {
            name: require_non_empty("name", name)?,
            description,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProjectInput {
    pub id: i64,
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UpdateProjectInput {
    pub fn new(id: &ID, name: Option<String>, description: Option<String>) -> Result<Self, ResolverError> {
        Ok(UpdateProjectInput {
            id: parse_id("project id", id)?,
            name,
            description,
        })
    }

    pub fn apply_to(self, project: &mut Project) {
        if let Some(name) = self.name {
            project.name = name;
        }
        if let Some(description) = self.description {
            project.description = Some(description);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MembershipInput {
    pub project_id: i64,
    pub user_id: i64,
}

impl MembershipInput {
    pub fn new(project_id: &ID, user_id: &ID) -> Result<Self, ResolverError> {
        Ok(MembershipInput {
            project_id: parse_id("project id", project_id)?,
            user_id: parse_id("user id", user_id)?,
        })
    }
}
