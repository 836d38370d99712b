//! Creator entity: the minimal identity that owns short links.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Permission level of a creator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Admin => "admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role '{other}'")),
        }
    }
}

/// An identity that can own links.
///
/// Carries only what ownership and access checks need; accounts are managed
/// through the admin CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct Creator {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl Creator {
    pub fn new(id: i64, email: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            email: email.into(),
            name: name.into(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Input data for registering a creator.
#[derive(Debug, Clone)]
pub struct NewCreator {
    pub email: String,
    pub name: String,
    pub role: Role,
}

/// A creator row as listed by the admin CLI.
#[derive(Debug, Clone)]
pub struct CreatorRecord {
    pub creator: Creator,
    pub created_at: DateTime<Utc>,
}
