//! User management DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{Role, UserRecord};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 50, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
    pub role: Role,
}

/// A user as exposed over the API. Password hashes never leave the store.
#[derive(Debug, Serialize, ToSchema)]
pub struct UserDto {
    pub username: String,
    pub role: Role,
}

impl From<UserRecord> for UserDto {
    fn from(record: UserRecord) -> Self {
        Self {
            username: record.username,
            role: record.role,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserDto>,
    pub total: usize,
}
