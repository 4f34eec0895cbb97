use serde::{Deserialize, Serialize};

/// User role. Two-valued by design: admins manage users and see the
/// dashboard, salespersons only record sales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub enum Role {
    Admin,
    Salesperson,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::Salesperson => "Salesperson",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the user record store.
///
/// `password_hash` normally holds a bcrypt string; before migration has run
/// it may still hold legacy plaintext.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(rename = "Username")]
    pub username: String,
    #[serde(rename = "Password")]
    pub password_hash: String,
    #[serde(rename = "Role")]
    pub role: Role,
}

/// Exact-match lookup, case-sensitive, first match wins.
///
/// Duplicates are a data-integrity violation prevented at insertion time;
/// the lookup does not try to detect them.
pub fn find_user<'a>(records: &'a [UserRecord], username: &str) -> Option<&'a UserRecord> {
    records.iter().find(|r| r.username == username)
}
