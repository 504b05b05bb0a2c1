//! The signed-in user profile. Read-only for the lifetime of the session;
//! values come from the `[profile]` config section.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    User,
}

impl UserRole {
    pub fn display_name(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub avatar: String,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            id: "u1".to_string(),
            name: "Alex Rivera".to_string(),
            email: "alex@lensbase.com".to_string(),
            role: UserRole::Admin,
            avatar: "https://api.dicebear.com/7.x/avataaars/svg?seed=Alex".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_serializes_uppercase() {
        let json = serde_json::to_string(&UserRole::Admin).unwrap();
        assert_eq!(json, "\"ADMIN\"");
    }
}
