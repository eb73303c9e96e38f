use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::ids::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub login: String,
    #[serde(default)]
    pub name: String,
    pub birthday: Option<NaiveDate>,
}

impl NewUser {
    /// A blank display name falls back to the login
    pub fn normalized(mut self) -> Self {
        if self.name.trim().is_empty() {
            self.name = self.login.clone();
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_name_falls_back_to_login() {
        let user = NewUser {
            email: "ann@example.com".to_string(),
            login: "ann".to_string(),
            name: "  ".to_string(),
            birthday: None,
        }
        .normalized();
        assert_eq!(user.name, "ann");
    }
}
