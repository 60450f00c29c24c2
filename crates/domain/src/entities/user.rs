use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Core User entity - represents the business domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>, // None for new users before persistence
    pub email: String,
    pub login: String,
    pub name: String,
    pub birthday: Option<NaiveDate>,
}

impl User {
    pub fn new(email: String, login: String, name: String, birthday: Option<NaiveDate>) -> Self {
        Self {
            id: None,
            email,
            login,
            name,
            birthday,
        }
    }

    pub fn with_id(
        id: i64,
        email: String,
        login: String,
        name: String,
        birthday: Option<NaiveDate>,
    ) -> Self {
        Self {
            id: Some(id),
            email,
            login,
            name,
            birthday,
        }
    }

    /// Checks scalar fields in the order requests are rejected: email, login, birthday.
    pub fn validate(&self, today: NaiveDate) -> Result<(), crate::DomainError> {
        if self.email.trim().is_empty() || !self.email.contains('@') {
            return Err(crate::DomainError::ValidationError(
                "Email cannot be empty and must contain @".to_string(),
            ));
        }

        if self.login.trim().is_empty() || self.login.chars().any(char::is_whitespace) {
            return Err(crate::DomainError::ValidationError(
                "Login cannot be empty or contain spaces".to_string(),
            ));
        }

        if let Some(birthday) = self.birthday {
            if birthday > today {
                return Err(crate::DomainError::ValidationError(
                    "Birthday cannot be in the future".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// A blank display name falls back to the login.
    pub fn normalized(mut self) -> Self {
        if self.name.trim().is_empty() {
            self.name = self.login.clone();
        }
        self
    }
}
