use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Car not found: {id}")]
    CarNotFound { id: String },

    #[error("Email already registered: '{email}'")]
    DuplicateEmail { email: String },

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Not signed in")]
    NotAuthenticated,

    #[error("User not found: {id}")]
    UserNotFound { id: String },

    #[error("Current password is incorrect")]
    IncorrectPassword,

    #[error("Invalid role '{role}': expected buyer or seller")]
    InvalidRole { role: String },

    #[error("You can compare up to {max} cars")]
    CompareFull { max: usize },

    #[error("Car already in comparison")]
    AlreadyInComparison { id: String },

    #[error("Email already subscribed: '{email}'")]
    AlreadySubscribed { email: String },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },
}

impl DomainError {
    pub fn car_not_found(id: impl Into<String>) -> Self {
        Self::CarNotFound { id: id.into() }
    }

    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }

    pub fn invalid_credentials() -> Self {
        Self::InvalidCredentials
    }

    pub fn not_authenticated() -> Self {
        Self::NotAuthenticated
    }

    pub fn user_not_found(id: impl Into<String>) -> Self {
        Self::UserNotFound { id: id.into() }
    }

    pub fn incorrect_password() -> Self {
        Self::IncorrectPassword
    }

    pub fn invalid_role(role: impl Into<String>) -> Self {
        Self::InvalidRole { role: role.into() }
    }

    pub fn compare_full(max: usize) -> Self {
        Self::CompareFull { max }
    }

    pub fn already_in_comparison(id: impl Into<String>) -> Self {
        Self::AlreadyInComparison { id: id.into() }
    }

    pub fn already_subscribed(email: impl Into<String>) -> Self {
        Self::AlreadySubscribed {
            email: email.into(),
        }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }
}
