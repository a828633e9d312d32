use thiserror::Error;

use crate::domain::error::DomainError;

/// Errors that are safe to expose to controllers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CarMarketError {
    #[error("{message}")]
    NotFound { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    Unauthorized { message: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl CarMarketError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self::Internal
    }

    /// Process exit code for command-line controllers.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NotFound { .. } => 3,
            Self::Conflict { .. } => 4,
            Self::Unauthorized { .. } => 5,
            Self::Validation { .. } => 6,
            Self::Internal => 1,
        }
    }
}

impl From<DomainError> for CarMarketError {
    fn from(domain_error: DomainError) -> Self {
        let message = domain_error.to_string();
        use DomainError::*;
        match domain_error {
            CarNotFound { .. } | UserNotFound { .. } => Self::not_found(message),
            DuplicateEmail { .. }
            | CompareFull { .. }
            | AlreadyInComparison { .. }
            | AlreadySubscribed { .. } => Self::conflict(message),
            InvalidCredentials | NotAuthenticated | IncorrectPassword => {
                Self::unauthorized(message)
            }
            InvalidRole { .. } | Validation { .. } => Self::validation(message),
            Storage { .. } => Self::internal(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_errors_map_to_public_categories() {
        let err: CarMarketError = DomainError::car_not_found("42").into();
        assert_eq!(err, CarMarketError::not_found("Car not found: 42"));

        let err: CarMarketError = DomainError::already_in_comparison("1").into();
        assert_eq!(err, CarMarketError::conflict("Car already in comparison"));

        let err: CarMarketError = DomainError::invalid_credentials().into();
        assert!(matches!(err, CarMarketError::Unauthorized { .. }));

        let err: CarMarketError = DomainError::invalid_role("admin").into();
        assert!(matches!(err, CarMarketError::Validation { .. }));

        let err: CarMarketError = DomainError::storage("disk full").into();
        assert_eq!(err, CarMarketError::Internal);
        assert_eq!(err.to_string(), "Internal error");
    }

    #[test]
    fn exit_codes_are_distinct_per_category() {
        let codes = [
            CarMarketError::not_found("x").exit_code(),
            CarMarketError::conflict("x").exit_code(),
            CarMarketError::unauthorized("x").exit_code(),
            CarMarketError::validation("x").exit_code(),
            CarMarketError::internal().exit_code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
