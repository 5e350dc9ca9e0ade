use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid renewal token")]
    InvalidRenewalToken,

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Caused by what the client presented, as opposed to a server fault.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            AppError::InvalidCredentials | AppError::InvalidRenewalToken | AppError::InvalidInput(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
