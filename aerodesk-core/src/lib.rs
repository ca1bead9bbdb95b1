pub mod city;
pub mod fare;
pub mod passenger;

pub use city::CityName;
pub use fare::FareClass;
pub use passenger::{Gender, Passenger, PassengerDetails, PaymentCard, PaymentDetails};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Internal service error: {0}")]
    InternalError(String),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        CoreError::ValidationError(msg.into())
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
