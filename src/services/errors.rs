use pushkind_common::repository::errors::RepositoryError;
use thiserror::Error;
use validator::ValidationErrors;

use crate::forms::products::ProductFormError;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Failures returned by service operations.
///
/// Each variant is a stable error kind; the HTTP layer maps kinds to status codes.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Malformed input such as a non-positive quantity.
    #[error("{0}")]
    Validation(String),
    #[error("{entity} with identity '{identity}' not found")]
    NotFound {
        entity: &'static str,
        identity: String,
    },
    /// The record belongs to another user.
    #[error("{0}")]
    PermissionDenied(String),
    /// Missing role for an administrative operation.
    #[error("Not enough permissions")]
    Unauthorized,
    #[error("Insufficient stock for '{product}'. Requested: {requested}, Available: {available}")]
    OutOfStock {
        product: String,
        requested: i32,
        available: i32,
    },
    #[error("Cart is empty")]
    EmptyCart,
    #[error("{entity} with {field} '{value}' already exists")]
    Duplicate {
        entity: &'static str,
        field: &'static str,
        value: String,
    },
    /// Store or infrastructure failure.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, identity: impl ToString) -> Self {
        ServiceError::NotFound {
            entity,
            identity: identity.to_string(),
        }
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(value: RepositoryError) -> Self {
        match value {
            RepositoryError::NotFound => ServiceError::not_found("Record", "unknown"),
            other => ServiceError::Internal(other.to_string()),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));

        let message = fields
            .iter()
            .find_map(|(name, field)| {
                field.first().map(|error| match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid value for `{name}`"),
                })
            })
            .unwrap_or_else(|| errors.to_string());
        ServiceError::Validation(message)
    }
}

impl From<ProductFormError> for ServiceError {
    fn from(value: ProductFormError) -> Self {
        match value {
            ProductFormError::FileRead(err) => ServiceError::Internal(err.to_string()),
            ProductFormError::Validation(errors) => ServiceError::from(errors),
            other => ServiceError::Validation(other.to_string()),
        }
    }
}
