use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::period::PeriodError;

/// Domain failures raised by services; everything else is an internal error
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> anyhow::Error {
        DomainError::Validation(message.into()).into()
    }

    pub fn not_found(what: impl Into<String>) -> anyhow::Error {
        DomainError::NotFound(what.into()).into()
    }
}

/// HTTP status for an error coming out of a service
pub fn status_for(error: &anyhow::Error) -> StatusCode {
    if let Some(domain) = error.downcast_ref::<DomainError>() {
        return match domain {
            DomainError::Validation(_) => StatusCode::BAD_REQUEST,
            DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        };
    }
    if error.downcast_ref::<PeriodError>().is_some() {
        return StatusCode::BAD_REQUEST;
    }
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Map a service error to a status code, logging server-side failures
pub fn to_status(context: &str, error: anyhow::Error) -> StatusCode {
    let status = status_for(&error);
    if status.is_server_error() {
        tracing::error!("{}: {:#}", context, error);
    } else {
        tracing::warn!("{}: {}", context, error);
    }
    status
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&DomainError::validation("bad")),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&DomainError::not_found("Facture")),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&PeriodError::InvalidDateFormat("x".into()).into()),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&anyhow::anyhow!("db down")),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_context_survives_downcast() {
        let err = DomainError::validation("montant").context("registering payment");
        assert_eq!(status_for(&err), StatusCode::BAD_REQUEST);
    }
}
