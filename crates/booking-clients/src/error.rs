use thiserror::Error;

/// Failure of a remote call, split by how the caller should react.
///
/// A well-formed "not found" response is never an error: the client methods
/// return `Ok(None)` for those. Everything here means the call itself did
/// not produce a usable answer.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Transport failure, timeout, or 5xx: the dependency is down or
    /// misbehaving. Retryable; must not be read as "entity missing".
    #[error("{service} service unavailable: {detail}")]
    Unavailable {
        service: &'static str,
        detail: String,
    },

    /// The service answered, but not in the agreed contract.
    #[error("{service} service returned unexpected response ({status}): {detail}")]
    Protocol {
        service: &'static str,
        status: u16,
        detail: String,
    },
}

impl ClientError {
    pub fn unavailable(service: &'static str, err: impl std::fmt::Display) -> Self {
        Self::Unavailable {
            service,
            detail: err.to_string(),
        }
    }

    pub fn protocol(service: &'static str, status: u16, detail: impl Into<String>) -> Self {
        Self::Protocol {
            service,
            status,
            detail: detail.into(),
        }
    }

    pub fn service(&self) -> &'static str {
        match self {
            Self::Unavailable { service, .. } => service,
            Self::Protocol { service, .. } => service,
        }
    }
}
