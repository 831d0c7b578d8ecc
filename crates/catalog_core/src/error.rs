use std::fmt;

use thiserror::Error;

/// User inputs that local validation can reject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Price,
    Description,
    Category,
    Images,
    Page,
    PageSize,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Title => write!(f, "title"),
            Field::Price => write!(f, "price"),
            Field::Description => write!(f, "description"),
            Field::Category => write!(f, "category"),
            Field::Images => write!(f, "images"),
            Field::Page => write!(f, "page"),
            Field::PageSize => write!(f, "page size"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct ValidationError {
    pub field: Field,
    pub reason: String,
}

impl ValidationError {
    pub(crate) fn new(field: Field, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The request never completed (connectivity, DNS, timeout).
    #[error("network unreachable: {message}")]
    Transport { message: String },
    /// The service answered with a failure status.
    #[error("{}", service_message(*status, message.as_deref()))]
    Service {
        status: u16,
        message: Option<String>,
    },
    /// The response did not have the expected shape.
    #[error("unexpected response: {message}")]
    Protocol { message: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl CatalogError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn protocol(message: impl Into<String>) -> Self {
        Self::Protocol {
            message: message.into(),
        }
    }
}

fn service_message(status: u16, message: Option<&str>) -> String {
    match message {
        Some(message) => format!("service rejected request ({status}): {message}"),
        None => format!("service rejected request with status {status}"),
    }
}
