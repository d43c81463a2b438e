use thiserror::Error;

/// Failures surfaced by the posts aggregation.
///
/// Status codes are plain `u16` values; mapping to an HTTP response happens in
/// the routes layer.
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Tags parameter is required")]
    MissingTags,

    #[error("sortBy parameter is invalid")]
    InvalidSortField(String),

    #[error("direction parameter is invalid")]
    InvalidDirection(String),

    #[error("{0}")]
    InvalidQuery(String),

    #[error("{message}")]
    Upstream { status: Option<u16>, message: String },
}

impl ProxyError {
    pub fn upstream(status: Option<u16>, message: impl Into<String>) -> Self {
        ProxyError::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn status(&self) -> u16 {
        match self {
            ProxyError::MissingTags
            | ProxyError::InvalidSortField(_)
            | ProxyError::InvalidDirection(_)
            | ProxyError::InvalidQuery(_) => 400,
            ProxyError::Upstream {
                status: Some(status),
                ..
            } if (400..600).contains(status) => *status,
            ProxyError::Upstream { .. } => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        !matches!(self, ProxyError::Upstream { .. })
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;
