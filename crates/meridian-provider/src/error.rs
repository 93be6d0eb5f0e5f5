use meridian_client::ApiError;
use meridian_dynamic::FieldError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("unknown resource type `{0}`")]
    UnknownResourceType(String),

    #[error("{type_name} `{id}` not found")]
    NotFound { type_name: String, id: String },

    #[error("resource has no id; it was never created or has been cleared")]
    MissingId,

    #[error("missing required attribute `{0}`")]
    MissingAttribute(String),

    #[error("invalid configuration: {0}")]
    Validation(String),

    #[error("attribute `{attribute}` cannot be changed in place; the resource must be replaced")]
    RequiresReplacement { attribute: &'static str },

    #[error("api error: {0}")]
    Api(#[from] ApiError),

    #[error("settings error: {0}")]
    Field(#[from] FieldError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ProviderError {
    /// Prepend resource identity to validation-class errors; transport
    /// errors already carry their own context.
    pub fn with_resource(self, type_name: &str, name: &str) -> Self {
        match self {
            Self::Validation(msg) => Self::Validation(format!("{type_name} ({name}): {msg}")),
            other => other,
        }
    }

    /// Whether the underlying cause is "the remote resource is gone".
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Api(api) => api.is_not_found(),
            _ => false,
        }
    }
}
