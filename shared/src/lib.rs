// shared/src/lib.rs

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("namespace binding not found: {0}")]
    BindingNotFound(String),
    #[error("remote {operation} failed: {message}")]
    Remote {
        operation: &'static str,
        message: String,
    },
    #[error("decode error at {context}: {reason}")]
    Decode { context: String, reason: String },
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn remote(operation: &'static str, message: impl Into<String>) -> Self {
        Error::Remote {
            operation,
            message: message.into(),
        }
    }

    pub fn decode(context: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::Decode {
            context: context.into(),
            reason: reason.into(),
        }
    }

    /// Message reported by the backing service, if this is a remote failure
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Error::Remote { message, .. } => Some(message),
            _ => None,
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Error::Remote { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, Error::Decode { .. })
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Error::BindingNotFound(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;

pub mod config;
