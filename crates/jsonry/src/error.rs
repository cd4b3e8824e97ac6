use thiserror::Error;

use std::io;

#[derive(Debug, Error)]
pub enum Error {
    /// The sink rejected a write.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[cfg(feature = "json")]
    #[error("serde_json error: {0}")]
    SerdeJson(#[from] serde_json::Error),

    /// The writer call sequence broke the begin/end nesting protocol.
    #[error("structural error: {0}")]
    Structural(String),

    /// An override marker named an encoder that could not be produced.
    #[error("cannot resolve encoder for `{type_name}`: {message}")]
    Resolution {
        type_name: &'static str,
        message: String,
    },

    /// A bean accessor failed or could not be invoked on the value.
    #[error("accessor `{property}` of `{type_name}` failed: {message}")]
    Access {
        type_name: &'static str,
        property: &'static str,
        message: String,
    },

    /// An encoder was handed a value whose shape it does not understand.
    #[error("encoder `{encoder}` cannot encode a value of type `{type_name}`")]
    Unsupported {
        encoder: &'static str,
        type_name: &'static str,
    },

    #[error("{0}")]
    Message(String),
}

impl Error {
    pub(crate) fn structural(message: impl Into<String>) -> Self {
        Error::Structural(message.into())
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, Error::Structural(_))
    }
}

pub type Result<T> = core::result::Result<T, Error>;
