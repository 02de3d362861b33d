//! Error types for `visitcard-core`.

use thiserror::Error;

use crate::{fields::Field, record::RecordId};

#[derive(Debug, Error)]
pub enum Error {
  /// The request never produced a usable HTTP response.
  #[error("transport error: {0}")]
  Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

  /// The backend answered, but reported failure (non-2xx or `success: false`).
  #[error("backend rejected request ({status}): {message}")]
  Rejected { status: u16, message: String },

  #[error("could not decode backend response: {0}")]
  Decode(String),

  #[error("invalid backend base URL: {0:?}")]
  InvalidBaseUrl(String),

  #[error("record not found: {0}")]
  NotFound(RecordId),

  #[error("missing required field: {0}")]
  MissingField(Field),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

impl Error {
  /// `true` when the backend was reached and answered with a failure.
  pub fn is_rejection(&self) -> bool { matches!(self, Self::Rejected { .. }) }

  /// The backend-supplied message, if it sent one.
  pub fn backend_message(&self) -> Option<&str> {
    match self {
      Self::Rejected { message, .. } if !message.trim().is_empty() => {
        Some(message)
      }
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
