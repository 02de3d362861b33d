//! Error types for the visitcard-vcard generator.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("record {0} has no name; a vCard requires FN")]
  MissingName(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
