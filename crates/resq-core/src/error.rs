//! Error types for `resq-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid record {id:?}: {reason}")]
  InvalidRecord { id: String, reason: String },

  #[error("unknown sector type: {0:?}")]
  UnknownSector(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
