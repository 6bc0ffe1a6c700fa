use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("can't download file with code: {0}")]
    Status(u16),

    #[error("can't read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("invalid CIDR {0:?}")]
    InvalidCidr(String),

    #[error("invalid record {record:?}: {reason}")]
    InvalidRecord { record: String, reason: String },
}
