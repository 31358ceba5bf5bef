use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeployError {
    #[error("invalid domain name {domain:?}: {reason}")]
    InvalidDomain { domain: String, reason: &'static str },
    #[error("invalid stack name {name:?}: must be non-empty ASCII letters, digits or '-'")]
    InvalidStackName { name: String },
    #[error("region must not be empty")]
    EmptyRegion,
    #[error("site directory {} does not exist", path.display())]
    MissingSiteDir { path: PathBuf },
    #[error("site directory {} has no index.html", path.display())]
    MissingIndex { path: PathBuf },
    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to walk site directory: {0}")]
    Walk(#[from] ignore::Error),
    #[error("failed to write manifest to {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("failed to encode manifest: {0}")]
    Encode(#[from] serde_json::Error),
}
