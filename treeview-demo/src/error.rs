//! Demo error type.

use std::path::PathBuf;

use thiserror::Error;
use treeview::TreeError;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid tree document '{path}': {source}", path = .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid tree: {0}")]
    Tree(#[from] TreeError),
    #[error("logger setup failed: {0}")]
    Logger(#[from] log::SetLoggerError),
    #[error("no cache directory available for the log file")]
    NoLogDir,
}
