//! Library loading errors.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to open native library {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: libloading::Error,
    },

    #[error("native library is missing symbol `{symbol}`: {source}")]
    MissingSymbol {
        symbol: String,
        #[source]
        source: libloading::Error,
    },
}
