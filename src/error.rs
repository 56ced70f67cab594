use std::io;
use thiserror::Error;

/// Errors that abort a run. Failures of individual lookups are not errors, they end up in the
/// report as `LookupOutcome::Failed`.
#[derive(Debug, Error)]
pub enum CheckError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("xlsx: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("invalid glob pattern: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("resolver: {0}")]
    Resolve(#[from] trust_dns_resolver::error::ResolveError),

    #[error(transparent)]
    ParseInt(#[from] std::num::ParseIntError),

    #[error("unable to set up logging: {0}")]
    Logging(String),

    #[error("{0}")]
    Input(String),
}

impl From<String> for CheckError {
    fn from(err: String) -> Self {
        CheckError::Input(err)
    }
}
