use std::path::PathBuf;

use thiserror::Error;

/// File names the catalog expects in its data directory.
pub const REQUIRED_FILES: [&str; 3] = [
    crate::catalog::MEDICINES_FILE,
    crate::catalog::INSURANCE_FILE,
    crate::catalog::COVERAGE_FILE,
];

/// Errors raised while loading the CSV catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error(
        "Could not find required CSV file: {}\n\nPlease ensure the following files exist in {}:\n  - {}",
        path.display(),
        dir.display(),
        REQUIRED_FILES.join("\n  - ")
    )]
    MissingFile { path: PathBuf, dir: PathBuf },

    #[error("cannot read {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid row in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },
}

/// Errors raised while building a comparison.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CompareError {
    #[error("Unknown medicine '{0}'.")]
    UnknownMedicine(String),

    #[error("Unknown insurance plan '{0}'.")]
    UnknownInsurance(String),
}
