use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("Malformed document: no '{heading}' heading found")]
    MalformedDocument { heading: String },

    #[error("No packages found in History section")]
    EmptyInput,

    #[error("Version token '{token}' contains no digits")]
    UnparseableVersion { token: String },

    #[error("Not a recognized wheel filename: {name}")]
    UnparseableFilename { name: String },
}

impl CatalogError {
    pub fn missing_heading(heading: &str) -> Self {
        CatalogError::MalformedDocument {
            heading: heading.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CatalogError>;
