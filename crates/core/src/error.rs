use crate::types::ContentKind;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Slug lookup miss. Page boundaries turn this into a 404.
    #[error("No {kind} entry with slug '{slug}'")]
    NotFound { kind: ContentKind, slug: String },

    #[error("Duplicate slug '{0}' in content store")]
    DuplicateSlug(String),

    /// A structurally required field is missing or empty.
    #[error("Malformed record '{id}': missing required field '{field}'")]
    MalformedRecord { id: String, field: &'static str },
}

impl Error {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound { .. })
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
