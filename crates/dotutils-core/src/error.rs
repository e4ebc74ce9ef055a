use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("no interactive input available for '{slot}'")]
    InputUnavailable { slot: String },

    #[error("failed to read input for '{slot}': {source}")]
    Input {
        slot: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum BadgeError {
    #[error("necessary rectangle element '{0}' not found in the template")]
    MissingRect(&'static str),

    #[error("rectangle '{rect}' is missing numeric attribute '{attr}'")]
    MissingAttribute { rect: &'static str, attr: &'static str },

    #[error("malformed svg: {0}")]
    Xml(String),
}

#[derive(Debug, Error)]
pub enum DotutilsError {
    #[error("invalid metavar declaration '{0}'")]
    InvalidMetavar(String),

    #[error("invalid default for '{slot}': {reason}")]
    InvalidDefault { slot: String, reason: String },

    #[error("home directory not found: set HOME environment variable")]
    HomeNotFound,

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Badge(#[from] BadgeError),

    #[error("http client: {0}")]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, DotutilsError>;
