use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

#[derive(Debug, PartialEq, Eq)]
pub enum NotFound {
    Board { site: String, code: String },
    Site(String),
    Url(String),
}

impl fmt::Display for NotFound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Board { site, code } => write!(f, "board /{code}/ on site {site}"),
            Self::Site(name) => write!(f, "site {name}"),
            Self::Url(url) => write!(f, "no site handles url {url}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SiteError {
    #[error("Not found: {0}")]
    NotFound(NotFound),
    #[error("Malformed endpoint arguments: missing '{0}'")]
    MalformedEndpointArgs(Cow<'static, str>),
    #[error("Duplicate board code /{code}/ for site {site}")]
    DuplicateBoardCode { site: String, code: String },
    #[error("Duplicate site name: {0}")]
    DuplicateSiteName(String),
    #[error("Board /{board}/ of site {board_site} used with site {site}")]
    InvalidBoardReference {
        site: String,
        board_site: String,
        board: String,
    },
    #[error("Unsupported: {0}")]
    Unsupported(Cow<'static, str>),
    #[error("Invalid url: {0}")]
    InvalidUrl(Cow<'static, str>),
    #[error("Site registry is already initialized")]
    RegistryAlreadyInitialized,
    #[error("Site registry is not initialized")]
    RegistryNotInitialized,
    #[error("Error reading config")]
    OpenConfig(anyhow::Error),
    #[error("Error parsing config: {0}")]
    ParseConfig(Cow<'static, str>),
    #[error("Configuration error: {0}")]
    Config(Cow<'static, str>),
    #[error("Error creating file")]
    CreateFile(anyhow::Error),
}

impl SiteError {
    pub fn board_not_found(site: impl Into<String>, code: impl Into<String>) -> Self {
        Self::NotFound(NotFound::Board {
            site: site.into(),
            code: code.into(),
        })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
