use std::borrow::Cow;

use serde_derive::Serialize;

use chansite::{NotFound, SiteError};

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CliErrorKind {
    Arguments,
    Config,
    NotFound,
    Other,
}

impl CliErrorKind {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments => 1,
            Self::Config => 2,
            Self::NotFound => 3,
            Self::Other => 101,
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub kind: CliErrorKind,
    pub description: Cow<'static, str>,
}

impl CliError {
    pub fn new<S: Into<Cow<'static, str>>>(kind: CliErrorKind, description: S) -> CliError {
        CliError {
            kind,
            description: description.into(),
        }
    }
}

impl From<SiteError> for CliError {
    fn from(error: SiteError) -> Self {
        match error {
            SiteError::NotFound(err) => match err {
                NotFound::Board { site, code } => {
                    CliError::new(CliErrorKind::NotFound, format!("Site {site} has no board /{code}/"))
                }
                NotFound::Site(name) => CliError::new(CliErrorKind::NotFound, format!("Unknown site: {name}")),
                NotFound::Url(url) => CliError::new(CliErrorKind::NotFound, format!("No site handles url: {url}")),
            },
            SiteError::MalformedEndpointArgs(key) => {
                CliError::new(CliErrorKind::Arguments, format!("Missing media argument: {key}"))
            }
            SiteError::InvalidUrl(err) => CliError::new(CliErrorKind::Arguments, format!("Invalid url: {err}")),
            SiteError::InvalidBoardReference { .. } | SiteError::Unsupported(_) => {
                CliError::new(CliErrorKind::Arguments, error.to_string())
            }
            SiteError::DuplicateBoardCode { .. } | SiteError::DuplicateSiteName(_) => {
                CliError::new(CliErrorKind::Config, format!("Configuration error: {error}"))
            }
            SiteError::OpenConfig(err) => {
                CliError::new(CliErrorKind::Config, format!("Error reading config file: {err:#}"))
            }
            SiteError::ParseConfig(err) => {
                CliError::new(CliErrorKind::Config, format!("Error parsing configuration: {err}"))
            }
            SiteError::Config(err) => CliError::new(CliErrorKind::Config, format!("Configuration error: {err}")),
            SiteError::CreateFile(err) => CliError::new(CliErrorKind::Config, format!("Error creating file: {err:#}")),
            SiteError::RegistryAlreadyInitialized | SiteError::RegistryNotInitialized => {
                CliError::new(CliErrorKind::Other, error.to_string())
            }
        }
    }
}
