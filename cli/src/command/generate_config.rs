use std::fmt;
use std::path::{Path, PathBuf};

use serde_derive::Serialize;

use chansite::config::sites::SitesConfig;

use crate::error::*;

#[derive(Debug, Serialize)]
pub struct GenerateConfigReport {
    pub path: PathBuf,
    pub written: bool,
}

impl fmt::Display for GenerateConfigReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.written {
            write!(f, "Wrote default config to {}", self.path.display())
        } else {
            write!(f, "Config already exists at {}", self.path.display())
        }
    }
}

pub fn generate_config(sites_config_path: &Path) -> Result<GenerateConfigReport, CliError> {
    let written = SitesConfig::write_default(sites_config_path)?;

    Ok(GenerateConfigReport {
        path: sites_config_path.to_path_buf(),
        written,
    })
}
