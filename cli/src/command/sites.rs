use std::fmt;

use serde_derive::Serialize;

use chansite::registry::SiteRegistry;

use crate::error::*;

#[derive(Debug, Serialize)]
pub struct SiteSummary {
    pub name: String,
    pub root: String,
    pub enabled: bool,
    pub parser: String,
    pub board_count: usize,
    pub hosts: Vec<String>,
}

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct SitesReport(pub Vec<SiteSummary>);

impl fmt::Display for SitesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for site in self.0.iter() {
            let state = if site.enabled { "" } else { " (disabled)" };

            writeln!(
                f,
                "{}{state}: {} [{} boards, parser: {}]",
                site.name, site.root, site.board_count, site.parser
            )?;
        }

        Ok(())
    }
}

pub fn sites(registry: &SiteRegistry) -> Result<SitesReport, CliError> {
    Ok(SitesReport(
        registry
            .iter()
            .map(|site| SiteSummary {
                name: site.name().to_owned(),
                root: site.url_handler().root().to_string(),
                enabled: site.is_enabled(),
                parser: site.comment_parser_type().to_string(),
                board_count: site.boards().len(),
                hosts: site.url_handler().hosts().to_vec(),
            })
            .collect(),
    ))
}
