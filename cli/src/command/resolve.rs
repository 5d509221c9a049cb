use std::fmt;

use serde_derive::Serialize;
use tracing::debug;

use chansite::descriptor::ChanDescriptor;
use chansite::registry::SiteRegistry;
use chansite::site::SiteAdapter;
use chansite::SiteError;

use crate::error::*;

#[derive(Debug, Serialize)]
pub struct ResolveReport {
    pub site: String,
    pub parser: String,
    pub descriptor: Option<ChanDescriptor>,
    pub desktop_url: Option<String>,
    pub api_url: Option<String>,
}

impl fmt::Display for ResolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Site: {} (parser: {})", self.site, self.parser)?;

        match &self.descriptor {
            Some(ChanDescriptor::Catalog(catalog)) => writeln!(f, "Catalog: /{}/", catalog.board.board_code())?,
            Some(ChanDescriptor::Thread(thread)) => {
                writeln!(f, "Thread: /{}/ #{}", thread.board_code(), thread.thread_no())?
            }
            Some(ChanDescriptor::CompositeCatalog { .. }) | None => {}
        }

        if let Some(url) = &self.desktop_url {
            writeln!(f, "Desktop url: {url}")?;
        }

        if let Some(url) = &self.api_url {
            writeln!(f, "API url: {url}")?;
        }

        Ok(())
    }
}

pub fn resolve(registry: &SiteRegistry, url: &str) -> Result<ResolveReport, CliError> {
    match registry.resolve_descriptor(url) {
        Ok((site, descriptor)) => report(site, Some(descriptor)),
        Err(SiteError::NotFound(_)) => {
            // The host may still belong to a site even if the path is not a board or thread.
            let site = registry.resolve(url)?;
            debug!("Url {} belongs to {} but is not a board or thread.", url, site.name());

            report(site, None)
        }
        Err(err) => Err(err.into()),
    }
}

fn report(site: &SiteAdapter, descriptor: Option<ChanDescriptor>) -> Result<ResolveReport, CliError> {
    let api_url = match &descriptor {
        Some(ChanDescriptor::Catalog(catalog)) => Some(site.catalog_endpoint(&catalog.board)?.to_string()),
        Some(ChanDescriptor::Thread(thread)) => Some(site.thread_endpoint(thread)?.to_string()),
        Some(ChanDescriptor::CompositeCatalog { .. }) | None => None,
    };

    let desktop_url = descriptor.as_ref().and_then(|d| site.desktop_url(d, None));

    Ok(ResolveReport {
        site: site.name().to_owned(),
        parser: site.comment_parser_type().to_string(),
        descriptor,
        desktop_url,
        api_url,
    })
}
