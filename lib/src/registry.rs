use std::collections::HashMap;

use once_cell::sync::OnceCell;
use tracing::{debug, warn};
use url::Url;

use crate::descriptor::ChanDescriptor;
use crate::error::*;
use crate::site::{ChunkDownloaderSiteProperties, SiteAdapter};

static GLOBAL_REGISTRY: OnceCell<SiteRegistry> = OnceCell::new();

#[derive(Debug, Default)]
pub struct SiteRegistryBuilder {
    sites: Vec<SiteAdapter>,
    index: HashMap<String, usize>,
}

impl SiteRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registration order decides which site wins when several handle the same url.
    pub fn register(&mut self, site: SiteAdapter) -> Result<(), SiteError> {
        if self.index.contains_key(site.name()) {
            return Err(SiteError::DuplicateSiteName(site.name().to_owned()));
        }

        debug!("Registering site {} ({} boards).", site.name(), site.boards().len());

        self.index.insert(site.name().to_owned(), self.sites.len());
        self.sites.push(site);

        Ok(())
    }

    pub fn build(self) -> SiteRegistry {
        SiteRegistry {
            sites: self.sites,
            index: self.index,
        }
    }
}

/// Registered sites. Cannot be changed after it is built.
#[derive(Debug)]
pub struct SiteRegistry {
    sites: Vec<SiteAdapter>,
    index: HashMap<String, usize>,
}

impl SiteRegistry {
    pub fn builder() -> SiteRegistryBuilder {
        SiteRegistryBuilder::new()
    }

    /// First enabled site, in registration order, whose hosts match the url.
    /// Input that does not parse as a url is not handled by any site.
    pub fn resolve(&self, url: &str) -> Result<&SiteAdapter, SiteError> {
        let parsed = match Url::parse(url) {
            Ok(parsed) => Some(parsed),
            Err(err) => {
                debug!("Cannot parse url {}: {}", url, err);
                None
            }
        };

        parsed
            .as_ref()
            .and_then(|parsed| self.resolve_url(parsed))
            .ok_or_else(|| SiteError::NotFound(NotFound::Url(url.to_owned())))
    }

    fn resolve_url(&self, url: &Url) -> Option<&SiteAdapter> {
        for site in self.sites.iter() {
            if !site.url_handler().matches_url(url) {
                continue;
            }

            if !site.is_enabled() {
                warn!("Site {} matches {} but is disabled.", site.name(), url);
                continue;
            }

            debug!("Resolved {} to site {}.", url, site.name());
            return Some(site);
        }

        None
    }

    /// Resolve a desktop url to its site and descriptor.
    pub fn resolve_descriptor(&self, url: &str) -> Result<(&SiteAdapter, ChanDescriptor), SiteError> {
        let site = self.resolve(url)?;

        Url::parse(url)
            .ok()
            .and_then(|parsed| site.resolve_descriptor(&parsed))
            .map(|descriptor| (site, descriptor))
            .ok_or_else(|| SiteError::NotFound(NotFound::Url(url.to_owned())))
    }

    pub fn by_identity(&self, name: &str) -> Result<&SiteAdapter, SiteError> {
        self.index
            .get(name)
            .map(|i| &self.sites[*i])
            .ok_or_else(|| SiteError::NotFound(NotFound::Site(name.to_owned())))
    }

    pub fn chunk_downloader_properties(&self, url: &str) -> Option<&ChunkDownloaderSiteProperties> {
        let url = Url::parse(url).ok()?;

        self.resolve_url(&url).map(SiteAdapter::chunk_downloader_properties)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SiteAdapter> {
        self.sites.iter()
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

/// Publish the process-wide registry. Can only be done once.
pub fn init_global(registry: SiteRegistry) -> Result<&'static SiteRegistry, SiteError> {
    GLOBAL_REGISTRY
        .set(registry)
        .map_err(|_| SiteError::RegistryAlreadyInitialized)?;

    global()
}

/// Return the process-wide registry, building it with `init` if it has not been published yet.
pub fn get_or_init_global(
    init: impl FnOnce() -> Result<SiteRegistry, SiteError>,
) -> Result<&'static SiteRegistry, SiteError> {
    GLOBAL_REGISTRY.get_or_try_init(init)
}

pub fn global() -> Result<&'static SiteRegistry, SiteError> {
    GLOBAL_REGISTRY.get().ok_or(SiteError::RegistryNotInitialized)
}
