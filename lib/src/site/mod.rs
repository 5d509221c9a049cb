use serde_derive::Serialize;
use tracing::debug;
use url::Url;

use crate::board::*;
use crate::descriptor::*;
use crate::error::*;
use crate::util;

pub mod endpoints;
pub mod features;
pub mod parser;
pub mod url_handler;

pub use self::endpoints::*;
pub use self::features::*;
pub use self::parser::*;
pub use self::url_handler::*;

/// How the media downloader may fetch files from a site.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ChunkDownloaderSiteProperties {
    /// Files can be downloaded in parallel ranged chunks.
    pub enabled: bool,
    pub site_sends_correct_file_size_in_bytes: bool,
}

impl ChunkDownloaderSiteProperties {
    pub fn new(enabled: bool, site_sends_correct_file_size_in_bytes: bool) -> Self {
        Self {
            enabled,
            site_sends_correct_file_size_in_bytes,
        }
    }
}

/// Everything needed to construct a [`SiteAdapter`].
///
/// Create one with [`SiteSetup::new`] and override fields with struct update syntax.
#[derive(Clone)]
pub struct SiteSetup {
    pub name: String,
    /// Alternative names the site is known by.
    pub names: Vec<String>,
    pub enabled: bool,
    pub root: String,
    /// Root for JSON API endpoints. Defaults to `root`.
    pub api_root: Option<String>,
    /// Root for images and thumbnails. Defaults to `root`.
    pub media_root: Option<String>,
    /// Additional hosts whose urls belong to this site.
    pub media_hosts: Vec<String>,
    pub favicon: Option<String>,
    /// (code, title) pairs in display order.
    pub boards: Vec<(String, String)>,
    pub features: SiteFeatures,
    pub parser: CommentParserType,
    pub desktop_url: DesktopUrlFn,
    pub thumbnail_extension: ThumbnailExtensionFn,
    pub chunk_downloader: ChunkDownloaderSiteProperties,
}

impl SiteSetup {
    pub fn new(name: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            names: Vec::new(),
            enabled: true,
            root: root.into(),
            api_root: None,
            media_root: None,
            media_hosts: Vec::new(),
            favicon: None,
            boards: Vec::new(),
            features: SiteFeatures::default(),
            parser: CommentParserType::Default,
            desktop_url: vichan_desktop_url,
            thumbnail_extension: vichan_thumbnail_extension,
            chunk_downloader: ChunkDownloaderSiteProperties::default(),
        }
    }
}

/// A fully set up site. Read-only once constructed.
#[derive(Debug)]
pub struct SiteAdapter {
    descriptor: SiteDescriptor,
    enabled: bool,
    favicon: Option<Url>,
    boards: BoardRegistry,
    url_handler: UrlHandler,
    endpoints: Endpoints,
    features: SiteFeatures,
    parser: CommentParserType,
    chunk_downloader: ChunkDownloaderSiteProperties,
}

impl SiteAdapter {
    pub fn new(setup: SiteSetup) -> Result<Self, SiteError> {
        let SiteSetup {
            name,
            mut names,
            enabled,
            root,
            api_root,
            media_root,
            media_hosts,
            favicon,
            boards,
            features,
            parser,
            desktop_url,
            thumbnail_extension,
            chunk_downloader,
        } = setup;

        if name.is_empty() {
            return Err(SiteError::Config("Site name cannot be empty".into()));
        }

        let descriptor = SiteDescriptor::new(name);

        let root = util::parse_base_url(&root)?;
        let api_root = api_root.as_deref().map(util::parse_base_url).transpose()?;
        let media_root = media_root.as_deref().map(util::parse_base_url).transpose()?;
        let favicon = favicon.as_deref().map(util::parse_base_url).transpose()?;

        let mut hosts: Vec<Url> = Vec::new();
        hosts.extend(api_root.iter().cloned());
        hosts.extend(media_root.iter().cloned());
        for host in media_hosts.iter() {
            hosts.push(util::parse_base_url(host)?);
        }

        let mut board_registry = BoardRegistry::new(descriptor.clone());
        board_registry.install(
            boards
                .into_iter()
                .map(|(code, title)| ChanBoard::create(BoardDescriptor::new(descriptor.clone(), code), title)),
        )?;

        if !names.iter().any(|n| n == descriptor.site_name()) {
            names.insert(0, descriptor.site_name().to_owned());
        }

        let url_handler = UrlHandler::new(root.clone(), &hosts, names, desktop_url);

        let endpoints = Endpoints::new(
            root.clone(),
            api_root.unwrap_or_else(|| root.clone()),
            media_root.unwrap_or(root),
            thumbnail_extension,
        )
        .with_spoilers(features.supports_board(BoardFeature::PostingSpoiler));

        debug!(
            "Set up site {} with {} boards (parser: {}).",
            descriptor,
            board_registry.len(),
            parser
        );

        Ok(Self {
            descriptor,
            enabled,
            favicon,
            boards: board_registry,
            url_handler,
            endpoints,
            features,
            parser,
            chunk_downloader,
        })
    }

    pub fn descriptor(&self) -> &SiteDescriptor {
        &self.descriptor
    }

    pub fn name(&self) -> &str {
        self.descriptor.site_name()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn favicon(&self) -> Option<&Url> {
        self.favicon.as_ref()
    }

    pub fn board_registry(&self) -> &BoardRegistry {
        &self.boards
    }

    pub fn boards(&self) -> &[ChanBoard] {
        self.boards.boards()
    }

    pub fn board(&self, code: &str) -> Result<&ChanBoard, SiteError> {
        self.boards.lookup(code)
    }

    pub fn url_handler(&self) -> &UrlHandler {
        &self.url_handler
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn features(&self) -> &SiteFeatures {
        &self.features
    }

    pub fn supports(&self, feature: &str) -> bool {
        self.features.supports(feature)
    }

    pub fn comment_parser_type(&self) -> CommentParserType {
        self.parser
    }

    pub fn chunk_downloader_properties(&self) -> &ChunkDownloaderSiteProperties {
        &self.chunk_downloader
    }

    pub fn matches(&self, url: &str) -> bool {
        self.url_handler.matches(url)
    }

    pub fn desktop_url(&self, descriptor: &ChanDescriptor, post_no: Option<u64>) -> Option<String> {
        self.url_handler.desktop_url(descriptor, post_no)
    }

    /// Resolve a desktop url to a descriptor of one of this site's boards.
    pub fn resolve_descriptor(&self, url: &Url) -> Option<ChanDescriptor> {
        self.url_handler
            .resolve_descriptor(&self.descriptor, url)
            .filter(|descriptor| descriptor.board().map_or(false, |board| self.boards.contains(board)))
    }

    /// Fails with `InvalidBoardReference` if the board was not installed on this site.
    pub fn check_board(&self, board: &BoardDescriptor) -> Result<(), SiteError> {
        if self.boards.contains(board) {
            Ok(())
        } else {
            Err(SiteError::InvalidBoardReference {
                site: self.name().to_owned(),
                board_site: board.site_name().to_owned(),
                board: board.board_code().to_owned(),
            })
        }
    }

    pub fn catalog_endpoint(&self, board: &BoardDescriptor) -> Result<Url, SiteError> {
        self.check_board(board)?;

        Ok(self.endpoints.catalog(board))
    }

    pub fn thread_endpoint(&self, thread: &ThreadDescriptor) -> Result<Url, SiteError> {
        self.check_board(&thread.board)?;

        Ok(self.endpoints.thread(thread))
    }

    pub fn pages_endpoint(&self, board: &BoardDescriptor) -> Result<Url, SiteError> {
        self.check_board(board)?;

        Ok(self.endpoints.pages(board))
    }

    pub fn image_url(&self, board: &BoardDescriptor, args: &EndpointArgs) -> Result<Url, SiteError> {
        self.check_board(board)?;

        self.endpoints.image(board, args)
    }

    /// The resulting url is a best guess; callers must tolerate it not existing.
    pub fn thumbnail_url(
        &self,
        board: &BoardDescriptor,
        spoiler: bool,
        spoiler_variant: u32,
        args: &EndpointArgs,
    ) -> Result<Url, SiteError> {
        self.check_board(board)?;

        self.endpoints.thumbnail(board, spoiler, spoiler_variant, args)
    }

    pub fn reply_endpoint(&self, descriptor: &ChanDescriptor) -> Result<Url, SiteError> {
        match descriptor.board() {
            Some(board) => self.check_board(board)?,
            None => return Err(SiteError::Unsupported("Replying to a composite catalog".into())),
        }

        Ok(self.endpoints.reply(descriptor))
    }

    pub fn delete_endpoint(&self, post: &PostDescriptor) -> Result<Url, SiteError> {
        self.check_board(post.board())?;

        Ok(self.endpoints.delete(post))
    }
}
