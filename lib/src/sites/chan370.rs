use crate::error::*;
use crate::site::*;

pub const SITE_NAME: &str = "370chan";

const ROOT: &str = "https://370ch.lt/";
const FAVICON: &str = "https://370ch.lt/favicon.ico";

const BOARDS: &[(&str, &str)] = &[
    ("a", "anime ir manga"),
    ("b", "apie viską"),
    ("g", "technologijos ir žaidimai"),
    ("fo", "fotografija"),
    ("mu", "muzika"),
    ("int", "internacionalus"),
    ("t", "teptukas"),
    ("meta", "svetainės aptarimas"),
];

pub fn setup() -> SiteSetup {
    SiteSetup {
        media_hosts: vec![ROOT.to_owned()],
        favicon: Some(FAVICON.to_owned()),
        boards: BOARDS
            .iter()
            .map(|(code, title)| (code.to_string(), title.to_string()))
            .collect(),
        parser: CommentParserType::Vichan,
        // Thumbnails are not named consistently with their source files.
        thumbnail_extension: guessing_thumbnail_extension,
        chunk_downloader: ChunkDownloaderSiteProperties::new(true, true),
        ..SiteSetup::new(SITE_NAME, ROOT)
    }
}

pub fn create() -> Result<SiteAdapter, SiteError> {
    SiteAdapter::new(setup())
}
