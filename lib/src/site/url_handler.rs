use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use crate::descriptor::*;
use crate::util;

static REGEX_THREAD_FILE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"^(\d+)(?:\+50)?\.html$"#).unwrap());

/// Builds the human-facing url for a descriptor, relative to a site root.
pub type DesktopUrlFn = fn(&Url, &ChanDescriptor, Option<u64>) -> Option<String>;

/// Vichan page layout: `{root}{board}` for catalogs and `{root}{board}/res/{thread}.html` for threads.
pub fn vichan_desktop_url(root: &Url, descriptor: &ChanDescriptor, _post_no: Option<u64>) -> Option<String> {
    match descriptor {
        ChanDescriptor::Catalog(catalog) => Some(util::with_segments(root, &[catalog.board.board_code()]).to_string()),
        ChanDescriptor::Thread(thread) => {
            let file_name = format!("{}.html", thread.thread_no());

            Some(util::with_segments(root, &[thread.board_code(), "res", &file_name]).to_string())
        }
        ChanDescriptor::CompositeCatalog { .. } => None,
    }
}

pub struct UrlHandler {
    root: Url,
    hosts: Vec<String>,
    names: Vec<String>,
    desktop_url: DesktopUrlFn,
}

impl UrlHandler {
    /// Root and media hosts are fixed from here on.
    pub fn new(root: Url, media_hosts: &[Url], names: Vec<String>, desktop_url: DesktopUrlFn) -> Self {
        let mut hosts: Vec<String> = Vec::new();

        for url in std::iter::once(&root).chain(media_hosts) {
            if let Some(host) = url.host_str() {
                if !hosts.iter().any(|h| h == host) {
                    hosts.push(host.to_owned());
                }
            }
        }

        Self {
            root,
            hosts,
            names,
            desktop_url,
        }
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    pub fn hosts(&self) -> &[String] {
        &self.hosts
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn desktop_url(&self, descriptor: &ChanDescriptor, post_no: Option<u64>) -> Option<String> {
        (self.desktop_url)(&self.root, descriptor, post_no)
    }

    /// True if the url's host is the root host or one of the media hosts.
    pub fn matches(&self, url: &str) -> bool {
        Url::parse(url).map(|url| self.matches_url(&url)).unwrap_or(false)
    }

    pub fn matches_url(&self, url: &Url) -> bool {
        url.host_str()
            .map(|host| self.hosts.iter().any(|h| h.eq_ignore_ascii_case(host)))
            .unwrap_or(false)
    }

    /// Turn a desktop url back into a descriptor.
    /// Recognizes `/{board}`, `/{board}/index.html`, `/{board}/catalog.html` and `/{board}/res/{thread}.html`
    /// below the site root.
    pub fn resolve_descriptor(&self, site: &SiteDescriptor, url: &Url) -> Option<ChanDescriptor> {
        if !self.matches_url(url) {
            return None;
        }

        let root_segments: Vec<&str> = non_empty_segments(&self.root);
        let segments: Vec<&str> = non_empty_segments(url);

        let rest = segments.strip_prefix(root_segments.as_slice())?;

        match rest {
            [board] | [board, "index.html"] | [board, "catalog.html"] => {
                Some(ChanDescriptor::catalog(BoardDescriptor::new(site.clone(), *board)))
            }
            [board, "res", file_name] => {
                let caps = REGEX_THREAD_FILE.captures(file_name)?;
                let thread_no = caps[1].parse::<u64>().ok()?;

                ChanDescriptor::thread(BoardDescriptor::new(site.clone(), *board), thread_no)
            }
            _ => None,
        }
    }
}

impl fmt::Debug for UrlHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UrlHandler")
            .field("root", &self.root.as_str())
            .field("hosts", &self.hosts)
            .field("names", &self.names)
            .finish_non_exhaustive()
    }
}

fn non_empty_segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|segments| segments.filter(|s| !s.is_empty()).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(root: &str, media_hosts: &[&str]) -> UrlHandler {
        let root = util::parse_base_url(root).unwrap();
        let media_hosts: Vec<Url> = media_hosts.iter().map(|h| util::parse_base_url(h).unwrap()).collect();

        UrlHandler::new(root, &media_hosts, vec!["test".to_owned()], vichan_desktop_url)
    }

    fn board(code: &str) -> BoardDescriptor {
        BoardDescriptor::create("test", code)
    }

    #[test]
    fn desktop_url_for_catalog_and_thread() {
        let handler = handler("https://example.tld/", &[]);

        assert_eq!(
            handler.desktop_url(&ChanDescriptor::catalog(board("a")), None).as_deref(),
            Some("https://example.tld/a")
        );
        assert_eq!(
            handler
                .desktop_url(&ChanDescriptor::thread(board("a"), 12345).unwrap(), Some(12350))
                .as_deref(),
            Some("https://example.tld/a/res/12345.html")
        );
    }

    #[test]
    fn desktop_url_for_composite_catalog_is_unsupported() {
        let handler = handler("https://example.tld/", &[]);
        let descriptor = ChanDescriptor::CompositeCatalog {
            catalogs: vec![CatalogDescriptor::new(board("a")), CatalogDescriptor::new(board("b"))],
        };

        assert!(handler.desktop_url(&descriptor, None).is_none());
    }

    #[test]
    fn matches_declared_hosts_only() {
        let handler = handler("https://example.tld/", &["https://media.example.tld/"]);

        assert!(handler.matches("https://example.tld/a/res/1.html"));
        assert!(handler.matches("http://media.example.tld/a/thumb/1.png"));
        assert!(handler.matches("https://EXAMPLE.tld/a"));
        assert!(!handler.matches("https://other.tld/a"));
        assert!(!handler.matches("https://sub.example.tld/a"));
        assert!(!handler.matches("example.tld/a"));
    }

    #[test]
    fn resolves_desktop_urls_to_descriptors() {
        let handler = handler("https://example.tld/", &[]);
        let site = SiteDescriptor::new("test");
        let resolve = |url: &str| handler.resolve_descriptor(&site, &Url::parse(url).unwrap());

        assert_eq!(resolve("https://example.tld/a"), Some(ChanDescriptor::catalog(board("a"))));
        assert_eq!(resolve("https://example.tld/a/"), Some(ChanDescriptor::catalog(board("a"))));
        assert_eq!(
            resolve("https://example.tld/a/catalog.html"),
            Some(ChanDescriptor::catalog(board("a")))
        );
        assert_eq!(
            resolve("https://example.tld/a/res/12345.html#q12350"),
            ChanDescriptor::thread(board("a"), 12345)
        );
        assert_eq!(
            resolve("https://example.tld/a/res/12345+50.html"),
            ChanDescriptor::thread(board("a"), 12345)
        );
        assert_eq!(resolve("https://example.tld/a/res/0.html"), None);
        assert_eq!(resolve("https://example.tld/a/res/abc.html"), None);
        assert_eq!(resolve("https://example.tld/"), None);
        assert_eq!(resolve("https://other.tld/a"), None);
    }

    #[test]
    fn resolves_below_root_path() {
        let handler = handler("https://example.tld/chan/", &[]);
        let site = SiteDescriptor::new("test");

        assert_eq!(
            handler.resolve_descriptor(&site, &Url::parse("https://example.tld/chan/b/res/7.html").unwrap()),
            ChanDescriptor::thread(board("b"), 7)
        );
        assert_eq!(
            handler.resolve_descriptor(&site, &Url::parse("https://example.tld/b/res/7.html").unwrap()),
            None
        );
    }
}
