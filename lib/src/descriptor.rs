use std::fmt;

use serde_derive::Serialize;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct SiteDescriptor {
    site_name: String,
}

impl SiteDescriptor {
    pub fn new(site_name: impl Into<String>) -> Self {
        Self {
            site_name: site_name.into(),
        }
    }

    pub fn site_name(&self) -> &str {
        &self.site_name
    }
}

impl fmt::Display for SiteDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.site_name)
    }
}

/// A board on a specific site. Board codes are case-sensitive.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct BoardDescriptor {
    pub site: SiteDescriptor,
    pub board_code: String,
}

impl BoardDescriptor {
    pub fn new(site: SiteDescriptor, board_code: impl Into<String>) -> Self {
        Self {
            site,
            board_code: board_code.into(),
        }
    }

    pub fn create(site_name: impl Into<String>, board_code: impl Into<String>) -> Self {
        Self::new(SiteDescriptor::new(site_name), board_code)
    }

    pub fn site_name(&self) -> &str {
        self.site.site_name()
    }

    pub fn board_code(&self) -> &str {
        &self.board_code
    }
}

impl fmt::Display for BoardDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.site, self.board_code)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct CatalogDescriptor {
    pub board: BoardDescriptor,
}

impl CatalogDescriptor {
    pub fn new(board: BoardDescriptor) -> Self {
        Self { board }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct ThreadDescriptor {
    pub board: BoardDescriptor,
    thread_no: u64,
}

impl ThreadDescriptor {
    /// Returns `None` for thread number 0, which no forum assigns.
    pub fn new(board: BoardDescriptor, thread_no: u64) -> Option<Self> {
        if thread_no == 0 {
            return None;
        }

        Some(Self { board, thread_no })
    }

    pub fn thread_no(&self) -> u64 {
        self.thread_no
    }

    pub fn board_code(&self) -> &str {
        self.board.board_code()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct PostDescriptor {
    pub thread: ThreadDescriptor,
    pub post_no: u64,
}

impl PostDescriptor {
    pub fn new(thread: ThreadDescriptor, post_no: u64) -> Self {
        Self { thread, post_no }
    }

    pub fn board(&self) -> &BoardDescriptor {
        &self.thread.board
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ChanDescriptor {
    Catalog(CatalogDescriptor),
    Thread(ThreadDescriptor),
    CompositeCatalog { catalogs: Vec<CatalogDescriptor> },
}

impl ChanDescriptor {
    pub fn catalog(board: BoardDescriptor) -> Self {
        Self::Catalog(CatalogDescriptor::new(board))
    }

    pub fn thread(board: BoardDescriptor, thread_no: u64) -> Option<Self> {
        ThreadDescriptor::new(board, thread_no).map(Self::Thread)
    }

    /// Board this descriptor points into. Composite catalogs span several boards and have none.
    pub fn board(&self) -> Option<&BoardDescriptor> {
        match self {
            Self::Catalog(catalog) => Some(&catalog.board),
            Self::Thread(thread) => Some(&thread.board),
            Self::CompositeCatalog { .. } => None,
        }
    }

    pub fn board_code(&self) -> Option<&str> {
        self.board().map(BoardDescriptor::board_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thread_number_must_be_positive() {
        let board = BoardDescriptor::create("test", "a");

        assert!(ThreadDescriptor::new(board.clone(), 0).is_none());
        assert_eq!(ThreadDescriptor::new(board, 12345).unwrap().thread_no(), 12345);
    }

    #[test]
    fn board_codes_are_case_sensitive() {
        assert_ne!(BoardDescriptor::create("test", "a"), BoardDescriptor::create("test", "A"));
    }

    #[test]
    fn composite_catalog_has_no_board() {
        let descriptor = ChanDescriptor::CompositeCatalog {
            catalogs: vec![CatalogDescriptor::new(BoardDescriptor::create("test", "a"))],
        };

        assert!(descriptor.board().is_none());
        assert_eq!(
            ChanDescriptor::catalog(BoardDescriptor::create("test", "g")).board_code(),
            Some("g")
        );
    }
}
