use std::collections::HashMap;

use serde_derive::Serialize;
use tracing::debug;

use crate::descriptor::{BoardDescriptor, SiteDescriptor};
use crate::error::*;

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChanBoard {
    pub descriptor: BoardDescriptor,
    pub title: String,
}

impl ChanBoard {
    pub fn create(descriptor: BoardDescriptor, title: impl Into<String>) -> Self {
        Self {
            descriptor,
            title: title.into(),
        }
    }

    pub fn board_code(&self) -> &str {
        self.descriptor.board_code()
    }
}

/// Boards supported by one site, in display order.
#[derive(Debug)]
pub struct BoardRegistry {
    site: SiteDescriptor,
    boards: Vec<ChanBoard>,
    index: HashMap<String, usize>,
}

impl BoardRegistry {
    pub fn new(site: SiteDescriptor) -> Self {
        Self {
            site,
            boards: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Replace the installed boards.
    /// Nothing is changed if any board is a duplicate or belongs to another site.
    pub fn install(&mut self, boards: impl IntoIterator<Item = ChanBoard>) -> Result<(), SiteError> {
        let mut new_boards: Vec<ChanBoard> = Vec::new();
        let mut new_index: HashMap<String, usize> = HashMap::new();

        for board in boards {
            if board.descriptor.site != self.site {
                return Err(SiteError::InvalidBoardReference {
                    site: self.site.site_name().to_owned(),
                    board_site: board.descriptor.site_name().to_owned(),
                    board: board.board_code().to_owned(),
                });
            }

            if new_index.contains_key(board.board_code()) {
                return Err(SiteError::DuplicateBoardCode {
                    site: self.site.site_name().to_owned(),
                    code: board.board_code().to_owned(),
                });
            }

            new_index.insert(board.board_code().to_owned(), new_boards.len());
            new_boards.push(board);
        }

        debug!("Installed {} boards for site {}.", new_boards.len(), self.site);

        self.boards = new_boards;
        self.index = new_index;

        Ok(())
    }

    pub fn lookup(&self, code: &str) -> Result<&ChanBoard, SiteError> {
        self.index
            .get(code)
            .map(|i| &self.boards[*i])
            .ok_or_else(|| SiteError::board_not_found(self.site.site_name(), code))
    }

    /// True if the board was installed into this registry.
    pub fn contains(&self, descriptor: &BoardDescriptor) -> bool {
        descriptor.site == self.site && self.index.contains_key(descriptor.board_code())
    }

    pub fn boards(&self) -> &[ChanBoard] {
        &self.boards
    }

    pub fn len(&self) -> usize {
        self.boards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.boards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(site: &str, code: &str, title: &str) -> ChanBoard {
        ChanBoard::create(BoardDescriptor::create(site, code), title)
    }

    fn registry() -> BoardRegistry {
        BoardRegistry::new(SiteDescriptor::new("test"))
    }

    #[test]
    fn lookup_returns_installed_boards_in_order() {
        let mut boards = registry();
        boards
            .install(vec![
                board("test", "b", "random"),
                board("test", "a", "anime"),
                board("test", "g", "technology"),
            ])
            .unwrap();

        assert_eq!(boards.lookup("a").unwrap().title, "anime");
        assert_eq!(boards.lookup("g").unwrap().title, "technology");

        let codes: Vec<&str> = boards.boards().iter().map(|b| b.board_code()).collect();
        assert_eq!(codes, vec!["b", "a", "g"]);
    }

    #[test]
    fn lookup_of_unknown_board_is_not_found() {
        let mut boards = registry();
        boards.install(vec![board("test", "a", "anime")]).unwrap();

        let err = boards.lookup("A").unwrap_err();

        assert!(err.is_not_found());
    }

    #[test]
    fn duplicate_code_leaves_registry_unchanged() {
        let mut boards = registry();
        boards.install(vec![board("test", "a", "anime")]).unwrap();

        let result = boards.install(vec![board("test", "b", "random"), board("test", "b", "random again")]);

        assert!(matches!(result, Err(SiteError::DuplicateBoardCode { ref code, .. }) if code == "b"));
        assert_eq!(boards.len(), 1);
        assert!(boards.lookup("a").is_ok());
        assert!(boards.lookup("b").is_err());
    }

    #[test]
    fn duplicate_code_on_first_install_leaves_registry_empty() {
        let mut boards = registry();

        assert!(boards
            .install(vec![board("test", "a", "anime"), board("test", "a", "anime")])
            .is_err());
        assert!(boards.is_empty());
    }

    #[test]
    fn board_from_another_site_is_rejected() {
        let mut boards = registry();

        let result = boards.install(vec![board("other", "a", "anime")]);

        assert!(matches!(result, Err(SiteError::InvalidBoardReference { .. })));
        assert!(!boards.contains(&BoardDescriptor::create("other", "a")));
    }

    #[test]
    fn install_replaces_previous_boards() {
        let mut boards = registry();
        boards.install(vec![board("test", "a", "anime")]).unwrap();
        boards.install(vec![board("test", "b", "random")]).unwrap();

        assert!(boards.lookup("a").is_err());
        assert!(boards.contains(&BoardDescriptor::create("test", "b")));
    }
}
