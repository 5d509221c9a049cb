use std::fmt;

use serde_derive::Serialize;

use chansite::descriptor::ChanDescriptor;
use chansite::registry::SiteRegistry;

use crate::error::*;

#[derive(Debug, Serialize)]
pub struct BoardLine {
    pub code: String,
    pub title: String,
    pub url: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct BoardsReport {
    pub site: String,
    pub boards: Vec<BoardLine>,
}

impl fmt::Display for BoardsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for board in self.boards.iter() {
            write!(f, "/{}/ - {}", board.code, board.title)?;

            if let Some(url) = &board.url {
                write!(f, " ({url})")?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

pub fn boards(registry: &SiteRegistry, site_name: &str) -> Result<BoardsReport, CliError> {
    let site = registry.by_identity(site_name)?;

    let boards = site
        .boards()
        .iter()
        .map(|board| BoardLine {
            code: board.board_code().to_owned(),
            title: board.title.clone(),
            url: site.desktop_url(&ChanDescriptor::catalog(board.descriptor.clone()), None),
        })
        .collect();

    Ok(BoardsReport {
        site: site.name().to_owned(),
        boards,
    })
}
