use std::str::FromStr;

use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SiteFeature {
    Posting,
    PostDelete,
    PostReport,
    Login,
    ImageFileHashFlag,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize, Display, EnumIter, EnumString, IntoStaticStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum BoardFeature {
    PostingImage,
    PostingSpoiler,
    Archive,
    ForcedAnonymous,
    CodeTags,
}

/// Optional capabilities a site declares. Anything not declared is unsupported.
#[derive(Clone, Debug, Default)]
pub struct SiteFeatures {
    site: Vec<SiteFeature>,
    board: Vec<BoardFeature>,
}

impl SiteFeatures {
    pub fn new(site: impl IntoIterator<Item = SiteFeature>, board: impl IntoIterator<Item = BoardFeature>) -> Self {
        Self {
            site: site.into_iter().collect(),
            board: board.into_iter().collect(),
        }
    }

    pub fn supports_site(&self, feature: SiteFeature) -> bool {
        self.site.contains(&feature)
    }

    pub fn supports_board(&self, feature: BoardFeature) -> bool {
        self.board.contains(&feature)
    }

    /// Query a feature by name. Unrecognized names are unsupported.
    pub fn supports(&self, name: &str) -> bool {
        if let Ok(feature) = SiteFeature::from_str(name) {
            self.supports_site(feature)
        } else if let Ok(feature) = BoardFeature::from_str(name) {
            self.supports_board(feature)
        } else {
            false
        }
    }

    pub fn site_features(&self) -> &[SiteFeature] {
        &self.site
    }

    pub fn board_features(&self) -> &[BoardFeature] {
        &self.board
    }
}
