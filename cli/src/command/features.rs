use std::fmt;

use serde_derive::Serialize;
use strum::IntoEnumIterator;

use chansite::registry::SiteRegistry;
use chansite::site::{BoardFeature, SiteFeature};

use crate::error::*;

#[derive(Debug, Serialize)]
pub struct FeatureLine {
    pub name: &'static str,
    pub supported: bool,
}

#[derive(Debug, Serialize)]
pub struct FeaturesReport {
    pub site: String,
    pub parser: String,
    pub chunked_downloads: bool,
    pub features: Vec<FeatureLine>,
}

impl fmt::Display for FeaturesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Parser: {}", self.parser)?;
        writeln!(f, "Chunked downloads: {}", yes_no(self.chunked_downloads))?;

        for feature in self.features.iter() {
            writeln!(f, "{}: {}", feature.name, yes_no(feature.supported))?;
        }

        Ok(())
    }
}

fn yes_no(v: bool) -> &'static str {
    if v {
        "yes"
    } else {
        "no"
    }
}

pub fn features(registry: &SiteRegistry, site_name: &str) -> Result<FeaturesReport, CliError> {
    let site = registry.by_identity(site_name)?;

    let site_features = SiteFeature::iter().map(|feature| FeatureLine {
        name: feature.into(),
        supported: site.features().supports_site(feature),
    });

    let board_features = BoardFeature::iter().map(|feature| FeatureLine {
        name: feature.into(),
        supported: site.features().supports_board(feature),
    });

    Ok(FeaturesReport {
        site: site.name().to_owned(),
        parser: site.comment_parser_type().to_string(),
        chunked_downloads: site.chunk_downloader_properties().enabled,
        features: site_features.chain(board_features).collect(),
    })
}
