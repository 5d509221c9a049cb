use std::fmt;

use serde_derive::Serialize;

use chansite::registry::SiteRegistry;
use chansite::site::{EndpointArgs, ARG_EXT, ARG_TIM};

use crate::error::*;

#[derive(Debug, Serialize)]
pub struct ThumbnailReport {
    pub site: String,
    pub board: String,
    pub thumbnail: String,
    pub image: String,
}

impl fmt::Display for ThumbnailReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Thumbnail: {}", self.thumbnail)?;
        write!(f, "Image: {}", self.image)
    }
}

pub struct ThumbnailRequest<'a> {
    pub site: &'a str,
    pub board: &'a str,
    pub tim: &'a str,
    pub ext: &'a str,
    pub spoiler: bool,
    pub spoiler_variant: u32,
}

pub fn thumbnail(registry: &SiteRegistry, request: &ThumbnailRequest) -> Result<ThumbnailReport, CliError> {
    let site = registry.by_identity(request.site)?;
    let board = &site.board(request.board)?.descriptor;

    // Accept extensions given with a leading dot.
    let ext = request.ext.trim_start_matches('.');

    let mut args = EndpointArgs::new();
    args.insert(ARG_EXT.to_owned(), ext.to_owned());
    args.insert(ARG_TIM.to_owned(), request.tim.to_owned());

    let thumbnail = site.thumbnail_url(board, request.spoiler, request.spoiler_variant, &args)?;
    let image = site.image_url(board, &args)?;

    Ok(ThumbnailReport {
        site: site.name().to_owned(),
        board: board.board_code().to_owned(),
        thumbnail: thumbnail.to_string(),
        image: image.to_string(),
    })
}
