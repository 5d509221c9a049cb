use std::fmt;

use serde_derive::Serialize;

use chansite::descriptor::*;
use chansite::registry::SiteRegistry;

use crate::error::*;

#[derive(Debug, Serialize)]
pub struct EndpointsReport {
    pub site: String,
    pub board: String,
    pub desktop_url: Option<String>,
    pub catalog: String,
    pub pages: String,
    pub thread: Option<String>,
    pub reply: String,
}

impl fmt::Display for EndpointsReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(url) = &self.desktop_url {
            writeln!(f, "Desktop: {url}")?;
        }

        writeln!(f, "Catalog: {}", self.catalog)?;
        writeln!(f, "Pages: {}", self.pages)?;

        if let Some(url) = &self.thread {
            writeln!(f, "Thread: {url}")?;
        }

        writeln!(f, "Reply: {}", self.reply)
    }
}

pub fn endpoints(
    registry: &SiteRegistry,
    site_name: &str,
    board_code: &str,
    thread_no: Option<u64>,
) -> Result<EndpointsReport, CliError> {
    let site = registry.by_identity(site_name)?;
    let board = site.board(board_code)?.descriptor.clone();

    let thread = thread_no
        .map(|no| {
            ThreadDescriptor::new(board.clone(), no)
                .ok_or_else(|| CliError::new(CliErrorKind::Arguments, "Thread number must be positive"))
        })
        .transpose()?;

    let descriptor = match &thread {
        Some(thread) => ChanDescriptor::Thread(thread.clone()),
        None => ChanDescriptor::catalog(board.clone()),
    };

    Ok(EndpointsReport {
        site: site.name().to_owned(),
        board: board.board_code().to_owned(),
        desktop_url: site.desktop_url(&descriptor, None),
        catalog: site.catalog_endpoint(&board)?.to_string(),
        pages: site.pages_endpoint(&board)?.to_string(),
        thread: thread
            .as_ref()
            .map(|thread| site.thread_endpoint(thread))
            .transpose()?
            .map(|url| url.to_string()),
        reply: site.reply_endpoint(&descriptor)?.to_string(),
    })
}
