use serde_derive::{Deserialize, Serialize};
use strum_macros::Display;

/// Markup grammar a site's post comments are written in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, Serialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum CommentParserType {
    #[default]
    Default,
    #[serde(rename = "4chan")]
    #[strum(serialize = "4chan")]
    FourChan,
    Vichan,
    Tinyboard,
    AspNetChan,
    Kusabax,
    FoolFuuka,
}
