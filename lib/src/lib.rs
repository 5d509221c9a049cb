pub mod board;
pub mod config;
pub mod descriptor;
pub mod error;
pub mod registry;
pub mod site;
pub mod sites;
pub mod util;

pub use self::error::*;
