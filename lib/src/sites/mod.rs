use crate::error::*;
use crate::site::*;

pub mod chan370;

/// Setups for the sites compiled into the library, in registration order.
pub fn builtin_setups() -> Vec<SiteSetup> {
    vec![chan370::setup()]
}

pub fn builtin_sites() -> Result<Vec<SiteAdapter>, SiteError> {
    builtin_setups().into_iter().map(SiteAdapter::new).collect()
}
