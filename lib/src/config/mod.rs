use std::path::PathBuf;

use tracing::error;

pub mod sites;

pub const CONFIG_DIR: &str = "chansite";

pub fn get_config_path() -> Option<PathBuf> {
    let config_path = dirs::config_dir().map(|p| p.join(CONFIG_DIR));

    if config_path.is_none() {
        error!("Could not get configuration path!");
    }

    config_path
}
