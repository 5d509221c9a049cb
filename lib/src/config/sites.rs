use std::borrow::Cow;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde_derive::Deserialize;
use tracing::{debug, info};

use crate::error::*;
use crate::registry::SiteRegistry;
use crate::site::*;
use crate::sites;
use crate::util;

use super::*;

pub const DEFAULT_SITES_TOML: &str = include_str!("default_sites.toml");
pub const SITES_CONFIG_FILENAME: &str = "sites.toml";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThumbnailStyle {
    #[default]
    Vichan,
    Guessing,
}

impl ThumbnailStyle {
    pub fn extension_fn(self) -> ThumbnailExtensionFn {
        match self {
            Self::Vichan => vichan_thumbnail_extension,
            Self::Guessing => guessing_thumbnail_extension,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BoardDef {
    pub code: String,
    pub title: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SiteDef {
    pub name: String,
    #[serde(default)]
    pub names: Vec<String>,
    pub root: String,
    pub api_root: Option<String>,
    pub media_root: Option<String>,
    #[serde(default)]
    pub media_hosts: Vec<String>,
    pub favicon: Option<String>,
    #[serde(default)]
    pub parser: CommentParserType,
    #[serde(default)]
    pub thumbnail_style: ThumbnailStyle,
    #[serde(default)]
    pub site_features: Vec<SiteFeature>,
    #[serde(default)]
    pub board_features: Vec<BoardFeature>,
    #[serde(default)]
    pub chunked_downloads: bool,
    #[serde(default)]
    pub boards: Vec<BoardDef>,
}

impl SiteDef {
    pub fn to_setup(&self) -> SiteSetup {
        SiteSetup {
            names: self.names.clone(),
            api_root: self.api_root.clone(),
            media_root: self.media_root.clone(),
            media_hosts: self.media_hosts.clone(),
            favicon: self.favicon.clone(),
            boards: self
                .boards
                .iter()
                .map(|b| (b.code.clone(), b.title.clone()))
                .collect(),
            features: SiteFeatures::new(self.site_features.iter().copied(), self.board_features.iter().copied()),
            parser: self.parser,
            thumbnail_extension: self.thumbnail_style.extension_fn(),
            chunk_downloader: ChunkDownloaderSiteProperties::new(self.chunked_downloads, self.chunked_downloads),
            ..SiteSetup::new(&self.name, &self.root)
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SitesConfig {
    #[serde(default = "default_include_builtin_sites")]
    pub include_builtin_sites: bool,
    #[serde(default)]
    pub disabled_sites: Vec<String>,
    #[serde(default, rename = "site")]
    pub sites: Vec<SiteDef>,
}

/// Used to specify serde default value for the "include_builtin_sites" field.
fn default_include_builtin_sites() -> bool {
    true
}

impl Default for SitesConfig {
    fn default() -> Self {
        Self {
            include_builtin_sites: true,
            disabled_sites: Vec::new(),
            sites: Vec::new(),
        }
    }
}

impl SitesConfig {
    pub fn from_file(path: &Path) -> Result<Self, SiteError> {
        let toml_str = util::read_file(path).map_err(SiteError::OpenConfig)?;

        Self::from_str(&toml_str)
    }

    pub fn load_default() -> Result<Self, SiteError> {
        DEFAULT_SITES_TOML.parse()
    }

    pub fn default_location() -> Option<PathBuf> {
        get_config_path().map(|p| p.join(SITES_CONFIG_FILENAME))
    }

    /// Load the config file at `path`, or the default config if it does not exist.
    pub fn from_location(path: &Path) -> Result<Self, SiteError> {
        if path.exists() {
            debug!("Loading sites config from {}.", path.display());
            Self::from_file(path)
        } else {
            Self::load_default()
        }
    }

    pub fn from_default_location() -> Result<Self, SiteError> {
        if let Some(path) = Self::default_location() {
            Self::from_location(&path)
        } else {
            Self::load_default()
        }
    }

    /// Write the default config to `path`, unless a file is already there.
    pub fn write_default(path: &Path) -> Result<bool, SiteError> {
        if path.exists() {
            return Ok(false);
        }

        util::write_new_file(path, DEFAULT_SITES_TOML).map_err(SiteError::CreateFile)?;

        info!("Wrote default sites config to {}.", path.display());

        Ok(true)
    }

    fn is_disabled(&self, name: &str) -> bool {
        self.disabled_sites.iter().any(|s| s == name)
    }

    /// Set up every configured site and register them, builtin sites first.
    pub fn build_registry(&self) -> Result<SiteRegistry, SiteError> {
        let mut setups: Vec<SiteSetup> = Vec::new();

        if self.include_builtin_sites {
            setups.extend(sites::builtin_setups());
        }

        setups.extend(self.sites.iter().map(SiteDef::to_setup));

        let mut builder = SiteRegistry::builder();

        for mut setup in setups {
            if self.is_disabled(&setup.name) {
                debug!("Site {} is disabled.", setup.name);
                setup.enabled = false;
            }

            builder.register(SiteAdapter::new(setup)?)?;
        }

        Ok(builder.build())
    }
}

impl FromStr for SitesConfig {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Self = toml::from_str(s).map_err(|err| SiteError::ParseConfig(Cow::Owned(err.to_string())))?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use crate::descriptor::*;
    use crate::sites::chan370;

    use super::*;

    const CONFIG: &str = r#"
        disabled-sites = ["370chan"]

        [[site]]
        name = "examplechan"
        root = "https://example.tld/"
        media-root = "https://media.example.tld/"
        parser = "tinyboard"
        thumbnail-style = "guessing"
        board-features = ["posting_spoiler"]
        boards = [
            { code = "a", title = "anime" },
            { code = "b", title = "random" },
        ]

        [[site]]
        name = "mirrorchan"
        root = "https://example.tld/"
    "#;

    #[test]
    fn default_config_includes_builtin_sites() {
        let config = SitesConfig::load_default().unwrap();
        let registry = config.build_registry().unwrap();

        assert!(config.sites.is_empty());
        assert!(registry.by_identity(chan370::SITE_NAME).unwrap().is_enabled());
    }

    #[test]
    fn user_sites_are_registered_after_builtins() {
        let config: SitesConfig = CONFIG.parse().unwrap();
        let registry = config.build_registry().unwrap();

        let names: Vec<&str> = registry.iter().map(|s| s.name()).collect();
        assert_eq!(names, vec![chan370::SITE_NAME, "examplechan", "mirrorchan"]);

        assert!(!registry.by_identity(chan370::SITE_NAME).unwrap().is_enabled());
        assert!(registry.resolve("https://370ch.lt/a/").is_err());
    }

    #[test]
    fn user_site_follows_its_definition() {
        let config: SitesConfig = CONFIG.parse().unwrap();
        let registry = config.build_registry().unwrap();

        let site = registry.resolve("https://media.example.tld/a/thumb/1.gif").unwrap();
        assert_eq!(site.name(), "examplechan");
        assert_eq!(site.comment_parser_type(), CommentParserType::Tinyboard);

        let a = BoardDescriptor::create("examplechan", "a");
        let args: EndpointArgs = [("ext", "mp4"), ("tim", "99")]
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        assert_eq!(
            site.thumbnail_url(&a, false, 0, &args).unwrap().as_str(),
            "https://media.example.tld/a/thumb/99.gif"
        );
        assert_eq!(
            site.thumbnail_url(&a, true, 0, &args).unwrap().as_str(),
            "https://media.example.tld/static/spoiler.png"
        );
    }

    #[test]
    fn builtin_sites_can_be_excluded() {
        let config: SitesConfig = "include-builtin-sites = false".parse().unwrap();

        assert!(config.build_registry().unwrap().is_empty());
    }

    #[test]
    fn duplicate_site_names_fail() {
        let config: SitesConfig = r#"
            [[site]]
            name = "370chan"
            root = "https://elsewhere.tld/"
        "#
        .parse()
        .unwrap();

        assert!(matches!(config.build_registry(), Err(SiteError::DuplicateSiteName(_))));
    }

    #[test]
    fn duplicate_board_codes_fail() {
        let config: SitesConfig = r#"
            include-builtin-sites = false

            [[site]]
            name = "dupechan"
            root = "https://dupe.tld/"
            boards = [{ code = "a", title = "one" }, { code = "a", title = "two" }]
        "#
        .parse()
        .unwrap();

        assert!(matches!(config.build_registry(), Err(SiteError::DuplicateBoardCode { .. })));
    }

    #[test]
    fn written_default_config_loads_back() {
        let dir = std::env::temp_dir().join(format!("chansite-config-{}", std::process::id()));
        let path = dir.join(SITES_CONFIG_FILENAME);
        let _ = std::fs::remove_dir_all(&dir);

        assert!(SitesConfig::write_default(&path).unwrap());
        assert!(!SitesConfig::write_default(&path).unwrap());

        let config = SitesConfig::from_location(&path).unwrap();
        assert!(config.include_builtin_sites);
        assert!(config.sites.is_empty());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn missing_config_file_falls_back_to_default() {
        let path = std::env::temp_dir().join("chansite-no-such-dir").join(SITES_CONFIG_FILENAME);

        assert!(SitesConfig::from_location(&path).unwrap().include_builtin_sites);
        assert!(matches!(SitesConfig::from_file(&path), Err(SiteError::OpenConfig(_))));
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        assert!(matches!(
            "disabled-sites = 5".parse::<SitesConfig>(),
            Err(SiteError::ParseConfig(_))
        ));
        assert!(matches!(
            "[[site]]\nname = \"x\"\nroot = \"https://x.tld/\"\nparser = \"nope\"".parse::<SitesConfig>(),
            Err(SiteError::ParseConfig(_))
        ));
    }
}
