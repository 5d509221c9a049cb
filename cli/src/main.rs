use std::path::{Path, PathBuf};

use clap::{ArgAction, Parser};
use tracing::level_filters::LevelFilter;
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod command;
mod error;
mod result;

use chansite::config::sites::{SitesConfig, SITES_CONFIG_FILENAME};
use chansite::registry::{self, SiteRegistry};

use crate::error::*;
use crate::result::emit;

#[derive(Debug, Parser)]
#[clap(name = "chansite", version = env!("CARGO_PKG_VERSION"), author = env!("CARGO_PKG_AUTHORS"))]
struct Opt {
    #[clap(short = 'v', action = ArgAction::Count, help = "Verbosity")]
    verbosity: u8,

    #[clap(flatten)]
    general_options: GeneralOptions,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Parser)]
pub struct GeneralOptions {
    #[clap(long = "config-path", help = "Specify config path to use")]
    config_path: Option<PathBuf>,

    #[clap(long = "json", help = "Print results as JSON")]
    json: bool,
}

#[derive(Debug, Parser)]
enum Command {
    #[clap(name = "generate-config", about = "Generate default configuration files")]
    GenerateConfig,

    #[clap(name = "sites", about = "List registered sites")]
    Sites,

    #[clap(name = "boards", about = "List the boards of a site")]
    Boards {
        #[clap(help = "Site name")]
        site: String,
    },

    #[clap(name = "resolve", about = "Find the site and board or thread a url points to")]
    Resolve {
        #[clap(help = "URL to resolve")]
        url: String,
    },

    #[clap(name = "endpoints", about = "Show API endpoints for a board or thread")]
    Endpoints {
        #[clap(help = "Site name")]
        site: String,
        #[clap(help = "Board code")]
        board: String,
        #[clap(short = 't', long = "thread", help = "Thread number")]
        thread: Option<u64>,
    },

    #[clap(name = "thumbnail", about = "Show thumbnail and image urls for a media file")]
    Thumbnail {
        #[clap(help = "Site name")]
        site: String,
        #[clap(help = "Board code")]
        board: String,
        #[clap(long = "tim", help = "Server-assigned file name")]
        tim: String,
        #[clap(long = "ext", help = "Original file extension")]
        ext: String,
        #[clap(long = "spoiler", help = "The file is spoilered")]
        spoiler: bool,
        #[clap(long = "spoiler-variant", default_value = "0", help = "Custom spoiler image number")]
        spoiler_variant: u32,
    },

    #[clap(name = "features", about = "Show the features a site supports")]
    Features {
        #[clap(help = "Site name")]
        site: String,
    },
}

fn main() {
    let opt = Opt::parse();

    // Vary the output based on how many times the user used the "verbose" flag
    // (i.e. 'myprog -v -v -v' or 'myprog -vvv' vs 'myprog -v'
    let log_level = match opt.verbosity {
        0 => LevelFilter::OFF,
        1 => LevelFilter::ERROR,
        2 => LevelFilter::WARN,
        3 => LevelFilter::INFO,
        4 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // Initialize logging
    initialize_logging(log_level);

    debug!("Debug logging enabled.");

    let json = opt.general_options.json;

    let cmd_result = match sites_config_path(&opt.general_options) {
        Some(path) => run(opt.command, &path, json),
        None => Err(CliError::new(
            CliErrorKind::Config,
            "No config path specified, and no default path could be determined.",
        )),
    };

    match cmd_result {
        Ok(_) => {}
        Err(err) => {
            // Print error description to stderr
            eprintln!("{}", err.description);

            // Return the exit code that corresponds to the error kind
            std::process::exit(err.kind.exit_code());
        }
    };
}

fn run(cmd: Command, sites_config_path: &Path, json: bool) -> Result<(), CliError> {
    let load = || load_registry(sites_config_path);

    match cmd {
        Command::GenerateConfig => emit(json, command::generate_config(sites_config_path)),
        Command::Sites => emit(json, load().and_then(command::sites)),
        Command::Boards { site } => emit(json, load().and_then(|r| command::boards(r, &site))),
        Command::Resolve { url } => emit(json, load().and_then(|r| command::resolve(r, &url))),
        Command::Endpoints { site, board, thread } => emit(
            json,
            load().and_then(|r| command::endpoints(r, &site, &board, thread)),
        ),
        Command::Thumbnail {
            site,
            board,
            tim,
            ext,
            spoiler,
            spoiler_variant,
        } => {
            let request = command::ThumbnailRequest {
                site: &site,
                board: &board,
                tim: &tim,
                ext: &ext,
                spoiler,
                spoiler_variant,
            };

            emit(json, load().and_then(|r| command::thumbnail(r, &request)))
        }
        Command::Features { site } => emit(json, load().and_then(|r| command::features(r, &site))),
    }
}

fn sites_config_path(options: &GeneralOptions) -> Option<PathBuf> {
    options
        .config_path
        .as_ref()
        .map(|p| p.join(SITES_CONFIG_FILENAME))
        .or_else(SitesConfig::default_location)
}

fn load_registry(sites_config_path: &Path) -> Result<&'static SiteRegistry, CliError> {
    let config = SitesConfig::from_location(sites_config_path)?;

    Ok(registry::get_or_init_global(|| config.build_registry())?)
}

fn initialize_logging(level: LevelFilter) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
