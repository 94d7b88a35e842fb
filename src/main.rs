use clap::{Parser, Subcommand};
use log::info;
use std::path::{Path, PathBuf};
use studio_site::cache::ContentCache;
use studio_site::config::{self, SiteConfig, SourceKind};
use studio_site::content::{ContentSource, ContentfulClient, LocalSource};
use studio_site::routes::{Route, Routes};
use studio_site::{generate, output};

fn version_string() -> &'static str {
    let hash = env!("STUDIO_SITE_GIT_HASH");
    if hash.is_empty() {
        env!("CARGO_PKG_VERSION")
    } else {
        // Leaked once at startup
        Box::leak(format!("{}@{hash}", env!("CARGO_PKG_VERSION")).into_boxed_str())
    }
}

#[derive(Parser)]
#[command(name = "studio-site")]
#[command(about = "Static site generator for a CMS-driven studio portfolio")]
#[command(long_about = "\
Static site generator for a CMS-driven studio portfolio

Content comes from Contentful (or a local JSON export of it). Every build
fetches each piece of content once, then writes:

  dist/
  ├── index.html                   # Home: hero, project cards, manifesto
  ├── about/index.html             # People: team, photos, press
  ├── projects/index.html          # All projects
  ├── projects/<slug>/index.html   # One per project, linking to the next
  ├── style.css
  └── site.js

The Contentful access token is read from CONTENTFUL_ACCESS_TOKEN (or the
variable named by contentful.access_token_env). A .env file in the working
directory is loaded first.

Run 'studio-site gen-config' to generate a documented config.toml.")]
#[command(version = version_string())]
struct Cli {
    /// Config file
    #[arg(long, default_value = "config.toml", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch content and write the static site
    Build,
    /// List every project path that will be generated
    Paths,
    /// Print the assembled page data for one route as JSON
    Props {
        /// Route path, e.g. `/`, `/about/`, `/projects/atlas/`
        route: String,
    },
    /// Assemble every route without writing anything
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Build => {
            let (site_config, source) = load(&cli.config)?;
            info!("Building site into {}", cli.output.display());
            let report = generate::build_site(&site_config, source.as_ref(), &cli.output).await?;
            output::print_build_output(&report);
        }
        Command::Paths => {
            let (_, source) = load(&cli.config)?;
            let cache = ContentCache::new();
            let paths = Routes::new(&cache, source.as_ref()).project_paths().await?;
            output::print_paths_output(&paths);
        }
        Command::Props { route } => {
            let route = Route::parse(&route)?;
            let (_, source) = load(&cli.config)?;
            let cache = ContentCache::new();
            let data = Routes::new(&cache, source.as_ref()).assemble(&route).await?;
            println!("{}", generate::page_data_json(&data)?);
        }
        Command::Check => {
            let (site_config, source) = load(&cli.config)?;
            let report = generate::check_site(&site_config, source.as_ref()).await?;
            output::print_check_output(&report);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

type Loaded = (SiteConfig, Box<dyn ContentSource>);

/// Load the config and open the content source it selects.
fn load(config_path: &Path) -> Result<Loaded, Box<dyn std::error::Error>> {
    let site_config = config::load_config(config_path)?;
    let source = open_source(&site_config)?;
    Ok((site_config, source))
}

/// Open the content source selected by `source.kind`.
fn open_source(
    site_config: &SiteConfig,
) -> Result<Box<dyn ContentSource>, Box<dyn std::error::Error>> {
    let source: Box<dyn ContentSource> = match site_config.source.kind {
        SourceKind::Contentful => {
            info!(
                "Reading content from Contentful space {} ({})",
                site_config.contentful.space_id, site_config.contentful.environment
            );
            Box::new(ContentfulClient::from_config(
                &site_config.contentful,
                &site_config.site.locale,
            )?)
        }
        SourceKind::Local => {
            let path = Path::new(&site_config.source.path);
            info!("Reading content from {}", path.display());
            Box::new(LocalSource::load(path)?)
        }
    };
    Ok(source)
}
