use blog_series::store::{self, ContentDir};
use blog_series::{config, output, views};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "blog-series")]
#[command(about = "Series ordering and post navigation for markdown blogs")]
#[command(long_about = "\
Series ordering and post navigation for markdown blogs

Posts declare their series in frontmatter; optional definition files describe
each series and fix the order series are suggested in.

Content structure:

  content/
  ├── config.toml                  # Optional (see 'blog-series gen-config')
  ├── posts/
  │   ├── boot-why.md              # series: Getting Started With Spring Boot
  │   │                            # part: 1
  │   └── standalone.md            # No series = chronological navigation
  └── series/                      # Optional
      └── spring-boot.md           # title, description, level, icon, order

Ordering:
  Members:  part ascending (missing last) → title → slug
  Series:   definition 'order' (or fallback list) → title
  Prev/next within a series never leave the series.

Set RUST_LOG=debug for details on skipped files and collisions.")]
#[command(version)]
struct Cli {
    /// Content root directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all series in resolved order
    List,
    /// Show one series with its members and neighbouring series
    Series {
        /// Series slug, e.g. spring-core-concepts
        slug: String,
    },
    /// Show series box and previous/next links for one post
    Post {
        /// Post slug (file name without .md)
        slug: String,
    },
    /// Validate content and report skipped files and slug collisions
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
        Command::List => {
            let (site_config, content) = load_content(&cli.source)?;
            let site = store::load_site(&content, &content, &site_config)?;
            if cli.json {
                print_json(site.catalog.series())?;
            } else {
                output::print_listing(&site.catalog);
            }
        }
        Command::Series { slug } => {
            let (site_config, content) = load_content(&cli.source)?;
            let site = store::load_site(&content, &content, &site_config)?;
            let page = views::series_page(&slug, &site.catalog)
                .ok_or_else(|| format!("no series with slug '{slug}'"))?;
            if cli.json {
                print_json(&page)?;
            } else {
                output::print_series_page(&page);
            }
        }
        Command::Post { slug } => {
            let (site_config, content) = load_content(&cli.source)?;
            let site = store::load_site(&content, &content, &site_config)?;
            let ctx = views::post_context(&slug, &site.documents, &site.catalog)
                .ok_or_else(|| format!("no post with slug '{slug}'"))?;
            if cli.json {
                print_json(&ctx)?;
            } else {
                output::print_post_context(&ctx);
            }
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let (site_config, content) = load_content(&cli.source)?;
            let documents = content.load_documents()?;
            let definitions = content.load_definitions()?;
            let catalog = blog_series::series::build_series(
                &documents.items,
                definitions.as_ref().map(|d| d.items.as_slice()),
                &site_config.fallback,
                site_config.words_per_minute,
            );

            let mut skipped = documents.skipped;
            let definition_count = definitions.map(|d| {
                skipped.extend(d.skipped);
                d.items.len()
            });
            output::print_check(documents.items.len(), definition_count, &catalog, &skipped);

            if skipped.is_empty()
                && catalog.skipped_definitions.is_empty()
                && catalog.slug_collisions().is_empty()
            {
                println!("==> Content is valid");
            } else {
                println!("==> Content has warnings");
            }
        }
    }

    Ok(())
}

/// Load `config.toml` and locate the content directories it names.
fn load_content(source: &Path) -> Result<(config::SiteConfig, ContentDir), config::ConfigError> {
    let site_config = config::load_config(source)?;
    let content = ContentDir::from_config(source, &site_config);
    Ok((site_config, content))
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
