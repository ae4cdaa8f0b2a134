//! Folio CLI
//!
//! Builds the static bundle for the blog and portfolio frontend and serves it
//! during development.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Folio.
#[derive(Parser)]
#[command(
    name = "folio",
    version,
    about = "Build and serve a personal blog and portfolio"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "folio.toml")]
    config: PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Build the site bundle
    Build {
        /// Output directory (defaults to build.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Include draft posts
        #[arg(long)]
        drafts: bool,
        /// Override site base URL (e.g., https://example.com)
        #[arg(long)]
        base_url: Option<String>,
        /// Fail when any post cannot be parsed
        #[arg(long)]
        strict: bool,
    },
    /// Serve a built site locally
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
        /// Directory to serve (defaults to build.output_dir)
        #[arg(short, long)]
        dir: Option<PathBuf>,
    },
    /// Create a new draft post
    New {
        /// Slug of the post (e.g., my-first-post)
        slug: String,
        /// Post kind (essay, project, note)
        #[arg(short, long, default_value = "essay")]
        kind: String,
    },
    /// Validate configuration and content
    Check {
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    folio::init_tracing(cli.verbose);

    match cli.command {
        Commands::Build {
            output,
            drafts,
            base_url,
            strict,
        } => {
            folio::cmd::build::run(
                &cli.config,
                output.as_deref(),
                drafts,
                base_url.as_deref(),
                strict,
            )?;
        }
        Commands::Serve { port, dir } => {
            folio::cmd::serve::run(&cli.config, port, dir.as_deref()).await?;
        }
        Commands::New { slug, kind } => {
            folio::cmd::new::run(&cli.config, &slug, &kind)?;
        }
        Commands::Check { strict } => {
            folio::cmd::check::run(&cli.config, strict)?;
        }
    }

    Ok(())
}
