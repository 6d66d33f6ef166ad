use std::fs;
use std::path::PathBuf;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use mdsite::{BuildError, Config, copy_recursive, generate_pages};

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Generate a static HTML site from Markdown content")]
struct Cli {
    /// Site root directory (holds content/, static/ and the page template)
    #[arg(default_value = ".")]
    root: PathBuf,

    /// Output directory (defaults to <root>/public)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// URL prefix for absolute links, e.g. "/docs/"
    #[arg(short, long)]
    basepath: Option<String>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .without_time()
        .init();

    if let Err(e) = run() {
        error!("{e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), BuildError> {
    let cli = Cli::parse();
    let config = Config::load(&cli.root.join("config.toml"));
    let basepath = cli.basepath.unwrap_or(config.site.basepath);
    let output = cli.output.unwrap_or_else(|| cli.root.join(&config.dirs.output));

    let static_dir = cli.root.join(&config.dirs.static_dir);
    if static_dir.is_dir() {
        copy_recursive(&static_dir, &output)?;
    } else {
        fs::create_dir_all(&output)?;
    }

    let template = fs::read_to_string(cli.root.join(&config.site.template))?;
    let content = cli.root.join(&config.dirs.content);
    generate_pages(&content, &template, &output, &basepath)?;

    info!("site written to {}", output.display());
    Ok(())
}
